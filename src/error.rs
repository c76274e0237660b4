//! Error type shared by the analysers and the engine.

use thiserror::Error;

/// Errors that can occur while analysing a source file.
#[derive(Error, Debug)]
pub enum AnalyserError {
    #[error("no analyser registered for extension '{extension}' ({path})")]
    UnsupportedExtension { extension: String, path: String },
    #[error("{language} syntax error at {line}:{column}: {message}")]
    Syntax {
        language: &'static str,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8")]
    Encoding { path: String },
    #[error("failed to load grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
    #[error("tree-sitter returned no tree for {language} source")]
    NoTree { language: &'static str },
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AnalyserError {
    /// Whether this error comes from malformed source rather than setup or I/O.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, AnalyserError::Syntax { .. })
    }
}
