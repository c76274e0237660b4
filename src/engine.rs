//! Per-file analysis pipeline.
//!
//! The engine picks an analyser by file extension, parses the text once and
//! runs the four extraction operations over the same tree.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{
    default_factories, AnalyserFactory, BraceConfig, BraceReport, Identifiers, LanguageAnalyser,
    UnusedReport,
};
use crate::config::AnalyserConfig;
use crate::error::AnalyserError;

/// Everything learned about one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyserResult {
    pub path: String,
    pub language: String,
    pub identifiers: Identifiers,
    /// `None` when no brace style was requested or the language has no braces.
    pub brace_report: Option<BraceReport>,
    pub comment_count: usize,
    pub unused_report: UnusedReport,
}

/// Dispatches files to language analysers by extension.
pub struct AnalyserEngine {
    factories: HashMap<String, AnalyserFactory>,
    brace_config: Option<BraceConfig>,
}

impl AnalyserEngine {
    /// Engine with the built-in `.py` and `.java` mappings.
    pub fn new() -> Self {
        Self {
            factories: default_factories(),
            brace_config: None,
        }
    }

    /// Engine with the built-in mappings extended by `config`.
    ///
    /// Configured extensions override built-in ones. A configured brace
    /// style applies to every call that does not pass its own.
    pub fn with_config(config: &AnalyserConfig) -> Self {
        let mut engine = Self::new();
        for (ext, language) in &config.extensions {
            engine.factories.insert(ext.clone(), language.factory());
        }
        engine.brace_config = config.brace_config();
        engine
    }

    /// Mapped extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }

    /// Analyser registered for the extension of `path`.
    pub fn analyser_for(&self, path: &Path) -> Result<Box<dyn LanguageAnalyser>, AnalyserError> {
        let extension = dotted_extension(path);
        match self.factories.get(&extension) {
            Some(factory) => Ok(factory()),
            None => Err(AnalyserError::UnsupportedExtension {
                extension,
                path: path.display().to_string(),
            }),
        }
    }

    /// Read `path` as UTF-8 and analyse it.
    pub fn analyse_file<P: AsRef<Path>>(
        &self,
        path: P,
        brace_config: Option<&BraceConfig>,
    ) -> Result<AnalyserResult, AnalyserError> {
        let path = path.as_ref();
        // Dispatch first so unsupported files are never read.
        let analyser = self.analyser_for(path)?;

        let bytes = fs::read(path).map_err(|source| AnalyserError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let source = String::from_utf8(bytes).map_err(|_| AnalyserError::Encoding {
            path: path.display().to_string(),
        })?;

        self.run(analyser.as_ref(), path, &source, brace_config)
    }

    /// Analyse in-memory text. `path` only selects the analyser and labels
    /// the result.
    pub fn analyse_source<P: AsRef<Path>>(
        &self,
        path: P,
        source: &str,
        brace_config: Option<&BraceConfig>,
    ) -> Result<AnalyserResult, AnalyserError> {
        let path = path.as_ref();
        let analyser = self.analyser_for(path)?;
        self.run(analyser.as_ref(), path, source, brace_config)
    }

    fn run(
        &self,
        analyser: &dyn LanguageAnalyser,
        path: &Path,
        source: &str,
        brace_config: Option<&BraceConfig>,
    ) -> Result<AnalyserResult, AnalyserError> {
        tracing::debug!(
            path = %path.display(),
            language = analyser.language_id(),
            "dispatching file"
        );

        let parsed = analyser.parse(source)?;

        let identifiers = analyser.get_identifiers(&parsed);
        let brace_report = brace_config
            .or(self.brace_config.as_ref())
            .and_then(|config| analyser.check_brace_style(source, config));
        let comment_count = analyser.count_comments(&parsed, source);
        let unused_report = analyser.find_unused(&parsed);

        tracing::debug!(
            path = %path.display(),
            identifiers = identifiers.len(),
            comments = comment_count,
            unused = unused_report.unused_variables.len() + unused_report.unused_functions.len(),
            "analysis complete"
        );

        Ok(AnalyserResult {
            path: path.display().to_string(),
            language: analyser.language_id().to_string(),
            identifiers,
            brace_report,
            comment_count,
            unused_report,
        })
    }
}

impl Default for AnalyserEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// `.ext` for `path`, or an empty string when it has none.
fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
