//! Core traits for language analysis.

use crate::analysis::{BraceConfig, BraceReport, Identifiers, UnusedReport};
use crate::error::AnalyserError;

/// Holds a parsed tree-sitter tree and the text it was parsed from.
///
/// Produced by [`LanguageAnalyser::parse`] and owned by the caller; the
/// extraction operations only borrow it.
pub struct ParsedSource {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The original source code (kept for node text extraction).
    pub source: String,
}

impl ParsedSource {
    /// Root node of the tree.
    pub fn root(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

/// Language-specific analyser.
///
/// Each supported language implements the five operations. All of them are
/// pure: no state survives between calls, so one instance can serve many
/// files and threads.
///
/// # Thread Safety
///
/// `tree_sitter::Parser` is not Sync, so implementations create a parser
/// per `parse` call and only keep the immutable grammar.
pub trait LanguageAnalyser: Send + Sync {
    /// Returns the language identifier (e.g., "python", "java").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this analyser handles (with the dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse source text into a syntax tree.
    ///
    /// Fails with [`AnalyserError::Syntax`] when the source is not valid in
    /// the target grammar.
    fn parse(&self, source: &str) -> Result<ParsedSource, AnalyserError>;

    /// Classify every declaration site in the tree.
    fn get_identifiers(&self, parsed: &ParsedSource) -> Identifiers;

    /// Check opening-brace placement on the raw text.
    ///
    /// Returns `None` for languages without braces.
    fn check_brace_style(&self, source: &str, config: &BraceConfig) -> Option<BraceReport>;

    /// Count comments, including docstring-like constructs.
    fn count_comments(&self, parsed: &ParsedSource, source: &str) -> usize;

    /// Report declared variables and functions that are never used.
    fn find_unused(&self, parsed: &ParsedSource) -> UnusedReport;

    /// Check if this analyser handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
