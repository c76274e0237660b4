//! Codelens - multi-language static source analysis.
//!
//! Codelens takes a single source file and reports what it declares, how
//! much of it is commentary, which variables and functions are never used,
//! and optionally whether its opening braces follow a given style.
//!
//! # Architecture
//!
//! The codebase uses tree-sitter for AST-based analysis:
//!
//! - `analysis`: Language analysers and the facts they produce
//! - `scan`: Raw-text scanners (comments, brace placement)
//! - `engine`: Extension dispatch and the per-file pipeline
//! - `config`: YAML configuration
//! - `report`: Output formatting (pretty text, JSON)
//!
//! # Adding a New Language
//!
//! See `src/analysis/languages/` for examples. Implement `LanguageAnalyser`
//! trait and register in `languages/mod.rs`.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod scan;

pub use analysis::{
    BraceConfig, BraceReport, BraceStyle, Identifiers, JavaAnalyser, Language, LanguageAnalyser,
    ParsedSource, PythonAnalyser, UnusedReport,
};
pub use config::AnalyserConfig;
pub use engine::{AnalyserEngine, AnalyserResult};
pub use error::AnalyserError;
