//! AST-backed code analysis module.
//!
//! This module provides a language-agnostic interface for extracting "facts"
//! from source code using tree-sitter. Facts include:
//! - Declared identifiers (variables, functions, constants, classes)
//! - Unused variables and functions
//! - Comment counts
//! - Brace placement violations
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Source Text     │────▶│ Analysers    │────▶│ Identifiers,  │
//! └─────────────────┘     │ (Python,     │     │ UnusedReport, │
//!                         │  Java)       │     │ BraceReport   │
//!                         └──────────────┘     └───────────────┘
//!                                │
//!                                ▼
//!                         ┌──────────────┐
//!                         │ ParsedSource │ (owned by the caller)
//!                         └──────────────┘
//! ```
//!
//! # Adding a New Language
//!
//! 1. Create a new module in `src/analysis/languages/` (e.g., `go.rs`)
//! 2. Implement `LanguageAnalyser` trait
//! 3. Add a `Language` variant and its factory in `languages/mod.rs`
//! 4. Map its extensions in the default extension table
//!
//! See `languages/python.rs` for a reference implementation.

mod facts;
mod languages;
mod traits;
pub(crate) mod tree;
pub(crate) mod unused;

pub use facts::{
    BraceConfig, BraceReport, BraceStyle, BraceViolation, Declaration, DeclarationKind,
    Identifiers, Position, UnusedReport, UnusedSymbol,
};
pub use languages::{
    default_factories, language_for_extension, AnalyserFactory, JavaAnalyser, Language,
    PythonAnalyser,
};
pub use traits::{LanguageAnalyser, ParsedSource};
