//! Fact structures extracted from AST analysis.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalyserError;

/// Source location of a node (both components 1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Position of a tree-sitter node.
    ///
    /// Nodes inserted by error recovery (`MISSING`) have no real location in
    /// the source and yield `None`.
    pub fn of(node: tree_sitter::Node) -> Option<Self> {
        if node.is_missing() {
            return None;
        }
        let start = node.start_position();
        Some(Self {
            line: start.row + 1, // tree-sitter is 0-indexed
            column: start.column + 1,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Kind of declaration site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Variable,
    Function,
    Constant,
    Class,
}

impl DeclarationKind {
    /// Convert to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Variable => "variable",
            DeclarationKind::Function => "function",
            DeclarationKind::Constant => "constant",
            DeclarationKind::Class => "class",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declaration site extracted from source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The declared name.
    pub name: String,
    /// The kind of declaration.
    pub kind: DeclarationKind,
    /// Location of the name, when known.
    pub position: Option<Position>,
}

impl Declaration {
    /// Line used in reports. Declarations without a position report line 0.
    pub fn line(&self) -> usize {
        self.position.map_or(0, |p| p.line)
    }
}

/// Declared names of a file, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifiers {
    pub variables: BTreeSet<String>,
    pub functions: BTreeSet<String>,
    pub constants: BTreeSet<String>,
    pub classes: BTreeSet<String>,
}

impl Identifiers {
    /// Group declarations into their categories.
    pub fn from_declarations<'a, I>(declarations: I) -> Self
    where
        I: IntoIterator<Item = &'a Declaration>,
    {
        let mut ids = Self::default();
        for decl in declarations {
            let set = match decl.kind {
                DeclarationKind::Variable => &mut ids.variables,
                DeclarationKind::Function => &mut ids.functions,
                DeclarationKind::Constant => &mut ids.constants,
                DeclarationKind::Class => &mut ids.classes,
            };
            set.insert(decl.name.clone());
        }
        ids
    }

    /// Total number of distinct names across all categories.
    pub fn len(&self) -> usize {
        self.variables.len() + self.functions.len() + self.constants.len() + self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A declared name with no detected use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedSymbol {
    pub name: String,
    /// Declaration line (1-indexed, 0 when unknown).
    pub line: usize,
}

/// Unused variables and functions, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedReport {
    pub unused_variables: Vec<UnusedSymbol>,
    pub unused_functions: Vec<UnusedSymbol>,
}

impl UnusedReport {
    /// Names of unused variables, in report order.
    pub fn variable_names(&self) -> Vec<&str> {
        self.unused_variables.iter().map(|s| s.name.as_str()).collect()
    }

    /// Names of unused functions, in report order.
    pub fn function_names(&self) -> Vec<&str> {
        self.unused_functions.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.unused_variables.is_empty() && self.unused_functions.is_empty()
    }
}

/// Opening-brace placement convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BraceStyle {
    #[default]
    #[serde(rename = "K&R", alias = "k&r", alias = "kr", alias = "KR")]
    KAndR,
    #[serde(alias = "allman")]
    Allman,
    #[serde(alias = "whitesmith")]
    Whitesmith,
}

impl BraceStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BraceStyle::KAndR => "K&R",
            BraceStyle::Allman => "Allman",
            BraceStyle::Whitesmith => "Whitesmith",
        }
    }
}

impl fmt::Display for BraceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BraceStyle {
    type Err = AnalyserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "k&r" | "kr" => Ok(BraceStyle::KAndR),
            "allman" => Ok(BraceStyle::Allman),
            "whitesmith" => Ok(BraceStyle::Whitesmith),
            other => Err(AnalyserError::Config(format!(
                "unknown brace style '{}' (expected K&R, Allman or Whitesmith)",
                other
            ))),
        }
    }
}

/// Brace style requested for a single analysis call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BraceConfig {
    pub style: BraceStyle,
}

impl BraceConfig {
    pub fn new(style: BraceStyle) -> Self {
        Self { style }
    }
}

/// A single brace placement violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BraceViolation {
    /// Line number (1-indexed).
    pub line: usize,
    pub message: String,
}

/// Brace style violations in source order. Empty means compliant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BraceReport {
    pub violations: Vec<BraceViolation>,
}

impl BraceReport {
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    /// Lines holding a violation, in source order.
    pub fn lines(&self) -> Vec<usize> {
        self.violations.iter().map(|v| v.line).collect()
    }
}
