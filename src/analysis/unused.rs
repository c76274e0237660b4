//! Declaration/use correlation for unused symbol detection.

use std::collections::{HashMap, HashSet};

use super::{Declaration, DeclarationKind, UnusedReport, UnusedSymbol};

/// Names referenced somewhere in a file, split by the kind of reference.
#[derive(Debug, Default)]
pub struct UseSet {
    /// Names read as values.
    pub variables: HashSet<String>,
    /// Names invoked as functions.
    pub functions: HashSet<String>,
}

/// Declared names keyed by name, remembering first-seen order and line.
#[derive(Debug, Default)]
struct DeclaredNames {
    order: Vec<String>,
    lines: HashMap<String, usize>,
}

impl DeclaredNames {
    fn insert(&mut self, decl: &Declaration) {
        if !self.lines.contains_key(&decl.name) {
            self.order.push(decl.name.clone());
            self.lines.insert(decl.name.clone(), decl.line());
        }
    }

    fn unused(&self, uses: &HashSet<String>) -> Vec<UnusedSymbol> {
        self.order
            .iter()
            .filter(|name| !uses.contains(*name))
            .map(|name| UnusedSymbol {
                name: name.clone(),
                line: self.lines[name],
            })
            .collect()
    }
}

/// Build the unused report from declarations (in traversal order) and uses.
///
/// Matching is by bare name only: a use anywhere in the file satisfies
/// every declaration of that name. Constants and classes are not reported.
pub fn correlate(declarations: &[Declaration], uses: &UseSet) -> UnusedReport {
    let mut variables = DeclaredNames::default();
    let mut functions = DeclaredNames::default();

    for decl in declarations {
        match decl.kind {
            DeclarationKind::Variable => variables.insert(decl),
            DeclarationKind::Function => functions.insert(decl),
            DeclarationKind::Constant | DeclarationKind::Class => {}
        }
    }

    UnusedReport {
        unused_variables: variables.unused(&uses.variables),
        unused_functions: functions.unused(&uses.functions),
    }
}
