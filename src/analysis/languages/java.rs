//! Java language analyser using tree-sitter.

use lazy_static::lazy_static;
use tree_sitter::{Language, Node};

use crate::analysis::tree::{self, is_field, name_identifier};
use crate::analysis::unused::{self, UseSet};
use crate::analysis::{
    BraceConfig, BraceReport, Declaration, DeclarationKind, Identifiers, LanguageAnalyser,
    ParsedSource, Position, UnusedReport,
};
use crate::error::AnalyserError;
use crate::scan;

/// Node kinds that introduce a type name.
const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

lazy_static! {
    static ref LANGUAGE: Language = tree_sitter_java::LANGUAGE.into();
}

pub struct JavaAnalyser {
    language: Language,
}

impl JavaAnalyser {
    pub fn new() -> Self {
        Self {
            language: LANGUAGE.clone(),
        }
    }

    /// Every declaration site, in document order.
    fn extract_declarations(&self, parsed: &ParsedSource) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        for node in tree::preorder(parsed.root()) {
            let (name_node, kind) = match node.kind() {
                k if TYPE_DECLARATIONS.contains(&k) => (name_identifier(node), DeclarationKind::Class),
                "method_declaration" => (name_identifier(node), DeclarationKind::Function),
                // `String... args` wraps the parameter name in a declarator
                "variable_declarator" if is_varargs_parameter(node) => continue,
                "variable_declarator" => {
                    let kind = if is_final_field(node) {
                        DeclarationKind::Constant
                    } else {
                        DeclarationKind::Variable
                    };
                    (name_identifier(node), kind)
                }
                "enhanced_for_statement" => (name_identifier(node), DeclarationKind::Variable),
                _ => continue,
            };

            if let Some(name_node) = name_node {
                declarations.push(Declaration {
                    name: parsed.node_text(name_node).to_string(),
                    kind,
                    position: Position::of(name_node),
                });
            }
        }

        declarations
    }

    /// Identifiers in expression position and invoked method names.
    fn extract_uses(&self, parsed: &ParsedSource) -> UseSet {
        let mut uses = UseSet::default();

        for node in tree::preorder(parsed.root()) {
            match node.kind() {
                "identifier" if is_member_reference(node) => {
                    uses.variables.insert(parsed.node_text(node).to_string());
                }
                "method_invocation" => {
                    if let Some(name) = node.child_by_field_name("name") {
                        uses.functions.insert(parsed.node_text(name).to_string());
                    }
                }
                _ => {}
            }
        }

        uses
    }
}

impl Default for JavaAnalyser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyser for JavaAnalyser {
    fn language_id(&self) -> &'static str {
        "java"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".java"]
    }

    fn parse(&self, source: &str) -> Result<ParsedSource, AnalyserError> {
        tree::parse_source(&self.language, self.language_id(), source)
    }

    fn get_identifiers(&self, parsed: &ParsedSource) -> Identifiers {
        Identifiers::from_declarations(&self.extract_declarations(parsed))
    }

    fn check_brace_style(&self, source: &str, config: &BraceConfig) -> Option<BraceReport> {
        tracing::warn!(
            style = %config.style,
            "java brace style checking is experimental and works on whole lines"
        );
        Some(scan::braces::check(source, config))
    }

    fn count_comments(&self, _parsed: &ParsedSource, source: &str) -> usize {
        scan::java::count_comments(source).total()
    }

    fn find_unused(&self, parsed: &ParsedSource) -> UnusedReport {
        let declarations = self.extract_declarations(parsed);
        let uses = self.extract_uses(parsed);
        unused::correlate(&declarations, &uses)
    }
}

/// A declarator of a field or interface constant declared with `final`.
///
/// Local `final` variables stay variables.
fn is_final_field(declarator: Node) -> bool {
    let Some(parent) = declarator.parent() else {
        return false;
    };
    if !matches!(parent.kind(), "field_declaration" | "constant_declaration") {
        return false;
    }

    let mut cursor = parent.walk();
    let modifiers = parent
        .children(&mut cursor)
        .find(|child| child.kind() == "modifiers");
    let Some(modifiers) = modifiers else {
        return false;
    };

    let mut cursor = modifiers.walk();
    let is_final = modifiers
        .children(&mut cursor)
        .any(|child| child.kind() == "final");
    is_final
}

fn is_varargs_parameter(declarator: Node) -> bool {
    declarator
        .parent()
        .is_some_and(|parent| parent.kind() == "spread_parameter")
}

/// Whether an identifier is a member reference: a bare name or the member
/// after a `.`.
///
/// Declaration names, invoked method names, labels, annotation names,
/// lambda parameters and package/import paths are not references. Neither
/// are qualifiers: `xs` in `xs.add(..)` and `obj` in `obj.field`.
fn is_member_reference(node: Node) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };

    match parent.kind() {
        "class_declaration"
        | "interface_declaration"
        | "enum_declaration"
        | "record_declaration"
        | "annotation_type_declaration"
        | "annotation_type_element_declaration"
        | "method_declaration"
        | "constructor_declaration"
        | "compact_constructor_declaration"
        | "variable_declarator"
        | "enhanced_for_statement"
        | "formal_parameter"
        | "catch_formal_parameter"
        | "receiver_parameter"
        | "resource"
        | "enum_constant"
        | "marker_annotation"
        | "annotation" => !is_field(parent, "name", node),
        "method_invocation" => {
            !is_field(parent, "name", node) && !is_field(parent, "object", node)
        }
        "field_access" => !is_field(parent, "object", node),
        "lambda_expression" => !is_field(parent, "parameters", node),
        "element_value_pair" => !is_field(parent, "key", node),
        "scoped_identifier"
        | "import_declaration"
        | "package_declaration"
        | "labeled_statement"
        | "break_statement"
        | "continue_statement"
        | "inferred_parameters"
        | "method_reference" => false,
        _ => true,
    }
}
