//! Python language analyser using tree-sitter.

use std::collections::HashSet;

use lazy_static::lazy_static;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Query, QueryCursor};

use crate::analysis::tree::{self, is_field};
use crate::analysis::unused::{self, UseSet};
use crate::analysis::{
    BraceConfig, BraceReport, Declaration, DeclarationKind, Identifiers, LanguageAnalyser,
    ParsedSource, Position, UnusedReport,
};
use crate::error::AnalyserError;
use crate::scan;

const DECLARATION_QUERY: &str = r#"
; Assignment targets: a = ... (annotated forms are filtered out below)
(assignment
  left: (identifier) @variable
) @assignment

; Destructuring targets: a, b = ... / (a, b) = ... / [a, b] = ...
(assignment
  left: (pattern_list (identifier) @variable)
) @assignment

(assignment
  left: (tuple_pattern (identifier) @variable)
) @assignment

(assignment
  left: (list_pattern (identifier) @variable)
) @assignment

; Function definitions (nested and async included)
(function_definition
  name: (identifier) @function
)

; Class definitions
(class_definition
  name: (identifier) @class
)
"#;

lazy_static! {
    static ref LANGUAGE: Language = tree_sitter_python::LANGUAGE.into();
    static ref DECLARATIONS: Query =
        Query::new(&LANGUAGE, DECLARATION_QUERY).expect("python declaration query is valid");
}

pub struct PythonAnalyser {
    language: Language,
}

impl PythonAnalyser {
    pub fn new() -> Self {
        Self {
            language: LANGUAGE.clone(),
        }
    }

    /// Every declaration site, in document order.
    fn extract_declarations(&self, parsed: &ParsedSource) -> Vec<Declaration> {
        let query = &*DECLARATIONS;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, parsed.root(), parsed.source.as_bytes());

        let mut declarations = Vec::new();
        let mut seen = HashSet::new();

        while let Some(m) = matches.next() {
            let mut name_node = None;
            let mut kind = None;
            let mut annotated = false;

            for capture in m.captures {
                match query.capture_names()[capture.index as usize] {
                    "variable" => {
                        name_node = Some(capture.node);
                        kind = Some(DeclarationKind::Variable);
                    }
                    "function" => {
                        name_node = Some(capture.node);
                        kind = Some(DeclarationKind::Function);
                    }
                    "class" => {
                        name_node = Some(capture.node);
                        kind = Some(DeclarationKind::Class);
                    }
                    // `x: int` and `x: int = 0` are annotated assignments,
                    // which declare nothing
                    "assignment" => {
                        annotated = capture.node.child_by_field_name("type").is_some();
                    }
                    _ => {}
                }
            }

            if annotated {
                continue;
            }
            if let (Some(node), Some(kind)) = (name_node, kind) {
                if !seen.insert(node.id()) {
                    continue;
                }
                declarations.push(Declaration {
                    name: parsed.node_text(node).to_string(),
                    kind,
                    position: Position::of(node),
                });
            }
        }

        declarations.sort_by_key(|d| d.position);
        declarations
    }

    /// Names read as values and names called directly.
    fn extract_uses(&self, parsed: &ParsedSource) -> UseSet {
        let mut uses = UseSet::default();

        for node in tree::preorder(parsed.root()) {
            match node.kind() {
                "identifier" if is_load(node) => {
                    uses.variables.insert(parsed.node_text(node).to_string());
                }
                "call" => {
                    if let Some(callee) = node
                        .child_by_field_name("function")
                        .filter(|f| f.kind() == "identifier")
                    {
                        uses.functions.insert(parsed.node_text(callee).to_string());
                    }
                }
                _ => {}
            }
        }

        uses
    }

    /// Module, class and function bodies whose first statement is a docstring.
    fn count_docstrings(&self, parsed: &ParsedSource) -> usize {
        tree::preorder(parsed.root())
            .filter_map(|node| match node.kind() {
                "module" => Some(node),
                "class_definition" | "function_definition" => node.child_by_field_name("body"),
                _ => None,
            })
            .filter_map(first_statement)
            .filter_map(|stmt| string_statement(parsed, stmt))
            .filter(|literal| is_docstring(parsed, *literal))
            .count()
    }

    /// Free-floating string statements that are not first in their block.
    fn count_loose_strings(&self, parsed: &ParsedSource) -> usize {
        tree::preorder(parsed.root())
            .filter(|node| node.kind() == "expression_statement")
            .filter(|node| string_statement(parsed, *node).is_some())
            .filter(|node| !is_first_statement(*node))
            .count()
    }
}

impl Default for PythonAnalyser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyser for PythonAnalyser {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".py"]
    }

    fn parse(&self, source: &str) -> Result<ParsedSource, AnalyserError> {
        tree::parse_source(&self.language, self.language_id(), source)
    }

    fn get_identifiers(&self, parsed: &ParsedSource) -> Identifiers {
        Identifiers::from_declarations(&self.extract_declarations(parsed))
    }

    fn check_brace_style(&self, _source: &str, _config: &BraceConfig) -> Option<BraceReport> {
        None
    }

    fn count_comments(&self, parsed: &ParsedSource, source: &str) -> usize {
        let tokens = scan::python::comment_tokens(source);
        if let Some(line) = tokens.stopped_at {
            tracing::debug!(line, "comment tokenizer stopped early, keeping comments found so far");
        }

        tokens.lines.len() + self.count_docstrings(parsed) + self.count_loose_strings(parsed)
    }

    fn find_unused(&self, parsed: &ParsedSource) -> UnusedReport {
        let declarations = self.extract_declarations(parsed);
        let uses = self.extract_uses(parsed);
        unused::correlate(&declarations, &uses)
    }
}

/// Whether an identifier is read rather than bound.
///
/// Binding sites are assignment and loop targets, parameters, definition
/// names, import names and `as` targets. Attribute names after a dot and
/// keyword-argument names are not variable references at all.
fn is_load(node: Node) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };

    match parent.kind() {
        "function_definition" | "class_definition" | "keyword_argument" | "default_parameter"
        | "typed_default_parameter" | "named_expression" => !is_field(parent, "name", node),
        "assignment" | "augmented_assignment" | "for_statement" | "for_in_clause" => {
            !is_field(parent, "left", node)
        }
        "attribute" => !is_field(parent, "attribute", node),
        "as_pattern" | "except_clause" => !is_field(parent, "alias", node),
        "parameters" | "lambda_parameters" | "typed_parameter" | "list_splat_pattern"
        | "dictionary_splat_pattern" | "pattern_list" | "tuple_pattern" | "list_pattern"
        | "as_pattern_target" | "dotted_name" | "aliased_import" | "import_statement"
        | "import_from_statement" | "global_statement" | "nonlocal_statement"
        | "delete_statement" => false,
        _ => true,
    }
}

/// Named children other than comments.
fn statements<'a>(block: Node<'a>) -> impl Iterator<Item = Node<'a>> {
    (0..block.named_child_count())
        .filter_map(move |i| block.named_child(i))
        .filter(|n| n.kind() != "comment")
}

fn first_statement<'a>(block: Node<'a>) -> Option<Node<'a>> {
    statements(block).next()
}

fn is_first_statement(node: Node) -> bool {
    node.parent()
        .and_then(first_statement)
        .is_some_and(|first| first.id() == node.id())
}

/// The string literal of a statement consisting of nothing but that literal.
///
/// f-strings are expressions, not literals, and are ignored.
fn string_statement<'a>(parsed: &ParsedSource, stmt: Node<'a>) -> Option<Node<'a>> {
    if stmt.kind() != "expression_statement" {
        return None;
    }
    let mut children = statements(stmt);
    let mut expr = children.next()?;
    if children.next().is_some() {
        return None;
    }
    while expr.kind() == "parenthesized_expression" {
        expr = statements(expr).next()?;
    }
    if !matches!(expr.kind(), "string" | "concatenated_string") {
        return None;
    }

    let formatted = string_parts(expr).any(|part| {
        let (prefix, _) = split_literal(parsed.node_text(part));
        prefix.contains(['f', 'F'])
    });
    if formatted {
        None
    } else {
        Some(expr)
    }
}

/// The `string` nodes making up a literal.
fn string_parts<'a>(literal: Node<'a>) -> impl Iterator<Item = Node<'a>> {
    let parts: Vec<Node<'a>> = if literal.kind() == "concatenated_string" {
        statements(literal).collect()
    } else {
        vec![literal]
    };
    parts.into_iter()
}

/// Prefix letters and body of a string node, e.g. `rb` and `abc` for `rb"abc"`.
fn split_literal(text: &str) -> (&str, &str) {
    let Some(quote_at) = text.find(['"', '\'']) else {
        return ("", text);
    };
    let (prefix, quoted) = text.split_at(quote_at);
    let delimiter = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
        3
    } else {
        1
    };
    let body = quoted
        .get(delimiter..quoted.len().saturating_sub(delimiter))
        .unwrap_or("");
    (prefix, body)
}

/// A docstring is a non-empty text literal; bytes literals never qualify.
fn is_docstring(parsed: &ParsedSource, literal: Node) -> bool {
    let mut content = String::new();
    for part in string_parts(literal) {
        let (prefix, body) = split_literal(parsed.node_text(part));
        let prefix = prefix.to_ascii_lowercase();
        if prefix.contains('b') {
            return false;
        }
        content.push_str(body);
    }
    !content.trim().is_empty()
}
