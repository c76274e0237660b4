//! Tree-sitter helpers shared by the language analysers.

use tree_sitter::{Language, Node, Parser, TreeCursor};

use super::ParsedSource;
use crate::error::AnalyserError;

/// Parse `source` with `language` and reject trees that needed error recovery.
pub fn parse_source(
    language: &Language,
    language_id: &'static str,
    source: &str,
) -> Result<ParsedSource, AnalyserError> {
    let mut parser = Parser::new();
    parser.set_language(language)?;
    let tree = parser
        .parse(source, None)
        .ok_or(AnalyserError::NoTree {
            language: language_id,
        })?;

    let parsed = ParsedSource {
        tree,
        source: source.to_string(),
    };

    if let Some(node) = first_syntax_error(parsed.root()) {
        let start = node.start_position();
        let message = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            let text = parsed.node_text(node);
            let snippet: String = text.lines().next().unwrap_or("").chars().take(40).collect();
            format!("unexpected `{}`", snippet.trim())
        };
        return Err(AnalyserError::Syntax {
            language: language_id,
            line: start.row + 1,
            column: start.column + 1,
            message,
        });
    }

    Ok(parsed)
}

/// First `ERROR` or `MISSING` node in document order.
pub fn first_syntax_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }
    preorder(root).find(|n| n.is_error() || n.is_missing())
}

/// Pre-order (document order) iterator over every node below and including `root`.
pub fn preorder(root: Node<'_>) -> Preorder<'_> {
    Preorder {
        cursor: root.walk(),
        finished: false,
    }
}

pub struct Preorder<'tree> {
    cursor: TreeCursor<'tree>,
    finished: bool,
}

impl<'tree> Iterator for Preorder<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Node<'tree>> {
        if self.finished {
            return None;
        }
        let node = self.cursor.node();
        if self.cursor.goto_first_child() {
            return Some(node);
        }
        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
            if !self.cursor.goto_parent() {
                self.finished = true;
                return Some(node);
            }
        }
    }
}

/// Whether `child` is the node stored under `field` of `parent`.
pub fn is_field(parent: Node, field: &str, child: Node) -> bool {
    let mut cursor = parent.walk();
    let found = parent
        .children_by_field_name(field, &mut cursor)
        .any(|n| n.id() == child.id());
    found
}

/// Name node of a declaration, if it is a plain identifier.
pub fn name_identifier(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("name")
        .filter(|n| n.kind() == "identifier")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn python() -> Language {
        tree_sitter_python::LANGUAGE.into()
    }

    #[test]
    fn test_preorder_visits_in_document_order() {
        let parsed = parse_source(&python(), "python", "a = 1\nb = 2\n").unwrap();
        let identifiers: Vec<_> = preorder(parsed.root())
            .filter(|n| n.kind() == "identifier")
            .map(|n| parsed.node_text(n).to_string())
            .collect();
        assert_eq!(identifiers, vec!["a", "b"]);
    }

    #[test]
    fn test_preorder_starts_at_root() {
        let parsed = parse_source(&python(), "python", "x = 1\n").unwrap();
        let first = preorder(parsed.root()).next().unwrap();
        assert_eq!(first.kind(), "module");
    }

    #[test]
    fn test_syntax_error_reports_location() {
        let err = parse_source(&python(), "python", "x = 1\ndef broken(:\n    pass\n")
            .err()
            .expect("should fail");
        match err {
            AnalyserError::Syntax { language, line, .. } => {
                assert_eq!(language, "python");
                assert!(line >= 2, "error should be on or after line 2, got {}", line);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_source_parses() {
        let parsed = parse_source(&python(), "python", "").unwrap();
        assert_eq!(parsed.root().named_child_count(), 0);
    }
}
