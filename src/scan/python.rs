//! Lexical comment tokenizer for Python source text.
//!
//! Only the token classes that can hide a `#` are recognised: comments and
//! string literals (any prefix, single or triple quoted). Everything else is
//! skipped character by character.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InString { quote: char, triple: bool },
    EscapePending { quote: char, triple: bool },
}

/// Outcome of tokenizing a whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentTokens {
    /// Lines (1-indexed) holding a comment token.
    pub lines: BTreeSet<usize>,
    /// Line where tokenizing stopped early, if it did.
    pub stopped_at: Option<usize>,
}

/// Find every line that holds a `#` comment token.
///
/// Tokenizer errors (an unterminated string) end the scan; lines found up to
/// that point are kept.
pub fn comment_tokens(source: &str) -> CommentTokens {
    // `\r\n` and a bare `\r` both end a line
    let chars: Vec<char> = source
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .collect();
    let mut tokens = CommentTokens::default();
    let mut state = State::Normal;
    let mut line = 1;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        match state {
            State::Normal => match ch {
                '#' => {
                    tokens.lines.insert(line);
                    while i < chars.len() && chars[i] != '\n' {
                        i += 1;
                    }
                    continue;
                }
                '"' | '\'' => {
                    let triple = chars.get(i + 1) == Some(&ch) && chars.get(i + 2) == Some(&ch);
                    state = State::InString { quote: ch, triple };
                    i += if triple { 3 } else { 1 };
                    continue;
                }
                '\n' => line += 1,
                _ => {}
            },
            State::InString { quote, triple } => match ch {
                '\\' => state = State::EscapePending { quote, triple },
                '\n' if !triple => {
                    tokens.stopped_at = Some(line);
                    return tokens;
                }
                '\n' => line += 1,
                c if c == quote => {
                    if !triple {
                        state = State::Normal;
                    } else if chars.get(i + 1) == Some(&quote) && chars.get(i + 2) == Some(&quote) {
                        state = State::Normal;
                        i += 3;
                        continue;
                    }
                }
                _ => {}
            },
            State::EscapePending { quote, triple } => {
                // A backslash before a newline continues the literal.
                if ch == '\n' {
                    line += 1;
                }
                state = State::InString { quote, triple };
            }
        }

        i += 1;
    }

    if state != State::Normal {
        tokens.stopped_at = Some(line);
    }
    tokens
}
