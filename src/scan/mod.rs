//! Raw-text scanners.
//!
//! Comments and brace layout are properties of the text rather than of the
//! syntax tree, so these scanners work on source lines directly:
//! - `java`: `//` and `/* */` comment counting with string awareness
//! - `python`: `#` comment tokens, skipping string literals
//! - `braces`: K&R / Allman / Whitesmith brace placement

pub mod braces;
pub mod java;
pub mod python;

/// Split `source` into physical lines, accepting `\n`, `\r\n` and a bare
/// `\r` as terminators. Like `str::lines`, a final terminator does not start
/// an extra empty line.
pub fn physical_lines(source: &str) -> impl Iterator<Item = &str> {
    let mut rest = source;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(at) = rest.find(['\r', '\n']) else {
            let line = rest;
            rest = "";
            return Some(line);
        };
        let line = &rest[..at];
        let terminator = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[at + terminator..];
        Some(line)
    })
}
