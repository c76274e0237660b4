//! Line-oriented opening-brace placement check.
//!
//! This is a best-effort heuristic. It looks at whole physical lines that
//! contain a `{` and never tokenizes them, so braces inside strings,
//! comments and array initializers are judged like any other brace.

use crate::analysis::{BraceConfig, BraceReport, BraceStyle, BraceViolation};

/// Check every line holding an opening brace against `config.style`.
pub fn check(source: &str, config: &BraceConfig) -> BraceReport {
    let style = config.style;
    let violations = super::physical_lines(source)
        .enumerate()
        .filter(|(_, line)| line.contains('{'))
        .filter(|(_, line)| violates(style, line))
        .map(|(idx, _)| BraceViolation {
            line: idx + 1,
            message: message(style),
        })
        .collect();

    BraceReport { violations }
}

fn violates(style: BraceStyle, line: &str) -> bool {
    let alone = line.trim() == "{";
    match style {
        BraceStyle::KAndR => alone,
        BraceStyle::Allman => !alone,
        BraceStyle::Whitesmith => !alone || !line.starts_with([' ', '\t']),
    }
}

fn message(style: BraceStyle) -> String {
    match style {
        BraceStyle::KAndR => format!("Brace should be on same line ({})", style),
        BraceStyle::Allman => format!("Brace should be on its own line ({})", style),
        BraceStyle::Whitesmith => format!("Brace should be indented on its own line ({})", style),
    }
}
