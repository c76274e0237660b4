//! Output formatting for analysis results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use std::collections::BTreeSet;
use std::fmt::Write;

use colored::*;

use crate::analysis::UnusedSymbol;
use crate::engine::AnalyserResult;

// =============================================================================
// JSON Format
// =============================================================================

/// Render a result as pretty-printed JSON.
pub fn to_json(result: &AnalyserResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Render a result as colored, human-readable text.
pub fn render_pretty(result: &AnalyserResult) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {} {}",
        "codelens".cyan().bold(),
        result.path,
        format!("({})", result.language).dimmed()
    );
    out.push('\n');

    write_identifiers(&mut out, result);
    let _ = writeln!(out, "  {} {}", "Comments:".bold(), result.comment_count);
    out.push('\n');
    write_unused(&mut out, result);
    write_braces(&mut out, result);

    out
}

fn write_identifiers(out: &mut String, result: &AnalyserResult) {
    let ids = &result.identifiers;
    let _ = writeln!(out, "  {} ({}):", "Identifiers".bold(), ids.len());
    write_name_set(out, "variables", &ids.variables);
    write_name_set(out, "functions", &ids.functions);
    write_name_set(out, "constants", &ids.constants);
    write_name_set(out, "classes", &ids.classes);
    out.push('\n');
}

fn write_name_set(out: &mut String, label: &str, names: &BTreeSet<String>) {
    let _ = write!(out, "    {:<11}", label.dimmed());
    if names.is_empty() {
        let _ = writeln!(out, "{}", "-".dimmed());
    } else {
        let joined: Vec<&str> = names.iter().map(String::as_str).collect();
        let _ = writeln!(out, "{}", joined.join(", "));
    }
}

fn write_unused(out: &mut String, result: &AnalyserResult) {
    let report = &result.unused_report;
    if report.is_empty() {
        let _ = writeln!(out, "  {} {}", "Unused:".bold(), "none".green());
        out.push('\n');
        return;
    }

    let total = report.unused_variables.len() + report.unused_functions.len();
    let _ = writeln!(out, "  {} ({}):", "Unused".bold(), total);
    write_unused_symbols(out, "variable", &report.unused_variables);
    write_unused_symbols(out, "function", &report.unused_functions);
    out.push('\n');
}

fn write_unused_symbols(out: &mut String, kind: &str, symbols: &[UnusedSymbol]) {
    for symbol in symbols {
        let _ = writeln!(
            out,
            "    {} {:<10}{}{}",
            "WARN ".yellow(),
            kind.dimmed(),
            symbol.name,
            format!(":{}", symbol.line).dimmed()
        );
    }
}

fn write_braces(out: &mut String, result: &AnalyserResult) {
    match &result.brace_report {
        None => {
            let _ = writeln!(out, "  {} {}", "Braces:".bold(), "not applicable".dimmed());
        }
        Some(report) if report.is_compliant() => {
            let _ = writeln!(out, "  {} {}", "Braces:".bold(), "✓ compliant".green());
        }
        Some(report) => {
            let _ = writeln!(out, "  {} ({}):", "Braces".bold(), report.violations.len());
            for v in &report.violations {
                let _ = writeln!(
                    out,
                    "    {} {}{}",
                    "ERROR".red(),
                    v.message,
                    format!(" (line {})", v.line).dimmed()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{BraceConfig, BraceStyle};
    use crate::engine::AnalyserEngine;

    fn plain() {
        colored::control::set_override(false);
    }

    fn java_result(style: Option<BraceStyle>) -> AnalyserResult {
        let source = "class App\n{\n    int unused = 1;\n    // note\n}\n";
        let config = style.map(BraceConfig::new);
        AnalyserEngine::new()
            .analyse_source("App.java", source, config.as_ref())
            .unwrap()
    }

    #[test]
    fn test_json_output() {
        let result = java_result(Some(BraceStyle::KAndR));
        let json = to_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["language"], "java");
        assert_eq!(value["comment_count"], 1);
        assert_eq!(value["identifiers"]["classes"][0], "App");
        assert_eq!(value["unused_report"]["unused_variables"][0]["name"], "unused");
        assert_eq!(value["unused_report"]["unused_variables"][0]["line"], 3);
        assert_eq!(value["brace_report"]["violations"][0]["line"], 2);
    }

    #[test]
    fn test_json_round_trips_into_result() {
        let result = java_result(None);
        let json = to_json(&result).unwrap();
        let back: AnalyserResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_pretty_lists_findings() {
        plain();
        let text = render_pretty(&java_result(Some(BraceStyle::KAndR)));

        assert!(text.contains("App.java"));
        assert!(text.contains("Comments: 1"));
        assert!(text.contains("unused:3"));
        assert!(text.contains("Brace should be on same line (K&R) (line 2)"));
    }

    #[test]
    fn test_pretty_without_brace_check() {
        plain();
        let text = render_pretty(&java_result(None));
        assert!(text.contains("Braces: not applicable"));
    }

    #[test]
    fn test_pretty_clean_python() {
        plain();
        let result = AnalyserEngine::new()
            .analyse_source("ok.py", "def main():\n    pass\n\nmain()\n", None)
            .unwrap();
        let text = render_pretty(&result);
        assert!(text.contains("Unused: none"));
        assert!(text.contains("functions  main"));
    }
}
