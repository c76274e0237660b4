//! Integration tests for the analysis engine.
//!
//! These tests run the full pipeline against the testdata fixtures and
//! against files written to temporary directories.

use std::fs;
use std::path::PathBuf;

use codelens::{AnalyserConfig, AnalyserEngine, AnalyserError, BraceConfig, BraceStyle};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Python Fixtures
// =============================================================================

#[test]
fn test_python_fixture() {
    setup();

    let engine = AnalyserEngine::new();
    let result = engine
        .analyse_file(testdata_path().join("sample.py"), None)
        .expect("sample.py should analyse");

    assert_eq!(result.language, "python");
    assert!(result.identifiers.functions.contains("load"));
    assert!(result.identifiers.functions.contains("add"));
    assert!(result.identifiers.classes.contains("Store"));
    assert!(result.identifiers.constants.is_empty());

    // Module, function and class docstrings, one comment, one loose string.
    assert_eq!(result.comment_count, 5);

    assert_eq!(
        result.unused_report.variable_names(),
        vec!["LIMIT", "stale", "items"]
    );
    assert_eq!(
        result.unused_report.function_names(),
        vec!["unused_helper", "add"]
    );
    assert!(result.brace_report.is_none());
}

#[test]
fn test_python_ignores_requested_brace_style() {
    setup();

    let engine = AnalyserEngine::new();
    let config = BraceConfig::new(BraceStyle::Allman);
    let result = engine
        .analyse_file(testdata_path().join("sample.py"), Some(&config))
        .unwrap();
    assert!(result.brace_report.is_none());
}

// =============================================================================
// Java Fixtures
// =============================================================================

#[test]
fn test_java_fixture() {
    setup();

    let engine = AnalyserEngine::new();
    let result = engine
        .analyse_file(testdata_path().join("HelloWorld.java"), None)
        .expect("HelloWorld.java should analyse");

    assert_eq!(result.language, "java");
    assert!(result.identifiers.classes.contains("HelloWorld"));
    assert!(result.identifiers.constants.contains("LIMIT"));
    assert!(!result.identifiers.variables.contains("LIMIT"));
    assert_eq!(result.comment_count, 3);

    assert_eq!(result.unused_report.variable_names(), vec!["unusedVar"]);
    assert_eq!(result.unused_report.unused_variables[0].line, 8);
    assert_eq!(
        result.unused_report.function_names(),
        vec!["main", "unusedFunc"]
    );
}

#[test]
fn test_java_brace_styles_diverge() {
    setup();

    let engine = AnalyserEngine::new();
    let kr = BraceConfig::new(BraceStyle::KAndR);
    let allman = BraceConfig::new(BraceStyle::Allman);

    let hello = testdata_path().join("HelloWorld.java");
    let report = engine.analyse_file(&hello, Some(&kr)).unwrap().brace_report.unwrap();
    assert!(report.is_compliant());
    let report = engine.analyse_file(&hello, Some(&allman)).unwrap().brace_report.unwrap();
    assert_eq!(report.lines(), vec![2, 5, 14, 19]);

    let allman_file = testdata_path().join("Allman.java");
    let report = engine.analyse_file(&allman_file, Some(&allman)).unwrap().brace_report.unwrap();
    assert!(report.is_compliant());
    let report = engine.analyse_file(&allman_file, Some(&kr)).unwrap().brace_report.unwrap();
    assert_eq!(report.lines(), vec![2, 4]);
}

#[test]
fn test_java_syntax_error() {
    setup();

    let engine = AnalyserEngine::new();
    let err = engine
        .analyse_file(testdata_path().join("broken.java"), None)
        .unwrap_err();
    match err {
        AnalyserError::Syntax { language, line, .. } => {
            assert_eq!(language, "java");
            assert!(line >= 2);
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_fixture_drives_engine() {
    setup();

    let config = AnalyserConfig::parse_file(testdata_path().join("codelens.yaml")).unwrap();
    let engine = AnalyserEngine::with_config(&config);
    assert_eq!(engine.supported_extensions(), vec![".java", ".py", ".pyw"]);

    let result = engine
        .analyse_file(testdata_path().join("Allman.java"), None)
        .unwrap();
    assert!(result.brace_report.unwrap().is_compliant());

    // An explicit style wins over the configured one.
    let kr = BraceConfig::new(BraceStyle::KAndR);
    let result = engine
        .analyse_file(testdata_path().join("Allman.java"), Some(&kr))
        .unwrap();
    assert_eq!(result.brace_report.unwrap().violations.len(), 2);
}

#[test]
fn test_configured_extension_on_disk() {
    setup();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gui.pyw");
    fs::write(&path, "def show():\n    pass\n").unwrap();

    let config = AnalyserConfig::from_yaml_str("extensions:\n  .pyw: python\n").unwrap();
    let result = AnalyserEngine::with_config(&config)
        .analyse_file(&path, None)
        .unwrap();
    assert_eq!(result.language, "python");
    assert_eq!(result.unused_report.function_names(), vec!["show"]);

    // The default engine does not know the extension.
    let err = AnalyserEngine::new().analyse_file(&path, None).unwrap_err();
    assert!(matches!(err, AnalyserError::UnsupportedExtension { .. }));
}

// =============================================================================
// File Errors
// =============================================================================

#[test]
fn test_missing_file_is_io_error() {
    setup();

    let dir = tempfile::tempdir().unwrap();
    let err = AnalyserEngine::new()
        .analyse_file(dir.path().join("absent.py"), None)
        .unwrap_err();
    assert!(matches!(err, AnalyserError::Io { .. }));
}

#[test]
fn test_non_utf8_file_is_encoding_error() {
    setup();

    let err = AnalyserEngine::new()
        .analyse_file(testdata_path().join("latin1.py"), None)
        .unwrap_err();
    assert!(matches!(err, AnalyserError::Encoding { .. }));
}

#[test]
fn test_unsupported_file_is_not_read() {
    setup();

    // The file does not exist; dispatch fails before any read.
    let err = AnalyserEngine::new()
        .analyse_file("/nonexistent/notes.md", None)
        .unwrap_err();
    match err {
        AnalyserError::UnsupportedExtension { extension, .. } => assert_eq!(extension, ".md"),
        other => panic!("expected unsupported extension, got {other:?}"),
    }
}

#[test]
fn test_file_without_extension() {
    setup();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Makefile");
    fs::write(&path, "all:\n").unwrap();

    let err = AnalyserEngine::new().analyse_file(&path, None).unwrap_err();
    match err {
        AnalyserError::UnsupportedExtension { extension, .. } => assert_eq!(extension, ""),
        other => panic!("expected unsupported extension, got {other:?}"),
    }
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_function_count_matches_definitions() {
    setup();

    let source: String = (0..7)
        .map(|i| format!("def f{i}():\n    pass\n\n"))
        .collect();
    let result = AnalyserEngine::new()
        .analyse_source("many.py", &source, None)
        .unwrap();
    assert_eq!(result.identifiers.functions.len(), 7);
    assert_eq!(result.unused_report.unused_functions.len(), 7);
}

#[test]
fn test_unused_names_are_declared_names() {
    setup();

    let engine = AnalyserEngine::new();
    for fixture in ["sample.py", "HelloWorld.java", "Allman.java"] {
        let result = engine.analyse_file(testdata_path().join(fixture), None).unwrap();
        for name in result.unused_report.variable_names() {
            assert!(result.identifiers.variables.contains(name), "{fixture}: {name}");
        }
        for name in result.unused_report.function_names() {
            assert!(result.identifiers.functions.contains(name), "{fixture}: {name}");
        }
    }
}
