//! Integration tests for the Typed Lua checker
//!
//! Fixtures live in `tests/fixtures/{valid,invalid}` as `<name>.tl` (source text) plus `<name>.json` (the AST a
//! parser produced for it). Invalid fixtures carry a `<name>.expected` file with the exact diagnostic lines.

use std::fs;
use std::path::{Path, PathBuf};

use typedlua::cli::ExitCode;
use typedlua::cli::commands::{self, CheckRequest, ReportPolicy};
use typedlua::frontend::json;
use typedlua::typechecker::{CheckOptions, check};

/// All fixture stems in a directory, sorted.
fn fixture_stems(dir: &str) -> Vec<PathBuf> {
    let mut stems: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map(|e| e == "json").unwrap_or(false))
        .map(|path| path.with_extension(""))
        .collect();
    stems.sort();
    stems
}

fn file_name(stem: &Path, ext: &str) -> String {
    stem.with_extension(ext)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

/// Run one fixture through the CLI command layer.
fn check_fixture(stem: &Path) -> commands::CheckReport {
    let ast = fs::read_to_string(stem.with_extension("json")).unwrap();
    let source = fs::read_to_string(stem.with_extension("tl")).unwrap();
    commands::check_json(
        &ast,
        &source,
        &file_name(stem, "tl"),
        CheckOptions::default(),
        ReportPolicy::default(),
    )
    .unwrap()
}

/// Test that all valid fixtures check with no diagnostics
#[test]
fn test_valid_fixtures() {
    let stems = fixture_stems("tests/fixtures/valid");
    assert!(!stems.is_empty());

    for stem in stems {
        let report = check_fixture(&stem);
        assert_eq!(
            report.output,
            "",
            "Expected {} to check cleanly",
            stem.display()
        );
        assert_eq!(report.exit_code, ExitCode::SUCCESS);
    }
}

/// Test that invalid fixtures produce exactly the expected diagnostics
#[test]
fn test_invalid_fixtures() {
    let stems = fixture_stems("tests/fixtures/invalid");
    assert!(!stems.is_empty());

    for stem in stems {
        let expected = fs::read_to_string(stem.with_extension("expected")).unwrap();
        let report = check_fixture(&stem);
        assert_eq!(
            report.output,
            expected.trim_end(),
            "Unexpected diagnostics for {}",
            stem.display()
        );
    }
}

#[test]
fn test_warning_only_fixture_exits_zero_unless_denied() {
    let stem = Path::new("tests/fixtures/invalid/casts");
    let report = check_fixture(stem);
    assert_eq!((report.errors, report.warnings), (0, 2));
    assert_eq!(report.exit_code, ExitCode::SUCCESS);

    let request = CheckRequest {
        ast: stem.with_extension("json"),
        source: Some(stem.with_extension("tl")),
        name: None,
        prelude: true,
        deny_warnings: true,
        pretty: false,
    };
    assert_eq!(commands::check_file(&request).unwrap(), ExitCode::FAILURE);
}

#[test]
fn test_check_file_with_errors_fails() {
    let stem = Path::new("tests/fixtures/invalid/control_flow");
    let request = CheckRequest {
        ast: stem.with_extension("json"),
        source: Some(stem.with_extension("tl")),
        name: Some("cf.tl".to_string()),
        prelude: true,
        deny_warnings: false,
        pretty: true,
    };
    assert_eq!(commands::check_file(&request).unwrap(), ExitCode::FAILURE);
}

#[test]
fn test_check_file_missing_ast_is_cli_error() {
    let request = CheckRequest {
        ast: PathBuf::from("tests/fixtures/nope.json"),
        source: None,
        name: None,
        prelude: true,
        deny_warnings: false,
        pretty: false,
    };
    let err = commands::check_file(&request).unwrap_err();
    assert_eq!(err.exit_code, ExitCode::FAILURE);
}

#[test]
fn test_structured_check_exposes_inferred_types() {
    let stem = Path::new("tests/fixtures/valid/annotated");
    let chunk = json::from_str(&fs::read_to_string(stem.with_extension("json")).unwrap()).unwrap();
    let source = fs::read_to_string(stem.with_extension("tl")).unwrap();
    let info = check(&chunk, &source, "annotated.tl").unwrap();

    // `"a" .. "b"` on line 2
    let start = source.find("\"a\"").unwrap();
    let end = source.find("\"b\"").unwrap() + 3;
    let concat = typedlua::ast::Span::new(start, end);
    assert_eq!(info.expr_type(concat), Some(&typedlua_core::Type::String));
}

#[test]
fn test_no_prelude_reports_stdlib_names() {
    let ast = fs::read_to_string("tests/fixtures/invalid/casts.json").unwrap();
    let source = fs::read_to_string("tests/fixtures/invalid/casts.tl").unwrap();
    let report = commands::check_json(
        &ast,
        &source,
        "casts.tl",
        CheckOptions::default().with_prelude(false),
        ReportPolicy::default(),
    )
    .unwrap();
    assert!(
        report
            .output
            .starts_with("casts.tl:1:15: type error, attempt to access undeclared global 'tonumber'"),
        "{}",
        report.output
    );
    assert_eq!(report.exit_code, ExitCode::FAILURE);
}

mod json_input {
    use typedlua::typechecker::typecheck;
    use typedlua::frontend::json;

    #[test]
    fn test_inline_json_chunk() {
        let source = "local x: number = \"s\"";
        let ast = serde_json::json!([
            {"node": {"tag": "Local", "args": {
                "names": [{"node": {"name": "x", "ty": {"node": {"tag": "Name", "args": "number"}}}, "span": [6, 7]}],
                "values": [{"node": {"tag": "String", "args": "s"}, "span": [18, 21]}]
            }}, "span": [0, 21]}
        ]);
        let chunk = json::from_str(&ast.to_string()).unwrap();
        assert_eq!(
            typecheck(&chunk, source, "inline.tl"),
            Err("inline.tl:1:7: type error, attempt to assign \"s\" to 'x' of type number".to_string())
        );
    }

    #[test]
    fn test_empty_chunk_is_clean() {
        let chunk = json::from_str("[]").unwrap();
        assert_eq!(typecheck(&chunk, "", "empty.tl"), Ok(()));
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let ast = serde_json::json!([
            {"node": {"tag": "Call", "args": {"node": {"tag": "Binary", "args": [
                {"node": {"tag": "Number", "args": 1}}, "//", {"node": {"tag": "Number", "args": 2}}
            ]}}}}
        ]);
        assert!(json::from_str(&ast.to_string()).is_err());
    }
}
