//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::frontend::diagnostics::{self, Diagnostic};
use crate::frontend::json;
use crate::typechecker::{CheckOptions, TypeChecker};

use super::{CliError, CliResult, ExitCode};

/// Maximum input file size (100 MB)
///
/// Larger files are rejected to prevent out-of-memory conditions while decoding.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Arguments of `typedlua check`.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub ast: PathBuf,
    pub source: Option<PathBuf>,
    pub name: Option<String>,
    pub prelude: bool,
    pub deny_warnings: bool,
    pub pretty: bool,
}

/// How a finished check is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportPolicy {
    pub deny_warnings: bool,
    pub pretty: bool,
}

/// Outcome of checking one chunk: the text for stderr and the exit status it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub output: String,
    pub exit_code: ExitCode,
    pub errors: usize,
    pub warnings: usize,
}

/// Read a file as UTF-8 text, refusing anything over [`MAX_SOURCE_SIZE`].
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let display = file_path.display();
    // Check file size before reading
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", display, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "File '{}' is too large ({} bytes, max {} bytes)",
            display,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", display, e)))
}

/// `typedlua check`: decode the AST, check it, print diagnostics to stderr.
pub fn check_file(request: &CheckRequest) -> CliResult<ExitCode> {
    let ast_json = read_source(&request.ast)?;
    let source = match &request.source {
        Some(path) => read_source(path)?,
        None => {
            tracing::warn!(
                ast = %request.ast.display(),
                "no --source given; every diagnostic will point at line 1"
            );
            String::new()
        }
    };
    let filename = request.name.clone().unwrap_or_else(|| {
        request
            .source
            .as_deref()
            .unwrap_or(&request.ast)
            .display()
            .to_string()
    });

    let options = CheckOptions::default().with_prelude(request.prelude);
    let policy = ReportPolicy {
        deny_warnings: request.deny_warnings,
        pretty: request.pretty,
    };
    let report = check_json(&ast_json, &source, &filename, options, policy)?;

    if !report.output.is_empty() {
        eprintln!("{}", report.output);
    }
    Ok(report.exit_code)
}

/// Decode and check a JSON AST against its source text.
///
/// ## Errors
/// - `CliError` if the JSON is not a valid chunk. Diagnostics are never errors here; they land in the report.
pub fn check_json(
    ast_json: &str,
    source: &str,
    filename: &str,
    options: CheckOptions,
    policy: ReportPolicy,
) -> CliResult<CheckReport> {
    let chunk = json::from_str(ast_json).map_err(|e| {
        let (line, col) = e.location();
        CliError::failure(format!("{}:{}:{}: {}", filename, line, col, e))
    })?;
    if chunk.stmts.is_empty() {
        tracing::warn!(filename, "chunk has no statements");
    }

    let mut checker = TypeChecker::new(source, filename).with_options(options);
    let diagnostics = checker.check_chunk(&chunk).err().unwrap_or_default();
    warn_on_stray_spans(filename, source, &diagnostics);

    Ok(build_report(filename, source, &diagnostics, policy))
}

/// Assemble the stderr text and exit status for a diagnostic list.
pub fn build_report(filename: &str, source: &str, diagnostics: &[Diagnostic], policy: ReportPolicy) -> CheckReport {
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics.len() - errors;

    let output = if policy.pretty {
        diagnostics
            .iter()
            .map(|d| diagnostics::render_pretty(filename, source, d, false))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        diagnostics::format_diagnostics(filename, source, diagnostics)
    };

    let failed = errors > 0 || (policy.deny_warnings && warnings > 0);
    CheckReport {
        output,
        exit_code: if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS },
        errors,
        warnings,
    }
}

/// Spans past the end of the source mean the AST and source text do not belong together.
fn warn_on_stray_spans(filename: &str, source: &str, diagnostics: &[Diagnostic]) {
    if source.is_empty() {
        return;
    }
    let stray = diagnostics.iter().filter(|d| d.span.end > source.len()).count();
    if stray > 0 {
        tracing::warn!(
            filename,
            stray,
            source_len = source.len(),
            "diagnostic spans fall outside the source text"
        );
    }
}
