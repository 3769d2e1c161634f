//! CLI module for the Typed Lua checker
//!
//! This module provides the command-line interface for the checker.
//!
//! ## Commands
//!
//! - `check <AST_JSON>` - Type check a chunk given as a JSON AST
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::version::TYPEDLUA_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Gradual type checker for Typed Lua
#[derive(Parser, Debug)]
#[command(name = "typedlua")]
#[command(version = TYPEDLUA_VERSION)]
#[command(about = "Gradual type checker for Typed Lua", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Type check a chunk from its JSON AST
    Check {
        /// JSON AST produced by the parser
        #[arg(value_name = "AST_JSON")]
        ast: PathBuf,
        /// Original source text, used to turn byte offsets into line:column
        #[arg(long, value_name = "FILE")]
        source: Option<PathBuf>,
        /// File name shown in diagnostics (default: the --source path, else the AST path)
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
        /// Do not predeclare the Lua standard library globals
        #[arg(long)]
        no_prelude: bool,
        /// Treat warnings as failures for the exit status
        #[arg(long)]
        deny_warnings: bool,
        /// Render diagnostics with source excerpts
        #[arg(long, requires = "source")]
        pretty: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Check {
            ast,
            source,
            name,
            no_prelude,
            deny_warnings,
            pretty,
        } => commands::check_file(&commands::CheckRequest {
            ast,
            source,
            name,
            prelude: !no_prelude,
            deny_warnings,
            pretty,
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
