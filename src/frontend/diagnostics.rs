//! Diagnostics and error reporting for Typed Lua
//!
//! The checker accumulates [`Diagnostic`]s in emission order. They print either as one line each
//! (`file:line:col: category, message`) or, for humans at a terminal, as miette reports with the source excerpt.

use std::fmt;

use miette::{GraphicalReportHandler, GraphicalTheme, NamedSource, SourceSpan};
use thiserror::Error;
use typedlua_syntax::ast::Span;
use typedlua_syntax::source;

/// A checker message with location information
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub kind: DiagnosticKind,
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn semantic(message: String, span: Span) -> Self {
        Self::with_kind(DiagnosticKind::Semantic, message, span)
    }

    pub fn type_error(message: String, span: Span) -> Self {
        Self::with_kind(DiagnosticKind::Type, message, span)
    }

    pub fn warning(message: String, span: Span) -> Self {
        Self::with_kind(DiagnosticKind::Warning, message, span)
    }

    fn with_kind(kind: DiagnosticKind, message: String, span: Span) -> Self {
        Self {
            message,
            span,
            kind,
            hints: Vec::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Structural misuse: labels, gotos, `break`.
    Semantic,
    /// A typing-rule violation.
    Type,
    /// An implicit cast across `any`.
    Warning,
}

impl DiagnosticKind {
    pub fn is_error(self) -> bool {
        !matches!(self, DiagnosticKind::Warning)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Semantic => write!(f, "semantic error"),
            DiagnosticKind::Type => write!(f, "type error"),
            DiagnosticKind::Warning => write!(f, "warning"),
        }
    }
}

/// Format one diagnostic as `<filename>:<line>:<column>: <category>, <message>`.
pub fn format_diagnostic(filename: &str, source: &str, diagnostic: &Diagnostic) -> String {
    let (line, col) = source::line_col(source, diagnostic.span.start);
    format!(
        "{}:{}:{}: {}, {}",
        filename, line, col, diagnostic.kind, diagnostic.message
    )
}

/// Format diagnostics one per line, in order.
pub fn format_diagnostics(filename: &str, source: &str, diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format_diagnostic(filename, source, d))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Pretty rendering
// ============================================================================

#[derive(Debug, Error, miette::Diagnostic)]
#[error("{kind}: {message}")]
struct PrettyDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("{kind}")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
    kind: DiagnosticKind,
    message: String,
}

/// Render a diagnostic with a source excerpt and its hints.
pub fn render_pretty(filename: &str, source: &str, diagnostic: &Diagnostic, color: bool) -> String {
    let start = diagnostic.span.start.min(source.len());
    let end = diagnostic.span.end.clamp(start, source.len());
    let help = (!diagnostic.hints.is_empty()).then(|| diagnostic.hints.join("\n"));

    let pretty = PrettyDiagnostic {
        src: NamedSource::new(filename, source.to_string()),
        span: SourceSpan::from((start, end - start)),
        help,
        kind: diagnostic.kind,
        message: diagnostic.message.clone(),
    };

    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let mut out = String::new();
    if GraphicalReportHandler::new_themed(theme)
        .render_report(&mut out, &pretty)
        .is_err()
    {
        return format_diagnostic(filename, source, diagnostic);
    }
    out
}

// ============================================================================
// Error catalog
// ============================================================================

/// Errors reported by the checker
pub mod errors {
    use super::*;

    pub fn arithmetic(ty: &str, span: Span) -> Diagnostic {
        Diagnostic::type_error(format!("attempt to perform arithmetic on a {}", ty), span)
    }

    pub fn concatenate(ty: &str, span: Span) -> Diagnostic {
        Diagnostic::type_error(format!("attempt to concatenate a {}", ty), span)
    }

    pub fn length(ty: &str, span: Span) -> Diagnostic {
        Diagnostic::type_error(format!("attempt to get length of a {}", ty), span)
            .with_hint("'#' applies to strings")
    }

    pub fn compare(lhs: &str, rhs: &str, span: Span) -> Diagnostic {
        Diagnostic::type_error(format!("attempt to compare {} with {}", lhs, rhs), span)
            .with_hint("order comparisons need two numbers or two strings")
    }

    pub fn undeclared_global(name: &str, span: Span) -> Diagnostic {
        Diagnostic::type_error(format!("attempt to access undeclared global '{}'", name), span)
            .with_hint(format!("declare it with 'local {}' or assign it before use", name))
    }

    pub fn assign_mismatch(inferred: &str, name: &str, declared: &str, span: Span) -> Diagnostic {
        Diagnostic::type_error(
            format!("attempt to assign {} to '{}' of type {}", inferred, name, declared),
            span,
        )
    }

    /// `which` is one of `initial`, `limit`, `step`.
    pub fn for_bound(which: &str, ty: &str, span: Span) -> Diagnostic {
        Diagnostic::type_error(format!("'for' {} value must be a number, got {}", which, ty), span)
    }

    pub fn unknown_type(name: &str, span: Span) -> Diagnostic {
        Diagnostic::type_error(format!("type '{}' is not defined", name), span)
    }

    pub fn duplicate_label(name: &str, previous_line: usize, span: Span) -> Diagnostic {
        Diagnostic::semantic(
            format!("label '{}' already defined on line {}", name, previous_line),
            span,
        )
    }

    pub fn break_outside_loop(span: Span) -> Diagnostic {
        Diagnostic::semantic("break not inside a loop".to_string(), span)
    }

    pub fn unresolved_goto(name: &str, line: usize, span: Span) -> Diagnostic {
        Diagnostic::semantic(
            format!("no visible label '{}' for goto at line {}", name, line),
            span,
        )
    }

    pub fn invalid_assign_target(span: Span) -> Diagnostic {
        Diagnostic::semantic("cannot assign to expression".to_string(), span)
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// Implicit casts across `any`
pub mod warnings {
    use super::*;

    pub fn cast_from_any(to: &str, span: Span) -> Diagnostic {
        Diagnostic::warning(format!("cast from any to {}", to), span)
    }

    pub fn cast_to_any(from: &str, span: Span) -> Diagnostic {
        Diagnostic::warning(format!("cast to any from {}", from), span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_diagnostic() {
        let source = "local x = 1\nlocal y = x .. {}\n";
        let diag = errors::concatenate("table", Span::new(27, 29));
        assert_eq!(
            format_diagnostic("demo.tl", source, &diag),
            "demo.tl:2:16: type error, attempt to concatenate a table"
        );
    }

    #[test]
    fn test_format_diagnostics_keeps_order() {
        let source = "break\ngoto x\n";
        let diags = vec![
            errors::break_outside_loop(Span::new(0, 5)),
            warnings::cast_to_any("number", Span::new(6, 12)),
            errors::unresolved_goto("x", 2, Span::new(6, 12)),
        ];
        assert_eq!(
            format_diagnostics("m.tl", source, &diags),
            "m.tl:1:1: semantic error, break not inside a loop\n\
             m.tl:2:1: warning, cast to any from number\n\
             m.tl:2:1: semantic error, no visible label 'x' for goto at line 2"
        );
    }

    #[test]
    fn test_kind_error_classification() {
        assert!(DiagnosticKind::Semantic.is_error());
        assert!(DiagnosticKind::Type.is_error());
        assert!(!DiagnosticKind::Warning.is_error());
    }

    #[test]
    fn test_render_pretty_includes_message_and_help() {
        let source = "print(undefined_name)\n";
        let diag = errors::undeclared_global("undefined_name", Span::new(6, 20));
        let rendered = render_pretty("demo.tl", source, &diag, false);
        assert!(rendered.contains("attempt to access undeclared global 'undefined_name'"));
        assert!(rendered.contains("local undefined_name"));
        assert!(rendered.contains("demo.tl"));
    }

    #[test]
    fn test_render_pretty_clamps_out_of_range_span() {
        let diag = errors::break_outside_loop(Span::new(50, 80));
        let rendered = render_pretty("short.tl", "x", &diag, false);
        assert!(rendered.contains("break not inside a loop"));
    }
}
