//! Type checker for Typed Lua.
//!
//! Walks a chunk once, resolving names through the [`SymbolTable`], inferring a [`Type`] for every expression, and
//! accumulating diagnostics. A second pass then validates every `goto` against the labels recorded during the walk.
//!
//! ## Notes
//!
//! - **Gradual typing**: `any` is compatible with everything. Implicit casts across it are warnings; everything
//!   else that does not fit the subtype relation is a type error.
//! - **Error accumulation**: diagnostics never stop the walk. A failed rule yields a fallback type (usually `any`) so
//!   later nodes are still checked.
//! - **Opaque constructs**: function literals, table constructors, calls, and indexing type as `any`. Their children
//!   are still checked; parameter and return annotations are resolved but not enforced against the body.
//! - **Goto resolution** scans scope ids numerically: a goto in scope `n` sees labels recorded in any scope `0..=n`,
//!   including sibling scopes with a lower id.
//!
//! ## Examples
//!
//! ```rust
//! use typedlua::typechecker::typecheck;
//! use typedlua_syntax::ast::BinaryOp;
//! use typedlua_syntax::build::*;
//!
//! // local x = 1 + "a"
//! let chunk = block(vec![local(
//!     vec![name("x")],
//!     vec![binary(num(1.0), BinaryOp::Add, string("a").at(14, 17))],
//! )]);
//! let err = typecheck(&chunk, "local x = 1 + \"a\"", "demo.tl").unwrap_err();
//! assert_eq!(err, "demo.tl:1:15: type error, attempt to perform arithmetic on a \"a\"");
//! ```
//!
//! ## See also
//!
//! - [`symbols`](super::symbols) – scopes, bindings, labels, and pending gotos
//! - [`diagnostics`](super::diagnostics) – diagnostic types, catalog, and formatting

mod check_decl;
mod check_expr;
mod check_stmt;
mod labels;


use std::collections::HashMap;

use typedlua_core::Type;
use typedlua_core::lang::globals;
use typedlua_syntax::ast::{Block, Span};
use typedlua_syntax::source;

use crate::frontend::diagnostics::{Diagnostic, format_diagnostics};
use crate::frontend::symbols::{Binding, SymbolTable};

/// Name under which `...` is bound.
pub(crate) const VARARG_NAME: &str = "...";

/// Knobs for one checking run.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOptions {
    /// Predeclare the Lua standard library globals.
    pub prelude: bool,
    /// Type of the main chunk's `...`.
    pub chunk_vararg: Type,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            prelude: true,
            chunk_vararg: Type::vararg(Type::String),
        }
    }
}

impl CheckOptions {
    pub fn with_prelude(mut self, prelude: bool) -> Self {
        self.prelude = prelude;
        self
    }

    pub fn with_chunk_vararg(mut self, ty: Type) -> Self {
        self.chunk_vararg = ty;
        self
    }
}

/// Inferred types, kept outside the AST.
///
/// ## Notes
/// - Keyed by `(span.start, span.end)`: every checked expression, and every declared name keyed by its own span.
#[derive(Debug, Default, Clone)]
pub struct TypeCheckInfo {
    pub expr_types: HashMap<(usize, usize), Type>,
}

impl TypeCheckInfo {
    pub fn expr_type(&self, span: Span) -> Option<&Type> {
        self.expr_types.get(&(span.start, span.end))
    }
}

/// Checking context for one run.
///
/// Create with [`TypeChecker::new`], then call [`check_chunk`](Self::check_chunk). Every call to `check_chunk`
/// starts from fresh state.
pub struct TypeChecker<'src> {
    source: &'src str,
    filename: &'src str,
    options: CheckOptions,
    pub(crate) symbols: SymbolTable,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) type_info: TypeCheckInfo,
}

impl<'src> TypeChecker<'src> {
    pub fn new(source: &'src str, filename: &'src str) -> Self {
        Self {
            source,
            filename,
            options: CheckOptions::default(),
            symbols: SymbolTable::new(),
            diagnostics: Vec::new(),
            type_info: TypeCheckInfo::default(),
        }
    }

    pub fn with_options(mut self, options: CheckOptions) -> Self {
        self.options = options;
        self
    }

    pub fn type_info(&self) -> &TypeCheckInfo {
        &self.type_info
    }

    /// Type of `name` as seen from the main chunk after checking: a top-level local, else a global.
    pub fn binding_type(&self, name: &str) -> Option<&Type> {
        self.symbols.lookup(name).map(|b| &b.ty)
    }

    /// Check a chunk and return its diagnostics, if any.
    ///
    /// ## Returns
    ///
    /// - `Ok(())` if no diagnostic was emitted.
    /// - `Err(Vec<Diagnostic>)` otherwise, in emission order, with goto resolution errors last. Warnings alone still
    ///   make the result `Err`; whether they fail the run is the caller's policy.
    #[tracing::instrument(skip_all, fields(filename = self.filename, stmt_count = block.stmts.len()))]
    pub fn check_chunk(&mut self, block: &Block) -> Result<(), Vec<Diagnostic>> {
        // Reset per-run state.
        self.symbols = SymbolTable::new();
        self.diagnostics.clear();
        self.type_info = TypeCheckInfo::default();

        self.declare_prelude();
        self.check_block(block);
        self.resolve_gotos();

        tracing::debug!(
            scopes = self.symbols.max_scope() + 1,
            diagnostics = self.diagnostics.len(),
            "checked chunk"
        );

        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.diagnostics))
        }
    }

    fn declare_prelude(&mut self) {
        if self.options.prelude {
            for info in globals::STDLIB_GLOBALS {
                self.symbols.define_global(Binding {
                    name: info.name.to_string(),
                    ty: Type::from(info.ty),
                    span: Span::default(),
                });
            }
        }
        self.symbols.define_global(Binding {
            name: VARARG_NAME.to_string(),
            ty: self.options.chunk_vararg.clone(),
            span: Span::default(),
        });
    }

    pub(crate) fn record_expr_type(&mut self, span: Span, ty: Type) {
        self.type_info.expr_types.insert((span.start, span.end), ty);
    }

    pub(crate) fn line_of(&self, span: Span) -> usize {
        source::line_col(self.source, span.start).0
    }
}

/// Check a chunk and return the inferred types, or every diagnostic.
#[tracing::instrument(skip_all, fields(stmt_count = block.stmts.len()))]
pub fn check(block: &Block, source: &str, filename: &str) -> Result<TypeCheckInfo, Vec<Diagnostic>> {
    check_with_options(block, source, filename, CheckOptions::default())
}

/// [`check`] with explicit options.
pub fn check_with_options(
    block: &Block,
    source: &str,
    filename: &str,
    options: CheckOptions,
) -> Result<TypeCheckInfo, Vec<Diagnostic>> {
    let mut checker = TypeChecker::new(source, filename).with_options(options);
    checker.check_chunk(block)?;
    Ok(checker.type_info)
}

/// Check a chunk and report diagnostics as `<filename>:<line>:<column>: <category>, <message>` lines.
///
/// Any non-empty diagnostic list, warnings included, is returned as `Err` with the lines joined by `\n`.
#[tracing::instrument(skip_all, fields(filename = filename))]
pub fn typecheck(block: &Block, source: &str, filename: &str) -> Result<(), String> {
    check(block, source, filename)
        .map(|_| ())
        .map_err(|diagnostics| format_diagnostics(filename, source, &diagnostics))
}
