#![forbid(unsafe_code)]
//! Typed Lua gradual type checker
//!
//! Typed Lua is Lua with optional type annotations. This crate checks an already-parsed chunk: it resolves names,
//! infers a type for every expression, and reports semantic errors, type errors, and warnings for implicit casts
//! across `any`. Parsing lives outside this crate; input arrives as a JSON AST (see [`typedlua_syntax::json`]) or is
//! built in code (see [`typedlua_syntax::build`]).
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a checker bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod cli;
pub mod frontend;
pub mod version;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::symbols;
pub use frontend::typechecker;

pub use typechecker::{CheckOptions, TypeChecker, check, check_with_options, typecheck};
