//! Typed Lua checker frontend
//!
//! This module contains all checking components:
//! - `ast`: syntax tree definitions (from `typedlua_syntax`)
//! - `json`: decoding a chunk from its JSON AST
//! - `source`: byte offset to line/column mapping
//! - `symbols`: scopes, bindings, labels, and pending gotos
//! - `typechecker`: type checking and goto resolution
//! - `diagnostics`: diagnostic catalog and formatting

// Syntax components are provided by the shared typedlua_syntax crate.
pub use typedlua_syntax::{ast, json, source};

// Checker-specific pieces remain local.
pub mod diagnostics;
pub mod symbols;
pub mod typechecker;
