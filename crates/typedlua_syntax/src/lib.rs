#![forbid(unsafe_code)]
//! Shared syntax layer for Typed Lua: AST, spans, source positions, and AST decoding.
//!
//! Parsing is done elsewhere; this crate defines the tree the parser hands over and the helpers around it.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not do name resolution or type checking.
//! - [`source`] decodes byte offsets into the `line:column` pairs diagnostics print.
//!
//! ## Examples
//! ```rust
//! use typedlua_syntax::{json, source};
//!
//! let chunk = json::from_str(r#"[{"node": {"tag": "Break"}, "span": [0, 5]}]"#).unwrap();
//! assert_eq!(chunk.stmts.len(), 1);
//! assert_eq!(source::line_col("break", 0), (1, 1));
//! ```

pub mod ast;
pub mod build;
pub mod json;
pub mod source;
