#![forbid(unsafe_code)]
//! Provide the type facts the Typed Lua checker is built on.
//!
//! This crate is the checker's "type facts provider": the [`Type`] value, the [`subtype`] relation, union
//! construction, vararg wrapping/unwrapping, name-to-type resolution, and human-readable formatting. It also carries
//! the canonical vocabulary registries (builtin type names, standard library globals) under [`lang`].
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, no AST types.
//! - The checker only distinguishes types through predicates ([`Type::is_any`], [`Type::is_nil`], [`subtype`]) and
//!   the constructors exposed here; it never pattern-matches on type structure for typing decisions.
//!
//! ## Examples
//! ```rust
//! use typedlua_core::{Type, name_to_type, subtype};
//!
//! let five = Type::ConstantNumber(5.0);
//! assert!(subtype(&five, &Type::Number));
//! assert_eq!(name_to_type("number"), Some(Type::Number));
//! assert_eq!(Type::union(Type::Number, Type::Nil).to_string(), "number | nil");
//! ```

pub mod lang;
pub mod types;

pub use types::{Type, name_to_type, subtype};
