//! Typed Lua vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. [`types::BaseTypeId`]) and look up spellings and metadata through registry
//! tables instead of scattering string comparisons across the checker.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//!
//! ## Examples
//! ```rust
//! use typedlua_core::lang::types::{self, BaseTypeId};
//!
//! assert_eq!(types::from_str("number"), Some(BaseTypeId::Number));
//! assert_eq!(types::as_str(BaseTypeId::Boolean), "boolean");
//! ```

pub mod globals;
pub mod types;
