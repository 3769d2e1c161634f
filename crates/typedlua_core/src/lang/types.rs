//! Builtin type-name vocabulary.
//!
//! This registry covers the type names an annotation may spell (`local x: number`) and their aliases.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**, like Lua identifiers.
//! - This module is vocabulary only (spellings + metadata); subtyping lives in [`crate::types`].
//!
//! ## Examples
//! ```rust
//! use typedlua_core::lang::types::{self, BaseTypeId};
//!
//! assert_eq!(types::from_str("value"), Some(BaseTypeId::Value));
//! assert_eq!(types::from_str("object"), Some(BaseTypeId::Value));
//! assert_eq!(types::from_str("Number"), None);
//! ```

/// Stable identifier for builtin types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseTypeId {
    Any,
    Value,
    Nil,
    Boolean,
    True,
    False,
    Number,
    String,
}

/// Metadata for a builtin type name.
#[derive(Debug, Clone, Copy)]
pub struct BaseTypeInfo {
    pub id: BaseTypeId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

/// Registry of builtin type names.
pub const BASE_TYPES: &[BaseTypeInfo] = &[
    info(
        BaseTypeId::Any,
        "any",
        &[],
        "The dynamic type; implicit casts to and from it are warnings.",
    ),
    info(
        BaseTypeId::Value,
        "value",
        &["object"],
        "Top of the static hierarchy: every type except `any` is a subtype.",
    ),
    info(BaseTypeId::Nil, "nil", &[], "The type of `nil`."),
    info(BaseTypeId::Boolean, "boolean", &["bool"], "Either `true` or `false`."),
    info(BaseTypeId::True, "true", &[], "The singleton type of `true`."),
    info(BaseTypeId::False, "false", &[], "The singleton type of `false`."),
    info(BaseTypeId::Number, "number", &[], "Lua numbers (integer and float alike)."),
    info(BaseTypeId::String, "string", &[], "Lua strings."),
];

/// Resolve a type name to a [`BaseTypeId`].
///
/// ## Returns
/// - `Some(BaseTypeId)` if the spelling is a canonical name or an alias.
/// - `None` otherwise.
pub fn from_str(name: &str) -> Option<BaseTypeId> {
    BASE_TYPES
        .iter()
        .find(|t| t.canonical == name || t.aliases.contains(&name))
        .map(|t| t.id)
}

/// Return the canonical spelling for a builtin type.
pub fn as_str(id: BaseTypeId) -> &'static str {
    info_for(id).canonical
}

/// Return metadata for a builtin type.
pub fn info_for(id: BaseTypeId) -> &'static BaseTypeInfo {
    BASE_TYPES
        .iter()
        .find(|t| t.id == id)
        .expect("INVARIANT: every BaseTypeId has a registry entry")
}

const fn info(
    id: BaseTypeId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> BaseTypeInfo {
    BaseTypeInfo {
        id,
        canonical,
        aliases,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve_to_canonical_id() {
        assert_eq!(from_str("bool"), Some(BaseTypeId::Boolean));
        assert_eq!(from_str("object"), Some(BaseTypeId::Value));
        assert_eq!(as_str(BaseTypeId::Value), "value");
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(from_str("table"), None);
        assert_eq!(from_str(""), None);
    }
}
