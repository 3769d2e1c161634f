//! Lua standard library globals.
//!
//! The checker predeclares these names in the global table (when the prelude is enabled) so that ordinary programs
//! calling `print` or indexing `string` do not trip the undeclared-global rule.
//!
//! ## Notes
//! - Library functions and tables are opaque to the checker (calls and tables type as `any`), so their registered
//!   type is `any`. Plain values carry their real base type.

use super::types::BaseTypeId;

/// Classify a standard library global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalKind {
    /// A callable, e.g. `print`.
    Function,
    /// A library table, e.g. `string`.
    Library,
    /// A plain value, e.g. `_VERSION`.
    Value,
}

/// Metadata for a standard library global.
#[derive(Debug, Clone, Copy)]
pub struct GlobalInfo {
    pub name: &'static str,
    pub kind: GlobalKind,
    pub ty: BaseTypeId,
}

/// Registry of predeclared globals.
pub const STDLIB_GLOBALS: &[GlobalInfo] = &[
    function("assert"),
    function("collectgarbage"),
    function("dofile"),
    function("error"),
    function("getmetatable"),
    function("ipairs"),
    function("load"),
    function("loadfile"),
    function("next"),
    function("pairs"),
    function("pcall"),
    function("print"),
    function("rawequal"),
    function("rawget"),
    function("rawlen"),
    function("rawset"),
    function("require"),
    function("select"),
    function("setmetatable"),
    function("tonumber"),
    function("tostring"),
    function("type"),
    function("xpcall"),
    library("_G"),
    library("coroutine"),
    library("debug"),
    library("io"),
    library("math"),
    library("os"),
    library("package"),
    library("string"),
    library("table"),
    library("utf8"),
    GlobalInfo {
        name: "_VERSION",
        kind: GlobalKind::Value,
        ty: BaseTypeId::String,
    },
];

/// Look up a predeclared global by name.
pub fn lookup(name: &str) -> Option<&'static GlobalInfo> {
    STDLIB_GLOBALS.iter().find(|g| g.name == name)
}

const fn function(name: &'static str) -> GlobalInfo {
    GlobalInfo {
        name,
        kind: GlobalKind::Function,
        ty: BaseTypeId::Any,
    }
}

const fn library(name: &'static str) -> GlobalInfo {
    GlobalInfo {
        name,
        kind: GlobalKind::Library,
        ty: BaseTypeId::Any,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("print").map(|g| g.kind), Some(GlobalKind::Function));
        assert_eq!(lookup("_VERSION").map(|g| g.ty), Some(BaseTypeId::String));
        assert!(lookup("undefined_thing").is_none());
    }
}
