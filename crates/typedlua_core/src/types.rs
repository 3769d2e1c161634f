//! Types, subtyping, and unions.
//!
//! ## Notes
//!
//! - `any` is deliberately outside the subtype lattice: it is a subtype only of itself and nothing but itself is a
//!   subtype of it. Gradual compatibility (the implicit casts that produce warnings) is the checker's business, built
//!   on [`Type::is_any`].
//! - `value` is the top of the static lattice.
//! - Literal types (`5`, `"s"`, `true`) are subtypes of their base types.

use std::fmt;

use crate::lang::types::{self as type_names, BaseTypeId};

/// A Typed Lua type.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// `value`: supertype of every static type.
    Object,
    Any,
    Nil,
    False,
    True,
    Boolean,
    Number,
    String,
    /// The type of a specific number literal.
    ConstantNumber(f64),
    /// The type of a specific string literal.
    ConstantString(String),
    /// Flattened union; no member is a subtype of another.
    Union(Vec<Type>),
    /// Zero or more values of the element type (`...`).
    VarArg(Box<Type>),
    /// Parameter types and result type.
    Function(Vec<Type>, Box<Type>),
}

impl Type {
    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Type::Nil)
    }

    pub fn is_vararg(&self) -> bool {
        matches!(self, Type::VarArg(_))
    }

    /// Wrap an element type as a vararg type.
    pub fn vararg(elem: Type) -> Type {
        Type::VarArg(Box::new(elem))
    }

    /// Return the element type of a vararg type.
    pub fn vararg_element(&self) -> Option<&Type> {
        match self {
            Type::VarArg(elem) => Some(elem),
            _ => None,
        }
    }

    /// Build the least type both operands are subtypes of.
    ///
    /// Nested unions are flattened and members subsumed by another member are dropped, so
    /// `union(1, number)` is `number` and `union(number | nil, string)` is `number | nil | string`.
    pub fn union(a: Type, b: Type) -> Type {
        if subtype(&a, &b) {
            return b;
        }
        if subtype(&b, &a) {
            return a;
        }

        let mut members: Vec<Type> = Vec::new();
        for ty in [a, b] {
            let flattened = match ty {
                Type::Union(inner) => inner,
                other => vec![other],
            };
            for candidate in flattened {
                if members.iter().any(|m| subtype(&candidate, m)) {
                    continue;
                }
                members.retain(|m| !subtype(m, &candidate));
                members.push(candidate);
            }
        }

        match members.len() {
            1 => members.remove(0),
            _ => Type::Union(members),
        }
    }

    /// Widen literal types to their base types (`5` → `number`, `true` → `boolean`).
    pub fn general(&self) -> Type {
        match self {
            Type::ConstantNumber(_) => Type::Number,
            Type::ConstantString(_) => Type::String,
            Type::True | Type::False => Type::Boolean,
            Type::Union(members) => members
                .iter()
                .map(Type::general)
                .reduce(Type::union)
                .unwrap_or_else(|| self.clone()),
            Type::VarArg(elem) => Type::vararg(elem.general()),
            other => other.clone(),
        }
    }
}

impl From<BaseTypeId> for Type {
    fn from(id: BaseTypeId) -> Self {
        match id {
            BaseTypeId::Any => Type::Any,
            BaseTypeId::Value => Type::Object,
            BaseTypeId::Nil => Type::Nil,
            BaseTypeId::Boolean => Type::Boolean,
            BaseTypeId::True => Type::True,
            BaseTypeId::False => Type::False,
            BaseTypeId::Number => Type::Number,
            BaseTypeId::String => Type::String,
        }
    }
}

/// Resolve a type name from an annotation.
///
/// ## Returns
/// - `Some(Type)` for builtin names and their aliases.
/// - `None` for names the registry does not know.
pub fn name_to_type(name: &str) -> Option<Type> {
    type_names::from_str(name).map(Type::from)
}

/// Return `true` if a value of type `a` may be used where `b` is expected.
pub fn subtype(a: &Type, b: &Type) -> bool {
    if a == b {
        return true;
    }

    match (a, b) {
        (Type::Any, _) | (_, Type::Any) => false,
        (Type::Union(members), _) => members.iter().all(|m| subtype(m, b)),
        (_, Type::Object) => true,
        (_, Type::Union(members)) => members.iter().any(|m| subtype(a, m)),
        (Type::ConstantNumber(_), Type::Number) => true,
        (Type::ConstantString(_), Type::String) => true,
        (Type::True | Type::False, Type::Boolean) => true,
        (Type::VarArg(x), Type::VarArg(y)) => subtype(x, y),
        (Type::Function(p1, r1), Type::Function(p2, r2)) => {
            p1.len() == p2.len() && p2.iter().zip(p1.iter()).all(|(x, y)| subtype(x, y)) && subtype(r1, r2)
        }
        _ => false,
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Object => write!(f, "{}", type_names::as_str(BaseTypeId::Value)),
            Type::Any => write!(f, "{}", type_names::as_str(BaseTypeId::Any)),
            Type::Nil => write!(f, "{}", type_names::as_str(BaseTypeId::Nil)),
            Type::False => write!(f, "{}", type_names::as_str(BaseTypeId::False)),
            Type::True => write!(f, "{}", type_names::as_str(BaseTypeId::True)),
            Type::Boolean => write!(f, "{}", type_names::as_str(BaseTypeId::Boolean)),
            Type::Number => write!(f, "{}", type_names::as_str(BaseTypeId::Number)),
            Type::String => write!(f, "{}", type_names::as_str(BaseTypeId::String)),
            Type::ConstantNumber(n) => write!(f, "{}", n),
            Type::ConstantString(s) => write!(f, "{:?}", s),
            Type::Union(members) => {
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", m)?;
                }
                Ok(())
            }
            Type::VarArg(elem) => match elem.as_ref() {
                Type::Union(_) => write!(f, "({})*", elem),
                _ => write!(f, "{}*", elem),
            },
            Type::Function(params, ret) => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, ") -> {}", ret)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_are_subtypes_of_their_base() {
        assert!(subtype(&Type::ConstantNumber(1.5), &Type::Number));
        assert!(subtype(&Type::ConstantString("s".to_string()), &Type::String));
        assert!(subtype(&Type::True, &Type::Boolean));
        assert!(!subtype(&Type::Number, &Type::ConstantNumber(1.5)));
        assert!(!subtype(&Type::ConstantNumber(1.0), &Type::String));
    }

    #[test]
    fn test_any_relates_only_to_itself() {
        assert!(subtype(&Type::Any, &Type::Any));
        assert!(!subtype(&Type::Any, &Type::Number));
        assert!(!subtype(&Type::Number, &Type::Any));
        assert!(!subtype(&Type::Any, &Type::Object));
    }

    #[test]
    fn test_object_is_top() {
        assert!(subtype(&Type::Nil, &Type::Object));
        assert!(subtype(&Type::Union(vec![Type::Number, Type::String]), &Type::Object));
        assert!(!subtype(&Type::Object, &Type::Number));
    }

    #[test]
    fn test_union_subtyping() {
        let opt_num = Type::union(Type::Number, Type::Nil);
        assert!(subtype(&Type::Nil, &opt_num));
        assert!(subtype(&Type::ConstantNumber(3.0), &opt_num));
        assert!(!subtype(&opt_num, &Type::Number));
        assert!(!subtype(&Type::String, &opt_num));
    }

    #[test]
    fn test_union_collapses_subsumed_members() {
        assert_eq!(Type::union(Type::ConstantNumber(1.0), Type::Number), Type::Number);
        assert_eq!(Type::union(Type::Number, Type::Number), Type::Number);
        assert_eq!(Type::union(Type::True, Type::Boolean), Type::Boolean);
        assert_eq!(
            Type::union(Type::union(Type::Number, Type::Nil), Type::String),
            Type::Union(vec![Type::Number, Type::Nil, Type::String])
        );
        assert_eq!(
            Type::union(Type::Union(vec![Type::ConstantNumber(1.0), Type::String]), Type::Number),
            Type::Union(vec![Type::String, Type::Number])
        );
    }

    #[test]
    fn test_union_with_any_keeps_both() {
        assert_eq!(Type::union(Type::Any, Type::Any), Type::Any);
        assert_eq!(
            Type::union(Type::Any, Type::Number),
            Type::Union(vec![Type::Any, Type::Number])
        );
    }

    #[test]
    fn test_vararg_helpers() {
        let va = Type::vararg(Type::String);
        assert!(va.is_vararg());
        assert_eq!(va.vararg_element(), Some(&Type::String));
        assert_eq!(Type::Number.vararg_element(), None);
        assert!(subtype(&Type::vararg(Type::ConstantString("a".into())), &va));
    }

    #[test]
    fn test_function_subtyping_is_contravariant_in_params() {
        let takes_number = Type::Function(vec![Type::Number], Box::new(Type::ConstantNumber(1.0)));
        let takes_one = Type::Function(vec![Type::ConstantNumber(1.0)], Box::new(Type::Number));
        assert!(subtype(&takes_number, &takes_one));
        assert!(!subtype(&takes_one, &takes_number));
    }

    #[test]
    fn test_general_widens_literals() {
        assert_eq!(Type::ConstantNumber(5.0).general(), Type::Number);
        assert_eq!(Type::False.general(), Type::Boolean);
        assert_eq!(
            Type::Union(vec![Type::ConstantString("a".into()), Type::Nil]).general(),
            Type::Union(vec![Type::String, Type::Nil])
        );
        assert_eq!(Type::Any.general(), Type::Any);
    }

    #[test]
    fn test_name_to_type() {
        assert_eq!(name_to_type("number"), Some(Type::Number));
        assert_eq!(name_to_type("value"), Some(Type::Object));
        assert_eq!(name_to_type("bool"), Some(Type::Boolean));
        assert_eq!(name_to_type("table"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Type::ConstantNumber(5.0).to_string(), "5");
        assert_eq!(Type::ConstantNumber(0.5).to_string(), "0.5");
        assert_eq!(Type::ConstantString("hi".into()).to_string(), "\"hi\"");
        assert_eq!(Type::Object.to_string(), "value");
        assert_eq!(Type::vararg(Type::String).to_string(), "string*");
        assert_eq!(
            Type::vararg(Type::union(Type::Number, Type::Nil)).to_string(),
            "(number | nil)*"
        );
        assert_eq!(
            Type::Function(vec![Type::Number, Type::String], Box::new(Type::Nil)).to_string(),
            "(number, string) -> nil"
        );
    }
}
