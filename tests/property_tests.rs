//! Property-based tests for the Typed Lua checker
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use typedlua::ast::{BinaryOp, Expr, Span, Spanned};
use typedlua::typechecker::{TypeChecker, check};
use typedlua_core::{Type, subtype};
use typedlua_syntax::build::*;

// =============================================================================
// Strategies
// =============================================================================

fn arithmetic_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Sub),
        Just(BinaryOp::Mul),
        Just(BinaryOp::Div),
        Just(BinaryOp::Mod),
        Just(BinaryOp::Pow),
    ]
}

/// Literal expressions paired with the type the checker infers for them.
fn literal() -> impl Strategy<Value = (Spanned<Expr>, Type)> {
    prop_oneof![
        Just((nil(), Type::Nil)),
        any::<bool>().prop_map(|b| (boolean(b), if b { Type::True } else { Type::False })),
        (-1e6f64..1e6).prop_map(|n| (num(n), Type::ConstantNumber(n))),
        "[a-z]{0,6}".prop_map(|s| (string(&s), Type::ConstantString(s))),
    ]
}

fn base_type() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(Type::Object),
        Just(Type::Any),
        Just(Type::Nil),
        Just(Type::True),
        Just(Type::False),
        Just(Type::Boolean),
        Just(Type::Number),
        Just(Type::String),
        (-100.0f64..100.0).prop_map(Type::ConstantNumber),
        "[a-c]{1,2}".prop_map(Type::ConstantString),
    ]
}

/// Check `print(<expr>)` with `expr` at a known span and return the diagnostics count and the expr's type.
fn check_print(expr: Spanned<Expr>) -> (usize, Option<Type>) {
    let expr = Spanned::new(expr.node, Span::new(1, 2));
    let chunk = block(vec![call_stmt(call(id("print"), vec![expr]))]);
    let mut checker = TypeChecker::new("", "prop.tl");
    let count = checker.check_chunk(&chunk).err().map_or(0, |d| d.len());
    let ty = checker.type_info().expr_type(Span::new(1, 2)).cloned();
    (count, ty)
}

// =============================================================================
// Operator Properties
// =============================================================================

proptest! {
    /// Property: arithmetic on two numbers is a number, with no diagnostics
    #[test]
    fn arithmetic_on_numbers_is_number(a in -1e9f64..1e9, b in -1e9f64..1e9, op in arithmetic_op()) {
        let (count, ty) = check_print(binary(num(a), op, num(b)));
        prop_assert_eq!(count, 0);
        prop_assert_eq!(ty, Some(Type::Number));
    }

    /// Property: a string operand makes arithmetic a type error typed `any`
    #[test]
    fn arithmetic_with_string_is_error(a in -1e9f64..1e9, s in "[a-z]{0,8}", op in arithmetic_op(), swap in any::<bool>()) {
        let (lhs, rhs) = if swap { (string(&s), num(a)) } else { (num(a), string(&s)) };
        let (count, ty) = check_print(binary(lhs, op, rhs));
        prop_assert_eq!(count, 1);
        prop_assert_eq!(ty, Some(Type::Any));
    }

    /// Property: `any` absorbs arithmetic, concatenation, and comparison against well-typed operands
    #[test]
    fn any_is_absorptive(n in -1e6f64..1e6, op in prop_oneof![arithmetic_op(), Just(BinaryOp::Concat), Just(BinaryOp::Lt)]) {
        let other = if op == BinaryOp::Concat { string("x") } else { num(n) };
        let dynamic = call(id("tonumber"), vec![string("1")]);
        let (count, ty) = check_print(binary(dynamic, op, other));
        prop_assert_eq!(count, 0);
        let expected = if op == BinaryOp::Lt { Type::Boolean } else { Type::Any };
        prop_assert_eq!(ty, Some(expected));
    }

    /// Property: `and`/`or` yield the union of their operand types and never fail
    #[test]
    fn logical_operators_yield_union((lhs, lhs_ty) in literal(), (rhs, rhs_ty) in literal(), use_and in any::<bool>()) {
        let op = if use_and { BinaryOp::And } else { BinaryOp::Or };
        let (count, ty) = check_print(binary(lhs, op, rhs));
        prop_assert_eq!(count, 0);
        prop_assert_eq!(ty, Some(Type::union(lhs_ty, rhs_ty)));
    }

    /// Property: a local annotated `any` adopts the general type of a non-nil literal with one warning
    #[test]
    fn any_local_adopts_literal_type((value, value_ty) in literal()) {
        let chunk = block(vec![local(vec![typed("x", ty("any"))], vec![value])]);
        let mut checker = TypeChecker::new("", "prop.tl");
        let diagnostics = checker.check_chunk(&chunk).err().unwrap_or_default();
        if value_ty == Type::Nil {
            prop_assert!(diagnostics.is_empty());
            prop_assert_eq!(checker.binding_type("x"), Some(&Type::Any));
        } else {
            prop_assert_eq!(diagnostics.len(), 1);
            prop_assert!(!diagnostics[0].is_error());
            let widened = value_ty.general();
            prop_assert_eq!(checker.binding_type("x"), Some(&widened));
        }
    }

    /// Property: checking is deterministic across fresh runs
    #[test]
    fn checking_is_deterministic((value, _) in literal(), a in -10.0f64..10.0) {
        let chunk = block(vec![
            local(vec![typed("x", ty("number"))], vec![value]),
            call_stmt(call(id("print"), vec![binary(id("x"), BinaryOp::Add, num(a))])),
            goto("missing"),
        ]);
        let first = check(&chunk, "", "a.tl").err();
        let second = check(&chunk, "", "a.tl").err();
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Type Facts Properties
// =============================================================================

proptest! {
    /// Property: subtyping is reflexive
    #[test]
    fn subtype_is_reflexive(t in base_type()) {
        prop_assert!(subtype(&t, &t));
    }

    /// Property: both static sides are subtypes of their union
    #[test]
    fn union_is_an_upper_bound(a in base_type(), b in base_type()) {
        prop_assume!(!a.is_any() && !b.is_any());
        let u = Type::union(a.clone(), b.clone());
        prop_assert!(subtype(&a, &u), "{} </: {}", a, u);
        prop_assert!(subtype(&b, &u), "{} </: {}", b, u);
    }

    /// Property: every static type is below `value`, and `any` relates only to itself
    #[test]
    fn value_is_top_of_static_types(t in base_type()) {
        prop_assert_eq!(subtype(&t, &Type::Object), !t.is_any());
        if !t.is_any() {
            prop_assert!(!subtype(&t, &Type::Any));
            prop_assert!(!subtype(&Type::Any, &t));
        }
    }
}
