//! Check unary and binary operators.
//!
//! - Arithmetic needs numbers, concatenation needs strings, `#` needs a string; `any` operands make the result
//!   `any`.
//! - Order comparisons need two numbers or two strings unless either side is `any`.
//! - Equality and `not` are total; `and`/`or` yield the union of their operand types.

use typedlua_core::{Type, subtype};
use typedlua_syntax::ast::*;

use crate::frontend::diagnostics::{Diagnostic, errors};
use crate::frontend::typechecker::TypeChecker;

/// Outcome of checking operands against an expected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operands {
    /// Every operand is a subtype of the expected type.
    Static,
    /// Some operand is `any` and none is wrong.
    Dynamic,
    /// An operand was reported.
    Invalid,
}

impl TypeChecker<'_> {
    /// Type-check a binary operation and return its result type.
    pub(in crate::frontend::typechecker::check_expr) fn check_binary(
        &mut self,
        left: &Spanned<Expr>,
        op: BinaryOp,
        right: &Spanned<Expr>,
        span: Span,
    ) -> Type {
        let left_ty = self.check_expr(left);
        let right_ty = self.check_expr(right);
        let operands = [(&left_ty, left.span), (&right_ty, right.span)];

        match op.kind() {
            BinaryOpKind::Arithmetic => match self.check_operands(&operands, &Type::Number, errors::arithmetic) {
                Operands::Static => Type::Number,
                Operands::Dynamic | Operands::Invalid => Type::Any,
            },
            BinaryOpKind::Concat => match self.check_operands(&operands, &Type::String, errors::concatenate) {
                Operands::Static => Type::String,
                Operands::Dynamic | Operands::Invalid => Type::Any,
            },
            BinaryOpKind::Equality => Type::Boolean,
            BinaryOpKind::Order => {
                let comparable = left_ty.is_any()
                    || right_ty.is_any()
                    || (subtype(&left_ty, &Type::Number) && subtype(&right_ty, &Type::Number))
                    || (subtype(&left_ty, &Type::String) && subtype(&right_ty, &Type::String));
                if !comparable {
                    self.diagnostics.push(errors::compare(
                        &left_ty.to_string(),
                        &right_ty.to_string(),
                        span,
                    ));
                }
                Type::Boolean
            }
            BinaryOpKind::Logical => Type::union(left_ty.clone(), right_ty.clone()),
        }
    }

    /// Type-check a unary operation and return its result type.
    pub(in crate::frontend::typechecker::check_expr) fn check_unary(
        &mut self,
        op: UnaryOp,
        operand: &Spanned<Expr>,
    ) -> Type {
        let ty = self.check_expr(operand);
        match op {
            UnaryOp::Neg => match self.check_operands(&[(&ty, operand.span)], &Type::Number, errors::arithmetic) {
                Operands::Static => Type::Number,
                Operands::Dynamic | Operands::Invalid => Type::Any,
            },
            UnaryOp::Len => match self.check_operands(&[(&ty, operand.span)], &Type::String, errors::length) {
                Operands::Static => Type::Number,
                Operands::Dynamic | Operands::Invalid => Type::Any,
            },
            UnaryOp::Not => Type::Boolean,
        }
    }

    /// Report the first operand that is neither `any` nor a subtype of `expected`.
    fn check_operands(
        &mut self,
        operands: &[(&Type, Span)],
        expected: &Type,
        report: fn(&str, Span) -> Diagnostic,
    ) -> Operands {
        if let Some((ty, span)) = operands
            .iter()
            .find(|(ty, _)| !ty.is_any() && !subtype(ty, expected))
        {
            self.diagnostics.push(report(&ty.to_string(), *span));
            return Operands::Invalid;
        }
        if operands.iter().any(|(ty, _)| ty.is_any()) {
            Operands::Dynamic
        } else {
            Operands::Static
        }
    }
}
