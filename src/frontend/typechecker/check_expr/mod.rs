//! Check expressions and infer their types.
//!
//! This module owns the expression-checking entrypoint (`check_expr`) and delegates to themed submodules. Every
//! checked expression gets its type recorded in [`TypeCheckInfo`](super::TypeCheckInfo) before its parent's rule
//! runs. Failed rules return `any` so checking can continue.

use typedlua_core::Type;
use typedlua_syntax::ast::*;

use super::TypeChecker;

mod basics;
mod calls;
mod collections;
mod ops;

impl TypeChecker<'_> {
    /// Check an expression and return its inferred type.
    pub(crate) fn check_expr(&mut self, expr: &Spanned<Expr>) -> Type {
        let ty = match &expr.node {
            Expr::Nil => Type::Nil,
            Expr::True => Type::True,
            Expr::False => Type::False,
            Expr::Number(n) => Type::ConstantNumber(*n),
            Expr::String(s) => Type::ConstantString(s.clone()),
            Expr::Dots => self.check_dots(),
            Expr::Function(func) => self.check_function_literal(func),
            Expr::Table(fields) => self.check_table(fields),
            Expr::Binary(left, op, right) => self.check_binary(left, *op, right, expr.span),
            Expr::Unary(op, operand) => self.check_unary(*op, operand),
            Expr::Paren(inner) => self.check_expr(inner),
            Expr::Call(callee, args) => self.check_call(callee, args),
            Expr::MethodCall(receiver, _, args) => self.check_method_call(receiver, args),
            Expr::Id(name) => self.check_var_ref(name, expr.span),
            Expr::Index(base, key) => self.check_index(base, key),
        };
        self.record_expr_type(expr.span, ty.clone());
        ty
    }
}
