//! Check calls, method calls, and function literals.
//!
//! All three are opaque: they type as `any`, but callee, arguments, and bodies are still checked.

use typedlua_core::Type;
use typedlua_syntax::ast::*;

use crate::frontend::typechecker::TypeChecker;

impl TypeChecker<'_> {
    pub(in crate::frontend::typechecker::check_expr) fn check_call(
        &mut self,
        callee: &Spanned<Expr>,
        args: &[Spanned<Expr>],
    ) -> Type {
        self.check_expr(callee);
        self.check_args(args);
        Type::Any
    }

    pub(in crate::frontend::typechecker::check_expr) fn check_method_call(
        &mut self,
        receiver: &Spanned<Expr>,
        args: &[Spanned<Expr>],
    ) -> Type {
        self.check_expr(receiver);
        self.check_args(args);
        Type::Any
    }

    pub(in crate::frontend::typechecker::check_expr) fn check_function_literal(&mut self, func: &FunctionBody) -> Type {
        self.check_function_body(func, false);
        Type::Any
    }

    fn check_args(&mut self, args: &[Spanned<Expr>]) {
        for arg in args {
            self.check_expr(arg);
        }
    }
}
