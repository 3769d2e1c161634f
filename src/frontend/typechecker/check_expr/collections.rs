//! Check table constructors and indexing. Both type as `any`.

use typedlua_core::Type;
use typedlua_syntax::ast::*;

use crate::frontend::typechecker::TypeChecker;

impl TypeChecker<'_> {
    pub(in crate::frontend::typechecker::check_expr) fn check_table(&mut self, fields: &[TableField]) -> Type {
        for field in fields {
            match field {
                TableField::Positional(value) => {
                    self.check_expr(value);
                }
                TableField::Named(key, value) => {
                    self.check_expr(key);
                    self.check_expr(value);
                }
            }
        }
        Type::Any
    }

    pub(in crate::frontend::typechecker::check_expr) fn check_index(
        &mut self,
        base: &Spanned<Expr>,
        key: &Spanned<Expr>,
    ) -> Type {
        self.check_expr(base);
        self.check_expr(key);
        Type::Any
    }
}
