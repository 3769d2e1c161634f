//! Check name references and `...`.

use typedlua_core::Type;
use typedlua_syntax::ast::Span;

use crate::frontend::diagnostics::errors;
use crate::frontend::typechecker::{TypeChecker, VARARG_NAME};

impl TypeChecker<'_> {
    /// Resolve a name to its binding's type.
    ///
    /// An undeclared global is a type error and reads as `nil`.
    pub(crate) fn check_var_ref(&mut self, name: &str, span: Span) -> Type {
        match self.symbols.lookup(name) {
            Some(binding) => binding.ty.clone(),
            None => {
                self.diagnostics.push(errors::undeclared_global(name, span));
                Type::Nil
            }
        }
    }

    /// `...` reads as one value of the innermost `...` binding's element type.
    pub(in crate::frontend::typechecker::check_expr) fn check_dots(&self) -> Type {
        match self.symbols.lookup(VARARG_NAME) {
            Some(binding) => binding.ty.vararg_element().unwrap_or(&binding.ty).clone(),
            None => Type::Any,
        }
    }
}
