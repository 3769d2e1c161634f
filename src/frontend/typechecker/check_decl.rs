//! Declaration checking: locals, assignments, functions, and type annotations.
//!
//! Bindings change type only through [`TypeChecker::set_var`] (declarations) and are checked against their declared
//! type by [`TypeChecker::update_var`] (re-assignments).

use typedlua_core::{Type, name_to_type, subtype};
use typedlua_syntax::ast::*;

use crate::frontend::diagnostics::{errors, warnings};
use crate::frontend::symbols::Binding;

use super::{TypeChecker, VARARG_NAME};

impl TypeChecker<'_> {
    // ========================================================================
    // Assignment rules
    // ========================================================================

    /// Decide the type a fresh binding gets from its declared and inferred types.
    ///
    /// - inferred <: declared: keep the declared type.
    /// - declared `any`: adopt the inferred type widened to its base type, with a warning; `nil` keeps `any`
    ///   silently.
    /// - inferred `any`: keep the declared type, with a warning.
    /// - otherwise: type error, and the binding falls back to `any`.
    pub(crate) fn set_var(&mut self, name: &str, declared: Type, inferred: &Type, span: Span) -> Type {
        if subtype(inferred, &declared) {
            declared
        } else if declared.is_any() {
            if inferred.is_nil() {
                return Type::Any;
            }
            let adopted = inferred.general();
            self.diagnostics
                .push(warnings::cast_from_any(&adopted.to_string(), span));
            adopted
        } else if inferred.is_any() {
            self.diagnostics
                .push(warnings::cast_to_any(&declared.to_string(), span));
            declared
        } else {
            self.diagnostics.push(errors::assign_mismatch(
                &inferred.to_string(),
                name,
                &declared.to_string(),
                span,
            ));
            Type::Any
        }
    }

    /// Check a re-assignment against an existing binding's type, which never changes.
    pub(crate) fn update_var(&mut self, name: &str, declared: &Type, inferred: &Type, span: Span) {
        if subtype(inferred, declared) {
            return;
        }
        if declared.is_any() {
            if !inferred.is_nil() {
                self.diagnostics
                    .push(warnings::cast_from_any(&inferred.general().to_string(), span));
            }
        } else if inferred.is_any() {
            self.diagnostics
                .push(warnings::cast_to_any(&declared.to_string(), span));
        } else {
            self.diagnostics.push(errors::assign_mismatch(
                &inferred.to_string(),
                name,
                &declared.to_string(),
                span,
            ));
        }
    }

    /// Assign to a plain name: update an existing local or global, else declare a new global.
    pub(crate) fn assign_name(&mut self, name: &str, inferred: &Type, span: Span) {
        let existing = self
            .symbols
            .lookup_local(name)
            .or_else(|| self.symbols.lookup_global(name))
            .map(|b| b.ty.clone());

        let ty = match existing {
            Some(declared) => {
                self.update_var(name, &declared, inferred, span);
                declared
            }
            None => {
                let ty = self.set_var(name, Type::Any, inferred, span);
                self.symbols.define_global(Binding {
                    name: name.to_string(),
                    ty: ty.clone(),
                    span,
                });
                ty
            }
        };
        self.record_expr_type(span, ty);
    }

    /// Declare a local in the current scope and record its type at the name's span.
    pub(crate) fn declare_local(&mut self, name: &str, ty: Type, span: Span) {
        self.record_expr_type(span, ty.clone());
        self.symbols.define_local(Binding {
            name: name.to_string(),
            ty,
            span,
        });
    }

    /// Check a right-hand expression list.
    ///
    /// ## Returns
    /// - The type of each expression.
    /// - The filler type for targets past the end of the list: the element type when the list ends in `...` bound
    ///   to a vararg type, `nil` otherwise.
    fn check_explist(&mut self, exprs: &[Spanned<Expr>]) -> (Vec<Type>, Type) {
        let types: Vec<Type> = exprs.iter().map(|e| self.check_expr(e)).collect();
        let filler = match exprs.last() {
            Some(last) if matches!(last.node, Expr::Dots) => self
                .symbols
                .lookup(VARARG_NAME)
                .and_then(|b| b.ty.vararg_element())
                .cloned()
                .unwrap_or(Type::Nil),
            _ => Type::Nil,
        };
        (types, filler)
    }

    // ========================================================================
    // Local declarations and assignments
    // ========================================================================

    /// `local names = values`: values are checked before any name is in scope.
    pub(crate) fn check_local(&mut self, local: &LocalStmt) {
        let (value_types, filler) = self.check_explist(&local.values);
        for (i, name) in local.names.iter().enumerate() {
            let declared = self.resolve_annotation(name.node.ty.as_ref());
            let inferred = value_types.get(i).unwrap_or(&filler);
            let ty = self.set_var(&name.node.name, declared, inferred, name.span);
            self.declare_local(&name.node.name, ty, name.span);
        }
    }

    pub(crate) fn check_assign(&mut self, assign: &AssignStmt) {
        let (value_types, filler) = self.check_explist(&assign.values);
        for (i, target) in assign.targets.iter().enumerate() {
            let inferred = value_types.get(i).unwrap_or(&filler);
            match &target.node {
                Expr::Id(name) => self.assign_name(name, inferred, target.span),
                Expr::Index(base, key) => {
                    self.check_expr(base);
                    self.check_expr(key);
                    self.record_expr_type(target.span, Type::Any);
                }
                _ => self
                    .diagnostics
                    .push(errors::invalid_assign_target(target.span)),
            }
        }
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// `function f`, `function a.b`, `function a:m`.
    pub(crate) fn check_function_stmt(&mut self, func: &FunctionStmt) {
        let name = &func.name;
        if name.is_simple() {
            self.assign_name(&name.base.node, &Type::Any, name.base.span);
        } else {
            let ty = self.check_var_ref(&name.base.node, name.base.span);
            self.record_expr_type(name.base.span, ty);
        }
        self.check_function_body(&func.func, name.method.is_some());
    }

    /// `local function f`: `f` is in scope inside its own body.
    pub(crate) fn check_local_function(&mut self, func: &LocalFunctionStmt) {
        self.declare_local(&func.name.node, Type::Any, func.name.span);
        self.check_function_body(&func.func, false);
    }

    /// Check a function body in its own scope.
    ///
    /// Parameters take their annotated type (or `any`), methods get an implicit `self: any`, and a vararg function
    /// binds `...` to a vararg of its annotated element type. Annotations are resolved so unknown names are
    /// reported, but the body's returns are not compared against them.
    pub(crate) fn check_function_body(&mut self, func: &FunctionBody, is_method: bool) {
        let saved_loop_depth = self.symbols.enter_function();
        self.symbols.begin_scope();

        if is_method {
            self.symbols.define_local(Binding {
                name: "self".to_string(),
                ty: Type::Any,
                span: Span::default(),
            });
        }
        for param in &func.params {
            let ty = self.resolve_annotation(param.node.ty.as_ref());
            self.declare_local(&param.node.name, ty, param.span);
        }
        if let Some(vararg) = &func.vararg {
            let elem = self.resolve_annotation(vararg.node.ty.as_ref());
            self.declare_local(VARARG_NAME, Type::vararg(elem), vararg.span);
        }
        for ret in &func.returns {
            self.resolve_type_expr(ret);
        }

        self.check_block(&func.body);

        self.symbols.end_scope();
        self.symbols.leave_function(saved_loop_depth);
    }

    // ========================================================================
    // Annotations
    // ========================================================================

    /// Resolve an optional annotation; a missing one means `any`.
    pub(crate) fn resolve_annotation(&mut self, ty: Option<&Spanned<TypeExpr>>) -> Type {
        ty.map_or(Type::Any, |t| self.resolve_type_expr(t))
    }

    /// Resolve a written type. Unknown names are reported and resolve to `any`.
    pub(crate) fn resolve_type_expr(&mut self, ty: &Spanned<TypeExpr>) -> Type {
        match &ty.node {
            TypeExpr::Name(name) => name_to_type(name).unwrap_or_else(|| {
                self.diagnostics.push(errors::unknown_type(name, ty.span));
                Type::Any
            }),
            TypeExpr::Union(members) => members
                .iter()
                .map(|m| self.resolve_type_expr(m))
                .reduce(Type::union)
                .unwrap_or(Type::Any),
            TypeExpr::Optional(inner) => Type::union(self.resolve_type_expr(inner), Type::Nil),
        }
    }
}
