//! Statement checking: control flow, loops, labels.

use typedlua_core::{Type, subtype};
use typedlua_syntax::ast::*;

use crate::frontend::diagnostics::{errors, warnings};

use super::TypeChecker;

impl TypeChecker<'_> {
    // ========================================================================
    // Blocks
    // ========================================================================

    /// Check statements in the current scope.
    pub(crate) fn check_block(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.check_stmt(stmt);
        }
    }

    /// Check a block in a fresh nested scope.
    fn check_scoped_block(&mut self, block: &Block) {
        self.symbols.begin_scope();
        self.check_block(block);
        self.symbols.end_scope();
    }

    /// Check a loop body: a fresh scope inside a loop marker.
    fn check_loop_body(&mut self, block: &Block) {
        self.symbols.begin_loop();
        self.check_scoped_block(block);
        self.symbols.end_loop();
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub(crate) fn check_stmt(&mut self, stmt: &Spanned<Stmt>) {
        match &stmt.node {
            Stmt::Do(body) => self.check_scoped_block(body),
            Stmt::Local(local) => self.check_local(local),
            Stmt::Assign(assign) => self.check_assign(assign),
            Stmt::Call(call) => {
                self.check_expr(call);
            }
            Stmt::While(while_stmt) => {
                self.check_expr(&while_stmt.condition);
                self.check_loop_body(&while_stmt.body);
            }
            Stmt::Repeat(repeat) => self.check_repeat(repeat),
            Stmt::If(if_stmt) => self.check_if(if_stmt),
            Stmt::NumericFor(for_stmt) => self.check_numeric_for(for_stmt),
            Stmt::GenericFor(for_stmt) => self.check_generic_for(for_stmt),
            Stmt::Function(func) => self.check_function_stmt(func),
            Stmt::LocalFunction(func) => self.check_local_function(func),
            Stmt::Return(values) => {
                // Not compared against return annotations.
                for value in values {
                    self.check_expr(value);
                }
            }
            Stmt::Break => {
                if !self.symbols.inside_loop() {
                    self.diagnostics.push(errors::break_outside_loop(stmt.span));
                }
            }
            Stmt::Goto(name) => self.symbols.add_goto(name, stmt.span),
            Stmt::Label(name) => {
                if let Err(previous) = self.symbols.declare_label(name, stmt.span) {
                    let previous_line = self.line_of(previous);
                    self.diagnostics
                        .push(errors::duplicate_label(name, previous_line, stmt.span));
                }
            }
        }
    }

    /// `repeat ... until cond`: the condition is checked in the body's scope.
    fn check_repeat(&mut self, repeat: &RepeatStmt) {
        self.symbols.begin_loop();
        self.symbols.begin_scope();
        self.check_block(&repeat.body);
        self.check_expr(&repeat.condition);
        self.symbols.end_scope();
        self.symbols.end_loop();
    }

    fn check_if(&mut self, if_stmt: &IfStmt) {
        for branch in &if_stmt.branches {
            self.check_expr(&branch.condition);
            self.check_scoped_block(&branch.body);
        }
        if let Some(else_body) = &if_stmt.else_body {
            self.check_scoped_block(else_body);
        }
    }

    // ========================================================================
    // Loops
    // ========================================================================

    fn check_numeric_for(&mut self, for_stmt: &NumericForStmt) {
        self.check_for_bound("initial", &for_stmt.start);
        self.check_for_bound("limit", &for_stmt.limit);
        if let Some(step) = &for_stmt.step {
            self.check_for_bound("step", step);
        }

        self.symbols.begin_loop();
        self.symbols.begin_scope();
        self.declare_local(&for_stmt.var.node, Type::Number, for_stmt.var.span);
        self.check_block(&for_stmt.body);
        self.symbols.end_scope();
        self.symbols.end_loop();
    }

    /// Bounds are checked in the enclosing scope, before the loop variable exists.
    fn check_for_bound(&mut self, which: &str, expr: &Spanned<Expr>) {
        let ty = self.check_expr(expr);
        if ty.is_any() {
            self.diagnostics
                .push(warnings::cast_from_any(&Type::Number.to_string(), expr.span));
        } else if !subtype(&ty, &Type::Number) {
            self.diagnostics
                .push(errors::for_bound(which, &ty.to_string(), expr.span));
        }
    }

    /// Iterator and state types are not constrained.
    fn check_generic_for(&mut self, for_stmt: &GenericForStmt) {
        self.symbols.begin_loop();
        self.symbols.begin_scope();
        for expr in &for_stmt.exprs {
            self.check_expr(expr);
        }
        for name in &for_stmt.names {
            let ty = self.resolve_annotation(name.node.ty.as_ref());
            self.declare_local(&name.node.name, ty, name.span);
        }
        self.check_block(&for_stmt.body);
        self.symbols.end_scope();
        self.symbols.end_loop();
    }
}
