//! Programmatic AST construction.
//!
//! Builders produce nodes with an empty span; use [`Spanned::at`] when the position matters (for example when
//! asserting on formatted diagnostics).
//!
//! ## Examples
//! ```rust
//! use typedlua_syntax::ast::BinaryOp;
//! use typedlua_syntax::build::*;
//!
//! // local x: number = 1 + 2
//! let chunk = block(vec![local(
//!     vec![typed("x", ty("number"))],
//!     vec![binary(num(1.0), BinaryOp::Add, num(2.0))],
//! )]);
//! assert_eq!(chunk.stmts.len(), 1);
//! ```

use crate::ast::*;

fn unspanned<T>(node: T) -> Spanned<T> {
    Spanned::new(node, Span::default())
}

pub fn block(stmts: Vec<Spanned<Stmt>>) -> Block {
    Block { stmts }
}

// ---- expressions ----

pub fn nil() -> Spanned<Expr> {
    unspanned(Expr::Nil)
}

pub fn boolean(value: bool) -> Spanned<Expr> {
    unspanned(if value { Expr::True } else { Expr::False })
}

pub fn num(value: f64) -> Spanned<Expr> {
    unspanned(Expr::Number(value))
}

pub fn string(value: &str) -> Spanned<Expr> {
    unspanned(Expr::String(value.to_string()))
}

pub fn dots() -> Spanned<Expr> {
    unspanned(Expr::Dots)
}

pub fn id(name: &str) -> Spanned<Expr> {
    unspanned(Expr::Id(name.to_string()))
}

pub fn binary(lhs: Spanned<Expr>, op: BinaryOp, rhs: Spanned<Expr>) -> Spanned<Expr> {
    unspanned(Expr::Binary(Box::new(lhs), op, Box::new(rhs)))
}

pub fn unary(op: UnaryOp, operand: Spanned<Expr>) -> Spanned<Expr> {
    unspanned(Expr::Unary(op, Box::new(operand)))
}

pub fn paren(inner: Spanned<Expr>) -> Spanned<Expr> {
    unspanned(Expr::Paren(Box::new(inner)))
}

pub fn call(callee: Spanned<Expr>, args: Vec<Spanned<Expr>>) -> Spanned<Expr> {
    unspanned(Expr::Call(Box::new(callee), args))
}

pub fn method_call(receiver: Spanned<Expr>, method: &str, args: Vec<Spanned<Expr>>) -> Spanned<Expr> {
    unspanned(Expr::MethodCall(Box::new(receiver), method.to_string(), args))
}

pub fn index(base: Spanned<Expr>, key: Spanned<Expr>) -> Spanned<Expr> {
    unspanned(Expr::Index(Box::new(base), Box::new(key)))
}

pub fn table(fields: Vec<TableField>) -> Spanned<Expr> {
    unspanned(Expr::Table(fields))
}

pub fn function(func: FunctionBody) -> Spanned<Expr> {
    unspanned(Expr::Function(Box::new(func)))
}

// ---- functions and annotations ----

/// A function body with the given parameters and no vararg or return annotations.
pub fn func(params: Vec<Spanned<TypedName>>, body: Block) -> FunctionBody {
    FunctionBody {
        params,
        vararg: None,
        returns: Vec::new(),
        body,
    }
}

/// A function body ending in `...`, optionally annotated (`...: number`).
pub fn vararg_func(params: Vec<Spanned<TypedName>>, vararg_ty: Option<Spanned<TypeExpr>>, body: Block) -> FunctionBody {
    FunctionBody {
        vararg: Some(unspanned(VarArgParam { ty: vararg_ty })),
        ..func(params, body)
    }
}

pub fn name(name: &str) -> Spanned<TypedName> {
    unspanned(TypedName {
        name: name.to_string(),
        ty: None,
    })
}

pub fn typed(name: &str, ty: Spanned<TypeExpr>) -> Spanned<TypedName> {
    unspanned(TypedName {
        name: name.to_string(),
        ty: Some(ty),
    })
}

pub fn ty(name: &str) -> Spanned<TypeExpr> {
    unspanned(TypeExpr::Name(name.to_string()))
}

pub fn union_ty(members: Vec<Spanned<TypeExpr>>) -> Spanned<TypeExpr> {
    unspanned(TypeExpr::Union(members))
}

pub fn optional_ty(inner: Spanned<TypeExpr>) -> Spanned<TypeExpr> {
    unspanned(TypeExpr::Optional(Box::new(inner)))
}

// ---- statements ----

pub fn local(names: Vec<Spanned<TypedName>>, values: Vec<Spanned<Expr>>) -> Spanned<Stmt> {
    unspanned(Stmt::Local(LocalStmt { names, values }))
}

pub fn assign(targets: Vec<Spanned<Expr>>, values: Vec<Spanned<Expr>>) -> Spanned<Stmt> {
    unspanned(Stmt::Assign(AssignStmt { targets, values }))
}

pub fn call_stmt(call: Spanned<Expr>) -> Spanned<Stmt> {
    unspanned(Stmt::Call(call))
}

pub fn do_(body: Block) -> Spanned<Stmt> {
    unspanned(Stmt::Do(body))
}

pub fn while_(condition: Spanned<Expr>, body: Block) -> Spanned<Stmt> {
    unspanned(Stmt::While(WhileStmt { condition, body }))
}

pub fn repeat(body: Block, condition: Spanned<Expr>) -> Spanned<Stmt> {
    unspanned(Stmt::Repeat(RepeatStmt { body, condition }))
}

/// `if c1 then b1 elseif c2 then b2 ... [else e] end`
pub fn if_(branches: Vec<(Spanned<Expr>, Block)>, else_body: Option<Block>) -> Spanned<Stmt> {
    let branches = branches
        .into_iter()
        .map(|(condition, body)| IfBranch { condition, body })
        .collect();
    unspanned(Stmt::If(IfStmt { branches, else_body }))
}

pub fn numeric_for(
    var: &str,
    start: Spanned<Expr>,
    limit: Spanned<Expr>,
    step: Option<Spanned<Expr>>,
    body: Block,
) -> Spanned<Stmt> {
    unspanned(Stmt::NumericFor(NumericForStmt {
        var: unspanned(var.to_string()),
        start,
        limit,
        step,
        body,
    }))
}

pub fn generic_for(names: Vec<Spanned<TypedName>>, exprs: Vec<Spanned<Expr>>, body: Block) -> Spanned<Stmt> {
    unspanned(Stmt::GenericFor(GenericForStmt { names, exprs, body }))
}

/// `function base.fields...[:method]`
pub fn function_stmt(base: &str, fields: &[&str], method: Option<&str>, func: FunctionBody) -> Spanned<Stmt> {
    let name = FunctionName {
        base: unspanned(base.to_string()),
        fields: fields.iter().map(|f| f.to_string()).collect(),
        method: method.map(str::to_string),
    };
    unspanned(Stmt::Function(FunctionStmt { name, func }))
}

pub fn local_function(name: &str, func: FunctionBody) -> Spanned<Stmt> {
    unspanned(Stmt::LocalFunction(LocalFunctionStmt {
        name: unspanned(name.to_string()),
        func,
    }))
}

pub fn ret(values: Vec<Spanned<Expr>>) -> Spanned<Stmt> {
    unspanned(Stmt::Return(values))
}

pub fn brk() -> Spanned<Stmt> {
    unspanned(Stmt::Break)
}

pub fn goto(label: &str) -> Spanned<Stmt> {
    unspanned(Stmt::Goto(label.to_string()))
}

pub fn label(name: &str) -> Spanned<Stmt> {
    unspanned(Stmt::Label(name.to_string()))
}
