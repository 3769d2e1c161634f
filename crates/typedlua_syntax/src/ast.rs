//! Abstract Syntax Tree definitions for Typed Lua
//!
//! Every node kind is a variant of a closed enum, so the checker dispatches by exhaustive matching. Nodes are
//! wrapped in [`Spanned`] to carry their byte range in the source text.
//!
//! The types derive `Deserialize` for the JSON form an external parser emits (see [`crate::json`]): enums are
//! adjacently tagged as `{"tag": "<Variant>", "args": <payload>}`, blocks are plain arrays of statements, and spans
//! are either `[start, end]` or `{"start": .., "end": ..}`.

use std::fmt;

use serde::Deserialize;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "SpanRepr")]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpanRepr {
    Pair(usize, usize),
    Fields { start: usize, end: usize },
}

impl From<SpanRepr> for Span {
    fn from(repr: SpanRepr) -> Self {
        match repr {
            SpanRepr::Pair(start, end) | SpanRepr::Fields { start, end } => Span { start, end },
        }
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Spanned<T> {
    pub node: T,
    #[serde(default)]
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    /// Replace the span, keeping the node.
    pub fn at(self, start: usize, end: usize) -> Self {
        Self {
            node: self.node,
            span: Span::new(start, end),
        }
    }
}

pub type Ident = String;

/// A sequence of statements: the main chunk and every nested body.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct Block {
    pub stmts: Vec<Spanned<Stmt>>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "tag", content = "args")]
pub enum Stmt {
    Do(Block),
    Local(LocalStmt),
    Assign(AssignStmt),
    /// A call used as a statement; the expression is a `Call` or `MethodCall`.
    Call(Spanned<Expr>),
    While(WhileStmt),
    Repeat(RepeatStmt),
    If(IfStmt),
    NumericFor(NumericForStmt),
    GenericFor(GenericForStmt),
    /// `function a.b:c() ... end`
    Function(FunctionStmt),
    LocalFunction(LocalFunctionStmt),
    Return(Vec<Spanned<Expr>>),
    Break,
    Goto(Ident),
    Label(Ident),
}

/// `local a: number, b = 1, 2`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocalStmt {
    pub names: Vec<Spanned<TypedName>>,
    #[serde(default)]
    pub values: Vec<Spanned<Expr>>,
}

/// `a, t.k = 1, 2`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssignStmt {
    pub targets: Vec<Spanned<Expr>>,
    pub values: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Block,
}

/// `repeat ... until cond`; the condition sees the body's locals.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepeatStmt {
    pub body: Block,
    pub condition: Spanned<Expr>,
}

/// `if` with its `elseif` chain; `branches` is never empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IfStmt {
    pub branches: Vec<IfBranch>,
    #[serde(default)]
    pub else_body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IfBranch {
    pub condition: Spanned<Expr>,
    pub body: Block,
}

/// `for i = start, limit[, step] do ... end`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NumericForStmt {
    pub var: Spanned<Ident>,
    pub start: Spanned<Expr>,
    pub limit: Spanned<Expr>,
    #[serde(default)]
    pub step: Option<Spanned<Expr>>,
    pub body: Block,
}

/// `for k, v in explist do ... end`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenericForStmt {
    pub names: Vec<Spanned<TypedName>>,
    pub exprs: Vec<Spanned<Expr>>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionStmt {
    pub name: FunctionName,
    pub func: FunctionBody,
}

/// The dotted name of a function statement: `base.fields[0].fields[1]:method`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionName {
    pub base: Spanned<Ident>,
    #[serde(default)]
    pub fields: Vec<Ident>,
    #[serde(default)]
    pub method: Option<Ident>,
}

impl FunctionName {
    /// A plain `function f` with no fields or method.
    pub fn is_simple(&self) -> bool {
        self.fields.is_empty() && self.method.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocalFunctionStmt {
    pub name: Spanned<Ident>,
    pub func: FunctionBody,
}

// ============================================================================
// Functions and annotations
// ============================================================================

/// Parameters, optional `...`, return annotations, and body of a function.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionBody {
    #[serde(default)]
    pub params: Vec<Spanned<TypedName>>,
    #[serde(default)]
    pub vararg: Option<Spanned<VarArgParam>>,
    #[serde(default)]
    pub returns: Vec<Spanned<TypeExpr>>,
    pub body: Block,
}

/// A trailing `...` parameter, optionally annotated with its element type.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VarArgParam {
    #[serde(default)]
    pub ty: Option<Spanned<TypeExpr>>,
}

/// A name with an optional annotation (`x` or `x: number`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypedName {
    pub name: Ident,
    #[serde(default)]
    pub ty: Option<Spanned<TypeExpr>>,
}

/// A written type annotation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "tag", content = "args")]
pub enum TypeExpr {
    Name(Ident),
    /// `a | b | c`
    Union(Vec<Spanned<TypeExpr>>),
    /// `T?`, shorthand for `T | nil`
    Optional(Box<Spanned<TypeExpr>>),
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "tag", content = "args")]
pub enum Expr {
    Nil,
    True,
    False,
    Number(f64),
    String(String),
    /// `...`
    Dots,
    Function(Box<FunctionBody>),
    Table(Vec<TableField>),
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Paren(Box<Spanned<Expr>>),
    Call(Box<Spanned<Expr>>, Vec<Spanned<Expr>>),
    MethodCall(Box<Spanned<Expr>>, Ident, Vec<Spanned<Expr>>),
    Id(Ident),
    Index(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
}

impl Expr {
    /// Whether the expression may appear on the left of `=`.
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Expr::Id(_) | Expr::Index(_, _))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "tag", content = "args")]
pub enum TableField {
    /// `{ v }`
    Positional(Spanned<Expr>),
    /// `{ k = v }` or `{ [k] = v }`
    Named(Spanned<Expr>, Spanned<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "^")]
    Pow,
    #[serde(rename = "..")]
    Concat,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "~=")]
    NotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
}

/// Rule family a binary operator is typed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOpKind {
    Arithmetic,
    Concat,
    Equality,
    Order,
    Logical,
}

impl BinaryOp {
    pub fn kind(self) -> BinaryOpKind {
        match self {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::Pow => {
                BinaryOpKind::Arithmetic
            }
            BinaryOp::Concat => BinaryOpKind::Concat,
            BinaryOp::Eq | BinaryOp::NotEq => BinaryOpKind::Equality,
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => BinaryOpKind::Order,
            BinaryOp::And | BinaryOp::Or => BinaryOpKind::Logical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Concat => "..",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "~=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum UnaryOp {
    #[serde(rename = "-")]
    Neg,
    #[serde(rename = "not")]
    Not,
    #[serde(rename = "#")]
    Len,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
            UnaryOp::Len => "#",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let merged = Span::new(4, 9).merge(Span::new(2, 6));
        assert_eq!(merged, Span::new(2, 9));
    }

    #[test]
    fn test_binary_op_kinds() {
        assert_eq!(BinaryOp::Pow.kind(), BinaryOpKind::Arithmetic);
        assert_eq!(BinaryOp::NotEq.kind(), BinaryOpKind::Equality);
        assert_eq!(BinaryOp::GtEq.kind(), BinaryOpKind::Order);
        assert_eq!(BinaryOp::Or.to_string(), "or");
    }

    #[test]
    fn test_lvalues() {
        assert!(Expr::Id("x".to_string()).is_lvalue());
        assert!(!Expr::Nil.is_lvalue());
        assert!(!Expr::Paren(Box::new(Spanned::new(Expr::Id("x".to_string()), Span::default()))).is_lvalue());
    }
}
