use std::fmt::{Display, Formatter};
use ucalc_types::Span;

mod token;

pub use token::{Token, TokenKind};

pub trait AstNode {
    fn span(&self) -> Span;
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    Literal(LiteralExpr),
    Unary(UnaryExpr),
    Grouping(GroupingExpr),
    /// Reserved for infix operators. The current grammar never builds one.
    Binary(BinaryExpr),
}

impl AstNode for Expr {
    fn span(&self) -> Span {
        match self {
            Expr::Literal(e) => e.span,
            Expr::Unary(e) => e.span,
            Expr::Grouping(e) => e.span,
            Expr::Binary(e) => e.span,
        }
    }
}

/// A number with an optional measurement label, e.g. `40 kg`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiteralExpr {
    pub value: f64,
    /// Empty when the number carries no unit.
    pub label: String,
    pub span: Span,
}

impl LiteralExpr {
    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnaryExpr {
    pub op: Token,
    pub expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupingExpr {
    /// The `(` or `|` token that opened the group.
    pub delimiter: Token,
    pub expr: Box<Expr>,
    pub span: Span,
}

impl GroupingExpr {
    /// Bar groups read as absolute value.
    pub fn is_absolute(&self) -> bool {
        self.delimiter.kind == TokenKind::Bar
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stmt {
    Expression(ExpressionStmt),
    Print(PrintStmt),
}

impl Stmt {
    pub fn expr(&self) -> &Expr {
        match self {
            Stmt::Expression(s) => &s.expr,
            Stmt::Print(s) => &s.expr,
        }
    }
}

impl AstNode for Stmt {
    fn span(&self) -> Span {
        match self {
            Stmt::Expression(s) => s.span,
            Stmt::Print(s) => s.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpressionStmt {
    pub expr: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrintStmt {
    pub expr: Expr,
    pub span: Span,
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal(e) if e.has_label() => write!(f, "{} {}", e.value, e.label),
            Expr::Literal(e) => write!(f, "{}", e.value),
            Expr::Unary(e) => write!(f, "({} {})", e.op.lexeme, e.expr),
            Expr::Grouping(e) if e.is_absolute() => write!(f, "(abs {})", e.expr),
            Expr::Grouping(e) => write!(f, "(group {})", e.expr),
            Expr::Binary(e) => write!(f, "({} {} {})", e.op.lexeme, e.left, e.right),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Expression(s) => write!(f, "(expr {})", s.expr),
            Stmt::Print(s) => write!(f, "(print {})", s.expr),
        }
    }
}
