use std::{cell::OnceCell, fmt};

use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::{
    environment::environment::{self, Type, Variable},
    Span,
};

/// Literal Value
/// The literal kinds a source program can spell out directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Boolean(bool),
    Integer(BigInt),
    Decimal(Decimal),
    Character(char),
    String(String),
}

/// Binary Operator
/// The closed set of binary operators, loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    And,
    Or,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        };
        write!(f, "{}", source)
    }
}

/// Literal Expression
/// Represents a literal value in the AST.
#[derive(Debug, Clone)]
pub struct LiteralExpr {
    pub value: Literal,
    pub ty: OnceCell<Type>,
    pub span: Span,
}

/// Group Expression
/// Represents a parenthesized expression in the AST.
#[derive(Debug, Clone)]
pub struct GroupExpr {
    pub inner: Box<Expr>,
    pub ty: OnceCell<Type>,
    pub span: Span,
}

/// Binary Expression
/// Represents a binary operation between two expressions in the AST.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub ty: OnceCell<Type>,
    pub span: Span,
}

/// Access Expression
/// Represents a variable read site, optionally indexed (`name[i]`).
///
/// The analyzer fills `variable` with the binding the name resolved to.
#[derive(Debug, Clone)]
pub struct AccessExpr {
    pub name: String,
    pub offset: Option<Box<Expr>>,
    pub variable: OnceCell<Variable>,
    pub ty: OnceCell<Type>,
    pub span: Span,
}

/// Call Expression
/// Represents a function call in the AST. The callee is always a bare
/// name; together with the argument count it identifies the function.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub name: String,
    pub arguments: Vec<Expr>,
    pub function: OnceCell<environment::Function>,
    pub ty: OnceCell<Type>,
    pub span: Span,
}

/// List Literal Expression
/// Represents a `[e1, e2, e3]` initializer. List literals have no
/// intrinsic type: the enclosing declaration propagates its element
/// type into `ty` before the elements are analyzed.
#[derive(Debug, Clone)]
pub struct ListExpr {
    pub elements: Vec<Expr>,
    pub ty: OnceCell<Type>,
    pub span: Span,
}

/// Expression
/// The closed set of expression nodes.
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(LiteralExpr),
    Group(GroupExpr),
    Binary(BinaryExpr),
    Access(AccessExpr),
    Call(CallExpr),
    ListLiteral(ListExpr),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> &Span {
        match self {
            Expr::Literal(literal) => &literal.span,
            Expr::Group(group) => &group.span,
            Expr::Binary(binary) => &binary.span,
            Expr::Access(access) => &access.span,
            Expr::Call(call) => &call.span,
            Expr::ListLiteral(list) => &list.span,
        }
    }

    /// Returns the resolution cell holding the expression's type.
    pub fn ty(&self) -> &OnceCell<Type> {
        match self {
            Expr::Literal(literal) => &literal.ty,
            Expr::Group(group) => &group.ty,
            Expr::Binary(binary) => &binary.ty,
            Expr::Access(access) => &access.ty,
            Expr::Call(call) => &call.ty,
            Expr::ListLiteral(list) => &list.ty,
        }
    }
}
