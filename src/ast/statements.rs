use std::cell::OnceCell;

use crate::{environment::environment::Variable, Span};

use super::expressions::Expr;

/// Expression Statement
/// Represents an expression in statement position. Analysis restricts
/// these to calls.
#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// Declaration Statement
/// Represents a LET declaration inside a function body. Both the type
/// annotation and the initializer are optional in the grammar, but at
/// least one must be present to determine the variable's type.
#[derive(Debug, Clone)]
pub struct DeclarationStmt {
    pub name: String,
    pub type_name: Option<String>,
    pub value: Option<Expr>,
    pub variable: OnceCell<Variable>,
    pub span: Span,
}

/// Assignment Statement
/// Represents `receiver = value;`. The receiver must be an access,
/// optionally indexed for list element writes.
#[derive(Debug, Clone)]
pub struct AssignmentStmt {
    pub receiver: Expr,
    pub value: Expr,
    pub span: Span,
}

/// If Statement
/// Represents `IF cond DO ... ELSE ... END`. An absent ELSE branch is
/// an empty statement list.
#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_statements: Vec<Stmt>,
    pub else_statements: Vec<Stmt>,
    pub span: Span,
}

/// Switch Case
/// Represents one arm of a SWITCH statement. A valueless case is a
/// DEFAULT arm.
#[derive(Debug, Clone)]
pub struct Case {
    pub value: Option<Expr>,
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// Switch Statement
/// Represents `SWITCH expr case* END`.
#[derive(Debug, Clone)]
pub struct SwitchStmt {
    pub condition: Expr,
    pub cases: Vec<Case>,
    pub span: Span,
}

/// While Statement
/// Represents `WHILE cond DO ... END`.
#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// Return Statement
/// Represents `RETURN expr;`.
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: Span,
}

/// Statement
/// The closed set of statement nodes.
#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Declaration(DeclarationStmt),
    Assignment(AssignmentStmt),
    If(IfStmt),
    Switch(SwitchStmt),
    While(WhileStmt),
    Return(ReturnStmt),
}

impl Stmt {
    /// Returns the span of the statement.
    pub fn span(&self) -> &Span {
        match self {
            Stmt::Expression(statement) => &statement.span,
            Stmt::Declaration(statement) => &statement.span,
            Stmt::Assignment(statement) => &statement.span,
            Stmt::If(statement) => &statement.span,
            Stmt::Switch(statement) => &statement.span,
            Stmt::While(statement) => &statement.span,
            Stmt::Return(statement) => &statement.span,
        }
    }
}
