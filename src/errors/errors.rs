use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidEscapeCharacter { .. } => "InvalidEscapeCharacter",
            ErrorImpl::InvalidCharacterLiteral { .. } => "InvalidCharacterLiteral",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::ExpectedExplicitValue => "ExpectedExplicitValue",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::MissingMainFunction => "MissingMainFunction",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::UntypedDeclaration { .. } => "UntypedDeclaration",
            ErrorImpl::InvalidExpressionStatement => "InvalidExpressionStatement",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::EmptyThenBlock => "EmptyThenBlock",
            ErrorImpl::DuplicateDefaultCase => "DuplicateDefaultCase",
            ErrorImpl::InvalidGroupExpression => "InvalidGroupExpression",
            ErrorImpl::UnsupportedBinaryOperator { .. } => "UnsupportedBinaryOperator",
            ErrorImpl::AssignmentToImmutable { .. } => "AssignmentToImmutable",
            ErrorImpl::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::InvalidExponent { .. } => "InvalidExponent",
            ErrorImpl::InternalError { .. } => "InternalError",
        }
    }

    /// Maps the variant onto the language's error taxonomy.
    pub fn get_error_kind(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::InvalidEscapeCharacter { .. }
            | ErrorImpl::InvalidCharacterLiteral { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::ExpectedExplicitValue => "Syntax Error",
            ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::FunctionNotDeclared { .. }
            | ErrorImpl::UnknownType { .. }
            | ErrorImpl::MissingMainFunction => "Name Error",
            ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::UntypedDeclaration { .. }
            | ErrorImpl::InvalidExpressionStatement
            | ErrorImpl::InvalidAssignmentTarget
            | ErrorImpl::EmptyThenBlock
            | ErrorImpl::DuplicateDefaultCase
            | ErrorImpl::InvalidGroupExpression
            | ErrorImpl::UnsupportedBinaryOperator { .. } => "Type Error",
            ErrorImpl::AssignmentToImmutable { .. } => "Immutability Error",
            ErrorImpl::IndexOutOfBounds { .. } => "Index Error",
            ErrorImpl::DivisionByZero | ErrorImpl::InvalidExponent { .. } => "Arithmetic Error",
            ErrorImpl::InternalError { .. } => "Internal Error",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::InvalidEscapeCharacter { .. } => ErrorTip::Suggestion(String::from(
                "Valid escapes are \\b \\n \\r \\t \\' \\\" \\\\",
            )),
            ErrorImpl::InvalidCharacterLiteral { .. } => ErrorTip::Suggestion(String::from(
                "Character literals hold exactly one character, like 'a'",
            )),
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "Close the string with `\"` before the end of the line",
            )),
            ErrorImpl::ExpectedExplicitValue => {
                ErrorTip::Suggestion(String::from("VAL declarations require `= value`"))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::FunctionNotDeclared { function, arity } => ErrorTip::Suggestion(format!(
                "No function named `{}` takes {} arguments",
                function, arity
            )),
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::MissingMainFunction => {
                ErrorTip::Suggestion(String::from("Define `FUN main(): Integer DO ... END`"))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::UntypedDeclaration { variable } => ErrorTip::Suggestion(format!(
                "Annotate `{}` with `: Type` or give it a value",
                variable
            )),
            ErrorImpl::InvalidExpressionStatement => ErrorTip::Suggestion(String::from(
                "Only function calls may stand alone as statements",
            )),
            ErrorImpl::InvalidAssignmentTarget => ErrorTip::None,
            ErrorImpl::EmptyThenBlock => ErrorTip::None,
            ErrorImpl::DuplicateDefaultCase => {
                ErrorTip::Suggestion(String::from("A SWITCH may carry at most one DEFAULT case"))
            }
            ErrorImpl::InvalidGroupExpression => ErrorTip::None,
            ErrorImpl::UnsupportedBinaryOperator { .. } => ErrorTip::None,
            ErrorImpl::AssignmentToImmutable { variable } => ErrorTip::Suggestion(format!(
                "Declare `{}` with VAR instead of VAL to allow assignment",
                variable
            )),
            ErrorImpl::IndexOutOfBounds { .. } => ErrorTip::None,
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::InvalidExponent { .. } => ErrorTip::None,
            ErrorImpl::InternalError { .. } => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("invalid escape character: {escape:?}")]
    InvalidEscapeCharacter { escape: String },
    #[error("invalid character literal: {token:?}")]
    InvalidCharacterLiteral { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("expected an explicit value")]
    ExpectedExplicitValue,
    #[error("variable {variable:?} is not defined in this scope")]
    VariableNotDeclared { variable: String },
    #[error("the function {function}/{arity} is not defined in this scope")]
    FunctionNotDeclared { function: String, arity: usize },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("no main/0 function is defined")]
    MissingMainFunction,
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMatchError { expected: String, received: String },
    #[error("the type of {variable:?} cannot be determined from its declaration")]
    UntypedDeclaration { variable: String },
    #[error("expression statements must be function calls")]
    InvalidExpressionStatement,
    #[error("assignment requires a variable access on the left-hand side")]
    InvalidAssignmentTarget,
    #[error("IF requires at least one statement in the then branch")]
    EmptyThenBlock,
    #[error("duplicate DEFAULT case in SWITCH")]
    DuplicateDefaultCase,
    #[error("grouped expressions must contain a binary expression")]
    InvalidGroupExpression,
    #[error("unsupported binary operator: {operator}")]
    UnsupportedBinaryOperator { operator: String },
    #[error("cannot assign to immutable variable {variable:?}")]
    AssignmentToImmutable { variable: String },
    #[error("index out of bounds: {index}")]
    IndexOutOfBounds { index: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("exponent out of range: {exponent}")]
    InvalidExponent { exponent: String },
    #[error("internal error: {message}")]
    InternalError { message: String },
}
