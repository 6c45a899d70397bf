//! Unit tests for error handling.
//!
//! This module contains tests for error types, taxonomy mapping and tips.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        Position(10, Rc::new("test.fable".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_error_kind(), "Syntax Error");
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.fable".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMatchError {
            expected: "Integer".to_string(),
            received: "String".to_string(),
        },
        Position(0, Rc::new("test.fable".to_string())),
    );

    assert_eq!(error.get_error_name(), "TypeMatchError");
    assert_eq!(error.get_error_kind(), "Type Error");
}

#[test]
fn test_untyped_declaration_error() {
    let error = Error::new(
        ErrorImpl::UntypedDeclaration {
            variable: "x".to_string(),
        },
        Position(0, Rc::new("test.fable".to_string())),
    );

    assert_eq!(error.get_error_name(), "UntypedDeclaration");
    assert_eq!(error.get_error_kind(), "Type Error");
}

#[test]
fn test_variable_not_declared_error() {
    let error = Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: "foo".to_string(),
        },
        Position(0, Rc::new("test.fable".to_string())),
    );

    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert_eq!(error.get_error_kind(), "Name Error");
}

#[test]
fn test_function_not_declared_error() {
    let error = Error::new(
        ErrorImpl::FunctionNotDeclared {
            function: "main".to_string(),
            arity: 0,
        },
        Position(0, Rc::new("test.fable".to_string())),
    );

    assert_eq!(error.get_error_name(), "FunctionNotDeclared");
    assert_eq!(error.get_error_kind(), "Name Error");
}

#[test]
fn test_immutability_error() {
    let error = Error::new(
        ErrorImpl::AssignmentToImmutable {
            variable: "name".to_string(),
        },
        Position(0, Rc::new("test.fable".to_string())),
    );

    assert_eq!(error.get_error_name(), "AssignmentToImmutable");
    assert_eq!(error.get_error_kind(), "Immutability Error");
}

#[test]
fn test_index_error() {
    let error = Error::new(
        ErrorImpl::IndexOutOfBounds {
            index: "5".to_string(),
        },
        Position(0, Rc::new("test.fable".to_string())),
    );

    assert_eq!(error.get_error_name(), "IndexOutOfBounds");
    assert_eq!(error.get_error_kind(), "Index Error");
}

#[test]
fn test_arithmetic_errors() {
    let error = Error::new(
        ErrorImpl::DivisionByZero,
        Position(0, Rc::new("test.fable".to_string())),
    );
    assert_eq!(error.get_error_kind(), "Arithmetic Error");

    let error = Error::new(
        ErrorImpl::InvalidExponent {
            exponent: "-3".to_string(),
        },
        Position(0, Rc::new("test.fable".to_string())),
    );
    assert_eq!(error.get_error_kind(), "Arithmetic Error");
}

#[test]
fn test_unknown_type_error() {
    let error = Error::new(
        ErrorImpl::UnknownType {
            type_: "Float".to_string(),
        },
        Position(0, Rc::new("test.fable".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnknownType");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::DivisionByZero,
        Position(0, Rc::new("test.fable".to_string())),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "END".to_string(),
        },
        Position(0, Rc::new("test.fable".to_string())),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_duplicate_default_error() {
    let error = Error::new(
        ErrorImpl::DuplicateDefaultCase,
        Position(0, Rc::new("test.fable".to_string())),
    );

    assert_eq!(error.get_error_name(), "DuplicateDefaultCase");
    assert_eq!(error.get_error_kind(), "Type Error");
}

#[test]
fn test_internal_error_kind() {
    let error = Error::new(
        ErrorImpl::InternalError {
            message: "resolved type written twice".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_kind(), "Internal Error");
}
