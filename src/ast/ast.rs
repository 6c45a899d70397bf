use std::{cell::OnceCell, fmt::Debug};

use crate::{
    environment::environment::{self, Variable},
    errors::errors::{Error, ErrorImpl},
    Position, Span,
};

use super::{expressions::Expr, statements::Stmt};

/// Source Node
/// The root of the AST: every top-level declaration of a program, in
/// source order.
#[derive(Debug, Clone)]
pub struct Source {
    pub globals: Vec<Global>,
    pub functions: Vec<Function>,
}

/// Global Declaration
/// Represents a top-level VAR, VAL or LIST declaration.
///
/// `mutable` is false only for VAL. For a LIST declaration `type_name`
/// names the ELEMENT type, not the list itself (there is no list type).
#[derive(Debug, Clone)]
pub struct Global {
    pub name: String,
    pub type_name: String,
    pub mutable: bool,
    pub value: Option<Expr>,
    pub variable: OnceCell<Variable>,
    pub span: Span,
}

/// Function Declaration
/// Represents a FUN declaration: name, parameters with their type
/// annotations, an optional return type annotation and the body.
///
/// A missing return type annotation means the function returns Nil.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<String>,
    pub parameter_type_names: Vec<String>,
    pub return_type_name: Option<String>,
    pub statements: Vec<Stmt>,
    pub function: OnceCell<environment::Function>,
    pub span: Span,
}

/// Stores a resolution result on a node's write-once cell.
///
/// Storing the same contents again is a no-op. Storing different contents
/// means two resolutions disagreed about the same node, which is an
/// internal error rather than something the user can fix.
///
/// # Arguments
/// * `cell` - The node's resolution cell.
/// * `value` - The resolved contents to store.
/// * `position` - Where to report a conflicting resolution.
pub fn bind<T: PartialEq + Debug>(
    cell: &OnceCell<T>,
    value: T,
    position: &Position,
) -> Result<(), Error> {
    match cell.get() {
        None => {
            let _ = cell.set(value);
            Ok(())
        }
        Some(existing) if *existing == value => Ok(()),
        Some(existing) => Err(Error::new(
            ErrorImpl::InternalError {
                message: format!(
                    "conflicting resolutions for one node: {:?} then {:?}",
                    existing, value
                ),
            },
            position.clone(),
        )),
    }
}

/// Reads a resolution result off a node's cell.
///
/// An unset cell means a consumer ran before the analyzer filled the
/// node in, which is an internal error rather than a panic.
///
/// # Arguments
/// * `cell` - The node's resolution cell.
/// * `what` - What the cell holds, for the error message.
/// * `position` - Where to report an unset cell.
pub fn resolved<'a, T>(
    cell: &'a OnceCell<T>,
    what: &str,
    position: &Position,
) -> Result<&'a T, Error> {
    match cell.get() {
        Some(value) => Ok(value),
        None => Err(Error::new(
            ErrorImpl::InternalError {
                message: format!("{} was read before analysis resolved it", what),
            },
            position.clone(),
        )),
    }
}
