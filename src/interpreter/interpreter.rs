use std::{cell::RefCell, cmp::Ordering, rc::Rc};

use num_traits::{Pow, ToPrimitive, Zero};
use rust_decimal::MathematicalOps;

use crate::{
    ast::{
        ast::{self, Global, Source},
        expressions::{BinaryExpr, BinaryOp, Expr, Literal},
        statements::Stmt,
    },
    environment::environment::{self, Implementation, ScopeId, Scopes, Type, Value, Variable},
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// The tree-walking evaluator.
///
/// Carries the scope arena and the scope execution currently sits in.
/// Runtime bindings all carry the Any type; values speak for
/// themselves.
pub struct Interpreter {
    pub scopes: Scopes,
    pub scope: ScopeId,
}

/// The outcome of executing one statement.
///
/// A RETURN produces a value that bubbles through the enclosing
/// statement sequences until a call boundary collapses it.
#[derive(Debug)]
pub enum ExecResult {
    Continue,
    Return(Value),
}

fn native_print(arguments: Vec<Value>) -> Result<Value, Error> {
    for argument in arguments {
        println!("{}", argument);
    }

    Ok(Value::Nil)
}

pub fn interpret(source: &Source) -> (Interpreter, Result<Value, Error>) {
    let mut scopes = Scopes::new();
    let root = scopes.root();
    let mut interpreter = Interpreter { scopes, scope: root };

    // Built in functions
    interpreter.scopes.define_function(
        root,
        environment::Function {
            name: String::from("print"),
            jvm_name: String::from("System.out.println"),
            parameter_types: vec![Type::Any],
            return_type: Type::Nil,
            implementation: Implementation::Native(native_print),
        },
    );

    let result = run_source(&mut interpreter, source);

    (interpreter, result)
}

/// Defines the globals and functions, then invokes main/0. The result
/// is main's return value.
fn run_source(interpreter: &mut Interpreter, source: &Source) -> Result<Value, Error> {
    for global in &source.globals {
        execute_global(interpreter, global)?;
    }

    for function in &source.functions {
        define_function(interpreter, function);
    }

    let main = interpreter
        .scopes
        .lookup_function(interpreter.scope, "main", 0, &Position::null())?;

    call_function(interpreter, &main, vec![])
}

pub fn execute_global(interpreter: &mut Interpreter, global: &Global) -> Result<(), Error> {
    let value = match &global.value {
        Some(value) => evaluate_expr(interpreter, value)?,
        None => Value::Nil,
    };

    interpreter.scopes.define_variable(
        interpreter.scope,
        Variable {
            name: global.name.clone(),
            jvm_name: global.name.clone(),
            ty: Type::Any,
            mutable: global.mutable,
            value,
        },
    );

    Ok(())
}

pub fn define_function(interpreter: &mut Interpreter, function: &ast::Function) {
    let implementation = Implementation::Defined {
        parameters: function.parameters.clone(),
        statements: Rc::new(function.statements.clone()),
        scope: interpreter.scope,
    };

    interpreter.scopes.define_function(
        interpreter.scope,
        environment::Function {
            name: function.name.clone(),
            jvm_name: function.name.clone(),
            parameter_types: vec![Type::Any; function.parameters.len()],
            return_type: Type::Any,
            implementation,
        },
    );
}

/// Invokes a function with already-evaluated arguments.
///
/// A defined function runs in a fresh child of its DEFINING scope, not
/// of the caller's. The caller's scope is restored afterwards, on error
/// paths too.
pub fn call_function(
    interpreter: &mut Interpreter,
    function: &environment::Function,
    arguments: Vec<Value>,
) -> Result<Value, Error> {
    match &function.implementation {
        Implementation::Native(native) => native(arguments),
        Implementation::Defined {
            parameters,
            statements,
            scope,
        } => {
            let caller = interpreter.scope;
            let call_scope = interpreter.scopes.enter(*scope);
            interpreter.scope = call_scope;

            for (parameter, argument) in parameters.iter().zip(arguments) {
                interpreter.scopes.define_variable(
                    call_scope,
                    Variable {
                        name: parameter.clone(),
                        jvm_name: parameter.clone(),
                        ty: Type::Any,
                        mutable: true,
                        value: argument,
                    },
                );
            }

            let result = execute_statements(interpreter, statements);

            interpreter.scopes.exit(call_scope);
            interpreter.scope = caller;

            // Falling off the end of a body yields Nil.
            match result? {
                ExecResult::Return(value) => Ok(value),
                ExecResult::Continue => Ok(Value::Nil),
            }
        }
    }
}

fn execute_statements(
    interpreter: &mut Interpreter,
    statements: &[Stmt],
) -> Result<ExecResult, Error> {
    for statement in statements {
        if let ExecResult::Return(value) = execute_stmt(interpreter, statement)? {
            return Ok(ExecResult::Return(value));
        }
    }

    Ok(ExecResult::Continue)
}

pub fn execute_stmt(interpreter: &mut Interpreter, statement: &Stmt) -> Result<ExecResult, Error> {
    match statement {
        Stmt::Expression(stmt) => {
            evaluate_expr(interpreter, &stmt.expression)?;
            Ok(ExecResult::Continue)
        }
        Stmt::Declaration(stmt) => {
            let value = match &stmt.value {
                Some(value) => evaluate_expr(interpreter, value)?,
                None => Value::Nil,
            };

            interpreter.scopes.define_variable(
                interpreter.scope,
                Variable {
                    name: stmt.name.clone(),
                    jvm_name: stmt.name.clone(),
                    ty: Type::Any,
                    mutable: true,
                    value,
                },
            );

            Ok(ExecResult::Continue)
        }
        Stmt::Assignment(stmt) => {
            let value = evaluate_expr(interpreter, &stmt.value)?;

            let access = match &stmt.receiver {
                Expr::Access(access) => access,
                _ => {
                    return Err(Error::new(
                        ErrorImpl::InvalidAssignmentTarget,
                        stmt.span.start.clone(),
                    ))
                }
            };

            let variable = interpreter.scopes.lookup_variable(
                interpreter.scope,
                &access.name,
                &access.span.start,
            )?;

            if !variable.mutable {
                return Err(Error::new(
                    ErrorImpl::AssignmentToImmutable {
                        variable: access.name.clone(),
                    },
                    stmt.span.start.clone(),
                ));
            }

            // An indexed receiver holding a list writes the element in
            // place; every alias of the list observes the write. Any
            // other receiver replaces the whole value.
            if let (Value::List(elements), Some(offset)) = (&variable.value, &access.offset) {
                let length = elements.borrow().len();
                let index = evaluate_index(interpreter, offset, length)?;
                elements.borrow_mut()[index] = value;
            } else {
                interpreter.scopes.set_variable_value(
                    interpreter.scope,
                    &access.name,
                    value,
                    &stmt.span.start,
                )?;
            }

            Ok(ExecResult::Continue)
        }
        Stmt::If(stmt) => {
            let condition = boolean_of(
                evaluate_expr(interpreter, &stmt.condition)?,
                &stmt.condition.span().start,
            )?;

            if condition {
                execute_statements(interpreter, &stmt.then_statements)
            } else {
                execute_statements(interpreter, &stmt.else_statements)
            }
        }
        Stmt::Switch(stmt) => {
            let condition = evaluate_expr(interpreter, &stmt.condition)?;

            // Explicit labels are scanned first; the first DEFAULT only
            // runs when none of them matched.
            for case in &stmt.cases {
                let label = match &case.value {
                    Some(label) => label,
                    None => continue,
                };

                if evaluate_expr(interpreter, label)? == condition {
                    return execute_statements(interpreter, &case.statements);
                }
            }

            for case in &stmt.cases {
                if case.value.is_none() {
                    return execute_statements(interpreter, &case.statements);
                }
            }

            Ok(ExecResult::Continue)
        }
        Stmt::While(stmt) => loop {
            let condition = boolean_of(
                evaluate_expr(interpreter, &stmt.condition)?,
                &stmt.condition.span().start,
            )?;

            if !condition {
                return Ok(ExecResult::Continue);
            }

            // Each iteration runs in its own scope.
            let enclosing = interpreter.scope;
            let scope = interpreter.scopes.enter(enclosing);
            interpreter.scope = scope;

            let result = execute_statements(interpreter, &stmt.statements);

            interpreter.scopes.exit(scope);
            interpreter.scope = enclosing;

            if let ExecResult::Return(value) = result? {
                return Ok(ExecResult::Return(value));
            }
        },
        Stmt::Return(stmt) => {
            let value = evaluate_expr(interpreter, &stmt.value)?;
            Ok(ExecResult::Return(value))
        }
    }
}

pub fn evaluate_expr(interpreter: &mut Interpreter, expression: &Expr) -> Result<Value, Error> {
    match expression {
        Expr::Literal(literal) => Ok(literal_value(&literal.value)),
        Expr::Group(group) => evaluate_expr(interpreter, &group.inner),
        Expr::Binary(binary) => evaluate_binary_expr(interpreter, binary),
        Expr::Access(access) => {
            let variable = interpreter.scopes.lookup_variable(
                interpreter.scope,
                &access.name,
                &access.span.start,
            )?;

            let offset = match &access.offset {
                Some(offset) => offset,
                None => return Ok(variable.value),
            };

            let elements = match &variable.value {
                Value::List(elements) => elements,
                other => {
                    return Err(Error::new(
                        ErrorImpl::TypeMatchError {
                            expected: String::from("List"),
                            received: String::from(other.type_name()),
                        },
                        access.span.start.clone(),
                    ))
                }
            };

            let length = elements.borrow().len();
            let index = evaluate_index(interpreter, offset, length)?;
            let value = elements.borrow()[index].clone();
            Ok(value)
        }
        Expr::Call(call) => {
            // Resolution precedes argument evaluation.
            let function = interpreter.scopes.lookup_function(
                interpreter.scope,
                &call.name,
                call.arguments.len(),
                &call.span.start,
            )?;

            let mut arguments = vec![];
            for argument in &call.arguments {
                arguments.push(evaluate_expr(interpreter, argument)?);
            }

            call_function(interpreter, &function, arguments)
        }
        Expr::ListLiteral(list) => {
            let mut elements = vec![];
            for element in &list.elements {
                elements.push(evaluate_expr(interpreter, element)?);
            }

            Ok(Value::List(Rc::new(RefCell::new(elements))))
        }
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Nil => Value::Nil,
        Literal::Boolean(value) => Value::Boolean(*value),
        Literal::Integer(value) => Value::Integer(value.clone()),
        Literal::Decimal(value) => Value::Decimal(*value),
        Literal::Character(value) => Value::Character(*value),
        Literal::String(value) => Value::String(value.clone()),
    }
}

fn evaluate_binary_expr(
    interpreter: &mut Interpreter,
    binary: &BinaryExpr,
) -> Result<Value, Error> {
    let position = &binary.span.start;

    match binary.op {
        BinaryOp::And | BinaryOp::Or => {
            let left = boolean_of(
                evaluate_expr(interpreter, &binary.left)?,
                &binary.left.span().start,
            )?;

            // `&&` with a false left and `||` with a true left settle
            // without touching the right operand.
            let settled = match binary.op {
                BinaryOp::And => !left,
                _ => left,
            };
            if settled {
                return Ok(Value::Boolean(left));
            }

            let right = boolean_of(
                evaluate_expr(interpreter, &binary.right)?,
                &binary.right.span().start,
            )?;

            Ok(Value::Boolean(right))
        }
        _ => {
            // Apart from the logical operators, the right operand is
            // evaluated first.
            let right = evaluate_expr(interpreter, &binary.right)?;
            let left = evaluate_expr(interpreter, &binary.left)?;

            apply_binary_op(binary.op, left, right, position)
        }
    }
}

fn apply_binary_op(
    op: BinaryOp,
    left: Value,
    right: Value,
    position: &Position,
) -> Result<Value, Error> {
    match op {
        BinaryOp::Lt | BinaryOp::Gt => compare_values(op, left, right, position),
        // `<=` and `>=` pass analysis but have no evaluation rule.
        BinaryOp::Le | BinaryOp::Ge => Err(Error::new(
            ErrorImpl::UnsupportedBinaryOperator {
                operator: op.to_string(),
            },
            position.clone(),
        )),
        BinaryOp::Eq => Ok(Value::Boolean(left == right)),
        BinaryOp::Ne => Ok(Value::Boolean(left != right)),
        BinaryOp::Add => add_values(left, right, position),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            arithmetic_values(op, left, right, position)
        }
        BinaryOp::Pow => power_values(left, right, position),
        BinaryOp::And | BinaryOp::Or => Err(Error::new(
            ErrorImpl::InternalError {
                message: format!("logical operator {} reached value dispatch", op),
            },
            position.clone(),
        )),
    }
}

fn compare_values(
    op: BinaryOp,
    left: Value,
    right: Value,
    position: &Position,
) -> Result<Value, Error> {
    let ordering = match (&left, &right) {
        (Value::Integer(left), Value::Integer(right)) => left.cmp(right),
        (Value::Decimal(left), Value::Decimal(right)) => left.cmp(right),
        (Value::Character(left), Value::Character(right)) => left.cmp(right),
        (Value::String(left), Value::String(right)) => left.cmp(right),
        _ => {
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    expected: String::from(left.type_name()),
                    received: String::from(right.type_name()),
                },
                position.clone(),
            ))
        }
    };

    let result = match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        _ => ordering == Ordering::Greater,
    };

    Ok(Value::Boolean(result))
}

fn add_values(left: Value, right: Value, position: &Position) -> Result<Value, Error> {
    // A string on either side concatenates the display forms.
    if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
        return Ok(Value::String(format!("{}{}", left, right)));
    }

    match (left, right) {
        (Value::Integer(left), Value::Integer(right)) => Ok(Value::Integer(left + right)),
        (Value::Decimal(left), Value::Decimal(right)) => Ok(Value::Decimal(left + right)),
        (left, right) => Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: String::from(left.type_name()),
                received: String::from(right.type_name()),
            },
            position.clone(),
        )),
    }
}

fn arithmetic_values(
    op: BinaryOp,
    left: Value,
    right: Value,
    position: &Position,
) -> Result<Value, Error> {
    match (left, right) {
        (Value::Integer(left), Value::Integer(right)) => match op {
            BinaryOp::Sub => Ok(Value::Integer(left - right)),
            BinaryOp::Mul => Ok(Value::Integer(left * right)),
            _ => {
                if right.is_zero() {
                    return Err(Error::new(ErrorImpl::DivisionByZero, position.clone()));
                }

                // Integer division truncates toward zero.
                Ok(Value::Integer(left / right))
            }
        },
        (Value::Decimal(left), Value::Decimal(right)) => match op {
            BinaryOp::Sub => Ok(Value::Decimal(left - right)),
            BinaryOp::Mul => Ok(Value::Decimal(left * right)),
            _ => {
                if right.is_zero() {
                    return Err(Error::new(ErrorImpl::DivisionByZero, position.clone()));
                }

                Ok(Value::Decimal(left / right))
            }
        },
        (left, right) => Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: String::from(left.type_name()),
                received: String::from(right.type_name()),
            },
            position.clone(),
        )),
    }
}

fn power_values(left: Value, right: Value, position: &Position) -> Result<Value, Error> {
    let exponent = match right {
        Value::Integer(exponent) => exponent,
        other => {
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    expected: String::from(Type::Integer.name()),
                    received: String::from(other.type_name()),
                },
                position.clone(),
            ))
        }
    };

    match left {
        Value::Integer(base) => {
            // A big integer base takes a non-negative machine-sized
            // exponent.
            let exponent = match exponent.to_u32() {
                Some(exponent) => exponent,
                None => {
                    return Err(Error::new(
                        ErrorImpl::InvalidExponent {
                            exponent: exponent.to_string(),
                        },
                        position.clone(),
                    ))
                }
            };

            Ok(Value::Integer(base.pow(exponent)))
        }
        Value::Decimal(base) => {
            // A decimal base accepts negative exponents through the
            // reciprocal; overflow fails the checked power.
            let machine_exponent = match exponent.to_i64() {
                Some(exponent) => exponent,
                None => {
                    return Err(Error::new(
                        ErrorImpl::InvalidExponent {
                            exponent: exponent.to_string(),
                        },
                        position.clone(),
                    ))
                }
            };

            match base.checked_powi(machine_exponent) {
                Some(value) => Ok(Value::Decimal(value)),
                None => Err(Error::new(
                    ErrorImpl::InvalidExponent {
                        exponent: exponent.to_string(),
                    },
                    position.clone(),
                )),
            }
        }
        other => Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: String::from(Type::Integer.name()),
                received: String::from(other.type_name()),
            },
            position.clone(),
        )),
    }
}

fn boolean_of(value: Value, position: &Position) -> Result<bool, Error> {
    match value {
        Value::Boolean(value) => Ok(value),
        other => Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: String::from(Type::Boolean.name()),
                received: String::from(other.type_name()),
            },
            position.clone(),
        )),
    }
}

/// Evaluates an index expression against a list of the given length.
/// Valid indexes are machine-sized integers inside [0, len).
fn evaluate_index(
    interpreter: &mut Interpreter,
    offset: &Expr,
    length: usize,
) -> Result<usize, Error> {
    let value = evaluate_expr(interpreter, offset)?;

    let index = match &value {
        Value::Integer(index) => index.to_usize(),
        other => {
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    expected: String::from(Type::Integer.name()),
                    received: String::from(other.type_name()),
                },
                offset.span().start.clone(),
            ))
        }
    };

    match index {
        Some(index) if index < length => Ok(index),
        _ => Err(Error::new(
            ErrorImpl::IndexOutOfBounds {
                index: value.to_string(),
            },
            offset.span().start.clone(),
        )),
    }
}
