use crate::{
    ast::{
        ast::{self, Global, Source},
        expressions::{BinaryExpr, BinaryOp, Expr, Literal},
        statements::Stmt,
    },
    environment::environment::{
        self, require_assignable, Implementation, ScopeId, Scopes, Type, Value, Variable,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// The semantic pass over the AST.
///
/// Carries the scope arena and the scope the analysis currently sits
/// in. Variables bound here hold Nil values; only their types matter.
pub struct Analyzer {
    pub scopes: Scopes,
    pub scope: ScopeId,
}

/// The analyzer never invokes implementations; registered functions all
/// share this placeholder.
fn placeholder_implementation(_arguments: Vec<Value>) -> Result<Value, Error> {
    Ok(Value::Nil)
}

pub fn analyze(source: &Source) -> (Analyzer, Option<Error>) {
    let mut scopes = Scopes::new();
    let root = scopes.root();
    let mut analyzer = Analyzer { scopes, scope: root };

    // Built in functions
    analyzer.scopes.define_function(
        root,
        environment::Function {
            name: String::from("print"),
            jvm_name: String::from("System.out.println"),
            parameter_types: vec![Type::Any],
            return_type: Type::Nil,
            implementation: Implementation::Native(placeholder_implementation),
        },
    );

    let result = analyze_source(&mut analyzer, source);

    (analyzer, result.err())
}

pub fn analyze_source(analyzer: &mut Analyzer, source: &Source) -> Result<(), Error> {
    for global in &source.globals {
        analyze_global(analyzer, global)?;
    }

    for function in &source.functions {
        analyze_function(analyzer, function)?;
    }

    let main = source
        .functions
        .iter()
        .find(|function| function.name == "main" && function.parameters.is_empty());

    let main = match main {
        Some(main) => main,
        None => return Err(Error::new(ErrorImpl::MissingMainFunction, Position::null())),
    };

    let function = ast::resolved(&main.function, "the main function", &main.span.start)?;
    require_assignable(Type::Integer, function.return_type, &main.span.start)
}

pub fn analyze_global(analyzer: &mut Analyzer, global: &Global) -> Result<(), Error> {
    let ty = Type::from_name(&global.type_name, &global.span.start)?;

    if let Some(value) = &global.value {
        // A LIST initializer checks its elements against the declared
        // element type, so hand it down before visiting.
        if let Expr::ListLiteral(list) = value {
            ast::bind(&list.ty, ty, &global.span.start)?;
        }

        let value_type = analyze_expr(analyzer, value)?;
        require_assignable(ty, value_type, &value.span().start)?;
    }

    let variable = Variable {
        name: global.name.clone(),
        jvm_name: global.name.clone(),
        ty,
        mutable: global.mutable,
        value: Value::Nil,
    };

    analyzer.scopes.define_variable(analyzer.scope, variable.clone());
    ast::bind(&global.variable, variable, &global.span.start)
}

pub fn analyze_function(analyzer: &mut Analyzer, function: &ast::Function) -> Result<(), Error> {
    let mut parameter_types = vec![];
    for type_name in &function.parameter_type_names {
        parameter_types.push(Type::from_name(type_name, &function.span.start)?);
    }

    let return_type = match &function.return_type_name {
        Some(name) => Type::from_name(name, &function.span.start)?,
        None => Type::Nil,
    };

    let definition = environment::Function {
        name: function.name.clone(),
        jvm_name: function.name.clone(),
        parameter_types: parameter_types.clone(),
        return_type,
        implementation: Implementation::Native(placeholder_implementation),
    };

    // Registered before the body is visited so the body can call the
    // function recursively.
    analyzer.scopes.define_function(analyzer.scope, definition.clone());
    ast::bind(&function.function, definition, &function.span.start)?;

    let enclosing = analyzer.scope;
    let scope = analyzer.scopes.enter(enclosing);
    analyzer.scope = scope;

    for (parameter, ty) in function.parameters.iter().zip(parameter_types) {
        analyzer.scopes.define_variable(
            scope,
            Variable {
                name: parameter.clone(),
                jvm_name: parameter.clone(),
                ty,
                mutable: true,
                value: Value::Nil,
            },
        );
    }

    // The synthetic "return" variable carries the return type for
    // RETURN statements to check against.
    analyzer.scopes.define_variable(
        scope,
        Variable {
            name: String::from("return"),
            jvm_name: String::from("return"),
            ty: return_type,
            mutable: false,
            value: Value::Nil,
        },
    );

    let result = analyze_statements(analyzer, &function.statements);

    analyzer.scopes.exit(scope);
    analyzer.scope = enclosing;

    result
}

fn analyze_statements(analyzer: &mut Analyzer, statements: &[Stmt]) -> Result<(), Error> {
    for statement in statements {
        analyze_stmt(analyzer, statement)?;
    }

    Ok(())
}

/// Analyzes one statement inside its own child scope.
fn analyze_scoped_stmt(analyzer: &mut Analyzer, statement: &Stmt) -> Result<(), Error> {
    let enclosing = analyzer.scope;
    let scope = analyzer.scopes.enter(enclosing);
    analyzer.scope = scope;

    let result = analyze_stmt(analyzer, statement);

    analyzer.scopes.exit(scope);
    analyzer.scope = enclosing;

    result
}

/// Analyzes a statement list inside one shared child scope.
fn analyze_scoped_statements(analyzer: &mut Analyzer, statements: &[Stmt]) -> Result<(), Error> {
    let enclosing = analyzer.scope;
    let scope = analyzer.scopes.enter(enclosing);
    analyzer.scope = scope;

    let result = analyze_statements(analyzer, statements);

    analyzer.scopes.exit(scope);
    analyzer.scope = enclosing;

    result
}

pub fn analyze_stmt(analyzer: &mut Analyzer, statement: &Stmt) -> Result<(), Error> {
    match statement {
        Stmt::Expression(stmt) => {
            // Only calls may stand alone; any other expression has no
            // effect.
            if !matches!(stmt.expression, Expr::Call(_)) {
                return Err(Error::new(
                    ErrorImpl::InvalidExpressionStatement,
                    stmt.span.start.clone(),
                ));
            }

            analyze_expr(analyzer, &stmt.expression)?;
            Ok(())
        }
        Stmt::Declaration(stmt) => {
            let annotated = match &stmt.type_name {
                Some(name) => Some(Type::from_name(name, &stmt.span.start)?),
                None => None,
            };

            let value_type = match &stmt.value {
                Some(value) => {
                    if let Expr::ListLiteral(list) = value {
                        // A list literal cannot determine its own
                        // element type; the annotation supplies it.
                        let ty = match annotated {
                            Some(ty) => ty,
                            None => {
                                return Err(Error::new(
                                    ErrorImpl::UntypedDeclaration {
                                        variable: stmt.name.clone(),
                                    },
                                    stmt.span.start.clone(),
                                ))
                            }
                        };
                        ast::bind(&list.ty, ty, &stmt.span.start)?;
                    }

                    Some(analyze_expr(analyzer, value)?)
                }
                None => None,
            };

            let ty = match (annotated, value_type) {
                (Some(annotated), Some(value_type)) => {
                    require_assignable(annotated, value_type, &stmt.span.start)?;
                    annotated
                }
                (Some(annotated), None) => annotated,
                (None, Some(value_type)) => value_type,
                (None, None) => {
                    return Err(Error::new(
                        ErrorImpl::UntypedDeclaration {
                            variable: stmt.name.clone(),
                        },
                        stmt.span.start.clone(),
                    ))
                }
            };

            let variable = Variable {
                name: stmt.name.clone(),
                jvm_name: stmt.name.clone(),
                ty,
                mutable: true,
                value: Value::Nil,
            };

            analyzer.scopes.define_variable(analyzer.scope, variable.clone());
            ast::bind(&stmt.variable, variable, &stmt.span.start)
        }
        Stmt::Assignment(stmt) => {
            if !matches!(stmt.receiver, Expr::Access(_)) {
                return Err(Error::new(
                    ErrorImpl::InvalidAssignmentTarget,
                    stmt.span.start.clone(),
                ));
            }

            let receiver_type = analyze_expr(analyzer, &stmt.receiver)?;
            let value_type = analyze_expr(analyzer, &stmt.value)?;
            require_assignable(receiver_type, value_type, &stmt.value.span().start)
        }
        Stmt::If(stmt) => {
            let condition = analyze_expr(analyzer, &stmt.condition)?;
            require_assignable(Type::Boolean, condition, &stmt.condition.span().start)?;

            if stmt.then_statements.is_empty() {
                return Err(Error::new(
                    ErrorImpl::EmptyThenBlock,
                    stmt.span.start.clone(),
                ));
            }

            for statement in &stmt.then_statements {
                analyze_scoped_stmt(analyzer, statement)?;
            }

            for statement in &stmt.else_statements {
                analyze_scoped_stmt(analyzer, statement)?;
            }

            Ok(())
        }
        Stmt::Switch(stmt) => {
            let condition = analyze_expr(analyzer, &stmt.condition)?;

            let mut saw_default = false;
            for case in &stmt.cases {
                match &case.value {
                    Some(value) => {
                        // Case labels demand the exact condition type,
                        // not mere assignability.
                        let label = analyze_expr(analyzer, value)?;
                        if label != condition {
                            return Err(Error::new(
                                ErrorImpl::TypeMatchError {
                                    expected: String::from(condition.name()),
                                    received: String::from(label.name()),
                                },
                                value.span().start.clone(),
                            ));
                        }
                    }
                    None => {
                        if saw_default {
                            return Err(Error::new(
                                ErrorImpl::DuplicateDefaultCase,
                                case.span.start.clone(),
                            ));
                        }
                        saw_default = true;
                    }
                }

                analyze_scoped_statements(analyzer, &case.statements)?;
            }

            Ok(())
        }
        Stmt::While(stmt) => {
            let condition = analyze_expr(analyzer, &stmt.condition)?;
            require_assignable(Type::Boolean, condition, &stmt.condition.span().start)?;

            analyze_scoped_statements(analyzer, &stmt.statements)
        }
        Stmt::Return(stmt) => {
            let value = analyze_expr(analyzer, &stmt.value)?;

            // A RETURN outside a function finds no "return" variable
            // and fails the lookup.
            let target = analyzer
                .scopes
                .lookup_variable(analyzer.scope, "return", &stmt.span.start)?;

            require_assignable(target.ty, value, &stmt.value.span().start)
        }
    }
}

pub fn analyze_expr(analyzer: &mut Analyzer, expression: &Expr) -> Result<Type, Error> {
    match expression {
        Expr::Literal(literal) => {
            let ty = match literal.value {
                Literal::Nil => Type::Nil,
                Literal::Boolean(_) => Type::Boolean,
                Literal::Integer(_) => Type::Integer,
                Literal::Decimal(_) => Type::Decimal,
                Literal::Character(_) => Type::Character,
                Literal::String(_) => Type::String,
            };

            ast::bind(&literal.ty, ty, &literal.span.start)?;
            Ok(ty)
        }
        Expr::Group(group) => {
            if !matches!(group.inner.as_ref(), Expr::Binary(_)) {
                return Err(Error::new(
                    ErrorImpl::InvalidGroupExpression,
                    group.span.start.clone(),
                ));
            }

            let inner = analyze_expr(analyzer, &group.inner)?;
            ast::bind(&group.ty, inner, &group.span.start)?;
            Ok(inner)
        }
        Expr::Binary(binary) => {
            let left = analyze_expr(analyzer, &binary.left)?;
            let right = analyze_expr(analyzer, &binary.right)?;

            let ty = binary_expr_type(binary, left, right)?;
            ast::bind(&binary.ty, ty, &binary.span.start)?;
            Ok(ty)
        }
        Expr::Access(access) => {
            let variable = analyzer
                .scopes
                .lookup_variable(analyzer.scope, &access.name, &access.span.start)?;

            if let Some(offset) = &access.offset {
                let offset_type = analyze_expr(analyzer, offset)?;
                require_assignable(Type::Integer, offset_type, &offset.span().start)?;
            }

            let ty = variable.ty;
            ast::bind(&access.variable, variable, &access.span.start)?;
            ast::bind(&access.ty, ty, &access.span.start)?;
            Ok(ty)
        }
        Expr::Call(call) => {
            // Arity takes part in the lookup key, so a wrong argument
            // count surfaces as an undeclared function. Argument types
            // are never compared to parameter types.
            let function = analyzer.scopes.lookup_function(
                analyzer.scope,
                &call.name,
                call.arguments.len(),
                &call.span.start,
            )?;

            let ty = function.return_type;
            ast::bind(&call.function, function, &call.span.start)?;
            ast::bind(&call.ty, ty, &call.span.start)?;

            for argument in &call.arguments {
                analyze_expr(analyzer, argument)?;
            }

            Ok(ty)
        }
        Expr::ListLiteral(list) => {
            let ty = *ast::resolved(&list.ty, "the list literal's element type", &list.span.start)?;

            for element in &list.elements {
                let element_type = analyze_expr(analyzer, element)?;
                require_assignable(ty, element_type, &element.span().start)?;
            }

            Ok(ty)
        }
    }
}

/// Resolves the result type of a binary expression from its operand
/// types, or rejects the combination.
fn binary_expr_type(binary: &BinaryExpr, left: Type, right: Type) -> Result<Type, Error> {
    let position = &binary.span.start;

    match binary.op {
        BinaryOp::And | BinaryOp::Or => {
            require_assignable(Type::Boolean, left, position)?;
            require_assignable(Type::Boolean, right, position)?;
            Ok(Type::Boolean)
        }
        BinaryOp::Lt
        | BinaryOp::Le
        | BinaryOp::Gt
        | BinaryOp::Ge
        | BinaryOp::Eq
        | BinaryOp::Ne => {
            if left != right {
                return Err(Error::new(
                    ErrorImpl::TypeMatchError {
                        expected: String::from(left.name()),
                        received: String::from(right.name()),
                    },
                    position.clone(),
                ));
            }

            let comparable = matches!(
                left,
                Type::Integer | Type::Decimal | Type::Character | Type::String
            );
            if !comparable {
                return Err(Error::new(
                    ErrorImpl::TypeMatchError {
                        expected: String::from(Type::Comparable.name()),
                        received: String::from(left.name()),
                    },
                    position.clone(),
                ));
            }

            Ok(Type::Boolean)
        }
        BinaryOp::Add => {
            // `+` on a String concatenates whatever stands on the other
            // side.
            if left == Type::String || right == Type::String {
                return Ok(Type::String);
            }

            arithmetic_type(left, right, position)
        }
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => arithmetic_type(left, right, position),
        BinaryOp::Pow => Err(Error::new(
            ErrorImpl::UnsupportedBinaryOperator {
                operator: binary.op.to_string(),
            },
            position.clone(),
        )),
    }
}

fn arithmetic_type(left: Type, right: Type, position: &Position) -> Result<Type, Error> {
    match (left, right) {
        (Type::Integer, Type::Integer) => Ok(Type::Integer),
        (Type::Decimal, Type::Decimal) => Ok(Type::Decimal),
        _ => Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: String::from(left.name()),
                received: String::from(right.name()),
            },
            position.clone(),
        )),
    }
}
