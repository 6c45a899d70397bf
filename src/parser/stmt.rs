use std::cell::OnceCell;

use crate::{
    ast::{
        ast::{Function, Global, Source},
        statements::{
            AssignmentStmt, Case, DeclarationStmt, ExpressionStmt, IfStmt, ReturnStmt, Stmt,
            SwitchStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    expr::{parse_expr, parse_list_literal},
    lookups::BindingPower,
    parser::Parser,
};

/// Parses a whole file. Globals come first, then functions, then the
/// end of the file. Anything else at the top level is an error.
pub fn parse_source(parser: &mut Parser) -> Result<Source, Error> {
    let mut globals = vec![];
    let mut functions = vec![];

    while parser
        .current_token()
        .is_one_of_many(vec![TokenKind::List, TokenKind::Var, TokenKind::Val])
    {
        globals.push(parse_global(parser)?);
    }

    while parser.current_token_kind() == TokenKind::Fun {
        functions.push(parse_function(parser)?);
    }

    parser.expect(TokenKind::EOF)?;

    Ok(Source { globals, functions })
}

/// Parses a `VAR`, `VAL` or `LIST` declaration. All three require a type
/// annotation. `VAL` additionally requires an initializer and `LIST`
/// requires a list literal one.
fn parse_global(parser: &mut Parser) -> Result<Global, Error> {
    let start_token = parser.advance().clone();

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected a name for the declaration"),
        },
        parser.get_position(),
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::Colon)?;
    let type_name = parser.expect(TokenKind::Identifier)?.value;

    let value = match start_token.kind {
        TokenKind::List => {
            parser.expect(TokenKind::Assignment)?;
            Some(parse_list_literal(parser)?)
        }
        TokenKind::Val => {
            let error = Error::new(ErrorImpl::ExpectedExplicitValue, parser.get_position());
            parser.expect_error(TokenKind::Assignment, Some(error))?;
            Some(parse_expr(parser, BindingPower::Default)?)
        }
        _ => {
            if parser.current_token_kind() == TokenKind::Assignment {
                parser.advance();
                Some(parse_expr(parser, BindingPower::Default)?)
            } else {
                None
            }
        }
    };

    let end = parser.expect(TokenKind::Semicolon)?;

    Ok(Global {
        name,
        type_name,
        mutable: start_token.kind != TokenKind::Val,
        value,
        variable: OnceCell::new(),
        span: Span {
            start: start_token.span.start.clone(),
            end: end.span.end.clone(),
        },
    })
}

fn parse_function(parser: &mut Parser) -> Result<Function, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    let mut parameter_type_names = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let parameter = parser.expect(TokenKind::Identifier)?.value;

        let error = Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("parameters require a type annotation"),
            },
            parser.get_position(),
        );
        parser.expect_error(TokenKind::Colon, Some(error))?;

        let parameter_type = parser.expect(TokenKind::Identifier)?.value;

        parameters.push(parameter);
        parameter_type_names.push(parameter_type);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let return_type_name = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parser.expect(TokenKind::Identifier)?.value)
    } else {
        None
    };

    parser.expect(TokenKind::Do)?;

    let mut statements = vec![];
    while parser.current_token_kind() != TokenKind::End {
        statements.push(parse_stmt(parser)?);
    }

    let end_token = parser.expect(TokenKind::End)?;

    Ok(Function {
        name,
        parameters,
        parameter_type_names,
        return_type_name,
        statements,
        function: OnceCell::new(),
        span: Span {
            start,
            end: end_token.span.end.clone(),
        },
    })
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token_kind = parser.current_token_kind();

    if parser.get_stmt_lookup().contains_key(&token_kind) {
        return parser.get_stmt_lookup().get(&token_kind).unwrap()(parser);
    }

    parse_expression_stmt(parser)
}

/// Parses a bare expression statement, or an assignment if the
/// expression is followed by `=`.
fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expression = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;
        let end = parser.expect(TokenKind::Semicolon)?;

        return Ok(Stmt::Assignment(AssignmentStmt {
            span: Span {
                start: expression.span().start.clone(),
                end: end.span.end.clone(),
            },
            receiver: expression,
            value,
        }));
    }

    let end = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: Span {
            start: expression.span().start.clone(),
            end: end.span.end.clone(),
        },
        expression,
    }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected a name for the declaration"),
        },
        parser.get_position(),
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let type_name = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parser.expect(TokenKind::Identifier)?.value)
    } else {
        None
    };

    let value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();

        if parser.current_token_kind() == TokenKind::OpenBracket {
            Some(parse_list_literal(parser)?)
        } else {
            Some(parse_expr(parser, BindingPower::Default)?)
        }
    } else {
        None
    };

    let end = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Declaration(DeclarationStmt {
        name,
        type_name,
        value,
        variable: OnceCell::new(),
        span: Span {
            start,
            end: end.span.end.clone(),
        },
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = parse_expr(parser, BindingPower::Default)?;
    let end = parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: Span {
            start,
            end: end.span.end.clone(),
        },
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Do)?;

    let mut then_statements = vec![];
    while !parser
        .current_token()
        .is_one_of_many(vec![TokenKind::Else, TokenKind::End])
    {
        then_statements.push(parse_stmt(parser)?);
    }

    let else_statements = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();

        let mut statements = vec![];
        while parser.current_token_kind() != TokenKind::End {
            statements.push(parse_stmt(parser)?);
        }

        statements
    } else {
        vec![]
    };

    let end_token = parser.expect(TokenKind::End)?;

    Ok(Stmt::If(IfStmt {
        condition,
        then_statements,
        else_statements,
        span: Span {
            start,
            end: end_token.span.end.clone(),
        },
    }))
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;

    let mut cases = vec![];
    while parser
        .current_token()
        .is_one_of_many(vec![TokenKind::Case, TokenKind::Default])
    {
        cases.push(parse_case(parser)?);
    }

    let end = parser.expect(TokenKind::End)?;

    Ok(Stmt::Switch(SwitchStmt {
        condition,
        cases,
        span: Span {
            start,
            end: end.span.end.clone(),
        },
    }))
}

/// Parses a `CASE value:` or `DEFAULT` arm. The arm runs until the next
/// arm or the end of the switch.
fn parse_case(parser: &mut Parser) -> Result<Case, Error> {
    let start_token = parser.advance().clone();

    let value = if start_token.kind == TokenKind::Case {
        let value = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Colon)?;
        Some(value)
    } else {
        None
    };

    let mut statements = vec![];
    while !parser.current_token().is_one_of_many(vec![
        TokenKind::Case,
        TokenKind::Default,
        TokenKind::End,
    ]) {
        statements.push(parse_stmt(parser)?);
    }

    Ok(Case {
        value,
        statements,
        span: Span {
            start: start_token.span.start.clone(),
            end: parser.get_position(),
        },
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Do)?;

    let mut statements = vec![];
    while parser.current_token_kind() != TokenKind::End {
        statements.push(parse_stmt(parser)?);
    }

    let end = parser.expect(TokenKind::End)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        statements,
        span: Span {
            start,
            end: end.span.end.clone(),
        },
    }))
}
