use std::{cell::OnceCell, str::FromStr};

use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::{
    ast::expressions::{
        AccessExpr, BinaryExpr, BinaryOp, CallExpr, Expr, GroupExpr, ListExpr, Literal,
        LiteralExpr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    if !parser.get_nud_lookup().contains_key(&token_kind) {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    }

    let mut left = parser.get_nud_lookup().get(&token_kind).unwrap()(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while *parser
        .get_bp_lookup()
        .get(&parser.current_token_kind())
        .unwrap_or(&BindingPower::Default)
        > bp
    {
        let token_kind = parser.current_token_kind();
        if !parser.get_led_lookup().contains_key(&token_kind) {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ));
        }

        let operator_bp = *parser.get_bp_lookup().get(&token_kind).unwrap();
        left = parser.get_led_lookup().get(&token_kind).unwrap()(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Integer => {
            let token = parser.advance().clone();
            match BigInt::from_str(&token.value) {
                Ok(value) => Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Integer(value),
                    ty: OnceCell::new(),
                    span: token.span.clone(),
                })),
                Err(_) => Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )),
            }
        }
        TokenKind::Decimal => {
            let token = parser.advance().clone();
            match Decimal::from_str(&token.value) {
                Ok(value) => Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Decimal(value),
                    ty: OnceCell::new(),
                    span: token.span.clone(),
                })),
                Err(_) => Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )),
            }
        }
        TokenKind::Character => {
            let token = parser.advance().clone();
            // The lexer stores the unescaped character as the token value.
            match token.value.chars().next() {
                Some(value) => Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Character(value),
                    ty: OnceCell::new(),
                    span: token.span.clone(),
                })),
                None => Err(Error::new(
                    ErrorImpl::InvalidCharacterLiteral {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )),
            }
        }
        TokenKind::String => {
            let token = parser.advance().clone();
            Ok(Expr::Literal(LiteralExpr {
                value: Literal::String(token.value.clone()),
                ty: OnceCell::new(),
                span: token.span.clone(),
            }))
        }
        TokenKind::Nil => Ok(Expr::Literal(LiteralExpr {
            value: Literal::Nil,
            ty: OnceCell::new(),
            span: parser.advance().span.clone(),
        })),
        TokenKind::True => Ok(Expr::Literal(LiteralExpr {
            value: Literal::Boolean(true),
            ty: OnceCell::new(),
            span: parser.advance().span.clone(),
        })),
        TokenKind::False => Ok(Expr::Literal(LiteralExpr {
            value: Literal::Boolean(false),
            ty: OnceCell::new(),
            span: parser.advance().span.clone(),
        })),
        TokenKind::Identifier => {
            let token = parser.advance().clone();
            Ok(Expr::Access(AccessExpr {
                name: token.value.clone(),
                offset: None,
                variable: OnceCell::new(),
                ty: OnceCell::new(),
                span: token.span.clone(),
            }))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

fn binary_op_for(token: &Token) -> Result<BinaryOp, Error> {
    let op = match token.kind {
        TokenKind::And => BinaryOp::And,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::Less => BinaryOp::Lt,
        TokenKind::LessEquals => BinaryOp::Le,
        TokenKind::Greater => BinaryOp::Gt,
        TokenKind::GreaterEquals => BinaryOp::Ge,
        TokenKind::Equals => BinaryOp::Eq,
        TokenKind::NotEquals => BinaryOp::Ne,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Dash => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Caret => BinaryOp::Pow,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            ))
        }
    };

    Ok(op)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let op = binary_op_for(&operator_token)?;

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.span().start.clone(),
            end: right.span().end.clone(),
        },
        op,
        left: Box::new(left),
        right: Box::new(right),
        ty: OnceCell::new(),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let inner = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Group(GroupExpr {
        inner: Box::new(inner),
        ty: OnceCell::new(),
        span: Span {
            start,
            end: close.span.end.clone(),
        },
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let open = parser.advance().clone();
    let start = left.span().start.clone();

    // Only a bare name can be called: the name and the argument count
    // together identify the function.
    let name = match left {
        Expr::Access(access) if access.offset.is_none() => access.name,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: open.value.clone(),
                    message: String::from("only a function name can be called"),
                },
                open.span.start.clone(),
            ))
        }
    };

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        name,
        arguments,
        function: OnceCell::new(),
        ty: OnceCell::new(),
        span: Span {
            start,
            end: close.span.end.clone(),
        },
    }))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let open = parser.advance().clone();

    let (name, start) = match left {
        Expr::Access(access) if access.offset.is_none() => {
            (access.name, access.span.start.clone())
        }
        other => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: open.value.clone(),
                    message: String::from("only a variable name can be indexed"),
                },
                other.span().start.clone(),
            ))
        }
    };

    // An empty offset reads the variable itself.
    let offset = if parser.current_token_kind() == TokenKind::CloseBracket {
        None
    } else {
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    };

    let close = parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Access(AccessExpr {
        name,
        offset,
        variable: OnceCell::new(),
        ty: OnceCell::new(),
        span: Span {
            start,
            end: close.span.end.clone(),
        },
    }))
}

/// Parses a `[e1, e2, e3]` list literal. List literals only appear as
/// declaration initializers, so statement parsing calls this directly
/// rather than through the expression lookups.
pub fn parse_list_literal(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.expect(TokenKind::OpenBracket)?;

    let mut elements = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket {
        elements.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    let close = parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::ListLiteral(ListExpr {
        elements,
        ty: OnceCell::new(),
        span: Span {
            start: open.span.start.clone(),
            end: close.span.end.clone(),
        },
    }))
}
