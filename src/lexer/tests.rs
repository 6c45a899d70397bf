//! Unit tests for the lexer module.
//!
//! This module contains comprehensive tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers and decimals)
//! - Character and string literals with escape sequences
//! - Operators and punctuation
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};

#[test]
fn test_tokenize_keywords() {
    let source = "FUN VAR VAL LIST LET IF ELSE SWITCH CASE DEFAULT WHILE RETURN DO END".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Fun);
    assert_eq!(tokens[1].kind, TokenKind::Var);
    assert_eq!(tokens[2].kind, TokenKind::Val);
    assert_eq!(tokens[3].kind, TokenKind::List);
    assert_eq!(tokens[4].kind, TokenKind::Let);
    assert_eq!(tokens[5].kind, TokenKind::If);
    assert_eq!(tokens[6].kind, TokenKind::Else);
    assert_eq!(tokens[7].kind, TokenKind::Switch);
    assert_eq!(tokens[8].kind, TokenKind::Case);
    assert_eq!(tokens[9].kind, TokenKind::Default);
    assert_eq!(tokens[10].kind, TokenKind::While);
    assert_eq!(tokens[11].kind, TokenKind::Return);
    assert_eq!(tokens[12].kind, TokenKind::Do);
    assert_eq!(tokens[13].kind, TokenKind::End);
    assert_eq!(tokens[14].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_literal_keywords() {
    let source = "NIL TRUE FALSE".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Nil);
    assert_eq!(tokens[1].kind, TokenKind::True);
    assert_eq!(tokens[2].kind, TokenKind::False);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo list2 @native Integer".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "list2");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "@native");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "Integer");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_hyphenated_identifier() {
    // Hyphens are identifier characters, so x-1 is a single name.
    let source = "x-1".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "x-1");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "0 42 -7 3.14 -0.5".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "0");
    assert_eq!(tokens[1].kind, TokenKind::Integer);
    assert_eq!(tokens[1].value, "42");
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[2].value, "-7");
    assert_eq!(tokens[3].kind, TokenKind::Decimal);
    assert_eq!(tokens[3].value, "3.14");
    assert_eq!(tokens[4].kind, TokenKind::Decimal);
    assert_eq!(tokens[4].value, "-0.5");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_leading_zero() {
    let source = "05".to_string();
    let result = tokenize(source, Some("test.fable".to_string()));

    assert!(result.is_err());
}

#[test]
fn test_tokenize_negative_zero() {
    let source = "-0".to_string();
    let result = tokenize(source, Some("test.fable".to_string()));

    assert!(result.is_err());
}

#[test]
fn test_tokenize_characters() {
    let source = "'a' '\\n' '\\''".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Character);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::Character);
    assert_eq!(tokens[1].value, "\n");
    assert_eq!(tokens[2].kind, TokenKind::Character);
    assert_eq!(tokens[2].value, "'");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_empty_character() {
    let source = "''".to_string();
    let result = tokenize(source, Some("test.fable".to_string()));

    assert!(result.is_err());
}

#[test]
fn test_tokenize_strings() {
    let source = "\"Hello, World!\"".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "Hello, World!");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = "\"a\\nb\\tc\\\"d\\\\e\"".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "a\nb\tc\"d\\e");
}

#[test]
fn test_tokenize_invalid_escape() {
    let source = "\"bad\\qescape\"".to_string();
    let result = tokenize(source, Some("test.fable".to_string()));

    assert!(result.is_err());
}

#[test]
fn test_tokenize_unterminated_string() {
    let source = "\"no closing quote".to_string();
    let result = tokenize(source, Some("test.fable".to_string()));

    assert!(result.is_err());
}

#[test]
fn test_tokenize_operators() {
    let source = "== != < <= > >= && || + - * / ^ =".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Equals);
    assert_eq!(tokens[1].kind, TokenKind::NotEquals);
    assert_eq!(tokens[2].kind, TokenKind::Less);
    assert_eq!(tokens[3].kind, TokenKind::LessEquals);
    assert_eq!(tokens[4].kind, TokenKind::Greater);
    assert_eq!(tokens[5].kind, TokenKind::GreaterEquals);
    assert_eq!(tokens[6].kind, TokenKind::And);
    assert_eq!(tokens[7].kind, TokenKind::Or);
    assert_eq!(tokens[8].kind, TokenKind::Plus);
    assert_eq!(tokens[9].kind, TokenKind::Dash);
    assert_eq!(tokens[10].kind, TokenKind::Star);
    assert_eq!(tokens[11].kind, TokenKind::Slash);
    assert_eq!(tokens[12].kind, TokenKind::Caret);
    assert_eq!(tokens[13].kind, TokenKind::Assignment);
    assert_eq!(tokens[14].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) [ ] , : ;".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[3].kind, TokenKind::CloseBracket);
    assert_eq!(tokens[4].kind, TokenKind::Comma);
    assert_eq!(tokens[5].kind, TokenKind::Colon);
    assert_eq!(tokens[6].kind, TokenKind::Semicolon);
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_simple_program() {
    let source = "FUN main(): Integer DO\n    RETURN 0;\nEND".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    // FUN main ( ) : Integer DO RETURN 0 ; END EOF
    assert_eq!(tokens.len(), 12);
    assert_eq!(tokens[0].kind, TokenKind::Fun);
    assert_eq!(tokens[1].value, "main");
    assert_eq!(tokens[8].kind, TokenKind::Integer);
    assert_eq!(tokens[8].value, "0");
    assert_eq!(tokens[10].kind, TokenKind::End);
}

#[test]
fn test_tokenize_unrecognized_token() {
    let source = "LET x = #;".to_string();
    let result = tokenize(source, Some("test.fable".to_string()));

    assert!(result.is_err());
}

#[test]
fn test_tokenize_whitespace_handling() {
    let source = "1   \t\n  2".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].value, "1");
    assert_eq!(tokens[1].value, "2");
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_empty_string() {
    let source = "".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_mixed_expression() {
    let source = "x = 1 + 2 * (3 - y);".to_string();
    let tokens = tokenize(source, Some("test.fable".to_string())).unwrap();

    assert_eq!(tokens.len(), 13);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Assignment);
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[3].kind, TokenKind::Plus);
    assert_eq!(tokens[6].kind, TokenKind::OpenParen);
    assert_eq!(tokens[8].kind, TokenKind::Dash);
    assert_eq!(tokens[9].kind, TokenKind::Identifier);
    assert_eq!(tokens[10].kind, TokenKind::CloseParen);
    assert_eq!(tokens[11].kind, TokenKind::Semicolon);
}
