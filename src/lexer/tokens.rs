use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("FUN", TokenKind::Fun);
        map.insert("VAR", TokenKind::Var);
        map.insert("VAL", TokenKind::Val);
        map.insert("LIST", TokenKind::List);
        map.insert("LET", TokenKind::Let);
        map.insert("IF", TokenKind::If);
        map.insert("ELSE", TokenKind::Else);
        map.insert("SWITCH", TokenKind::Switch);
        map.insert("CASE", TokenKind::Case);
        map.insert("DEFAULT", TokenKind::Default);
        map.insert("WHILE", TokenKind::While);
        map.insert("RETURN", TokenKind::Return);
        map.insert("DO", TokenKind::Do);
        map.insert("END", TokenKind::End);
        map.insert("NIL", TokenKind::Nil);
        map.insert("TRUE", TokenKind::True);
        map.insert("FALSE", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    Decimal,
    Character,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Semicolon,
    Colon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Caret,

    // Reserved
    Fun,
    Var,
    Val,
    List,
    Let,
    If,
    Else,
    Switch,
    Case,
    Default,
    While,
    Return,
    Do,
    End,
    Nil,
    True,
    False,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, tokens: Vec<TokenKind>) -> bool {
        for token in tokens {
            if token == self.kind {
                return true;
            }
        }

        false
    }

    pub fn debug(&self) {
        if self.is_one_of_many(vec![
            TokenKind::String,
            TokenKind::Character,
            TokenKind::Identifier,
            TokenKind::Integer,
            TokenKind::Decimal,
        ]) {
            println!("{} ({})", self.kind, self.value);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
