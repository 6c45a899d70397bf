use std::rc::Rc;

use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, Regex) -> Result<(), Error>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

#[derive(Clone)]
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: i32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            patterns: vec![
                RegexPattern { regex: Regex::new("[A-Za-z@][A-Za-z0-9_-]*").unwrap(), handler: symbol_handler },
                RegexPattern { regex: Regex::new("-?[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
                RegexPattern { regex: Regex::new("[ \\x08\\t\\r\\n]+").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("'(\\\\.|[^'\\\\\\n\\r])'").unwrap(), handler: character_handler },
                RegexPattern { regex: Regex::new("\"(\\\\.|[^\"\\\\\\n\\r])*\"").unwrap(), handler: string_handler },
                RegexPattern { regex: Regex::new("'").unwrap(), handler: character_error_handler },
                RegexPattern { regex: Regex::new("\"").unwrap(), handler: string_error_handler },
                RegexPattern { regex: Regex::new("\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
                RegexPattern { regex: Regex::new("\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
                RegexPattern { regex: Regex::new("\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
                RegexPattern { regex: Regex::new("\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
                RegexPattern { regex: Regex::new("==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
                RegexPattern { regex: Regex::new("!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
                RegexPattern { regex: Regex::new("!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
                RegexPattern { regex: Regex::new("=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
                RegexPattern { regex: Regex::new("<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
                RegexPattern { regex: Regex::new("<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
                RegexPattern { regex: Regex::new(">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
                RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
                RegexPattern { regex: Regex::new("\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
                RegexPattern { regex: Regex::new("&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
                RegexPattern { regex: Regex::new(";").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
                RegexPattern { regex: Regex::new(":").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
                RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
                RegexPattern { regex: Regex::new("\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
                RegexPattern { regex: Regex::new("-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
                RegexPattern { regex: Regex::new("/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
                RegexPattern { regex: Regex::new("\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
                RegexPattern { regex: Regex::new("\\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Caret, "^") },
            ],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: i32) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.source.as_bytes()[self.pos as usize] as char
    }

    pub fn remainder(&self) -> Vec<char> {
        (self.source.as_bytes()[(self.pos as usize)..])
            .iter()
            .map(|x| *x as char)
            .collect::<Vec<char>>()
    }

    pub fn at_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }
}

fn unescape(escape: char) -> Option<char> {
    match escape {
        'b' => Some('\u{0008}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}

fn number_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let remaining = &lexer.remainder().iter().collect::<String>();
    let matched = regex.find(remaining).unwrap().as_str().to_string();

    // Multi-digit integer parts may not start with 0, and a bare -0 is
    // not a number (-0.5 is).
    let digits = matched.strip_prefix('-').unwrap_or(&matched);
    let leading_zero = digits.len() > 1 && digits.starts_with('0') && digits.as_bytes()[1] != b'.';
    if leading_zero || matched == "-0" {
        return Err(Error::new(
            ErrorImpl::NumberParseError { token: matched },
            Position(lexer.pos as u32, Rc::clone(&lexer.file)),
        ));
    }

    let kind = if matched.contains('.') {
        TokenKind::Decimal
    } else {
        TokenKind::Integer
    };

    lexer.push(MK_TOKEN!(kind, matched.clone(), Span { start: Position(lexer.pos as u32, Rc::clone(&lexer.file)), end: Position((lexer.pos + matched.len() as i32) as u32, Rc::clone(&lexer.file)) }));
    lexer.advance_n(matched.len() as i32);
    Ok(())
}

fn skip_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let remaining = &lexer.remainder().iter().collect::<String>();
    let matched = regex.find(remaining).unwrap().end();
    lexer.advance_n(matched as i32);
    Ok(())
}

fn character_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let binding = lexer.remainder().iter().collect::<String>();
    let matched = regex.find(&binding).unwrap().as_str().to_string();
    let inner = &matched[1..matched.len() - 1];

    let value = if let Some(escape) = inner.strip_prefix('\\') {
        let escape = escape.chars().next().unwrap();
        match unescape(escape) {
            Some(ch) => ch,
            None => {
                return Err(Error::new(
                    ErrorImpl::InvalidEscapeCharacter {
                        escape: format!("\\{}", escape),
                    },
                    Position(lexer.pos as u32, Rc::clone(&lexer.file)),
                ))
            }
        }
    } else {
        inner.chars().next().unwrap()
    };

    lexer.push(MK_TOKEN!(TokenKind::Character, value.to_string(), Span { start: Position(lexer.pos as u32, Rc::clone(&lexer.file)), end: Position((lexer.pos + matched.len() as i32) as u32, Rc::clone(&lexer.file)) }));
    lexer.advance_n(matched.len() as i32);
    Ok(())
}

fn string_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let binding = lexer.remainder().iter().collect::<String>();
    let matched = regex.find(&binding).unwrap().as_str().to_string();
    let raw = &matched[1..matched.len() - 1];

    let mut value = String::new();
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            // The pattern pairs every backslash with a following character.
            let escape = chars.next().unwrap();
            match unescape(escape) {
                Some(unescaped) => value.push(unescaped),
                None => {
                    return Err(Error::new(
                        ErrorImpl::InvalidEscapeCharacter {
                            escape: format!("\\{}", escape),
                        },
                        Position(lexer.pos as u32, Rc::clone(&lexer.file)),
                    ))
                }
            }
        } else {
            value.push(ch);
        }
    }

    lexer.push(MK_TOKEN!(TokenKind::String, value, Span { start: Position(lexer.pos as u32, Rc::clone(&lexer.file)), end: Position((lexer.pos + matched.len() as i32) as u32, Rc::clone(&lexer.file)) }));
    lexer.advance_n(matched.len() as i32);
    Ok(())
}

fn character_error_handler(lexer: &mut Lexer, _regex: Regex) -> Result<(), Error> {
    Err(Error::new(
        ErrorImpl::InvalidCharacterLiteral {
            token: lexer.at().to_string(),
        },
        Position(lexer.pos as u32, Rc::clone(&lexer.file)),
    ))
}

fn string_error_handler(lexer: &mut Lexer, _regex: Regex) -> Result<(), Error> {
    Err(Error::new(
        ErrorImpl::UnterminatedString,
        Position(lexer.pos as u32, Rc::clone(&lexer.file)),
    ))
}

fn symbol_handler(lexer: &mut Lexer, regex: Regex) -> Result<(), Error> {
    let binding = lexer.remainder().iter().collect::<String>();
    let value = regex.find(&binding).unwrap();

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push(MK_TOKEN!(*kind, String::from(value.as_str()), Span { start: Position(lexer.pos as u32, Rc::clone(&lexer.file)), end: Position((lexer.pos + value.len() as i32) as u32, Rc::clone(&lexer.file)) }));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, String::from(value.as_str()), Span { start: Position(lexer.pos as u32, Rc::clone(&lexer.file)), end: Position((lexer.pos + value.len() as i32) as u32, Rc::clone(&lexer.file)) }));
    }

    lexer.advance_n(value.len() as i32);
    Ok(())
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in lex.clone().patterns.iter() {
            let string = &lex.remainder().iter().collect::<String>();
            let match_here = pattern.regex.find(string);

            if match_here.is_some() && match_here.unwrap().start() == 0 {
                (pattern.handler)(&mut lex, pattern.regex.clone())?;
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken {
                    token: lex.at().to_string(),
                },
                Position(lex.pos as u32, Rc::clone(&lex.file)),
            ));
        }
    }

    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span { start: Position(lex.pos as u32, Rc::clone(&lex.file)), end: Position(lex.pos as u32, Rc::clone(&lex.file)) }));
    Ok(lex.tokens)
}
