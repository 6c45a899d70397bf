//! Lexical analysis module for the language.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of the uppercase keywords, identifiers, literals and
//!   operators
//! - Escape processing in character and string literals
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
