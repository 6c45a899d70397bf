//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Top-level parsing (globals first, then functions)
//! - Statement parsing (declarations, assignments, control flow)
//! - Expression parsing (binary ops, function calls, literals)
//!
//! The parser uses NUD (null denotation) and LED (left denotation)
//! functions for expression parsing with binding power for precedence
//! handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
