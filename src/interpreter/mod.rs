//! Tree-walking evaluation module.
//!
//! This module executes a parsed program directly over the AST. It
//! handles:
//!
//! - Global and local variable state through the scope arena
//! - Function invocation in a child of the defining scope
//! - Short-circuiting logical operators and arithmetic on big integers
//!   and decimals
//! - In-place element writes on shared list values
//!
//! Evaluation is independent of the analyzer: it never reads the types
//! the semantic pass resolved, and it enforces its own runtime checks.

pub mod interpreter;

#[cfg(test)]
mod tests;
