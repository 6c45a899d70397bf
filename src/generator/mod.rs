//! Java source emission module.
//!
//! This module renders an analyzed program as Java source text. It
//! handles:
//!
//! - The `Main` class wrapper with the standard entry point
//! - Globals, functions and statements with four-space indentation
//! - Expression rendering, including the `Math.pow` form for `^`
//! - Re-escaping of character and string literals
//!
//! Emission reads the bindings the analyzer resolved onto the nodes, so
//! it expects an analyzed tree.

pub mod expr;
pub mod generator;
pub mod stmt;

#[cfg(test)]
mod tests;
