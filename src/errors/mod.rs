//! Error types and error handling for the language pipeline.
//!
//! This module defines the error types used across lexing, parsing,
//! analysis, interpretation and generation. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each pipeline stage
//! - The language's error taxonomy (syntax, name, type, immutability,
//!   index, arithmetic)
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
