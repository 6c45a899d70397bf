//! Static analysis module.
//!
//! This module performs the semantic pass over the AST. It resolves a
//! type for every expression and binds declarations onto the nodes
//! while:
//!
//! - Verifying type correctness of expressions and statements
//! - Resolving variable and function references through the scope chain
//! - Checking that a `main/0` returning Integer exists
//! - Managing scopes for function bodies, branches and loops
//!
//! Analysis never evaluates anything; the interpreter and the generator
//! run over the bindings this pass leaves behind.

pub mod analyzer;
