// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

//! The tree produced by a cQASM parser and consumed by the semantic analyzer
//! in `cqasm_semantics`.
//!
//! The parser itself lives elsewhere. Trees can also be assembled directly
//! with the constructors in [`make`].

pub mod ast;
mod location;
pub mod make;

pub use ast::*;
pub use location::{Index, Range, SourceLocation};
