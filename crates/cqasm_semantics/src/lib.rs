// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

//! Abstract Semantic Graph (ASG) and semantic analysis for cQASM.
//!
//! The analyzer takes the syntactic tree defined in `cqasm_ast` and produces
//! an ASG in which
//!   all identifiers are resolved to variables, functions or instructions,
//!   all expressions carry a type, and constant expressions are folded,
//!   all instructions and gate modifiers are resolved against an instruction set.
//!
//! Errors are collected rather than returned at the first failure. A statement
//! that fails to analyze is left out of the ASG and analysis continues.

// Organization of API
// The ASG (asg.rs) and the value and type system (values.rs, types.rs) are
// usable on their own. Building the ASG from a syntactic tree is done by
// `Analyzer` (analyzer.rs), which drives syntax_to_semantics.rs.

pub mod analyzer;
pub mod asg;
pub mod context;
pub mod function;
pub mod functions;
pub mod gate_resolution;
pub mod instruction;
pub mod instruction_set;
pub mod overload;
pub mod primitives;
pub mod resolver;
pub mod scope;
pub mod semantic_error;
pub mod types;
pub mod validate;
pub mod values;

mod syntax_to_semantics;

pub use analyzer::{AnalysisResult, Analyzer, AnalyzerOptions};
pub use primitives::{Complex64, Matrix, Version};
pub use semantic_error::{SemanticError, SemanticErrorKind, SemanticResult};
pub use types::{Assignable, Type};
pub use values::Value;
