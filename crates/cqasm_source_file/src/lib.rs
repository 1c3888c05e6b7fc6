// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

//! Reporting diagnostics against cQASM source text.
//!
//! Errors implementing `ErrorTrait` carry an optional line/column
//! `SourceLocation`. These are converted to character spans and formatted
//! with the external crate `ariadne`.

mod api;
mod source_file;

pub use api::{print_compiler_errors, report_error, write_compiler_errors};
pub use source_file::{location_to_span, ErrorTrait};
