// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use cqasm_ast::SourceLocation;
use cqasm_source_file::ErrorTrait;
use std::fmt;
use std::io;
use thiserror::Error;

/// Classes of recoverable analysis errors.
/// A defect in the analyzer itself is never one of these; it panics instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SemanticErrorKind {
    /// No entity of the given name in any visible scope or table.
    NameResolutionFailure,
    /// The name exists but no overload accepts the arguments.
    OverloadResolutionFailure,
    ConstantRequired,
    /// Arity mismatches, out-of-range indices, malformed gate composition,
    /// duplicate declarations.
    StructuralError,
    TypeError,
    /// A compile-time evaluated function failed, e.g. division by zero.
    EvaluationError,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SemanticError {
    kind: SemanticErrorKind,
    message: String,
    location: Option<SourceLocation>,
}

pub type SemanticResult<T> = Result<T, SemanticError>;

impl SemanticError {
    pub fn new<T: ToString>(kind: SemanticErrorKind, message: T) -> SemanticError {
        SemanticError {
            kind,
            message: message.to_string(),
            location: None,
        }
    }

    pub fn name_resolution<T: ToString>(message: T) -> SemanticError {
        SemanticError::new(SemanticErrorKind::NameResolutionFailure, message)
    }

    pub fn overload_resolution<T: ToString>(message: T) -> SemanticError {
        SemanticError::new(SemanticErrorKind::OverloadResolutionFailure, message)
    }

    pub fn constant_required<T: ToString>(message: T) -> SemanticError {
        SemanticError::new(SemanticErrorKind::ConstantRequired, message)
    }

    pub fn structural<T: ToString>(message: T) -> SemanticError {
        SemanticError::new(SemanticErrorKind::StructuralError, message)
    }

    pub fn type_error<T: ToString>(message: T) -> SemanticError {
        SemanticError::new(SemanticErrorKind::TypeError, message)
    }

    pub fn evaluation<T: ToString>(message: T) -> SemanticError {
        SemanticError::new(SemanticErrorKind::EvaluationError, message)
    }

    pub fn kind(&self) -> SemanticErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Attach source context. The innermost context wins, so an existing
    /// location is never overwritten.
    pub fn with_context(mut self, location: Option<&SourceLocation>) -> SemanticError {
        if self.location.is_none() {
            self.location = location.cloned();
        }
        self
    }

    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self.kind,
            SemanticErrorKind::NameResolutionFailure | SemanticErrorKind::OverloadResolutionFailure
        )
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "Error at {}: {}", location, self.message),
            None => write!(f, "Error: {}", self.message),
        }
    }
}

impl std::error::Error for SemanticError {}

impl ErrorTrait for SemanticError {
    fn message(&self) -> String {
        self.message.clone()
    }

    fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

/// Diagnostics collected during one analysis, in the order found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SemanticErrorList {
    list: Vec<SemanticError>,
}

impl std::ops::Deref for SemanticErrorList {
    type Target = Vec<SemanticError>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl SemanticErrorList {
    pub fn new() -> SemanticErrorList {
        SemanticErrorList { list: Vec::new() }
    }

    pub fn insert(&mut self, error: SemanticError) {
        log::debug!("recorded diagnostic: {error}");
        self.list.push(error);
    }

    pub fn any_semantic_errors(&self) -> bool {
        !self.list.is_empty()
    }

    pub fn into_vec(self) -> Vec<SemanticError> {
        self.list
    }

    /// Print errors with source excerpts. `file_name` is only used as a label.
    pub fn print_errors(&self, file_name: &str, source: &str) -> io::Result<()> {
        cqasm_source_file::print_compiler_errors(&self.list, file_name, source)
    }
}

/// Raised by `AnalysisResult::unwrap` when there were diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cQASM analysis failed")]
pub struct AnalysisFailed;

/// Bad shorthand type specification string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TypeSpecError {
    #[error("unknown type code '{0}' encountered")]
    UnknownCode(char),
    #[error("use uppercase Q for qubits")]
    LowercaseQubit,
    #[error("unitary over {0} qubits is too large")]
    TooManyQubits(usize),
}
