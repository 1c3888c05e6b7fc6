// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use cqasm_ast::SourceLocation;
use std::sync::Arc;

use crate::asg::{Variable, VariableId};
use crate::instruction_set::InstructionSet;
use crate::scope::{Scope, ScopeStack};
use crate::semantic_error::{SemanticError, SemanticErrorList};

/// State of one analysis: the scope stack, the variable arena and the
/// diagnostics found so far. Each call to `Analyzer::analyze` builds its own.
#[derive(Clone, Debug)]
pub struct Context {
    pub scopes: ScopeStack,
    pub variables: Vec<Variable>,
    pub semantic_errors: SemanticErrorList,
    pub instruction_set: Arc<InstructionSet>,
}

impl Context {
    pub(crate) fn new(scopes: ScopeStack, instruction_set: Arc<InstructionSet>) -> Context {
        Context {
            scopes,
            variables: Vec::new(),
            semantic_errors: SemanticErrorList::new(),
            instruction_set,
        }
    }

    pub fn errors(&self) -> &SemanticErrorList {
        &self.semantic_errors
    }

    /// Record `error`, attaching `location` unless it already has one.
    pub fn insert_error(&mut self, error: SemanticError, location: Option<&SourceLocation>) {
        self.semantic_errors.insert(error.with_context(location));
    }

    /// Move `variable` into the arena.
    pub fn new_variable(&mut self, variable: Variable) -> VariableId {
        let id = VariableId::new(self.variables.len());
        self.variables.push(variable);
        id
    }

    pub fn variable(&self, id: VariableId) -> Option<&Variable> {
        self.variables.get(usize::from(id))
    }

    pub fn as_tuple(self) -> (Scope, Vec<Variable>, SemanticErrorList) {
        (self.scopes.into_global_scope(), self.variables, self.semantic_errors)
    }
}

/// Run `$code` in a freshly pushed scope and evaluate to the popped scope.
#[macro_export]
macro_rules! with_scope {
    ($ctxt:ident, $code:block) => {{
        $ctxt.scopes.push_scope();
        $code;
        $ctxt.scopes.pop_scope()
    }};
}
