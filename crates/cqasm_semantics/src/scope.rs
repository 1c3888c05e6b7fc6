// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Defines scopes and the scope stack.
//
// * The stack always holds at least the global scope, at index 0.
// * Variables and instructions are declared in the current (innermost) scope.
//   Functions and gate modifiers are language level and only live in the
//   global scope.
// * Variable and instruction lookups walk from the innermost scope outward
//   and stop at the first scope that resolves the name.

use crate::asg::{Block, Gate, GateInstruction, NonGateInstruction, Statement, VariableId};
use crate::function::{ConstEvalFunction, CoreFunction};
use crate::instruction::{GateModifier, Instruction};
use crate::overload::CaseSensitivity;
use crate::resolver::{
    instruction_error, ConstEvalFunctionTable, CoreFunctionTable, GateModifierTable,
    InstructionTable, VariableTable,
};
use crate::semantic_error::{SemanticError, SemanticErrorKind, SemanticResult};
use crate::types::Types;
use crate::values::{Value, Values};

#[derive(Clone, Debug, Default)]
pub struct Scope {
    pub variable_table: VariableTable,
    pub consteval_function_table: ConstEvalFunctionTable,
    pub core_function_table: CoreFunctionTable,
    pub instruction_table: InstructionTable,
    pub gate_modifier_table: GateModifierTable,
    /// Statements analyzed in this scope, and the variables declared in it.
    pub block: Block,
}

impl Scope {
    /// A scope with empty tables that all use `case_sensitivity`.
    pub fn new(case_sensitivity: CaseSensitivity) -> Scope {
        Scope {
            variable_table: VariableTable::new(case_sensitivity),
            consteval_function_table: ConstEvalFunctionTable::new(case_sensitivity),
            core_function_table: CoreFunctionTable::new(case_sensitivity),
            instruction_table: InstructionTable::new(case_sensitivity),
            gate_modifier_table: GateModifierTable::new(case_sensitivity),
            block: Block::new(),
        }
    }

    /// Resolve a function call against this scope's function tables.
    ///
    /// Functions evaluated during analysis are tried first. If that fails
    /// because an argument is not constant, or because no such function or
    /// overload exists, the call is resolved against the core functions and
    /// kept in the ASG as a call node. Evaluation errors are returned as is,
    /// as are all errors for names that have no core function.
    pub fn resolve_function(&self, name: &str, args: &[Value]) -> SemanticResult<Value> {
        match self.consteval_function_table.resolve(name, args) {
            Ok(value) => Ok(value),
            Err(err)
                if (err.is_resolution_failure()
                    || err.kind() == SemanticErrorKind::ConstantRequired)
                    && (self.core_function_table.contains(name)
                        || !self.consteval_function_table.contains(name)) =>
            {
                log::trace!("'{name}' not evaluated ({}), trying core functions", err.message());
                self.core_function_table.resolve(name, args)
            }
            Err(err) => Err(err),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScopeStack {
    case_sensitivity: CaseSensitivity,
    scopes: Vec<Scope>,
}

impl ScopeStack {
    /// A stack holding only `global`.
    pub fn new(global: Scope, case_sensitivity: CaseSensitivity) -> ScopeStack {
        ScopeStack {
            case_sensitivity,
            scopes: vec![global],
        }
    }

    /// Enter a nested block.
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new(self.case_sensitivity));
        log::debug!("entered scope at depth {}", self.depth());
    }

    /// Leave the innermost block, returning its scope.
    /// Returns `None`, and leaves the stack unchanged, if only the global
    /// scope is left.
    pub fn pop_scope(&mut self) -> Option<Scope> {
        if self.scopes.len() == 1 {
            return None;
        }
        let scope = self.scopes.pop();
        log::debug!("exited scope, depth now {}", self.depth());
        scope
    }

    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity
    }

    /// Number of scopes above the global scope.
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    pub fn current_scope(&self) -> &Scope {
        // The global scope is never popped.
        &self.scopes[self.scopes.len() - 1]
    }

    pub fn current_scope_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    pub fn global_scope(&self) -> &Scope {
        &self.scopes[0]
    }

    pub fn global_scope_mut(&mut self) -> &mut Scope {
        &mut self.scopes[0]
    }

    /// Consume the stack, returning the global scope.
    pub fn into_global_scope(mut self) -> Scope {
        self.scopes.truncate(1);
        self.scopes.swap_remove(0)
    }

    //
    // Variables
    //

    pub fn resolve_variable(&self, name: &str) -> SemanticResult<Value> {
        log::trace!("resolving variable '{name}'");
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.variable_table.resolve(name).ok())
            .ok_or_else(|| {
                SemanticError::name_resolution(format!("failed to resolve variable '{name}'"))
            })
    }

    /// True if `name` is bound in the innermost scope itself.
    pub fn is_declared_in_current_scope(&self, name: &str) -> bool {
        self.current_scope().variable_table.contains(name)
    }

    pub fn register_variable(&mut self, name: &str, value: Value) {
        log::debug!("registering variable '{name}'");
        self.current_scope_mut().variable_table.add(name, value);
    }

    pub fn add_variable_to_current_scope(&mut self, variable: VariableId) {
        self.current_scope_mut().block.add_variable(variable);
    }

    pub fn add_statement_to_current_scope(&mut self, statement: Statement) {
        self.current_scope_mut().block.add_statement(statement);
    }

    //
    // Functions
    //

    /// Functions are only looked up in the global scope.
    pub fn resolve_function(&self, name: &str, args: &[Value]) -> SemanticResult<Value> {
        self.global_scope().resolve_function(name, args)
    }

    pub fn register_consteval_function(
        &mut self,
        name: &str,
        param_types: Types,
        function: ConstEvalFunction,
    ) {
        log::debug!("registering consteval function '{name}'");
        self.global_scope_mut()
            .consteval_function_table
            .add(name, param_types, function);
    }

    pub fn register_core_function(&mut self, function: CoreFunction) {
        log::debug!("registering core function '{function}'");
        self.global_scope_mut().core_function_table.add(function);
    }

    //
    // Instructions
    //

    fn resolve_instruction(
        &self,
        name: &str,
        args: &[Value],
    ) -> SemanticResult<(Instruction, Values)> {
        log::trace!("resolving instruction '{name}'");
        let mut known = false;
        for scope in self.scopes.iter().rev() {
            match scope.instruction_table.resolve(name, args) {
                Ok(resolved) => return Ok(resolved),
                Err(err) => known |= err.kind() != SemanticErrorKind::NameResolutionFailure,
            }
        }
        Err(instruction_error(name, args, known))
    }

    pub fn resolve_gate_instruction(
        &self,
        name: &str,
        gate: Gate,
        args: &[Value],
    ) -> SemanticResult<GateInstruction> {
        let (instruction, operands) = self.resolve_instruction(name, args)?;
        Ok(GateInstruction::new(instruction, gate, operands))
    }

    pub fn resolve_non_gate_instruction(
        &self,
        name: &str,
        args: &[Value],
    ) -> SemanticResult<NonGateInstruction> {
        let (instruction, operands) = self.resolve_instruction(name, args)?;
        Ok(NonGateInstruction::new(instruction, operands))
    }

    pub fn register_instruction(&mut self, instruction: Instruction) {
        log::debug!("registering instruction '{instruction}'");
        self.current_scope_mut().instruction_table.add(instruction);
    }

    //
    // Gate modifiers
    //

    pub fn resolve_gate_modifier(
        &self,
        name: &str,
        args: &[Value],
    ) -> SemanticResult<(GateModifier, Values)> {
        self.global_scope().gate_modifier_table.resolve(name, args)
    }

    pub fn register_gate_modifier(&mut self, modifier: GateModifier) {
        log::debug!("registering gate modifier '{}'", modifier.name());
        self.global_scope_mut().gate_modifier_table.add(modifier);
    }
}
