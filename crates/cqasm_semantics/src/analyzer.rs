// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

//! The analyzer: a global scope configured once with variables, functions,
//! instructions and gate modifiers, then used to analyze any number of
//! syntactic programs.

use std::io;
use std::sync::Arc;

use cqasm_ast as synast;

use crate::asg::Program;
use crate::context::Context;
use crate::function::{ConstEvalFunction, CoreFunction};
use crate::functions::{register_default_constants, register_default_functions};
use crate::instruction::{GateModifier, Instruction};
use crate::instruction_set::{default_instruction_set, InstructionSet};
use crate::overload::CaseSensitivity;
use crate::primitives::Version;
use crate::scope::{Scope, ScopeStack};
use crate::semantic_error::{AnalysisFailed, SemanticError, SemanticResult, TypeSpecError};
use crate::syntax_to_semantics::syntax_to_semantic;
use crate::types::{self, Types};
use crate::validate::check_well_formed;
use crate::values::Value;

#[derive(Clone, Debug)]
pub struct AnalyzerOptions {
    /// The only language version accepted by `analyze`.
    pub api_version: Version,
    pub case_sensitivity: CaseSensitivity,
    pub instruction_set: Arc<InstructionSet>,
}

impl Default for AnalyzerOptions {
    fn default() -> AnalyzerOptions {
        AnalyzerOptions {
            api_version: Version::new(vec![3, 0]),
            case_sensitivity: CaseSensitivity::Sensitive,
            instruction_set: default_instruction_set(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Analyzer {
    options: AnalyzerOptions,
    global: Scope,
}

impl Default for Analyzer {
    fn default() -> Analyzer {
        Analyzer::new(AnalyzerOptions::default())
    }
}

impl Analyzer {
    /// An analyzer with an empty global scope.
    /// The instruction set in `options` is made to compare names under the
    /// analyzer's case sensitivity.
    pub fn new(mut options: AnalyzerOptions) -> Analyzer {
        let case_sensitivity = options.case_sensitivity;
        if options.instruction_set.case_sensitivity() != case_sensitivity {
            let set = (*options.instruction_set).clone();
            options.instruction_set = Arc::new(set.with_case_sensitivity(case_sensitivity));
        }
        let global = Scope::new(case_sensitivity);
        Analyzer { options, global }
    }

    /// The cQASM 3.0 analyzer with all default constants, functions,
    /// gate modifiers and instructions registered.
    pub fn with_defaults() -> Analyzer {
        let mut analyzer = Analyzer::default();
        if let Err(err) = analyzer.register_defaults() {
            panic!("built-in cQASM 3.0 tables are malformed: {err}");
        }
        analyzer
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    pub fn api_version(&self) -> &Version {
        &self.options.api_version
    }

    pub fn instruction_set(&self) -> &InstructionSet {
        &self.options.instruction_set
    }

    pub fn global_scope(&self) -> &Scope {
        &self.global
    }

    /// Register the default constants and functions, and every gate modifier
    /// and instruction of the configured instruction set.
    pub fn register_defaults(&mut self) -> Result<(), TypeSpecError> {
        register_default_constants(&mut self.global);
        register_default_functions(&mut self.global)?;
        let instruction_set = Arc::clone(&self.options.instruction_set);
        for modifier in instruction_set.gate_modifiers()? {
            self.register_gate_modifier(modifier);
        }
        for instruction in instruction_set.instructions()? {
            self.register_instruction(instruction);
        }
        log::debug!(
            "registered {} instruction names",
            self.global.instruction_table.iter().count()
        );
        Ok(())
    }

    /// Bind `name` to `value` in the global scope. A later registration
    /// of the same name replaces the earlier one.
    pub fn register_variable(&mut self, name: &str, value: Value) {
        self.global.variable_table.add(name, value);
    }

    pub fn register_consteval_function(
        &mut self,
        name: &str,
        param_types: Types,
        function: ConstEvalFunction,
    ) {
        self.global
            .consteval_function_table
            .add(name, param_types, function);
    }

    /// Like `register_consteval_function` with the parameter types given as
    /// a shorthand specification, e.g. `"ii"`.
    pub fn register_consteval_function_spec(
        &mut self,
        name: &str,
        param_types: &str,
        function: ConstEvalFunction,
    ) -> Result<(), TypeSpecError> {
        let param_types = types::from_spec(param_types)?;
        self.register_consteval_function(name, param_types, function);
        Ok(())
    }

    pub fn register_core_function(&mut self, function: CoreFunction) {
        self.global.core_function_table.add(function);
    }

    pub fn register_core_function_spec(
        &mut self,
        name: &str,
        param_types: &str,
        return_type: char,
    ) -> Result<(), TypeSpecError> {
        let function = CoreFunction::from_spec(name, param_types, return_type)?;
        self.register_core_function(function);
        Ok(())
    }

    pub fn register_instruction(&mut self, instruction: Instruction) {
        self.global.instruction_table.add(instruction);
    }

    /// Register an instruction given its operand shorthand. The kind of the
    /// instruction is looked up in the configured instruction set.
    pub fn register_instruction_spec(
        &mut self,
        name: &str,
        operand_types: Option<&str>,
    ) -> Result<(), TypeSpecError> {
        let kind = self.options.instruction_set.kind_of(name);
        let instruction = Instruction::from_spec(name, operand_types, kind)?;
        self.register_instruction(instruction);
        Ok(())
    }

    pub fn register_gate_modifier(&mut self, modifier: GateModifier) {
        self.global.gate_modifier_table.add(modifier);
    }

    /// Resolve a function call against the global scope, as done for
    /// function calls and operators in analyzed programs.
    pub fn resolve_function(&self, name: &str, args: &[Value]) -> SemanticResult<Value> {
        self.global.resolve_function(name, args)
    }

    /// Analyze `program`. The analyzer itself is not modified, so the same
    /// analyzer may be used for many programs.
    ///
    /// # Panics
    ///
    /// If analysis reports no errors but produces a malformed ASG.
    pub fn analyze(&self, program: &synast::Program) -> AnalysisResult {
        let scopes = ScopeStack::new(self.global.clone(), self.options.case_sensitivity);
        let mut context = Context::new(scopes, Arc::clone(&self.options.instruction_set));
        let root = syntax_to_semantic(program, &self.options.api_version, &mut context);
        let errors = context.semantic_errors.into_vec();
        if errors.is_empty() {
            if let Err(err) = check_well_formed(&root) {
                panic!("analyzer produced a malformed program: {err}");
            }
        }
        log::debug!("analysis finished with {} error(s)", errors.len());
        AnalysisResult {
            root: Some(root),
            errors,
        }
    }
}

/// The outcome of one analysis. `root` is present even when there are
/// errors; it then holds the statements that could be analyzed.
#[derive(Clone, Debug)]
pub struct AnalysisResult {
    pub root: Option<Program>,
    pub errors: Vec<SemanticError>,
}

impl AnalysisResult {
    pub fn any_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|err| err.to_string()).collect()
    }

    /// Return the program if there were no errors. Otherwise write each
    /// error on its own line to `out` and fail.
    pub fn unwrap<W: io::Write>(self, out: &mut W) -> Result<Program, AnalysisFailed> {
        match self.root {
            Some(root) if self.errors.is_empty() => Ok(root),
            _ => {
                for err in &self.errors {
                    // Nothing more can be done if the error stream itself fails.
                    let _ = writeln!(out, "{err}");
                }
                Err(AnalysisFailed)
            }
        }
    }

    /// Print errors with source excerpts to stderr.
    pub fn print_errors(&self, file_name: &str, source: &str) -> io::Result<()> {
        cqasm_source_file::print_compiler_errors(&self.errors, file_name, source)
    }
}

#[test]
fn test_default_tables_are_well_formed() {
    let mut analyzer = Analyzer::default();
    assert!(analyzer.register_defaults().is_ok());
    assert!(analyzer.global_scope().instruction_table.contains("1q_X"));
}
