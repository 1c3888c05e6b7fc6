// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Symbol tables. Each one wraps a table of names and applies one
// registration and resolution policy:
// * `VariableTable`: one value per name, no overloading.
// * `ConstEvalFunctionTable`: functions evaluated during analysis.
// * `CoreFunctionTable`: functions whose calls are kept in the ASG.
// * `InstructionTable`: gate and non-gate instructions.
// * `GateModifierTable`: `inv`, `pow`, `ctrl`, ...
//
// Every table is `Clone`, so a populated global scope can serve as the
// template for many analyses.

use hashbrown::HashMap;
use smol_str::SmolStr;

use crate::function::{ConstEvalFunction, CoreFunction};
use crate::instruction::{GateModifier, Instruction};
use crate::overload::{CaseSensitivity, Overload, OverloadedNameResolver};
use crate::semantic_error::{SemanticError, SemanticErrorKind, SemanticResult};
use crate::types::{display_types, Types};
use crate::values::{types_of, FunctionCall, Value, Values};

#[derive(Clone, Debug, Default)]
pub struct VariableTable {
    case_sensitivity: CaseSensitivity,
    table: HashMap<SmolStr, Value>,
}

impl VariableTable {
    pub fn new(case_sensitivity: CaseSensitivity) -> VariableTable {
        VariableTable {
            case_sensitivity,
            table: HashMap::new(),
        }
    }

    /// Bind `name` to `value`, replacing any earlier binding of `name`.
    pub fn add(&mut self, name: &str, value: Value) {
        self.table.insert(self.case_sensitivity.key(name), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(&self.case_sensitivity.key(name))
    }

    /// A copy of the value bound to `name`.
    pub fn resolve(&self, name: &str) -> SemanticResult<Value> {
        self.table
            .get(&self.case_sensitivity.key(name))
            .cloned()
            .ok_or_else(|| {
                SemanticError::name_resolution(format!("failed to resolve variable '{name}'"))
            })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConstEvalFunctionTable {
    resolver: OverloadedNameResolver<ConstEvalFunction>,
}

impl ConstEvalFunctionTable {
    pub fn new(case_sensitivity: CaseSensitivity) -> ConstEvalFunctionTable {
        ConstEvalFunctionTable {
            resolver: OverloadedNameResolver::new(case_sensitivity),
        }
    }

    pub fn add(&mut self, name: &str, param_types: Types, function: ConstEvalFunction) {
        self.resolver.add_overload(name, function, param_types);
    }

    /// Resolve the overload and call it on the promoted arguments.
    /// Errors raised by the function itself are returned unchanged.
    pub fn resolve(&self, name: &str, args: &[Value]) -> SemanticResult<Value> {
        let (function, promoted) = self.resolver.resolve(name, args)?;
        function.call(&promoted)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolver.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &[Overload<ConstEvalFunction>])> {
        self.resolver.iter()
    }
}

#[derive(Clone, Debug, Default)]
pub struct CoreFunctionTable {
    resolver: OverloadedNameResolver<CoreFunction>,
}

impl CoreFunctionTable {
    pub fn new(case_sensitivity: CaseSensitivity) -> CoreFunctionTable {
        CoreFunctionTable {
            resolver: OverloadedNameResolver::new(case_sensitivity),
        }
    }

    pub fn add(&mut self, function: CoreFunction) {
        let name = function.name().clone();
        let param_types = function.param_types().to_vec();
        self.resolver.add_overload(&name, function, param_types);
    }

    /// A call node over the promoted arguments. Nothing is evaluated.
    pub fn resolve(&self, name: &str, args: &[Value]) -> SemanticResult<Value> {
        let (function, promoted) = self.resolver.resolve(name, args)?;
        Ok(Value::FunctionCall(FunctionCall::new(
            function.clone(),
            promoted,
        )))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolver.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &[Overload<CoreFunction>])> {
        self.resolver.iter()
    }
}

/// Error for an instruction that no visible table could resolve.
/// `known` tells whether some table had the name at all.
pub(crate) fn instruction_error(name: &str, args: &[Value], known: bool) -> SemanticError {
    let kind = if known {
        SemanticErrorKind::OverloadResolutionFailure
    } else {
        SemanticErrorKind::NameResolutionFailure
    };
    SemanticError::new(
        kind,
        format!(
            "failed to resolve instruction '{}' with argument pack ({})",
            name,
            display_types(&types_of(args))
        ),
    )
}

#[derive(Clone, Debug, Default)]
pub struct InstructionTable {
    resolver: OverloadedNameResolver<Instruction>,
}

impl InstructionTable {
    pub fn new(case_sensitivity: CaseSensitivity) -> InstructionTable {
        InstructionTable {
            resolver: OverloadedNameResolver::new(case_sensitivity),
        }
    }

    pub fn add(&mut self, instruction: Instruction) {
        let name = instruction.name().clone();
        let operand_types = instruction.operand_types().to_vec();
        self.resolver.add_overload(&name, instruction, operand_types);
    }

    pub(crate) fn resolve(
        &self,
        name: &str,
        args: &[Value],
    ) -> SemanticResult<(Instruction, Values)> {
        self.resolver
            .resolve(name, args)
            .map(|(instruction, promoted)| (instruction.clone(), promoted))
            .map_err(|err| {
                let known = err.kind() != SemanticErrorKind::NameResolutionFailure;
                instruction_error(name, args, known)
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolver.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &[Overload<Instruction>])> {
        self.resolver.iter()
    }
}

#[derive(Clone, Debug, Default)]
pub struct GateModifierTable {
    resolver: OverloadedNameResolver<GateModifier>,
}

impl GateModifierTable {
    pub fn new(case_sensitivity: CaseSensitivity) -> GateModifierTable {
        GateModifierTable {
            resolver: OverloadedNameResolver::new(case_sensitivity),
        }
    }

    pub fn add(&mut self, modifier: GateModifier) {
        let name = modifier.name().clone();
        let param_types = modifier.param_types();
        self.resolver.add_overload(&name, modifier, param_types);
    }

    /// The modifier descriptor and its promoted arguments.
    pub fn resolve(&self, name: &str, args: &[Value]) -> SemanticResult<(GateModifier, Values)> {
        let (modifier, promoted) = self.resolver.resolve(name, args)?;
        Ok((modifier.clone(), promoted))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolver.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &[Overload<GateModifier>])> {
        self.resolver.iter()
    }
}
