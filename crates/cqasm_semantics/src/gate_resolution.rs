// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Policy applied to gates and instructions around instruction-table lookups:
// the name a (possibly modified) gate resolves under, and the structural
// checks on operands that resolution alone does not catch.
//
// Everything here takes the instruction set explicitly, so the policy can be
// exercised with sets other than the cQASM 3.0 default.

use crate::asg::{Gate, NonGateInstruction};
use crate::instruction_set::{
    InstructionSet, SINGLE_QUBIT_COMPOSITION_PREFIX, TWO_QUBIT_COMPOSITION_PREFIX,
};
use crate::semantic_error::{SemanticError, SemanticResult};
use crate::types::{promote_check, Type};
use crate::values::{promote, size_of, type_of, Value};

/// The innermost named gate of a modifier composition.
/// For a named gate, such as `X` or `Rz`, this is its own name.
pub fn terminal_name(gate: &Gate) -> &str {
    match gate.gate() {
        Some(inner) => terminal_name(inner),
        None => gate.name(),
    }
}

/// Name under which `gate` is looked up in the instruction table.
///
/// A named gate resolves under its own name. A modified gate resolves under
/// `<prefix>_<terminal name>`, where the prefix depends on whether the
/// outermost modifier yields a single-qubit or a two-qubit gate:
/// `inv.X` resolves as `1q_X`, `ctrl.pow(2).X` as `2q_X`.
pub fn resolution_name(gate: &Gate, instruction_set: &InstructionSet) -> String {
    match gate.gate() {
        None => gate.name().to_string(),
        Some(inner) => {
            let prefix = if instruction_set.is_single_qubit_gate_modifier(gate.name()) {
                SINGLE_QUBIT_COMPOSITION_PREFIX
            } else {
                TWO_QUBIT_COMPOSITION_PREFIX
            };
            format!("{prefix}_{}", terminal_name(inner))
        }
    }
}

pub fn is_two_qubit_gate(gate: &Gate, instruction_set: &InstructionSet) -> bool {
    instruction_set.is_two_qubit_gate(&resolution_name(gate, instruction_set))
}

/// Modifiers only apply to single-qubit gates.
/// Run at each composition level, so `inv.ctrl.X` is rejected.
pub fn check_gate(gate: &Gate, instruction_set: &InstructionSet) -> SemanticResult<()> {
    match gate.gate() {
        Some(inner) if is_two_qubit_gate(inner, instruction_set) => Err(SemanticError::structural(
            "trying to apply a gate modifier to a multi-qubit gate",
        )),
        _ => Ok(()),
    }
}

/// Promote the parameter of a named gate or non-gate instruction to the
/// parameter type the instruction set declares for `name`.
pub fn resolve_parameter(
    name: &str,
    parameter: &Value,
    instruction_set: &InstructionSet,
) -> SemanticResult<Value> {
    let failure = || {
        SemanticError::overload_resolution(format!(
            "failed to resolve '{}' with argument pack ({})",
            name,
            type_of(parameter)
        ))
    };
    let param_type = instruction_set.param_type(name).ok_or_else(failure)?;
    if !promote_check(&type_of(parameter), &param_type) {
        return Err(failure());
    }
    promote(parameter, &param_type)
        .map(|value| value.into_owned())
        .ok_or_else(failure)
}

// Number of qubit or bit indices an operand addresses.
fn index_count(operand: &Value) -> usize {
    size_of(operand).max(0) as usize
}

/// All qubit operands of a gate instruction must address the same number
/// of qubits.
pub fn check_uniform_qubit_operands(operands: &[Value]) -> SemanticResult<()> {
    let mut lengths = operands
        .iter()
        .filter(|operand| type_of(operand).is_quantum())
        .map(index_count);
    let Some(first) = lengths.next() else {
        return Ok(());
    };
    match lengths.find(|len| *len != first) {
        Some(other) => Err(SemanticError::structural(format!(
            "qubit operands have different index-list lengths ({first} and {other})"
        ))),
        None => Ok(()),
    }
}

/// Total number of qubit indices must equal total number of bit indices.
pub fn check_qubit_and_bit_indices_have_same_size(operands: &[Value]) -> SemanticResult<()> {
    let mut qubit_indices = 0;
    let mut bit_indices = 0;
    for operand in operands {
        let typ: &Type = match operand {
            Value::VariableRef(r) => r.variable_type(),
            Value::IndexRef(r) => r.variable_type(),
            _ => continue,
        };
        if typ.is_quantum() {
            qubit_indices += index_count(operand);
        } else if typ.is_bit_like() {
            bit_indices += index_count(operand);
        }
    }
    if qubit_indices != bit_indices {
        return Err(SemanticError::structural(
            "qubit and bit indices have different sizes",
        ));
    }
    Ok(())
}

/// Checks specific to a non-gate instruction, after resolution.
pub fn check_non_gate_instruction(
    instruction: &NonGateInstruction,
    instruction_set: &InstructionSet,
) -> SemanticResult<()> {
    if instruction_set.is_measure(instruction.name()) {
        check_qubit_and_bit_indices_have_same_size(instruction.operands())?;
    }
    Ok(())
}
