// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use cqasm_semantics::asg::{Gate, VariableId};
use cqasm_semantics::gate_resolution::{
    check_gate, check_qubit_and_bit_indices_have_same_size, check_uniform_qubit_operands,
    resolution_name, resolve_parameter, terminal_name,
};
use cqasm_semantics::instruction_set::default_instruction_set;
use cqasm_semantics::semantic_error::SemanticErrorKind;
use cqasm_semantics::types::{Assignable, Type};
use cqasm_semantics::values::{IndexRef, Value, VariableRef};

fn named(name: &str) -> Gate {
    Gate::new(name, None, None, vec![], None)
}

fn modify(name: &str, inner: Gate) -> Gate {
    Gate::new(name, Some(inner), None, vec![], None)
}

fn qubit_indices(indices: Vec<i64>) -> Value {
    let typ = Type::QubitArray(5, Assignable::True);
    Value::IndexRef(IndexRef::new(VariableId::new(0), typ, indices).unwrap())
}

fn bit_indices(indices: Vec<i64>) -> Value {
    let typ = Type::BitArray(5, Assignable::True);
    Value::IndexRef(IndexRef::new(VariableId::new(1), typ, indices).unwrap())
}

#[test]
fn test_resolution_names() {
    let set = default_instruction_set();
    assert_eq!(resolution_name(&named("X"), &set), "X");
    assert_eq!(resolution_name(&modify("inv", named("X")), &set), "1q_X");
    let gate = modify("ctrl", modify("pow", named("Rx")));
    assert_eq!(resolution_name(&gate, &set), "2q_Rx");
    assert_eq!(terminal_name(&gate), "Rx");
}

#[test]
fn test_modifier_on_two_qubit_gate() {
    let set = default_instruction_set();
    assert!(check_gate(&modify("inv", named("H")), &set).is_ok());

    let err = check_gate(&modify("inv", named("CNOT")), &set).unwrap_err();
    assert_eq!(err.kind(), SemanticErrorKind::StructuralError);
    assert_eq!(
        err.message(),
        "trying to apply a gate modifier to a multi-qubit gate"
    );

    let gate = modify("inv", modify("ctrl", named("X")));
    assert!(check_gate(&gate, &set).is_err());
}

#[test]
fn test_resolve_parameter() {
    let set = default_instruction_set();
    assert_eq!(
        resolve_parameter("Rx", &Value::ConstInt(1), &set),
        Ok(Value::ConstFloat(1.0))
    );
    let err = resolve_parameter("CRk", &Value::ConstFloat(1.5), &set).unwrap_err();
    assert_eq!(err.kind(), SemanticErrorKind::OverloadResolutionFailure);
    assert_eq!(err.message(), "failed to resolve 'CRk' with argument pack (float)");
    assert!(resolve_parameter("X", &Value::ConstInt(1), &set).is_err());
}

#[test]
fn test_uniform_qubit_operands() {
    let same = [qubit_indices(vec![0, 1]), qubit_indices(vec![2, 3])];
    assert!(check_uniform_qubit_operands(&same).is_ok());

    let different = [qubit_indices(vec![0, 1]), qubit_indices(vec![2, 3, 4])];
    let err = check_uniform_qubit_operands(&different).unwrap_err();
    assert_eq!(
        err.message(),
        "qubit operands have different index-list lengths (2 and 3)"
    );

    // A single qubit counts as one index.
    let scalar = Value::VariableRef(VariableRef::new(
        VariableId::new(2),
        Type::Qubit(Assignable::True),
    ));
    assert!(check_uniform_qubit_operands(&[scalar.clone(), qubit_indices(vec![4])]).is_ok());
    assert!(check_uniform_qubit_operands(&[scalar, qubit_indices(vec![3, 4])]).is_err());
}

#[test]
fn test_measure_index_counts() {
    let ok = [bit_indices(vec![0, 1]), qubit_indices(vec![2, 3])];
    assert!(check_qubit_and_bit_indices_have_same_size(&ok).is_ok());
    let bad = [bit_indices(vec![0]), qubit_indices(vec![2, 3])];
    let err = check_qubit_and_bit_indices_have_same_size(&bad).unwrap_err();
    assert_eq!(err.message(), "qubit and bit indices have different sizes");
}
