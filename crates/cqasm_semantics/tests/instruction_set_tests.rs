// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use cqasm_semantics::instruction::InstructionKind;
use cqasm_semantics::instruction_set::{default_instruction_set, InstructionSet};
use cqasm_semantics::overload::CaseSensitivity;
use cqasm_semantics::types::{Assignable, Type};

#[test]
fn test_gate_predicates() {
    let set = default_instruction_set();
    assert!(set.is_single_qubit_named_gate("H"));
    assert!(set.is_two_qubit_named_gate("CNOT"));
    assert!(set.is_single_qubit_gate("1q_H"));
    assert!(set.is_two_qubit_gate("2q_H"));
    assert!(set.is_two_qubit_gate("CZ"));
    assert!(!set.is_gate("measure"));
    assert!(set.is_non_gate("measure"));
    assert!(set.is_measure("measure"));
    assert!(!set.is_measure("reset"));
    assert!(set.is_single_qubit_gate_modifier("pow"));
    assert!(set.is_two_qubit_gate_modifier("ctrl"));
    assert!(!set.is_named_gate("1q_H"));
}

#[test]
fn test_param_types() {
    let set = default_instruction_set();
    assert_eq!(set.param_type("Rx"), Some(Type::Float(Assignable::False)));
    assert_eq!(set.param_type("CRk"), Some(Type::Int(Assignable::False)));
    assert_eq!(set.param_type("wait"), Some(Type::Int(Assignable::False)));
    assert_eq!(set.param_type("pow"), Some(Type::Float(Assignable::False)));
    assert_eq!(set.param_type("X"), None);
    assert_eq!(set.param_type("inv"), None);
}

#[test]
fn test_kind_of() {
    let set = default_instruction_set();
    assert_eq!(set.kind_of("X"), InstructionKind::NamedGate);
    assert_eq!(set.kind_of("reset"), InstructionKind::NonGate);
    assert_eq!(set.kind_of("1q_X"), InstructionKind::SingleQubitComposition);
    assert_eq!(set.kind_of("2q_X"), InstructionKind::TwoQubitComposition);
    assert_eq!(set.kind_of("my_gate"), InstructionKind::Custom);
}

#[test]
fn test_instruction_descriptors() {
    let set = InstructionSet::empty()
        .add_single_qubit_gate("X", None, &["Q", "V"])
        .add_two_qubit_gate("CZ", None, &["QQ"])
        .add_non_gate("reset", None, &[""]);
    let names: Vec<String> = set
        .instructions()
        .unwrap()
        .iter()
        .map(|instruction| instruction.to_string())
        .collect();
    expect_test::expect![[r#"
        [
            "CZ(qubit, qubit)",
            "X(qubit)",
            "X(qubit array)",
            "1q_X(qubit)",
            "1q_X(qubit array)",
            "2q_X(qubit, qubit)",
            "2q_X(qubit array, qubit)",
            "2q_X(qubit, qubit array)",
            "2q_X(qubit array, qubit array)",
            "reset()",
        ]
    "#]]
    .assert_debug_eq(&names);
}

#[test]
fn test_gate_modifier_descriptors() {
    let modifiers = default_instruction_set().gate_modifiers().unwrap();
    let names: Vec<&str> = modifiers.iter().map(|m| m.name().as_str()).collect();
    assert_eq!(names, vec!["inv", "pow", "ctrl"]);
    assert!(modifiers[2].is_two_qubit());
    assert_eq!(modifiers[1].param_types(), vec![Type::Float(Assignable::False)]);
}

#[test]
fn test_case_insensitive_lookups() {
    let set = (*default_instruction_set())
        .clone()
        .with_case_sensitivity(CaseSensitivity::Insensitive);
    assert!(set.is_single_qubit_named_gate("h"));
    assert!(set.is_two_qubit_named_gate("cnot"));
    assert!(set.is_single_qubit_gate("1Q_h"));
    assert!(set.is_two_qubit_gate("2Q_x"));
    assert!(set.is_measure("MEASURE"));
    assert!(set.is_single_qubit_gate_modifier("INV"));
    assert_eq!(set.param_type("rx"), Some(Type::Float(Assignable::False)));
    assert_eq!(set.kind_of("Reset"), InstructionKind::NonGate);

    // Descriptors keep the registered spelling.
    let modifiers = set.gate_modifiers().unwrap();
    assert_eq!(modifiers[0].name(), "inv");
    let instructions = set.instructions().unwrap();
    assert!(instructions.iter().any(|instruction| instruction.name() == "CNOT"));
}

#[test]
fn test_case_sensitive_lookups() {
    let set = default_instruction_set();
    assert_eq!(set.case_sensitivity(), CaseSensitivity::Sensitive);
    assert!(!set.is_named_gate("h"));
    assert!(!set.is_measure("Measure"));
    assert_eq!(set.param_type("rx"), None);
}

#[test]
fn test_measure_is_a_registration_flag() {
    let set = InstructionSet::empty()
        .add_measure("measure_z", None, &["BQ"])
        .add_non_gate("measure", None, &["BQ"]);
    assert!(set.is_measure("measure_z"));
    assert!(!set.is_measure("measure"));
    assert!(set.is_non_gate("measure"));
}
