// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use cqasm_semantics::asg::Gate;
use cqasm_semantics::instruction::{Instruction, InstructionKind};
use cqasm_semantics::overload::CaseSensitivity;
use cqasm_semantics::scope::{Scope, ScopeStack};
use cqasm_semantics::semantic_error::SemanticErrorKind;
use cqasm_semantics::values::Value;

fn new_stack() -> ScopeStack {
    ScopeStack::new(
        Scope::new(CaseSensitivity::Sensitive),
        CaseSensitivity::Sensitive,
    )
}

#[test]
fn test_pop_global_scope() {
    let mut stack = new_stack();
    assert_eq!(stack.depth(), 0);
    assert!(stack.pop_scope().is_none());
    stack.push_scope();
    assert_eq!(stack.depth(), 1);
    assert!(stack.pop_scope().is_some());
    assert!(stack.pop_scope().is_none());
}

#[test]
fn test_inner_scope_shadows_outer() {
    let mut stack = new_stack();
    stack.register_variable("x", Value::ConstInt(1));
    stack.push_scope();
    assert_eq!(stack.resolve_variable("x"), Ok(Value::ConstInt(1)));
    stack.register_variable("x", Value::ConstInt(2));
    assert_eq!(stack.resolve_variable("x"), Ok(Value::ConstInt(2)));
    assert!(stack.is_declared_in_current_scope("x"));
    stack.pop_scope();
    assert_eq!(stack.resolve_variable("x"), Ok(Value::ConstInt(1)));
}

#[test]
fn test_variable_gone_after_pop() {
    let mut stack = new_stack();
    stack.push_scope();
    stack.register_variable("y", Value::ConstBool(true));
    stack.pop_scope();
    let err = stack.resolve_variable("y").unwrap_err();
    assert_eq!(err.kind(), SemanticErrorKind::NameResolutionFailure);
    assert_eq!(err.message(), "failed to resolve variable 'y'");
}

#[test]
fn test_case_insensitive_variables() {
    let mut stack = ScopeStack::new(
        Scope::new(CaseSensitivity::Insensitive),
        CaseSensitivity::Insensitive,
    );
    stack.register_variable("Foo", Value::ConstInt(7));
    stack.push_scope();
    assert_eq!(stack.resolve_variable("FOO"), Ok(Value::ConstInt(7)));
}

#[test]
fn test_instruction_error_kinds() {
    let mut stack = new_stack();
    let instruction = Instruction::from_spec("foo", Some("i"), InstructionKind::Custom).unwrap();
    stack.register_instruction(instruction);
    stack.push_scope();

    let resolved = stack
        .resolve_non_gate_instruction("foo", &[Value::ConstBool(true)])
        .unwrap();
    assert_eq!(resolved.operands(), &[Value::ConstInt(1)]);

    let err = stack
        .resolve_non_gate_instruction("foo", &[Value::ConstFloat(1.0)])
        .unwrap_err();
    assert_eq!(err.kind(), SemanticErrorKind::OverloadResolutionFailure);
    assert_eq!(
        err.message(),
        "failed to resolve instruction 'foo' with argument pack (float)"
    );

    let err = stack.resolve_non_gate_instruction("bar", &[]).unwrap_err();
    assert_eq!(err.kind(), SemanticErrorKind::NameResolutionFailure);
}

#[test]
fn test_instruction_in_inner_scope_only() {
    let mut stack = new_stack();
    stack.push_scope();
    let instruction = Instruction::from_spec("local", None, InstructionKind::Custom).unwrap();
    stack.register_instruction(instruction);
    assert!(stack.resolve_non_gate_instruction("local", &[]).is_ok());
    stack.pop_scope();
    assert!(stack.resolve_non_gate_instruction("local", &[]).is_err());
}

#[test]
fn test_gate_instruction_keeps_gate() {
    let mut stack = new_stack();
    let instruction = Instruction::from_spec("X", Some("i"), InstructionKind::NamedGate).unwrap();
    stack.register_instruction(instruction);
    stack.push_scope();
    let gate = Gate::new("X", None, None, vec![], None);
    let resolved = stack
        .resolve_gate_instruction("X", gate, &[Value::ConstBool(true)])
        .unwrap();
    assert_eq!(resolved.instruction_ref().name(), "X");
    assert_eq!(resolved.gate().name(), "X");
    assert_eq!(resolved.operands(), &[Value::ConstInt(1)]);

    let gate = Gate::new("Y", None, None, vec![], None);
    let err = stack.resolve_gate_instruction("Y", gate, &[]).unwrap_err();
    assert_eq!(err.kind(), SemanticErrorKind::NameResolutionFailure);
}
