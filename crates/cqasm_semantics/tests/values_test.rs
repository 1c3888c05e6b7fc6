// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use cqasm_semantics::asg::VariableId;
use cqasm_semantics::function::CoreFunction;
use cqasm_semantics::semantic_error::SemanticErrorKind;
use cqasm_semantics::types::{Assignable, Type};
use cqasm_semantics::values::{
    check_const, promote, size_of, type_of, FunctionCall, IndexRef, Value, VariableRef,
};

const T: Assignable = Assignable::True;
const F: Assignable = Assignable::False;

fn qubits(n: i64) -> Type {
    Type::QubitArray(n, T)
}

#[test]
fn test_type_of_constants() {
    assert_eq!(type_of(&Value::ConstInt(1)), Type::Int(F));
    assert_eq!(
        type_of(&Value::ConstFloatArray(vec![1.0, 2.0])),
        Type::FloatArray(2, F)
    );
}

#[test]
fn test_type_of_index_ref() {
    let one = IndexRef::new(VariableId::new(0), qubits(4), vec![2]).unwrap();
    assert_eq!(type_of(&Value::IndexRef(one)), Type::Qubit(T));
    let two = IndexRef::new(VariableId::new(0), qubits(4), vec![0, 3]).unwrap();
    let value = Value::IndexRef(two);
    assert_eq!(type_of(&value), qubits(2));
    assert_eq!(size_of(&value), 2);
}

#[test]
fn test_index_ref_requires_array() {
    let err = IndexRef::new(VariableId::new(0), Type::Qubit(T), vec![0]).unwrap_err();
    assert_eq!(err.kind(), SemanticErrorKind::TypeError);
}

#[test]
fn test_promote_borrows_when_no_promotion_needed() {
    let value = Value::ConstFloat(1.5);
    assert!(matches!(
        promote(&value, &Type::Float(F)),
        Some(Cow::Borrowed(_))
    ));
}

#[test]
fn test_promote_folds_constants() {
    let value = Value::ConstInt(2);
    let promoted = promote(&value, &Type::Float(F)).unwrap();
    assert_eq!(promoted.into_owned(), Value::ConstFloat(2.0));

    let value = Value::ConstBoolArray(vec![true, false]);
    let promoted = promote(&value, &Type::IntArray(2, F)).unwrap();
    assert_eq!(promoted.into_owned(), Value::ConstIntArray(vec![1, 0]));

    let value = Value::ConstIntArray(vec![0, 0, 1]);
    let promoted = promote(&value, &Type::Axis(F)).unwrap();
    assert_eq!(promoted.into_owned(), Value::ConstAxis([0.0, 0.0, 1.0]));
}

#[test]
fn test_promote_rejects() {
    assert!(promote(&Value::ConstFloat(1.0), &Type::Int(F)).is_none());
    assert!(promote(&Value::ConstInt(1), &Type::Int(T)).is_none());
}

#[test]
fn test_promote_reference_is_not_refolded() {
    let value = Value::VariableRef(VariableRef::new(VariableId::new(0), Type::Int(T)));
    let promoted = promote(&value, &Type::Float(F)).unwrap();
    assert_eq!(promoted.into_owned(), value);
}

#[test]
fn test_promote_bool_reference_to_int() {
    let value = Value::VariableRef(VariableRef::new(VariableId::new(3), Type::Bool(T)));
    let promoted = promote(&value, &Type::Int(F)).unwrap();
    assert_eq!(promoted.into_owned(), value);
}

#[test]
fn test_check_const() {
    assert!(check_const(&Value::ConstBool(true)).is_ok());
    let call = FunctionCall::new(
        CoreFunction::new("f", vec![], Type::Int(F)),
        vec![],
    );
    let err = check_const(&Value::FunctionCall(call)).unwrap_err();
    assert_eq!(err.kind(), SemanticErrorKind::ConstantRequired);
}
