// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use cqasm_semantics::semantic_error::{SemanticErrorKind, TypeSpecError};
use cqasm_semantics::types::{
    self, element_type_of, from_spec, from_spec_v1, promote_check, type_check, Assignable, Type,
    UNCONSTRAINED,
};

const T: Assignable = Assignable::True;
const F: Assignable = Assignable::False;

#[test]
fn test_type_check_same_tag() {
    assert!(type_check(&Type::Int(F), &Type::Int(F)));
    assert!(type_check(&Type::Int(F), &Type::Int(T)));
    assert!(!type_check(&Type::Int(F), &Type::Float(F)));
}

#[test]
fn test_type_check_assignable_requires_assignable() {
    assert!(type_check(&Type::Qubit(T), &Type::Qubit(T)));
    assert!(!type_check(&Type::Qubit(T), &Type::Qubit(F)));
}

#[test]
fn test_type_check_array_sizes() {
    let any = Type::QubitArray(UNCONSTRAINED, T);
    assert!(type_check(&any, &Type::QubitArray(5, T)));
    assert!(type_check(&Type::IntArray(3, F), &Type::IntArray(3, F)));
    assert!(!type_check(&Type::IntArray(3, F), &Type::IntArray(4, F)));
}

#[test]
fn test_promote_check_scalar_edges() {
    assert!(promote_check(&Type::Bool(F), &Type::Int(F)));
    assert!(promote_check(&Type::Int(F), &Type::Float(F)));
    assert!(promote_check(&Type::Float(F), &Type::Complex(F)));
    assert!(!promote_check(&Type::Float(F), &Type::Int(F)));
    assert!(!promote_check(&Type::Int(F), &Type::Bool(F)));
}

#[test]
fn test_promote_check_never_to_assignable() {
    assert!(!promote_check(&Type::Int(T), &Type::Float(T)));
    assert!(promote_check(&Type::Float(T), &Type::Float(T)));
}

#[test]
fn test_promote_check_axis() {
    assert!(promote_check(&Type::IntArray(3, F), &Type::Axis(F)));
    assert!(!promote_check(&Type::IntArray(2, F), &Type::Axis(F)));
}

#[test]
fn test_size_of_unconstrained_fails() {
    assert_eq!(types::size_of(&Type::BitArray(4, T)), Ok(4));
    assert!(types::size_of(&Type::BitArray(UNCONSTRAINED, T)).is_err());
}

#[test]
fn test_from_spec() {
    let expected = vec![Type::Qubit(T), Type::QubitArray(UNCONSTRAINED, T), Type::Float(F)];
    assert_eq!(from_spec("QVf"), Ok(expected));
    assert_eq!(from_spec(""), Ok(vec![]));
    assert_eq!(from_spec("Qx"), Err(TypeSpecError::UnknownCode('x')));
}

#[test]
fn test_from_spec_v1_unitary_size() {
    let types = from_spec_v1("QQu").unwrap();
    assert_eq!(types[2], Type::ComplexMatrix(4, 4, F));
    assert_eq!(from_spec_v1("q"), Err(TypeSpecError::LowercaseQubit));
    assert_eq!(from_spec_v1("R"), Ok(vec![Type::Float(T)]));
}

#[test]
fn test_from_spec_v1_unitary_too_large() {
    let spec = format!("{}u", "Q".repeat(64));
    assert_eq!(from_spec_v1(&spec), Err(TypeSpecError::TooManyQubits(64)));
    let spec = format!("{}u", "Q".repeat(32));
    assert_eq!(from_spec_v1(&spec), Err(TypeSpecError::TooManyQubits(32)));
    let spec = format!("{}u", "Q".repeat(31));
    let types = from_spec_v1(&spec).unwrap();
    assert_eq!(types[31], Type::ComplexMatrix(1 << 31, 1 << 31, F));
    // Without a unitary, the qubit count does not matter.
    assert_eq!(from_spec_v1(&"Q".repeat(64)).unwrap().len(), 64);
}

#[test]
fn test_element_type_of() {
    assert_eq!(element_type_of(&Type::BitArray(4, T)), Ok(Type::Bit(T)));
    assert_eq!(element_type_of(&Type::FloatArray(2, F)), Ok(Type::Float(F)));
    let err = element_type_of(&Type::Int(F)).unwrap_err();
    assert_eq!(err.kind(), SemanticErrorKind::TypeError);
    assert_eq!(err.message(), "type (int) is not of array type");
}
