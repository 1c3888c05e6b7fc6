// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use cqasm_ast::make;
use cqasm_ast::{BinaryOp, ExprKind, IndexEntry, SourceLocation, Statement, TypeName};

#[test]
fn test_program_version() {
    let program = make::program_v3(vec![]);
    assert_eq!(program.version().items(), &[3_i64, 0]);
    assert_eq!(program.version().to_string(), "3.0");
    assert!(program.statements().is_empty());
}

#[test]
fn test_declare_qubit_array() {
    let stmt = make::qubits("q", 5);
    let Statement::Variable(var) = stmt else {
        panic!("expected a variable declaration");
    };
    assert_eq!(var.name().name(), "q");
    assert_eq!(var.typ().name(), TypeName::Qubit);
    assert_eq!(var.typ().size(), Some(5));
    assert!(var.initializer().is_none());
}

#[test]
fn test_modified_gate_nesting() {
    let gate = make::modified("ctrl", None, make::modified("inv", None, make::gate("X")));
    assert_eq!(gate.name().name(), "ctrl");
    let inner = gate.gate().unwrap();
    assert_eq!(inner.name().name(), "inv");
    assert_eq!(inner.gate().unwrap().name().name(), "X");
    assert!(inner.gate().unwrap().gate().is_none());
}

#[test]
fn test_index_range_expression() {
    let expr = make::index_range("q", 1, 3);
    let ExprKind::Index(base, entries) = expr.kind() else {
        panic!("expected an index expression");
    };
    assert_eq!(base.kind(), &ExprKind::Identifier("q".into()));
    assert!(matches!(entries[0], IndexEntry::Range(..)));
}

#[test]
fn test_location_passthrough() {
    let loc = SourceLocation::from_lines(2, 1, 2, 8);
    let expr = make::binary(BinaryOp::Addition, make::int(1), make::int(2)).with_location(loc.clone());
    assert_eq!(expr.location(), Some(&loc));
    assert_eq!(BinaryOp::Addition.symbol(), "+");
}
