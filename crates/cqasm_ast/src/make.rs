// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

//! Free-standing functions for creating tree fragments out of smaller pieces.
//!
//! All functions here are intended to be stupid constructors, which just
//! assemble a node from immediate children. They are used by embedders that
//! build trees without a parser, and heavily by tests.

use crate::ast::{
    AnnotationData, Assignment, BinaryOp, Block, ExprKind, Expression, Gate, GateInstruction,
    Identifier, IndexEntry, NonGateInstruction, Program, Statement, TypeDecl, TypeName, UnaryOp,
    Variable, Version,
};

pub fn program(version: &[i64], statements: Vec<Statement>) -> Program {
    Program::new(Version::new(version.to_vec()), statements)
}

/// `version 3.0` program.
pub fn program_v3(statements: Vec<Statement>) -> Program {
    program(&[3, 0], statements)
}

pub fn ident(name: &str) -> Identifier {
    Identifier::new(name)
}

//
// Statements
//

pub fn declare(name: &str, typ: TypeName, size: Option<i64>) -> Statement {
    Statement::Variable(Variable::new(ident(name), TypeDecl::new(typ, size), None))
}

pub fn declare_init(name: &str, typ: TypeName, size: Option<i64>, init: Expression) -> Statement {
    Statement::Variable(Variable::new(
        ident(name),
        TypeDecl::new(typ, size),
        Some(init),
    ))
}

pub fn qubit(name: &str) -> Statement {
    declare(name, TypeName::Qubit, None)
}

pub fn qubits(name: &str, size: i64) -> Statement {
    declare(name, TypeName::Qubit, Some(size))
}

pub fn bit(name: &str) -> Statement {
    declare(name, TypeName::Bit, None)
}

pub fn bits(name: &str, size: i64) -> Statement {
    declare(name, TypeName::Bit, Some(size))
}

pub fn assign(lhs: Expression, rhs: Expression) -> Statement {
    Statement::Assignment(Assignment::new(lhs, rhs))
}

pub fn block(statements: Vec<Statement>) -> Statement {
    Statement::Block(Block::new(statements))
}

/// Named gate without modifiers.
pub fn gate(name: &str) -> Gate {
    Gate::new(ident(name), None, None)
}

pub fn gate_with_param(name: &str, parameter: Expression) -> Gate {
    Gate::new(ident(name), None, Some(parameter))
}

/// Gate modifier `name` wrapping `inner`, e.g. `modified("inv", None, gate("X"))`.
pub fn modified(name: &str, parameter: Option<Expression>, inner: Gate) -> Gate {
    Gate::new(ident(name), Some(inner), parameter)
}

pub fn gate_instruction(gate: Gate, operands: Vec<Expression>) -> Statement {
    Statement::GateInstruction(GateInstruction::new(gate, operands))
}

pub fn non_gate(name: &str, parameter: Option<Expression>, operands: Vec<Expression>) -> Statement {
    Statement::NonGateInstruction(NonGateInstruction::new(ident(name), parameter, operands))
}

pub fn measure(bits: Expression, qubits: Expression) -> Statement {
    non_gate("measure", None, vec![bits, qubits])
}

pub fn annotation(interface: &str, operation: &str, operands: Vec<Expression>) -> AnnotationData {
    AnnotationData::new(ident(interface), ident(operation), operands)
}

//
// Expressions
//

pub fn bool_lit(value: bool) -> Expression {
    ExprKind::BooleanLiteral(value).into()
}

pub fn int(value: i64) -> Expression {
    ExprKind::IntegerLiteral(value).into()
}

pub fn float(value: f64) -> Expression {
    ExprKind::FloatLiteral(value).into()
}

pub fn string(value: &str) -> Expression {
    ExprKind::StringLiteral(value.to_string()).into()
}

pub fn json(value: &str) -> Expression {
    ExprKind::JsonLiteral(value.to_string()).into()
}

pub fn name_ref(name: &str) -> Expression {
    ExprKind::Identifier(name.into()).into()
}

/// `name[i, j, ...]`
pub fn index(name: &str, indices: &[i64]) -> Expression {
    let entries = indices.iter().map(|i| IndexEntry::Item(int(*i))).collect();
    index_entries(name_ref(name), entries)
}

/// `name[first:last]`
pub fn index_range(name: &str, first: i64, last: i64) -> Expression {
    index_entries(name_ref(name), vec![IndexEntry::Range(int(first), int(last))])
}

pub fn index_entries(expr: Expression, entries: Vec<IndexEntry>) -> Expression {
    ExprKind::Index(Box::new(expr), entries).into()
}

pub fn call(name: &str, arguments: Vec<Expression>) -> Expression {
    ExprKind::FunctionCall(ident(name), arguments).into()
}

pub fn unary(op: UnaryOp, expr: Expression) -> Expression {
    ExprKind::Unary(op, Box::new(expr)).into()
}

pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Expression {
    ExprKind::Binary(op, Box::new(lhs), Box::new(rhs)).into()
}

pub fn ternary(cond: Expression, if_true: Expression, if_false: Expression) -> Expression {
    ExprKind::Ternary(Box::new(cond), Box::new(if_true), Box::new(if_false)).into()
}

pub fn init_list(items: Vec<Expression>) -> Expression {
    ExprKind::InitializationList(items).into()
}
