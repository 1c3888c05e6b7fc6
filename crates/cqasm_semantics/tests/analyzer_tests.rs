// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use std::f64::consts::PI;

use cqasm_ast::make::*;
use cqasm_ast::{BinaryOp, Expression, IndexEntry, SourceLocation, Statement, TypeName};
use cqasm_semantics::asg::{self, VariableId};
use cqasm_semantics::semantic_error::{AnalysisFailed, SemanticErrorKind};
use cqasm_semantics::types::{Assignable, Type};
use cqasm_semantics::values::{IndexRef, Value, VariableRef};
use cqasm_semantics::overload::CaseSensitivity;
use cqasm_semantics::{AnalysisResult, Analyzer, AnalyzerOptions, Version};
use expect_test::{expect, Expect};

fn analyze(statements: Vec<Statement>) -> AnalysisResult {
    Analyzer::with_defaults().analyze(&program_v3(statements))
}

fn analyze_ok(statements: Vec<Statement>) -> asg::Program {
    let result = analyze(statements);
    assert!(
        !result.any_errors(),
        "unexpected errors: {:?}",
        result.error_messages()
    );
    result.root.unwrap()
}

fn check_errors(statements: Vec<Statement>, expect: Expect) {
    let result = analyze(statements);
    expect.assert_eq(&result.error_messages().join("\n"));
}

fn as_assignment(statement: &asg::Statement) -> &asg::AssignmentInstruction {
    match statement {
        asg::Statement::AssignmentInstruction(a) => a,
        other => panic!("expected an assignment, got {other:?}"),
    }
}

fn as_gate(statement: &asg::Statement) -> &asg::GateInstruction {
    match statement {
        asg::Statement::GateInstruction(g) => g,
        other => panic!("expected a gate instruction, got {other:?}"),
    }
}

fn qubit_array(id: usize, size: i64) -> Value {
    Value::VariableRef(VariableRef::new(
        VariableId::new(id),
        Type::QubitArray(size, Assignable::True),
    ))
}

#[test]
fn test_bell_state() {
    let program = analyze_ok(vec![
        qubits("q", 2),
        bits("b", 2),
        gate_instruction(gate("H"), vec![index("q", &[0])]),
        gate_instruction(gate("CNOT"), vec![index("q", &[0]), index("q", &[1])]),
        measure(name_ref("b"), name_ref("q")),
    ]);
    assert_eq!(program.version(), &Version::new(vec![3, 0]));
    assert_eq!(program.variables().len(), 2);
    assert_eq!(program.block().variables(), &[VariableId::new(0), VariableId::new(1)]);
    let statements = program.block().statements();
    assert_eq!(statements.len(), 3);

    let h = as_gate(&statements[0]);
    assert_eq!(h.instruction_ref().name(), "H");
    let q0 = IndexRef::new(
        VariableId::new(0),
        Type::QubitArray(2, Assignable::True),
        vec![0],
    )
    .unwrap();
    assert_eq!(h.operands(), &[Value::IndexRef(q0)]);

    match &statements[2] {
        asg::Statement::NonGateInstruction(m) => {
            assert_eq!(m.name(), "measure");
            assert_eq!(m.operands()[1], qubit_array(0, 2));
        }
        other => panic!("expected measure, got {other:?}"),
    }
}

#[test]
fn test_initializer_is_folded() {
    let product = binary(BinaryOp::Product, int(2), int(3));
    let program = analyze_ok(vec![declare_init(
        "x",
        TypeName::Int,
        None,
        binary(BinaryOp::Addition, int(1), product),
    )]);
    let statements = program.block().statements();
    assert_eq!(statements.len(), 1);
    let init = as_assignment(&statements[0]);
    assert_eq!(init.rhs(), &Value::ConstInt(7));
    assert_eq!(
        init.lhs(),
        &Value::VariableRef(VariableRef::new(VariableId::new(0), Type::Int(Assignable::True)))
    );
}

#[test]
fn test_int_initializer_promotes_to_float() {
    let program = analyze_ok(vec![declare_init("x", TypeName::Float, None, int(2))]);
    let init = as_assignment(&program.block().statements()[0]);
    assert_eq!(init.rhs(), &Value::ConstFloat(2.0));
}

#[test]
fn test_gate_parameter_is_folded() {
    let program = analyze_ok(vec![
        qubit("q"),
        gate_instruction(
            gate_with_param("Rx", binary(BinaryOp::Division, name_ref("pi"), int(2))),
            vec![name_ref("q")],
        ),
    ]);
    let rx = as_gate(&program.block().statements()[0]);
    assert_eq!(rx.gate().parameter(), Some(&Value::ConstFloat(PI / 2.0)));
}

#[test]
fn test_runtime_expression_becomes_call() {
    let program = analyze_ok(vec![
        declare("x", TypeName::Int, None),
        declare("y", TypeName::Int, None),
        assign(name_ref("y"), binary(BinaryOp::Addition, name_ref("x"), int(1))),
    ]);
    let rhs = as_assignment(&program.block().statements()[0]).rhs();
    match rhs {
        Value::FunctionCall(call) => {
            assert_eq!(call.function().name(), "operator+");
            assert_eq!(call.arguments()[1], Value::ConstInt(1));
        }
        other => panic!("expected a call, got {other:?}"),
    }
}

#[test]
fn test_gate_modifiers() {
    let program = analyze_ok(vec![
        qubits("q", 2),
        gate_instruction(modified("inv", None, gate("X")), vec![index("q", &[0])]),
        gate_instruction(
            modified("ctrl", None, modified("pow", Some(int(2)), gate("X"))),
            vec![index("q", &[0]), index("q", &[1])],
        ),
    ]);
    let statements = program.block().statements();
    let inv = as_gate(&statements[0]);
    assert_eq!(inv.instruction_ref().name(), "1q_X");
    let ctrl = as_gate(&statements[1]);
    assert_eq!(ctrl.instruction_ref().name(), "2q_X");
    let pow = ctrl.gate().gate().unwrap();
    assert_eq!(pow.name(), "pow");
    assert_eq!(pow.parameter(), Some(&Value::ConstFloat(2.0)));
}

#[test]
fn test_case_insensitive_analyzer() {
    let mut analyzer = Analyzer::new(AnalyzerOptions {
        case_sensitivity: CaseSensitivity::Insensitive,
        ..Default::default()
    });
    analyzer.register_defaults().unwrap();
    assert_eq!(
        analyzer.instruction_set().case_sensitivity(),
        CaseSensitivity::Insensitive
    );
    let result = analyzer.analyze(&program_v3(vec![
        qubits("q", 2),
        bits("b", 2),
        gate_instruction(gate_with_param("rx", float(0.5)), vec![index("q", &[0])]),
        gate_instruction(modified("INV", None, gate("x")), vec![index("q", &[1])]),
        measure(name_ref("B"), name_ref("Q")),
    ]));
    assert!(
        !result.any_errors(),
        "unexpected errors: {:?}",
        result.error_messages()
    );
    let program = result.root.unwrap();
    let statements = program.block().statements();
    let rx = as_gate(&statements[0]);
    assert_eq!(rx.instruction_ref().name(), "Rx");
    assert_eq!(rx.gate().parameter(), Some(&Value::ConstFloat(0.5)));
    assert_eq!(as_gate(&statements[1]).instruction_ref().name(), "1q_X");
}

#[test]
fn test_case_sensitive_analyzer_rejects_other_spelling() {
    check_errors(
        vec![qubit("q"), gate_instruction(gate("h"), vec![name_ref("q")])],
        expect!["Error: failed to resolve instruction 'h' with argument pack (qubit)"],
    );
}

#[test]
fn test_index_range_expands() {
    let program = analyze_ok(vec![
        qubits("q", 5),
        gate_instruction(gate("H"), vec![index_range("q", 1, 3)]),
    ]);
    let h = as_gate(&program.block().statements()[0]);
    match &h.operands()[0] {
        Value::IndexRef(r) => assert_eq!(r.indices(), &[1_i64, 2, 3]),
        other => panic!("expected an index, got {other:?}"),
    }
}

#[test]
fn test_nested_block_scope() {
    let program = analyze_ok(vec![
        qubit("q"),
        block(vec![qubit("q"), gate_instruction(gate("X"), vec![name_ref("q")])]),
        gate_instruction(gate("X"), vec![name_ref("q")]),
    ]);
    let statements = program.block().statements();
    assert_eq!(statements.len(), 2);
    match &statements[0] {
        asg::Statement::Block(inner) => {
            assert_eq!(inner.variables(), &[VariableId::new(1)]);
            let x = as_gate(&inner.statements()[0]);
            assert_eq!(
                x.operands(),
                &[Value::VariableRef(VariableRef::new(
                    VariableId::new(1),
                    Type::Qubit(Assignable::True)
                ))]
            );
        }
        other => panic!("expected a block, got {other:?}"),
    }
    let x = as_gate(&statements[1]);
    assert_eq!(
        x.operands()[0].referenced_variable(),
        Some(VariableId::new(0))
    );
}

#[test]
fn test_annotations_kept() {
    let x = cqasm_ast::GateInstruction::new(gate("X"), vec![name_ref("q")]).with_annotations(
        vec![annotation("pragma", "delay", vec![int(3), name_ref("nope")])],
    );
    let result = analyze(vec![qubit("q"), Statement::GateInstruction(x)]);
    expect!["Error: failed to resolve variable 'nope'"]
        .assert_eq(&result.error_messages().join("\n"));
    let program = result.root.unwrap();
    let x = as_gate(&program.block().statements()[0]);
    let annotation = &x.annotations()[0];
    assert_eq!(annotation.interface(), "pragma");
    assert_eq!(annotation.operation(), "delay");
    assert_eq!(annotation.operands(), &[Value::ConstInt(3)]);
}

#[test]
fn test_block_location_covers_statements() {
    let first = cqasm_ast::GateInstruction::new(gate("X"), vec![name_ref("q")])
        .with_location(SourceLocation::from_lines(2, 1, 2, 4));
    let second = cqasm_ast::GateInstruction::new(gate("H"), vec![name_ref("q")])
        .with_location(SourceLocation::from_lines(4, 3, 4, 6));
    let program = analyze_ok(vec![
        qubit("q"),
        Statement::GateInstruction(first),
        Statement::GateInstruction(second),
    ]);
    assert_eq!(
        program.block().location(),
        Some(&SourceLocation::from_lines(2, 1, 4, 6))
    );
}

//
// Diagnostics
//

#[test]
fn test_version_mismatch() {
    let result = Analyzer::with_defaults().analyze(&program(&[1, 0], vec![qubit("q")]));
    expect!["Error: the only cQASM version supported is 3.0, but the cQASM file is version 1.0"]
        .assert_eq(&result.error_messages().join("\n"));
    // Analysis continues with the supported version.
    let program = result.root.unwrap();
    assert_eq!(program.version(), &Version::new(vec![3, 0]));
    assert_eq!(program.variables().len(), 1);
}

#[test]
fn test_negative_version_component() {
    let result = Analyzer::with_defaults().analyze(&program(&[3, -1], vec![]));
    expect!["Error: invalid version component"].assert_eq(&result.error_messages().join("\n"));
}

#[test]
fn test_errors_recover_per_statement() {
    let result = analyze(vec![
        qubits("q", 2),
        gate_instruction(gate("X"), vec![name_ref("r")]),
        gate_instruction(gate("X"), vec![index("q", &[5])]),
        gate_instruction(gate("H"), vec![index("q", &[1])]),
    ]);
    expect![[r#"
        Error: failed to resolve variable 'r'
        Error: index 5 out of range (size 2)"#]]
    .assert_eq(&result.error_messages().join("\n"));
    let program = result.root.unwrap();
    assert_eq!(program.block().statements().len(), 1);
}

#[test]
fn test_redeclaration() {
    check_errors(
        vec![qubit("q"), bit("q")],
        expect!["Error: variable 'q' redeclared in the same scope"],
    );
}

#[test]
fn test_shadowing_constant_is_allowed() {
    analyze_ok(vec![declare("pi", TypeName::Float, None)]);
}

#[test]
fn test_array_size_must_be_positive() {
    check_errors(
        vec![qubits("q", 0)],
        expect!["Error: declaring qubit array of size <= 0"],
    );
}

#[test]
fn test_unknown_gate() {
    let result = analyze(vec![qubit("q"), gate_instruction(gate("Foo"), vec![name_ref("q")])]);
    expect!["Error: failed to resolve instruction 'Foo' with argument pack (qubit)"]
        .assert_eq(&result.error_messages().join("\n"));
    assert_eq!(
        result.errors[0].kind(),
        SemanticErrorKind::NameResolutionFailure
    );
}

#[test]
fn test_wrong_operand_types() {
    let result = analyze(vec![
        qubit("q"),
        gate_instruction(gate("CNOT"), vec![name_ref("q"), int(1)]),
    ]);
    expect!["Error: failed to resolve instruction 'CNOT' with argument pack (qubit, int)"]
        .assert_eq(&result.error_messages().join("\n"));
    assert_eq!(
        result.errors[0].kind(),
        SemanticErrorKind::OverloadResolutionFailure
    );
}

#[test]
fn test_missing_gate_parameter() {
    check_errors(
        vec![qubit("q"), gate_instruction(gate("Rx"), vec![name_ref("q")])],
        expect!["Error: failed to resolve 'Rx' with argument pack ()"],
    );
}

#[test]
fn test_modifier_on_two_qubit_gate() {
    check_errors(
        vec![
            qubits("q", 2),
            gate_instruction(
                modified("inv", None, gate("CNOT")),
                vec![index("q", &[0]), index("q", &[1])],
            ),
        ],
        expect!["Error: trying to apply a gate modifier to a multi-qubit gate"],
    );
}

#[test]
fn test_non_uniform_qubit_operands() {
    check_errors(
        vec![
            qubits("q", 5),
            gate_instruction(
                gate("CNOT"),
                vec![index_range("q", 0, 1), index_range("q", 2, 4)],
            ),
        ],
        expect!["Error: qubit operands have different index-list lengths (2 and 3)"],
    );
}

#[test]
fn test_measure_size_mismatch() {
    check_errors(
        vec![
            qubits("q", 2),
            bits("b", 3),
            measure(name_ref("b"), name_ref("q")),
        ],
        expect!["Error: qubit and bit indices have different sizes"],
    );
}

#[test]
fn test_index_on_scalar() {
    check_errors(
        vec![qubit("q"), gate_instruction(gate("X"), vec![index("q", &[0])])],
        expect!["Error: indexation is not supported for value of type 'qubit'"],
    );
}

#[test]
fn test_reversed_range() {
    check_errors(
        vec![
            qubits("q", 4),
            gate_instruction(gate("X"), vec![index_range("q", 3, 1)]),
        ],
        expect!["Error: last index is lower than first index"],
    );
}

#[test]
fn test_huge_range_is_rejected_before_expansion() {
    check_errors(
        vec![
            qubits("q", 2),
            gate_instruction(gate("X"), vec![index_range("q", 0, i64::MAX)]),
            gate_instruction(gate("X"), vec![index_range("q", -3, 1)]),
            gate_instruction(gate("X"), vec![index_range("q", 4, i64::MAX)]),
        ],
        expect![[r#"
            Error: index 2 out of range (size 2)
            Error: index -3 out of range (size 2)
            Error: index 4 out of range (size 2)"#]],
    );
}

#[test]
fn test_non_constant_index() {
    let entries = vec![IndexEntry::Item(name_ref("i"))];
    check_errors(
        vec![
            qubits("q", 4),
            declare("i", TypeName::Int, None),
            gate_instruction(gate("X"), vec![index_entries(name_ref("q"), entries)]),
        ],
        expect!["Error: integer must be constant"],
    );
}

#[test]
fn test_assign_to_constant() {
    check_errors(
        vec![assign(name_ref("pi"), float(3.0))],
        expect!["Error: left-hand side of assignment statement must be assignable"],
    );
}

#[test]
fn test_assignment_type_mismatch() {
    check_errors(
        vec![
            declare("x", TypeName::Int, None),
            assign(name_ref("x"), float(1.5)),
        ],
        expect!["Error: type of right-hand side (float) could not be coerced to left-hand side (int)"],
    );
}

#[test]
fn test_initialization_list() {
    let items: Vec<Expression> = vec![int(1), float(0.5), bool_lit(true)];
    let program = analyze_ok(vec![declare_init("a", TypeName::Float, Some(3), init_list(items))]);
    let init = as_assignment(&program.block().statements()[0]);
    assert_eq!(init.rhs(), &Value::ConstFloatArray(vec![1.0, 0.5, 1.0]));
}

#[test]
fn test_initialization_list_rejects_strings() {
    check_errors(
        vec![declare_init(
            "a",
            TypeName::Int,
            Some(1),
            init_list(vec![string("x")]),
        )],
        expect!["Error: expecting a const bool, const int, or const float value, got string"],
    );
}

#[test]
fn test_division_by_zero_reported() {
    check_errors(
        vec![declare_init(
            "x",
            TypeName::Int,
            None,
            binary(BinaryOp::Division, int(1), int(0)),
        )],
        expect!["Error: division by zero"],
    );
}

#[test]
fn test_error_location_is_attached() {
    let x = cqasm_ast::GateInstruction::new(gate("X"), vec![name_ref("r")])
        .with_location(SourceLocation::from_lines(3, 1, 3, 3));
    let result = analyze(vec![Statement::GateInstruction(x)]);
    assert_eq!(
        result.errors[0].location(),
        Some(&SourceLocation::from_lines(3, 1, 3, 3))
    );
}

#[test]
fn test_unwrap() {
    let mut out = Vec::new();
    let result = analyze(vec![qubit("q"), bit("q")]);
    assert_eq!(result.unwrap(&mut out), Err(AnalysisFailed));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Error: variable 'q' redeclared in the same scope\n"
    );

    let mut out = Vec::new();
    assert!(analyze(vec![qubit("q")]).unwrap(&mut out).is_ok());
    assert!(out.is_empty());
}

#[test]
fn test_analyzer_is_reusable() {
    let analyzer = Analyzer::with_defaults();
    let first = analyzer.analyze(&program_v3(vec![qubit("q")]));
    let second = analyzer.analyze(&program_v3(vec![qubit("q")]));
    assert!(!first.any_errors());
    assert!(!second.any_errors());
}
