// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Build the ASG defined in asg.rs from the syntactic tree defined in the
// crate cqasm_ast.
//
// Each statement is analyzed on its own. An error aborts only the statement
// it occurs in: the statement is dropped from the ASG, the error is recorded
// in the context, and analysis continues with the next statement.

use std::sync::Arc;

use cqasm_ast as synast; // Syntactic AST
use cqasm_ast::SourceLocation;

use crate::asg;
use crate::context::Context;
use crate::gate_resolution::{
    check_gate, check_non_gate_instruction, check_uniform_qubit_operands, resolution_name,
    resolve_parameter,
};
use crate::instruction_set::InstructionSet;
use crate::primitives::Version;
use crate::semantic_error::{SemanticError, SemanticResult};
use crate::types::{self, Assignable, Type};
use crate::values::{promote, type_of, IndexRef, Value, VariableRef, Values};
use crate::with_scope;

/// Analyze `program`, recording errors in `context`. The returned program
/// holds every statement that could be analyzed.
pub(crate) fn syntax_to_semantic(
    program: &synast::Program,
    api_version: &Version,
    context: &mut Context,
) -> asg::Program {
    let version = from_version(program.version(), api_version, context);
    from_statements(program.statements(), context);
    let block = std::mem::take(&mut context.scopes.global_scope_mut().block);
    let variables = std::mem::take(&mut context.variables);
    asg::Program::new(api_version.clone(), version, block, variables)
}

fn from_version(
    version: &synast::Version,
    api_version: &Version,
    context: &mut Context,
) -> Version {
    let checked = if version.items().iter().any(|item| *item < 0) {
        Err(SemanticError::structural("invalid version component"))
    } else if version.items() != api_version.items() {
        Err(SemanticError::structural(format!(
            "the only cQASM version supported is {api_version}, but the cQASM file is version {version}"
        )))
    } else {
        Ok(Version::new(version.items().to_vec()))
    };
    checked.unwrap_or_else(|err| {
        context.insert_error(err, version.location());
        // Fall back to the API version so the rest of the program can be analyzed.
        api_version.clone()
    })
}

fn from_statements(statements: &[synast::Statement], context: &mut Context) {
    for statement in statements {
        if let Err(err) = from_statement(statement, context) {
            context.insert_error(err, statement.location());
        }
    }
}

fn from_statement(statement: &synast::Statement, context: &mut Context) -> SemanticResult<()> {
    match statement {
        synast::Statement::Variable(variable) => from_variable(variable, context),
        synast::Statement::GateInstruction(instruction) => {
            let instruction = from_gate_instruction(instruction, context)?;
            context
                .scopes
                .add_statement_to_current_scope(asg::Statement::GateInstruction(instruction));
            Ok(())
        }
        synast::Statement::NonGateInstruction(instruction) => {
            let instruction = from_non_gate_instruction(instruction, context)?;
            context
                .scopes
                .add_statement_to_current_scope(asg::Statement::NonGateInstruction(instruction));
            Ok(())
        }
        synast::Statement::Assignment(assignment) => {
            let lhs = from_expression(assignment.lhs(), context)?;
            let instruction = from_assignment(
                lhs,
                assignment.rhs(),
                assignment.annotations(),
                assignment.location(),
                context,
            )?;
            context
                .scopes
                .add_statement_to_current_scope(asg::Statement::AssignmentInstruction(instruction));
            Ok(())
        }
        synast::Statement::Block(block) => {
            from_block(block, context);
            Ok(())
        }
    }
}

fn from_block(block: &synast::Block, context: &mut Context) {
    let scope = with_scope!(context, {
        from_statements(block.statements(), context);
    });
    if let Some(scope) = scope {
        context
            .scopes
            .add_statement_to_current_scope(asg::Statement::Block(scope.block));
    }
}

//
// Declarations and assignments
//

fn from_type_decl(typ: &synast::TypeDecl) -> SemanticResult<Type> {
    use synast::TypeName;
    const A: Assignable = Assignable::True;
    let typ = match (typ.name(), typ.size()) {
        (name, Some(size)) if size <= 0 => {
            return Err(SemanticError::structural(format!(
                "declaring {} array of size <= 0",
                name.as_str()
            )))
        }
        (TypeName::Qubit, Some(size)) => Type::QubitArray(size, A),
        (TypeName::Bit, Some(size)) => Type::BitArray(size, A),
        (TypeName::Bool, Some(size)) => Type::BoolArray(size, A),
        (TypeName::Int, Some(size)) => Type::IntArray(size, A),
        (TypeName::Float, Some(size)) => Type::FloatArray(size, A),
        (TypeName::Qubit, None) => Type::Qubit(A),
        (TypeName::Bit, None) => Type::Bit(A),
        (TypeName::Bool, None) => Type::Bool(A),
        (TypeName::Int, None) => Type::Int(A),
        (TypeName::Float, None) => Type::Float(A),
    };
    Ok(typ)
}

fn is_declared_in_current_block(name: &str, context: &Context) -> bool {
    let case = context.scopes.case_sensitivity();
    let key = case.key(name);
    context
        .scopes
        .current_scope()
        .block
        .variables()
        .iter()
        .filter_map(|id| context.variable(*id))
        .any(|variable| case.key(variable.name()) == key)
}

fn from_variable(variable: &synast::Variable, context: &mut Context) -> SemanticResult<()> {
    let identifier = variable.name();
    let name = identifier.name();
    let typ = from_type_decl(variable.typ())?;
    if is_declared_in_current_block(name, context) {
        return Err(SemanticError::structural(format!(
            "variable '{name}' redeclared in the same scope"
        )));
    }
    let annotations = from_annotations(variable.annotations(), context);
    // Record where the variable was defined by the location of its name.
    let location = identifier.location().or(variable.location()).cloned();
    let id = context.new_variable(asg::Variable::new(name, typ.clone(), annotations, location));
    context.scopes.add_variable_to_current_scope(id);
    let reference = Value::VariableRef(VariableRef::new(id, typ));
    context.scopes.register_variable(name, reference.clone());

    // An initializer is an assignment immediately following the declaration.
    if let Some(initializer) = variable.initializer() {
        let instruction =
            from_assignment(reference, initializer, &[], variable.location(), context)?;
        context
            .scopes
            .add_statement_to_current_scope(asg::Statement::AssignmentInstruction(instruction));
    }
    Ok(())
}

fn from_assignment(
    lhs: Value,
    rhs: &synast::Expression,
    annotations: &[synast::AnnotationData],
    location: Option<&SourceLocation>,
    context: &mut Context,
) -> SemanticResult<asg::AssignmentInstruction> {
    let lhs_type = type_of(&lhs);
    if !lhs_type.is_assignable() {
        return Err(SemanticError::type_error(
            "left-hand side of assignment statement must be assignable",
        ));
    }
    let rhs = from_expression(rhs, context)?;
    let target = lhs_type.to_rvalue();
    let rhs = promote(&rhs, &target)
        .map(|value| value.into_owned())
        .ok_or_else(|| {
            SemanticError::type_error(format!(
                "type of right-hand side ({}) could not be coerced to left-hand side ({})",
                type_of(&rhs),
                lhs_type
            ))
        })?;
    let annotations = from_annotations(annotations, context);
    Ok(asg::AssignmentInstruction::new(
        lhs,
        rhs,
        annotations,
        location.cloned(),
    ))
}

//
// Instructions
//

fn from_gate_instruction(
    instruction: &synast::GateInstruction,
    context: &mut Context,
) -> SemanticResult<asg::GateInstruction> {
    let instruction_set = Arc::clone(&context.instruction_set);
    let gate = from_gate(instruction.gate(), &instruction_set, context)?;
    let operands = from_expressions(instruction.operands(), context)?;
    let name = resolution_name(&gate, &instruction_set);
    let resolved = context
        .scopes
        .resolve_gate_instruction(&name, gate, &operands)?;
    check_uniform_qubit_operands(resolved.operands())?;
    let annotations = from_annotations(instruction.annotations(), context);
    Ok(resolved
        .with_annotations(annotations)
        .with_location(instruction.location().cloned()))
}

fn missing_parameter(name: &str) -> SemanticError {
    SemanticError::overload_resolution(format!("failed to resolve '{name}' with argument pack ()"))
}

fn from_gate(
    gate: &synast::Gate,
    instruction_set: &InstructionSet,
    context: &mut Context,
) -> SemanticResult<asg::Gate> {
    let location = gate.location();
    let name = gate.name().name();
    let inner = gate
        .gate()
        .map(|inner| from_gate(inner, instruction_set, context))
        .transpose()?;
    let parameter = gate
        .parameter()
        .map(|param| from_expression(param, context))
        .transpose()
        .map_err(|err| err.with_context(location))?;

    let parameter = if inner.is_some() {
        // Gate modifier: its parameter is resolved against the modifier table.
        let args: Values = parameter.into_iter().collect();
        let (_, promoted) = context
            .scopes
            .resolve_gate_modifier(name, &args)
            .map_err(|err| err.with_context(location))?;
        promoted.into_iter().next()
    } else {
        match parameter {
            Some(param) => Some(
                resolve_parameter(name, &param, instruction_set)
                    .map_err(|err| err.with_context(location))?,
            ),
            None if instruction_set.param_type(name).is_some() => {
                return Err(missing_parameter(name).with_context(location))
            }
            None => None,
        }
    };

    let annotations = from_annotations(gate.annotations(), context);
    let gate = asg::Gate::new(name, inner, parameter, annotations, location.cloned());
    check_gate(&gate, instruction_set).map_err(|err| err.with_context(location))?;
    Ok(gate)
}

fn from_non_gate_instruction(
    instruction: &synast::NonGateInstruction,
    context: &mut Context,
) -> SemanticResult<asg::NonGateInstruction> {
    let instruction_set = Arc::clone(&context.instruction_set);
    let name = instruction.name().name();
    let parameter = instruction
        .parameter()
        .map(|param| from_expression(param, context))
        .transpose()?;
    let operands = from_expressions(instruction.operands(), context)?;
    let resolved = context
        .scopes
        .resolve_non_gate_instruction(name, &operands)?;
    let parameter = match parameter {
        Some(param) => Some(resolve_parameter(name, &param, &instruction_set)?),
        None if instruction_set.param_type(name).is_some() => return Err(missing_parameter(name)),
        None => None,
    };
    let resolved = resolved.with_parameter(parameter);
    check_non_gate_instruction(&resolved, &instruction_set)?;
    let annotations = from_annotations(instruction.annotations(), context);
    Ok(resolved
        .with_annotations(annotations)
        .with_location(instruction.location().cloned()))
}

// Errors in annotation operands are recorded one by one; the annotation is
// kept with the operands that could be analyzed.
fn from_annotations(
    annotations: &[synast::AnnotationData],
    context: &mut Context,
) -> Vec<asg::AnnotationData> {
    annotations
        .iter()
        .map(|annotation| {
            let mut operands = Values::new();
            for operand in annotation.operands() {
                match from_expression(operand, context) {
                    Ok(value) => operands.push(value),
                    Err(err) => context.insert_error(err, annotation.location()),
                }
            }
            asg::AnnotationData::new(
                annotation.interface().name().as_str(),
                annotation.operation().name().as_str(),
                operands,
                annotation.location().cloned(),
            )
        })
        .collect()
}

//
// Expressions
//

fn from_expressions(
    expressions: &[synast::Expression],
    context: &mut Context,
) -> SemanticResult<Values> {
    expressions
        .iter()
        .map(|expr| from_expression(expr, context))
        .collect()
}

fn from_expression(expr: &synast::Expression, context: &mut Context) -> SemanticResult<Value> {
    from_expression_kind(expr.kind(), context).map_err(|err| err.with_context(expr.location()))
}

fn from_expression_kind(kind: &synast::ExprKind, context: &mut Context) -> SemanticResult<Value> {
    use synast::ExprKind;
    match kind {
        ExprKind::BooleanLiteral(b) => Ok(Value::ConstBool(*b)),
        ExprKind::IntegerLiteral(i) => Ok(Value::ConstInt(*i)),
        ExprKind::FloatLiteral(x) => Ok(Value::ConstFloat(*x)),
        ExprKind::StringLiteral(s) => Ok(Value::ConstString(s.clone())),
        ExprKind::JsonLiteral(s) => Ok(Value::ConstJson(s.clone())),
        ExprKind::Identifier(name) => context.scopes.resolve_variable(name),
        ExprKind::Index(base, entries) => from_index(base, entries, context),
        ExprKind::FunctionCall(name, args) => {
            let args = from_expressions(args, context)?;
            context.scopes.resolve_function(name.name(), &args)
        }
        ExprKind::Unary(op, operand) => {
            let args = vec![from_expression(operand, context)?];
            from_operator(op.symbol(), &args, context)
        }
        ExprKind::Binary(op, lhs, rhs) => {
            let args = vec![from_expression(lhs, context)?, from_expression(rhs, context)?];
            from_operator(op.symbol(), &args, context)
        }
        ExprKind::Ternary(cond, if_true, if_false) => {
            let args = vec![
                from_expression(cond, context)?,
                from_expression(if_true, context)?,
                from_expression(if_false, context)?,
            ];
            from_operator("?:", &args, context)
        }
        ExprKind::InitializationList(items) => from_initialization_list(items, context),
    }
}

// Operators are functions named `operator<symbol>`.
fn from_operator(symbol: &str, args: &[Value], context: &mut Context) -> SemanticResult<Value> {
    context.scopes.resolve_function(&format!("operator{symbol}"), args)
}

fn from_initialization_list(
    items: &[synast::Expression],
    context: &mut Context,
) -> SemanticResult<Value> {
    let values = from_expressions(items, context)?;
    if let Some(bad) = values.iter().find(|value| {
        !matches!(
            value,
            Value::ConstBool(_) | Value::ConstInt(_) | Value::ConstFloat(_)
        )
    }) {
        return Err(SemanticError::type_error(format!(
            "expecting a const bool, const int, or const float value, got {}",
            type_of(bad)
        )));
    }
    // The widest element kind decides the array type.
    let value = if values.iter().any(|v| matches!(v, Value::ConstFloat(_))) {
        Value::ConstFloatArray(
            values
                .iter()
                .filter_map(|v| match v {
                    Value::ConstFloat(x) => Some(*x),
                    Value::ConstInt(i) => Some(*i as f64),
                    Value::ConstBool(b) => Some(if *b { 1.0 } else { 0.0 }),
                    _ => None,
                })
                .collect(),
        )
    } else if values.iter().any(|v| matches!(v, Value::ConstInt(_))) {
        Value::ConstIntArray(
            values
                .iter()
                .filter_map(|v| match v {
                    Value::ConstInt(i) => Some(*i),
                    Value::ConstBool(b) => Some(i64::from(*b)),
                    _ => None,
                })
                .collect(),
        )
    } else {
        Value::ConstBoolArray(values.iter().filter_map(Value::as_bool).collect())
    };
    Ok(value)
}

//
// Indexing
//

fn from_index(
    base: &synast::Expression,
    entries: &[synast::IndexEntry],
    context: &mut Context,
) -> SemanticResult<Value> {
    let value = from_expression(base, context)?;
    let reference = match &value {
        Value::VariableRef(r)
            if matches!(r.variable_type(), Type::QubitArray(..) | Type::BitArray(..)) =>
        {
            r
        }
        _ => {
            return Err(SemanticError::type_error(format!(
                "indexation is not supported for value of type '{}'",
                type_of(&value)
            )))
        }
    };
    let size = types::size_of(reference.variable_type())?;
    let out_of_range = |index: i64| {
        SemanticError::structural(format!("index {index} out of range (size {size})"))
    };
    let mut indices = Vec::new();
    for entry in entries {
        match entry {
            synast::IndexEntry::Item(index) => {
                let index = from_const_int(index, context)?;
                if index < 0 || index >= size {
                    return Err(out_of_range(index));
                }
                indices.push(index);
            }
            synast::IndexEntry::Range(first, last) => {
                let first = from_const_int(first, context)?;
                let last = from_const_int(last, context)?;
                if first > last {
                    return Err(SemanticError::structural(
                        "last index is lower than first index",
                    ));
                }
                // Bounds are checked before the range is expanded.
                if first < 0 || first >= size {
                    return Err(out_of_range(first));
                }
                if last >= size {
                    return Err(out_of_range(size));
                }
                indices.extend(first..=last);
            }
        }
    }
    let index_ref = IndexRef::new(
        reference.variable(),
        reference.variable_type().clone(),
        indices,
    )?;
    Ok(Value::IndexRef(index_ref))
}

/// Analyze `expr` as a constant integer.
fn from_const_int(expr: &synast::Expression, context: &mut Context) -> SemanticResult<i64> {
    let value = from_expression(expr, context)?;
    let int = promote(&value, &Type::Int(Assignable::False)).ok_or_else(|| {
        SemanticError::type_error("expected an integer").with_context(expr.location())
    })?;
    match int.as_int() {
        Some(i) => Ok(i),
        None => Err(SemanticError::constant_required("integer must be constant")
            .with_context(expr.location())),
    }
}
