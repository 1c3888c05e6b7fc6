// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Well-formedness of the ASG. The analyzer only produces malformed trees if
// it has a bug, so this is run after every analysis that reported no errors.
//
// Everything below walks all places in the ASG where a `Value` may appear.

use smol_str::SmolStr;
use thiserror::Error;

use crate::asg::{
    AnnotationData, AssignmentInstruction, Block, Gate, GateInstruction, NonGateInstruction,
    Program, Statement, Variable, VariableId,
};
use crate::values::Value;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("variable handle {0} is not in the variable table")]
    DanglingVariable(usize),
    #[error("index {index} out of range for variable '{name}' of size {size}")]
    IndexOutOfRange { name: SmolStr, index: i64, size: i64 },
    #[error("instruction '{name}' expects {expected} operand(s), found {actual}")]
    OperandCount {
        name: SmolStr,
        expected: usize,
        actual: usize,
    },
}

struct WalkContext<'a> {
    variables: &'a [Variable],
}

impl WalkContext<'_> {
    fn variable(&self, id: VariableId) -> Result<&Variable, Malformed> {
        self.variables
            .get(usize::from(id))
            .ok_or(Malformed::DanglingVariable(usize::from(id)))
    }
}

trait WalkValues {
    fn walk_values(&self, context: &WalkContext) -> Result<(), Malformed>;
}

impl<V: WalkValues> WalkValues for [V] {
    fn walk_values(&self, context: &WalkContext) -> Result<(), Malformed> {
        self.iter().try_for_each(|v| v.walk_values(context))
    }
}

impl<V: WalkValues> WalkValues for Option<&V> {
    fn walk_values(&self, context: &WalkContext) -> Result<(), Malformed> {
        match self {
            Some(v) => v.walk_values(context),
            None => Ok(()),
        }
    }
}

// The impl for `Value` is the only one that checks anything directly.
impl WalkValues for Value {
    fn walk_values(&self, context: &WalkContext) -> Result<(), Malformed> {
        match self {
            Value::VariableRef(r) => context.variable(r.variable()).map(|_| ()),
            Value::IndexRef(r) => {
                let variable = context.variable(r.variable())?;
                let size = variable.typ().size();
                match r.indices().iter().find(|i| **i < 0 || **i >= size) {
                    Some(index) => Err(Malformed::IndexOutOfRange {
                        name: variable.name().clone(),
                        index: *index,
                        size,
                    }),
                    None => Ok(()),
                }
            }
            Value::FunctionCall(call) => call.arguments().walk_values(context),
            _ => Ok(()),
        }
    }
}

impl WalkValues for AnnotationData {
    fn walk_values(&self, context: &WalkContext) -> Result<(), Malformed> {
        self.operands().walk_values(context)
    }
}

impl WalkValues for Gate {
    fn walk_values(&self, context: &WalkContext) -> Result<(), Malformed> {
        self.parameter().walk_values(context)?;
        self.annotations().walk_values(context)?;
        self.gate().walk_values(context)
    }
}

fn check_operand_count(name: &SmolStr, expected: usize, actual: usize) -> Result<(), Malformed> {
    if expected != actual {
        return Err(Malformed::OperandCount {
            name: name.clone(),
            expected,
            actual,
        });
    }
    Ok(())
}

impl WalkValues for GateInstruction {
    fn walk_values(&self, context: &WalkContext) -> Result<(), Malformed> {
        let instruction = self.instruction_ref();
        check_operand_count(
            instruction.name(),
            instruction.operand_types().len(),
            self.operands().len(),
        )?;
        self.gate().walk_values(context)?;
        self.operands().walk_values(context)?;
        self.annotations().walk_values(context)
    }
}

impl WalkValues for NonGateInstruction {
    fn walk_values(&self, context: &WalkContext) -> Result<(), Malformed> {
        let instruction = self.instruction_ref();
        check_operand_count(
            instruction.name(),
            instruction.operand_types().len(),
            self.operands().len(),
        )?;
        self.operands().walk_values(context)?;
        self.parameter().walk_values(context)?;
        self.annotations().walk_values(context)
    }
}

impl WalkValues for AssignmentInstruction {
    fn walk_values(&self, context: &WalkContext) -> Result<(), Malformed> {
        self.lhs().walk_values(context)?;
        self.rhs().walk_values(context)?;
        self.annotations().walk_values(context)
    }
}

impl WalkValues for Statement {
    fn walk_values(&self, context: &WalkContext) -> Result<(), Malformed> {
        match self {
            Statement::GateInstruction(s) => s.walk_values(context),
            Statement::NonGateInstruction(s) => s.walk_values(context),
            Statement::AssignmentInstruction(s) => s.walk_values(context),
            Statement::Block(b) => b.walk_values(context),
        }
    }
}

impl WalkValues for Block {
    fn walk_values(&self, context: &WalkContext) -> Result<(), Malformed> {
        for id in self.variables() {
            context.variable(*id)?;
        }
        self.statements().walk_values(context)
    }
}

/// Check that every variable handle resolves into the program's variable
/// table, every index is within its variable, and every instruction has as
/// many operands as its descriptor.
pub fn check_well_formed(program: &Program) -> Result<(), Malformed> {
    let context = WalkContext {
        variables: program.variables(),
    };
    for variable in program.variables() {
        variable.annotations().walk_values(&context)?;
    }
    program.block().walk_values(&context)
}
