// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// The definition of the abstract semantic graph (ASG) produced by the analyzer.
// Construction of the ASG from the syntactic tree is in syntax_to_semantics.rs
//
// Values refer to variables by `VariableId`, an index into the variable arena
// held by `Program`. Blocks list the ids of the variables declared in them.

use cqasm_ast::SourceLocation;
use smol_str::SmolStr;

use crate::instruction::Instruction;
use crate::primitives::Version;
use crate::types::Type;
use crate::values::{Value, Values};

// A wrapped `usize` that serves as
// * A unique label for a `Variable`.
// * An index into `Program::variables`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableId(usize);

impl VariableId {
    pub fn new(index: usize) -> VariableId {
        VariableId(index)
    }
}

impl From<VariableId> for usize {
    fn from(id: VariableId) -> usize {
        id.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    api_version: Version,
    version: Version,
    block: Block,
    variables: Vec<Variable>,
}

impl Program {
    pub fn new(
        api_version: Version,
        version: Version,
        block: Block,
        variables: Vec<Variable>,
    ) -> Program {
        Program {
            api_version,
            version,
            block,
            variables,
        }
    }

    /// The language version the analyzer implements.
    pub fn api_version(&self) -> &Version {
        &self.api_version
    }

    /// The version declared by the program.
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Every variable declared anywhere in the program, indexed by `VariableId`.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VariableId) -> Option<&Variable> {
        self.variables.get(usize::from(id))
    }

    /// Print the ASG using the pretty print `Debug` trait.
    pub fn print_asg_debug_pretty(&self) {
        println!("version {}", self.version);
        for stmt in self.block.statements() {
            println!("{stmt:#?}");
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    name: SmolStr,
    typ: Type,
    annotations: Vec<AnnotationData>,
    location: Option<SourceLocation>,
}

impl Variable {
    pub fn new<T: AsRef<str>>(
        name: T,
        typ: Type,
        annotations: Vec<AnnotationData>,
        location: Option<SourceLocation>,
    ) -> Variable {
        Variable {
            name: SmolStr::new(name.as_ref()),
            typ,
            annotations,
            location,
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn typ(&self) -> &Type {
        &self.typ
    }

    pub fn annotations(&self) -> &[AnnotationData] {
        &self.annotations
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    statements: Vec<Statement>,
    variables: Vec<VariableId>,
    location: Option<SourceLocation>,
}

impl Block {
    pub fn new() -> Block {
        Block::default()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Variables declared directly in this block.
    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Append `stmt`, growing the block's location to cover it.
    pub fn add_statement(&mut self, stmt: Statement) {
        if let Some(loc) = stmt.location() {
            match self.location.as_mut() {
                Some(block_loc) => block_loc.expand_to_cover(loc),
                None => self.location = Some(loc.clone()),
            }
        }
        self.statements.push(stmt);
    }

    pub fn add_variable(&mut self, id: VariableId) {
        self.variables.push(id);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    GateInstruction(GateInstruction),
    NonGateInstruction(NonGateInstruction),
    AssignmentInstruction(AssignmentInstruction),
    Block(Block),
}

impl Statement {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Statement::GateInstruction(s) => s.location.as_ref(),
            Statement::NonGateInstruction(s) => s.location.as_ref(),
            Statement::AssignmentInstruction(s) => s.location.as_ref(),
            Statement::Block(b) => b.location(),
        }
    }
}

/// A gate, possibly wrapped by gate modifiers, e.g. `ctrl.pow(2).X`.
/// For a named gate `gate` is `None`; for a modifier it holds the modified gate.
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    name: SmolStr,
    gate: Option<Box<Gate>>,
    parameter: Option<Value>,
    annotations: Vec<AnnotationData>,
    location: Option<SourceLocation>,
}

impl Gate {
    pub fn new<T: AsRef<str>>(
        name: T,
        gate: Option<Gate>,
        parameter: Option<Value>,
        annotations: Vec<AnnotationData>,
        location: Option<SourceLocation>,
    ) -> Gate {
        Gate {
            name: SmolStr::new(name.as_ref()),
            gate: gate.map(Box::new),
            parameter,
            annotations,
            location,
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn gate(&self) -> Option<&Gate> {
        self.gate.as_deref()
    }

    pub fn parameter(&self) -> Option<&Value> {
        self.parameter.as_ref()
    }

    pub fn annotations(&self) -> &[AnnotationData] {
        &self.annotations
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GateInstruction {
    instruction_ref: Instruction,
    gate: Gate,
    operands: Values,
    annotations: Vec<AnnotationData>,
    location: Option<SourceLocation>,
}

impl GateInstruction {
    pub fn new(instruction_ref: Instruction, gate: Gate, operands: Values) -> GateInstruction {
        GateInstruction {
            instruction_ref,
            gate,
            operands,
            annotations: Vec::new(),
            location: None,
        }
    }

    /// The instruction descriptor selected by overload resolution.
    pub fn instruction_ref(&self) -> &Instruction {
        &self.instruction_ref
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn operands(&self) -> &[Value] {
        &self.operands
    }

    pub fn annotations(&self) -> &[AnnotationData] {
        &self.annotations
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    pub fn with_annotations(mut self, annotations: Vec<AnnotationData>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_location(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NonGateInstruction {
    instruction_ref: Instruction,
    name: SmolStr,
    operands: Values,
    parameter: Option<Value>,
    annotations: Vec<AnnotationData>,
    location: Option<SourceLocation>,
}

impl NonGateInstruction {
    pub fn new(instruction_ref: Instruction, operands: Values) -> NonGateInstruction {
        NonGateInstruction {
            name: instruction_ref.name().clone(),
            instruction_ref,
            operands,
            parameter: None,
            annotations: Vec::new(),
            location: None,
        }
    }

    pub fn instruction_ref(&self) -> &Instruction {
        &self.instruction_ref
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn operands(&self) -> &[Value] {
        &self.operands
    }

    pub fn parameter(&self) -> Option<&Value> {
        self.parameter.as_ref()
    }

    pub fn annotations(&self) -> &[AnnotationData] {
        &self.annotations
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    pub fn with_parameter(mut self, parameter: Option<Value>) -> Self {
        self.parameter = parameter;
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<AnnotationData>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_location(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentInstruction {
    lhs: Value,
    rhs: Value,
    annotations: Vec<AnnotationData>,
    location: Option<SourceLocation>,
}

impl AssignmentInstruction {
    pub fn new(
        lhs: Value,
        rhs: Value,
        annotations: Vec<AnnotationData>,
        location: Option<SourceLocation>,
    ) -> AssignmentInstruction {
        AssignmentInstruction {
            lhs,
            rhs,
            annotations,
            location,
        }
    }

    pub fn lhs(&self) -> &Value {
        &self.lhs
    }

    pub fn rhs(&self) -> &Value {
        &self.rhs
    }

    pub fn annotations(&self) -> &[AnnotationData] {
        &self.annotations
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

/// `@interface.operation(operands...)`
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationData {
    interface: SmolStr,
    operation: SmolStr,
    operands: Values,
    location: Option<SourceLocation>,
}

impl AnnotationData {
    pub fn new<T: AsRef<str>>(
        interface: T,
        operation: T,
        operands: Values,
        location: Option<SourceLocation>,
    ) -> AnnotationData {
        AnnotationData {
            interface: SmolStr::new(interface.as_ref()),
            operation: SmolStr::new(operation.as_ref()),
            operands,
            location,
        }
    }

    pub fn interface(&self) -> &SmolStr {
        &self.interface
    }

    pub fn operation(&self) -> &SmolStr {
        &self.operation
    }

    pub fn operands(&self) -> &[Value] {
        &self.operands
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}
