// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// The syntactic tree handed to the semantic analyzer by the parser.
// Nothing in the analyzer mutates these nodes. Every node may carry a
// `SourceLocation` that is only used to annotate diagnostics and output nodes.

use itertools::Itertools;
use smol_str::SmolStr;
use std::fmt;

use crate::location::SourceLocation;

type Location = Option<SourceLocation>;

/// Implement `location()` and `with_location()` for node structs.
macro_rules! located {
    ($($node:ident),* $(,)?) => {
        $(
            impl $node {
                pub fn location(&self) -> Option<&SourceLocation> {
                    self.location.as_ref()
                }

                pub fn with_location(mut self, location: SourceLocation) -> Self {
                    self.location = Some(location);
                    self
                }
            }
        )*
    };
}

/// Implement `annotations()` and `with_annotations()` for annotatable node structs.
macro_rules! annotated {
    ($($node:ident),* $(,)?) => {
        $(
            impl $node {
                pub fn annotations(&self) -> &[AnnotationData] {
                    &self.annotations
                }

                pub fn with_annotations(mut self, annotations: Vec<AnnotationData>) -> Self {
                    self.annotations = annotations;
                    self
                }
            }
        )*
    };
}

located!(
    Program,
    Version,
    Identifier,
    Variable,
    Assignment,
    Block,
    Gate,
    GateInstruction,
    NonGateInstruction,
    AnnotationData,
    Expression,
);

annotated!(Variable, Assignment, Gate, GateInstruction, NonGateInstruction);

#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    version: Version,
    statements: Vec<Statement>,
    location: Location,
}

impl Program {
    pub fn new(version: Version, statements: Vec<Statement>) -> Program {
        Program {
            version,
            statements,
            location: None,
        }
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// Version items as written, e.g. `[3, 0]` for `version 3.0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Version {
    items: Vec<i64>,
    location: Location,
}

impl Version {
    pub fn new(items: Vec<i64>) -> Version {
        Version {
            items,
            location: None,
        }
    }

    pub fn items(&self) -> &[i64] {
        &self.items
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items.iter().join("."))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    name: SmolStr,
    location: Location,
}

impl Identifier {
    pub fn new<T: AsRef<str>>(name: T) -> Identifier {
        Identifier {
            name: SmolStr::new(name.as_ref()),
            location: None,
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Variable(Variable),
    GateInstruction(GateInstruction),
    NonGateInstruction(NonGateInstruction),
    Assignment(Assignment),
    Block(Block),
}

impl Statement {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Statement::Variable(node) => node.location(),
            Statement::GateInstruction(node) => node.location(),
            Statement::NonGateInstruction(node) => node.location(),
            Statement::Assignment(node) => node.location(),
            Statement::Block(node) => node.location(),
        }
    }
}

/// The classical and quantum types that may be declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeName {
    Qubit,
    Bit,
    Bool,
    Int,
    Float,
}

impl TypeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::Qubit => "qubit",
            TypeName::Bit => "bit",
            TypeName::Bool => "bool",
            TypeName::Int => "int",
            TypeName::Float => "float",
        }
    }
}

/// A declared type: a name and, for arrays, the number of elements as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    name: TypeName,
    size: Option<i64>,
}

impl TypeDecl {
    pub fn new(name: TypeName, size: Option<i64>) -> TypeDecl {
        TypeDecl { name, size }
    }

    pub fn name(&self) -> TypeName {
        self.name
    }

    pub fn size(&self) -> Option<i64> {
        self.size
    }
}

/// Variable declaration, optionally with an initializer.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    name: Identifier,
    typ: TypeDecl,
    initializer: Option<Expression>,
    annotations: Vec<AnnotationData>,
    location: Location,
}

impl Variable {
    pub fn new(name: Identifier, typ: TypeDecl, initializer: Option<Expression>) -> Variable {
        Variable {
            name,
            typ,
            initializer,
            annotations: Vec::new(),
            location: None,
        }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn typ(&self) -> &TypeDecl {
        &self.typ
    }

    pub fn initializer(&self) -> Option<&Expression> {
        self.initializer.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    lhs: Expression,
    rhs: Expression,
    annotations: Vec<AnnotationData>,
    location: Location,
}

impl Assignment {
    pub fn new(lhs: Expression, rhs: Expression) -> Assignment {
        Assignment {
            lhs,
            rhs,
            annotations: Vec::new(),
            location: None,
        }
    }

    pub fn lhs(&self) -> &Expression {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expression {
        &self.rhs
    }
}

/// A nested block. Opens a new scope.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    statements: Vec<Statement>,
    location: Location,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Block {
        Block {
            statements,
            location: None,
        }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// A named gate such as `X` or `Rz(pi)`, or a gate modifier such as `inv`,
/// `pow(2)` or `ctrl` wrapping another `Gate`.
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    name: Identifier,
    gate: Option<Box<Gate>>,
    parameter: Option<Expression>,
    annotations: Vec<AnnotationData>,
    location: Location,
}

impl Gate {
    pub fn new(name: Identifier, gate: Option<Gate>, parameter: Option<Expression>) -> Gate {
        Gate {
            name,
            gate: gate.map(Box::new),
            parameter,
            annotations: Vec::new(),
            location: None,
        }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn gate(&self) -> Option<&Gate> {
        self.gate.as_deref()
    }

    pub fn parameter(&self) -> Option<&Expression> {
        self.parameter.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GateInstruction {
    gate: Gate,
    operands: Vec<Expression>,
    annotations: Vec<AnnotationData>,
    location: Location,
}

impl GateInstruction {
    pub fn new(gate: Gate, operands: Vec<Expression>) -> GateInstruction {
        GateInstruction {
            gate,
            operands,
            annotations: Vec::new(),
            location: None,
        }
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn operands(&self) -> &[Expression] {
        &self.operands
    }
}

/// `measure`, `reset`, `init`, `barrier`, `wait`, and friends.
#[derive(Clone, Debug, PartialEq)]
pub struct NonGateInstruction {
    name: Identifier,
    parameter: Option<Expression>,
    operands: Vec<Expression>,
    annotations: Vec<AnnotationData>,
    location: Location,
}

impl NonGateInstruction {
    pub fn new(
        name: Identifier,
        parameter: Option<Expression>,
        operands: Vec<Expression>,
    ) -> NonGateInstruction {
        NonGateInstruction {
            name,
            parameter,
            operands,
            annotations: Vec::new(),
            location: None,
        }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn parameter(&self) -> Option<&Expression> {
        self.parameter.as_ref()
    }

    pub fn operands(&self) -> &[Expression] {
        &self.operands
    }
}

/// `@interface.operation(operands)`
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationData {
    interface: Identifier,
    operation: Identifier,
    operands: Vec<Expression>,
    location: Location,
}

impl AnnotationData {
    pub fn new(
        interface: Identifier,
        operation: Identifier,
        operands: Vec<Expression>,
    ) -> AnnotationData {
        AnnotationData {
            interface,
            operation,
            operands,
            location: None,
        }
    }

    pub fn interface(&self) -> &Identifier {
        &self.interface
    }

    pub fn operation(&self) -> &Identifier {
        &self.operation
    }

    pub fn operands(&self) -> &[Expression] {
        &self.operands
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    kind: ExprKind,
    location: Location,
}

impl Expression {
    pub fn new(kind: ExprKind) -> Expression {
        Expression {
            kind,
            location: None,
        }
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }
}

impl From<ExprKind> for Expression {
    fn from(kind: ExprKind) -> Expression {
        Expression::new(kind)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    BooleanLiteral(bool),
    IntegerLiteral(i64),
    FloatLiteral(f64),
    StringLiteral(String),
    JsonLiteral(String),
    Identifier(SmolStr),
    Index(Box<Expression>, Vec<IndexEntry>),
    FunctionCall(Identifier, Vec<Expression>),
    Unary(UnaryOp, Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
    Ternary(Box<Expression>, Box<Expression>, Box<Expression>),
    InitializationList(Vec<Expression>),
}

/// One entry in `q[0, 2:4]`.
#[derive(Clone, Debug, PartialEq)]
pub enum IndexEntry {
    Item(Expression),
    Range(Expression, Expression),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Minus,
    BitwiseNot,
    LogicalNot,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Minus => "-",
            UnaryOp::BitwiseNot => "~",
            UnaryOp::LogicalNot => "!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Power,
    Product,
    Division,
    Modulo,
    Addition,
    Subtraction,
    ShiftLeft,
    ShiftRight,
    CmpGt,
    CmpLt,
    CmpGe,
    CmpLe,
    CmpEq,
    CmpNe,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    LogicalAnd,
    LogicalXor,
    LogicalOr,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        use BinaryOp::*;
        match self {
            Power => "**",
            Product => "*",
            Division => "/",
            Modulo => "%",
            Addition => "+",
            Subtraction => "-",
            ShiftLeft => "<<",
            ShiftRight => ">>",
            CmpGt => ">",
            CmpLt => "<",
            CmpGe => ">=",
            CmpLe => "<=",
            CmpEq => "==",
            CmpNe => "!=",
            BitwiseAnd => "&",
            BitwiseXor => "^",
            BitwiseOr => "|",
            LogicalAnd => "&&",
            LogicalXor => "^^",
            LogicalOr => "||",
        }
    }
}
