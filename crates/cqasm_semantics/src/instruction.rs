// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use itertools::Itertools;
use smol_str::SmolStr;
use std::fmt;

use crate::semantic_error::TypeSpecError;
use crate::types::{self, Type, Types};

/// How an instruction came to be in the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    /// A named gate such as `H` or `CNOT`.
    NamedGate,
    /// `1q_<gate>`: a single-qubit modifier composition.
    SingleQubitComposition,
    /// `2q_<gate>`: a two-qubit modifier composition.
    TwoQubitComposition,
    /// `measure`, `reset`, `init`, `barrier`, `wait`.
    NonGate,
    /// Registered by an embedder and not part of the instruction set.
    Custom,
}

impl InstructionKind {
    pub fn is_gate(&self) -> bool {
        matches!(
            self,
            InstructionKind::NamedGate
                | InstructionKind::SingleQubitComposition
                | InstructionKind::TwoQubitComposition
        )
    }
}

/// Instruction descriptor: the tag of an `InstructionTable` overload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    name: SmolStr,
    operand_types: Types,
    kind: InstructionKind,
}

impl Instruction {
    pub fn new<T: AsRef<str>>(name: T, operand_types: Types, kind: InstructionKind) -> Instruction {
        Instruction {
            name: SmolStr::new(name.as_ref()),
            operand_types,
            kind,
        }
    }

    /// Operand types given as a cQASM 3 shorthand string. `None` means no operands.
    pub fn from_spec<T: AsRef<str>>(
        name: T,
        operand_types: Option<&str>,
        kind: InstructionKind,
    ) -> Result<Instruction, TypeSpecError> {
        let operand_types = types::from_spec(operand_types.unwrap_or(""))?;
        Ok(Instruction::new(name, operand_types, kind))
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn operand_types(&self) -> &[Type] {
        &self.operand_types
    }

    pub fn kind(&self) -> InstructionKind {
        self.kind
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.operand_types.iter().join(", "))
    }
}

/// Gate modifier descriptor, e.g. `pow` taking a float.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GateModifier {
    name: SmolStr,
    param_type: Option<Type>,
    two_qubit: bool,
}

impl GateModifier {
    pub fn new<T: AsRef<str>>(name: T, param_type: Option<Type>, two_qubit: bool) -> GateModifier {
        GateModifier {
            name: SmolStr::new(name.as_ref()),
            param_type,
            two_qubit,
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn param_type(&self) -> Option<&Type> {
        self.param_type.as_ref()
    }

    /// Types of the modifier's arguments: empty, or the one parameter type.
    pub fn param_types(&self) -> Types {
        self.param_type.iter().cloned().collect()
    }

    /// `ctrl` turns a single-qubit gate into a two-qubit one.
    pub fn is_two_qubit(&self) -> bool {
        self.two_qubit
    }
}
