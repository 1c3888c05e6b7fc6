// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// The instruction set: named gates, non-gate instructions and gate modifiers,
// with their parameter and operand types.
//
// An `InstructionSet` is immutable once built. The cQASM 3.0 set is built once
// per process on first use and shared as `Arc<InstructionSet>`. Other sets can
// be built with the `add_*` methods and passed to the analyzer instead.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use smol_str::SmolStr;
use std::sync::Arc;

use crate::instruction::{GateModifier, Instruction, InstructionKind};
use crate::overload::CaseSensitivity;
use crate::semantic_error::TypeSpecError;
use crate::types::{self, Type};

pub const SINGLE_QUBIT_COMPOSITION_PREFIX: &str = "1q";
pub const TWO_QUBIT_COMPOSITION_PREFIX: &str = "2q";

static CQASM_V3: Lazy<Arc<InstructionSet>> = Lazy::new(|| Arc::new(InstructionSet::cqasm_v3()));

/// The cQASM 3.0 instruction set, shared by the whole process.
pub fn default_instruction_set() -> Arc<InstructionSet> {
    Arc::clone(&CQASM_V3)
}

/// Parameter type code and operand specifications of one instruction name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    name: SmolStr,
    param_type: Option<char>,
    operand_specs: Vec<SmolStr>,
    measure: bool,
}

impl Signature {
    fn new(name: &str, param_type: Option<char>, operand_specs: &[&str]) -> Signature {
        Signature {
            name: SmolStr::new(name),
            param_type,
            operand_specs: operand_specs.iter().map(|s| SmolStr::new(s)).collect(),
            measure: false,
        }
    }

    /// Spelling used at registration.
    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn param_type(&self) -> Option<char> {
        self.param_type
    }

    /// One cQASM 3 shorthand string per accepted operand list.
    pub fn operand_specs(&self) -> &[SmolStr] {
        &self.operand_specs
    }

    /// Whether operands pair qubits with bits that receive their results.
    pub fn is_measure(&self) -> bool {
        self.measure
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ModifierSignature {
    name: SmolStr,
    param_type: Option<char>,
    two_qubit: bool,
}

// Every map is keyed by `case_sensitivity.key(name)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstructionSet {
    case_sensitivity: CaseSensitivity,
    single_qubit_gates: IndexMap<SmolStr, Signature>,
    two_qubit_gates: IndexMap<SmolStr, Signature>,
    non_gates: IndexMap<SmolStr, Signature>,
    gate_modifiers: IndexMap<SmolStr, ModifierSignature>,
}

fn rekey<V>(
    map: IndexMap<SmolStr, V>,
    case_sensitivity: CaseSensitivity,
    name: impl Fn(&V) -> &SmolStr,
) -> IndexMap<SmolStr, V> {
    map.into_values()
        .map(|value| (case_sensitivity.key(name(&value)), value))
        .collect()
}

impl InstructionSet {
    pub fn empty() -> InstructionSet {
        InstructionSet::default()
    }

    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity
    }

    /// The same set, with names compared under `case_sensitivity`.
    pub fn with_case_sensitivity(self, case_sensitivity: CaseSensitivity) -> Self {
        InstructionSet {
            case_sensitivity,
            single_qubit_gates: rekey(self.single_qubit_gates, case_sensitivity, Signature::name),
            two_qubit_gates: rekey(self.two_qubit_gates, case_sensitivity, Signature::name),
            non_gates: rekey(self.non_gates, case_sensitivity, Signature::name),
            gate_modifiers: rekey(self.gate_modifiers, case_sensitivity, |m| &m.name),
        }
    }

    fn key(&self, name: &str) -> SmolStr {
        self.case_sensitivity.key(name)
    }

    pub fn add_single_qubit_gate(
        mut self,
        name: &str,
        param: Option<char>,
        specs: &[&str],
    ) -> Self {
        self.single_qubit_gates
            .insert(self.key(name), Signature::new(name, param, specs));
        self
    }

    pub fn add_two_qubit_gate(mut self, name: &str, param: Option<char>, specs: &[&str]) -> Self {
        self.two_qubit_gates
            .insert(self.key(name), Signature::new(name, param, specs));
        self
    }

    /// An empty spec string means "no operands".
    pub fn add_non_gate(mut self, name: &str, param: Option<char>, specs: &[&str]) -> Self {
        self.non_gates
            .insert(self.key(name), Signature::new(name, param, specs));
        self
    }

    /// A non-gate instruction whose qubit and bit operands must address the
    /// same number of indices.
    pub fn add_measure(mut self, name: &str, param: Option<char>, specs: &[&str]) -> Self {
        let mut signature = Signature::new(name, param, specs);
        signature.measure = true;
        self.non_gates.insert(self.key(name), signature);
        self
    }

    pub fn add_gate_modifier(mut self, name: &str, param: Option<char>, two_qubit: bool) -> Self {
        let modifier = ModifierSignature {
            name: SmolStr::new(name),
            param_type: param,
            two_qubit,
        };
        self.gate_modifiers.insert(self.key(name), modifier);
        self
    }

    pub fn cqasm_v3() -> InstructionSet {
        const TWO: &[&str] = &["QQ", "QV", "VQ", "VV"];
        const ONE: &[&str] = &["Q", "V"];
        let mut set = InstructionSet::empty()
            .add_two_qubit_gate("CNOT", None, TWO)
            .add_two_qubit_gate("CR", Some('f'), TWO)
            .add_two_qubit_gate("CRk", Some('i'), TWO)
            .add_two_qubit_gate("CZ", None, TWO)
            .add_two_qubit_gate("SWAP", None, TWO);
        for name in [
            "H", "I", "mX90", "mY90", "S", "Sdag", "T", "Tdag", "X", "X90", "Y", "Y90", "Z",
        ] {
            set = set.add_single_qubit_gate(name, None, ONE);
        }
        for name in ["Rx", "Ry", "Rz"] {
            set = set.add_single_qubit_gate(name, Some('f'), ONE);
        }
        set.add_measure("measure", None, &["BQ", "WV", "BV", "WQ"])
            .add_non_gate("reset", None, &["", "Q", "V"])
            .add_non_gate("init", None, ONE)
            .add_non_gate("barrier", None, ONE)
            .add_non_gate("wait", Some('i'), ONE)
            .add_gate_modifier("inv", None, false)
            .add_gate_modifier("pow", Some('f'), false)
            .add_gate_modifier("ctrl", None, true)
    }

    pub fn is_single_qubit_named_gate(&self, name: &str) -> bool {
        self.single_qubit_gates.contains_key(&self.key(name))
    }

    pub fn is_two_qubit_named_gate(&self, name: &str) -> bool {
        self.two_qubit_gates.contains_key(&self.key(name))
    }

    pub fn is_named_gate(&self, name: &str) -> bool {
        self.is_single_qubit_named_gate(name) || self.is_two_qubit_named_gate(name)
    }

    pub fn is_single_qubit_gate_composition(&self, name: &str) -> bool {
        self.key(name).starts_with(SINGLE_QUBIT_COMPOSITION_PREFIX)
    }

    pub fn is_two_qubit_gate_composition(&self, name: &str) -> bool {
        self.key(name).starts_with(TWO_QUBIT_COMPOSITION_PREFIX)
    }

    /// Named single-qubit gate or a `1q_` composition.
    pub fn is_single_qubit_gate(&self, name: &str) -> bool {
        self.is_single_qubit_named_gate(name) || self.is_single_qubit_gate_composition(name)
    }

    /// Named two-qubit gate or a `2q_` composition.
    pub fn is_two_qubit_gate(&self, name: &str) -> bool {
        self.is_two_qubit_named_gate(name) || self.is_two_qubit_gate_composition(name)
    }

    pub fn is_gate(&self, name: &str) -> bool {
        self.is_single_qubit_gate(name) || self.is_two_qubit_gate(name)
    }

    pub fn is_non_gate(&self, name: &str) -> bool {
        self.non_gates.contains_key(&self.key(name))
    }

    pub fn is_measure(&self, name: &str) -> bool {
        self.non_gates
            .get(&self.key(name))
            .is_some_and(Signature::is_measure)
    }

    pub fn is_gate_modifier(&self, name: &str) -> bool {
        self.gate_modifiers.contains_key(&self.key(name))
    }

    pub fn is_single_qubit_gate_modifier(&self, name: &str) -> bool {
        self.gate_modifiers
            .get(&self.key(name))
            .is_some_and(|modifier| !modifier.two_qubit)
    }

    pub fn is_two_qubit_gate_modifier(&self, name: &str) -> bool {
        self.gate_modifiers
            .get(&self.key(name))
            .is_some_and(|modifier| modifier.two_qubit)
    }

    /// Parameter type of a named gate, non-gate instruction or gate modifier.
    pub fn param_type(&self, name: &str) -> Option<Type> {
        let key = self.key(name);
        let code = self
            .single_qubit_gates
            .get(&key)
            .or_else(|| self.two_qubit_gates.get(&key))
            .or_else(|| self.non_gates.get(&key))
            .and_then(|sig| sig.param_type)
            .or_else(|| self.gate_modifiers.get(&key).and_then(|m| m.param_type))?;
        types::from_spec_char(code).ok()
    }

    pub fn kind_of(&self, name: &str) -> InstructionKind {
        if self.is_named_gate(name) {
            InstructionKind::NamedGate
        } else if self.is_non_gate(name) {
            InstructionKind::NonGate
        } else if self.is_single_qubit_gate_composition(name) {
            InstructionKind::SingleQubitComposition
        } else if self.is_two_qubit_gate_composition(name) {
            InstructionKind::TwoQubitComposition
        } else {
            InstructionKind::Custom
        }
    }

    pub fn named_gates(&self) -> impl Iterator<Item = &Signature> {
        self.two_qubit_gates
            .values()
            .chain(self.single_qubit_gates.values())
    }

    pub fn non_gates(&self) -> impl Iterator<Item = &Signature> {
        self.non_gates.values()
    }

    /// Every instruction descriptor to register in an instruction table:
    /// each named gate, `1q_<gate>` and `2q_<gate>` for each single-qubit gate,
    /// then each non-gate instruction.
    pub fn instructions(&self) -> Result<Vec<Instruction>, TypeSpecError> {
        let mut instructions = Vec::new();
        for sig in self.named_gates() {
            for spec in sig.operand_specs() {
                instructions.push(Instruction::from_spec(
                    sig.name(),
                    Some(spec.as_str()),
                    InstructionKind::NamedGate,
                )?);
            }
        }
        for sig in self.single_qubit_gates.values() {
            let composed = format!("{SINGLE_QUBIT_COMPOSITION_PREFIX}_{}", sig.name());
            for spec in sig.operand_specs() {
                instructions.push(Instruction::from_spec(
                    &composed,
                    Some(spec.as_str()),
                    InstructionKind::SingleQubitComposition,
                )?);
            }
        }
        for sig in self.single_qubit_gates.values() {
            let composed = format!("{TWO_QUBIT_COMPOSITION_PREFIX}_{}", sig.name());
            for spec in sig.operand_specs() {
                for control in ["Q", "V"] {
                    let operands = format!("{control}{spec}");
                    instructions.push(Instruction::from_spec(
                        &composed,
                        Some(operands.as_str()),
                        InstructionKind::TwoQubitComposition,
                    )?);
                }
            }
        }
        for sig in self.non_gates() {
            for spec in sig.operand_specs() {
                instructions.push(Instruction::from_spec(
                    sig.name(),
                    Some(spec.as_str()),
                    InstructionKind::NonGate,
                )?);
            }
        }
        Ok(instructions)
    }

    pub fn gate_modifiers(&self) -> Result<Vec<GateModifier>, TypeSpecError> {
        self.gate_modifiers
            .values()
            .map(|modifier| {
                let param_type = modifier.param_type.map(types::from_spec_char).transpose()?;
                Ok(GateModifier::new(&modifier.name, param_type, modifier.two_qubit))
            })
            .collect()
    }
}
