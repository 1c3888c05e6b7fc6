// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Defines the types used to annotate values and formal parameters, and the
// rules relating them. All code that decides whether one type may stand in
// for another lives here: `type_check` for exact matching against a formal
// parameter and `promote_check` for implicit promotion.
//
// Array and matrix sizes are `i64`. A negative size is "unconstrained" and
// only appears in formal parameter types, where it matches any actual size.

use boolenum::BoolEnum;
use itertools::Itertools;
use std::fmt;

use crate::semantic_error::{SemanticError, SemanticResult, TypeSpecError};

/// Whether the type refers to storage that may be written (an lvalue).
#[derive(BoolEnum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Assignable {
    True,
    False,
}

pub type Size = i64;

/// Size of a formal parameter that accepts arrays of any length.
pub const UNCONSTRAINED: Size = -1;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    // Scalars
    Bool(Assignable),
    Int(Assignable),
    Float(Assignable),
    Complex(Assignable),
    Axis(Assignable),
    String(Assignable),
    Json(Assignable),
    Qubit(Assignable),
    Bit(Assignable),

    // Arrays
    QubitArray(Size, Assignable),
    BitArray(Size, Assignable),
    BoolArray(Size, Assignable),
    IntArray(Size, Assignable),
    FloatArray(Size, Assignable),

    // Matrices, (rows, cols)
    RealMatrix(Size, Size, Assignable),
    ComplexMatrix(Size, Size, Assignable),
}

pub type Types = Vec<Type>;

impl Type {
    pub fn assignable(&self) -> Assignable {
        use Type::*;
        match self {
            Bool(a) | Int(a) | Float(a) | Complex(a) | Axis(a) | String(a) | Json(a) | Qubit(a)
            | Bit(a) => *a,
            QubitArray(_, a) | BitArray(_, a) | BoolArray(_, a) | IntArray(_, a)
            | FloatArray(_, a) => *a,
            RealMatrix(_, _, a) | ComplexMatrix(_, _, a) => *a,
        }
    }

    pub fn is_assignable(&self) -> bool {
        self.assignable().into()
    }

    /// Same type with the assignable flag replaced.
    pub fn with_assignable(&self, assignable: Assignable) -> Type {
        use Type::*;
        let a = assignable;
        match self {
            Bool(_) => Bool(a),
            Int(_) => Int(a),
            Float(_) => Float(a),
            Complex(_) => Complex(a),
            Axis(_) => Axis(a),
            String(_) => String(a),
            Json(_) => Json(a),
            Qubit(_) => Qubit(a),
            Bit(_) => Bit(a),
            QubitArray(n, _) => QubitArray(*n, a),
            BitArray(n, _) => BitArray(*n, a),
            BoolArray(n, _) => BoolArray(*n, a),
            IntArray(n, _) => IntArray(*n, a),
            FloatArray(n, _) => FloatArray(*n, a),
            RealMatrix(r, c, _) => RealMatrix(*r, *c, a),
            ComplexMatrix(r, c, _) => ComplexMatrix(*r, *c, a),
        }
    }

    /// The value-only (non-assignable) version of this type.
    pub fn to_rvalue(&self) -> Type {
        self.with_assignable(Assignable::False)
    }

    pub fn is_array(&self) -> bool {
        use Type::*;
        matches!(
            self,
            QubitArray(..) | BitArray(..) | BoolArray(..) | IntArray(..) | FloatArray(..)
        )
    }

    pub fn is_quantum(&self) -> bool {
        matches!(self, Type::Qubit(..) | Type::QubitArray(..))
    }

    /// Bits and bit arrays, i.e. measurement registers.
    pub fn is_bit_like(&self) -> bool {
        matches!(self, Type::Bit(..) | Type::BitArray(..))
    }

    /// Raw element count: 1 for scalars, 3 for axis, `rows * cols` for matrices.
    /// Negative for unconstrained formal parameter types.
    pub fn size(&self) -> Size {
        use Type::*;
        match self {
            Axis(_) => 3,
            QubitArray(n, _) | BitArray(n, _) | BoolArray(n, _) | IntArray(n, _)
            | FloatArray(n, _) => *n,
            RealMatrix(r, c, _) | ComplexMatrix(r, c, _) => {
                if *r < 0 || *c < 0 {
                    UNCONSTRAINED
                } else {
                    r * c
                }
            }
            _ => 1,
        }
    }

    /// Same array type with a different number of elements.
    /// Non-array types are returned unchanged.
    pub fn with_size(&self, size: Size) -> Type {
        use Type::*;
        match self {
            QubitArray(_, a) => QubitArray(size, *a),
            BitArray(_, a) => BitArray(size, *a),
            BoolArray(_, a) => BoolArray(size, *a),
            IntArray(_, a) => IntArray(size, *a),
            FloatArray(_, a) => FloatArray(size, *a),
            _ => self.clone(),
        }
    }

    /// The scalar type of the elements of an array type, keeping assignability.
    pub fn element_type(&self) -> Option<Type> {
        use Type::*;
        match self {
            QubitArray(_, a) => Some(Qubit(*a)),
            BitArray(_, a) => Some(Bit(*a)),
            BoolArray(_, a) => Some(Bool(*a)),
            IntArray(_, a) => Some(Int(*a)),
            FloatArray(_, a) => Some(Float(*a)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        use Type::*;
        match self {
            Bool(_) => "bool",
            Int(_) => "int",
            Float(_) => "float",
            Complex(_) => "complex",
            Axis(_) => "axis",
            String(_) => "string",
            Json(_) => "json",
            Qubit(_) => "qubit",
            Bit(_) => "bit",
            QubitArray(..) => "qubit array",
            BitArray(..) => "bit array",
            BoolArray(..) => "bool array",
            IntArray(..) => "int array",
            FloatArray(..) => "float array",
            RealMatrix(..) => "real matrix",
            ComplexMatrix(..) => "complex matrix",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Comma-separated list of type names, as used in resolution diagnostics.
pub fn display_types(types: &[Type]) -> String {
    types.iter().join(", ")
}

// A formal size accepts `actual` if it is unconstrained or equal.
fn size_matches(expected: Size, actual: Size) -> bool {
    expected < 0 || expected == actual
}

/// Returns whether `actual` satisfies the constraints of `expected`.
/// Tags must match, `actual` must be assignable when `expected` is, and
/// constrained sizes must agree.
pub fn type_check(expected: &Type, actual: &Type) -> bool {
    use Type::*;
    if expected.is_assignable() && !actual.is_assignable() {
        return false;
    }
    if std::mem::discriminant(expected) != std::mem::discriminant(actual) {
        return false;
    }
    match (expected, actual) {
        (QubitArray(e, _), QubitArray(n, _))
        | (BitArray(e, _), BitArray(n, _))
        | (BoolArray(e, _), BoolArray(n, _))
        | (IntArray(e, _), IntArray(n, _))
        | (FloatArray(e, _), FloatArray(n, _)) => size_matches(*e, *n),
        (RealMatrix(er, ec, _), RealMatrix(r, c, _))
        | (ComplexMatrix(er, ec, _), ComplexMatrix(r, c, _)) => {
            size_matches(*er, *r) && size_matches(*ec, *c)
        }
        _ => true,
    }
}

//
// Promotion
//

/// Returns whether a value of type `from` may be used where `to` is expected,
/// either directly or through one promotion edge. Edges are listed one by one
/// and are not chained. Promotion produces a new value, so an assignable `to`
/// is only satisfied without promotion.
pub fn promote_check(from: &Type, to: &Type) -> bool {
    use Type::*;
    if type_check(to, from) {
        return true;
    }
    if to.is_assignable() {
        return false;
    }
    match (from, to) {
        (Bool(_), Int(_) | Float(_) | Complex(_)) => true,
        (Int(_), Float(_) | Complex(_)) => true,
        (Float(_), Complex(_)) => true,
        (BoolArray(n, _), IntArray(e, _) | FloatArray(e, _)) => size_matches(*e, *n),
        (IntArray(n, _), FloatArray(e, _)) => size_matches(*e, *n),
        (BoolArray(3, _) | IntArray(3, _) | FloatArray(3, _), Axis(_)) => true,
        (RealMatrix(r, c, _), ComplexMatrix(er, ec, _)) => {
            size_matches(*er, *r) && size_matches(*ec, *c)
        }
        _ => false,
    }
}

/// The element type of an array type.
pub fn element_type_of(typ: &Type) -> SemanticResult<Type> {
    typ.element_type()
        .ok_or_else(|| SemanticError::type_error(format!("type ({typ}) is not of array type")))
}

/// Declared element count of `typ`.
/// Unconstrained formal types have no element count.
pub fn size_of(typ: &Type) -> SemanticResult<Size> {
    match typ.size() {
        n if n < 0 => Err(SemanticError::type_error(format!(
            "size of unconstrained type ({typ}) is not defined"
        ))),
        n => Ok(n),
    }
}

//
// Shorthand type specifications
//

/// Type for one character of a cQASM 3 shorthand specification.
///
/// - `Q` qubit, `B` bit, `V` qubit array, `W` bit array (storage, assignable)
/// - `b` bool, `i` int, `f` float
pub fn from_spec_char(c: char) -> Result<Type, TypeSpecError> {
    use Assignable as A;
    let typ = match c {
        'Q' => Type::Qubit(A::True),
        'B' => Type::Bit(A::True),
        'V' => Type::QubitArray(UNCONSTRAINED, A::True),
        'W' => Type::BitArray(UNCONSTRAINED, A::True),
        'b' => Type::Bool(A::False),
        'i' => Type::Int(A::False),
        'f' => Type::Float(A::False),
        _ => return Err(TypeSpecError::UnknownCode(c)),
    };
    Ok(typ)
}

/// Types for a cQASM 3 shorthand specification, e.g. `"QV"` or `"bff"`.
pub fn from_spec(spec: &str) -> Result<Types, TypeSpecError> {
    spec.chars().map(from_spec_char).collect()
}

/// Types for a cQASM 1 shorthand specification. An uppercase letter makes
/// the parameter assignable. `u` is a unitary over all `Q` operands in `spec`.
pub fn from_spec_v1(spec: &str) -> Result<Types, TypeSpecError> {
    let num_qubits = spec.chars().filter(|c| *c == 'Q').count();
    // The unitary's element count, 4^n, must also fit in a size.
    let unitary_size = u32::try_from(num_qubits)
        .ok()
        .and_then(|n| Size::checked_pow(2, n))
        .filter(|size| size.checked_mul(*size).is_some());
    spec.chars()
        .map(|c| {
            let assignable = Assignable::from(c.is_ascii_uppercase());
            let typ = match c.to_ascii_lowercase() {
                'q' if !c.is_ascii_uppercase() => return Err(TypeSpecError::LowercaseQubit),
                'q' => Type::Qubit(assignable),
                'a' => Type::Axis(assignable),
                'b' => Type::Bool(assignable),
                'i' => Type::Int(assignable),
                'r' => Type::Float(assignable),
                'c' => Type::Complex(assignable),
                'u' => {
                    let size = unitary_size.ok_or(TypeSpecError::TooManyQubits(num_qubits))?;
                    Type::ComplexMatrix(size, size, assignable)
                }
                'm' => Type::RealMatrix(UNCONSTRAINED, UNCONSTRAINED, assignable),
                'n' => Type::ComplexMatrix(UNCONSTRAINED, UNCONSTRAINED, assignable),
                's' => Type::String(assignable),
                'j' => Type::Json(assignable),
                _ => return Err(TypeSpecError::UnknownCode(c)),
            };
            Ok(typ)
        })
        .collect()
}

#[test]
fn test_with_assignable_roundtrip() {
    let typ = Type::IntArray(4, Assignable::True);
    assert_eq!(typ.to_rvalue(), Type::IntArray(4, Assignable::False));
    assert!(typ.to_rvalue().with_assignable(Assignable::True) == typ);
}

#[test]
fn test_matrix_size() {
    assert_eq!(Type::RealMatrix(2, 3, Assignable::False).size(), 6);
    assert_eq!(
        Type::RealMatrix(UNCONSTRAINED, 3, Assignable::False).size(),
        UNCONSTRAINED
    );
}
