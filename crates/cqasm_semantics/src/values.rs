// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Values appearing as operands and arguments in the ASG: constants,
// references to storage, and calls whose result is only known at runtime.
// Every value has a type and an element count that can be computed without
// evaluating anything.

use itertools::Itertools;
use std::borrow::Cow;
use std::fmt;

use crate::asg::VariableId;
use crate::function::CoreFunction;
use crate::primitives::{Complex64, Matrix};
use crate::semantic_error::{SemanticError, SemanticResult};
use crate::types::{promote_check, type_check, Assignable, Size, Type, Types};

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    ConstBool(bool),
    ConstInt(i64),
    ConstFloat(f64),
    ConstComplex(Complex64),
    ConstAxis([f64; 3]),
    ConstString(String),
    ConstJson(String),
    ConstBoolArray(Vec<bool>),
    ConstIntArray(Vec<i64>),
    ConstFloatArray(Vec<f64>),
    ConstRealMatrix(Matrix<f64>),
    ConstComplexMatrix(Matrix<Complex64>),
    VariableRef(VariableRef),
    IndexRef(IndexRef),
    FunctionCall(FunctionCall),
}

pub type Values = Vec<Value>;

/// Reference to a whole variable. `typ` is the declared type of the variable
/// at the time the reference was made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableRef {
    variable: VariableId,
    typ: Type,
}

impl VariableRef {
    pub fn new(variable: VariableId, typ: Type) -> VariableRef {
        VariableRef { variable, typ }
    }

    pub fn variable(&self) -> VariableId {
        self.variable
    }

    pub fn variable_type(&self) -> &Type {
        &self.typ
    }
}

/// Selected elements of an array variable, e.g. `q[0, 2]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexRef {
    variable: VariableId,
    typ: Type,
    indices: Vec<i64>,
}

impl IndexRef {
    /// `typ` is the declared type of the variable and must be an array type.
    pub fn new(variable: VariableId, typ: Type, indices: Vec<i64>) -> SemanticResult<IndexRef> {
        if !typ.is_array() {
            return Err(SemanticError::type_error(format!(
                "indexation is not supported for value of type '{typ}'"
            )));
        }
        Ok(IndexRef {
            variable,
            typ,
            indices,
        })
    }

    pub fn variable(&self) -> VariableId {
        self.variable
    }

    pub fn variable_type(&self) -> &Type {
        &self.typ
    }

    pub fn indices(&self) -> &[i64] {
        &self.indices
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
    function: CoreFunction,
    arguments: Values,
}

impl FunctionCall {
    pub fn new(function: CoreFunction, arguments: Values) -> FunctionCall {
        FunctionCall {
            function,
            arguments,
        }
    }

    pub fn function(&self) -> &CoreFunction {
        &self.function
    }

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }
}

impl Value {
    /// True for compile-time constants.
    pub fn is_constant(&self) -> bool {
        !matches!(
            self,
            Value::VariableRef(..) | Value::IndexRef(..) | Value::FunctionCall(..)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::ConstBool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::ConstInt(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::ConstFloat(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<Complex64> {
        match self {
            Value::ConstComplex(z) => Some(*z),
            _ => None,
        }
    }

    /// The variable referred to, if this is a storage reference.
    pub fn referenced_variable(&self) -> Option<VariableId> {
        match self {
            Value::VariableRef(r) => Some(r.variable()),
            Value::IndexRef(r) => Some(r.variable()),
            _ => None,
        }
    }
}

/// Type of `value`.
///
/// An index reference selecting a single element has the element type of the
/// variable's array type. Selecting several elements gives the array type
/// narrowed to that count.
pub fn type_of(value: &Value) -> Type {
    use Assignable::False as F;
    match value {
        Value::ConstBool(_) => Type::Bool(F),
        Value::ConstInt(_) => Type::Int(F),
        Value::ConstFloat(_) => Type::Float(F),
        Value::ConstComplex(_) => Type::Complex(F),
        Value::ConstAxis(_) => Type::Axis(F),
        Value::ConstString(_) => Type::String(F),
        Value::ConstJson(_) => Type::Json(F),
        Value::ConstBoolArray(v) => Type::BoolArray(v.len() as Size, F),
        Value::ConstIntArray(v) => Type::IntArray(v.len() as Size, F),
        Value::ConstFloatArray(v) => Type::FloatArray(v.len() as Size, F),
        Value::ConstRealMatrix(m) => Type::RealMatrix(m.rows() as Size, m.cols() as Size, F),
        Value::ConstComplexMatrix(m) => {
            Type::ComplexMatrix(m.rows() as Size, m.cols() as Size, F)
        }
        Value::VariableRef(r) => r.typ.clone(),
        Value::IndexRef(r) => {
            if r.indices.len() == 1 {
                // `IndexRef::new` only accepts array types.
                r.typ.element_type().unwrap_or_else(|| r.typ.clone())
            } else {
                r.typ.with_size(r.indices.len() as Size)
            }
        }
        Value::FunctionCall(call) => call.function.return_type().clone(),
    }
}

pub fn types_of(values: &[Value]) -> Types {
    values.iter().map(type_of).collect()
}

/// Number of elements of `value`.
pub fn size_of(value: &Value) -> Size {
    match value {
        Value::ConstAxis(_) => 3,
        Value::ConstBoolArray(v) => v.len() as Size,
        Value::ConstIntArray(v) => v.len() as Size,
        Value::ConstFloatArray(v) => v.len() as Size,
        Value::ConstRealMatrix(m) => (m.rows() * m.cols()) as Size,
        Value::ConstComplexMatrix(m) => (m.rows() * m.cols()) as Size,
        Value::VariableRef(r) => r.typ.size(),
        Value::IndexRef(r) => r.indices.len() as Size,
        Value::FunctionCall(call) => call.function.return_type().size(),
        _ => 1,
    }
}

fn bool_to_float(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Type-check and, if necessary, promote `value` to `typ`.
///
/// Returns the value itself, borrowed, if it already satisfies `typ`.
/// Constants fold into a new constant of the promoted type. References and
/// call results cannot be refolded during analysis, so for them promotion is
/// only a check and the value is returned unchanged.
/// Returns `None` if no rule applies.
pub fn promote<'a>(value: &'a Value, typ: &Type) -> Option<Cow<'a, Value>> {
    if type_check(typ, &type_of(value)) {
        return Some(Cow::Borrowed(value));
    }
    if !value.is_constant() {
        return promote_check(&type_of(value), typ).then_some(Cow::Borrowed(value));
    }
    if typ.is_assignable() {
        return None;
    }
    let fits = |n: usize| match typ.size() {
        s if s < 0 => true,
        s => s == n as Size,
    };
    let promoted = match (value, typ) {
        (Value::ConstBool(b), Type::Int(_)) => Value::ConstInt(i64::from(*b)),
        (Value::ConstBool(b), Type::Float(_)) => Value::ConstFloat(bool_to_float(*b)),
        (Value::ConstBool(b), Type::Complex(_)) => {
            Value::ConstComplex(Complex64::new(bool_to_float(*b), 0.0))
        }
        (Value::ConstInt(i), Type::Float(_)) => Value::ConstFloat(*i as f64),
        (Value::ConstInt(i), Type::Complex(_)) => {
            Value::ConstComplex(Complex64::new(*i as f64, 0.0))
        }
        (Value::ConstFloat(x), Type::Complex(_)) => Value::ConstComplex(Complex64::new(*x, 0.0)),
        (Value::ConstBoolArray(v), Type::IntArray(..)) if fits(v.len()) => {
            Value::ConstIntArray(v.iter().map(|b| i64::from(*b)).collect())
        }
        (Value::ConstBoolArray(v), Type::FloatArray(..)) if fits(v.len()) => {
            Value::ConstFloatArray(v.iter().map(|b| bool_to_float(*b)).collect())
        }
        (Value::ConstIntArray(v), Type::FloatArray(..)) if fits(v.len()) => {
            Value::ConstFloatArray(v.iter().map(|i| *i as f64).collect())
        }
        (Value::ConstBoolArray(v), Type::Axis(_)) if v.len() == 3 => {
            Value::ConstAxis([bool_to_float(v[0]), bool_to_float(v[1]), bool_to_float(v[2])])
        }
        (Value::ConstIntArray(v), Type::Axis(_)) if v.len() == 3 => {
            Value::ConstAxis([v[0] as f64, v[1] as f64, v[2] as f64])
        }
        (Value::ConstFloatArray(v), Type::Axis(_)) if v.len() == 3 => {
            Value::ConstAxis([v[0], v[1], v[2]])
        }
        (Value::ConstRealMatrix(m), Type::ComplexMatrix(..))
            if promote_check(&type_of(value), typ) =>
        {
            Value::ConstComplexMatrix(m.map(|x| Complex64::new(*x, 0.0)))
        }
        _ => return None,
    };
    Some(Cow::Owned(promoted))
}

/// Fails with `ConstantRequired` unless `value` is known at analysis time.
pub fn check_const(value: &Value) -> SemanticResult<()> {
    if value.is_constant() {
        Ok(())
    } else {
        Err(SemanticError::constant_required(
            "dynamic values are not supported here",
        ))
    }
}

pub fn check_all_const(values: &[Value]) -> SemanticResult<()> {
    values.iter().try_for_each(check_const)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::ConstBool(b) => write!(f, "{b}"),
            Value::ConstInt(i) => write!(f, "{i}"),
            Value::ConstFloat(x) => write!(f, "{x}"),
            Value::ConstComplex(z) => write!(f, "{z}"),
            Value::ConstAxis([x, y, z]) => write!(f, "[{x}, {y}, {z}]"),
            Value::ConstString(s) => write!(f, "{s:?}"),
            Value::ConstJson(s) => write!(f, "{s}"),
            Value::ConstBoolArray(v) => write!(f, "{{{}}}", v.iter().join(", ")),
            Value::ConstIntArray(v) => write!(f, "{{{}}}", v.iter().join(", ")),
            Value::ConstFloatArray(v) => write!(f, "{{{}}}", v.iter().join(", ")),
            Value::ConstRealMatrix(m) => write!(f, "{m}"),
            Value::ConstComplexMatrix(m) => write!(f, "{m}"),
            Value::VariableRef(r) => write!(f, "var#{}", usize::from(r.variable)),
            Value::IndexRef(r) => write!(
                f,
                "var#{}[{}]",
                usize::from(r.variable),
                r.indices.iter().join(", ")
            ),
            Value::FunctionCall(call) => write!(
                f,
                "{}({})",
                call.function.name(),
                call.arguments.iter().join(", ")
            ),
        }
    }
}
