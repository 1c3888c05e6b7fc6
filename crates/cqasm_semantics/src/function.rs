// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use itertools::Itertools;
use smol_str::SmolStr;
use std::fmt;
use std::sync::Arc;

use crate::semantic_error::{SemanticResult, TypeSpecError};
use crate::types::{self, Type, Types};
use crate::values::Value;

/// A function known to the language whose result is not computed during
/// analysis. Calls to it become `Value::FunctionCall`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CoreFunction {
    name: SmolStr,
    param_types: Types,
    return_type: Type,
}

impl CoreFunction {
    pub fn new<T: AsRef<str>>(name: T, param_types: Types, return_type: Type) -> CoreFunction {
        CoreFunction {
            name: SmolStr::new(name.as_ref()),
            param_types,
            return_type,
        }
    }

    /// Build from shorthand specifications, e.g. `("operator+", "ii", 'i')`.
    pub fn from_spec<T: AsRef<str>>(
        name: T,
        param_types: &str,
        return_type: char,
    ) -> Result<CoreFunction, TypeSpecError> {
        Ok(CoreFunction::new(
            name,
            types::from_spec(param_types)?,
            types::from_spec_char(return_type)?,
        ))
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn param_types(&self) -> &[Type] {
        &self.param_types
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }
}

impl fmt::Display for CoreFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) -> {}",
            self.name,
            self.param_types.iter().join(", "),
            self.return_type
        )
    }
}

type ConstEvalFn = dyn Fn(&[Value]) -> SemanticResult<Value> + Send + Sync;

/// Native implementation of a function evaluated during analysis.
/// Arguments have already been promoted to the overload's parameter types,
/// but may still be non-constant references; implementations call
/// `values::check_const` before reading payloads.
#[derive(Clone)]
pub struct ConstEvalFunction(Arc<ConstEvalFn>);

impl ConstEvalFunction {
    pub fn new<F>(f: F) -> ConstEvalFunction
    where
        F: Fn(&[Value]) -> SemanticResult<Value> + Send + Sync + 'static,
    {
        ConstEvalFunction(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> SemanticResult<Value> {
        (self.0)(args)
    }
}

impl fmt::Debug for ConstEvalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConstEvalFunction(..)")
    }
}
