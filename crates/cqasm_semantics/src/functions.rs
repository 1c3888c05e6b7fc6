// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Default constants, operators and functions of cQASM 3.0.
//
// Operators are functions named `operator<symbol>`, e.g. `operator+`.
// Each operator and function is registered twice: as a consteval function
// that folds constant arguments, and as a core function with the same
// signature that is used when an argument is only known at runtime.
// Overloads are registered bool first, then int, then float, so that the
// first matching overload is the narrowest one.

use std::f64::consts::{E, PI, TAU};

use crate::function::{ConstEvalFunction, CoreFunction};
use crate::primitives::Complex64;
use crate::scope::Scope;
use crate::semantic_error::{SemanticError, SemanticResult, TypeSpecError};
use crate::types::{Assignable, Type};
use crate::values::{check_all_const, type_of, Value};

pub fn register_default_constants(scope: &mut Scope) {
    let table = &mut scope.variable_table;
    table.add("true", Value::ConstBool(true));
    table.add("false", Value::ConstBool(false));
    table.add("pi", Value::ConstFloat(PI));
    table.add("eu", Value::ConstFloat(E));
    table.add("tau", Value::ConstFloat(TAU));
    table.add("im", Value::ConstComplex(Complex64::new(0.0, 1.0)));
}

//
// Argument payloads
//

// Payloads of exactly `N` constant arguments.
fn payloads<T, const N: usize>(
    args: &[Value],
    get: fn(&Value) -> Option<T>,
    what: &str,
) -> SemanticResult<[T; N]>
where
    T: Copy + Default,
{
    check_all_const(args)?;
    if args.len() != N {
        return Err(SemanticError::type_error(format!(
            "expected {N} argument(s), got {}",
            args.len()
        )));
    }
    let mut out = [T::default(); N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = get(arg).ok_or_else(|| {
            SemanticError::type_error(format!("expected {what} argument, got {}", type_of(arg)))
        })?;
    }
    Ok(out)
}

fn bools<const N: usize>(args: &[Value]) -> SemanticResult<[bool; N]> {
    payloads(args, Value::as_bool, "a bool")
}

fn ints<const N: usize>(args: &[Value]) -> SemanticResult<[i64; N]> {
    payloads(args, Value::as_int, "an int")
}

fn floats<const N: usize>(args: &[Value]) -> SemanticResult<[f64; N]> {
    payloads(args, Value::as_float, "a float")
}

fn complexes<const N: usize>(args: &[Value]) -> SemanticResult<[Complex64; N]> {
    payloads(args, Value::as_complex, "a complex")
}

fn overflow(op: &str) -> SemanticError {
    SemanticError::evaluation(format!("integer overflow in '{op}'"))
}

fn division_by_zero() -> SemanticError {
    SemanticError::evaluation("division by zero")
}

// Integer division rounding toward negative infinity.
fn div_floor(a: i64, b: i64) -> SemanticResult<i64> {
    if b == 0 {
        return Err(division_by_zero());
    }
    let q = a.checked_div(b).ok_or_else(|| overflow("/"))?;
    if (a % b != 0) && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

// Floored modulo: the result has the sign of the divisor.
fn mod_floor(a: i64, b: i64) -> SemanticResult<i64> {
    if b == 0 {
        return Err(division_by_zero());
    }
    let r = a.checked_rem(b).ok_or_else(|| overflow("%"))?;
    if r != 0 && ((r < 0) != (b < 0)) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

fn shift_amount(b: i64) -> SemanticResult<u32> {
    u32::try_from(b)
        .ok()
        .filter(|b| *b < i64::BITS)
        .ok_or_else(|| SemanticError::evaluation(format!("invalid shift amount {b}")))
}

//
// Registration
//

struct Registrar<'a> {
    scope: &'a mut Scope,
}

impl Registrar<'_> {
    /// Register the consteval function and its core twin.
    fn add<F>(&mut self, name: &str, params: &str, ret: char, f: F) -> Result<(), TypeSpecError>
    where
        F: Fn(&[Value]) -> SemanticResult<Value> + Send + Sync + 'static,
    {
        let function = CoreFunction::from_spec(name, params, ret)?;
        self.add_typed(function, f);
        Ok(())
    }

    fn add_typed<F>(&mut self, function: CoreFunction, f: F)
    where
        F: Fn(&[Value]) -> SemanticResult<Value> + Send + Sync + 'static,
    {
        self.scope.consteval_function_table.add(
            function.name(),
            function.param_types().to_vec(),
            ConstEvalFunction::new(f),
        );
        self.scope.core_function_table.add(function);
    }

    fn float_fn(&mut self, name: &str, f: fn(f64) -> f64) -> Result<(), TypeSpecError> {
        self.add(name, "f", 'f', move |args| {
            let [x] = floats::<1>(args)?;
            Ok(Value::ConstFloat(f(x)))
        })
    }
}

/// Register the default operators and functions, both the consteval
/// versions and the core versions.
pub fn register_default_functions(scope: &mut Scope) -> Result<(), TypeSpecError> {
    let mut reg = Registrar { scope };
    register_operators(&mut reg)?;
    register_math_functions(&mut reg)?;
    register_complex_functions(&mut reg);
    Ok(())
}

fn register_operators(reg: &mut Registrar<'_>) -> Result<(), TypeSpecError> {
    use Value::{ConstBool, ConstFloat, ConstInt};

    // Unary
    reg.add("operator-", "i", 'i', |args| {
        let [a] = ints::<1>(args)?;
        a.checked_neg().map(ConstInt).ok_or_else(|| overflow("-"))
    })?;
    reg.add("operator-", "f", 'f', |args| {
        let [a] = floats::<1>(args)?;
        Ok(ConstFloat(-a))
    })?;
    reg.add("operator~", "i", 'i', |args| {
        let [a] = ints::<1>(args)?;
        Ok(ConstInt(!a))
    })?;
    reg.add("operator!", "b", 'b', |args| {
        let [a] = bools::<1>(args)?;
        Ok(ConstBool(!a))
    })?;

    // Arithmetic
    reg.add("operator+", "ii", 'i', |args| {
        let [a, b] = ints::<2>(args)?;
        a.checked_add(b).map(ConstInt).ok_or_else(|| overflow("+"))
    })?;
    reg.add("operator+", "ff", 'f', |args| {
        let [a, b] = floats::<2>(args)?;
        Ok(ConstFloat(a + b))
    })?;
    reg.add("operator-", "ii", 'i', |args| {
        let [a, b] = ints::<2>(args)?;
        a.checked_sub(b).map(ConstInt).ok_or_else(|| overflow("-"))
    })?;
    reg.add("operator-", "ff", 'f', |args| {
        let [a, b] = floats::<2>(args)?;
        Ok(ConstFloat(a - b))
    })?;
    reg.add("operator*", "ii", 'i', |args| {
        let [a, b] = ints::<2>(args)?;
        a.checked_mul(b).map(ConstInt).ok_or_else(|| overflow("*"))
    })?;
    reg.add("operator*", "ff", 'f', |args| {
        let [a, b] = floats::<2>(args)?;
        Ok(ConstFloat(a * b))
    })?;
    reg.add("operator/", "ii", 'i', |args| {
        let [a, b] = ints::<2>(args)?;
        div_floor(a, b).map(ConstInt)
    })?;
    reg.add("operator/", "ff", 'f', |args| {
        let [a, b] = floats::<2>(args)?;
        Ok(ConstFloat(a / b))
    })?;
    reg.add("operator%", "ii", 'i', |args| {
        let [a, b] = ints::<2>(args)?;
        mod_floor(a, b).map(ConstInt)
    })?;
    reg.add("operator**", "ff", 'f', |args| {
        let [a, b] = floats::<2>(args)?;
        Ok(ConstFloat(a.powf(b)))
    })?;

    // Comparison
    macro_rules! comparisons {
        ($($op:literal => $cmp:tt),* $(,)?) => {
            $(
                reg.add(concat!("operator", $op), "bb", 'b', |args| {
                    let [a, b] = bools::<2>(args)?;
                    Ok(ConstBool(a $cmp b))
                })?;
                reg.add(concat!("operator", $op), "ii", 'b', |args| {
                    let [a, b] = ints::<2>(args)?;
                    Ok(ConstBool(a $cmp b))
                })?;
                reg.add(concat!("operator", $op), "ff", 'b', |args| {
                    let [a, b] = floats::<2>(args)?;
                    Ok(ConstBool(a $cmp b))
                })?;
            )*
        };
    }
    comparisons!("==" => ==, "!=" => !=, ">=" => >=, ">" => >, "<=" => <=, "<" => <);

    // Bitwise
    reg.add("operator&", "ii", 'i', |args| {
        let [a, b] = ints::<2>(args)?;
        Ok(ConstInt(a & b))
    })?;
    reg.add("operator^", "ii", 'i', |args| {
        let [a, b] = ints::<2>(args)?;
        Ok(ConstInt(a ^ b))
    })?;
    reg.add("operator|", "ii", 'i', |args| {
        let [a, b] = ints::<2>(args)?;
        Ok(ConstInt(a | b))
    })?;
    reg.add("operator<<", "ii", 'i', |args| {
        let [a, b] = ints::<2>(args)?;
        Ok(ConstInt(a << shift_amount(b)?))
    })?;
    reg.add("operator>>", "ii", 'i', |args| {
        let [a, b] = ints::<2>(args)?;
        Ok(ConstInt(a >> shift_amount(b)?))
    })?;

    // Logical
    reg.add("operator&&", "bb", 'b', |args| {
        let [a, b] = bools::<2>(args)?;
        Ok(ConstBool(a && b))
    })?;
    reg.add("operator^^", "bb", 'b', |args| {
        let [a, b] = bools::<2>(args)?;
        Ok(ConstBool(a != b))
    })?;
    reg.add("operator||", "bb", 'b', |args| {
        let [a, b] = bools::<2>(args)?;
        Ok(ConstBool(a || b))
    })?;

    // Ternary. The branches are already promoted to the overload's type.
    for (params, ret) in [("bbb", 'b'), ("bii", 'i'), ("bff", 'f')] {
        reg.add("operator?:", params, ret, |args| match args {
            [cond, if_true, if_false] => {
                check_all_const(args)?;
                let [cond] = bools::<1>(std::slice::from_ref(cond))?;
                Ok(if cond { if_true.clone() } else { if_false.clone() })
            }
            _ => Err(SemanticError::type_error("expected 3 arguments")),
        })?;
    }
    Ok(())
}

fn register_math_functions(reg: &mut Registrar<'_>) -> Result<(), TypeSpecError> {
    let functions: [(&str, fn(f64) -> f64); 15] = [
        ("sqrt", f64::sqrt),
        ("exp", f64::exp),
        ("log", f64::ln),
        ("sin", f64::sin),
        ("cos", f64::cos),
        ("tan", f64::tan),
        ("sinh", f64::sinh),
        ("cosh", f64::cosh),
        ("tanh", f64::tanh),
        ("asin", f64::asin),
        ("acos", f64::acos),
        ("atan", f64::atan),
        ("asinh", f64::asinh),
        ("acosh", f64::acosh),
        ("atanh", f64::atanh),
    ];
    for (name, f) in functions {
        reg.float_fn(name, f)?;
    }
    reg.add("abs", "i", 'i', |args| {
        let [a] = ints::<1>(args)?;
        a.checked_abs()
            .map(Value::ConstInt)
            .ok_or_else(|| overflow("abs"))
    })?;
    reg.float_fn("abs", f64::abs)
}

// Complex numbers have no shorthand code in cQASM 3, so these are typed out.
fn register_complex_functions(reg: &mut Registrar<'_>) {
    let float = Type::Float(Assignable::False);
    let complex = Type::Complex(Assignable::False);
    reg.add_typed(
        CoreFunction::new("complex", vec![float.clone(), float.clone()], complex.clone()),
        |args| {
            let [re, im] = floats::<2>(args)?;
            Ok(Value::ConstComplex(Complex64::new(re, im)))
        },
    );
    reg.add_typed(
        CoreFunction::new("real", vec![complex.clone()], float.clone()),
        |args| {
            let [z] = complexes::<1>(args)?;
            Ok(Value::ConstFloat(z.re))
        },
    );
    reg.add_typed(CoreFunction::new("imag", vec![complex], float), |args| {
        let [z] = complexes::<1>(args)?;
        Ok(Value::ConstFloat(z.im))
    });
}
