use std::f64::consts::{E, PI, TAU};

use crate::eval::prelude::EvalErrorType;

pub type BuiltinFn = fn(&[f64]) -> Result<f64, EvalErrorType>;

/// A native function callable from expressions.
///
/// `call` may assume it receives exactly `arity` arguments; the evaluator
/// checks the count before calling.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: usize,
    pub description: &'static str,
    pub call: BuiltinFn,
}

pub const CONSTANTS: &[(&str, f64)] = &[
    ("e", E),
    ("pi", PI),
    ("tau", TAU),
];

pub const BUILTINS: &[Builtin] = &[
    Builtin { name: "sin", arity: 1, description: "Sine (radians)", call: sin },
    Builtin { name: "cos", arity: 1, description: "Cosine (radians)", call: cos },
    Builtin { name: "tan", arity: 1, description: "Tangent (radians)", call: tan },
    Builtin { name: "asin", arity: 1, description: "Inverse sine", call: asin },
    Builtin { name: "acos", arity: 1, description: "Inverse cosine", call: acos },
    Builtin { name: "atan", arity: 1, description: "Inverse tangent", call: atan },
    Builtin { name: "sinh", arity: 1, description: "Hyperbolic sine", call: sinh },
    Builtin { name: "cosh", arity: 1, description: "Hyperbolic cosine", call: cosh },
    Builtin { name: "tanh", arity: 1, description: "Hyperbolic tangent", call: tanh },
    Builtin { name: "asinh", arity: 1, description: "Inverse hyperbolic sine", call: asinh },
    Builtin { name: "acosh", arity: 1, description: "Inverse hyperbolic cosine", call: acosh },
    Builtin { name: "atanh", arity: 1, description: "Inverse hyperbolic tangent", call: atanh },
    Builtin { name: "sqrt", arity: 1, description: "Square root", call: sqrt },
    Builtin { name: "cbrt", arity: 1, description: "Cube root", call: cbrt },
    Builtin { name: "exp", arity: 1, description: "Exponential (e^x)", call: exp },
    Builtin { name: "ln", arity: 1, description: "Natural logarithm", call: ln },
    Builtin { name: "log", arity: 1, description: "Base-10 logarithm", call: log },
    Builtin { name: "log2", arity: 1, description: "Base-2 logarithm", call: log2 },
    Builtin { name: "abs", arity: 1, description: "Absolute value", call: abs },
    Builtin { name: "floor", arity: 1, description: "Round down", call: floor },
    Builtin { name: "ceil", arity: 1, description: "Round up", call: ceil },
    Builtin { name: "round", arity: 1, description: "Round to nearest, halves away from zero", call: round },
    Builtin { name: "trunc", arity: 1, description: "Truncate fractional part", call: trunc },
    Builtin { name: "pow", arity: 2, description: "Power, same as `^`", call: pow },
    Builtin { name: "fmod", arity: 2, description: "Floating-point remainder, same as `%`", call: fmod },
    Builtin { name: "atan2", arity: 2, description: "Quadrant-aware arctangent of y/x", call: atan2 },
];

pub fn find_builtin(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

pub fn find_constant(name: &str) -> Option<f64> {
    CONSTANTS.iter()
        .find(|(constant, _)| *constant == name)
        .map(|(_, value)| *value)
}

fn domain_error(operation: &str, requirement: &'static str) -> EvalErrorType {
    EvalErrorType::DomainError {
        operation: operation.to_string(),
        requirement
    }
}

/// Generates a one-argument builtin forwarding to the `f64` method of the
/// same name, optionally guarded by a domain check on the argument.
macro_rules! unary_builtin {
    ($fname:ident, $method:ident) => {
        fn $fname(args: &[f64]) -> Result<f64, EvalErrorType> {
            Ok(args[0].$method())
        }
    };
    ($fname:ident, $method:ident, |$x:ident| $domain:expr, $requirement:literal) => {
        fn $fname(args: &[f64]) -> Result<f64, EvalErrorType> {
            let $x = args[0];

            if !($domain) {
                return Err(domain_error(stringify!($fname), $requirement));
            }

            Ok($x.$method())
        }
    };
}

unary_builtin!(sin, sin);
unary_builtin!(cos, cos);
unary_builtin!(tan, tan);
unary_builtin!(asin, asin, |x| (-1.0..=1.0).contains(&x), "argument must be within [-1, 1]");
unary_builtin!(acos, acos, |x| (-1.0..=1.0).contains(&x), "argument must be within [-1, 1]");
unary_builtin!(atan, atan);
unary_builtin!(sinh, sinh);
unary_builtin!(cosh, cosh);
unary_builtin!(tanh, tanh);
unary_builtin!(asinh, asinh);
unary_builtin!(acosh, acosh, |x| x >= 1.0, "argument must be at least 1");
unary_builtin!(atanh, atanh, |x| x > -1.0 && x < 1.0, "argument must be within (-1, 1)");
unary_builtin!(sqrt, sqrt, |x| x >= 0.0, "argument must not be negative");
unary_builtin!(cbrt, cbrt);
unary_builtin!(exp, exp);
unary_builtin!(ln, ln, |x| x > 0.0, "argument must be positive");
unary_builtin!(log, log10, |x| x > 0.0, "argument must be positive");
unary_builtin!(log2, log2, |x| x > 0.0, "argument must be positive");
unary_builtin!(abs, abs);
unary_builtin!(floor, floor);
unary_builtin!(ceil, ceil);
unary_builtin!(round, round);
unary_builtin!(trunc, trunc);

fn pow(args: &[f64]) -> Result<f64, EvalErrorType> {
    power("pow", args[0], args[1])
}

fn fmod(args: &[f64]) -> Result<f64, EvalErrorType> {
    remainder(args[0], args[1])
}

fn atan2(args: &[f64]) -> Result<f64, EvalErrorType> {
    Ok(args[0].atan2(args[1]))
}

/// Real power shared by `^` and `pow`.
pub fn power(operation: &str, base: f64, exponent: f64) -> Result<f64, EvalErrorType> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalErrorType::DivisionByZero { reason: "zero raised to a negative power" });
    }

    let value = base.powf(exponent);

    if value.is_nan() && !base.is_nan() && !exponent.is_nan() {
        return Err(domain_error(operation, "result would be complex"));
    }

    Ok(value)
}

/// Remainder with the sign of the dividend, shared by `%` and `fmod`.
pub fn remainder(dividend: f64, divisor: f64) -> Result<f64, EvalErrorType> {
    if divisor == 0.0 {
        return Err(EvalErrorType::DivisionByZero { reason: "modulo by zero" });
    }

    Ok(dividend % divisor)
}
