
pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        evaluate
    };
}

use crate::{
    environment::prelude::{power, remainder, Environment},
    parser::prelude::{Assignment, Binary, BinaryOperator, Call, Expression, Unary, UnaryOperator},
    utils::prelude::SrcSpan
};

use error::{EvalError, EvalErrorType};

/// Evaluates one parsed line against `env`.
///
/// Only assignments touch the environment, and only once their right-hand
/// side has produced a value. Recording `_` is left to the caller.
pub fn evaluate(expression: &Expression, env: &mut Environment) -> Result<f64, EvalError> {
    match expression {
        Expression::Number { value, .. } => Ok(*value),
        Expression::Variable(ident) => env.get(&ident.value)
            .map_err(|error| error.at(ident.location)),
        Expression::Unary(unary) => eval_unary(unary, env),
        Expression::Binary(binary) => eval_binary(binary, env),
        Expression::Call(call) => eval_call(call, env),
        Expression::Assignment(assignment) => eval_assignment(assignment, env),
    }
}

fn eval_unary(unary: &Unary, env: &mut Environment) -> Result<f64, EvalError> {
    let operand = evaluate(&unary.operand, env)?;

    match unary.operator {
        UnaryOperator::Neg => Ok(-operand),
        UnaryOperator::Pos => Ok(operand),
    }
}

fn eval_binary(binary: &Binary, env: &mut Environment) -> Result<f64, EvalError> {
    let left = evaluate(&binary.left, env)?;
    let right = evaluate(&binary.right, env)?;

    let value = match binary.operator {
        BinaryOperator::Add => left + right,
        BinaryOperator::Sub => left - right,
        BinaryOperator::Mul => left * right,
        BinaryOperator::Div => {
            if right == 0.0 {
                return Err(
                    EvalErrorType::DivisionByZero { reason: "division by zero" }
                        .at(binary.right.location())
                );
            }

            left / right
        },
        BinaryOperator::Mod => remainder(left, right)
            .map_err(|error| error.at(binary.right.location()))?,
        BinaryOperator::Pow => power("^", left, right)
            .map_err(|error| error.at(binary.location))?,
    };

    check_nan(value, &[left, right], binary.operator.as_literal(), binary.location)
}

fn eval_call(call: &Call, env: &mut Environment) -> Result<f64, EvalError> {
    let builtin = env.lookup_function(&call.name.value)
        .map_err(|error| error.at(call.name.location))?;

    if builtin.arity != call.arguments.len() {
        return Err(EvalErrorType::ArityMismatch {
            name: builtin.name.to_string(),
            expected: builtin.arity,
            found: call.arguments.len()
        }.at(call.location));
    }

    let arguments = call.arguments.iter()
        .map(|argument| evaluate(argument, env))
        .collect::<Result<Vec<f64>, EvalError>>()?;

    let value = (builtin.call)(&arguments)
        .map_err(|error| error.at(call.location))?;

    check_nan(value, &arguments, builtin.name, call.location)
}

fn eval_assignment(assignment: &Assignment, env: &mut Environment) -> Result<f64, EvalError> {
    let targets = assignment.targets();

    for target in &targets {
        env.check_assignable(&target.value)
            .map_err(|error| error.at(target.location))?;
    }

    let value = evaluate(assignment.source(), env)?;

    for target in targets {
        env.set(&target.value, value)
            .map_err(|error| error.at(target.location))?;
    }

    Ok(value)
}

/// NaN only propagates, it is never produced: `inf - inf` and friends
/// become domain errors.
fn check_nan(value: f64, inputs: &[f64], operation: &str, location: SrcSpan) -> Result<f64, EvalError> {
    if value.is_nan() && !inputs.iter().any(|input| input.is_nan()) {
        return Err(EvalErrorType::DomainError {
            operation: operation.to_string(),
            requirement: "result is not a number"
        }.at(location));
    }

    Ok(value)
}
