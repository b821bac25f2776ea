use std::fmt::Display;

use crate::utils::prelude::SrcSpan;

/// The coarse error classes reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalErrorKind {
    UndefinedVariable,
    UndefinedFunction,
    ArityMismatch,
    DivisionByZero,
    DomainError,
    ReadOnly,
}

impl Display for EvalErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::UndefinedVariable => "UndefinedVariable",
            Self::UndefinedFunction => "UndefinedFunction",
            Self::ArityMismatch => "ArityMismatch",
            Self::DivisionByZero => "DivisionByZero",
            Self::DomainError => "DomainError",
            Self::ReadOnly => "ReadOnly",
        };

        write!(f, "{kind}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvalErrorType {
    UndefinedVariable {
        name: String
    },
    /// `_` was read before any expression produced a value.
    NoPreviousResult,
    UndefinedFunction {
        name: String
    },
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    DivisionByZero {
        reason: &'static str
    },
    DomainError {
        operation: String,
        requirement: &'static str,
    },
    ReadOnly {
        name: String
    },
}

impl EvalErrorType {
    pub fn kind(&self) -> EvalErrorKind {
        match self {
            Self::UndefinedVariable { .. } | Self::NoPreviousResult => EvalErrorKind::UndefinedVariable,
            Self::UndefinedFunction { .. } => EvalErrorKind::UndefinedFunction,
            Self::ArityMismatch { .. } => EvalErrorKind::ArityMismatch,
            Self::DivisionByZero { .. } => EvalErrorKind::DivisionByZero,
            Self::DomainError { .. } => EvalErrorKind::DomainError,
            Self::ReadOnly { .. } => EvalErrorKind::ReadOnly,
        }
    }

    pub fn at(self, location: SrcSpan) -> EvalError {
        EvalError { error: self, location }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvalError {
    pub error: EvalErrorType,
    pub location: SrcSpan
}

impl EvalError {
    pub fn kind(&self) -> EvalErrorKind {
        self.error.kind()
    }

    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            EvalErrorType::UndefinedVariable { name } => (
                format!("variable `{name}` is not defined"),
                vec![format!("Assign it first, e.g. `{name} = 1`")]
            ),
            EvalErrorType::NoPreviousResult => (
                "`_` has no value yet".to_string(),
                vec!["`_` holds the result of the last successful expression".to_string()]
            ),
            EvalErrorType::UndefinedFunction { name } => (
                format!("function `{name}` is not defined"),
                vec!["Type `builtins` to list the available functions".to_string()]
            ),
            EvalErrorType::ArityMismatch { name, expected, found } => {
                let plural = if *expected == 1 { "" } else { "s" };

                (format!("function `{name}` expects {expected} argument{plural}, got {found}"), vec![])
            },
            EvalErrorType::DivisionByZero { reason } => (reason.to_string(), vec![]),
            EvalErrorType::DomainError { operation, requirement } => (
                format!("`{operation}`: {requirement}"),
                vec![]
            ),
            EvalErrorType::ReadOnly { name } => (
                format!("`{name}` is read-only"),
                vec!["Constants, built-in functions and `_` cannot be assigned".to_string()]
            ),
        }
    }
}
