use std::collections::HashMap;

use crate::eval::prelude::EvalErrorType;

use super::builtin::{find_builtin, find_constant, Builtin};

/// Name under which the last successful result is readable.
pub const LAST_RESULT: &str = "_";

/// Variables of one session plus the last result.
///
/// Constants and builtins are static, so only user state lives here.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    store: HashMap<String, f64>,
    last_result: Option<f64>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            last_result: None
        }
    }

    pub fn get(&self, name: &str) -> Result<f64, EvalErrorType> {
        if name == LAST_RESULT {
            return self.last_result.ok_or(EvalErrorType::NoPreviousResult);
        }

        if let Some(value) = find_constant(name) {
            return Ok(value);
        }

        self.store.get(name)
            .copied()
            .ok_or_else(|| EvalErrorType::UndefinedVariable { name: name.to_string() })
    }

    pub fn set(&mut self, name: &str, value: f64) -> Result<(), EvalErrorType> {
        self.check_assignable(name)?;

        self.store.insert(name.to_string(), value);

        Ok(())
    }

    pub fn check_assignable(&self, name: &str) -> Result<(), EvalErrorType> {
        if self.is_reserved(name) {
            return Err(EvalErrorType::ReadOnly { name: name.to_string() });
        }

        Ok(())
    }

    /// `_`, constants and builtin names.
    pub fn is_reserved(&self, name: &str) -> bool {
        name == LAST_RESULT
            || find_constant(name).is_some()
            || find_builtin(name).is_some()
    }

    pub fn lookup_function(&self, name: &str) -> Result<&'static Builtin, EvalErrorType> {
        find_builtin(name).ok_or_else(|| EvalErrorType::UndefinedFunction { name: name.to_string() })
    }

    pub fn record_result(&mut self, value: f64) {
        self.last_result = Some(value);
    }

    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// User variables sorted by name.
    pub fn variables(&self) -> Vec<(&str, f64)> {
        let mut variables = self.store.iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect::<Vec<_>>();

        variables.sort_by(|a, b| a.0.cmp(b.0));

        variables
    }

    pub fn reset(&mut self) {
        self.store.clear();
        self.last_result = None;
    }
}
