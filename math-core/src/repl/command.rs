use crate::environment::prelude::{Environment, BUILTINS, CONSTANTS};

use super::format::format_number;

/// Most recent entries a session keeps for `history`.
pub const HISTORY_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Vars,
    Consts,
    Builtins,
    History,
    Reset,
    /// `load <file>`, the path is empty when none was given.
    Load(String),
    Exit,
}

impl Command {
    /// Recognizes a command line; `line` is already stripped of comments
    /// and trimmed. Anything else is left to the expression pipeline.
    pub fn parse(line: &str) -> Option<Self> {
        let command = match line {
            "help" => Self::Help,
            "vars" => Self::Vars,
            "consts" => Self::Consts,
            "builtins" => Self::Builtins,
            "history" => Self::History,
            "reset" => Self::Reset,
            "exit" | "quit" => Self::Exit,
            "load" => Self::Load(String::new()),
            _ => match line.strip_prefix("load ").map(str::trim) {
                // `load = 5` and `load + 1` are expressions about a variable
                Some(path) if path.starts_with(['=', '+', '-', '*', '/', '%', '^', '(', ')', ',']) => {
                    return None
                },
                Some(path) => Self::Load(path.to_string()),
                None => return None,
            },
        };

        Some(command)
    }
}

pub fn help_text() -> String {
    [
        "Commands:",
        "  help            Show this help",
        "  vars            List user variables",
        "  consts          List built-in constants",
        "  builtins        List built-in functions",
        "  history         Show recent inputs",
        "  reset           Clear variables and the last result",
        "  load <file>     Run a script file",
        "  exit | quit     Exit the REPL",
        "",
        "Expressions:",
        "  +  -  *  /  %  ^  ( )",
        "  name = expression",
        "  f(a, b)",
        "  _   (last result)",
        "  # or // starts a comment",
    ].join("\n")
}

pub fn variables_text(env: &Environment) -> String {
    let variables = env.variables();

    if variables.is_empty() {
        return "No user variables defined.".to_string();
    }

    let mut out = String::from("Variables:");

    for (name, value) in variables {
        out.push_str(&format!("\n  {name} = {}", format_number(value)));
    }

    out
}

pub fn constants_text() -> String {
    let mut constants = CONSTANTS.to_vec();
    constants.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::from("Constants:");

    for (name, value) in constants {
        out.push_str(&format!("\n  {name} = {}", format_number(value)));
    }

    out
}

pub fn builtins_text() -> String {
    let mut builtins = BUILTINS.iter().collect::<Vec<_>>();
    builtins.sort_by(|a, b| a.name.cmp(b.name));

    let mut out = String::from("Built-in functions:");

    for builtin in builtins {
        out.push_str(&format!("\n  {}/{} - {}", builtin.name, builtin.arity, builtin.description));
    }

    out
}

/// Numbers entries starting at `first`.
pub fn history_text(history: &[String], first: usize) -> String {
    if history.is_empty() {
        return "No history entries.".to_string();
    }

    history.iter()
        .enumerate()
        .map(|(index, line)| format!("{: >4}  {line}", first + index))
        .collect::<Vec<String>>()
        .join("\n")
}
