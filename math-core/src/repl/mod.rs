#[cfg(test)]
mod tests;

pub mod command;
pub mod format;

pub mod prelude {
    pub use super::{
        command::*,
        format::*,
        Outcome,
        Session,
        State
    };
}

use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use crate::{
    environment::prelude::Environment,
    eval::prelude::evaluate,
    lexer::prelude::tokenize,
    parser::prelude::parse,
    utils::prelude::{DiagnosticEmitter, Error},
};

use command::{builtins_text, constants_text, help_text, history_text, variables_text, Command, HISTORY_LIMIT};
use format::{format_number, strip_comments};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Terminated,
}

/// What one input line produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Value(f64),
    Info(String),
    Error(Error),
    Silent,
    Exit,
}

impl Outcome {
    /// Text written to the output for this outcome, if any.
    pub fn render(&self) -> Option<String> {
        match self {
            Outcome::Value(value) => Some(format_number(*value)),
            Outcome::Info(text) => Some(text.clone()),
            Outcome::Error(error) => Some(error.message()),
            Outcome::Silent | Outcome::Exit => None,
        }
    }
}

/// One interactive session: variables, the last result and the input
/// history, all dropped together when the session ends.
pub struct Session {
    env: Environment,
    history: Vec<String>,
    /// Entries dropped from the front of `history`, keeps numbering stable.
    history_dropped: usize,
    state: State,
    emitter: DiagnosticEmitter,
    in_script: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DiagnosticEmitter::null())
    }
}

impl Session {
    pub fn new(emitter: DiagnosticEmitter) -> Self {
        Self {
            env: Environment::new(),
            history: vec![],
            history_dropped: 0,
            state: State::Running,
            emitter,
            in_script: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Handles one line typed by the user.
    pub fn run_line(&mut self, line: &str) -> Outcome {
        if self.state == State::Terminated {
            return Outcome::Exit;
        }

        let code = strip_comments(line);

        if code.trim().is_empty() {
            return Outcome::Silent;
        }

        self.remember(line.trim_end());

        let outcome = self.dispatch(code, Path::new(""));

        if outcome == Outcome::Exit {
            self.state = State::Terminated;
        }

        outcome
    }

    /// Reads lines until `exit` or end of input, writing every rendered
    /// outcome on its own line.
    ///
    /// Bytes that are not UTF-8 are replaced by U+FFFD and end up as a
    /// lexical error on their line instead of stopping the session.
    pub fn run<R: BufRead, W: Write>(&mut self, mut reader: R, writer: &mut W) -> std::io::Result<()> {
        let mut buf = vec![];

        loop {
            buf.clear();

            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let outcome = self.run_line(line.trim_end_matches(['\n', '\r']));

            if let Some(text) = outcome.render() {
                writeln!(writer, "{text}")?;
                writer.flush()?;
            }

            if outcome == Outcome::Exit {
                break;
            }
        }

        writer.flush()
    }

    /// Runs a script through the same pipeline as typed lines and returns
    /// everything it printed.
    ///
    /// The first failing line ends the script with `line N: <message>`;
    /// `exit` ends only the script. Only a script that cannot be read is
    /// an `Err`.
    pub fn load(&mut self, path: &Path) -> Result<String, Error> {
        let bytes = std::fs::read(path)
            .map_err(|err| Error::Script { path: path.to_path_buf(), err: err.kind() })?;
        let src = String::from_utf8_lossy(&bytes);

        let mut output = vec![];

        self.in_script = true;

        for (index, line) in src.lines().enumerate() {
            let code = strip_comments(line);

            if code.trim().is_empty() {
                continue;
            }

            match self.dispatch(code, path) {
                Outcome::Exit => break,
                Outcome::Error(error) => {
                    output.push(format!("line {}: {}", index + 1, error.message()));
                    break;
                },
                outcome => output.extend(outcome.render()),
            }
        }

        self.in_script = false;

        Ok(output.join("\n"))
    }

    fn remember(&mut self, line: &str) {
        self.history.push(line.to_string());

        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;

            self.history.drain(..excess);
            self.history_dropped += excess;
        }
    }

    fn dispatch(&mut self, code: &str, path: &Path) -> Outcome {
        let outcome = match Command::parse(code.trim()) {
            Some(command) => self.execute(command),
            None => self.evaluate_line(code, path),
        };

        if let Outcome::Error(error) = &outcome {
            self.emitter.emit(error);
        }

        outcome
    }

    fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Help => Outcome::Info(help_text()),
            Command::Vars => Outcome::Info(variables_text(&self.env)),
            Command::Consts => Outcome::Info(constants_text()),
            Command::Builtins => Outcome::Info(builtins_text()),
            Command::History => Outcome::Info(history_text(&self.history, self.history_dropped + 1)),
            Command::Reset => {
                self.env.reset();

                Outcome::Info("State cleared.".to_string())
            },
            Command::Exit => Outcome::Exit,
            Command::Load(_) if self.in_script => {
                Outcome::Error(Error::command("`load` cannot be used inside a script"))
            },
            Command::Load(path) if path.is_empty() => {
                Outcome::Error(Error::command("usage: load <file>"))
            },
            Command::Load(path) => match self.load(&PathBuf::from(path)) {
                Ok(output) if output.is_empty() => Outcome::Silent,
                Ok(output) => Outcome::Info(output),
                Err(error) => Outcome::Error(error),
            },
        }
    }

    fn evaluate_line(&mut self, code: &str, path: &Path) -> Outcome {
        let parsed = match parse(tokenize(code)) {
            Ok(parsed) => parsed,
            Err(error) => return Outcome::Error(Error::Parse {
                path: path.to_path_buf(),
                src: code.to_string(),
                error
            }),
        };

        match evaluate(&parsed.expression, &mut self.env) {
            Ok(value) => {
                self.env.record_result(value);

                Outcome::Value(value)
            },
            Err(error) => Outcome::Error(Error::Eval {
                path: path.to_path_buf(),
                src: code.to_string(),
                error
            }),
        }
    }
}
