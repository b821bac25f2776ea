use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::EvalError,
    parser::prelude::{ParseError, ParseErrorType},
};
use super::diagnostic::{Diagnostic, Label, Location, Severity};

/// Everything that can go wrong with one input line.
///
/// `path` is empty for lines typed at the prompt and `src` is the line
/// itself, so a diagnostic can always be rendered against it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse input")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("evaluation failed")]
    Eval {
        path: PathBuf,
        src: String,
        error: EvalError
    },
    #[error("{message}")]
    Command {
        message: String
    },
    #[error("cannot read script `{}`", .path.display())]
    Script {
        path: PathBuf,
        err: std::io::ErrorKind
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo { err: value.kind() }
    }
}

impl Error {
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command { message: message.into() }
    }

    /// The one-line rendering printed on stdout.
    pub fn message(&self) -> String {
        match self {
            Error::Parse { src, error, .. } => {
                let column = error.span.column(src);
                let (message, _) = error.details();

                match error.error {
                    ParseErrorType::LexError { .. } => format!("Lexical error at column {column}: {message}"),
                    _ => format!("Syntax error at column {column}: {message}"),
                }
            },
            Error::Eval { src, error, .. } => {
                let column = error.location.column(src);
                let (message, _) = error.details();

                format!("Evaluation error [{}] at column {column}: {message}", error.kind())
            },
            Error::Command { message } => format!("Command error: {message}"),
            Error::Script { path, err } => {
                format!("Command error: cannot read `{}`: {err}", path.display())
            },
            Error::StdIo { err } => format!("I/O error: {err}"),
        }
    }

    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        let _ = self.pretty(&mut nocolor);
        String::from_utf8_lossy(nocolor.as_slice()).into_owned()
    }

    pub fn pretty(&self, buf: &mut Buffer) -> std::io::Result<()> {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf)?;
            writeln!(buf)?;
        }

        Ok(())
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic<'_>> {
        match self {
            Error::Parse { path, src, error } => {
                let (label, hints) = error.details();

                let title = match error.error {
                    ParseErrorType::LexError { .. } => "Lexical error",
                    _ => "Syntax error",
                };

                vec![Diagnostic {
                    title: title.into(),
                    hints,
                    severity: Severity::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label),
                            span: error.span,
                        },
                    }),
                }]
            },
            Error::Eval { path, src, error } => {
                let (label, hints) = error.details();

                vec![Diagnostic {
                    title: format!("Evaluation error [{}]", error.kind()),
                    hints,
                    severity: Severity::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label),
                            span: error.location,
                        },
                    }),
                }]
            },
            Error::Command { message } => {
                vec![Diagnostic {
                    title: message.clone(),
                    hints: vec!["Type `help` to list the commands".into()],
                    severity: Severity::Error,
                    location: None,
                }]
            },
            Error::Script { err, .. } => {
                vec![Diagnostic {
                    title: self.to_string(),
                    hints: vec![format!("{err}")],
                    severity: Severity::Error,
                    location: None,
                }]
            },
            Error::StdIo { err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    hints: vec![format!("{err}")],
                    severity: Severity::Error,
                    location: None,
                }]
            }
        }
    }
}
