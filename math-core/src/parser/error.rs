use crate::{lexer::prelude::{LexicalError, Token, TokenKind}, utils::prelude::SrcSpan};
use super::parser::MAX_OPERATORS;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    UnexpectedEol {
        expected: Vec<String>,
    },
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    TooDeeplyNested,
    TooManyOperators,
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            ParseErrorType::UnexpectedEol { expected } => {
                (format!("expected {}, found end of line", join_expected(expected)), vec![])
            },
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = match token.kind {
                    TokenKind::Number => format!("the number `{}`", token.text),
                    TokenKind::Ident => format!("the identifier `{}`", token.text),
                    kind => kind.describe(),
                };

                let hints = match token.kind {
                    TokenKind::Assign => vec![
                        "Assignment is only allowed as `name = expression` at the start of a line".to_string()
                    ],
                    _ => vec![],
                };

                (format!("expected {}, found {found}", join_expected(expected)), hints)
            },
            ParseErrorType::TooDeeplyNested => ("expression is nested too deeply".to_string(), vec![]),
            ParseErrorType::TooManyOperators => (
                format!("expression has more than {MAX_OPERATORS} operators"),
                vec!["Split the computation over several lines using variables".to_string()]
            ),
            ParseErrorType::LexError { error } => error.details()
        }
    }
}

fn join_expected(expected: &[String]) -> String {
    match expected {
        [] => "something else".to_string(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    }
}
