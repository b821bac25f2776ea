use std::fmt::Display;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus, // +
    Minus, // -
    Star, // *
    Slash, // /
    Percent, // %
    Caret, // ^
}

impl Operator {
    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '+' => Self::Plus,
            '-' => Self::Minus,
            '*' => Self::Star,
            '/' => Self::Slash,
            '%' => Self::Percent,
            '^' => Self::Caret,
            _ => return None
        })
    }

    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // <цифра>{<цифра>}[.{<цифра>}][(e|E)[+|-]<цифра>{<цифра>}]
    Number,
    // (<буква>|_){<буква>|<цифра>|_}
    Ident,
    Operator(Operator),
    LParen, // (
    RParen, // )
    Comma, // ,
    Assign, // =

    Eol,
    Invalid,
}

impl TokenKind {
    /// How the kind reads in a diagnostic, e.g. "found a number".
    pub fn describe(&self) -> String {
        match self {
            Self::Number => "a number".to_string(),
            Self::Ident => "an identifier".to_string(),
            Self::Operator(op) => format!("`{}`", op.as_literal()),
            Self::LParen => "`(`".to_string(),
            Self::RParen => "`)`".to_string(),
            Self::Comma => "`,`".to_string(),
            Self::Assign => "`=`".to_string(),
            Self::Eol => "end of line".to_string(),
            Self::Invalid => "an unrecognized character".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub value: Option<f64>,
    pub location: SrcSpan,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SrcSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            value: None,
            location
        }
    }

    pub fn number(text: String, value: f64, location: SrcSpan) -> Self {
        Self {
            kind: TokenKind::Number,
            text,
            value: Some(value),
            location
        }
    }

    pub fn position(&self) -> u32 {
        self.location.start
    }

    pub fn is_operator(&self, operator: Operator) -> bool {
        self.kind == TokenKind::Operator(operator)
    }

    pub fn as_literal(&self) -> String {
        match self.kind {
            TokenKind::Eol => "\\n".to_string(),
            _ => self.text.clone()
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.kind, self.value) {
            (TokenKind::Number, Some(value)) => write!(f, "Number({value}) @ {}", self.location),
            (TokenKind::Eol, _) => write!(f, "Eol @ {}", self.location),
            (kind, _) => write!(f, "{kind:?}({:?}) @ {}", self.text, self.location),
        }
    }
}
