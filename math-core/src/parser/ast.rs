use std::fmt::Display;

use crate::{
    lexer::prelude::{Operator, Token, TokenKind},
    parser::prelude::{InfixParse, Parse, ParseError, Parser, Precedence},
    utils::prelude::SrcSpan
};

pub trait Postfix {
    fn postfix(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub expression: Expression,
    /// Position of the end-of-line token, i.e. where parsing stopped.
    pub end: u32,
}

// expression -> <number> | <identifier> | <call> | <unary> | <binary> | "(" <expression> ")"
// statement  -> <identifier> "=" <statement> | <expression>
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number {
        value: f64,
        location: SrcSpan
    },
    Variable(Identifier),
    Unary(Unary),
    Binary(Binary),
    Call(Call),
    Assignment(Assignment),
}

impl<T: Iterator<Item = Token>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.enter()?;

        let kind = parser.current_token.as_ref().map(|token| token.kind);

        let mut expr = match kind {
            Some(TokenKind::Number) => {
                let (value, location) = parser.expect_number()?;

                Self::Number { value, location }
            },
            Some(TokenKind::Ident) => {
                let identifier = Identifier::from(parser.expect_ident()?);

                if parser.current_is(TokenKind::LParen) {
                    Self::Call(Call::parse_arguments(parser, identifier)?)
                } else {
                    Self::Variable(identifier)
                }
            },
            Some(TokenKind::Operator(Operator::Minus | Operator::Plus)) => {
                Self::Unary(Unary::parse(parser, None)?)
            },
            Some(TokenKind::LParen) => {
                parser.expect_one(TokenKind::LParen)?;

                let expression = Expression::parse(parser, None)?;

                parser.expect_one(TokenKind::RParen)?;

                expression
            },
            _ => return parser.unexpected(vec!["an expression".to_string()])
        };

        while precedence.unwrap_or(Precedence::Lowest) < parser.current_precedence() {
            expr = Self::Binary(Binary::parse(parser, expr, precedence)?);
        }

        parser.leave();

        Ok(expr)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Variable(ident) => write!(f, "{ident}"),
            Self::Unary(unary) => write!(f, "{unary}"),
            Self::Binary(binary) => write!(f, "{binary}"),
            Self::Call(call) => write!(f, "{call}"),
            Self::Assignment(assignment) => write!(f, "{assignment}"),
        }
    }
}

impl Postfix for Expression {
    fn postfix(&self) -> String {
        match self {
            Self::Number { value, .. } => format!("{value}"),
            Self::Variable(ident) => format!("{ident}"),
            Self::Unary(unary) => unary.postfix(),
            Self::Binary(binary) => binary.postfix(),
            Self::Call(call) => call.postfix(),
            Self::Assignment(assignment) => assignment.postfix(),
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Number { location, .. } => *location,
            Self::Variable(ident) => ident.location,
            Self::Unary(unary) => unary.location,
            Self::Binary(binary) => binary.location,
            Self::Call(call) => call.location,
            Self::Assignment(assignment) => assignment.location,
        }
    }
}

// identifier -> (<letter> | _) { (<letter> | <digit> | _) }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Neg,
    Pos,
}

impl UnaryOperator {
    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Pos => "+",
        }
    }
}

// unary -> ("-" | "+") <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for Unary {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (operator, start) = match &parser.current_token {
            Some(token) if token.is_operator(Operator::Minus) => (UnaryOperator::Neg, token.location.start),
            Some(token) if token.is_operator(Operator::Plus) => (UnaryOperator::Pos, token.location.start),
            _ => return parser.unexpected(vec!["`-`".to_string(), "`+`".to_string()])
        };

        parser.step();

        // binds tighter than `*` but looser than `^`, so -2^2 is -(2^2)
        let operand = Expression::parse(parser, Some(Precedence::Prefix))?;
        let end = operand.location().end;

        Ok(Self {
            operator,
            operand: Box::new(operand),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Unary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator.as_literal(), self.operand)
    }
}

impl Postfix for Unary {
    fn postfix(&self) -> String {
        match self.operator {
            UnaryOperator::Neg => format!("{} neg", self.operand.postfix()),
            UnaryOperator::Pos => self.operand.postfix(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOperator {
    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
        }
    }

    pub fn is_right_associative(&self) -> bool {
        matches!(self, Self::Pow)
    }
}

impl From<Operator> for BinaryOperator {
    fn from(value: Operator) -> Self {
        match value {
            Operator::Plus => Self::Add,
            Operator::Minus => Self::Sub,
            Operator::Star => Self::Mul,
            Operator::Slash => Self::Div,
            Operator::Percent => Self::Mod,
            Operator::Caret => Self::Pow,
        }
    }
}

// binary -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> InfixParse<T> for Binary {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let operator = match &parser.current_token {
            Some(Token { kind: TokenKind::Operator(op), .. }) => BinaryOperator::from(*op),
            _ => return parser.unexpected(vec!["an operator".to_string()])
        };
        let precedence = parser.current_precedence();

        parser.count_operator()?;
        parser.step();

        // right-associative operators accept another operator of the same level on the right
        let right_precedence = if operator.is_right_associative() {
            Precedence::Prefix
        } else {
            precedence
        };

        let right = Expression::parse(parser, Some(right_precedence))?;
        let location = left.location().merge(right.location());

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location
        })
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator.as_literal(), self.right)
    }
}

impl Postfix for Binary {
    fn postfix(&self) -> String {
        format!("{} {} {}", self.left.postfix(), self.right.postfix(), self.operator.as_literal())
    }
}

// call -> <identifier> "(" [<expression> {, <expression>}] ")"
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: Identifier,
    pub arguments: Vec<Expression>,
    pub location: SrcSpan
}

impl Call {
    /// Parses the argument list; `name` has already been consumed.
    pub fn parse_arguments<T: Iterator<Item = Token>>(
        parser: &mut Parser<T>,
        name: Identifier
    ) -> Result<Self, ParseError> {
        parser.expect_one(TokenKind::LParen)?;

        let mut arguments = vec![];

        let (_, end) = match parser.expect_one(TokenKind::RParen) {
            Ok(span) => span,
            Err(_) => {
                arguments.push(Expression::parse(parser, None)?);

                while parser.expect_one(TokenKind::Comma).is_ok() {
                    arguments.push(Expression::parse(parser, None)?);
                }

                match parser.expect_one(TokenKind::RParen) {
                    Ok(span) => span,
                    Err(_) => return parser.unexpected(vec!["`,`".to_string(), "`)`".to_string()])
                }
            }
        };

        let location = SrcSpan { start: name.location.start, end };

        Ok(Self {
            name,
            arguments,
            location
        })
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments = self.arguments.iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}({})", self.name, arguments.join(", "))
    }
}

impl Postfix for Call {
    fn postfix(&self) -> String {
        let arguments = self.arguments.iter()
            .map(|arg| arg.postfix())
            .collect::<Vec<String>>();

        if arguments.is_empty() {
            format!("{}()", self.name)
        } else {
            format!("{} {}()", arguments.join(" "), self.name)
        }
    }
}

// assignment -> <identifier> "=" <statement>
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Identifier,
    pub value: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for Assignment {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let target = Identifier::from(parser.expect_ident()?);

        parser.expect_one(TokenKind::Assign)?;

        let value = parser.parse_statement()?;
        let location = target.location.merge(value.location());

        Ok(Self {
            target,
            value: Box::new(value),
            location
        })
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

impl Postfix for Assignment {
    fn postfix(&self) -> String {
        format!("{} {} =", self.target, self.value.postfix())
    }
}

impl Assignment {
    /// Every name bound by this assignment, outermost first (`a = b = 3` gives `a`, `b`).
    pub fn targets(&self) -> Vec<&Identifier> {
        let mut targets = vec![&self.target];
        let mut value = self.value.as_ref();

        while let Expression::Assignment(inner) = value {
            targets.push(&inner.target);
            value = inner.value.as_ref();
        }

        targets
    }

    /// The innermost right-hand side of an assignment chain.
    pub fn source(&self) -> &Expression {
        let mut value = self.value.as_ref();

        while let Expression::Assignment(inner) = value {
            value = inner.value.as_ref();
        }

        value
    }
}
