use crate::{lexer::prelude::{tokenize, LexicalError, LexicalErrorType, Operator, Token, TokenKind}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Assignment, Expression, Parsed};

/// Nesting limit for parentheses, unary operators, `^` chains and assignment chains.
pub const MAX_DEPTH: usize = 256;
/// Binary operators allowed in one line. Flat chains like `1 + 1 + ...`
/// do not nest while parsing but still build a tree as tall as the chain.
pub const MAX_OPERATORS: usize = 1024;

pub trait Parse<T: Iterator<Item = Token>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = Token>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub struct Parser<T: Iterator<Item = Token>> {
    pub current_token: Option<Token>,
    pub next_token: Option<Token>,
    pub lex_errors: Vec<LexicalError>,

    depth: usize,
    operators: usize,
    last_end: u32,
    tokens: T,
}

impl<T: Iterator<Item = Token>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            lex_errors: vec![],

            depth: 0,
            operators: 0,
            last_end: 0,
            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let t = self.current_token.take();

        let next = self.tokens.next();

        if let Some(token) = &next {
            self.last_end = token.location.end;

            if token.kind == TokenKind::Invalid {
                self.lex_errors.push(LexicalError {
                    error: LexicalErrorType::UnrecognizedToken {
                        tok: token.text.chars().next().unwrap_or('\0')
                    },
                    location: token.location
                });
            }
        }

        self.current_token = self.next_token.take();
        self.next_token = next;

        t
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current_token.as_ref().is_some_and(|token| token.kind == kind)
    }

    pub fn current_precedence(&self) -> Precedence {
        match &self.current_token {
            Some(token) => Precedence::from(token),
            None => Precedence::Lowest
        }
    }

    /// Parses one whole line: a statement followed by the end of line.
    ///
    /// An unrecognized character anywhere in the line wins over any
    /// syntax error, so the reported column is that of the first one.
    pub fn parse(&mut self) -> Result<Parsed, ParseError> {
        let parsed = self.parse_statement()
            .and_then(|expression| {
                let end = self.expect_eol()?;

                Ok(Parsed { expression, end })
            });

        while self.current_token.is_some() || self.next_token.is_some() {
            self.step();
        }

        if let Some(error) = self.lex_errors.first() {
            return parse_error(
                ParseErrorType::LexError { error: *error },
                error.location
            );
        }

        parsed
    }

    /// `name = <statement>` when the line starts with an identifier followed
    /// by `=`, a plain expression otherwise.
    pub fn parse_statement(&mut self) -> Result<Expression, ParseError> {
        let is_assignment = self.current_is(TokenKind::Ident)
            && self.next_token.as_ref().is_some_and(|token| token.kind == TokenKind::Assign);

        if !is_assignment {
            return Expression::parse(self, None);
        }

        self.enter()?;
        let assignment = Assignment::parse(self, None)?;
        self.leave();

        Ok(Expression::Assignment(assignment))
    }

    pub fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;

        if self.depth > MAX_DEPTH {
            let span = self.current_span();
            return parse_error(ParseErrorType::TooDeeplyNested, span);
        }

        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn count_operator(&mut self) -> Result<(), ParseError> {
        self.operators += 1;

        if self.operators > MAX_OPERATORS {
            let span = self.current_span();
            return parse_error(ParseErrorType::TooManyOperators, span);
        }

        Ok(())
    }

    pub fn expect_one(&mut self, kind: TokenKind) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some(Token { kind: found, location, .. }) if found == kind => {
                self.step();
                Ok((location.start, location.end))
            },
            Some(token) => {
                self.current_token = Some(token);

                self.unexpected(vec![kind.describe()])
            },
            None => self.unexpected(vec![kind.describe()])
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some(Token { kind: TokenKind::Ident, text, location, .. }) => {
                self.step();
                Ok((location.start, text, location.end))
            },
            token => {
                self.current_token = token;

                self.unexpected(vec!["an identifier".to_string()])
            }
        }
    }

    pub fn expect_number(&mut self) -> Result<(f64, SrcSpan), ParseError> {
        match &self.current_token {
            Some(Token { kind: TokenKind::Number, value: Some(value), location, .. }) => {
                let (value, location) = (*value, *location);
                self.step();
                Ok((value, location))
            },
            _ => self.unexpected(vec!["a number".to_string()])
        }
    }

    pub fn expect_eol(&mut self) -> Result<u32, ParseError> {
        match &self.current_token {
            Some(Token { kind: TokenKind::Eol, location, .. }) => Ok(location.start),
            _ => self.unexpected(vec!["an operator".to_string(), "end of line".to_string()])
        }
    }

    /// Error for the current token not being any of `expected`.
    pub fn unexpected<R>(&self, expected: Vec<String>) -> Result<R, ParseError> {
        match &self.current_token {
            Some(token) if token.kind != TokenKind::Eol => parse_error(
                ParseErrorType::UnexpectedToken { token: token.clone(), expected },
                token.location
            ),
            _ => parse_error(
                ParseErrorType::UnexpectedEol { expected },
                self.current_span()
            )
        }
    }

    fn current_span(&self) -> SrcSpan {
        match &self.current_token {
            Some(token) => token.location,
            None => SrcSpan::from(self.last_end, self.last_end)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Sum,
    Product,
    Prefix,
    Power
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value.kind {
            TokenKind::Operator(Operator::Plus | Operator::Minus) => Self::Sum,
            TokenKind::Operator(Operator::Star | Operator::Slash | Operator::Percent) => Self::Product,
            TokenKind::Operator(Operator::Caret) => Self::Power,
            _ => Self::Lowest,
        }
    }
}

/// Parses an already tokenized line.
pub fn parse(tokens: Vec<Token>) -> Result<Parsed, ParseError> {
    let mut parser = Parser::new(tokens.into_iter());

    parser.parse()
}

pub fn parse_line(src: &str) -> Result<Parsed, ParseError> {
    parse(tokenize(src))
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
