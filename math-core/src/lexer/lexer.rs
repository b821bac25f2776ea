use super::token::{Operator, Token, TokenKind};
use std::fmt::Display;
use std::iter::Peekable;
use crate::utils::prelude::SrcSpan;

/// Splits a single input line into tokens.
///
/// Never fails: characters the lexer does not know become
/// [`TokenKind::Invalid`] tokens and scanning goes on. The returned vector
/// always ends with exactly one [`TokenKind::Eol`] token.
pub fn tokenize(line: &str) -> Vec<Token> {
	Lexer::new(line.char_indices().map(|(i, c)| (i as u32, c))).collect()
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: Peekable<T>,
	finished: bool,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tnext_position: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.next_position, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
			next_ch: None,
            input: input.peekable(),
			finished: false,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> Token {
		loop {
			match self.ch {
				Some(' ' | '\t' | '\x0C' | '\r' | '\n') => {
					let _ = self.next_char();
				},
				_ => break
			}
		}

		match self.ch {
			Some(ch) => match ch {
				'(' => self.eat_one_char(TokenKind::LParen),
				')' => self.eat_one_char(TokenKind::RParen),
				',' => self.eat_one_char(TokenKind::Comma),
				'=' => self.eat_one_char(TokenKind::Assign),
				'+' | '-' | '*' | '/' | '%' | '^' => match Operator::from_char(ch) {
					Some(op) => self.eat_one_char(TokenKind::Operator(op)),
					None => self.eat_one_char(TokenKind::Invalid),
				},
				'a'..='z' | 'A'..='Z' | '_' => self.lex_ident(),
				'0'..='9' => self.lex_number(),
				'.' if self.next_ch.is_some_and(|c| c.is_ascii_digit()) => self.lex_number(),
				_ => self.eat_one_char(TokenKind::Invalid),
			},
			None => {
				let location = SrcSpan::from(self.position, self.position);
				Token::new(TokenKind::Eol, "", location)
			}
		}
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += self.next_ch.map_or(0, |c| c.len_utf8() as u32);

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, kind: TokenKind) -> Token {
		let start_pos = self.position;
		let text = self.next_char().map(String::from).unwrap_or_default();
		let end_pos = self.position;

		Token::new(kind, text, SrcSpan::from(start_pos, end_pos))
	}

	fn eat_digits(&mut self, text: &mut String) {
		while let Some(ch) = self.ch {
			if !ch.is_ascii_digit() {
				break;
			}

			text.push(ch);
			self.next_char();
		}
	}

	fn lex_ident(&mut self) -> Token {
        let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}

			ident.push(ch);
			self.next_char();
		}

        let end_pos = self.position;

		Token::new(TokenKind::Ident, ident, SrcSpan::from(start_pos, end_pos))
	}

	fn lex_number(&mut self) -> Token {
		let start_pos = self.position;
		let mut text = String::new();

		self.eat_digits(&mut text);

		if self.ch == Some('.') {
			text.push('.');
			self.next_char();
			self.eat_digits(&mut text);
		}

		if self.has_exponent() {
			// e|E, then an optional sign
			text.extend(self.next_char());

			if matches!(self.ch, Some('+' | '-')) {
				text.extend(self.next_char());
			}

			self.eat_digits(&mut text);
		}

		let end_pos = self.position;
		let location = SrcSpan::from(start_pos, end_pos);

		match text.parse::<f64>() {
			Ok(value) => Token::number(text, value, location),
			Err(_) => Token::new(TokenKind::Invalid, text, location),
		}
	}

	/// An `e` only belongs to the number when digits follow it,
	/// so `2e` stays a number and an identifier.
	fn has_exponent(&mut self) -> bool {
		if !matches!(self.ch, Some('e' | 'E')) {
			return false;
		}

		match self.next_ch {
			Some(c) if c.is_ascii_digit() => true,
			Some('+' | '-') => self.input.peek().is_some_and(|(_, c)| c.is_ascii_digit()),
			_ => false
		}
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = Token;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if token.kind == TokenKind::Eol {
			self.finished = true;
		}

		Some(token)
	}
}
