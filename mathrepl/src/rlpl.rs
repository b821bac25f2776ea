use std::io::Write;

use math_core::lexer::prelude::{tokenize, LexicalError, LexicalErrorType, TokenKind};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		let input = input.trim_end_matches(['\n', '\r']);

		match input.trim() {
			"" => {},
			"exit" => return Ok(()),
			_ => {
				for token in tokenize(input) {
					println!("{token}");

					if token.kind == TokenKind::Invalid {
						let err = LexicalError {
							error: LexicalErrorType::UnrecognizedToken {
								tok: token.text.chars().next().unwrap_or('\0')
							},
							location: token.location
						};
						let (message, hints) = err.details();

						println!("[at {}] Lexical Error: {}", err.location.column(input), message);
						if !hints.is_empty() {
							println!("{}", hints.join("\n"));
						}
					}
				}
			}
		}
	}
}
