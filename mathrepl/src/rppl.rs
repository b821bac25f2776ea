use std::io::Write;

use math_core::{
	parser::prelude::{parse_line, Postfix},
	utils::prelude::Error,
};

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
			_ => match parse_line(input) {
				Ok(parsed) => {
					println!("{}", parsed.expression);
					println!("{}", parsed.expression.postfix());
				},
				Err(error) => {
					let (_, hints) = error.details();
					let err = Error::Parse {
						path: Default::default(),
						src: input.to_string(),
						error
					};

					println!("{}", err.message());
					if !hints.is_empty() {
						println!("\t{}", hints.join(";\n\t"));
					}
				}
			}
		}
	}
}
