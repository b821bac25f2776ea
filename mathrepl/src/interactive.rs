use std::io::Write;

use math_core::{
    repl::prelude::{Outcome, Session},
    utils::prelude::Error,
};
use rustyline::{error::ReadlineError, DefaultEditor};

const PROMPT: &str = ">> ";

/// Line-edited loop for a terminal. Ctrl-C drops the current line, Ctrl-D
/// ends the session like `exit`.
pub fn start(session: &mut Session) -> Result<(), Error> {
    let mut editor = DefaultEditor::new().map_err(readline_error)?;
    let mut stdout = std::io::stdout();

    writeln!(stdout, "Type 'help' for commands.")?;

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(readline_error(err)),
        };

        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        let outcome = session.run_line(&line);

        if let Some(text) = outcome.render() {
            writeln!(stdout, "{text}")?;
        }

        if outcome == Outcome::Exit {
            break;
        }
    }

    Ok(())
}

fn readline_error(err: ReadlineError) -> Error {
    match err {
        ReadlineError::Io(err) => Error::from(err),
        _ => Error::StdIo { err: std::io::ErrorKind::Other },
    }
}
