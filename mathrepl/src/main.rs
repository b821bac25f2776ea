mod cli;
mod interactive;
mod rlpl;
mod rppl;

use std::{
    io::{IsTerminal, Write},
    path::PathBuf,
    process::ExitCode,
    rc::Rc,
    time::Instant,
};

use clap::{Parser, Subcommand};
use cli::{print_loaded, print_loading};
use math_core::{
    repl::prelude::Session,
    utils::prelude::{DiagnosticEmitter, DiagnosticEmitterIO, Error},
};

/// Interactive calculator over real numbers
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Script to run before reading input, may be repeated
    #[arg(short, long, value_name = "FILE")]
    load: Vec<PathBuf>,
    /// Also render every diagnostic with a source snippet on stderr
    #[arg(long, default_value_t = false)]
    explain: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Runs Read Lex Print Loop
    Lex,
    /// Runs Read Parse Print Loop
    Parse,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Some(Command::Lex) => rlpl::start().map_err(Error::from),
        Some(Command::Parse) => rppl::start().map_err(Error::from),
        None => run(args.load, args.explain),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let buf_writer = cli::stderr_buffer_writer();
            let mut buf = buf_writer.buffer();

            if err.pretty(&mut buf).is_ok() {
                let _ = buf_writer.print(&buf);
            }

            ExitCode::FAILURE
        }
    }
}

fn run(scripts: Vec<PathBuf>, explain: bool) -> Result<(), Error> {
    let emitter = match explain {
        true => DiagnosticEmitter::new(Rc::new(ConsoleDiagnosticEmitter)),
        false => DiagnosticEmitter::null(),
    };

    let mut session = Session::new(emitter);

    for path in scripts {
        print_loading(&path.display().to_string())?;
        let start = Instant::now();

        let output = session.load(&path)?;

        if !output.is_empty() {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{output}")?;
            stdout.flush()?;
        }

        print_loaded(start.elapsed())?;
    }

    if std::io::stdin().is_terminal() {
        interactive::start(&mut session)
    } else {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();

        session.run(stdin.lock(), &mut stdout.lock())?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleDiagnosticEmitter;

impl DiagnosticEmitterIO for ConsoleDiagnosticEmitter {
    fn emit_diagnostic(&self, error: &Error) {
        let buffer_writer = cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();

        if error.pretty(&mut buffer).is_ok() {
            let _ = buffer_writer.print(&buffer);
        }
    }
}
