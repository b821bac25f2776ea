use std::{io::Write, path::PathBuf, rc::Rc};

use crate::{
    eval::prelude::EvalErrorKind,
    utils::prelude::{DiagnosticEmitter, Error, VectorDiagnosticEmitterIO},
};

use crate::parser::prelude::MAX_OPERATORS;

use super::prelude::{format_number, strip_comments, Command, Outcome, Session, State, HISTORY_LIMIT};

fn run_lines(session: &mut Session, lines: &[&str]) -> Vec<String> {
    lines.iter()
        .filter_map(|line| session.run_line(line).render())
        .collect()
}

fn run_input(input: &str) -> String {
    run_bytes(input.as_bytes())
}

fn run_bytes(input: &[u8]) -> String {
    let mut session = Session::default();
    let mut output = vec![];

    session.run(input, &mut output).unwrap();

    String::from_utf8(output).unwrap()
}

fn script(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("math-core-{}-{name}", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();

    path
}

#[test]
fn test_format_number() {
    let cases = [
        (4.0, "4"),
        (-0.0, "0"),
        (14.0, "14"),
        (-2.5, "-2.5"),
        (0.1 + 0.2, "0.30000000000000004"),
        (1e20, "1e20"),
        (1.5e-7, "1.5e-7"),
        (123456789.0, "123456789"),
        (0.000001, "0.000001"),
        (f64::INFINITY, "inf"),
        (f64::NEG_INFINITY, "-inf"),
    ];

    for (value, expected) in cases {
        assert_eq!(format_number(value), expected, "{value:?}");
    }
}

#[test]
fn test_strip_comments() {
    assert_eq!(strip_comments("1 + 2 # three"), "1 + 2 ");
    assert_eq!(strip_comments("x = 4 // four"), "x = 4 ");
    assert_eq!(strip_comments("// only a comment"), "");
    assert_eq!(strip_comments("2 // a # b"), "2 ");
    assert_eq!(strip_comments("6 / 3"), "6 / 3");
}

#[test]
fn test_command_parse() {
    assert_eq!(Command::parse("help"), Some(Command::Help));
    assert_eq!(Command::parse("quit"), Some(Command::Exit));
    assert_eq!(Command::parse("load  demo.calc "), Some(Command::Load("demo.calc".to_string())));
    assert_eq!(Command::parse("load"), Some(Command::Load(String::new())));
    assert_eq!(Command::parse("vars + 1"), None);
    assert_eq!(Command::parse("loader"), None);
    assert_eq!(Command::parse("load = 5"), None);
    assert_eq!(Command::parse("load + 1"), None);
    assert_eq!(Command::parse("load ^ 2"), None);
}

#[test]
fn test_load_as_variable_name() {
    let mut session = Session::default();

    assert_eq!(session.run_line("load = 5"), Outcome::Value(5.0));
    assert_eq!(session.run_line("load + 1"), Outcome::Value(6.0));
    assert_eq!(session.run_line("load * load"), Outcome::Value(25.0));
}

#[test]
fn test_basic_session() {
    let mut session = Session::default();

    let output = run_lines(&mut session, &[
        "2 + 3 * 4",
        "(2 + 3) * 4",
        "2 ^ 3 ^ 2",
        "-2 ^ 2",
        "x = 5",
        "x + 1",
    ]);

    assert_eq!(output, vec!["14", "20", "512", "-4", "5", "6"]);
}

#[test]
fn test_blank_and_comment_lines_are_silent() {
    let mut session = Session::default();

    assert_eq!(session.run_line(""), Outcome::Silent);
    assert_eq!(session.run_line("   "), Outcome::Silent);
    assert_eq!(session.run_line("# note"), Outcome::Silent);
    assert!(session.history().is_empty());
}

#[test]
fn test_whitespace_does_not_matter() {
    assert_eq!(run_input("2+2\n2 + 2\n  2   +   2  \n"), "4\n4\n4\n");
}

#[test]
fn test_error_messages() {
    let mut session = Session::default();

    let output = run_lines(&mut session, &[
        "1 / 0",
        "5 % 0",
        "y + 1",
        "2 @ 3",
        "2 +",
        "sqrt(1, 2)",
        "pi = 3",
        "load",
    ]);

    assert_eq!(output, vec![
        "Evaluation error [DivisionByZero] at column 5: division by zero",
        "Evaluation error [DivisionByZero] at column 5: modulo by zero",
        "Evaluation error [UndefinedVariable] at column 1: variable `y` is not defined",
        "Lexical error at column 3: unrecognized character '@'",
        "Syntax error at column 4: expected an expression, found end of line",
        "Evaluation error [ArityMismatch] at column 1: function `sqrt` expects 1 argument, got 2",
        "Evaluation error [ReadOnly] at column 1: `pi` is read-only",
        "Command error: usage: load <file>",
    ]);
}

#[test]
fn test_columns_count_leading_whitespace() {
    let mut session = Session::default();

    match session.run_line("   1 / 0") {
        Outcome::Error(error) => assert_eq!(
            error.message(),
            "Evaluation error [DivisionByZero] at column 8: division by zero"
        ),
        outcome => panic!("unexpected outcome {outcome:?}"),
    }
}

#[test]
fn test_errors_do_not_end_the_session() {
    let mut session = Session::default();

    assert!(matches!(session.run_line("sqrt(1, 2)"), Outcome::Error(_)));
    assert_eq!(session.run_line("sqrt(16)"), Outcome::Value(4.0));

    match session.run_line("y + 1") {
        Outcome::Error(Error::Eval { error, .. }) => {
            assert_eq!(error.kind(), EvalErrorKind::UndefinedVariable)
        },
        outcome => panic!("unexpected outcome {outcome:?}"),
    }

    assert_eq!(session.run_line("y = 2"), Outcome::Value(2.0));
    assert_eq!(session.run_line("y + 1"), Outcome::Value(3.0));
    assert_eq!(session.state(), State::Running);
}

#[test]
fn test_last_result() {
    let mut session = Session::default();

    assert_eq!(
        run_lines(&mut session, &["6 * 7", "_ * 2", "1 / 0", "_"]),
        vec![
            "42",
            "84",
            "Evaluation error [DivisionByZero] at column 5: division by zero",
            "84",
        ]
    );
}

#[test]
fn test_exit() {
    let mut session = Session::default();

    assert_eq!(session.run_line("exit"), Outcome::Exit);
    assert_eq!(session.state(), State::Terminated);
    assert_eq!(session.run_line("1 + 1"), Outcome::Exit);

    assert_eq!(run_input("1\nquit\n2\n"), "1\n");
}

#[test]
fn test_exit_can_be_commented() {
    assert_eq!(run_input("exit # bye\n3\n"), "");
}

#[test]
fn test_commands() {
    let mut session = Session::default();

    assert_eq!(
        session.run_line("vars"),
        Outcome::Info("No user variables defined.".to_string())
    );

    session.run_line("b = 2");
    session.run_line("a = 0.5");

    assert_eq!(
        session.run_line("vars"),
        Outcome::Info("Variables:\n  a = 0.5\n  b = 2".to_string())
    );

    match session.run_line("consts") {
        Outcome::Info(text) => assert!(text.starts_with("Constants:\n  e = 2.718281828459045")),
        outcome => panic!("unexpected outcome {outcome:?}"),
    }

    match session.run_line("builtins") {
        Outcome::Info(text) => assert!(text.contains("\n  atan2/2 - ")),
        outcome => panic!("unexpected outcome {outcome:?}"),
    }

    match session.run_line("help") {
        Outcome::Info(text) => assert!(text.contains("load <file>")),
        outcome => panic!("unexpected outcome {outcome:?}"),
    }

    assert_eq!(session.run_line("reset"), Outcome::Info("State cleared.".to_string()));
    assert!(session.environment().variables().is_empty());
    assert!(matches!(session.run_line("_"), Outcome::Error(_)));
}

#[test]
fn test_history() {
    let mut session = Session::default();

    run_lines(&mut session, &["1 + 1", "", "x = 3  "]);

    assert_eq!(
        session.run_line("history"),
        Outcome::Info("   1  1 + 1\n   2  x = 3\n   3  history".to_string())
    );
}

#[test]
fn test_history_is_capped() {
    let mut session = Session::default();

    for _ in 0..HISTORY_LIMIT + 4 {
        session.run_line("1");
    }

    let text = match session.run_line("history") {
        Outcome::Info(text) => text,
        outcome => panic!("unexpected outcome {outcome:?}"),
    };

    assert_eq!(session.history().len(), HISTORY_LIMIT);
    assert_eq!(text.lines().count(), HISTORY_LIMIT);
    // numbering keeps counting from the first line of the session
    assert!(text.starts_with("   6  1\n"));
    assert!(text.ends_with(" 205  history"));
}

#[test]
fn test_long_operator_chain() {
    let mut session = Session::default();

    let at_limit = vec!["1"; MAX_OPERATORS + 1].join(" + ");
    assert_eq!(session.run_line(&at_limit), Outcome::Value((MAX_OPERATORS + 1) as f64));

    let huge = format!("{}1", "1+".repeat(200_000));
    match session.run_line(&huge) {
        Outcome::Error(error) => assert!(error.message().starts_with("Syntax error at column ")),
        outcome => panic!("unexpected outcome {outcome:?}"),
    }

    assert_eq!(session.run_line("2 + 2"), Outcome::Value(4.0));
    assert_eq!(run_input(&format!("{huge}\n2 + 2\n")).lines().last(), Some("4"));
}

#[test]
fn test_invalid_utf8_is_a_lexical_error() {
    assert_eq!(
        run_bytes(b"1 + 1\n2 \xff 3\n4 + 4\n"),
        "2\nLexical error at column 3: unrecognized character '\u{FFFD}'\n8\n"
    );
    assert_eq!(run_bytes(b"2 * 3\r\n"), "6\n");
}

#[test]
fn test_load_script() {
    let path = script("ok.calc", "# setup\nr = 2\n\narea = pi * r ^ 2 // circle\nr * 3\n");
    let mut session = Session::default();

    let output = session.run_line(&format!("load {}", path.display()));

    assert_eq!(output, Outcome::Info("2\n12.566370614359172\n6".to_string()));
    assert_eq!(session.run_line("area / pi"), Outcome::Value(4.0));

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_load_stops_at_first_error() {
    let path = script("fail.calc", "a = 1\n\nb = a / 0\nc = 3\n");
    let mut session = Session::default();

    let output = session.load(&path).unwrap();

    assert_eq!(
        output,
        "1\nline 3: Evaluation error [DivisionByZero] at column 9: division by zero"
    );
    assert!(session.environment().get("c").is_err());
    assert_eq!(session.state(), State::Running);

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_exit_inside_script_only_stops_script() {
    let path = script("exit.calc", "1\nexit\n2\n");
    let mut session = Session::default();

    assert_eq!(session.load(&path).unwrap(), "1");
    assert_eq!(session.state(), State::Running);
    assert_eq!(session.run_line("3"), Outcome::Value(3.0));

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_nested_load_is_rejected() {
    let path = script("nested.calc", "1\nload other.calc\n2\n");
    let mut session = Session::default();

    assert_eq!(
        session.load(&path).unwrap(),
        "1\nline 2: Command error: `load` cannot be used inside a script"
    );

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_script_with_invalid_utf8() {
    let path = std::env::temp_dir().join(format!("math-core-{}-bytes.calc", std::process::id()));
    std::fs::write(&path, b"x = 2\ny \xfe 1\n").unwrap();
    let mut session = Session::default();

    assert_eq!(
        session.load(&path).unwrap(),
        "2\nline 2: Lexical error at column 3: unrecognized character '\u{FFFD}'"
    );

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_missing_script() {
    let mut session = Session::default();
    let path = PathBuf::from("/nonexistent/math-core/missing.calc");

    assert!(matches!(session.load(&path), Err(Error::Script { .. })));
    assert!(matches!(
        session.run_line("load /nonexistent/math-core/missing.calc"),
        Outcome::Error(Error::Script { .. })
    ));
}

#[test]
fn test_errors_reach_the_emitter() {
    let errors = Rc::new(VectorDiagnosticEmitterIO::new());
    let emitter = DiagnosticEmitter::new(errors.clone());
    let mut session = Session::new(emitter.clone());

    run_lines(&mut session, &["1 / 0", "2 + 2", "2 @ 3"]);

    assert_eq!(emitter.count(), 2);

    let errors = errors.take();
    assert!(matches!(errors[0], Error::Eval { .. }));
    assert!(matches!(errors[1], Error::Parse { .. }));

    let diagnostics = errors[0].to_diagnostics();
    assert_eq!(diagnostics[0].location.as_ref().map(|location| location.src), Some("1 / 0"));

    let rendered = errors[0].pretty_string();
    assert!(rendered.contains("Evaluation error [DivisionByZero]"));
    assert!(rendered.contains("division by zero"));
}
