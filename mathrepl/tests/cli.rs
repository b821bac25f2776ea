use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Output, Stdio},
};

fn mathrepl(args: &[&str], stdin: impl AsRef<[u8]>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mathrepl"))
        .args(args)
        .env_remove("FORCE_COLOR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child.stdin.take().unwrap().write_all(stdin.as_ref()).unwrap();

    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn script(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("mathrepl-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();

    path
}

#[test]
fn test_piped_session() {
    let output = mathrepl(&[], "2 + 3 * 4\n(2 + 3) * 4\n2 ^ 3 ^ 2\n-2 ^ 2\nx = 5\nx + 1\n");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "14\n20\n512\n-4\n5\n6\n");
}

#[test]
fn test_errors_are_reported_and_session_continues() {
    let output = mathrepl(&[], "1 / 0\nsqrt(1, 2)\ny + 1\ny = 2\ny + 1\n2 @ 3\n");

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Evaluation error [DivisionByZero] at column 5: division by zero\n\
         Evaluation error [ArityMismatch] at column 1: function `sqrt` expects 1 argument, got 2\n\
         Evaluation error [UndefinedVariable] at column 1: variable `y` is not defined\n\
         2\n\
         3\n\
         Lexical error at column 3: unrecognized character '@'\n"
    );
}

#[test]
fn test_exit_stops_reading() {
    let output = mathrepl(&[], "1\nexit\n2\n");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "1\n");
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let output = mathrepl(&[], "");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_load_option() {
    let path = script("vars.calc", "# constants\nr = 3\n");
    let output = mathrepl(&["--load", path.to_str().unwrap()], "r * 2\n");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "3\n6\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Loading"));

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_missing_load_file_fails() {
    let output = mathrepl(&["-l", "/nonexistent/mathrepl/missing.calc"], "1\n");

    assert!(!output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_explain_renders_snippet_on_stderr() {
    let output = mathrepl(&["--explain"], "1 + 8 / 0\n");

    assert_eq!(
        stdout(&output),
        "Evaluation error [DivisionByZero] at column 9: division by zero\n"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Evaluation error [DivisionByZero]"));
    assert!(stderr.contains("1 + 8 / 0"));
}

#[test]
fn test_parse_subcommand() {
    let output = mathrepl(&["parse"], "-2 ^ 2\n");

    assert!(output.status.success());
    assert!(stdout(&output).contains("(-(2 ^ 2))"));
    assert!(stdout(&output).contains("2 2 ^ neg"));
}

#[test]
fn test_lex_subcommand() {
    let output = mathrepl(&["lex"], "x = 1\n");

    assert!(output.status.success());
    assert!(stdout(&output).contains("Number(1)"));
    assert!(stdout(&output).contains("Assign(\"=\")"));
}

#[test]
fn test_invalid_utf8_line_is_reported() {
    let output = mathrepl(&[], b"1 + 1\n2 \xff 3\n4 + 4\n");

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "2\nLexical error at column 3: unrecognized character '\u{FFFD}'\n8\n"
    );
}

#[test]
fn test_long_operator_chain() {
    let input = format!("{}1\n2 + 2\n", "1+".repeat(200_000));
    let output = mathrepl(&[], input);

    assert!(output.status.success());

    let stdout = stdout(&output);
    assert!(stdout.starts_with("Syntax error at column "));
    assert!(stdout.ends_with("\n4\n"));
}
