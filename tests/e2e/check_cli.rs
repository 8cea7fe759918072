//! CLI E2E tests for `todo-gate check` console output.

use std::error::Error;
use std::path::Path;
use std::process::{Command, Output};
use todo_gate_testkit::ScratchDir;

type TestResult = Result<(), Box<dyn Error>>;

struct Run {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl From<Output> for Run {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

fn todo_gate(dir: &Path, args: &[&str]) -> std::io::Result<Run> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_todo-gate"));
    for (key, _) in std::env::vars().filter(|(key, _)| key.starts_with("TODO_GATE_")) {
        command.env_remove(key);
    }
    command.current_dir(dir).arg("check").args(args);
    Ok(command.output()?.into())
}

#[test]
fn valid_todo_is_listed() -> TestResult {
    let dir = ScratchDir::new("e2e-valid")?;
    dir.write("SomeProgram.cs", "// TODO (mristin, 2020-07-20): Do something!\n")?;

    let run = todo_gate(dir.path(), &["--inputs", "SomeProgram.cs"])?;
    assert_eq!(run.stderr, "");
    assert_eq!(
        run.stdout,
        "SomeProgram.cs:1:1:TODO (mristin, 2020-07-20): Do something!\n"
    );
    assert_eq!(run.code, Some(0));
    Ok(())
}

#[test]
fn case_insensitive_accepts_lowercase_prefix() -> TestResult {
    let dir = ScratchDir::new("e2e-case-insensitive")?;
    dir.write("SomeProgram.cs", "// todo (mristin, 2020-07-20): Do something!\n")?;

    let run = todo_gate(
        dir.path(),
        &["--inputs", "SomeProgram.cs", "--case-insensitive"],
    )?;
    assert_eq!(run.stderr, "");
    assert_eq!(
        run.stdout,
        "SomeProgram.cs:1:1:todo (mristin, 2020-07-20): Do something!\n"
    );
    assert_eq!(run.code, Some(0));
    Ok(())
}

#[test]
fn lowercase_prefix_is_disallowed_by_default() -> TestResult {
    let dir = ScratchDir::new("e2e-case-sensitive")?;
    dir.write("SomeProgram.cs", "// todo (mristin, 2020-07-20): Do something!\n")?;

    let run = todo_gate(dir.path(), &["--inputs", "SomeProgram.cs", "--verbose"])?;
    assert_eq!(
        run.stderr,
        concat!(
            "FAILED: SomeProgram.cs\n",
            " * Line 1, column 1: disallowed prefix (see --disallowed-prefixes): todo\n",
            "One or more TODOs were invalid. Please see above.\n",
        )
    );
    assert_eq!(run.stdout, "");
    assert_eq!(run.code, Some(1));
    Ok(())
}

#[test]
fn verbose_prints_ok_line_before_annotations() -> TestResult {
    let dir = ScratchDir::new("e2e-verbose")?;
    dir.write("SomeProgram.cs", "// TODO (mristin, 2020-07-20): Do something!\n")?;

    let run = todo_gate(dir.path(), &["--inputs", "SomeProgram.cs", "--verbose"])?;
    assert_eq!(run.stderr, "");
    assert_eq!(
        run.stdout,
        concat!(
            "OK, 1 todo(s): SomeProgram.cs\n",
            "SomeProgram.cs:1:1:TODO (mristin, 2020-07-20): Do something!\n",
        )
    );
    assert_eq!(run.code, Some(0));
    Ok(())
}

#[test]
fn invalid_suffix_and_disallowed_prefix_are_reported() -> TestResult {
    let dir = ScratchDir::new("e2e-invalid")?;
    dir.write(
        "SomeProgram.cs",
        "// TODO (mristin): Do something!\n// DONT-CHECK-IN",
    )?;

    let run = todo_gate(dir.path(), &["--inputs", "SomeProgram.cs"])?;
    assert_eq!(
        run.stderr,
        concat!(
            "FAILED: SomeProgram.cs\n",
            " * Line 1, column 1: invalid suffix (see --suffixes):  (mristin): Do something!\n",
            " * Line 2, column 1: disallowed prefix (see --disallowed-prefixes): DONT-CHECK-IN\n",
            "One or more TODOs were invalid. Please see above.\n",
        )
    );
    assert_eq!(run.stdout, "");
    assert_eq!(run.code, Some(1));
    Ok(())
}

#[test]
fn one_invalid_todo_fails_the_whole_file() -> TestResult {
    let dir = ScratchDir::new("e2e-invalid-and-valid")?;
    dir.write(
        "SomeProgram.cs",
        "// TODO (mristin): Do something!\n// TODO (mristin, 2020-07-20): Do something else!",
    )?;

    let run = todo_gate(dir.path(), &["--inputs", "SomeProgram.cs"])?;
    assert_eq!(
        run.stderr,
        concat!(
            "FAILED: SomeProgram.cs\n",
            " * Line 1, column 1: invalid suffix (see --suffixes):  (mristin): Do something!\n",
            "One or more TODOs were invalid. Please see above.\n",
        )
    );
    assert_eq!(run.stdout, "");
    assert_eq!(run.code, Some(1));
    Ok(())
}

#[test]
fn failing_and_passing_files_with_verbose() -> TestResult {
    let dir = ScratchDir::new("e2e-mixed-verbose")?;
    dir.write("NotOk.cs", "// TODO (mristin): Do something!\n")?;
    dir.write("Ok.cs", "// TODO (mristin, 2020-07-20): Do something else!")?;

    let run = todo_gate(dir.path(), &["--inputs", "NotOk.cs", "Ok.cs", "--verbose"])?;
    assert_eq!(
        run.stderr,
        concat!(
            "FAILED: NotOk.cs\n",
            " * Line 1, column 1: invalid suffix (see --suffixes):  (mristin): Do something!\n",
            "One or more TODOs were invalid. Please see above.\n",
        )
    );
    assert_eq!(run.stdout, "OK, 1 todo(s): Ok.cs\n");
    assert_eq!(run.code, Some(1));
    Ok(())
}

#[test]
fn output_follows_input_order() -> TestResult {
    let dir = ScratchDir::new("e2e-order")?;
    dir.write("b/Second.cs", "// BUG (mristin, 2020-07-20): Two.\n")?;
    dir.write("a/First.cs", "class A {\n    // TODO (mristin, 2020-07-20): One.\n}\n")?;

    let run = todo_gate(
        dir.path(),
        &["--inputs", "b/*.cs", "a/*.cs", "--jobs", "2"],
    )?;
    assert_eq!(run.stderr, "");
    assert_eq!(
        run.stdout,
        concat!(
            "b/Second.cs:1:1:BUG (mristin, 2020-07-20): Two.\n",
            "a/First.cs:2:5:TODO (mristin, 2020-07-20): One.\n",
        )
    );
    assert_eq!(run.code, Some(0));
    Ok(())
}

#[test]
fn excluded_files_are_not_checked() -> TestResult {
    let dir = ScratchDir::new("e2e-exclude")?;
    dir.write("NotOk.cs", "// TODO (mristin): Do something, but excluded!\n")?;
    dir.write("Ok.cs", "// TODO (mristin, 2020-07-20): Do something else!")?;

    let run = todo_gate(dir.path(), &["--inputs", "*.cs", "--excludes", "NotOk.cs"])?;
    assert_eq!(run.stderr, "");
    assert_eq!(
        run.stdout,
        "Ok.cs:1:1:TODO (mristin, 2020-07-20): Do something else!\n"
    );
    assert_eq!(run.code, Some(0));
    Ok(())
}

#[test]
fn non_code_input_passes_silently() -> TestResult {
    let dir = ScratchDir::new("e2e-non-code")?;
    dir.write("SomeProgram.cs", "this is not parsable C# code.")?;

    let run = todo_gate(dir.path(), &["--inputs", "SomeProgram.cs"])?;
    assert_eq!(run.stderr, "");
    assert_eq!(run.stdout, "");
    assert_eq!(run.code, Some(0));
    Ok(())
}

#[test]
fn custom_patterns_replace_the_defaults() -> TestResult {
    let dir = ScratchDir::new("e2e-patterns")?;
    dir.write("SomeProgram.cs", "// AAA BBB\n// CCC")?;

    let run = todo_gate(
        dir.path(),
        &[
            "--inputs",
            "SomeProgram.cs",
            "--prefix",
            "^AAA",
            "--disallowed-prefix",
            "CCC",
            "--suffix",
            "^ BBB",
        ],
    )?;
    assert_eq!(
        run.stderr,
        concat!(
            "FAILED: SomeProgram.cs\n",
            " * Line 2, column 1: disallowed prefix (see --disallowed-prefixes): CCC\n",
            "One or more TODOs were invalid. Please see above.\n",
        )
    );
    assert_eq!(run.code, Some(1));
    Ok(())
}

#[test]
fn absolute_inputs_are_reported_as_given() -> TestResult {
    let dir = ScratchDir::new("e2e-absolute")?;
    let path = dir.write("SomeProgram.cs", "// HACK (mristin, 2020-07-20): Later.\n")?;
    let path = path.to_string_lossy().into_owned();

    let run = todo_gate(dir.path(), &["--inputs", &path])?;
    assert_eq!(run.stdout, format!("{path}:1:1:HACK (mristin, 2020-07-20): Later.\n"));
    assert_eq!(run.code, Some(0));
    Ok(())
}

#[test]
fn invalid_patterns_abort_before_scanning() -> TestResult {
    let dir = ScratchDir::new("e2e-bad-pattern")?;

    let run = todo_gate(
        dir.path(),
        &["--inputs", "missing.cs", "--prefixes", "^(TODO", "--suffixes", "["],
    )?;
    let lines: Vec<&str> = run
        .stderr
        .lines()
        .filter(|line| line.starts_with("error: failed to parse a "))
        .collect();
    assert_eq!(lines.len(), 2, "stderr: {}", run.stderr);
    assert!(lines.iter().any(|line| line.starts_with("error: failed to parse a prefix pattern ^(TODO")));
    assert!(lines.iter().any(|line| line.starts_with("error: failed to parse a suffix pattern [")));
    assert_eq!(run.stdout, "");
    assert_eq!(run.code, Some(2));
    Ok(())
}

#[test]
fn missing_input_is_invalid_input() -> TestResult {
    let dir = ScratchDir::new("e2e-missing")?;

    let run = todo_gate(dir.path(), &["--inputs", "Nope.cs"])?;
    assert!(run.stderr.starts_with("error: "), "stderr: {}", run.stderr);
    assert_eq!(run.code, Some(2));
    Ok(())
}

#[test]
fn unclosed_block_comment_in_fallback_language_is_ignored() -> TestResult {
    let dir = ScratchDir::new("e2e-unclosed")?;
    dir.write("Main.kt", "fun main() {}\n/* TODO never closed\n")?;

    let run = todo_gate(dir.path(), &["--inputs", "Main.kt"])?;
    assert_eq!(run.stderr, "");
    assert_eq!(run.code, Some(0));
    Ok(())
}

#[test]
fn unclosed_block_comment_in_rust_is_ignored() -> TestResult {
    let dir = ScratchDir::new("e2e-unclosed-rust")?;
    dir.write("lib.rs", "fn a() {}\n/* TODO never closed\n")?;

    let run = todo_gate(dir.path(), &["--inputs", "lib.rs"])?;
    assert_eq!(run.stderr, "");
    assert_eq!(run.stdout, "");
    assert_eq!(run.code, Some(0));
    Ok(())
}

#[test]
fn unknown_flag_is_a_usage_error() -> TestResult {
    let dir = ScratchDir::new("e2e-usage")?;
    let run = todo_gate(dir.path(), &["--invalid-arg"])?;
    assert_eq!(run.code, Some(2));
    Ok(())
}
