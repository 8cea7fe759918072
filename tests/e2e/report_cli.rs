//! CLI E2E tests for the JSON report.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use todo_gate_testkit::ScratchDir;

type TestResult = Result<(), Box<dyn Error>>;

const EXPECTED_REPORT: &str = r#"[
  {
    "path": "SomeProgram.cs",
    "records": [
      {
        "prefix": "TODO",
        "suffix": " (mristin, 2020-07-20): Do something!",
        "line": 0,
        "column": 0,
        "status": "ok"
      }
    ]
  }
]
"#;

fn check(dir: &Path, args: &[&str]) -> std::io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_todo-gate"));
    for (key, _) in std::env::vars().filter(|(key, _)| key.starts_with("TODO_GATE_")) {
        command.env_remove(key);
    }
    command.current_dir(dir).arg("check").args(args).output()
}

fn scratch_with_valid_todo(label: &str) -> std::io::Result<ScratchDir> {
    let dir = ScratchDir::new(label)?;
    dir.write("SomeProgram.cs", "// TODO (mristin, 2020-07-20): Do something!\n")?;
    Ok(dir)
}

#[test]
fn report_to_stdout() -> TestResult {
    let dir = scratch_with_valid_todo("e2e-report-stdout")?;

    let output = check(
        dir.path(),
        &["--inputs", "SomeProgram.cs", "--report-path", "-"],
    )?;
    assert_eq!(String::from_utf8_lossy(&output.stderr), "");
    assert_eq!(String::from_utf8_lossy(&output.stdout), EXPECTED_REPORT);
    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn report_to_file() -> TestResult {
    let dir = scratch_with_valid_todo("e2e-report-file")?;

    let output = check(
        dir.path(),
        &["--inputs", "SomeProgram.cs", "--report-path", "report.json"],
    )?;
    assert_eq!(String::from_utf8_lossy(&output.stderr), "");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "");
    assert_eq!(fs::read_to_string(dir.path().join("report.json"))?, EXPECTED_REPORT);
    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn report_only_lists_files_with_ok_records() -> TestResult {
    let dir = scratch_with_valid_todo("e2e-report-filter")?;
    dir.write("Plain.cs", "// Just a comment.\nclass Plain {}\n")?;

    let output = check(
        dir.path(),
        &["--inputs", "Plain.cs", "SomeProgram.cs", "--report-path", "-"],
    )?;
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let entries = report
        .as_array()
        .ok_or_else(|| std::io::Error::other("report is not an array"))?;
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries.first().and_then(|entry| entry.get("path")),
        Some(&serde_json::Value::from("SomeProgram.cs"))
    );
    Ok(())
}

#[test]
fn no_report_is_written_when_the_check_fails() -> TestResult {
    let dir = ScratchDir::new("e2e-report-failed")?;
    dir.write("Bad.cs", "// TODO: missing author\n")?;

    let output = check(
        dir.path(),
        &["--inputs", "Bad.cs", "--report-path", "report.json"],
    )?;
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("report.json").exists());
    Ok(())
}

#[test]
fn unwritable_report_path_is_an_io_error() -> TestResult {
    let dir = scratch_with_valid_todo("e2e-report-io")?;

    let output = check(
        dir.path(),
        &["--inputs", "SomeProgram.cs", "--report-path", "missing/dir/report.json"],
    )?;
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: "));
    assert_eq!(output.status.code(), Some(3));
    Ok(())
}
