//! CLI E2E tests for config files, env overrides, and `todo-gate config`.

use std::error::Error;
use std::path::Path;
use std::process::{Command, Output};
use todo_gate_testkit::{ScratchDir, fixture_path};

type TestResult = Result<(), Box<dyn Error>>;

fn todo_gate(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> std::io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_todo-gate"));
    for (key, _) in std::env::vars().filter(|(key, _)| key.starts_with("TODO_GATE_")) {
        command.env_remove(key);
    }
    command.envs(env.iter().copied());
    command.current_dir(dir).args(args).output()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn default_config_file_supplies_inputs_and_rules() -> TestResult {
    let dir = ScratchDir::new("e2e-config-file")?;
    dir.write(
        ".todo-gate.toml",
        "[rules]\nprefixes = [\"^FIXME\"]\nsuffixes = [\"^: .\"]\n\n[inputs]\nincludes = [\"src/**/*.rs\"]\n",
    )?;
    dir.write("src/lib.rs", "// FIXME: tighten bounds\nfn f() {}\n")?;

    let output = todo_gate(dir.path(), &["check"], &[])?;
    assert_eq!(stdout(&output), "src/lib.rs:1:1:FIXME: tighten bounds\n");
    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn cli_flags_replace_config_lists() -> TestResult {
    let dir = ScratchDir::new("e2e-config-cli")?;
    dir.write(".todo-gate.toml", "[inputs]\nincludes = [\"nothing-here/**\"]\n")?;
    dir.write("a.go", "package a\n// TODO (mristin, 2020-07-20): Go.\n")?;

    let output = todo_gate(dir.path(), &["check", "-i", "a.go"], &[])?;
    assert_eq!(stdout(&output), "a.go:2:1:TODO (mristin, 2020-07-20): Go.\n");
    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn env_excludes_win_over_cli() -> TestResult {
    let dir = ScratchDir::new("e2e-config-env")?;
    dir.write("Bad.cs", "// TODO: no author\n")?;
    dir.write("Good.cs", "// TODO (mristin, 2020-07-20): Fine.\n")?;

    let output = todo_gate(
        dir.path(),
        &["check", "-i", "*.cs"],
        &[("TODO_GATE_EXCLUDES", "Bad.cs")],
    )?;
    assert_eq!(stdout(&output), "Good.cs:1:1:TODO (mristin, 2020-07-20): Fine.\n");
    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn malformed_env_value_is_invalid_input() -> TestResult {
    let dir = ScratchDir::new("e2e-config-bad-env")?;
    let output = todo_gate(
        dir.path(),
        &["check", "-i", "*.cs"],
        &[("TODO_GATE_JOBS", "lots")],
    )?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn config_show_renders_defaults_as_json() -> TestResult {
    let dir = ScratchDir::new("e2e-config-show")?;
    let output = todo_gate(dir.path(), &["config", "show", "--format", "json"], &[])?;
    assert_eq!(output.status.code(), Some(0));

    let config: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(config.get("version"), Some(&serde_json::Value::from(1)));
    let prefixes = config
        .get("rules")
        .and_then(|rules| rules.get("prefixes"))
        .cloned()
        .unwrap_or_default();
    assert_eq!(prefixes, serde_json::json!(["^TODO", "^BUG", "^HACK"]));
    Ok(())
}

#[test]
fn config_validate_accepts_fixture() -> TestResult {
    let dir = ScratchDir::new("e2e-config-validate")?;
    let fixture = fixture_path("config/todo-gate.valid.toml");
    let fixture = fixture.to_string_lossy().into_owned();

    let output = todo_gate(dir.path(), &["config", "validate", "--config", &fixture], &[])?;
    assert_eq!(
        stdout(&output),
        format!("status: ok\nconfig: ok\npath: {fixture}\n")
    );
    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn config_validate_rejects_bad_patterns() -> TestResult {
    let dir = ScratchDir::new("e2e-config-invalid")?;
    let fixture = fixture_path("config/todo-gate.invalid-pattern.toml");
    let fixture = fixture.to_string_lossy().into_owned();

    let output = todo_gate(dir.path(), &["config", "validate", "--config", &fixture], &[])?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: failed to parse a prefix pattern ^(TODO"));
    assert!(stderr.contains("error: failed to parse a suffix pattern ["));
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn config_validate_rejects_unsupported_version() -> TestResult {
    let dir = ScratchDir::new("e2e-config-version")?;
    let fixture = fixture_path("config/todo-gate.invalid-version.json");
    let fixture = fixture.to_string_lossy().into_owned();

    let output = todo_gate(dir.path(), &["config", "validate", "--config", &fixture], &[])?;
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: "));
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
