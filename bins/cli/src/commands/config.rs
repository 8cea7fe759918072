//! Config command handlers.

use crate::error::{CliError, ExitCode};
use crate::{CliOutput, collect_scoped_env, format_error_output};
use clap::ValueEnum;
use std::path::Path;
use todo_gate_config::{ConfigFormat, ConfigOverrides};
use todo_gate_infra::{load_effective_config, load_effective_config_text};

/// Formats accepted by `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConfigShowFormat {
    /// Pretty JSON.
    Json,
    /// Pretty TOML.
    #[default]
    Toml,
}

impl From<ConfigShowFormat> for ConfigFormat {
    fn from(format: ConfigShowFormat) -> Self {
        match format {
            ConfigShowFormat::Json => Self::Json,
            ConfigShowFormat::Toml => Self::Toml,
        }
    }
}

/// Print the effective config.
pub fn run_config_show(
    root: &Path,
    path: Option<&Path>,
    format: ConfigShowFormat,
) -> Result<CliOutput, CliError> {
    let env = collect_scoped_env("TODO_GATE_");
    match load_effective_config_text(&env, root, path, format.into()) {
        Ok(stdout) => Ok(CliOutput {
            stdout,
            stderr: String::new(),
            exit_code: ExitCode::Ok,
        }),
        Err(error) => Ok(format_error_output(&error)),
    }
}

/// Validate the effective config, including rule pattern compilation.
pub fn run_config_validate(root: &Path, path: Option<&Path>) -> Result<CliOutput, CliError> {
    let env = collect_scoped_env("TODO_GATE_");
    let validated = load_effective_config(&env, root, path, &ConfigOverrides::default())
        .and_then(|config| config.compile_rules().map(|_| config));
    if let Err(error) = validated {
        return Ok(format_error_output(&error));
    }

    let stdout = path.map_or_else(
        || "status: ok\nconfig: ok\n".to_string(),
        |path| format!("status: ok\nconfig: ok\npath: {}\n", path.to_string_lossy()),
    );
    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
