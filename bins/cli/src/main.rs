//! CLI binary entrypoint.

mod commands;
mod error;
mod logging;

use clap::{Parser, Subcommand};
use commands::{CheckArgs, ConfigShowFormat, run_check, run_config_show, run_config_validate};
use error::{CliError, ExitCode};
use logging::{LoggingArgs, init_tracing};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use todo_gate_shared::ErrorEnvelope;

#[derive(Debug, Parser)]
#[command(
    name = "todo-gate",
    version,
    about = "Check that TODO-style annotation comments are well-formed",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    logging: LoggingArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan source files and validate their annotation comments.
    Check(CheckArgs),
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Show the effective config after applying env overrides.
    Show {
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = ConfigShowFormat::Toml)]
        format: ConfigShowFormat,
    },
    /// Validate config loading, overrides, and rule patterns.
    Validate {
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.logging);

    match run(&cli.command) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands) -> Result<CliOutput, CliError> {
    let root = std::env::current_dir()?;
    match command {
        Commands::Check(args) => run_check(args, &root),
        Commands::Config { command } => match command {
            ConfigCommands::Show { config, format } => {
                run_config_show(&root, config.as_deref(), *format)
            },
            ConfigCommands::Validate { config } => run_config_validate(&root, config.as_deref()),
        },
    }
}

pub(crate) fn format_error_output(error: &ErrorEnvelope) -> CliOutput {
    tracing::debug!(code = %error.code, kind = %error.kind, "command failed");
    CliOutput {
        stdout: String::new(),
        stderr: format_error_text(error),
        exit_code: ExitCode::for_envelope(error),
    }
}

fn format_error_text(error: &ErrorEnvelope) -> String {
    if error.has_code("config", "invalid_pattern") {
        let lines: String = (0..)
            .map_while(|index| error.metadata_value(&format!("pattern.{index}")))
            .map(|message| format!("error: {message}\n"))
            .collect();
        if !lines.is_empty() {
            return lines;
        }
    }

    match error.path() {
        Some(path) => format!("error: {path}: {}\n", error.message),
        None => format!("error: {}\n", error.message),
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}

fn collect_scoped_env(prefix: &str) -> BTreeMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with(prefix))
        .collect()
}
