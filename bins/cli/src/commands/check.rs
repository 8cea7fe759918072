//! Check command handler.

use crate::error::{CliError, ExitCode};
use crate::{CliOutput, collect_scoped_env, format_error_output};
use clap::Args;
use std::path::{Path, PathBuf};
use todo_gate_app::{render_failures, render_report_json, render_success_lines, render_verbose};
use todo_gate_config::ConfigOverrides;
use todo_gate_infra::{load_effective_config, run_check_local};

/// Report path meaning "write the report to stdout".
const STDOUT_REPORT: &str = "-";

/// Flags of the `check` command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Input globs or paths to check; order defines output order.
    #[arg(short = 'i', long, num_args = 1.., value_name = "GLOB")]
    pub inputs: Option<Vec<String>>,
    /// Globs or paths to leave out.
    #[arg(short = 'e', long, num_args = 1.., value_name = "GLOB")]
    pub excludes: Option<Vec<String>>,
    /// Allowed prefix regexes, tried in order.
    #[arg(long, alias = "prefix", num_args = 1.., value_name = "RE")]
    pub prefixes: Option<Vec<String>>,
    /// Prefix regexes that must never appear.
    #[arg(long, alias = "disallowed-prefix", num_args = 1.., value_name = "RE")]
    pub disallowed_prefixes: Option<Vec<String>>,
    /// Suffix regexes; any match accepts the annotation.
    #[arg(long, alias = "suffix", num_args = 1.., value_name = "RE")]
    pub suffixes: Option<Vec<String>>,
    /// Match all patterns case-insensitively.
    #[arg(long)]
    pub case_insensitive: bool,
    /// Write a JSON report to this path (`-` for stdout) instead of listing annotations.
    #[arg(long, value_name = "PATH")]
    pub report_path: Option<PathBuf>,
    /// Print a line for every passing file.
    #[arg(long)]
    pub verbose: bool,
    /// Config file path (JSON/TOML). Defaults to `.todo-gate.toml` when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of files scanned concurrently.
    #[arg(long)]
    pub jobs: Option<u32>,
}

impl CheckArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            prefixes: self.prefixes.clone(),
            disallowed_prefixes: self.disallowed_prefixes.clone(),
            suffixes: self.suffixes.clone(),
            includes: self.inputs.clone(),
            excludes: self.excludes.clone(),
            case_insensitive: self.case_insensitive.then_some(true),
            jobs: self.jobs,
        }
    }
}

/// Run the check command.
pub fn run_check(args: &CheckArgs, root: &Path) -> Result<CliOutput, CliError> {
    let env = collect_scoped_env("TODO_GATE_");
    let config = match load_effective_config(&env, root, args.config.as_deref(), &args.overrides())
    {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(&error)),
    };

    let outcome = match run_check_local(&config, root) {
        Ok(outcome) => outcome,
        Err(error) => return Ok(format_error_output(&error)),
    };

    let mut stdout = if args.verbose {
        render_verbose(&outcome)
    } else {
        String::new()
    };
    let stderr = render_failures(&outcome);

    if !outcome.passed() {
        return Ok(CliOutput {
            stdout,
            stderr,
            exit_code: ExitCode::Failed,
        });
    }

    match args.report_path.as_deref() {
        None => stdout.push_str(&render_success_lines(&outcome)),
        Some(path) => {
            let report = match render_report_json(&outcome) {
                Ok(report) => report,
                Err(error) => return Ok(format_error_output(&error)),
            };
            if path.as_os_str() == STDOUT_REPORT {
                stdout.push_str(&report);
            } else {
                std::fs::write(path, report)?;
                tracing::debug!(path = %path.display(), "wrote report");
            }
        },
    }

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: ExitCode::Ok,
    })
}
