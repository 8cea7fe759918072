//! Tracing subscriber setup for the CLI.

use clap::{Args, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var holding a full `EnvFilter` directive; wins over `--log-level`.
pub const LOG_ENV_VAR: &str = "TODO_GATE_LOG";

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log line formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-friendly text lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging-related CLI flags.
#[derive(Debug, Args)]
pub struct LoggingArgs {
    /// Log level or filter directive (e.g. `debug`, `todo_gate_adapters=trace`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Log line format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl LoggingArgs {
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
            let directive = self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
            EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
        })
    }
}

/// Install the global subscriber. Logs always go to stderr.
pub fn init_tracing(args: &LoggingArgs) {
    let registry = tracing_subscriber::registry().with(args.filter());
    let result = match args.log_format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
