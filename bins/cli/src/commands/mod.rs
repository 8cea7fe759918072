//! CLI command handlers.

pub mod check;
pub mod config;

pub use check::{CheckArgs, run_check};
pub use config::{ConfigShowFormat, run_config_show, run_config_validate};
