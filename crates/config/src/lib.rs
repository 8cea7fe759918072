//! # todo-gate-config
//!
//! Configuration schema, validation, and normalization logic for the CLI.
//! This crate depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + CLI overrides + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, DEFAULT_DISALLOWED_PREFIXES, DEFAULT_PREFIXES,
    DEFAULT_SUFFIXES, GateConfig, InputsConfig, MAX_GLOBS, MAX_PATTERNS, RulesConfig, ScanConfig,
    ScanJobs, ValidatedGateConfig, parse_gate_config_json, parse_gate_config_toml,
};

pub use env::{EnvParseError, GateEnv, apply_env_overrides};
pub use load::{
    ConfigFormat, ConfigOverrides, DEFAULT_CONFIG_FILE, discover_config_path,
    load_gate_config_from_path, load_gate_config_from_sources, load_gate_config_std_env,
    to_pretty_json, to_pretty_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
