//! Config loading helpers for CLI surfaces.

use crate::InfraResult;
use std::collections::BTreeMap;
use std::path::Path;
use todo_gate_config::{
    ConfigFormat, ConfigOverrides, GateEnv, ValidatedGateConfig, discover_config_path,
    load_gate_config_from_path, to_pretty_json, to_pretty_toml,
};
use todo_gate_shared::ErrorEnvelope;

/// Load and validate the effective config.
///
/// `config_path` wins over the default config file under `root`; without
/// either the built-in defaults are used.
pub fn load_effective_config(
    env: &BTreeMap<String, String>,
    root: &Path,
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> InfraResult<ValidatedGateConfig> {
    let env = GateEnv::from_map(env).map_err(ErrorEnvelope::from)?;
    let config_path = discover_config_path(root, config_path);
    if let Some(path) = config_path.as_deref() {
        tracing::debug!(path = %path.display(), "using config file");
    }
    load_gate_config_from_path(config_path.as_deref(), overrides, &env)
}

/// Load the effective config and render it deterministically.
pub fn load_effective_config_text(
    env: &BTreeMap<String, String>,
    root: &Path,
    config_path: Option<&Path>,
    format: ConfigFormat,
) -> InfraResult<String> {
    let config = load_effective_config(env, root, config_path, &ConfigOverrides::default())?;
    match format {
        ConfigFormat::Json => to_pretty_json(config.as_ref()),
        ConfigFormat::Toml => to_pretty_toml(config.as_ref()),
    }
}
