//! Environment validation helpers for CLI surfaces.

use std::collections::BTreeMap;
use todo_gate_config::{GateConfig, GateEnv, apply_env_overrides};
use todo_gate_shared::ErrorEnvelope;

/// Infra-level error type (shared error envelope).
pub type InfraError = ErrorEnvelope;

/// Infra-level result type.
pub type InfraResult<T> = Result<T, InfraError>;

/// Validate that the provided env overrides can be parsed and merged into a config.
pub fn validate_env_parsing(env: &BTreeMap<String, String>) -> InfraResult<()> {
    let parsed = GateEnv::from_map(env).map_err(ErrorEnvelope::from)?;
    let _ = apply_env_overrides(GateConfig::default(), &parsed)?;
    Ok(())
}
