//! Config loading helpers (env + CLI overrides + file).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::{GateConfig, GateEnv, ValidatedGateConfig, apply_env_overrides};
use std::path::{Path, PathBuf};
use todo_gate_shared::{ErrorCode, ErrorEnvelope};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = ".todo-gate.toml";

/// Config file formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

/// Command-line overrides. Lists replace the configured list wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Allowed prefix patterns.
    pub prefixes: Option<Vec<String>>,
    /// Disallowed prefix patterns.
    pub disallowed_prefixes: Option<Vec<String>>,
    /// Suffix patterns.
    pub suffixes: Option<Vec<String>>,
    /// Include globs.
    pub includes: Option<Vec<String>>,
    /// Exclude globs.
    pub excludes: Option<Vec<String>>,
    /// Case-insensitive matching.
    pub case_insensitive: Option<bool>,
    /// Scan worker count.
    pub jobs: Option<u32>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut GateConfig) {
        set_clone(&mut config.rules.prefixes, self.prefixes.as_ref());
        set_clone(
            &mut config.rules.disallowed_prefixes,
            self.disallowed_prefixes.as_ref(),
        );
        set_clone(&mut config.rules.suffixes, self.suffixes.as_ref());
        set_clone(&mut config.inputs.includes, self.includes.as_ref());
        set_clone(&mut config.inputs.excludes, self.excludes.as_ref());
        if let Some(value) = self.case_insensitive {
            config.rules.case_insensitive = value;
        }
        if let Some(value) = self.jobs {
            config.scan.jobs = value;
        }
    }
}

fn set_clone<T: Clone>(field: &mut T, value: Option<&T>) {
    if let Some(value) = value {
        field.clone_from(value);
    }
}

/// Load the gate config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`GateEnv`)
/// - command-line overrides
/// - config text (file content)
/// - defaults (`GateConfig::default()`)
pub fn load_gate_config_from_sources(
    config_text: Option<(&str, ConfigFormat)>,
    overrides: &ConfigOverrides,
    env: &GateEnv,
) -> Result<ValidatedGateConfig, ErrorEnvelope> {
    let mut config = match config_text {
        None => GateConfig::default(),
        Some((input, format)) => parse_config_unvalidated(input, format)?,
    };

    overrides.apply(&mut config);

    // env is applied last and also validates/normalizes the resulting config.
    apply_env_overrides(config, env)
}

/// Load the gate config from an optional file path.
pub fn load_gate_config_from_path(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
    env: &GateEnv,
) -> Result<ValidatedGateConfig, ErrorEnvelope> {
    let mut config = match config_path {
        None => GateConfig::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let config_text = read_config_file(path)?;
            tracing::debug!(path = %path.display(), ?format, "loading config file");
            parse_config_unvalidated(&config_text, format)
                .map_err(|error| error.with_path(path.display().to_string()))?
        },
    };

    overrides.apply(&mut config);

    apply_env_overrides(config, env)
}

/// Load the gate config from std env and an optional file path.
pub fn load_gate_config_std_env(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ValidatedGateConfig, ErrorEnvelope> {
    let env = GateEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_gate_config_from_path(config_path, overrides, &env)
}

/// Resolve the config file to load: the explicit path, or the default file
/// under `root` when it exists.
#[must_use]
pub fn discover_config_path(root: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = root.join(DEFAULT_CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &GateConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &GateConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn parse_config_unvalidated(input: &str, format: ConfigFormat) -> Result<GateConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_path(path.to_string_lossy())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => Ok(ConfigFormat::Json),
        None | Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}
