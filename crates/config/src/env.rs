//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a present but invalid value fails the run
//! instead of being ignored. Pattern lists are JSON arrays so that commas
//! inside regexes survive; glob lists are CSV.

use crate::schema::{GateConfig, MAX_GLOBS, MAX_PATTERNS, ValidatedGateConfig};
use std::collections::BTreeMap;
use std::fmt;
use todo_gate_shared::{ErrorCode, ErrorEnvelope};

/// Env var: allowed prefix patterns as a JSON array of strings.
pub const ENV_PREFIXES: &str = "TODO_GATE_PREFIXES";
/// Env var: disallowed prefix patterns as a JSON array of strings.
pub const ENV_DISALLOWED_PREFIXES: &str = "TODO_GATE_DISALLOWED_PREFIXES";
/// Env var: suffix patterns as a JSON array of strings.
pub const ENV_SUFFIXES: &str = "TODO_GATE_SUFFIXES";
/// Env var: exclude globs as CSV.
pub const ENV_EXCLUDES: &str = "TODO_GATE_EXCLUDES";
/// Env var: case-insensitive matching (true/false).
pub const ENV_CASE_INSENSITIVE: &str = "TODO_GATE_CASE_INSENSITIVE";
/// Env var: scan worker count.
pub const ENV_JOBS: &str = "TODO_GATE_JOBS";

const ALL_VARS: [&str; 6] = [
    ENV_PREFIXES,
    ENV_DISALLOWED_PREFIXES,
    ENV_SUFFIXES,
    ENV_EXCLUDES,
    ENV_CASE_INSENSITIVE,
    ENV_JOBS,
];

/// Parsed env overrides. `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateEnv {
    /// Allowed prefix patterns.
    pub prefixes: Option<Vec<String>>,
    /// Disallowed prefix patterns.
    pub disallowed_prefixes: Option<Vec<String>>,
    /// Suffix patterns.
    pub suffixes: Option<Vec<String>>,
    /// Exclude globs.
    pub excludes: Option<Vec<String>>,
    /// Case-insensitive matching.
    pub case_insensitive: Option<bool>,
    /// Scan worker count.
    pub jobs: Option<u32>,
}

impl GateEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            prefixes: parse_optional_pattern_list(map, ENV_PREFIXES)?,
            disallowed_prefixes: parse_optional_pattern_list(map, ENV_DISALLOWED_PREFIXES)?,
            suffixes: parse_optional_pattern_list(map, ENV_SUFFIXES)?,
            excludes: parse_optional_csv_globs(map, ENV_EXCLUDES)?,
            case_insensitive: parse_optional_bool(map, ENV_CASE_INSENSITIVE)?,
            jobs: parse_optional_u32(map, ENV_JOBS)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }

        Self::from_map(&map)
    }

    /// Returns true when no variable was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Apply env overrides to a base config (env wins over file, CLI, and defaults).
pub fn apply_env_overrides(
    base: GateConfig,
    env: &GateEnv,
) -> Result<ValidatedGateConfig, ErrorEnvelope> {
    let mut config = base;
    set_clone(&mut config.rules.prefixes, env.prefixes.as_ref());
    set_clone(
        &mut config.rules.disallowed_prefixes,
        env.disallowed_prefixes.as_ref(),
    );
    set_clone(&mut config.rules.suffixes, env.suffixes.as_ref());
    set_clone(&mut config.inputs.excludes, env.excludes.as_ref());
    if let Some(value) = env.case_insensitive {
        config.rules.case_insensitive = value;
    }
    if let Some(value) = env.jobs {
        config.scan.jobs = value;
    }

    config.validate_and_normalize().map_err(Into::into)
}

fn set_clone<T: Clone>(field: &mut T, value: Option<&T>) {
    if let Some(value) = value {
        field.clone_from(value);
    }
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Integer env var had an invalid value.
    InvalidInt {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Pattern list env var was not a JSON array of strings.
    InvalidPatternList {
        /// Env var name.
        var: &'static str,
        /// JSON parser message.
        reason: String,
    },
    /// List exceeds a safety limit.
    ListTooLarge {
        /// Env var name.
        var: &'static str,
        /// Number of parsed items.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidInt { .. } => ErrorCode::new("config", "invalid_env_int"),
            Self::InvalidPatternList { .. } => ErrorCode::new("config", "invalid_env_list"),
            Self::ListTooLarge { .. } => ErrorCode::new("config", "invalid_env_csv"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidInt { var, .. } => write!(formatter, "{var} must be an integer"),
            Self::InvalidPatternList { var, reason } => {
                write!(formatter, "{var} must be a JSON array of strings: {reason}")
            },
            Self::ListTooLarge { var, len, max } => {
                write!(formatter, "{var} is too large ({len} items, max {max})")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } | EnvParseError::InvalidPatternList { var, .. } => {
                envelope.with_metadata("env_var", var)
            },
            EnvParseError::InvalidBool { var, value } | EnvParseError::InvalidInt { var, value } => {
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", value)
            },
            EnvParseError::ListTooLarge { var, len, max } => envelope
                .with_metadata("env_var", var)
                .with_metadata("len", len.to_string())
                .with_metadata("max", max.to_string()),
        }
    }
}

fn parse_optional_pattern_list(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Vec<String>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    let patterns: Vec<String> =
        serde_json::from_str(trimmed).map_err(|error| EnvParseError::InvalidPatternList {
            var,
            reason: error.to_string(),
        })?;
    if patterns.len() > MAX_PATTERNS {
        return Err(EnvParseError::ListTooLarge {
            var,
            len: patterns.len(),
            max: MAX_PATTERNS,
        });
    }
    Ok(Some(patterns))
}

fn parse_optional_csv_globs(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Vec<String>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Some(Vec::new()));
    }

    let mut items: Vec<String> = trimmed
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.replace('\\', "/"))
        .collect();
    if items.len() > MAX_GLOBS {
        return Err(EnvParseError::ListTooLarge {
            var,
            len: items.len(),
            max: MAX_GLOBS,
        });
    }

    items.sort_unstable();
    items.dedup();
    Ok(Some(items))
}

fn parse_optional_u32(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u32>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var,
            value: raw.clone(),
        })
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}
