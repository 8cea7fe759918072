//! Gate configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Pattern strings are kept byte-exact; glob strings are trimmed.

use serde::{Deserialize, Serialize};
use std::fmt;
use todo_gate_domain::{RulePatterns, RuleSet};
use todo_gate_shared::{BoundedU32, ErrorCode, ErrorEnvelope};

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Maximum number of patterns per rule list.
pub const MAX_PATTERNS: usize = 256;
/// Maximum number of include or exclude globs.
pub const MAX_GLOBS: usize = 1_024;

const SCAN_JOBS_MIN: u32 = 1;
const SCAN_JOBS_MAX: u32 = 256;

/// Validated worker count for per-file scanning.
pub type ScanJobs = BoundedU32<SCAN_JOBS_MIN, SCAN_JOBS_MAX>;

/// Default allowed prefixes.
pub const DEFAULT_PREFIXES: [&str; 3] = ["^TODO", "^BUG", "^HACK"];

/// Default disallowed prefixes.
pub const DEFAULT_DISALLOWED_PREFIXES: [&str; 8] = [
    "^DONT-CHECK-IN",
    "^Todo",
    "^todo",
    "^ToDo",
    "^Bug",
    "^bug",
    "^Hack",
    "^hack",
];

/// Default suffix shape: ` (author, YYYY-MM-DD): text`.
pub const DEFAULT_SUFFIXES: [&str; 1] = [r"^ \([^)]+, [0-9]{4}-[0-9]{2}-[0-9]{2}\): ."];

/// Top-level gate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct GateConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Classification rules.
    pub rules: RulesConfig,
    /// Input selection.
    pub inputs: InputsConfig,
    /// Scan execution settings.
    pub scan: ScanConfig,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            rules: RulesConfig::default(),
            inputs: InputsConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

/// Ordered rule pattern lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct RulesConfig {
    /// Allowed prefix patterns; first match wins.
    pub prefixes: Vec<String>,
    /// Disallowed prefix patterns.
    pub disallowed_prefixes: Vec<String>,
    /// Accepted suffix patterns.
    pub suffixes: Vec<String>,
    /// Compile every pattern case-insensitively.
    pub case_insensitive: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            prefixes: to_owned_list(&DEFAULT_PREFIXES),
            disallowed_prefixes: to_owned_list(&DEFAULT_DISALLOWED_PREFIXES),
            suffixes: to_owned_list(&DEFAULT_SUFFIXES),
            case_insensitive: false,
        }
    }
}

/// Include and exclude globs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct InputsConfig {
    /// Include globs or literal paths, in output order.
    pub includes: Vec<String>,
    /// Exclude globs or literal paths.
    pub excludes: Vec<String>,
}

/// Scan execution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ScanConfig {
    /// Number of files scanned concurrently (1 = sequential).
    pub jobs: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { jobs: 1 }
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

impl GateConfig {
    /// Validate and normalize the config, returning a validated wrapper.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedGateConfig, ConfigSchemaError> {
        self.validate_version()?;

        validate_patterns("prefixes", &self.rules.prefixes)?;
        validate_patterns("disallowedPrefixes", &self.rules.disallowed_prefixes)?;
        validate_patterns("suffixes", &self.rules.suffixes)?;

        normalize_globs("includes", &mut self.inputs.includes)?;
        normalize_globs("excludes", &mut self.inputs.excludes)?;

        let jobs =
            ScanJobs::try_new(self.scan.jobs).map_err(|error| ConfigSchemaError::LimitOutOfRange {
                section: "scan",
                field: "jobs",
                value: u64::from(error.value),
                min: u64::from(error.min),
                max: u64::from(error.max),
            })?;

        Ok(ValidatedGateConfig { raw: self, jobs })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }
}

fn validate_patterns(field: &'static str, patterns: &[String]) -> Result<(), ConfigSchemaError> {
    if patterns.len() > MAX_PATTERNS {
        return Err(ConfigSchemaError::ListTooLarge {
            section: "rules",
            field,
            len: patterns.len(),
            max: MAX_PATTERNS,
        });
    }

    match patterns.iter().position(|pattern| pattern.trim().is_empty()) {
        Some(index) => Err(ConfigSchemaError::EmptyEntry {
            section: "rules",
            field,
            index,
        }),
        None => Ok(()),
    }
}

fn normalize_globs(field: &'static str, globs: &mut Vec<String>) -> Result<(), ConfigSchemaError> {
    if globs.len() > MAX_GLOBS {
        return Err(ConfigSchemaError::ListTooLarge {
            section: "inputs",
            field,
            len: globs.len(),
            max: MAX_GLOBS,
        });
    }

    for (index, glob) in globs.iter_mut().enumerate() {
        let trimmed = glob.trim();
        if trimmed.is_empty() {
            return Err(ConfigSchemaError::EmptyEntry {
                section: "inputs",
                field,
                index,
            });
        }
        if trimmed.len() != glob.len() {
            *glob = trimmed.to_owned();
        }
    }

    Ok(())
}

/// Validated config wrapper carrying bounded values.
#[derive(Debug, Clone)]
pub struct ValidatedGateConfig {
    raw: GateConfig,
    jobs: ScanJobs,
}

impl ValidatedGateConfig {
    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &GateConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> GateConfig {
        self.raw
    }

    /// Validated worker count.
    #[must_use]
    pub const fn jobs(&self) -> ScanJobs {
        self.jobs
    }

    /// Rule pattern sources in precedence order.
    #[must_use]
    pub fn rule_patterns(&self) -> RulePatterns {
        RulePatterns {
            prefixes: self.raw.rules.prefixes.clone(),
            disallowed_prefixes: self.raw.rules.disallowed_prefixes.clone(),
            suffixes: self.raw.rules.suffixes.clone(),
        }
    }

    /// Compile the rule lists into a `RuleSet`.
    pub fn compile_rules(&self) -> Result<RuleSet, ErrorEnvelope> {
        RuleSet::compile(&self.rule_patterns(), self.raw.rules.case_insensitive).map_err(Into::into)
    }
}

impl AsRef<GateConfig> for ValidatedGateConfig {
    fn as_ref(&self) -> &GateConfig {
        &self.raw
    }
}

/// Parse a gate config from a JSON string, applying validation and normalization.
pub fn parse_gate_config_json(input: &str) -> Result<ValidatedGateConfig, ErrorEnvelope> {
    let config: GateConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a gate config from a TOML string, applying validation and normalization.
pub fn parse_gate_config_toml(input: &str) -> Result<ValidatedGateConfig, ErrorEnvelope> {
    let config: GateConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Schema validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A list entry is empty after trimming.
    EmptyEntry {
        /// Schema section (e.g. `rules`).
        section: &'static str,
        /// Field name in the config file (e.g. `prefixes`).
        field: &'static str,
        /// Index of the empty entry.
        index: usize,
    },
    /// A list exceeds its maximum size.
    ListTooLarge {
        /// Schema section.
        section: &'static str,
        /// Field name in the config file.
        field: &'static str,
        /// Number of entries provided.
        len: usize,
        /// Maximum allowed entries.
        max: usize,
    },
    /// A numeric limit is out of bounds.
    LimitOutOfRange {
        /// Schema section (e.g. `scan`).
        section: &'static str,
        /// Field name in the config file (e.g. `jobs`).
        field: &'static str,
        /// Value provided.
        value: u64,
        /// Minimum allowed value.
        min: u64,
        /// Maximum allowed value.
        max: u64,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::EmptyEntry { .. } => ErrorCode::new("config", "empty_entry"),
            Self::ListTooLarge { .. } => ErrorCode::new("config", "list_too_large"),
            Self::LimitOutOfRange { .. } => ErrorCode::new("config", "limit_out_of_range"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => {
                write!(
                    formatter,
                    "unsupported config version: {found} (supported: {supported})"
                )
            },
            Self::EmptyEntry {
                section,
                field,
                index,
            } => write!(formatter, "{section}.{field}[{index}] must be non-empty"),
            Self::ListTooLarge {
                section,
                field,
                len,
                max,
            } => write!(
                formatter,
                "{section}.{field} is too large ({len} items, max {max})"
            ),
            Self::LimitOutOfRange {
                section,
                field,
                value,
                min,
                max,
            } => write!(
                formatter,
                "{section}.{field} must be within [{min}, {max}] (got {value})"
            ),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::EmptyEntry {
                section,
                field,
                index,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("index", index.to_string()),
            ConfigSchemaError::ListTooLarge {
                section,
                field,
                len,
                max,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("len", len.to_string())
                .with_metadata("max", max.to_string()),
            ConfigSchemaError::LimitOutOfRange {
                section,
                field,
                value,
                min,
                max,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("value", value.to_string())
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
        }
    }
}
