//! Ordered rule patterns and their compiled form.

use regex::{Regex, RegexBuilder};
use std::fmt;
use thiserror::Error;
use todo_gate_shared::{ErrorCode, ErrorEnvelope};

/// Which rule list a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Allowed prefix patterns.
    Prefix,
    /// Disallowed prefix patterns.
    DisallowedPrefix,
    /// Required suffix patterns.
    Suffix,
}

impl PatternKind {
    /// Human-readable list name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::DisallowedPrefix => "disallowed prefix",
            Self::Suffix => "suffix",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A rule pattern that failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse a {kind} pattern {pattern}: {reason}")]
pub struct PatternError {
    /// List the pattern came from.
    pub kind: PatternKind,
    /// Pattern source text.
    pub pattern: String,
    /// Regex engine error message.
    pub reason: String,
}

/// One or more rule patterns failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} rule pattern(s) failed to compile", .0.len())]
pub struct RuleSetError(pub Vec<PatternError>);

impl RuleSetError {
    /// Offending patterns in list order (prefixes, disallowed prefixes, suffixes).
    #[must_use]
    pub fn patterns(&self) -> &[PatternError] {
        &self.0
    }
}

impl From<RuleSetError> for ErrorEnvelope {
    fn from(error: RuleSetError) -> Self {
        let mut envelope = Self::expected(
            ErrorCode::new("config", "invalid_pattern"),
            error.to_string(),
        )
        .with_metadata("count", error.0.len().to_string());
        for (index, pattern) in error.0.iter().enumerate() {
            envelope = envelope.with_metadata(format!("pattern.{index}"), pattern.to_string());
        }
        envelope
    }
}

/// Raw rule pattern sources, in precedence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulePatterns {
    /// Allowed prefix patterns; first match wins.
    pub prefixes: Vec<String>,
    /// Disallowed prefix patterns; checked only when no prefix matched.
    pub disallowed_prefixes: Vec<String>,
    /// Suffix patterns; any match is sufficient.
    pub suffixes: Vec<String>,
}

/// Immutable bundle of the three compiled, ordered pattern lists.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    prefixes: Vec<Regex>,
    disallowed_prefixes: Vec<Regex>,
    suffixes: Vec<Regex>,
}

impl RuleSet {
    /// Build a rule set from already compiled patterns.
    #[must_use]
    pub const fn new(
        prefixes: Vec<Regex>,
        disallowed_prefixes: Vec<Regex>,
        suffixes: Vec<Regex>,
    ) -> Self {
        Self {
            prefixes,
            disallowed_prefixes,
            suffixes,
        }
    }

    /// Compile every pattern, collecting all failures instead of stopping at the first.
    pub fn compile(patterns: &RulePatterns, case_insensitive: bool) -> Result<Self, RuleSetError> {
        let mut errors = Vec::new();
        let prefixes = compile_list(
            PatternKind::Prefix,
            &patterns.prefixes,
            case_insensitive,
            &mut errors,
        );
        let disallowed_prefixes = compile_list(
            PatternKind::DisallowedPrefix,
            &patterns.disallowed_prefixes,
            case_insensitive,
            &mut errors,
        );
        let suffixes = compile_list(
            PatternKind::Suffix,
            &patterns.suffixes,
            case_insensitive,
            &mut errors,
        );

        if errors.is_empty() {
            Ok(Self::new(prefixes, disallowed_prefixes, suffixes))
        } else {
            Err(RuleSetError(errors))
        }
    }

    /// Allowed prefix patterns in precedence order.
    #[must_use]
    pub fn prefixes(&self) -> &[Regex] {
        &self.prefixes
    }

    /// Disallowed prefix patterns in precedence order.
    #[must_use]
    pub fn disallowed_prefixes(&self) -> &[Regex] {
        &self.disallowed_prefixes
    }

    /// Suffix patterns.
    #[must_use]
    pub fn suffixes(&self) -> &[Regex] {
        &self.suffixes
    }
}

fn compile_list(
    kind: PatternKind,
    sources: &[String],
    case_insensitive: bool,
    errors: &mut Vec<PatternError>,
) -> Vec<Regex> {
    let mut compiled = Vec::with_capacity(sources.len());
    for source in sources {
        match RegexBuilder::new(source)
            .case_insensitive(case_insensitive)
            .build()
        {
            Ok(regex) => compiled.push(regex),
            Err(error) => errors.push(PatternError {
                kind,
                pattern: source.clone(),
                reason: error.to_string(),
            }),
        }
    }
    compiled
}
