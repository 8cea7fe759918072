//! Classification outcomes and the reported record type.

use crate::primitives::{PrimitiveError, SourcePosition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of classifying an annotation comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Allowed prefix followed by an accepted suffix.
    Ok,
    /// Prefix matched the disallowed list.
    DisallowedPrefix,
    /// Allowed prefix whose suffix matched no suffix pattern.
    NonMatchingSuffix,
}

impl Status {
    /// Returns the report token (`ok`, `disallowedPrefix`, `nonMatchingSuffix`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::DisallowedPrefix => "disallowedPrefix",
            Self::NonMatchingSuffix => "nonMatchingSuffix",
        }
    }

    /// Returns true for well-formed annotations.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Classifier output for a single comment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Exact substring consumed by the matching prefix pattern.
    pub prefix: String,
    /// Remainder of the content after the prefix, untrimmed.
    pub suffix: String,
    /// Classification status.
    pub status: Status,
}

impl Classification {
    /// Build a classification from borrowed parts.
    #[must_use]
    pub fn new(prefix: &str, suffix: &str, status: Status) -> Self {
        Self {
            prefix: prefix.to_owned(),
            suffix: suffix.to_owned(),
            status,
        }
    }
}

/// One reported annotation occurrence.
///
/// Positions are zero-based; human-facing renderings add one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    prefix: String,
    suffix: String,
    line: u32,
    column: u32,
    status: Status,
}

impl Record {
    /// Build a record at a validated position.
    #[must_use]
    pub fn new(prefix: String, suffix: String, position: SourcePosition, status: Status) -> Self {
        Self {
            prefix,
            suffix,
            line: position.line(),
            column: position.column(),
            status,
        }
    }

    /// Build a record from signed coordinates, rejecting negative values.
    pub fn try_new(
        prefix: String,
        suffix: String,
        line: i64,
        column: i64,
        status: Status,
    ) -> Result<Self, PrimitiveError> {
        let position = SourcePosition::try_new(line, column)?;
        Ok(Self::new(prefix, suffix, position, status))
    }

    /// Combine a classification with the position of its comment.
    #[must_use]
    pub fn from_classification(classification: Classification, position: SourcePosition) -> Self {
        Self::new(
            classification.prefix,
            classification.suffix,
            position,
            classification.status,
        )
    }

    /// Matched prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Remainder after the prefix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Zero-based line.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Zero-based column.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Position of the comment start.
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column)
    }

    /// Classification status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Diagnostic text for non-`Ok` records: `<status-kind> (<hint>): <payload>`.
    #[must_use]
    pub fn diagnostic(&self) -> Option<String> {
        match self.status {
            Status::Ok => None,
            Status::DisallowedPrefix => Some(format!(
                "disallowed prefix (see --disallowed-prefixes): {}",
                self.prefix
            )),
            Status::NonMatchingSuffix => Some(format!(
                "invalid suffix (see --suffixes): {}",
                self.suffix
            )),
        }
    }

    /// Flat success line: `<path>:<line+1>:<column+1>:<prefix><suffix>`.
    #[must_use]
    pub fn success_line(&self, path: &str) -> String {
        let position = self.position();
        format!(
            "{path}:{}:{}:{}{}",
            position.display_line(),
            position.display_column(),
            self.prefix,
            self.suffix
        )
    }
}
