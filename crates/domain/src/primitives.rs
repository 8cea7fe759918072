//! Domain primitives with validated constructors.

use serde::{Deserialize, Serialize};
use std::fmt;
use todo_gate_shared::{ErrorCode, ErrorEnvelope};

/// Validation failures for domain primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// A source line index was negative.
    NegativeLine {
        /// Raw line provided.
        line: i64,
    },
    /// A source column index was negative.
    NegativeColumn {
        /// Raw column provided.
        column: i64,
    },
    /// A position component does not fit the supported range.
    PositionOutOfRange {
        /// Component name (`line` or `column`).
        component: &'static str,
        /// Raw value provided.
        value: u64,
    },
}

impl PrimitiveError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::NegativeLine { .. } | Self::NegativeColumn { .. } => {
                ErrorCode::new("domain", "negative_position")
            },
            Self::PositionOutOfRange { .. } => ErrorCode::new("domain", "position_out_of_range"),
        }
    }
}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLine { line } => {
                write!(formatter, "line must be non-negative (got {line})")
            },
            Self::NegativeColumn { column } => {
                write!(formatter, "column must be non-negative (got {column})")
            },
            Self::PositionOutOfRange { component, value } => {
                write!(formatter, "{component} {value} exceeds the supported range")
            },
        }
    }
}

impl std::error::Error for PrimitiveError {}

impl From<PrimitiveError> for ErrorEnvelope {
    fn from(error: PrimitiveError) -> Self {
        let envelope = Self::invariant(error.error_code(), error.to_string());
        match error {
            PrimitiveError::NegativeLine { line } => {
                envelope.with_metadata("line", line.to_string())
            },
            PrimitiveError::NegativeColumn { column } => {
                envelope.with_metadata("column", column.to_string())
            },
            PrimitiveError::PositionOutOfRange { component, value } => envelope
                .with_metadata("component", component)
                .with_metadata("value", value.to_string()),
        }
    }
}

/// Zero-based position of a comment start within its source file.
///
/// `column` counts Unicode scalar values from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    line: u32,
    column: u32,
}

impl SourcePosition {
    /// Construct a position from values already known to be in range.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Construct a position from signed values, rejecting negatives.
    pub fn try_new(line: i64, column: i64) -> Result<Self, PrimitiveError> {
        if line < 0 {
            return Err(PrimitiveError::NegativeLine { line });
        }
        if column < 0 {
            return Err(PrimitiveError::NegativeColumn { column });
        }

        let line = narrow("line", line.unsigned_abs())?;
        let column = narrow("column", column.unsigned_abs())?;
        Ok(Self { line, column })
    }

    /// Construct a position from parser-native `usize` offsets.
    pub fn from_usize(line: usize, column: usize) -> Result<Self, PrimitiveError> {
        let line = narrow("line", u64::try_from(line).unwrap_or(u64::MAX))?;
        let column = narrow("column", u64::try_from(column).unwrap_or(u64::MAX))?;
        Ok(Self { line, column })
    }

    /// Zero-based line index.
    #[must_use]
    pub const fn line(self) -> u32 {
        self.line
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn column(self) -> u32 {
        self.column
    }

    /// One-based line number for human-facing output.
    #[must_use]
    pub const fn display_line(self) -> u64 {
        self.line as u64 + 1
    }

    /// One-based column number for human-facing output.
    #[must_use]
    pub const fn display_column(self) -> u64 {
        self.column as u64 + 1
    }
}

fn narrow(component: &'static str, value: u64) -> Result<u32, PrimitiveError> {
    u32::try_from(value).map_err(|_| PrimitiveError::PositionOutOfRange { component, value })
}
