use std::fmt;
use todo_gate_shared::{ErrorEnvelope, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    Failed = 1,
    InvalidInput = 2,
    Io = 3,
    Internal = 4,
}

impl ExitCode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Exit code for a failed library call.
    #[must_use]
    pub fn for_envelope(error: &ErrorEnvelope) -> Self {
        match error.kind {
            ErrorKind::Expected => Self::InvalidInput,
            ErrorKind::Invariant => Self::Internal,
            ErrorKind::Unexpected if error.is_io() => Self::Io,
            ErrorKind::Unexpected => Self::Internal,
        }
    }
}

#[derive(Debug)]
pub enum CliError {
    Io(std::io::Error),
}

impl CliError {
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io(_) => ExitCode::Io,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(formatter, "io error: {error}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}
