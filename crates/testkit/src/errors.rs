//! Test fixtures for shared error codes and envelopes.

use todo_gate_shared::{ErrorCode, ErrorEnvelope};

/// Return a list of common error codes used in tests.
pub fn common_error_codes() -> Vec<ErrorCode> {
    vec![
        ErrorCode::invalid_input(),
        ErrorCode::not_found(),
        ErrorCode::permission_denied(),
        ErrorCode::io(),
        ErrorCode::internal(),
    ]
}

/// An invalid input error fixture.
pub fn invalid_input_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid input")
}

/// A missing file error fixture, as produced by source readers.
pub fn not_found_error(path: &str) -> ErrorEnvelope {
    ErrorEnvelope::unexpected(ErrorCode::not_found(), format!("no such file: {path}"))
        .with_path(path)
}
