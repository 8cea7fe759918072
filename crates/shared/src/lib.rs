//! # todo-gate-shared
//!
//! Shared result types and error handling for the todo-gate workspace.
//!
//! - `ErrorEnvelope` with a stable `ErrorCode` and diagnostic metadata
//! - the workspace-wide `Result` alias
//! - bounded numeric wrappers used by validated configuration
//!
//! This crate has no workspace dependencies.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod invariants;
pub mod result;

pub use errors::{
    ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata, PATH_METADATA_KEY, error_code_from_io_kind,
};
pub use invariants::{BoundedU32, BoundsError};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
