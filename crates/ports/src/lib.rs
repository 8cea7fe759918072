//! # todo-gate-ports
//!
//! Port traits for the todo-gate hexagonal architecture.
//!
//! This crate defines the interfaces between the use cases and the
//! infrastructure adapters. It depends only on `domain` and `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod filesystem;
pub mod parser;

pub use filesystem::*;
pub use parser::*;

// Re-export domain types used in port signatures, so adapter crates can
// implement ports without directly depending on `todo-gate-domain`.
pub use todo_gate_domain::{Language, SourcePosition};
