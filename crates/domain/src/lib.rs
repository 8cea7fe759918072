//! # todo-gate-domain
//!
//! Domain model for annotation comment checking.
//!
//! - **Primitives** - `SourcePosition`, `PrimitiveError`
//! - **Language** - extension based `Language` detection
//! - **Rules** - `RulePatterns`, compiled `RuleSet`
//! - **Records** - `Status`, `Classification`, `Record`
//! - **Classifier** - `classify`
//!
//! ## Dependency Rules
//!
//! - Depends only on the `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use todo_gate_shared::shared_crate_version;

pub mod classify;
pub mod language;
pub mod primitives;
pub mod record;
pub mod rules;

pub use classify::{ClassifyError, classify};
pub use language::Language;
pub use primitives::{PrimitiveError, SourcePosition};
pub use record::{Classification, Record, Status};
pub use rules::{PatternError, PatternKind, RulePatterns, RuleSet, RuleSetError};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
