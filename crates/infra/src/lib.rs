//! # todo-gate-infra
//!
//! Infrastructure wiring and runtime composition.
//! This crate depends on `app`, `adapters`, `config`, and `shared`.

/// Local check orchestration.
pub mod check_local;
/// Config loading helpers used by CLI surfaces.
pub mod config_check;
/// Environment validation helpers used by CLI surfaces.
pub mod env_check;

pub use check_local::{build_check_deps, build_check_input, run_check_local};
pub use config_check::{load_effective_config, load_effective_config_text};
pub use env_check::{InfraError, InfraResult, validate_env_parsing};

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
