//! # todo-gate-app
//!
//! Application use cases for annotation comment checking.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod check_files;
pub mod report;
pub mod scan;

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use check_files::{CheckFilesDeps, CheckFilesInput, CheckOutcome, FileScan, check_files};
pub use report::{
    FAILURE_SUMMARY, ReportEntry, build_report, render_failures, render_report_json,
    render_success_lines, render_verbose,
};
pub use scan::{SourceWalker, scan_source};
