//! Human and machine readable renderings of a check outcome.

use crate::check_files::{CheckOutcome, FileScan};
use serde::Serialize;
use std::fmt::Write as _;
use todo_gate_domain::Record;
use todo_gate_shared::{ErrorCode, ErrorEnvelope, Result};

/// Closing line printed after the failure blocks.
pub const FAILURE_SUMMARY: &str = "One or more TODOs were invalid. Please see above.";

/// One entry of the structured report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry<'a> {
    /// Path as shown to the user.
    pub path: &'a str,
    /// `Ok` records of the file, in source order.
    pub records: &'a [Record],
}

/// Report entries for files with at least one `Ok` record, in input order.
#[must_use]
pub fn build_report(outcome: &CheckOutcome) -> Vec<ReportEntry<'_>> {
    outcome
        .files
        .iter()
        .filter(|file| !file.ok.is_empty())
        .map(|file| ReportEntry {
            path: &file.path,
            records: &file.ok,
        })
        .collect()
}

/// Render the structured report as pretty JSON with a trailing newline.
pub fn render_report_json(outcome: &CheckOutcome) -> Result<String> {
    let mut output = serde_json::to_string_pretty(&build_report(outcome)).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("report", "serialize_json"),
            format!("failed to serialize report: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// One `<path>:<line>:<column>:<prefix><suffix>` line per `Ok` record.
#[must_use]
pub fn render_success_lines(outcome: &CheckOutcome) -> String {
    let mut output = String::new();
    for file in &outcome.files {
        for record in &file.ok {
            output.push_str(&record.success_line(&file.path));
            output.push('\n');
        }
    }
    output
}

/// `OK, <n> todo(s): <path>` for every passing file.
#[must_use]
pub fn render_verbose(outcome: &CheckOutcome) -> String {
    let mut output = String::new();
    for file in outcome.files.iter().filter(|file| file.passed()) {
        let _ = writeln!(output, "OK, {} todo(s): {}", file.ok.len(), file.path);
    }
    output
}

/// Failure blocks for every failing file, followed by the summary line.
///
/// Empty when the outcome passed.
#[must_use]
pub fn render_failures(outcome: &CheckOutcome) -> String {
    let mut output = String::new();
    for file in outcome.files.iter().filter(|file| !file.passed()) {
        render_failure_block(&mut output, file);
    }
    if !output.is_empty() {
        output.push_str(FAILURE_SUMMARY);
        output.push('\n');
    }
    output
}

fn render_failure_block(output: &mut String, file: &FileScan) {
    let _ = writeln!(output, "FAILED: {}", file.path);
    for record in &file.failures {
        let Some(diagnostic) = record.diagnostic() else {
            continue;
        };
        let position = record.position();
        let _ = writeln!(
            output,
            " * Line {}, column {}: {diagnostic}",
            position.display_line(),
            position.display_column()
        );
    }
}
