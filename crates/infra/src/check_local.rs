//! Local check orchestration: config to rules to adapters to use case.

use crate::InfraResult;
use std::path::Path;
use std::sync::Arc;
use todo_gate_adapters::{GlobFileResolver, LocalSourceReader, TreeSitterCommentParser};
use todo_gate_app::{CheckFilesDeps, CheckFilesInput, CheckOutcome, check_files};
use todo_gate_config::ValidatedGateConfig;
use todo_gate_shared::{ErrorCode, ErrorEnvelope};

/// Wire the local filesystem adapters.
#[must_use]
pub fn build_check_deps() -> CheckFilesDeps {
    CheckFilesDeps {
        resolver: Arc::new(GlobFileResolver::new()),
        reader: Arc::new(LocalSourceReader::new()),
        parser: Arc::new(TreeSitterCommentParser::new()),
    }
}

/// Build the use case input from a validated config.
///
/// Rules are compiled here, so a bad pattern fails before any file is read.
pub fn build_check_input(config: &ValidatedGateConfig, root: &Path) -> InfraResult<CheckFilesInput> {
    let rules = config.compile_rules()?;
    let raw = config.as_ref();
    if raw.inputs.includes.is_empty() {
        return Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "missing_inputs"),
            "no inputs given; pass --inputs or set inputs.includes in the config",
        ));
    }

    Ok(CheckFilesInput {
        root: root.to_path_buf(),
        includes: boxed(&raw.inputs.includes),
        excludes: boxed(&raw.inputs.excludes),
        rules: Arc::new(rules),
        jobs: config.jobs().as_usize(),
    })
}

fn boxed(values: &[String]) -> Vec<Box<str>> {
    values.iter().map(|value| value.as_str().into()).collect()
}

/// Run a check against the local filesystem.
#[tracing::instrument(name = "infra.run_check_local", skip_all, fields(root = %root.display()))]
pub fn run_check_local(config: &ValidatedGateConfig, root: &Path) -> InfraResult<CheckOutcome> {
    let input = build_check_input(config, root)?;
    check_files(&build_check_deps(), &input)
}
