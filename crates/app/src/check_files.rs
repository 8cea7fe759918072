//! Check annotation comments across a set of input files.

use crate::scan::scan_source;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use todo_gate_domain::{Language, Record, RuleSet};
use todo_gate_ports::{
    FileResolverPort, ResolveRequest, SourceFile, SourceParserPort, SourceReaderPort,
};
use todo_gate_shared::{ErrorCode, ErrorEnvelope, Result};

/// Input payload for checking files.
#[derive(Debug, Clone)]
pub struct CheckFilesInput {
    /// Directory relative input patterns are resolved against.
    pub root: PathBuf,
    /// Include globs or literal paths, in output order.
    pub includes: Vec<Box<str>>,
    /// Exclude globs or literal paths.
    pub excludes: Vec<Box<str>>,
    /// Compiled rules shared by every file.
    pub rules: Arc<RuleSet>,
    /// Number of files scanned concurrently.
    pub jobs: usize,
}

/// Dependencies required by check-files.
#[derive(Clone)]
pub struct CheckFilesDeps {
    /// Input resolver.
    pub resolver: Arc<dyn FileResolverPort>,
    /// Source reader.
    pub reader: Arc<dyn SourceReaderPort>,
    /// Comment parser.
    pub parser: Arc<dyn SourceParserPort>,
}

/// Records of one scanned file, split by outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileScan {
    /// Path as shown to the user.
    pub path: Box<str>,
    /// Records with status `Ok`.
    pub ok: Vec<Record>,
    /// Records with any other status.
    pub failures: Vec<Record>,
}

impl FileScan {
    fn from_records(path: &str, records: Vec<Record>) -> Self {
        let (ok, failures) = records
            .into_iter()
            .partition(|record| record.status().is_ok());
        Self {
            path: path.into(),
            ok,
            failures,
        }
    }

    /// Returns true when the file has no failing records.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Per-file results in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Scanned files, in resolver order.
    pub files: Vec<FileScan>,
}

impl CheckOutcome {
    /// Returns true when no file has a failing record.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.files.iter().all(FileScan::passed)
    }

    /// Total number of `Ok` records.
    #[must_use]
    pub fn ok_count(&self) -> usize {
        self.files.iter().map(|file| file.ok.len()).sum()
    }

    /// Total number of failing records.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.files.iter().map(|file| file.failures.len()).sum()
    }
}

/// Resolve the inputs, then scan every file for annotation comments.
///
/// The first error in input order aborts the run.
#[tracing::instrument(
    name = "app.check_files",
    skip_all,
    fields(includes = input.includes.len(), jobs = input.jobs)
)]
pub fn check_files(deps: &CheckFilesDeps, input: &CheckFilesInput) -> Result<CheckOutcome> {
    let request = ResolveRequest {
        root: input.root.clone(),
        includes: input.includes.clone(),
        excludes: input.excludes.clone(),
    };
    let sources = deps.resolver.resolve(&request)?;
    tracing::debug!(files = sources.len(), "resolved inputs");

    let files = if input.jobs > 1 && sources.len() > 1 {
        scan_parallel(deps, &input.rules, &sources, input.jobs)?
    } else {
        sources
            .iter()
            .map(|source| scan_file(deps, &input.rules, source))
            .collect::<Result<Vec<_>>>()?
    };

    let outcome = CheckOutcome { files };
    tracing::debug!(
        ok = outcome.ok_count(),
        failures = outcome.failure_count(),
        "check completed"
    );
    Ok(outcome)
}

// Indexed parallel iterators collect in input order.
fn scan_parallel(
    deps: &CheckFilesDeps,
    rules: &RuleSet,
    sources: &[SourceFile],
    jobs: usize,
) -> Result<Vec<FileScan>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|error| {
            ErrorEnvelope::unexpected(
                ErrorCode::internal(),
                format!("failed to start scan workers: {error}"),
            )
        })?;

    let results: Vec<Result<FileScan>> = pool.install(|| {
        sources
            .par_iter()
            .map(|source| scan_file(deps, rules, source))
            .collect()
    });
    results.into_iter().collect()
}

fn scan_file(deps: &CheckFilesDeps, rules: &RuleSet, source: &SourceFile) -> Result<FileScan> {
    let attach_path = |error: ErrorEnvelope| error.with_path(source.display());

    let text = deps.reader.read_source(source.path()).map_err(attach_path)?;
    let language = Language::from_path(source.path());
    let parsed = deps.parser.parse(text, language);
    let records = scan_source(&parsed, rules).map_err(attach_path)?;
    tracing::trace!(
        path = source.display(),
        %language,
        records = records.len(),
        "scanned file"
    );

    Ok(FileScan::from_records(source.display(), records))
}
