//! Filesystem boundary contracts: input resolution and source reading.

use std::path::{Path, PathBuf};
use todo_gate_shared::Result;

/// A resolved input file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    path: PathBuf,
    display: Box<str>,
}

impl SourceFile {
    /// Create a source file entry.
    pub fn new(path: impl Into<PathBuf>, display: impl Into<Box<str>>) -> Self {
        Self {
            path: path.into(),
            display: display.into(),
        }
    }

    /// Path used to read the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path as reported in diagnostics and reports.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }
}

/// Include/exclude patterns evaluated against a working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Directory relative patterns are resolved against.
    pub root: PathBuf,
    /// Include globs or literal paths; their order defines output order.
    pub includes: Vec<Box<str>>,
    /// Exclude globs or literal paths.
    pub excludes: Vec<Box<str>>,
}

/// Boundary contract for turning patterns into an ordered file list.
pub trait FileResolverPort: Send + Sync {
    /// Resolve the request into files in deterministic order.
    fn resolve(&self, request: &ResolveRequest) -> Result<Vec<SourceFile>>;
}

/// Boundary contract for loading source text.
pub trait SourceReaderPort: Send + Sync {
    /// Read a file as text.
    fn read_source(&self, path: &Path) -> Result<Box<str>>;
}
