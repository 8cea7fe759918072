//! In-memory adapter implementations for port contracts.
//!
//! These implementations are intended for:
//! - Unit/integration tests of the check use case
//! - Deterministic contract tests for the ports layer

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use todo_gate_ports::{
    FileResolverPort, Language, ParsedSource, ResolveRequest, SourceFile, SourceParserPort,
    SourceReaderPort,
};
use todo_gate_shared::{ErrorCode, ErrorEnvelope, Result};

/// A file of an [`InMemorySourceTree`].
#[derive(Debug, Clone)]
struct InMemoryFile {
    path: String,
    contents: Option<String>,
}

/// Source files held in memory, serving as both resolver and reader.
///
/// A pattern selects a file when it equals the file path, when it is `*`, or
/// when it names one of the file's parent directories. Within one include
/// pattern files keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySourceTree {
    files: Vec<InMemoryFile>,
}

impl InMemorySourceTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a readable file.
    #[must_use]
    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.push(InMemoryFile {
            path: path.to_owned(),
            contents: Some(contents.to_owned()),
        });
        self
    }

    /// Add a file that resolves but fails to read.
    #[must_use]
    pub fn with_unreadable(mut self, path: &str) -> Self {
        self.files.push(InMemoryFile {
            path: path.to_owned(),
            contents: None,
        });
        self
    }

    /// Wrap the tree for use as port trait objects.
    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

fn selects(pattern: &str, path: &str) -> bool {
    let pattern = pattern.trim_end_matches('/');
    pattern == "*"
        || pattern == path
        || path
            .strip_prefix(pattern)
            .is_some_and(|rest| rest.starts_with('/'))
}

impl FileResolverPort for InMemorySourceTree {
    fn resolve(&self, request: &ResolveRequest) -> Result<Vec<SourceFile>> {
        let mut resolved: Vec<SourceFile> = Vec::new();
        for include in &request.includes {
            let before = resolved.len();
            for file in &self.files {
                let excluded = request
                    .excludes
                    .iter()
                    .any(|exclude| selects(exclude, &file.path));
                let seen = resolved.iter().any(|known| known.display() == file.path);
                if selects(include, &file.path) && !excluded && !seen {
                    resolved.push(SourceFile::new(&file.path, file.path.as_str()));
                }
            }
            if resolved.len() == before && !include.contains('*') {
                return Err(ErrorEnvelope::expected(
                    ErrorCode::new("scan", "input_not_found"),
                    format!("input does not exist: {include}"),
                )
                .with_path(include.to_string()));
            }
        }
        Ok(resolved)
    }
}

impl SourceReaderPort for InMemorySourceTree {
    fn read_source(&self, path: &Path) -> Result<Box<str>> {
        let wanted = path.to_string_lossy();
        let file = self
            .files
            .iter()
            .find(|file| file.path == wanted)
            .ok_or_else(|| not_found(&wanted))?;
        file.contents
            .as_deref()
            .map(Into::into)
            .ok_or_else(|| {
                ErrorEnvelope::unexpected(ErrorCode::io(), format!("failed to read {wanted}"))
            })
    }
}

fn not_found(path: &str) -> ErrorEnvelope {
    ErrorEnvelope::unexpected(ErrorCode::not_found(), format!("no such file: {path}"))
}

/// Parser wrapper counting how many sources went through it.
#[derive(Debug, Default)]
pub struct CountingParser<P> {
    inner: P,
    calls: AtomicUsize,
}

impl<P> CountingParser<P> {
    /// Wrap `inner`.
    pub const fn new(inner: P) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `parse` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<P: SourceParserPort> SourceParserPort for CountingParser<P> {
    fn parse(&self, source: Box<str>, language: Language) -> ParsedSource {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.parse(source, language)
    }
}

/// A parser that never finds comments, like a grammar rejecting the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCommentsParser;

impl SourceParserPort for NoCommentsParser {
    fn parse(&self, source: Box<str>, language: Language) -> ParsedSource {
        ParsedSource::empty(source, language)
    }
}
