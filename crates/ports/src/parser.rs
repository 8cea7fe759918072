//! Source parsing boundary contract.

use std::ops::Range;
use todo_gate_domain::{Language, SourcePosition};
use todo_gate_shared::{ErrorCode, ErrorEnvelope, Result};

/// A comment-bearing token located by a parser.
///
/// `row` is zero-based and `byte_column` is the byte offset of the token
/// start from the beginning of its line, as reported by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTrivia {
    byte_range: Range<usize>,
    row: usize,
    byte_column: usize,
}

impl CommentTrivia {
    /// Create a trivia entry.
    #[must_use]
    pub const fn new(byte_range: Range<usize>, row: usize, byte_column: usize) -> Self {
        Self {
            byte_range,
            row,
            byte_column,
        }
    }

    /// Byte range of the token in the source.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_range.clone()
    }

    /// Start byte offset.
    #[must_use]
    pub const fn start_byte(&self) -> usize {
        self.byte_range.start
    }

    /// Zero-based row of the token start.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Byte column of the token start within its row.
    #[must_use]
    pub const fn byte_column(&self) -> usize {
        self.byte_column
    }
}

/// Parser output for a single file: the source text and its comment trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSource {
    source: Box<str>,
    language: Language,
    trivia: Vec<CommentTrivia>,
}

impl ParsedSource {
    /// Build a parsed source; trivia are ordered by start offset.
    #[must_use]
    pub fn new(source: Box<str>, language: Language, mut trivia: Vec<CommentTrivia>) -> Self {
        trivia.sort_by_key(CommentTrivia::start_byte);
        Self {
            source,
            language,
            trivia,
        }
    }

    /// A parse result without any comments (e.g. when no tree was produced).
    #[must_use]
    pub const fn empty(source: Box<str>, language: Language) -> Self {
        Self {
            source,
            language,
            trivia: Vec::new(),
        }
    }

    /// Full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Language the source was parsed as.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Comment trivia in source order.
    #[must_use]
    pub fn trivia(&self) -> &[CommentTrivia] {
        &self.trivia
    }

    /// Literal text of a trivia entry.
    pub fn text(&self, trivia: &CommentTrivia) -> Result<&str> {
        self.source
            .get(trivia.byte_range())
            .ok_or_else(|| out_of_bounds(trivia, "trivia range is not a valid source slice"))
    }

    /// Zero-based line and character column of a trivia start.
    pub fn position(&self, trivia: &CommentTrivia) -> Result<SourcePosition> {
        let line_start = trivia
            .start_byte()
            .checked_sub(trivia.byte_column())
            .ok_or_else(|| out_of_bounds(trivia, "trivia column exceeds its start offset"))?;
        let leading = self
            .source
            .get(line_start..trivia.start_byte())
            .ok_or_else(|| out_of_bounds(trivia, "trivia line start is not a valid slice"))?;

        SourcePosition::from_usize(trivia.row(), leading.chars().count()).map_err(Into::into)
    }
}

fn out_of_bounds(trivia: &CommentTrivia, message: &str) -> ErrorEnvelope {
    ErrorEnvelope::invariant(ErrorCode::new("scan", "trivia_out_of_bounds"), message)
        .with_metadata("start_byte", trivia.byte_range.start.to_string())
        .with_metadata("end_byte", trivia.byte_range.end.to_string())
        .with_metadata("row", trivia.row.to_string())
}

/// Boundary contract for comment-aware parsers.
///
/// Implementations must tolerate unparsable input and return a best-effort
/// (possibly empty) result instead of failing.
pub trait SourceParserPort: Send + Sync {
    /// Parse source text and collect its comment trivia.
    fn parse(&self, source: Box<str>, language: Language) -> ParsedSource;
}
