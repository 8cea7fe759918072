//! Source walker: comment trivia to classified records.

use todo_gate_domain::{Record, RuleSet, classify};
use todo_gate_ports::{CommentTrivia, ParsedSource};
use todo_gate_shared::{ErrorEnvelope, Result};

/// Walks the comments of one parsed source and classifies each of them.
///
/// The walker holds no cursor state; every call to [`SourceWalker::records`]
/// starts from the first comment and yields the same sequence.
#[derive(Debug, Clone, Copy)]
pub struct SourceWalker<'a> {
    parsed: &'a ParsedSource,
    rules: &'a RuleSet,
}

impl<'a> SourceWalker<'a> {
    /// Create a walker over `parsed` using `rules`.
    #[must_use]
    pub const fn new(parsed: &'a ParsedSource, rules: &'a RuleSet) -> Self {
        Self { parsed, rules }
    }

    /// Lazily classify comments in document order.
    ///
    /// Comments without a recognized annotation are skipped.
    pub fn records(self) -> impl Iterator<Item = Result<Record>> + 'a {
        let Self { parsed, rules } = self;
        parsed
            .trivia()
            .iter()
            .filter_map(move |trivia| record_for(parsed, rules, trivia).transpose())
    }
}

fn record_for(
    parsed: &ParsedSource,
    rules: &RuleSet,
    trivia: &CommentTrivia,
) -> Result<Option<Record>> {
    let text = parsed.text(trivia)?;
    let Some(classification) = classify(text, rules).map_err(ErrorEnvelope::from)? else {
        return Ok(None);
    };
    let position = parsed.position(trivia)?;
    Ok(Some(Record::from_classification(classification, position)))
}

/// Classify every comment of `parsed`, in document order.
pub fn scan_source(parsed: &ParsedSource, rules: &RuleSet) -> Result<Vec<Record>> {
    SourceWalker::new(parsed, rules).records().collect()
}
