//! Rule-based classification of raw comment text.

use crate::record::{Classification, Status};
use crate::rules::RuleSet;
use regex::Regex;
use thiserror::Error;
use todo_gate_shared::{ErrorCode, ErrorEnvelope};

const LINE_COMMENT_MARKER: &str = "//";
const BLOCK_COMMENT_OPEN: &str = "/*";
const BLOCK_COMMENT_CLOSE: &str = "*/";
const EXCERPT_CHARS: usize = 40;

/// Comment text that violates the delimiter contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// A block comment whose text does not end with `*/`.
    #[error("block comment is not closed: {excerpt}")]
    UnterminatedBlockComment {
        /// Leading part of the offending text.
        excerpt: String,
    },
}

impl From<ClassifyError> for ErrorEnvelope {
    fn from(error: ClassifyError) -> Self {
        match &error {
            ClassifyError::UnterminatedBlockComment { excerpt } => Self::invariant(
                ErrorCode::new("domain", "malformed_block_comment"),
                error.to_string(),
            )
            .with_metadata("excerpt", excerpt.clone()),
        }
    }
}

/// Classify one comment text against the rule set.
///
/// Returns `Ok(None)` when the text is not a `//` or `/* */` comment or when
/// its content matches neither a prefix nor a disallowed prefix pattern.
///
/// Prefix patterns are tried in order and the first match wins. A prefix
/// match is never re-checked against the disallowed list. Patterns are
/// searched, not implicitly anchored; the prefix is the matched text and the
/// suffix is everything after it.
pub fn classify(text: &str, rules: &RuleSet) -> Result<Option<Classification>, ClassifyError> {
    let Some(content) = comment_content(text.trim())? else {
        return Ok(None);
    };
    let content = content.trim();

    if let Some((prefix, suffix)) = first_match(rules.prefixes(), content) {
        let status = if rules.suffixes().iter().any(|pattern| pattern.is_match(suffix)) {
            Status::Ok
        } else {
            Status::NonMatchingSuffix
        };
        return Ok(Some(Classification::new(prefix, suffix, status)));
    }

    Ok(first_match(rules.disallowed_prefixes(), content)
        .map(|(prefix, suffix)| Classification::new(prefix, suffix, Status::DisallowedPrefix)))
}

fn comment_content(text: &str) -> Result<Option<&str>, ClassifyError> {
    if let Some(rest) = text.strip_prefix(LINE_COMMENT_MARKER) {
        return Ok(Some(rest));
    }

    if let Some(rest) = text.strip_prefix(BLOCK_COMMENT_OPEN) {
        return rest
            .strip_suffix(BLOCK_COMMENT_CLOSE)
            .map(Some)
            .ok_or_else(|| ClassifyError::UnterminatedBlockComment {
                excerpt: text.chars().take(EXCERPT_CHARS).collect(),
            });
    }

    Ok(None)
}

fn first_match<'a>(patterns: &[Regex], content: &'a str) -> Option<(&'a str, &'a str)> {
    patterns.iter().find_map(|pattern| {
        pattern
            .find(content)
            .map(|found| (found.as_str(), content.get(found.end()..).unwrap_or_default()))
    })
}
