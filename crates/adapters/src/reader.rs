//! Local filesystem source reader.

use std::path::Path;
use todo_gate_ports::SourceReaderPort;
use todo_gate_shared::{ErrorEnvelope, Result};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads sources from disk, decoding UTF-8 lossily.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSourceReader;

impl LocalSourceReader {
    /// Create a reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SourceReaderPort for LocalSourceReader {
    fn read_source(&self, path: &Path) -> Result<Box<str>> {
        let bytes = std::fs::read(path).map_err(|error| {
            ErrorEnvelope::from(error).with_path(path.display().to_string())
        })?;
        Ok(decode_source(path, &bytes))
    }
}

fn decode_source(path: &Path, bytes: &[u8]) -> Box<str> {
    let text = String::from_utf8_lossy(bytes);
    if matches!(text, std::borrow::Cow::Owned(_)) {
        tracing::debug!(path = %path.display(), "replaced invalid UTF-8 sequences");
    }
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&text);
    text.into()
}
