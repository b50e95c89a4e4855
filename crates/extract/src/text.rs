//! Plain-text extractor.

use tracing::debug;

use crate::types::ExtractedDocument;

/// Decodes raw bytes as UTF-8 text.
///
/// The decode is permissive: invalid byte sequences become U+FFFD
/// replacement characters rather than failing the extraction or silently
/// disappearing. Deterministic, single-threaded, never fails.
pub fn extract_text(bytes: &[u8]) -> ExtractedDocument {
    let text = String::from_utf8_lossy(bytes).into_owned();
    debug!(input_len = bytes.len(), text_len = text.len(), "plain text decoded");
    ExtractedDocument::flat(text)
}
