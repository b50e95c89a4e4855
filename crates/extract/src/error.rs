//! Errors produced by the extractors.
//!
//! Structural failures abort the whole call; they are never downgraded.
//! Page-level failures inside a paged document are the one exception to that
//! rule and surface as [`ExtractionWarning::PartialPage`](crate::ExtractionWarning)
//! instead of an error here.

use thiserror::Error;

/// Fatal extraction failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The document's structure could not be parsed: a malformed container
    /// index, an encrypted document, a missing or invalid archive part, or
    /// unparseable markup. `stage` names the parse step that failed so the
    /// caller can show a specific message.
    #[error("corrupt document ({stage}): {detail}")]
    CorruptDocument {
        /// Parse step that failed, e.g. `pdf-index` or `docx-archive`.
        stage: &'static str,
        /// Underlying parser message.
        detail: String,
    },

    /// Paged extraction exceeded its wall-clock bound. Outstanding page jobs
    /// were cancelled; the user may retry.
    #[error("extraction timed out after {limit_ms} ms")]
    Timeout {
        /// The configured bound, in milliseconds.
        limit_ms: u64,
    },

    /// An extraction worker task failed to complete (cancelled mid-flight or
    /// panicked). Not a statement about the document itself.
    #[error("extraction task failed: {0}")]
    TaskFailed(String),
}

impl ExtractError {
    pub(crate) fn corrupt(stage: &'static str, detail: impl ToString) -> Self {
        ExtractError::CorruptDocument {
            stage,
            detail: detail.to_string(),
        }
    }
}
