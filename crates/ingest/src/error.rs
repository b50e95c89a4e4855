//! Rejection reasons produced by validation.
//!
//! The reasons form a closed enumeration: callers can match exhaustively to
//! map each case to a specific user-facing message (pick another format vs.
//! pick a smaller file). All variants are cloneable and comparable so tests
//! and error-handling paths can assert on them precisely.

use thiserror::Error;

/// Why a candidate file was refused before any parsing was attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The file extension is not on the allow-list (or the name has none).
    ///
    /// Recovery: the user must pick a file in a supported format.
    #[error("unsupported file type: {}", .extension.as_deref().unwrap_or("(no extension)"))]
    UnsupportedType {
        /// The lowercased extension that failed the allow-list, if any.
        extension: Option<String>,
    },

    /// The file is at or above the configured size limit.
    ///
    /// Recovery: the user must pick a smaller file.
    #[error("file size {size} bytes is at or above the limit of {limit} bytes")]
    TooLarge {
        /// Declared size of the rejected file, in bytes.
        size: usize,
        /// Configured upper bound, in bytes.
        limit: usize,
    },
}
