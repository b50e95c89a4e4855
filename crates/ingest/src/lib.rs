//! Candidate file validation.
//!
//! This is the gate at the front of the extraction pipeline. A user-selected
//! file arrives as a [`CandidateFile`] (declared name, optional content-type
//! hint, raw bytes) and is checked against an [`IngestPolicy`] before any
//! parsing cost is paid:
//!
//! - **Type policy** - the file extension must be on the configured
//!   allow-list (case-insensitive). Anything else, including a missing
//!   extension, is rejected with [`RejectReason::UnsupportedType`].
//! - **Size policy** - a file at or above the configured byte limit is
//!   rejected with [`RejectReason::TooLarge`] without reading its content.
//!
//! Validation is pure and synchronous. A file that fails it never reaches an
//! extractor; the caller surfaces the typed [`RejectReason`] to the user.
//!
//! # Example
//!
//! ```
//! use ingest::{validate, CandidateFile, IngestPolicy, ValidationResult};
//!
//! let policy = IngestPolicy::default();
//! let file = CandidateFile::new("notes.txt", b"Hello\nWorld".to_vec());
//!
//! assert!(matches!(validate(&file, &policy), ValidationResult::Accepted));
//!
//! let file = CandidateFile::new("movie.mp4", vec![0u8; 16]);
//! assert!(matches!(validate(&file, &policy), ValidationResult::Rejected(_)));
//! ```

use tracing::{debug, warn};

mod config;
mod error;
mod types;

pub use crate::config::{IngestPolicy, PolicyError};
pub use crate::error::RejectReason;
pub use crate::types::{CandidateFile, ValidationResult};

/// Checks a candidate file against the type/size policy.
///
/// Runs before any structural parsing: the extension check and the size check
/// only look at the declared name and byte length, never at the content. The
/// returned [`ValidationResult`] is consumed immediately by the format
/// router; rejected files must not be handed to an extractor.
pub fn validate(file: &CandidateFile, policy: &IngestPolicy) -> ValidationResult {
    let extension = file.extension();

    let allowed = extension
        .as_deref()
        .is_some_and(|ext| policy.allows_extension(ext));
    if !allowed {
        warn!(
            name = %file.name(),
            extension = ?extension,
            "candidate rejected: unsupported type"
        );
        return ValidationResult::Rejected(RejectReason::UnsupportedType { extension });
    }

    if file.size() >= policy.max_file_bytes {
        warn!(
            name = %file.name(),
            size = file.size(),
            limit = policy.max_file_bytes,
            "candidate rejected: too large"
        );
        return ValidationResult::Rejected(RejectReason::TooLarge {
            size: file.size(),
            limit: policy.max_file_bytes,
        });
    }

    debug!(name = %file.name(), size = file.size(), "candidate accepted");
    ValidationResult::Accepted
}
