//! Validation policy configuration.
//!
//! [`IngestPolicy`] holds the externally supplied policy constants: the
//! extension allow-list and the maximum file size. It is cheap to clone and
//! serializable so it can be loaded from configuration files alongside the
//! other stage configs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_MAX_FILE_BYTES: usize = 25 * 1024 * 1024;

/// Type/size policy applied to every candidate file.
///
/// The defaults match the product policy: exactly `{pdf, doc, docx, txt}`
/// and a 25 MiB ceiling. Both are configuration constants, not negotiated at
/// runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IngestPolicy {
    /// Accepted file extensions, matched case-insensitively against the
    /// candidate's lowercased extension.
    pub allowed_extensions: Vec<String>,

    /// Upper bound on file size in bytes. A candidate at or above this
    /// limit is rejected without reading its content.
    pub max_file_bytes: usize,
}

impl Default for IngestPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: ["pdf", "doc", "docx", "txt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl IngestPolicy {
    /// Returns true if the (already lowercased) extension is allow-listed.
    pub fn allows_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }

    /// Validates internal consistency of this policy.
    ///
    /// Intended to be called at process start-up so misconfigurations fail
    /// fast instead of rejecting every file at request time.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.allowed_extensions.is_empty() {
            return Err(PolicyError::EmptyAllowList);
        }
        if self.max_file_bytes == 0 {
            return Err(PolicyError::ZeroSizeLimit);
        }
        Ok(())
    }
}

/// Configuration-time policy errors, surfaced at service start-up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// The allow-list is empty, so every candidate would be rejected.
    #[error("allowed_extensions is empty; every candidate file would be rejected")]
    EmptyAllowList,

    /// The size limit is zero, so every candidate would be rejected.
    #[error("max_file_bytes is 0; every candidate file would be rejected")]
    ZeroSizeLimit,
}
