//! Core data model types for validation.
//!
//! [`CandidateFile`] is the shape of an unvalidated user selection: the
//! declared file name, an optional content-type hint from the picker, and the
//! raw bytes. The pipeline borrows it for the duration of one call and never
//! retains a reference past the call.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// An unvalidated file selected by a user for ingestion.
///
/// The name and content-type are *declared* values from the file-selection
/// layer; nothing about them has been verified when a `CandidateFile` is
/// constructed. Routing trusts the validated extension only - the content-type
/// hint is carried for logging and diagnostics, not dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateFile {
    name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl CandidateFile {
    /// Creates a candidate from a declared name and raw bytes.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Attaches the content-type hint declared by the file picker.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// The declared file name, as selected by the user.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared content-type hint, if the picker supplied one.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The raw file bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the candidate, yielding the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Declared size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// The lowercased file extension, if the name has one.
    ///
    /// Follows path semantics: `"report.PDF"` yields `Some("pdf")`,
    /// `"archive.tar.gz"` yields `Some("gz")`, and dotfiles or bare names
    /// yield `None`.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }
}

/// Tagged outcome of validating one [`CandidateFile`].
///
/// Produced once per candidate and consumed immediately by the format
/// router; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The file passed the type and size policy and may be routed.
    Accepted,
    /// The file violates policy; the reason is surfaced to the user.
    Rejected(crate::RejectReason),
}

impl ValidationResult {
    /// Returns true if the candidate passed validation.
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        let file = CandidateFile::new("Quarterly Report.PDF", vec![]);
        assert_eq!(file.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn extension_uses_last_component() {
        let file = CandidateFile::new("bundle.tar.gz", vec![]);
        assert_eq!(file.extension().as_deref(), Some("gz"));
    }

    #[test]
    fn dotfile_has_no_extension() {
        let file = CandidateFile::new(".gitignore", vec![]);
        assert!(file.extension().is_none());
    }

    #[test]
    fn content_type_hint_is_preserved() {
        let file =
            CandidateFile::new("a.pdf", vec![1, 2]).with_content_type("application/pdf");
        assert_eq!(file.content_type(), Some("application/pdf"));
        assert_eq!(file.size(), 2);
    }
}
