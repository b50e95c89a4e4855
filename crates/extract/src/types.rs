//! Data model for format routing and extractor output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of supported document formats.
///
/// A format is selected exactly once, at the router, from the validated file
/// extension. Everything downstream dispatches on this enum; no extractor
/// re-inspects bytes or extensions to guess what it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Page-structured binary document (`.pdf`).
    Pdf,
    /// Zip-based XML document package (`.docx`).
    Docx,
    /// Legacy binary document (`.doc`), handled heuristically.
    Doc,
    /// Plain text (`.txt`).
    Txt,
}

impl DocumentFormat {
    /// Maps a validated, lowercased extension to its format.
    ///
    /// Total over the default allow-list; returns `None` for anything else
    /// so a widened allow-list without a matching extractor surfaces as an
    /// unsupported type instead of a wrong parse.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "doc" => Some(DocumentFormat::Doc),
            "txt" => Some(DocumentFormat::Txt),
            _ => None,
        }
    }

    /// Short stable name for logging and metrics labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
            DocumentFormat::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted page of a paged document.
///
/// Ordinals are 0-based, unique, and contiguous over `0..page_count`; they
/// mirror source page order, not extraction completion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// 0-based position of this page in the source document.
    pub ordinal: usize,
    /// Extracted text, empty for a downgraded placeholder page.
    pub text: String,
}

/// Sectioned extractor output, before assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSections {
    /// Ordered pages from a paged document.
    Pages(Vec<ExtractedPage>),
    /// Ordered paragraphs from a package document.
    Paragraphs(Vec<String>),
    /// A single undivided text block (plain text, legacy recovery).
    Flat(String),
}

/// What one extractor produced for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// The sections in source order.
    pub sections: DocumentSections,
    /// Non-fatal warnings accumulated during extraction.
    pub warnings: Vec<ExtractionWarning>,
}

impl ExtractedDocument {
    /// Wraps a flat text block with no warnings.
    pub fn flat(text: String) -> Self {
        Self {
            sections: DocumentSections::Flat(text),
            warnings: Vec::new(),
        }
    }
}

/// Non-fatal conditions attached to an otherwise usable result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionWarning {
    /// The legacy binary format has no usable structural specification;
    /// recovery was heuristic and content may be missing or mis-segmented.
    LegacyBestEffort,
    /// One page failed to extract and was replaced with an empty
    /// placeholder. `page` is the 1-based page number.
    PartialPage { page: usize },
    /// The assembled text exceeded the configured byte limit and was cut.
    Truncated { limit: usize },
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionWarning::LegacyBestEffort => f.write_str(
                "legacy document format: extraction is best-effort and may be incomplete",
            ),
            ExtractionWarning::PartialPage { page } => write!(
                f,
                "page {page} could not be extracted and was replaced with an empty placeholder"
            ),
            ExtractionWarning::Truncated { limit } => write!(
                f,
                "extracted text exceeded the {limit} byte limit and was truncated"
            ),
        }
    }
}
