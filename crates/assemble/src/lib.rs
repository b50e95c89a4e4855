//! Assembly of extracted sections into the final text block.
//!
//! Extractors hand over their output as ordered sections (pages for paged
//! documents, paragraphs for package documents, runs for everything else).
//! This crate joins those sections deterministically and normalizes the
//! result:
//!
//! - pages are separated by a page-boundary marker (a line holding the
//!   1-based number of the following page),
//! - paragraphs are separated by one blank line,
//! - line endings are normalized to `\n`, runs of blank lines collapse to at
//!   most one, and the edges are trimmed.
//!
//! Three pages "A", "B", "C" therefore assemble to `"A\n\n2\n\nB\n\n3\n\nC"`,
//! and the marker count for an N-page document is always N-1 regardless of
//! how extraction was scheduled.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

mod whitespace;

pub use crate::whitespace::{collapse_blank_lines, normalize_newlines};

/// Assembly options.
///
/// Like the other stage configs this is a set of policy constants: cheap to
/// clone, serializable, validated once at start-up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssembleConfig {
    /// Insert numeric page-boundary markers between pages. When disabled,
    /// pages are joined like paragraphs, with a single blank line.
    pub insert_page_markers: bool,

    /// Optional upper bound on the final text, in bytes. Text beyond the
    /// bound is cut at a character boundary; the caller records a
    /// truncation warning. `None` means unlimited.
    pub max_text_bytes: Option<usize>,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            insert_page_markers: true,
            max_text_bytes: None,
        }
    }
}

impl AssembleConfig {
    /// Validates internal consistency of this configuration.
    pub fn validate(&self) -> Result<(), AssembleConfigError> {
        if self.max_text_bytes == Some(0) {
            return Err(AssembleConfigError::ZeroTextLimit);
        }
        Ok(())
    }
}

/// Configuration-time assembly errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssembleConfigError {
    /// A zero byte limit would empty every result.
    #[error("max_text_bytes is 0; every assembled result would be empty")]
    ZeroTextLimit,
}

/// Joins per-page text in ordinal order, inserting a page-boundary marker
/// between consecutive pages.
///
/// The marker before page `i` (0-based, `i >= 1`) is a line holding the
/// page's 1-based number. Empty placeholder pages keep their markers so the
/// marker count stays `pages.len() - 1`; the blank-line collapse in
/// [`finalize`] absorbs the hole their missing text leaves behind.
pub fn join_pages(pages: &[String], cfg: &AssembleConfig) -> String {
    let mut joined = String::with_capacity(pages.iter().map(String::len).sum::<usize>() + 8 * pages.len());
    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            if cfg.insert_page_markers {
                joined.push_str("\n\n");
                joined.push_str(&(index + 1).to_string());
                joined.push_str("\n\n");
            } else {
                joined.push_str("\n\n");
            }
        }
        joined.push_str(page.trim());
    }
    joined
}

/// Joins paragraph sections with one blank line between them.
pub fn join_paragraphs(paragraphs: &[String]) -> String {
    paragraphs.join("\n\n")
}

/// Normalizes an assembled block into the final text: `\r\n`/`\r` become
/// `\n`, runs of blank lines collapse to at most one, and leading/trailing
/// whitespace is trimmed.
pub fn finalize(text: &str) -> String {
    let normalized = normalize_newlines(text);
    let collapsed = collapse_blank_lines(&normalized);
    collapsed.trim().to_string()
}

/// Applies the configured output cap to finalized text.
///
/// Returns the (possibly shortened) text and whether a cut was made. The cut
/// lands on a character boundary so the result is always valid UTF-8, and
/// trailing whitespace exposed by the cut is trimmed off.
pub fn apply_text_limit(mut text: String, cfg: &AssembleConfig) -> (String, bool) {
    let Some(limit) = cfg.max_text_bytes else {
        return (text, false);
    };
    if text.len() <= limit {
        return (text, false);
    }

    let mut cut = limit;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    let trimmed_len = text.trim_end().len();
    text.truncate(trimmed_len);

    debug!(limit, final_len = text.len(), "assembled text truncated to limit");
    (text, true)
}
