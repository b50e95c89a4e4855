//! Format routing and text extraction.
//!
//! One validated candidate file enters, one [`ExtractedDocument`] leaves.
//! The [`DocumentFormat`] router picks an extractor exactly once from the
//! validated extension; each extractor converts its format's bytes into
//! ordered sections:
//!
//! | Format | Extractor | Sections |
//! |---|---|---|
//! | `Txt` | permissive UTF-8 decode | flat text |
//! | `Doc` | printable-run heuristic over the legacy binary | flat text + warning |
//! | `Docx` | zip archive + streaming XML walk | paragraphs |
//! | `Pdf` | structural index + bounded per-page fan-out | pages |
//!
//! Extraction is CPU-bound, so [`extract`] moves the work onto the blocking
//! pool; the paged extractor additionally parallelizes across pages behind a
//! semaphore-bounded [`tokio::task::JoinSet`]. Structural failures surface
//! as typed [`ExtractError`]s; recoverable conditions ride along as
//! [`ExtractionWarning`]s on the result.

mod config;
mod doc;
mod docx;
mod error;
mod pdf;
mod text;
mod types;

pub use crate::config::{ExtractConfig, ExtractConfigError};
pub use crate::doc::extract_doc;
pub use crate::docx::extract_docx;
pub use crate::error::ExtractError;
pub use crate::pdf::{active_page_jobs, extract_pdf};
pub use crate::text::extract_text;
pub use crate::types::{
    DocumentFormat, DocumentSections, ExtractedDocument, ExtractedPage, ExtractionWarning,
};

/// Runs the extractor selected by `format` over the candidate's bytes.
///
/// The single dispatch point: downstream code never re-inspects bytes or
/// extensions. All extraction happens off the calling task - plain text,
/// legacy, and package documents on the blocking pool, paged documents on
/// their own bounded page fan-out.
pub async fn extract(
    format: DocumentFormat,
    bytes: Vec<u8>,
    cfg: &ExtractConfig,
) -> Result<ExtractedDocument, ExtractError> {
    match format {
        DocumentFormat::Txt => run_blocking(move || Ok(text::extract_text(&bytes))).await,
        DocumentFormat::Doc => {
            let min_run = cfg.min_text_run;
            run_blocking(move || Ok(doc::extract_doc(&bytes, min_run))).await
        }
        DocumentFormat::Docx => run_blocking(move || docx::extract_docx(&bytes)).await,
        DocumentFormat::Pdf => pdf::extract_pdf(bytes, cfg).await,
    }
}

async fn run_blocking<F>(job: F) -> Result<ExtractedDocument, ExtractError>
where
    F: FnOnce() -> Result<ExtractedDocument, ExtractError> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|err| ExtractError::TaskFailed(err.to_string()))?
}
