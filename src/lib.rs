//! Umbrella crate for the doctract document ingestion pipeline.
//!
//! This crate stitches the pipeline stages together so callers get a single
//! async entry point: hand [`extract_document`] a user-selected
//! [`CandidateFile`] and get back one [`ExtractionResult`] (normalized text
//! plus non-fatal warnings) or one typed [`PipelineError`].
//!
//! Control flow per call:
//!
//! 1. **Validate** - type/size policy, before any parsing cost is paid.
//! 2. **Route** - the validated extension selects exactly one
//!    [`DocumentFormat`] variant.
//! 3. **Extract** - the format's extractor runs off the calling task;
//!    paged documents additionally fan out across a bounded page pool.
//! 4. **Assemble** - sections are joined in source order, whitespace is
//!    normalized, warnings are attached.
//!
//! The pipeline is stateless between calls and never retains the candidate
//! past the call. Dropping the returned future cancels the parse, including
//! any outstanding page jobs.
//!
//! # Example
//!
//! ```no_run
//! use doctract::{extract_document, CandidateFile, PipelineConfig};
//!
//! # async fn run() -> Result<(), doctract::PipelineError> {
//! let config = PipelineConfig::default();
//! let file = CandidateFile::new("notes.txt", b"Hello\nWorld".to_vec());
//!
//! let result = extract_document(file, &config).await?;
//! assert_eq!(result.text, "Hello\nWorld");
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn, Instrument, Level};
use uuid::Uuid;

mod config;

pub use crate::config::{ConfigLoadError, PipelineConfig};
pub use assemble::{AssembleConfig, AssembleConfigError};
pub use extract::{
    DocumentFormat, DocumentSections, ExtractConfig, ExtractConfigError, ExtractError,
    ExtractedDocument, ExtractedPage, ExtractionWarning,
};
pub use ingest::{
    validate, CandidateFile, IngestPolicy, PolicyError, RejectReason, ValidationResult,
};

/// Errors that can occur while processing one candidate file.
///
/// The taxonomy is closed: validation rejections (`UnsupportedType`,
/// `TooLarge`) and extraction failures (`CorruptDocument`, `Timeout`). Every
/// variant carries enough detail for a specific, non-generic user message;
/// nothing crosses the async boundary as an unstructured fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The file failed the type/size policy; no parsing was attempted.
    #[error("validation failed: {0}")]
    Rejected(#[from] RejectReason),

    /// The file passed validation but its extractor failed.
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractError),
}

/// The final artifact returned to the caller.
///
/// `text` is always valid UTF-8, normalized, and ordered like the source
/// document. `warnings` carry the non-fatal conditions (best-effort legacy
/// recovery, downgraded pages, truncation); a result with warnings is still
/// usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The normalized extracted text.
    pub text: String,
    /// Non-fatal warnings accumulated across extraction and assembly.
    pub warnings: Vec<ExtractionWarning>,
}

impl ExtractionResult {
    /// Returns true if any non-fatal warning was recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// A short display preview of the text, cut at `max_chars` characters
    /// with an ellipsis when shortened.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.text.chars().take(max_chars).collect();
        if self.text.chars().count() > max_chars {
            preview.push_str("...");
        }
        preview
    }
}

/// Metrics observer for pipeline stages.
///
/// Install a recorder with [`set_pipeline_metrics`] to observe per-stage
/// latency and outcome. The pipeline itself stays stateless; the recorder is
/// the only global, and it is optional.
pub trait PipelineMetrics: Send + Sync {
    /// Called once per candidate with the validation verdict.
    fn record_validation(&self, latency: Duration, outcome: &ValidationResult);
    /// Called once per extracted candidate with the extractor outcome.
    fn record_extraction(&self, format: DocumentFormat, latency: Duration, ok: bool);
    /// Called once per successful call with the final text length.
    fn record_assembly(&self, latency: Duration, text_len: usize);
}

/// Installs or clears the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Runs one candidate file through the whole pipeline.
///
/// Exactly one outcome is delivered per call: an [`ExtractionResult`] or a
/// [`PipelineError`]. The call is asynchronous and safe to race against user
/// interaction; abandoning it (dropping the future) cancels outstanding
/// extraction work without delivering a partial result.
pub async fn extract_document(
    file: CandidateFile,
    cfg: &PipelineConfig,
) -> Result<ExtractionResult, PipelineError> {
    let parse_id = Uuid::new_v4();
    let span = tracing::span!(
        Level::INFO,
        "pipeline.extract",
        parse_id = %parse_id,
        file = %file.name()
    );

    let start = Instant::now();
    let outcome = run_pipeline(file, cfg).instrument(span).await;
    let elapsed_micros = start.elapsed().as_micros();

    match &outcome {
        Ok(result) => info!(
            parse_id = %parse_id,
            text_len = result.text.len(),
            warnings = result.warnings.len(),
            elapsed_micros,
            "extraction_success"
        ),
        Err(err) => warn!(
            parse_id = %parse_id,
            error = %err,
            elapsed_micros,
            "extraction_failure"
        ),
    }

    outcome
}

async fn run_pipeline(
    file: CandidateFile,
    cfg: &PipelineConfig,
) -> Result<ExtractionResult, PipelineError> {
    // Stage 1: validation, before any bytes are structurally parsed.
    let validation_start = Instant::now();
    let verdict = ingest::validate(&file, &cfg.ingest);
    if let Some(recorder) = metrics_recorder() {
        recorder.record_validation(validation_start.elapsed(), &verdict);
    }
    if let ValidationResult::Rejected(reason) = verdict {
        return Err(PipelineError::Rejected(reason));
    }

    // Stage 2: routing. The extension was validated, so a miss here means
    // the allow-list was widened past the extractor set; that is still an
    // unsupported type from the caller's point of view.
    let extension = file.extension();
    let format = extension
        .as_deref()
        .and_then(DocumentFormat::from_extension)
        .ok_or_else(|| {
            PipelineError::Rejected(RejectReason::UnsupportedType { extension })
        })?;

    // Stage 3: extraction, off the calling task.
    let extraction_start = Instant::now();
    let extracted = extract::extract(format, file.into_bytes(), &cfg.extract).await;
    if let Some(recorder) = metrics_recorder() {
        recorder.record_extraction(format, extraction_start.elapsed(), extracted.is_ok());
    }
    let extracted = extracted?;

    // Stage 4: assembly.
    let assembly_start = Instant::now();
    let result = assemble_result(extracted, &cfg.assemble);
    if let Some(recorder) = metrics_recorder() {
        recorder.record_assembly(assembly_start.elapsed(), result.text.len());
    }

    Ok(result)
}

/// Joins extractor sections into the final normalized text and attaches the
/// accumulated warnings.
fn assemble_result(extracted: ExtractedDocument, cfg: &AssembleConfig) -> ExtractionResult {
    let ExtractedDocument {
        sections,
        mut warnings,
    } = extracted;

    let joined = match sections {
        DocumentSections::Pages(pages) => {
            let texts: Vec<String> = pages.into_iter().map(|page| page.text).collect();
            assemble::join_pages(&texts, cfg)
        }
        DocumentSections::Paragraphs(paragraphs) => assemble::join_paragraphs(&paragraphs),
        DocumentSections::Flat(text) => text,
    };

    let text = assemble::finalize(&joined);
    let (text, truncated) = assemble::apply_text_limit(text, cfg);
    if truncated {
        if let Some(limit) = cfg.max_text_bytes {
            warnings.push(ExtractionWarning::Truncated { limit });
        }
    }

    ExtractionResult { text, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ordinal: usize, text: &str) -> ExtractedPage {
        ExtractedPage {
            ordinal,
            text: text.to_string(),
        }
    }

    #[test]
    fn assembles_pages_with_markers() {
        let extracted = ExtractedDocument {
            sections: DocumentSections::Pages(vec![page(0, "A"), page(1, "B"), page(2, "C")]),
            warnings: Vec::new(),
        };
        let result = assemble_result(extracted, &AssembleConfig::default());
        assert_eq!(result.text, "A\n\n2\n\nB\n\n3\n\nC");
        assert!(!result.has_warnings());
    }

    #[test]
    fn assembles_paragraphs_with_blank_lines() {
        let extracted = ExtractedDocument {
            sections: DocumentSections::Paragraphs(vec!["one".into(), "two".into()]),
            warnings: Vec::new(),
        };
        let result = assemble_result(extracted, &AssembleConfig::default());
        assert_eq!(result.text, "one\n\ntwo");
    }

    #[test]
    fn truncation_adds_warning() {
        let extracted = ExtractedDocument {
            sections: DocumentSections::Flat("0123456789".into()),
            warnings: Vec::new(),
        };
        let cfg = AssembleConfig {
            max_text_bytes: Some(4),
            ..Default::default()
        };
        let result = assemble_result(extracted, &cfg);
        assert_eq!(result.text, "0123");
        assert_eq!(result.warnings, vec![ExtractionWarning::Truncated { limit: 4 }]);
    }

    #[test]
    fn extractor_warnings_are_carried_through() {
        let extracted = ExtractedDocument {
            sections: DocumentSections::Flat("legacy text".into()),
            warnings: vec![ExtractionWarning::LegacyBestEffort],
        };
        let result = assemble_result(extracted, &AssembleConfig::default());
        assert_eq!(result.warnings, vec![ExtractionWarning::LegacyBestEffort]);
    }

    #[test]
    fn preview_shortens_with_ellipsis() {
        let result = ExtractionResult {
            text: "abcdefghij".into(),
            warnings: Vec::new(),
        };
        assert_eq!(result.preview(4), "abcd...");
        assert_eq!(result.preview(20), "abcdefghij");
    }

    #[tokio::test]
    async fn rejected_file_short_circuits() {
        let cfg = PipelineConfig::default();
        let file = CandidateFile::new("movie.mp4", vec![0; 32]);

        let result = extract_document(file, &cfg).await;
        assert!(matches!(
            result,
            Err(PipelineError::Rejected(RejectReason::UnsupportedType { .. }))
        ));
    }

    #[tokio::test]
    async fn plain_text_round_trips_end_to_end() {
        let cfg = PipelineConfig::default();
        let file = CandidateFile::new("notes.txt", b"Hello\nWorld".to_vec());

        let result = extract_document(file, &cfg).await.expect("extract");
        assert_eq!(result.text, "Hello\nWorld");
        assert!(result.warnings.is_empty());
    }

    #[tokio::test]
    async fn widened_allow_list_without_extractor_is_unsupported() {
        let mut cfg = PipelineConfig::default();
        cfg.ingest.allowed_extensions.push("md".into());
        let file = CandidateFile::new("readme.md", b"# heading".to_vec());

        let result = extract_document(file, &cfg).await;
        assert!(matches!(
            result,
            Err(PipelineError::Rejected(RejectReason::UnsupportedType { .. }))
        ));
    }
}
