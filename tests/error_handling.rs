//! Failure taxonomy tests: every error is typed, specific, and surfaced at
//! the right stage.

mod common;

use doctract::{
    extract_document, CandidateFile, ExtractError, ExtractionWarning, PipelineConfig,
    PipelineError,
};

#[tokio::test]
async fn garbage_paged_document_is_corrupt() {
    common::init_tracing();
    let cfg = PipelineConfig::default();
    let file = CandidateFile::new("broken.pdf", b"%PDF-1.4 then nothing useful".to_vec());

    let result = extract_document(file, &cfg).await;
    match result {
        Err(PipelineError::Extraction(ExtractError::CorruptDocument { stage, .. })) => {
            assert_eq!(stage, "pdf-index");
        }
        other => panic!("expected CorruptDocument, got {other:?}"),
    }
}

#[tokio::test]
async fn truncated_package_is_corrupt_not_partial() {
    let cfg = PipelineConfig::default();
    let mut bytes = common::minimal_docx(&["some paragraph content"]);
    bytes.truncate(bytes.len() / 2);
    let file = CandidateFile::new("cut.docx", bytes);

    let result = extract_document(file, &cfg).await;
    assert!(matches!(
        result,
        Err(PipelineError::Extraction(ExtractError::CorruptDocument { .. }))
    ));
}

#[tokio::test]
async fn non_archive_package_is_corrupt() {
    let cfg = PipelineConfig::default();
    let file = CandidateFile::new("fake.docx", b"plain text pretending".to_vec());

    let result = extract_document(file, &cfg).await;
    match result {
        Err(PipelineError::Extraction(ExtractError::CorruptDocument { stage, .. })) => {
            assert_eq!(stage, "docx-archive");
        }
        other => panic!("expected CorruptDocument, got {other:?}"),
    }
}

#[tokio::test]
async fn one_bad_page_downgrades_instead_of_failing() {
    let cfg = PipelineConfig::default();
    let bytes = common::pdf_with_broken_page(&["good start", "broken", "good end"], 1);
    let file = CandidateFile::new("partial.pdf", bytes);

    let result = extract_document(file, &cfg).await.expect("document survives");
    assert!(result.text.contains("good start"));
    assert!(result.text.contains("good end"));
    assert!(!result.text.contains("broken"));
    // Placeholder keeps both boundary markers in place.
    assert!(result.text.contains("\n\n2\n\n"));
    assert!(result.text.contains("\n\n3\n\n"));
    assert_eq!(
        result.warnings,
        vec![ExtractionWarning::PartialPage { page: 2 }]
    );
}

#[tokio::test]
async fn zero_time_budget_reports_timeout() {
    let mut cfg = PipelineConfig::default();
    cfg.extract.extraction_timeout_ms = 0;
    let file = CandidateFile::new("slow.pdf", common::minimal_pdf(&["a", "b"]));

    let result = extract_document(file, &cfg).await;
    assert!(matches!(
        result,
        Err(PipelineError::Extraction(ExtractError::Timeout { limit_ms: 0 }))
    ));
}

#[tokio::test]
async fn error_messages_are_specific_not_generic() {
    let cfg = PipelineConfig::default();

    let file = CandidateFile::new("clip.avi", vec![0; 8]);
    let err = extract_document(file, &cfg).await.unwrap_err();
    assert!(err.to_string().contains("avi"), "got: {err}");

    let mut small = PipelineConfig::default();
    small.ingest.max_file_bytes = 10;
    let file = CandidateFile::new("big.txt", vec![0; 99]);
    let err = extract_document(file, &small).await.unwrap_err();
    assert!(err.to_string().contains("99"), "got: {err}");
    assert!(err.to_string().contains("10"), "got: {err}");
}

#[tokio::test]
async fn legacy_extraction_never_fails_on_unreadable_input() {
    let cfg = PipelineConfig::default();
    let file = CandidateFile::new("noise.doc", vec![0x00, 0x01, 0x02, 0xFF, 0xFE, 0xFD]);

    let result = extract_document(file, &cfg).await.expect("best effort");
    assert_eq!(result.text, "");
    assert_eq!(result.warnings, vec![ExtractionWarning::LegacyBestEffort]);
}
