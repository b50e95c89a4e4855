//! Paged binary document extractor.
//!
//! Extraction runs in three steps:
//!
//! 1. Parse the container's structural index (`lopdf::Document::load_mem`).
//!    A malformed index or an encrypted document is fatal
//!    [`ExtractError::CorruptDocument`] - there is nothing trustworthy to
//!    recover page-by-page.
//! 2. Fan page text extraction out over a bounded worker pool: a
//!    [`JoinSet`] of page jobs gated by a [`Semaphore`] with
//!    `max_concurrent_pages` permits. The bound is a pool constant, never
//!    the page count, so a thousand-page document holds the same number of
//!    blocking slots as a ten-page one.
//! 3. Gather into index-addressed slots keyed by page ordinal and read the
//!    slots out sequentially. Completion order never influences output
//!    order. A single failed page becomes an empty placeholder plus a
//!    [`ExtractionWarning::PartialPage`]; the rest of the document
//!    survives.
//!
//! The whole fan-out is wrapped in a wall-clock timeout. On expiry the
//! `JoinSet` is dropped, which aborts every outstanding page job, and the
//! call fails with [`ExtractError::Timeout`]. Dropping the returned future
//! cancels the same way; the in-flight gauge ([`active_page_jobs`]) lets
//! callers and tests observe the pool draining after cancellation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lopdf::Document;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::types::{DocumentSections, ExtractedDocument, ExtractedPage, ExtractionWarning};

static ACTIVE_PAGE_JOBS: AtomicUsize = AtomicUsize::new(0);

/// Number of page-extraction jobs currently holding a pool slot.
///
/// Drains to zero after completion, timeout, or cancellation; the
/// cancellation tests assert on exactly that.
pub fn active_page_jobs() -> usize {
    ACTIVE_PAGE_JOBS.load(Ordering::SeqCst)
}

/// RAII bookkeeping for one page job's pool slot.
struct PageJobGuard;

impl PageJobGuard {
    fn enter() -> Self {
        ACTIVE_PAGE_JOBS.fetch_add(1, Ordering::SeqCst);
        PageJobGuard
    }
}

impl Drop for PageJobGuard {
    fn drop(&mut self) {
        ACTIVE_PAGE_JOBS.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Extracts the text of every page of a paged binary document, preserving
/// source page order.
pub async fn extract_pdf(
    bytes: Vec<u8>,
    cfg: &ExtractConfig,
) -> Result<ExtractedDocument, ExtractError> {
    match timeout(cfg.extraction_timeout(), extract_pages(bytes, cfg)).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                limit_ms = cfg.extraction_timeout_ms,
                "paged extraction exceeded its time bound; outstanding page jobs cancelled"
            );
            Err(ExtractError::Timeout {
                limit_ms: cfg.extraction_timeout_ms,
            })
        }
    }
}

async fn extract_pages(
    bytes: Vec<u8>,
    cfg: &ExtractConfig,
) -> Result<ExtractedDocument, ExtractError> {
    let document = tokio::task::spawn_blocking(move || Document::load_mem(&bytes))
        .await
        .map_err(|err| ExtractError::TaskFailed(err.to_string()))?
        .map_err(|err| ExtractError::corrupt("pdf-index", err))?;

    if document.is_encrypted() {
        return Err(ExtractError::corrupt("pdf-index", "document is encrypted"));
    }

    // get_pages is ordered by page number; the position in this list is the
    // output ordinal.
    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    let page_count = page_numbers.len();
    debug!(page_count, "paged document index parsed");

    let document = Arc::new(document);
    let pool = Arc::new(Semaphore::new(cfg.max_concurrent_pages));
    let mut jobs: JoinSet<(usize, Result<String, String>)> = JoinSet::new();

    for (ordinal, page_number) in page_numbers.into_iter().enumerate() {
        let document = Arc::clone(&document);
        let pool = Arc::clone(&pool);
        jobs.spawn(async move {
            let _permit = match pool.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return (ordinal, Err("page worker pool closed".to_string())),
            };
            let _slot = PageJobGuard::enter();
            match tokio::task::spawn_blocking(move || {
                document
                    .extract_text(&[page_number])
                    .map_err(|err| err.to_string())
            })
            .await
            {
                Ok(result) => (ordinal, result),
                Err(err) => (ordinal, Err(err.to_string())),
            }
        });
    }

    // Scatter/gather: completions arrive in any order and land in their
    // ordinal slot; emission below is strictly sequential.
    let mut slots: Vec<Option<String>> = vec![None; page_count];
    let mut warnings = Vec::new();

    while let Some(joined) = jobs.join_next().await {
        let (ordinal, outcome) = joined.map_err(|err| ExtractError::TaskFailed(err.to_string()))?;
        match outcome {
            Ok(text) => slots[ordinal] = Some(text),
            Err(detail) => {
                warn!(
                    page = ordinal + 1,
                    detail, "page failed to extract; downgraded to empty placeholder"
                );
                warnings.push(ExtractionWarning::PartialPage { page: ordinal + 1 });
                slots[ordinal] = Some(String::new());
            }
        }
    }

    // One downgraded page keeps its warning deterministic regardless of
    // completion order.
    warnings.sort_by_key(|w| match w {
        ExtractionWarning::PartialPage { page } => *page,
        _ => 0,
    });

    let pages = slots
        .into_iter()
        .enumerate()
        .map(|(ordinal, text)| ExtractedPage {
            ordinal,
            text: text.unwrap_or_default(),
        })
        .collect();

    Ok(ExtractedDocument {
        sections: DocumentSections::Pages(pages),
        warnings,
    })
}
