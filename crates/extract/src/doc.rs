//! Legacy binary document extractor.
//!
//! The oldest Word container has no structural specification available to
//! this pipeline, so recovery is explicitly heuristic: scan the raw bytes
//! for maximal runs of printable characters, in both the single-byte and the
//! two-byte little-endian encodings the format is known to use, and stitch
//! the surviving runs back together in file-offset order.
//!
//! Runs shorter than the configured minimum are structural noise (field
//! codes, style names, OLE bookkeeping) and are discarded. The result always
//! carries [`ExtractionWarning::LegacyBestEffort`]; worst case it is an
//! empty string, which is still a success from the pipeline's point of view.
//! The heuristic's limits are part of its contract - a readable-but-odd file
//! produces a warning, never an error.

use tracing::debug;

use crate::types::{DocumentSections, ExtractedDocument, ExtractionWarning};

/// Printable single-byte character for run scanning: the visible ASCII
/// range. Control bytes (including CR/LF/TAB) end a run; they are the
/// paragraph-break evidence the joiner looks at instead.
fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

/// A recovered run of text with its source byte span.
struct Run {
    start: usize,
    end: usize,
    text: String,
}

/// Heuristically recovers text from a legacy binary document.
///
/// Never fails; see the module docs for the trade-off.
pub fn extract_doc(bytes: &[u8], min_run: usize) -> ExtractedDocument {
    let runs = scan_runs(bytes, min_run.max(1));

    let mut text = String::new();
    let mut prev_end = 0usize;
    for run in &runs {
        if !text.is_empty() {
            if gap_breaks_paragraph(&bytes[prev_end..run.start]) {
                text.push('\n');
            } else {
                text.push(' ');
            }
        }
        text.push_str(&run.text);
        prev_end = run.end;
    }

    debug!(
        input_len = bytes.len(),
        runs = runs.len(),
        text_len = text.len(),
        "legacy document scanned"
    );

    ExtractedDocument {
        sections: DocumentSections::Flat(text),
        warnings: vec![ExtractionWarning::LegacyBestEffort],
    }
}

/// Collects maximal printable runs, checking the two-byte little-endian
/// encoding first at each position so UTF-16 text is not misread as
/// one-character ASCII fragments.
fn scan_runs(bytes: &[u8], min_run: usize) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if let Some(run) = utf16le_run_at(bytes, i, min_run) {
            i = run.end;
            runs.push(run);
            continue;
        }
        if let Some(run) = ascii_run_at(bytes, i, min_run) {
            i = run.end;
            runs.push(run);
            continue;
        }
        i += 1;
    }

    runs
}

/// A run of `[printable, 0x00]` pairs starting at `start`.
fn utf16le_run_at(bytes: &[u8], start: usize, min_run: usize) -> Option<Run> {
    let mut chars = String::new();
    let mut i = start;
    while i + 1 < bytes.len() && is_printable(bytes[i]) && bytes[i + 1] == 0x00 {
        chars.push(bytes[i] as char);
        i += 2;
    }
    if chars.chars().count() >= min_run {
        Some(Run {
            start,
            end: i,
            text: chars,
        })
    } else {
        None
    }
}

/// A run of consecutive printable single bytes starting at `start`.
fn ascii_run_at(bytes: &[u8], start: usize, min_run: usize) -> Option<Run> {
    let mut i = start;
    while i < bytes.len() && is_printable(bytes[i]) {
        i += 1;
    }
    if i - start >= min_run {
        let text = bytes[start..i].iter().map(|&b| b as char).collect();
        Some(Run {
            start,
            end: i,
            text,
        })
    } else {
        None
    }
}

/// Paragraph-break evidence between two runs: a carriage-return or newline
/// byte anywhere in the gap, or a run of four or more null/control bytes.
fn gap_breaks_paragraph(gap: &[u8]) -> bool {
    if gap.iter().any(|&b| b == 0x0D || b == 0x0A) {
        return true;
    }

    let mut consecutive = 0usize;
    for &b in gap {
        if b == 0x00 || b < 0x20 {
            consecutive += 1;
            if consecutive >= 4 {
                return true;
            }
        } else {
            consecutive = 0;
        }
    }
    false
}
