//! Zip-based XML document package extractor.
//!
//! A document of this family is a zip archive whose main textual content
//! lives in one well-known entry, `word/document.xml`. Extraction opens the
//! archive, locates that part, and streams its markup with a pull parser,
//! linearizing text in document order:
//!
//! - text inside `w:t` run elements is collected,
//! - a paragraph break is recorded between successive `w:p` elements,
//! - explicit `w:br`/`w:cr` become line breaks and `w:tab` becomes a tab,
//! - subtrees under `w:tbl`, `w:drawing`, and `w:pict` are skipped: their
//!   presence never fails the parse, their content is simply omitted.
//!
//! Any structural failure - not a zip archive, missing content part,
//! malformed XML - is fatal [`ExtractError::CorruptDocument`]. Archives of
//! this kind are small; parsing is sequential.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::error::ExtractError;
use crate::types::{DocumentSections, ExtractedDocument};

/// Fixed path of the main content part inside the package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Elements whose subtrees carry no body text for our purposes.
const SKIPPED_SUBTREES: [&[u8]; 3] = [b"w:tbl", b"w:drawing", b"w:pict"];

/// Extracts paragraph text from a zip-based XML document package.
pub fn extract_docx(bytes: &[u8]) -> Result<ExtractedDocument, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|err| ExtractError::corrupt("docx-archive", err))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|err| {
            ExtractError::corrupt("docx-part", format!("missing {DOCUMENT_PART}: {err}"))
        })?
        .read_to_string(&mut xml)
        .map_err(|err| ExtractError::corrupt("docx-part", err))?;

    let paragraphs = collect_paragraphs(&xml)?;
    debug!(
        part_len = xml.len(),
        paragraphs = paragraphs.len(),
        "document package parsed"
    );

    Ok(ExtractedDocument {
        sections: DocumentSections::Paragraphs(paragraphs),
        warnings: Vec::new(),
    })
}

/// Walks the content part's markup and linearizes text nodes in document
/// order, one entry per paragraph element.
fn collect_paragraphs(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;
    let mut skip_depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| ExtractError::corrupt("docx-xml", err))?;

        match event {
            Event::Start(e) => {
                let name = e.name();
                let name = name.as_ref();
                if SKIPPED_SUBTREES.contains(&name) {
                    skip_depth += 1;
                } else if skip_depth == 0 {
                    match name {
                        b"w:p" => {
                            in_paragraph = true;
                            current.clear();
                        }
                        b"w:t" => in_text = true,
                        _ => {}
                    }
                }
            }
            Event::End(e) => {
                let name = e.name();
                let name = name.as_ref();
                if SKIPPED_SUBTREES.contains(&name) {
                    skip_depth = skip_depth.saturating_sub(1);
                } else if skip_depth == 0 {
                    match name {
                        b"w:p" => {
                            if in_paragraph {
                                paragraphs.push(std::mem::take(&mut current));
                                in_paragraph = false;
                            }
                        }
                        b"w:t" => in_text = false,
                        _ => {}
                    }
                }
            }
            Event::Empty(e) => {
                if skip_depth == 0 && in_paragraph {
                    match e.name().as_ref() {
                        b"w:br" | b"w:cr" => current.push('\n'),
                        b"w:tab" => current.push('\t'),
                        _ => {}
                    }
                }
            }
            Event::Text(t) => {
                if skip_depth == 0 && in_paragraph && in_text {
                    let text = t
                        .unescape()
                        .map_err(|err| ExtractError::corrupt("docx-xml", err))?;
                    current.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
