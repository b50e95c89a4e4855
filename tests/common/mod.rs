//! Shared fixture builders for the integration suites.
//!
//! Fixtures are synthesized in-process rather than checked in: a minimal
//! paged document with computed cross-reference offsets, and a minimal
//! document package zipped on the fly.

#![allow(dead_code)] // each test binary uses a different subset

use std::io::{Cursor, Write};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs a fmt subscriber once per test binary so `RUST_LOG` works when
/// debugging a failing suite.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Builds a syntactically valid paged document with one page per entry.
pub fn minimal_pdf(page_texts: &[&str]) -> Vec<u8> {
    build_pdf(page_texts, None)
}

/// Like [`minimal_pdf`], but the page at `broken` (0-based) references a
/// missing content object: the structural index stays valid while that one
/// page fails to extract.
pub fn pdf_with_broken_page(page_texts: &[&str], broken: usize) -> Vec<u8> {
    build_pdf(page_texts, Some(broken))
}

fn build_pdf(page_texts: &[&str], broken: Option<usize>) -> Vec<u8> {
    let n = page_texts.len();
    let total_objects = 3 + 2 * n;
    let mut buf: Vec<u8> = Vec::new();
    let mut offsets = vec![0usize; total_objects + 1];

    buf.extend_from_slice(b"%PDF-1.4\n");

    let kids: Vec<String> = (0..n).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();

    offsets[1] = buf.len();
    buf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    offsets[2] = buf.len();
    buf.extend_from_slice(
        format!(
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            n
        )
        .as_bytes(),
    );

    offsets[3] = buf.len();
    buf.extend_from_slice(
        b"3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n",
    );

    for (i, text) in page_texts.iter().enumerate() {
        let page_id = 4 + 2 * i;
        let content_id = page_id + 1;
        let content_ref = if broken == Some(i) {
            total_objects + 10
        } else {
            content_id
        };

        offsets[page_id] = buf.len();
        buf.extend_from_slice(
            format!(
                "{page_id} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {content_ref} 0 R >>\nendobj\n"
            )
            .as_bytes(),
        );

        let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        offsets[content_id] = buf.len();
        buf.extend_from_slice(
            format!(
                "{content_id} 0 obj\n<< /Length {} >>\nstream\n{stream}\nendstream\nendobj\n",
                stream.len()
            )
            .as_bytes(),
        );
    }

    let xref_offset = buf.len();
    buf.extend_from_slice(format!("xref\n0 {}\n", total_objects + 1).as_bytes());
    buf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets.iter().skip(1) {
        buf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    buf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF",
            total_objects + 1
        )
        .as_bytes(),
    );

    buf
}

/// Builds a minimal document package whose paragraphs hold the given texts.
pub fn minimal_docx(paragraph_texts: &[&str]) -> Vec<u8> {
    let paragraphs: String = paragraph_texts
        .iter()
        .map(|text| format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>"))
        .collect();
    let document_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>{paragraphs}</w:body>
</w:document>"#
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .expect("start archive entry");
    writer
        .write_all(document_xml.as_bytes())
        .expect("write archive entry");
    writer.finish().expect("finish archive").into_inner()
}

/// Bytes that imitate a legacy binary document: container magic, UTF-16LE
/// and ASCII text regions, and structural noise between them.
pub fn legacy_doc_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
    bytes.extend_from_slice(&[0x00; 16]);
    for (i, text) in paragraphs.iter().enumerate() {
        if i > 0 {
            bytes.push(0x0D);
            bytes.extend_from_slice(&[0x00; 6]);
        }
        bytes.extend_from_slice(text.as_bytes());
    }
    bytes.extend_from_slice(&[0x03, 0x00, 0x01]);
    bytes
}
