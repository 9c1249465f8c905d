//! Multi-format text extraction for uploaded documents.
//!
//! Callers supply a file path plus the declared [`DocumentKind`]; this
//! module returns plain UTF-8 text. It is read-only — status recording
//! is the ingestion pipeline's job — and every I/O or parse error is
//! surfaced to the caller.
//!
//! - **Text**: UTF-8 file read.
//! - **PDF**: `pdf-extract`, pages concatenated in page order. Pages
//!   with no extractable text (scanned/image-only) contribute nothing;
//!   there is no OCR.
//! - **Docx**: the OOXML ZIP's `word/document.xml` streamed with
//!   `quick-xml`; `w:t` runs are collected and paragraphs joined by
//!   newline in document order.

use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Maximum decompressed bytes to read from a single ZIP entry
/// (zip-bomb protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Declared type of an uploaded document.
///
/// Anything outside this set is rejected by the engine before any
/// document state is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Sniff the kind from a filename extension. `None` means the
    /// upload must be rejected as unsupported input.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "txt" => Some(DocumentKind::Text),
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    /// Canonical extension used for the parked upload file.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Text => "txt",
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

/// Extraction error. The ingestion pipeline collapses any variant into
/// the document's `failed` status.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("docx extraction failed: {0}")]
    Docx(String),
}

/// Extract plain text from a file of the declared kind.
pub fn extract_text(path: &Path, kind: DocumentKind) -> Result<String, ExtractError> {
    match kind {
        DocumentKind::Text => Ok(std::fs::read_to_string(path)?),
        DocumentKind::Pdf => extract_pdf(path),
        DocumentKind::Docx => extract_docx(&std::fs::read(path)?),
    }
}

fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut doc_xml = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut doc_xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    if doc_xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(ExtractError::Docx(
            "word/document.xml exceeds size limit".to_string(),
        ));
    }

    extract_paragraphs(&doc_xml)
}

/// Walk the document XML collecting `w:t` runs; each closed `w:p`
/// finishes a paragraph. Paragraphs are joined by newline, empty ones
/// included, matching the source document's order.
fn extract_paragraphs(xml: &[u8]) -> Result<String, ExtractError> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_run = true;
                }
            }
            Ok(quick_xml::events::Event::Text(t)) => {
                if in_text_run {
                    current.push_str(
                        t.unescape()
                            .map_err(|e| ExtractError::Docx(e.to_string()))?
                            .as_ref(),
                    );
                }
            }
            Ok(quick_xml::events::Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}
