//! Document text extraction for uploaded resumes/CVs.
//!
//! Supports `.pdf` (via pdf-extract) and `.docx` (OOXML zip, reading the
//! `<w:t>` text runs out of `word/document.xml`). Everything else is a
//! typed `UnsupportedFormat` error, never a sentinel string.

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format '.{extension}' (expected .pdf or .docx)")]
    UnsupportedFormat { extension: String },

    #[error("failed to read document: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse document: {0}")]
    Parse(String),
}

/// Extracts the plain-text content of a resume/CV document.
///
/// The extension decides the parser; an empty result is not an error
/// (image-only PDFs legitimately extract to nothing).
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => pdf_extract::extract_text(path).map_err(|e| ExtractError::Parse(e.to_string())),
        "docx" => extract_docx(path),
        _ => Err(ExtractError::UnsupportedFormat { extension }),
    }
}

/// A `.docx` file is a zip archive; all paragraph text lives in
/// `word/document.xml`.
fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let file = std::fs::File::open(path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| ExtractError::Parse(e.to_string()))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Parse(format!("missing word/document.xml: {e}")))?;

    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    document_xml_text(&xml)
}

/// Collects the `<w:t>` runs of a WordprocessingML body, one line per
/// paragraph (`<w:p>`).
fn document_xml_text(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let run = t
                    .unescape()
                    .map_err(|e| ExtractError::Parse(e.to_string()))?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Parse(e.to_string())),
            Ok(_) => {}
        }
    }

    Ok(text)
}

/// Reduces an untrusted filename to `[A-Za-z0-9._-]`, dropping any path
/// components. Used for upload and report artifact names.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches(['.', '_']).is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
