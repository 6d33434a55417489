//! Plain-text extraction from uploaded documents.
//!
//! Dispatches on file extension. Unsupported extensions and internal
//! parse failures both yield an empty string rather than an error; the
//! caller decides what an empty result means (for the generation
//! pipeline it is a terminal failure, because prompting an LLM with no
//! context is never useful).

use std::fs;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;

/// Extract text content from a document at `path`.
///
/// Supported: `.pdf`, `.docx`, `.txt` (case-insensitive). Anything else
/// returns an empty string.
pub fn extract_text(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => pdf_text(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "pdf extraction failed");
            String::new()
        }),
        Some("docx") => docx_text(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "docx extraction failed");
            String::new()
        }),
        Some("txt") => fs::read(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "txt read failed");
                String::new()
            }),
        _ => String::new(),
    }
}

fn pdf_text(path: &Path) -> Result<String, String> {
    pdf_extract::extract_text(path).map_err(|e| e.to_string())
}

/// Read the main document part of a `.docx` and walk its text runs.
///
/// A docx is a zip; all visible body text lives in `<w:t>` elements of
/// `word/document.xml`, with `<w:p>` marking paragraph boundaries.
fn docx_text(path: &Path) -> Result<String, String> {
    let file = fs::File::open(path).map_err(|e| e.to_string())?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| e.to_string())?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| e.to_string())?
        .read_to_string(&mut xml)
        .map_err(|e| e.to_string())?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:t" => in_text_run = false,
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:p" => text.push('\n'),
            Ok(Event::Text(t)) if in_text_run => {
                text.push_str(&t.unescape().unwrap_or_default());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
    }

    Ok(text)
}
