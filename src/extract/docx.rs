//! DOCX text extraction.
//!
//! A `.docx` file is a zip container; the document body lives in
//! `word/document.xml`. This reads the body and flattens each `<w:p>`
//! paragraph to one line by concatenating its `<w:t>` text runs. Formatting,
//! tables, headers, and footers are ignored.

use super::{unescape_xml, ExtractError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;

static PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<w:p[ >].*?</w:p>").expect("paragraph regex"));
static TEXT_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<w:t(?: [^>]*)?>(.*?)</w:t>").expect("text run regex"));

pub(super) fn extract(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| ExtractError::parse(path, e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::parse(path, format!("missing document body: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::io(path, e))?;

    let mut text = String::new();
    for paragraph in PARAGRAPH_RE.find_iter(&xml) {
        let mut line = String::new();
        for run in TEXT_RUN_RE.captures_iter(paragraph.as_str()) {
            line.push_str(&unescape_xml(&run[1]));
        }
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}
