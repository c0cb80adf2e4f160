//! Document text extraction.
//!
//! Maps a file path to plain text by dispatching on the (lowercased) file
//! extension. Supported formats:
//!
//! | Extension | Backend |
//! |-----------|---------|
//! | `.pdf` | pdf-extract |
//! | `.docx` | zip container, paragraphs from `word/document.xml` |
//! | `.txt` | raw UTF-8 read |
//! | `.csv` | aligned plain-text table |
//! | `.xlsx` | zip container, shared strings + first worksheet |
//!
//! Extraction failures are values, not panics. Library callers get an
//! [`ExtractError`]; UI-facing callers can use
//! [`extract_text_or_diagnostic`], which renders the two failure classes with
//! distinct prefixes (`Unsupported file format:` vs `Error reading file:`) so
//! downstream code can branch on the prefix.

mod docx;
mod pdf;
mod sheet;

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format: {extension}")]
    Unsupported { extension: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

impl ExtractError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    fn parse(path: &Path, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}

/// Extract plain text from a document, dispatching on its extension.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_lowercase)
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), %extension, "extracting document text");

    match extension.as_str() {
        "pdf" => pdf::extract(path),
        "docx" => docx::extract(path),
        "txt" => fs::read_to_string(path).map_err(|e| ExtractError::io(path, e)),
        "csv" => sheet::extract_csv(path),
        "xlsx" => sheet::extract_xlsx(path),
        other => Err(ExtractError::Unsupported {
            extension: if other.is_empty() {
                "(none)".to_string()
            } else {
                format!(".{other}")
            },
        }),
    }
}

/// Boundary form of [`extract_text`]: always returns a displayable string.
///
/// The two failure classes keep their distinct prefixes so callers that
/// branch on `"Unsupported file format:"` / `"Error reading file:"` keep
/// working.
pub fn extract_text_or_diagnostic(path: &Path) -> String {
    match extract_text(path) {
        Ok(text) => text,
        Err(ExtractError::Unsupported { extension }) => {
            format!("Unsupported file format: {extension}")
        }
        Err(e) => format!("Error reading file: {e}"),
    }
}

/// Replace the XML character entities that appear in OOXML text runs.
pub(crate) fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
