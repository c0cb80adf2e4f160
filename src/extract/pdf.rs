//! PDF text extraction.

use super::ExtractError;
use std::path::Path;

pub(super) fn extract(path: &Path) -> Result<String, ExtractError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractError::parse(path, e.to_string()))
}
