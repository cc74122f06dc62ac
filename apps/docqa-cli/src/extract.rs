use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use docqa_core::chunker::normalize_whitespace;
use tracing::info;

/// Extract the text layer of a PDF with whitespace runs collapsed.
///
/// Image-only PDFs yield an empty string.
pub fn extract_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let raw = pdf_extract::extract_text_from_mem(&bytes)
        .with_context(|| format!("failed to extract text from {}", path.display()))?;
    let text = normalize_whitespace(&raw);
    info!(path = %path.display(), chars = text.len(), "extracted text");
    Ok(text)
}
