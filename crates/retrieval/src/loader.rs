//! PDF document loading.
//!
//! Extracts page-level text blocks in document order. The loader is the
//! only place that touches PDF structure; everything downstream works on
//! plain text.

use pdfchat_core::{AppError, AppResult};
use std::path::Path;

/// Load a PDF and return one text block per page, in page order.
///
/// # Errors
/// * `DocumentNotFound` - the path does not resolve to a file
/// * `DocumentLoad` - the file could not be parsed as a PDF
///
/// Pages whose text cannot be decoded (e.g., image-only pages) contribute
/// an empty block rather than failing the whole document.
pub fn load_pdf(path: &Path) -> AppResult<Vec<String>> {
    if !path.is_file() {
        return Err(AppError::DocumentNotFound(path.display().to_string()));
    }

    let document = lopdf::Document::load(path)
        .map_err(|e| AppError::DocumentLoad(format!("{}: {}", path.display(), e)))?;

    let mut pages = Vec::new();
    for (&page_number, _) in document.get_pages().iter() {
        match document.extract_text(&[page_number]) {
            Ok(text) => pages.push(text),
            Err(e) => {
                tracing::warn!(page = page_number, "No text extracted from page: {}", e);
                pages.push(String::new());
            }
        }
    }

    tracing::debug!(
        pages = pages.len(),
        "Extracted text from {}",
        path.display()
    );

    Ok(pages)
}
