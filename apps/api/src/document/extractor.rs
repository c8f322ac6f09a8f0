//! PDF text extraction.
//!
//! Pages are visited in page-number order. Pages that yield no text, such as
//! scanned images, are skipped without being reported.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Error extracting text: {0}")]
    Parse(#[from] lopdf::Error),

    #[error("Error extracting text: could not read staged upload: {0}")]
    Read(#[from] std::io::Error),
}

/// Reads a staged PDF from disk and extracts its text.
pub fn extract_text_from_path(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    extract_text(&bytes)
}

/// Extracts the text of every page and joins the non-empty fragments with a
/// single space.
///
/// A document that parses but carries no text returns `Ok("")`; deciding
/// whether that is acceptable is up to the caller.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = lopdf::Document::load_mem(bytes)?;

    // BTreeMap keyed by page number, so iteration is already in page order.
    let pages = doc.get_pages();
    let page_count = pages.len();

    let fragments: Vec<String> = pages
        .keys()
        .filter_map(|page_num| match doc.extract_text(&[*page_num]) {
            Ok(text) => Some(text.trim().to_string()),
            Err(e) => {
                debug!("Skipping page {page_num}: {e}");
                None
            }
        })
        .filter(|text| !text.is_empty())
        .collect();

    debug!(
        "Extracted text from {} of {} pages",
        fragments.len(),
        page_count
    );

    Ok(fragments.join(" "))
}
