use std::io::Cursor;

use lopdf::Document;
use tracing::warn;

use crate::errors::AppError;

/// Extracts text page by page, joined with single spaces. A page that fails
/// or yields nothing contributes an empty string; only a document that cannot
/// be loaded at all fails the extraction.
pub fn extract_text(data: &[u8]) -> Result<String, AppError> {
    let doc = Document::load_from(Cursor::new(data))
        .map_err(|e| AppError::Extraction(format!("unreadable PDF: {e}")))?;

    let mut text = String::new();
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(page_text.trim());
            }
            Err(e) => {
                warn!("no text extracted from page {page_num}: {e}");
            }
        }
    }
    Ok(text)
}
