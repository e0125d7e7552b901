// src/readers/pdf.rs
use crate::utils::error::ReadError;
use lopdf::Document;

/// Extracts the text of every page, in page order.
///
/// Pages whose text cannot be decoded are skipped with a warning; the read
/// fails only when no page yields text.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ReadError> {
    let document = Document::load_mem(bytes)
        .map_err(|e| ReadError::Pdf(format!("failed to open PDF: {}", e)))?;

    let pages = document.get_pages();
    if pages.is_empty() {
        tracing::warn!("PDF has no pages");
        return Ok(String::new());
    }

    let mut page_texts = Vec::with_capacity(pages.len());
    let mut last_error = None;
    for page_number in pages.keys() {
        match document.extract_text(&[*page_number]) {
            Ok(text) => page_texts.push(text),
            Err(e) => {
                tracing::warn!("Could not extract text from PDF page {}: {}", page_number, e);
                last_error = Some(e);
            }
        }
    }

    if page_texts.is_empty() {
        if let Some(e) = last_error {
            return Err(ReadError::Pdf(format!("no page text could be extracted: {}", e)));
        }
    }

    tracing::debug!("Extracted text from {}/{} PDF pages", page_texts.len(), pages.len());
    Ok(page_texts.join("\n"))
}
