// src/readers/pages.rs
use crate::readers::pdf::extract_pdf_text;
use crate::utils::error::ReadError;
use std::io::{Cursor, Read};
use zip::result::ZipError;
use zip::ZipArchive;

// Pages bundles a rendered PDF; the native .iwa body is not readable.
const PREVIEW_ENTRIES: &[&str] = &["QuickLook/Preview.pdf", "preview.pdf"];

/// Reads a Pages document through its embedded PDF preview.
pub fn extract_pages_text(bytes: &[u8]) -> Result<String, ReadError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    for entry in PREVIEW_ENTRIES {
        let mut preview = Vec::new();
        match archive.by_name(entry) {
            Ok(mut file) => {
                file.read_to_end(&mut preview)?;
            }
            Err(ZipError::FileNotFound) => continue,
            Err(e) => return Err(e.into()),
        }
        tracing::debug!("Using Pages preview '{}' ({} bytes)", entry, preview.len());
        return extract_pdf_text(&preview);
    }

    Err(ReadError::UnsupportedFormat(
        "Pages document has no embedded PDF preview".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::build_zip;

    #[test]
    fn test_without_preview_is_unsupported() {
        let bytes = build_zip(&[("Index/Document.iwa", &b"\x00\x01"[..])]);
        assert!(matches!(extract_pages_text(&bytes), Err(ReadError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_preview_is_handed_to_pdf_reader() {
        let bytes = build_zip(&[("QuickLook/Preview.pdf", &b"not really a pdf"[..])]);
        assert!(matches!(extract_pages_text(&bytes), Err(ReadError::Pdf(_))));
    }
}
