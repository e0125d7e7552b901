// src/readers/mod.rs
//! Turn uploaded manuscript files into plain text for section extraction.

pub mod docx;
pub mod html;
pub mod pages;
pub mod pdf;
pub mod plain;

use crate::utils::error::ReadError;
use std::path::Path;

const MEGABYTE: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Html,
    Word,
    Pages,
    Pdf,
}

impl DocumentFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "txt" | "text" | "md" | "markdown" => Some(Self::PlainText),
            "html" | "htm" => Some(Self::Html),
            "docx" => Some(Self::Word),
            "pages" => Some(Self::Pages),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Largest accepted upload for this format, in bytes.
    pub fn max_bytes(&self) -> u64 {
        match self {
            Self::PlainText | Self::Html => MEGABYTE,
            Self::Word => 5 * MEGABYTE,
            Self::Pages | Self::Pdf => 10 * MEGABYTE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PlainText => "plain text",
            Self::Html => "HTML",
            Self::Word => "Word",
            Self::Pages => "Pages",
            Self::Pdf => "PDF",
        }
    }
}

/// Reads a manuscript from disk and returns its text.
/// The size cap is checked before the file body is loaded.
pub async fn read_document(path: &Path) -> Result<String, ReadError> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| ReadError::UnsupportedFormat(path.display().to_string()))?;

    let size = tokio::fs::metadata(path).await?.len();
    if size > format.max_bytes() {
        tracing::warn!("Rejecting {} ({} bytes) - over the {} limit", path.display(), size, format.name());
        return Err(ReadError::TooLarge {
            path: path.display().to_string(),
            size,
            limit: format.max_bytes(),
        });
    }

    tracing::info!("Reading {} document: {} ({} bytes)", format.name(), path.display(), size);
    let bytes = tokio::fs::read(path).await?;

    // Decoding archives and PDFs is CPU-bound.
    tokio::task::spawn_blocking(move || extract_text(format, &bytes))
        .await
        .map_err(|e| ReadError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
}

/// Extracts text from in-memory document bytes of a known format.
pub fn extract_text(format: DocumentFormat, bytes: &[u8]) -> Result<String, ReadError> {
    let text = match format {
        DocumentFormat::PlainText => plain::decode_text(bytes),
        DocumentFormat::Html => html::extract_html_text(&plain::decode_text(bytes)),
        DocumentFormat::Word => docx::extract_docx_text(bytes)?,
        DocumentFormat::Pages => pages::extract_pages_text(bytes)?,
        DocumentFormat::Pdf => pdf::extract_pdf_text(bytes)?,
    };
    tracing::debug!("Extracted {} characters of {} text", text.chars().count(), format.name());
    Ok(text)
}

#[cfg(test)]
pub(crate) fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use std::io::Write;

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer.start_file(*name, zip::write::FileOptions::default()).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
