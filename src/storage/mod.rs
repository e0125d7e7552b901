// src/storage/mod.rs
use crate::document::StructuredDocument;
use crate::utils::error::StorageError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves an extracted (or enhanced) document as pretty JSON: `<stem>_sections.json`
    pub fn save_document<T: Serialize>(&self, stem: &str, document: &T) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_sections.json", stem));

        let json = serde_json::to_string_pretty(document)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved sections to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the extraction in JSON format: `<stem>_meta.json`
    pub fn save_metadata(
        &self,
        stem: &str,
        source: &Path,
        document: &StructuredDocument,
        ai_enhanced: bool,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", stem));

        let metadata = serde_json::json!({
            "source": source.display().to_string(),
            "title": document.title,
            "sections": document.populated_sections(),
            "reference_count": document.references.as_ref().map_or(0, Vec::len),
            "warning_count": document.warnings.len(),
            "extraction_failed": document.error.is_some(),
            "ai_enhanced": ai_enhanced,
            "content_length": document.content.len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}

/// File stem used for output names, e.g. `paper` for `uploads/paper.pdf`.
pub fn output_stem(source: &Path) -> String {
    source
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("document")
        .to_string()
}
