// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("Regular expression error: {0}")]
    RegexError(String),

    #[error("Invalid heading definition '{0}': {1}")]
    InvalidHeading(String, String),
}

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("{path} is {size} bytes, limit for this format is {limit} bytes")]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError), // Automatically convert zip errors

    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("PDF parsing error: {0}")]
    Pdf(String),
}

#[derive(Error, Debug)]
pub enum EnhanceError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("AI endpoint rate limit exceeded")]
    RateLimited,

    #[error("No API key configured for the AI endpoint")]
    MissingApiKey,

    #[error("Failed to parse AI response: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Reading document failed: {0}")]
    Read(#[from] ReadError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("AI processing failed: {0}")]
    Ai(#[from] EnhanceError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
