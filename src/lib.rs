//! Section extraction for academic manuscripts.
//!
//! Uploaded documents are read into plain text ([`readers`]), split into named
//! sections by heading lines ([`extractors`]), optionally enriched by an AI
//! endpoint ([`enhance`]) and saved as JSON ([`storage`]).

pub mod config;
pub mod document;
pub mod enhance;
pub mod extractors;
pub mod readers;
pub mod storage;
pub mod utils;

pub use document::{EnhancedDocument, StructuredDocument};
pub use extractors::{extract_sections, SectionExtractor};
