pub mod references;
pub mod section;

// Re-export key extraction types for convenience
pub use references::split_references;
pub use section::{extract_sections, SectionExtractor};
