pub mod models;

pub use models::{
    Declarations,
    EnhancedDocument,
    Enhancement,
    SectionBoundary,
    SectionType,
    StructuredDocument,
};
