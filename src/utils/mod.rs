// src/utils/mod.rs
pub mod error;
pub mod logging;
pub mod debug_report;

pub use error::AppError; // Re-export main error type for convenience
