// src/enhance/mod.rs
//! Optional AI enhancement of extracted documents.

pub mod client;

pub use client::ChatCompletionEnhancer;

use crate::document::{EnhancedDocument, Enhancement, StructuredDocument};
use crate::utils::error::EnhanceError;
use std::future::Future;

/// Something that can derive a summary, keywords and research questions
/// from an extracted document.
pub trait DocumentEnhancer {
    fn enhance(
        &self,
        document: &StructuredDocument,
    ) -> impl Future<Output = Result<Enhancement, EnhanceError>> + Send;
}

/// Runs `enhancer` over `document`. Never fails: when the enhancer errors, or
/// the document already carries an extraction error, the base document is
/// returned unchanged with `ai_enhanced == false`.
pub async fn enhance_document<E: DocumentEnhancer>(enhancer: &E, document: StructuredDocument) -> EnhancedDocument {
    if let Some(error) = &document.error {
        tracing::debug!("Skipping AI enhancement for a failed extraction: {}", error);
        return EnhancedDocument::unenhanced(document);
    }

    match enhancer.enhance(&document).await {
        Ok(enhancement) => {
            tracing::info!(
                "AI enhancement added {} keywords and {} research questions",
                enhancement.keywords.len(),
                enhancement.research_questions.len()
            );
            EnhancedDocument::with_enhancement(document, enhancement)
        }
        Err(e) => {
            tracing::warn!("AI enhancement failed, keeping extracted document: {}", e);
            EnhancedDocument::unenhanced(document)
        }
    }
}
