// src/main.rs
use clap::Parser;
use paper_extractor::config::{AppConfig, Args};
use paper_extractor::enhance::{enhance_document, ChatCompletionEnhancer};
use paper_extractor::extractors::SectionExtractor;
use paper_extractor::readers;
use paper_extractor::storage::{output_stem, StorageManager};
use paper_extractor::utils::{self, AppError};
use serde::Serialize;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments and resolve environment fallbacks
    let args = Args::parse();
    tracing::debug!("Starting processing for args: {:?}", args);
    let config = AppConfig::from_args(args);
    config.validate()?;

    // 3. Initialize storage, extractor and (optionally) the enhancer
    let storage = StorageManager::new(&config.output_dir)?;
    let section_extractor = SectionExtractor::with_extra_headings(&config.extra_headings)?;
    let enhancer = match &config.enhancer {
        Some(settings) => Some(ChatCompletionEnhancer::new(settings)?),
        None => None,
    };

    // 4. Process each document
    let mut success_count = 0;
    let mut failure_count = 0;

    for input in &config.inputs {
        match process_document(input, &config, &storage, &section_extractor, enhancer.as_ref()).await {
            Ok(true) => success_count += 1,
            Ok(false) => failure_count += 1,
            Err(e) => {
                tracing::error!("Failed to process {}: {}", input.display(), e);
                failure_count += 1;
            }
        }
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!(
            "Failed to extract sections from any of {} documents",
            failure_count
        )));
    }

    Ok(())
}

/// Reads, extracts, optionally enhances and saves one document.
/// Returns `Ok(false)` when section extraction itself reported an error.
async fn process_document(
    input: &Path,
    config: &AppConfig,
    storage: &StorageManager,
    section_extractor: &SectionExtractor,
    enhancer: Option<&ChatCompletionEnhancer>,
) -> Result<bool, AppError> {
    tracing::info!("Processing document: {}", input.display());
    let content = readers::read_document(input).await?;
    let stem = output_stem(input);

    let document = section_extractor.extract_sections(&content);
    let extracted = document.error.is_none();
    if let Some(error) = &document.error {
        tracing::error!("{}: {}", input.display(), error);
    } else {
        tracing::info!(
            "Extracted {} sections from {} ({} warnings)",
            document.populated_sections().len(),
            input.display(),
            document.warnings.len()
        );
    }
    for warning in &document.warnings {
        tracing::warn!("{}: {}", input.display(), warning);
    }

    if config.debug {
        let boundaries = section_extractor.find_boundaries(&content)?;
        let debug_path = storage.base_dir().join(format!("{}_annotated.html", stem));
        if let Err(e) = utils::debug_report::save_debug_html(&content, &boundaries, &debug_path) {
            tracing::warn!("Failed to create debug HTML: {}", e);
        }
    }

    match enhancer {
        Some(enhancer) => {
            let enhanced = enhance_document(enhancer, document).await;
            storage.save_metadata(&stem, input, &enhanced.document, enhanced.ai_enhanced)?;
            save_output(&stem, input, config, storage, &enhanced)?;
        }
        None => {
            storage.save_metadata(&stem, input, &document, false)?;
            save_output(&stem, input, config, storage, &document)?;
        }
    }

    Ok(extracted)
}

fn save_output<T: Serialize>(
    stem: &str,
    input: &Path,
    config: &AppConfig,
    storage: &StorageManager,
    document: &T,
) -> Result<(), AppError> {
    storage.save_document(stem, document)?;

    if config.stdout {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| AppError::Processing(format!("Failed to serialize {}: {}", input.display(), e)))?;
        println!("{}", json);
    }
    Ok(())
}
