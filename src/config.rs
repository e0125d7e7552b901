// src/config.rs
use crate::document::SectionType;
use crate::utils::error::AppError;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_AI_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

pub const ENV_AI_ENDPOINT: &str = "PAPER_AI_ENDPOINT";
pub const ENV_AI_MODEL: &str = "PAPER_AI_MODEL";
pub const ENV_AI_API_KEY: &str = "PAPER_AI_API_KEY";

/// Command Line Interface for the manuscript section extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Manuscript files to process (.txt, .md, .html, .docx, .pages, .pdf)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory for extracted sections
    #[arg(short, long, default_value = "./output")]
    pub output_dir: PathBuf,

    /// Debug mode - save annotated HTML files showing detected headings
    #[arg(short, long)]
    pub debug: bool,

    /// Also print each extracted document as JSON on stdout
    #[arg(long)]
    pub stdout: bool,

    /// Add an AI summary, keywords and research questions to each document
    #[arg(short, long)]
    pub enhance: bool,

    /// OpenAI-compatible API base URL (falls back to PAPER_AI_ENDPOINT)
    #[arg(long)]
    pub ai_endpoint: Option<String>,

    /// Model name for enhancement (falls back to PAPER_AI_MODEL)
    #[arg(long)]
    pub ai_model: Option<String>,

    /// Extra heading phrase for a section type, e.g. methods="Experimental Setup"
    #[arg(long = "extra-heading", value_name = "TYPE=PHRASE", value_parser = parse_extra_heading)]
    pub extra_headings: Vec<(SectionType, String)>,
}

/// Connection settings for the AI enhancement endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancerSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub inputs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub debug: bool,
    pub stdout: bool,
    /// `None` when enhancement is disabled.
    pub enhancer: Option<EnhancerSettings>,
    pub extra_headings: Vec<(SectionType, String)>,
}

impl AppConfig {
    /// Resolves arguments against the process environment.
    pub fn from_args(args: Args) -> Self {
        Self::from_args_with_env(args, |key| std::env::var(key).ok())
    }

    /// Resolves arguments using `env` for variable lookups. Command-line values win.
    pub fn from_args_with_env<F>(args: Args, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enhancer = args.enhance.then(|| EnhancerSettings {
            endpoint: args
                .ai_endpoint
                .clone()
                .or_else(|| env(ENV_AI_ENDPOINT))
                .unwrap_or_else(|| DEFAULT_AI_ENDPOINT.to_string()),
            model: args
                .ai_model
                .clone()
                .or_else(|| env(ENV_AI_MODEL))
                .unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            api_key: env(ENV_AI_API_KEY),
        });

        if let Some(settings) = &enhancer {
            tracing::debug!("AI enhancement enabled: endpoint {}, model {}", settings.endpoint, settings.model);
        }

        Self {
            inputs: args.inputs,
            output_dir: args.output_dir,
            debug: args.debug,
            stdout: args.stdout,
            enhancer,
            extra_headings: args.extra_headings,
        }
    }

    /// Rejects settings that cannot work before any document is read.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(settings) = &self.enhancer {
            if settings.api_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
                return Err(AppError::Config(format!(
                    "--enhance requires an API key in {}",
                    ENV_AI_API_KEY
                )));
            }
        }
        Ok(())
    }
}

/// Parses `TYPE=PHRASE`, e.g. `methods=Experimental Setup`.
pub fn parse_extra_heading(value: &str) -> Result<(SectionType, String), String> {
    let (section, phrase) = value
        .split_once('=')
        .ok_or_else(|| format!("expected TYPE=PHRASE, got '{}'", value))?;
    let section: SectionType = section.parse()?;
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return Err(format!("empty heading phrase for {}", section));
    }
    Ok((section, phrase.to_string()))
}
