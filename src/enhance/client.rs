// src/enhance/client.rs
use crate::config::EnhancerSettings;
use crate::document::{Enhancement, StructuredDocument};
use crate::enhance::DocumentEnhancer;
use crate::utils::error::EnhanceError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const USER_AGENT: &str = concat!("paper_extractor/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 60;
// Upper bound on raw content sent when no sections were found
const MAX_EXCERPT_CHARS: usize = 6_000;

const SYSTEM_PROMPT: &str = "You are an assistant for an academic journal. \
Reply with a single JSON object with the keys \"summary\" (string, at most three sentences), \
\"keywords\" (array of 5 to 8 strings) and \"researchQuestions\" (array of strings). \
Do not add any other text.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Enhancer backed by an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionEnhancer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl ChatCompletionEnhancer {
    pub fn new(settings: &EnhancerSettings) -> Result<Self, EnhanceError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(EnhanceError::MissingApiKey)?
            .to_string();

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

impl DocumentEnhancer for ChatCompletionEnhancer {
    async fn enhance(&self, document: &StructuredDocument) -> Result<Enhancement, EnhanceError> {
        let url = self.completions_url();
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT.to_string() },
                ChatMessage { role: "user", content: build_prompt(document) },
            ],
            temperature: 0.2,
        };

        tracing::info!("Requesting AI enhancement from {} (model {})", url, self.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?; // Propagates reqwest::Error as EnhanceError::Network

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(EnhanceError::RateLimited);
            }
            return Err(EnhanceError::Http(status));
        }

        let body: ChatResponse = response.json().await?;
        let reply = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| EnhanceError::Parse("response contained no message content".to_string()))?;

        parse_enhancement(&reply)
    }
}

/// Builds the user prompt from the most informative extracted sections.
fn build_prompt(document: &StructuredDocument) -> String {
    let mut prompt = String::from("Analyse this manuscript.\n");

    if let Some(title) = &document.title {
        prompt.push_str(&format!("\nTitle: {}\n", title));
    }

    let sections = [
        ("Abstract", &document.abstract_text),
        ("Introduction", &document.introduction),
        ("Conclusion", &document.conclusion),
    ];
    let mut any_section = false;
    for (label, text) in sections {
        if let Some(text) = text {
            prompt.push_str(&format!("\n{}:\n{}\n", label, text));
            any_section = true;
        }
    }

    if !any_section {
        let excerpt: String = document.content.chars().take(MAX_EXCERPT_CHARS).collect();
        prompt.push_str(&format!("\nText:\n{}\n", excerpt));
    }

    prompt
}

/// Parses the JSON object in a model reply, tolerating surrounding prose or code fences.
fn parse_enhancement(reply: &str) -> Result<Enhancement, EnhanceError> {
    let start = reply.find('{');
    let end = reply.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => return Err(EnhanceError::Parse("no JSON object in reply".to_string())),
    };

    serde_json::from_str(json).map_err(|e| EnhanceError::Parse(e.to_string()))
}
