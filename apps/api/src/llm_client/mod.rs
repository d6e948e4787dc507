//! LLM client: the single point of entry for all generative-model calls.
//!
//! ARCHITECTURAL RULE: no other module may call the Gemini API directly.
//! Question generation, answer evaluation, and holistic feedback all go
//! through this module, and transport failures are never returned as if
//! they were model output.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all LLM calls. Intentionally hardcoded to prevent drift.
pub const MODEL: &str = "gemini-1.5-pro";
const MAX_OUTPUT_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;
/// Per-call bound on a full round trip. A hung API call fails with
/// `LlmError::Timeout` instead of blocking the interview turn forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout(REQUEST_TIMEOUT)
        } else {
            LlmError::Http(e)
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_tokens: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidate_tokens: u32,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Extracts the text of the first candidate, concatenating its parts.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// The single LLM client used by both orchestrators.
/// Wraps the Gemini `generateContent` API with retry and a per-call timeout.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    /// Overrides the API base URL (tests point this at a local stub).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Makes a raw call to the model, returning the response text.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };
        let url = format!("{}/{MODEL}:generateContent", self.base_url);

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(e.into());
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: GenerateContentResponse = response.json().await?;

            if let Some(usage) = &parsed.usage {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, candidate_tokens={}",
                    usage.prompt_tokens, usage.candidate_tokens
                );
            }

            return parsed.text().ok_or(LlmError::EmptyContent);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Asks one open-ended interview question grounded in the candidate's
    /// document.
    pub async fn generate_question(
        &self,
        interview_type: &str,
        document_text: &str,
    ) -> Result<String, LlmError> {
        let prompt = prompts::QUESTION_PROMPT_TEMPLATE
            .replace("{interview_type}", interview_type)
            .replace("{document_text}", document_text);
        self.call(&prompt).await
    }

    /// Evaluates one question/answer pair. The returned free text contains
    /// the three labeled `Category: [SCORE]/10` lines that `scores::parse_scores`
    /// extracts, plus the written evaluation sections.
    pub async fn evaluate_answer(&self, question: &str, answer: &str) -> Result<String, LlmError> {
        let prompt = prompts::EVALUATION_PROMPT_TEMPLATE
            .replace("{question}", question)
            .replace("{answer}", answer);
        self.call(&prompt).await
    }

    /// Produces the end-of-interview summary over the full Q&A log.
    pub async fn holistic_feedback(&self, interview_log: &str) -> Result<String, LlmError> {
        let prompt = prompts::HOLISTIC_PROMPT_TEMPLATE.replace("{interview_log}", interview_log);
        self.call(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [{"content": {"parts": [{"text": "Tell me "}, {"text": "about scaling."}]}}],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("Tell me about scaling."));
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.text().is_none());
    }

    #[test]
    fn error_body_message_is_extracted() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let parsed: GeminiError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "API key not valid");
    }
}
