//! Gemini REST client.
//!
//! The cloud backend reports a fixed 1M-token context window instead of
//! probing, and requires an API key from the environment. The key check
//! happens before any network call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProviderError;
use crate::{Capabilities, GenerationRequest, Provider};

/// Base URL of the Gemini models endpoint.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "SCRIBE_GEMINI_KEY";

/// Context window reported for every Gemini model.
const GEMINI_CONTEXT: u32 = 1_048_576;

/// Output cap for documentation runs.
const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Cloud provider.
pub struct GeminiProvider {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GeminiProvider {
    pub fn new() -> Self {
        Self::with_base_url(GEMINI_API_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// First candidate text, or empty when the reply carries none.
fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .map(|part| part.text.clone())
        .unwrap_or_default()
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn capabilities(&self, _model: &str) -> Capabilities {
        Capabilities {
            max_context_tokens: GEMINI_CONTEXT,
            model_exists: true,
        }
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ProviderError::MissingApiKey { var: API_KEY_VAR })?;

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, request.model, api_key
        );

        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: "Gemini",
                status,
                body,
            });
        }

        let reply: GenerateContentResponse = response.json().await?;
        debug!(candidates = reply.candidates.len(), "gemini generation complete");
        Ok(extract_text(&reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_text_from_nested_reply() {
        let resp = reply(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "generated docs" }] }
            }]
        }));
        assert_eq!(extract_text(&resp), "generated docs");
    }

    #[test]
    fn test_extract_text_takes_first_candidate_and_part() {
        let resp = reply(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other" }] } }
            ]
        }));
        assert_eq!(extract_text(&resp), "first");
    }

    #[test]
    fn test_extract_text_empty_reply() {
        assert_eq!(extract_text(&reply(json!({}))), "");
        assert_eq!(extract_text(&reply(json!({ "candidates": [] }))), "");
        assert_eq!(extract_text(&reply(json!({ "candidates": [{}] }))), "");
        assert_eq!(
            extract_text(&reply(json!({ "candidates": [{ "content": { "parts": [] } }] }))),
            ""
        );
    }

    #[tokio::test]
    async fn test_fixed_capabilities() {
        let provider = GeminiProvider::new();
        let caps = provider.capabilities("gemini-1.5-flash").await;
        assert_eq!(caps.max_context_tokens, GEMINI_CONTEXT);
        assert!(caps.model_exists);
    }
}
