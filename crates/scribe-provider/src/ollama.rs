//! Ollama HTTP client: capability introspection and generation.
//!
//! Talks to the local server's `/api/show` and `/api/generate` endpoints.
//! Only the lightweight show probe carries a timeout; generation blocks
//! until the server answers or the connection drops.

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ProviderError;
use crate::{Capabilities, GenerationRequest, Provider, FALLBACK_CONTEXT};

/// Default Ollama API URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Deadline for the capability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Stop sequence passed to every generation call.
const STOP_SEQUENCE: &str = "<<<STOP>>>";

/// Local inference provider.
pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ShowRequest<'a> {
    name: &'a str,
}

#[derive(Deserialize, Default)]
struct ShowResponse {
    #[serde(default)]
    parameters: Option<String>,
    #[serde(default)]
    model_info: Option<serde_json::Map<String, Value>>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions<'a>,
}

#[derive(Serialize)]
struct GenerateOptions<'a> {
    num_ctx: u32,
    temperature: f32,
    stop: [&'a str; 1],
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a provider against a specific server URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Provider against the default local server.
    pub fn default_provider() -> Self {
        Self::new(DEFAULT_OLLAMA_URL)
    }
}

/// Pull the context length out of a `/api/show` reply.
///
/// Older servers expose it inside the flat `parameters` string
/// (`num_ctx 8192`); newer ones report it in `model_info` under an
/// architecture-specific `*.context_length` key. The structured shape
/// wins when both are present.
fn parse_context_length(show: &ShowResponse) -> Option<u32> {
    let mut found = None;

    if let Some(parameters) = &show.parameters {
        let re = Regex::new(r"num_ctx\s+(\d+)").expect("num_ctx regex is valid");
        if let Some(cap) = re.captures(parameters) {
            found = cap[1].parse().ok();
        }
    }

    if let Some(info) = &show.model_info {
        for (key, value) in info {
            if key.ends_with(".context_length") {
                if let Some(n) = value.as_u64() {
                    found = Some(n as u32);
                    break;
                }
            }
        }
    }

    found
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn capabilities(&self, model: &str) -> Capabilities {
        let response = self
            .client
            .post(format!("{}/api/show", self.base_url))
            .timeout(PROBE_TIMEOUT)
            .json(&ShowRequest { name: model })
            .send()
            .await;

        let show = match response {
            Ok(resp) if resp.status().is_success() => {
                resp.json::<ShowResponse>().await.unwrap_or_default()
            }
            // Missing model or unreachable server both degrade to the
            // conservative default; the caller decides whether to warn.
            _ => return Capabilities::fallback(),
        };

        let max_context_tokens = parse_context_length(&show).unwrap_or(FALLBACK_CONTEXT);
        debug!(model, max_context_tokens, "ollama capability probe");

        Capabilities {
            max_context_tokens,
            model_exists: true,
        }
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let payload = GenerateRequest {
            model: &request.model,
            prompt: &request.prompt,
            stream: false,
            options: GenerateOptions {
                num_ctx: request.context_window,
                temperature: request.temperature,
                stop: [STOP_SEQUENCE],
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_connect() {
                    ProviderError::ServiceUnavailable
                } else {
                    ProviderError::Transport(err)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: "Ollama",
                status,
                body,
            });
        }

        let generated: GenerateResponse = response.json().await?;
        debug!(chars = generated.response.len(), "ollama generation complete");
        Ok(generated.response)
    }
}
