//! Provider abstraction over model-serving backends.
//!
//! A provider exposes capability lookup and text generation. The registry
//! picks one from the model name: registered prefixes route to their
//! backend (`gemini-*` goes to the cloud), everything else is served by
//! the local Ollama server.

pub mod error;
pub mod gemini;
pub mod ollama;

use async_trait::async_trait;

pub use error::ProviderError;
use gemini::GeminiProvider;
use ollama::OllamaProvider;

/// Context window assumed when a capability probe fails.
pub const FALLBACK_CONTEXT: u32 = 4096;

/// What a backend reports about a model.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub max_context_tokens: u32,
    pub model_exists: bool,
}

impl Capabilities {
    /// Conservative fallback when the backend cannot be queried.
    pub fn fallback() -> Self {
        Self {
            max_context_tokens: FALLBACK_CONTEXT,
            model_exists: false,
        }
    }
}

/// One generation call. Transient, never persisted.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub context_window: u32,
    pub temperature: f32,
}

/// A model-serving backend.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short backend name for logs and error messages.
    fn name(&self) -> &'static str;

    /// Query the model's context window.
    ///
    /// Never fails: probe errors fall back to [`Capabilities::fallback`]
    /// with `model_exists = false`, and callers decide whether to warn.
    async fn capabilities(&self, model: &str) -> Capabilities;

    /// Run one generation call and return the raw generated text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;
}

/// Registered model-name prefixes. Future backends (gpt, claude) slot in
/// here.
const REGISTRY: &[(&str, fn() -> Box<dyn Provider>)] = &[("gemini", gemini_backend)];

fn gemini_backend() -> Box<dyn Provider> {
    Box::new(GeminiProvider::new())
}

/// Pick a provider from the model name.
///
/// Matching is prefix-based on the lowercased name; anything without a
/// registered prefix lands on the local Ollama provider.
pub fn resolve_provider(model: &str) -> Box<dyn Provider> {
    let lower = model.to_lowercase();
    for (prefix, backend) in REGISTRY {
        if lower.starts_with(prefix) {
            return backend();
        }
    }
    Box::new(OllamaProvider::default_provider())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_prefix_resolves_to_cloud() {
        assert_eq!(resolve_provider("gemini-1.5-flash").name(), "gemini");
        assert_eq!(resolve_provider("gemini-2.0-pro").name(), "gemini");
    }

    #[test]
    fn test_prefix_match_is_case_insensitive() {
        assert_eq!(resolve_provider("Gemini-1.5-Pro").name(), "gemini");
        assert_eq!(resolve_provider("GEMINI-FLASH").name(), "gemini");
    }

    #[test]
    fn test_everything_else_resolves_to_ollama() {
        assert_eq!(resolve_provider("llama3.1").name(), "ollama");
        assert_eq!(resolve_provider("mistral").name(), "ollama");
        assert_eq!(resolve_provider("phi3:mini").name(), "ollama");
        assert_eq!(resolve_provider("my-gemini").name(), "ollama");
    }
}
