//! Provider error taxonomy.
//!
//! The CLI surfaces these messages verbatim, so each variant carries
//! enough to act on: "service not running" is distinct from a generic
//! transport failure, and API errors keep the status and body.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// The local inference server refused the connection.
    #[error("Ollama is not running. Start it with `ollama serve` and try again.")]
    ServiceUnavailable,

    /// The backend answered with a non-success HTTP status.
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The cloud provider was selected but its API key is not exported.
    #[error("missing {var}. Export it in your shell: export {var}=\"your-key\"")]
    MissingApiKey { var: &'static str },

    /// Any other transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
