//! Error types for the inference client.

use thiserror::Error;

/// Result type for inference client operations.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Inference client errors.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Configuration error (invalid base URL, client construction)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, model not found, rate limit)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response shape)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl InferenceError {
    /// Whether the server reported the model as missing or still loading.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, InferenceError::Api { status, .. } if *status == 404 || *status == 503)
    }
}
