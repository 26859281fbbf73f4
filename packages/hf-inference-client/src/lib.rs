//! Pure Hugging Face inference REST API client
//!
//! A minimal client for the hosted inference API with no domain-specific logic.
//! Currently covers the text-classification task.
//!
//! # Example
//!
//! ```rust,ignore
//! use hf_inference_client::{InferenceClient, ClassificationRequest};
//!
//! let client = InferenceClient::new(token);
//!
//! let results = client
//!     .classify("cardiffnlp/twitter-xlm-roberta-base-sentiment",
//!               ClassificationRequest::new(["What a great day"]).truncate())
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{InferenceError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

/// Default public inference endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Pure inference API client.
#[derive(Clone)]
pub struct InferenceClient {
    http_client: Client,
    api_token: Option<String>,
    base_url: String,
}

impl Default for InferenceClient {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl InferenceClient {
    /// Create a client authenticated with the given token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_token: Some(api_token.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client without credentials (rate limited by the API).
    pub fn anonymous() -> Self {
        Self {
            http_client: Client::new(),
            api_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (self-hosted inference endpoints, proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Rebuild the HTTP client with a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError::Config(e.to_string()))?;
        Ok(self)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests carry a bearer token.
    pub fn is_authenticated(&self) -> bool {
        self.api_token.is_some()
    }

    /// Text classification.
    ///
    /// Returns the best candidate for every input, in input order.
    pub async fn classify(
        &self,
        model: &str,
        request: ClassificationRequest,
    ) -> Result<Vec<LabelScore>> {
        let start = std::time::Instant::now();
        let expected = request.inputs.len();

        let mut builder = self
            .http_client
            .post(format!("{}/models/{}", self.base_url, model))
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder.send().await.map_err(|e| {
            warn!(model = %model, error = %e, "Inference request failed");
            InferenceError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|body| body.error)
                .unwrap_or(error_text);
            warn!(model = %model, status = %status, error = %message, "Inference API error");
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: ClassificationResponseRaw = response
            .json()
            .await
            .map_err(|e| InferenceError::Parse(e.to_string()))?;

        let results = raw
            .into_top()
            .into_iter()
            .enumerate()
            .map(|(i, top)| {
                top.ok_or_else(|| InferenceError::Parse(format!("no candidates for input {}", i)))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            model = %model,
            inputs = expected,
            results = results.len(),
            duration_ms = start.elapsed().as_millis(),
            "Inference classification"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = InferenceClient::anonymous().with_base_url("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_token_marks_authenticated() {
        let client = InferenceClient::new("hf_test");
        assert!(client.is_authenticated());
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_model_unavailable_detection() {
        let loading = InferenceError::Api {
            status: 503,
            message: "Model is currently loading".into(),
        };
        let bad_request = InferenceError::Api {
            status: 400,
            message: "bad input".into(),
        };
        assert!(loading.is_model_unavailable());
        assert!(!bad_request.is_model_unavailable());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = InferenceClient::anonymous()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2))
            .unwrap();

        let err = client
            .classify("any/model", ClassificationRequest::new(["text"]))
            .await
            .unwrap_err();
        assert!(matches!(err, InferenceError::Network(_)));
    }
}
