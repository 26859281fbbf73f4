//! Hugging Face implementation of the Oracle trait.
//!
//! Classifies through the hosted inference API. When the service reports the
//! configured model as missing or loading, the whole batch is retried once on
//! the fallback model so every result in a run comes from the same model.
//! Any other failure is returned as is.
//!
//! # Example
//!
//! ```rust,ignore
//! use feed_sentiment::oracle::HuggingFaceOracle;
//!
//! let oracle = HuggingFaceOracle::new(&credentials, "cardiffnlp/twitter-xlm-roberta-base-sentiment")
//!     .with_fallback_model(Some("distilbert-base-uncased-finetuned-sst-2-english".into()));
//! ```

use async_trait::async_trait;
use hf_inference_client::{ClassificationRequest, InferenceClient, InferenceError};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{OracleError, OracleResult};
use crate::security::InferenceCredentials;
use crate::traits::oracle::Oracle;
use crate::types::config::PipelineConfig;
use crate::types::label::RawResult;

/// Texts per inference request.
const DEFAULT_BATCH_SIZE: usize = 32;

/// Inference requests can block while a cold model loads.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Hosted-inference oracle.
#[derive(Clone)]
pub struct HuggingFaceOracle {
    client: InferenceClient,
    model: String,
    fallback_model: Option<String>,
    batch_size: usize,
}

impl HuggingFaceOracle {
    /// Create an oracle for a model.
    pub fn new(credentials: &InferenceCredentials, model: impl Into<String>) -> Self {
        let mut client = match &credentials.api_token {
            Some(token) => InferenceClient::new(token.expose()),
            None => InferenceClient::anonymous(),
        };
        if let Some(url) = &credentials.base_url {
            client = client.with_base_url(url);
        }

        Self {
            client,
            model: model.into(),
            fallback_model: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Create an oracle for the model and fallback named in a pipeline config.
    pub fn from_config(
        config: &PipelineConfig,
        credentials: &InferenceCredentials,
    ) -> OracleResult<Self> {
        Self::new(credentials, &config.model)
            .with_fallback_model(config.fallback_model.clone())
            .with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Set or clear the fallback model.
    pub fn with_fallback_model(mut self, model: Option<String>) -> Self {
        self.fallback_model = model.filter(|m| *m != self.model);
        self
    }

    /// Set texts per request.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> OracleResult<Self> {
        self.client = self
            .client
            .with_timeout(timeout)
            .map_err(|e| OracleError::Config(e.to_string()))?;
        Ok(self)
    }

    /// Get the primary model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Models in the order they are tried.
    pub fn model_chain(&self) -> Vec<&str> {
        std::iter::once(self.model.as_str())
            .chain(self.fallback_model.as_deref())
            .collect()
    }

    /// Classify every text with one model, chunked into requests.
    async fn classify_with(
        &self,
        model: &str,
        texts: &[String],
    ) -> Result<Vec<RawResult>, InferenceError> {
        let mut results = Vec::with_capacity(texts.len());

        for (batch, chunk) in texts.chunks(self.batch_size).enumerate() {
            let request = ClassificationRequest::new(chunk.iter().cloned())
                .truncate()
                .wait_for_model();

            let scored = self.client.classify(model, request).await?;

            debug!(model = %model, batch, size = chunk.len(), "Batch classified");
            results.extend(
                scored
                    .into_iter()
                    .map(|s| RawResult::new(s.label, s.score)),
            );
        }

        Ok(results)
    }
}

#[async_trait]
impl Oracle for HuggingFaceOracle {
    async fn classify(&self, texts: &[String]) -> OracleResult<Vec<RawResult>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let chain = self.model_chain();
        for (attempt, model) in chain.iter().enumerate() {
            match self.classify_with(model, texts).await {
                Ok(results) => {
                    if attempt > 0 {
                        info!(model = %model, "Classified with fallback model");
                    }
                    return Ok(results);
                }
                Err(e) if e.is_model_unavailable() => {
                    warn!(model = %model, error = %e, "Model unavailable");
                }
                Err(e) => return Err(OracleError::Service(Box::new(e))),
            }
        }

        Err(OracleError::NoModelAvailable {
            tried: chain.iter().map(|m| m.to_string()).collect(),
        })
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}
