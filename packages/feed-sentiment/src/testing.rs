//! Testing utilities including mock implementations.
//!
//! Useful for testing applications that use the pipeline without making
//! real model or network calls. See also [`crate::sources::MockFeedSource`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{OracleError, OracleResult};
use crate::traits::oracle::Oracle;
use crate::types::label::RawResult;

/// A mock oracle.
///
/// Answers from a table of canned results keyed by text, with a default for
/// unknown texts. Can also be made unavailable, or forced to return a fixed
/// batch regardless of input (for contract-breach tests).
pub struct MockOracle {
    /// Canned results by exact text
    results: Arc<RwLock<HashMap<String, RawResult>>>,

    /// Result for texts not in the table
    default_result: RawResult,

    /// Batch returned verbatim, ignoring inputs
    fixed_response: Option<Vec<RawResult>>,

    /// Fail every call
    unavailable: bool,

    /// Batches received, for assertions
    calls: Arc<RwLock<Vec<Vec<String>>>>,
}

impl Default for MockOracle {
    fn default() -> Self {
        Self {
            results: Arc::default(),
            default_result: RawResult::new("neutral", 0.5),
            fixed_response: None,
            unavailable: false,
            calls: Arc::default(),
        }
    }
}

impl MockOracle {
    /// Create a mock answering `neutral` (0.5) for every text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose every call fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Add a canned result for a text.
    pub fn with_result(self, text: impl Into<String>, result: RawResult) -> Self {
        self.results.write().unwrap().insert(text.into(), result);
        self
    }

    /// Set the result for unknown texts.
    pub fn with_default(mut self, result: RawResult) -> Self {
        self.default_result = result;
        self
    }

    /// Always return this batch, whatever the input.
    pub fn with_fixed_response(mut self, response: Vec<RawResult>) -> Self {
        self.fixed_response = Some(response);
        self
    }

    /// Get the number of classify calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Get the batches received, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn classify(&self, texts: &[String]) -> OracleResult<Vec<RawResult>> {
        self.calls.write().unwrap().push(texts.to_vec());

        if self.unavailable {
            return Err(OracleError::Service("mock oracle unavailable".into()));
        }

        if let Some(response) = &self.fixed_response {
            return Ok(response.clone());
        }

        let results = self.results.read().unwrap();
        Ok(texts
            .iter()
            .map(|text| {
                results
                    .get(text)
                    .cloned()
                    .unwrap_or_else(|| self.default_result.clone())
            })
            .collect())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_oracle_table_and_default() {
        let oracle = MockOracle::new()
            .with_result("known", RawResult::new("POSITIVE", 0.9))
            .with_default(RawResult::new("NEGATIVE", 0.6));

        let results = oracle
            .classify(&["known".to_string(), "unknown".to_string()])
            .await
            .unwrap();

        assert_eq!(results[0], RawResult::new("POSITIVE", 0.9));
        assert_eq!(results[1], RawResult::new("NEGATIVE", 0.6));
        assert_eq!(oracle.calls(), vec![vec!["known".to_string(), "unknown".to_string()]]);
    }

    #[tokio::test]
    async fn test_mock_oracle_unavailable() {
        let oracle = MockOracle::unavailable();
        assert!(oracle.classify(&["x".to_string()]).await.is_err());
        assert_eq!(oracle.call_count(), 1);
    }
}
