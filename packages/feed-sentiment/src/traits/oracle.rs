//! Oracle trait for sentiment classification.
//!
//! The model is opaque to the pipeline. The contract: one result per input
//! text, in the same order, each with a label in the model's own vocabulary
//! and a confidence score in [0, 1]. The pipeline checks the contract after
//! every call and treats any breach as fatal.

use async_trait::async_trait;

use crate::error::OracleResult;
use crate::types::label::RawResult;

/// Classification oracle.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Classify a batch of texts.
    ///
    /// An `Err` means the oracle is unavailable; the run aborts.
    async fn classify(&self, texts: &[String]) -> OracleResult<Vec<RawResult>>;

    /// Get the oracle name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
