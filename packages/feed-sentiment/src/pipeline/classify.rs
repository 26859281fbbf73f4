//! Classification step - one oracle call, contract check, canonical labels.

use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::pipeline::canonicalize::canonicalize;
use crate::traits::oracle::Oracle;
use crate::types::item::{CleanItem, ClassifiedItem};
use crate::types::label::RawResult;

/// Classify clean items through the oracle.
///
/// Issues exactly one oracle call (none for an empty input). An oracle
/// error aborts with [`PipelineError::OracleUnavailable`]; a broken output
/// contract aborts with [`PipelineError::MalformedOracleOutput`].
pub async fn classify<O>(oracle: &O, items: Vec<CleanItem>) -> Result<Vec<ClassifiedItem>>
where
    O: Oracle + ?Sized,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let texts: Vec<String> = items.into_iter().map(|item| item.text).collect();
    info!(items = texts.len(), oracle = oracle.name(), "Running sentiment classification");

    let raw = oracle.classify(&texts).await.map_err(|e| {
        warn!(oracle = oracle.name(), error = %e, "Oracle unavailable");
        PipelineError::OracleUnavailable(e)
    })?;

    validate(&texts, &raw)?;

    let classified: Vec<ClassifiedItem> = texts
        .into_iter()
        .zip(raw.iter())
        .map(|(text, result)| ClassifiedItem::new(text, canonicalize(result), result.score))
        .collect();

    debug!(items = classified.len(), "Labels canonicalized");
    Ok(classified)
}

/// Check the oracle's output contract.
fn validate(texts: &[String], raw: &[RawResult]) -> Result<()> {
    if raw.len() != texts.len() {
        return Err(PipelineError::MalformedOracleOutput {
            reason: format!("expected {} results, got {}", texts.len(), raw.len()),
        });
    }

    for (index, result) in raw.iter().enumerate() {
        if result.label.trim().is_empty() {
            return Err(PipelineError::MalformedOracleOutput {
                reason: format!("result {} has no label", index),
            });
        }
        if !result.score.is_finite() || !(0.0..=1.0).contains(&result.score) {
            return Err(PipelineError::MalformedOracleOutput {
                reason: format!("result {} has score {} outside [0, 1]", index, result.score),
            });
        }
    }

    Ok(())
}
