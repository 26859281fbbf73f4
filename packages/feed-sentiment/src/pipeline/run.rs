//! Pipeline orchestration - fetch, normalize, classify, aggregate.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::pipeline::aggregate::{aggregate, rank_all};
use crate::pipeline::classify::classify;
use crate::pipeline::fetch::{fetch, FetchOptions};
use crate::pipeline::normalize::normalize;
use crate::traits::{oracle::Oracle, source::FeedSource};
use crate::types::{
    config::{InputMode, PipelineConfig},
    item::{CleanItem, Item},
    label::Label,
    report::{Report, RunOutcome, TextOrigin},
};

/// One batch pass from sources to summary.
///
/// Owns its configuration and collaborators; holds no state between runs.
///
/// # Example
///
/// ```rust,ignore
/// use feed_sentiment::{Pipeline, PipelineConfig, HttpFeedSource};
///
/// let pipeline = Pipeline::new(PipelineConfig::new(), HttpFeedSource::new()?, oracle);
/// match pipeline.run(&CancellationToken::new()).await? {
///     RunOutcome::Analyzed(report) => println!("{:?}", report.summary),
///     RunOutcome::NothingToAnalyze => println!("No texts to analyze."),
/// }
/// ```
pub struct Pipeline<S, O> {
    config: PipelineConfig,
    source: S,
    oracle: O,
}

impl<S, O> Pipeline<S, O>
where
    S: FeedSource,
    O: Oracle,
{
    /// Create a pipeline from its configuration and collaborators.
    pub fn new(config: PipelineConfig, source: S, oracle: O) -> Self {
        Self {
            config,
            source,
            oracle,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Get the feed source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Run the pipeline once.
    ///
    /// In news mode an empty clean set is replaced by the sample, once. If
    /// there is still nothing to classify the oracle is not called and the
    /// outcome is [`RunOutcome::NothingToAnalyze`].
    pub async fn run(&self, cancel: &CancellationToken) -> Result<RunOutcome> {
        let (clean, origin) = self.collect(cancel).await?;

        if clean.is_empty() {
            info!("No texts to analyze");
            return Ok(RunOutcome::NothingToAnalyze);
        }

        info!(items = clean.len(), origin = ?origin, "Found items; running sentiment");

        let items = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Run cancelled during classification");
                return Err(PipelineError::Cancelled);
            }
            result = classify(&self.oracle, clean) => result?,
        };

        let Some(summary) = aggregate(&items) else {
            info!("Classification produced no items");
            return Ok(RunOutcome::NothingToAnalyze);
        };
        let rankings = rank_all(&items, self.config.top_k);

        for label in Label::ALL {
            info!(
                label = %label,
                count = summary.count(label),
                percent = summary.percentage(label),
                "Sentiment summary"
            );
        }

        Ok(RunOutcome::Analyzed(Report {
            origin,
            items,
            summary,
            rankings,
        }))
    }

    /// Gather the clean texts to classify, applying the fallback policy.
    async fn collect(&self, cancel: &CancellationToken) -> Result<(Vec<CleanItem>, TextOrigin)> {
        match self.config.input {
            InputMode::Sample => Ok((self.sample_items(), TextOrigin::Sample)),
            InputMode::News => {
                let specs = self.config.source_specs();
                let options = FetchOptions::from_config(&self.config);
                let fetched = fetch(&self.source, &specs, &options, cancel).await?;
                let clean = normalize(&fetched, self.config.max_items);

                if clean.is_empty() {
                    warn!(
                        sources = specs.len(),
                        "All live sources blocked or empty; using the local sample"
                    );
                    Ok((self.sample_items(), TextOrigin::Fallback))
                } else {
                    Ok((clean, TextOrigin::Live))
                }
            }
        }
    }

    fn sample_items(&self) -> Vec<CleanItem> {
        let items: Vec<Item> = self.config.sample.iter().map(Item::new).collect();
        normalize(&items, self.config.max_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{FeedEntry, MockFeedSource};
    use crate::testing::MockOracle;
    use crate::types::label::RawResult;

    fn news_config(feeds: &[&str]) -> PipelineConfig {
        PipelineConfig::new()
            .with_feeds(feeds.iter().copied())
            .without_default_feeds()
    }

    #[tokio::test]
    async fn test_run_live_sources() {
        let source = MockFeedSource::new().with_entries(
            "https://a/rss",
            vec![
                FeedEntry::new("<b>Great</b> festival", "sunny"),
                FeedEntry::new("great FESTIVAL", "  sunny "),
                FeedEntry::new("Rain", "cold and wet"),
            ],
        );
        let oracle = MockOracle::new()
            .with_result("Great festival - sunny", RawResult::new("positive", 0.97))
            .with_result("Rain - cold and wet", RawResult::new("negative", 0.88));

        let pipeline = Pipeline::new(news_config(&["https://a/rss"]), source, oracle);
        let outcome = pipeline.run(&CancellationToken::new()).await.unwrap();

        let report = outcome.report().unwrap();
        assert_eq!(report.origin, TextOrigin::Live);
        assert_eq!(report.items.len(), 2);
        assert_eq!(report.summary.count(Label::Positive), 1);
        assert_eq!(report.summary.count(Label::Negative), 1);
        assert_eq!(report.ranking(Label::Positive).unwrap().len(), 1);
        assert_eq!(pipeline.oracle().call_count(), 1);
    }

    #[tokio::test]
    async fn test_run_substitutes_sample_when_sources_fail() {
        let source = MockFeedSource::new()
            .with_failure("https://a/rss")
            .with_failure("https://b/rss")
            .with_failure("https://c/rss");
        let config = news_config(&["https://a/rss", "https://b/rss", "https://c/rss"])
            .with_sample(["Lovely day", "Awful queue"]);

        let pipeline = Pipeline::new(config, source, MockOracle::new());
        let outcome = pipeline.run(&CancellationToken::new()).await.unwrap();

        let report = outcome.report().unwrap();
        assert_eq!(report.origin, TextOrigin::Fallback);
        assert_eq!(report.items.len(), 2);
        assert_eq!(
            pipeline.oracle().calls(),
            vec![vec!["Lovely day".to_string(), "Awful queue".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_run_nothing_to_analyze() {
        let source = MockFeedSource::new();
        let config = news_config(&["https://empty/rss"]).with_sample(Vec::<String>::new());

        let pipeline = Pipeline::new(config, source, MockOracle::new());
        let outcome = pipeline.run(&CancellationToken::new()).await.unwrap();

        assert!(matches!(outcome, RunOutcome::NothingToAnalyze));
        assert_eq!(pipeline.oracle().call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_sample_mode_skips_fetch() {
        let source = MockFeedSource::new();
        let config = news_config(&["https://a/rss"]).with_input(InputMode::Sample);

        let pipeline = Pipeline::new(config, source, MockOracle::new());
        let outcome = pipeline.run(&CancellationToken::new()).await.unwrap();

        let report = outcome.report().unwrap();
        assert_eq!(report.origin, TextOrigin::Sample);
        assert_eq!(report.items.len(), 4);
        assert_eq!(pipeline.source().call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_oracle_unavailable_aborts() {
        let source = MockFeedSource::new()
            .with_entries("https://a/rss", vec![FeedEntry::titled("Anything")]);

        let pipeline = Pipeline::new(
            news_config(&["https://a/rss"]),
            source,
            MockOracle::unavailable(),
        );
        let err = pipeline.run(&CancellationToken::new()).await.unwrap_err();

        assert!(matches!(err, PipelineError::OracleUnavailable(_)));
    }

    #[tokio::test]
    async fn test_run_already_cancelled() {
        let source = MockFeedSource::new()
            .with_entries("https://a/rss", vec![FeedEntry::titled("Anything")]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let pipeline = Pipeline::new(news_config(&["https://a/rss"]), source, MockOracle::new());
        let err = pipeline.run(&cancel).await.unwrap_err();

        assert!(matches!(err, PipelineError::Cancelled));
        assert_eq!(pipeline.oracle().call_count(), 0);
    }
}
