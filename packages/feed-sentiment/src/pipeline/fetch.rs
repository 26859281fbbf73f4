//! Source fetcher - pull every configured source, absorb failures, merge in
//! source order.

use futures::stream::{self, StreamExt};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result, SourceError};
use crate::traits::source::{FeedEntry, FeedSource};
use crate::types::config::{PipelineConfig, SourceSpec};
use crate::types::item::Item;

/// Limits for one fetch pass.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Hard upper bound on items returned across all sources
    pub max_items: usize,

    /// Time budget per source
    pub timeout: Duration,

    /// Sources pulled at once
    pub concurrency: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_items: 60,
            timeout: Duration::from_secs(15),
            concurrency: 4,
        }
    }
}

impl FetchOptions {
    /// Derive fetch limits from a pipeline config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            max_items: config.max_items,
            timeout: config.source_timeout(),
            concurrency: config.fetch_concurrency,
        }
    }

    /// Set the item cap.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Set the per-source timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set concurrency.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

/// Fetch items from all sources.
///
/// Sources are pulled concurrently but merged in the order given; the merge
/// stops as soon as `max_items` is reached, dropping any pulls still in
/// flight. A failing or timed-out source contributes nothing. An empty
/// result is not an error.
///
/// Returns [`PipelineError::Cancelled`] if `cancel` fires first, discarding
/// everything fetched so far.
pub async fn fetch<S>(
    source: &S,
    specs: &[SourceSpec],
    options: &FetchOptions,
    cancel: &CancellationToken,
) -> Result<Vec<Item>>
where
    S: FeedSource + ?Sized,
{
    if specs.is_empty() || options.max_items == 0 {
        debug!(sources = specs.len(), max_items = options.max_items, "Nothing to fetch");
        return Ok(Vec::new());
    }

    info!(
        sources = specs.len(),
        max_items = options.max_items,
        concurrency = options.concurrency,
        source = source.name(),
        "Fetching sources"
    );

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("Fetch cancelled; discarding partial results");
            Err(PipelineError::Cancelled)
        }
        items = merge_in_order(source, specs, options) => {
            info!(items = items.len(), "Fetch complete");
            Ok(items)
        }
    }
}

async fn merge_in_order<S>(source: &S, specs: &[SourceSpec], options: &FetchOptions) -> Vec<Item>
where
    S: FeedSource + ?Sized,
{
    // `buffered` yields in input order regardless of completion order.
    let mut pulls = stream::iter(specs.iter().enumerate())
        .map(|(index, spec)| pull_source(source, index, spec, options))
        .buffered(options.concurrency.max(1));

    let mut items = Vec::new();
    while let Some(batch) = pulls.next().await {
        let room = options.max_items - items.len();
        items.extend(batch.into_iter().take(room));
        if items.len() >= options.max_items {
            debug!(max_items = options.max_items, "Item cap reached; skipping remaining sources");
            break;
        }
    }
    items
}

/// Pull one source into its own buffer. Never fails.
async fn pull_source<S>(source: &S, index: usize, spec: &SourceSpec, options: &FetchOptions) -> Vec<Item>
where
    S: FeedSource + ?Sized,
{
    let url = spec.url();

    let outcome = match tokio::time::timeout(options.timeout, source.pull(&url)).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout { url: url.clone() }),
    };

    match outcome {
        Ok(entries) => {
            let total = entries.len();
            let items: Vec<Item> = entries
                .into_iter()
                .filter_map(FeedEntry::into_item)
                .take(options.max_items)
                .collect();
            debug!(index, url = %url, entries = total, items = items.len(), "Source fetched");
            items
        }
        Err(e) => {
            warn!(index, url = %url, error = %e, "Source failed; contributing no items");
            Vec::new()
        }
    }
}
