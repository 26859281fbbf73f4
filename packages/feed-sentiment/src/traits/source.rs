//! Feed source trait for pluggable ingestion.
//!
//! A `FeedSource` pulls one syndication endpoint and returns its entries.
//! The fetcher drives it once per configured source and absorbs failures,
//! so implementations can simply return an error when anything goes wrong.
//!
//! # Usage
//!
//! ```rust,ignore
//! use feed_sentiment::traits::source::FeedSource;
//!
//! let entries = source.pull("https://www.tagesschau.de/xml/rss2").await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SourceResult;
use crate::types::item::Item;

/// One entry of a syndication feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Entry title, if present
    pub title: Option<String>,

    /// Summary or description, if present
    pub summary: Option<String>,
}

impl FeedEntry {
    /// Create an entry with both fields.
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            summary: Some(summary.into()),
        }
    }

    /// Create an entry with a title and no summary.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            summary: None,
        }
    }

    /// Convert to a pipeline item; missing fields count as empty.
    pub fn into_item(self) -> Option<Item> {
        Item::from_entry(
            self.title.as_deref().unwrap_or_default(),
            self.summary.as_deref().unwrap_or_default(),
        )
    }
}

/// Feed source trait.
///
/// Implementations:
/// - `HttpFeedSource` - RSS/Atom over HTTP
/// - `MockFeedSource` - canned entries for tests
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Pull all entries currently published at `url`, in document order.
    async fn pull(&self, url: &str) -> SourceResult<Vec<FeedEntry>>;

    /// Get the source name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
