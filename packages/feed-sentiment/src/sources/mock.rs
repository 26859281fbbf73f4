//! Mock feed source for testing.
//!
//! Provides canned entries, failures and delays per URL.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{SourceError, SourceResult};
use crate::traits::source::{FeedEntry, FeedSource};

/// Mock feed source for testing.
///
/// URLs without canned entries answer with an empty feed.
///
/// # Example
///
/// ```rust
/// use feed_sentiment::sources::MockFeedSource;
/// use feed_sentiment::traits::source::FeedEntry;
///
/// let mock = MockFeedSource::new()
///     .with_entries("https://a.example/rss", vec![FeedEntry::new("Title", "Summary")])
///     .with_failure("https://b.example/rss");
/// ```
#[derive(Default)]
pub struct MockFeedSource {
    /// Canned entries indexed by URL
    entries: Arc<RwLock<HashMap<String, Vec<FeedEntry>>>>,
    /// URLs that fail with an HTTP error
    failures: Arc<RwLock<HashSet<String>>>,
    /// Artificial latency per URL
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// URLs pulled, in call order
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFeedSource {
    /// Create a new empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entries returned for a URL.
    pub fn add_entries(&self, url: impl Into<String>, entries: Vec<FeedEntry>) {
        self.entries.write().unwrap().insert(url.into(), entries);
    }

    /// Make a URL fail.
    pub fn add_failure(&self, url: impl Into<String>) {
        self.failures.write().unwrap().insert(url.into());
    }

    /// Delay answers for a URL.
    pub fn add_delay(&self, url: impl Into<String>, delay: Duration) {
        self.delays.write().unwrap().insert(url.into(), delay);
    }

    /// Builder form of [`add_entries`](Self::add_entries).
    pub fn with_entries(self, url: impl Into<String>, entries: Vec<FeedEntry>) -> Self {
        self.add_entries(url, entries);
        self
    }

    /// Builder form of [`add_failure`](Self::add_failure).
    pub fn with_failure(self, url: impl Into<String>) -> Self {
        self.add_failure(url);
        self
    }

    /// Builder form of [`add_delay`](Self::add_delay).
    pub fn with_delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.add_delay(url, delay);
        self
    }

    /// Get the number of pulls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Get the URLs pulled, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

impl Clone for MockFeedSource {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            failures: Arc::clone(&self.failures),
            delays: Arc::clone(&self.delays),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn pull(&self, url: &str) -> SourceResult<Vec<FeedEntry>> {
        self.calls.write().unwrap().push(url.to_string());

        let delay = self.delays.read().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failures.read().unwrap().contains(url) {
            return Err(SourceError::Http(
                format!("mock failure for {}", url).into(),
            ));
        }

        Ok(self
            .entries
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_canned_entries() {
        let mock = MockFeedSource::new().with_entries(
            "https://a.example/rss",
            vec![FeedEntry::new("One", "First"), FeedEntry::new("Two", "Second")],
        );

        let entries = mock.pull("https://a.example/rss").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].title.as_deref(), Some("Two"));

        let unknown = mock.pull("https://unknown.example/rss").await.unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_mock_failure_and_call_tracking() {
        let mock = MockFeedSource::new().with_failure("https://down.example/rss");

        assert!(mock.pull("https://down.example/rss").await.is_err());
        mock.pull("https://up.example/rss").await.unwrap();

        assert_eq!(mock.call_count(), 2);
        assert_eq!(
            mock.calls(),
            vec![
                "https://down.example/rss".to_string(),
                "https://up.example/rss".to_string(),
            ]
        );
    }
}
