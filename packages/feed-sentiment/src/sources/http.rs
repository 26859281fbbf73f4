//! HTTP feed source.
//!
//! Pulls a syndication document over HTTP and parses it as RSS
//! (0.9x, 1.0/RDF, 2.0) or, failing that, Atom.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{PipelineError, Result, SourceError, SourceResult};
use crate::traits::source::{FeedEntry, FeedSource};

/// HTTP feed source backed by `reqwest`.
///
/// # Example
///
/// ```rust,ignore
/// use feed_sentiment::sources::HttpFeedSource;
///
/// let source = HttpFeedSource::with_timeout(Duration::from_secs(10))?;
/// let entries = source.pull("https://www.tagesschau.de/xml/rss2").await?;
/// ```
pub struct HttpFeedSource {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpFeedSource {
    /// Create a new feed source with a 30 second request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new feed source with a custom request timeout.
    ///
    /// Fails with [`PipelineError::Config`] if the HTTP client can't be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| client_build_error(&e))?;

        Ok(Self {
            client,
            user_agent: "FeedSentiment/1.0".to_string(),
        })
    }
}

fn client_build_error(e: &dyn std::error::Error) -> PipelineError {
    PipelineError::Config(format!("failed to build HTTP client: {}", e))
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn pull(&self, url: &str) -> SourceResult<Vec<FeedEntry>> {
        let parsed = Url::parse(url).map_err(|_| SourceError::InvalidUrl {
            url: url.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SourceError::InvalidUrl {
                url: url.to_string(),
            });
        }

        debug!(url = %url, "Feed fetch starting");
        let response = self
            .client
            .get(parsed)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    SourceError::Http(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::Http(Box::new(e)))?;

        let entries = parse_feed(url, &body)?;
        debug!(url = %url, entries = entries.len(), bytes = body.len(), "Feed parsed");
        Ok(entries)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Parse a syndication document into entries, in document order.
pub(crate) fn parse_feed(url: &str, body: &[u8]) -> SourceResult<Vec<FeedEntry>> {
    let rss_error = match rss::Channel::read_from(body) {
        Ok(channel) => return Ok(rss_entries(&channel)),
        Err(e) => e,
    };

    match atom_syndication::Feed::read_from(body) {
        Ok(feed) => Ok(atom_entries(&feed)),
        Err(atom_error) => {
            warn!(url = %url, rss_error = %rss_error, atom_error = %atom_error, "Unrecognized feed format");
            Err(SourceError::Malformed {
                url: url.to_string(),
                reason: format!("not RSS ({}) nor Atom ({})", rss_error, atom_error),
            })
        }
    }
}

fn rss_entries(channel: &rss::Channel) -> Vec<FeedEntry> {
    channel
        .items()
        .iter()
        .map(|item| FeedEntry {
            title: item.title().map(str::to_string),
            summary: item
                .description()
                .or_else(|| item.content())
                .map(str::to_string),
        })
        .collect()
}

fn atom_entries(feed: &atom_syndication::Feed) -> Vec<FeedEntry> {
    feed.entries()
        .iter()
        .map(|entry| {
            let title = entry.title().as_str();
            let summary = entry
                .summary()
                .map(|s| s.as_str())
                .or_else(|| entry.content().and_then(|c| c.value()));
            FeedEntry {
                title: (!title.is_empty()).then(|| title.to_string()),
                summary: summary.map(str::to_string),
            }
        })
        .collect()
}
