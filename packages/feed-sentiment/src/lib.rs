//! News Feed Sentiment Library
//!
//! Pulls items from syndication feeds, cleans and deduplicates them, asks a
//! classification oracle for a sentiment per item and reduces the answers to
//! per-label statistics and top-K rankings.
//!
//! # Usage
//!
//! ```rust,ignore
//! use feed_sentiment::{MockFeedSource, Pipeline, PipelineConfig, RunOutcome};
//! use feed_sentiment::testing::MockOracle;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = PipelineConfig::new().with_feeds(["https://example.com/rss"]);
//! let pipeline = Pipeline::new(config, MockFeedSource::new(), MockOracle::new());
//!
//! if let RunOutcome::Analyzed(report) = pipeline.run(&CancellationToken::new()).await? {
//!     println!("{} items, mostly {}", report.summary.total, report.summary.dominant());
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator seams (FeedSource, Oracle)
//! - [`types`] - Items, labels, summaries, configuration
//! - [`pipeline`] - Fetch, normalize, classify, canonicalize, aggregate
//! - [`sources`] - Feed source implementations (HttpFeedSource, etc.)
//! - [`oracle`] - Oracle implementations (HuggingFaceOracle)
//! - [`export`] - CSV/JSON report export
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod export;
pub mod oracle;
pub mod pipeline;
pub mod security;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ExportError, OracleError, PipelineError, SourceError};
pub use traits::{
    oracle::Oracle,
    source::{FeedEntry, FeedSource},
};
pub use types::{
    config::{InputMode, PipelineConfig, SourceSpec},
    item::{ClassifiedItem, CleanItem, Item},
    label::{Label, RawResult},
    report::{Report, RunOutcome, TextOrigin},
    summary::{RankedList, Summary},
};

// Re-export pipeline components
pub use pipeline::{
    aggregate, canonicalize, classify, clean_text, fetch, normalize, rank, rank_all,
    FetchOptions, Pipeline,
};

pub use export::{write_report, ExportedFiles};
pub use oracle::HuggingFaceOracle;
pub use security::{InferenceCredentials, SecretString};
pub use sources::{HttpFeedSource, MockFeedSource};
pub use testing::MockOracle;
