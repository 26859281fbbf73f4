//! Feed source implementations.
//!
//! # Available Sources
//!
//! - `HttpFeedSource` - RSS/Atom over HTTP
//! - `MockFeedSource` - For testing

mod http;
mod mock;

pub use http::HttpFeedSource;
pub use mock::MockFeedSource;

// Re-export from traits for convenience
pub use crate::traits::source::{FeedEntry, FeedSource};
