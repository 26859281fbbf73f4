//! The sentiment pipeline.
//!
//! Stages, in data-flow order:
//! - Fetch (concurrent pulls, merged in source order)
//! - Normalize (strip markup, collapse whitespace, dedup)
//! - Classify (one oracle call, contract check)
//! - Canonicalize (raw model labels to the three-way taxonomy)
//! - Aggregate and rank

pub mod aggregate;
pub mod canonicalize;
pub mod classify;
pub mod fetch;
pub mod normalize;
pub mod run;

pub use aggregate::{aggregate, rank, rank_all, DEFAULT_TOP_K};
pub use canonicalize::{canonicalize, POSITIVE_THRESHOLD};
pub use classify::classify;
pub use fetch::{fetch, FetchOptions};
pub use normalize::{clean_text, normalize};
pub use run::Pipeline;
