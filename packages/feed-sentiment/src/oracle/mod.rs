//! Oracle implementations.

mod huggingface;

pub use huggingface::HuggingFaceOracle;

// Re-export from traits for convenience
pub use crate::traits::oracle::Oracle;
