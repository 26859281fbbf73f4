//! Typed errors for the sentiment pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! recoverable per-source failures apart from fatal run failures.

use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The classification oracle failed as a whole
    #[error("classification oracle unavailable: {0}")]
    OracleUnavailable(#[from] OracleError),

    /// The oracle answered, but broke its output contract
    #[error("malformed oracle output: {reason}")]
    MalformedOracleOutput { reason: String },

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Errors fetching a single source.
///
/// These never escape the fetcher: a failing source is logged and
/// contributes no items.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Response is neither RSS nor Atom
    #[error("malformed feed at {url}: {reason}")]
    Malformed { url: String, reason: String },

    /// Per-source time budget exceeded
    #[error("timeout fetching: {url}")]
    Timeout { url: String },
}

/// Errors from the classification oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The backing model or service could not be reached
    #[error("oracle service error: {0}")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// No model in the configured chain answered
    #[error("no model available (tried: {})", tried.join(", "))]
    NoModelAvailable { tried: Vec<String> },

    /// Configuration error
    #[error("oracle config error: {0}")]
    Config(String),
}

/// Errors writing pipeline artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Result type alias for per-source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type alias for oracle operations.
pub type OracleResult<T> = std::result::Result<T, OracleError>;

/// Result type alias for export operations.
pub type ExportResult<T> = std::result::Result<T, ExportError>;
