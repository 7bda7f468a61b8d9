//! Error types for the searchmux crate.
//!
//! Only configuration problems are fatal for a whole search: per-source
//! upstream failures are absorbed by the dispatcher and parsing problems
//! degrade to missing values. All errors use stable string messages; no
//! API keys or credentials appear in error text.

/// Errors that can occur during search orchestration.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid engine configuration or missing upstream credentials.
    /// The only variant that fails a whole orchestration.
    #[error("config error: {0}")]
    Config(String),

    /// A malformed incoming request (empty query, out-of-range paging).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The upstream search provider returned an error response.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// An HTTP request to the upstream provider failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse an upstream response payload.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience type alias for searchmux results.
pub type Result<T> = std::result::Result<T, SearchError>;
