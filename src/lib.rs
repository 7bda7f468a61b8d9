//! # searchmux
//!
//! Multi-source web search orchestration and result aggregation.
//!
//! searchmux fans a single logical query out to one or more upstream
//! search backends (web, image, video, place and news verticals), absorbs
//! partial failures, and folds everything into a single ranked, filtered,
//! paginated and cacheable response.
//!
//! ## Design
//!
//! - Concurrent per-source fan-out with a domain-fallback retry for
//!   zero-result site-scoped sources
//! - Multilingual content-safety filtering for queries and results, with
//!   safe-context (educational/medical) precedence over blocked terms
//! - In-memory TTL cache keyed by the full request signature
//! - Location resolution from manual or IP-detected inputs
//! - Dynamic domain-tab extraction from aggregated results, intent-aware
//! - Deterministic sorting and synthetic pagination metadata
//!
//! ## Security
//!
//! - Safe search is forced on for every upstream call, independent of the
//!   content-safety filter
//! - Search queries are logged only at trace level
//! - Policy rejections are ordinary responses, indistinguishable from
//!   "no results found"
//!
//! ## Examples
//!
//! ```no_run
//! # async fn example() -> searchmux::Result<()> {
//! use std::sync::Arc;
//! use searchmux::{SearchConfig, SearchRequest, SearchService, SerpClient};
//!
//! let config = SearchConfig::default();
//! let backend = Arc::new(SerpClient::new("api-key", config.timeout_seconds)?);
//! let service = SearchService::new(config, backend)?;
//!
//! let response = service.search(SearchRequest::new("rust programming")).await?;
//! for result in &response.results {
//!     println!("{}: {}", result.title, result.link);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod cache;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod geo;
pub mod http;
pub mod intent;
pub mod location;
pub mod orchestrator;
pub mod rank;
pub mod safety;
pub mod tabs;
pub mod types;

pub use backend::serp::SerpClient;
pub use backend::{SearchBackend, UpstreamQuery, UpstreamResponse};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use intent::{IntentClassifier, SourceCatalog, Summarizer};
pub use orchestrator::SearchService;
pub use safety::SafetyLexicon;
pub use types::{
    Intent, ResultItem, ResultKind, SearchFilters, SearchRequest, SearchResponse, SortBy, Source,
    SourceSelector,
};
