//! Engine configuration with sensible defaults.
//!
//! [`SearchConfig`] controls paging, timeouts, caching, and the tunable
//! behaviours (state→city location hinting, the synthetic pagination
//! bound).

use crate::error::SearchError;

/// Configuration for the search orchestration engine.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Per-source upstream page size. Clamped to `max_limit`.
    pub default_limit: u32,
    /// Upper bound accepted for a request's `limit`.
    pub max_limit: u32,
    /// Per-request upstream HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// How long to cache assembled responses, in seconds. 0 disables caching.
    pub cache_ttl_seconds: u64,
    /// Synthetic pagination bound, in pages. The upstream exposes no
    /// reliable total, so `total_results` is reported as
    /// `synthetic_page_span * limit` purely for paging affordances.
    pub synthetic_page_span: u32,
    /// When a resolved location has a state but no city, hint the upstream
    /// `location` parameter with the state's major city. This narrows a
    /// state-level search to one city; every application is logged.
    pub state_city_hint: bool,
    /// Maximum number of domain tabs extracted per response.
    pub max_tabs: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 50,
            timeout_seconds: 10,
            cache_ttl_seconds: 600,
            synthetic_page_span: 100,
            state_city_hint: true,
            max_tabs: 10,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `default_limit` must be in `1..=max_limit`
    /// - `timeout_seconds` must be greater than 0
    /// - `synthetic_page_span` must be greater than 0
    /// - `max_tabs` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(SearchError::Config(format!(
                "default_limit must be in 1..={}",
                self.max_limit
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.synthetic_page_span == 0 {
            return Err(SearchError::Config(
                "synthetic_page_span must be greater than 0".into(),
            ));
        }
        if self.max_tabs == 0 {
            return Err(SearchError::Config("max_tabs must be greater than 0".into()));
        }
        Ok(())
    }

    /// Clamp a caller-supplied limit into the accepted range, substituting
    /// the default when the caller passed 0.
    pub fn effective_limit(&self, requested: u32) -> u32 {
        if requested == 0 {
            self.default_limit
        } else {
            requested.min(self.max_limit)
        }
    }
}
