//! The upstream search-provider boundary.
//!
//! A [`SearchBackend`] answers one vertical query (web, image, video,
//! place or news) at a time. The dispatcher composes backends into a
//! multi-source fan-out; the backend itself knows nothing about sources,
//! caching or content policy. Safe search is not a parameter: every
//! implementation must force it on, independent of the content-safety
//! filter.

pub mod serp;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ResultItem, ResultKind, TimeRange};

/// One upstream call's parameters.
#[derive(Debug, Clone)]
pub struct UpstreamQuery {
    /// Fully-qualified search text (site/filetype qualifiers already
    /// appended).
    pub text: String,
    pub kind: ResultKind,
    /// 1-based page.
    pub page: u32,
    pub page_size: u32,
    /// Lowercase ISO-3166 alpha-2 code, if the search is geo-biased.
    pub country_code: Option<String>,
    /// Upstream location string, e.g. `"Austin,Texas,United States"`.
    pub location: Option<String>,
    /// ISO-639-1 interface language.
    pub language: Option<String>,
    pub time_range: TimeRange,
}

impl UpstreamQuery {
    pub fn new(text: impl Into<String>, kind: ResultKind) -> Self {
        Self {
            text: text.into(),
            kind,
            page: 1,
            page_size: 10,
            country_code: None,
            location: None,
            language: None,
            time_range: TimeRange::Any,
        }
    }
}

/// One upstream call's payload, mapped into crate types.
#[derive(Debug, Clone, Default)]
pub struct UpstreamResponse {
    pub items: Vec<ResultItem>,
    pub corrected_query: Option<String>,
    pub related_searches: Vec<String>,
}

/// A pluggable upstream search provider.
///
/// Implementations must be `Send + Sync`; the dispatcher queries them
/// concurrently. Safe search must always be requested upstream.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Perform one vertical search and return mapped results.
    ///
    /// # Errors
    ///
    /// [`crate::SearchError::Config`] for credential problems (fatal for
    /// the whole orchestration), [`crate::SearchError::Http`] /
    /// [`crate::SearchError::Upstream`] for transport and provider errors
    /// (absorbed per source by the dispatcher).
    async fn search(&self, query: &UpstreamQuery) -> Result<UpstreamResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::types::ResultDetail;

    struct StaticBackend {
        items: Vec<ResultItem>,
    }

    #[async_trait]
    impl SearchBackend for StaticBackend {
        async fn search(&self, _query: &UpstreamQuery) -> Result<UpstreamResponse> {
            if self.items.is_empty() {
                return Err(SearchError::Upstream("nothing configured".into()));
            }
            Ok(UpstreamResponse {
                items: self.items.clone(),
                corrected_query: None,
                related_searches: vec![],
            })
        }
    }

    #[test]
    fn backend_is_object_safe() {
        fn assert_dyn(_: &dyn SearchBackend) {}
        let backend = StaticBackend { items: vec![] };
        assert_dyn(&backend);
    }

    #[tokio::test]
    async fn mock_backend_round_trip() {
        let backend = StaticBackend {
            items: vec![ResultItem {
                title: "Example".into(),
                link: "https://example.com".into(),
                snippet: "hello".into(),
                source_id: String::new(),
                favicon: None,
                position: Some(1),
                detail: ResultDetail::Web { date: None },
            }],
        };
        let response = backend
            .search(&UpstreamQuery::new("test", ResultKind::Web))
            .await
            .expect("should succeed");
        assert_eq!(response.items.len(), 1);
    }

    #[tokio::test]
    async fn mock_backend_propagates_errors() {
        let backend = StaticBackend { items: vec![] };
        let err = backend
            .search(&UpstreamQuery::new("test", ResultKind::Web))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nothing configured"));
    }

    #[test]
    fn upstream_query_defaults() {
        let query = UpstreamQuery::new("rust", ResultKind::News);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.time_range, TimeRange::Any);
        assert!(query.country_code.is_none());
    }
}
