//! Request orchestration: one pipeline per incoming search request.
//!
//! Pipeline: resolve location → content-policy check → intent → source
//! selection → cache lookup → fan-out dispatch → sort → result filtering →
//! tab extraction → cache write → pagination → response assembly. A
//! policy-rejected query short-circuits to an ordinary `blocked` response
//! before the dispatcher runs.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::backend::SearchBackend;
use crate::cache::{CacheKey, CachedPayload, ResponseCache};
use crate::config::SearchConfig;
use crate::dispatch::{DispatchPlan, Dispatcher};
use crate::error::{Result, SearchError};
use crate::geo::GeoProviderChain;
use crate::intent::{basic_summary, IntentClassifier, KeywordClassifier, SourceCatalog, Summarizer};
use crate::location::LocationResolver;
use crate::rank;
use crate::safety::{SafetyFilter, SafetyLexicon};
use crate::tabs;
use crate::types::{
    Intent, LocationMode, LocationSignature, Pagination, SearchRequest, SearchResponse, Source,
    SourceSelector,
};

/// Neutral message for empty result sets. Policy rejections reuse it so a
/// blocked query is indistinguishable from "nothing found".
const NO_RESULTS_MESSAGE: &str = "No results found.";

/// The search orchestration engine.
///
/// Holds the backend, policy data and collaborators; one instance serves
/// many concurrent requests.
pub struct SearchService {
    config: SearchConfig,
    resolver: LocationResolver,
    filter: SafetyFilter,
    cache: ResponseCache,
    dispatcher: Dispatcher,
    catalog: SourceCatalog,
    classifier: Arc<dyn IntentClassifier>,
    summarizer: Option<Arc<dyn Summarizer>>,
    geo: GeoProviderChain,
}

impl SearchService {
    /// Create a service over a backend with default collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an invalid configuration.
    pub fn new(config: SearchConfig, backend: Arc<dyn SearchBackend>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            resolver: LocationResolver::new(config.state_city_hint),
            filter: SafetyFilter::default(),
            cache: ResponseCache::new(),
            dispatcher: Dispatcher::new(backend),
            catalog: SourceCatalog::default(),
            classifier: Arc::new(KeywordClassifier),
            summarizer: None,
            geo: GeoProviderChain::default(),
            config,
        })
    }

    /// Replace the intent classifier (e.g. the external LLM one).
    pub fn with_classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Wire in an external summarizer.
    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Wire in a geolocation provider chain.
    pub fn with_geo(mut self, geo: GeoProviderChain) -> Self {
        self.geo = geo;
        self
    }

    /// Replace the per-intent source catalog.
    pub fn with_catalog(mut self, catalog: SourceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the content-safety lexicon.
    pub fn with_lexicon(mut self, lexicon: Arc<SafetyLexicon>) -> Self {
        self.filter = SafetyFilter::new(lexicon);
        self
    }

    /// Run one search request through the full pipeline.
    ///
    /// # Errors
    ///
    /// Only [`SearchError::InvalidRequest`] (empty query) and
    /// [`SearchError::Config`] (upstream credentials) escalate; everything
    /// else degrades to a normal response.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
        let query = request.query.trim().to_string();
        if query.is_empty() {
            return Err(SearchError::InvalidRequest("query must not be empty".into()));
        }
        let page = request.page.max(1);
        let limit = self.config.effective_limit(request.limit);
        tracing::trace!(query = %query, page, limit, "search request");

        // Location resolution, with IP detection when requested.
        let detected = match (&request.location.mode, &request.location.client_ip) {
            (LocationMode::Normal, Some(ip)) => self.geo.detect_by_ip(ip).await,
            _ => None,
        };
        let signature =
            self.resolver
                .resolve(&request.location.manual, detected.as_ref(), request.location.mode);

        // Content policy: a rejected query short-circuits before dispatch.
        let verdict = self.filter.check_query(&query);
        if !verdict.allowed {
            tracing::debug!(reason = ?verdict.reason, "query blocked by content policy");
            return Ok(self.blocked_response(page, &signature));
        }

        // Intent: override, else classifier (absorbed to General), else General.
        let intent = match request.intent_override {
            Some(intent) => intent,
            None if request.auto_detect_intent => {
                self.classifier.classify(&query).await.unwrap_or_default()
            }
            None => Intent::General,
        };

        let sources = self.select_sources(&request.source_selector, intent);
        let cache_key = CacheKey::for_request(&request, &signature, limit);

        let payload = match self.cache.get(&cache_key).await {
            Some(cached) => {
                tracing::debug!("serving cached payload");
                cached
            }
            None => {
                let payload = self
                    .fetch_payload(&query, &request, &sources, &signature, intent, page, limit)
                    .await?;
                self.cache
                    .set(
                        cache_key,
                        payload.clone(),
                        Duration::from_secs(self.config.cache_ttl_seconds),
                    )
                    .await;
                payload
            }
        };

        // Summary: page 1 of an aggregate request only, on caller demand.
        let summary = if request.summarize
            && page == 1
            && request.source_selector == SourceSelector::All
        {
            Some(self.summarize(&query, &payload, intent).await)
        } else {
            None
        };

        let message = if payload.results.is_empty() {
            Some(NO_RESULTS_MESSAGE.to_string())
        } else {
            None
        };

        Ok(SearchResponse {
            results: payload.results,
            intent,
            summary,
            sources: payload.sources,
            intent_sources: self.catalog.sources_for(intent).to_vec(),
            tabs: payload.tabs,
            pagination: rank::paginate(page, limit, self.config.synthetic_page_span),
            location: if signature.is_empty() {
                None
            } else {
                Some(signature)
            },
            corrected_query: payload.corrected_query,
            related_searches: payload.related_searches,
            blocked: false,
            message,
        })
    }

    /// Fan out, aggregate, sort, filter and derive tabs: the cacheable part
    /// of the pipeline.
    #[allow(clippy::too_many_arguments)]
    async fn fetch_payload(
        &self,
        query: &str,
        request: &SearchRequest,
        sources: &[Source],
        signature: &LocationSignature,
        intent: Intent,
        page: u32,
        limit: u32,
    ) -> Result<CachedPayload> {
        let plan = DispatchPlan {
            query,
            sources,
            signature,
            upstream_location: self.resolver.upstream_location(signature),
            filters: &request.filters,
            page,
            limit,
            site_override: request.site_override.as_deref(),
        };
        let outcome = self.dispatcher.dispatch(&plan).await?;

        let sorted = rank::sort_results(outcome.items, request.sort, Utc::now());
        let results = self.filter.filter_results(sorted);

        // A site-scoped request already is a tab; only aggregate requests
        // derive new ones.
        let tabs = if request.source_selector == SourceSelector::All {
            tabs::extract_domains(&results, intent, self.config.max_tabs)
        } else {
            Vec::new()
        };

        // Reflect fallback-domain substitutions in the reported sources.
        let sources = sources
            .iter()
            .cloned()
            .map(|mut source| {
                if let Some(served) = outcome.served_domains.get(&source.id) {
                    source.site_domain = Some(served.clone());
                }
                source
            })
            .collect();

        Ok(CachedPayload {
            results,
            sources,
            tabs,
            corrected_query: outcome.corrected_query,
            related_searches: outcome.related_searches,
        })
    }

    /// Resolve the selector to the concrete source list for this request.
    fn select_sources(&self, selector: &SourceSelector, intent: Intent) -> Vec<Source> {
        match selector {
            SourceSelector::All => {
                let mut sources = vec![Source::native()];
                sources.extend(self.catalog.sources_for(intent).iter().cloned());
                sources
            }
            SourceSelector::One(id) if id == "web" => vec![Source::native()],
            SourceSelector::One(id) => match self.catalog.find(id) {
                Some(source) => vec![source.clone()],
                // Unknown ids are dynamic domain sources from earlier tabs.
                None => vec![Source::for_domain(id)],
            },
        }
    }

    async fn summarize(&self, query: &str, payload: &CachedPayload, intent: Intent) -> String {
        match &self.summarizer {
            Some(summarizer) => match summarizer.summarize(query, &payload.results, intent).await {
                Ok(summary) => summary,
                Err(err) => {
                    tracing::warn!(error = %err, "summarizer failed; using basic summary");
                    basic_summary(query, &payload.results)
                }
            },
            None => basic_summary(query, &payload.results),
        }
    }

    /// An ordinary empty response carrying `blocked = true`. Never an error
    /// status; the message matches the plain no-results case.
    fn blocked_response(&self, page: u32, signature: &LocationSignature) -> SearchResponse {
        SearchResponse {
            results: Vec::new(),
            intent: Intent::General,
            summary: None,
            sources: Vec::new(),
            intent_sources: Vec::new(),
            tabs: Vec::new(),
            pagination: Pagination {
                current_page: page,
                total_pages: 0,
                total_results: 0,
                has_next: false,
                has_previous: false,
            },
            location: if signature.is_empty() {
                None
            } else {
                Some(signature.clone())
            },
            corrected_query: None,
            related_searches: Vec::new(),
            blocked: true,
            message: Some(NO_RESULTS_MESSAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{UpstreamQuery, UpstreamResponse};
    use crate::types::{ResultDetail, ResultItem};
    use async_trait::async_trait;

    struct EchoBackend;

    #[async_trait]
    impl SearchBackend for EchoBackend {
        async fn search(&self, query: &UpstreamQuery) -> Result<UpstreamResponse> {
            Ok(UpstreamResponse {
                items: vec![ResultItem {
                    title: format!("Result for {}", query.text),
                    link: "https://example.com/page".into(),
                    snippet: "snippet".into(),
                    source_id: String::new(),
                    favicon: None,
                    position: Some(1),
                    detail: ResultDetail::Web { date: None },
                }],
                corrected_query: None,
                related_searches: vec![],
            })
        }
    }

    fn service() -> SearchService {
        SearchService::new(SearchConfig::default(), Arc::new(EchoBackend)).expect("valid config")
    }

    #[tokio::test]
    async fn empty_query_is_invalid() {
        let err = service().search(SearchRequest::new("   ")).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn blocked_query_short_circuits() {
        let response = service()
            .search(SearchRequest::new("free porn videos"))
            .await
            .expect("blocked is not an error");
        assert!(response.blocked);
        assert!(response.results.is_empty());
        assert_eq!(response.message.as_deref(), Some("No results found."));
        assert_eq!(response.pagination.total_results, 0);
    }

    #[tokio::test]
    async fn plain_search_returns_results() {
        let response = service()
            .search(SearchRequest::new("rust language"))
            .await
            .expect("search succeeds");
        assert!(!response.blocked);
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].source_id, "web");
        assert!(response.message.is_none());
        assert!(response.pagination.has_next);
    }

    #[tokio::test]
    async fn intent_override_selects_catalog_sources() {
        let mut request = SearchRequest::new("running shoes");
        request.intent_override = Some(Intent::Shopping);
        let response = service().search(request).await.expect("search succeeds");
        assert_eq!(response.intent, Intent::Shopping);
        // native + 3 shopping sources
        assert_eq!(response.sources.len(), 4);
        assert_eq!(response.intent_sources.len(), 3);
        // One item per source.
        assert_eq!(response.results.len(), 4);
    }

    #[tokio::test]
    async fn single_source_selector_queries_one_source() {
        let mut request = SearchRequest::new("deals");
        request.source_selector = SourceSelector::One("ebay".into());
        let response = service().search(request).await.expect("search succeeds");
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].id, "ebay");
        assert!(response.tabs.is_empty());
    }

    #[tokio::test]
    async fn unknown_selector_id_becomes_dynamic_source() {
        let mut request = SearchRequest::new("docs");
        request.source_selector = SourceSelector::One("docs.rs".into());
        let response = service().search(request).await.expect("search succeeds");
        assert_eq!(response.sources[0].site_domain.as_deref(), Some("docs.rs"));
    }

    #[tokio::test]
    async fn summary_only_on_first_aggregate_page() {
        let mut request = SearchRequest::new("what is rust");
        request.summarize = true;
        let response = service().search(request.clone()).await.expect("ok");
        assert!(response.summary.is_some());

        request.page = 2;
        let response = service().search(request.clone()).await.expect("ok");
        assert!(response.summary.is_none());

        request.page = 1;
        request.source_selector = SourceSelector::One("web".into());
        let response = service().search(request).await.expect("ok");
        assert!(response.summary.is_none());
    }

    #[tokio::test]
    async fn global_mode_yields_no_location() {
        let mut request = SearchRequest::new("weather");
        request.location.mode = LocationMode::Global;
        let response = service().search(request).await.expect("ok");
        assert!(response.location.is_none());
    }
}
