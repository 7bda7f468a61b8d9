//! Source dispatcher: concurrent multi-source fan-out with per-source
//! fallback.
//!
//! Fans a single logical query out to every configured source, applying
//! per-source query rewriting (site scoping, file-type qualifiers) and the
//! domain-fallback retry policy. A single source's failure never fails the
//! batch; only configuration errors escalate.

pub mod fallback;

use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::{SearchBackend, UpstreamQuery, UpstreamResponse};
use crate::error::{Result, SearchError};
use crate::types::{FileType, LocationSignature, ResultItem, SearchFilters, Source};

/// Everything one fan-out needs, borrowed from the orchestrating request.
#[derive(Debug)]
pub struct DispatchPlan<'a> {
    pub query: &'a str,
    pub sources: &'a [Source],
    pub signature: &'a LocationSignature,
    /// Upstream location string (may carry the state→city hint).
    pub upstream_location: Option<String>,
    pub filters: &'a SearchFilters,
    pub page: u32,
    pub limit: u32,
    /// Overrides every source's own `site_domain`.
    pub site_override: Option<&'a str>,
}

/// Aggregated fan-out result.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    /// Concatenation of all sources' items, in source list order; upstream
    /// order preserved within each source.
    pub items: Vec<ResultItem>,
    /// First corrected-query payload across sources, in source list order.
    pub corrected_query: Option<String>,
    /// First related-searches payload across sources.
    pub related_searches: Vec<String>,
    /// Source id → domain actually served, for sources where the fallback
    /// retry answered instead of the requested domain.
    pub served_domains: HashMap<String, String>,
}

struct SourceResult {
    response: UpstreamResponse,
    served_domain: Option<String>,
}

/// Fans queries out to the upstream backend, one call per source.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn SearchBackend>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// Run the fan-out and join all branches.
    ///
    /// All per-source calls run concurrently; a fallback retry for one
    /// source is sequential after that source's first call but does not
    /// block the others. Per-source upstream failures contribute zero
    /// results and are logged; [`SearchError::Config`] escalates.
    pub async fn dispatch(&self, plan: &DispatchPlan<'_>) -> Result<DispatchOutcome> {
        let futures: Vec<_> = plan
            .sources
            .iter()
            .map(|source| async move { (source, self.query_source(source, plan).await) })
            .collect();

        let branches = futures::future::join_all(futures).await;

        let mut outcome = DispatchOutcome::default();
        for (source, branch) in branches {
            let result = match branch {
                Ok(result) => result,
                Err(err @ SearchError::Config(_)) => return Err(err),
                Err(err) => {
                    tracing::warn!(source = %source.id, error = %err, "source query failed");
                    continue;
                }
            };

            tracing::debug!(
                source = %source.id,
                count = result.response.items.len(),
                "source returned results"
            );

            if let Some(domain) = result.served_domain {
                outcome.served_domains.insert(source.id.clone(), domain);
            }
            if outcome.corrected_query.is_none() {
                outcome.corrected_query = result.response.corrected_query;
            }
            if outcome.related_searches.is_empty() {
                outcome.related_searches = result.response.related_searches;
            }
            outcome.items.extend(
                result
                    .response
                    .items
                    .into_iter()
                    .map(|mut item| {
                        item.source_id = source.id.clone();
                        item
                    }),
            );
        }

        Ok(outcome)
    }

    async fn query_source(&self, source: &Source, plan: &DispatchPlan<'_>) -> Result<SourceResult> {
        let scope = plan
            .site_override
            .map(str::to_string)
            .or_else(|| source.site_domain.clone());
        let text = compose_query(plan.query, scope.as_deref(), plan.filters.file_type);

        let country_code = non_empty(&plan.signature.country_code);
        let primary = UpstreamQuery {
            text,
            kind: source.kind,
            page: plan.page,
            page_size: plan.limit,
            country_code: country_code.clone(),
            location: plan.upstream_location.clone(),
            language: plan.filters.language.clone(),
            time_range: plan.filters.time_range,
        };

        let response = self.backend.search(&primary).await?;
        if !response.items.is_empty() {
            return Ok(SourceResult {
                response,
                served_domain: None,
            });
        }

        // Zero results on a scoped source: one retry against the brand's
        // global domain, geo-restriction dropped.
        let Some(domain) = scope.as_deref() else {
            return Ok(SourceResult {
                response,
                served_domain: None,
            });
        };
        let Some(global) = fallback::global_counterpart(domain) else {
            return Ok(SourceResult {
                response,
                served_domain: None,
            });
        };

        let language = fallback::fallback_language(
            plan.filters.language.as_deref(),
            country_code.as_deref(),
            plan.query,
        );
        let retry = UpstreamQuery {
            text: compose_query(plan.query, Some(&global), plan.filters.file_type),
            kind: source.kind,
            page: plan.page,
            page_size: plan.limit,
            country_code: None,
            location: None,
            language: Some(language),
            time_range: plan.filters.time_range,
        };

        match self.backend.search(&retry).await {
            Ok(fallback_response) if !fallback_response.items.is_empty() => {
                tracing::info!(
                    source = %source.id,
                    requested = domain,
                    served = %global,
                    "zero-result source answered by global fallback domain"
                );
                Ok(SourceResult {
                    response: fallback_response,
                    served_domain: Some(global),
                })
            }
            Ok(_) => Ok(SourceResult {
                response,
                served_domain: None,
            }),
            Err(err) => {
                tracing::warn!(source = %source.id, error = %err, "fallback retry failed");
                Ok(SourceResult {
                    response,
                    served_domain: None,
                })
            }
        }
    }
}

/// Build the effective search text for one source: base query plus
/// optional `site:` and `filetype:` qualifiers.
fn compose_query(query: &str, site: Option<&str>, file_type: FileType) -> String {
    let mut text = query.trim().to_string();
    if let Some(domain) = site.filter(|d| !d.is_empty()) {
        text.push_str(&format!(" site:{domain}"));
    }
    if let Some(qualifier) = file_type.qualifier() {
        text.push_str(&format!(" {qualifier}"));
    }
    text
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
