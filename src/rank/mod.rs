//! Deterministic ordering and synthetic page-window computation.
//!
//! All sorts are stable: items that compare equal (or lack the sort field
//! entirely) keep their original relative order, so the final aggregated
//! list is deterministic given identical upstream responses.

pub mod parse;

use chrono::{DateTime, Utc};

use crate::types::{Pagination, ResultItem, SortBy};

/// Sort aggregated results by the requested criterion. Stable.
///
/// - `Relevance`: ascending by upstream position; items without a position
///   sort after those with one.
/// - `Recent`: newest first by parsed date; undated items sort after all
///   dated ones, keeping their original relative order.
/// - `MostViewed` / `MostEngaged`: descending by the parsed numeric field;
///   ties keep original order.
///
/// `now` anchors relative-date parsing so results are reproducible in tests.
pub fn sort_results(mut items: Vec<ResultItem>, by: SortBy, now: DateTime<Utc>) -> Vec<ResultItem> {
    match by {
        SortBy::Relevance => {
            items.sort_by_key(|item| (item.position.is_none(), item.position));
        }
        SortBy::Recent => {
            items.sort_by_key(|item| {
                let date = item
                    .date_str()
                    .and_then(|raw| parse::parse_date(raw, now));
                (date.is_none(), std::cmp::Reverse(date))
            });
        }
        SortBy::MostViewed => {
            items.sort_by_key(|item| std::cmp::Reverse(item.view_count()));
        }
        SortBy::MostEngaged => {
            items.sort_by_key(|item| std::cmp::Reverse(item.engagement()));
        }
    }
    items
}

/// Synthesize pagination metadata from the current page and the configured
/// page span.
///
/// The upstream does not expose a reliable total-result count, so
/// `total_pages` is the fixed `span` and `total_results` is `span * limit`.
/// Both are paging affordances, not counts.
pub fn paginate(current_page: u32, limit: u32, span: u32) -> Pagination {
    let current = current_page.max(1);
    Pagination {
        current_page: current,
        total_pages: span,
        total_results: u64::from(span) * u64::from(limit),
        has_next: current < span,
        has_previous: current > 1,
    }
}
