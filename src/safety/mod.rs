//! Content-safety filtering for queries and result items.
//!
//! Layered policy: a safe-context (educational/medical) match anywhere in
//! the text allows it outright, otherwise a blocked-term match rejects it.
//! Keyword sets for all languages are applied simultaneously regardless of
//! the text's own language. Filtering is monotonic and idempotent.

pub mod lexicon;

use std::sync::Arc;

use url::Url;

use crate::types::ResultItem;

pub use lexicon::SafetyLexicon;

/// Verdict for a query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryVerdict {
    pub allowed: bool,
    /// Reason tag when not allowed, e.g. `"blocked:en"`.
    pub reason: Option<String>,
}

impl QueryVerdict {
    fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }
}

/// Classifies queries and result items as allowed or blocked.
#[derive(Debug, Clone)]
pub struct SafetyFilter {
    lexicon: Arc<SafetyLexicon>,
}

impl Default for SafetyFilter {
    fn default() -> Self {
        Self::new(Arc::new(SafetyLexicon::default()))
    }
}

impl SafetyFilter {
    pub fn new(lexicon: Arc<SafetyLexicon>) -> Self {
        Self { lexicon }
    }

    /// Check a query text against the layered keyword policy.
    ///
    /// Safe context always wins over a blocked match found in the same
    /// text: "breast cancer screening" is allowed even though "breast"
    /// co-occurs with blocked terms in some lists.
    pub fn check_query(&self, text: &str) -> QueryVerdict {
        let haystack = text.to_lowercase();

        if self.match_in(&haystack, &self.lexicon.safe_context).is_some() {
            return QueryVerdict::allowed();
        }
        if let Some(lang) = self.match_in(&haystack, &self.lexicon.blocked) {
            tracing::debug!(language = %lang, "query rejected by content policy");
            return QueryVerdict {
                allowed: false,
                reason: Some(format!("blocked:{lang}")),
            };
        }
        QueryVerdict::allowed()
    }

    /// Drop disallowed items, preserving the order of the rest.
    ///
    /// An item is dropped when its link host is on the domain blocklist or
    /// its combined title+snippet fails the same safe-context→blocked
    /// precedence check as queries. Idempotent: filtering an already
    /// filtered list changes nothing.
    pub fn filter_results(&self, mut items: Vec<ResultItem>) -> Vec<ResultItem> {
        items.retain(|item| {
            if self.host_blocked(&item.link) {
                tracing::debug!(link = %item.link, "result dropped: blocklisted host");
                return false;
            }
            let text = format!("{} {}", item.title, item.snippet);
            let verdict = self.check_query(&text);
            if !verdict.allowed {
                tracing::debug!(link = %item.link, "result dropped: content policy");
            }
            verdict.allowed
        });
        items
    }

    /// First language whose keyword list matches the haystack, if any.
    fn match_in<'a>(&self, haystack: &str, table: &'a [(String, Vec<String>)]) -> Option<&'a str> {
        for (lang, phrases) in table {
            for phrase in phrases {
                if keyword_matches(haystack, phrase) {
                    return Some(lang);
                }
            }
        }
        None
    }

    /// True when the link's host is the exact blocklisted domain or any
    /// subdomain of it, ignoring a leading `www.`.
    fn host_blocked(&self, link: &str) -> bool {
        let Some(host) = host_of(link) else {
            return false;
        };
        self.lexicon
            .blocked_domains
            .iter()
            .any(|apex| host == *apex || host.ends_with(&format!(".{apex}")))
    }
}

/// Extract the lowercase host of a link, with a leading `www.` stripped.
fn host_of(link: &str) -> Option<String> {
    let parsed = Url::parse(link).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// Match one keyword against a lowercased haystack.
///
/// Latin-only keywords (letters, spaces, hyphens) match on word boundaries
/// to avoid over-blocking substrings inside unrelated words; keywords with
/// any non-Latin character use plain substring containment, since those
/// scripts do not tokenize on ASCII word boundaries.
fn keyword_matches(haystack: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    let keyword = keyword.to_lowercase();
    if is_latin_keyword(&keyword) {
        word_boundary_contains(haystack, &keyword)
    } else {
        haystack.contains(keyword.as_str())
    }
}

fn is_latin_keyword(keyword: &str) -> bool {
    keyword
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '-')
}

/// Substring search that only accepts matches flanked by non-alphanumeric
/// characters (or the ends of the text).
fn word_boundary_contains(haystack: &str, needle: &str) -> bool {
    let mut search_from = 0;
    while let Some(offset) = haystack[search_from..].find(needle) {
        let start = search_from + offset;
        let end = start + needle.len();

        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }

        search_from = start + needle.len().max(1);
        if search_from >= haystack.len() {
            break;
        }
    }
    false
}
