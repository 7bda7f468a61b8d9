//! Dynamic domain-tab extraction from aggregated results.
//!
//! Derives a ranked set of domain tiles (topic-specific sub-tabs) from the
//! hosts observed in a result list. Intent-aware: a non-general intent
//! keeps only domains whose host/title/snippet match that intent's keyword
//! pattern and dodge its exclusion pattern.

use std::collections::HashMap;

use url::Url;

use crate::types::{display_name_for_domain, DomainTile, Intent, ResultItem};

/// Major platforms that already have dedicated tabs; never extracted.
const EXCLUDED_HOSTS: &[&str] = &[
    "google.com",
    "bing.com",
    "duckduckgo.com",
    "youtube.com",
    "facebook.com",
    "twitter.com",
    "x.com",
    "instagram.com",
    "tiktok.com",
    "linkedin.com",
    "pinterest.com",
    "reddit.com",
];

struct IntentPattern {
    keywords: &'static [&'static str],
    exclusions: &'static [&'static str],
}

/// Keyword/exclusion patterns per non-general intent, matched against the
/// lowercased host + title + snippet.
fn pattern_for(intent: Intent) -> Option<IntentPattern> {
    let pattern = match intent {
        Intent::Shopping => IntentPattern {
            keywords: &[
                "shop", "store", "buy", "price", "deal", "cart", "sale", "product", "amazon",
                "ebay", "retail",
            ],
            exclusions: &["wikipedia", "youtube", "facebook", "news", "blog"],
        },
        Intent::News => IntentPattern {
            keywords: &[
                "news", "breaking", "report", "times", "post", "herald", "daily", "press",
                "journal", "tribune",
            ],
            exclusions: &["shop", "store", "youtube"],
        },
        Intent::Learning => IntentPattern {
            keywords: &[
                "learn", "course", "tutorial", "edu", "academy", "university", "guide", "docs",
                "wiki", "lesson",
            ],
            exclusions: &["shop", "store", "buy"],
        },
        Intent::Videos => IntentPattern {
            keywords: &["video", "watch", "stream", "clip", "episode", "tv"],
            exclusions: &["wikipedia", "shop"],
        },
        Intent::Travel => IntentPattern {
            keywords: &[
                "travel", "hotel", "flight", "booking", "trip", "tour", "airline", "resort",
                "vacation",
            ],
            exclusions: &["wikipedia", "youtube"],
        },
        Intent::Health => IntentPattern {
            keywords: &[
                "health", "medical", "clinic", "doctor", "medicine", "wellness", "symptom",
                "hospital",
            ],
            exclusions: &["shop", "store"],
        },
        Intent::Tech => IntentPattern {
            keywords: &[
                "tech", "software", "developer", "code", "github", "programming", "gadget", "ai",
                "cloud",
            ],
            exclusions: &["shop", "fashion"],
        },
        Intent::Finance => IntentPattern {
            keywords: &[
                "finance", "stock", "invest", "market", "bank", "trading", "crypto", "economy",
                "fund",
            ],
            exclusions: &["shop", "youtube"],
        },
        Intent::Entertainment => IntentPattern {
            keywords: &[
                "movie", "music", "celebrity", "entertainment", "show", "game", "film", "series",
            ],
            exclusions: &["shop", "news"],
        },
        Intent::Food => IntentPattern {
            keywords: &[
                "recipe", "food", "restaurant", "cook", "kitchen", "menu", "dish", "cuisine",
            ],
            exclusions: &["shop", "youtube"],
        },
        Intent::General => return None,
    };
    Some(pattern)
}

/// Extract ranked domain tiles from aggregated results.
///
/// Most-frequent-domain-first, ties broken by first-seen order, capped at
/// `cap`. The platform exclusion set is always skipped, even when it
/// dominates by count.
pub fn extract_domains(results: &[ResultItem], intent: Intent, cap: usize) -> Vec<DomainTile> {
    let pattern = pattern_for(intent);
    // domain → (count, first-seen index)
    let mut observed: HashMap<String, (usize, usize)> = HashMap::new();
    let mut order = 0usize;

    for item in results {
        let Some(host) = registrable_host(&item.link) else {
            continue;
        };
        if is_excluded(&host) {
            continue;
        }
        if let Some(pattern) = &pattern {
            let haystack = format!("{} {} {}", host, item.title, item.snippet).to_lowercase();
            let keyword_hit = pattern.keywords.iter().any(|k| haystack.contains(k));
            let exclusion_hit = pattern.exclusions.iter().any(|k| haystack.contains(k));
            if !keyword_hit || exclusion_hit {
                continue;
            }
        }
        let entry = observed.entry(host).or_insert_with(|| {
            let slot = (0, order);
            order += 1;
            slot
        });
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = observed.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked.truncate(cap);

    ranked
        .into_iter()
        .map(|(domain, (count, _))| DomainTile {
            display_name: display_name_for_domain(&domain),
            domain,
            count,
        })
        .collect()
}

/// Host of a link with a leading `www.` stripped, lowercased.
fn registrable_host(link: &str) -> Option<String> {
    let parsed = Url::parse(link).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

fn is_excluded(host: &str) -> bool {
    EXCLUDED_HOSTS
        .iter()
        .any(|excluded| host == *excluded || host.ends_with(&format!(".{excluded}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResultDetail;

    fn item(link: &str, title: &str, snippet: &str) -> ResultItem {
        ResultItem {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
            source_id: "web".into(),
            favicon: None,
            position: None,
            detail: ResultDetail::Web { date: None },
        }
    }

    fn plain(link: &str) -> ResultItem {
        item(link, "title", "snippet")
    }

    #[test]
    fn counts_and_ranks_by_frequency() {
        let results = vec![
            plain("https://a.com/1"),
            plain("https://b.com/1"),
            plain("https://b.com/2"),
            plain("https://c.com/1"),
            plain("https://b.com/3"),
            plain("https://c.com/2"),
        ];
        let tiles = extract_domains(&results, Intent::General, 10);
        assert_eq!(tiles.len(), 3);
        assert_eq!(tiles[0].domain, "b.com");
        assert_eq!(tiles[0].count, 3);
        assert_eq!(tiles[1].domain, "c.com");
        assert_eq!(tiles[2].domain, "a.com");
    }

    #[test]
    fn ties_break_by_first_seen_order() {
        let results = vec![
            plain("https://late.com/1"),
            plain("https://early.com/1"),
            plain("https://early.com/2"),
            plain("https://late.com/2"),
        ];
        let tiles = extract_domains(&results, Intent::General, 10);
        assert_eq!(tiles[0].domain, "late.com");
        assert_eq!(tiles[1].domain, "early.com");
    }

    #[test]
    fn cap_is_enforced() {
        let results: Vec<ResultItem> = (0..15)
            .map(|i| plain(&format!("https://domain{i}.com/page")))
            .collect();
        let tiles = extract_domains(&results, Intent::General, 10);
        assert_eq!(tiles.len(), 10);
    }

    #[test]
    fn platform_exclusions_skipped_even_when_dominant() {
        let mut results: Vec<ResultItem> = (0..8)
            .map(|i| plain(&format!("https://www.youtube.com/watch?v={i}")))
            .collect();
        results.push(plain("https://smallsite.com/page"));
        let tiles = extract_domains(&results, Intent::General, 10);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].domain, "smallsite.com");
    }

    #[test]
    fn subdomains_of_excluded_platforms_skipped() {
        let results = vec![plain("https://music.youtube.com/playlist")];
        assert!(extract_domains(&results, Intent::General, 10).is_empty());
    }

    #[test]
    fn www_prefix_stripped() {
        let results = vec![plain("https://www.example.com/1"), plain("https://example.com/2")];
        let tiles = extract_domains(&results, Intent::General, 10);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].domain, "example.com");
        assert_eq!(tiles[0].count, 2);
    }

    #[test]
    fn shopping_intent_keeps_only_matching_domains() {
        let results = vec![
            item("https://bestdeals.com/shoes", "Buy shoes on sale", "price drop"),
            item(
                "https://en.wikipedia.org/wiki/Shoe",
                "Shoe - Wikipedia",
                "buy history of footwear",
            ),
            item("https://randomblog.net/post", "My day", "nothing commercial"),
        ];
        let tiles = extract_domains(&results, Intent::Shopping, 10);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].domain, "bestdeals.com");
    }

    #[test]
    fn general_intent_keeps_everything_not_excluded() {
        let results = vec![
            plain("https://anything.org/x"),
            plain("https://facebook.com/page"),
        ];
        let tiles = extract_domains(&results, Intent::General, 10);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].domain, "anything.org");
    }

    #[test]
    fn invalid_links_are_skipped() {
        let results = vec![plain("not a url"), plain("https://good.com/1")];
        let tiles = extract_domains(&results, Intent::General, 10);
        assert_eq!(tiles.len(), 1);
    }

    #[test]
    fn display_names_derived_from_domain() {
        let results = vec![plain("https://amazon.com/dp/1")];
        let tiles = extract_domains(&results, Intent::General, 10);
        assert_eq!(tiles[0].display_name, "Amazon");
    }
}
