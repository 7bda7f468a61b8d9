//! Intent classification and summarization boundaries, plus the static
//! per-intent source catalog.
//!
//! The real classifier and summarizer are external LLM-backed services;
//! this crate consumes them through object-safe traits and never fails a
//! search because of them: a classifier error degrades to
//! [`Intent::General`], a summarizer error degrades to a locally-computed
//! basic summary.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Intent, ResultItem, ResultKind, Source};

/// External query-intent classifier boundary.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify a query. Implementations should not panic; any error is
    /// absorbed by the orchestrator as [`Intent::General`].
    async fn classify(&self, query: &str) -> Result<Intent>;
}

/// External summarizer boundary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize the top results for a query. Errors are absorbed: the
    /// orchestrator substitutes [`basic_summary`].
    async fn summarize(&self, query: &str, results: &[ResultItem], intent: Intent)
        -> Result<String>;
}

/// Keyword-heuristic classifier used when no external classifier is wired
/// in. Cheap, deterministic, and good enough to pick source catalogs.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier;

const INTENT_CUES: &[(Intent, &[&str])] = &[
    (
        Intent::Shopping,
        &["buy", "price", "cheap", "deal", "order", "shop", "discount", "purchase"],
    ),
    (
        Intent::News,
        &["news", "latest", "breaking", "today", "headline", "update"],
    ),
    (
        Intent::Learning,
        &["how to", "what is", "tutorial", "learn", "course", "explain", "guide"],
    ),
    (
        Intent::Videos,
        &["video", "watch", "trailer", "episode", "clip"],
    ),
    (
        Intent::Travel,
        &["flight", "hotel", "travel", "visa", "itinerary", "vacation", "trip to"],
    ),
    (
        Intent::Health,
        &["symptom", "treatment", "medicine", "doctor", "disease", "diet", "therapy"],
    ),
    (
        Intent::Tech,
        &["programming", "software", "api", "framework", "install", "error code", "github"],
    ),
    (
        Intent::Finance,
        &["stock", "invest", "crypto", "loan", "interest rate", "tax", "mortgage"],
    ),
    (
        Intent::Entertainment,
        &["movie", "song", "celebrity", "series", "album", "concert"],
    ),
    (
        Intent::Food,
        &["recipe", "restaurant", "ingredients", "cook", "near me food", "cuisine"],
    ),
];

#[async_trait]
impl IntentClassifier for KeywordClassifier {
    async fn classify(&self, query: &str) -> Result<Intent> {
        let haystack = query.to_lowercase();
        let mut best: Option<(usize, Intent)> = None;
        for (intent, cues) in INTENT_CUES {
            let hits = cues.iter().filter(|cue| haystack.contains(*cue)).count();
            if hits > 0 && best.is_none_or(|(best_hits, _)| hits > best_hits) {
                best = Some((hits, *intent));
            }
        }
        Ok(best.map(|(_, intent)| intent).unwrap_or_default())
    }
}

/// Locally-computed fallback summary: the top result titles stitched into
/// a short paragraph. Used when the external summarizer fails or is absent.
pub fn basic_summary(query: &str, results: &[ResultItem]) -> String {
    let titles: Vec<&str> = results
        .iter()
        .filter(|item| !item.title.is_empty())
        .take(3)
        .map(|item| item.title.as_str())
        .collect();
    if titles.is_empty() {
        return format!("No overview available for \"{query}\".");
    }
    format!("Top results for \"{query}\": {}.", titles.join("; "))
}

/// Immutable per-intent catalog of static site-scoped sources.
///
/// Built once at startup and injected into the orchestrator; the defaults
/// carry a small realistic set per intent. `General` has no static
/// sources: an aggregate general search queries only the native source.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    by_intent: HashMap<Intent, Vec<Source>>,
}

impl SourceCatalog {
    pub fn new(by_intent: HashMap<Intent, Vec<Source>>) -> Self {
        Self { by_intent }
    }

    /// An empty catalog: every intent resolves to the native source only.
    pub fn empty() -> Self {
        Self {
            by_intent: HashMap::new(),
        }
    }

    /// Static sources for an intent. Empty for `General` and unknown
    /// intents.
    pub fn sources_for(&self, intent: Intent) -> &[Source] {
        self.by_intent
            .get(&intent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Find a source by id across all intents.
    pub fn find(&self, id: &str) -> Option<&Source> {
        self.by_intent
            .values()
            .flat_map(|sources| sources.iter())
            .find(|source| source.id == id)
    }
}

fn scoped(id: &str, name: &str, domain: &str, kind: ResultKind) -> Source {
    Source {
        id: id.into(),
        display_name: name.into(),
        site_domain: Some(domain.into()),
        kind,
    }
}

impl Default for SourceCatalog {
    fn default() -> Self {
        let mut by_intent = HashMap::new();
        by_intent.insert(
            Intent::Shopping,
            vec![
                scoped("amazon", "Amazon", "amazon.com", ResultKind::Web),
                scoped("ebay", "eBay", "ebay.com", ResultKind::Web),
                scoped("walmart", "Walmart", "walmart.com", ResultKind::Web),
            ],
        );
        by_intent.insert(
            Intent::News,
            vec![
                scoped("reuters", "Reuters", "reuters.com", ResultKind::News),
                scoped("bbc", "BBC", "bbc.com", ResultKind::News),
                scoped("apnews", "AP News", "apnews.com", ResultKind::News),
            ],
        );
        by_intent.insert(
            Intent::Learning,
            vec![
                scoped("wikipedia", "Wikipedia", "wikipedia.org", ResultKind::Web),
                scoped("khanacademy", "Khan Academy", "khanacademy.org", ResultKind::Web),
                scoped("coursera", "Coursera", "coursera.org", ResultKind::Web),
            ],
        );
        by_intent.insert(
            Intent::Videos,
            vec![
                scoped("youtube", "YouTube", "youtube.com", ResultKind::Video),
                scoped("vimeo", "Vimeo", "vimeo.com", ResultKind::Video),
                scoped("dailymotion", "Dailymotion", "dailymotion.com", ResultKind::Video),
            ],
        );
        by_intent.insert(
            Intent::Travel,
            vec![
                scoped("booking", "Booking.com", "booking.com", ResultKind::Web),
                scoped("tripadvisor", "Tripadvisor", "tripadvisor.com", ResultKind::Web),
                scoped("expedia", "Expedia", "expedia.com", ResultKind::Web),
            ],
        );
        by_intent.insert(
            Intent::Health,
            vec![
                scoped("mayoclinic", "Mayo Clinic", "mayoclinic.org", ResultKind::Web),
                scoped("webmd", "WebMD", "webmd.com", ResultKind::Web),
                scoped("nih", "NIH", "nih.gov", ResultKind::Web),
            ],
        );
        by_intent.insert(
            Intent::Tech,
            vec![
                scoped("github", "GitHub", "github.com", ResultKind::Web),
                scoped("stackoverflow", "Stack Overflow", "stackoverflow.com", ResultKind::Web),
                scoped("hackernews", "Hacker News", "news.ycombinator.com", ResultKind::Web),
            ],
        );
        by_intent.insert(
            Intent::Finance,
            vec![
                scoped("bloomberg", "Bloomberg", "bloomberg.com", ResultKind::Web),
                scoped("investopedia", "Investopedia", "investopedia.com", ResultKind::Web),
                scoped("marketwatch", "MarketWatch", "marketwatch.com", ResultKind::Web),
            ],
        );
        by_intent.insert(
            Intent::Entertainment,
            vec![
                scoped("imdb", "IMDb", "imdb.com", ResultKind::Web),
                scoped("rottentomatoes", "Rotten Tomatoes", "rottentomatoes.com", ResultKind::Web),
                scoped("billboard", "Billboard", "billboard.com", ResultKind::Web),
            ],
        );
        by_intent.insert(
            Intent::Food,
            vec![
                scoped("allrecipes", "Allrecipes", "allrecipes.com", ResultKind::Web),
                scoped("seriouseats", "Serious Eats", "seriouseats.com", ResultKind::Web),
                scoped("yelp", "Yelp", "yelp.com", ResultKind::Place),
            ],
        );
        Self { by_intent }
    }
}
