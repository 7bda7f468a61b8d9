//! Core types for the search orchestration engine.
//!
//! Result items form a tagged union (one variant per result kind) with
//! strictly optional kind-specific fields; string-encoded numbers and dates
//! stay as strings here and are parsed only by [`crate::rank::parse`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Query intent, supplied by the caller or produced by the external
/// classifier. Falls back to [`Intent::General`] on any classifier failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Shopping,
    News,
    Learning,
    Videos,
    Travel,
    Health,
    Tech,
    Finance,
    Entertainment,
    Food,
    #[default]
    General,
}

impl Intent {
    /// Returns the lowercase wire name of this intent.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Shopping => "shopping",
            Self::News => "news",
            Self::Learning => "learning",
            Self::Videos => "videos",
            Self::Travel => "travel",
            Self::Health => "health",
            Self::Tech => "tech",
            Self::Finance => "finance",
            Self::Entertainment => "entertainment",
            Self::Food => "food",
            Self::General => "general",
        }
    }

    /// Lenient parse of an intent name; unknown names map to `General`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "shopping" => Self::Shopping,
            "news" => Self::News,
            "learning" | "education" => Self::Learning,
            "videos" | "video" => Self::Videos,
            "travel" => Self::Travel,
            "health" => Self::Health,
            "tech" | "technology" => Self::Tech,
            "finance" => Self::Finance,
            "entertainment" => Self::Entertainment,
            "food" => Self::Food,
            _ => Self::General,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The kind of result a source yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Web,
    Image,
    Video,
    Place,
    News,
}

impl ResultKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Image => "image",
            Self::Video => "video",
            Self::Place => "place",
            Self::News => "news",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Time-range restriction for a search. Orthogonal to the other filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Any,
    Day,
    Week,
    Month,
    Year,
}

impl TimeRange {
    /// Upstream `tbs` parameter value, or `None` for no restriction.
    pub fn as_tbs(&self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Day => Some("qdr:d"),
            Self::Week => Some("qdr:w"),
            Self::Month => Some("qdr:m"),
            Self::Year => Some("qdr:y"),
        }
    }
}

/// File-type restriction, appended to the query text as a qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    Any,
    Pdf,
    Doc,
    Ppt,
    Xls,
}

impl FileType {
    /// Query-text qualifier for this file type, or `None` for no restriction.
    pub fn qualifier(&self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Pdf => Some("filetype:pdf"),
            Self::Doc => Some("filetype:doc"),
            Self::Ppt => Some("filetype:ppt"),
            Self::Xls => Some("filetype:xls"),
        }
    }
}

/// Result ordering applied after aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Relevance,
    Recent,
    MostViewed,
    MostEngaged,
}

/// Independent, orthogonal search filters. All default to "any".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct SearchFilters {
    pub time_range: TimeRange,
    /// ISO-639-1 language code, or `None` for any language.
    pub language: Option<String>,
    pub file_type: FileType,
}

/// Raw location fields as supplied by a caller or a geolocation provider.
/// Any subset may be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PartialLocation {
    pub country: Option<String>,
    /// ISO-3166 alpha-2 code if known; a country name is also accepted in
    /// `country` and resolved through the country table.
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    /// Free-text location string, used verbatim for the canonical string
    /// when present.
    pub free_text: Option<String>,
}

impl PartialLocation {
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.country_code.is_none()
            && self.state.is_none()
            && self.city.is_none()
            && self.free_text.is_none()
    }
}

/// How the resolver should weigh manual versus detected location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    /// Use the caller-supplied location verbatim.
    Manual,
    /// Use the detected (typically IP-based) location; behaves like
    /// `Global` if detection failed.
    #[default]
    Normal,
    /// No geographic restriction at all, overriding everything else.
    Global,
}

/// Canonical resolved geography used to bias a search.
///
/// Empty fields mean "unknown"; an all-empty signature means no geographic
/// restriction. `country_code` is lowercase ISO-3166 alpha-2 or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LocationSignature {
    pub country: String,
    pub country_code: String,
    pub state: String,
    pub city: String,
    /// Display/canonical location string, e.g. `"Austin,Texas,United States"`.
    pub canonical: String,
}

impl LocationSignature {
    pub fn is_empty(&self) -> bool {
        self.country.is_empty()
            && self.country_code.is_empty()
            && self.state.is_empty()
            && self.city.is_empty()
            && self.canonical.is_empty()
    }
}

/// One upstream query target: the native web search, or a single
/// site-scoped domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Stable identifier, used by the source selector.
    pub id: String,
    pub display_name: String,
    /// Domain to scope the query to with a `site:` qualifier. `None` means
    /// no site restriction (native web search).
    pub site_domain: Option<String>,
    pub kind: ResultKind,
}

impl Source {
    /// The unscoped native web source.
    pub fn native() -> Self {
        Self {
            id: "web".into(),
            display_name: "Web".into(),
            site_domain: None,
            kind: ResultKind::Web,
        }
    }

    /// A dynamic site-scoped web source derived from an observed domain.
    pub fn for_domain(domain: &str) -> Self {
        Self {
            id: domain.to_string(),
            display_name: display_name_for_domain(domain),
            site_domain: Some(domain.to_string()),
            kind: ResultKind::Web,
        }
    }
}

/// Derive a human-readable name from a domain: `"amazon.com"` → `"Amazon"`.
pub(crate) fn display_name_for_domain(domain: &str) -> String {
    let label = domain.split('.').next().unwrap_or(domain);
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Kind-specific result fields. All optional: upstream payloads are
/// heterogeneous and frequently omit fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResultDetail {
    Web {
        #[serde(default)]
        date: Option<String>,
    },
    Image {
        #[serde(default)]
        image_url: Option<String>,
        #[serde(default)]
        thumbnail_url: Option<String>,
        #[serde(default)]
        source_page: Option<String>,
    },
    Video {
        #[serde(default)]
        duration: Option<String>,
        #[serde(default)]
        channel: Option<String>,
        #[serde(default)]
        date: Option<String>,
        /// Human-readable magnitude strings ("1.2M"), parsed lazily.
        #[serde(default)]
        views: Option<String>,
        #[serde(default)]
        likes: Option<String>,
        #[serde(default)]
        comments: Option<String>,
        #[serde(default)]
        shares: Option<String>,
    },
    Place {
        #[serde(default)]
        address: Option<String>,
        #[serde(default)]
        rating: Option<f64>,
        #[serde(default)]
        rating_count: Option<u32>,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        phone: Option<String>,
        #[serde(default)]
        price: Option<String>,
    },
    News {
        #[serde(default)]
        date: Option<String>,
        #[serde(default)]
        outlet: Option<String>,
        #[serde(default)]
        thumbnail_url: Option<String>,
    },
}

/// A single aggregated search result. Immutable after construction within
/// a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// Id of the [`Source`] that produced this item. Stamped by the
    /// dispatcher.
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub favicon: Option<String>,
    /// 1-based upstream rank within its source, when the upstream provides
    /// one.
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(flatten)]
    pub detail: ResultDetail,
}

impl ResultItem {
    pub fn kind(&self) -> ResultKind {
        match self.detail {
            ResultDetail::Web { .. } => ResultKind::Web,
            ResultDetail::Image { .. } => ResultKind::Image,
            ResultDetail::Video { .. } => ResultKind::Video,
            ResultDetail::Place { .. } => ResultKind::Place,
            ResultDetail::News { .. } => ResultKind::News,
        }
    }

    /// The raw date string for this item, if its kind carries one.
    pub fn date_str(&self) -> Option<&str> {
        match &self.detail {
            ResultDetail::Web { date }
            | ResultDetail::News { date, .. }
            | ResultDetail::Video { date, .. } => date.as_deref(),
            _ => None,
        }
    }

    /// Parsed view count; 0 when absent or unparsable.
    pub fn view_count(&self) -> u64 {
        match &self.detail {
            ResultDetail::Video { views, .. } => {
                crate::rank::parse::parse_magnitude(views.as_deref().unwrap_or(""))
            }
            _ => 0,
        }
    }

    /// Derived engagement: likes + comments + shares, each parsed from
    /// magnitude strings. 0 when absent or unparsable.
    pub fn engagement(&self) -> u64 {
        match &self.detail {
            ResultDetail::Video {
                likes,
                comments,
                shares,
                ..
            } => {
                let parse =
                    |s: &Option<String>| crate::rank::parse::parse_magnitude(s.as_deref().unwrap_or(""));
                parse(likes) + parse(comments) + parse(shares)
            }
            _ => 0,
        }
    }
}

/// A derived UI tab representing a frequently-occurring result domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainTile {
    pub domain: String,
    pub display_name: String,
    /// How many aggregated results pointed at this domain.
    pub count: usize,
}

/// Synthetic pagination metadata. `total_pages`/`total_results` are a fixed
/// bound, not a real count: the upstream does not expose one reliably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Which sources a request fans out to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceSelector {
    /// The native web source plus the resolved intent's static sources.
    #[default]
    All,
    /// A single source by id: a catalog id, or a raw domain for a dynamic
    /// source derived from an earlier response's tabs.
    One(String),
}

impl SourceSelector {
    /// Stable key form used in cache keys.
    pub fn key(&self) -> &str {
        match self {
            Self::All => "all",
            Self::One(id) => id.as_str(),
        }
    }
}

/// Location fields of a search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LocationInput {
    pub mode: LocationMode,
    /// Caller-supplied location, used in `Manual` mode.
    #[serde(default)]
    pub manual: PartialLocation,
    /// Client IP for detection in `Normal` mode, when available.
    #[serde(default)]
    pub client_ip: Option<String>,
}

/// A single logical search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub source_selector: SourceSelector,
    /// 1-based page; 0 is normalized to 1.
    #[serde(default)]
    pub page: u32,
    /// Per-source page size; 0 means the configured default.
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub sort: SortBy,
    /// Skip classification and use this intent.
    #[serde(default)]
    pub intent_override: Option<Intent>,
    /// Run the external classifier when no override is given.
    #[serde(default)]
    pub auto_detect_intent: bool,
    #[serde(default)]
    pub location: LocationInput,
    #[serde(default)]
    pub filters: SearchFilters,
    /// Scope every source's query to this domain, overriding each source's
    /// own `site_domain`.
    #[serde(default)]
    pub site_override: Option<String>,
    /// Ask for a summary. Only honoured on page 1 of an aggregate request.
    #[serde(default)]
    pub summarize: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            source_selector: SourceSelector::All,
            page: 1,
            limit: 0,
            sort: SortBy::Relevance,
            intent_override: None,
            auto_detect_intent: false,
            location: LocationInput::default(),
            filters: SearchFilters::default(),
            site_override: None,
            summarize: false,
        }
    }
}

/// The assembled response for one search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<ResultItem>,
    pub intent: Intent,
    #[serde(default)]
    pub summary: Option<String>,
    /// Sources actually queried, with fallback-domain substitutions applied.
    pub sources: Vec<Source>,
    /// The resolved intent's static catalog sources.
    #[serde(default)]
    pub intent_sources: Vec<Source>,
    /// Dynamic domain tabs derived from the aggregated results.
    #[serde(default)]
    pub tabs: Vec<DomainTile>,
    pub pagination: Pagination,
    #[serde(default)]
    pub location: Option<LocationSignature>,
    #[serde(default)]
    pub corrected_query: Option<String>,
    #[serde(default)]
    pub related_searches: Vec<String>,
    /// True when the query was rejected by the content policy. The response
    /// is then an ordinary empty result set, never an error.
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub message: Option<String>,
}
