//! SERP API backend: a Google-style JSON search API with one endpoint per
//! result kind.
//!
//! Each vertical has its own payload shape; a small explicit mapping
//! function per kind converts it into the crate's tagged [`ResultItem`]
//! union. Mapping functions are pure and tested against inline fixtures.
//! Safe search is forced on for every call.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{Result, SearchError};
use crate::http;
use crate::types::{ResultDetail, ResultItem, ResultKind};

use super::{SearchBackend, UpstreamQuery, UpstreamResponse};

const DEFAULT_BASE_URL: &str = "https://google.serper.dev";

/// Client for the upstream SERP JSON API.
#[derive(Debug)]
pub struct SerpClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerpClient {
    /// Create a client. An empty API key is a configuration error: with no
    /// credentials every upstream call would fail, so the whole
    /// orchestration fails fast instead.
    pub fn new(api_key: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SearchError::Config("missing SERP API key".into()));
        }
        Ok(Self {
            client: http::build_client(timeout_seconds)?,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different base URL (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(kind: ResultKind) -> &'static str {
        match kind {
            ResultKind::Web => "/search",
            ResultKind::Image => "/images",
            ResultKind::Video => "/videos",
            ResultKind::Place => "/places",
            ResultKind::News => "/news",
        }
    }

    async fn fetch<P: for<'de> Deserialize<'de>>(&self, query: &UpstreamQuery) -> Result<P> {
        let url = format!("{}{}", self.base_url, Self::endpoint(query.kind));
        let body = build_body(query);

        tracing::trace!(kind = %query.kind, page = query.page, "upstream SERP call");

        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("SERP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Upstream(format!(
                "SERP API returned HTTP {status}"
            )));
        }

        response
            .json::<P>()
            .await
            .map_err(|e| SearchError::Parse(format!("SERP payload decode failed: {e}")))
    }
}

#[async_trait]
impl SearchBackend for SerpClient {
    async fn search(&self, query: &UpstreamQuery) -> Result<UpstreamResponse> {
        let response = match query.kind {
            ResultKind::Web => map_web(self.fetch::<WebPayload>(query).await?),
            ResultKind::Image => map_images(self.fetch::<ImagesPayload>(query).await?),
            ResultKind::Video => map_videos(self.fetch::<VideosPayload>(query).await?),
            ResultKind::Place => map_places(self.fetch::<PlacesPayload>(query).await?),
            ResultKind::News => map_news(self.fetch::<NewsPayload>(query).await?),
        };
        tracing::debug!(kind = %query.kind, count = response.items.len(), "upstream results mapped");
        Ok(response)
    }
}

/// Assemble the JSON request body for one upstream call.
///
/// `safe: "active"` is unconditional, independent of the content-safety
/// filter.
fn build_body(query: &UpstreamQuery) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert("q".into(), query.text.clone().into());
    map.insert("num".into(), query.page_size.into());
    map.insert("page".into(), query.page.max(1).into());
    map.insert("safe".into(), "active".into());
    if let Some(code) = query.country_code.as_deref().filter(|c| !c.is_empty()) {
        map.insert("gl".into(), code.into());
    }
    if let Some(lang) = query.language.as_deref().filter(|l| !l.is_empty()) {
        map.insert("hl".into(), lang.into());
    }
    if let Some(location) = query.location.as_deref().filter(|l| !l.is_empty()) {
        map.insert("location".into(), location.into());
    }
    if let Some(tbs) = query.time_range.as_tbs() {
        map.insert("tbs".into(), tbs.into());
    }
    serde_json::Value::Object(map)
}

// ── Payload shapes, one set per vertical ────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct WebPayload {
    #[serde(default)]
    organic: Vec<OrganicEntry>,
    #[serde(default, rename = "relatedSearches")]
    related_searches: Vec<RelatedEntry>,
    #[serde(default, rename = "searchInformation")]
    search_information: Option<SearchInformation>,
}

#[derive(Debug, Deserialize)]
struct OrganicEntry {
    title: String,
    link: String,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    favicon: Option<String>,
    #[serde(default)]
    position: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RelatedEntry {
    query: String,
}

#[derive(Debug, Deserialize)]
struct SearchInformation {
    #[serde(default, rename = "correctedQuery")]
    corrected_query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImagesPayload {
    #[serde(default)]
    images: Vec<ImageEntry>,
}

#[derive(Debug, Deserialize)]
struct ImageEntry {
    title: String,
    #[serde(default, rename = "imageUrl")]
    image_url: Option<String>,
    #[serde(default, rename = "thumbnailUrl")]
    thumbnail_url: Option<String>,
    /// Page the image was found on.
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    position: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideosPayload {
    #[serde(default)]
    videos: Vec<VideoEntry>,
}

#[derive(Debug, Deserialize)]
struct VideoEntry {
    title: String,
    link: String,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    views: Option<String>,
    #[serde(default)]
    likes: Option<String>,
    #[serde(default)]
    comments: Option<String>,
    #[serde(default)]
    shares: Option<String>,
    #[serde(default)]
    position: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlacesPayload {
    #[serde(default)]
    places: Vec<PlaceEntry>,
}

#[derive(Debug, Deserialize)]
struct PlaceEntry {
    title: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default, rename = "ratingCount")]
    rating_count: Option<u32>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, rename = "phoneNumber")]
    phone: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default, rename = "priceLevel")]
    price: Option<String>,
    #[serde(default)]
    position: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewsPayload {
    #[serde(default)]
    news: Vec<NewsEntry>,
}

#[derive(Debug, Deserialize)]
struct NewsEntry {
    title: String,
    link: String,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default, rename = "imageUrl")]
    image_url: Option<String>,
    #[serde(default)]
    position: Option<u32>,
}

// ── Per-kind mapping into the tagged ResultItem union ───────────────────

pub(crate) fn map_web(payload: WebPayload) -> UpstreamResponse {
    let items = payload
        .organic
        .into_iter()
        .enumerate()
        .map(|(index, entry)| ResultItem {
            title: entry.title,
            link: entry.link,
            snippet: entry.snippet.unwrap_or_default(),
            source_id: String::new(),
            favicon: entry.favicon,
            position: entry.position.or(Some(index as u32 + 1)),
            detail: ResultDetail::Web { date: entry.date },
        })
        .collect();

    UpstreamResponse {
        items,
        corrected_query: payload
            .search_information
            .and_then(|info| info.corrected_query),
        related_searches: payload
            .related_searches
            .into_iter()
            .map(|entry| entry.query)
            .collect(),
    }
}

pub(crate) fn map_images(payload: ImagesPayload) -> UpstreamResponse {
    let items = payload
        .images
        .into_iter()
        .enumerate()
        .map(|(index, entry)| ResultItem {
            title: entry.title,
            link: entry.link.clone().unwrap_or_default(),
            snippet: String::new(),
            source_id: String::new(),
            favicon: None,
            position: entry.position.or(Some(index as u32 + 1)),
            detail: ResultDetail::Image {
                image_url: entry.image_url,
                thumbnail_url: entry.thumbnail_url,
                source_page: entry.link,
            },
        })
        .collect();
    UpstreamResponse {
        items,
        ..Default::default()
    }
}

pub(crate) fn map_videos(payload: VideosPayload) -> UpstreamResponse {
    let items = payload
        .videos
        .into_iter()
        .enumerate()
        .map(|(index, entry)| ResultItem {
            title: entry.title,
            link: entry.link,
            snippet: entry.snippet.unwrap_or_default(),
            source_id: String::new(),
            favicon: None,
            position: entry.position.or(Some(index as u32 + 1)),
            detail: ResultDetail::Video {
                duration: entry.duration,
                channel: entry.channel,
                date: entry.date,
                views: entry.views,
                likes: entry.likes,
                comments: entry.comments,
                shares: entry.shares,
            },
        })
        .collect();
    UpstreamResponse {
        items,
        ..Default::default()
    }
}

pub(crate) fn map_places(payload: PlacesPayload) -> UpstreamResponse {
    let items = payload
        .places
        .into_iter()
        .enumerate()
        .map(|(index, entry)| ResultItem {
            title: entry.title,
            link: entry.website.unwrap_or_default(),
            snippet: entry.address.clone().unwrap_or_default(),
            source_id: String::new(),
            favicon: None,
            position: entry.position.or(Some(index as u32 + 1)),
            detail: ResultDetail::Place {
                address: entry.address,
                rating: entry.rating,
                rating_count: entry.rating_count,
                category: entry.category,
                phone: entry.phone,
                price: entry.price,
            },
        })
        .collect();
    UpstreamResponse {
        items,
        ..Default::default()
    }
}

pub(crate) fn map_news(payload: NewsPayload) -> UpstreamResponse {
    let items = payload
        .news
        .into_iter()
        .enumerate()
        .map(|(index, entry)| ResultItem {
            title: entry.title,
            link: entry.link,
            snippet: entry.snippet.unwrap_or_default(),
            source_id: String::new(),
            favicon: None,
            position: entry.position.or(Some(index as u32 + 1)),
            detail: ResultDetail::News {
                date: entry.date,
                outlet: entry.source,
                thumbnail_url: entry.image_url,
            },
        })
        .collect();
    UpstreamResponse {
        items,
        ..Default::default()
    }
}
