//! Internal domain models for aggregated music data.
//!
//! These types are OUR types - they don't change when external APIs change.
//! Every provider response gets converted into these types via adapters.
//! All records are request-scoped values: built per call, never cached.

use serde::Serialize;

/// Upstream service a request was made against.
///
/// Used to scope user-facing failure messages to the right service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Lyrics,
    News,
    Trends,
    TrackInfo,
}

impl Provider {
    /// Human-readable service name used in messages
    pub fn service_name(self) -> &'static str {
        match self {
            Provider::Lyrics => "lyrics",
            Provider::News => "news",
            Provider::Trends => "trends",
            Provider::TrackInfo => "track info",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.service_name())
    }
}

/// Semantic cause of a failed upstream call.
///
/// Exactly one kind per failure. Compared by value, never by identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    NetworkUnreachable,
    UpstreamNotFound,
    RateLimited,
    Unauthorized,
    UpstreamError {
        status_code: Option<u16>,
        message: String,
    },
    DecodeError {
        message: String,
    },
}

/// Coarse response class a caller can map to an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusHint {
    /// Client should fix the request or retry later (400)
    BadRequest,
    /// Upstream has nothing for this request (404)
    NotFound,
    /// Upstream or internal failure (500)
    ServerError,
}

impl StatusHint {
    pub fn status_code(self) -> u16 {
        match self {
            StatusHint::BadRequest => 400,
            StatusHint::NotFound => 404,
            StatusHint::ServerError => 500,
        }
    }
}

/// Errors surfaced by the aggregation operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AggregationError {
    /// Request could not be built (bad base URL in config)
    #[error("failed to build API URL: {0}")]
    Url(#[from] super::url::UrlError),

    /// Chart period outside the supported set
    #[error(
        "invalid period '{0}'. Valid periods: 7day, 1month, 3month, 6month, 12month, overall"
    )]
    InvalidPeriod(String),

    /// Upstream call failed and was classified
    #[error("{message}")]
    Upstream {
        provider: Provider,
        kind: FailureKind,
        message: String,
    },
}

impl AggregationError {
    /// Classified failure kind, if the error came from an upstream call
    pub fn kind(&self) -> Option<&FailureKind> {
        match self {
            AggregationError::Upstream { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Suggested response class for an HTTP front-end.
    ///
    /// Transient conditions the user can retry map to a 400-class response,
    /// not-found to 404, and everything else to a 500-class response.
    pub fn status_hint(&self) -> StatusHint {
        match self {
            AggregationError::InvalidPeriod(_) => StatusHint::BadRequest,
            AggregationError::Url(_) => StatusHint::ServerError,
            AggregationError::Upstream { kind, .. } => match kind {
                FailureKind::Timeout
                | FailureKind::NetworkUnreachable
                | FailureKind::RateLimited => StatusHint::BadRequest,
                FailureKind::UpstreamNotFound => StatusHint::NotFound,
                FailureKind::Unauthorized
                | FailureKind::UpstreamError { .. }
                | FailureKind::DecodeError { .. } => StatusHint::ServerError,
            },
        }
    }
}

// ============================================================================
// Lyrics
// ============================================================================

/// Outcome of a lyrics lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LyricsStatus {
    Found,
    #[default]
    NotFound,
    Empty,
}

/// Normalized lyrics plus derived text metrics.
///
/// When `status` is not `Found`, every lyric field is zero-valued.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LyricsRecord {
    pub artist: String,
    pub title: String,
    pub raw_lyrics: String,
    pub cleaned_lyrics: String,
    pub lines: Vec<String>,
    pub line_count: usize,
    pub verse_count: usize,
    pub word_count: usize,
    pub has_chorus: bool,
    pub status: LyricsStatus,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TrackMetadata>,
}

impl LyricsRecord {
    /// A record with no lyric content
    pub fn without_lyrics(
        artist: impl Into<String>,
        title: impl Into<String>,
        status: LyricsStatus,
        source: impl Into<String>,
    ) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            status,
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn is_found(&self) -> bool {
        self.status == LyricsStatus::Found
    }
}

/// Artwork reference with the provider's size label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub url: String,
    pub size_label: String,
}

/// Secondary track information attached to a lyrics record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackMetadata {
    pub album: Option<String>,
    pub duration_ms: Option<u64>,
    pub play_count: u64,
    pub listeners: u64,
    pub url: Option<String>,
    pub images: Vec<Image>,
    /// Tag names in provider order, without duplicates
    pub tags: Vec<String>,
    pub summary: Option<String>,
}

// ============================================================================
// News
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewsArticle {
    pub source_id: String,
    pub source_name: String,
    pub author: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub published_at: String,
    pub content: String,
}

/// Ordered articles with a count that always matches their length.
///
/// The count is derived locally, never taken from the upstream's
/// self-reported total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewsResult {
    articles: Vec<NewsArticle>,
    total_results: usize,
}

impl NewsResult {
    pub fn new(articles: Vec<NewsArticle>) -> Self {
        let total_results = articles.len();
        Self {
            articles,
            total_results,
        }
    }

    pub fn articles(&self) -> &[NewsArticle] {
        &self.articles
    }

    pub fn total_results(&self) -> usize {
        self.total_results
    }

    /// Keep only articles matching `keep`, preserving order, and recount
    pub fn retain(&mut self, keep: impl FnMut(&NewsArticle) -> bool) {
        self.articles.retain(keep);
        self.total_results = self.articles.len();
    }
}

// ============================================================================
// Trends
// ============================================================================

/// A chart track. Vector position and `rank` both encode chart order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendTrack {
    /// 1-based chart position
    pub rank: usize,
    pub name: String,
    pub artist_name: String,
    pub play_count: u64,
    pub listener_count: u64,
    pub duration_secs: Option<u64>,
    pub musicbrainz_id: Option<String>,
    pub url: String,
    pub images: Vec<Image>,
}

/// A chart artist. Vector position and `rank` both encode chart order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendArtist {
    /// 1-based chart position
    pub rank: usize,
    pub name: String,
    pub play_count: u64,
    pub listener_count: u64,
    pub musicbrainz_id: Option<String>,
    pub url: String,
    pub images: Vec<Image>,
}
