//! Aggregation service - the operations exposed to front-ends
//!
//! Owns one [`FetchClient`] shared by every provider client, so all calls
//! reuse the same connection pool. Each operation is independent; nothing
//! is cached between calls.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::domain::{
    AggregationError, LyricsRecord, NewsResult, TrackMetadata, TrendArtist, TrendTrack,
};
use super::fetch::{FetchClient, RetryPolicy};
use super::lastfm::{self, ChartPeriod, LastfmClient};
use super::lyrics::{self, LyricsClient};
use super::news::{self, NewsClient, NewsKind};
use super::traits::{LyricsApi, NewsApi, TrackInfoApi, TrendsApi};

/// Articles returned when the caller does not ask for a specific number
pub const NEWS_DEFAULT_LIMIT: u32 = 20;
pub const NEWS_MAX_LIMIT: u32 = 100;
/// Chart entries returned when the caller does not ask for a specific number
pub const TRENDS_DEFAULT_LIMIT: u32 = 50;
pub const TRENDS_MAX_LIMIT: u32 = 200;

/// Endpoints, credentials and retry policies for every provider
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub lyrics_base_url: String,
    pub news_base_url: String,
    pub lastfm_base_url: String,
    /// NewsAPI key (get one at https://newsapi.org/register)
    pub news_api_key: String,
    /// Last.fm key (get one at https://www.last.fm/api/account/create)
    pub lastfm_api_key: String,
    pub lyrics_policy: RetryPolicy,
    pub news_policy: RetryPolicy,
    /// Used for both charts and track info
    pub trends_policy: RetryPolicy,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            lyrics_base_url: lyrics::DEFAULT_BASE_URL.to_string(),
            news_base_url: news::DEFAULT_BASE_URL.to_string(),
            lastfm_base_url: lastfm::DEFAULT_BASE_URL.to_string(),
            news_api_key: String::new(),
            lastfm_api_key: String::new(),
            lyrics_policy: RetryPolicy::new(Duration::from_secs(5), 1),
            news_policy: RetryPolicy::new(Duration::from_secs(8), 1),
            trends_policy: RetryPolicy::new(Duration::from_secs(8), 1),
        }
    }
}

/// Music data aggregator
#[derive(Clone)]
pub struct Aggregator {
    lyrics: Arc<dyn LyricsApi>,
    news: Arc<dyn NewsApi>,
    trends: Arc<dyn TrendsApi>,
    track_info: Arc<dyn TrackInfoApi>,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator").finish_non_exhaustive()
    }
}

impl Aggregator {
    /// Build an aggregator over a fresh reqwest transport
    pub fn new(config: AggregatorConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_fetch(FetchClient::with_reqwest()?, config))
    }

    /// Build an aggregator whose clients all share `fetch`
    pub fn with_fetch(fetch: FetchClient, config: AggregatorConfig) -> Self {
        let lastfm = Arc::new(LastfmClient::new(
            fetch.clone(),
            config.lastfm_base_url,
            config.lastfm_api_key,
            config.trends_policy,
        ));

        Self {
            lyrics: Arc::new(LyricsClient::new(
                fetch.clone(),
                config.lyrics_base_url,
                config.lyrics_policy,
            )),
            news: Arc::new(NewsClient::new(
                fetch,
                config.news_base_url,
                config.news_api_key,
                config.news_policy,
            )),
            trends: lastfm.clone(),
            track_info: lastfm,
        }
    }

    /// Build an aggregator from arbitrary provider implementations
    pub fn from_parts(
        lyrics: Arc<dyn LyricsApi>,
        news: Arc<dyn NewsApi>,
        trends: Arc<dyn TrendsApi>,
        track_info: Arc<dyn TrackInfoApi>,
    ) -> Self {
        Self {
            lyrics,
            news,
            trends,
            track_info,
        }
    }

    /// Lyrics with text metrics. A song without lyrics is not an error.
    pub async fn fetch_lyrics(
        &self,
        artist: &str,
        title: &str,
    ) -> Result<LyricsRecord, AggregationError> {
        self.lyrics.fetch_lyrics(artist, title).await
    }

    /// Lyrics, then track info when requested and lyrics were found.
    ///
    /// Track info is best-effort: if it fails the lyrics are still
    /// returned, just without metadata.
    pub async fn fetch_lyrics_with_metadata(
        &self,
        artist: &str,
        title: &str,
        include_metadata: bool,
    ) -> Result<LyricsRecord, AggregationError> {
        let mut record = self.fetch_lyrics(artist, title).await?;

        if include_metadata && record.is_found() {
            record.metadata = self.fetch_track_metadata(artist, title).await;
        }

        Ok(record)
    }

    /// Track info, or `None` if it could not be fetched
    pub async fn fetch_track_metadata(&self, artist: &str, title: &str) -> Option<TrackMetadata> {
        match self.track_info.track_info(artist, title).await {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!(artist, title, error = %e, "Track info lookup failed");
                None
            }
        }
    }

    /// Music news, filtered for relevance.
    ///
    /// A `limit` of 0 or above [`NEWS_MAX_LIMIT`] falls back to the default.
    pub async fn fetch_music_news(
        &self,
        kind: NewsKind,
        country: &str,
        genre: Option<&str>,
        limit: u32,
    ) -> Result<NewsResult, AggregationError> {
        let limit = effective_limit(limit, NEWS_DEFAULT_LIMIT, NEWS_MAX_LIMIT);
        self.news.fetch_music_news(kind, country, genre, limit).await
    }

    /// Top tracks chart. `period` is validated before any request is made.
    pub async fn fetch_top_tracks(
        &self,
        limit: u32,
        period: Option<&str>,
    ) -> Result<Vec<TrendTrack>, AggregationError> {
        let period = ChartPeriod::parse_optional(period)?;
        let limit = effective_limit(limit, TRENDS_DEFAULT_LIMIT, TRENDS_MAX_LIMIT);
        debug!(limit, ?period, "Fetching top tracks");
        self.trends.top_tracks(limit, period).await
    }

    /// Top artists chart. `period` is validated before any request is made.
    pub async fn fetch_top_artists(
        &self,
        limit: u32,
        period: Option<&str>,
    ) -> Result<Vec<TrendArtist>, AggregationError> {
        let period = ChartPeriod::parse_optional(period)?;
        let limit = effective_limit(limit, TRENDS_DEFAULT_LIMIT, TRENDS_MAX_LIMIT);
        debug!(limit, ?period, "Fetching top artists");
        self.trends.top_artists(limit, period).await
    }
}

/// `requested` if it is within `1..=max`, otherwise `default`
pub fn effective_limit(requested: u32, default: u32, max: u32) -> u32 {
    if (1..=max).contains(&requested) {
        requested
    } else {
        default
    }
}
