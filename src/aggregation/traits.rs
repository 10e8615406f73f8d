//! Trait definitions for upstream provider clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! [`Aggregator`](super::Aggregator) holds each provider behind one of
//! these traits; production code plugs in the real clients.

use async_trait::async_trait;

use super::domain::{
    AggregationError, LyricsRecord, NewsResult, TrackMetadata, TrendArtist, TrendTrack,
};
use super::lastfm::{ChartPeriod, LastfmClient};
use super::lyrics::LyricsClient;
use super::news::{NewsClient, NewsKind};

/// Lyrics lookup by artist and title
#[async_trait]
pub trait LyricsApi: Send + Sync {
    async fn fetch_lyrics(
        &self,
        artist: &str,
        title: &str,
    ) -> Result<LyricsRecord, AggregationError>;
}

/// Music news search
#[async_trait]
pub trait NewsApi: Send + Sync {
    async fn fetch_music_news(
        &self,
        kind: NewsKind,
        country: &str,
        genre: Option<&str>,
        limit: u32,
    ) -> Result<NewsResult, AggregationError>;
}

/// Chart lookups
#[async_trait]
pub trait TrendsApi: Send + Sync {
    async fn top_tracks(
        &self,
        limit: u32,
        period: Option<ChartPeriod>,
    ) -> Result<Vec<TrendTrack>, AggregationError>;

    async fn top_artists(
        &self,
        limit: u32,
        period: Option<ChartPeriod>,
    ) -> Result<Vec<TrendArtist>, AggregationError>;
}

/// Secondary per-track information used for enrichment
#[async_trait]
pub trait TrackInfoApi: Send + Sync {
    async fn track_info(
        &self,
        artist: &str,
        title: &str,
    ) -> Result<TrackMetadata, AggregationError>;
}

// Implement traits for real clients

#[async_trait]
impl LyricsApi for LyricsClient {
    async fn fetch_lyrics(
        &self,
        artist: &str,
        title: &str,
    ) -> Result<LyricsRecord, AggregationError> {
        self.fetch_lyrics(artist, title).await
    }
}

#[async_trait]
impl NewsApi for NewsClient {
    async fn fetch_music_news(
        &self,
        kind: NewsKind,
        country: &str,
        genre: Option<&str>,
        limit: u32,
    ) -> Result<NewsResult, AggregationError> {
        self.fetch_music_news(kind, country, genre, limit).await
    }
}

#[async_trait]
impl TrendsApi for LastfmClient {
    async fn top_tracks(
        &self,
        limit: u32,
        period: Option<ChartPeriod>,
    ) -> Result<Vec<TrendTrack>, AggregationError> {
        self.top_tracks(limit, period).await
    }

    async fn top_artists(
        &self,
        limit: u32,
        period: Option<ChartPeriod>,
    ) -> Result<Vec<TrendArtist>, AggregationError> {
        self.top_artists(limit, period).await
    }
}

#[async_trait]
impl TrackInfoApi for LastfmClient {
    async fn track_info(
        &self,
        artist: &str,
        title: &str,
    ) -> Result<TrackMetadata, AggregationError> {
        self.track_info(artist, title).await
    }
}

/// Canned provider implementations for testing.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use crate::aggregation::domain::{FailureKind, LyricsStatus, NewsArticle, Provider};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A classified upstream error for `provider`
    pub fn upstream_error(provider: Provider, kind: FailureKind) -> AggregationError {
        AggregationError::Upstream {
            message: crate::aggregation::classify::describe(&kind, provider),
            provider,
            kind,
        }
    }

    /// Mock lyrics provider.
    pub struct MockLyrics {
        pub result: Result<LyricsRecord, AggregationError>,
    }

    impl MockLyrics {
        /// Lyrics found with the given text
        pub fn found(artist: &str, title: &str, text: &str) -> Self {
            let analysis = crate::aggregation::lyrics::analyze(text);
            Self {
                result: Ok(LyricsRecord {
                    artist: artist.to_string(),
                    title: title.to_string(),
                    raw_lyrics: text.to_string(),
                    line_count: analysis.lines.len(),
                    verse_count: analysis.verse_count,
                    word_count: analysis.word_count,
                    has_chorus: analysis.has_chorus,
                    cleaned_lyrics: analysis.cleaned,
                    lines: analysis.lines,
                    status: LyricsStatus::Found,
                    source: crate::aggregation::lyrics::SOURCE.to_string(),
                    metadata: None,
                }),
            }
        }

        pub fn not_found(artist: &str, title: &str) -> Self {
            Self {
                result: Ok(LyricsRecord::without_lyrics(
                    artist,
                    title,
                    LyricsStatus::NotFound,
                    crate::aggregation::lyrics::SOURCE,
                )),
            }
        }

        pub fn with_error(error: AggregationError) -> Self {
            Self { result: Err(error) }
        }
    }

    #[async_trait]
    impl LyricsApi for MockLyrics {
        async fn fetch_lyrics(
            &self,
            _artist: &str,
            _title: &str,
        ) -> Result<LyricsRecord, AggregationError> {
            self.result.clone()
        }
    }

    /// Mock news provider. Records the last requested limit.
    pub struct MockNews {
        pub articles: Vec<NewsArticle>,
        pub error: Option<AggregationError>,
        pub last_limit: Mutex<Option<u32>>,
    }

    impl MockNews {
        pub fn with_titles(titles: &[&str]) -> Self {
            Self {
                articles: titles
                    .iter()
                    .map(|t| NewsArticle {
                        title: t.to_string(),
                        ..Default::default()
                    })
                    .collect(),
                error: None,
                last_limit: Mutex::new(None),
            }
        }

        pub fn with_error(error: AggregationError) -> Self {
            Self {
                articles: vec![],
                error: Some(error),
                last_limit: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl NewsApi for MockNews {
        async fn fetch_music_news(
            &self,
            _kind: NewsKind,
            _country: &str,
            _genre: Option<&str>,
            limit: u32,
        ) -> Result<NewsResult, AggregationError> {
            *self.last_limit.lock().unwrap() = Some(limit);
            if let Some(ref err) = self.error {
                return Err(err.clone());
            }
            Ok(NewsResult::new(self.articles.clone()))
        }
    }

    /// Mock chart provider. Counts calls so tests can check validation
    /// happens before any request.
    #[derive(Default)]
    pub struct MockTrends {
        pub tracks: Vec<TrendTrack>,
        pub artists: Vec<TrendArtist>,
        pub calls: AtomicUsize,
        pub last_request: Mutex<Option<(u32, Option<ChartPeriod>)>>,
    }

    impl MockTrends {
        pub fn with_tracks(names: &[&str]) -> Self {
            Self {
                tracks: names
                    .iter()
                    .enumerate()
                    .map(|(i, n)| TrendTrack {
                        rank: i + 1,
                        name: n.to_string(),
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }
        }

        pub fn with_artists(names: &[&str]) -> Self {
            Self {
                artists: names
                    .iter()
                    .enumerate()
                    .map(|(i, n)| TrendArtist {
                        rank: i + 1,
                        name: n.to_string(),
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn record(&self, limit: u32, period: Option<ChartPeriod>) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some((limit, period));
        }
    }

    #[async_trait]
    impl TrendsApi for MockTrends {
        async fn top_tracks(
            &self,
            limit: u32,
            period: Option<ChartPeriod>,
        ) -> Result<Vec<TrendTrack>, AggregationError> {
            self.record(limit, period);
            Ok(self.tracks.clone())
        }

        async fn top_artists(
            &self,
            limit: u32,
            period: Option<ChartPeriod>,
        ) -> Result<Vec<TrendArtist>, AggregationError> {
            self.record(limit, period);
            Ok(self.artists.clone())
        }
    }

    /// Mock track info provider.
    pub struct MockTrackInfo {
        pub result: Result<TrackMetadata, AggregationError>,
        pub calls: AtomicUsize,
    }

    impl MockTrackInfo {
        pub fn with_album(album: &str) -> Self {
            Self {
                result: Ok(TrackMetadata {
                    album: Some(album.to_string()),
                    ..Default::default()
                }),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_error(error: AggregationError) -> Self {
            Self {
                result: Err(error),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TrackInfoApi for MockTrackInfo {
        async fn track_info(
            &self,
            _artist: &str,
            _title: &str,
        ) -> Result<TrackMetadata, AggregationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_lyrics_found() {
            let mock = MockLyrics::found("A", "B", "hello world");
            let record = mock.fetch_lyrics("A", "B").await.unwrap();
            assert!(record.is_found());
            assert_eq!(record.word_count, 2);
        }

        #[tokio::test]
        async fn test_mock_news_error() {
            let mock = MockNews::with_error(upstream_error(Provider::News, FailureKind::RateLimited));
            let err = mock
                .fetch_music_news(NewsKind::Everything, "us", None, 5)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), Some(&FailureKind::RateLimited));
            assert_eq!(*mock.last_limit.lock().unwrap(), Some(5));
        }

        #[tokio::test]
        async fn test_mock_trends_counts_calls() {
            let mock = MockTrends::with_tracks(&["x", "y"]);
            let tracks = mock.top_tracks(2, None).await.unwrap();
            assert_eq!(tracks.len(), 2);
            assert_eq!(mock.call_count(), 1);
        }
    }
}
