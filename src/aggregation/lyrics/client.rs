//! lyrics.ovh HTTP client
//!
//! Arguments travel in the path: `GET {base}/{artist}/{title}`.
//! A 404 (or an `error` field in the body) means "no lyrics", which is
//! returned as a `not_found` record instead of an error.

use tracing::{debug, info};

use super::{adapter, dto};
use crate::aggregation::classify;
use crate::aggregation::domain::{AggregationError, FailureKind, LyricsRecord, Provider};
use crate::aggregation::fetch::{FetchClient, FetchRequest, RetryPolicy};
use crate::aggregation::url;

/// Default endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.lyrics.ovh/v1";

/// lyrics.ovh API client
#[derive(Debug, Clone)]
pub struct LyricsClient {
    fetch: FetchClient,
    base_url: String,
    policy: RetryPolicy,
}

impl LyricsClient {
    pub fn new(fetch: FetchClient, base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            fetch,
            base_url: base_url.into(),
            policy,
        }
    }

    /// Fetch and analyze the lyrics for a song
    pub async fn fetch_lyrics(
        &self,
        artist: &str,
        title: &str,
    ) -> Result<LyricsRecord, AggregationError> {
        let url = url::path_url(&self.base_url, &[artist, title])?;
        debug!(artist, title, "Fetching lyrics");

        let response = match self
            .fetch
            .get_json::<dto::LyricsResponse>(&FetchRequest::get(url), &self.policy)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let classification = classify::classify(&e, Provider::Lyrics);
                if classification.kind == FailureKind::UpstreamNotFound {
                    info!(artist, title, "No lyrics available");
                    return Ok(adapter::not_found(artist, title));
                }
                return Err(classification.into_error(Provider::Lyrics));
            }
        };

        let record = adapter::to_record(artist, title, response);
        debug!(
            status = ?record.status,
            lines = record.line_count,
            "Lyrics processed"
        );
        Ok(record)
    }
}
