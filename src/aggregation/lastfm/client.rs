//! Last.fm HTTP client
//!
//! Every method is a GET against the API root:
//! `{base}/?method=<name>&api_key=<key>&format=json&...`

use serde::de::DeserializeOwned;
use tracing::debug;

use super::period::ChartPeriod;
use super::{adapter, dto};
use crate::aggregation::classify;
use crate::aggregation::domain::{
    AggregationError, Provider, TrackMetadata, TrendArtist, TrendTrack,
};
use crate::aggregation::fetch::{FetchClient, FetchRequest, RetryPolicy};
use crate::aggregation::url;

/// Default endpoint
pub const DEFAULT_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0";

/// Last.fm API client
#[derive(Debug, Clone)]
pub struct LastfmClient {
    fetch: FetchClient,
    base_url: String,
    api_key: String,
    policy: RetryPolicy,
}

impl LastfmClient {
    pub fn new(
        fetch: FetchClient,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            fetch,
            base_url: base_url.into(),
            api_key: api_key.into(),
            policy,
        }
    }

    /// Top tracks chart, in chart order
    pub async fn top_tracks(
        &self,
        limit: u32,
        period: Option<ChartPeriod>,
    ) -> Result<Vec<TrendTrack>, AggregationError> {
        let response: dto::TopTracksResponse = self
            .call("chart.gettoptracks", &chart_params(limit, period), Provider::Trends)
            .await?;
        adapter::to_tracks(response)
    }

    /// Top artists chart, in chart order
    pub async fn top_artists(
        &self,
        limit: u32,
        period: Option<ChartPeriod>,
    ) -> Result<Vec<TrendArtist>, AggregationError> {
        let response: dto::TopArtistsResponse = self
            .call("chart.gettopartists", &chart_params(limit, period), Provider::Trends)
            .await?;
        adapter::to_artists(response)
    }

    /// Album, tags, and wiki summary for one track
    pub async fn track_info(
        &self,
        artist: &str,
        title: &str,
    ) -> Result<TrackMetadata, AggregationError> {
        let params = [
            ("artist", artist.trim().to_string()),
            ("track", title.trim().to_string()),
            ("autocorrect", "1".to_string()),
        ];
        let response: dto::TrackInfoResponse =
            self.call("track.getinfo", &params, Provider::TrackInfo).await?;
        adapter::to_metadata(response)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
        provider: Provider,
    ) -> Result<T, AggregationError> {
        let common = [
            ("method", method),
            ("api_key", self.api_key.as_str()),
            ("format", "json"),
        ];
        let all = common
            .into_iter()
            .chain(params.iter().map(|(k, v)| (*k, v.as_str())));
        let url = url::build_api_url(&self.base_url, "", all)?;

        debug!(method, "Calling Last.fm");

        self.fetch
            .get_json::<T>(&FetchRequest::get(url), &self.policy)
            .await
            .map_err(|e| classify::to_error(&e, provider))
    }
}

fn chart_params(limit: u32, period: Option<ChartPeriod>) -> Vec<(&'static str, String)> {
    vec![
        ("limit", limit.to_string()),
        ("period", period.map(|p| p.as_str().to_string()).unwrap_or_default()),
    ]
}
