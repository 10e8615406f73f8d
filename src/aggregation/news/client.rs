//! NewsAPI HTTP client

use tracing::{debug, info};

use super::filter::RelevanceFilter;
use super::query::{self, NewsKind};
use super::{adapter, dto};
use crate::aggregation::classify;
use crate::aggregation::domain::{AggregationError, NewsResult, Provider};
use crate::aggregation::fetch::{FetchClient, FetchRequest, RetryPolicy};
use crate::aggregation::url;

/// Default endpoint
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// NewsAPI client
#[derive(Debug, Clone)]
pub struct NewsClient {
    fetch: FetchClient,
    base_url: String,
    api_key: String,
    policy: RetryPolicy,
    filter: RelevanceFilter,
}

impl NewsClient {
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
            filter: RelevanceFilter::default(),
        }
    }

    /// Replace the default relevance filter
    pub fn with_filter(mut self, filter: RelevanceFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Search for music news.
    ///
    /// `country` only applies to headlines. The returned articles have
    /// already passed the local relevance filter.
    pub async fn fetch_music_news(
        &self,
        kind: NewsKind,
        country: &str,
        genre: Option<&str>,
        limit: u32,
    ) -> Result<NewsResult, AggregationError> {
        let mut params = query::search_params(kind, country, genre, limit);
        params.push(("apiKey", self.api_key.clone()));
        let url = url::build_api_url(&self.base_url, kind.endpoint(), params)?;

        debug!(?kind, country, genre, limit, "Fetching music news");

        let response = self
            .fetch
            .get_json::<dto::NewsApiResponse>(&FetchRequest::get(url), &self.policy)
            .await
            .map_err(|e| classify::to_error(&e, Provider::News))?;

        let mut result = adapter::to_result(response)?;
        let received = result.total_results();
        self.filter.apply(&mut result);

        info!(
            received,
            kept = result.total_results(),
            "Music news filtered"
        );
        Ok(result)
    }
}
