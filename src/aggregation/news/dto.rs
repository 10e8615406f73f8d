//! NewsAPI Data Transfer Objects
//!
//! These types match what `/v2/everything` and `/v2/top-headlines` return.
//! DO NOT use these types outside the news module - convert to domain types.
//!
//! Example response:
//! ```json
//! {
//!   "status": "ok",
//!   "totalResults": 1,
//!   "articles": [{
//!     "source": {"id": null, "name": "Pitchfork"},
//!     "author": "Jane Doe",
//!     "title": "New album announced",
//!     "description": "...",
//!     "url": "https://...",
//!     "urlToImage": "https://...",
//!     "publishedAt": "2024-05-01T12:00:00Z",
//!     "content": "..."
//!   }]
//! }
//! ```
//!
//! Errors come back as `{"status": "error", "code": "apiKeyInvalid", "message": "..."}`.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    pub status: String,
    /// Upstream's own count; ignored in favor of the filtered length
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Source,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Source {
    pub id: Option<String>,
    pub name: Option<String>,
}
