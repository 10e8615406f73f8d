//! Adapter layer: Convert NewsAPI DTOs to domain types
//!
//! This is the ONLY place where news DTOs become [`NewsArticle`]s.

use super::dto;
use crate::aggregation::domain::{AggregationError, FailureKind, NewsArticle, NewsResult, Provider};

/// Convert a decoded response into a result.
///
/// NewsAPI can answer 200 with `"status": "error"`; that body is mapped to
/// a classified error here. Upstream's `totalResults` is ignored.
pub fn to_result(response: dto::NewsApiResponse) -> Result<NewsResult, AggregationError> {
    if response.status != "ok" {
        return Err(status_error(&response));
    }

    Ok(NewsResult::new(
        response.articles.into_iter().map(to_article).collect(),
    ))
}

pub fn to_article(article: dto::Article) -> NewsArticle {
    NewsArticle {
        source_id: article.source.id.unwrap_or_default(),
        source_name: article.source.name.unwrap_or_default(),
        author: article.author.unwrap_or_default(),
        title: article.title.unwrap_or_default(),
        description: article.description.unwrap_or_default(),
        url: article.url.unwrap_or_default(),
        image_url: article.url_to_image.unwrap_or_default(),
        published_at: article.published_at.unwrap_or_default(),
        content: article.content.unwrap_or_default(),
    }
}

fn status_error(response: &dto::NewsApiResponse) -> AggregationError {
    let code = response.code.as_deref().unwrap_or_default();
    let detail = response.message.as_deref().unwrap_or(code);

    let kind = match code {
        "apiKeyInvalid" | "apiKeyMissing" | "apiKeyDisabled" | "apiKeyExhausted" => {
            FailureKind::Unauthorized
        }
        "rateLimited" => FailureKind::RateLimited,
        _ => FailureKind::UpstreamError {
            status_code: None,
            message: format!("news API error: {detail}"),
        },
    };

    AggregationError::Upstream {
        message: crate::aggregation::classify::describe(&kind, Provider::News),
        provider: Provider::News,
        kind,
    }
}
