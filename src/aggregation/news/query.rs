//! Upstream query construction for NewsAPI.

use std::str::FromStr;

/// Any of these makes an article a music story
const MUSIC_TERMS: &str = "(music OR musician OR singer OR band OR album OR concert OR festival OR artist OR song OR Grammy OR Billboard)";

/// Any of these makes an article off-topic
const OFF_TOPIC_TERMS: &str = "(politics OR sports OR business OR technology OR health OR science)";

/// Which NewsAPI endpoint to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsKind {
    /// `top-headlines`, scoped to a country
    Headlines,
    /// `everything`, newest first, English only
    #[default]
    Everything,
}

impl NewsKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            NewsKind::Headlines => "top-headlines",
            NewsKind::Everything => "everything",
        }
    }
}

impl FromStr for NewsKind {
    type Err = std::convert::Infallible;

    /// `headlines` selects headlines; anything else falls back to everything
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.trim().eq_ignore_ascii_case("headlines") {
            NewsKind::Headlines
        } else {
            NewsKind::Everything
        })
    }
}

/// Boolean search string biased toward music, optionally narrowed by genre
pub fn music_query(genre: Option<&str>) -> String {
    let mut query = MUSIC_TERMS.to_string();
    if let Some(genre) = genre.map(str::trim).filter(|g| !g.is_empty()) {
        query.push_str(" AND ");
        query.push_str(genre);
    }
    query.push_str(" AND NOT ");
    query.push_str(OFF_TOPIC_TERMS);
    query
}

/// Query parameters for one search. The API key is added by the client.
pub fn search_params(
    kind: NewsKind,
    country: &str,
    genre: Option<&str>,
    limit: u32,
) -> Vec<(&'static str, String)> {
    let q = music_query(genre);
    let page_size = limit.to_string();

    match kind {
        NewsKind::Headlines => vec![
            ("country", country.to_string()),
            ("q", q),
            ("pageSize", page_size),
        ],
        NewsKind::Everything => vec![
            ("q", q),
            ("pageSize", page_size),
            ("sortBy", "publishedAt".to_string()),
            ("language", "en".to_string()),
        ],
    }
}
