//! Local relevance filter for news articles.
//!
//! An article passes when its title or description mentions at least one
//! allowed term and none of the denied terms. Matching is a case-insensitive
//! substring check, so short terms like "pop" also match inside longer words.

use crate::aggregation::domain::{NewsArticle, NewsResult};

const MUSIC_KEYWORDS: &[&str] = &[
    "music", "musician", "singer", "band", "album", "song", "artist", "concert",
    "festival", "grammy", "billboard", "spotify", "apple music", "streaming",
    "tour", "recording", "label", "producer", "rapper", "hip hop", "rock", "pop",
    "jazz", "classical", "country", "r&b", "electronic", "indie", "metal",
];

const EXCLUDE_KEYWORDS: &[&str] = &[
    "politics", "election", "government", "sports", "football", "basketball",
    "baseball", "soccer", "business merger", "stock market", "economy",
];

/// Allowlist/denylist filter over article title and description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceFilter {
    allow: Vec<String>,
    deny: Vec<String>,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(MUSIC_KEYWORDS.iter().copied(), EXCLUDE_KEYWORDS.iter().copied())
    }
}

impl RelevanceFilter {
    pub fn new<A, D>(allow: A, deny: D) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        Self {
            allow: allow.into_iter().map(|k| k.as_ref().to_lowercase()).collect(),
            deny: deny.into_iter().map(|k| k.as_ref().to_lowercase()).collect(),
        }
    }

    /// Add terms to the allowlist
    pub fn allow_more<I>(mut self, terms: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.allow
            .extend(terms.into_iter().map(|k| k.as_ref().to_lowercase()));
        self
    }

    pub fn is_relevant(&self, article: &NewsArticle) -> bool {
        let content = format!("{} {}", article.title, article.description).to_lowercase();
        let mentions = |terms: &[String]| terms.iter().any(|t| content.contains(t.as_str()));

        mentions(&self.allow) && !mentions(&self.deny)
    }

    /// Drop irrelevant articles in place; the result's count follows
    pub fn apply(&self, result: &mut NewsResult) {
        result.retain(|article| self.is_relevant(article));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_music_article_is_kept() {
        let filter = RelevanceFilter::default();
        assert!(filter.is_relevant(&article("New Music Friday", "")));
        assert!(filter.is_relevant(&article("Weekend roundup", "A new ALBUM drops")));
    }

    #[test]
    fn test_excluded_term_drops_article() {
        let filter = RelevanceFilter::default();
        assert!(!filter.is_relevant(&article("Music and politics collide", "")));
        assert!(!filter.is_relevant(&article("Band plays", "at the football final")));
    }

    #[test]
    fn test_unrelated_article_is_dropped() {
        let filter = RelevanceFilter::default();
        assert!(!filter.is_relevant(&article("Weather update", "Sunny skies ahead")));
    }

    #[test]
    fn test_apply_recounts() {
        let filter = RelevanceFilter::default();
        let mut result = NewsResult::new(vec![
            article("Music festival lineup", ""),
            article("Music and politics", ""),
            article("Quarterly earnings", ""),
            article("Singer announces tour", ""),
        ]);

        filter.apply(&mut result);

        assert_eq!(result.total_results(), 2);
        assert_eq!(result.total_results(), result.articles().len());
        assert_eq!(result.articles()[0].title, "Music festival lineup");
        assert_eq!(result.articles()[1].title, "Singer announces tour");
    }

    #[test]
    fn test_custom_terms() {
        let filter = RelevanceFilter::new(["opera"], ["gossip"]).allow_more(["ballet"]);
        assert!(filter.is_relevant(&article("Opera night", "")));
        assert!(filter.is_relevant(&article("Ballet season", "")));
        assert!(!filter.is_relevant(&article("Opera gossip", "")));
        assert!(!filter.is_relevant(&article("New album", "")));
    }
}
