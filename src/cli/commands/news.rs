//! Music news command.

use serde_json::json;
use tokio::runtime::Runtime;

use super::{Cli, build_aggregator, load_config, override_key, print_json};
use crate::aggregation::NewsKind;
use crate::error::{Result, ResultExt};

/// Search music news and print the filtered articles
pub fn cmd_news(
    rt: &Runtime,
    cli: &Cli,
    kind: &str,
    country: &str,
    genre: Option<&str>,
    limit: u32,
    api_key: Option<&str>,
) -> Result<()> {
    let mut config = load_config(cli);
    override_key(&mut config.credentials.news_api_key, api_key);
    if config.credentials.news_api_key.is_none() {
        tracing::warn!("No NewsAPI key configured; set NEWS_API_KEY or add it to the config file");
    }
    let aggregator = build_aggregator(&config)?;

    let kind = kind.parse::<NewsKind>().unwrap_or_default();
    let news = rt
        .block_on(aggregator.fetch_music_news(kind, country, genre, limit))
        .with_context("music news")?;

    print_json(&json!({ "news": news }))
}
