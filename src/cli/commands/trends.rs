//! Chart command.

use serde_json::json;
use tokio::runtime::Runtime;

use super::{Cli, TrendType, build_aggregator, load_config, override_key, print_json};
use crate::error::{Result, ResultExt};

/// Fetch the top tracks or top artists chart and print it
pub fn cmd_trends(
    rt: &Runtime,
    cli: &Cli,
    kind: TrendType,
    period: Option<&str>,
    limit: u32,
    api_key: Option<&str>,
) -> Result<()> {
    let mut config = load_config(cli);
    override_key(&mut config.credentials.lastfm_api_key, api_key);
    if config.credentials.lastfm_api_key.is_none() {
        tracing::warn!(
            "No Last.fm API key configured; set LASTFM_API_KEY or add it to the config file"
        );
    }
    let aggregator = build_aggregator(&config)?;

    let trends = match kind {
        TrendType::Tracks => {
            let tracks = rt
                .block_on(aggregator.fetch_top_tracks(limit, period))
                .with_context("top tracks")?;
            json!(tracks)
        }
        TrendType::Artists => {
            let artists = rt
                .block_on(aggregator.fetch_top_artists(limit, period))
                .with_context("top artists")?;
            json!(artists)
        }
    };

    print_json(&json!({ "trends": trends }))
}
