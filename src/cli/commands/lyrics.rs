//! Lyrics lookup command.

use serde_json::json;
use tokio::runtime::Runtime;
use tracing::info;

use super::{Cli, build_aggregator, load_config, override_key, print_json};
use crate::error::{Result, ResultExt};

/// Fetch lyrics, optionally with Last.fm track info, and print them
pub fn cmd_lyrics(
    rt: &Runtime,
    cli: &Cli,
    artist: &str,
    title: &str,
    with_metadata: bool,
    raw: bool,
    lastfm_api_key: Option<&str>,
) -> Result<()> {
    let mut config = load_config(cli);
    override_key(&mut config.credentials.lastfm_api_key, lastfm_api_key);
    let aggregator = build_aggregator(&config)?;

    let record = rt
        .block_on(aggregator.fetch_lyrics_with_metadata(artist, title, with_metadata))
        .with_context(format!("lyrics for '{artist} - {title}'"))?;

    info!(
        status = ?record.status,
        lines = record.line_count,
        has_metadata = record.metadata.is_some(),
        "Lyrics fetched"
    );

    if raw {
        if record.is_found() {
            println!("{}", record.cleaned_lyrics);
        } else {
            eprintln!("No lyrics found for {artist} - {title}");
        }
        return Ok(());
    }

    print_json(&json!({ "lyrics": record }))
}
