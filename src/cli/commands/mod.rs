//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `lyrics`: Lyrics lookup with optional track info
//! - `news`: Music news search
//! - `trends`: Last.fm charts
//! - `setup`: Config file location and initialization

mod lyrics;
mod news;
mod setup;
mod trends;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::error;

use crate::aggregation::Aggregator;
use crate::config::{self, Config};
use crate::error::Result;

pub use lyrics::cmd_lyrics;
pub use news::cmd_news;
pub use setup::{cmd_config_path, cmd_init_config};
pub use trends::cmd_trends;

/// Music Digest CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the one in the OS config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Chart to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TrendType {
    #[default]
    Tracks,
    Artists,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and analyze song lyrics
    Lyrics {
        /// Artist name
        #[arg(short, long)]
        artist: String,
        /// Song title
        #[arg(short, long, visible_alias = "song")]
        title: String,
        /// Attach album, tags and wiki summary from Last.fm
        #[arg(long)]
        metadata: bool,
        /// Print only the cleaned lyrics text
        #[arg(long)]
        raw: bool,
        /// Last.fm API key for --metadata (or set LASTFM_API_KEY env var)
        #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
        lastfm_api_key: Option<String>,
    },
    /// Search music news
    News {
        /// Search mode: "headlines" or "everything" (anything else means everything)
        #[arg(long = "type", default_value = "everything")]
        kind: String,
        /// Country for headlines (ISO 3166-1 alpha-2)
        #[arg(long, default_value = "us")]
        country: String,
        /// Narrow results to a genre
        #[arg(long)]
        genre: Option<String>,
        /// Maximum number of articles to request
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=100))]
        limit: u32,
        /// NewsAPI key (or set NEWS_API_KEY env var)
        #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// Fetch the Last.fm charts
    Trends {
        /// Chart to fetch
        #[arg(long = "type", value_enum, default_value_t = TrendType::Tracks)]
        kind: TrendType,
        /// Time window: 7day, 1month, 3month, 6month, 12month, overall
        #[arg(long)]
        period: Option<String>,
        /// Maximum number of chart entries
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: u32,
        /// Last.fm API key (or set LASTFM_API_KEY env var)
        #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// Print the config file location
    ConfigPath,
    /// Write a config file with the default settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the specified CLI command.
///
/// Failures are logged with the HTTP status a server front-end would
/// answer with, then returned for `main` to report.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    let result = match &cli.command {
        Commands::Lyrics {
            artist,
            title,
            metadata,
            raw,
            lastfm_api_key,
        } => cmd_lyrics(
            &rt,
            cli,
            artist,
            title,
            *metadata,
            *raw,
            lastfm_api_key.as_deref(),
        ),
        Commands::News {
            kind,
            country,
            genre,
            limit,
            api_key,
        } => cmd_news(
            &rt,
            cli,
            kind,
            country,
            genre.as_deref(),
            *limit,
            api_key.as_deref(),
        ),
        Commands::Trends {
            kind,
            period,
            limit,
            api_key,
        } => cmd_trends(&rt, cli, *kind, period.as_deref(), *limit, api_key.as_deref()),
        Commands::ConfigPath => cmd_config_path(cli),
        Commands::InitConfig { force } => cmd_init_config(cli, *force),
    };

    if let Err(ref e) = result {
        error!(status = e.status_hint().status_code(), "Command failed");
    }
    Ok(result?)
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Config file selected by `--config`, or the default location
pub(crate) fn config_file(cli: &Cli) -> Option<PathBuf> {
    cli.config.clone().or_else(config::config_path)
}

/// Load the selected config file, falling back to defaults
pub(crate) fn load_config(cli: &Cli) -> Config {
    match config_file(cli) {
        Some(path) => config::load_from(&path),
        None => config::load(),
    }
}

/// Build an aggregator from the config file
pub(crate) fn build_aggregator(config: &Config) -> Result<Aggregator> {
    Ok(Aggregator::new(config.aggregator_config())?)
}

/// Replace `slot` with `value` when a non-blank value was given
pub(crate) fn override_key(slot: &mut Option<String>, value: Option<&str>) {
    if let Some(key) = value.map(str::trim).filter(|k| !k.is_empty()) {
        *slot = Some(key.to_string());
    }
}

/// Pretty-print `value` as JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
