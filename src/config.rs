//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\music-digest\config.toml
//! - macOS: ~/Library/Application Support/music-digest/config.toml
//! - Linux: ~/.config/music-digest/config.toml
//!
//! The config file is human-readable and editable. Every section is
//! optional; missing values fall back to the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::aggregation::{AggregatorConfig, RetryPolicy, lastfm, lyrics, news};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Provider base URLs
    pub endpoints: Endpoints,

    /// Per-provider timeouts and retries
    pub fetch: FetchConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// NewsAPI key for music news
    pub news_api_key: Option<String>,

    /// Last.fm API key for charts and track info
    pub lastfm_api_key: Option<String>,
}

/// Provider base URLs. Override to point at a proxy or a local stub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub lyrics: String,
    pub news: String,
    pub lastfm: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            lyrics: lyrics::DEFAULT_BASE_URL.to_string(),
            news: news::DEFAULT_BASE_URL.to_string(),
            lastfm: lastfm::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Retry settings for each provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub lyrics: FetchSettings,
    pub news: FetchSettings,
    /// Last.fm charts and track info
    pub trends: FetchSettings,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            lyrics: FetchSettings::with_timeout(5),
            news: FetchSettings::with_timeout(8),
            trends: FetchSettings::with_timeout(8),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Deadline for one attempt
    pub timeout_secs: u64,

    /// Total attempts including the first
    pub max_attempts: u32,

    /// Delay between attempts
    pub backoff_ms: u64,
}

impl FetchSettings {
    fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            timeout_secs,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy_or(&Self::default())
    }

    /// Retry policy; a zero timeout falls back to `fallback`'s
    pub fn policy_or(&self, fallback: &FetchSettings) -> RetryPolicy {
        let timeout_secs = if self.timeout_secs == 0 {
            tracing::warn!(
                fallback_secs = fallback.timeout_secs,
                "timeout_secs = 0 would fail every request, using default"
            );
            fallback.timeout_secs
        } else {
            self.timeout_secs
        };

        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            timeout: Duration::from_secs(timeout_secs),
            backoff: Duration::from_millis(self.backoff_ms),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 8,
            max_attempts: 2,
            backoff_ms: 1000,
        }
    }
}

impl Config {
    /// Settings for [`Aggregator`](crate::aggregation::Aggregator).
    ///
    /// Missing credentials become empty keys; the provider rejects them and
    /// the failure surfaces as an authentication error.
    pub fn aggregator_config(&self) -> AggregatorConfig {
        let defaults = FetchConfig::default();
        AggregatorConfig {
            lyrics_base_url: self.endpoints.lyrics.clone(),
            news_base_url: self.endpoints.news.clone(),
            lastfm_base_url: self.endpoints.lastfm.clone(),
            news_api_key: self.credentials.news_api_key.clone().unwrap_or_default(),
            lastfm_api_key: self.credentials.lastfm_api_key.clone().unwrap_or_default(),
            lyrics_policy: self.fetch.lyrics.policy_or(&defaults.lyrics),
            news_policy: self.fetch.news.policy_or(&defaults.news),
            trends_policy: self.fetch.trends.policy_or(&defaults.trends),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-digest"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from `path`, falling back to defaults
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to `path`, creating parent directories as needed
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
