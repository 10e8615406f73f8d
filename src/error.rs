//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors (e.g., [`AggregationError`], [`ConfigError`]) for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use music_digest::error::{Result, ResultExt};
//!
//! async fn lyrics(aggregator: &Aggregator) -> Result<LyricsRecord> {
//!     aggregator
//!         .fetch_lyrics("Queen", "Bohemian Rhapsody")
//!         .await
//!         .with_context("while fetching lyrics")
//! }
//! ```

use crate::aggregation::{AggregationError, StatusHint};
use crate::config::ConfigError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Upstream lookup failed
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    /// Config could not be written
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Output could not be written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Result could not be serialized
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Suggested HTTP status class for this error.
    ///
    /// Only aggregation failures carry a meaningful hint; everything else is
    /// an internal failure.
    pub fn status_hint(&self) -> StatusHint {
        match self {
            Error::Aggregation(e) => e.status_hint(),
            Error::WithContext { source, .. } => source.status_hint(),
            _ => StatusHint::ServerError,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, AggregationError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Aggregation(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
