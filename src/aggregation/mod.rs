//! Music data aggregation - lyrics, news and charts from third-party APIs.
//!
//! # Architecture
//!
//! Same layering for every provider:
//! - **Domain models** (`domain.rs`) - our types, independent of any API
//! - **API DTOs** (`lyrics/dto.rs`, `news/dto.rs`, `lastfm/dto.rs`) - exact response shapes
//! - **Adapters** - convert DTOs to domain models
//! - **Clients** - build URLs and call the shared [`FetchClient`]
//! - **Service** - [`Aggregator`], the operations front-ends call
//!
//! Shared plumbing:
//! - `url.rs` builds request URLs
//! - `fetch.rs` runs requests with a per-attempt timeout and fixed-delay retries
//! - `classify.rs` turns a failed fetch into a [`FailureKind`] and a message
//!
//! # Usage
//!
//! ```ignore
//! use music_digest::aggregation::{Aggregator, AggregatorConfig};
//!
//! let aggregator = Aggregator::new(AggregatorConfig::default())?;
//! let record = aggregator.fetch_lyrics("Queen", "Bohemian Rhapsody").await?;
//! println!("{} lines, chorus: {}", record.line_count, record.has_chorus);
//! ```

pub mod classify;
pub mod domain;
pub mod fetch;
pub mod lastfm;
pub mod lyrics;
pub mod news;
pub mod service;
pub mod traits;
pub mod url;

pub use domain::{
    AggregationError, FailureKind, Image, LyricsRecord, LyricsStatus, NewsArticle, NewsResult,
    Provider, StatusHint, TrackMetadata, TrendArtist, TrendTrack,
};
pub use fetch::{FetchClient, RetryPolicy};
pub use lastfm::ChartPeriod;
pub use news::NewsKind;
pub use service::{Aggregator, AggregatorConfig};
