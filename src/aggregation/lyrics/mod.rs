//! lyrics.ovh integration
//!
//! Free lyrics lookup by artist and title, no API key required.
//! API: https://lyricsovh.docs.apiary.io

mod adapter;
pub mod analyzer;
mod client;
pub mod dto;

pub use analyzer::{LyricsAnalysis, analyze};
pub use client::{DEFAULT_BASE_URL, LyricsClient};

/// Source label attached to every lyrics record
pub const SOURCE: &str = "lyrics.ovh";
