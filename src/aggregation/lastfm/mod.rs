//! Last.fm integration
//!
//! Charts (top tracks, top artists) and per-track info from
//! https://ws.audioscrobbler.com/2.0. All calls go to the API root with a
//! `method` parameter and require an API key.

mod adapter;
mod client;
pub mod dto;
pub mod period;

pub use client::{DEFAULT_BASE_URL, LastfmClient};
pub use period::ChartPeriod;
