//! Music Digest - lyrics, music news and charts from public APIs.
//!
//! The [`aggregation`] module is the core: it calls lyrics.ovh, NewsAPI and
//! Last.fm, normalizes their responses, and classifies failures. The
//! [`cli`] module is a thin front-end over it.

pub mod aggregation;
pub mod cli;
pub mod config;
pub mod error;
