//! NewsAPI integration
//!
//! Music news from https://newsapi.org. Requires an API key.
//!
//! Relevance is enforced twice: once by the boolean query sent upstream and
//! once locally by [`RelevanceFilter`], because keyword search upstream
//! returns false positives.

mod adapter;
mod client;
pub mod dto;
pub mod filter;
pub mod query;

pub use client::{DEFAULT_BASE_URL, NewsClient};
pub use filter::RelevanceFilter;
pub use query::NewsKind;
