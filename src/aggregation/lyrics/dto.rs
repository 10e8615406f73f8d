//! lyrics.ovh Data Transfer Objects
//!
//! These types match what `GET /v1/{artist}/{title}` returns.
//! DO NOT use these types outside the lyrics module - convert to domain types.
//!
//! Found: `{"lyrics": "First line\nSecond line"}`
//! Missing: `{"error": "No lyrics found"}` (usually with a 404 status)

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LyricsResponse {
    #[serde(default)]
    pub lyrics: Option<String>,
    /// Set by the provider when it has nothing for the song
    #[serde(default)]
    pub error: Option<String>,
}
