//! Adapter layer: Convert lyrics.ovh DTOs to domain records
//!
//! This is the ONLY place where lyrics DTOs become [`LyricsRecord`]s.

use super::{SOURCE, analyzer, dto};
use crate::aggregation::domain::{LyricsRecord, LyricsStatus};

/// Convert a lyrics response into a record.
///
/// A provider-reported error means the song is unknown, which is a normal
/// outcome rather than a failure.
pub fn to_record(artist: &str, title: &str, response: dto::LyricsResponse) -> LyricsRecord {
    if response.error.as_deref().is_some_and(|e| !e.is_empty()) {
        return not_found(artist, title);
    }

    from_text(artist, title, response.lyrics.as_deref().unwrap_or_default())
}

/// Record for a song the provider has no lyrics for
pub fn not_found(artist: &str, title: &str) -> LyricsRecord {
    LyricsRecord::without_lyrics(artist, title, LyricsStatus::NotFound, SOURCE)
}

/// Analyze raw lyrics text into a record
pub fn from_text(artist: &str, title: &str, raw: &str) -> LyricsRecord {
    let analysis = analyzer::analyze(raw);

    // Whitespace-only lyrics normalize to nothing; treat them like an empty body
    if analysis.cleaned.is_empty() {
        return LyricsRecord::without_lyrics(artist, title, LyricsStatus::Empty, SOURCE);
    }

    LyricsRecord {
        artist: artist.to_string(),
        title: title.to_string(),
        raw_lyrics: raw.to_string(),
        line_count: analysis.lines.len(),
        verse_count: analysis.verse_count,
        word_count: analysis.word_count,
        has_chorus: analysis.has_chorus,
        cleaned_lyrics: analysis.cleaned,
        lines: analysis.lines,
        status: LyricsStatus::Found,
        source: SOURCE.to_string(),
        metadata: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(lyrics: Option<&str>, error: Option<&str>) -> dto::LyricsResponse {
        dto::LyricsResponse {
            lyrics: lyrics.map(str::to_string),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_found_record() {
        let record = to_record("Artist", "Song", response(Some("one\ntwo\nthree"), None));
        assert_eq!(record.status, LyricsStatus::Found);
        assert_eq!(record.line_count, 3);
        assert_eq!(record.line_count, record.lines.len());
        assert_eq!(record.word_count, 3);
        assert_eq!(record.source, "lyrics.ovh");
        assert_eq!(record.raw_lyrics, "one\ntwo\nthree");
    }

    #[test]
    fn test_provider_error_is_not_found() {
        let record = to_record("Artist", "Song", response(None, Some("No lyrics found")));
        assert_eq!(record.status, LyricsStatus::NotFound);
        assert!(record.lines.is_empty());
        assert_eq!(record.artist, "Artist");
    }

    #[test]
    fn test_empty_lyrics() {
        let record = to_record("Artist", "Song", response(Some(""), None));
        assert_eq!(record.status, LyricsStatus::Empty);
        assert_eq!(record.word_count, 0);

        let record = to_record("Artist", "Song", response(None, None));
        assert_eq!(record.status, LyricsStatus::Empty);
    }

    #[test]
    fn test_whitespace_only_lyrics_are_empty() {
        let record = to_record("Artist", "Song", response(Some(" \r\n \n"), None));
        assert_eq!(record.status, LyricsStatus::Empty);
        assert!(record.raw_lyrics.is_empty());
    }

    #[test]
    fn test_empty_error_field_is_ignored() {
        let record = to_record("Artist", "Song", response(Some("la"), Some("")));
        assert_eq!(record.status, LyricsStatus::Found);
    }
}
