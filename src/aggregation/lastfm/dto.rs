//! Last.fm API Data Transfer Objects
//!
//! These types match what the Last.fm 2.0 JSON API returns.
//! DO NOT use these types outside the lastfm module - convert to domain types.
//!
//! API Reference: https://www.last.fm/api
//!
//! Last.fm quirks handled here:
//! - counts and durations arrive as strings (`"playcount": "12345"`)
//! - a list with one element may arrive as a bare object
//! - failures can come back with a 200 status and `{"error": 6, "message": "..."}`

use serde::{Deserialize, Deserializer};

/// Fields present on every response when the call failed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    pub error: Option<i64>,
    pub message: Option<String>,
}

/// `chart.gettoptracks` response
#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Option<TracksContainer>,
    #[serde(flatten)]
    pub failure: ApiError,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TracksContainer {
    #[serde(default, deserialize_with = "one_or_many")]
    pub track: Vec<ChartTrack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartTrack {
    #[serde(default)]
    pub name: String,
    /// Seconds; "0" when unknown
    #[serde(default, deserialize_with = "lenient_u64")]
    pub duration: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub playcount: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub listeners: u64,
    #[serde(default)]
    pub mbid: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub artist: ArtistRef,
    #[serde(default, deserialize_with = "one_or_many")]
    pub image: Vec<Image>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mbid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// `chart.gettopartists` response
#[derive(Debug, Clone, Deserialize)]
pub struct TopArtistsResponse {
    pub artists: Option<ArtistsContainer>,
    #[serde(flatten)]
    pub failure: ApiError,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistsContainer {
    #[serde(default, deserialize_with = "one_or_many")]
    pub artist: Vec<ChartArtist>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartArtist {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub playcount: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub listeners: u64,
    #[serde(default)]
    pub mbid: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub image: Vec<Image>,
}

/// Artwork entry: `{"#text": "https://...", "size": "large"}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Image {
    #[serde(rename = "#text", default)]
    pub url: String,
    #[serde(default)]
    pub size: String,
}

/// `track.getinfo` response
#[derive(Debug, Clone, Deserialize)]
pub struct TrackInfoResponse {
    pub track: Option<TrackInfo>,
    #[serde(flatten)]
    pub failure: ApiError,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackInfo {
    #[serde(default)]
    pub name: String,
    /// Milliseconds; "0" when unknown
    #[serde(default, deserialize_with = "lenient_u64")]
    pub duration: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub playcount: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub listeners: u64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub album: Option<Album>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub toptags: TopTags,
    #[serde(default)]
    pub wiki: Option<Wiki>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub image: Vec<Image>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopTags {
    #[serde(default, deserialize_with = "one_or_many")]
    pub tag: Vec<Tag>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wiki {
    #[serde(default)]
    pub summary: Option<String>,
}

// ============================================================================
// Lenient deserializers
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
    Float(f64),
}

/// Accept `123`, `"123"`, `null` or garbage; anything unparseable is 0
fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer).unwrap_or(None);
    Ok(match value {
        Some(NumberOrText::Number(n)) => n,
        Some(NumberOrText::Text(s)) => s.trim().parse().unwrap_or(0),
        Some(NumberOrText::Float(f)) if f.is_finite() && f >= 0.0 => f as u64,
        _ => 0,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Accept a list, a single object, or `null`
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagsOrText {
    Tags(TopTags),
    Text(String),
}

/// Tracks without tags send `"toptags": ""` instead of an object
fn lenient_tags<'de, D>(deserializer: D) -> Result<TopTags, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TagsOrText>::deserialize(deserializer)? {
        Some(TagsOrText::Tags(tags)) => tags,
        _ => TopTags::default(),
    })
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_top_tracks() {
        let json = r##"{
            "tracks": {
                "track": [{
                    "name": "Espresso",
                    "duration": "175",
                    "playcount": "12345678",
                    "listeners": "987654",
                    "mbid": "",
                    "url": "https://www.last.fm/music/Sabrina+Carpenter/_/Espresso",
                    "streamable": {"#text": "0", "fulltrack": "0"},
                    "artist": {"name": "Sabrina Carpenter", "mbid": "abc", "url": "https://www.last.fm/music/Sabrina+Carpenter"},
                    "image": [
                        {"#text": "https://img/s.png", "size": "small"},
                        {"#text": "https://img/m.png", "size": "medium"}
                    ]
                }],
                "@attr": {"page": "1", "perPage": "50", "totalPages": "1", "total": "1"}
            }
        }"##;

        let resp: TopTracksResponse = serde_json::from_str(json).expect("Should parse top tracks");
        let tracks = resp.tracks.expect("tracks container").track;
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Espresso");
        assert_eq!(tracks[0].duration, 175);
        assert_eq!(tracks[0].playcount, 12_345_678);
        assert_eq!(tracks[0].artist.name, "Sabrina Carpenter");
        assert_eq!(tracks[0].image[1].size, "medium");
        assert!(resp.failure.error.is_none());
    }

    #[test]
    fn test_parse_numbers_as_numbers_or_garbage() {
        let json = r#"{"name": "x", "playcount": 42, "listeners": "n/a", "duration": null}"#;
        let track: ChartTrack = serde_json::from_str(json).expect("Should parse lenient numbers");
        assert_eq!(track.playcount, 42);
        assert_eq!(track.listeners, 0);
        assert_eq!(track.duration, 0);
    }

    #[test]
    fn test_parse_single_artist_object() {
        let json = r#"{"artists": {"artist": {"name": "Solo", "playcount": "1", "listeners": "2", "url": "u"}}}"#;
        let resp: TopArtistsResponse = serde_json::from_str(json).expect("Should parse single artist");
        let artists = resp.artists.expect("artists container").artist;
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].name, "Solo");
        assert_eq!(artists[0].listeners, 2);
    }

    #[test]
    fn test_parse_error_body() {
        let json = r#"{"error": 10, "message": "Invalid API key - You must be granted a valid key by last.fm", "links": []}"#;
        let resp: TopTracksResponse = serde_json::from_str(json).expect("Should parse error body");
        assert!(resp.tracks.is_none());
        assert_eq!(resp.failure.error, Some(10));
    }

    #[test]
    fn test_parse_track_info() {
        let json = r##"{
            "track": {
                "name": "Believe",
                "duration": "240000",
                "listeners": "1000",
                "playcount": "5000",
                "url": "https://www.last.fm/music/Cher/_/Believe",
                "album": {
                    "artist": "Cher",
                    "title": "Believe",
                    "image": [{"#text": "https://img/l.png", "size": "large"}]
                },
                "toptags": {"tag": [{"name": "pop", "url": "u"}, {"name": "dance", "url": "u"}]},
                "wiki": {"published": "27 Jul 2008", "summary": "A song.", "content": "A long song."}
            }
        }"##;

        let resp: TrackInfoResponse = serde_json::from_str(json).expect("Should parse track info");
        let track = resp.track.expect("track");
        assert_eq!(track.duration, 240_000);
        assert_eq!(track.album.as_ref().map(|a| a.title.as_str()), Some("Believe"));
        assert_eq!(track.toptags.tag.len(), 2);
        assert_eq!(track.wiki.and_then(|w| w.summary).as_deref(), Some("A song."));
    }

    #[test]
    fn test_parse_track_info_without_tags() {
        let json = r#"{"track": {"name": "Obscure", "toptags": ""}}"#;
        let resp: TrackInfoResponse = serde_json::from_str(json).expect("Should parse empty tags");
        let track = resp.track.expect("track");
        assert!(track.toptags.tag.is_empty());
        assert!(track.album.is_none());
    }
}
