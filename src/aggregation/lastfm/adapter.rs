//! Adapter layer: Convert Last.fm DTOs to domain types
//!
//! This is the ONLY place where Last.fm DTOs become domain types, and the
//! only place that understands Last.fm's in-body error codes.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::dto;
use crate::aggregation::classify;
use crate::aggregation::domain::{
    AggregationError, FailureKind, Image, Provider, TrackMetadata, TrendArtist, TrendTrack,
};

/// HTML tags Last.fm embeds in wiki summaries (the "Read more" link)
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("html tag pattern is valid"));

pub fn to_tracks(response: dto::TopTracksResponse) -> Result<Vec<TrendTrack>, AggregationError> {
    check_failure(&response.failure, Provider::Trends)?;
    let container = response
        .tracks
        .ok_or_else(|| missing_field("tracks", Provider::Trends))?;

    Ok(container
        .track
        .into_iter()
        .enumerate()
        .map(|(i, track)| TrendTrack {
            rank: i + 1,
            name: track.name,
            artist_name: track.artist.name,
            play_count: track.playcount,
            listener_count: track.listeners,
            duration_secs: non_zero(track.duration),
            musicbrainz_id: non_empty(track.mbid),
            url: track.url,
            images: to_images(track.image),
        })
        .collect())
}

pub fn to_artists(
    response: dto::TopArtistsResponse,
) -> Result<Vec<TrendArtist>, AggregationError> {
    check_failure(&response.failure, Provider::Trends)?;
    let container = response
        .artists
        .ok_or_else(|| missing_field("artists", Provider::Trends))?;

    Ok(container
        .artist
        .into_iter()
        .enumerate()
        .map(|(i, artist)| TrendArtist {
            rank: i + 1,
            name: artist.name,
            play_count: artist.playcount,
            listener_count: artist.listeners,
            musicbrainz_id: non_empty(artist.mbid),
            url: artist.url,
            images: to_images(artist.image),
        })
        .collect())
}

pub fn to_metadata(response: dto::TrackInfoResponse) -> Result<TrackMetadata, AggregationError> {
    check_failure(&response.failure, Provider::TrackInfo)?;
    let track = response
        .track
        .ok_or_else(|| missing_field("track", Provider::TrackInfo))?;

    let (album, images) = match track.album {
        Some(album) => (non_empty(Some(album.title)), to_images(album.image)),
        None => (None, Vec::new()),
    };

    Ok(TrackMetadata {
        album,
        duration_ms: non_zero(track.duration),
        play_count: track.playcount,
        listeners: track.listeners,
        url: non_empty(track.url),
        images,
        tags: to_tags(track.toptags),
        summary: track.wiki.and_then(|w| w.summary).and_then(|s| clean_summary(&s)),
    })
}

/// Map Last.fm's in-body error codes onto failure kinds.
///
/// See https://www.last.fm/api/errorcodes
pub fn kind_for_error_code(code: i64, message: &str) -> FailureKind {
    match code {
        4 | 9 | 10 | 14 | 26 => FailureKind::Unauthorized,
        29 => FailureKind::RateLimited,
        6 => FailureKind::UpstreamNotFound,
        _ => FailureKind::UpstreamError {
            status_code: None,
            message: format!("Last.fm error {code}: {message}"),
        },
    }
}

fn check_failure(failure: &dto::ApiError, provider: Provider) -> Result<(), AggregationError> {
    let Some(code) = failure.error else {
        return Ok(());
    };

    let kind = kind_for_error_code(code, failure.message.as_deref().unwrap_or_default());
    Err(AggregationError::Upstream {
        message: classify::describe(&kind, provider),
        provider,
        kind,
    })
}

fn missing_field(field: &str, provider: Provider) -> AggregationError {
    let kind = FailureKind::DecodeError {
        message: format!("missing field `{field}`"),
    };
    AggregationError::Upstream {
        message: classify::describe(&kind, provider),
        provider,
        kind,
    }
}

/// Artwork in provider order; entries without a URL are dropped
fn to_images(images: Vec<dto::Image>) -> Vec<Image> {
    images
        .into_iter()
        .filter(|img| !img.url.trim().is_empty())
        .map(|img| Image {
            url: img.url,
            size_label: img.size,
        })
        .collect()
}

/// Tag names in provider order, trimmed, first occurrence wins
fn to_tags(tags: dto::TopTags) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.tag
        .into_iter()
        .map(|t| t.name.trim().to_string())
        .filter(|name| !name.is_empty() && seen.insert(name.to_lowercase()))
        .collect()
}

fn clean_summary(summary: &str) -> Option<String> {
    let text = HTML_TAG.replace_all(summary, "");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_zero(value: u64) -> Option<u64> {
    (value > 0).then_some(value)
}
