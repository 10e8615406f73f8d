//! Request URL construction.
//!
//! Providers either take query parameters (NewsAPI, Last.fm) or encode
//! their arguments as path segments (lyrics.ovh). Both shapes are built here
//! so adapters never concatenate raw user input into a URL.

use std::collections::BTreeMap;

use ::url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

fn parse_base(base_url: &str) -> Result<Url, UrlError> {
    let url = Url::parse(base_url).map_err(|e| UrlError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(UrlError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: "URL cannot carry a path".to_string(),
        });
    }

    Ok(url)
}

/// Join `endpoint` onto `base_url` and append the non-empty `params`.
///
/// Exactly one `/` separates the base path from the endpoint, even when the
/// endpoint is empty. Parameters with an empty value are dropped entirely.
/// The query string is form-encoded and sorted by key, so the same inputs
/// always produce the same URL.
pub fn build_api_url<I, K, V>(base_url: &str, endpoint: &str, params: I) -> Result<String, UrlError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = parse_base(base_url)?;

    let path = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    url.set_path(&path);

    let mut query: BTreeMap<String, String> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    for (key, value) in params {
        let value = value.as_ref();
        if !value.is_empty() {
            query.insert(key.as_ref().to_string(), value.to_string());
        }
    }

    if query.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(query.iter());
    }

    Ok(url.into())
}

/// Append percent-encoded path segments to `base_url`.
///
/// Each segment is trimmed first. Used for providers that take their
/// arguments in the path, e.g. `{base}/{artist}/{title}`.
pub fn path_url(base_url: &str, segments: &[&str]) -> Result<String, UrlError> {
    parse_base(base_url)?;

    let encoded: Vec<String> = segments
        .iter()
        .map(|s| urlencoding::encode(s.trim()).into_owned())
        .collect();

    Ok(format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        encoded.join("/")
    ))
}
