//! Failure classification.
//!
//! Reduces a raw [`FetchError`] to one [`FailureKind`] plus a message scoped
//! to the provider. Classification looks at the outcome (status code first,
//! then message text) rather than at which error type was produced, because
//! providers and transports report the same condition in different shapes.

use super::domain::{AggregationError, FailureKind, Provider};
use super::fetch::FetchError;

/// A classified failure ready to show to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: FailureKind,
    pub message: String,
}

impl Classification {
    pub fn into_error(self, provider: Provider) -> AggregationError {
        AggregationError::Upstream {
            provider,
            kind: self.kind,
            message: self.message,
        }
    }
}

/// Classify a failed fetch against `provider`.
pub fn classify(error: &FetchError, provider: Provider) -> Classification {
    let kind = match error {
        FetchError::Timeout(_) => FailureKind::Timeout,
        FetchError::Connect(_) => FailureKind::NetworkUnreachable,
        FetchError::Status { code, .. } => {
            kind_for_status(*code).unwrap_or_else(|| FailureKind::UpstreamError {
                status_code: Some(*code),
                message: error.to_string(),
            })
        }
        FetchError::Decode(message) => FailureKind::DecodeError {
            message: message.clone(),
        },
        FetchError::Transport(message) => {
            classify_message(message).unwrap_or_else(|| FailureKind::UpstreamError {
                status_code: None,
                message: message.clone(),
            })
        }
    };

    let message = describe(&kind, provider);
    Classification { kind, message }
}

/// Shorthand for `classify(..).into_error(provider)`
pub fn to_error(error: &FetchError, provider: Provider) -> AggregationError {
    classify(error, provider).into_error(provider)
}

/// Semantic kind for a well-known HTTP status
pub fn kind_for_status(code: u16) -> Option<FailureKind> {
    match code {
        404 => Some(FailureKind::UpstreamNotFound),
        401 => Some(FailureKind::Unauthorized),
        429 => Some(FailureKind::RateLimited),
        408 | 504 => Some(FailureKind::Timeout),
        _ => None,
    }
}

/// Classify from message text alone.
///
/// Returns `None` when the text carries no recognizable signal.
pub fn classify_message(text: &str) -> Option<FailureKind> {
    let lower = text.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if has(&["timeout", "timed out", "deadline exceeded"]) {
        Some(FailureKind::Timeout)
    } else if has(&[
        "connection refused",
        "no such host",
        "dns error",
        "failed to lookup address",
    ]) {
        Some(FailureKind::NetworkUnreachable)
    } else if has(&["non-2xx response code: 404"]) {
        Some(FailureKind::UpstreamNotFound)
    } else if has(&[
        "non-2xx response code: 401",
        "unauthorized",
        "invalid api key",
        "authentication",
    ]) {
        Some(FailureKind::Unauthorized)
    } else if has(&["non-2xx response code: 429", "rate limit", "too many requests"]) {
        Some(FailureKind::RateLimited)
    } else {
        None
    }
}

/// User-facing message for `kind`
pub fn describe(kind: &FailureKind, provider: Provider) -> String {
    let service = provider.service_name();
    match kind {
        FailureKind::Timeout => format!(
            "request timeout: the {service} service is taking too long to respond. Please try again later."
        ),
        FailureKind::NetworkUnreachable => format!(
            "network error: unable to connect to {service} service. Please try again later."
        ),
        FailureKind::UpstreamNotFound => format!("{service} resource not found"),
        FailureKind::Unauthorized => format!("{service} service authentication error"),
        FailureKind::RateLimited => {
            format!("{service} service rate limit exceeded. Please try again later.")
        }
        FailureKind::UpstreamError { message, .. } => {
            format!("failed to fetch {service}: {message}")
        }
        FailureKind::DecodeError { message } => {
            format!("failed to fetch {service}: invalid response body ({message})")
        }
    }
}
