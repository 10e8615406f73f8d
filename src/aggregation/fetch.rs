//! Retrying JSON fetch client.
//!
//! Every provider call goes through [`FetchClient::get_json`]:
//! 1. GET the URL with the request headers, bounded by the per-attempt timeout
//! 2. On a transport error or non-2xx status, wait a fixed backoff and retry
//! 3. Decode a 2xx body as JSON into the caller's type
//!
//! The backoff is fixed rather than exponential to bound the worst-case
//! latency of a synchronous caller: `max_attempts × timeout + (max_attempts - 1) × backoff`.
//!
//! The network sits behind [`HttpTransport`] so adapters can be exercised
//! against scripted responses. Production code uses [`ReqwestTransport`],
//! which should be built once and shared to benefit from connection pooling.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Delay between attempts
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

/// User agent string sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A single GET request. Built per call, never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    url: String,
    headers: HashMap<String, String>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// URL without its query string, safe to log (queries carry API keys)
    fn log_target(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }
}

/// How many times to try, and how long each try may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one (treated as at least 1)
    pub max_attempts: u32,
    /// Deadline for a single attempt, body included
    pub timeout: Duration,
    /// Fixed delay between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Policy with `retries` retries after the first attempt and the default backoff
    pub fn new(timeout: Duration, retries: u32) -> Self {
        Self {
            max_attempts: retries + 1,
            timeout,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Upper bound on how long a fetch can block its caller
    pub fn worst_case(&self) -> Duration {
        let attempts = self.max_attempts.max(1);
        self.timeout * attempts + self.backoff * (attempts - 1)
    }
}

/// Raw HTTP response as seen by the retry loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a fetch failed, before classification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request timeout: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Transport(String),

    /// Display format is matched on by message-based classification.
    /// `url` has its query removed.
    #[error("non-2xx response code: {code} | url: {url}")]
    Status { code: u16, url: String },

    #[error("failed to decode response body: {0}")]
    Decode(String),
}

/// One GET round-trip. Implementations must not retry on their own.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(
        &self,
        request: &FetchRequest,
        timeout: Duration,
    ) -> Result<RawResponse, FetchError>;
}

/// [`HttpTransport`] backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build the shared client.
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses
    /// - Send a User-Agent header identifying the application
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

/// The URL is stripped so API keys in the query never reach messages or logs.
/// Status errors get the same treatment in [`FetchClient::get_json`].
fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    let e = e.without_url();
    if e.is_timeout() {
        FetchError::Timeout(e.to_string())
    } else if e.is_connect() {
        FetchError::Connect(e.to_string())
    } else if e.is_decode() {
        FetchError::Decode(e.to_string())
    } else {
        FetchError::Transport(e.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        request: &FetchRequest,
        timeout: Duration,
    ) -> Result<RawResponse, FetchError> {
        let mut builder = self.client.get(request.url()).timeout(timeout);
        for (key, value) in request.headers() {
            builder = builder.header(key, value);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        Ok(RawResponse { status, body })
    }
}

/// Retrying GET + JSON decode over a shared transport.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient").finish_non_exhaustive()
    }
}

impl FetchClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Client over a freshly built [`ReqwestTransport`]
    pub fn with_reqwest() -> Result<Self, reqwest::Error> {
        Ok(Self::new(Arc::new(ReqwestTransport::new()?)))
    }

    /// Fetch `request` and decode a successful body into `T`.
    ///
    /// Decode failures are not retried: a 2xx response with a malformed
    /// body will not get better on a second try.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        request: &FetchRequest,
        policy: &RetryPolicy,
    ) -> Result<T, FetchError> {
        let body = self.get_with_retry(request, policy).await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn get_with_retry(
        &self,
        request: &FetchRequest,
        policy: &RetryPolicy,
    ) -> Result<Vec<u8>, FetchError> {
        let attempts = policy.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            debug!(
                attempt,
                max_attempts = attempts,
                url = request.log_target(),
                "Sending request"
            );

            let outcome =
                tokio::time::timeout(policy.timeout, self.transport.get(request, policy.timeout))
                    .await
                    .unwrap_or_else(|_| {
                        Err(FetchError::Timeout(format!(
                            "context deadline exceeded after {:?}",
                            policy.timeout
                        )))
                    });

            match outcome {
                Ok(response) if response.is_success() => return Ok(response.body),
                Ok(response) => {
                    warn!(
                        status = response.status,
                        attempt,
                        url = request.log_target(),
                        "Upstream returned non-2xx status"
                    );
                    last_error = Some(FetchError::Status {
                        code: response.status,
                        url: request.log_target().to_string(),
                    });
                }
                Err(e) => {
                    warn!(error = %e, attempt, url = request.log_target(), "Request failed");
                    last_error = Some(e);
                }
            }

            if attempt < attempts {
                debug!(delay_ms = policy.backoff.as_millis() as u64, "Retrying after delay");
                tokio::time::sleep(policy.backoff).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| FetchError::Transport("no attempt was made".to_string())))
    }
}

/// Scripted transport for exercising the retry loop and the adapters.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// What the transport does on one call
    #[derive(Debug, Clone)]
    pub enum Scripted {
        Respond { status: u16, body: String },
        Fail(FetchError),
        /// Never answers; only the client's deadline ends the attempt
        Hang,
    }

    impl Scripted {
        pub fn json(body: &str) -> Self {
            Scripted::Respond {
                status: 200,
                body: body.to_string(),
            }
        }

        pub fn status(status: u16) -> Self {
            Scripted::Respond {
                status,
                body: String::new(),
            }
        }
    }

    /// Plays back scripted outcomes in order; the last one repeats forever.
    pub struct ScriptedTransport {
        script: Mutex<VecDeque<Scripted>>,
        calls: Mutex<Vec<(String, Instant)>>,
    }

    impl ScriptedTransport {
        pub fn new(script: Vec<Scripted>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn always(outcome: Scripted) -> Arc<Self> {
            Self::new(vec![outcome])
        }

        /// URLs requested so far, in order
        pub fn urls(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|(u, _)| u.clone()).collect()
        }

        /// Start time of each call
        pub fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn next(&self) -> Scripted {
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front().unwrap()
            } else {
                script.front().cloned().unwrap_or(Scripted::Hang)
            }
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn get(
            &self,
            request: &FetchRequest,
            _timeout: Duration,
        ) -> Result<RawResponse, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((request.url().to_string(), Instant::now()));

            match self.next() {
                Scripted::Respond { status, body } => Ok(RawResponse {
                    status,
                    body: body.into_bytes(),
                }),
                Scripted::Fail(e) => Err(e),
                Scripted::Hang => std::future::pending().await,
            }
        }
    }

    pub fn client_over(transport: &Arc<ScriptedTransport>) -> FetchClient {
        FetchClient::new(transport.clone())
    }
}
