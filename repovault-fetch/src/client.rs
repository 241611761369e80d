//! Rate-gated API client.
//!
//! One outbound GET at a time: every call funnels through the same retry
//! loop, which honors the forge's rate-limit headers and logs each attempt
//! and delay so an operator can see where a run is stuck.

use reqwest::header::{self, HeaderMap};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::retry::{FailureClass, RetryPolicy};

/// HTTP client for the forge API with rate-limit-aware retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Client,
    auth_header: String,
    config: FetchConfig,
}

impl ApiClient {
    /// Creates a client that authenticates with the given token.
    ///
    /// No request timeout is configured; a hung request is bounded only by
    /// the transport's own limits, matching the strictly sequential model.
    pub fn new(token: &str, config: FetchConfig) -> Result<Self, FetchError> {
        let inner = Client::builder()
            .user_agent(concat!("repovault/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner,
            auth_header: format!("token {token}"),
            config,
        })
    }

    /// Returns the fetch configuration this client was built with.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Resolves a resource path against the API origin.
    ///
    /// Absolute URLs (asset hosts, `comments_url` fields) pass through
    /// untouched; everything else gets the base origin prefixed.
    fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{path}", self.config.base_url)
        }
    }

    /// Performs a GET request, retrying per the configured policy.
    pub async fn get(&self, path: &str) -> Result<Response, FetchError> {
        self.get_with_headers(path, HeaderMap::new()).await
    }

    /// Performs a GET request with extra headers merged onto the
    /// authorization header.
    #[instrument(skip(self, extra_headers), fields(path = %path))]
    pub async fn get_with_headers(
        &self,
        path: &str,
        extra_headers: HeaderMap,
    ) -> Result<Response, FetchError> {
        let url = self.resolve_url(path);
        let max_attempts = self.config.retry.max_attempts;
        let mut last = String::new();

        for attempt in 1..=max_attempts {
            debug!(url = %url, attempt, "GET request");

            let result = self
                .inner
                .get(&url)
                .header(header::AUTHORIZATION, &self.auth_header)
                .headers(extra_headers.clone())
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    debug!(status = %response.status(), "response received");
                    return Ok(response);
                }
                Ok(response) => {
                    let status = response.status();
                    let (remaining, limit) = rate_limit_headers(response.headers());
                    let class = RetryPolicy::classify_response(remaining);

                    warn!(status = %status, attempt, "request failed");
                    if class == FailureClass::RateLimited {
                        warn!(limit = ?limit, "API rate limit exhausted");
                    }

                    last = format!("HTTP {status}");
                    self.wait_before_retry(attempt, class).await;
                }
                Err(e) => {
                    warn!(error = %e, attempt, "transport failure");
                    last = e.to_string();
                    self.wait_before_retry(attempt, FailureClass::Transport).await;
                }
            }
        }

        Err(FetchError::RetriesExhausted {
            attempts: max_attempts,
            last,
        })
    }

    /// Performs a GET request and deserializes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let response = self.get(path).await?;
        Ok(response.json().await?)
    }

    /// Sleeps out the backoff for a failed attempt, unless it was the last.
    async fn wait_before_retry(&self, attempt: u32, class: FailureClass) {
        if attempt < self.config.retry.max_attempts {
            let delay = self.config.retry.delay_for(class);
            warn!(delay_ms = delay.as_millis() as u64, "waiting before retry");
            tokio::time::sleep(delay).await;
        }
    }
}

/// Parses the rate-limit budget headers from a response.
///
/// Returns `(remaining, limit)`; either is `None` when the header is
/// missing or malformed.
fn rate_limit_headers(headers: &HeaderMap) -> (Option<u64>, Option<u64>) {
    let parse = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    };
    (parse("x-ratelimit-remaining"), parse("x-ratelimit-limit"))
}
