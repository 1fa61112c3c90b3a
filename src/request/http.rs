//! Shared HTTP client for platform fetchers.
//!
//! Every request goes through the platform's rate-limiter bucket first, and
//! every non-success response is classified into a [`FetchError`] the same
//! way regardless of platform.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, RETRY_AFTER};
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::rate_limiter::{RateLimiter, parse_rate_limit_reset, parse_retry_after};
use crate::fetcher::FetchError;
use crate::user_agent;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Body and content type of a successful response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Builds a reqwest client with the crawler's user agent and timeouts.
///
/// # Errors
///
/// Returns [`FetchError::Fatal`] when the TLS backend cannot be initialized.
pub fn build_http_client(timeout: Duration) -> Result<Client, FetchError> {
    base_builder(timeout)
        .build()
        .map_err(|e| FetchError::fatal("client", format!("HTTP client construction failed: {e}")))
}

fn base_builder(timeout: Duration) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
        .timeout(timeout)
        .user_agent(user_agent::crawler_user_agent())
        .gzip(true)
}

/// HTTP access for one platform, sharing the run's rate limiter.
#[derive(Clone)]
pub struct PlatformClient {
    client: Client,
    limiter: Arc<RateLimiter>,
    platform: String,
    timeout: Duration,
    token: Option<String>,
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("platform", &self.platform)
            .field("timeout", &self.timeout)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl PlatformClient {
    /// Creates a client for `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fatal`] if the underlying client cannot be built.
    pub fn new(
        platform: impl Into<String>,
        limiter: Arc<RateLimiter>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            limiter,
            platform: platform.into(),
            timeout,
            token: None,
        })
    }

    /// Sends `token` as a bearer credential on every request.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GETs `url` after taking a rate-limit token.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] matching the transport failure or status.
    #[instrument(skip(self), fields(platform = %self.platform, url = %url))]
    pub async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError> {
        self.limiter
            .acquire(&self.platform, self.timeout)
            .await
            .map_err(|e| FetchError::rate_limited(url.as_str(), Some(e.retry_after)))?;

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url.as_str(), &e))?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url.as_str(), &e))?;

        if !(200..300).contains(&status) {
            let error = classify_status(url.as_str(), status, &headers, &body);
            debug!(status, error = %error, "request failed");
            if let FetchError::RateLimited {
                retry_after: Some(delay),
                ..
            } = &error
            {
                self.limiter.record_rate_limit(&self.platform, *delay).await;
            }
            return Err(error);
        }

        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        debug!(status, bytes = body.len(), "request succeeded");
        Ok(HttpResponse {
            url: url.to_string(),
            content_type,
            body: body.to_vec(),
        })
    }

    /// GETs `url` and decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// As [`Self::get`]; an undecodable body is [`FetchError::Fatal`].
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        let response = self.get(url).await?;
        serde_json::from_slice(&response.body)
            .map_err(|e| FetchError::fatal(url.as_str(), format!("unsupported response: {e}")))
    }
}

/// Maps a non-success HTTP response to a [`FetchError`].
///
/// | Status | Error |
/// |--------|-------|
/// | 404, 410 | NotFound |
/// | 429 | RateLimited |
/// | 403 with rate-limit signs | RateLimited |
/// | 401, 403 | Fatal |
/// | 408, 5xx | Transient |
/// | other | Fatal |
#[must_use]
pub fn classify_status(url: &str, status: u16, headers: &HeaderMap, body: &[u8]) -> FetchError {
    match status {
        404 | 410 => FetchError::not_found(url),
        429 => FetchError::rate_limited(url, retry_after_from(headers)),
        403 if is_rate_limit_response(headers, body) => {
            FetchError::rate_limited(url, retry_after_from(headers))
        }
        401 | 403 => FetchError::fatal(url, format!("access denied (HTTP {status}), check the access token")),
        408 | 500..=599 => FetchError::transient(url, format!("HTTP {status}")),
        _ => FetchError::fatal(url, format!("HTTP {status}")),
    }
}

fn is_rate_limit_response(headers: &HeaderMap, body: &[u8]) -> bool {
    let exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");
    exhausted
        || String::from_utf8_lossy(body)
            .to_lowercase()
            .contains("rate limit")
}

fn retry_after_from(headers: &HeaderMap) -> Option<Duration> {
    if let Some(delay) = headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_retry_after)
    {
        return Some(delay);
    }
    headers
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| parse_rate_limit_reset(v, chrono::Utc::now().timestamp()))
}
