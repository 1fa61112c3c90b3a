//! Error types for fetchers.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while discovering or fetching a project.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The project (or page) no longer exists.
    #[error("not found: {url}")]
    NotFound {
        /// What was requested.
        url: String,
    },

    /// The platform asked us to slow down, or the local limiter timed out.
    #[error("rate limited fetching {url}")]
    RateLimited {
        url: String,
        /// Suggested delay before the next attempt.
        retry_after: Option<Duration>,
    },

    /// Network failures, timeouts and 5xx responses.
    #[error("transient error fetching {url}: {reason}")]
    Transient { url: String, reason: String },

    /// Bad credentials, unsupported responses and anything retrying cannot fix.
    #[error("fatal error fetching {url}: {reason}")]
    Fatal { url: String, reason: String },

    /// A retryable error persisted past the last attempt.
    #[error("gave up after {attempts} attempts: {last}")]
    ExhaustedRetries {
        attempts: u32,
        #[source]
        last: Box<FetchError>,
    },
}

impl FetchError {
    pub fn not_found(url: impl Into<String>) -> Self {
        Self::NotFound { url: url.into() }
    }

    pub fn rate_limited(url: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self::RateLimited {
            url: url.into(),
            retry_after,
        }
    }

    pub fn transient(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Transient {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn fatal(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fatal {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Wraps the last error of a retry loop.
    #[must_use]
    pub fn exhausted(attempts: u32, last: FetchError) -> Self {
        Self::ExhaustedRetries {
            attempts,
            last: Box::new(last),
        }
    }

    /// Maps a reqwest transport error. Everything at this level is retryable
    /// except malformed requests.
    #[must_use]
    pub fn from_reqwest(url: impl Into<String>, error: &reqwest::Error) -> Self {
        if error.is_builder() {
            Self::fatal(url, error.to_string())
        } else if error.is_timeout() {
            Self::transient(url, "request timed out")
        } else {
            Self::transient(url, error.to_string())
        }
    }

    /// Whether the retry policy may try again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Transient { .. })
    }

    /// Server-suggested delay, if any.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// The innermost error, looking through `ExhaustedRetries`.
    #[must_use]
    pub fn root(&self) -> &FetchError {
        match self {
            Self::ExhaustedRetries { last, .. } => last.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(FetchError::transient("u", "boom").is_retryable());
        assert!(FetchError::rate_limited("u", None).is_retryable());
        assert!(!FetchError::not_found("u").is_retryable());
        assert!(!FetchError::fatal("u", "bad token").is_retryable());
        assert!(!FetchError::exhausted(3, FetchError::transient("u", "x")).is_retryable());
    }

    #[test]
    fn test_root_unwraps_exhausted() {
        let error = FetchError::exhausted(4, FetchError::transient("u", "503"));
        assert!(matches!(error.root(), FetchError::Transient { .. }));
    }

    #[test]
    fn test_retry_after_only_on_rate_limited() {
        let error = FetchError::rate_limited("https://api.example.org", Some(Duration::from_secs(7)));
        assert_eq!(error.retry_after(), Some(Duration::from_secs(7)));
        assert_eq!(error.to_string(), "rate limited fetching https://api.example.org");
        assert_eq!(FetchError::transient("u", "x").retry_after(), None);
    }
}
