//! Outbound request plumbing shared by all fetchers.
//!
//! - [`RetryPolicy`] - bounded retries with exponential backoff
//! - [`RateLimiter`] - per-platform token buckets
//! - [`PlatformClient`] - rate-limited HTTP GET with status classification

use std::time::Duration;

mod http;
mod rate_limiter;
mod retry;

pub use http::{HttpResponse, PlatformClient, build_http_client, classify_status};
pub use rate_limiter::{
    AcquireTimeout, RateLimit, RateLimiter, parse_rate_limit_reset, parse_retry_after,
};
pub use retry::{DEFAULT_RETRIES, RetryDecision, RetryPolicy};

/// Longest server-suggested delay we honor (1 hour).
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(3600);
