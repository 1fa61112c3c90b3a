//! Per-platform token-bucket rate limiting.
//!
//! # Overview
//!
//! Each platform gets a bucket holding up to `requests` tokens, regaining one
//! token every `per / requests`. Every outbound call takes one token first.
//! Buckets are shared by all calls to the same platform within a run.
//!
//! [`RateLimiter::acquire`] waits cooperatively (it sleeps, it does not spin)
//! and gives up with [`AcquireTimeout`] instead of blocking past the caller's
//! deadline.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use krawl_core::request::{RateLimit, RateLimiter};
//!
//! # async fn example() {
//! let limiter = Arc::new(RateLimiter::new(RateLimit::new(2, Duration::from_secs(1))));
//! limiter.set_limit("oshwa.org", RateLimit::new(1, Duration::from_secs(5)));
//!
//! limiter.acquire("oshwa.org", Duration::from_secs(10)).await.unwrap();
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use super::MAX_RETRY_AFTER;

/// Waits longer than this are logged at warn level.
const LONG_WAIT_WARNING_THRESHOLD: Duration = Duration::from_secs(30);

/// `requests` calls per `per` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    pub requests: u32,
    #[serde(rename = "per_seconds", with = "seconds")]
    pub per: Duration,
}

impl RateLimit {
    /// Creates a limit; zero requests is treated as one.
    #[must_use]
    pub fn new(requests: u32, per: Duration) -> Self {
        Self {
            requests: requests.max(1),
            per,
        }
    }

    /// Time to regain one token.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.per / self.requests.max(1)
    }
}

mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// `acquire` could not get a token before its deadline.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("rate limit for {platform} not available within timeout (next token in {}ms)", .retry_after.as_millis())]
pub struct AcquireTimeout {
    pub platform: String,
    /// Estimated wait until a token frees up.
    pub retry_after: Duration,
}

/// Token buckets keyed by platform.
///
/// Designed to be wrapped in `Arc` and shared across spawned tasks.
#[derive(Debug)]
pub struct RateLimiter {
    default_limit: RateLimit,
    disabled: bool,
    limits: DashMap<String, RateLimit>,
    /// Arc lets callers release the `DashMap` shard before awaiting the bucket.
    buckets: DashMap<String, Arc<Bucket>>,
}

#[derive(Debug)]
struct Bucket {
    limit: RateLimit,
    state: Mutex<BucketState>,
}

#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
    /// Set by a server-reported retry-after.
    blocked_until: Option<Instant>,
}

impl Bucket {
    fn new(limit: RateLimit) -> Self {
        Self {
            limit,
            state: Mutex::new(BucketState {
                tokens: f64::from(limit.requests),
                last_refill: Instant::now(),
                blocked_until: None,
            }),
        }
    }
}

impl BucketState {
    fn refill(&mut self, limit: RateLimit, now: Instant) {
        let interval = limit.interval().as_secs_f64();
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        let capacity = f64::from(limit.requests);
        if interval <= 0.0 {
            self.tokens = capacity;
        } else {
            self.tokens = (self.tokens + elapsed / interval).min(capacity);
        }
        self.last_refill = now;
    }

    /// Time until a token can be taken, zero if one is available now.
    fn wait_time(&self, limit: RateLimit, now: Instant) -> Duration {
        let blocked = self
            .blocked_until
            .map_or(Duration::ZERO, |until| until.saturating_duration_since(now));
        let for_token = if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            limit.interval().mul_f64(1.0 - self.tokens)
        };
        blocked.max(for_token)
    }
}

impl RateLimiter {
    /// Creates a limiter applying `default_limit` to platforms without their own.
    #[must_use]
    #[instrument(skip_all, fields(requests = default_limit.requests, per_ms = default_limit.per.as_millis()))]
    pub fn new(default_limit: RateLimit) -> Self {
        debug!("creating rate limiter");
        Self {
            default_limit,
            disabled: false,
            limits: DashMap::new(),
            buckets: DashMap::new(),
        }
    }

    /// Creates a limiter that never waits.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            default_limit: RateLimit::new(1, Duration::ZERO),
            disabled: true,
            limits: DashMap::new(),
            buckets: DashMap::new(),
        }
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Sets the limit for one platform. Takes effect for buckets created afterwards.
    pub fn set_limit(&self, platform: &str, limit: RateLimit) {
        self.limits.insert(platform.to_string(), limit);
    }

    /// Returns the limit that applies to `platform`.
    #[must_use]
    pub fn limit_for(&self, platform: &str) -> RateLimit {
        self.limits
            .get(platform)
            .map_or(self.default_limit, |entry| *entry)
    }

    fn bucket(&self, platform: &str) -> Arc<Bucket> {
        let limit = self.limit_for(platform);
        self.buckets
            .entry(platform.to_string())
            .or_insert_with(|| Arc::new(Bucket::new(limit)))
            .clone()
    }

    /// Takes one token for `platform`, waiting at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireTimeout`] if the bucket lock or the next token is not
    /// available before the deadline.
    #[instrument(skip(self), fields(timeout_ms = timeout.as_millis()))]
    pub async fn acquire(&self, platform: &str, timeout: Duration) -> Result<(), AcquireTimeout> {
        if self.disabled {
            return Ok(());
        }

        let bucket = self.bucket(platform);
        let deadline = Instant::now() + timeout;

        let Ok(mut state) = tokio::time::timeout(timeout, bucket.state.lock()).await else {
            debug!(platform, "timed out waiting for bucket lock");
            return Err(AcquireTimeout {
                platform: platform.to_string(),
                retry_after: bucket.limit.interval(),
            });
        };

        loop {
            let now = Instant::now();
            state.refill(bucket.limit, now);
            let wait = state.wait_time(bucket.limit, now);

            if wait.is_zero() {
                state.tokens -= 1.0;
                state.blocked_until = None;
                return Ok(());
            }

            if now + wait > deadline {
                debug!(platform, wait_ms = wait.as_millis(), "token not available before deadline");
                return Err(AcquireTimeout {
                    platform: platform.to_string(),
                    retry_after: wait,
                });
            }

            if wait >= LONG_WAIT_WARNING_THRESHOLD {
                warn!(platform, wait_secs = wait.as_secs(), "long rate limit wait");
            } else {
                debug!(platform, wait_ms = wait.as_millis(), "waiting for token");
            }
            tokio::time::sleep(wait).await;
        }
    }

    /// Blocks the platform's bucket for a server-mandated delay.
    #[instrument(skip(self), fields(delay_ms = delay.as_millis()))]
    pub async fn record_rate_limit(&self, platform: &str, delay: Duration) {
        if self.disabled {
            return;
        }
        let delay = delay.min(MAX_RETRY_AFTER);
        let bucket = self.bucket(platform);
        let mut state = bucket.state.lock().await;
        let until = Instant::now() + delay;
        if state.blocked_until.is_none_or(|current| current < until) {
            state.blocked_until = Some(until);
        }
        debug!(platform, "recorded server rate limit");
    }
}

/// Parses a `Retry-After` header value.
///
/// Accepts integer seconds or an HTTP-date. Values above one hour are capped;
/// dates in the past yield zero.
///
/// ```
/// use std::time::Duration;
/// use krawl_core::request::parse_retry_after;
///
/// assert_eq!(parse_retry_after("120"), Some(Duration::from_secs(120)));
/// assert_eq!(parse_retry_after("invalid"), None);
/// ```
#[must_use]
pub fn parse_retry_after(header_value: &str) -> Option<Duration> {
    let header_value = header_value.trim();

    if let Ok(seconds) = header_value.parse::<i64>() {
        let seconds = u64::try_from(seconds).ok()?;
        return Some(Duration::from_secs(seconds).min(MAX_RETRY_AFTER));
    }

    let datetime = httpdate::parse_http_date(header_value).ok()?;
    let delay = datetime
        .duration_since(std::time::SystemTime::now())
        .unwrap_or(Duration::ZERO);
    if delay > MAX_RETRY_AFTER {
        warn!(
            delay_secs = delay.as_secs(),
            "Retry-After date exceeds maximum, capping at 1 hour"
        );
    }
    Some(delay.min(MAX_RETRY_AFTER))
}

/// Parses an `X-RateLimit-Reset` epoch timestamp relative to `now_epoch`.
#[must_use]
pub fn parse_rate_limit_reset(header_value: &str, now_epoch: i64) -> Option<Duration> {
    let reset = header_value.trim().parse::<i64>().ok()?;
    let seconds = u64::try_from(reset.saturating_sub(now_epoch)).unwrap_or(0);
    Some(Duration::from_secs(seconds).min(MAX_RETRY_AFTER))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn limiter(requests: u32, per_secs: u64) -> RateLimiter {
        RateLimiter::new(RateLimit::new(requests, Duration::from_secs(per_secs)))
    }

    // ==================== RateLimit Tests ====================

    #[test]
    fn test_rate_limit_interval() {
        assert_eq!(
            RateLimit::new(10, Duration::from_secs(60)).interval(),
            Duration::from_secs(6)
        );
        assert_eq!(RateLimit::new(0, Duration::from_secs(5)).requests, 1);
    }

    #[test]
    fn test_rate_limit_deserializes_from_config_shape() {
        let limit: RateLimit = toml::from_str("requests = 10\nper_seconds = 60").unwrap();
        assert_eq!(limit, RateLimit::new(10, Duration::from_secs(60)));
    }

    // ==================== acquire Tests ====================

    #[tokio::test]
    async fn test_acquire_within_capacity_is_immediate() {
        tokio::time::pause();
        let limiter = limiter(3, 1);
        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire("p", Duration::from_secs(5)).await.unwrap();
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_acquire_beyond_capacity_waits_for_refill() {
        tokio::time::pause();
        let limiter = limiter(1, 2);
        let start = Instant::now();
        limiter.acquire("p", Duration::from_secs(5)).await.unwrap();
        limiter.acquire("p", Duration::from_secs(5)).await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2), "elapsed: {elapsed:?}");
        assert!(elapsed < Duration::from_millis(2100), "elapsed: {elapsed:?}");
    }

    #[tokio::test]
    async fn test_acquire_times_out_instead_of_hanging() {
        tokio::time::pause();
        let limiter = limiter(1, 60);
        limiter.acquire("p", Duration::from_secs(1)).await.unwrap();
        let error = limiter
            .acquire("p", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(error.platform, "p");
        assert!(error.retry_after > Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_platforms_do_not_share_buckets() {
        tokio::time::pause();
        let limiter = limiter(1, 60);
        limiter.acquire("a", Duration::from_secs(1)).await.unwrap();
        limiter.acquire("b", Duration::from_secs(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_platform_specific_limit_overrides_default() {
        tokio::time::pause();
        let limiter = limiter(1, 60);
        limiter.set_limit("fast", RateLimit::new(5, Duration::from_secs(1)));
        for _ in 0..5 {
            limiter.acquire("fast", Duration::ZERO).await.unwrap();
        }
        assert_eq!(limiter.limit_for("other").requests, 1);
    }

    #[tokio::test]
    async fn test_concurrent_acquire_hands_out_each_token_once() {
        tokio::time::pause();
        let limiter = Arc::new(limiter(4, 60));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                limiter.acquire("p", Duration::ZERO).await.is_ok()
            }));
        }
        let mut granted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                granted += 1;
            }
        }
        assert_eq!(granted, 4);
    }

    #[tokio::test]
    async fn test_recorded_rate_limit_blocks_platform() {
        tokio::time::pause();
        let limiter = limiter(10, 1);
        limiter.record_rate_limit("p", Duration::from_secs(3)).await;
        let error = limiter
            .acquire("p", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(error.retry_after >= Duration::from_secs(2));

        let start = Instant::now();
        limiter.acquire("p", Duration::from_secs(5)).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    // ==================== Header Parsing Tests ====================

    #[test]
    fn test_parse_retry_after_seconds() {
        assert_eq!(parse_retry_after("0"), Some(Duration::ZERO));
        assert_eq!(parse_retry_after(" 30 "), Some(Duration::from_secs(30)));
        assert_eq!(parse_retry_after("-5"), None);
        assert_eq!(parse_retry_after("999999"), Some(MAX_RETRY_AFTER));
    }

    #[test]
    fn test_parse_retry_after_http_date_in_past_is_zero() {
        assert_eq!(
            parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_parse_rate_limit_reset() {
        assert_eq!(
            parse_rate_limit_reset("1000", 990),
            Some(Duration::from_secs(10))
        );
        assert_eq!(parse_rate_limit_reset("900", 990), Some(Duration::ZERO));
        assert_eq!(parse_rate_limit_reset("soon", 990), None);
    }

    #[tokio::test]
    async fn test_disabled_limiter_never_waits() {
        let limiter = RateLimiter::disabled();
        assert!(limiter.is_disabled());
        for _ in 0..100 {
            limiter.acquire("p", Duration::ZERO).await.unwrap();
        }
    }
}
