//! Platform fetchers: discovery and retrieval of raw project data.
//!
//! # Architecture
//!
//! - [`Fetcher`] - Async trait each hosting platform implements
//! - [`FetcherRegistry`] - Platform key to fetcher map built from configuration
//! - [`discover`] - Lazy, resumable stream of [`ProjectRef`]s over [`Fetcher::search_page`]
//! - [`GitHubFetcher`], [`OshwaFetcher`], [`ThingiverseFetcher`], [`AppropediaFetcher`],
//!   [`UrlFetcher`], [`ManifestsRepoFetcher`] - the built-in platforms
//!
//! # Example
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use krawl_core::fetcher::{FetcherDefaults, build_default_fetcher_registry};
//! use krawl_core::request::{RateLimit, RateLimiter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let limiter = Arc::new(RateLimiter::new(RateLimit::new(1, Duration::from_secs(1))));
//! let registry = build_default_fetcher_registry(&BTreeMap::new(), &FetcherDefaults::default(), limiter);
//!
//! let (fetcher, project) = registry.find_for_url("https://example.org/okh.toml")?;
//! let fetched = fetcher.fetch(&project).await?;
//! println!("{} bytes from {}", fetched.payload.bytes.len(), fetched.meta.source_url);
//! # Ok(())
//! # }
//! ```

mod appropedia;
mod discover;
mod error;
mod generic_url;
mod github;
mod manifests_repo;
mod oshwa;
mod registry;
mod thingiverse;

pub use appropedia::AppropediaFetcher;
pub use discover::{DiscoverOptions, DiscoveryError, discover};
pub use error::FetchError;
pub use generic_url::UrlFetcher;
pub use github::GitHubFetcher;
pub use manifests_repo::ManifestsRepoFetcher;
pub use oshwa::OshwaFetcher;
pub use registry::{
    FetcherRegistry, RegistryError, build_default_fetcher_registry, canonical_platform,
};
pub use thingiverse::ThingiverseFetcher;

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::{FetchedProject, ProjectRef, SourcingProcedure};
use crate::request::{DEFAULT_RETRIES, RateLimit, RetryPolicy};

/// Default per-request timeout when neither config nor fetcher sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

static MANIFEST_STEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^(.+\.)?okh([_\-:.][0-9a-zA-Z:._\-]+)?$").expect("manifest stem regex is valid")
});

const MANIFEST_SUFFIXES: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Returns true if the last path segment is an accepted manifest file name,
/// e.g. `okh.toml`, `lamp.okh.yml` or `okh-lamp.json`.
#[must_use]
pub fn is_accepted_manifest_name(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let Some((stem, suffix)) = file_name.rsplit_once('.') else {
        return false;
    };
    MANIFEST_SUFFIXES.contains(&suffix.to_ascii_lowercase().as_str())
        && MANIFEST_STEM_PATTERN.is_match(stem)
}

/// Discovery continuation state, persisted between pages.
///
/// Each fetcher decides what goes inside (page number, offset, API token).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchCursor(pub serde_json::Value);

impl SearchCursor {
    #[must_use]
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Reads an unsigned integer field.
    #[must_use]
    pub fn u64_field(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(serde_json::Value::as_u64)
    }

    /// Reads a string field.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }
}

/// One page of discovery results.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub refs: Vec<ProjectRef>,
    /// Cursor for the following page; `None` when discovery is complete.
    pub next: Option<SearchCursor>,
}

impl SearchPage {
    /// A final page.
    #[must_use]
    pub fn last(refs: Vec<ProjectRef>) -> Self {
        Self { refs, next: None }
    }
}

/// Priority used when several fetchers accept the same URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FetcherPriority {
    /// Platform-specific fetchers.
    Specialized = 0,
    /// Generic URL passthrough.
    Fallback = 1,
}

/// Per-fetcher settings as written in the config file. Unset values fall back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetcherSettings {
    pub retries: Option<u32>,
    /// Seconds.
    pub timeout: Option<u64>,
    pub access_token: Option<String>,
    pub rate_limit: Option<RateLimit>,
    /// Seed URLs for the generic URL fetcher.
    pub urls: Vec<String>,
    /// Checkout directory for the manifests-repo fetcher.
    pub scrape_dir: Option<PathBuf>,
}

/// Global fallbacks applied beneath [`FetcherSettings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetcherDefaults {
    pub retries: Option<u32>,
    pub timeout: Option<Duration>,
}

/// Built-in values a fetcher ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinDefaults {
    pub timeout: Duration,
    pub rate_limit: RateLimit,
}

/// Fully resolved configuration for one fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    pub retries: u32,
    pub timeout: Duration,
    pub access_token: Option<String>,
    pub rate_limit: RateLimit,
    pub urls: Vec<String>,
    pub scrape_dir: Option<PathBuf>,
}

impl FetcherConfig {
    /// Resolves settings: per-fetcher, then global defaults, then built-ins.
    #[must_use]
    pub fn resolve(
        settings: &FetcherSettings,
        defaults: &FetcherDefaults,
        builtin: &BuiltinDefaults,
    ) -> Self {
        Self {
            retries: settings
                .retries
                .or(defaults.retries)
                .unwrap_or(DEFAULT_RETRIES),
            timeout: settings
                .timeout
                .map(Duration::from_secs)
                .or(defaults.timeout)
                .unwrap_or(builtin.timeout),
            access_token: settings
                .access_token
                .as_ref()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            rate_limit: settings.rate_limit.unwrap_or(builtin.rate_limit),
            urls: settings.urls.clone(),
            scrape_dir: settings.scrape_dir.clone(),
        }
    }

    /// Retry policy for calls made on behalf of this fetcher.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from_retries(self.retries)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            timeout: DEFAULT_TIMEOUT,
            access_token: None,
            rate_limit: RateLimit::new(1, Duration::from_secs(1)),
            urls: Vec::new(),
            scrape_dir: None,
        }
    }
}

/// A hosting platform the crawler can discover and fetch projects from.
///
/// # Object Safety
///
/// Uses `async_trait` so the registry can hold `Arc<dyn Fetcher>`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Platform key, e.g. `oshwa.org`.
    fn platform(&self) -> &'static str;

    /// How this fetcher's data is obtained.
    fn sourcing_procedure(&self) -> SourcingProcedure;

    fn priority(&self) -> FetcherPriority {
        FetcherPriority::Specialized
    }

    /// Returns true if `url` points at a project on this platform.
    fn can_handle(&self, url: &Url) -> bool;

    /// Derives the project identity from a project URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fatal`] if the URL does not name a project.
    fn project_ref_for_url(&self, url: &Url) -> Result<ProjectRef, FetchError>;

    /// Fetches one page of discovery results, starting at `cursor`.
    async fn search_page(&self, cursor: Option<&SearchCursor>) -> Result<SearchPage, FetchError>;

    /// Retrieves one project's raw payload.
    async fn fetch(&self, project: &ProjectRef) -> Result<FetchedProject, FetchError>;
}

/// Parses a URL, mapping failures to [`FetchError::Fatal`].
pub(crate) fn parse_url(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw).map_err(|e| FetchError::fatal(raw, format!("invalid URL: {e}")))
}

/// Joins `path` onto `base`, keeping any path prefix the base already has.
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, FetchError> {
    let mut joined = base.as_str().trim_end_matches('/').to_string();
    joined.push('/');
    joined.push_str(path.trim_start_matches('/'));
    parse_url(&joined)
}

/// Returns the configured token or a construction error naming the platform.
pub(crate) fn require_token(config: &FetcherConfig, platform: &str) -> Result<String, FetchError> {
    config.access_token.clone().ok_or_else(|| {
        FetchError::fatal(
            platform,
            "an access token is required; set `access_token` under this fetcher in the config",
        )
    })
}

/// Lowercased host with any `www.` prefix removed.
pub(crate) fn bare_host(url: &Url) -> Option<String> {
    url.host_str()
        .map(|h| h.trim_start_matches("www.").to_ascii_lowercase())
}
