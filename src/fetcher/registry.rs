//! Platform key to fetcher map.
//!
//! The [`FetcherRegistry`] holds one constructed fetcher per platform together
//! with its resolved configuration. Platforms whose fetcher could not be
//! built (usually a missing access token) are remembered with the reason so
//! commands can report them instead of failing with "unknown platform".

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::{
    AppropediaFetcher, BuiltinDefaults, FetchError, Fetcher, FetcherConfig, FetcherDefaults,
    FetcherSettings, GitHubFetcher, ManifestsRepoFetcher, OshwaFetcher, ThingiverseFetcher,
    UrlFetcher,
};
use crate::model::{ProjectRef, platform};
use crate::request::{RateLimit, RateLimiter, RetryPolicy};

/// Errors from registry lookups.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown platform '{platform}', available: {available}")]
    UnknownPlatform { platform: String, available: String },

    #[error("platform '{platform}' is unavailable: {reason}")]
    Unavailable { platform: String, reason: String },

    #[error("no fetcher accepts '{url}'")]
    NoFetcherForUrl { url: String },
}

type BuildFn = fn(&FetcherConfig, Arc<RateLimiter>) -> Result<Arc<dyn Fetcher>, FetchError>;

struct Factory {
    platform: &'static str,
    short_name: &'static str,
    builtin: BuiltinDefaults,
    build: BuildFn,
}

const fn builtin(timeout_secs: u64, requests: u32, per_secs: u64) -> BuiltinDefaults {
    BuiltinDefaults {
        timeout: Duration::from_secs(timeout_secs),
        rate_limit: RateLimit {
            requests,
            per: Duration::from_secs(per_secs),
        },
    }
}

const FACTORIES: [Factory; 6] = [
    Factory {
        platform: platform::GITHUB,
        short_name: "github",
        builtin: builtin(15, 10, 60),
        build: |config, limiter| Ok(Arc::new(GitHubFetcher::new(config, limiter)?)),
    },
    Factory {
        platform: platform::OSHWA,
        short_name: "oshwa",
        builtin: builtin(15, 1, 5),
        build: |config, limiter| Ok(Arc::new(OshwaFetcher::new(config, limiter)?)),
    },
    Factory {
        platform: platform::THINGIVERSE,
        short_name: "thingiverse",
        builtin: builtin(15, 1, 1),
        build: |config, limiter| Ok(Arc::new(ThingiverseFetcher::new(config, limiter)?)),
    },
    Factory {
        platform: platform::APPROPEDIA,
        short_name: "appropedia",
        builtin: builtin(30, 2, 1),
        build: |config, limiter| Ok(Arc::new(AppropediaFetcher::new(config, limiter)?)),
    },
    Factory {
        platform: platform::URL,
        short_name: "url",
        builtin: builtin(15, 5, 1),
        build: |config, limiter| Ok(Arc::new(UrlFetcher::new(config, limiter)?)),
    },
    Factory {
        platform: platform::MANIFESTS_REPO,
        short_name: "manifests-repo",
        builtin: builtin(15, 100, 1),
        build: |config, _limiter| Ok(Arc::new(ManifestsRepoFetcher::new(config)?)),
    },
];

/// Maps a platform key or its short name (`github`, `oshwa`, ...) to the key.
#[must_use]
pub fn canonical_platform(name: &str) -> Option<&'static str> {
    let name = name.trim().to_ascii_lowercase();
    FACTORIES
        .iter()
        .find(|f| f.platform == name || f.short_name == name)
        .map(|f| f.platform)
}

/// Registered fetchers keyed by platform.
pub struct FetcherRegistry {
    fetchers: BTreeMap<&'static str, Arc<dyn Fetcher>>,
    configs: BTreeMap<&'static str, FetcherConfig>,
    unavailable: BTreeMap<&'static str, String>,
}

impl FetcherRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fetchers: BTreeMap::new(),
            configs: BTreeMap::new(),
            unavailable: BTreeMap::new(),
        }
    }

    /// Registers a fetcher with its resolved configuration.
    #[tracing::instrument(skip(self, fetcher, config), fields(platform))]
    pub fn register(&mut self, fetcher: Arc<dyn Fetcher>, config: FetcherConfig) {
        let key = fetcher.platform();
        tracing::Span::current().record("platform", key);
        debug!(
            platform = key,
            retries = config.retries,
            timeout_secs = config.timeout.as_secs(),
            "Registering fetcher"
        );
        self.unavailable.remove(key);
        self.configs.insert(key, config);
        self.fetchers.insert(key, fetcher);
    }

    /// Remembers that `platform` exists but could not be constructed.
    pub fn mark_unavailable(&mut self, platform: &'static str, reason: impl Into<String>) {
        self.unavailable.insert(platform, reason.into());
    }

    /// Looks up a fetcher by platform key or short name.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Unavailable`] for platforms that failed construction,
    /// [`RegistryError::UnknownPlatform`] otherwise.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Fetcher>, RegistryError> {
        let key = canonical_platform(name).unwrap_or(name);
        if let Some(fetcher) = self.fetchers.get(key) {
            return Ok(Arc::clone(fetcher));
        }
        if let Some(reason) = self.unavailable.get(key) {
            return Err(RegistryError::Unavailable {
                platform: key.to_string(),
                reason: reason.clone(),
            });
        }
        Err(RegistryError::UnknownPlatform {
            platform: name.to_string(),
            available: self.available().join(", "),
        })
    }

    /// Resolved configuration of a registered platform.
    #[must_use]
    pub fn config(&self, platform: &str) -> Option<&FetcherConfig> {
        self.configs.get(platform)
    }

    /// Retry policy for a registered platform; the default policy otherwise.
    #[must_use]
    pub fn retry_policy(&self, platform: &str) -> RetryPolicy {
        self.configs
            .get(platform)
            .map(FetcherConfig::retry_policy)
            .unwrap_or_default()
    }

    /// Registered platform keys, sorted.
    #[must_use]
    pub fn available(&self) -> Vec<&'static str> {
        self.fetchers.keys().copied().collect()
    }

    /// Platforms that could not be constructed, with the reason.
    #[must_use]
    pub fn unavailable(&self) -> Vec<(&'static str, &str)> {
        self.unavailable
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fetchers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fetchers.is_empty()
    }

    /// Finds the fetcher for a project URL and derives the project identity.
    ///
    /// Platform-specific fetchers are tried before the generic URL fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoFetcherForUrl`] if the input is not a URL or
    /// no fetcher accepts it.
    #[tracing::instrument(skip(self))]
    pub fn find_for_url(
        &self,
        input: &str,
    ) -> Result<(Arc<dyn Fetcher>, ProjectRef), RegistryError> {
        let no_fetcher = || RegistryError::NoFetcherForUrl {
            url: input.to_string(),
        };
        let url = Url::parse(input.trim()).map_err(|_| no_fetcher())?;

        let mut candidates: Vec<&Arc<dyn Fetcher>> = self
            .fetchers
            .values()
            .filter(|f| f.can_handle(&url))
            .collect();
        candidates.sort_by_key(|f| f.priority());

        for fetcher in candidates {
            match fetcher.project_ref_for_url(&url) {
                Ok(project) => {
                    debug!(platform = fetcher.platform(), id = %project.id, "URL matched");
                    return Ok((Arc::clone(fetcher), project));
                }
                Err(error) => {
                    debug!(platform = fetcher.platform(), error = %error, "fetcher declined URL");
                }
            }
        }
        Err(no_fetcher())
    }
}

impl std::fmt::Debug for FetcherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetcherRegistry")
            .field("fetchers", &self.available())
            .field("unavailable", &self.unavailable.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for FetcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the registry with every built-in platform.
///
/// `settings` is keyed by platform key or short name. Each platform's rate
/// limit is installed in `limiter`. A platform whose fetcher cannot be built
/// is marked unavailable and skipped with a warning.
#[must_use]
pub fn build_default_fetcher_registry(
    settings: &BTreeMap<String, FetcherSettings>,
    defaults: &FetcherDefaults,
    limiter: Arc<RateLimiter>,
) -> FetcherRegistry {
    let mut registry = FetcherRegistry::new();
    let empty = FetcherSettings::default();

    for factory in &FACTORIES {
        let fetcher_settings = settings
            .get(factory.platform)
            .or_else(|| settings.get(factory.short_name))
            .unwrap_or(&empty);
        let config = FetcherConfig::resolve(fetcher_settings, defaults, &factory.builtin);
        limiter.set_limit(factory.platform, config.rate_limit);

        match (factory.build)(&config, Arc::clone(&limiter)) {
            Ok(fetcher) => registry.register(fetcher, config),
            Err(error) => {
                warn!(
                    platform = factory.platform,
                    error = %error,
                    "Fetcher unavailable; continuing without it"
                );
                registry.mark_unavailable(factory.platform, error.to_string());
            }
        }
    }

    registry
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn settings_with_token(names: &[&str]) -> BTreeMap<String, FetcherSettings> {
        names
            .iter()
            .map(|name| {
                (
                    (*name).to_string(),
                    FetcherSettings {
                        access_token: Some("token".to_string()),
                        ..FetcherSettings::default()
                    },
                )
            })
            .collect()
    }

    fn limiter() -> Arc<RateLimiter> {
        Arc::new(RateLimiter::disabled())
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_default_registry_marks_tokenless_platforms_unavailable() {
        let registry =
            build_default_fetcher_registry(&BTreeMap::new(), &FetcherDefaults::default(), limiter());

        assert_eq!(registry.available(), vec!["appropedia.org", "url"]);
        let unavailable: Vec<&str> = registry.unavailable().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            unavailable,
            vec!["github.com", "manifests-repo", "oshwa.org", "thingiverse.com"]
        );
    }

    #[test]
    fn test_default_registry_accepts_short_names_in_settings() {
        let registry = build_default_fetcher_registry(
            &settings_with_token(&["github", "oshwa.org", "thingiverse"]),
            &FetcherDefaults::default(),
            limiter(),
        );
        assert!(registry.get("github.com").is_ok());
        assert!(registry.get("oshwa").is_ok());
        assert!(registry.get("thingiverse.com").is_ok());
    }

    #[test]
    fn test_default_registry_installs_rate_limits() {
        let limiter = Arc::new(RateLimiter::new(RateLimit::new(1, Duration::from_secs(1))));
        let _registry = build_default_fetcher_registry(
            &BTreeMap::new(),
            &FetcherDefaults::default(),
            Arc::clone(&limiter),
        );
        assert_eq!(
            limiter.limit_for("github.com"),
            RateLimit::new(10, Duration::from_secs(60))
        );
        assert_eq!(
            limiter.limit_for("oshwa.org"),
            RateLimit::new(1, Duration::from_secs(5))
        );
    }

    #[test]
    fn test_config_and_retry_policy_follow_settings() {
        let mut settings = settings_with_token(&["github"]);
        settings.get_mut("github").unwrap().retries = Some(5);
        let registry = build_default_fetcher_registry(
            &settings,
            &FetcherDefaults {
                retries: Some(1),
                timeout: None,
            },
            limiter(),
        );
        assert_eq!(registry.config("github.com").unwrap().retries, 5);
        assert_eq!(registry.retry_policy("github.com").max_attempts(), 6);
        assert_eq!(registry.retry_policy("url").max_attempts(), 2);
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_get_unknown_platform_lists_available() {
        let registry =
            build_default_fetcher_registry(&BTreeMap::new(), &FetcherDefaults::default(), limiter());
        let error = registry.get("gitlab").err().unwrap();
        assert!(matches!(error, RegistryError::UnknownPlatform { .. }));
        assert!(error.to_string().contains("appropedia.org, url"));
    }

    #[test]
    fn test_get_unavailable_platform_reports_reason() {
        let registry =
            build_default_fetcher_registry(&BTreeMap::new(), &FetcherDefaults::default(), limiter());
        let error = registry.get("github").err().unwrap();
        match error {
            RegistryError::Unavailable { platform, reason } => {
                assert_eq!(platform, "github.com");
                assert!(reason.contains("access token"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_find_for_url_prefers_specialized_fetcher() {
        let registry = build_default_fetcher_registry(
            &settings_with_token(&["oshwa"]),
            &FetcherDefaults::default(),
            limiter(),
        );

        let (fetcher, project) = registry
            .find_for_url("https://certification.oshwa.org/us000001.html")
            .unwrap();
        assert_eq!(fetcher.platform(), "oshwa.org");
        assert_eq!(project.id, "US000001");

        let (fetcher, project) = registry
            .find_for_url("https://example.org/hw/okh.toml")
            .unwrap();
        assert_eq!(fetcher.platform(), "url");
        assert_eq!(project.canonical_url, "https://example.org/hw/okh.toml");
    }

    #[test]
    fn test_find_for_url_rejects_non_urls() {
        let registry =
            build_default_fetcher_registry(&BTreeMap::new(), &FetcherDefaults::default(), limiter());
        assert!(matches!(
            registry.find_for_url("not a url"),
            Err(RegistryError::NoFetcherForUrl { .. })
        ));
    }

    #[test]
    fn test_canonical_platform_names() {
        assert_eq!(canonical_platform("GitHub"), Some("github.com"));
        assert_eq!(canonical_platform("appropedia.org"), Some("appropedia.org"));
        assert_eq!(canonical_platform("gitlab"), None);
    }

    #[test]
    fn test_registry_debug_lists_platforms() {
        let registry =
            build_default_fetcher_registry(&BTreeMap::new(), &FetcherDefaults::default(), limiter());
        let debug = format!("{registry:?}");
        assert!(debug.contains("appropedia.org"));
        assert!(debug.contains("unavailable"));
    }
}
