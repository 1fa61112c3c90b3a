//! Config file loading and merging with CLI flags.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use krawl_core::fetcher::{FetcherDefaults, FetcherSettings};
use krawl_core::{DEFAULT_CONCURRENCY, LicensePolicy, RefreshPolicy};

/// Workdir used when neither the file nor the CLI names one.
pub(crate) const DEFAULT_WORKDIR: &str = ".krawl";

/// `[defaults]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DefaultsSection {
    pub(crate) retries: Option<u32>,
    /// Seconds.
    pub(crate) timeout: Option<u64>,
    pub(crate) refresh_days: Option<u64>,
    pub(crate) hash_skip: Option<bool>,
}

/// `[licenses]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LicensesSection {
    pub(crate) restrictive_markers: Option<Vec<String>>,
}

/// TOML-backed file configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) workdir: Option<PathBuf>,
    pub(crate) concurrency: Option<usize>,
    pub(crate) defaults: DefaultsSection,
    pub(crate) fetchers: BTreeMap<String, FetcherSettings>,
    pub(crate) licenses: LicensesSection,
}

impl FileConfig {
    /// Rejects out-of-range values.
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(concurrency) = self.concurrency
            && !(1..=64).contains(&concurrency)
        {
            bail!("Invalid config value for `concurrency`: {concurrency}. Expected range: 1..=64");
        }
        validate_retries("defaults.retries", self.defaults.retries)?;
        validate_timeout("defaults.timeout", self.defaults.timeout)?;
        if let Some(days) = self.defaults.refresh_days
            && days > 3650
        {
            bail!(
                "Invalid config value for `defaults.refresh_days`: {days}. Expected range: 0..=3650"
            );
        }

        for (name, settings) in &self.fetchers {
            if krawl_core::fetcher::canonical_platform(name).is_none() {
                bail!("Unknown fetcher section `fetchers.{name}`");
            }
            validate_retries(&format!("fetchers.{name}.retries"), settings.retries)?;
            validate_timeout(&format!("fetchers.{name}.timeout"), settings.timeout)?;
            if let Some(limit) = settings.rate_limit
                && (limit.requests == 0 || limit.per.is_zero())
            {
                bail!(
                    "Invalid config value for `fetchers.{name}.rate_limit`: requests and per_seconds must be at least 1"
                );
            }
        }
        Ok(())
    }
}

fn validate_retries(field: &str, value: Option<u32>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if value > 10 {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 0..=10");
    }
    Ok(())
}

fn validate_timeout(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=600");
    }
    Ok(())
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/krawl/config.toml`
/// 2. `$HOME/.config/krawl/config.toml`
#[must_use]
pub(crate) fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join("krawl").join("config.toml"));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("krawl")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads `explicit` if given (it must exist), else the default path if present.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        return load_file_config(path);
    }
    match resolve_default_config_path() {
        Some(path) if path.exists() => load_file_config(&path),
        _ => Ok(FileConfig::default()),
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let config: FileConfig = toml::from_str(raw)?;
    config.validate()?;
    Ok(config)
}

/// Config values after applying CLI overrides and built-in defaults.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) workdir: PathBuf,
    pub(crate) concurrency: usize,
    pub(crate) refresh: RefreshPolicy,
    pub(crate) hash_skip: bool,
    pub(crate) fetcher_defaults: FetcherDefaults,
    pub(crate) fetchers: BTreeMap<String, FetcherSettings>,
    pub(crate) license_policy: LicensePolicy,
}

impl Settings {
    pub(crate) fn resolve(file: FileConfig, workdir_override: Option<PathBuf>) -> Self {
        let refresh = file
            .defaults
            .refresh_days
            .map(RefreshPolicy::from_days)
            .unwrap_or_default();
        let license_policy = file
            .licenses
            .restrictive_markers
            .map(LicensePolicy::new)
            .unwrap_or_default();
        Self {
            workdir: workdir_override
                .or(file.workdir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKDIR)),
            concurrency: file.concurrency.unwrap_or(DEFAULT_CONCURRENCY),
            refresh,
            hash_skip: file.defaults.hash_skip.unwrap_or(true),
            fetcher_defaults: FetcherDefaults {
                retries: file.defaults.retries,
                timeout: file.defaults.timeout.map(Duration::from_secs),
            },
            fetchers: file.fetchers,
            license_policy,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FULL: &str = r#"
workdir = "/var/lib/krawl"
concurrency = 8

[defaults]
retries = 2
timeout = 20
refresh_days = 1
hash_skip = false

[fetchers.github]
access_token = "abc"
retries = 5
rate_limit = { requests = 10, per_seconds = 60 }

[fetchers.url]
urls = ["https://example.org/okh.toml"]

[licenses]
restrictive_markers = ["internal only"]
"#;

    // ==================== Parsing Tests ====================

    #[test]
    fn test_parse_full_config() {
        let config = parse_config_str(FULL).unwrap();
        assert_eq!(config.workdir, Some(PathBuf::from("/var/lib/krawl")));
        assert_eq!(config.concurrency, Some(8));
        assert_eq!(config.defaults.retries, Some(2));
        let github = &config.fetchers["github"];
        assert_eq!(github.access_token.as_deref(), Some("abc"));
        assert_eq!(github.rate_limit.unwrap().per, Duration::from_secs(60));
        assert_eq!(config.fetchers["url"].urls.len(), 1);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config_str("").unwrap();
        assert!(config.workdir.is_none());
        assert!(config.fetchers.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_config_str("colour = true\n").unwrap_err();
        assert!(err.to_string().contains("colour"), "{err}");
    }

    #[test]
    fn test_unknown_fetcher_section_rejected() {
        let err = parse_config_str("[fetchers.gitlab]\nretries = 1\n").unwrap_err();
        assert!(err.to_string().contains("fetchers.gitlab"), "{err}");
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_out_of_range_values_name_the_key() {
        let err = parse_config_str("concurrency = 0\n").unwrap_err();
        assert!(err.to_string().contains("`concurrency`"), "{err}");

        let err = parse_config_str("[defaults]\ntimeout = 601\n").unwrap_err();
        assert!(err.to_string().contains("defaults.timeout"), "{err}");

        let err = parse_config_str("[fetchers.oshwa]\nretries = 11\n").unwrap_err();
        assert!(err.to_string().contains("fetchers.oshwa.retries"), "{err}");
    }

    // ==================== Resolution Tests ====================

    #[test]
    fn test_settings_apply_overrides_and_defaults() {
        let config = parse_config_str(FULL).unwrap();
        let settings = Settings::resolve(config, Some(PathBuf::from("here")));
        assert_eq!(settings.workdir, PathBuf::from("here"));
        assert_eq!(settings.concurrency, 8);
        assert!(!settings.hash_skip);
        assert_eq!(settings.refresh, RefreshPolicy::from_days(1));
        assert_eq!(settings.fetcher_defaults.timeout, Some(Duration::from_secs(20)));
        assert!(settings.license_policy.is_restrictive("for internal only use"));

        let settings = Settings::resolve(FileConfig::default(), None);
        assert_eq!(settings.workdir, PathBuf::from(DEFAULT_WORKDIR));
        assert_eq!(settings.concurrency, DEFAULT_CONCURRENCY);
        assert!(settings.hash_skip);
        assert_eq!(settings.refresh, RefreshPolicy::default());
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config(Some(&temp.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_default_path_uses_xdg_config_home() {
        let temp = TempDir::new().unwrap();
        let prev = std::env::var_os("XDG_CONFIG_HOME");
        // SAFETY: test isolates env change and restores on drop.
        unsafe { std::env::set_var("XDG_CONFIG_HOME", temp.path()) };
        let _restore = RestoreEnv::new("XDG_CONFIG_HOME", prev);

        assert_eq!(
            resolve_default_config_path(),
            Some(temp.path().join("krawl").join("config.toml"))
        );
        assert!(load_config(None).unwrap().workdir.is_none());

        fs::create_dir_all(temp.path().join("krawl")).unwrap();
        fs::write(
            temp.path().join("krawl").join("config.toml"),
            "workdir = \"from-file\"\n",
        )
        .unwrap();
        assert_eq!(
            load_config(None).unwrap().workdir,
            Some(PathBuf::from("from-file"))
        );
    }

    /// Restores an env var to its previous value (or removes it) when dropped.
    struct RestoreEnv {
        key: &'static str,
        value: Option<std::ffi::OsString>,
    }
    impl RestoreEnv {
        fn new(key: &'static str, value: Option<std::ffi::OsString>) -> Self {
            Self { key, value }
        }
    }
    impl Drop for RestoreEnv {
        fn drop(&mut self) {
            // SAFETY: test restores env to prior state.
            match &self.value {
                Some(v) => unsafe { std::env::set_var(self.key, v) },
                None => unsafe { std::env::remove_var(self.key) },
            }
        }
    }
}
