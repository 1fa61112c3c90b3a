//! Direct manifest URLs.
//!
//! Accepts any http(s) URL. Discovery yields the configured seed list; the
//! payload format comes from the file extension, then the `Content-Type`
//! header, then defaults to JSON.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use url::Url;

use super::{
    FetchError, Fetcher, FetcherConfig, FetcherPriority, SearchCursor, SearchPage, parse_url,
};
use crate::model::{
    FetchedProject, PayloadFormat, ProjectRef, RawPayload, SourcingProcedure, platform,
};
use crate::request::{PlatformClient, RateLimiter};

/// Fetcher for arbitrary manifest URLs.
#[derive(Debug, Clone)]
pub struct UrlFetcher {
    client: PlatformClient,
    seeds: Vec<String>,
}

impl UrlFetcher {
    /// Creates the fetcher with the seed URLs from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fatal`] if the HTTP client cannot be built.
    pub fn new(config: &FetcherConfig, limiter: Arc<RateLimiter>) -> Result<Self, FetchError> {
        Ok(Self {
            client: PlatformClient::new(platform::URL, limiter, config.timeout)?,
            seeds: config.urls.clone(),
        })
    }

    fn project_ref(url: &Url) -> ProjectRef {
        let without_scheme = url
            .as_str()
            .split_once("://")
            .map_or(url.as_str(), |(_, rest)| rest);
        ProjectRef::new(platform::URL, without_scheme, url.as_str())
    }
}

fn payload_format(url: &Url, content_type: Option<&str>) -> PayloadFormat {
    PayloadFormat::from_path(url.path())
        .or_else(|| content_type.and_then(PayloadFormat::from_content_type))
        .unwrap_or(PayloadFormat::Json)
}

#[async_trait]
impl Fetcher for UrlFetcher {
    fn platform(&self) -> &'static str {
        platform::URL
    }

    fn sourcing_procedure(&self) -> SourcingProcedure {
        SourcingProcedure::Manifest
    }

    fn priority(&self) -> FetcherPriority {
        FetcherPriority::Fallback
    }

    fn can_handle(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
    }

    fn project_ref_for_url(&self, url: &Url) -> Result<ProjectRef, FetchError> {
        if !self.can_handle(url) {
            return Err(FetchError::fatal(url.as_str(), "only http(s) URLs are supported"));
        }
        Ok(Self::project_ref(url))
    }

    #[instrument(skip(self, _cursor), fields(platform = platform::URL, seeds = self.seeds.len()))]
    async fn search_page(&self, _cursor: Option<&SearchCursor>) -> Result<SearchPage, FetchError> {
        let mut refs = Vec::with_capacity(self.seeds.len());
        for seed in &self.seeds {
            match parse_url(seed.trim()).and_then(|url| self.project_ref_for_url(&url)) {
                Ok(project) => refs.push(project),
                Err(error) => warn!(seed = %seed, error = %error, "skipping invalid seed URL"),
            }
        }
        refs.sort();
        refs.dedup();
        Ok(SearchPage::last(refs))
    }

    #[instrument(skip(self), fields(platform = platform::URL, project_id = %project.id))]
    async fn fetch(&self, project: &ProjectRef) -> Result<FetchedProject, FetchError> {
        let url = parse_url(&project.canonical_url)?;
        let response = self.client.get(&url).await?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::fatal(url.as_str(), "unsupported response: empty body"));
        }

        let format = payload_format(&url, response.content_type.as_deref());
        let procedure = if format == PayloadFormat::Rdf {
            SourcingProcedure::Direct
        } else {
            SourcingProcedure::Manifest
        };
        debug!(format = format.as_str(), "fetched URL");
        Ok(FetchedProject::new(
            RawPayload::new(format, response.body),
            response.url,
            procedure,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fetcher(seeds: &[&str]) -> UrlFetcher {
        let config = FetcherConfig {
            urls: seeds.iter().map(ToString::to_string).collect(),
            ..FetcherConfig::default()
        };
        UrlFetcher::new(&config, Arc::new(RateLimiter::disabled())).unwrap()
    }

    #[test]
    fn test_project_ref_strips_scheme() {
        let fetcher = fetcher(&[]);
        let url = Url::parse("https://example.org/hw/okh.toml").unwrap();
        let project = fetcher.project_ref_for_url(&url).unwrap();
        assert_eq!(project.platform, "url");
        assert_eq!(project.id, "example.org/hw/okh.toml");
        assert_eq!(project.canonical_url, "https://example.org/hw/okh.toml");
    }

    #[test]
    fn test_rejects_non_http_urls() {
        let fetcher = fetcher(&[]);
        let url = Url::parse("ftp://example.org/okh.toml").unwrap();
        assert!(!fetcher.can_handle(&url));
        assert!(fetcher.project_ref_for_url(&url).is_err());
    }

    #[test]
    fn test_payload_format_precedence() {
        let toml = Url::parse("https://x.org/okh.toml").unwrap();
        let bare = Url::parse("https://x.org/manifest").unwrap();
        assert_eq!(payload_format(&toml, Some("application/json")), PayloadFormat::Toml);
        assert_eq!(payload_format(&bare, Some("text/turtle")), PayloadFormat::Rdf);
        assert_eq!(payload_format(&bare, Some("text/html")), PayloadFormat::Json);
        assert_eq!(payload_format(&bare, None), PayloadFormat::Json);
    }

    #[tokio::test]
    async fn test_search_returns_valid_seeds_once() {
        let fetcher = fetcher(&[
            "https://b.org/okh.yml",
            "not a url",
            "https://a.org/okh.toml",
            "https://b.org/okh.yml",
        ]);
        let page = fetcher.search_page(None).await.unwrap();
        let urls: Vec<&str> = page.refs.iter().map(|r| r.canonical_url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.org/okh.toml", "https://b.org/okh.yml"]);
        assert!(page.next.is_none());
    }
}
