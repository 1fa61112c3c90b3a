//! OSHWA certification registry.
//!
//! Discovery pages through `/api/projects` by offset; each project is fetched
//! from `/api/projects/{uid}`, which answers with a one-element array.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::{
    FetchError, Fetcher, FetcherConfig, SearchCursor, SearchPage, bare_host, endpoint, parse_url,
    require_token,
};
use crate::model::{
    FetchedProject, PayloadFormat, ProjectRef, RawPayload, SourcingProcedure, platform,
};
use crate::request::{PlatformClient, RateLimiter};

const API_BASE: &str = "https://certificationapi.oshwa.org";
const SITE_BASE: &str = "https://certification.oshwa.org";
const BATCH_SIZE: u64 = 50;

#[derive(Debug, Deserialize)]
struct ProjectListing {
    #[serde(default)]
    items: Vec<ListedProject>,
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedProject {
    oshwa_uid: String,
}

/// Fetcher for `oshwa.org`.
#[derive(Debug, Clone)]
pub struct OshwaFetcher {
    client: PlatformClient,
    api_base: Url,
    site_base: Url,
}

impl OshwaFetcher {
    /// Creates the fetcher against the public API.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fatal`] without an access token.
    pub fn new(config: &FetcherConfig, limiter: Arc<RateLimiter>) -> Result<Self, FetchError> {
        Self::with_base_urls(config, limiter, API_BASE, SITE_BASE)
    }

    /// Creates the fetcher against custom API and site roots (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fatal`] without an access token or for invalid URLs.
    pub fn with_base_urls(
        config: &FetcherConfig,
        limiter: Arc<RateLimiter>,
        api_base: &str,
        site_base: &str,
    ) -> Result<Self, FetchError> {
        let token = require_token(config, platform::OSHWA)?;
        let client =
            PlatformClient::new(platform::OSHWA, limiter, config.timeout)?.with_token(Some(token));
        Ok(Self {
            client,
            api_base: parse_url(api_base)?,
            site_base: parse_url(site_base)?,
        })
    }

    fn project_ref(&self, uid: &str) -> ProjectRef {
        let uid = uid.trim().to_ascii_uppercase();
        let canonical = format!(
            "{}/{}.html",
            self.site_base.as_str().trim_end_matches('/'),
            uid.to_ascii_lowercase()
        );
        ProjectRef::new(platform::OSHWA, uid, canonical)
    }
}

#[async_trait]
impl Fetcher for OshwaFetcher {
    fn platform(&self) -> &'static str {
        platform::OSHWA
    }

    fn sourcing_procedure(&self) -> SourcingProcedure {
        SourcingProcedure::Api
    }

    fn can_handle(&self, url: &Url) -> bool {
        bare_host(url).is_some() && bare_host(url) == bare_host(&self.site_base)
    }

    fn project_ref_for_url(&self, url: &Url) -> Result<ProjectRef, FetchError> {
        let uid = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .and_then(|last| last.strip_suffix(".html"))
            .filter(|uid| !uid.is_empty() && uid.chars().all(|c| c.is_ascii_alphanumeric()))
            .ok_or_else(|| FetchError::fatal(url.as_str(), "not an OSHWA certification page"))?;
        Ok(self.project_ref(uid))
    }

    #[instrument(skip(self, cursor), fields(platform = platform::OSHWA))]
    async fn search_page(&self, cursor: Option<&SearchCursor>) -> Result<SearchPage, FetchError> {
        let offset = cursor.and_then(|c| c.u64_field("offset")).unwrap_or(0);
        let mut url = endpoint(&self.api_base, "api/projects")?;
        url.query_pairs_mut()
            .append_pair("limit", &BATCH_SIZE.to_string())
            .append_pair("offset", &offset.to_string());

        let listing: ProjectListing = self.client.get_json(&url).await?;
        let refs: Vec<ProjectRef> = listing
            .items
            .iter()
            .map(|item| self.project_ref(&item.oshwa_uid))
            .collect();

        let next_offset = offset + BATCH_SIZE;
        let next = (next_offset < listing.total && !refs.is_empty())
            .then(|| SearchCursor::new(serde_json::json!({ "offset": next_offset })));
        debug!(offset, total = listing.total, "listed OSHWA projects");
        Ok(SearchPage { refs, next })
    }

    #[instrument(skip(self), fields(platform = platform::OSHWA, project_id = %project.id))]
    async fn fetch(&self, project: &ProjectRef) -> Result<FetchedProject, FetchError> {
        let url = endpoint(&self.api_base, &format!("api/projects/{}", project.id))?;
        let projects: Vec<serde_json::Value> = self.client.get_json(&url).await?;
        let first = projects
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::not_found(url.as_str()))?;

        let bytes = serde_json::to_vec_pretty(&first)
            .map_err(|e| FetchError::fatal(url.as_str(), format!("unsupported response: {e}")))?;
        Ok(FetchedProject::new(
            RawPayload::new(PayloadFormat::Json, bytes),
            url.as_str(),
            SourcingProcedure::Api,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> FetcherConfig {
        FetcherConfig {
            access_token: Some("token".to_string()),
            ..FetcherConfig::default()
        }
    }

    fn fetcher() -> OshwaFetcher {
        OshwaFetcher::new(&config(), Arc::new(RateLimiter::disabled())).unwrap()
    }

    #[test]
    fn test_new_requires_token() {
        let error = OshwaFetcher::new(&FetcherConfig::default(), Arc::new(RateLimiter::disabled()))
            .err()
            .unwrap();
        assert!(matches!(error, FetchError::Fatal { .. }));
    }

    #[test]
    fn test_project_ref_for_certification_url() {
        let url = Url::parse("https://certification.oshwa.org/de000017.html").unwrap();
        let fetcher = fetcher();
        assert!(fetcher.can_handle(&url));
        let project = fetcher.project_ref_for_url(&url).unwrap();
        assert_eq!(project.platform, "oshwa.org");
        assert_eq!(project.id, "DE000017");
        assert_eq!(
            project.canonical_url,
            "https://certification.oshwa.org/de000017.html"
        );
    }

    #[test]
    fn test_rejects_other_urls() {
        let fetcher = fetcher();
        assert!(!fetcher.can_handle(&Url::parse("https://github.com/a/b").unwrap()));
        let list = Url::parse("https://certification.oshwa.org/list.php").unwrap();
        assert!(fetcher.project_ref_for_url(&list).is_err());
    }
}
