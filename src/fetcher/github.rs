//! GitHub code search for OKH manifest files.
//!
//! Discovery uses the REST code-search endpoint, which returns at most 1000
//! results per query and sometimes cuts pages short when the search backend
//! times out. A short page is reported as transient so the retry policy asks
//! for it again. Manifests are downloaded from the raw-content host at the
//! default branch (`HEAD`), so a project id never contains a git ref.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::{
    FetchError, Fetcher, FetcherConfig, SearchCursor, SearchPage, bare_host, endpoint,
    is_accepted_manifest_name, parse_url, require_token,
};
use crate::model::{
    FetchedProject, PayloadFormat, ProjectRef, RawPayload, SourcingProcedure, platform,
};
use crate::request::{PlatformClient, RateLimiter};

const API_BASE: &str = "https://api.github.com";
const RAW_BASE: &str = "https://raw.githubusercontent.com";
const SITE_BASE: &str = "https://github.com";

const SEARCH_QUERY: &str = "filename:okh extension:toml extension:yaml extension:yml";
const PER_PAGE: u64 = 100;
/// Code search never returns more than this many results.
const MAX_SEARCH_RESULTS: u64 = 1000;
/// Tried in order when a project id names a repository but no manifest path.
const DEFAULT_MANIFEST_PATHS: [&str; 4] = ["okh.toml", "okh.yaml", "okh.yml", "okh.json"];

#[derive(Debug, Deserialize)]
struct CodeSearch {
    total_count: u64,
    #[serde(default)]
    incomplete_results: bool,
    #[serde(default)]
    items: Vec<CodeItem>,
}

#[derive(Debug, Deserialize)]
struct CodeItem {
    path: String,
    repository: Repository,
}

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
}

/// `owner/repo` plus an optional manifest path.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RepoFile<'a> {
    owner: &'a str,
    repo: &'a str,
    path: Option<&'a str>,
}

impl<'a> RepoFile<'a> {
    fn parse_id(id: &'a str) -> Option<Self> {
        let mut parts = id.splitn(3, '/');
        let owner = parts.next().filter(|s| !s.is_empty())?;
        let repo = parts.next().filter(|s| !s.is_empty())?;
        let path = parts.next().filter(|s| !s.is_empty());
        Some(Self { owner, repo, path })
    }
}

/// Fetcher for `github.com`.
#[derive(Debug, Clone)]
pub struct GitHubFetcher {
    client: PlatformClient,
    api_base: Url,
    raw_base: Url,
    site_base: Url,
}

impl GitHubFetcher {
    /// Creates the fetcher against the public API.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fatal`] without an access token; code search
    /// rejects anonymous requests.
    pub fn new(config: &FetcherConfig, limiter: Arc<RateLimiter>) -> Result<Self, FetchError> {
        Self::with_base_urls(config, limiter, API_BASE, RAW_BASE, SITE_BASE)
    }

    /// Creates the fetcher against custom API, raw-content and site roots.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fatal`] without an access token or for invalid URLs.
    pub fn with_base_urls(
        config: &FetcherConfig,
        limiter: Arc<RateLimiter>,
        api_base: &str,
        raw_base: &str,
        site_base: &str,
    ) -> Result<Self, FetchError> {
        let token = require_token(config, platform::GITHUB)?;
        let client =
            PlatformClient::new(platform::GITHUB, limiter, config.timeout)?.with_token(Some(token));
        Ok(Self {
            client,
            api_base: parse_url(api_base)?,
            raw_base: parse_url(raw_base)?,
            site_base: parse_url(site_base)?,
        })
    }

    fn project_ref(&self, owner: &str, repo: &str, path: Option<&str>) -> ProjectRef {
        let id = match path {
            Some(path) => format!("{owner}/{repo}/{}", path.trim_start_matches('/')),
            None => format!("{owner}/{repo}"),
        };
        let canonical = format!(
            "{}/{owner}/{repo}",
            self.site_base.as_str().trim_end_matches('/')
        );
        ProjectRef::new(platform::GITHUB, id, canonical)
    }

    async fn download(&self, file: &RepoFile<'_>, path: &str) -> Result<FetchedProject, FetchError> {
        let url = endpoint(
            &self.raw_base,
            &format!("{}/{}/HEAD/{path}", file.owner, file.repo),
        )?;
        let format = PayloadFormat::from_path(path).ok_or_else(|| {
            FetchError::fatal(url.as_str(), "unsupported response: unknown manifest format")
        })?;
        let response = self.client.get(&url).await?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::fatal(
                url.as_str(),
                "unsupported response: manifest file is empty",
            ));
        }
        Ok(FetchedProject::new(
            RawPayload::new(format, response.body),
            url.as_str(),
            SourcingProcedure::Manifest,
        ))
    }
}

#[async_trait]
impl Fetcher for GitHubFetcher {
    fn platform(&self) -> &'static str {
        platform::GITHUB
    }

    fn sourcing_procedure(&self) -> SourcingProcedure {
        SourcingProcedure::Manifest
    }

    fn can_handle(&self, url: &Url) -> bool {
        let host = bare_host(url);
        host.is_some() && (host == bare_host(&self.site_base) || host == bare_host(&self.raw_base))
    }

    fn project_ref_for_url(&self, url: &Url) -> Result<ProjectRef, FetchError> {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        let is_raw = bare_host(url) == bare_host(&self.raw_base)
            && bare_host(&self.raw_base) != bare_host(&self.site_base);

        let (owner, repo, path) = match segments.as_slice() {
            [owner, repo, _git_ref, rest @ ..] if is_raw && !rest.is_empty() => {
                (*owner, *repo, Some(rest.join("/")))
            }
            [owner, repo, "blob" | "raw", _git_ref, rest @ ..] if !rest.is_empty() => {
                (*owner, *repo, Some(rest.join("/")))
            }
            [owner, repo] | [owner, repo, "tree", ..] if !is_raw => (*owner, *repo, None),
            _ => {
                return Err(FetchError::fatal(
                    url.as_str(),
                    "not a GitHub repository or file URL",
                ));
            }
        };
        let repo = repo.trim_end_matches(".git");
        Ok(self.project_ref(owner, repo, path.as_deref()))
    }

    #[instrument(skip(self, cursor), fields(platform = platform::GITHUB))]
    async fn search_page(&self, cursor: Option<&SearchCursor>) -> Result<SearchPage, FetchError> {
        let page = cursor.and_then(|c| c.u64_field("page")).unwrap_or(1).max(1);
        let mut url = endpoint(&self.api_base, "search/code")?;
        url.query_pairs_mut()
            .append_pair("q", SEARCH_QUERY)
            .append_pair("per_page", &PER_PAGE.to_string())
            .append_pair("page", &page.to_string());

        let search: CodeSearch = self.client.get_json(&url).await?;
        let reachable = search.total_count.min(MAX_SEARCH_RESULTS);
        let is_last_page = page * PER_PAGE >= reachable;
        let expected = if is_last_page {
            reachable.saturating_sub((page - 1) * PER_PAGE)
        } else {
            PER_PAGE
        };
        let received = search.items.len() as u64;
        if received < expected && (search.incomplete_results || !is_last_page) {
            return Err(FetchError::transient(
                url.as_str(),
                format!("incomplete search results: got {received} of {expected} on page {page}"),
            ));
        }

        let refs: Vec<ProjectRef> = search
            .items
            .iter()
            .filter(|item| is_accepted_manifest_name(&item.path))
            .filter_map(|item| {
                let (owner, repo) = item.repository.full_name.split_once('/')?;
                Some(self.project_ref(owner, repo, Some(&item.path)))
            })
            .collect();
        debug!(
            page,
            total = search.total_count,
            received,
            accepted = refs.len(),
            "code search page"
        );

        let next = (!is_last_page && received > 0)
            .then(|| SearchCursor::new(serde_json::json!({ "page": page + 1 })));
        Ok(SearchPage { refs, next })
    }

    #[instrument(skip(self), fields(platform = platform::GITHUB, project_id = %project.id))]
    async fn fetch(&self, project: &ProjectRef) -> Result<FetchedProject, FetchError> {
        let file = RepoFile::parse_id(&project.id).ok_or_else(|| {
            FetchError::fatal(
                project.canonical_url.as_str(),
                format!("malformed project id '{}'", project.id),
            )
        })?;

        if let Some(path) = file.path {
            return self.download(&file, path).await;
        }

        for path in DEFAULT_MANIFEST_PATHS {
            match self.download(&file, path).await {
                Err(FetchError::NotFound { .. }) => {
                    debug!(path, "no manifest at default path");
                }
                other => return other,
            }
        }
        Err(FetchError::not_found(project.canonical_url.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fetcher() -> GitHubFetcher {
        let config = FetcherConfig {
            access_token: Some("token".to_string()),
            ..FetcherConfig::default()
        };
        GitHubFetcher::new(&config, Arc::new(RateLimiter::disabled())).unwrap()
    }

    fn id_for(raw: &str) -> String {
        let fetcher = fetcher();
        let url = Url::parse(raw).unwrap();
        assert!(fetcher.can_handle(&url), "{raw}");
        fetcher.project_ref_for_url(&url).unwrap().id
    }

    // ==================== URL Parsing Tests ====================

    #[test]
    fn test_repository_url() {
        assert_eq!(id_for("https://github.com/org/lamp"), "org/lamp");
        assert_eq!(id_for("https://github.com/org/lamp.git"), "org/lamp");
        assert_eq!(id_for("https://github.com/org/lamp/tree/main/hw"), "org/lamp");
    }

    #[test]
    fn test_blob_url_drops_git_ref() {
        assert_eq!(
            id_for("https://github.com/org/lamp/blob/v1.2/hw/okh.toml"),
            "org/lamp/hw/okh.toml"
        );
    }

    #[test]
    fn test_raw_url() {
        assert_eq!(
            id_for("https://raw.githubusercontent.com/org/lamp/main/okh.yml"),
            "org/lamp/okh.yml"
        );
    }

    #[test]
    fn test_canonical_url_is_repository() {
        let fetcher = fetcher();
        let url = Url::parse("https://github.com/org/lamp/blob/main/okh.toml").unwrap();
        assert_eq!(
            fetcher.project_ref_for_url(&url).unwrap().canonical_url,
            "https://github.com/org/lamp"
        );
    }

    #[test]
    fn test_rejects_non_repository_urls() {
        let fetcher = fetcher();
        for raw in ["https://github.com/org", "https://github.com/"] {
            let url = Url::parse(raw).unwrap();
            assert!(fetcher.project_ref_for_url(&url).is_err(), "{raw}");
        }
        assert!(!fetcher.can_handle(&Url::parse("https://gitlab.com/org/lamp").unwrap()));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(
            RepoFile::parse_id("o/r/hw/okh.toml"),
            Some(RepoFile {
                owner: "o",
                repo: "r",
                path: Some("hw/okh.toml")
            })
        );
        assert_eq!(RepoFile::parse_id("o/r").unwrap().path, None);
        assert!(RepoFile::parse_id("o").is_none());
    }
}
