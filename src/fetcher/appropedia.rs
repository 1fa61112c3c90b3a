//! Appropedia wiki.
//!
//! Project pages are the members of `Category:Projects`. The wiki renders an
//! OKH v1 YAML manifest for any page through a script endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::{
    FetchError, Fetcher, FetcherConfig, SearchCursor, SearchPage, bare_host, endpoint, parse_url,
};
use crate::model::{
    FetchedProject, PayloadFormat, ProjectRef, RawPayload, SourcingProcedure, platform,
};
use crate::request::{PlatformClient, RateLimiter};

const BASE: &str = "https://www.appropedia.org";
const PROJECTS_CATEGORY: &str = "Category:Projects";

#[derive(Debug, Deserialize)]
struct CategoryResponse {
    query: Option<CategoryQuery>,
    #[serde(rename = "continue")]
    continuation: Option<Continuation>,
}

#[derive(Debug, Deserialize)]
struct CategoryQuery {
    #[serde(default)]
    categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Deserialize)]
struct CategoryMember {
    title: String,
}

#[derive(Debug, Deserialize)]
struct Continuation {
    cmcontinue: Option<String>,
}

/// Fetcher for `appropedia.org`.
#[derive(Debug, Clone)]
pub struct AppropediaFetcher {
    client: PlatformClient,
    base: Url,
}

impl AppropediaFetcher {
    /// Creates the fetcher against the public wiki.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fatal`] if the HTTP client cannot be built.
    pub fn new(config: &FetcherConfig, limiter: Arc<RateLimiter>) -> Result<Self, FetchError> {
        Self::with_base_url(config, limiter, BASE)
    }

    /// Creates the fetcher against a custom wiki root (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fatal`] for an invalid URL.
    pub fn with_base_url(
        config: &FetcherConfig,
        limiter: Arc<RateLimiter>,
        base: &str,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            client: PlatformClient::new(platform::APPROPEDIA, limiter, config.timeout)?
                .with_token(config.access_token.clone()),
            base: parse_url(base)?,
        })
    }

    fn project_ref(&self, title: &str) -> ProjectRef {
        let id = title.trim().replace(' ', "_");
        let canonical = format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            urlencoding::encode(&id)
        );
        ProjectRef::new(platform::APPROPEDIA, id, canonical)
    }
}

#[async_trait]
impl Fetcher for AppropediaFetcher {
    fn platform(&self) -> &'static str {
        platform::APPROPEDIA
    }

    fn sourcing_procedure(&self) -> SourcingProcedure {
        SourcingProcedure::GeneratedManifest
    }

    fn can_handle(&self, url: &Url) -> bool {
        bare_host(url).is_some() && bare_host(url) == bare_host(&self.base)
    }

    fn project_ref_for_url(&self, url: &Url) -> Result<ProjectRef, FetchError> {
        let not_a_page = || FetchError::fatal(url.as_str(), "not an Appropedia page");
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        let title = match segments.as_slice() {
            ["wiki", title] | [title] => *title,
            _ => return Err(not_a_page()),
        };
        let title = urlencoding::decode(title).map_err(|_| not_a_page())?;
        if title.is_empty() || title.contains(':') {
            return Err(not_a_page());
        }
        Ok(self.project_ref(&title))
    }

    #[instrument(skip(self, cursor), fields(platform = platform::APPROPEDIA))]
    async fn search_page(&self, cursor: Option<&SearchCursor>) -> Result<SearchPage, FetchError> {
        let mut url = endpoint(&self.base, "w/api.php")?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("action", "query")
                .append_pair("format", "json")
                .append_pair("list", "categorymembers")
                .append_pair("cmlimit", "max")
                .append_pair("cmtitle", PROJECTS_CATEGORY);
            if let Some(token) = cursor.and_then(|c| c.str_field("cmcontinue")) {
                query.append_pair("cmcontinue", token);
            }
        }

        let response: CategoryResponse = self.client.get_json(&url).await?;
        let refs: Vec<ProjectRef> = response
            .query
            .map(|q| q.categorymembers)
            .unwrap_or_default()
            .iter()
            .map(|member| self.project_ref(&member.title))
            .collect();
        let next = response
            .continuation
            .and_then(|c| c.cmcontinue)
            .map(|token| SearchCursor::new(serde_json::json!({ "cmcontinue": token })));
        debug!(found = refs.len(), more = next.is_some(), "listed category members");
        Ok(SearchPage { refs, next })
    }

    #[instrument(skip(self), fields(platform = platform::APPROPEDIA, project_id = %project.id))]
    async fn fetch(&self, project: &ProjectRef) -> Result<FetchedProject, FetchError> {
        let mut url = endpoint(&self.base, "scripts/generateOpenKnowHowManifest.php")?;
        url.query_pairs_mut().append_pair("title", &project.id);

        let response = self.client.get(&url).await?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::fatal(
                url.as_str(),
                "unsupported response: empty manifest",
            ));
        }
        Ok(FetchedProject::new(
            RawPayload::new(PayloadFormat::Yaml, response.body),
            url.as_str(),
            SourcingProcedure::GeneratedManifest,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fetcher() -> AppropediaFetcher {
        AppropediaFetcher::new(&FetcherConfig::default(), Arc::new(RateLimiter::disabled()))
            .unwrap()
    }

    #[test]
    fn test_project_ref_replaces_spaces() {
        let project = fetcher().project_ref("AEF food dehydrator");
        assert_eq!(project.id, "AEF_food_dehydrator");
        assert_eq!(
            project.canonical_url,
            "https://www.appropedia.org/AEF_food_dehydrator"
        );
    }

    #[test]
    fn test_project_ref_for_page_url() {
        let fetcher = fetcher();
        let url = Url::parse("https://www.appropedia.org/Solar_oven%C3%A9").unwrap();
        assert!(fetcher.can_handle(&url));
        assert_eq!(fetcher.project_ref_for_url(&url).unwrap().id, "Solar_ovené");
    }

    #[test]
    fn test_rejects_namespaced_and_script_urls() {
        let fetcher = fetcher();
        for raw in [
            "https://www.appropedia.org/Category:Projects",
            "https://www.appropedia.org/w/api.php",
            "https://www.appropedia.org/",
        ] {
            let url = Url::parse(raw).unwrap();
            assert!(fetcher.project_ref_for_url(&url).is_err(), "{raw}");
        }
    }
}
