//! Thingiverse.
//!
//! The API offers no listing of every thing, so discovery walks the id range
//! from 1 (or the stored cursor) up to the newest id, in batches. Ids that were
//! deleted or never published come back as [`FetchError::NotFound`].

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

const API_BASE: &str = "https://api.thingiverse.com";
const SITE_BASE: &str = "https://www.thingiverse.com";
const BATCH_SIZE: u64 = 50;

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    id: u64,
}

/// Fetcher for `thingiverse.com`.
#[derive(Debug, Clone)]
pub struct ThingiverseFetcher {
    client: PlatformClient,
    api_base: Url,
    site_base: Url,
}

impl ThingiverseFetcher {
    /// Creates the fetcher against the public API.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fatal`] without an access token.
    pub fn new(config: &FetcherConfig, limiter: Arc<RateLimiter>) -> Result<Self, FetchError> {
        Self::with_base_urls(config, limiter, API_BASE, SITE_BASE)
    }

    /// Creates the fetcher against custom roots (for testing).
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
        let token = require_token(config, platform::THINGIVERSE)?;
        let client = PlatformClient::new(platform::THINGIVERSE, limiter, config.timeout)?
            .with_token(Some(token));
        Ok(Self {
            client,
            api_base: parse_url(api_base)?,
            site_base: parse_url(site_base)?,
        })
    }

    fn project_ref(&self, id: u64) -> ProjectRef {
        let canonical = format!(
            "{}/thing:{id}",
            self.site_base.as_str().trim_end_matches('/')
        );
        ProjectRef::new(platform::THINGIVERSE, id.to_string(), canonical)
    }

    async fn newest_id(&self) -> Result<u64, FetchError> {
        let mut url = endpoint(&self.api_base, "search/")?;
        url.query_pairs_mut()
            .append_pair("type", "things")
            .append_pair("sort", "newest")
            .append_pair("per_page", "1");
        let result: SearchResult = self.client.get_json(&url).await?;
        result
            .hits
            .first()
            .map(|hit| hit.id)
            .ok_or_else(|| FetchError::fatal(url.as_str(), "unsupported response: no things found"))
    }
}

#[async_trait]
impl Fetcher for ThingiverseFetcher {
    fn platform(&self) -> &'static str {
        platform::THINGIVERSE
    }

    fn sourcing_procedure(&self) -> SourcingProcedure {
        SourcingProcedure::Api
    }

    fn can_handle(&self, url: &Url) -> bool {
        bare_host(url).is_some() && bare_host(url) == bare_host(&self.site_base)
    }

    fn project_ref_for_url(&self, url: &Url) -> Result<ProjectRef, FetchError> {
        let id = url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .and_then(|first| first.strip_prefix("thing:"))
            .and_then(|id| id.parse::<u64>().ok())
            .ok_or_else(|| FetchError::fatal(url.as_str(), "not a Thingiverse thing page"))?;
        Ok(self.project_ref(id))
    }

    #[instrument(skip(self, cursor), fields(platform = platform::THINGIVERSE))]
    async fn search_page(&self, cursor: Option<&SearchCursor>) -> Result<SearchPage, FetchError> {
        let first_id = cursor.and_then(|c| c.u64_field("next_id")).unwrap_or(1);
        let newest = match cursor.and_then(|c| c.u64_field("newest")) {
            Some(newest) => newest,
            None => self.newest_id().await?,
        };

        let last_id = (first_id + BATCH_SIZE - 1).min(newest);
        let refs: Vec<ProjectRef> = (first_id..=last_id).map(|id| self.project_ref(id)).collect();
        let next = (last_id < newest).then(|| {
            SearchCursor::new(serde_json::json!({ "next_id": last_id + 1, "newest": newest }))
        });
        debug!(first_id, last_id, newest, "enumerated thing ids");
        Ok(SearchPage { refs, next })
    }

    #[instrument(skip(self), fields(platform = platform::THINGIVERSE, project_id = %project.id))]
    async fn fetch(&self, project: &ProjectRef) -> Result<FetchedProject, FetchError> {
        let thing_url = endpoint(&self.api_base, &format!("things/{}", project.id))?;
        let files_url = endpoint(&self.api_base, &format!("things/{}/files", project.id))?;

        let mut thing: serde_json::Value = self.client.get_json(&thing_url).await?;
        let files: serde_json::Value = match self.client.get_json(&files_url).await {
            Ok(files) => files,
            Err(FetchError::NotFound { .. }) => serde_json::Value::Array(Vec::new()),
            Err(error) => return Err(error),
        };

        let object = thing.as_object_mut().ok_or_else(|| {
            FetchError::fatal(thing_url.as_str(), "unsupported response: thing is not an object")
        })?;
        object.insert("files".to_string(), files);

        let bytes = serde_json::to_vec_pretty(&thing).map_err(|e| {
            FetchError::fatal(thing_url.as_str(), format!("unsupported response: {e}"))
        })?;
        Ok(FetchedProject::new(
            RawPayload::new(PayloadFormat::Json, bytes),
            thing_url.as_str(),
            SourcingProcedure::Api,
        ))
    }
}
