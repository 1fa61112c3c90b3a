//! Local checkout of a manifest collection.
//!
//! The directory is typically a git repository produced by a separate
//! scraper, named after the percent-encoded URL it mirrors. Discovery walks
//! the tree; fetching reads one file. Nothing here touches the network.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use url::Url;
use walkdir::WalkDir;

use super::{FetchError, Fetcher, FetcherConfig, SearchCursor, SearchPage};
use crate::model::{FetchedProject, PayloadFormat, ProjectRef, RawPayload, SourcingProcedure, platform};

const ACCEPTED_EXTENSIONS: [&str; 3] = ["toml", "yaml", "yml"];

/// True for `okh.<ext>` and `<anything>.okh.<ext>` with a TOML or YAML extension.
fn is_collection_manifest(file_name: &str) -> bool {
    let Some((stem, extension)) = file_name.rsplit_once('.') else {
        return false;
    };
    ACCEPTED_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
        && (stem == "okh" || stem.ends_with(".okh"))
}

/// Fetcher for `manifests-repo`.
#[derive(Debug, Clone)]
pub struct ManifestsRepoFetcher {
    scrape_dir: PathBuf,
    /// URL the checkout mirrors, decoded from its directory name, if any.
    repo_url: Option<String>,
}

impl ManifestsRepoFetcher {
    /// Creates the fetcher for the configured `scrape_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fatal`] if `scrape_dir` is unset or not a directory.
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let scrape_dir = config.scrape_dir.clone().ok_or_else(|| {
            FetchError::fatal(
                platform::MANIFESTS_REPO,
                "`scrape_dir` must be set under this fetcher in the config",
            )
        })?;
        Self::with_dir(scrape_dir)
    }

    /// Creates the fetcher for an explicit directory.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Fatal`] if `scrape_dir` is not a directory.
    pub fn with_dir(scrape_dir: impl Into<PathBuf>) -> Result<Self, FetchError> {
        let scrape_dir = scrape_dir.into();
        if !scrape_dir.is_dir() {
            return Err(FetchError::fatal(
                scrape_dir.display().to_string(),
                "scrape directory does not exist",
            ));
        }
        let repo_url = scrape_dir
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| urlencoding::decode(name).ok())
            .map(|name| name.trim_end_matches('/').to_string())
            .filter(|name| name.starts_with("http://") || name.starts_with("https://"));
        Ok(Self {
            scrape_dir,
            repo_url,
        })
    }

    fn project_ref(&self, relative: &str) -> ProjectRef {
        let canonical = match &self.repo_url {
            Some(repo_url) => format!("{repo_url}/{relative}"),
            None => Url::from_file_path(self.scrape_dir.join(relative))
                .map_or_else(|()| relative.to_string(), |url| url.to_string()),
        };
        ProjectRef::new(platform::MANIFESTS_REPO, relative, canonical)
    }

    fn relative_id(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.scrape_dir).ok()?;
        let parts: Vec<&str> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }
}

#[async_trait]
impl Fetcher for ManifestsRepoFetcher {
    fn platform(&self) -> &'static str {
        platform::MANIFESTS_REPO
    }

    fn sourcing_procedure(&self) -> SourcingProcedure {
        SourcingProcedure::Manifest
    }

    fn can_handle(&self, url: &Url) -> bool {
        url.scheme() == "file"
            && url
                .to_file_path()
                .is_ok_and(|path| path.starts_with(&self.scrape_dir))
    }

    fn project_ref_for_url(&self, url: &Url) -> Result<ProjectRef, FetchError> {
        let path = url
            .to_file_path()
            .map_err(|()| FetchError::fatal(url.as_str(), "not a local file URL"))?;
        let relative = self
            .relative_id(&path)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| FetchError::fatal(url.as_str(), "file is outside the scrape directory"))?;
        Ok(self.project_ref(&relative))
    }

    /// Lists every manifest in one page; the walk is local and cheap.
    #[instrument(skip(self, _cursor), fields(platform = platform::MANIFESTS_REPO, dir = %self.scrape_dir.display()))]
    async fn search_page(&self, _cursor: Option<&SearchCursor>) -> Result<SearchPage, FetchError> {
        let dir = self.scrape_dir.clone();
        let paths = tokio::task::spawn_blocking(move || {
            WalkDir::new(&dir)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.file_name() != ".git")
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(error) => {
                        warn!(error = %error, "skipping unreadable entry");
                        None
                    }
                })
                .filter(|e| e.file_type().is_file())
                .filter(|e| e.file_name().to_str().is_some_and(is_collection_manifest))
                .map(walkdir::DirEntry::into_path)
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|e| FetchError::fatal(self.scrape_dir.display().to_string(), e.to_string()))?;

        let refs: Vec<ProjectRef> = paths
            .iter()
            .filter_map(|path| self.relative_id(path))
            .map(|relative| self.project_ref(&relative))
            .collect();
        debug!(found = refs.len(), "walked scrape directory");
        Ok(SearchPage::last(refs))
    }

    #[instrument(skip(self), fields(platform = platform::MANIFESTS_REPO, project_id = %project.id))]
    async fn fetch(&self, project: &ProjectRef) -> Result<FetchedProject, FetchError> {
        if project.id.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(FetchError::fatal(&project.id, "invalid manifest path"));
        }
        let path = self.scrape_dir.join(&project.id);
        let source = path.display().to_string();

        let format = PayloadFormat::from_path(&project.id)
            .ok_or_else(|| FetchError::fatal(&source, "unsupported manifest format"))?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(FetchError::not_found(source));
            }
            Err(error) => return Err(FetchError::fatal(source, error.to_string())),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::fatal(source, "unsupported response: manifest file is empty"));
        }

        Ok(FetchedProject::new(
            RawPayload::new(format, bytes),
            project.canonical_url.clone(),
            SourcingProcedure::Manifest,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use super::*;

    fn checkout() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("lamp")).unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("lamp/okh.toml"), "name = \"Lamp\"\n").unwrap();
        fs::write(dir.path().join("chair.okh.yml"), "title: Chair\n").unwrap();
        fs::write(dir.path().join("README.md"), "# readme\n").unwrap();
        fs::write(dir.path().join(".git/okh.toml"), "name = \"ignored\"\n").unwrap();
        fs::write(dir.path().join("empty.okh.toml"), "  \n").unwrap();
        dir
    }

    #[test]
    fn test_collection_manifest_names() {
        assert!(is_collection_manifest("okh.toml"));
        assert!(is_collection_manifest("lamp.okh.yaml"));
        assert!(!is_collection_manifest("okh.json"));
        assert!(!is_collection_manifest("bokh.toml"));
    }

    #[test]
    fn test_new_requires_scrape_dir() {
        let error = ManifestsRepoFetcher::new(&FetcherConfig::default()).err().unwrap();
        assert!(error.to_string().contains("scrape_dir"));
    }

    #[tokio::test]
    async fn test_search_lists_manifests_sorted() {
        let dir = checkout();
        let fetcher = ManifestsRepoFetcher::with_dir(dir.path()).unwrap();
        let page = fetcher.search_page(None).await.unwrap();

        let ids: Vec<&str> = page.refs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["chair.okh.yml", "empty.okh.toml", "lamp/okh.toml"]);
        assert!(page.next.is_none());
        assert!(page.refs[0].canonical_url.starts_with("file://"));
    }

    #[tokio::test]
    async fn test_fetch_reads_file() {
        let dir = checkout();
        let fetcher = ManifestsRepoFetcher::with_dir(dir.path()).unwrap();
        let project = fetcher.project_ref("lamp/okh.toml");

        let fetched = fetcher.fetch(&project).await.unwrap();
        assert_eq!(fetched.payload.format, PayloadFormat::Toml);
        assert_eq!(fetched.payload.bytes, b"name = \"Lamp\"\n");
        assert_eq!(fetched.meta.sourcing_procedure, SourcingProcedure::Manifest);
    }

    #[tokio::test]
    async fn test_fetch_errors() {
        let dir = checkout();
        let fetcher = ManifestsRepoFetcher::with_dir(dir.path()).unwrap();

        let missing = fetcher.fetch(&fetcher.project_ref("gone/okh.toml")).await;
        assert!(matches!(missing, Err(FetchError::NotFound { .. })));

        let empty = fetcher.fetch(&fetcher.project_ref("empty.okh.toml")).await;
        assert!(matches!(empty, Err(FetchError::Fatal { .. })));

        let escape = fetcher.fetch(&fetcher.project_ref("../okh.toml")).await;
        assert!(matches!(escape, Err(FetchError::Fatal { .. })));
    }

    #[test]
    fn test_canonical_url_from_encoded_dir_name() {
        let parent = tempfile::tempdir().unwrap();
        let dir = parent.path().join("https%3A%2F%2Fgithub.com%2Forg%2Fmanifests");
        fs::create_dir_all(&dir).unwrap();
        let fetcher = ManifestsRepoFetcher::with_dir(&dir).unwrap();
        assert_eq!(
            fetcher.project_ref("lamp/okh.toml").canonical_url,
            "https://github.com/org/manifests/lamp/okh.toml"
        );
    }

    #[test]
    fn test_project_ref_for_file_url() {
        let dir = checkout();
        let fetcher = ManifestsRepoFetcher::with_dir(dir.path()).unwrap();
        let url = Url::from_file_path(dir.path().join("lamp/okh.toml")).unwrap();
        assert!(fetcher.can_handle(&url));
        assert_eq!(fetcher.project_ref_for_url(&url).unwrap().id, "lamp/okh.toml");
    }
}
