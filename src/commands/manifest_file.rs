//! Reading local manifest files for `convert` and `validate`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use url::Url;

use krawl_core::fetcher::canonical_platform;
use krawl_core::model::platform;
use krawl_core::normalizer::Normalized;
use krawl_core::{CanonicalManifest, ManifestNormalizer, NormalizeError, PayloadFormat, ProjectRef, RawPayload};

/// Reads a manifest file, inferring its format from the extension.
pub(crate) fn read_manifest(path: &Path) -> Result<RawPayload> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(PayloadFormat::from_extension)
        .with_context(|| {
            format!(
                "Cannot infer manifest format of '{}': expected .yaml, .yml, .toml or .json",
                path.display()
            )
        })?;
    if format == PayloadFormat::Rdf {
        bail!("RDF input is not supported: '{}'", path.display());
    }
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read manifest '{}'", path.display()))?;
    Ok(RawPayload::new(format, bytes))
}

/// Maps a local manifest with the OKH manifest table, without validation.
pub(crate) fn extract_manifest(
    normalizer: &ManifestNormalizer,
    path: &Path,
    payload: &RawPayload,
) -> Result<Normalized, NormalizeError> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let provisional = ProjectRef::new(platform::URL, name, "");
    normalizer.extract(&provisional, payload, None)
}

/// Derives the project identity from the manifest's repository URL:
/// the host names the platform, the path is the id.
pub(crate) fn project_ref_from_repo(manifest: &CanonicalManifest) -> Result<ProjectRef> {
    let Some(repo) = manifest.repo.get() else {
        bail!("Manifest has no repository URL to derive its identity from");
    };
    let url = Url::parse(repo).with_context(|| format!("Invalid repository URL '{repo}'"))?;
    let Some(host) = url.host_str() else {
        bail!("Repository URL '{repo}' has no host");
    };
    let host = host.trim_start_matches("www.").to_ascii_lowercase();
    let platform = canonical_platform(&host).map_or_else(|| host.clone(), str::to_string);
    let path = url.path().trim_matches('/');
    let id = path.strip_suffix(".git").unwrap_or(path);
    let id = if id.is_empty() { host } else { id.to_string() };
    Ok(ProjectRef::new(platform, id, repo.clone()))
}
