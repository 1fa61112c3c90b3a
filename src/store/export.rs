//! Dumps stored projects as plain files.
//!
//! Layout: `<dir>/<platform>/<percent-encoded id>/` holding `raw.<ext>`,
//! `meta.json`, `manifest.json` and `project.ttl`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use serde::Serialize;
use tracing::{info, instrument};

use super::{ProjectRecord, ProjectStateStore, StoreError};
use crate::model::{CrawlMeta, ProjectRef};
use crate::rdf::{Provenance, RdfSerializer, project_namespace, to_turtle};

/// Counts of an export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub projects: usize,
    pub files: usize,
}

#[derive(Serialize)]
struct MetaFile<'a> {
    project: &'a ProjectRef,
    #[serde(flatten)]
    meta: &'a CrawlMeta,
    first_fetched_at: DateTime<Utc>,
    payload_format: &'static str,
    visits: u64,
    changes: u64,
}

/// Directory of one project inside an export root.
#[must_use]
pub fn project_dir(root: &Path, project: &ProjectRef) -> PathBuf {
    root.join(&project.platform)
        .join(urlencoding::encode(&project.id).into_owned())
}

/// Writes `contents` next to `path` first, then renames it into place.
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("file");
    let temp = path.with_file_name(format!(".{file_name}.tmp"));
    tokio::fs::write(&temp, contents)
        .await
        .map_err(|e| StoreError::filesystem(&temp, e))?;
    tokio::fs::rename(&temp, path)
        .await
        .map_err(|e| StoreError::filesystem(path, e))
}

fn render(record: &ProjectRecord, serializer: &RdfSerializer) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
    let meta = MetaFile {
        project: &record.project,
        meta: &record.meta,
        first_fetched_at: record.first_fetched_at,
        payload_format: record.payload.format.as_str(),
        visits: record.visits,
        changes: record.changes,
    };
    let meta_json =
        serde_json::to_vec_pretty(&meta).map_err(|e| StoreError::corrupt("meta", e))?;
    let manifest_json = serde_json::to_vec_pretty(&record.manifest)
        .map_err(|e| StoreError::corrupt("manifest_json", e))?;
    let triples = serializer
        .serialize(&record.project, &Provenance::from(&record.meta), &record.manifest)
        .map_err(|e| StoreError::corrupt("manifest_json", e))?;
    let namespace = project_namespace(&record.project);
    let turtle = to_turtle(&triples, &[("", namespace.as_str())]);

    Ok(vec![
        (
            format!("raw.{}", record.payload.format.extension()),
            record.payload.bytes.clone(),
        ),
        ("meta.json".to_string(), meta_json),
        ("manifest.json".to_string(), manifest_json),
        ("project.ttl".to_string(), turtle.into_bytes()),
    ])
}

impl ProjectStateStore {
    /// Exports every stored project, or those of one platform, under `dir`.
    ///
    /// Existing files of an exported project are replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on the first unreadable record or failed write.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub async fn export_layout(
        &self,
        dir: &Path,
        platform: Option<&str>,
    ) -> Result<ExportSummary, StoreError> {
        let serializer = RdfSerializer::new();
        let refs: Vec<ProjectRef> = self.list_projects(platform).try_collect().await?;
        let mut summary = ExportSummary::default();

        for project in refs {
            let Some(record) = self.load(&project).await? else {
                continue;
            };
            let target = project_dir(dir, &project);
            tokio::fs::create_dir_all(&target)
                .await
                .map_err(|e| StoreError::filesystem(&target, e))?;
            for (name, contents) in render(&record, &serializer)? {
                write_atomic(&target.join(name), &contents).await?;
                summary.files += 1;
            }
            summary.projects += 1;
        }
        info!(projects = summary.projects, files = summary.files, "export complete");
        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{
        CanonicalManifest, Field, PayloadFormat, RawPayload, SourcingProcedure,
    };
    use crate::rdf::TripleSet;
    use crate::store::PersistRequest;

    async fn seeded_store() -> (ProjectStateStore, ProjectRef) {
        let store = ProjectStateStore::in_memory().await.unwrap();
        let project = ProjectRef::new(
            "github.com",
            "org/lamp/okh.toml",
            "https://github.com/org/lamp",
        );
        let payload = RawPayload::new(PayloadFormat::Toml, b"name = \"Lamp\"\n".to_vec());
        let meta = CrawlMeta::for_payload(
            "https://raw.githubusercontent.com/org/lamp/HEAD/okh.toml",
            SourcingProcedure::Manifest,
            &payload,
        );
        let manifest = CanonicalManifest {
            name: Field::Present("Lamp".to_string()),
            repo: Field::Present("https://github.com/org/lamp".to_string()),
            ..CanonicalManifest::default()
        };
        store
            .persist(PersistRequest {
                project: &project,
                payload: &payload,
                meta: &meta,
                manifest: &manifest,
                triples: &TripleSet::new(),
            })
            .await
            .unwrap();
        (store, project)
    }

    #[test]
    fn test_project_dir_encodes_id() {
        let project = ProjectRef::new("github.com", "org/lamp/okh.toml", "u");
        assert_eq!(
            project_dir(Path::new("/out"), &project),
            Path::new("/out/github.com/org%2Flamp%2Fokh.toml")
        );
    }

    #[tokio::test]
    async fn test_export_writes_all_four_files() {
        let (store, project) = seeded_store().await;
        let out = tempfile::tempdir().unwrap();

        let summary = store.export_layout(out.path(), None).await.unwrap();
        assert_eq!(summary, ExportSummary { projects: 1, files: 4 });

        let dir = project_dir(out.path(), &project);
        let raw = std::fs::read_to_string(dir.join("raw.toml")).unwrap();
        assert_eq!(raw, "name = \"Lamp\"\n");

        let meta: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join("meta.json")).unwrap()).unwrap();
        assert_eq!(meta["sourcing_procedure"], "manifest");
        assert_eq!(meta["project"]["id"], "org/lamp/okh.toml");
        assert_eq!(meta["visits"], 1);

        let turtle = std::fs::read_to_string(dir.join("project.ttl")).unwrap();
        assert!(turtle.contains(":module"));
        assert!(turtle.contains("\"Lamp\""));

        let leftovers = std::fs::read_dir(&dir)
            .unwrap()
            .filter(|e| e.as_ref().unwrap().file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_export_platform_filter() {
        let (store, _) = seeded_store().await;
        let out = tempfile::tempdir().unwrap();
        let summary = store.export_layout(out.path(), Some("oshwa.org")).await.unwrap();
        assert_eq!(summary, ExportSummary::default());
    }
}
