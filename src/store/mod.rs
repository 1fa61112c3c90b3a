//! Crawl state: what was fetched, when, and what it turned into.
//!
//! One SQLite row per [`ProjectRef`] holds the raw payload, crawl metadata,
//! canonical manifest and N-Triples together, so a record is always either
//! the previous complete version or the new complete version.
//!
//! # Example
//!
//! ```no_run
//! use krawl_core::model::ProjectRef;
//! use krawl_core::store::{ProjectStateStore, RefreshPolicy};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ProjectStateStore::open(std::path::Path::new(".krawl")).await?;
//! let project = ProjectRef::new("oshwa.org", "US000001", "https://certification.oshwa.org/us000001.html");
//! if store.should_refetch(&project, &RefreshPolicy::default()).await? {
//!     // fetch, normalize, serialize, persist
//! }
//! # Ok(())
//! # }
//! ```

mod export;

pub use export::{ExportSummary, project_dir};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use dashmap::DashMap;
use futures_util::stream::{BoxStream, StreamExt};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::db::{Database, DbError};
use crate::fetcher::SearchCursor;
use crate::model::{
    CanonicalManifest, ContentHash, CrawlMeta, PayloadFormat, ProjectRef, RawPayload,
    SourcingProcedure,
};
use crate::rdf::{TripleSet, to_ntriples};

/// Default age after which a stored project is fetched again.
pub const DEFAULT_REFRESH_DAYS: u64 = 7;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// State store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not open state database: {0}")]
    Open(#[from] DbError),

    #[error("state database error: {0}")]
    Io(#[from] sqlx::Error),

    #[error("filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored record has an unreadable '{field}' column: {reason}")]
    Corrupt { field: &'static str, reason: String },
}

impl StoreError {
    fn corrupt(field: &'static str, reason: impl ToString) -> Self {
        Self::Corrupt {
            field,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// When a stored project counts as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    /// Records older than this are fetched again.
    pub max_age: Duration,
    /// Fetch regardless of stored state.
    pub force: bool,
}

impl RefreshPolicy {
    #[must_use]
    pub fn from_days(days: u64) -> Self {
        Self {
            max_age: Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY)),
            force: false,
        }
    }

    /// A policy that always refetches.
    #[must_use]
    pub fn forced() -> Self {
        Self {
            force: true,
            ..Self::default()
        }
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::from_days(DEFAULT_REFRESH_DAYS)
    }
}

/// Everything written for one project in a single [`ProjectStateStore::persist`].
#[derive(Debug, Clone, Copy)]
pub struct PersistRequest<'a> {
    pub project: &'a ProjectRef,
    pub payload: &'a RawPayload,
    pub meta: &'a CrawlMeta,
    pub manifest: &'a CanonicalManifest,
    pub triples: &'a TripleSet,
}

/// What a persist did to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Created,
    Updated,
    /// Same content hash as before; only the visit was recorded.
    Unchanged,
}

/// Snapshot of one stored project.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub project: ProjectRef,
    pub meta: CrawlMeta,
    pub first_fetched_at: DateTime<Utc>,
    pub payload: RawPayload,
    pub manifest: CanonicalManifest,
    pub ntriples: String,
    pub visits: u64,
    pub changes: u64,
}

/// The last recorded failure of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub stage: String,
    pub kind: String,
    pub message: String,
    pub failed_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    platform: String,
    project_id: String,
    canonical_url: String,
    source_url: String,
    first_fetched_at: String,
    fetched_at: String,
    sourcing_procedure: String,
    content_hash: String,
    payload_format: String,
    raw_payload: Vec<u8>,
    manifest_json: String,
    rdf_ntriples: String,
    visits: i64,
    changes: i64,
}

impl TryFrom<ProjectRow> for ProjectRecord {
    type Error = StoreError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let sourcing_procedure = SourcingProcedure::parse(&row.sourcing_procedure)
            .ok_or_else(|| StoreError::corrupt("sourcing_procedure", &row.sourcing_procedure))?;
        let format = PayloadFormat::parse(&row.payload_format)
            .ok_or_else(|| StoreError::corrupt("payload_format", &row.payload_format))?;
        let content_hash = ContentHash::from_hex(&row.content_hash)
            .ok_or_else(|| StoreError::corrupt("content_hash", &row.content_hash))?;
        let manifest = serde_json::from_str(&row.manifest_json)
            .map_err(|e| StoreError::corrupt("manifest_json", e))?;

        Ok(Self {
            project: ProjectRef::new(row.platform, row.project_id, row.canonical_url),
            meta: CrawlMeta {
                source_url: row.source_url,
                fetched_at: parse_timestamp("fetched_at", &row.fetched_at)?,
                sourcing_procedure,
                content_hash,
            },
            first_fetched_at: parse_timestamp("first_fetched_at", &row.first_fetched_at)?,
            payload: RawPayload::new(format, row.raw_payload),
            manifest,
            ntriples: row.rdf_ntriples,
            visits: u64::try_from(row.visits).unwrap_or_default(),
            changes: u64::try_from(row.changes).unwrap_or_default(),
        })
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StoreError::corrupt(field, e))
}

/// Persistent per-project crawl state.
///
/// Cheap to clone; clones share the pool and the per-project write locks.
#[derive(Debug, Clone)]
pub struct ProjectStateStore {
    db: Database,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl ProjectStateStore {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self {
            db,
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Opens the store inside `workdir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] if the database cannot be opened.
    pub async fn open(workdir: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(Database::open_workdir(workdir).await?))
    }

    /// In-memory store for tests and dry runs.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] if the database cannot be created.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Ok(Self::new(Database::new_in_memory().await?))
    }

    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Runs `op` while holding the write lock of `project`.
    async fn with_lock<T, F>(&self, project: &ProjectRef, op: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        let key = project.key();
        let lock = Arc::clone(self.locks.entry(key.clone()).or_default().value());
        let result = {
            let _guard = lock.lock().await;
            op.await
        };
        drop(lock);
        self.locks.remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    /// Decides whether `project` needs fetching. No network I/O.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the stored record cannot be read.
    #[instrument(skip(self, policy), fields(project = %project))]
    pub async fn should_refetch(
        &self,
        project: &ProjectRef,
        policy: &RefreshPolicy,
    ) -> Result<bool, StoreError> {
        if policy.force {
            return Ok(true);
        }
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT fetched_at FROM projects WHERE platform = ? AND project_id = ?",
        )
        .bind(&project.platform)
        .bind(&project.id)
        .fetch_optional(self.db.pool())
        .await?;

        let Some((fetched_at,)) = row else {
            return Ok(true);
        };
        let fetched_at = parse_timestamp("fetched_at", &fetched_at)?;
        let stale = Utc::now()
            .signed_duration_since(fetched_at)
            .to_std()
            .is_ok_and(|age| age > policy.max_age);
        Ok(stale)
    }

    /// True if the stored content hash of `project` equals `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the query fails.
    pub async fn unchanged_hash(
        &self,
        project: &ProjectRef,
        hash: &ContentHash,
    ) -> Result<bool, StoreError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT content_hash FROM projects WHERE platform = ? AND project_id = ?",
        )
        .bind(&project.platform)
        .bind(&project.id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(row.is_some_and(|(stored,)| stored == hash.to_hex()))
    }

    /// Writes every artifact of one project atomically and clears its failure.
    ///
    /// Writes to the same project are serialized; the later one wins.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or the transaction fails; nothing
    /// is written in that case.
    #[instrument(skip(self, request), fields(project = %request.project))]
    pub async fn persist(&self, request: PersistRequest<'_>) -> Result<PersistOutcome, StoreError> {
        let manifest_json = serde_json::to_string(request.manifest)
            .map_err(|e| StoreError::corrupt("manifest_json", e))?;
        let ntriples = to_ntriples(request.triples);
        let project = request.project;
        let meta = request.meta;
        let hash = meta.content_hash.to_hex();
        let fetched_at = format_timestamp(meta.fetched_at);

        self.with_lock(project, async {
            let mut tx = self.db.pool().begin_with("BEGIN IMMEDIATE").await?;
            let previous: Option<(String,)> = sqlx::query_as(
                "SELECT content_hash FROM projects WHERE platform = ? AND project_id = ?",
            )
            .bind(&project.platform)
            .bind(&project.id)
            .fetch_optional(&mut *tx)
            .await?;

            sqlx::query(
                r"INSERT INTO projects (
                    platform, project_id, canonical_url, source_url,
                    first_fetched_at, fetched_at, sourcing_procedure, content_hash,
                    payload_format, raw_payload, manifest_json, rdf_ntriples
                  )
                  VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                  ON CONFLICT (platform, project_id) DO UPDATE SET
                    canonical_url = excluded.canonical_url,
                    source_url = excluded.source_url,
                    fetched_at = excluded.fetched_at,
                    sourcing_procedure = excluded.sourcing_procedure,
                    content_hash = excluded.content_hash,
                    payload_format = excluded.payload_format,
                    raw_payload = excluded.raw_payload,
                    manifest_json = excluded.manifest_json,
                    rdf_ntriples = excluded.rdf_ntriples,
                    visits = projects.visits + 1,
                    changes = projects.changes
                      + (projects.content_hash <> excluded.content_hash)",
            )
            .bind(&project.platform)
            .bind(&project.id)
            .bind(&project.canonical_url)
            .bind(&meta.source_url)
            .bind(&fetched_at)
            .bind(&fetched_at)
            .bind(meta.sourcing_procedure.as_str())
            .bind(&hash)
            .bind(request.payload.format.as_str())
            .bind(&request.payload.bytes)
            .bind(&manifest_json)
            .bind(&ntriples)
            .execute(&mut *tx)
            .await?;

            sqlx::query("DELETE FROM project_failures WHERE platform = ? AND project_id = ?")
                .bind(&project.platform)
                .bind(&project.id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            let outcome = match previous {
                None => PersistOutcome::Created,
                Some((stored,)) if stored == hash => PersistOutcome::Unchanged,
                Some(_) => PersistOutcome::Updated,
            };
            debug!(?outcome, "persisted project");
            Ok::<_, StoreError>(outcome)
        })
        .await
    }

    /// Records a visit whose payload hash matched the stored one.
    ///
    /// Returns false if nothing is stored for `project`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the update fails.
    #[instrument(skip(self, meta), fields(project = %project))]
    pub async fn touch(&self, project: &ProjectRef, meta: &CrawlMeta) -> Result<bool, StoreError> {
        let fetched_at = format_timestamp(meta.fetched_at);
        self.with_lock(project, async {
            let mut tx = self.db.pool().begin_with("BEGIN IMMEDIATE").await?;
            let updated = sqlx::query(
                "UPDATE projects SET fetched_at = ?, visits = visits + 1 \
                 WHERE platform = ? AND project_id = ?",
            )
            .bind(&fetched_at)
            .bind(&project.platform)
            .bind(&project.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
            sqlx::query("DELETE FROM project_failures WHERE platform = ? AND project_id = ?")
                .bind(&project.platform)
                .bind(&project.id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            Ok::<_, StoreError>(updated > 0)
        })
        .await
    }

    /// Stores the latest failure of `project`, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the write fails.
    #[instrument(skip(self, message), fields(project = %project))]
    pub async fn record_failure(
        &self,
        project: &ProjectRef,
        stage: &str,
        kind: &str,
        message: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO project_failures (platform, project_id, stage, kind, message, failed_at)
              VALUES (?, ?, ?, ?, ?, ?)
              ON CONFLICT (platform, project_id) DO UPDATE SET
                stage = excluded.stage,
                kind = excluded.kind,
                message = excluded.message,
                failed_at = excluded.failed_at",
        )
        .bind(&project.platform)
        .bind(&project.id)
        .bind(stage)
        .bind(kind)
        .bind(message)
        .bind(format_timestamp(Utc::now()))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// The last failure of `project`, if one is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the row is unreadable.
    pub async fn last_failure(
        &self,
        project: &ProjectRef,
    ) -> Result<Option<FailureRecord>, StoreError> {
        let row: Option<(String, String, String, String)> = sqlx::query_as(
            "SELECT stage, kind, message, failed_at FROM project_failures \
             WHERE platform = ? AND project_id = ?",
        )
        .bind(&project.platform)
        .bind(&project.id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|(stage, kind, message, failed_at)| {
            Ok(FailureRecord {
                stage,
                kind,
                message,
                failed_at: parse_timestamp("failed_at", &failed_at)?,
            })
        })
        .transpose()
    }

    /// Loads the stored snapshot of `project`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the row is unreadable.
    #[instrument(skip(self), fields(project = %project))]
    pub async fn load(&self, project: &ProjectRef) -> Result<Option<ProjectRecord>, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM projects WHERE platform = ? AND project_id = ?",
        )
        .bind(&project.platform)
        .bind(&project.id)
        .fetch_optional(self.db.pool())
        .await?;
        row.map(ProjectRecord::try_from).transpose()
    }

    /// Streams stored refs ordered by platform, then id.
    pub fn list_projects<'a>(
        &'a self,
        platform: Option<&'a str>,
    ) -> BoxStream<'a, Result<ProjectRef, StoreError>> {
        sqlx::query_as::<_, (String, String, String)>(
            "SELECT platform, project_id, canonical_url FROM projects \
             WHERE (?1 IS NULL OR platform = ?1) \
             ORDER BY platform, project_id",
        )
        .bind(platform)
        .fetch(self.db.pool())
        .map(|row| {
            row.map(|(platform, id, canonical_url)| ProjectRef::new(platform, id, canonical_url))
                .map_err(StoreError::from)
        })
        .boxed()
    }

    /// Number of stored projects, optionally for one platform.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the query fails.
    pub async fn count_projects(&self, platform: Option<&str>) -> Result<u64, StoreError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM projects WHERE (?1 IS NULL OR platform = ?1)")
                .bind(platform)
                .fetch_one(self.db.pool())
                .await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Continuation cursor saved by an interrupted discovery.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the cursor is unreadable.
    pub async fn load_cursor(&self, platform: &str) -> Result<Option<SearchCursor>, StoreError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT cursor_json FROM fetcher_cursors WHERE platform = ?")
                .bind(platform)
                .fetch_optional(self.db.pool())
                .await?;
        row.map(|(json,)| {
            serde_json::from_str(&json).map_err(|e| StoreError::corrupt("cursor_json", e))
        })
        .transpose()
    }

    /// Saves the cursor of the next discovery page.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    #[instrument(skip(self, cursor))]
    pub async fn save_cursor(&self, platform: &str, cursor: &SearchCursor) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(cursor).map_err(|e| StoreError::corrupt("cursor_json", e))?;
        sqlx::query(
            r"INSERT INTO fetcher_cursors (platform, cursor_json, updated_at) VALUES (?, ?, ?)
              ON CONFLICT (platform) DO UPDATE SET
                cursor_json = excluded.cursor_json,
                updated_at = excluded.updated_at",
        )
        .bind(platform)
        .bind(json)
        .bind(format_timestamp(Utc::now()))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Forgets the cursor once discovery has completed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the delete fails.
    #[instrument(skip(self))]
    pub async fn clear_cursor(&self, platform: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM fetcher_cursors WHERE platform = ?")
            .bind(platform)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures_util::TryStreamExt;

    use super::*;
    use crate::model::{Field, SourcingProcedure};
    use crate::rdf::{Iri, Literal};

    fn project(id: &str) -> ProjectRef {
        ProjectRef::new("url", id, format!("https://{id}"))
    }

    struct Artifacts {
        payload: RawPayload,
        meta: CrawlMeta,
        manifest: CanonicalManifest,
        triples: TripleSet,
    }

    fn artifacts(body: &str) -> Artifacts {
        let payload = RawPayload::new(PayloadFormat::Toml, body.as_bytes());
        let meta = CrawlMeta::for_payload("https://x.org/okh.toml", SourcingProcedure::Manifest, &payload);
        let manifest = CanonicalManifest {
            name: Field::Present(body.to_string()),
            ..CanonicalManifest::default()
        };
        let mut triples = TripleSet::new();
        triples.add(
            &Iri::new("http://x.org/s"),
            Iri::new("http://x.org/p"),
            Literal::string(body),
        );
        Artifacts {
            payload,
            meta,
            manifest,
            triples,
        }
    }

    async fn persist(store: &ProjectStateStore, project: &ProjectRef, a: &Artifacts) -> PersistOutcome {
        store
            .persist(PersistRequest {
                project,
                payload: &a.payload,
                meta: &a.meta,
                manifest: &a.manifest,
                triples: &a.triples,
            })
            .await
            .unwrap()
    }

    // ==================== Refresh Gate Tests ====================

    #[tokio::test]
    async fn test_should_refetch_unknown_project() {
        let store = ProjectStateStore::in_memory().await.unwrap();
        assert!(store.should_refetch(&project("a"), &RefreshPolicy::default()).await.unwrap());
    }

    #[tokio::test]
    async fn test_should_refetch_respects_age_and_force() {
        let store = ProjectStateStore::in_memory().await.unwrap();
        let p = project("a");
        persist(&store, &p, &artifacts("one")).await;

        assert!(!store.should_refetch(&p, &RefreshPolicy::default()).await.unwrap());
        assert!(store.should_refetch(&p, &RefreshPolicy::forced()).await.unwrap());
        let zero = RefreshPolicy {
            max_age: Duration::ZERO,
            force: false,
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(store.should_refetch(&p, &zero).await.unwrap());
    }

    // ==================== Persist Tests ====================

    #[tokio::test]
    async fn test_persist_outcomes_and_counters() {
        let store = ProjectStateStore::in_memory().await.unwrap();
        let p = project("a");

        assert_eq!(persist(&store, &p, &artifacts("one")).await, PersistOutcome::Created);
        assert_eq!(persist(&store, &p, &artifacts("one")).await, PersistOutcome::Unchanged);
        assert_eq!(persist(&store, &p, &artifacts("two")).await, PersistOutcome::Updated);

        let record = store.load(&p).await.unwrap().unwrap();
        assert_eq!(record.visits, 3);
        assert_eq!(record.changes, 1);
        assert_eq!(record.payload.bytes, b"two");
        assert_eq!(record.manifest.name, Field::Present("two".to_string()));
        assert!(record.ntriples.contains("\"two\""));
        assert!(record.first_fetched_at <= record.meta.fetched_at);
    }

    #[tokio::test]
    async fn test_persist_clears_failure() {
        let store = ProjectStateStore::in_memory().await.unwrap();
        let p = project("a");
        store.record_failure(&p, "fetch", "transient", "timed out").await.unwrap();
        assert_eq!(store.last_failure(&p).await.unwrap().unwrap().kind, "transient");

        persist(&store, &p, &artifacts("one")).await;
        assert!(store.last_failure(&p).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_persists_of_same_ref() {
        let store = ProjectStateStore::in_memory().await.unwrap();
        let p = project("a");
        let bodies: Vec<Artifacts> = (0..8).map(|i| artifacts(&format!("v{i}"))).collect();

        let writes = bodies.iter().map(|a| persist(&store, &p, a));
        let outcomes = futures_util::future::join_all(writes).await;

        assert_eq!(
            outcomes.iter().filter(|o| **o == PersistOutcome::Created).count(),
            1
        );
        let record = store.load(&p).await.unwrap().unwrap();
        assert_eq!(record.visits, 8);
        assert!(store.locks.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_persists_of_distinct_refs_on_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = ProjectStateStore::open(temp.path()).await.unwrap();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let p = project(&format!("p{i}"));
                    let a = artifacts(&format!("v{i}"));
                    let outcome = store
                        .persist(PersistRequest {
                            project: &p,
                            payload: &a.payload,
                            meta: &a.meta,
                            manifest: &a.manifest,
                            triples: &a.triples,
                        })
                        .await?;
                    store.touch(&p, &a.meta).await?;
                    Ok::<_, StoreError>(outcome)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), PersistOutcome::Created);
        }
        assert_eq!(store.count_projects(None).await.unwrap(), 32);
        assert_eq!(store.load(&project("p7")).await.unwrap().unwrap().visits, 2);
    }

    #[tokio::test]
    async fn test_touch_and_unchanged_hash() {
        let store = ProjectStateStore::in_memory().await.unwrap();
        let p = project("a");
        let a = artifacts("one");

        assert!(!store.touch(&p, &a.meta).await.unwrap());
        assert!(!store.unchanged_hash(&p, &a.meta.content_hash).await.unwrap());

        persist(&store, &p, &a).await;
        assert!(store.unchanged_hash(&p, &a.meta.content_hash).await.unwrap());
        assert!(!store.unchanged_hash(&p, &ContentHash::of(b"other")).await.unwrap());
        assert!(store.touch(&p, &a.meta).await.unwrap());
        assert_eq!(store.load(&p).await.unwrap().unwrap().visits, 2);
    }

    // ==================== Enumeration Tests ====================

    #[tokio::test]
    async fn test_list_projects_ordered_and_filtered() {
        let store = ProjectStateStore::in_memory().await.unwrap();
        let other = ProjectRef::new("oshwa.org", "US1", "https://o/us1");
        for p in [project("b"), other.clone(), project("a")] {
            persist(&store, &p, &artifacts("x")).await;
        }

        let all: Vec<ProjectRef> = store.list_projects(None).try_collect().await.unwrap();
        let keys: Vec<String> = all.iter().map(ProjectRef::key).collect();
        assert_eq!(keys, vec!["oshwa.org/US1", "url/a", "url/b"]);

        let urls: Vec<ProjectRef> = store.list_projects(Some("url")).try_collect().await.unwrap();
        assert_eq!(urls.len(), 2);
        assert_eq!(store.count_projects(Some("oshwa.org")).await.unwrap(), 1);
    }

    // ==================== Cursor Tests ====================

    #[tokio::test]
    async fn test_cursor_round_trip_and_clear() {
        let store = ProjectStateStore::in_memory().await.unwrap();
        assert!(store.load_cursor("github.com").await.unwrap().is_none());

        let cursor = SearchCursor::new(serde_json::json!({ "page": 3 }));
        store.save_cursor("github.com", &cursor).await.unwrap();
        store.save_cursor("github.com", &cursor).await.unwrap();
        assert_eq!(store.load_cursor("github.com").await.unwrap(), Some(cursor));

        store.clear_cursor("github.com").await.unwrap();
        assert!(store.load_cursor("github.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_cursor_is_reported() {
        let store = ProjectStateStore::in_memory().await.unwrap();
        sqlx::query(
            "INSERT INTO fetcher_cursors (platform, cursor_json, updated_at) VALUES ('url', '{', 't')",
        )
        .execute(store.database().pool())
        .await
        .unwrap();
        let error = store.load_cursor("url").await.unwrap_err();
        assert!(matches!(error, StoreError::Corrupt { field: "cursor_json", .. }));
    }
}
