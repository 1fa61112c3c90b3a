//! Drives discovery, fetching, normalization, serialization and persistence.
//!
//! # State machine
//!
//! Each project moves through
//! `Discovered -> Gated -> Fetching -> Normalizing -> Serializing -> Persisted`
//! and can end in `Failed { stage, kind }` from any step. A failure is
//! recorded against that project only; the run moves on to the next one.
//!
//! # Concurrency
//!
//! Projects are processed on a semaphore-bounded pool of tokio tasks. The
//! interrupt flag is checked before each new project is launched; projects
//! already in flight run to completion so the store never sees half a write.

mod report;

pub use report::{CrawlReport, FailureEntry, RunOutcome, WarningEntry};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::StreamExt;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::fetcher::{DiscoverOptions, FetchError, Fetcher, discover};
use crate::model::ProjectRef;
use crate::normalizer::{ManifestNormalizer, NormalizeError, NormalizeWarning};
use crate::rdf::{Provenance, RdfSerializer, SerializeError};
use crate::request::RetryPolicy;
use crate::store::{PersistOutcome, PersistRequest, ProjectStateStore, RefreshPolicy, StoreError};

/// Default number of projects processed at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Pipeline step a project was in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Gate,
    Fetch,
    Normalize,
    Serialize,
    Persist,
}

impl Stage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gate => "gate",
            Self::Fetch => "fetch",
            Self::Normalize => "normalize",
            Self::Serialize => "serialize",
            Self::Persist => "persist",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure category used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    RateLimited,
    Transient,
    Fatal,
    ExhaustedRetries,
    Validation,
    Parse,
    UnmappableField,
    StoreIo,
    /// The project's task panicked before producing a result.
    Panicked,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::Transient => "transient",
            Self::Fatal => "fatal",
            Self::ExhaustedRetries => "exhausted_retries",
            Self::Validation => "validation",
            Self::Parse => "parse",
            Self::UnmappableField => "unmappable_field",
            Self::StoreIo => "store_io",
            Self::Panicked => "panicked",
        }
    }

    /// A project that disappeared is reported but does not fail the run.
    #[must_use]
    pub fn is_hard(self) -> bool {
        self != Self::NotFound
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&FetchError> for ErrorKind {
    fn from(error: &FetchError) -> Self {
        match error {
            FetchError::NotFound { .. } => Self::NotFound,
            FetchError::RateLimited { .. } => Self::RateLimited,
            FetchError::Transient { .. } => Self::Transient,
            FetchError::Fatal { .. } => Self::Fatal,
            FetchError::ExhaustedRetries { .. } => Self::ExhaustedRetries,
        }
    }
}

impl From<&NormalizeError> for ErrorKind {
    fn from(error: &NormalizeError) -> Self {
        match error {
            NormalizeError::Validation(_) => Self::Validation,
            NormalizeError::Parse { .. } => Self::Parse,
        }
    }
}

impl From<&SerializeError> for ErrorKind {
    fn from(_: &SerializeError) -> Self {
        Self::UnmappableField
    }
}

impl From<&StoreError> for ErrorKind {
    fn from(_: &StoreError) -> Self {
        Self::StoreIo
    }
}

/// Where a project is in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectState {
    Discovered,
    Gated { proceed: bool },
    Fetching,
    Normalizing,
    Serializing,
    Persisted(PersistOutcome),
    Failed { stage: Stage, kind: ErrorKind },
}

impl ProjectState {
    /// True for states a project never leaves.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Gated { proceed: false } | Self::Persisted(_) | Self::Failed { .. }
        )
    }
}

/// Terminal state of one project with what was learned on the way.
#[derive(Debug, Clone)]
pub struct ProjectResult {
    pub project: ProjectRef,
    pub state: ProjectState,
    /// Error message when the state is `Failed`.
    pub message: Option<String>,
    pub warnings: Vec<NormalizeWarning>,
}

/// Settings for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Projects processed at once; at least one.
    pub concurrency: usize,
    pub refresh: RefreshPolicy,
    /// Skip normalize and serialize when the payload hash is unchanged.
    pub hash_skip: bool,
    /// Stop launching projects after this many.
    pub max_projects: Option<usize>,
    pub discover: DiscoverOptions,
    /// Applied to searches and fetches.
    pub retry: RetryPolicy,
    /// Per-platform policies used instead of `retry` for that platform's fetches.
    pub platform_retry: BTreeMap<&'static str, RetryPolicy>,
}

impl CrawlOptions {
    /// Retry policy for fetches made by `platform`.
    #[must_use]
    pub fn retry_for(&self, platform: &str) -> &RetryPolicy {
        self.platform_retry.get(platform).unwrap_or(&self.retry)
    }
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            refresh: RefreshPolicy::default(),
            hash_skip: true,
            max_projects: None,
            discover: DiscoverOptions::default(),
            retry: RetryPolicy::default(),
            platform_retry: BTreeMap::new(),
        }
    }
}

/// Everything a worker task needs, shared by all of them.
struct Pipeline {
    store: ProjectStateStore,
    normalizer: ManifestNormalizer,
    serializer: RdfSerializer,
}

/// Tracks one project's state and builds its result.
struct Tracker {
    project: ProjectRef,
    state: ProjectState,
    warnings: Vec<NormalizeWarning>,
}

impl Tracker {
    fn new(project: ProjectRef) -> Self {
        Self {
            project,
            state: ProjectState::Discovered,
            warnings: Vec::new(),
        }
    }

    fn enter(&mut self, next: ProjectState) {
        trace!(project = %self.project, from = ?self.state, to = ?next, "state change");
        self.state = next;
    }

    fn finish(mut self, state: ProjectState) -> ProjectResult {
        self.enter(state);
        ProjectResult {
            project: self.project,
            state: self.state,
            message: None,
            warnings: self.warnings,
        }
    }

    fn fail(mut self, stage: Stage, kind: ErrorKind, message: String) -> ProjectResult {
        self.enter(ProjectState::Failed { stage, kind });
        ProjectResult {
            project: self.project,
            state: self.state,
            message: Some(message),
            warnings: self.warnings,
        }
    }
}

/// Runs crawls against a [`ProjectStateStore`].
#[derive(Clone)]
pub struct CrawlOrchestrator {
    pipeline: Arc<Pipeline>,
}

impl fmt::Debug for CrawlOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrawlOrchestrator")
            .field("normalizer", &self.pipeline.normalizer)
            .finish_non_exhaustive()
    }
}

impl CrawlOrchestrator {
    #[must_use]
    pub fn new(store: ProjectStateStore, normalizer: ManifestNormalizer) -> Self {
        Self::with_serializer(store, normalizer, RdfSerializer::new())
    }

    #[must_use]
    pub fn with_serializer(
        store: ProjectStateStore,
        normalizer: ManifestNormalizer,
        serializer: RdfSerializer,
    ) -> Self {
        Self {
            pipeline: Arc::new(Pipeline {
                store,
                normalizer,
                serializer,
            }),
        }
    }

    #[must_use]
    pub fn store(&self) -> &ProjectStateStore {
        &self.pipeline.store
    }

    /// Crawls every project `fetcher` discovers.
    ///
    /// Discovery errors end the run and are reported in
    /// [`CrawlReport::discovery_error`]; projects already launched still finish.
    #[instrument(skip_all, fields(platform = fetcher.platform()))]
    pub async fn run_platform(
        &self,
        fetcher: Arc<dyn Fetcher>,
        options: &CrawlOptions,
        interrupted: Arc<AtomicBool>,
    ) -> CrawlReport {
        let platform = fetcher.platform();
        let mut report = CrawlReport::new(Some(platform));
        let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
        let mut handles = Vec::new();

        info!(concurrency = options.concurrency, "starting crawl");
        let mut refs = discover(
            Arc::clone(&fetcher),
            self.pipeline.store.clone(),
            options.retry.clone(),
            options.discover,
        );

        loop {
            if interrupted.load(Ordering::SeqCst) {
                report.interrupted = true;
                break;
            }
            if options.max_projects.is_some_and(|max| handles.len() >= max) {
                debug!(launched = handles.len(), "project limit reached");
                break;
            }
            let Some(next) = refs.next().await else {
                break;
            };
            match next {
                Ok(project) => {
                    let Some(handle) = self
                        .launch(&semaphore, Arc::clone(&fetcher), project, options, &interrupted)
                        .await
                    else {
                        report.interrupted = true;
                        break;
                    };
                    handles.push(handle);
                }
                Err(e) => {
                    error!(error = %e, "discovery failed");
                    report.discovery_error = Some(e.to_string());
                    break;
                }
            }
        }

        collect(&self.pipeline.store, handles, &mut report).await;
        report
    }

    /// Crawls an explicit list of projects, each with the fetcher that owns it.
    #[instrument(skip_all, fields(projects = projects.len()))]
    pub async fn run_refs(
        &self,
        projects: Vec<(Arc<dyn Fetcher>, ProjectRef)>,
        options: &CrawlOptions,
        interrupted: Arc<AtomicBool>,
    ) -> CrawlReport {
        let mut report = CrawlReport::new(None);
        let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
        let mut handles = Vec::new();

        for (fetcher, project) in projects {
            if interrupted.load(Ordering::SeqCst) {
                report.interrupted = true;
                break;
            }
            match self
                .launch(&semaphore, fetcher, project, options, &interrupted)
                .await
            {
                Some(handle) => handles.push(handle),
                None => {
                    report.interrupted = true;
                    break;
                }
            }
        }

        collect(&self.pipeline.store, handles, &mut report).await;
        report
    }

    /// Waits for a worker slot and spawns the project's task.
    ///
    /// Returns `None` if the run was interrupted while waiting.
    async fn launch(
        &self,
        semaphore: &Arc<Semaphore>,
        fetcher: Arc<dyn Fetcher>,
        project: ProjectRef,
        options: &CrawlOptions,
        interrupted: &AtomicBool,
    ) -> Option<(ProjectRef, JoinHandle<ProjectResult>)> {
        let permit = match Arc::clone(semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                warn!(error = %e, "worker pool closed");
                return None;
            }
        };
        if interrupted.load(Ordering::SeqCst) {
            return None;
        }

        let pipeline = Arc::clone(&self.pipeline);
        let retry = options.retry_for(fetcher.platform()).clone();
        let refresh = options.refresh;
        let hash_skip = options.hash_skip;
        let handle = tokio::spawn({
            let project = project.clone();
            async move {
                let _permit = permit;
                let result = process(&pipeline, fetcher.as_ref(), project, &retry, &refresh, hash_skip).await;
                finalize(&pipeline.store, &result).await;
                result
            }
        });
        Some((project, handle))
    }
}

/// Awaits every task; a task that panicked is recorded as a failure.
async fn collect(
    store: &ProjectStateStore,
    handles: Vec<(ProjectRef, JoinHandle<ProjectResult>)>,
    report: &mut CrawlReport,
) {
    debug!(tasks = handles.len(), "waiting for projects to finish");
    for (project, handle) in handles {
        match handle.await {
            Ok(result) => report.record(result),
            Err(e) => {
                error!(project = %project, error = %e, "project task panicked");
                let result =
                    Tracker::new(project).fail(Stage::Fetch, ErrorKind::Panicked, e.to_string());
                finalize(store, &result).await;
                report.record(result);
            }
        }
    }
    report.finish();
    info!(
        succeeded = report.succeeded,
        unchanged = report.unchanged,
        skipped = report.skipped,
        failed = report.failed_total(),
        warnings = report.warnings.len(),
        interrupted = report.interrupted,
        "crawl complete"
    );
}

/// Logs the result and records failures in the store, best effort.
async fn finalize(store: &ProjectStateStore, result: &ProjectResult) {
    for warning in &result.warnings {
        warn!(project = %result.project, warning = %warning, "normalization warning");
    }
    let ProjectState::Failed { stage, kind } = result.state else {
        return;
    };
    let message = result.message.as_deref().unwrap_or_default();
    warn!(
        project = %result.project,
        stage = stage.as_str(),
        kind = kind.as_str(),
        error = message,
        "project failed"
    );
    if let Err(e) = store
        .record_failure(&result.project, stage.as_str(), kind.as_str(), message)
        .await
    {
        warn!(project = %result.project, error = %e, "failed to record project failure");
    }
}

/// Runs one project through the pipeline.
async fn process(
    pipeline: &Pipeline,
    fetcher: &dyn Fetcher,
    project: ProjectRef,
    retry: &RetryPolicy,
    refresh: &RefreshPolicy,
    hash_skip: bool,
) -> ProjectResult {
    let mut tracker = Tracker::new(project.clone());
    let store = &pipeline.store;

    let proceed = match store.should_refetch(&project, refresh).await {
        Ok(proceed) => proceed,
        Err(e) => return tracker.fail(Stage::Gate, (&e).into(), e.to_string()),
    };
    tracker.enter(ProjectState::Gated { proceed });
    if !proceed {
        debug!(project = %project, "fresh in store, skipping");
        return tracker.finish(ProjectState::Gated { proceed: false });
    }

    tracker.enter(ProjectState::Fetching);
    let fetched = match retry.execute("fetch", || fetcher.fetch(&project)).await {
        Ok(fetched) => fetched,
        Err(e) => return tracker.fail(Stage::Fetch, (&e).into(), e.to_string()),
    };

    if hash_skip {
        match store.unchanged_hash(&project, &fetched.meta.content_hash).await {
            Ok(true) => match store.touch(&project, &fetched.meta).await {
                Ok(true) => {
                    debug!(project = %project, "payload unchanged");
                    return tracker.finish(ProjectState::Persisted(PersistOutcome::Unchanged));
                }
                Ok(false) => {}
                Err(e) => return tracker.fail(Stage::Persist, (&e).into(), e.to_string()),
            },
            Ok(false) => {}
            Err(e) => return tracker.fail(Stage::Persist, (&e).into(), e.to_string()),
        }
    }

    tracker.enter(ProjectState::Normalizing);
    let normalized = match pipeline.normalizer.normalize(
        &project,
        &fetched.payload,
        Some(&fetched.meta.source_url),
    ) {
        Ok(normalized) => normalized,
        Err(e) => return tracker.fail(Stage::Normalize, (&e).into(), e.to_string()),
    };
    tracker.warnings = normalized.warnings;

    tracker.enter(ProjectState::Serializing);
    let provenance = Provenance::from(&fetched.meta);
    let triples = match pipeline
        .serializer
        .serialize(&project, &provenance, &normalized.manifest)
    {
        Ok(triples) => triples,
        Err(e) => return tracker.fail(Stage::Serialize, (&e).into(), e.to_string()),
    };

    let request = PersistRequest {
        project: &project,
        payload: &fetched.payload,
        meta: &fetched.meta,
        manifest: &normalized.manifest,
        triples: &triples,
    };
    match store.persist(request).await {
        Ok(outcome) => {
            debug!(project = %project, ?outcome, triples = triples.len(), "project stored");
            tracker.finish(ProjectState::Persisted(outcome))
        }
        Err(e) => tracker.fail(Stage::Persist, (&e).into(), e.to_string()),
    }
}
