//! End-of-run accounting.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{ErrorKind, ProjectResult, ProjectState, Stage};
use crate::model::ProjectRef;
use crate::normalizer::NormalizeWarning;
use crate::store::PersistOutcome;

/// One project that ended in [`ProjectState::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEntry {
    pub project: ProjectRef,
    pub stage: Stage,
    pub kind: ErrorKind,
    pub message: String,
}

/// A normalization warning raised for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningEntry {
    pub project: ProjectRef,
    #[serde(flatten)]
    pub warning: NormalizeWarning,
}

/// Overall result of a run, used for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No hard failures.
    Success,
    /// Some hard failures next to successes, or the run was interrupted.
    Partial,
    /// Hard failures and no success, or discovery broke down.
    Failure,
}

/// Counts per terminal state plus the details behind them.
///
/// Counts do not depend on processing order; lists are sorted by
/// [`CrawlReport::finish`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    /// Platform crawled, if the run covered a single one.
    pub platform: Option<String>,
    pub succeeded: usize,
    /// Succeeded projects whose payload was unchanged.
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: BTreeMap<ErrorKind, usize>,
    pub failures: Vec<FailureEntry>,
    pub warnings: Vec<WarningEntry>,
    pub discovery_error: Option<String>,
    pub interrupted: bool,
}

impl CrawlReport {
    #[must_use]
    pub fn new(platform: Option<&str>) -> Self {
        Self {
            platform: platform.map(String::from),
            ..Self::default()
        }
    }

    /// Adds one finished project.
    pub fn record(&mut self, result: ProjectResult) {
        let ProjectResult {
            project,
            state,
            message,
            warnings,
        } = result;

        self.warnings.extend(warnings.into_iter().map(|warning| WarningEntry {
            project: project.clone(),
            warning,
        }));

        match state {
            ProjectState::Persisted(outcome) => {
                self.succeeded += 1;
                if outcome == PersistOutcome::Unchanged {
                    self.unchanged += 1;
                }
            }
            ProjectState::Failed { stage, kind } => {
                *self.failed.entry(kind).or_default() += 1;
                self.failures.push(FailureEntry {
                    project,
                    stage,
                    kind,
                    message: message.unwrap_or_default(),
                });
            }
            // Only the gate can stop a project short of the other terminals.
            _ => self.skipped += 1,
        }
    }

    /// Sorts failure and warning lists for stable output.
    pub fn finish(&mut self) {
        self.failures
            .sort_by(|a, b| (&a.project, a.stage, a.kind).cmp(&(&b.project, b.stage, b.kind)));
        self.warnings.sort_by(|a, b| {
            (&a.project, a.warning.field, &a.warning.detail).cmp(&(
                &b.project,
                b.warning.field,
                &b.warning.detail,
            ))
        });
    }

    /// Failed projects of every kind.
    #[must_use]
    pub fn failed_total(&self) -> usize {
        self.failed.values().sum()
    }

    /// Failures other than projects that no longer exist.
    #[must_use]
    pub fn hard_failures(&self) -> usize {
        self.failed
            .iter()
            .filter(|(kind, _)| kind.is_hard())
            .map(|(_, count)| count)
            .sum()
    }

    /// Every project that reached a terminal state.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed_total()
    }

    /// Failure entries grouped by kind, kinds in declaration order.
    #[must_use]
    pub fn failures_by_kind(&self) -> BTreeMap<ErrorKind, Vec<&FailureEntry>> {
        let mut grouped: BTreeMap<ErrorKind, Vec<&FailureEntry>> = BTreeMap::new();
        for failure in &self.failures {
            grouped.entry(failure.kind).or_default().push(failure);
        }
        grouped
    }

    #[must_use]
    pub fn outcome(&self) -> RunOutcome {
        let hard = self.hard_failures();
        if self.discovery_error.is_some() || (hard > 0 && self.succeeded == 0) {
            RunOutcome::Failure
        } else if hard > 0 || self.interrupted {
            RunOutcome::Partial
        } else {
            RunOutcome::Success
        }
    }
}
