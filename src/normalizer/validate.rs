//! Field-level manifest validation.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::model::{CanonicalField, CanonicalManifest};

/// How much a manifest must carry to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationLevel {
    /// Name and an absolute http(s) repository URL; used by the pipeline.
    #[default]
    Required,
    /// Also version, function, a licensor, `okhv` and an SPDX license.
    Strict,
}

/// What is wrong with one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "problem", content = "detail", rename_all = "snake_case")]
pub enum FieldProblem {
    Missing,
    Invalid(String),
}

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub field: CanonicalField,
    #[serde(flatten)]
    pub problem: FieldProblem,
}

impl fmt::Display for FieldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            FieldProblem::Missing => write!(f, "{}: missing", self.field.key()),
            FieldProblem::Invalid(reason) => write!(f, "{}: {reason}", self.field.key()),
        }
    }
}

/// Every field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub reports: Vec<FieldReport>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self.reports.iter().map(ToString::to_string).collect();
        write!(f, "manifest failed validation: {}", fields.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Checks a manifest at the given level.
///
/// # Errors
///
/// Returns [`ValidationError`] listing every failing field.
pub fn validate(manifest: &CanonicalManifest, level: ValidationLevel) -> Result<(), ValidationError> {
    let mut reports = Vec::new();
    let mut missing = |field: CanonicalField, present: bool| {
        if !present {
            reports.push(FieldReport {
                field,
                problem: FieldProblem::Missing,
            });
        }
    };

    missing(CanonicalField::Name, manifest.name.is_present());
    if level == ValidationLevel::Strict {
        missing(CanonicalField::Okhv, manifest.okhv.is_present());
        missing(CanonicalField::Version, manifest.version.is_present());
        missing(CanonicalField::Function, manifest.function.is_present());
        missing(CanonicalField::Licensor, !manifest.licensors.is_empty());
    }

    match manifest.repo.get() {
        None => reports.push(FieldReport {
            field: CanonicalField::Repo,
            problem: FieldProblem::Missing,
        }),
        Some(repo) if !is_absolute_http(repo) => reports.push(FieldReport {
            field: CanonicalField::Repo,
            problem: FieldProblem::Invalid(format!("not an absolute http(s) URL: {repo}")),
        }),
        Some(_) => {}
    }

    if level == ValidationLevel::Strict && !manifest.license.is_spdx() {
        reports.push(FieldReport {
            field: CanonicalField::License,
            problem: FieldProblem::Invalid(format!(
                "does not resolve to SPDX: {}",
                manifest.license.as_str()
            )),
        });
    }

    reports.sort_by_key(|report| report.field);
    if reports.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { reports })
    }
}

fn is_absolute_http(value: &str) -> bool {
    Url::parse(value)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
}
