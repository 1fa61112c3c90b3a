//! Raw platform payloads to canonical manifests.
//!
//! # Pipeline
//!
//! 1. [`parse_payload`] turns JSON, YAML or TOML bytes into a generic tree
//! 2. the platform's [`MappingTable`] is applied rule by rule; every text
//!    value passes through [`sanitize_text`] (or [`strip_html`])
//! 3. declared licenses are resolved under the configured [`LicensePolicy`]
//! 4. the result is checked at [`ValidationLevel::Required`]
//!
//! Problems with optional values never fail a project; they are returned as
//! [`NormalizeWarning`]s next to the manifest.

mod extract;
mod mapping;
mod parse;
mod sanitize;
mod validate;

pub use extract::guess_mime;
pub use mapping::{
    FieldRule, MANIFEST_TABLE, MappingTable, OSHWA_CATEGORY_CPC, OSHWA_TABLE, THINGIVERSE_TABLE,
    ValueKind, table_for,
};
pub use parse::parse_payload;
pub use sanitize::{fix_mojibake, sanitize_text, strip_html};
pub use validate::{FieldProblem, FieldReport, ValidationError, ValidationLevel, validate};

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::license::LicensePolicy;
use crate::model::{CanonicalField, CanonicalManifest, PayloadFormat, ProjectRef, RawPayload};
use extract::Extractor;

/// Errors that stop a payload from becoming a manifest.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Required fields are missing or invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The payload could not be read as a document.
    #[error("cannot parse {} payload: {message}", .format.as_str())]
    Parse {
        format: PayloadFormat,
        message: String,
    },
}

impl NormalizeError {
    /// Creates a parse error for a payload of `format`.
    pub fn parse(format: PayloadFormat, message: impl ToString) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }
}

/// Category of a non-fatal normalization problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    UnresolvedLicense,
    AbsolutePathDropped,
    MalformedUrl,
    InvalidLanguage,
    UnknownPartyType,
    InvalidCode,
}

impl WarningKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnresolvedLicense => "unresolved license",
            Self::AbsolutePathDropped => "absolute path dropped",
            Self::MalformedUrl => "malformed URL dropped",
            Self::InvalidLanguage => "invalid language tag dropped",
            Self::UnknownPartyType => "unknown party type",
            Self::InvalidCode => "invalid code dropped",
        }
    }
}

/// A non-fatal problem found while normalizing one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizeWarning {
    pub field: CanonicalField,
    pub kind: WarningKind,
    /// The offending input value.
    pub detail: String,
}

impl fmt::Display for NormalizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.field.key(), self.kind.as_str(), self.detail)
    }
}

/// A manifest together with the warnings raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub manifest: CanonicalManifest,
    pub warnings: Vec<NormalizeWarning>,
}

/// Converts raw payloads into [`CanonicalManifest`]s.
#[derive(Debug, Clone, Default)]
pub struct ManifestNormalizer {
    policy: LicensePolicy,
}

impl ManifestNormalizer {
    #[must_use]
    pub fn new(policy: LicensePolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &LicensePolicy {
        &self.policy
    }

    /// Parses and maps a payload without validating the result.
    ///
    /// `source_url` anchors relative file paths when it is an http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Parse`] when the payload is not a readable
    /// document.
    pub fn extract(
        &self,
        project: &ProjectRef,
        payload: &RawPayload,
        source_url: Option<&str>,
    ) -> Result<Normalized, NormalizeError> {
        let tree = parse_payload(payload)?;
        let table = table_for(&project.platform);
        let (manifest, warnings) =
            Extractor::new(&tree, project, source_url, &self.policy).run(table);
        debug!(
            table = table.name,
            fields = manifest.populated_fields().len(),
            warnings = warnings.len(),
            "payload mapped"
        );
        Ok(Normalized { manifest, warnings })
    }

    /// Parses, maps and validates a payload at [`ValidationLevel::Required`].
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Parse`] for unreadable payloads and
    /// [`NormalizeError::Validation`] when required fields fail.
    #[instrument(skip_all, fields(project = %project, format = payload.format.as_str()))]
    pub fn normalize(
        &self,
        project: &ProjectRef,
        payload: &RawPayload,
        source_url: Option<&str>,
    ) -> Result<Normalized, NormalizeError> {
        let normalized = self.extract(project, payload, source_url)?;
        validate(&normalized.manifest, ValidationLevel::Required)?;
        Ok(normalized)
    }
}
