//! Core data model shared by fetchers, the normalizer, the serializer and the store.
//!
//! # Overview
//!
//! - [`ProjectRef`] - stable identity of a project within a platform
//! - [`RawPayload`] - bytes as returned by a platform, tagged with their [`PayloadFormat`]
//! - [`CrawlMeta`] - where and when a payload was obtained, and its [`ContentHash`]
//! - [`CanonicalManifest`] - the normalized, platform-agnostic project record

mod manifest;

pub use manifest::{
    Agent, AgentKind, CanonicalField, CanonicalManifest, Dimensions, Field, FileRef, Part,
};

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Well-known platform keys.
pub mod platform {
    /// GitHub code search over `okh` manifest files.
    pub const GITHUB: &str = "github.com";
    /// OSHWA certification registry.
    pub const OSHWA: &str = "oshwa.org";
    /// Thingiverse things API.
    pub const THINGIVERSE: &str = "thingiverse.com";
    /// Appropedia wiki with generated manifests.
    pub const APPROPEDIA: &str = "appropedia.org";
    /// Any manifest reachable by a plain URL.
    pub const URL: &str = "url";
    /// A local checkout of a repository listing manifests.
    pub const MANIFESTS_REPO: &str = "manifests-repo";

    /// All built-in platform keys in display order.
    pub const ALL: [&str; 6] = [GITHUB, OSHWA, THINGIVERSE, APPROPEDIA, URL, MANIFESTS_REPO];
}

/// Stable identity of a project within a platform's namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Platform key, e.g. `oshwa.org`.
    pub platform: String,
    /// Platform-local identifier.
    pub id: String,
    /// Human-facing URL of the project.
    pub canonical_url: String,
}

impl ProjectRef {
    /// Creates a new project reference.
    #[must_use]
    pub fn new(
        platform: impl Into<String>,
        id: impl Into<String>,
        canonical_url: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            id: id.into(),
            canonical_url: canonical_url.into(),
        }
    }

    /// Returns `platform/id`, used for logging and per-project locks.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}", self.platform, self.id)
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform, self.id)
    }
}

/// How a project's data was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcingProcedure {
    /// Queried from a platform API.
    Api,
    /// A manifest generated by the platform on request.
    GeneratedManifest,
    /// A manifest written by the project itself.
    Manifest,
    /// Graph data taken over as is.
    Direct,
}

impl SourcingProcedure {
    /// Returns the stable storage label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::GeneratedManifest => "generated_manifest",
            Self::Manifest => "manifest",
            Self::Direct => "direct",
        }
    }

    /// Parses a storage label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "api" => Some(Self::Api),
            "generated_manifest" => Some(Self::GeneratedManifest),
            "manifest" => Some(Self::Manifest),
            "direct" => Some(Self::Direct),
            _ => None,
        }
    }
}

/// Format a raw payload is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    Json,
    Yaml,
    Toml,
    Rdf,
}

impl PayloadFormat {
    /// Returns the stable storage label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Rdf => "rdf",
        }
    }

    /// Parses a storage label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "json" => Some(Self::Json),
            "yaml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "rdf" => Some(Self::Rdf),
            _ => None,
        }
    }

    /// File extension used when the payload is written to disk.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yml",
            Self::Toml => "toml",
            Self::Rdf => "ttl",
        }
    }

    /// Infers the format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "ttl" | "rdf" | "nt" | "jsonld" => Some(Self::Rdf),
            _ => None,
        }
    }

    /// Infers the format from a path or URL path.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Infers the format from an HTTP content type.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "application/json" => Some(Self::Json),
            "application/yaml" | "application/x-yaml" | "text/yaml" | "text/x-yaml" => {
                Some(Self::Yaml)
            }
            "application/toml" | "text/x-toml" => Some(Self::Toml),
            "text/turtle" | "application/n-triples" | "application/rdf+xml"
            | "application/ld+json" => Some(Self::Rdf),
            _ => None,
        }
    }
}

/// Raw per-project data as returned by a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload {
    /// Declared format of `bytes`.
    pub format: PayloadFormat,
    /// Payload bytes exactly as received.
    pub bytes: Vec<u8>,
}

impl RawPayload {
    #[must_use]
    pub fn new(format: PayloadFormat, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            format,
            bytes: bytes.into(),
        }
    }

    /// Computes the content hash over the raw bytes.
    #[must_use]
    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of(&self.bytes)
    }
}

/// SHA-256 digest of raw payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hashes the given bytes.
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    /// Lowercase hex encoding, as stored.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a stored hex digest.
    #[must_use]
    pub fn from_hex(value: &str) -> Option<Self> {
        let bytes = hex::decode(value).ok()?;
        let digest: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(digest))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ContentHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).ok_or_else(|| serde::de::Error::custom("invalid content hash"))
    }
}

/// Metadata recorded for one successful fetch.
///
/// Superseded, never merged, when the project is fetched again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlMeta {
    /// URL the payload was retrieved from.
    pub source_url: String,
    /// When the payload was retrieved.
    pub fetched_at: DateTime<Utc>,
    /// How the payload was obtained.
    pub sourcing_procedure: SourcingProcedure,
    /// Digest of the payload bytes.
    pub content_hash: ContentHash,
}

impl CrawlMeta {
    /// Builds the metadata for a payload fetched just now.
    #[must_use]
    pub fn for_payload(
        source_url: impl Into<String>,
        sourcing_procedure: SourcingProcedure,
        payload: &RawPayload,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            fetched_at: Utc::now(),
            sourcing_procedure,
            content_hash: payload.content_hash(),
        }
    }
}

/// A payload together with its crawl metadata, as returned by a fetcher.
#[derive(Debug, Clone)]
pub struct FetchedProject {
    pub payload: RawPayload,
    pub meta: CrawlMeta,
}

impl FetchedProject {
    /// Pairs a payload with freshly computed metadata.
    #[must_use]
    pub fn new(
        payload: RawPayload,
        source_url: impl Into<String>,
        sourcing_procedure: SourcingProcedure,
    ) -> Self {
        let meta = CrawlMeta::for_payload(source_url, sourcing_procedure, &payload);
        Self { payload, meta }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_project_ref_key_and_display() {
        let project = ProjectRef::new("oshwa.org", "US000001", "https://example.org/p");
        assert_eq!(project.key(), "oshwa.org/US000001");
        assert_eq!(project.to_string(), "oshwa.org/US000001");
    }

    #[test]
    fn test_content_hash_is_stable_and_hex_round_trips() {
        let payload = RawPayload::new(PayloadFormat::Toml, b"name = \"x\"".to_vec());
        let first = payload.content_hash();
        let second = payload.content_hash();
        assert_eq!(first, second);
        assert_eq!(first.to_hex().len(), 64);
        assert_eq!(ContentHash::from_hex(&first.to_hex()), Some(first));
    }

    #[test]
    fn test_content_hash_differs_for_different_bytes() {
        assert_ne!(ContentHash::of(b"a"), ContentHash::of(b"b"));
    }

    #[test]
    fn test_content_hash_from_hex_rejects_garbage() {
        assert!(ContentHash::from_hex("zz").is_none());
        assert!(ContentHash::from_hex("abcd").is_none());
    }

    #[test]
    fn test_payload_format_inference() {
        assert_eq!(PayloadFormat::from_path("dir/okh.TOML"), Some(PayloadFormat::Toml));
        assert_eq!(PayloadFormat::from_path("okh.yml"), Some(PayloadFormat::Yaml));
        assert_eq!(PayloadFormat::from_path("project.ttl"), Some(PayloadFormat::Rdf));
        assert_eq!(PayloadFormat::from_path("README"), None);
        assert_eq!(
            PayloadFormat::from_content_type("application/json; charset=utf-8"),
            Some(PayloadFormat::Json)
        );
        assert_eq!(PayloadFormat::from_content_type("text/html"), None);
    }

    #[test]
    fn test_labels_round_trip() {
        for procedure in [
            SourcingProcedure::Api,
            SourcingProcedure::GeneratedManifest,
            SourcingProcedure::Manifest,
            SourcingProcedure::Direct,
        ] {
            assert_eq!(SourcingProcedure::parse(procedure.as_str()), Some(procedure));
        }
        for format in [
            PayloadFormat::Json,
            PayloadFormat::Yaml,
            PayloadFormat::Toml,
            PayloadFormat::Rdf,
        ] {
            assert_eq!(PayloadFormat::parse(format.as_str()), Some(format));
        }
    }
}
