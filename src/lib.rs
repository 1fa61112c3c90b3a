//! Krawl Core Library
//!
//! Discovers open hardware projects on hosting platforms, converts their
//! metadata into Open Know-How (OKH) manifests and publishes them as RDF.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`fetcher`] - Per-platform discovery and retrieval of raw payloads
//! - [`request`] - Shared HTTP client, retry policy and rate limiting
//! - [`normalizer`] - Raw payloads to canonical manifests, with validation
//! - [`rdf`] - Canonical manifests to OKH RDF triples
//! - [`store`] - Durable per-project state in `SQLite`
//! - [`crawl`] - The concurrent pipeline tying the above together
//! - [`model`] and [`license`] - Shared data types
//! - [`db`] - Database connection and schema management

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod crawl;
pub mod db;
pub mod fetcher;
pub mod license;
pub mod model;
pub mod normalizer;
pub mod rdf;
pub mod request;
pub mod store;
mod user_agent;

// Re-export commonly used types
pub use crawl::{
    CrawlOptions, CrawlOrchestrator, CrawlReport, DEFAULT_CONCURRENCY, ErrorKind, ProjectState,
    RunOutcome, Stage,
};
pub use db::Database;
pub use fetcher::{FetchError, Fetcher, FetcherRegistry, build_default_fetcher_registry};
pub use license::{LicensePolicy, LicenseRef};
pub use model::{CanonicalManifest, PayloadFormat, ProjectRef, RawPayload};
pub use normalizer::{ManifestNormalizer, NormalizeError, ValidationLevel};
pub use rdf::{RdfSerializer, to_ntriples, to_turtle};
pub use request::{RateLimit, RateLimiter, RetryPolicy};
pub use store::{ProjectStateStore, RefreshPolicy, StoreError};
