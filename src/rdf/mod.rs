//! Graph output: terms, triples, the manifest serializer and text writers.
//!
//! # Overview
//!
//! - [`Iri`], [`Literal`], [`Term`], [`Triple`] - the RDF data model
//! - [`TripleSet`] - sorted, de-duplicated triples; iteration order is the
//!   output order, which keeps both writers byte-deterministic
//! - [`RdfSerializer`] - [`CanonicalManifest`](crate::model::CanonicalManifest)
//!   to triples through a field to predicate table
//! - [`to_ntriples`], [`to_turtle`] - writers
//!
//! # Example
//!
//! ```
//! use krawl_core::model::{CanonicalManifest, Field, ProjectRef, SourcingProcedure};
//! use krawl_core::rdf::{Provenance, RdfSerializer, to_ntriples};
//!
//! let project = ProjectRef::new("url", "example.org/okh.toml", "https://example.org/okh.toml");
//! let manifest = CanonicalManifest {
//!     name: Field::Present("Lamp".to_string()),
//!     repo: Field::Present("https://example.org/lamp".to_string()),
//!     ..CanonicalManifest::default()
//! };
//! let provenance = Provenance::new(SourcingProcedure::Manifest, Some("https://example.org/okh.toml"));
//!
//! let triples = RdfSerializer::new().serialize(&project, &provenance, &manifest).unwrap();
//! assert!(to_ntriples(&triples).contains("\"Lamp\""));
//! ```

mod serializer;
mod writer;

pub use serializer::{Provenance, RdfSerializer, SerializeError, project_namespace};
pub use writer::{to_ntriples, to_turtle};

use std::collections::BTreeSet;
use std::fmt;

/// Well-known namespaces.
pub mod ns {
    pub const OKH: &str = "http://w3id.org/oseg/ont/okh#";
    pub const ODS: &str = "http://w3id.org/oseg/ont/ods#";
    pub const OKHKRAWL: &str = "http://w3id.org/oseg/ont/okhkrawl#";
    pub const OTRL: &str = "http://w3id.org/oseg/ont/otrl#";
    pub const TSDC: &str = "http://w3id.org/oseg/ont/tsdc#";
    pub const SPDX: &str = "http://spdx.org/rdf/terms#";
    pub const SCHEMA: &str = "https://schema.org/";
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const MIME: &str = "http://www.iana.org/assignments/media-types/";
    /// Root of per-project data namespaces.
    pub const DATA: &str = "http://w3id.org/oseg/ont/okhkrawl/data/";

    /// Prefixes the Turtle writer abbreviates, in output order.
    pub const PREFIXES: [(&str, &str); 11] = [
        ("mime", MIME),
        ("ods", ODS),
        ("okh", OKH),
        ("okhkrawl", OKHKRAWL),
        ("otrl", OTRL),
        ("rdf", RDF),
        ("rdfs", RDFS),
        ("schema", SCHEMA),
        ("spdx", SPDX),
        ("tsdc", TSDC),
        ("xsd", XSD),
    ];
}

/// An absolute IRI.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iri(String);

impl Iri {
    #[must_use]
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// `namespace` followed by `local`.
    #[must_use]
    pub fn in_ns(namespace: &str, local: &str) -> Self {
        Self(format!("{namespace}{local}"))
    }

    /// Accepts absolute http(s) URLs only.
    #[must_use]
    pub fn parse_http(value: &str) -> Option<Self> {
        let url = url::Url::parse(value.trim()).ok()?;
        matches!(url.scheme(), "http" | "https").then(|| Self(url.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A literal value, optionally typed or language-tagged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    pub value: String,
    pub datatype: Option<Iri>,
    pub language: Option<String>,
}

impl Literal {
    /// A plain string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    #[must_use]
    pub fn typed(value: impl Into<String>, datatype: Iri) -> Self {
        Self {
            value: value.into(),
            datatype: Some(datatype),
            language: None,
        }
    }

    /// An `xsd:float`.
    #[must_use]
    pub fn float(value: f64) -> Self {
        Self::typed(value.to_string(), Iri::in_ns(ns::XSD, "float"))
    }
}

/// Triple object.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Iri(Iri),
    Literal(Literal),
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

/// One statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    #[must_use]
    pub fn new(subject: Iri, predicate: Iri, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }
}

/// Sorted set of triples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleSet(BTreeSet<Triple>);

impl TripleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a triple; returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.0.insert(triple)
    }

    /// Adds `(subject, predicate, object)`.
    pub fn add(&mut self, subject: &Iri, predicate: Iri, object: impl Into<Term>) {
        self.0.insert(Triple::new(subject.clone(), predicate, object));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.0.iter()
    }

    #[must_use]
    pub fn contains(&self, triple: &Triple) -> bool {
        self.0.contains(triple)
    }

    /// Objects of every triple with the given predicate.
    pub fn objects<'a>(&'a self, predicate: &'a Iri) -> impl Iterator<Item = &'a Term> + 'a {
        self.0
            .iter()
            .filter(move |t| &t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// True if any triple has `object` as its object.
    #[must_use]
    pub fn mentions(&self, object: &Term) -> bool {
        self.0.iter().any(|t| &t.object == object)
    }
}

impl<'a> IntoIterator for &'a TripleSet {
    type Item = &'a Triple;
    type IntoIter = std::collections::btree_set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_set_sorts_and_dedups() {
        let s = Iri::new("http://x.org/s");
        let mut set = TripleSet::new();
        set.add(&s, Iri::new("http://x.org/p2"), Literal::string("b"));
        set.add(&s, Iri::new("http://x.org/p1"), Literal::string("a"));
        set.add(&s, Iri::new("http://x.org/p1"), Literal::string("a"));

        assert_eq!(set.len(), 2);
        let predicates: Vec<&str> = set.iter().map(|t| t.predicate.as_str()).collect();
        assert_eq!(predicates, vec!["http://x.org/p1", "http://x.org/p2"]);
    }

    #[test]
    fn test_iri_parse_http_only() {
        assert!(Iri::parse_http("https://example.org/a b").is_some());
        assert!(Iri::parse_http("ftp://example.org").is_none());
        assert!(Iri::parse_http("relative/path").is_none());
    }

    #[test]
    fn test_float_literal_lexical_form() {
        assert_eq!(Literal::float(12.5).value, "12.5");
        assert_eq!(
            Literal::float(3.0).datatype.unwrap().as_str(),
            "http://www.w3.org/2001/XMLSchema#float"
        );
    }
}
