//! N-Triples and Turtle text output.
//!
//! Both writers walk a [`TripleSet`] in its sorted order, so the same set
//! always produces the same bytes.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use super::{Iri, Literal, Term, TripleSet, ns};

/// Characters allowed in an abbreviated local name.
#[allow(clippy::expect_used)]
static LOCAL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]([A-Za-z0-9_.\-]*[A-Za-z0-9_\-])?$").expect("valid regex")
});

fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        if matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\') || c <= ' ' {
            let _ = write!(out, "\\u{:04X}", u32::from(c));
        } else {
            out.push(c);
        }
    }
    out
}

fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

fn write_literal(out: &mut String, literal: &Literal, iri: impl Fn(&Iri) -> String) {
    let _ = write!(out, "\"{}\"", escape_literal(&literal.value));
    if let Some(language) = &literal.language {
        let _ = write!(out, "@{language}");
    } else if let Some(datatype) = &literal.datatype {
        let _ = write!(out, "^^{}", iri(datatype));
    }
}

fn full_iri(iri: &Iri) -> String {
    format!("<{}>", escape_iri(iri.as_str()))
}

/// Renders the set as N-Triples, one statement per line.
#[must_use]
pub fn to_ntriples(triples: &TripleSet) -> String {
    let mut out = String::new();
    for triple in triples {
        let _ = write!(
            out,
            "{} {} ",
            full_iri(&triple.subject),
            full_iri(&triple.predicate)
        );
        match &triple.object {
            Term::Iri(iri) => out.push_str(&full_iri(iri)),
            Term::Literal(literal) => write_literal(&mut out, literal, full_iri),
        }
        out.push_str(" .\n");
    }
    out
}

/// Prefix table for one Turtle document.
struct Prefixes<'a> {
    /// `(prefix, namespace)`, longest namespace first so nested ones win.
    table: Vec<(&'a str, &'a str)>,
    used: BTreeMap<&'a str, &'a str>,
}

impl<'a> Prefixes<'a> {
    fn new(extra: &'a [(&'a str, &'a str)]) -> Self {
        let mut table: Vec<(&str, &str)> = extra.iter().copied().chain(ns::PREFIXES).collect();
        table.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(b.0)));
        Self {
            table,
            used: BTreeMap::new(),
        }
    }

    fn abbreviate(&mut self, iri: &Iri) -> String {
        for &(prefix, namespace) in &self.table {
            if let Some(local) = iri.as_str().strip_prefix(namespace) {
                if LOCAL_NAME.is_match(local) {
                    self.used.insert(prefix, namespace);
                    return format!("{prefix}:{local}");
                }
            }
        }
        full_iri(iri)
    }
}

/// Renders the set as Turtle.
///
/// Subjects are grouped, predicates joined with `;` and only prefixes that
/// are actually used get declared. `extra_prefixes` are tried before the
/// built-in ones, typically `("", project_namespace)`.
#[must_use]
pub fn to_turtle(triples: &TripleSet, extra_prefixes: &[(&str, &str)]) -> String {
    let mut prefixes = Prefixes::new(extra_prefixes);
    let rdf_type = Iri::in_ns(ns::RDF, "type");
    let mut body = String::new();
    let mut current: Option<&Iri> = None;

    for triple in triples {
        if current == Some(&triple.subject) {
            body.push_str(" ;\n    ");
        } else {
            if current.is_some() {
                body.push_str(" .\n\n");
            }
            let subject = prefixes.abbreviate(&triple.subject);
            let _ = write!(body, "{subject}\n    ");
            current = Some(&triple.subject);
        }

        let predicate = if triple.predicate == rdf_type {
            "a".to_string()
        } else {
            prefixes.abbreviate(&triple.predicate)
        };
        body.push_str(&predicate);
        body.push(' ');
        match &triple.object {
            Term::Iri(iri) => body.push_str(&prefixes.abbreviate(iri)),
            Term::Literal(literal) => match (&literal.datatype, &literal.language) {
                (Some(datatype), None) => {
                    let datatype = prefixes.abbreviate(datatype);
                    let _ = write!(body, "\"{}\"^^{datatype}", escape_literal(&literal.value));
                }
                _ => write_literal(&mut body, literal, full_iri),
            },
        }
    }
    if current.is_some() {
        body.push_str(" .\n");
    }

    let mut out = String::new();
    for (prefix, namespace) in &prefixes.used {
        let _ = writeln!(out, "@prefix {prefix}: <{}> .", escape_iri(namespace));
    }
    if !out.is_empty() && !body.is_empty() {
        out.push('\n');
    }
    out.push_str(&body);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> TripleSet {
        let module = Iri::new("http://w3id.org/oseg/ont/okhkrawl/data/url/x/module");
        let mut set = TripleSet::new();
        set.add(&module, Iri::in_ns(ns::RDF, "type"), Iri::in_ns(ns::OKH, "Module"));
        set.add(
            &module,
            Iri::in_ns(ns::RDFS, "label"),
            Literal::string("Lamp \"v2\"\nwith\ttabs"),
        );
        set.add(&module, Iri::in_ns(ns::OKH, "hasMass"), Literal::float(1.5));
        set
    }

    // ==================== N-Triples Tests ====================

    #[test]
    fn test_ntriples_escapes_literals() {
        let text = to_ntriples(&sample());
        assert!(text.contains(r#""Lamp \"v2\"\nwith\ttabs""#));
        assert!(text.contains(r#""1.5"^^<http://www.w3.org/2001/XMLSchema#float>"#));
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().all(|line| line.ends_with(" .")));
    }

    #[test]
    fn test_ntriples_escapes_iris() {
        let mut set = TripleSet::new();
        set.add(
            &Iri::new("http://x.org/a b"),
            Iri::new("http://x.org/p"),
            Iri::new("http://x.org/<o>"),
        );
        let text = to_ntriples(&set);
        assert_eq!(
            text,
            "<http://x.org/a\\u0020b> <http://x.org/p> <http://x.org/\\u003Co\\u003E> .\n"
        );
    }

    #[test]
    fn test_ntriples_language_tag() {
        let mut set = TripleSet::new();
        let mut literal = Literal::string("Lampe");
        literal.language = Some("de".to_string());
        set.add(&Iri::new("http://x.org/s"), Iri::new("http://x.org/p"), literal);
        assert!(to_ntriples(&set).contains("\"Lampe\"@de"));
    }

    #[test]
    fn test_empty_set_writes_nothing() {
        assert_eq!(to_ntriples(&TripleSet::new()), "");
        assert_eq!(to_turtle(&TripleSet::new(), &[]), "");
    }

    // ==================== Turtle Tests ====================

    #[test]
    fn test_turtle_groups_subject_and_declares_used_prefixes() {
        let namespace = "http://w3id.org/oseg/ont/okhkrawl/data/url/x/";
        let text = to_turtle(&sample(), &[("", namespace)]);

        assert!(text.contains("@prefix : <http://w3id.org/oseg/ont/okhkrawl/data/url/x/> ."));
        assert!(text.contains("@prefix okh: <http://w3id.org/oseg/ont/okh#> ."));
        assert!(text.contains("@prefix xsd: <http://www.w3.org/2001/XMLSchema#> ."));
        assert!(!text.contains("@prefix spdx:"));
        assert!(text.contains(":module\n    "));
        assert!(text.contains("a okh:Module"));
        assert!(text.contains("okh:hasMass \"1.5\"^^xsd:float"));
        assert_eq!(text.matches(" ;\n").count(), 2);
        assert!(text.ends_with(" .\n"));
    }

    #[test]
    fn test_turtle_keeps_unabbreviable_iris_whole() {
        let mut set = TripleSet::new();
        set.add(
            &Iri::in_ns(ns::OKH, "x"),
            Iri::in_ns(ns::ODS, "source"),
            Iri::new("https://github.com/org/lamp"),
        );
        set.add(
            &Iri::in_ns(ns::OKH, "x"),
            Iri::in_ns(ns::ODS, "fileFormat"),
            Iri::in_ns(ns::MIME, "text/markdown"),
        );
        let text = to_turtle(&set, &[]);
        assert!(text.contains("<https://github.com/org/lamp>"));
        assert!(text.contains("<http://www.iana.org/assignments/media-types/text/markdown>"));
        assert!(!text.contains("@prefix mime:"));
    }

    #[test]
    fn test_turtle_is_deterministic() {
        assert_eq!(to_turtle(&sample(), &[]), to_turtle(&sample(), &[]));
    }
}
