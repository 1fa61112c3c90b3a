//! [`CanonicalManifest`] to triples.
//!
//! Every top-level manifest field that carries a value must have a row in the
//! predicate table; a field without one is an [`SerializeError::UnmappableField`]
//! rather than being dropped. Subjects are derived from the project's platform
//! and id plus fixed local names, never from manifest content, so the same
//! project always lands on the same IRIs.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::instrument;

use super::{Iri, Literal, TripleSet, ns};
use crate::license::{ALL_RIGHTS_RESERVED_ID, LicenseRef, NO_ASSERTION_ID};
use crate::model::{
    Agent, AgentKind, CanonicalField, CanonicalManifest, CrawlMeta, Dimensions, Field, FileRef,
    Part, ProjectRef, SourcingProcedure, platform,
};

/// Serialization failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SerializeError {
    #[error("no predicate mapping for manifest field '{}'", .field.key())]
    UnmappableField { field: CanonicalField },
}

/// Where a manifest came from, recorded on the data-set node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub sourcing_procedure: SourcingProcedure,
    pub source_url: Option<String>,
}

impl Provenance {
    #[must_use]
    pub fn new(sourcing_procedure: SourcingProcedure, source_url: Option<&str>) -> Self {
        Self {
            sourcing_procedure,
            source_url: source_url.map(str::to_string),
        }
    }
}

impl From<&CrawlMeta> for Provenance {
    fn from(meta: &CrawlMeta) -> Self {
        Self::new(meta.sourcing_procedure, Some(&meta.source_url))
    }
}

/// Field to predicate rows for the module node.
const PREDICATES: [(CanonicalField, &str, &str); 25] = [
    (CanonicalField::Okhv, ns::OKH, "okhv"),
    (CanonicalField::Name, ns::RDFS, "label"),
    (CanonicalField::Repo, ns::ODS, "source"),
    (CanonicalField::Version, ns::OKH, "version"),
    (CanonicalField::Release, ns::OKH, "release"),
    (CanonicalField::License, ns::ODS, "license"),
    (CanonicalField::Licensor, ns::ODS, "licensor"),
    (CanonicalField::Organization, ns::OKH, "organization"),
    (CanonicalField::Function, ns::OKH, "function"),
    (CanonicalField::DocumentationLanguage, ns::OKH, "documentationLanguage"),
    (CanonicalField::TechnologyReadinessLevel, ns::OKH, "technologyReadinessLevel"),
    (CanonicalField::DocumentationReadinessLevel, ns::OKH, "documentationReadinessLevel"),
    (CanonicalField::Attestation, ns::OKH, "attestation"),
    (CanonicalField::Publication, ns::OKH, "hasPublication"),
    (CanonicalField::StandardCompliance, ns::OKH, "standardCompliance"),
    (CanonicalField::CpcPatentClass, ns::OKH, "cpcPatentClass"),
    (CanonicalField::Tsdc, ns::OKH, "tsdc"),
    (CanonicalField::Readme, ns::OKH, "hasReadme"),
    (CanonicalField::ContributionGuide, ns::OKH, "hasContributionGuide"),
    (CanonicalField::Image, ns::OKH, "hasImage"),
    (CanonicalField::Bom, ns::OKH, "hasBoM"),
    (CanonicalField::ManufacturingInstructions, ns::OKH, "hasManufacturingInstructions"),
    (CanonicalField::UserManual, ns::OKH, "hasUserManual"),
    (CanonicalField::OuterDimensions, ns::OKH, "hasOuterDimensions"),
    (CanonicalField::Part, ns::OKH, "hasComponent"),
];

fn rdf_type() -> Iri {
    Iri::in_ns(ns::RDF, "type")
}

fn okh(local: &str) -> Iri {
    Iri::in_ns(ns::OKH, local)
}

fn ods(local: &str) -> Iri {
    Iri::in_ns(ns::ODS, local)
}

fn schema(local: &str) -> Iri {
    Iri::in_ns(ns::SCHEMA, local)
}

/// Namespace holding every node of one project.
#[must_use]
pub fn project_namespace(project: &ProjectRef) -> String {
    format!(
        "{}{}/{}/",
        ns::DATA,
        urlencoding::encode(&project.platform),
        urlencoding::encode(&project.id)
    )
}

fn data_provider(platform_key: &str) -> Iri {
    let local = match platform_key {
        platform::GITHUB => "dataProviderGithub",
        platform::OSHWA => "dataProviderOshwa",
        platform::THINGIVERSE => "dataProviderThingiverse",
        platform::APPROPEDIA => "dataProviderAppropedia",
        platform::MANIFESTS_REPO => "dataProviderManifestsRepo",
        _ => "dataProviderUrl",
    };
    Iri::in_ns(ns::OKHKRAWL, local)
}

fn sourcing_procedure(procedure: SourcingProcedure) -> Iri {
    let local = match procedure {
        SourcingProcedure::Api => "dataSourcingProcedureApi",
        SourcingProcedure::GeneratedManifest => "dataSourcingProcedureGeneratedManifest",
        SourcingProcedure::Manifest => "dataSourcingProcedureManifest",
        SourcingProcedure::Direct => "dataSourcingProcedureDirect",
    };
    Iri::in_ns(ns::OKHKRAWL, local)
}

/// `OTRL-4` to `otrl:OTRL4`, `ODRL-3*` to `otrl:ODRL3Star`.
fn readiness_level(level: &str) -> Option<Iri> {
    let local = level.trim().replace('-', "").replace('*', "Star");
    code_iri(ns::OTRL, &local)
}

/// IRI for a code of ASCII letters, digits and dashes; `None` otherwise.
fn code_iri(namespace: &str, code: &str) -> Option<Iri> {
    let code = code.trim();
    let valid = !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    valid.then(|| Iri::in_ns(namespace, code))
}

/// IRI for absolute http(s) URLs, plain literal otherwise.
fn link(value: &str) -> super::Term {
    match Iri::parse_http(value) {
        Some(iri) => iri.into(),
        None => Literal::string(value).into(),
    }
}

/// Builds subjects inside one project namespace.
struct Nodes {
    namespace: String,
}

impl Nodes {
    fn node(&self, local: &str) -> Iri {
        Iri::new(format!("{}{local}", self.namespace))
    }
}

/// Converts canonical manifests to triples.
#[derive(Debug, Clone)]
pub struct RdfSerializer {
    predicates: BTreeMap<CanonicalField, Iri>,
}

impl Default for RdfSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl RdfSerializer {
    /// Serializer with the built-in predicate table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_predicates(
            PREDICATES
                .iter()
                .map(|(field, namespace, local)| (*field, Iri::in_ns(namespace, local))),
        )
    }

    /// Serializer with a custom predicate table.
    #[must_use]
    pub fn with_predicates(rows: impl IntoIterator<Item = (CanonicalField, Iri)>) -> Self {
        Self {
            predicates: rows.into_iter().collect(),
        }
    }

    fn predicate(&self, field: CanonicalField) -> Result<Iri, SerializeError> {
        self.predicates
            .get(&field)
            .cloned()
            .ok_or(SerializeError::UnmappableField { field })
    }

    /// Serializes one project's manifest.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::UnmappableField`] if a populated field has no
    /// predicate.
    #[instrument(skip_all, fields(project = %project))]
    pub fn serialize(
        &self,
        project: &ProjectRef,
        provenance: &Provenance,
        manifest: &CanonicalManifest,
    ) -> Result<TripleSet, SerializeError> {
        let nodes = Nodes {
            namespace: project_namespace(project),
        };
        let mut out = TripleSet::new();
        let module = nodes.node("module");

        add_data_set(&mut out, &nodes, project, provenance, &module);
        out.add(&module, rdf_type(), okh("Module"));
        out.add(&module, ods("host"), data_provider(&project.platform));

        for field in manifest.populated_fields() {
            let predicate = self.predicate(field)?;
            add_field(&mut out, &nodes, &module, field, predicate, manifest);
        }
        Ok(out)
    }
}

fn add_data_set(
    out: &mut TripleSet,
    nodes: &Nodes,
    project: &ProjectRef,
    provenance: &Provenance,
    module: &Iri,
) {
    let data_set = nodes.node("dataSet");
    out.add(&data_set, rdf_type(), ods("Dataset"));
    out.add(
        &data_set,
        Iri::in_ns(ns::RDFS, "label"),
        Literal::string("Covers all the data in this namespace"),
    );
    out.add(&data_set, ods("primaryHost"), data_provider(&project.platform));
    out.add(
        &data_set,
        ods("dataSourcingProcedure"),
        sourcing_procedure(provenance.sourcing_procedure),
    );
    if let Some(source) = &provenance.source_url {
        out.add(&data_set, ods("source"), link(source));
    }
    out.add(&data_set, schema("about"), module.clone());
}

#[allow(clippy::too_many_lines)]
fn add_field(
    out: &mut TripleSet,
    nodes: &Nodes,
    module: &Iri,
    field: CanonicalField,
    predicate: Iri,
    m: &CanonicalManifest,
) {
    match field {
        CanonicalField::Okhv => add_text(out, module, predicate, &m.okhv),
        CanonicalField::Name => add_text(out, module, predicate, &m.name),
        CanonicalField::Version => add_text(out, module, predicate, &m.version),
        CanonicalField::Release => add_text(out, module, predicate, &m.release),
        CanonicalField::Function => add_text(out, module, predicate, &m.function),
        CanonicalField::CpcPatentClass => add_text(out, module, predicate, &m.cpc_patent_class),
        CanonicalField::Repo => {
            if let Some(repo) = m.repo.get() {
                out.add(module, predicate, link(repo));
            }
        }
        CanonicalField::License => add_license(out, module, predicate, &m.license),
        CanonicalField::Licensor => {
            add_agents(out, nodes, module, predicate, &m.licensors, "licensor");
        }
        CanonicalField::Organization => {
            add_agents(out, nodes, module, predicate, &m.organizations, "organization");
        }
        CanonicalField::DocumentationLanguage => {
            for language in &m.documentation_language {
                out.add(module, predicate.clone(), Literal::string(language));
            }
        }
        CanonicalField::TechnologyReadinessLevel => {
            if let Some(iri) = m.technology_readiness_level.get().and_then(|l| readiness_level(l)) {
                out.add(module, predicate, iri);
            }
        }
        CanonicalField::DocumentationReadinessLevel => {
            if let Some(iri) = m.documentation_readiness_level.get().and_then(|l| readiness_level(l)) {
                out.add(module, predicate, iri);
            }
        }
        CanonicalField::Attestation => {
            for attestation in &m.attestation {
                out.add(
                    module,
                    predicate.clone(),
                    Literal::typed(attestation, Iri::in_ns(ns::XSD, "anyURI")),
                );
            }
        }
        CanonicalField::Publication => {
            for (index, doi) in m.publication.iter().enumerate() {
                let node = nodes.node(&format!("publication{}", index + 1));
                out.add(&node, rdf_type(), okh("Publication"));
                out.add(&node, okh("doi"), Literal::string(doi));
                out.add(module, predicate.clone(), node);
            }
        }
        CanonicalField::StandardCompliance => {
            for standard in &m.standard_compliance {
                out.add(module, predicate.clone(), Literal::string(standard));
            }
        }
        CanonicalField::Tsdc => {
            if let Some(iri) = m.tsdc.get().and_then(|tsdc| code_iri(ns::TSDC, tsdc)) {
                out.add(module, predicate, iri);
            }
        }
        CanonicalField::Readme => {
            add_files(out, nodes, module, predicate, &m.readme, "readme", "File");
        }
        CanonicalField::Image => {
            add_files(out, nodes, module, predicate, &m.image, "image", "Image");
        }
        CanonicalField::ManufacturingInstructions => add_files(
            out,
            nodes,
            module,
            predicate,
            &m.manufacturing_instructions,
            "manufacturingInstructions",
            "File",
        ),
        CanonicalField::ContributionGuide => {
            add_single_file(out, nodes, module, predicate, &m.contribution_guide, "contributionGuide");
        }
        CanonicalField::Bom => add_single_file(out, nodes, module, predicate, &m.bom, "bom"),
        CanonicalField::UserManual => {
            add_single_file(out, nodes, module, predicate, &m.user_manual, "userManual");
        }
        CanonicalField::OuterDimensions => {
            if let Some(dimensions) = m.outer_dimensions.get() {
                add_dimensions(out, nodes, module, predicate, dimensions, "moduleOuterDimensions");
            }
        }
        CanonicalField::Part => {
            for (index, part) in m.parts.iter().enumerate() {
                let name = format!("part{}", index + 1);
                let node = nodes.node(&name);
                add_part(out, nodes, &node, &name, part);
                out.add(module, predicate.clone(), node);
            }
        }
    }
}

fn add_text(out: &mut TripleSet, subject: &Iri, predicate: Iri, value: &Field<String>) {
    if let Some(value) = value.get() {
        out.add(subject, predicate, Literal::string(value));
    }
}

fn add_license(out: &mut TripleSet, subject: &Iri, predicate: Iri, license: &LicenseRef) {
    match license {
        LicenseRef::Spdx(id) => out.add(subject, predicate, Iri::in_ns(ns::SPDX, id)),
        LicenseRef::Expression(expression) => {
            out.add(subject, ods("licenseExpression"), Literal::string(expression));
        }
        LicenseRef::NoAssertion => {
            out.add(subject, predicate, Iri::in_ns(ns::OKHKRAWL, NO_ASSERTION_ID));
        }
        LicenseRef::AllRightsReserved => {
            out.add(subject, predicate, Iri::in_ns(ns::OKHKRAWL, ALL_RIGHTS_RESERVED_ID));
        }
    }
}

fn add_agents(
    out: &mut TripleSet,
    nodes: &Nodes,
    subject: &Iri,
    predicate: Iri,
    agents: &[Agent],
    local_prefix: &str,
) {
    for (index, agent) in agents.iter().enumerate() {
        let node = nodes.node(&format!("{local_prefix}{}", index + 1));
        let class = match agent.kind {
            AgentKind::Person => "Person",
            AgentKind::Organization => "Organization",
        };
        out.add(&node, rdf_type(), schema(class));
        out.add(&node, schema("name"), Literal::string(&agent.name));
        if let Some(email) = &agent.email {
            out.add(&node, schema("email"), Literal::string(email));
        }
        if let Some(url) = agent.url.as_deref().and_then(Iri::parse_http) {
            out.add(&node, schema("url"), url);
        }
        if let Some(orcid) = &agent.orcid {
            out.add(
                &node,
                schema("identifier"),
                Iri::new(format!("https://orcid.org/{orcid}")),
            );
        }
        out.add(subject, predicate.clone(), node);
    }
}

fn add_file_node(out: &mut TripleSet, node: &Iri, file: &FileRef, class: &str) {
    let class = if class == "Image" { okh("Image") } else { ods("File") };
    out.add(node, rdf_type(), class);
    if let Some(path) = &file.path {
        out.add(node, ods("relativePath"), Literal::string(path));
    }
    if let Some(url) = &file.url {
        out.add(node, ods("url"), link(url));
    }
    if let Some(mime) = &file.mime_type {
        out.add(node, ods("fileFormat"), Iri::in_ns(ns::MIME, mime));
    }
}

fn add_files(
    out: &mut TripleSet,
    nodes: &Nodes,
    subject: &Iri,
    predicate: Iri,
    files: &[FileRef],
    local_prefix: &str,
    class: &str,
) {
    for (index, file) in files.iter().enumerate() {
        let node = nodes.node(&format!("{local_prefix}{}", index + 1));
        add_file_node(out, &node, file, class);
        out.add(subject, predicate.clone(), node);
    }
}

fn add_single_file(
    out: &mut TripleSet,
    nodes: &Nodes,
    subject: &Iri,
    predicate: Iri,
    file: &Field<FileRef>,
    local: &str,
) {
    if let Some(file) = file.get() {
        let node = nodes.node(local);
        add_file_node(out, &node, file, "File");
        out.add(subject, predicate, node);
    }
}

fn add_dimensions(
    out: &mut TripleSet,
    nodes: &Nodes,
    subject: &Iri,
    predicate: Iri,
    dimensions: &Dimensions,
    local: &str,
) {
    let node = nodes.node(local);
    out.add(&node, rdf_type(), okh("Dimensions"));
    out.add(&node, okh("width"), Literal::float(dimensions.width));
    out.add(&node, okh("height"), Literal::float(dimensions.height));
    out.add(&node, okh("depth"), Literal::float(dimensions.depth));
    out.add(subject, predicate, node);
}

fn add_part(out: &mut TripleSet, nodes: &Nodes, node: &Iri, name: &str, part: &Part) {
    out.add(node, rdf_type(), okh("Part"));
    add_text(out, node, Iri::in_ns(ns::RDFS, "label"), &part.name);
    if let Some(license) = part.license.get() {
        add_license(out, node, ods("license"), license);
    }
    add_agents(out, nodes, node, ods("licensor"), &part.licensors, &format!("{name}Licensor"));
    for language in &part.documentation_language {
        out.add(node, okh("documentationLanguage"), Literal::string(language));
    }
    add_text(out, node, okh("material"), &part.material);
    add_text(out, node, okh("manufacturingProcess"), &part.manufacturing_process);
    if let Some(mass) = part.mass.get() {
        out.add(node, okh("hasMass"), Literal::float(*mass));
    }
    if let Some(dimensions) = part.outer_dimensions.get() {
        add_dimensions(
            out,
            nodes,
            node,
            okh("hasOuterDimensions"),
            dimensions,
            &format!("{name}OuterDimensions"),
        );
    }
    if let Some(iri) = part.tsdc.get().and_then(|tsdc| code_iri(ns::TSDC, tsdc)) {
        out.add(node, okh("tsdc"), iri);
    }
    add_files(out, nodes, node, okh("source"), &part.source, &format!("{name}Source"), "File");
    add_files(out, nodes, node, okh("export"), &part.export, &format!("{name}Export"), "File");
    add_files(out, nodes, node, okh("hasImage"), &part.image, &format!("{name}Image"), "Image");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::rdf::{Term, Triple, to_ntriples};

    fn project() -> ProjectRef {
        ProjectRef::new("github.com", "org/lamp/okh.toml", "https://github.com/org/lamp")
    }

    fn provenance() -> Provenance {
        Provenance::new(
            SourcingProcedure::Manifest,
            Some("https://raw.githubusercontent.com/org/lamp/HEAD/okh.toml"),
        )
    }

    fn lamp() -> CanonicalManifest {
        CanonicalManifest {
            okhv: Field::Present("OKH-LOSHv1.0".to_string()),
            name: Field::Present("Lamp".to_string()),
            repo: Field::Present("https://github.com/org/lamp".to_string()),
            version: Field::Present("1.0.0".to_string()),
            license: LicenseRef::Spdx("CERN-OHL-S-2.0".to_string()),
            licensors: vec![Agent::person("Ada")],
            technology_readiness_level: Field::Present("OTRL-4".to_string()),
            documentation_readiness_level: Field::Present("ODRL-3*".to_string()),
            readme: vec![FileRef::from_path("README.md")],
            parts: vec![Part {
                name: Field::Present("Shade".to_string()),
                mass: Field::Present(120.0),
                outer_dimensions: Field::Present(Dimensions {
                    width: 1.0,
                    height: 2.0,
                    depth: 3.5,
                }),
                ..Part::default()
            }],
            ..CanonicalManifest::default()
        }
    }

    fn ns_node(local: &str) -> Iri {
        Iri::new(format!("{}{local}", project_namespace(&project())))
    }

    // ==================== Subject Identity Tests ====================

    #[test]
    fn test_namespace_encodes_id() {
        assert_eq!(
            project_namespace(&project()),
            "http://w3id.org/oseg/ont/okhkrawl/data/github.com/org%2Flamp%2Fokh.toml/"
        );
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let serializer = RdfSerializer::new();
        let first = serializer.serialize(&project(), &provenance(), &lamp()).unwrap();
        let second = serializer.serialize(&project(), &provenance(), &lamp()).unwrap();
        assert_eq!(to_ntriples(&first), to_ntriples(&second));
    }

    #[test]
    fn test_subjects_do_not_depend_on_content() {
        let serializer = RdfSerializer::new();
        let mut renamed = lamp();
        renamed.name = Field::Present("Desk Lamp".to_string());
        let a = serializer.serialize(&project(), &provenance(), &lamp()).unwrap();
        let b = serializer.serialize(&project(), &provenance(), &renamed).unwrap();
        let subjects = |set: &TripleSet| {
            set.iter()
                .map(|t| t.subject.clone())
                .collect::<std::collections::BTreeSet<_>>()
        };
        assert_eq!(subjects(&a), subjects(&b));
    }

    // ==================== Mapping Tests ====================

    #[test]
    fn test_module_and_data_set_triples() {
        let triples = RdfSerializer::new()
            .serialize(&project(), &provenance(), &lamp())
            .unwrap();
        let module = ns_node("module");
        let data_set = ns_node("dataSet");

        assert!(triples.contains(&Triple::new(module.clone(), rdf_type(), okh("Module"))));
        assert!(triples.contains(&Triple::new(
            module.clone(),
            Iri::in_ns(ns::RDFS, "label"),
            Literal::string("Lamp")
        )));
        assert!(triples.contains(&Triple::new(
            module.clone(),
            ods("source"),
            Iri::new("https://github.com/org/lamp")
        )));
        assert!(triples.contains(&Triple::new(
            data_set.clone(),
            ods("dataSourcingProcedure"),
            Iri::in_ns(ns::OKHKRAWL, "dataSourcingProcedureManifest")
        )));
        assert!(triples.contains(&Triple::new(
            data_set,
            ods("primaryHost"),
            Iri::in_ns(ns::OKHKRAWL, "dataProviderGithub")
        )));
    }

    #[test]
    fn test_readiness_levels_and_license() {
        let triples = RdfSerializer::new()
            .serialize(&project(), &provenance(), &lamp())
            .unwrap();
        let module = ns_node("module");
        assert!(triples.contains(&Triple::new(
            module.clone(),
            okh("technologyReadinessLevel"),
            Iri::in_ns(ns::OTRL, "OTRL4")
        )));
        assert!(triples.contains(&Triple::new(
            module.clone(),
            okh("documentationReadinessLevel"),
            Iri::in_ns(ns::OTRL, "ODRL3Star")
        )));
        assert!(triples.contains(&Triple::new(
            module,
            ods("license"),
            Iri::in_ns(ns::SPDX, "CERN-OHL-S-2.0")
        )));
    }

    #[test]
    fn test_license_sentinels_never_mix() {
        let serializer = RdfSerializer::new();
        let no_assertion: Term = Iri::in_ns(ns::OKHKRAWL, NO_ASSERTION_ID).into();
        let reserved: Term = Iri::in_ns(ns::OKHKRAWL, ALL_RIGHTS_RESERVED_ID).into();

        let mut manifest = lamp();
        manifest.license = LicenseRef::NoAssertion;
        let triples = serializer.serialize(&project(), &provenance(), &manifest).unwrap();
        assert!(triples.mentions(&no_assertion));
        assert!(!triples.mentions(&reserved));

        manifest.license = LicenseRef::AllRightsReserved;
        let triples = serializer.serialize(&project(), &provenance(), &manifest).unwrap();
        assert!(triples.mentions(&reserved));
        assert!(!triples.mentions(&no_assertion));
    }

    #[test]
    fn test_license_expression_is_literal() {
        let mut manifest = lamp();
        manifest.license = LicenseRef::Expression("MIT OR Apache-2.0".to_string());
        let triples = RdfSerializer::new()
            .serialize(&project(), &provenance(), &manifest)
            .unwrap();
        assert!(triples.contains(&Triple::new(
            ns_node("module"),
            ods("licenseExpression"),
            Literal::string("MIT OR Apache-2.0")
        )));
    }

    #[test]
    fn test_missing_fields_emit_nothing() {
        let triples = RdfSerializer::new()
            .serialize(&project(), &provenance(), &lamp())
            .unwrap();
        assert_eq!(triples.objects(&okh("function")).count(), 0);
        assert_eq!(triples.objects(&okh("release")).count(), 0);
        for triple in &triples {
            if let Term::Literal(literal) = &triple.object {
                assert!(!literal.value.is_empty(), "empty literal on {triple:?}");
            }
        }
    }

    #[test]
    fn test_free_text_codes_emit_no_iri() {
        let manifest = CanonicalManifest {
            technology_readiness_level: Field::Present("OTRL 4 (prototype)".to_string()),
            tsdc: Field::Present("MEC 1".to_string()),
            ..lamp()
        };
        let triples = RdfSerializer::new()
            .serialize(&project(), &provenance(), &manifest)
            .unwrap();
        assert_eq!(triples.objects(&okh("technologyReadinessLevel")).count(), 0);
        assert_eq!(triples.objects(&okh("tsdc")).count(), 0);
        for triple in &triples {
            if let Term::Iri(iri) = &triple.object {
                assert!(!iri.as_str().contains(' '), "invalid IRI on {triple:?}");
            }
        }
    }

    #[test]
    fn test_part_nodes() {
        let triples = RdfSerializer::new()
            .serialize(&project(), &provenance(), &lamp())
            .unwrap();
        let part = ns_node("part1");
        let dimensions = ns_node("part1OuterDimensions");
        assert!(triples.contains(&Triple::new(ns_node("module"), okh("hasComponent"), part.clone())));
        assert!(triples.contains(&Triple::new(part.clone(), okh("hasMass"), Literal::float(120.0))));
        assert!(triples.contains(&Triple::new(part, okh("hasOuterDimensions"), dimensions.clone())));
        assert!(triples.contains(&Triple::new(dimensions, okh("depth"), Literal::float(3.5))));
    }

    #[test]
    fn test_unmapped_field_is_an_error() {
        let rows = PREDICATES
            .iter()
            .filter(|(field, _, _)| *field != CanonicalField::Version)
            .map(|(field, namespace, local)| (*field, Iri::in_ns(namespace, local)));
        let serializer = RdfSerializer::with_predicates(rows);

        assert_eq!(
            serializer.serialize(&project(), &provenance(), &lamp()),
            Err(SerializeError::UnmappableField {
                field: CanonicalField::Version
            })
        );
    }

    #[test]
    fn test_every_field_has_a_predicate() {
        let serializer = RdfSerializer::new();
        for (field, _, _) in PREDICATES {
            assert!(serializer.predicate(field).is_ok());
        }
        assert_eq!(serializer.predicates.len(), PREDICATES.len());
    }
}
