//! Reads mapping-table rules against a parsed payload tree.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use url::Url;

use super::mapping::{FieldRule, MappingTable, ValueKind};
use super::sanitize::{sanitize_text, strip_html};
use super::{NormalizeWarning, WarningKind};
use crate::license::{AliasTarget, LicensePolicy, LicenseRef, alias, resolve_license};
use crate::model::{
    Agent, AgentKind, CanonicalField, CanonicalManifest, Dimensions, Field, FileRef, Part,
    ProjectRef,
};

#[allow(clippy::expect_used)]
static NAME_WITH_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([^<]+?)\s*<\s*([^<>\s]+@[^<>\s]+)\s*>\s*$").expect("valid regex")
});

#[allow(clippy::expect_used)]
static LANGUAGE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z]{2,3}(-[a-zA-Z0-9]{2,8})*$").expect("valid regex")
});

#[allow(clippy::expect_used)]
static READINESS_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(O[TD]RL)-?([0-9])(\*?)$").expect("valid regex"));

#[allow(clippy::expect_used)]
static TSDC_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{2,5}(-[A-Z0-9]+)*$").expect("valid regex"));

#[allow(clippy::expect_used)]
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-?[0-9]+(?:\.[0-9]+)?)").expect("valid regex"));

#[allow(clippy::expect_used)]
static WINDOWS_ABSOLUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]:[\\/]").expect("valid regex"));

const ORCID_PREFIXES: [&str; 2] = ["https://orcid.org/", "http://orcid.org/"];

/// File extensions treated as fabrication exports rather than design sources.
const EXPORT_EXTENSIONS: [&str; 6] = ["stl", "3mf", "obj", "amf", "ply", "gcode"];

/// MIME types by lowercase file extension.
static MIME_TYPES: &[(&str, &str)] = &[
    ("3mf", "model/3mf"),
    ("csv", "text/csv"),
    ("dxf", "image/vnd.dxf"),
    ("fcstd", "application/x-extension-fcstd"),
    ("gcode", "text/x.gcode"),
    ("gif", "image/gif"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("json", "application/json"),
    ("md", "text/markdown"),
    ("obj", "model/obj"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("scad", "application/x-openscad"),
    ("step", "model/step"),
    ("stl", "model/stl"),
    ("stp", "model/step"),
    ("svg", "image/svg+xml"),
    ("toml", "application/toml"),
    ("txt", "text/plain"),
    ("webp", "image/webp"),
    ("yaml", "application/yaml"),
    ("yml", "application/yaml"),
    ("zip", "application/zip"),
];

/// Guesses a MIME type from the extension of a path or URL.
#[must_use]
pub fn guess_mime(path_or_url: &str) -> Option<&'static str> {
    let trimmed = path_or_url.split(['?', '#']).next().unwrap_or_default();
    let file_name = trimmed.rsplit('/').next().unwrap_or_default();
    let (_, extension) = file_name.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find_map(|(ext, mime)| (*ext == extension).then_some(*mime))
}

/// A value read for one rule, before it is stored in the manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Text(String),
    Texts(Vec<String>),
    Agents(Vec<Agent>),
    File(FileRef),
    Files(Vec<FileRef>),
    Parts(Vec<Part>),
    Dimensions(Dimensions),
    License(LicenseRef),
}

/// Stores an extracted value in the manifest field it belongs to.
///
/// Returns `false` when the value shape does not fit the field.
pub fn assign(manifest: &mut CanonicalManifest, field: CanonicalField, value: Extracted) -> bool {
    use CanonicalField as F;

    match (field, value) {
        (F::Okhv, Extracted::Text(v)) => manifest.okhv = Field::Present(v),
        (F::Name, Extracted::Text(v)) => manifest.name = Field::Present(v),
        (F::Repo, Extracted::Text(v)) => manifest.repo = Field::Present(v),
        (F::Version, Extracted::Text(v)) => manifest.version = Field::Present(v),
        (F::Release, Extracted::Text(v)) => manifest.release = Field::Present(v),
        (F::Function, Extracted::Text(v)) => manifest.function = Field::Present(v),
        (F::TechnologyReadinessLevel, Extracted::Text(v)) => {
            manifest.technology_readiness_level = Field::Present(v);
        }
        (F::DocumentationReadinessLevel, Extracted::Text(v)) => {
            manifest.documentation_readiness_level = Field::Present(v);
        }
        (F::CpcPatentClass, Extracted::Text(v)) => manifest.cpc_patent_class = Field::Present(v),
        (F::Tsdc, Extracted::Text(v)) => manifest.tsdc = Field::Present(v),
        (F::License, Extracted::License(v)) => manifest.license = v,
        (F::Licensor, Extracted::Agents(v)) => manifest.licensors = v,
        (F::Organization, Extracted::Agents(v)) => manifest.organizations = v,
        (F::DocumentationLanguage, Extracted::Texts(v)) => manifest.documentation_language = v,
        (F::Attestation, Extracted::Texts(v)) => manifest.attestation = v,
        (F::Publication, Extracted::Texts(v)) => manifest.publication = v,
        (F::StandardCompliance, Extracted::Texts(v)) => manifest.standard_compliance = v,
        (F::Readme, Extracted::Files(v)) => manifest.readme = v,
        (F::Image, Extracted::Files(v)) => manifest.image = v,
        (F::ManufacturingInstructions, Extracted::Files(v)) => {
            manifest.manufacturing_instructions = v;
        }
        (F::ContributionGuide, Extracted::File(v)) => manifest.contribution_guide = Field::Present(v),
        (F::Bom, Extracted::File(v)) => manifest.bom = Field::Present(v),
        (F::UserManual, Extracted::File(v)) => manifest.user_manual = Field::Present(v),
        (F::OuterDimensions, Extracted::Dimensions(v)) => {
            manifest.outer_dimensions = Field::Present(v);
        }
        (F::Part, Extracted::Parts(v)) => manifest.parts = v,
        _ => return false,
    }
    true
}

/// Reads one payload tree, collecting warnings as it goes.
pub struct Extractor<'a> {
    root: &'a Value,
    project: &'a ProjectRef,
    base_url: Option<Url>,
    policy: &'a LicensePolicy,
    warnings: Vec<NormalizeWarning>,
}

impl<'a> Extractor<'a> {
    /// `source_url` is used to resolve relative file paths when it is http(s).
    pub fn new(
        root: &'a Value,
        project: &'a ProjectRef,
        source_url: Option<&str>,
        policy: &'a LicensePolicy,
    ) -> Self {
        let base_url = source_url
            .and_then(|url| Url::parse(url).ok())
            .filter(|url| matches!(url.scheme(), "http" | "https"));
        Self {
            root,
            project,
            base_url,
            policy,
            warnings: Vec::new(),
        }
    }

    /// Applies every rule of `table` and returns the manifest and warnings.
    pub fn run(mut self, table: &MappingTable) -> (CanonicalManifest, Vec<NormalizeWarning>) {
        let mut manifest = CanonicalManifest::default();
        for rule in table.rules {
            if let Some(value) = self.extract(rule) {
                assign(&mut manifest, rule.field, value);
            }
        }
        (manifest, self.warnings)
    }

    fn warn(&mut self, field: CanonicalField, kind: WarningKind, detail: impl Into<String>) {
        self.warnings.push(NormalizeWarning {
            field,
            kind,
            detail: detail.into(),
        });
    }

    fn at(&self, pointer: &str) -> Option<&'a Value> {
        self.root.pointer(pointer).filter(|v| !v.is_null())
    }

    /// Reads the value for one rule.
    pub fn extract(&mut self, rule: &FieldRule) -> Option<Extracted> {
        let field = rule.field;
        let sources = rule.sources;
        match rule.kind {
            ValueKind::Text => self.first_text(sources, text_of).map(Extracted::Text),
            ValueKind::Html => self.first_text(sources, html_of).map(Extracted::Text),
            ValueKind::Url => self.first_url(field, sources).map(Extracted::Text),
            ValueKind::TextList => {
                let texts = self.all_values(sources).flat_map(texts_of).collect();
                non_empty(dedup(texts)).map(Extracted::Texts)
            }
            ValueKind::Languages => {
                let texts = self.all_values(sources).flat_map(texts_of).collect();
                let languages = self.languages(field, dedup(texts));
                non_empty(languages).map(Extracted::Texts)
            }
            ValueKind::ReadinessLevel(prefix) => {
                let text = self.first_text(sources, text_of)?;
                self.readiness_level(field, prefix, text).map(Extracted::Text)
            }
            ValueKind::Tsdc => {
                let text = self.first_text(sources, text_of)?;
                self.tsdc(field, text).map(Extracted::Text)
            }
            ValueKind::Agents(kind) => {
                let values: Vec<&Value> = self.all_values(sources).collect();
                let mut agents = Vec::new();
                for value in values {
                    self.agents_of(field, value, kind, &mut agents);
                }
                agents.dedup_by(|a, b| a.name == b.name && a.email == b.email);
                non_empty(agents).map(Extracted::Agents)
            }
            ValueKind::TypedParty {
                type_at,
                contact_at,
            } => self
                .typed_party(field, sources, type_at, contact_at)
                .map(|agent| Extracted::Agents(vec![agent])),
            ValueKind::File => {
                let values: Vec<&Value> = self.all_values(sources).collect();
                values
                    .into_iter()
                    .find_map(|value| self.files_of(field, value).into_iter().next())
                    .map(Extracted::File)
            }
            ValueKind::Files => {
                let values: Vec<&Value> = self.all_values(sources).collect();
                let files = values
                    .into_iter()
                    .flat_map(|value| self.files_of(field, value))
                    .collect();
                non_empty(files).map(Extracted::Files)
            }
            ValueKind::Parts => {
                let value = self.all_values(sources).next()?;
                non_empty(self.parts_of(value)).map(Extracted::Parts)
            }
            ValueKind::FileListing => {
                let value = self.all_values(sources).next()?;
                self.file_listing(field, value)
                    .map(|part| Extracted::Parts(vec![part]))
            }
            ValueKind::Dimensions => self
                .all_values(sources)
                .find_map(dimensions_of)
                .map(Extracted::Dimensions),
            ValueKind::License(aliases) => self
                .license(field, sources, aliases)
                .map(Extracted::License),
            ValueKind::Category(table) => self
                .all_values(sources)
                .flat_map(texts_of)
                .find_map(|category| {
                    table
                        .iter()
                        .find(|(label, _)| label.eq_ignore_ascii_case(&category))
                        .map(|(_, cpc)| (*cpc).to_string())
                })
                .map(Extracted::Text),
            ValueKind::ProjectUrl => {
                let url = self.project.canonical_url.trim();
                (!url.is_empty()).then(|| Extracted::Text(url.to_string()))
            }
            ValueKind::Constant(value) => Some(Extracted::Text(value.to_string())),
        }
    }

    fn all_values<'s>(&'s self, sources: &'s [&'static str]) -> impl Iterator<Item = &'a Value> + 's {
        sources.iter().filter_map(|pointer| self.at(pointer))
    }

    fn first_text(&self, sources: &[&'static str], read: fn(&Value) -> Option<String>) -> Option<String> {
        self.all_values(sources).find_map(read)
    }

    fn first_url(&mut self, field: CanonicalField, sources: &[&'static str]) -> Option<String> {
        let texts: Vec<String> = self.all_values(sources).filter_map(text_of).collect();
        for text in texts {
            match http_url(&text) {
                Some(url) => return Some(url.to_string()),
                None => self.warn(field, WarningKind::MalformedUrl, text),
            }
        }
        None
    }

    fn languages(&mut self, field: CanonicalField, tags: Vec<String>) -> Vec<String> {
        let mut valid = Vec::with_capacity(tags.len());
        for tag in tags {
            if LANGUAGE_TAG.is_match(&tag) {
                valid.push(tag);
            } else {
                self.warn(field, WarningKind::InvalidLanguage, tag);
            }
        }
        valid
    }

    /// Canonical `OTRL-4` / `ODRL-3*` form of a level carrying `prefix`.
    fn readiness_level(&mut self, field: CanonicalField, prefix: &str, text: String) -> Option<String> {
        let upper = text.trim().to_ascii_uppercase();
        let level = READINESS_LEVEL
            .captures(&upper)
            .filter(|caps| &caps[1] == prefix)
            .map(|caps| format!("{}-{}{}", &caps[1], &caps[2], &caps[3]));
        if level.is_none() {
            self.warn(field, WarningKind::InvalidCode, text);
        }
        level
    }

    fn tsdc(&mut self, field: CanonicalField, text: String) -> Option<String> {
        let upper = text.trim().to_ascii_uppercase();
        if TSDC_CODE.is_match(&upper) {
            Some(upper)
        } else {
            self.warn(field, WarningKind::InvalidCode, text);
            None
        }
    }

    fn agents_of(
        &mut self,
        field: CanonicalField,
        value: &Value,
        kind: AgentKind,
        out: &mut Vec<Agent>,
    ) {
        match value {
            Value::Array(items) => {
                for item in items {
                    self.agents_of(field, item, kind, out);
                }
            }
            Value::String(_) => {
                if let Some(text) = text_of(value) {
                    out.push(agent_from_text(&text, kind));
                }
            }
            Value::Object(map) => {
                let Some(name) = ["name", "username"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(text_of))
                else {
                    return;
                };
                let mut agent = Agent {
                    kind,
                    ..Agent::person(name)
                };
                agent.email = map.get("email").and_then(text_of);
                agent.orcid = map.get("orcid").and_then(text_of).map(|orcid| {
                    ORCID_PREFIXES
                        .iter()
                        .find_map(|prefix| orcid.strip_prefix(prefix))
                        .unwrap_or(&orcid)
                        .to_string()
                });
                if let Some(url) = ["url", "public_url"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(text_of))
                {
                    match http_url(&url) {
                        Some(url) => agent.url = Some(url.to_string()),
                        None => self.warn(field, WarningKind::MalformedUrl, url),
                    }
                }
                out.push(agent);
            }
            _ => {}
        }
    }

    fn typed_party(
        &mut self,
        field: CanonicalField,
        sources: &[&'static str],
        type_at: &str,
        contact_at: &str,
    ) -> Option<Agent> {
        let name = self.first_text(sources, text_of)?;
        let party_type = self.at(type_at).and_then(text_of);
        let kind = match party_type.as_deref() {
            Some(t) if t.eq_ignore_ascii_case("company") || t.eq_ignore_ascii_case("organization") => {
                AgentKind::Organization
            }
            None => AgentKind::Person,
            Some(t) if t.eq_ignore_ascii_case("individual") => AgentKind::Person,
            Some(other) => {
                let other = other.to_string();
                self.warn(field, WarningKind::UnknownPartyType, other);
                AgentKind::Person
            }
        };
        let mut agent = Agent {
            kind,
            ..Agent::person(name)
        };
        agent.email = self
            .at(contact_at)
            .and_then(text_of)
            .filter(|contact| contact.contains('@'));
        Some(agent)
    }

    fn files_of(&mut self, field: CanonicalField, value: &Value) -> Vec<FileRef> {
        match value {
            Value::Array(items) => items
                .iter()
                .flat_map(|item| self.files_of(field, item))
                .collect(),
            Value::String(_) => text_of(value)
                .and_then(|text| self.file_from_text(field, &text))
                .into_iter()
                .collect(),
            Value::Object(map) => {
                let mut file = FileRef {
                    path: None,
                    url: None,
                    mime_type: ["mime-type", "mime_type", "mimeType"]
                        .iter()
                        .find_map(|key| map.get(*key).and_then(text_of)),
                };
                if let Some(path) = map.get("path").and_then(text_of) {
                    if let Some(found) = self.file_from_text(field, &path) {
                        file.path = found.path;
                        file.url = found.url;
                        file.mime_type = file.mime_type.or(found.mime_type);
                    }
                }
                if let Some(url) = map.get("url").and_then(text_of) {
                    match http_url(&url) {
                        Some(url) => {
                            file.mime_type = file
                                .mime_type
                                .or_else(|| guess_mime(url.path()).map(String::from));
                            file.url = Some(url.to_string());
                        }
                        None => self.warn(field, WarningKind::MalformedUrl, url),
                    }
                }
                if file.path.is_none() && file.url.is_none() {
                    Vec::new()
                } else {
                    vec![file]
                }
            }
            _ => Vec::new(),
        }
    }

    /// Interprets a string as a URL or a path relative to the manifest.
    fn file_from_text(&mut self, field: CanonicalField, text: &str) -> Option<FileRef> {
        if text.contains("://") {
            let Some(url) = http_url(text).filter(|url| !matches!(url.path(), "" | "/")) else {
                self.warn(field, WarningKind::MalformedUrl, text);
                return None;
            };
            let mut file = FileRef::from_url(url.to_string());
            file.mime_type = guess_mime(url.path()).map(String::from);
            return Some(file);
        }
        if text.starts_with(['/', '\\']) || WINDOWS_ABSOLUTE.is_match(text) {
            self.warn(field, WarningKind::AbsolutePathDropped, text);
            return None;
        }
        let path = text.trim_start_matches("./").replace('\\', "/");
        let mut file = FileRef::from_path(path.clone());
        file.url = self
            .base_url
            .as_ref()
            .and_then(|base| base.join(&path).ok())
            .map(|url| url.to_string());
        file.mime_type = guess_mime(&path).map(String::from);
        Some(file)
    }

    fn parts_of(&mut self, value: &Value) -> Vec<Part> {
        match value {
            Value::Array(items) => items.iter().filter_map(|item| self.part_of(item)).collect(),
            Value::Object(_) => self.part_of(value).into_iter().collect(),
            _ => Vec::new(),
        }
    }

    fn part_of(&mut self, value: &Value) -> Option<Part> {
        let map = value.as_object()?;
        let field = CanonicalField::Part;
        let text = |key: &str| Field::from(map.get(key).and_then(text_of));
        let mut part = Part {
            name: text("name"),
            material: text("material"),
            manufacturing_process: text("manufacturing-process"),
            mass: Field::from(map.get("mass").and_then(number_of)),
            outer_dimensions: Field::from(map.get("outer-dimensions").and_then(dimensions_of)),
            ..Part::default()
        };
        if let Some(tsdc) = map.get("tsdc").and_then(text_of) {
            part.tsdc = Field::from(self.tsdc(field, tsdc));
        }
        for (key, target) in [
            ("image", &mut part.image),
            ("source", &mut part.source),
            ("export", &mut part.export),
        ] {
            if let Some(files) = map.get(key) {
                *target = self.files_of(field, files);
            }
        }
        if let Some(licensors) = map.get("licensor") {
            self.agents_of(field, licensors, AgentKind::Person, &mut part.licensors);
        }
        if let Some(languages) = map.get("documentation-language") {
            let tags = dedup(texts_of(languages));
            part.documentation_language = self.languages(field, tags);
        }
        if let Some(declared) = map.get("license").and_then(text_of) {
            let resolution = self.policy.classify(Some(&declared));
            if let Some(unresolved) = resolution.unresolved {
                self.warn(field, WarningKind::UnresolvedLicense, unresolved);
            }
            part.license = Field::Present(resolution.license);
        }
        let empty = part == Part::default();
        (!empty).then_some(part)
    }

    /// Splits a platform file listing into one part named after the project.
    fn file_listing(&mut self, field: CanonicalField, value: &Value) -> Option<Part> {
        let items = value.as_array()?;
        let mut part = Part {
            name: Field::from(self.at("/name").and_then(text_of)),
            ..Part::default()
        };
        for item in items {
            let Some(url) = ["download_url", "public_url", "url"]
                .iter()
                .find_map(|key| item.get(*key).and_then(text_of))
            else {
                continue;
            };
            let Some(url) = http_url(&url) else {
                self.warn(field, WarningKind::MalformedUrl, url);
                continue;
            };
            let name = item
                .get("name")
                .and_then(text_of)
                .unwrap_or_else(|| url.path().to_string());
            let extension = name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .unwrap_or_default();
            let file = FileRef {
                path: Some(name.clone()),
                url: Some(url.to_string()),
                mime_type: guess_mime(&name).map(String::from),
            };
            if EXPORT_EXTENSIONS.contains(&extension.as_str()) {
                part.export.push(file);
            } else {
                part.source.push(file);
            }
        }
        (!part.source.is_empty() || !part.export.is_empty()).then_some(part)
    }

    /// First concretely resolved declaration wins; otherwise the first
    /// declaration decides between the two sentinels.
    fn license(
        &mut self,
        field: CanonicalField,
        sources: &[&'static str],
        aliases: Option<&'static [(&'static str, AliasTarget)]>,
    ) -> Option<LicenseRef> {
        let declared: Vec<String> = self.all_values(sources).filter_map(text_of).collect();
        let mut fallback: Option<Result<LicenseRef, String>> = None;
        for text in declared {
            match aliases.and_then(|table| alias(table, &text)) {
                Some(AliasTarget::Spdx(id)) => return Some(LicenseRef::Spdx(id.to_string())),
                Some(target) => {
                    if fallback.is_none() {
                        fallback = Some(Ok(target.to_license_ref()));
                    }
                }
                None => {
                    if let Some(license) = resolve_license(&text) {
                        return Some(license);
                    }
                    if fallback.is_none() {
                        fallback = Some(Err(text));
                    }
                }
            }
        }
        match fallback? {
            Ok(license) => Some(license),
            Err(text) => {
                let resolution = self.policy.classify(Some(&text));
                if let Some(unresolved) = resolution.unresolved {
                    self.warn(field, WarningKind::UnresolvedLicense, unresolved);
                }
                Some(resolution.license)
            }
        }
    }
}

fn text_of(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(s) => sanitize_text(s),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!raw.is_empty()).then_some(raw)
}

fn html_of(value: &Value) -> Option<String> {
    let text = strip_html(value.as_str()?);
    (!text.is_empty()).then_some(text)
}

fn texts_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(text_of).collect(),
        _ => text_of(value).into_iter().collect(),
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => LEADING_NUMBER.captures(s)?[1].parse().ok(),
        _ => None,
    }
}

fn dimensions_of(value: &Value) -> Option<Dimensions> {
    let [width, height, depth] = match value {
        Value::Object(map) => [
            number_of(map.get("width")?)?,
            number_of(map.get("height")?)?,
            number_of(map.get("depth")?)?,
        ],
        Value::Array(items) => {
            let numbers: Vec<f64> = items.iter().filter_map(number_of).collect();
            numbers.try_into().ok()?
        }
        Value::String(s) => {
            let numbers = s
                .trim()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .split([',', 'x', 'X', '×'])
                .map(|piece| piece.trim().parse::<f64>().ok())
                .collect::<Option<Vec<f64>>>()?;
            numbers.try_into().ok()?
        }
        _ => return None,
    };
    Some(Dimensions {
        width,
        height,
        depth,
    })
}

fn agent_from_text(text: &str, kind: AgentKind) -> Agent {
    match NAME_WITH_EMAIL.captures(text) {
        Some(caps) => Agent {
            kind,
            email: Some(caps[2].to_string()),
            ..Agent::person(&caps[1])
        },
        None => Agent {
            kind,
            ..Agent::person(text)
        },
    }
}

fn http_url(text: &str) -> Option<Url> {
    Url::parse(text)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    (!values.is_empty()).then_some(values)
}
