//! The canonical, platform-agnostic project manifest.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::license::LicenseRef;

/// A value that was either found and validated, or explicitly not found.
///
/// Empty strings never become `Present`; the normalizer maps them to `Missing`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field<T> {
    Present(T),
    #[default]
    Missing,
}

impl<T> Field<T> {
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Borrows the value if present.
    #[must_use]
    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Self::Present(value) => Field::Present(value),
            Self::Missing => Field::Missing,
        }
    }

    /// Converts into an `Option`.
    #[must_use]
    pub fn present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing => None,
        }
    }

    /// Returns the value by reference if present.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Self::Present)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(value) => serializer.serialize_some(value),
            Self::Missing => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

/// Whether an agent is a natural person or an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    #[default]
    Person,
    Organization,
}

/// A creator, licensor or organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(default)]
    pub kind: AgentKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
}

impl Agent {
    #[must_use]
    pub fn person(name: impl Into<String>) -> Self {
        Self {
            kind: AgentKind::Person,
            name: name.into(),
            email: None,
            url: None,
            orcid: None,
        }
    }

    #[must_use]
    pub fn organization(name: impl Into<String>) -> Self {
        Self {
            kind: AgentKind::Organization,
            ..Self::person(name)
        }
    }
}

/// A file belonging to a project, addressed by relative path, URL, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl FileRef {
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            path: None,
            url: Some(url.into()),
            mime_type: None,
        }
    }

    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            url: None,
            mime_type: None,
        }
    }
}

/// Outer bounding box in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// A sub-part of a hardware module.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image: Vec<FileRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source: Vec<FileRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub export: Vec<FileRef>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub license: Field<LicenseRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub licensors: Vec<Agent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documentation_language: Vec<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub material: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub manufacturing_process: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub mass: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub outer_dimensions: Field<Dimensions>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub tsdc: Field<String>,
}

/// Every top-level field of [`CanonicalManifest`].
///
/// The normalizer's mapping tables and the serializer's predicate table are
/// both keyed by this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanonicalField {
    Okhv,
    Name,
    Repo,
    Version,
    Release,
    License,
    Licensor,
    Organization,
    Function,
    DocumentationLanguage,
    TechnologyReadinessLevel,
    DocumentationReadinessLevel,
    Attestation,
    Publication,
    StandardCompliance,
    CpcPatentClass,
    Tsdc,
    Readme,
    ContributionGuide,
    Image,
    Bom,
    ManufacturingInstructions,
    UserManual,
    OuterDimensions,
    Part,
}

impl CanonicalField {
    /// Manifest key name, as written in OKH manifests.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Okhv => "okhv",
            Self::Name => "name",
            Self::Repo => "repo",
            Self::Version => "version",
            Self::Release => "release",
            Self::License => "license",
            Self::Licensor => "licensor",
            Self::Organization => "organization",
            Self::Function => "function",
            Self::DocumentationLanguage => "documentation-language",
            Self::TechnologyReadinessLevel => "technology-readiness-level",
            Self::DocumentationReadinessLevel => "documentation-readiness-level",
            Self::Attestation => "attestation",
            Self::Publication => "publication",
            Self::StandardCompliance => "standard-compliance",
            Self::CpcPatentClass => "cpc-patent-class",
            Self::Tsdc => "tsdc",
            Self::Readme => "readme",
            Self::ContributionGuide => "contribution-guide",
            Self::Image => "image",
            Self::Bom => "bom",
            Self::ManufacturingInstructions => "manufacturing-instructions",
            Self::UserManual => "user-manual",
            Self::OuterDimensions => "outer-dimensions",
            Self::Part => "part",
        }
    }
}

/// The normalized project record.
///
/// Lists are empty rather than `Missing`; scalar fields use [`Field`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CanonicalManifest {
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub okhv: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub repo: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub version: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub release: Field<String>,
    #[serde(default)]
    pub license: LicenseRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub licensors: Vec<Agent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizations: Vec<Agent>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub function: Field<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documentation_language: Vec<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub technology_readiness_level: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub documentation_readiness_level: Field<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attestation: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publication: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub standard_compliance: Vec<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub cpc_patent_class: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub tsdc: Field<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub readme: Vec<FileRef>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub contribution_guide: Field<FileRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image: Vec<FileRef>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub bom: Field<FileRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manufacturing_instructions: Vec<FileRef>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub user_manual: Field<FileRef>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub outer_dimensions: Field<Dimensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
}

impl CanonicalManifest {
    /// Lists the fields that carry a value, in declaration order.
    ///
    /// `License` is always listed since it always resolves to something.
    #[must_use]
    pub fn populated_fields(&self) -> Vec<CanonicalField> {
        let checks = [
            (CanonicalField::Okhv, self.okhv.is_present()),
            (CanonicalField::Name, self.name.is_present()),
            (CanonicalField::Repo, self.repo.is_present()),
            (CanonicalField::Version, self.version.is_present()),
            (CanonicalField::Release, self.release.is_present()),
            (CanonicalField::License, true),
            (CanonicalField::Licensor, !self.licensors.is_empty()),
            (CanonicalField::Organization, !self.organizations.is_empty()),
            (CanonicalField::Function, self.function.is_present()),
            (
                CanonicalField::DocumentationLanguage,
                !self.documentation_language.is_empty(),
            ),
            (
                CanonicalField::TechnologyReadinessLevel,
                self.technology_readiness_level.is_present(),
            ),
            (
                CanonicalField::DocumentationReadinessLevel,
                self.documentation_readiness_level.is_present(),
            ),
            (CanonicalField::Attestation, !self.attestation.is_empty()),
            (CanonicalField::Publication, !self.publication.is_empty()),
            (
                CanonicalField::StandardCompliance,
                !self.standard_compliance.is_empty(),
            ),
            (CanonicalField::CpcPatentClass, self.cpc_patent_class.is_present()),
            (CanonicalField::Tsdc, self.tsdc.is_present()),
            (CanonicalField::Readme, !self.readme.is_empty()),
            (
                CanonicalField::ContributionGuide,
                self.contribution_guide.is_present(),
            ),
            (CanonicalField::Image, !self.image.is_empty()),
            (CanonicalField::Bom, self.bom.is_present()),
            (
                CanonicalField::ManufacturingInstructions,
                !self.manufacturing_instructions.is_empty(),
            ),
            (CanonicalField::UserManual, self.user_manual.is_present()),
            (CanonicalField::OuterDimensions, self.outer_dimensions.is_present()),
            (CanonicalField::Part, !self.parts.is_empty()),
        ];
        checks
            .into_iter()
            .filter_map(|(field, present)| present.then_some(field))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_field_serializes_missing_as_absent() {
        let manifest = CanonicalManifest {
            name: Field::Present("Lamp".to_string()),
            ..CanonicalManifest::default()
        };
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["name"], "Lamp");
        assert!(json.get("version").is_none());
        assert!(json.get("parts").is_none());
    }

    #[test]
    fn test_manifest_json_round_trip_keeps_missing_markers() {
        let manifest = CanonicalManifest {
            name: Field::Present("Lamp".to_string()),
            repo: Field::Present("https://example.org/lamp".to_string()),
            parts: vec![Part {
                name: Field::Present("Base".to_string()),
                mass: Field::Present(12.5),
                ..Part::default()
            }],
            ..CanonicalManifest::default()
        };
        let json = serde_json::to_string(&manifest).unwrap();
        let back: CanonicalManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, manifest);
        assert!(back.version.is_missing());
    }

    #[test]
    fn test_populated_fields_lists_only_present_values() {
        let manifest = CanonicalManifest {
            name: Field::Present("Lamp".to_string()),
            image: vec![FileRef::from_url("https://example.org/a.png")],
            ..CanonicalManifest::default()
        };
        assert_eq!(
            manifest.populated_fields(),
            vec![
                CanonicalField::Name,
                CanonicalField::License,
                CanonicalField::Image
            ]
        );
    }
}
