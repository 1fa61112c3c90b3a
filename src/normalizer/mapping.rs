//! Per-platform field mapping tables.
//!
//! A table is plain data: one [`FieldRule`] per canonical field, naming the
//! JSON-pointer locations to read and how to interpret what is found there.
//! Supporting a new payload shape means adding rows, not branches.

use crate::license::{AliasTarget, OSHWA_LICENSE_ALIASES, THINGIVERSE_LICENSE_ALIASES};
use crate::model::{AgentKind, CanonicalField, platform};

/// How the value at a rule's sources is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Plain text, sanitized.
    Text,
    /// HTML fragment, reduced to sanitized text.
    Html,
    /// An absolute http(s) URL; malformed values are dropped with a warning.
    Url,
    /// A list of plain text values; all sources are concatenated.
    TextList,
    /// Language tags; invalid tags are dropped with a warning.
    Languages,
    /// An `OTRL-n` or `ODRL-n` readiness level with the given prefix;
    /// anything else is dropped with a warning.
    ReadinessLevel(&'static str),
    /// A technology-specific documentation criteria code such as `MEC` or
    /// `3DP`; anything else is dropped with a warning.
    Tsdc,
    /// People or organizations from strings or objects.
    Agents(AgentKind),
    /// A single party named at the source, typed by a sibling field.
    TypedParty {
        type_at: &'static str,
        contact_at: &'static str,
    },
    /// One file reference.
    File,
    /// File references; all sources are concatenated.
    Files,
    /// `part` entries of a manifest.
    Parts,
    /// A platform file listing, split into one part's sources and exports.
    FileListing,
    /// Width, height and depth.
    Dimensions,
    /// Declared license, optionally translated through an alias table.
    License(Option<&'static [(&'static str, AliasTarget)]>),
    /// Platform category translated to a CPC class; later sources are
    /// consulted when earlier ones have no translation.
    Category(&'static [(&'static str, &'static str)]),
    /// The canonical URL of the project being normalized.
    ProjectUrl,
    /// A fixed value.
    Constant(&'static str),
}

/// Maps one canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: CanonicalField,
    /// JSON pointers, tried in order.
    pub sources: &'static [&'static str],
    pub kind: ValueKind,
}

const fn rule(
    field: CanonicalField,
    sources: &'static [&'static str],
    kind: ValueKind,
) -> FieldRule {
    FieldRule {
        field,
        sources,
        kind,
    }
}

/// A named set of rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingTable {
    pub name: &'static str,
    pub rules: &'static [FieldRule],
}

/// OSHWA project categories with a CPC equivalent.
pub static OSHWA_CATEGORY_CPC: &[(&str, &str)] = &[
    ("3D Printing", "B33Y"),
    ("Enclosure", "F16M"),
    ("Home Connection", "H04W"),
    ("Robotics", "B25J9/00"),
    ("Sound", "H04R"),
    ("Space", "B64G"),
];

/// OKH manifests, LOSH keys first, OKH v1 keys as fallbacks.
pub static MANIFEST_TABLE: MappingTable = MappingTable {
    name: "manifest",
    rules: &[
        rule(CanonicalField::Okhv, &["/okhv"], ValueKind::Text),
        rule(CanonicalField::Name, &["/name", "/title"], ValueKind::Text),
        rule(
            CanonicalField::Repo,
            &["/repo", "/project-link", "/documentation-home"],
            ValueKind::Text,
        ),
        rule(CanonicalField::Version, &["/version"], ValueKind::Text),
        rule(CanonicalField::Release, &["/release"], ValueKind::Url),
        rule(
            CanonicalField::License,
            &["/license", "/license/hardware", "/license/documentation"],
            ValueKind::License(None),
        ),
        rule(
            CanonicalField::Licensor,
            &["/licensor", "/manifest-author"],
            ValueKind::Agents(AgentKind::Person),
        ),
        rule(
            CanonicalField::Organization,
            &["/organization", "/licensor/affiliation"],
            ValueKind::Agents(AgentKind::Organization),
        ),
        rule(CanonicalField::Function, &["/function", "/description"], ValueKind::Text),
        rule(
            CanonicalField::DocumentationLanguage,
            &["/documentation-language"],
            ValueKind::Languages,
        ),
        rule(
            CanonicalField::TechnologyReadinessLevel,
            &["/technology-readiness-level"],
            ValueKind::ReadinessLevel("OTRL"),
        ),
        rule(
            CanonicalField::DocumentationReadinessLevel,
            &["/documentation-readiness-level"],
            ValueKind::ReadinessLevel("ODRL"),
        ),
        rule(CanonicalField::Attestation, &["/attestation"], ValueKind::TextList),
        rule(CanonicalField::Publication, &["/publication"], ValueKind::TextList),
        rule(
            CanonicalField::StandardCompliance,
            &["/standard-compliance", "/standards-used"],
            ValueKind::TextList,
        ),
        rule(CanonicalField::CpcPatentClass, &["/cpc-patent-class"], ValueKind::Text),
        rule(CanonicalField::Tsdc, &["/tsdc"], ValueKind::Tsdc),
        rule(CanonicalField::Readme, &["/readme"], ValueKind::Files),
        rule(
            CanonicalField::ContributionGuide,
            &["/contribution-guide", "/contributing-guide"],
            ValueKind::File,
        ),
        rule(CanonicalField::Image, &["/image"], ValueKind::Files),
        rule(CanonicalField::Bom, &["/bom"], ValueKind::File),
        rule(
            CanonicalField::ManufacturingInstructions,
            &["/manufacturing-instructions", "/making-instructions"],
            ValueKind::Files,
        ),
        rule(
            CanonicalField::UserManual,
            &["/user-manual", "/operating-instructions"],
            ValueKind::File,
        ),
        rule(
            CanonicalField::OuterDimensions,
            &["/outer-dimensions"],
            ValueKind::Dimensions,
        ),
        rule(CanonicalField::Part, &["/part"], ValueKind::Parts),
    ],
};

/// OSHWA certification API records.
pub static OSHWA_TABLE: MappingTable = MappingTable {
    name: "oshwa",
    rules: &[
        rule(CanonicalField::Name, &["/projectName"], ValueKind::Text),
        rule(CanonicalField::Repo, &[], ValueKind::ProjectUrl),
        rule(CanonicalField::Version, &["/projectVersion"], ValueKind::Text),
        rule(
            CanonicalField::License,
            &["/hardwareLicense", "/documentationLicense"],
            ValueKind::License(Some(OSHWA_LICENSE_ALIASES)),
        ),
        rule(
            CanonicalField::Licensor,
            &["/responsibleParty"],
            ValueKind::TypedParty {
                type_at: "/responsiblePartyType",
                contact_at: "/publicContact",
            },
        ),
        rule(CanonicalField::Function, &["/projectDescription"], ValueKind::Html),
        rule(
            CanonicalField::DocumentationReadinessLevel,
            &[],
            ValueKind::Constant("ODRL-3*"),
        ),
        rule(
            CanonicalField::CpcPatentClass,
            &["/primaryType", "/additionalType"],
            ValueKind::Category(OSHWA_CATEGORY_CPC),
        ),
    ],
};

/// Thingiverse things with their merged file listing.
pub static THINGIVERSE_TABLE: MappingTable = MappingTable {
    name: "thingiverse",
    rules: &[
        rule(CanonicalField::Name, &["/name"], ValueKind::Text),
        rule(CanonicalField::Repo, &["/public_url"], ValueKind::Text),
        rule(CanonicalField::Version, &["/modified"], ValueKind::Text),
        rule(
            CanonicalField::License,
            &["/license"],
            ValueKind::License(Some(THINGIVERSE_LICENSE_ALIASES)),
        ),
        rule(
            CanonicalField::Licensor,
            &["/creator"],
            ValueKind::Agents(AgentKind::Person),
        ),
        rule(CanonicalField::Function, &["/description"], ValueKind::Html),
        rule(
            CanonicalField::TechnologyReadinessLevel,
            &[],
            ValueKind::Constant("OTRL-4"),
        ),
        rule(
            CanonicalField::DocumentationReadinessLevel,
            &[],
            ValueKind::Constant("ODRL-3"),
        ),
        rule(
            CanonicalField::Image,
            &["/thumbnail", "/default_image/url"],
            ValueKind::Files,
        ),
        rule(CanonicalField::Part, &["/files"], ValueKind::FileListing),
    ],
};

/// Table used for payloads of `platform`.
#[must_use]
pub fn table_for(platform_key: &str) -> &'static MappingTable {
    match platform_key {
        platform::OSHWA => &OSHWA_TABLE,
        platform::THINGIVERSE => &THINGIVERSE_TABLE,
        _ => &MANIFEST_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn tables() -> [&'static MappingTable; 3] {
        [&MANIFEST_TABLE, &OSHWA_TABLE, &THINGIVERSE_TABLE]
    }

    #[test]
    fn test_table_for_platform() {
        assert_eq!(table_for(platform::OSHWA).name, "oshwa");
        assert_eq!(table_for(platform::THINGIVERSE).name, "thingiverse");
        for key in [
            platform::GITHUB,
            platform::APPROPEDIA,
            platform::URL,
            platform::MANIFESTS_REPO,
        ] {
            assert_eq!(table_for(key).name, "manifest");
        }
    }

    #[test]
    fn test_each_field_mapped_at_most_once() {
        for table in tables() {
            let fields: BTreeSet<CanonicalField> = table.rules.iter().map(|r| r.field).collect();
            assert_eq!(fields.len(), table.rules.len(), "duplicate rule in {}", table.name);
        }
    }

    #[test]
    fn test_sources_are_json_pointers() {
        for table in tables() {
            for rule in table.rules {
                for source in rule.sources {
                    assert!(source.starts_with('/'), "{source} in {}", table.name);
                }
                if let ValueKind::TypedParty { type_at, contact_at } = rule.kind {
                    assert!(type_at.starts_with('/') && contact_at.starts_with('/'));
                }
            }
        }
    }

    #[test]
    fn test_manifest_table_covers_every_field() {
        assert_eq!(MANIFEST_TABLE.rules.len(), 25);
    }
}
