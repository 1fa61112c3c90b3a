//! License identifier resolution.
//!
//! # Overview
//!
//! Declared license strings are resolved against an embedded copy of the
//! SPDX license list. The outcome is a
//! [`LicenseRef`]: an SPDX id, a compound SPDX expression, or one of two
//! sentinels that must never be conflated:
//!
//! - [`LicenseRef::NoAssertion`] - nothing usable was declared
//! - [`LicenseRef::AllRightsReserved`] - an explicit restrictive marking was found
//!
//! Which phrases count as restrictive is a [`LicensePolicy`] setting.
//!
//! # Example
//!
//! ```
//! use krawl_core::license::{LicensePolicy, LicenseRef, resolve_license};
//!
//! assert_eq!(resolve_license("cern-ohl-s-2.0"), Some(LicenseRef::Spdx("CERN-OHL-S-2.0".into())));
//!
//! let policy = LicensePolicy::default();
//! assert_eq!(policy.classify(Some("All Rights Reserved")).license, LicenseRef::AllRightsReserved);
//! assert_eq!(policy.classify(None).license, LicenseRef::NoAssertion);
//! ```

mod spdx_list;

use serde::{Deserialize, Serialize};
use tracing::debug;

use spdx_list::SPDX_LICENSES;

/// Local id used for the "no assertion" sentinel node.
pub const NO_ASSERTION_ID: &str = "LicenseRef-NOASSERTION";

/// Local id used for the "all rights reserved" sentinel node.
pub const ALL_RIGHTS_RESERVED_ID: &str = "LicenseRef-AllRightsReserved";

/// Restrictive marker phrases used when none are configured.
pub const DEFAULT_RESTRICTIVE_MARKERS: &[&str] = &[
    "all rights reserved",
    "all-rights-reserved",
    "proprietary",
    "copyright only",
    "not licensed",
];

/// Resolved license of a project or part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum LicenseRef {
    /// A single SPDX license id in canonical casing.
    Spdx(String),
    /// A compound SPDX expression whose ids all resolved.
    Expression(String),
    /// No license information found.
    #[default]
    NoAssertion,
    /// Explicit restrictive marking found.
    AllRightsReserved,
}

impl LicenseRef {
    /// Returns whether this is a resolved SPDX id or expression.
    #[must_use]
    pub fn is_spdx(&self) -> bool {
        matches!(self, Self::Spdx(_) | Self::Expression(_))
    }

    /// Text form used in manifests and reports.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Spdx(id) | Self::Expression(id) => id,
            Self::NoAssertion => NO_ASSERTION_ID,
            Self::AllRightsReserved => ALL_RIGHTS_RESERVED_ID,
        }
    }
}

/// One entry of the embedded SPDX license list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpdxLicense {
    pub id: &'static str,
    pub name: &'static str,
    /// Superseded by a newer id, usually an `-only` or `-or-later` form.
    pub deprecated: bool,
}

const fn row(id: &'static str, name: &'static str) -> SpdxLicense {
    SpdxLicense {
        id,
        name,
        deprecated: false,
    }
}

const fn deprecated(id: &'static str, name: &'static str) -> SpdxLicense {
    SpdxLicense {
        id,
        name,
        deprecated: true,
    }
}

/// Deprecated SPDX ids still found in the wild, and their current form.
static DEPRECATED_IDS: &[(&str, &str)] = &[
    ("agpl-1.0", "AGPL-1.0-only"),
    ("agpl-3.0", "AGPL-3.0-only"),
    ("bsd-2-clause-freebsd", "BSD-2-Clause"),
    ("bsd-2-clause-netbsd", "BSD-2-Clause"),
    ("gfdl-1.1", "GFDL-1.1-only"),
    ("gfdl-1.2", "GFDL-1.2-only"),
    ("gfdl-1.3", "GFDL-1.3-only"),
    ("gpl-1.0", "GPL-1.0-only"),
    ("gpl-1.0+", "GPL-1.0-or-later"),
    ("gpl-2.0", "GPL-2.0-only"),
    ("gpl-2.0+", "GPL-2.0-or-later"),
    ("gpl-3.0", "GPL-3.0-only"),
    ("gpl-3.0+", "GPL-3.0-or-later"),
    ("lgpl-2.0", "LGPL-2.0-only"),
    ("lgpl-2.0+", "LGPL-2.0-or-later"),
    ("lgpl-2.1", "LGPL-2.1-only"),
    ("lgpl-2.1+", "LGPL-2.1-or-later"),
    ("lgpl-3.0", "LGPL-3.0-only"),
    ("lgpl-3.0+", "LGPL-3.0-or-later"),
];

/// Looks up one SPDX license by id or full name, ignoring case.
///
/// Deprecated ids with a current equivalent resolve to that equivalent, and a
/// full name shared by a deprecated and a current entry picks the current one.
#[must_use]
pub fn lookup(id_or_name: &str) -> Option<&'static SpdxLicense> {
    let needle = fold(id_or_name);
    if needle.is_empty() {
        return None;
    }
    if let Some((_, current)) = DEPRECATED_IDS.iter().find(|(old, _)| *old == needle) {
        return SPDX_LICENSES.iter().find(|l| l.id == *current);
    }
    SPDX_LICENSES
        .iter()
        .filter(|l| fold(l.id) == needle || fold(l.name) == needle)
        .min_by_key(|l| l.deprecated)
}

/// Resolves a declared license string to an SPDX id or expression.
///
/// Returns `None` when the string is empty or any part of it is unknown.
#[must_use]
pub fn resolve_license(name_or_id: &str) -> Option<LicenseRef> {
    let text = name_or_id.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(license) = lookup(text) {
        return Some(LicenseRef::Spdx(license.id.to_string()));
    }
    resolve_expression(text).map(LicenseRef::Expression)
}

/// Resolves `A OR (B AND C)` style expressions with known ids only.
fn resolve_expression(text: &str) -> Option<String> {
    let spaced = text.replace('(', " ( ").replace(')', " ) ");
    let tokens: Vec<&str> = spaced.split_whitespace().collect();
    let mut operands = 0usize;
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token.to_ascii_uppercase().as_str() {
            "AND" | "OR" | "WITH" => out.push(token.to_ascii_uppercase()),
            "(" | ")" => out.push(token.to_string()),
            _ => {
                if token.starts_with("LicenseRef-") {
                    out.push(token.to_string());
                } else {
                    out.push(lookup(token)?.id.to_string());
                }
                operands += 1;
            }
        }
    }
    if operands < 2 {
        return None;
    }
    Some(out.join(" ").replace("( ", "(").replace(" )", ")"))
}

fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Outcome of [`LicensePolicy::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseResolution {
    pub license: LicenseRef,
    /// Set when a non-empty declaration could not be resolved.
    pub unresolved: Option<String>,
}

/// Rules deciding between the two license sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicensePolicy {
    restrictive_markers: Vec<String>,
}

impl Default for LicensePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RESTRICTIVE_MARKERS.iter().map(|m| (*m).to_string()))
    }
}

impl LicensePolicy {
    /// Creates a policy with the given restrictive marker phrases.
    ///
    /// Matching is a case-insensitive substring test.
    #[must_use]
    pub fn new(markers: impl IntoIterator<Item = String>) -> Self {
        Self {
            restrictive_markers: markers
                .into_iter()
                .map(|m| m.trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn restrictive_markers(&self) -> &[String] {
        &self.restrictive_markers
    }

    /// Returns whether the text carries a restrictive marking.
    #[must_use]
    pub fn is_restrictive(&self, text: &str) -> bool {
        let folded = text.to_lowercase();
        self.restrictive_markers
            .iter()
            .any(|marker| folded.contains(marker.as_str()))
    }

    /// Resolves a declared license, falling back to one of the sentinels.
    #[must_use]
    pub fn classify(&self, declared: Option<&str>) -> LicenseResolution {
        let Some(text) = declared.map(str::trim).filter(|t| !t.is_empty()) else {
            return LicenseResolution {
                license: LicenseRef::NoAssertion,
                unresolved: None,
            };
        };
        if let Some(license) = resolve_license(text) {
            return LicenseResolution {
                license,
                unresolved: None,
            };
        }
        let license = if self.is_restrictive(text) {
            LicenseRef::AllRightsReserved
        } else {
            LicenseRef::NoAssertion
        };
        debug!(declared = text, license = license.as_str(), "license not resolvable");
        LicenseResolution {
            license,
            unresolved: Some(text.to_string()),
        }
    }
}

/// Target of a platform license label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasTarget {
    Spdx(&'static str),
    NoAssertion,
    AllRightsReserved,
}

impl AliasTarget {
    #[must_use]
    pub fn to_license_ref(self) -> LicenseRef {
        match self {
            Self::Spdx(id) => LicenseRef::Spdx(id.to_string()),
            Self::NoAssertion => LicenseRef::NoAssertion,
            Self::AllRightsReserved => LicenseRef::AllRightsReserved,
        }
    }
}

/// OSHWA certification license labels.
pub static OSHWA_LICENSE_ALIASES: &[(&str, AliasTarget)] = &[
    ("BSD-2-Clause", AliasTarget::Spdx("BSD-2-Clause")),
    ("CC BY-SA", AliasTarget::Spdx("CC-BY-SA-4.0")),
    ("CC-BY-4.0", AliasTarget::Spdx("CC-BY-4.0")),
    ("CC-BY-SA-4.0", AliasTarget::Spdx("CC-BY-SA-4.0")),
    ("CC0-1.0", AliasTarget::Spdx("CC0-1.0")),
    ("CERN OHL", AliasTarget::Spdx("CERN-OHL-1.2")),
    ("CERN", AliasTarget::Spdx("CERN-OHL-1.2")),
    ("GPL-3.0", AliasTarget::Spdx("GPL-3.0-only")),
    ("MIT", AliasTarget::Spdx("MIT")),
    ("None", AliasTarget::NoAssertion),
    ("OHL", AliasTarget::Spdx("TAPR-OHL-1.0")),
    ("Other", AliasTarget::NoAssertion),
];

/// Thingiverse license labels.
pub static THINGIVERSE_LICENSE_ALIASES: &[(&str, AliasTarget)] = &[
    ("All Rights Reserved", AliasTarget::AllRightsReserved),
    ("BSD", AliasTarget::Spdx("BSD-4-Clause")),
    ("BSD License", AliasTarget::Spdx("BSD-4-Clause")),
    ("Creative Commons - Attribution", AliasTarget::Spdx("CC-BY-4.0")),
    ("Creative Commons - Attribution - No Derivatives", AliasTarget::NoAssertion),
    ("Creative Commons - Attribution - Non-Commercial", AliasTarget::NoAssertion),
    ("Creative Commons - Attribution - Non-Commercial - No Derivatives", AliasTarget::NoAssertion),
    ("Creative Commons - Attribution - Non-Commercial - Share Alike", AliasTarget::NoAssertion),
    ("Creative Commons - Attribution - Share Alike", AliasTarget::Spdx("CC-BY-SA-4.0")),
    ("Creative Commons - GNU GPL", AliasTarget::Spdx("GPL-3.0-or-later")),
    ("Creative Commons - LGPL", AliasTarget::Spdx("LGPL-3.0-or-later")),
    ("Creative Commons - Public Domain Dedication", AliasTarget::Spdx("CC0-1.0")),
    ("GNU - GPL", AliasTarget::Spdx("GPL-3.0-or-later")),
    ("GNU - LGPL", AliasTarget::Spdx("LGPL-3.0-or-later")),
    ("Public Domain", AliasTarget::Spdx("CC0-1.0")),
];

/// Looks up a label in an alias table, ignoring case and surrounding space.
#[must_use]
pub fn alias(table: &[(&str, AliasTarget)], label: &str) -> Option<AliasTarget> {
    let needle = label.trim();
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(needle))
        .map(|(_, target)| *target)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ==================== resolve_license Tests ====================

    #[test]
    fn test_resolve_license_by_id_any_case() {
        assert_eq!(
            resolve_license("cc-by-sa-4.0"),
            Some(LicenseRef::Spdx("CC-BY-SA-4.0".to_string()))
        );
        assert_eq!(resolve_license(" MIT "), Some(LicenseRef::Spdx("MIT".to_string())));
    }

    #[test]
    fn test_resolve_license_by_full_name() {
        assert_eq!(
            resolve_license("CERN Open Hardware Licence Version 2 - Permissive"),
            Some(LicenseRef::Spdx("CERN-OHL-P-2.0".to_string()))
        );
    }

    #[test]
    fn test_resolve_license_deprecated_id() {
        assert_eq!(
            resolve_license("GPL-3.0"),
            Some(LicenseRef::Spdx("GPL-3.0-only".to_string()))
        );
        assert_eq!(
            resolve_license("GPL-3.0+"),
            Some(LicenseRef::Spdx("GPL-3.0-or-later".to_string()))
        );
    }

    #[test]
    fn test_resolve_license_outside_hardware_families() {
        for id in ["CC-BY-NC-4.0", "CC-BY-NC-SA-4.0", "OFL-1.1", "EUPL-1.2", "Apache-1.1"] {
            assert_eq!(
                resolve_license(&id.to_lowercase()),
                Some(LicenseRef::Spdx(id.to_string())),
                "{id}"
            );
        }
        let policy = LicensePolicy::default();
        let resolution = policy.classify(Some("CC-BY-NC-4.0"));
        assert_eq!(resolution.license, LicenseRef::Spdx("CC-BY-NC-4.0".to_string()));
        assert!(resolution.unresolved.is_none());
    }

    #[test]
    fn test_full_name_prefers_current_id() {
        assert_eq!(
            resolve_license("GNU General Public License v3.0 only"),
            Some(LicenseRef::Spdx("GPL-3.0-only".to_string()))
        );
        assert_eq!(
            resolve_license("LGPL-2.1+"),
            Some(LicenseRef::Spdx("LGPL-2.1-or-later".to_string()))
        );
    }

    #[test]
    fn test_every_deprecated_mapping_targets_a_current_id() {
        for (old, current) in DEPRECATED_IDS {
            let entry = SPDX_LICENSES.iter().find(|l| l.id == *current).unwrap();
            assert!(!entry.deprecated, "{old} maps to deprecated {current}");
        }
    }

    #[test]
    fn test_resolve_license_expression() {
        assert_eq!(
            resolve_license("cern-ohl-s-2.0 or (mit and cc-by-4.0)"),
            Some(LicenseRef::Expression(
                "CERN-OHL-S-2.0 OR (MIT AND CC-BY-4.0)".to_string()
            ))
        );
    }

    #[test]
    fn test_resolve_license_expression_with_unknown_part_fails() {
        assert_eq!(resolve_license("MIT OR Foo-1.0"), None);
    }

    #[test]
    fn test_resolve_license_unknown_and_empty() {
        assert_eq!(resolve_license("my own license"), None);
        assert_eq!(resolve_license("   "), None);
    }

    // ==================== LicensePolicy Tests ====================

    #[test]
    fn test_classify_missing_is_no_assertion() {
        let policy = LicensePolicy::default();
        let result = policy.classify(None);
        assert_eq!(result.license, LicenseRef::NoAssertion);
        assert!(result.unresolved.is_none());
    }

    #[test]
    fn test_classify_unknown_without_marker_is_no_assertion() {
        let policy = LicensePolicy::default();
        let result = policy.classify(Some("see website"));
        assert_eq!(result.license, LicenseRef::NoAssertion);
        assert_eq!(result.unresolved.as_deref(), Some("see website"));
    }

    #[test]
    fn test_classify_restrictive_marker_is_all_rights_reserved() {
        let policy = LicensePolicy::default();
        let result = policy.classify(Some("(c) 2020 ACME, All Rights Reserved"));
        assert_eq!(result.license, LicenseRef::AllRightsReserved);
    }

    #[test]
    fn test_classify_uses_configured_markers_only() {
        let policy = LicensePolicy::new(vec!["closed".to_string()]);
        assert_eq!(
            policy.classify(Some("All rights reserved")).license,
            LicenseRef::NoAssertion
        );
        assert_eq!(
            policy.classify(Some("Closed design")).license,
            LicenseRef::AllRightsReserved
        );
    }

    #[test]
    fn test_classify_resolvable_wins_over_marker() {
        let policy = LicensePolicy::default();
        assert_eq!(
            policy.classify(Some("MIT")).license,
            LicenseRef::Spdx("MIT".to_string())
        );
    }

    // ==================== Alias Tests ====================

    #[test]
    fn test_oshwa_aliases() {
        assert_eq!(
            alias(OSHWA_LICENSE_ALIASES, "CC BY-SA"),
            Some(AliasTarget::Spdx("CC-BY-SA-4.0"))
        );
        assert_eq!(
            alias(OSHWA_LICENSE_ALIASES, "OHL"),
            Some(AliasTarget::Spdx("TAPR-OHL-1.0"))
        );
        assert_eq!(alias(OSHWA_LICENSE_ALIASES, "other"), Some(AliasTarget::NoAssertion));
    }

    #[test]
    fn test_thingiverse_aliases_keep_sentinels_apart() {
        assert_eq!(
            alias(THINGIVERSE_LICENSE_ALIASES, "All Rights Reserved")
                .unwrap()
                .to_license_ref(),
            LicenseRef::AllRightsReserved
        );
        assert_eq!(
            alias(
                THINGIVERSE_LICENSE_ALIASES,
                "Creative Commons - Attribution - Non-Commercial"
            )
            .unwrap()
            .to_license_ref(),
            LicenseRef::NoAssertion
        );
    }

    #[test]
    fn test_every_alias_target_is_in_the_table() {
        for (_, target) in OSHWA_LICENSE_ALIASES
            .iter()
            .chain(THINGIVERSE_LICENSE_ALIASES)
        {
            if let AliasTarget::Spdx(id) = target {
                assert!(lookup(id).is_some(), "{id} missing from SPDX table");
            }
        }
    }
}
