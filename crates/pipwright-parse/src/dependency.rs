//! The uniform dependency record shared by all three parsers.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::requirement::{Requirement, normalise_name};

/// A dependency extracted from a manifest.
///
/// Serialized as one element of the JSON array printed for the parse
/// operations.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParsedDependency {
    /// Distribution name as written in the manifest.
    pub name: String,
    /// PEP 503 normalised name.
    pub normalised_name: String,
    /// Version specifier text, when the requirement pins one.
    pub specifier: Option<String>,
    /// Requested extras, sorted.
    pub extras: Vec<String>,
    /// Environment-marker text, when present.
    pub markers: Option<String>,
    /// Direct-reference URL, when present.
    pub url: Option<String>,
    /// Pinned `--hash` values attached to the requirement line.
    pub hashes: Vec<String>,
    /// Origin group label (for example `install_requires` or
    /// `optional-dependencies:docs`), when the manifest distinguishes groups.
    pub group: Option<String>,
    /// Manifest path the dependency came from, when parsed from a file.
    pub file: Option<Utf8PathBuf>,
}

impl ParsedDependency {
    /// Builds a record from a parsed requirement and its origin.
    #[must_use]
    pub fn from_requirement(
        requirement: Requirement,
        group: Option<String>,
        file: Option<&Utf8Path>,
    ) -> Self {
        let normalised_name = normalise_name(&requirement.name);
        Self {
            name: requirement.name,
            normalised_name,
            specifier: requirement.specifier,
            extras: requirement.extras,
            markers: requirement.markers,
            url: requirement.url,
            hashes: Vec::new(),
            group,
            file: file.map(Utf8Path::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_normalises_the_name() {
        let requirement = Requirement::parse("Zope.Interface==5.0").expect("parse");
        let record = ParsedDependency::from_requirement(requirement, None, None);
        assert_eq!(record.name, "Zope.Interface");
        assert_eq!(record.normalised_name, "zope-interface");
    }
}
