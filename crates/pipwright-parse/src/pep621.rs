//! PEP 621 `pyproject.toml` dependency extraction.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::dependency::ParsedDependency;
use crate::error::ParseError;
use crate::requirement::Requirement;
use crate::source::SourceInput;

/// The slices of a `pyproject.toml` the parser cares about. Everything else
/// in the manifest is ignored.
#[derive(Debug, Default, Deserialize)]
struct Pep621Manifest {
    #[serde(default)]
    project: Option<ProjectTable>,
    #[serde(default, rename = "build-system")]
    build_system: Option<BuildSystemTable>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectTable {
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default, rename = "optional-dependencies")]
    optional_dependencies: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct BuildSystemTable {
    #[serde(default)]
    requires: Vec<String>,
}

/// Parses a PEP 621 manifest and extracts its declared dependencies.
///
/// Contribution order: `[project] dependencies`, then optional-dependency
/// groups in name order, then `[build-system] requires`. Missing tables
/// contribute nothing.
///
/// # Errors
///
/// Returns [`ParseError::Manifest`] when the TOML does not deserialize, and
/// a requirement error when a dependency string is malformed.
pub fn parse_pep621_dependencies(source: &SourceInput) -> Result<Vec<ParsedDependency>, ParseError> {
    let manifest: Pep621Manifest = toml::from_str(source.content())?;
    let mut dependencies = Vec::new();

    if let Some(project) = &manifest.project {
        for entry in &project.dependencies {
            dependencies.push(record(entry, "dependencies", source)?);
        }
        for (group, entries) in &project.optional_dependencies {
            let label = format!("optional-dependencies:{group}");
            for entry in entries {
                dependencies.push(record(entry, &label, source)?);
            }
        }
    }
    if let Some(build_system) = &manifest.build_system {
        for entry in &build_system.requires {
            dependencies.push(record(entry, "build-system.requires", source)?);
        }
    }

    Ok(dependencies)
}

fn record(
    entry: &str,
    group: &str,
    source: &SourceInput,
) -> Result<ParsedDependency, ParseError> {
    let requirement = Requirement::parse(entry)?;
    Ok(ParsedDependency::from_requirement(
        requirement,
        Some(group.to_owned()),
        source.path(),
    ))
}
