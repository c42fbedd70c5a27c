//! `pyproject.toml` content hashing.

use pipwright_parse::SourceInput;
use serde_json::Value;
use tracing::{debug, warn};

use crate::HASH_TARGET;
use crate::algorithm::HashAlgorithm;
use crate::canonical::canonical_json;
use crate::error::HashError;

/// Computes the SHA-256 content hash of a `pyproject.toml`.
///
/// The digest covers the canonical JSON rendering of the manifest's
/// dependency-relevant content: `[project] dependencies` and
/// `optional-dependencies`, the whole `[tool.poetry]` table when present,
/// and `[build-system] requires`. When a `poetry.lock` is supplied, the
/// digest it records under `[metadata] content-hash` is compared and a
/// mismatch logged; the computed digest is returned either way.
///
/// # Errors
///
/// Returns an error when the manifest or the lockfile is not valid TOML.
pub fn pyproject_hash(
    pyproject: &SourceInput,
    lockfile: Option<&SourceInput>,
) -> Result<String, HashError> {
    let manifest: toml::Value = toml::from_str(pyproject.content())
        .map_err(|error| HashError::Pyproject(Box::new(error)))?;
    let relevant = relevant_content(&manifest)?;
    let digest = HashAlgorithm::Sha256.digest(canonical_json(&relevant).as_bytes());

    if let Some(lockfile) = lockfile {
        compare_recorded_hash(lockfile, &digest)?;
    }
    Ok(digest)
}

fn relevant_content(manifest: &toml::Value) -> Result<Value, HashError> {
    let mut content = serde_json::Map::new();

    if let Some(project) = manifest.get("project") {
        let mut table = serde_json::Map::new();
        if let Some(dependencies) = project.get("dependencies") {
            table.insert("dependencies".to_owned(), serde_json::to_value(dependencies)?);
        }
        if let Some(optional) = project.get("optional-dependencies") {
            table.insert(
                "optional-dependencies".to_owned(),
                serde_json::to_value(optional)?,
            );
        }
        if !table.is_empty() {
            content.insert("project".to_owned(), Value::Object(table));
        }
    }

    if let Some(poetry) = manifest.get("tool").and_then(|tool| tool.get("poetry")) {
        content.insert("tool.poetry".to_owned(), serde_json::to_value(poetry)?);
    }

    if let Some(requires) = manifest
        .get("build-system")
        .and_then(|build_system| build_system.get("requires"))
    {
        content.insert(
            "build-system.requires".to_owned(),
            serde_json::to_value(requires)?,
        );
    }

    Ok(Value::Object(content))
}

fn compare_recorded_hash(lockfile: &SourceInput, computed: &str) -> Result<(), HashError> {
    let lock: toml::Value = toml::from_str(lockfile.content())
        .map_err(|error| HashError::lockfile(error.to_string()))?;
    let recorded = lock
        .get("metadata")
        .and_then(|metadata| metadata.get("content-hash"))
        .and_then(toml::Value::as_str);

    match recorded {
        Some(recorded) if recorded != computed => {
            warn!(
                target: HASH_TARGET,
                recorded,
                computed,
                "lockfile content-hash does not match pyproject content"
            );
        }
        None => {
            debug!(target: HASH_TARGET, "lockfile records no content-hash");
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYPROJECT: &str = "\
[project]
name = \"demo\"
dependencies = [\"requests==2.0\"]

[project.optional-dependencies]
docs = [\"sphinx>=4\"]

[build-system]
requires = [\"setuptools>=68\"]
";

    #[test]
    fn computes_a_sha256_digest() {
        let digest = pyproject_hash(&SourceInput::from_content(PYPROJECT), None).expect("hash");
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn unrelated_project_metadata_does_not_affect_the_digest() {
        let with_authors = PYPROJECT.replace(
            "name = \"demo\"",
            "name = \"demo\"\nauthors = [{name = \"A Person\"}]",
        );
        let baseline = pyproject_hash(&SourceInput::from_content(PYPROJECT), None).expect("hash");
        let digest =
            pyproject_hash(&SourceInput::from_content(with_authors), None).expect("hash");
        assert_eq!(digest, baseline);
    }

    #[test]
    fn poetry_dependencies_contribute_to_the_digest() {
        let poetry = "\
[tool.poetry]
name = \"demo\"

[tool.poetry.dependencies]
python = \"^3.11\"
requests = \"==2.0\"
";
        let baseline = pyproject_hash(&SourceInput::from_content(poetry), None).expect("hash");
        let changed = poetry.replace("==2.0", "==2.1");
        let digest = pyproject_hash(&SourceInput::from_content(changed), None).expect("hash");
        assert_ne!(digest, baseline);
    }

    #[test]
    fn stale_poetry_lock_still_returns_the_computed_digest() {
        let lockfile = "\
[metadata]
content-hash = \"0000\"
";
        let digest = pyproject_hash(
            &SourceInput::from_content(PYPROJECT),
            Some(&SourceInput::from_content(lockfile)),
        )
        .expect("hash with stale lockfile");
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn invalid_lockfile_is_an_error() {
        let error = pyproject_hash(
            &SourceInput::from_content(PYPROJECT),
            Some(&SourceInput::from_content("not toml [")),
        )
        .expect_err("lockfile is not TOML");
        assert!(matches!(error, HashError::Lockfile { .. }));
    }
}
