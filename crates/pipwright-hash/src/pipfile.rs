//! `Pipfile` content hashing.

use pipwright_parse::SourceInput;
use serde_json::Value;
use tracing::{debug, warn};

use crate::HASH_TARGET;
use crate::algorithm::HashAlgorithm;
use crate::canonical::canonical_json;
use crate::error::HashError;

/// `Pipfile` sections that contribute to the content hash.
const RELEVANT_SECTIONS: &[&str] = &["source", "requires", "packages", "dev-packages"];

/// Computes the SHA-256 content hash of a `Pipfile`.
///
/// The digest covers the canonical JSON rendering of the dependency-relevant
/// sections only, so formatting changes and unrelated tables do not affect
/// it. When a `Pipfile.lock` is supplied, the digest it records under
/// `_meta.hash.sha256` is compared against the computed value and a warning
/// logged on mismatch; the computed digest is returned either way.
///
/// # Errors
///
/// Returns an error when the `Pipfile` is not valid TOML or the lockfile is
/// not valid JSON.
pub fn pipfile_hash(
    pipfile: &SourceInput,
    lockfile: Option<&SourceInput>,
) -> Result<String, HashError> {
    let manifest: toml::Value =
        toml::from_str(pipfile.content()).map_err(|error| HashError::Pipfile(Box::new(error)))?;
    let relevant = relevant_content(&manifest)?;
    let digest = HashAlgorithm::Sha256.digest(canonical_json(&relevant).as_bytes());

    if let Some(lockfile) = lockfile {
        compare_recorded_hash(lockfile, &digest)?;
    }
    Ok(digest)
}

fn relevant_content(manifest: &toml::Value) -> Result<Value, HashError> {
    let mut content = serde_json::Map::new();
    for section in RELEVANT_SECTIONS {
        if let Some(value) = manifest.get(section) {
            content.insert((*section).to_owned(), serde_json::to_value(value)?);
        }
    }
    Ok(Value::Object(content))
}

fn compare_recorded_hash(lockfile: &SourceInput, computed: &str) -> Result<(), HashError> {
    let lock: Value = serde_json::from_str(lockfile.content())
        .map_err(|error| HashError::lockfile(error.to_string()))?;
    let recorded = lock
        .get("_meta")
        .and_then(|meta| meta.get("hash"))
        .and_then(|hash| hash.get("sha256"))
        .and_then(Value::as_str);

    match recorded {
        Some(recorded) if recorded != computed => {
            warn!(
                target: HASH_TARGET,
                recorded,
                computed,
                "lockfile hash does not match Pipfile content"
            );
        }
        None => {
            debug!(target: HASH_TARGET, "lockfile records no sha256 hash");
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIPFILE: &str = "\
[[source]]
name = \"pypi\"
url = \"https://pypi.org/simple\"
verify_ssl = true

[packages]
requests = \"==2.0\"

[dev-packages]
pytest = \"*\"
";

    #[test]
    fn computes_a_sha256_digest() {
        let digest = pipfile_hash(&SourceInput::from_content(PIPFILE), None).expect("hash");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn unrelated_content_does_not_affect_the_digest() {
        let baseline = pipfile_hash(&SourceInput::from_content(PIPFILE), None).expect("hash");
        let with_scripts = format!("{PIPFILE}\n[scripts]\ntest = \"pytest\"\n");
        let digest =
            pipfile_hash(&SourceInput::from_content(with_scripts), None).expect("hash");
        assert_eq!(digest, baseline);
    }

    #[test]
    fn section_order_does_not_affect_the_digest() {
        let reordered = "\
[dev-packages]
pytest = \"*\"

[packages]
requests = \"==2.0\"

[[source]]
name = \"pypi\"
url = \"https://pypi.org/simple\"
verify_ssl = true
";
        let baseline = pipfile_hash(&SourceInput::from_content(PIPFILE), None).expect("hash");
        let digest = pipfile_hash(&SourceInput::from_content(reordered), None).expect("hash");
        assert_eq!(digest, baseline);
    }

    #[test]
    fn dependency_changes_change_the_digest() {
        let changed = PIPFILE.replace("==2.0", "==2.1");
        let baseline = pipfile_hash(&SourceInput::from_content(PIPFILE), None).expect("hash");
        let digest = pipfile_hash(&SourceInput::from_content(changed), None).expect("hash");
        assert_ne!(digest, baseline);
    }

    #[test]
    fn matching_lockfile_is_accepted() {
        let digest = pipfile_hash(&SourceInput::from_content(PIPFILE), None).expect("hash");
        let lockfile = format!(
            "{{\"_meta\": {{\"hash\": {{\"sha256\": \"{digest}\"}}}}, \"default\": {{}}}}"
        );
        let verified = pipfile_hash(
            &SourceInput::from_content(PIPFILE),
            Some(&SourceInput::from_content(lockfile)),
        )
        .expect("hash with lockfile");
        assert_eq!(verified, digest);
    }

    #[test]
    fn stale_lockfile_still_returns_the_computed_digest() {
        let lockfile = "{\"_meta\": {\"hash\": {\"sha256\": \"0000\"}}}";
        let digest = pipfile_hash(
            &SourceInput::from_content(PIPFILE),
            Some(&SourceInput::from_content(lockfile)),
        )
        .expect("hash with stale lockfile");
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn invalid_lockfile_is_an_error() {
        let error = pipfile_hash(
            &SourceInput::from_content(PIPFILE),
            Some(&SourceInput::from_content("not json")),
        )
        .expect_err("lockfile is not JSON");
        assert!(matches!(error, HashError::Lockfile { .. }));
    }

    #[test]
    fn invalid_pipfile_is_an_error() {
        let error =
            pipfile_hash(&SourceInput::from_content("packages = ["), None).expect_err("bad toml");
        assert!(matches!(error, HashError::Pipfile(_)));
    }
}
