//! Fingerprinting of single dependency specifications.

use pipwright_parse::normalise_name;

use crate::algorithm::HashAlgorithm;

/// Computes the stable fingerprint of a dependency specification.
///
/// The digest covers the canonical form `<normalised_name>==<version>`, so
/// spelling variants of the same name (`Requests`, `requests`) and incidental
/// whitespace around the version hash identically.
#[must_use]
pub fn dependency_hash(name: &str, version: &str, algorithm: HashAlgorithm) -> String {
    let canonical = format!(
        "{}=={}",
        normalise_name(name),
        version.trim().to_lowercase()
    );
    algorithm.digest(canonical.as_bytes())
}
