//! Stable local hashing of Python dependency specifications and manifests.
//!
//! Three operations, all deterministic and network-free:
//!
//! - [`dependency_hash`] — fingerprint of a single `name==version`
//!   specification, name normalised per PEP 503;
//! - [`pipfile_hash`] — digest of a `Pipfile`'s dependency-relevant sections
//!   (`source`, `requires`, `packages`, `dev-packages`);
//! - [`pyproject_hash`] — digest of a `pyproject.toml`'s dependency-relevant
//!   content (`[project]` dependency tables, `[tool.poetry]`, and
//!   `[build-system] requires`).
//!
//! Manifest content is rendered as canonical JSON (recursively sorted object
//! keys, no insignificant whitespace) before digesting, so semantically equal
//! manifests hash identically regardless of key order. Both manifest hashers
//! accept an optional lockfile and log a warning when the digest it records
//! differs from the computed one.

mod algorithm;
mod canonical;
mod dependency;
mod error;
mod pipfile;
mod pyproject;

pub use algorithm::HashAlgorithm;
pub use dependency::dependency_hash;
pub use error::HashError;
pub use pipfile::pipfile_hash;
pub use pyproject::pyproject_hash;

/// Tracing target for hashing operations.
pub(crate) const HASH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::hash");
