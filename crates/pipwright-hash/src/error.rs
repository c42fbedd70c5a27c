//! Error types for hashing failures.

use thiserror::Error;

/// Errors surfaced while computing dependency or manifest hashes.
#[derive(Debug, Error)]
pub enum HashError {
    /// The requested digest algorithm is not supported.
    #[error("unknown hash algorithm '{name}' (expected 'sha256' or 'sha512')")]
    UnknownAlgorithm {
        /// The rejected algorithm name.
        name: String,
    },

    /// A manifest input could not be read.
    #[error(transparent)]
    Source(#[from] pipwright_parse::ParseError),

    /// A `Pipfile` could not be deserialized.
    #[error("invalid Pipfile: {0}")]
    Pipfile(#[source] Box<toml::de::Error>),

    /// A `pyproject.toml` could not be deserialized.
    #[error("invalid pyproject manifest: {0}")]
    Pyproject(#[source] Box<toml::de::Error>),

    /// A lockfile supplied for comparison could not be parsed.
    #[error("invalid lockfile: {message}")]
    Lockfile {
        /// Lockfile parse failure description.
        message: String,
    },

    /// Manifest content could not be converted for canonical rendering.
    #[error("failed to canonicalise manifest content: {0}")]
    Canonical(#[from] serde_json::Error),
}

impl HashError {
    /// Creates an unknown-algorithm error.
    pub(crate) fn unknown_algorithm(name: impl Into<String>) -> Self {
        Self::UnknownAlgorithm { name: name.into() }
    }

    /// Creates a lockfile error.
    pub(crate) fn lockfile(message: impl Into<String>) -> Self {
        Self::Lockfile {
            message: message.into(),
        }
    }
}
