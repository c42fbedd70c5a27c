//! Digest algorithm selection.

use sha2::{Digest, Sha256, Sha512};
use strum::{Display, EnumString};

use crate::error::HashError;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HashAlgorithm {
    /// SHA-256, the default.
    #[default]
    Sha256,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Parses an algorithm name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`HashError::UnknownAlgorithm`] for unrecognised names.
    pub fn parse(name: &str) -> Result<Self, HashError> {
        name.trim()
            .parse()
            .map_err(|_| HashError::unknown_algorithm(name.trim()))
    }

    /// Digests the given bytes and returns the lower-case hex rendering.
    #[must_use]
    pub fn digest(self, bytes: &[u8]) -> String {
        match self {
            Self::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(bytes);
                hex::encode(hasher.finalize())
            }
            Self::Sha512 => {
                let mut hasher = Sha512::new();
                hasher.update(bytes);
                hex::encode(hasher.finalize())
            }
        }
    }
}
