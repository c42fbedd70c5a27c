//! Error types for manifest parsing failures.
//!
//! Each variant maps to a specific failure mode: unreadable inputs, malformed
//! requirement text (with the offending line number when parsing a file),
//! include-graph problems, and unparseable Python or TOML sources.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::requirement::RequirementError;

/// Errors surfaced while parsing dependency manifests.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A manifest file could not be read.
    #[error("failed to read '{path}': {source}")]
    UnreadableSource {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A requirement string could not be parsed.
    #[error(transparent)]
    Requirement(#[from] RequirementError),

    /// A requirement line inside a requirements file could not be parsed.
    #[error("line {line}: {source}")]
    RequirementLine {
        /// One-based logical line number of the offending line.
        line: usize,
        /// The underlying requirement parse failure.
        #[source]
        source: RequirementError,
    },

    /// An `-r`/`-c` option named no target file.
    #[error("line {line}: include option is missing a file argument")]
    MissingIncludeTarget {
        /// One-based logical line number of the offending line.
        line: usize,
    },

    /// Requirements files include each other in a cycle.
    #[error("requirements include cycle through '{path}'")]
    IncludeCycle {
        /// The file reached for the second time.
        path: Utf8PathBuf,
    },

    /// The Tree-sitter Python grammar could not be loaded.
    #[error("failed to initialise the Python grammar: {message}")]
    PythonGrammar {
        /// Grammar loading failure description.
        message: String,
    },

    /// Python source could not be parsed.
    #[error("invalid Python source: {message}")]
    PythonSource {
        /// Description of the syntax problem.
        message: String,
    },

    /// A TOML manifest could not be deserialized.
    #[error("invalid TOML manifest: {0}")]
    Manifest(#[from] Box<toml::de::Error>),
}

impl ParseError {
    /// Creates an invalid-Python-source error.
    pub(crate) fn python_source(message: impl Into<String>) -> Self {
        Self::PythonSource {
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for ParseError {
    fn from(source: toml::de::Error) -> Self {
        Self::Manifest(Box::new(source))
    }
}
