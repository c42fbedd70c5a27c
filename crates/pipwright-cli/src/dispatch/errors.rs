//! Error types for request dispatch failures.
//!
//! Each variant maps to a specific failure mode and carries enough context to
//! produce an actionable diagnostic on standard error. The exit-status
//! mapping distinguishes request and operation errors (status 1) from
//! infrastructure failures (status 2).

use std::io;

use thiserror::Error;

use pipwright_hash::HashError;
use pipwright_parse::ParseError;

/// Errors surfaced during request parsing and dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request payload could not be parsed as valid JSON.
    #[error("malformed request: {message}")]
    MalformedRequest {
        /// Description of the JSON problem.
        message: String,
        /// Underlying deserialization failure, when one exists.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The request exceeds the maximum allowed size.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Observed payload size.
        size: usize,
        /// Configured payload cap.
        max_size: usize,
    },

    /// The operation arguments are missing, non-string, or of the wrong arity.
    #[error("invalid arguments: {message}")]
    InvalidArguments {
        /// Description of the argument problem.
        message: String,
    },

    /// A manifest parsing operation failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A hashing operation failed.
    #[error(transparent)]
    Hash(#[from] HashError),

    /// IO error while reading the request or writing the result.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Result serialization failed.
    #[error("failed to serialize result: {0}")]
    SerializeResponse(#[from] serde_json::Error),
}

impl DispatchError {
    /// Returns the exit status code for this error.
    ///
    /// Request and operation errors return status 1. Infrastructure failures
    /// (IO, serialization) return status 2.
    pub fn exit_status(&self) -> i32 {
        match self {
            Self::MalformedRequest { .. }
            | Self::RequestTooLarge { .. }
            | Self::InvalidArguments { .. }
            | Self::Parse(_)
            | Self::Hash(_) => 1,
            Self::Io(_) | Self::SerializeResponse(_) => 2,
        }
    }

    /// Creates a malformed request error from a serde error.
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedRequest {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed request error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a request too large error.
    pub fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }

    /// Creates an invalid arguments error.
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }
}
