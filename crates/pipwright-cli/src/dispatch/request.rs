//! Request deserialization for the dispatch pipeline.

use serde::Deserialize;
use serde_json::Value;

use super::errors::DispatchError;

/// Parsed invocation request from standard input.
///
/// The `function` field selects the operation; `args` carries its positional
/// arguments and may be absent. The function name is matched exactly — no
/// trimming or case folding — because the host system sends canonical names
/// and anything else is treated as unrecognised.
#[derive(Debug, Deserialize)]
pub struct InvocationRequest {
    /// Name of the operation to invoke.
    function: String,
    /// Positional arguments for the operation.
    #[serde(default)]
    args: Vec<Value>,
}

impl InvocationRequest {
    /// Parses a request payload.
    ///
    /// Surrounding whitespace is trimmed before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedRequest`] when the payload is empty
    /// or is not a JSON object with a string `function` field.
    pub fn parse(payload: &[u8]) -> Result<Self, DispatchError> {
        let trimmed = trim_whitespace(payload);
        if trimmed.is_empty() {
            return Err(DispatchError::malformed("empty request payload"));
        }
        serde_json::from_slice(trimmed).map_err(DispatchError::from_json_error)
    }

    /// The requested function name, exactly as sent.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// The positional arguments.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    #[cfg(test)]
    pub(crate) fn new(function: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            function: function.into(),
            args,
        }
    }
}

/// Trims leading and trailing ASCII whitespace from a byte slice.
fn trim_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |pos| pos + 1);
    bytes.get(start..end).unwrap_or_default()
}
