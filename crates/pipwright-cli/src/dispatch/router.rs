//! Operation routing for invocation requests.
//!
//! The router maps the `function` field onto the closed [`Operation`] set and
//! calls the collaborator crates with the documented arity: parse operations
//! receive the first argument only, hash operations receive all of them.
//! Unknown function names are not an error — the router returns `None` and
//! the helper exits silently with status 0, matching the host contract.

use serde_json::Value;
use tracing::debug;

use pipwright_hash::{HashAlgorithm, HashError, dependency_hash, pipfile_hash, pyproject_hash};
use pipwright_parse::{
    ParseError, ParsedDependency, SourceInput, parse_pep621_dependencies, parse_requirements,
    parse_setup,
};

use super::errors::DispatchError;
use super::request::InvocationRequest;
use super::response::OperationOutput;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// The closed set of operations the helper exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Parses a pip requirements file.
    ParseRequirements,
    /// Statically extracts dependencies from a `setup.py`.
    ParseSetup,
    /// Extracts dependencies from a PEP 621 `pyproject.toml`.
    ParsePep621Dependencies,
    /// Fingerprints a single dependency specification.
    GetDependencyHash,
    /// Hashes a `Pipfile`'s dependency content.
    GetPipfileHash,
    /// Hashes a `pyproject.toml`'s dependency content.
    GetPyprojectHash,
}

impl Operation {
    /// Every operation, in protocol order.
    pub const ALL: &'static [Self] = &[
        Self::ParseRequirements,
        Self::ParseSetup,
        Self::ParsePep621Dependencies,
        Self::GetDependencyHash,
        Self::GetPipfileHash,
        Self::GetPyprojectHash,
    ];

    /// Maps a function name onto an operation. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "parse_requirements" => Some(Self::ParseRequirements),
            "parse_setup" => Some(Self::ParseSetup),
            "parse_pep621_dependencies" => Some(Self::ParsePep621Dependencies),
            "get_dependency_hash" => Some(Self::GetDependencyHash),
            "get_pipfile_hash" => Some(Self::GetPipfileHash),
            "get_pyproject_hash" => Some(Self::GetPyprojectHash),
            _ => None,
        }
    }

    /// Returns the canonical protocol name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParseRequirements => "parse_requirements",
            Self::ParseSetup => "parse_setup",
            Self::ParsePep621Dependencies => "parse_pep621_dependencies",
            Self::GetDependencyHash => "get_dependency_hash",
            Self::GetPipfileHash => "get_pipfile_hash",
            Self::GetPyprojectHash => "get_pyproject_hash",
        }
    }
}

/// Routes invocation requests to parser and hasher operations.
#[derive(Debug, Default)]
pub struct Router;

impl Router {
    /// Creates a new router.
    pub fn new() -> Self {
        Self
    }

    /// Dispatches a request to the operation it names.
    ///
    /// Returns `Ok(None)` when the function name is unrecognised.
    ///
    /// # Errors
    ///
    /// Returns an error when the arguments do not match the operation's
    /// arity or the operation itself fails.
    pub fn dispatch(
        &self,
        request: &InvocationRequest,
    ) -> Result<Option<OperationOutput>, DispatchError> {
        let Some(operation) = Operation::from_name(request.function()) else {
            debug!(
                target: DISPATCH_TARGET,
                function = request.function(),
                "ignoring unrecognised function"
            );
            return Ok(None);
        };

        debug!(
            target: DISPATCH_TARGET,
            operation = operation.as_str(),
            arguments = request.args().len(),
            "dispatching operation"
        );

        let output = match operation {
            Operation::ParseRequirements => Self::parse_with(request, parse_requirements)?,
            Operation::ParseSetup => Self::parse_with(request, parse_setup)?,
            Operation::ParsePep621Dependencies => {
                Self::parse_with(request, parse_pep621_dependencies)?
            }
            Operation::GetDependencyHash => Self::dependency_hash(request)?,
            Operation::GetPipfileHash => Self::manifest_hash(request, pipfile_hash)?,
            Operation::GetPyprojectHash => Self::manifest_hash(request, pyproject_hash)?,
        };
        Ok(Some(output))
    }

    /// Runs a parse operation over the first argument.
    fn parse_with(
        request: &InvocationRequest,
        parser: fn(&SourceInput) -> Result<Vec<ParsedDependency>, ParseError>,
    ) -> Result<OperationOutput, DispatchError> {
        let raw = first_string_argument(request)?;
        let source = SourceInput::resolve(&raw).map_err(DispatchError::Parse)?;
        let dependencies = parser(&source).map_err(DispatchError::Parse)?;
        Ok(OperationOutput::Json(serde_json::to_value(dependencies)?))
    }

    fn dependency_hash(request: &InvocationRequest) -> Result<OperationOutput, DispatchError> {
        let args = string_arguments(request)?;
        let (name, version, algorithm) = match args.as_slice() {
            [name, version] => (name, version, HashAlgorithm::default()),
            [name, version, algorithm] => (name, version, HashAlgorithm::parse(algorithm)?),
            _ => {
                return Err(DispatchError::invalid_arguments(
                    "get_dependency_hash expects a name, a version, and an optional algorithm",
                ));
            }
        };
        Ok(OperationOutput::Text(dependency_hash(
            name, version, algorithm,
        )))
    }

    /// Runs a manifest hash operation over a manifest and optional lockfile.
    fn manifest_hash(
        request: &InvocationRequest,
        hasher: fn(&SourceInput, Option<&SourceInput>) -> Result<String, HashError>,
    ) -> Result<OperationOutput, DispatchError> {
        let args = string_arguments(request)?;
        let (manifest, lockfile) = match args.as_slice() {
            [manifest] => (manifest, None),
            [manifest, lockfile] => (manifest, Some(lockfile)),
            _ => {
                return Err(DispatchError::invalid_arguments(
                    "manifest hash operations expect a manifest and an optional lockfile",
                ));
            }
        };
        let manifest = SourceInput::resolve(manifest).map_err(DispatchError::Parse)?;
        let lockfile = lockfile
            .map(|raw| SourceInput::resolve(raw))
            .transpose()
            .map_err(DispatchError::Parse)?;
        Ok(OperationOutput::Text(hasher(&manifest, lockfile.as_ref())?))
    }
}

/// Extracts the first argument as a string; surplus arguments are ignored.
fn first_string_argument(request: &InvocationRequest) -> Result<String, DispatchError> {
    let value = request.args().first().ok_or_else(|| {
        DispatchError::invalid_arguments("operation requires at least one argument")
    })?;
    string_value(value)
}

/// Extracts every argument as a string.
fn string_arguments(request: &InvocationRequest) -> Result<Vec<String>, DispatchError> {
    request.args().iter().map(string_value).collect()
}

fn string_value(value: &Value) -> Result<String, DispatchError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| DispatchError::invalid_arguments("arguments must be strings"))
}
