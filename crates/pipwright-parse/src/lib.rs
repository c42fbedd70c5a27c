//! Python dependency-manifest parsing for the pipwright toolchain.
//!
//! This crate extracts dependency declarations from the three manifest
//! flavours the helper understands:
//!
//! - **pip requirements files** via [`parse_requirements`] — logical-line
//!   handling (continuations, comments), recursive `-r`/`-c` includes, and
//!   per-requirement `--hash` options;
//! - **`setup.py`** via [`parse_setup`] — static extraction of literal
//!   `setup()` keyword arguments using the Tree-sitter Python grammar; no
//!   Python code is ever executed;
//! - **PEP 621 `pyproject.toml`** via [`parse_pep621_dependencies`] — the
//!   `[project]` dependency tables plus `[build-system] requires`.
//!
//! All three produce a uniform [`ParsedDependency`] record. Individual
//! requirement strings follow a PEP 508 subset implemented by
//! [`Requirement::parse`].
//!
//! Inputs arrive as [`SourceInput`] values: each operation argument is
//! resolved as a file path when a file of that name exists, and treated as
//! literal manifest content otherwise.

mod dependency;
mod error;
mod pep621;
mod requirement;
mod requirements_txt;
mod setup_py;
mod source;

pub use dependency::ParsedDependency;
pub use error::ParseError;
pub use pep621::parse_pep621_dependencies;
pub use requirement::{Requirement, RequirementError, normalise_name};
pub use requirements_txt::parse_requirements;
pub use setup_py::parse_setup;
pub use source::SourceInput;

/// Tracing target for manifest parsing.
pub(crate) const PARSE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::parse");

#[cfg(test)]
mod tests;
