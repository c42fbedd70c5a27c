//! PEP 508 requirement parsing.
//!
//! This module implements the subset of the requirement grammar the helper
//! needs: a distribution name, optional extras, an optional version
//! specifier (bare or parenthesised, comma-separated clauses), an optional
//! `@ <url>` direct reference, and an optional `; <markers>` tail. Version
//! clauses are validated against the PEP 440 operator set but version text
//! itself is carried verbatim.

use thiserror::Error;

/// Comparison operators accepted in version clauses, longest first so that
/// `===` is not consumed as `==`.
const VERSION_OPERATORS: &[&str] = &["===", "==", ">=", "<=", "~=", "!=", "<", ">"];

/// A parsed requirement specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Distribution name as written.
    pub name: String,
    /// Requested extras, sorted.
    pub extras: Vec<String>,
    /// Normalised version specifier (`==2.0,<3` style), when present.
    pub specifier: Option<String>,
    /// Direct-reference URL, when the requirement uses the `name @ url` form.
    pub url: Option<String>,
    /// Environment-marker text, when present.
    pub markers: Option<String>,
}

/// Error raised when requirement text cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid requirement '{input}': {message}")]
pub struct RequirementError {
    input: String,
    message: String,
}

impl RequirementError {
    fn new(input: &str, message: impl Into<String>) -> Self {
        Self {
            input: input.trim().to_owned(),
            message: message.into(),
        }
    }

    /// The rejected requirement text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Requirement {
    /// Parses a requirement string.
    ///
    /// # Errors
    ///
    /// Returns [`RequirementError`] when the text is empty, the name contains
    /// characters outside the PEP 508 name alphabet, extras are unterminated,
    /// or a version clause uses an unknown operator or names no version.
    pub fn parse(input: &str) -> Result<Self, RequirementError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(RequirementError::new(input, "empty requirement"));
        }

        // Environment markers follow the first ';'.
        let (body, markers) = match trimmed.split_once(';') {
            Some((body, tail)) => {
                let tail = tail.trim();
                if tail.is_empty() {
                    return Err(RequirementError::new(input, "empty environment marker"));
                }
                (body.trim(), Some(tail.to_owned()))
            }
            None => (trimmed, None),
        };

        // Direct references use `name [extras] @ <url>`.
        let (body, url) = match body.split_once('@') {
            Some((lhs, rhs)) => {
                let rhs = rhs.trim();
                if rhs.is_empty() {
                    return Err(RequirementError::new(input, "empty direct-reference URL"));
                }
                (lhs.trim(), Some(rhs.to_owned()))
            }
            None => (body, None),
        };

        let name_end = body
            .find(|c: char| c.is_whitespace() || matches!(c, '[' | '(' | '<' | '>' | '=' | '!' | '~'))
            .unwrap_or(body.len());
        let name = body.get(..name_end).unwrap_or(body);
        let mut rest = body.get(name_end..).unwrap_or("").trim_start();

        if name.is_empty() {
            return Err(RequirementError::new(input, "missing distribution name"));
        }
        if !name.chars().all(is_name_char) {
            return Err(RequirementError::new(input, "invalid distribution name"));
        }

        let mut extras = Vec::new();
        if let Some(after_bracket) = rest.strip_prefix('[') {
            let Some((list, tail)) = after_bracket.split_once(']') else {
                return Err(RequirementError::new(input, "unterminated extras list"));
            };
            extras = list
                .split(',')
                .map(|extra| extra.trim().to_owned())
                .filter(|extra| !extra.is_empty())
                .collect();
            extras.sort_unstable();
            rest = tail.trim_start();
        }

        let specifier = if url.is_some() {
            if !rest.is_empty() {
                return Err(RequirementError::new(
                    input,
                    "version specifier not allowed with a direct reference",
                ));
            }
            None
        } else if rest.is_empty() {
            None
        } else {
            Some(parse_specifier(rest, input)?)
        };

        Ok(Self {
            name: name.to_owned(),
            extras,
            specifier,
            url,
            markers,
        })
    }
}

/// Normalises a distribution name per PEP 503: lower-case, with runs of
/// `-`, `_`, and `.` collapsed to a single `-`.
#[must_use]
pub fn normalise_name(name: &str) -> String {
    let mut normalised = String::with_capacity(name.len());
    let mut pending_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            pending_separator = true;
        } else {
            if pending_separator && !normalised.is_empty() {
                normalised.push('-');
            }
            pending_separator = false;
            normalised.push(c.to_ascii_lowercase());
        }
    }
    normalised
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Parses and normalises a version specifier: parentheses stripped, clause
/// whitespace removed, clauses joined with a single comma.
fn parse_specifier(raw: &str, input: &str) -> Result<String, RequirementError> {
    let mut text = raw.trim();
    if let Some(inner) = text.strip_prefix('(') {
        text = inner
            .strip_suffix(')')
            .ok_or_else(|| RequirementError::new(input, "unbalanced parentheses in specifier"))?;
    }

    let mut clauses = Vec::new();
    for clause in text.split(',') {
        let clause: String = clause.split_whitespace().collect();
        if clause.is_empty() {
            return Err(RequirementError::new(input, "empty version clause"));
        }
        let operator = VERSION_OPERATORS
            .iter()
            .find(|op| clause.starts_with(**op))
            .ok_or_else(|| RequirementError::new(input, "unknown version operator"))?;
        if clause.len() == operator.len() {
            return Err(RequirementError::new(input, "version clause names no version"));
        }
        clauses.push(clause);
    }
    Ok(clauses.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_pinned_requirement() {
        let requirement = Requirement::parse("requests==2.0").expect("parse");
        assert_eq!(requirement.name, "requests");
        assert_eq!(requirement.specifier.as_deref(), Some("==2.0"));
        assert!(requirement.extras.is_empty());
        assert!(requirement.markers.is_none());
        assert!(requirement.url.is_none());
    }

    #[rstest]
    #[case("requests >= 2.0 , < 3", ">=2.0,<3")]
    #[case("requests (==2.0)", "==2.0")]
    #[case("requests===2.0", "===2.0")]
    #[case("requests==2.*", "==2.*")]
    fn normalises_specifiers(#[case] input: &str, #[case] expected: &str) {
        let requirement = Requirement::parse(input).expect("parse");
        assert_eq!(requirement.specifier.as_deref(), Some(expected));
    }

    #[test]
    fn parses_extras_sorted() {
        let requirement = Requirement::parse("requests[socks,security]==2.0").expect("parse");
        assert_eq!(requirement.extras, vec!["security", "socks"]);
    }

    #[test]
    fn parses_markers() {
        let requirement =
            Requirement::parse("requests==2.0 ; python_version >= \"3.8\"").expect("parse");
        assert_eq!(
            requirement.markers.as_deref(),
            Some("python_version >= \"3.8\"")
        );
    }

    #[test]
    fn parses_direct_reference() {
        let requirement =
            Requirement::parse("pip @ https://example.com/pip-24.0.tar.gz").expect("parse");
        assert_eq!(requirement.name, "pip");
        assert_eq!(
            requirement.url.as_deref(),
            Some("https://example.com/pip-24.0.tar.gz")
        );
        assert!(requirement.specifier.is_none());
    }

    #[test]
    fn bare_name_has_no_specifier() {
        let requirement = Requirement::parse("requests").expect("parse");
        assert!(requirement.specifier.is_none());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("==2.0")]
    #[case("name space==1.0")]
    #[case("requests[security==2.0")]
    #[case("requests=2.0")]
    #[case("requests==")]
    #[case("requests==2.0,")]
    fn rejects_malformed_requirements(#[case] input: &str) {
        assert!(Requirement::parse(input).is_err(), "{input:?} should fail");
    }

    #[rstest]
    #[case("Requests", "requests")]
    #[case("zope.interface", "zope-interface")]
    #[case("ruamel_yaml.clib", "ruamel-yaml-clib")]
    #[case("a---b", "a-b")]
    fn normalises_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalise_name(input), expected);
    }
}
