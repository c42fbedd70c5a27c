//! Static `setup.py` dependency extraction.
//!
//! The file is parsed with the Tree-sitter Python grammar and the `setup(...)`
//! call located structurally; no Python code runs. Only literal keyword
//! argument values are extracted — names, calls, and comprehensions are
//! skipped, matching what can be known without executing the file.

use tracing::debug;
use tree_sitter::Node;

use crate::PARSE_TARGET;
use crate::dependency::ParsedDependency;
use crate::error::ParseError;
use crate::requirement::Requirement;
use crate::source::SourceInput;

/// Keyword arguments holding a flat list of requirement strings.
const LIST_KEYWORDS: &[&str] = &["install_requires", "setup_requires", "tests_require"];

/// Parses a `setup.py` (or literal Python source) and extracts its declared
/// dependencies.
///
/// A file with no `setup` call yields an empty list.
///
/// # Errors
///
/// Returns [`ParseError::PythonSource`] when the source does not parse as
/// Python, and an error when an extracted requirement string is malformed.
pub fn parse_setup(source: &SourceInput) -> Result<Vec<ParsedDependency>, ParseError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|error| ParseError::PythonGrammar {
            message: error.to_string(),
        })?;

    let tree = parser
        .parse(source.content(), None)
        .ok_or_else(|| ParseError::python_source("parser produced no syntax tree"))?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(ParseError::python_source("source contains syntax errors"));
    }

    let mut dependencies = Vec::new();
    let Some(call) = find_setup_call(root, source.content()) else {
        debug!(target: PARSE_TARGET, "no setup() call found");
        return Ok(dependencies);
    };
    let Some(arguments) = call.child_by_field_name("arguments") else {
        return Ok(dependencies);
    };

    let mut cursor = arguments.walk();
    for argument in arguments.named_children(&mut cursor) {
        if argument.kind() != "keyword_argument" {
            continue;
        }
        let Some(keyword) = argument
            .child_by_field_name("name")
            .and_then(|name| node_text(name, source.content()))
        else {
            continue;
        };
        let Some(value) = argument.child_by_field_name("value") else {
            continue;
        };

        if LIST_KEYWORDS.contains(&keyword) {
            collect_requirement_list(value, source, keyword, &mut dependencies)?;
        } else if keyword == "extras_require" {
            collect_extras(value, source, &mut dependencies)?;
        } else if keyword == "python_requires" {
            collect_python_requires(value, source, &mut dependencies);
        }
    }

    Ok(dependencies)
}

/// Finds the first call whose callee is `setup` (bare or as an attribute such
/// as `setuptools.setup`).
fn find_setup_call<'tree>(node: Node<'tree>, source: &str) -> Option<Node<'tree>> {
    if node.kind() == "call" && call_targets_setup(node, source) {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_setup_call(child, source) {
            return Some(found);
        }
    }
    None
}

fn call_targets_setup(call: Node<'_>, source: &str) -> bool {
    let Some(function) = call.child_by_field_name("function") else {
        return false;
    };
    match function.kind() {
        "identifier" => node_text(function, source) == Some("setup"),
        "attribute" => function
            .child_by_field_name("attribute")
            .and_then(|attribute| node_text(attribute, source))
            == Some("setup"),
        _ => false,
    }
}

fn collect_requirement_list(
    value: Node<'_>,
    source: &SourceInput,
    group: &str,
    out: &mut Vec<ParsedDependency>,
) -> Result<(), ParseError> {
    if !matches!(value.kind(), "list" | "tuple") {
        debug!(
            target: PARSE_TARGET,
            group,
            kind = value.kind(),
            "skipping non-literal requirement list"
        );
        return Ok(());
    }

    let mut cursor = value.walk();
    for element in value.named_children(&mut cursor) {
        let Some(text) = string_literal_value(element, source.content()) else {
            debug!(
                target: PARSE_TARGET,
                group,
                kind = element.kind(),
                "skipping non-literal list element"
            );
            continue;
        };
        let requirement = Requirement::parse(&text)?;
        out.push(ParsedDependency::from_requirement(
            requirement,
            Some(group.to_owned()),
            source.path(),
        ));
    }
    Ok(())
}

fn collect_extras(
    value: Node<'_>,
    source: &SourceInput,
    out: &mut Vec<ParsedDependency>,
) -> Result<(), ParseError> {
    if value.kind() != "dictionary" {
        debug!(
            target: PARSE_TARGET,
            kind = value.kind(),
            "skipping non-literal extras_require"
        );
        return Ok(());
    }

    let mut cursor = value.walk();
    for pair in value.named_children(&mut cursor) {
        if pair.kind() != "pair" {
            continue;
        }
        let Some(extra) = pair
            .child_by_field_name("key")
            .and_then(|key| string_literal_value(key, source.content()))
        else {
            continue;
        };
        let Some(entries) = pair.child_by_field_name("value") else {
            continue;
        };
        collect_requirement_list(
            entries,
            source,
            &format!("extras_require:{extra}"),
            out,
        )?;
    }
    Ok(())
}

/// Records `python_requires` as a pseudo-dependency named `python`.
fn collect_python_requires(value: Node<'_>, source: &SourceInput, out: &mut Vec<ParsedDependency>) {
    let Some(specifier) = string_literal_value(value, source.content()) else {
        return;
    };
    out.push(ParsedDependency {
        name: "python".to_owned(),
        normalised_name: "python".to_owned(),
        specifier: Some(specifier),
        extras: Vec::new(),
        markers: None,
        url: None,
        hashes: Vec::new(),
        group: Some("python_requires".to_owned()),
        file: source.path().map(camino::Utf8Path::to_owned),
    });
}

/// Extracts the value of a string literal, honouring adjacent-string
/// concatenation. Returns `None` for anything that is not a plain literal.
fn string_literal_value(node: Node<'_>, source: &str) -> Option<String> {
    match node.kind() {
        "string" => {
            let mut value = String::new();
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "string_content" | "escape_sequence" => {
                        value.push_str(node_text(child, source)?);
                    }
                    "interpolation" => return None,
                    _ => {}
                }
            }
            Some(value)
        }
        "concatenated_string" => {
            let mut value = String::new();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                value.push_str(&string_literal_value(child, source)?);
            }
            Some(value)
        }
        _ => None,
    }
}

fn node_text<'source>(node: Node<'_>, source: &'source str) -> Option<&'source str> {
    node.utf8_text(source.as_bytes()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_content(content: &str) -> Vec<ParsedDependency> {
        parse_setup(&SourceInput::from_content(content)).expect("parse")
    }

    #[test]
    fn extracts_install_requires() {
        let parsed = parse_content(
            "from setuptools import setup\n\
             setup(\n\
                 name=\"demo\",\n\
                 install_requires=[\"requests==2.0\", \"flask>=1.0\"],\n\
             )\n",
        );
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "requests");
        assert_eq!(parsed[0].group.as_deref(), Some("install_requires"));
        assert_eq!(parsed[1].specifier.as_deref(), Some(">=1.0"));
    }

    #[test]
    fn extracts_extras_require_groups() {
        let parsed = parse_content(
            "import setuptools\n\
             setuptools.setup(\n\
                 extras_require={\"docs\": [\"sphinx>=4\"], \"tests\": [\"pytest\"]},\n\
             )\n",
        );
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].group.as_deref(), Some("extras_require:docs"));
        assert_eq!(parsed[1].group.as_deref(), Some("extras_require:tests"));
        assert_eq!(parsed[1].name, "pytest");
    }

    #[test]
    fn extracts_python_requires() {
        let parsed = parse_content("from setuptools import setup\nsetup(python_requires=\">=3.8\")\n");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "python");
        assert_eq!(parsed[0].specifier.as_deref(), Some(">=3.8"));
        assert_eq!(parsed[0].group.as_deref(), Some("python_requires"));
    }

    #[test]
    fn honours_adjacent_string_concatenation() {
        let parsed = parse_content(
            "from setuptools import setup\nsetup(install_requires=[\"requests\" \"==2.0\"])\n",
        );
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].specifier.as_deref(), Some("==2.0"));
    }

    #[test]
    fn skips_non_literal_values() {
        let parsed = parse_content(
            "from setuptools import setup\n\
             deps = [\"requests==2.0\"]\n\
             setup(install_requires=deps, tests_require=[\"pytest\", variable])\n",
        );
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "pytest");
        assert_eq!(parsed[0].group.as_deref(), Some("tests_require"));
    }

    #[test]
    fn file_without_setup_call_yields_nothing() {
        let parsed = parse_content("print(\"hello\")\n");
        assert!(parsed.is_empty());
    }

    #[test]
    fn broken_source_is_an_error() {
        let error = parse_setup(&SourceInput::from_content("def broken(:\n"))
            .expect_err("syntax error");
        assert!(matches!(error, ParseError::PythonSource { .. }));
    }

    #[test]
    fn setup_requires_and_tests_require_are_grouped() {
        let parsed = parse_content(
            "from setuptools import setup\n\
             setup(setup_requires=[\"wheel\"], tests_require=[\"pytest>=7\"])\n",
        );
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].group.as_deref(), Some("setup_requires"));
        assert_eq!(parsed[1].group.as_deref(), Some("tests_require"));
    }
}
