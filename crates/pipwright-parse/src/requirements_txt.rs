//! pip requirements-file parsing.
//!
//! Requirements files are processed as logical lines: physical lines ending
//! in `\` are joined, comments and blanks dropped. Option lines are handled
//! before requirement parsing — `-r`/`--requirement` and `-c`/`--constraint`
//! includes recurse (with cycle detection), everything else is skipped.
//! Per-requirement `--hash` options are collected onto the resulting record.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use crate::PARSE_TARGET;
use crate::dependency::ParsedDependency;
use crate::error::ParseError;
use crate::requirement::Requirement;
use crate::source::SourceInput;

/// Group label attached to entries reached through a constraints include.
const CONSTRAINTS_GROUP: &str = "constraints";

/// Parses a requirements file (or literal requirements text).
///
/// Includes are expanded in place, so the output order matches a depth-first
/// read of the file.
///
/// # Errors
///
/// Returns an error for unreadable include targets, include cycles, include
/// options with no file argument, and unparseable requirement lines (the
/// error names the logical line number).
pub fn parse_requirements(source: &SourceInput) -> Result<Vec<ParsedDependency>, ParseError> {
    let mut dependencies = Vec::new();
    let mut include_stack = Vec::new();
    parse_into(source, None, &mut include_stack, &mut dependencies)?;
    Ok(dependencies)
}

fn parse_into(
    source: &SourceInput,
    group: Option<&str>,
    include_stack: &mut Vec<Utf8PathBuf>,
    out: &mut Vec<ParsedDependency>,
) -> Result<(), ParseError> {
    if let Some(path) = source.path() {
        if include_stack.iter().any(|seen| seen.as_path() == path) {
            return Err(ParseError::IncludeCycle {
                path: path.to_owned(),
            });
        }
        include_stack.push(path.to_owned());
    }

    for (line_number, line) in logical_lines(source.content()) {
        if line.starts_with('-') {
            handle_option_line(&line, line_number, source, group, include_stack, out)?;
            continue;
        }

        let (requirement_text, hashes) = split_hash_options(&line);
        let requirement = Requirement::parse(&requirement_text).map_err(|error| {
            ParseError::RequirementLine {
                line: line_number,
                source: error,
            }
        })?;
        let mut record = ParsedDependency::from_requirement(
            requirement,
            group.map(str::to_owned),
            source.path(),
        );
        record.hashes = hashes;
        out.push(record);
    }

    if source.path().is_some() {
        include_stack.pop();
    }
    Ok(())
}

fn handle_option_line(
    line: &str,
    line_number: usize,
    source: &SourceInput,
    group: Option<&str>,
    include_stack: &mut Vec<Utf8PathBuf>,
    out: &mut Vec<ParsedDependency>,
) -> Result<(), ParseError> {
    let mut tokens = line.split_whitespace();
    let Some(flag) = tokens.next() else {
        return Ok(());
    };
    let (name, inline_value) = match flag.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (flag, None),
    };

    let constraints = matches!(name, "-c" | "--constraint");
    if !constraints && !matches!(name, "-r" | "--requirement") {
        debug!(target: PARSE_TARGET, option = name, line = line_number, "skipping option line");
        return Ok(());
    }

    let target = inline_value
        .map(str::to_owned)
        .or_else(|| tokens.next().map(str::to_owned))
        .ok_or(ParseError::MissingIncludeTarget { line: line_number })?;

    let Some(base) = source.path().and_then(Utf8Path::parent) else {
        warn!(
            target: PARSE_TARGET,
            include = %target,
            "skipping include: input has no base directory"
        );
        return Ok(());
    };

    let included = SourceInput::read_file(base.join(target.as_str()))?;
    let nested_group = if constraints {
        Some(CONSTRAINTS_GROUP)
    } else {
        group
    };
    parse_into(&included, nested_group, include_stack, out)
}

/// Splits logical lines out of requirements text: continuations joined,
/// comments stripped, blanks dropped. Each entry carries the one-based
/// number of its first physical line.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut buffer = String::new();
    let mut start = 0usize;

    let flush = |start: usize, buffer: &mut String, lines: &mut Vec<(usize, String)>| {
        let logical = strip_comment(buffer).trim().to_owned();
        buffer.clear();
        if !logical.is_empty() {
            lines.push((start, logical));
        }
    };

    for (index, raw) in content.lines().enumerate() {
        if buffer.is_empty() {
            start = index + 1;
        }
        let trimmed = raw.trim_end();
        if let Some(continued) = trimmed.strip_suffix('\\') {
            buffer.push_str(continued);
            buffer.push(' ');
            continue;
        }
        buffer.push_str(trimmed);
        flush(start, &mut buffer, &mut lines);
    }
    if !buffer.is_empty() {
        flush(start, &mut buffer, &mut lines);
    }

    lines
}

/// Strips a comment: `#` opens one at line start or after whitespace.
fn strip_comment(line: &str) -> &str {
    let mut previous_is_space = true;
    for (index, c) in line.char_indices() {
        if c == '#' && previous_is_space {
            return line.get(..index).unwrap_or(line);
        }
        previous_is_space = c.is_whitespace();
    }
    line
}

/// Separates per-requirement `--hash` options from the requirement text.
/// Other `--` options are discarded.
fn split_hash_options(line: &str) -> (String, Vec<String>) {
    let mut requirement = Vec::new();
    let mut hashes = Vec::new();
    let mut tokens = line.split_whitespace();
    while let Some(token) = tokens.next() {
        if let Some(value) = token.strip_prefix("--hash=") {
            hashes.push(value.to_owned());
        } else if token == "--hash" {
            if let Some(value) = tokens.next() {
                hashes.push(value.to_owned());
            }
        } else if token.starts_with("--") {
            debug!(target: PARSE_TARGET, option = token, "discarding per-requirement option");
        } else {
            requirement.push(token);
        }
    }
    (requirement.join(" "), hashes)
}
