//! Resolution of `path_or_content` operation arguments.
//!
//! Operation arguments name either a manifest on disk or the manifest text
//! itself. An argument is a path exactly when a file of that name exists;
//! anything else is treated as literal content. The origin path, when known,
//! is recorded on parsed dependencies and anchors relative `-r` includes.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::ParseError;

/// A manifest input with its optional on-disk origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    content: String,
    path: Option<Utf8PathBuf>,
}

impl SourceInput {
    /// Resolves an operation argument as a file path or literal content.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnreadableSource`] when the argument names an
    /// existing file that cannot be read.
    pub fn resolve(raw: &str) -> Result<Self, ParseError> {
        let candidate = Utf8Path::new(raw);
        if candidate.is_file() {
            Self::read_file(candidate.to_owned())
        } else {
            Ok(Self::from_content(raw))
        }
    }

    /// Reads a manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnreadableSource`] when the file cannot be read.
    pub fn read_file(path: Utf8PathBuf) -> Result<Self, ParseError> {
        let content = fs::read_to_string(&path).map_err(|source| ParseError::UnreadableSource {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            content,
            path: Some(path),
        })
    }

    /// Wraps literal manifest content with no on-disk origin.
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            path: None,
        }
    }

    /// The manifest text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The on-disk origin, when the input was resolved from a path.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn literal_content_has_no_path() {
        let source = SourceInput::resolve("requests==2.0").expect("resolve");
        assert_eq!(source.content(), "requests==2.0");
        assert!(source.path().is_none());
    }

    #[test]
    fn existing_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "requests==2.0").expect("write");
        let raw = file.path().to_str().expect("utf8 path");

        let source = SourceInput::resolve(raw).expect("resolve");
        assert_eq!(source.content().trim(), "requests==2.0");
        assert_eq!(source.path().map(Utf8Path::as_str), Some(raw));
    }

    #[test]
    fn multi_line_content_is_never_a_path() {
        let source = SourceInput::resolve("requests==2.0\nflask>=1.0").expect("resolve");
        assert!(source.path().is_none());
    }
}
