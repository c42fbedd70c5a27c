//! Result printing for the dispatch pipeline.

use std::io::Write;

use serde_json::Value;

use super::errors::DispatchError;

/// Output produced by a dispatched operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutput {
    /// A JSON document (the parse operations' dependency arrays).
    Json(Value),
    /// A bare text line (the hash operations' digests).
    Text(String),
}

/// Writer that renders operation output to a stream.
///
/// JSON output is compact (a single line); text output is written verbatim.
/// Both are newline-terminated and flushed, since the host reads the result
/// as soon as the process exits.
pub struct OutputWriter<W> {
    writer: W,
}

impl<W: Write> OutputWriter<W> {
    /// Creates a new output writer wrapping the given stream.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes an operation result followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_output(&mut self, output: &OperationOutput) -> Result<(), DispatchError> {
        match output {
            OperationOutput::Json(value) => {
                serde_json::to_writer(&mut self.writer, value)?;
            }
            OperationOutput::Text(text) => {
                self.writer.write_all(text.as_bytes())?;
            }
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_compact_json_with_trailing_newline() {
        let mut buffer = Vec::new();
        OutputWriter::new(&mut buffer)
            .write_output(&OperationOutput::Json(json!([{"name": "requests"}])))
            .expect("write");
        assert_eq!(buffer, b"[{\"name\":\"requests\"}]\n");
    }

    #[test]
    fn writes_text_verbatim() {
        let mut buffer = Vec::new();
        OutputWriter::new(&mut buffer)
            .write_output(&OperationOutput::Text("abc123".to_owned()))
            .expect("write");
        assert_eq!(buffer, b"abc123\n");
    }
}
