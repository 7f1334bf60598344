//! JSON I/O handling for the CLI
//!
//! - Input: one JSON document, from a file or stdin
//! - Output: one JSON envelope on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Read a JSON document from `path`, or from stdin when `path` is `None`
pub fn read_document(path: Option<&Path>) -> CliResult<Value> {
    let content = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read '{}': {}", path.display(), e))
        })?,
        None => {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if content.trim().is_empty() {
        return Err(CliError::input_error("Empty input"));
    }

    Ok(serde_json::from_str(&content)?)
}

/// Success envelope
pub fn ok_envelope(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// Error envelope
pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

/// Write an envelope to `writer` as one JSON document
pub fn write_envelope<W: Write>(writer: &mut W, envelope: &Value, pretty: bool) -> CliResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, envelope)?;
    } else {
        serde_json::to_writer(&mut *writer, envelope)?;
    }
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Write an envelope to stdout
pub fn write_response(envelope: &Value, pretty: bool) -> CliResult<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_envelope(&mut lock, envelope, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_envelope_is_one_line() {
        let mut out = Vec::new();
        write_envelope(&mut out, &ok_envelope(json!({"a": 1})), false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with('\n'));

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["data"]["a"], 1);
    }

    #[test]
    fn test_read_document_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.json");
        fs::write(&path, r#"{"name": "Jamal"}"#).unwrap();

        let value = read_document(Some(&path)).unwrap();
        assert_eq!(value["name"], "Jamal");
    }

    #[test]
    fn test_empty_file_is_input_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "  \n").unwrap();

        let err = read_document(Some(&path)).unwrap_err();
        assert_eq!(err.message(), "Empty input");
    }
}
