//! CLI command implementations
//!
//! Each command returns whether the run succeeded: `Ok(false)` means the
//! input (or schema, for `check`) was rejected and reported on stdout.

use std::path::Path;

use serde_json::{Map as JsonMap, Value};
use tracing::info;

use crate::binder::SchemaDefinition;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{error_envelope, ok_envelope, read_document, write_response};

/// Dispatch a parsed command
pub fn run_command(cmd: Command) -> CliResult<bool> {
    match cmd {
        Command::Bind {
            schema,
            input,
            defaults,
            pretty,
        } => bind(&schema, input.as_deref(), defaults.as_deref(), pretty),
        Command::Check { schema } => check(&schema),
    }
}

/// Bind one document and print the result envelope
pub fn bind(
    schema_path: &Path,
    input_path: Option<&Path>,
    defaults_path: Option<&Path>,
    pretty: bool,
) -> CliResult<bool> {
    let definition = SchemaDefinition::from_file(schema_path)?;
    let input = read_document(input_path)?;
    let defaults = match defaults_path {
        Some(path) => read_defaults(path)?,
        None => JsonMap::new(),
    };

    let (valid, envelope) = bind_envelope(&definition, input, defaults)?;
    write_response(&envelope, pretty)?;
    Ok(valid)
}

/// Binds `input` and wraps the outcome in an output envelope.
pub fn bind_envelope(
    definition: &SchemaDefinition,
    input: Value,
    defaults: JsonMap<String, Value>,
) -> CliResult<(bool, Value)> {
    let mut binder = definition.build()?;
    binder.bind_with_defaults(input, defaults);

    let envelope = match (binder.data(), binder.error()) {
        (Some(data), _) => ok_envelope(Value::from(data)),
        (None, Some(err)) => error_envelope(err.code().code(), err.message()),
        (None, None) => ok_envelope(Value::Null),
    };

    info!(valid = binder.is_valid(), "bind complete");
    Ok((binder.is_valid(), envelope))
}

/// Check that a schema definition loads and builds
pub fn check(schema_path: &Path) -> CliResult<bool> {
    let definition = SchemaDefinition::from_file(schema_path)?;
    let binder = definition.build()?;

    let envelope = ok_envelope(serde_json::json!({
        "fields": binder.root().children().iter().map(|c| c.name()).collect::<Vec<_>>()
    }));
    write_response(&envelope, false)?;
    Ok(true)
}

fn read_defaults(path: &Path) -> CliResult<JsonMap<String, Value>> {
    match read_document(Some(path))? {
        Value::Object(map) => Ok(map),
        other => Err(CliError::input_error(format!(
            "Defaults must be a JSON object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn definition() -> SchemaDefinition {
        SchemaDefinition::from_json_str(
            r#"{ "fields": [
                { "name": "name", "type": "string" },
                { "name": "email", "type": "email", "required": false }
            ] }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_input_yields_ok_envelope() {
        let mut defaults = JsonMap::new();
        defaults.insert("email".into(), json!(" ADMIN@EXAMPLE.com "));

        let (valid, envelope) = bind_envelope(&definition(), json!({"name": 7}), defaults).unwrap();
        assert!(valid);
        assert_eq!(envelope["status"], "ok");
        assert_eq!(envelope["data"]["name"], "7");
        assert_eq!(envelope["data"]["email"], "admin@example.com");
    }

    #[test]
    fn test_rejected_input_yields_error_envelope() {
        let (valid, envelope) = bind_envelope(&definition(), json!({}), JsonMap::new()).unwrap();
        assert!(!valid);
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["code"], "INPUT_REQUIRED");
        assert_eq!(envelope["message"], "name is required");
    }

    #[test]
    fn test_defaults_must_be_an_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defaults.json");
        fs::write(&path, "[1, 2]").unwrap();

        let err = read_defaults(&path).unwrap_err();
        assert!(err.message().contains("JSON object"));
    }

    #[test]
    fn test_check_reports_schema_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(&path, r#"{ "fields": [{ "name": "x", "type": "nope" }] }"#).unwrap();

        let err = check(&path).unwrap_err();
        assert_eq!(err.code(), super::super::errors::CliErrorCode::SchemaError);
    }
}
