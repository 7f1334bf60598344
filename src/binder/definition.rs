//! Declarative schema definitions
//!
//! A definition is a JSON document describing the same tree `Binder::add`
//! builds in code:
//!
//! ```json
//! {
//!   "fields": [
//!     { "name": "email", "type": "email" },
//!     { "name": "age", "type": "integer", "required": false, "default": 18,
//!       "constraints": [{ "rule": "min", "value": 0 }] },
//!     { "name": "tags", "type": "list", "items": { "type": "string" } },
//!     { "name": "address", "type": "object", "class": "Address",
//!       "fields": [{ "name": "street", "type": "string" }] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tracing::debug;

use crate::constraint::Constraint;
use crate::node::{Class, Node, NodeOptions, SchemaError, SchemaResult};
use crate::registry::{NodeRegistry, TypeSpec};

use super::bind::Binder;

/// Source label for definitions parsed from memory
const INLINE_SOURCE: &str = "<inline>";

/// Complete schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Top-level fields, in declaration order
    pub fields: Vec<FieldDefinition>,
    /// Where the definition was loaded from, for error messages
    #[serde(skip)]
    source: Option<String>,
}

/// One declared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(flatten)]
    pub field_type: FieldType,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Json>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ConstraintDefinition>,
}

fn default_required() -> bool {
    true
}

/// Field types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    Email,
    Dict {
        #[serde(default)]
        fields: Vec<FieldDefinition>,
    },
    Object {
        class: String,
        #[serde(default)]
        fields: Vec<FieldDefinition>,
    },
    List {
        items: Box<FieldType>,
    },
    #[serde(rename = "datetime")]
    DateTime {
        format: String,
    },
}

impl FieldType {
    fn to_spec(&self) -> TypeSpec {
        match self {
            FieldType::String => "string".into(),
            FieldType::Integer => "integer".into(),
            FieldType::Float => "float".into(),
            FieldType::Boolean => "boolean".into(),
            FieldType::Email => "email".into(),
            FieldType::Dict { .. } => "dict".into(),
            FieldType::Object { class, .. } => Class::named(class.clone()).into(),
            FieldType::List { items } => Node::list(items.to_spec()).into(),
            FieldType::DateTime { format } => Node::datetime(format.clone()).into(),
        }
    }

    /// Child fields, looking through list item types
    fn children(&self) -> &[FieldDefinition] {
        match self {
            FieldType::Dict { fields } | FieldType::Object { fields, .. } => fields,
            FieldType::List { items } => items.children(),
            _ => &[],
        }
    }
}

/// Constraint rules available to definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleName {
    MinLength,
    MaxLength,
    Min,
    Max,
    Pattern,
}

/// A declared constraint: `{ "rule": ..., "value": ..., "message": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDefinition {
    pub rule: RuleName,
    pub value: Json,
    /// Overrides the rule's default `{field}` message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConstraintDefinition {
    fn to_constraint(&self, source: &str, field: &str) -> SchemaResult<Constraint> {
        let constraint = match self.rule {
            RuleName::MinLength => Constraint::min_length(self.length(source, field)?),
            RuleName::MaxLength => Constraint::max_length(self.length(source, field)?),
            RuleName::Min => Constraint::min(self.number(source, field)?),
            RuleName::Max => Constraint::max(self.number(source, field)?),
            RuleName::Pattern => {
                let pattern = self.value.as_str().ok_or_else(|| self.bad_value(source, field))?;
                let regex = Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })?;
                Constraint::pattern(regex)
            }
        };

        Ok(match &self.message {
            Some(message) => constraint.with_message(message.clone()),
            None => constraint,
        })
    }

    fn length(&self, source: &str, field: &str) -> SchemaResult<usize> {
        self.value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| self.bad_value(source, field))
    }

    fn number(&self, source: &str, field: &str) -> SchemaResult<f64> {
        self.value.as_f64().ok_or_else(|| self.bad_value(source, field))
    }

    fn bad_value(&self, source: &str, field: &str) -> SchemaError {
        SchemaError::malformed(
            source,
            format!(
                "field '{}': invalid value {} for rule {:?}",
                field, self.value, self.rule
            ),
        )
    }
}

impl SchemaDefinition {
    /// Parses a definition from JSON text
    pub fn from_json_str(source: &str) -> SchemaResult<Self> {
        serde_json::from_str(source)
            .map_err(|e| SchemaError::malformed(INLINE_SOURCE, format!("Invalid JSON: {}", e)))
    }

    /// Loads a definition file
    pub fn from_file(path: &Path) -> SchemaResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let mut definition: Self = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;
        definition.source = Some(path.display().to_string());

        debug!(path = %path.display(), "loaded schema definition");
        Ok(definition)
    }

    /// Returns the file this definition was loaded from, or `<inline>`
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(INLINE_SOURCE)
    }

    /// Builds a binder using the built-in registry
    pub fn build(&self) -> SchemaResult<Binder> {
        self.build_with(NodeRegistry::default())
    }

    /// Builds a binder resolving types with `registry`
    pub fn build_with(&self, registry: NodeRegistry) -> SchemaResult<Binder> {
        let mut binder = Binder::with_registry(registry);
        declare_fields(binder.root_mut(), self.source(), &self.fields)?;
        Ok(binder)
    }
}

fn declare_fields(
    parent: &mut Node,
    source: &str,
    fields: &[FieldDefinition],
) -> SchemaResult<()> {
    for field in fields {
        let constraints = field
            .constraints
            .iter()
            .map(|c| c.to_constraint(source, &field.name))
            .collect::<SchemaResult<Vec<_>>>()?;

        let options = NodeOptions {
            required: field.required,
            constraints,
            default: field.default.clone(),
        };

        let node = parent.add_with(&field.name, field.field_type.to_spec(), options)?;
        declare_fields(node, source, field.field_type.children())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{BindErrorCode, Value};
    use serde_json::json;
    use tempfile::TempDir;

    const USER_SCHEMA: &str = r#"{
        "description": "signup form",
        "fields": [
            { "name": "email", "type": "email" },
            { "name": "age", "type": "integer", "required": false, "default": "18",
              "constraints": [{ "rule": "min", "value": 13 }] },
            { "name": "tags", "type": "list", "required": false,
              "items": { "type": "string" } },
            { "name": "joined", "type": "datetime", "format": "%Y-%m-%d" },
            { "name": "phones", "type": "list",
              "items": { "type": "object", "class": "Telephone",
                         "fields": [{ "name": "number", "type": "string" }] } }
        ]
    }"#;

    #[test]
    fn test_parses_and_builds_schema() {
        let definition = SchemaDefinition::from_json_str(USER_SCHEMA).unwrap();
        assert_eq!(definition.fields.len(), 5);
        assert_eq!(definition.description.as_deref(), Some("signup form"));

        let mut binder = definition.build().unwrap();
        binder.bind(json!({
            "email": " A@B.io ",
            "joined": "2024-02-29",
            "phones": [{ "number": 5 }]
        }));

        assert!(binder.is_valid(), "{:?}", binder.error_as_string());
        let data = binder.data().unwrap();
        assert_eq!(data.get("email"), Some(&Value::from("a@b.io")));
        assert_eq!(data.get("age"), Some(&Value::Int(18)));
        assert_eq!(data.get("tags"), None);

        let phones = data.get("phones").and_then(Value::as_list).unwrap();
        assert_eq!(phones[0].get("number"), Some(&Value::from("5")));
    }

    #[test]
    fn test_declared_constraints_apply() {
        let mut binder = SchemaDefinition::from_json_str(USER_SCHEMA)
            .unwrap()
            .build()
            .unwrap();
        binder.bind(json!({
            "email": "a@b.io",
            "age": 9,
            "joined": "2024-02-29",
            "phones": []
        }));

        let err = binder.error().unwrap();
        assert_eq!(err.code(), BindErrorCode::ConstraintFailed);
        assert_eq!(err.message(), "age must be at least 13");
    }

    #[test]
    fn test_custom_message_and_pattern() {
        let source = r#"{ "fields": [
            { "name": "zip", "type": "string",
              "constraints": [{ "rule": "pattern", "value": "^[0-9]{5}$",
                                "message": "{field} must be five digits" }] }
        ] }"#;
        let mut binder = SchemaDefinition::from_json_str(source).unwrap().build().unwrap();

        binder.bind(json!({ "zip": "123" }));
        assert_eq!(binder.error_as_string().as_deref(), Some("zip must be five digits"));
    }

    #[test]
    fn test_invalid_pattern_is_schema_error() {
        let source = r#"{ "fields": [
            { "name": "zip", "type": "string",
              "constraints": [{ "rule": "pattern", "value": "([" }] }
        ] }"#;
        let err = SchemaDefinition::from_json_str(source).unwrap().build().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }));
    }

    #[test]
    fn test_bad_rule_value_is_schema_error() {
        let source = r#"{ "fields": [
            { "name": "name", "type": "string",
              "constraints": [{ "rule": "min_length", "value": "three" }] }
        ] }"#;
        let err = SchemaDefinition::from_json_str(source).unwrap().build().unwrap_err();
        assert!(err.to_string().contains("min_length") || err.to_string().contains("MinLength"));
    }

    #[test]
    fn test_unknown_type_is_malformed() {
        let err = SchemaDefinition::from_json_str(r#"{ "fields": [{ "name": "x", "type": "lala" }] }"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::MalformedDefinition { .. }));
    }

    #[test]
    fn test_loads_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user.json");
        fs::write(&path, USER_SCHEMA).unwrap();

        let definition = SchemaDefinition::from_file(&path).unwrap();
        assert_eq!(definition.fields[0].name, "email");

        assert_eq!(definition.source(), path.display().to_string());

        let missing = SchemaDefinition::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_bad_rule_value_names_definition_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad_rule.json");
        fs::write(
            &path,
            r#"{ "fields": [
                { "name": "age", "type": "integer",
                  "constraints": [{ "rule": "min", "value": "ten" }] }
            ] }"#,
        )
        .unwrap();

        let err = SchemaDefinition::from_file(&path).unwrap().build().unwrap_err();
        match err {
            SchemaError::MalformedDefinition { path: source, .. } => {
                assert_eq!(source, path.display().to_string());
            }
            other => panic!("unexpected error {:?}", other),
        }

        let inline = SchemaDefinition::from_json_str(
            r#"{ "fields": [{ "name": "age", "type": "integer",
                  "constraints": [{ "rule": "min", "value": "ten" }] }] }"#,
        )
        .unwrap();
        assert_eq!(inline.source(), "<inline>");
    }
}
