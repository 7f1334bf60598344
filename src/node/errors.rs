//! Error types for schema construction and input binding
//!
//! Two families, never mixed:
//! - `SchemaError`: programmer errors raised while the node tree is declared
//! - `BindError`: validation failures raised while input is walked
//!
//! Error codes:
//! - INPUT_REQUIRED
//! - INPUT_CONSTRAINT_FAILED
//! - INPUT_INVALID_VALUE
//! - INPUT_INVALID_DATE
//! - INPUT_INVALID_EMAIL
//! - INPUT_INVALID_FIELD
//! - INPUT_UNRESOLVED_ITEMS

use std::fmt;

use thiserror::Error;

use super::value::Value;

/// Validation error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindErrorCode {
    /// A required field is absent or null
    Required,
    /// A declared constraint rejected the value
    ConstraintFailed,
    /// A scalar could not be coerced to the node's type
    InvalidValue,
    /// A datetime string did not match the node's format
    InvalidDate,
    /// An email address failed normalization or validation
    InvalidEmail,
    /// A composite node received a non-composite value
    InvalidField,
    /// A list node was walked before its item type was resolved
    UnresolvedItems,
}

impl BindErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            BindErrorCode::Required => "INPUT_REQUIRED",
            BindErrorCode::ConstraintFailed => "INPUT_CONSTRAINT_FAILED",
            BindErrorCode::InvalidValue => "INPUT_INVALID_VALUE",
            BindErrorCode::InvalidDate => "INPUT_INVALID_DATE",
            BindErrorCode::InvalidEmail => "INPUT_INVALID_EMAIL",
            BindErrorCode::InvalidField => "INPUT_INVALID_FIELD",
            BindErrorCode::UnresolvedItems => "INPUT_UNRESOLVED_ITEMS",
        }
    }
}

impl fmt::Display for BindErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation failure for one field.
///
/// Displays as the bare human-readable message so that it can be surfaced
/// to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BindError {
    code: BindErrorCode,
    field: String,
    message: String,
}

impl BindError {
    /// Create an error with an explicit code and message
    pub fn new(code: BindErrorCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            field: field.into(),
            message: message.into(),
        }
    }

    /// A scalar value could not be coerced
    pub fn invalid_value(field: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            BindErrorCode::InvalidValue,
            field,
            format!("Invalid {}: {}", field, reason),
        )
    }

    /// A datetime string could not be parsed
    pub fn invalid_date(field: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            BindErrorCode::InvalidDate,
            field,
            format!("Invalid {}: {}", field, reason),
        )
    }

    /// An email address was rejected; `original` is the value before normalization
    pub fn invalid_email(field: &str, original: &str) -> Self {
        Self::new(
            BindErrorCode::InvalidEmail,
            field,
            format!("Invalid email: {}", original),
        )
    }

    /// An object node received something other than a mapping
    pub fn invalid_field(field: &str, value: &Value) -> Self {
        Self::new(
            BindErrorCode::InvalidField,
            field,
            format!("Invalid field {}: {}", field, value),
        )
    }

    pub fn unresolved_items(field: &str) -> Self {
        Self::new(
            BindErrorCode::UnresolvedItems,
            field,
            format!("{} has no resolved item type", field),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> BindErrorCode {
        self.code
    }

    /// Returns the name of the field that failed
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for bind operations
pub type BindResult<T> = Result<T, BindError>;

/// Schema construction errors.
///
/// These are raised synchronously while the tree is declared and never
/// surface as a bind result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The registry has no factory for this tag
    #[error("Invalid node type: {0}")]
    InvalidType(String),

    /// Children were declared on a scalar node
    #[error("Node '{name}' of type {kind} cannot declare child fields")]
    NotComposite { name: String, kind: &'static str },

    /// The same child name was declared twice on one parent
    #[error("Field '{field}' is already declared on '{parent}'")]
    DuplicateField { parent: String, field: String },

    /// Children were declared on a node that was never attached to a registry
    #[error("Node '{0}' is not attached to a registry")]
    Detached(String),

    /// A pattern constraint does not compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A schema definition could not be read or parsed
    #[error("Malformed schema definition '{path}': {reason}")]
    MalformedDefinition { path: String, reason: String },
}

impl SchemaError {
    /// Create an error for a malformed definition
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::MalformedDefinition {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Typed hydration failed: a record does not fit the requested type
#[derive(Debug, Error)]
#[error("Cannot hydrate {class}: {reason}")]
pub struct HydrateError {
    /// Class name of the record (or value kind) being hydrated
    pub class: String,
    /// Underlying deserialization failure
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(BindErrorCode::Required.code(), "INPUT_REQUIRED");
        assert_eq!(BindErrorCode::ConstraintFailed.code(), "INPUT_CONSTRAINT_FAILED");
        assert_eq!(BindErrorCode::InvalidEmail.code(), "INPUT_INVALID_EMAIL");
        assert_eq!(BindErrorCode::InvalidField.code(), "INPUT_INVALID_FIELD");
    }

    #[test]
    fn test_bind_error_displays_bare_message() {
        let err = BindError::invalid_email("email", "abc");
        assert_eq!(err.to_string(), "Invalid email: abc");
        assert_eq!(err.field(), "email");
        assert_eq!(err.code(), BindErrorCode::InvalidEmail);
    }

    #[test]
    fn test_invalid_field_embeds_value() {
        let err = BindError::invalid_field("owner", &Value::Int(1));
        assert_eq!(err.message(), "Invalid field owner: 1");
    }

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::InvalidType("lala".into());
        assert_eq!(err.to_string(), "Invalid node type: lala");
    }
}
