//! Binder subsystem
//!
//! The binder is the entry point for callers: declare a schema with `add`
//! (or load a `SchemaDefinition`), then `bind` raw input and read back either
//! the hydrated data or a single error message.
//!
//! # Example
//!
//! ```
//! use fractal_input::{Binder, NodeOptions, Value};
//! use serde_json::json;
//!
//! let mut binder = Binder::new();
//! binder.add("name", "string").unwrap();
//! binder.add_with("age", "integer", NodeOptions::optional()).unwrap();
//!
//! binder.bind(json!({ "name": "Jamal", "age": "13" }));
//! assert!(binder.is_valid());
//! assert_eq!(binder.data().unwrap().get("age"), Some(&Value::Int(13)));
//!
//! binder.bind(json!({}));
//! assert_eq!(binder.error_as_string().as_deref(), Some("name is required"));
//! ```

mod bind;
mod definition;

pub use bind::Binder;
pub use definition::{
    ConstraintDefinition, FieldDefinition, FieldType, RuleName, SchemaDefinition,
};
