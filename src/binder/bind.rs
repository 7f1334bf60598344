//! Binder façade
//!
//! Holds the root node, runs one traversal per `bind`, and keeps the outcome
//! (hydrated data or a single error) until the next `bind`.

use serde_json::{Map as JsonMap, Value as Json};
use tracing::debug;

use crate::node::{BindError, Node, NodeOptions, SchemaResult, Value};
use crate::registry::{NodeRegistry, TypeSpec};

use super::definition::SchemaDefinition;

/// Binds raw input against a schema declared with `add`.
///
/// `bind` takes `&mut self`, so one binder never runs two binds at once.
/// Share a schema across threads by cloning the binder.
#[derive(Debug, Clone)]
pub struct Binder {
    root: Node,
    output: Option<Value>,
    errors: Vec<BindError>,
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

impl Binder {
    /// Binder using the built-in registry
    pub fn new() -> Self {
        Self::with_registry(NodeRegistry::default())
    }

    pub fn with_registry(registry: NodeRegistry) -> Self {
        Self {
            root: Node::root(registry),
            output: None,
            errors: Vec::new(),
        }
    }

    /// Binder declared from a schema definition
    pub fn from_definition(definition: &SchemaDefinition) -> SchemaResult<Self> {
        definition.build()
    }

    /// Declares a required top-level field
    pub fn add(&mut self, name: &str, node_type: impl Into<TypeSpec>) -> SchemaResult<&mut Node> {
        self.root.add(name, node_type)
    }

    /// Declares a top-level field with options
    pub fn add_with(
        &mut self,
        name: &str,
        node_type: impl Into<TypeSpec>,
        options: NodeOptions,
    ) -> SchemaResult<&mut Node> {
        self.root.add_with(name, node_type, options)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Binds `input` with no extra defaults
    pub fn bind(&mut self, input: impl Into<Value>) {
        self.bind_with_defaults(input, JsonMap::new());
    }

    /// Binds `input`.
    ///
    /// `defaults` are merged into the root's default map (and stay there for
    /// later binds); each is used when its optional field is missing.
    /// Validation failures never escape: the first one is stored and the
    /// data is left unset.
    pub fn bind_with_defaults(&mut self, input: impl Into<Value>, defaults: JsonMap<String, Json>) {
        self.root.merge_defaults(defaults);
        self.errors.clear();
        self.output = None;

        let input = input.into();
        match self.root.walk(input).and_then(|walked| self.root.get_value(walked)) {
            Ok(value) => {
                debug!(fields = self.root.children().len(), "input bound");
                self.output = Some(value);
            }
            Err(e) => {
                debug!(code = %e.code(), field = e.field(), "input rejected: {}", e);
                self.errors.push(e);
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the bound data of the last successful bind
    pub fn data(&self) -> Option<&Value> {
        self.output.as_ref()
    }

    /// Takes the bound data, leaving the binder unset
    pub fn take_data(&mut self) -> Option<Value> {
        self.output.take()
    }

    /// Returns the error of the last failed bind
    pub fn error(&self) -> Option<&BindError> {
        self.errors.first()
    }

    /// Returns the stored error message, or `None` when valid
    pub fn error_as_string(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }

        Some(
            self.errors
                .iter()
                .map(BindError::message)
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}
