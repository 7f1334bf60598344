//! The schema node and its traversal
//!
//! Binding a value is two steps per node:
//! 1. `walk` matches the input's shape against the node's children and
//!    recurses, so children finish before their parent sees them
//! 2. `get_value` runs the node's constraints in order, then transforms
//!
//! The first failure anywhere aborts the traversal.

use serde_json::{Map as JsonMap, Value as Json};
use tracing::trace;

use crate::constraint::Constraint;
use crate::registry::{NodeRegistry, TypeSpec};

use super::errors::{BindResult, SchemaError, SchemaResult};
use super::kind::{Class, ListItems, NodeKind, NodeOptions};
use super::value::{Fields, Value};
use super::{datetime, email, list, object, scalar};

/// Name of a node that has not been attached under a parent
pub const ROOT_NAME: &str = "root";

/// A schema element that walks, validates, and transforms one piece of input.
///
/// Children are owned exclusively by their parent and kept in declaration
/// order, which is also the key order of composite results.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    kind: NodeKind,
    children: Vec<Node>,
    constraints: Vec<Constraint>,
    required: bool,
    /// Raw value used when this node is optional and missing
    default: Option<Json>,
    /// Per-child raw defaults, keyed by child name
    defaults: JsonMap<String, Json>,
    registry: Option<NodeRegistry>,
}

impl Node {
    /// Create a detached node of the given kind
    pub fn new(kind: NodeKind) -> Self {
        Self {
            name: ROOT_NAME.to_string(),
            kind,
            children: Vec::new(),
            constraints: Vec::new(),
            required: true,
            default: None,
            defaults: JsonMap::new(),
            registry: None,
        }
    }

    /// Untyped composite node
    pub fn dict() -> Self {
        Self::new(NodeKind::Dict)
    }

    /// Class-backed composite node
    pub fn object(class: Class) -> Self {
        Self::new(NodeKind::Object(class))
    }

    /// List node whose elements are all bound with one `item_type` node
    pub fn list(item_type: impl Into<TypeSpec>) -> Self {
        Self::new(NodeKind::List(ListItems::new(item_type.into())))
    }

    /// Datetime node parsing strings with a chrono format (e.g. `%Y-%m-%d`)
    pub fn datetime(format: impl Into<String>) -> Self {
        Self::new(NodeKind::DateTime {
            format: format.into(),
        })
    }

    pub fn email() -> Self {
        Self::new(NodeKind::Email)
    }

    /// Root node of a binder, attached to `registry` from the start
    pub(crate) fn root(registry: NodeRegistry) -> Self {
        let mut node = Self::dict();
        node.registry = Some(registry);
        node
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Finds a declared child by name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Json> {
        self.default.as_ref()
    }

    /// Returns the registry this node resolves child types with
    pub fn registry(&self) -> Option<&NodeRegistry> {
        self.registry.as_ref()
    }

    /// Declares a required child field.
    pub fn add(&mut self, name: &str, node_type: impl Into<TypeSpec>) -> SchemaResult<&mut Node> {
        self.add_with(name, node_type, NodeOptions::default())
    }

    /// Declares a child field with explicit options.
    ///
    /// On a list node the field is declared on the shared item node.
    ///
    /// # Errors
    ///
    /// Fails immediately when the type cannot be resolved, when this node
    /// cannot hold children, or when `name` is already declared here.
    pub fn add_with(
        &mut self,
        name: &str,
        node_type: impl Into<TypeSpec>,
        options: NodeOptions,
    ) -> SchemaResult<&mut Node> {
        if matches!(self.kind, NodeKind::List(_)) {
            return self.list_item_mut()?.add_with(name, node_type, options);
        }

        if !self.kind.is_composite() {
            return Err(SchemaError::NotComposite {
                name: self.name.clone(),
                kind: self.kind.type_name(),
            });
        }

        if self.children.iter().any(|c| c.name == name) {
            return Err(SchemaError::DuplicateField {
                parent: self.name.clone(),
                field: name.to_string(),
            });
        }

        let registry = self
            .registry
            .clone()
            .ok_or_else(|| SchemaError::Detached(self.name.clone()))?;

        let mut node = registry.create(node_type.into())?;
        node.configure(name, options);
        trace!(
            parent = %self.name,
            field = name,
            kind = node.kind.type_name(),
            required = node.required,
            "declared field"
        );

        self.children.push(node);
        let index = self.children.len() - 1;
        Ok(&mut self.children[index])
    }

    /// Sets the raw default used for the optional child `field` when missing.
    pub fn set_default(&mut self, field: impl Into<String>, value: Json) {
        self.defaults.insert(field.into(), value);
    }

    pub(crate) fn merge_defaults(&mut self, defaults: JsonMap<String, Json>) {
        self.defaults.extend(defaults);
    }

    fn list_item_mut(&mut self) -> SchemaResult<&mut Node> {
        match &mut self.kind {
            NodeKind::List(items) => items
                .item_mut()
                .ok_or_else(|| SchemaError::Detached(self.name.clone())),
            kind => Err(SchemaError::NotComposite {
                name: self.name.clone(),
                kind: kind.type_name(),
            }),
        }
    }

    /// Names the node and installs its options once it is attached under a parent.
    fn configure(&mut self, name: &str, options: NodeOptions) {
        self.name = name.to_string();
        self.required = options.required;

        if self.required {
            self.constraints.push(Constraint::required());
        }
        self.constraints.extend(options.constraints);

        if options.default.is_some() {
            self.default = options.default;
        }

        if let NodeKind::List(items) = &mut self.kind {
            if let Some(item) = items.item_mut() {
                item.name = name.to_string();
            }
        }
    }

    /// Binds this node (and everything below it) to `registry`.
    ///
    /// A list node resolves its item type here, exactly once.
    pub(crate) fn attach(&mut self, registry: &NodeRegistry) -> SchemaResult<()> {
        self.registry = Some(registry.clone());

        if let NodeKind::List(items) = &mut self.kind {
            match items.take_pending() {
                Some(item_type) => {
                    let mut item = registry.create(item_type)?;
                    item.name = self.name.clone();
                    items.resolve(item);
                }
                None => {
                    if let Some(item) = items.item_mut() {
                        item.attach(registry)?;
                    }
                }
            }
        }

        for child in &mut self.children {
            child.attach(registry)?;
        }

        Ok(())
    }

    /// Shape-matching descent.
    ///
    /// Composite input under a node with children is rebuilt child by child;
    /// anything else passes through untouched for `get_value` to coerce.
    pub fn walk(&self, value: Value) -> BindResult<Value> {
        match &self.kind {
            NodeKind::List(items) => list::walk(&self.name, items, value),
            // object nodes validate before descending, see `get_value`
            NodeKind::Object(_) => Ok(value),
            _ => match value {
                Value::Map(entries) if self.has_children() => {
                    Ok(Value::Map(self.walk_fields(entries)?))
                }
                other => Ok(other),
            },
        }
    }

    /// Walks and resolves every declared child against `entries`.
    pub(crate) fn walk_fields(&self, mut entries: Fields) -> BindResult<Fields> {
        let mut result = Fields::with_capacity(self.children.len());

        for child in &self.children {
            let raw = match entries.remove(&child.name) {
                Some(value) => value,
                None if child.required => Value::Null,
                None => match self.default_for(child) {
                    Some(default) => Value::from(default.clone()),
                    None => {
                        trace!(field = %child.name, "optional field absent");
                        continue;
                    }
                },
            };

            let value = child.get_value(child.walk(raw)?)?;
            result.insert(child.name.clone(), value);
        }

        Ok(result)
    }

    fn default_for<'a>(&'a self, child: &'a Node) -> Option<&'a Json> {
        self.defaults
            .get(&child.name)
            .or(child.default.as_ref())
    }

    /// Validates then transforms an already-walked value.
    pub fn get_value(&self, value: Value) -> BindResult<Value> {
        if let NodeKind::Object(class) = &self.kind {
            return object::get_value(self, class, value);
        }

        self.check_constraints(&value)?;
        self.transform(value)
    }

    /// Runs constraints in declaration order, stopping at the first failure.
    pub(crate) fn check_constraints(&self, value: &Value) -> BindResult<()> {
        for constraint in &self.constraints {
            constraint.enforce(&self.name, value)?;
        }
        Ok(())
    }

    /// Per-variant coercion. Null is never transformed.
    pub fn transform(&self, value: Value) -> BindResult<Value> {
        if value.is_null() {
            return Ok(value);
        }

        match &self.kind {
            NodeKind::String => Ok(scalar::to_string(value)),
            NodeKind::Integer => scalar::to_integer(&self.name, value),
            NodeKind::Float => scalar::to_float(&self.name, value),
            NodeKind::Boolean => Ok(scalar::to_boolean(value)),
            NodeKind::DateTime { format } => datetime::parse(&self.name, format, value),
            NodeKind::Email => email::normalize(&self.name, value),
            NodeKind::Dict | NodeKind::Object(_) | NodeKind::List(_) => Ok(value),
        }
    }
}
