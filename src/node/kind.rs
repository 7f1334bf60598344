//! Node variants and per-field options

use serde_json::Value as Json;

use crate::constraint::Constraint;
use crate::registry::TypeSpec;

use super::tree::Node;
use super::value::Record;

/// The closed set of node variants.
///
/// The variant decides how a node walks its input and how it transforms the
/// walked value; everything else (constraints, defaults, children) is shared.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Untyped composite; produces `Value::Map`
    Dict,
    String,
    Integer,
    Float,
    Boolean,
    /// Datetime parsed with a chrono format string
    DateTime { format: String },
    /// Normalized, validated email address
    Email,
    /// Class-backed composite; produces `Value::Object`
    Object(Class),
    /// Homogeneous sequence sharing one item node
    List(ListItems),
}

impl NodeKind {
    /// Returns the type name for messages
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Dict => "dict",
            NodeKind::String => "string",
            NodeKind::Integer => "integer",
            NodeKind::Float => "float",
            NodeKind::Boolean => "boolean",
            NodeKind::DateTime { .. } => "datetime",
            NodeKind::Email => "email",
            NodeKind::Object(_) => "object",
            NodeKind::List(_) => "list",
        }
    }

    /// Whether children may be declared on this kind
    pub fn is_composite(&self) -> bool {
        matches!(self, NodeKind::Dict | NodeKind::Object(_) | NodeKind::List(_))
    }
}

/// Target of a class-backed node.
///
/// Carries the class name stamped on produced records and, optionally, a
/// preset instance that produced fields are assigned onto.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    name: String,
    instance: Option<Record>,
}

impl Class {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instance: None,
        }
    }

    /// Class named after a Rust type (last path segment of its type name)
    pub fn of<T: ?Sized>() -> Self {
        let full = std::any::type_name::<T>();
        let short = full.rsplit("::").next().unwrap_or(full);
        Self::named(short)
    }

    /// Hydrate onto an existing record instead of a fresh one.
    ///
    /// Fields present in the input replace the record's; the rest are kept.
    pub fn onto(record: Record) -> Self {
        Self {
            name: record.class().to_string(),
            instance: Some(record),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instance(&self) -> Option<&Record> {
        self.instance.as_ref()
    }

    /// Starts a record for one hydration
    pub(crate) fn instantiate(&self) -> Record {
        match &self.instance {
            Some(record) => record.clone(),
            None => Record::new(self.name.clone()),
        }
    }
}

/// Item schema of a list node.
///
/// The item type is kept as a descriptor until the list is attached to a
/// registry, at which point it is resolved once into the shared item node.
#[derive(Debug, Clone)]
pub struct ListItems {
    pending: Option<Box<TypeSpec>>,
    item: Option<Box<Node>>,
}

impl ListItems {
    pub(crate) fn new(item_type: TypeSpec) -> Self {
        Self {
            pending: Some(Box::new(item_type)),
            item: None,
        }
    }

    /// Returns the resolved item node
    pub fn item(&self) -> Option<&Node> {
        self.item.as_deref()
    }

    pub(crate) fn item_mut(&mut self) -> Option<&mut Node> {
        self.item.as_deref_mut()
    }

    pub(crate) fn take_pending(&mut self) -> Option<TypeSpec> {
        self.pending.take().map(|spec| *spec)
    }

    pub(crate) fn resolve(&mut self, item: Node) {
        self.item = Some(Box::new(item));
    }
}

/// Options accepted by `Node::add_with`.
#[derive(Debug, Clone)]
pub struct NodeOptions {
    /// Whether the field must be present and non-null (default: true)
    pub required: bool,
    /// Constraints appended after the implicit required constraint
    pub constraints: Vec<Constraint>,
    /// Raw value substituted when an optional field is missing
    pub default: Option<Json>,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            required: true,
            constraints: Vec::new(),
            default: None,
        }
    }
}

impl NodeOptions {
    pub fn required() -> Self {
        Self::default()
    }

    pub fn optional() -> Self {
        Self {
            required: false,
            ..Self::default()
        }
    }

    /// Appends a constraint
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_default(mut self, value: Json) -> Self {
        self.default = Some(value);
        self
    }
}
