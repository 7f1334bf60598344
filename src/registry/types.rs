//! Type identifiers accepted by `Node::add`

use crate::node::{Class, Node};

/// Declarative type of a field.
#[derive(Debug, Clone)]
pub enum TypeSpec {
    /// Registered tag such as `"string"` or `"dict"`
    Tag(String),
    /// Class-backed object
    Class(Class),
    /// Pre-built node (lists, datetimes, custom configurations)
    Node(Box<Node>),
}

impl TypeSpec {
    /// Short description for logs
    pub fn describe(&self) -> &str {
        match self {
            TypeSpec::Tag(tag) => tag,
            TypeSpec::Class(class) => class.name(),
            TypeSpec::Node(node) => node.kind().type_name(),
        }
    }
}

impl From<&str> for TypeSpec {
    fn from(tag: &str) -> Self {
        TypeSpec::Tag(tag.to_string())
    }
}

impl From<String> for TypeSpec {
    fn from(tag: String) -> Self {
        TypeSpec::Tag(tag)
    }
}

impl From<Class> for TypeSpec {
    fn from(class: Class) -> Self {
        TypeSpec::Class(class)
    }
}

impl From<Node> for TypeSpec {
    fn from(node: Node) -> Self {
        TypeSpec::Node(Box::new(node))
    }
}
