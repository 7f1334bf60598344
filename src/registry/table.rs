//! Tag table and node construction

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::node::{Node, NodeKind, SchemaError, SchemaResult};

use super::types::TypeSpec;

/// Builds the variant for a registered tag
pub type NodeFactory = fn() -> NodeKind;

/// Registry handle.
///
/// Cloning is cheap; clones share one table. Registration after nodes have
/// been created copies the table, so existing schemas are never affected.
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    factories: Arc<HashMap<String, NodeFactory>>,
}

impl Default for NodeRegistry {
    /// Registry with the built-in tags:
    /// `string`, `integer`, `float`, `boolean`, `dict`, `email`
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("string", || NodeKind::String);
        registry.register("integer", || NodeKind::Integer);
        registry.register("float", || NodeKind::Float);
        registry.register("boolean", || NodeKind::Boolean);
        registry.register("dict", || NodeKind::Dict);
        registry.register("email", || NodeKind::Email);
        registry
    }
}

impl NodeRegistry {
    /// Registry with no tags at all
    pub fn empty() -> Self {
        Self {
            factories: Arc::new(HashMap::new()),
        }
    }

    /// Registers (or replaces) a tag, returning the previous factory.
    pub fn register(&mut self, tag: impl Into<String>, factory: NodeFactory) -> Option<NodeFactory> {
        Arc::make_mut(&mut self.factories).insert(tag.into(), factory)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Returns registered tags, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Creates a node attached to this registry.
    ///
    /// - a pre-built node is adopted as-is
    /// - a class becomes an object node
    /// - a tag is looked up in the table
    ///
    /// # Errors
    ///
    /// `SchemaError::InvalidType` for an unknown tag, including tags nested in
    /// list item types.
    pub fn create(&self, spec: TypeSpec) -> SchemaResult<Node> {
        trace!(spec = spec.describe(), "creating node");

        let mut node = match spec {
            TypeSpec::Node(node) => *node,
            TypeSpec::Class(class) => Node::object(class),
            TypeSpec::Tag(tag) => {
                let factory = self
                    .factories
                    .get(&tag)
                    .ok_or_else(|| SchemaError::InvalidType(tag.clone()))?;
                Node::new(factory())
            }
        };

        node.attach(self)?;
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Class;

    #[test]
    fn test_builtin_tags() {
        let registry = NodeRegistry::default();
        assert_eq!(
            registry.tags(),
            vec!["boolean", "dict", "email", "float", "integer", "string"]
        );

        let node = registry.create("integer".into()).unwrap();
        assert!(matches!(node.kind(), NodeKind::Integer));
        assert!(node.registry().is_some());
    }

    #[test]
    fn test_unknown_tag_fails() {
        let err = NodeRegistry::default().create("lala".into()).unwrap_err();
        assert_eq!(err, SchemaError::InvalidType("lala".into()));
    }

    #[test]
    fn test_class_becomes_object_node() {
        struct Address;

        let node = NodeRegistry::default()
            .create(Class::of::<Address>().into())
            .unwrap();
        match node.kind() {
            NodeKind::Object(class) => assert_eq!(class.name(), "Address"),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_prebuilt_node_is_adopted_and_resolved() {
        let node = NodeRegistry::default()
            .create(Node::list("float").into())
            .unwrap();
        let NodeKind::List(items) = node.kind() else {
            panic!("expected a list");
        };
        assert!(matches!(items.item().map(Node::kind), Some(NodeKind::Float)));
    }

    #[test]
    fn test_unknown_list_item_tag_fails_at_creation() {
        let err = NodeRegistry::default()
            .create(Node::list("lala").into())
            .unwrap_err();
        assert_eq!(err, SchemaError::InvalidType("lala".into()));
    }

    #[test]
    fn test_custom_tag_does_not_leak_into_clones_made_earlier() {
        let base = NodeRegistry::default();
        let mut extended = base.clone();
        extended.register("text", || NodeKind::String);

        assert!(extended.create("text".into()).is_ok());
        assert!(base.create("text".into()).is_err());
    }
}
