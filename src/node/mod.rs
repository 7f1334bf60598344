//! Node tree subsystem
//!
//! A schema is a tree of nodes. Binding walks raw input in lockstep with the
//! tree, validates each node's constraints, and transforms raw values into
//! typed ones.
//!
//! # Traversal rules
//!
//! - Children are resolved in declaration order
//! - A missing required child is bound as null so its required check fails
//! - A missing optional child is skipped, or bound from its default
//! - Lists bind every element with one shared item node
//! - The first failure aborts the whole traversal
//!
//! The tree is built once and is read-only while binding.

mod datetime;
mod email;
mod errors;
mod kind;
mod list;
mod object;
mod scalar;
mod tree;
mod value;

pub use errors::{
    BindError, BindErrorCode, BindResult, HydrateError, SchemaError, SchemaResult,
};
pub use kind::{Class, ListItems, NodeKind, NodeOptions};
pub use tree::{Node, ROOT_NAME};
pub use value::{Fields, Record, Value};
