//! Node registry
//!
//! Maps declarative type identifiers to node instances:
//! - string tags (`"string"`, `"integer"`, ...) via a factory table
//! - classes, which become object nodes
//! - pre-built nodes, which are adopted as-is
//!
//! Every created node holds a handle to the registry that created it, so
//! nested declarations resolve tags against the same table. Independent
//! schemas can use independent registries.

mod table;
mod types;

pub use table::{NodeFactory, NodeRegistry};
pub use types::TypeSpec;
