//! fractal-input - schema-driven binding of untrusted input
//!
//! A schema is a tree of typed nodes. Binding walks a raw document in
//! lockstep with that tree, checks constraints, coerces scalars, and builds
//! typed records for class-backed objects.

pub mod binder;
pub mod cli;
pub mod constraint;
pub mod node;
pub mod registry;

pub use binder::{
    Binder, ConstraintDefinition, FieldDefinition, FieldType, RuleName, SchemaDefinition,
};
pub use constraint::{Constraint, Predicate, Rule};
pub use node::{
    BindError, BindErrorCode, BindResult, Class, Fields, HydrateError, Node, NodeKind,
    NodeOptions, Record, SchemaError, SchemaResult, Value,
};
pub use registry::{NodeFactory, NodeRegistry, TypeSpec};
