//! Constraints attached to schema nodes
//!
//! A constraint is a pure predicate over a value plus a message template.
//! The template's `{field}` placeholder is replaced with the owning node's
//! name when the constraint fails.
//!
//! Nodes run their constraints in declaration order and stop at the first
//! failure; the implicit `Required` constraint of required fields always
//! comes first.

mod rules;

pub use rules::{Constraint, Predicate, Rule};
