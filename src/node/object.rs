//! Class-backed object nodes
//!
//! Unlike plain composites, an object node checks its own constraints on the
//! raw value before descending, so a missing required object fails before
//! any of its children are looked at.

use super::errors::{BindError, BindResult};
use super::kind::Class;
use super::tree::Node;
use super::value::{Fields, Record, Value};

pub(super) fn get_value(node: &Node, class: &Class, value: Value) -> BindResult<Value> {
    node.check_constraints(&value)?;

    let entries = match value {
        Value::Null => return Ok(Value::Null),
        Value::Map(entries) => entries,
        Value::Object(record) => record.into_fields(),
        other => return Err(BindError::invalid_field(node.name(), &other)),
    };

    let fields = if node.has_children() {
        node.walk_fields(entries)?
    } else {
        entries
    };

    Ok(Value::Object(hydrate(class, fields)))
}

fn hydrate(class: &Class, fields: Fields) -> Record {
    let mut record = class.instantiate();
    for (key, value) in fields {
        record.set(key, value);
    }
    record
}
