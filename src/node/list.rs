//! List nodes
//!
//! Every element is walked and resolved independently by the single shared
//! item node, in input order. Only arrays are iterable; any other input walks
//! to null and is left to the list's own constraints.

use super::errors::{BindError, BindResult};
use super::kind::ListItems;
use super::value::Value;

pub(super) fn walk(field: &str, items: &ListItems, value: Value) -> BindResult<Value> {
    let Value::List(elements) = value else {
        return Ok(Value::Null);
    };

    let item = items
        .item()
        .ok_or_else(|| BindError::unresolved_items(field))?;

    elements
        .into_iter()
        .map(|element| item.get_value(item.walk(element)?))
        .collect::<BindResult<Vec<_>>>()
        .map(Value::List)
}
