//! Best-effort projection of run-time values onto schema nodes.
//!
//! Filtering keeps only the structure a schema declares and never fails.
//! Anything that does not conform is dropped instead of being passed on
//! malformed: unknown keys, mismatched elements, nulls inside containers.

use crate::schema::{SchemaKind, SchemaNode};
use crate::value::{to_value, Value};
use serde::Serialize;
use serde_json::Map;
use tracing::debug;

/// Project `value` onto `schema`.
///
/// A missing schema returns the value unchanged and a null value stays null.
/// A value that does not conform at the root projects to null.
#[must_use]
pub fn filter(schema: Option<&SchemaNode>, value: &Value) -> Value {
    match schema {
        Some(schema) => project(schema, value).unwrap_or(Value::Null),
        None => value.clone(),
    }
}

/// Project a concretely typed input onto `schema`.
///
/// The result is always in the generic value form. An input that cannot be
/// normalized projects to null.
#[must_use]
pub fn filter_typed<T: Serialize + ?Sized>(schema: Option<&SchemaNode>, input: &T) -> Value {
    match to_value(input) {
        Ok(value) => filter(schema, &value),
        Err(err) => {
            debug!(%err, "typed input dropped before filtering");
            Value::Null
        }
    }
}

/// `None` means the value does not conform and must be dropped.
fn project(schema: &SchemaNode, value: &Value) -> Option<Value> {
    match (schema.kind, value) {
        (_, Value::Null) => None,
        (SchemaKind::String, Value::String(_))
        | (SchemaKind::Number, Value::Number(_))
        | (SchemaKind::Boolean, Value::Bool(_)) => Some(value.clone()),
        (SchemaKind::Array, Value::Array(elements)) => match schema.items.as_deref() {
            Some(items) => Some(Value::Array(
                elements
                    .iter()
                    .filter_map(|element| project(items, element))
                    .collect(),
            )),
            None => Some(value.clone()),
        },
        (SchemaKind::Object, Value::Object(fields)) => {
            let mut kept = Map::new();
            for (name, child) in &schema.properties {
                if let Some(projected) = fields.get(name).and_then(|field| project(child, field)) {
                    kept.insert(name.clone(), projected);
                }
            }
            Some(Value::Object(kept))
        }
        _ => None,
    }
}
