//! Run-time values checked and projected by the engines.
//!
//! The engines work on the generic `serde_json::Value` form only. Concretely
//! typed inputs (`Vec<u8>`, `HashMap<String, i16>`, user structs) go through
//! [`to_value`] first, so the traversal code never has to care what shape
//! the caller started from.

use serde::Serialize;
pub use serde_json::Value;

/// Error normalizing a typed value
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// Input cannot be represented as a generic value
    #[error("cannot normalize value: {0}")]
    Unrepresentable(#[from] serde_json::Error),
}

/// Normalize any serializable input into the generic value form.
///
/// Integers up to 64 bits and floats become JSON numbers, sequences and
/// fixed arrays become arrays, and string-keyed maps become objects.
///
/// # Errors
///
/// Returns error if the input has a shape JSON cannot hold, such as a map
/// keyed by a structure or a 128-bit integer outside the 64-bit range
pub fn to_value<T: Serialize + ?Sized>(input: &T) -> Result<Value, ValueError> {
    Ok(serde_json::to_value(input)?)
}

/// Name of a value's logical kind, for diagnostics
#[must_use]
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_integer_widths_become_numbers() {
        assert!(to_value(&7u8).unwrap().is_number());
        assert!(to_value(&-7i16).unwrap().is_number());
        assert!(to_value(&u64::MAX).unwrap().is_number());
        assert!(to_value(&1.5f32).unwrap().is_number());
    }

    #[test]
    fn test_wide_integers_beyond_64_bits_rejected() {
        assert!(to_value(&u128::from(u64::MAX)).unwrap().is_number());
        assert!(to_value(&u128::MAX).is_err());
        assert!(to_value(&i128::MIN).is_err());
    }

    #[test]
    fn test_typed_sequences_become_arrays() {
        assert_eq!(to_value(&vec!["a", "b"]).unwrap(), json!(["a", "b"]));
        assert_eq!(to_value(&[1i32, 2, 3]).unwrap(), json!([1, 2, 3]));
        let nested: Vec<Vec<bool>> = vec![vec![true], vec![]];
        assert_eq!(to_value(&nested).unwrap(), json!([[true], []]));
    }

    #[test]
    fn test_typed_maps_become_objects() {
        let mut scores: HashMap<String, i64> = HashMap::new();
        scores.insert("alice".to_string(), 3);
        assert_eq!(to_value(&scores).unwrap(), json!({"alice": 3}));

        let mut tags: BTreeMap<String, Vec<String>> = BTreeMap::new();
        tags.insert("k".to_string(), vec!["v".to_string()]);
        assert_eq!(to_value(&tags).unwrap(), json!({"k": ["v"]}));
    }

    #[test]
    fn test_option_none_is_null() {
        let missing: Option<String> = None;
        assert_eq!(to_value(&missing).unwrap(), Value::Null);
    }

    #[test]
    fn test_struct_keyed_map_is_unrepresentable() {
        let mut bad: BTreeMap<(i32, i32), i32> = BTreeMap::new();
        bad.insert((1, 2), 3);
        assert!(to_value(&bad).is_err());
    }

    #[test]
    fn test_kind_of() {
        assert_eq!(kind_of(&json!(null)), "null");
        assert_eq!(kind_of(&json!(1)), "number");
        assert_eq!(kind_of(&json!({"a": 1})), "object");
        assert_eq!(kind_of(&json!([])), "array");
    }
}
