//! # Published task results.
//!
//! A decorated task always publishes its whole return value under
//! [`RETURN_VALUE_KEY`]. With split results enabled it also publishes one entry per
//! part of the value:
//!
//! ```text
//! {"a": 1, "b": 2}  ──► return_value, a, b
//! [10, 20]          ──► return_value, 0, 1
//! 42                ──► TaskError::UnsplittableOutput
//! {"return_value": 1} ──► TaskError::ReservedOutputKey
//! ```
//!
//! Every published key is unique, so writing [`TaskOutput::entries`] into a
//! key/value store in order yields the same view as [`TaskOutput::get`].

use serde_json::{Map, Value};

use crate::error::TaskError;

/// Key under which the whole return value is published.
pub const RETURN_VALUE_KEY: &str = "return_value";

/// Named results produced by one execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutput {
    value: Value,
    parts: Option<Map<String, Value>>,
}

impl TaskOutput {
    /// Wraps a return value without splitting it.
    pub fn single(value: Value) -> Self {
        Self { value, parts: None }
    }

    /// Splits `value` into named parts.
    ///
    /// Objects split by key, arrays by index. Anything else is rejected, and so is
    /// an object that uses [`RETURN_VALUE_KEY`] as one of its keys.
    pub fn split(value: Value) -> Result<Self, TaskError> {
        let parts = match &value {
            Value::Object(map) if map.contains_key(RETURN_VALUE_KEY) => {
                return Err(TaskError::ReservedOutputKey {
                    key: RETURN_VALUE_KEY,
                });
            }
            Value::Object(map) => map.clone(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v.clone()))
                .collect(),
            other => {
                return Err(TaskError::UnsplittableOutput {
                    kind: json_kind(other),
                });
            }
        };
        Ok(Self {
            value,
            parts: Some(parts),
        })
    }

    /// Builds the output for a callable return value, honoring the split flag.
    pub fn from_return(value: Value, multiple_outputs: bool) -> Result<Self, TaskError> {
        if multiple_outputs {
            Self::split(value)
        } else {
            Ok(Self::single(value))
        }
    }

    /// The whole return value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether the value was split.
    pub fn is_split(&self) -> bool {
        self.parts.is_some()
    }

    /// Looks up a published entry by key (including [`RETURN_VALUE_KEY`]).
    pub fn get(&self, key: &str) -> Option<&Value> {
        if key == RETURN_VALUE_KEY {
            return Some(&self.value);
        }
        self.parts.as_ref().and_then(|p| p.get(key))
    }

    /// Iterates over every published `(key, value)` pair, `return_value` first.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        std::iter::once((RETURN_VALUE_KEY, &self.value)).chain(
            self.parts
                .iter()
                .flat_map(|p| p.iter().map(|(k, v)| (k.as_str(), v))),
        )
    }

    /// Consumes the output and returns the whole value.
    pub fn into_value(self) -> Value {
        self.value
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
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

    #[test]
    fn test_single_publishes_only_return_value() {
        let out = TaskOutput::from_return(json!({"a": 1}), false).unwrap();
        assert!(!out.is_split());
        let keys: Vec<_> = out.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![RETURN_VALUE_KEY]);
        assert_eq!(out.get("a"), None);
    }

    #[test]
    fn test_split_object_by_key() {
        let out = TaskOutput::from_return(json!({"a": 1, "b": "x"}), true).unwrap();
        assert_eq!(out.get("a"), Some(&json!(1)));
        assert_eq!(out.get("b"), Some(&json!("x")));
        assert_eq!(out.get(RETURN_VALUE_KEY), Some(&json!({"a": 1, "b": "x"})));
        assert_eq!(out.entries().count(), 3);
    }

    #[test]
    fn test_split_array_by_index() {
        let out = TaskOutput::split(json!([10, 20])).unwrap();
        assert_eq!(out.get("0"), Some(&json!(10)));
        assert_eq!(out.get("1"), Some(&json!(20)));
    }

    #[test]
    fn test_split_scalar_is_rejected() {
        let err = TaskOutput::split(json!(42)).unwrap_err();
        assert!(matches!(err, TaskError::UnsplittableOutput { kind: "number" }));
    }

    #[test]
    fn test_split_rejects_reserved_key() {
        let err = TaskOutput::split(json!({"return_value": 1, "b": 2})).unwrap_err();
        assert!(matches!(
            err,
            TaskError::ReservedOutputKey {
                key: RETURN_VALUE_KEY
            }
        ));

        // Unsplit results may contain the key freely.
        let out = TaskOutput::from_return(json!({"return_value": 1}), false).unwrap();
        assert_eq!(out.get(RETURN_VALUE_KEY), Some(&json!({"return_value": 1})));
    }

    #[test]
    fn test_entries_agree_with_get() {
        let out = TaskOutput::split(json!({"a": 1, "b": [2, 3]})).unwrap();
        let mut store = Map::new();
        for (k, v) in out.entries() {
            assert!(store.insert(k.to_string(), v.clone()).is_none(), "duplicate key {k}");
        }
        for (k, v) in &store {
            assert_eq!(out.get(k), Some(v));
        }
        assert_eq!(store.len(), 3);
    }
}
