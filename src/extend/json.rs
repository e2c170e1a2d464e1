//! `serde_json` interop.
//!
//! JSON documents convert into [`Value`] losslessly. The reverse direction follows
//! `JSON.stringify`: undefined and functions are dropped from objects and become `null` inside
//! arrays, non-finite numbers become `null`, and specific values use their own JSON form.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value as JsonValue};

use crate::extend::engine::{deep_copy, deep_extend};
use crate::extend::error::ExtendResult;
use crate::extend::value::{ArrayValue, ObjectValue, Value};

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(flag) => Value::Bool(flag),
            JsonValue::Number(number) => Value::Number(number.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(text) => Value::String(text),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Object(object_from_map(map)),
        }
    }
}

impl From<&JsonValue> for Value {
    fn from(value: &JsonValue) -> Self {
        Value::from(value.clone())
    }
}

impl Value {
    /// JSON form of this value. Undefined and functions at the top level become `null`.
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn is_safe_integer(number: f64) -> bool {
    number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER
}

fn is_omitted(value: &Value) -> bool {
    matches!(value, Value::Undefined | Value::Function(_))
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Undefined | Value::Null | Value::Function(_) => serializer.serialize_unit(),
            Value::Bool(flag) => serializer.serialize_bool(*flag),
            Value::Number(number) if is_safe_integer(*number) => serializer.serialize_i64(*number as i64),
            Value::Number(number) if number.is_finite() => serializer.serialize_f64(*number),
            Value::Number(_) => serializer.serialize_unit(),
            Value::String(text) => serializer.serialize_str(text),
            Value::Array(array) => array.serialize(serializer),
            Value::Object(object) => object.serialize(serializer),
            Value::Specific(specific) => specific.get().to_json().serialize(serializer),
        }
    }
}

impl Serialize for ArrayValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let items = self.to_vec();
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in &items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl Serialize for ObjectValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries: Vec<_> = self
            .entries()
            .into_iter()
            .filter(|(_, value)| !is_omitted(value))
            .collect();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in &entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Deep-extends JSON documents. Returns `Ok(None)` when `target` is not an object.
///
/// Unlike [`deep_extend`] the target is not mutated; the merged document is returned.
pub fn deep_extend_json(target: &JsonValue, sources: &[JsonValue]) -> ExtendResult<Option<JsonValue>> {
    let mut args = Vec::with_capacity(sources.len() + 1);
    args.push(Value::from(target));
    args.extend(sources.iter().map(Value::from));
    Ok(deep_extend(&args)?.map(|merged| merged.to_json()))
}

pub fn deep_copy_json(value: &JsonValue) -> ExtendResult<JsonValue> {
    Ok(deep_copy(&Value::from(value))?.to_json())
}

/// Object form of a JSON map. Keys keep document order (`serde_json` is built with
/// `preserve_order`).
pub fn object_from_map(map: Map<String, JsonValue>) -> ObjectValue {
    map.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extend::value::FunctionValue;
    use serde_json::json;

    #[test]
    fn deep_extend_json_merges_objects() {
        let target = json!({"a": {"b": 1}, "c": 2});
        let source = json!({"a": {"d": 3}});
        let merged = deep_extend_json(&target, &[source]).unwrap().unwrap();
        assert_eq!(merged, json!({"a": {"b": 1, "d": 3}, "c": 2}));
    }

    #[test]
    fn deep_extend_json_replaces_arrays() {
        let target = json!({"list": [1, 2, 3]});
        let merged = deep_extend_json(&target, &[json!({"list": [4, 5]})]).unwrap().unwrap();
        assert_eq!(merged, json!({"list": [4, 5]}));
    }

    #[test]
    fn deep_extend_json_rejects_array_target() {
        assert_eq!(deep_extend_json(&json!([1]), &[json!({"a": 1})]).unwrap(), None);
    }

    #[test]
    fn deep_copy_json_preserves_nested_objects() {
        let original = json!({"a": {"b": 2}});
        assert_eq!(deep_copy_json(&original).unwrap(), original);
    }

    #[test]
    fn serialization_follows_stringify_rules() {
        let object = ObjectValue::new();
        object.insert("gone", Value::Undefined);
        object.insert("f", FunctionValue::new("f", |_| Value::Null));
        object.insert("nan", f64::NAN);
        object.insert(
            "list",
            Value::array(vec![Value::Undefined, Value::from(1), Value::date_from_millis(0).unwrap()]),
        );
        object.insert("pattern", Value::pattern("a", "g").unwrap());

        assert_eq!(
            Value::from(object).to_json(),
            json!({
                "nan": null,
                "list": [null, 1, "1970-01-01T00:00:00.000Z"],
                "pattern": {}
            })
        );
    }

    #[test]
    fn parsed_objects_keep_document_order() {
        let parsed: JsonValue = serde_json::from_str(r#"{"b": 1, "a": 2}"#).unwrap();
        let value = Value::from(parsed);
        assert_eq!(value.as_object().unwrap().keys(), vec!["b", "a"]);

        let merged = deep_extend(&[Value::object(), value]).unwrap().unwrap();
        assert_eq!(merged.as_object().unwrap().keys(), vec!["b", "a"]);
    }

    #[test]
    fn deep_extend_json_output_keeps_merge_order() {
        let target: JsonValue = serde_json::from_str(r#"{"z": 0}"#).unwrap();
        let source: JsonValue = serde_json::from_str(r#"{"b": 1, "a": 2}"#).unwrap();
        let merged = deep_extend_json(&target, &[source]).unwrap().unwrap();
        assert_eq!(serde_json::to_string(&merged).unwrap(), r#"{"z":0,"b":1,"a":2}"#);
    }

    #[test]
    fn object_from_map_keeps_entries() {
        let map = json!({"x": 1}).as_object().unwrap().clone();
        let object = object_from_map(map);
        assert_eq!(object.get("x"), Some(Value::from(1)));
    }
}
