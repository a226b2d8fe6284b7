//! Conversion of parsed YAML and JSON documents into [`Value`].

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::reflect::Value;

/// Converts a YAML document.
///
/// Integers become `Int` when they fit in 32 bits and `Long` otherwise;
/// floats become `Double`; sequences become `List` and mappings `Map`.
/// Tags are dropped in favour of the tagged value.
pub fn from_yaml(value: YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Boolean(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                integer(i)
            } else {
                // u64 beyond i64, or a float
                Value::Double(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::List(items.into_iter().map(from_yaml).collect()),
        YamlValue::Mapping(mapping) => {
            let entries: IndexMap<String, Value> = mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), from_yaml(value)))
                .collect();
            Value::Map(entries)
        }
        YamlValue::Tagged(tagged) => from_yaml(tagged.value),
    }
}

/// Converts a JSON document, with the same numeric rules as [`from_yaml`].
pub fn from_json(value: JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Boolean(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => integer(i),
            None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        JsonValue::String(s) => Value::String(s),
        JsonValue::Array(items) => Value::List(items.into_iter().map(from_json).collect()),
        JsonValue::Object(map) => Value::Map(
            map.into_iter()
                .map(|(key, value)| (key, from_json(value)))
                .collect(),
        ),
    }
}

fn integer(i: i64) -> Value {
    match i32::try_from(i) {
        Ok(small) => Value::Int(small),
        Err(_) => Value::Long(i),
    }
}

/// Map keys are strings; other scalar keys are rendered as YAML text.
fn yaml_key(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Tagged(tagged) => yaml_key(tagged.value),
        complex => serde_yaml::to_string(&complex)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}
