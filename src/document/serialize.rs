//! Serialization of [`Value`] for output.
//!
//! Scalars, sequences and maps serialize as themselves. A reflected
//! object serializes as a map of its registered fields, or as a sequence
//! when it has no fields but can be iterated.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::reflect::{Reflect, Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Byte(n) => serializer.serialize_i8(*n),
            Value::Char(c) => serializer.serialize_char(*c),
            Value::Short(n) => serializer.serialize_i16(*n),
            Value::Int(n) => serializer.serialize_i32(*n),
            Value::Long(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f32(*n),
            Value::Double(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) | Value::List(items) => serializer.collect_seq(items),
            Value::Map(entries) => serializer.collect_map(entries),
            Value::Object(obj) => serialize_object(self, &**obj, serializer),
        }
    }
}

fn serialize_object<S: Serializer>(
    value: &Value,
    obj: &dyn Reflect,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let info = obj.type_info();
    if info.fields().next().is_none() {
        if let Some(items) = obj.iter_values() {
            let mut seq = serializer.serialize_seq(None)?;
            for item in items {
                seq.serialize_element(&item)?;
            }
            return seq.end();
        }
    }

    let mut map = serializer.serialize_map(Some(info.fields().len()))?;
    for field in info.fields() {
        let field_value = field.read(value).unwrap_or(Value::Null);
        map.serialize_entry(field.name(), &field_value)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::TypeInfo;
    use indexmap::IndexMap;
    use std::sync::OnceLock;

    #[derive(Debug)]
    struct User {
        name: String,
        age: i32,
    }

    impl Reflect for User {
        fn type_info(&self) -> &TypeInfo {
            static INFO: OnceLock<TypeInfo> = OnceLock::new();
            INFO.get_or_init(|| {
                TypeInfo::builder::<User>("User")
                    .field("name", |u| Value::from(u.name.as_str()))
                    .field("age", |u| Value::from(u.age))
                    .build()
            })
        }
    }

    #[test]
    fn test_serialize_document_values() {
        let mut entries = IndexMap::new();
        entries.insert("id".to_string(), Value::Int(7));
        entries.insert(
            "tags".to_string(),
            Value::List(vec![Value::from("a"), Value::Null]),
        );
        let json = serde_json::to_string(&Value::Map(entries)).unwrap();
        assert_eq!(json, r#"{"id":7,"tags":["a",null]}"#);
    }

    #[test]
    fn test_serialize_object_as_fields() {
        let user = Value::object(User {
            name: "ada".to_string(),
            age: 36,
        });
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"name":"ada","age":36}"#);
    }
}
