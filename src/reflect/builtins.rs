//! Member tables for the built-in value kinds.
//!
//! Method names follow the vocabulary paths are usually written in
//! (`toUpperCase()`, `substring({0},{1})`, `get({0})`), so that a path
//! reads the same whether it walks a document or a reflected object.
//! String positions are counted in characters, not bytes.

use std::sync::OnceLock;

use indexmap::IndexMap;

use super::type_info::{ArgsExt, InvokeError, TypeInfo, TypeInfoBuilder};
use super::value::{Kind, TypeRef, Value};

const INT: TypeRef = TypeRef::Primitive(Kind::Int);
const STRING: TypeRef = TypeRef::String;
const OBJECT: TypeRef = TypeRef::Object;

pub fn string_type() -> &'static TypeInfo {
    static INFO: OnceLock<TypeInfo> = OnceLock::new();
    INFO.get_or_init(build_string_type)
}

pub fn list_type() -> &'static TypeInfo {
    static INFO: OnceLock<TypeInfo> = OnceLock::new();
    INFO.get_or_init(build_list_type)
}

/// Arrays have no members; they are reached by index only.
pub fn array_type() -> &'static TypeInfo {
    static INFO: OnceLock<TypeInfo> = OnceLock::new();
    INFO.get_or_init(|| TypeInfoBuilder::with_receiver("Array", any_receiver).build())
}

pub fn map_type() -> &'static TypeInfo {
    static INFO: OnceLock<TypeInfo> = OnceLock::new();
    INFO.get_or_init(build_map_type)
}

pub fn scalar_type(kind: Kind) -> &'static TypeInfo {
    static INFOS: OnceLock<[TypeInfo; 8]> = OnceLock::new();
    &INFOS.get_or_init(|| Kind::ALL.map(build_scalar_type))[kind.ordinal()]
}

fn any_receiver(value: &Value) -> Option<&Value> {
    Some(value)
}

fn string_receiver(value: &Value) -> Option<&str> {
    value.as_str()
}

fn list_receiver(value: &Value) -> Option<&[Value]> {
    match value {
        Value::List(items) => Some(items.as_slice()),
        _ => None,
    }
}

fn map_receiver(value: &Value) -> Option<&IndexMap<String, Value>> {
    value.as_map()
}

fn int_value(n: usize) -> Result<Value, InvokeError> {
    i32::try_from(n)
        .map(Value::Int)
        .map_err(|_| InvokeError::Failed(format!("{} does not fit in an int", n)))
}

fn char_count(s: &str) -> i32 {
    i32::try_from(s.chars().count()).unwrap_or(i32::MAX)
}

/// Characters `[begin, end)` of `s`.
fn char_range(s: &str, begin: i32, end: i32) -> Result<Value, InvokeError> {
    let length = char_count(s);
    if begin < 0 || end < begin || end > length {
        return Err(InvokeError::Failed(format!(
            "begin {}, end {}, length {}",
            begin, end, length
        )));
    }
    let taken: String = s
        .chars()
        .skip(begin as usize)
        .take((end - begin) as usize)
        .collect();
    Ok(Value::String(taken))
}

/// Literal split; trailing empty pieces are dropped unless nothing matched.
fn split_literal(s: &str, separator: &str) -> Vec<Value> {
    let mut pieces: Vec<String> = if s.is_empty() {
        vec![String::new()]
    } else if separator.is_empty() {
        s.chars().map(String::from).collect()
    } else if !s.contains(separator) {
        vec![s.to_string()]
    } else {
        s.split(separator).map(str::to_string).collect()
    };

    if !s.is_empty() {
        while pieces.last().map_or(false, String::is_empty) {
            pieces.pop();
        }
    }

    pieces.into_iter().map(Value::String).collect()
}

fn build_string_type() -> TypeInfo {
    TypeInfoBuilder::with_receiver("String", string_receiver)
        .method("length", &[], |s, _| int_value(s.chars().count()))
        .method("isEmpty", &[], |s, _| Ok(Value::Boolean(s.is_empty())))
        .method("toUpperCase", &[], |s, _| Ok(Value::from(s.to_uppercase())))
        .method("toLowerCase", &[], |s, _| Ok(Value::from(s.to_lowercase())))
        .method("trim", &[], |s, _| Ok(Value::from(s.trim())))
        .method("substring", &[INT], |s, args| {
            char_range(s, args.int_arg(0)?, char_count(s))
        })
        .method("substring", &[INT, INT], |s, args| {
            char_range(s, args.int_arg(0)?, args.int_arg(1)?)
        })
        .method("charAt", &[INT], |s, args| {
            let index = args.int_arg(0)?;
            usize::try_from(index)
                .ok()
                .and_then(|i| s.chars().nth(i))
                .map(Value::Char)
                .ok_or_else(|| {
                    InvokeError::Failed(format!(
                        "index {} out of bounds for length {}",
                        index,
                        char_count(s)
                    ))
                })
        })
        .method("indexOf", &[STRING], |s, args| {
            match s.find(args.str_arg(0)?) {
                Some(byte) => int_value(s[..byte].chars().count()),
                None => Ok(Value::Int(-1)),
            }
        })
        .method("contains", &[STRING], |s, args| {
            Ok(Value::Boolean(s.contains(args.str_arg(0)?)))
        })
        .method("startsWith", &[STRING], |s, args| {
            Ok(Value::Boolean(s.starts_with(args.str_arg(0)?)))
        })
        .method("endsWith", &[STRING], |s, args| {
            Ok(Value::Boolean(s.ends_with(args.str_arg(0)?)))
        })
        .method("concat", &[STRING], |s, args| {
            Ok(Value::String(format!("{}{}", s, args.str_arg(0)?)))
        })
        .method("replace", &[STRING, STRING], |s, args| {
            Ok(Value::String(s.replace(args.str_arg(0)?, args.str_arg(1)?)))
        })
        .method("split", &[STRING], |s, args| {
            Ok(Value::Array(split_literal(s, args.str_arg(0)?)))
        })
        .method("equals", &[OBJECT], |s, args| {
            Ok(Value::Boolean(args.arg(0)?.as_str() == Some(s)))
        })
        .method("toString", &[], |s, _| Ok(Value::from(s)))
        .build()
}

fn build_list_type() -> TypeInfo {
    TypeInfoBuilder::with_receiver("List", list_receiver)
        .method("size", &[], |items, _| int_value(items.len()))
        .method("isEmpty", &[], |items, _| Ok(Value::Boolean(items.is_empty())))
        .method("get", &[INT], |items, args| {
            let index = args.int_arg(0)?;
            usize::try_from(index)
                .ok()
                .and_then(|i| items.get(i))
                .cloned()
                .ok_or_else(|| {
                    InvokeError::Failed(format!(
                        "index {} out of bounds for length {}",
                        index,
                        items.len()
                    ))
                })
        })
        .method("contains", &[OBJECT], |items, args| {
            Ok(Value::Boolean(items.contains(args.arg(0)?)))
        })
        .method("indexOf", &[OBJECT], |items, args| {
            let needle = args.arg(0)?;
            match items.iter().position(|item| item == needle) {
                Some(index) => int_value(index),
                None => Ok(Value::Int(-1)),
            }
        })
        .method("toString", &[], |items, _| {
            Ok(Value::String(Value::List(items.to_vec()).to_string()))
        })
        .build()
}

fn build_map_type() -> TypeInfo {
    TypeInfoBuilder::with_receiver("Map", map_receiver)
        .method("size", &[], |map, _| int_value(map.len()))
        .method("isEmpty", &[], |map, _| Ok(Value::Boolean(map.is_empty())))
        // keys are strings; any other key is simply absent
        .method("get", &[OBJECT], |map, args| {
            Ok(args
                .arg(0)?
                .as_str()
                .and_then(|key| map.get(key))
                .cloned()
                .unwrap_or(Value::Null))
        })
        .method("containsKey", &[OBJECT], |map, args| {
            let found = args.arg(0)?.as_str().map_or(false, |key| map.contains_key(key));
            Ok(Value::Boolean(found))
        })
        .method("keySet", &[], |map, _| {
            Ok(Value::List(map.keys().cloned().map(Value::String).collect()))
        })
        .method("values", &[], |map, _| {
            Ok(Value::List(map.values().cloned().collect()))
        })
        .build()
}

fn truncated(value: &Value) -> Result<i64, InvokeError> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|n| n as i64))
        .ok_or(InvokeError::Receiver { expected: "Number" })
}

fn build_scalar_type(kind: Kind) -> TypeInfo {
    let builder = TypeInfoBuilder::with_receiver(kind.boxed_name(), any_receiver)
        .method("toString", &[], |value, _| Ok(Value::String(value.to_string())))
        .method("equals", &[OBJECT], |value, args| {
            Ok(Value::Boolean(value == args.arg(0)?))
        });

    if kind.is_numeric() {
        return builder
            // narrowing wraps, as a primitive cast does
            .method("intValue", &[], |value, _| {
                truncated(value).map(|n| Value::Int(n as i32))
            })
            .method("longValue", &[], |value, _| truncated(value).map(Value::Long))
            .method("doubleValue", &[], |value, _| {
                value
                    .as_f64()
                    .map(Value::Double)
                    .ok_or(InvokeError::Receiver { expected: "Number" })
            })
            .build();
    }

    let builder = match kind {
        Kind::Boolean => builder.method("booleanValue", &[], |value, _| {
            value
                .as_bool()
                .map(Value::Boolean)
                .ok_or(InvokeError::Receiver { expected: "Boolean" })
        }),
        Kind::Char => builder.method("charValue", &[], |value, _| {
            value
                .as_char()
                .map(Value::Char)
                .ok_or(InvokeError::Receiver {
                    expected: "Character",
                })
        }),
        _ => builder,
    };

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(receiver: &Value, name: &str, args: &[Value]) -> Result<Value, InvokeError> {
        let info = receiver.type_info().unwrap();
        let methods = info.methods(name, args.len());
        assert!(!methods.is_empty(), "no method {}/{}", name, args.len());
        methods[0].invoke(receiver, args)
    }

    #[test]
    fn test_string_case_and_length() {
        let s = Value::from("Hello");
        assert_eq!(call(&s, "toUpperCase", &[]), Ok(Value::from("HELLO")));
        assert_eq!(call(&s, "length", &[]), Ok(Value::Int(5)));
        assert_eq!(call(&Value::from("ünï"), "length", &[]), Ok(Value::Int(3)));
    }

    #[test]
    fn test_substring_overloads() {
        let s = Value::from("hello world");
        assert_eq!(
            call(&s, "substring", &[Value::Int(0), Value::Int(5)]),
            Ok(Value::from("hello"))
        );
        assert_eq!(call(&s, "substring", &[Value::Int(6)]), Ok(Value::from("world")));
        assert!(call(&s, "substring", &[Value::Int(4), Value::Int(2)]).is_err());
        assert!(call(&s, "substring", &[Value::Int(0), Value::Int(99)]).is_err());
        assert!(call(&s, "substring", &[Value::Int(-1)]).is_err());
    }

    #[test]
    fn test_char_at_and_index_of() {
        let s = Value::from("päth");
        assert_eq!(call(&s, "charAt", &[Value::Int(1)]), Ok(Value::Char('ä')));
        assert!(call(&s, "charAt", &[Value::Int(4)]).is_err());
        assert_eq!(call(&s, "indexOf", &[Value::from("th")]), Ok(Value::Int(2)));
        assert_eq!(call(&s, "indexOf", &[Value::from("x")]), Ok(Value::Int(-1)));
    }

    #[test]
    fn test_split_drops_trailing_empties() {
        assert_eq!(
            split_literal("a,b,,", ","),
            vec![Value::from("a"), Value::from("b")]
        );
        assert_eq!(
            split_literal(",a", ","),
            vec![Value::from(""), Value::from("a")]
        );
        assert_eq!(split_literal("abc", ","), vec![Value::from("abc")]);
        assert_eq!(split_literal("", ","), vec![Value::from("")]);
        assert!(split_literal(",", ",").is_empty());
        assert_eq!(split_literal("ab", "").len(), 2);
    }

    #[test]
    fn test_split_returns_array() {
        let s = Value::from("a b");
        assert_eq!(
            call(&s, "split", &[Value::from(" ")]),
            Ok(Value::Array(vec![Value::from("a"), Value::from("b")]))
        );
    }

    #[test]
    fn test_list_methods() {
        let list = Value::List(vec![Value::from("x"), Value::from("y")]);
        assert_eq!(call(&list, "size", &[]), Ok(Value::Int(2)));
        assert_eq!(call(&list, "get", &[Value::Int(1)]), Ok(Value::from("y")));
        assert!(call(&list, "get", &[Value::Int(2)]).is_err());
        assert_eq!(
            call(&list, "contains", &[Value::from("x")]),
            Ok(Value::Boolean(true))
        );
        assert_eq!(call(&list, "indexOf", &[Value::from("z")]), Ok(Value::Int(-1)));
        assert_eq!(call(&list, "toString", &[]), Ok(Value::from("[x, y]")));
    }

    #[test]
    fn test_map_methods() {
        let mut map = IndexMap::new();
        map.insert("name".to_string(), Value::from("Alice"));
        let map = Value::Map(map);
        assert_eq!(call(&map, "get", &[Value::from("name")]), Ok(Value::from("Alice")));
        assert_eq!(call(&map, "get", &[Value::from("nope")]), Ok(Value::Null));
        assert_eq!(call(&map, "get", &[Value::Int(1)]), Ok(Value::Null));
        assert_eq!(
            call(&map, "keySet", &[]),
            Ok(Value::List(vec![Value::from("name")]))
        );
    }

    #[test]
    fn test_scalar_methods() {
        assert_eq!(call(&Value::Double(3.9), "intValue", &[]), Ok(Value::Int(3)));
        assert_eq!(call(&Value::Int(3), "longValue", &[]), Ok(Value::Long(3)));
        assert_eq!(call(&Value::Long(7), "toString", &[]), Ok(Value::from("7")));
        assert_eq!(
            call(&Value::Boolean(true), "booleanValue", &[]),
            Ok(Value::Boolean(true))
        );
        assert!(Value::Boolean(true)
            .type_info()
            .unwrap()
            .methods("intValue", 0)
            .is_empty());
    }

    #[test]
    fn test_array_has_no_members() {
        let array = Value::Array(vec![]);
        let info = array.type_info().unwrap();
        assert_eq!(info.name(), "Array");
        assert!(info.methods("size", 0).is_empty());
    }
}
