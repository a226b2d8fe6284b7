//! Typed extraction of resolved values.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::path::CastError;
use crate::reflect::{AsAny, Reflect, Value};

/// Conversion from a resolved [`Value`] into a concrete Rust type.
///
/// Integral targets accept any integral kind that fits; floating targets
/// accept any numeric kind.
pub trait FromValue: Sized {
    /// Name reported in [`CastError::InvalidCast`].
    const TYPE_NAME: &'static str;

    fn from_value(value: Value) -> Result<Self, CastError>;
}

fn invalid<T: FromValue>(value: &Value) -> CastError {
    CastError::InvalidCast {
        expected: T::TYPE_NAME,
        found: value.type_name(),
    }
}

impl FromValue for Value {
    const TYPE_NAME: &'static str = "Object";

    fn from_value(value: Value) -> Result<Self, CastError> {
        Ok(value)
    }
}

impl FromValue for bool {
    const TYPE_NAME: &'static str = "Boolean";

    fn from_value(value: Value) -> Result<Self, CastError> {
        value.as_bool().ok_or_else(|| invalid::<Self>(&value))
    }
}

impl FromValue for char {
    const TYPE_NAME: &'static str = "Character";

    fn from_value(value: Value) -> Result<Self, CastError> {
        value.as_char().ok_or_else(|| invalid::<Self>(&value))
    }
}

macro_rules! integral_from_value {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FromValue for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_value(value: Value) -> Result<Self, CastError> {
                    value
                        .as_i64()
                        .and_then(|n| <$ty>::try_from(n).ok())
                        .ok_or_else(|| invalid::<Self>(&value))
                }
            }
        )*
    };
}

integral_from_value! {
    i8 => "Byte",
    i16 => "Short",
    i32 => "Integer",
    i64 => "Long",
}

impl FromValue for f64 {
    const TYPE_NAME: &'static str = "Double";

    fn from_value(value: Value) -> Result<Self, CastError> {
        value.as_f64().ok_or_else(|| invalid::<Self>(&value))
    }
}

impl FromValue for f32 {
    const TYPE_NAME: &'static str = "Float";

    fn from_value(value: Value) -> Result<Self, CastError> {
        match value {
            Value::Float(n) => Ok(n),
            // narrowing, as a float cast would
            other => other
                .as_f64()
                .map(|n| n as f32)
                .ok_or_else(|| invalid::<Self>(&other)),
        }
    }
}

impl FromValue for String {
    const TYPE_NAME: &'static str = "String";

    fn from_value(value: Value) -> Result<Self, CastError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(invalid::<Self>(&other)),
        }
    }
}

impl FromValue for Vec<Value> {
    const TYPE_NAME: &'static str = "List";

    fn from_value(value: Value) -> Result<Self, CastError> {
        match value {
            Value::Array(items) | Value::List(items) => Ok(items),
            other => Err(invalid::<Self>(&other)),
        }
    }
}

impl FromValue for IndexMap<String, Value> {
    const TYPE_NAME: &'static str = "Map";

    fn from_value(value: Value) -> Result<Self, CastError> {
        match value {
            Value::Map(entries) => Ok(entries),
            other => Err(invalid::<Self>(&other)),
        }
    }
}

/// Downcasts an `Object` to its concrete type. A mismatch reports the
/// Rust type name of `T` as expected.
impl<T: Reflect> FromValue for Arc<T> {
    const TYPE_NAME: &'static str = "Object";

    fn from_value(value: Value) -> Result<Self, CastError> {
        let found = value.type_name();
        let mismatch = CastError::InvalidCast {
            expected: std::any::type_name::<T>(),
            found,
        };
        match value {
            Value::Object(obj) => AsAny::into_any_arc(obj)
                .downcast::<T>()
                .map_err(|_| mismatch),
            _ => Err(mismatch),
        }
    }
}
