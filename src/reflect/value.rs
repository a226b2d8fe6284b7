//! Dynamically-typed values walked by the path evaluator.
//!
//! A `Value` is either a scalar, a string, one of the three built-in
//! containers, or an `Object` wrapping any type that implements
//! [`Reflect`]. Scalars carry their primitive kind so that overload
//! resolution can tell an `Int` apart from a `Long`.
//!
//! # Example
//!
//! ```
//! use pathquill::reflect::{Kind, TypeRef, Value};
//!
//! let value = Value::from(42);
//! assert_eq!(value.kind(), Some(Kind::Int));
//! assert_eq!(value.runtime_type(), Some(TypeRef::Boxed(Kind::Int)));
//! assert!(Value::Null.runtime_type().is_none());
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::builtins;
use super::type_info::{AsAny, Reflect, TypeInfo};

/// The eight primitive-like scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Kind; 8] = [
        Kind::Boolean,
        Kind::Byte,
        Kind::Char,
        Kind::Short,
        Kind::Int,
        Kind::Long,
        Kind::Float,
        Kind::Double,
    ];

    /// Position of this kind inside [`Kind::ALL`].
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Name of the unboxed form (`int`, `char`, ...).
    pub fn primitive_name(self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Byte => "byte",
            Kind::Char => "char",
            Kind::Short => "short",
            Kind::Int => "int",
            Kind::Long => "long",
            Kind::Float => "float",
            Kind::Double => "double",
        }
    }

    /// Name of the boxed form (`Integer`, `Character`, ...).
    pub fn boxed_name(self) -> &'static str {
        match self {
            Kind::Boolean => "Boolean",
            Kind::Byte => "Byte",
            Kind::Char => "Character",
            Kind::Short => "Short",
            Kind::Int => "Integer",
            Kind::Long => "Long",
            Kind::Float => "Float",
            Kind::Double => "Double",
        }
    }

    /// Returns true for the six numeric kinds.
    pub fn is_numeric(self) -> bool {
        !matches!(self, Kind::Boolean | Kind::Char)
    }
}

/// A declared parameter type, or the runtime type of a non-null value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// The universal base type; every non-null value is an instance.
    Object,
    /// An unboxed scalar. Cannot hold null.
    Primitive(Kind),
    /// A boxed scalar.
    Boxed(Kind),
    String,
    Array,
    List,
    Map,
    /// A reflected user type, by its registered name.
    Class(&'static str),
}

impl TypeRef {
    /// Returns true for unboxed scalar types.
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    /// Scalar kind of a primitive or boxed type.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            TypeRef::Primitive(kind) | TypeRef::Boxed(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TypeRef::Object => "Object",
            TypeRef::Primitive(kind) => kind.primitive_name(),
            TypeRef::Boxed(kind) => kind.boxed_name(),
            TypeRef::String => "String",
            TypeRef::Array => "Array",
            TypeRef::List => "List",
            TypeRef::Map => "Map",
            TypeRef::Class(name) => *name,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically-typed value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// Fixed-size sequence with random access.
    Array(Vec<Value>),
    /// Ordered iterable; indexing walks forward.
    List(Vec<Value>),
    /// Insertion-ordered string-keyed map. Not indexable.
    Map(IndexMap<String, Value>),
    Object(Arc<dyn Reflect>),
}

impl Value {
    /// Wraps a reflected user type.
    pub fn object<T: Reflect>(value: T) -> Self {
        Value::Object(Arc::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Scalar kind, if this is a scalar.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Value::Boolean(_) => Some(Kind::Boolean),
            Value::Byte(_) => Some(Kind::Byte),
            Value::Char(_) => Some(Kind::Char),
            Value::Short(_) => Some(Kind::Short),
            Value::Int(_) => Some(Kind::Int),
            Value::Long(_) => Some(Kind::Long),
            Value::Float(_) => Some(Kind::Float),
            Value::Double(_) => Some(Kind::Double),
            _ => None,
        }
    }

    /// The runtime type of this value; `None` for `Null`.
    ///
    /// Scalars report their boxed type, since a value that exists at
    /// runtime is always boxed.
    pub fn runtime_type(&self) -> Option<TypeRef> {
        match self {
            Value::Null => None,
            Value::String(_) => Some(TypeRef::String),
            Value::Array(_) => Some(TypeRef::Array),
            Value::List(_) => Some(TypeRef::List),
            Value::Map(_) => Some(TypeRef::Map),
            Value::Object(obj) => Some(TypeRef::Class(obj.type_info().name())),
            scalar => scalar.kind().map(TypeRef::Boxed),
        }
    }

    /// Name of the runtime type, `"null"` for `Null`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Object(obj) => obj.type_info().name(),
            other => other.runtime_type().map_or("null", |ty| ty.name()),
        }
    }

    /// Instance test: is this value a `ty`, counting declared supertypes?
    pub fn is_instance_of(&self, ty: &TypeRef) -> bool {
        match (ty, self) {
            (_, Value::Null) => false,
            (TypeRef::Object, _) => true,
            (TypeRef::Primitive(_), _) => false,
            (TypeRef::Boxed(kind), value) => value.kind() == Some(*kind),
            (TypeRef::String, Value::String(_)) => true,
            (TypeRef::Array, Value::Array(_)) => true,
            (TypeRef::List, Value::List(_)) => true,
            (TypeRef::Map, Value::Map(_)) => true,
            (TypeRef::Class(name), Value::Object(obj)) => obj.type_info().is_a(name),
            _ => false,
        }
    }

    /// Member table for this value's runtime type.
    pub fn type_info(&self) -> Option<&TypeInfo> {
        match self {
            Value::Null => None,
            Value::String(_) => Some(builtins::string_type()),
            Value::Array(_) => Some(builtins::array_type()),
            Value::List(_) => Some(builtins::list_type()),
            Value::Map(_) => Some(builtins::map_type()),
            Value::Object(obj) => Some(obj.type_info()),
            scalar => scalar.kind().map(builtins::scalar_type),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Widens any integral scalar to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(n) => Some(i64::from(*n)),
            Value::Short(n) => Some(i64::from(*n)),
            Value::Int(n) => Some(i64::from(*n)),
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Widens any numeric scalar to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(f64::from(*n)),
            Value::Double(n) => Some(*n),
            // i64 -> f64 may round, like a widening conversion on long
            other => other.as_i64().map(|n| n as f64),
        }
    }

    /// Items of an `Array` or a `List`.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Arc<dyn Reflect>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Borrows the concrete user type behind an `Object`.
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        match self {
            Value::Object(obj) => AsAny::as_any(&**obj).downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // identity, not structure
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Byte(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "{}", c),
            Value::Short(n) => write!(f, "{}", n),
            Value::Int(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{:?}", n),
            Value::Double(n) => write!(f, "{:?}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) | Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Object(obj) => write!(f, "{:?}", obj),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i8> for Value {
    fn from(n: i8) -> Self {
        Value::Byte(n)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Short(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Long(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_report_boxed_runtime_type() {
        assert_eq!(Value::from(1i64).runtime_type(), Some(TypeRef::Boxed(Kind::Long)));
        assert_eq!(Value::from('x').runtime_type(), Some(TypeRef::Boxed(Kind::Char)));
        assert_eq!(Value::from(true).type_name(), "Boolean");
        assert_eq!(Value::Null.type_name(), "null");
    }

    #[test]
    fn test_instance_of() {
        let value = Value::from(7);
        assert!(value.is_instance_of(&TypeRef::Object));
        assert!(value.is_instance_of(&TypeRef::Boxed(Kind::Int)));
        assert!(!value.is_instance_of(&TypeRef::Primitive(Kind::Int)));
        assert!(!value.is_instance_of(&TypeRef::Boxed(Kind::Long)));
        assert!(!Value::Null.is_instance_of(&TypeRef::Object));
        assert!(Value::from("s").is_instance_of(&TypeRef::String));
        assert!(!Value::List(vec![]).is_instance_of(&TypeRef::Array));
    }

    #[test]
    fn test_numeric_widening() {
        assert_eq!(Value::Short(3).as_i64(), Some(3));
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Double(2.5).as_i64(), None);
        assert_eq!(Value::from("3").as_i64(), None);
    }

    #[test]
    fn test_display() {
        let list = Value::List(vec![Value::from(1), Value::from("a")]);
        assert_eq!(list.to_string(), "[1, a]");
        assert_eq!(Value::Double(1.0).to_string(), "1.0");

        let mut map = IndexMap::new();
        map.insert("k".to_string(), Value::from(true));
        assert_eq!(Value::Map(map).to_string(), "{k=true}");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn test_numeric_kinds() {
        let numeric: Vec<Kind> = Kind::ALL.into_iter().filter(|k| k.is_numeric()).collect();
        assert_eq!(numeric.len(), 6);
        assert!(!Kind::Boolean.is_numeric());
        assert!(!Kind::Char.is_numeric());
    }

    #[test]
    fn test_container_accessors() {
        let items = vec![Value::from(1), Value::from(2)];
        assert_eq!(Value::Array(items.clone()).as_slice(), Some(items.as_slice()));
        assert_eq!(Value::List(items.clone()).as_slice(), Some(items.as_slice()));
        assert_eq!(Value::from("ab").as_slice(), None);
        assert!(Value::from(1).as_object().is_none());
    }
}

