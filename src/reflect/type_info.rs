//! Per-type member tables used in place of runtime reflection.
//!
//! Every type that can sit inside a [`Value::Object`] implements
//! [`Reflect`] and hands out a [`TypeInfo`]: its name, the supertypes it
//! claims, its readable fields, and its invocable methods bucketed by
//! `(name, arity)`. A `TypeInfo` is built once per concrete type, usually
//! inside a `OnceLock` static, and then shared by every lookup.
//!
//! # Example
//!
//! ```
//! use std::sync::OnceLock;
//! use pathquill::reflect::{ArgsExt, Kind, Reflect, TypeInfo, TypeRef, Value};
//!
//! #[derive(Debug)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! impl Reflect for Counter {
//!     fn type_info(&self) -> &TypeInfo {
//!         static INFO: OnceLock<TypeInfo> = OnceLock::new();
//!         INFO.get_or_init(|| {
//!             TypeInfo::builder::<Counter>("Counter")
//!                 .field("count", |c| Value::from(c.count))
//!                 .method("plus", &[TypeRef::Primitive(Kind::Int)], |c, args| {
//!                     Ok(Value::from(c.count + args.int_arg(0)?))
//!                 })
//!                 .build()
//!         })
//!     }
//! }
//!
//! let counter = Value::object(Counter { count: 2 });
//! let info = counter.type_info().unwrap();
//! assert!(info.field("count").is_some());
//! assert_eq!(info.methods("plus", 1).len(), 1);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use super::value::{TypeRef, Value};

/// Upcasts to `Any` so reflected objects can be downcast again.
///
/// Implemented for every eligible type; call it through the trait path
/// (`AsAny::as_any(&*obj)`) so the call dispatches on the trait object.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A type whose members can be reached by path segments.
pub trait Reflect: AsAny + fmt::Debug + Send + Sync + 'static {
    /// The member table for this type.
    fn type_info(&self) -> &TypeInfo;

    /// Ordered iteration, for types that can be indexed with `[n]`.
    fn iter_values(&self) -> Option<Box<dyn Iterator<Item = Value> + '_>> {
        None
    }
}

/// Failure raised by a method body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvokeError {
    #[error("receiver is not a {expected}")]
    Receiver { expected: &'static str },
    #[error("argument {index} is missing")]
    MissingArgument { index: usize },
    #[error("argument {index} is not a {expected}")]
    ArgumentType { index: usize, expected: &'static str },
    #[error("{0}")]
    Failed(String),
}

/// Typed access to method arguments.
pub trait ArgsExt {
    fn arg(&self, index: usize) -> Result<&Value, InvokeError>;
    fn int_arg(&self, index: usize) -> Result<i32, InvokeError>;
    fn long_arg(&self, index: usize) -> Result<i64, InvokeError>;
    fn str_arg(&self, index: usize) -> Result<&str, InvokeError>;
}

impl ArgsExt for [Value] {
    fn arg(&self, index: usize) -> Result<&Value, InvokeError> {
        self.get(index).ok_or(InvokeError::MissingArgument { index })
    }

    fn int_arg(&self, index: usize) -> Result<i32, InvokeError> {
        match self.arg(index)? {
            Value::Int(n) => Ok(*n),
            _ => Err(InvokeError::ArgumentType {
                index,
                expected: "int",
            }),
        }
    }

    fn long_arg(&self, index: usize) -> Result<i64, InvokeError> {
        match self.arg(index)? {
            Value::Long(n) => Ok(*n),
            _ => Err(InvokeError::ArgumentType {
                index,
                expected: "long",
            }),
        }
    }

    fn str_arg(&self, index: usize) -> Result<&str, InvokeError> {
        self.arg(index)?
            .as_str()
            .ok_or(InvokeError::ArgumentType {
                index,
                expected: "String",
            })
    }
}

type Getter = Box<dyn Fn(&Value) -> Option<Value> + Send + Sync>;
type Invoker = Box<dyn Fn(&Value, &[Value]) -> Result<Value, InvokeError> + Send + Sync>;

/// A readable field.
pub struct FieldHandle {
    name: &'static str,
    getter: Getter,
}

impl FieldHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the field off `receiver`; `None` if the receiver is not of
    /// the type this handle was registered for.
    pub fn read(&self, receiver: &Value) -> Option<Value> {
        (self.getter)(receiver)
    }
}

/// An invocable method with its declared parameter types.
pub struct MethodHandle {
    name: &'static str,
    params: Vec<TypeRef>,
    invoker: Invoker,
}

impl MethodHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &[TypeRef] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn invoke(&self, receiver: &Value, args: &[Value]) -> Result<Value, InvokeError> {
        (self.invoker)(receiver, args)
    }
}

/// Member table of one concrete type.
pub struct TypeInfo {
    name: &'static str,
    supertypes: Vec<&'static str>,
    fields: IndexMap<&'static str, FieldHandle>,
    methods: IndexMap<&'static str, IndexMap<usize, Vec<MethodHandle>>>,
}

impl TypeInfo {
    /// Starts a table for a reflected user type.
    pub fn builder<T: Reflect>(name: &'static str) -> TypeInfoBuilder<T> {
        TypeInfoBuilder::with_receiver(name, downcast_receiver::<T>)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn supertypes(&self) -> &[&'static str] {
        &self.supertypes
    }

    /// True if this type is `name` or declares it as a supertype.
    pub fn is_a(&self, name: &str) -> bool {
        self.name == name || self.supertypes.iter().any(|s| *s == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldHandle> {
        self.fields.get(name)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &FieldHandle> {
        self.fields.values()
    }

    /// Overloads of `name` taking exactly `arity` arguments, in
    /// declaration order.
    pub fn methods(&self, name: &str, arity: usize) -> &[MethodHandle] {
        self.methods
            .get(name)
            .and_then(|by_arity| by_arity.get(&arity))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("supertypes", &self.supertypes)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn downcast_receiver<T: Reflect>(value: &Value) -> Option<&T> {
    value.downcast_ref::<T>()
}

/// Registers the members of one type, in declaration order.
pub struct TypeInfoBuilder<T: ?Sized + 'static> {
    info: TypeInfo,
    receiver: fn(&Value) -> Option<&T>,
}

impl<T: ?Sized + 'static> TypeInfoBuilder<T> {
    /// Starts a table whose handles reach their receiver through
    /// `receiver`. Used for the built-in value kinds.
    pub fn with_receiver(name: &'static str, receiver: fn(&Value) -> Option<&T>) -> Self {
        Self {
            info: TypeInfo {
                name,
                supertypes: Vec::new(),
                fields: IndexMap::new(),
                methods: IndexMap::new(),
            },
            receiver,
        }
    }

    pub fn extends(mut self, supertype: &'static str) -> Self {
        self.info.supertypes.push(supertype);
        self
    }

    pub fn field<F>(mut self, name: &'static str, read: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let receiver = self.receiver;
        let getter: Getter = Box::new(move |value: &Value| receiver(value).map(|this| read(this)));
        self.info.fields.insert(name, FieldHandle { name, getter });
        self
    }

    pub fn method<F>(mut self, name: &'static str, params: &[TypeRef], body: F) -> Self
    where
        F: Fn(&T, &[Value]) -> Result<Value, InvokeError> + Send + Sync + 'static,
    {
        let receiver = self.receiver;
        let expected = self.info.name;
        let invoker: Invoker = Box::new(move |value: &Value, args: &[Value]| {
            let this = receiver(value).ok_or(InvokeError::Receiver { expected })?;
            body(this, args)
        });
        self.info
            .methods
            .entry(name)
            .or_default()
            .entry(params.len())
            .or_default()
            .push(MethodHandle {
                name,
                params: params.to_vec(),
                invoker,
            });
        self
    }

    pub fn build(self) -> TypeInfo {
        self.info
    }
}
