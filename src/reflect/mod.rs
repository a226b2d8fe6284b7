//! Runtime introspection for the path evaluator.
//!
//! Rust has no runtime reflection, so members are registered up front:
//! each reflected type builds a [`TypeInfo`] once, mapping field names to
//! getters and `(method name, arity)` to overloads with declared parameter
//! types. Built-in values (strings, lists, maps, scalars) come with their
//! own tables.
//!
//! - [`value`] - the dynamically-typed [`Value`] and its type descriptors
//! - [`type_info`] - the [`Reflect`] trait and member tables
//! - [`matcher`] - parameter compatibility for overload selection
//! - [`builtins`] - member tables of the built-in kinds

pub mod builtins;
pub mod matcher;
pub mod type_info;
pub mod value;

pub use matcher::{accepts, signature_accepts};
pub use type_info::{
    ArgsExt, AsAny, FieldHandle, InvokeError, MethodHandle, Reflect, TypeInfo, TypeInfoBuilder,
};
pub use value::{Kind, TypeRef, Value};
