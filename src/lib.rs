//! Fail-soft path lookups over dynamic values.
//!
//! A path is a chain of field reads, method calls and index accesses,
//! written like `users[0].getName().substring({0},{1})`. Evaluating it
//! either yields a value or, if any step cannot be applied, nothing at
//! all. Member access goes through a registry: user types implement
//! [`Reflect`] to expose fields and methods, and strings, lists, maps and
//! scalars come with built-in member tables.
//!
//! ```
//! use pathquill::{get, Value};
//!
//! let doc = pathquill::file::parse_document("user:\n  name: hello world\n").unwrap();
//! let args = [Value::from(0), Value::from(5)];
//!
//! assert_eq!(
//!     get(&doc, "user.name.toUpperCase().substring({0},{1})", &args),
//!     Some(Value::from("HELLO"))
//! );
//! assert_eq!(get(&doc, "user.email.length()", &args), None);
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod lookup;
pub mod path;
pub mod reflect;

pub use lookup::{get, get_as, get_or, FromValue, IntoPath};
pub use path::{CastError, EvalError, Evaluator, Parser, PathSegment, PathSpec};
pub use reflect::{Kind, Reflect, TypeInfo, TypeRef, Value};
