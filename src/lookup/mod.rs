//! The `get` family: fail-soft lookups by path.
//!
//! A path may be given as a dotted string, as pre-split tokens, or as an
//! already-parsed [`PathSpec`]. Every lookup parses its own path; nothing
//! is cached between calls.
//!
//! ```
//! use pathquill::{get, get_or, Value};
//!
//! let greeting = Value::from("hello world");
//! let args = [Value::from(0), Value::from(5)];
//!
//! assert_eq!(
//!     get(&greeting, "toUpperCase().substring({0},{1})", &args),
//!     Some(Value::from("HELLO"))
//! );
//! assert_eq!(get(&greeting, "nope", &[]), None);
//! assert_eq!(get_or(&greeting, Value::from("-"), "nope", &[]), Value::from("-"));
//! ```

pub mod cast;

pub use cast::FromValue;

use crate::path::{CastError, Evaluator, Parser, PathSpec};
use crate::reflect::Value;

/// Anything that can name a path.
pub trait IntoPath {
    fn into_path(self) -> PathSpec;
}

impl IntoPath for &str {
    fn into_path(self) -> PathSpec {
        Parser::parse(self)
    }
}

impl IntoPath for String {
    fn into_path(self) -> PathSpec {
        Parser::parse(&self)
    }
}

impl IntoPath for &String {
    fn into_path(self) -> PathSpec {
        Parser::parse(self)
    }
}

impl IntoPath for PathSpec {
    fn into_path(self) -> PathSpec {
        self
    }
}

impl IntoPath for &PathSpec {
    fn into_path(self) -> PathSpec {
        self.clone()
    }
}

impl<S: AsRef<str>> IntoPath for &[S] {
    fn into_path(self) -> PathSpec {
        Parser::parse_tokens(self)
    }
}

impl<S: AsRef<str>> IntoPath for Vec<S> {
    fn into_path(self) -> PathSpec {
        Parser::parse_tokens(self)
    }
}

impl<S: AsRef<str>, const N: usize> IntoPath for [S; N] {
    fn into_path(self) -> PathSpec {
        Parser::parse_tokens(self)
    }
}

/// A missing path is the empty path.
impl<P: IntoPath> IntoPath for Option<P> {
    fn into_path(self) -> PathSpec {
        self.map(IntoPath::into_path).unwrap_or_default()
    }
}

/// Resolves `path` against `object`, filling `{n}` placeholders from
/// `args`.
///
/// Returns `None` when any segment fails or the result is null. An empty
/// path yields `object` itself.
pub fn get(object: &Value, path: impl IntoPath, args: &[Value]) -> Option<Value> {
    Evaluator::new(args).evaluate(object, &path.into_path())
}

/// Like [`get`], returning `default` where `get` would return `None`.
pub fn get_or(object: &Value, default: Value, path: impl IntoPath, args: &[Value]) -> Value {
    get(object, path, args).unwrap_or(default)
}

/// Like [`get`], then converts the result to `T`.
///
/// A path that does not resolve is `Ok(None)`; a result of the wrong
/// type is an error.
///
/// ```
/// use pathquill::{get_as, CastError, Value};
///
/// let name = Value::from("hello");
/// assert_eq!(get_as::<i32>(&name, "length()", &[]), Ok(Some(5)));
/// assert_eq!(get_as::<i32>(&name, "missing", &[]), Ok(None));
/// assert!(matches!(
///     get_as::<i32>(&name, "toUpperCase()", &[]),
///     Err(CastError::InvalidCast { .. })
/// ));
/// ```
pub fn get_as<T: FromValue>(
    object: &Value,
    path: impl IntoPath,
    args: &[Value],
) -> Result<Option<T>, CastError> {
    get(object, path, args).map(T::from_value).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathSegment;

    #[test]
    fn test_path_forms_agree() {
        let value = Value::from("a,b,c");
        let args = [Value::from(",")];
        let expected = Some(Value::from("b"));

        assert_eq!(get(&value, "split({0})[1]", &args), expected);
        assert_eq!(get(&value, String::from("split({0})[1]"), &args), expected);
        assert_eq!(get(&value, ["split({0})", "[1]"], &args), expected);
        assert_eq!(get(&value, vec!["split({0})[1]"], &args), expected);

        let tokens = ["split({0})".to_string(), "[1]".to_string()];
        assert_eq!(get(&value, &tokens[..], &args), expected);

        let spec = PathSpec::new(vec![
            PathSegment::method("split", vec![0]),
            PathSegment::index(1),
        ]);
        assert_eq!(get(&value, &spec, &args), expected);
        assert_eq!(get(&value, spec, &args), expected);
    }

    #[test]
    fn test_missing_path_is_identity() {
        let value = Value::from(42);
        assert_eq!(get(&value, None::<&str>, &[]), Some(value.clone()));
        assert_eq!(get(&value, "", &[]), Some(value.clone()));
        assert_eq!(get(&Value::Null, "", &[]), None);
    }

    #[test]
    fn test_get_or_keeps_found_values() {
        let value = Value::from("abc");
        assert_eq!(
            get_or(&value, Value::from(0), "length()", &[]),
            Value::from(3)
        );
        assert_eq!(get_or(&value, Value::from(0), "size()", &[]), Value::from(0));
    }
}
