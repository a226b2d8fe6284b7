//! Walks a value through the segments of a path.

use log::{debug, warn};

use super::ast::{PathSegment, PathSpec};
use super::error::EvalError;
use crate::reflect::{signature_accepts, MethodHandle, Value};

/// Overload count at which a warning is logged. The first candidate is
/// used regardless.
pub const DEFAULT_AMBIGUITY_THRESHOLD: usize = 3;

/// Resolves paths against values, substituting `{n}` placeholders from a
/// fixed argument list.
pub struct Evaluator<'a> {
    args: &'a [Value],
    ambiguity_threshold: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(args: &'a [Value]) -> Self {
        Evaluator {
            args,
            ambiguity_threshold: DEFAULT_AMBIGUITY_THRESHOLD,
        }
    }

    pub fn with_ambiguity_threshold(mut self, threshold: usize) -> Self {
        self.ambiguity_threshold = threshold;
        self
    }

    /// Evaluates `path` from `root`.
    ///
    /// Returns `None` if any segment fails or the path ends on a null. An
    /// empty path returns `root` itself.
    pub fn evaluate(&self, root: &Value, path: &PathSpec) -> Option<Value> {
        match self.try_evaluate(root, path) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(err) => {
                debug!("path '{}' did not resolve: {}", path, err);
                None
            }
        }
    }

    /// Like [`Evaluator::evaluate`], but reports why the walk stopped.
    pub fn try_evaluate(&self, root: &Value, path: &PathSpec) -> Result<Value, EvalError> {
        path.segments
            .iter()
            .try_fold(root.clone(), |current, segment| self.step(&current, segment))
    }

    fn step(&self, current: &Value, segment: &PathSegment) -> Result<Value, EvalError> {
        match segment {
            PathSegment::Field(name) => self.read_field(current, name, segment),
            PathSegment::Method { name, arg_slots } => {
                self.call_method(current, name, arg_slots, segment)
            }
            PathSegment::Index(index) => self.read_index(current, *index, segment),
        }
    }

    fn read_field(
        &self,
        current: &Value,
        name: &str,
        segment: &PathSegment,
    ) -> Result<Value, EvalError> {
        if let Value::Map(entries) = current {
            return entries
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::FieldNotFound {
                    type_name: current.type_name(),
                    field: name.to_string(),
                });
        }

        let info = current
            .type_info()
            .ok_or_else(|| null_receiver(segment))?;

        info.field(name)
            .and_then(|field| field.read(current))
            .ok_or_else(|| EvalError::FieldNotFound {
                type_name: info.name(),
                field: name.to_string(),
            })
    }

    fn call_method(
        &self,
        current: &Value,
        name: &str,
        arg_slots: &[usize],
        segment: &PathSegment,
    ) -> Result<Value, EvalError> {
        let params = self.resolve_args(arg_slots)?;
        let info = current
            .type_info()
            .ok_or_else(|| null_receiver(segment))?;

        let candidates: Vec<&MethodHandle> = info
            .methods(name, params.len())
            .iter()
            .filter(|method| signature_accepts(method.params(), &params))
            .collect();

        let method = candidates
            .first()
            .copied()
            .ok_or_else(|| EvalError::MethodNotFound {
                type_name: info.name(),
                name: name.to_string(),
                arity: params.len(),
            })?;

        if candidates.len() >= self.ambiguity_threshold {
            warn!(
                "{} overloads of {}.{} accept the supplied arguments; using the first",
                candidates.len(),
                info.name(),
                name
            );
        }

        method
            .invoke(current, &params)
            .map_err(|source| EvalError::Invocation {
                method: segment.to_string(),
                source,
            })
    }

    fn resolve_args(&self, arg_slots: &[usize]) -> Result<Vec<Value>, EvalError> {
        arg_slots
            .iter()
            .map(|&slot| {
                self.args
                    .get(slot)
                    .cloned()
                    .ok_or(EvalError::ArgumentOutOfRange {
                        slot,
                        supplied: self.args.len(),
                    })
            })
            .collect()
    }

    fn read_index(
        &self,
        current: &Value,
        index: Option<isize>,
        segment: &PathSegment,
    ) -> Result<Value, EvalError> {
        let index = index.ok_or(EvalError::MissingIndex)?;
        let index = usize::try_from(index).map_err(|_| EvalError::NegativeIndex(index))?;
        let out_of_range = || EvalError::IndexOutOfRange { index };

        match current {
            Value::Array(items) => items.get(index).cloned().ok_or_else(out_of_range),
            Value::List(items) => items.iter().nth(index).cloned().ok_or_else(out_of_range),
            Value::Object(obj) => match obj.iter_values() {
                Some(mut values) => values.nth(index).ok_or_else(out_of_range),
                None => Err(EvalError::NotIterable {
                    type_name: current.type_name(),
                }),
            },
            Value::Null => Err(null_receiver(segment)),
            other => Err(EvalError::NotIterable {
                type_name: other.type_name(),
            }),
        }
    }
}

fn null_receiver(segment: &PathSegment) -> EvalError {
    EvalError::NullReceiver {
        segment: segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Parser;
    use crate::reflect::{Kind, Reflect, TypeInfo, TypeRef};
    use std::sync::OnceLock;

    #[derive(Debug)]
    struct Greeting {
        name: String,
    }

    impl Reflect for Greeting {
        fn type_info(&self) -> &TypeInfo {
            static INFO: OnceLock<TypeInfo> = OnceLock::new();
            INFO.get_or_init(|| {
                TypeInfo::builder::<Greeting>("Greeting")
                    .field("name", |g| Value::from(g.name.as_str()))
                    .method("getName", &[], |g, _| Ok(Value::from(g.name.as_str())))
                    .method("echo", &[TypeRef::Primitive(Kind::Int)], |_, _| {
                        Ok(Value::from("int"))
                    })
                    .method("echo", &[TypeRef::Object], |_, _| Ok(Value::from("object")))
                    .method("echo", &[TypeRef::Boxed(Kind::Int)], |_, _| {
                        Ok(Value::from("boxed"))
                    })
                    .method("nothing", &[], |_, _| Ok(Value::Null))
                    .build()
            })
        }
    }

    fn greeting() -> Value {
        Value::object(Greeting {
            name: "hello world".to_string(),
        })
    }

    fn eval(root: &Value, path: &str, args: &[Value]) -> Result<Value, EvalError> {
        Evaluator::new(args).try_evaluate(root, &Parser::parse(path))
    }

    #[test]
    fn test_evaluate_field() {
        assert_eq!(eval(&greeting(), "name", &[]), Ok(Value::from("hello world")));
    }

    #[test]
    fn test_evaluate_method_chain() {
        let args = [Value::from(0), Value::from(5)];
        assert_eq!(
            eval(&greeting(), "getName().toUpperCase().substring({0},{1})", &args),
            Ok(Value::from("HELLO"))
        );
    }

    #[test]
    fn test_evaluate_empty_path_is_identity() {
        let root = greeting();
        assert_eq!(eval(&root, "", &[]), Ok(root.clone()));
    }

    #[test]
    fn test_map_entries_read_as_fields() {
        let mut entries = indexmap::IndexMap::new();
        entries.insert("user".to_string(), Value::from("ada"));
        let map = Value::Map(entries);
        assert_eq!(eval(&map, "user.length()", &[]), Ok(Value::from(3)));
        assert_eq!(
            eval(&map, "age", &[]),
            Err(EvalError::FieldNotFound {
                type_name: "Map",
                field: "age".to_string()
            })
        );
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(
            eval(&greeting(), "age", &[]),
            Err(EvalError::FieldNotFound {
                type_name: "Greeting",
                field: "age".to_string()
            })
        );
    }

    #[test]
    fn test_missing_method_arity() {
        assert!(matches!(
            eval(&greeting(), "getName({0})", &[Value::from(1)]),
            Err(EvalError::MethodNotFound { arity: 1, .. })
        ));
    }

    #[test]
    fn test_argument_slot_out_of_range() {
        assert_eq!(
            eval(&greeting(), "name.substring({0},{3})", &[Value::from(0)]),
            Err(EvalError::ArgumentOutOfRange {
                slot: 3,
                supplied: 1
            })
        );
    }

    #[test]
    fn test_invocation_failure() {
        let args = [Value::from(0), Value::from(50)];
        assert!(matches!(
            eval(&greeting(), "name.substring({0},{1})", &args),
            Err(EvalError::Invocation { .. })
        ));
    }

    #[test]
    fn test_first_accepted_overload_wins() {
        let args = [Value::from(7)];
        assert_eq!(eval(&greeting(), "echo({0})", &args), Ok(Value::from("int")));
        assert_eq!(
            eval(&greeting(), "echo({0})", &[Value::from("s")]),
            Ok(Value::from("object"))
        );
    }

    #[test]
    fn test_ambiguity_does_not_change_result() {
        let args = [Value::from(7)];
        let path = Parser::parse("echo({0})");
        let result = Evaluator::new(&args)
            .with_ambiguity_threshold(2)
            .evaluate(&greeting(), &path);
        assert_eq!(result, Some(Value::from("int")));
    }

    #[test]
    fn test_index_rules() {
        let array = Value::Array(vec![Value::from(10), Value::from(20), Value::from(30)]);
        assert_eq!(eval(&array, "[1]", &[]), Ok(Value::from(20)));
        assert_eq!(
            eval(&array, "[5]", &[]),
            Err(EvalError::IndexOutOfRange { index: 5 })
        );
        assert_eq!(eval(&array, "[-1]", &[]), Err(EvalError::NegativeIndex(-1)));
        assert_eq!(eval(&array, "[]", &[]), Err(EvalError::MissingIndex));

        let list = Value::List(vec![Value::from("a"), Value::from("b")]);
        assert_eq!(eval(&list, "[1]", &[]), Ok(Value::from("b")));

        assert_eq!(
            eval(&Value::from("abc"), "[0]", &[]),
            Err(EvalError::NotIterable { type_name: "String" })
        );
        assert_eq!(
            eval(&greeting(), "[0]", &[]),
            Err(EvalError::NotIterable {
                type_name: "Greeting"
            })
        );
    }

    #[test]
    fn test_null_midway_fails() {
        assert!(matches!(
            eval(&greeting(), "nothing().length()", &[]),
            Err(EvalError::NullReceiver { .. })
        ));
    }

    #[test]
    fn test_null_result_collapses() {
        let path = Parser::parse("nothing()");
        assert_eq!(Evaluator::new(&[]).evaluate(&greeting(), &path), None);
    }
}
