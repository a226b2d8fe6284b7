//! Lookup paths.
//!
//! A path such as `user.getName().substring({0},{1})` is parsed into a
//! [`PathSpec`] and walked by an [`Evaluator`] against a root [`Value`].
//! Evaluation is fail-soft: any segment that cannot be applied turns the
//! whole lookup into a null result.
//!
//! [`Value`]: crate::reflect::Value

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{PathSegment, PathSpec};
pub use error::{CastError, EvalError};
pub use evaluator::{Evaluator, DEFAULT_AMBIGUITY_THRESHOLD};
pub use parser::Parser;
