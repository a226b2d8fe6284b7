//! Error types for path evaluation.

use thiserror::Error;

use crate::reflect::InvokeError;

/// Why a path did not resolve.
///
/// These never reach callers of [`crate::get`]; the evaluator collapses
/// every one of them into a null result. They are exposed through
/// [`crate::path::Evaluator::try_evaluate`] for diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("cannot apply '{segment}' to null")]
    NullReceiver { segment: String },

    #[error("{type_name} has no field '{field}'")]
    FieldNotFound {
        type_name: &'static str,
        field: String,
    },

    #[error("{type_name} has no method '{name}' accepting the {arity} supplied argument(s)")]
    MethodNotFound {
        type_name: &'static str,
        name: String,
        arity: usize,
    },

    #[error("placeholder {{{slot}}} is out of range: {supplied} argument(s) supplied")]
    ArgumentOutOfRange { slot: usize, supplied: usize },

    #[error("'{method}' failed: {source}")]
    Invocation {
        method: String,
        #[source]
        source: InvokeError,
    },

    #[error("negative index {0}")]
    NegativeIndex(isize),

    #[error("index has no usable digits")]
    MissingIndex,

    #[error("index {index} is out of range")]
    IndexOutOfRange { index: usize },

    #[error("{type_name} cannot be indexed")]
    NotIterable { type_name: &'static str },
}

/// Raised by [`crate::get_as`] when a resolved value is not of the
/// requested type. Unlike [`EvalError`] this is returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
    #[error("cannot cast {found} to {expected}")]
    InvalidCast {
        expected: &'static str,
        found: &'static str,
    },
}
