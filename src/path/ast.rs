//! Syntax tree types for lookup paths.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::parser::Parser;

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Named field (`name`)
    Field(String),
    /// Method call (`substring({0},{1})`); each slot indexes the
    /// caller-supplied argument list.
    Method { name: String, arg_slots: Vec<usize> },
    /// Element access (`[2]`). `None` when the brackets held no usable
    /// number; like a negative index, that only fails at evaluation.
    Index(Option<isize>),
}

impl PathSegment {
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    pub fn method(name: impl Into<String>, arg_slots: Vec<usize>) -> Self {
        PathSegment::Method {
            name: name.into(),
            arg_slots,
        }
    }

    pub fn index(index: isize) -> Self {
        PathSegment::Index(Some(index))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Method { name, arg_slots } => {
                write!(f, "{}(", name)?;
                for (i, slot) in arg_slots.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{{{}}}", slot)?;
                }
                write!(f, ")")
            }
            PathSegment::Index(Some(index)) => write!(f, "[{}]", index),
            PathSegment::Index(None) => write!(f, "[]"),
        }
    }
}

/// A parsed path: segments applied left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSpec {
    /// Segments that make up the path.
    pub segments: Vec<PathSegment>,
}

impl PathSpec {
    /// Creates a new path with the given segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

/// Canonical dotted form; index segments attach to the segment before
/// them, so `a.split({0})[1]` prints as written.
///
/// Only a path parsed from a dotted string is guaranteed to re-parse to the
/// same segments. A field name containing `.` or a bracket group, which the
/// pre-split token form allows, prints unescaped and re-parses differently.
impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && !matches!(segment, PathSegment::Index(_)) {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for PathSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Parser::parse(s))
    }
}

impl From<Vec<PathSegment>> for PathSpec {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self::new(segments)
    }
}
