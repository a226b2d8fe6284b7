//! Lookup path parser.
//!
//! A path is either one string whose segments are separated by `.`, or a
//! sequence of already-split tokens. Each token is classified as:
//!
//! - `[n]` - an index (`-` and missing digits parse, and fail later)
//! - `name({0},{1})` - a method call with argument placeholders
//! - anything else - a field name, taken verbatim
//!
//! A token may carry index groups glued to its end (`name[2]`,
//! `split({0})[1][0]`); these become separate index segments following
//! the base segment. Blank tokens are skipped.
//!
//! Parsing never fails: text that does not fit the method or index
//! grammar falls through to a field name, which then simply does not
//! resolve at evaluation time.

use super::ast::{PathSegment, PathSpec};

/// Cursor over a single token.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Parses a dotted path string.
    ///
    /// ```
    /// use pathquill::path::{Parser, PathSegment};
    ///
    /// let path = Parser::parse("name.split({0})[1]");
    /// assert_eq!(
    ///     path.segments,
    ///     vec![
    ///         PathSegment::field("name"),
    ///         PathSegment::method("split", vec![0]),
    ///         PathSegment::index(1),
    ///     ]
    /// );
    /// ```
    pub fn parse(path: &str) -> PathSpec {
        Self::parse_tokens(path.split('.'))
    }

    /// Parses a pre-split token sequence. Tokens are not split on `.`.
    pub fn parse_tokens<I, S>(tokens: I) -> PathSpec
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segments = Vec::new();
        for token in tokens {
            push_token(&mut segments, token.as_ref());
        }
        PathSpec::new(segments)
    }

    /// Classifies one token that carries no glued index groups.
    pub fn parse_segment(token: &str) -> PathSegment {
        if let Some(index) = Parser::new(token).parse_whole(Parser::parse_index) {
            return PathSegment::Index(index);
        }
        if let Some(segment) = Parser::new(token).parse_whole(Parser::parse_method) {
            return segment;
        }
        PathSegment::Field(token.to_string())
    }

    /// Runs `rule` and keeps its result only if it consumed the whole token.
    fn parse_whole<T>(mut self, rule: fn(&mut Self) -> Option<T>) -> Option<T> {
        let result = rule(&mut self)?;
        if self.is_eof() {
            Some(result)
        } else {
            None
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Checks if we've reached the end of input.
    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Consumes `expected` if it is next.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    fn take_digits(&mut self) -> &'a str {
        let start = self.position;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.next();
        }
        &self.input[start..self.position]
    }

    /// Parses an identifier: a letter or `_`, then letters, digits or `_`.
    fn parse_identifier(&mut self) -> Option<&'a str> {
        let start = self.position;
        match self.peek() {
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                self.next();
            }
            _ => return None,
        }
        while matches!(self.peek(), Some(ch) if ch.is_ascii_alphanumeric() || ch == '_') {
            self.next();
        }
        Some(&self.input[start..self.position])
    }

    /// Parses `[n]`, `[-n]` or `[]`.
    fn parse_index(&mut self) -> Option<Option<isize>> {
        if !self.eat('[') {
            return None;
        }
        let negative = self.eat('-');
        let digits = self.take_digits();
        if !self.eat(']') {
            return None;
        }
        Some(index_value(negative, digits))
    }

    /// Parses `name(` placeholders `)` where each placeholder is `{n}`,
    /// optionally followed by a comma.
    fn parse_method(&mut self) -> Option<PathSegment> {
        let name = self.parse_identifier()?;
        if !self.eat('(') {
            return None;
        }

        let mut arg_slots = Vec::new();
        while self.eat('{') {
            let digits = self.take_digits();
            if digits.is_empty() || !self.eat('}') {
                return None;
            }
            // an unrepresentable slot can never be in range
            arg_slots.push(digits.parse::<usize>().unwrap_or(usize::MAX));
            self.eat(',');
        }

        if !self.eat(')') {
            return None;
        }
        Some(PathSegment::method(name, arg_slots))
    }

    /// Parses one or more index groups running to the end of input.
    fn parse_index_groups(&mut self) -> Option<Vec<Option<isize>>> {
        let mut indices = Vec::new();
        while !self.is_eof() {
            indices.push(self.parse_index()?);
        }
        if indices.is_empty() {
            None
        } else {
            Some(indices)
        }
    }
}

fn index_value(negative: bool, digits: &str) -> Option<isize> {
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<isize>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Splits `base[1][2]` into the base and its index groups. The base must
/// hold no brackets and the groups must run to the end of the token, so
/// `a[1]x[2]` is not split and stays one field name.
fn split_index_suffix(token: &str) -> Option<(&str, Vec<Option<isize>>)> {
    let open = token.find('[')?;
    let (base, suffix) = token.split_at(open);
    if base.contains(']') {
        return None;
    }
    let indices = Parser::new(suffix).parse_index_groups()?;
    Some((base, indices))
}

fn push_token(segments: &mut Vec<PathSegment>, token: &str) {
    if token.trim().is_empty() {
        return;
    }

    match split_index_suffix(token) {
        Some((base, indices)) => {
            if !base.trim().is_empty() {
                segments.push(Parser::parse_segment(base));
            }
            segments.extend(indices.into_iter().map(PathSegment::Index));
        }
        None => segments.push(Parser::parse_segment(token)),
    }
}
