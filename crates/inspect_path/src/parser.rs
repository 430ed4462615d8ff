//! Provide the path string syntax.

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::{OffsetSegment, Segment};

// -----------------------------------------------------------------------------
// Error

/// A path string that does not follow the path syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError<'a> {
    /// Byte offset of the offending step or character.
    pub offset: usize,
    /// The rejected path.
    pub path: &'a str,
    /// What is wrong at `offset`.
    pub error: Cow<'a, str>,
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid path `{}` at offset {}: {}", self.path, self.offset, self.error)
    }
}

impl core::error::Error for ParseError<'_> {}

// -----------------------------------------------------------------------------
// AccessPath

/// An interface where the type implementing
/// this trait can be considered as a "Path" for path access.
///
/// This crate provides implementations for [`&str`] and [`String`].
///
/// # Syntax
///
/// ```text
/// path := step ("." step)*
/// step := name ["[" digits "]"]
/// ```
///
/// - Field: `name`, e.g. `stats`
/// - Index: `name[Number]`, e.g. `weapons[0]`
///
/// The container marker `.Array.data[` is accepted in place of `[`, so
/// `weapons.Array.data[0]` and `weapons[0]` parse to the same segment.
///
/// [`&str`]: str
pub trait AccessPath<'a> {
    /// Parses the path and returns an iterator of [`OffsetSegment`].
    ///
    /// The iterator stops after the first error.
    fn parse_to_segments(&self)
    -> impl Iterator<Item = Result<OffsetSegment<'a>, ParseError<'a>>>;
}

impl<'a> AccessPath<'a> for &'a str {
    #[inline]
    fn parse_to_segments(
        &self,
    ) -> impl Iterator<Item = Result<OffsetSegment<'a>, ParseError<'a>>> {
        PathParser::new(*self)
    }
}

impl<'a> AccessPath<'a> for &'a String {
    #[inline]
    fn parse_to_segments(
        &self,
    ) -> impl Iterator<Item = Result<OffsetSegment<'a>, ParseError<'a>>> {
        PathParser::new((*self).as_str())
    }
}

// -----------------------------------------------------------------------------
// Parser

const ARRAY_MARKER: &str = ".Array.data[";

/// Lazily splits a path string into [`OffsetSegment`]s.
struct PathParser<'a> {
    path: &'a str,
    cursor: usize,
    done: bool,
}

impl<'a> PathParser<'a> {
    #[inline]
    const fn new(path: &'a str) -> Self {
        Self {
            path,
            cursor: 0,
            done: false,
        }
    }

    #[inline]
    fn error(&self, offset: usize, error: impl Into<Cow<'a, str>>) -> ParseError<'a> {
        ParseError {
            offset,
            path: self.path,
            error: error.into(),
        }
    }

    fn parse_step(&mut self) -> Result<OffsetSegment<'a>, ParseError<'a>> {
        let path = self.path;
        let start = self.cursor;

        if path.is_empty() {
            return Err(self.error(0, "the path is empty"));
        }

        let end = path[start..]
            .find(['.', '['])
            .map_or(path.len(), |pos| start + pos);
        let name = &path[start..end];

        if name.is_empty() {
            return Err(self.error(start, "expected a field name"));
        }
        if let Some(pos) = name.find(']') {
            return Err(self.error(start + pos, "unexpected `]`"));
        }

        self.cursor = end;
        if path[end..].starts_with(ARRAY_MARKER) {
            self.cursor = end + ARRAY_MARKER.len() - 1;
        }

        let segment = if path[self.cursor..].starts_with('[') {
            let open = self.cursor;
            let close = path[open..]
                .find(']')
                .map(|pos| open + pos)
                .ok_or_else(|| self.error(open, "missing closing `]`"))?;
            let digits = &path[open + 1..close];
            let index = parse_index(digits).ok_or_else(|| {
                self.error(
                    open + 1,
                    format!("`{digits}` is not a valid element index"),
                )
            })?;
            self.cursor = close + 1;
            Segment::Index(Cow::Borrowed(name), index)
        } else {
            Segment::Field(Cow::Borrowed(name))
        };

        match path[self.cursor..].chars().next() {
            None => self.done = true,
            Some('.') => self.cursor += 1,
            Some(c) => {
                return Err(self.error(self.cursor, format!("unexpected `{c}` after `]`")));
            }
        }

        Ok(OffsetSegment {
            segment,
            offset: Some(start),
        })
    }
}

impl<'a> Iterator for PathParser<'a> {
    type Item = Result<OffsetSegment<'a>, ParseError<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let res = self.parse_step();
        if res.is_err() {
            self.done = true;
        }
        Some(res)
    }
}

fn parse_index(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
