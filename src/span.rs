//! Source location tracking for tokens and error messages.

use std::fmt;

use miette::SourceSpan;

/// A location in source text (byte offset, line, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Byte offset from start of input
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed, in characters not bytes)
    pub column: u32,
}

impl Location {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }

    /// The first character of the input.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A byte range in source text, used for diagnostic labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Location,
    /// Length in bytes
    pub len: usize,
}

impl Span {
    pub fn new(start: Location, len: usize) -> Self {
        Self { start, len }
    }

    /// Shift the span by a base offset and line, for text embedded in a
    /// larger document (e.g. the pattern part of a ring line).
    pub fn relocate(self, base: Location) -> Self {
        let column = if self.start.line == 1 {
            base.column + self.start.column - 1
        } else {
            self.start.column
        };
        Self {
            start: Location {
                offset: base.offset + self.start.offset,
                line: base.line + self.start.line - 1,
                column,
            },
            len: self.len,
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from((span.start.offset, span.len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relocate_first_line() {
        let base = Location::new(20, 3, 12);
        let span = Span::new(Location::new(4, 1, 5), 2).relocate(base);

        assert_eq!(span.start, Location::new(24, 3, 16));
        assert_eq!(span.len, 2);
    }
}
