// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

/// A line/column location inside the input buffer.
///
/// `line` is 1-based, `column` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column + 1)
    }
}

/// Represents a continuous range in the input buffer.
/// Both start and end are inclusive positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Starting position (line and column).
    pub start: SourcePos,

    /// Ending position (line and column).
    pub end: SourcePos,
}

impl Span {
    pub fn new(start: SourcePos, end: SourcePos) -> Self {
        Self { start, end }
    }

    /// Zero-width span sitting on a single position.
    pub fn point(pos: SourcePos) -> Self {
        Self { start: pos, end: pos }
    }

    /// Span covering `len` characters on the line of `start`.
    pub fn on_line(start: SourcePos, len: usize) -> Self {
        Self {
            start,
            end: SourcePos {
                line: start.line,
                column: start.column + len.saturating_sub(1),
            },
        }
    }

    pub fn width(&self) -> usize {
        if self.start.line != self.end.line {
            return 1;
        }
        self.end.column.saturating_sub(self.start.column) + 1
    }
}

/// A trait for types that provide access to a source code span.
///
/// Implementors of this trait can return the `Span` that locates them
/// in the input buffer.
pub trait HasSpan {
    fn span(&self) -> Span;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_on_line_width() {
        let span = Span::on_line(SourcePos { line: 2, column: 4 }, 3);
        assert_eq!(span.end, SourcePos { line: 2, column: 6 });
        assert_eq!(span.width(), 3);
    }

    #[test]
    fn test_point_span_is_one_wide() {
        let span = Span::point(SourcePos { line: 1, column: 0 });
        assert_eq!(span.width(), 1);
    }

    #[test]
    fn test_source_pos_display_is_one_based_column() {
        assert_eq!(SourcePos { line: 3, column: 0 }.to_string(), "3:1");
    }
}
