//! Source text snapshots and offset/position translation
//!
//! Offsets are byte offsets into the UTF-8 text. Positions are 0-based
//! line numbers with columns counted in characters, which is what an
//! editor host expects when it places annotations.

use serde::Serialize;

use crate::error::{DocmarkError, Result};

/// A line/column position in a text snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    /// Line number (0-based)
    pub line: usize,
    /// Column in characters from the start of the line (0-based)
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A pair of positions (start inclusive, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a new range
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Check if the range covers no characters
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// An immutable text snapshot with a line index
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
    /// Byte offset of the first character of every line
    line_starts: Vec<usize>,
}

impl SourceText {
    /// Create a snapshot and index its line starts
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the text is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines (a trailing newline starts one more, empty, line)
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte range of a line, without its trailing newline
    pub fn line_bounds(&self, line: usize) -> Option<(usize, usize)> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next| next - 1);
        Some((start, end))
    }

    /// Translate a byte offset to a line/column position
    pub fn position_at(&self, offset: usize) -> Result<Position> {
        if offset > self.text.len() {
            return Err(DocmarkError::OffsetOutOfBounds {
                offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(DocmarkError::NotCharBoundary(offset));
        }

        // Last line start that is <= offset
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let column = self.text[line_start..offset].chars().count();
        Ok(Position::new(line, column))
    }

    /// Translate a line/column position back to a byte offset
    ///
    /// A column past the end of its line clamps to the line end.
    pub fn offset_at(&self, position: Position) -> Result<usize> {
        let (start, end) =
            self.line_bounds(position.line)
                .ok_or(DocmarkError::LineOutOfBounds {
                    line: position.line,
                    line_count: self.line_count(),
                })?;
        let offset = self.text[start..end]
            .char_indices()
            .nth(position.column)
            .map_or(end, |(i, _)| start + i);
        Ok(offset)
    }

    /// Translate a byte range to a position range
    pub fn range(&self, start: usize, end: usize) -> Result<Range> {
        Ok(Range::new(self.position_at(start)?, self.position_at(end)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_at_single_line() {
        let src = SourceText::new("hello");
        assert_eq!(src.position_at(0).unwrap(), Position::new(0, 0));
        assert_eq!(src.position_at(5).unwrap(), Position::new(0, 5));
    }

    #[test]
    fn test_position_at_multiline() {
        let src = SourceText::new("ab\ncd\n\nef");
        assert_eq!(src.line_count(), 4);
        assert_eq!(src.position_at(2).unwrap(), Position::new(0, 2));
        assert_eq!(src.position_at(3).unwrap(), Position::new(1, 0));
        assert_eq!(src.position_at(6).unwrap(), Position::new(2, 0));
        assert_eq!(src.position_at(7).unwrap(), Position::new(3, 0));
        assert_eq!(src.position_at(9).unwrap(), Position::new(3, 2));
    }

    #[test]
    fn test_columns_count_characters() {
        let src = SourceText::new("é*x");
        // 'é' is two bytes
        assert_eq!(src.position_at(2).unwrap(), Position::new(0, 1));
        assert!(matches!(
            src.position_at(1),
            Err(DocmarkError::NotCharBoundary(1))
        ));
    }

    #[test]
    fn test_out_of_bounds() {
        let src = SourceText::new("abc");
        assert!(matches!(
            src.position_at(4),
            Err(DocmarkError::OffsetOutOfBounds { offset: 4, len: 3 })
        ));
        assert!(src.offset_at(Position::new(3, 0)).is_err());
    }

    #[test]
    fn test_offset_roundtrip_and_clamp() {
        let src = SourceText::new("/**\n * é x\n */");
        for offset in [0, 3, 4, 7, 9, 10, 11, 14] {
            let pos = src.position_at(offset).unwrap();
            assert_eq!(src.offset_at(pos).unwrap(), offset);
        }
        // Column past line end clamps
        assert_eq!(src.offset_at(Position::new(0, 99)).unwrap(), 3);
    }

    #[test]
    fn test_line_bounds() {
        let src = SourceText::new("ab\ncd\n");
        assert_eq!(src.line_bounds(0), Some((0, 2)));
        assert_eq!(src.line_bounds(1), Some((3, 5)));
        assert_eq!(src.line_bounds(2), Some((6, 6)));
        assert_eq!(src.line_bounds(3), None);
    }
}
