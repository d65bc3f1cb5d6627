//! Byte offset to line/column conversion.

use text_size::{TextRange, TextSize};

use super::TextPosition;

/// Line start table for one query text.
///
/// Columns are counted in characters, so a non-ASCII character inside a
/// string literal still occupies a single column.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<TextSize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::new((offset + 1) as u32));
            }
        }
        Self { text, line_starts }
    }

    /// 1-based (line, column) of a byte offset
    pub fn line_col(&self, offset: TextSize) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = usize::from(self.line_starts[line]);
        let end = usize::from(offset).min(self.text.len());
        let column = self.text.get(start..end).map(|s| s.chars().count()).unwrap_or(0);
        (line as u32 + 1, column as u32 + 1)
    }

    /// Convert a byte range into a line/column span
    pub fn position(&self, range: TextRange) -> TextPosition {
        let (begin_line, begin_column) = self.line_col(range.start());
        let (end_line, end_column) = self.line_col(range.end());
        TextPosition::new(begin_line, begin_column, end_line, end_column)
    }
}
