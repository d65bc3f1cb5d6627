/// Position tracking for AST nodes and diagnostics
///
/// Stores the source location (line/column) of a construct so that errors
/// can point at the offending part of a query.
use std::fmt;

/// A span of query text.
///
/// Lines and columns are 1-based. The end column is exclusive: a token
/// `FOO` starting at column 8 spans columns 8 to 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextPosition {
    pub begin_line: u32,
    pub begin_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl TextPosition {
    pub fn new(begin_line: u32, begin_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            begin_line,
            begin_column,
            end_line,
            end_column,
        }
    }

    /// Create an empty span at a single line/column
    pub fn point(line: u32, column: u32) -> Self {
        Self::new(line, column, line, column)
    }

    /// Span covering both `self` and `other`
    pub fn to(self, other: TextPosition) -> Self {
        let (begin_line, begin_column) =
            (self.begin_line, self.begin_column).min((other.begin_line, other.begin_column));
        let (end_line, end_column) =
            (self.end_line, self.end_column).max((other.end_line, other.end_column));
        Self::new(begin_line, begin_column, end_line, end_column)
    }

    /// Merge two optional spans, keeping whichever is known
    pub fn merge(a: Option<TextPosition>, b: Option<TextPosition>) -> Option<TextPosition> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.to(b)),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[l.{} c.{} - l.{} c.{}]",
            self.begin_line, self.begin_column, self.end_line, self.end_column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_covers_both_spans() {
        let a = TextPosition::new(1, 8, 1, 12);
        let b = TextPosition::new(2, 1, 2, 5);
        assert_eq!(a.to(b), TextPosition::new(1, 8, 2, 5));
        assert_eq!(b.to(a), TextPosition::new(1, 8, 2, 5));
    }

    #[test]
    fn test_merge_keeps_known_span() {
        let a = TextPosition::point(1, 1);
        assert_eq!(TextPosition::merge(Some(a), None), Some(a));
        assert_eq!(TextPosition::merge(None, Some(a)), Some(a));
        assert_eq!(TextPosition::merge(None, None), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TextPosition::new(1, 8, 1, 13).to_string(), "[l.1 c.8 - l.1 c.13]");
    }
}
