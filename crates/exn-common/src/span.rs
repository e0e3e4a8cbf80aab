//! Byte-offset source spans.

use serde::{Deserialize, Serialize};

/// Index of a source file in a program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileId(pub u32);

impl FileId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A half-open byte range `[start, end)` within a single source file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Empty span used for synthesized nodes that have no source text.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        if end < start {
            Span { start, end: start }
        } else {
            Span { start, end }
        }
    }

    /// Create a span from a start offset and a length.
    #[must_use]
    pub const fn at(start: u32, length: u32) -> Self {
        Span {
            start,
            end: start.saturating_add(length),
        }
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Shift both ends by `offset`.
    #[must_use]
    pub const fn offset_by(self, offset: u32) -> Self {
        Span {
            start: self.start.saturating_add(offset),
            end: self.end.saturating_add(offset),
        }
    }

    #[must_use]
    pub const fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl From<(u32, u32)> for Span {
    fn from((start, end): (u32, u32)) -> Self {
        Span::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new_clamps_reversed_range() {
        let span = Span::new(10, 4);
        assert_eq!(span.start, 10);
        assert!(span.is_empty());
    }

    #[test]
    fn test_span_at_and_offset() {
        let span = Span::at(3, 5).offset_by(10);
        assert_eq!(span, Span::new(13, 18));
        assert_eq!(span.len(), 5);
        assert!(Span::new(0, 20).contains(span));
    }
}
