//! Byte spans inside template text.

use std::fmt;
use std::ops::Range;

/// Byte range `[start, end)` inside a segment or interpolation template.
///
/// Template names are short, so `u32` offsets keep the span at 8 bytes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create from a byte range, saturating offsets beyond `u32::MAX`.
    #[inline]
    pub fn from_range(range: Range<usize>) -> Self {
        let start = u32::try_from(range.start).unwrap_or(u32::MAX);
        let end = u32::try_from(range.end).unwrap_or(u32::MAX);
        Span { start, end }
    }

    /// Zero-width span at `offset`.
    #[inline]
    pub fn point(offset: usize) -> Self {
        Span::from_range(offset..offset)
    }

    /// Shift both ends by `offset` (used when a sub-parser reports spans
    /// relative to a slice of the original text).
    #[inline]
    #[must_use]
    pub fn shifted(self, offset: usize) -> Self {
        let offset = u32::try_from(offset).unwrap_or(u32::MAX);
        Span {
            start: self.start.saturating_add(offset),
            end: self.end.saturating_add(offset),
        }
    }

    /// Merge two spans into one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Self {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The span as a `usize` range, for slicing.
    #[inline]
    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_and_merge() {
        let span = Span::new(2, 5).shifted(10);
        assert_eq!(span, Span::new(12, 15));
        assert_eq!(Span::new(1, 3).merge(Span::new(2, 8)), Span::new(1, 8));
    }

    #[test]
    fn test_to_range_slices_text() {
        let text = "{{ name }}";
        assert_eq!(&text[Span::new(3, 7).to_range()], "name");
    }
}
