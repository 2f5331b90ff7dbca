//! Colored spans over styled text.

use crate::color::Rgb;
use std::ops::Range;

/// A character range with an associated color.
///
/// Ranges are in character (not byte) offsets of the owning
/// [`StyledText`](super::StyledText). Later spans take precedence where
/// spans overlap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// Character range in the owning text.
    pub range: Range<usize>,
    /// Foreground color applied to the range.
    pub color: Rgb,
}

impl Span {
    /// Create a new span. A reversed range is normalized.
    #[must_use]
    pub fn new(start: usize, end: usize, color: Rgb) -> Self {
        Self {
            range: start.min(end)..end.max(start),
            color,
        }
    }

    /// Start offset (inclusive).
    #[must_use]
    pub const fn start(&self) -> usize {
        self.range.start
    }

    /// End offset (exclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        self.range.end
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    /// Shift right by `offset`.
    #[must_use]
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            range: self.range.start + offset..self.range.end + offset,
            color: self.color,
        }
    }

    /// Clip to `window` and rebase so `window.start` becomes 0.
    ///
    /// Returns `None` when the span does not intersect the window.
    #[must_use]
    pub fn clip_to(&self, window: &Range<usize>) -> Option<Self> {
        let start = self.range.start.max(window.start);
        let end = self.range.end.min(window.end);
        (start < end).then(|| Self {
            range: start - window.start..end - window.start,
            color: self.color,
        })
    }
}
