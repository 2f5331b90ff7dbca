//! Styled text buffer: plain content plus colored spans.
//!
//! [`StyledText`] is the unit the highlighter consumes and produces. Offsets
//! are character offsets so a span always covers whole `char`s regardless of
//! their UTF-8 length.

use crate::color::Rgb;
use crate::text::segment::Span;
use std::iter;
use std::ops::Range;

/// Plain text with an ordered list of colored spans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledText {
    plain: String,
    spans: Vec<Span>,
    /// Cached character length.
    length: usize,
}

impl StyledText {
    /// Create unstyled text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let plain: String = text.into();
        let length = plain.chars().count();
        Self {
            plain,
            spans: Vec::new(),
            length,
        }
    }

    /// Create text with existing spans. Spans are clamped to the text length.
    #[must_use]
    pub fn with_spans(text: impl Into<String>, spans: impl IntoIterator<Item = Span>) -> Self {
        let mut styled = Self::new(text);
        for span in spans {
            styled.stylize(span.start(), span.end(), span.color);
        }
        styled
    }

    /// The plain text content.
    #[must_use]
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// The spans, in the order they were applied.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Length in characters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Check if the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    /// Color the character range `start..end`, clamped to the text.
    pub fn stylize(&mut self, start: usize, end: usize, color: Rgb) {
        let start = start.min(self.length);
        let end = end.min(self.length);
        if start < end {
            self.spans.push(Span::new(start, end, color));
        }
    }

    /// Remove all spans, keeping the content.
    pub fn clear_spans(&mut self) {
        self.spans.clear();
    }

    /// Reserve room for `additional` more spans.
    pub fn reserve_spans(&mut self, additional: usize) {
        self.spans.reserve(additional);
    }

    /// Append plain text.
    pub fn append(&mut self, text: &str) {
        self.plain.push_str(text);
        self.length += text.chars().count();
    }

    /// Append another styled text, shifting its spans.
    pub fn append_text(&mut self, other: &Self) {
        let offset = self.length;
        self.plain.push_str(&other.plain);
        self.length += other.length;
        self.spans
            .extend(other.spans.iter().map(|span| span.shifted(offset)));
    }

    /// Join items with `separator` between each pair.
    ///
    /// The separator is unstyled.
    #[must_use]
    pub fn join<'a, I>(items: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut result = Self::default();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                result.append(separator);
            }
            result.append_text(item);
        }
        result
    }

    /// Join owned items, reusing the first item's allocations.
    #[must_use]
    pub fn join_owned(items: Vec<Self>, separator: &str) -> Self {
        let mut items = items.into_iter();
        let Some(mut result) = items.next() else {
            return Self::default();
        };
        for item in items {
            result.append(separator);
            result.append_text(&item);
        }
        result
    }

    /// Character ranges of the lines separated by `'\n'`.
    ///
    /// A trailing newline produces a trailing empty range, so joining the
    /// lines back with `"\n"` restores the content exactly. Empty text has
    /// no lines.
    #[must_use]
    pub fn line_ranges(&self) -> Vec<Range<usize>> {
        line_ranges(&self.plain)
    }

    /// Split on `'\n'` into rows, carrying clipped spans into each row.
    #[must_use]
    pub fn split_rows(&self) -> Vec<Self> {
        self.pieces(&self.line_ranges())
    }

    /// Copy out several character ranges at once.
    ///
    /// `ranges` must be sorted and non-overlapping and within the text. Each
    /// span is assigned to the pieces it intersects by binary search, so the
    /// cost stays linear in content plus spans.
    #[must_use]
    pub fn pieces(&self, ranges: &[Range<usize>]) -> Vec<Self> {
        let boundaries: Vec<usize> = ranges.iter().flat_map(|r| [r.start, r.end]).collect();
        let bytes = self.char_to_byte_many(&boundaries);

        let mut pieces: Vec<Self> = ranges
            .iter()
            .zip(bytes.chunks_exact(2))
            .map(|(range, b)| Self {
                plain: self.plain[b[0]..b[1]].to_string(),
                spans: Vec::new(),
                length: range.end - range.start,
            })
            .collect();

        for span in &self.spans {
            let first = ranges.partition_point(|r| r.end <= span.start());
            for (range, piece) in ranges[first..].iter().zip(&mut pieces[first..]) {
                if range.start >= span.end() {
                    break;
                }
                if let Some(clipped) = span.clip_to(range) {
                    piece.spans.push(clipped);
                }
            }
        }

        pieces
    }

    /// Resolve the effective color of every character.
    ///
    /// Later spans win over earlier ones.
    #[must_use]
    pub fn char_colors(&self) -> Vec<Option<Rgb>> {
        let mut colors = vec![None; self.length];
        for span in &self.spans {
            let end = span.end().min(self.length);
            if span.start() < end {
                colors[span.start()..end].fill(Some(span.color));
            }
        }
        colors
    }

    /// Map nondecreasing character positions to byte offsets in one pass.
    fn char_to_byte_many(&self, positions: &[usize]) -> Vec<usize> {
        let end = self.plain.len();
        let mut bytes = self
            .plain
            .char_indices()
            .map(|(b, _)| b)
            .chain(iter::once(end));
        let mut char_idx = 0usize;
        let mut byte = bytes.next().unwrap_or(end);

        let mut out = Vec::with_capacity(positions.len());
        for &pos in positions {
            while char_idx < pos {
                byte = bytes.next().unwrap_or(end);
                char_idx += 1;
            }
            out.push(byte);
        }
        out
    }
}

/// Character ranges of the `'\n'`-separated lines of `text`.
pub(crate) fn line_ranges(text: &str) -> Vec<Range<usize>> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut ranges = Vec::new();
    let mut start = 0usize;
    let mut count = 0usize;
    for (i, c) in text.chars().enumerate() {
        if c == '\n' {
            ranges.push(start..i);
            start = i + 1;
        }
        count = i + 1;
    }
    ranges.push(start..count);
    ranges
}

impl From<&str> for StyledText {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StyledText {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
