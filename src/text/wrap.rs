//! Splitting text into display rows.
//!
//! Rows are returned as character ranges over the source text. Between two
//! consecutive ranges there is either nothing (a wrap point) or exactly one
//! `'\n'` (a source line break), so joining the rows with `"\n"` reproduces
//! the source plus one newline per wrap point. No character is ever dropped:
//! whitespace at a wrap point stays at the end of the row it follows.

use crate::text::buffer::line_ranges;
use crate::unicode::{WidthMethod, grapheme_width};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Splits text into rows no wider than a column budget.
pub trait LineWrapper {
    /// Character ranges of the rows of `text` wrapped at `width` columns.
    fn wrap(&self, text: &str, width: usize) -> Vec<Range<usize>>;
}

/// Word-preferring wrapper measuring terminal display width.
///
/// Breaks after the last whitespace that fits, falling back to a hard break
/// at a grapheme boundary for words longer than the width. Whitespace is
/// allowed to hang past the width rather than start the next row.
#[derive(Clone, Copy, Debug)]
pub struct WidthWrapper {
    method: WidthMethod,
    tab_width: usize,
}

impl Default for WidthWrapper {
    fn default() -> Self {
        Self {
            method: WidthMethod::default(),
            tab_width: 8,
        }
    }
}

impl WidthWrapper {
    /// Create a wrapper with the default width method and 8-column tabs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width method for ambiguous-width characters.
    #[must_use]
    pub const fn width_method(mut self, method: WidthMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the tab stop interval.
    #[must_use]
    pub const fn tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    fn wrap_line(&self, line: &str, line_start: usize, width: usize, rows: &mut Vec<Range<usize>>) {
        let mut row_start = line_start;
        let mut column = 0usize;
        // (char offset just after whitespace, column at that point)
        let mut last_break: Option<(usize, usize)> = None;
        let mut pos = line_start;

        for grapheme in line.graphemes(true) {
            let chars = grapheme.chars().count();
            let is_ws = grapheme.chars().all(char::is_whitespace);
            let g_width = grapheme_width(grapheme, column, self.tab_width, self.method);

            if !is_ws {
                while column > 0 && column + g_width > width {
                    match last_break.take() {
                        Some((at, at_column)) if at > row_start => {
                            rows.push(row_start..at);
                            row_start = at;
                            column -= at_column;
                        }
                        _ => {
                            rows.push(row_start..pos);
                            row_start = pos;
                            column = 0;
                        }
                    }
                }
            }

            column += g_width;
            pos += chars;
            if is_ws {
                last_break = Some((pos, column));
            }
        }

        rows.push(row_start..pos);
    }
}

impl LineWrapper for WidthWrapper {
    fn wrap(&self, text: &str, width: usize) -> Vec<Range<usize>> {
        let width = width.max(1);
        let mut rows = Vec::new();
        let mut lines = text.split('\n');
        for range in line_ranges(text) {
            let line = lines.next().unwrap_or_default();
            self.wrap_line(line, range.start, width, &mut rows);
        }
        rows
    }
}

/// Rows split only at `'\n'`.
#[must_use]
pub fn split_rows(text: &str) -> Vec<Range<usize>> {
    line_ranges(text)
}
