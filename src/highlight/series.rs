//! Single-threaded execution.

use crate::highlight::hue::next_hue;
use crate::highlight::row::colorize_row;
use crate::progress::{ProgressReporter, best_effort};
use crate::random::RandomSource;
use crate::text::StyledText;

/// Colorize `rows` in order on the calling thread.
///
/// Each row starts at the running `hue`, which then steps by `row_step`.
/// The hue reached at the end of a row does not carry into the next one.
/// With a reporter attached, every finished row advances it by one.
pub fn execute_series<R: RandomSource + ?Sized>(
    rows: Vec<StyledText>,
    hue: &mut f64,
    char_step: f64,
    row_step: f64,
    rng: &mut R,
    mut reporter: Option<&mut dyn ProgressReporter>,
) -> Vec<StyledText> {
    let mut colored = Vec::with_capacity(rows.len());
    for row in rows {
        let (row, _) = colorize_row(*hue, row, char_step, rng);
        colored.push(row);
        *hue = next_hue(*hue, row_step, rng);
        if let Some(reporter) = reporter.as_deref_mut() {
            best_effort("advance", reporter.advance(1));
        }
    }
    colored
}
