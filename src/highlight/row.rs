//! Per-row colorization.

use crate::color::Rgb;
use crate::highlight::hue::next_hue;
use crate::random::RandomSource;
use crate::text::StyledText;

/// Color every character of `row` starting at `hue`.
///
/// Character `i` gets a one-character span colored by `hue` at full
/// saturation and value; the hue then steps by `char_step`. Spans already
/// on the row are discarded and the content is left untouched.
///
/// Returns the colored row and the hue after the last character.
pub fn colorize_row<R: RandomSource + ?Sized>(
    hue: f64,
    mut row: StyledText,
    char_step: f64,
    rng: &mut R,
) -> (StyledText, f64) {
    let len = row.len();
    row.clear_spans();
    row.reserve_spans(len);

    let mut hue = hue;
    for i in 0..len {
        row.stylize(i, i + 1, Rgb::from_hsv(hue, 1.0, 1.0));
        hue = next_hue(hue, char_step, rng);
    }
    (row, hue)
}
