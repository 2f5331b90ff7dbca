//! Fuzz target for highlighting.
//!
//! Arbitrary text, steps, and widths must never panic, and the output must
//! only differ from the input by inserted newlines.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rainbow_highlight::{
    ColorMode, ExecutionMode, HighlightOptions, Highlighter, StyledText, XorShift64, ansi,
};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a str,
    hue: u16,
    char_step: f64,
    row_step: f64,
    width: Option<u8>,
    parallel: bool,
    seed: u64,
}

fuzz_target!(|input: Input<'_>| {
    let mut options = HighlightOptions::new()
        .initial_hue(f64::from(input.hue) / 65_536.0)
        .char_step(input.char_step)
        .row_step(input.row_step)
        .cpu_count(2)
        .mode(if input.parallel {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Series
        });
    if let Some(width) = input.width.filter(|w| *w > 0) {
        options = options.display_width(usize::from(width));
    }

    let Ok(mut highlighter) =
        Highlighter::with_random_source(options, XorShift64::new(input.seed))
    else {
        return;
    };
    let out = highlighter
        .highlight(StyledText::new(input.text))
        .expect("highlighting failed");

    let strip = |s: &str| s.chars().filter(|c| *c != '\n').collect::<String>();
    assert_eq!(strip(out.plain()), strip(input.text));
    assert!(out.spans().iter().all(|s| s.len() == 1 && s.end() <= out.len()));

    let _ = ansi::to_ansi_string(&out, ColorMode::Color256);
});
