//! ANSI rendering of styled text.

pub mod output;
pub mod sequences;

pub use output::AnsiWriter;
pub use sequences::*;

use crate::color::Rgb;
use crate::text::StyledText;
use std::io::{self, Write};

/// Color output mode for ANSI sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// True color (24-bit RGB).
    #[default]
    TrueColor,
    /// 256-color palette.
    Color256,
    /// 16-color (basic ANSI).
    Color16,
    /// No color output.
    NoColor,
}

/// Generate the SGR sequence selecting `color` as foreground.
#[must_use]
pub fn fg_color(color: Rgb, mode: ColorMode) -> String {
    let mut buf = Vec::with_capacity(20);
    let _ = write_fg_color(&mut buf, color, mode);
    String::from_utf8(buf).unwrap_or_default()
}

/// Write a u8 as decimal digits to a writer without formatting overhead.
#[inline]
fn write_u8_decimal(w: &mut impl Write, n: u8) -> io::Result<()> {
    if n >= 100 {
        w.write_all(&[b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10])
    } else if n >= 10 {
        w.write_all(&[b'0' + n / 10, b'0' + n % 10])
    } else {
        w.write_all(&[b'0' + n])
    }
}

/// Write the SGR sequence selecting `color` as foreground.
///
/// Writes nothing in [`ColorMode::NoColor`].
pub fn write_fg_color(w: &mut impl Write, color: Rgb, mode: ColorMode) -> io::Result<()> {
    match mode {
        ColorMode::TrueColor => {
            w.write_all(b"\x1b[38;2;")?;
            write_u8_decimal(w, color.r)?;
            w.write_all(b";")?;
            write_u8_decimal(w, color.g)?;
            w.write_all(b";")?;
            write_u8_decimal(w, color.b)?;
            w.write_all(b"m")
        }
        ColorMode::Color256 => {
            w.write_all(b"\x1b[38;5;")?;
            write_u8_decimal(w, color.to_256_color())?;
            w.write_all(b"m")
        }
        ColorMode::Color16 => {
            let idx = color.to_16_color();
            // 30-37 normal, 90-97 bright
            let code = if idx < 8 { 30 + idx } else { 90 + idx - 8 };
            w.write_all(b"\x1b[")?;
            write_u8_decimal(w, code)?;
            w.write_all(b"m")
        }
        ColorMode::NoColor => Ok(()),
    }
}

/// Render `text` to `writer`.
pub fn write_styled(writer: impl Write, text: &StyledText, mode: ColorMode) -> io::Result<()> {
    let mut out = AnsiWriter::with_color_mode(writer, mode);
    out.write_styled(text)?;
    out.finish()
}

/// Render `text` to a string.
#[must_use]
pub fn to_ansi_string(text: &StyledText, mode: ColorMode) -> String {
    let mut buf = Vec::with_capacity(text.plain().len() * 2);
    let _ = write_styled(&mut buf, text, mode);
    String::from_utf8(buf).unwrap_or_default()
}
