//! Buffered ANSI output writer with color state tracking.

use crate::ansi::{self, ColorMode};
use crate::color::Rgb;
use crate::text::StyledText;
use std::io::{self, Write};

const FLUSH_THRESHOLD: usize = 64 * 1024;

/// Buffered writer that emits a color sequence only when the color changes.
///
/// Color is reset before every newline and at [`finish`](Self::finish), so
/// each output line stands on its own when piped or truncated.
pub struct AnsiWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,
    color_mode: ColorMode,
    current_fg: Option<Rgb>,
}

impl<W: Write> AnsiWriter<W> {
    /// Create a writer with the specified color mode.
    pub fn with_color_mode(writer: W, color_mode: ColorMode) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(8192),
            color_mode,
            current_fg: None,
        }
    }

    /// Set the foreground color, or clear it with `None`.
    pub fn set_fg(&mut self, color: Option<Rgb>) {
        if self.color_mode == ColorMode::NoColor || self.current_fg == color {
            return;
        }
        match color {
            Some(color) => {
                let _ = ansi::write_fg_color(&mut self.buffer, color, self.color_mode);
            }
            None => self.buffer.extend_from_slice(ansi::RESET.as_bytes()),
        }
        self.current_fg = color;
    }

    /// Write every character of `text` in its span color.
    ///
    /// Characters without a span are written uncolored.
    pub fn write_styled(&mut self, text: &StyledText) -> io::Result<()> {
        let colors = text.char_colors();
        let mut utf8 = [0u8; 4];
        for (c, color) in text.plain().chars().zip(colors) {
            if c == '\n' {
                self.set_fg(None);
                self.buffer.push(b'\n');
                if self.buffer.len() >= FLUSH_THRESHOLD {
                    self.flush()?;
                }
                continue;
            }
            self.set_fg(color);
            self.buffer
                .extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
        }
        if self.buffer.len() >= FLUSH_THRESHOLD {
            self.flush()?;
        }
        Ok(())
    }

    /// Reset color and flush everything to the underlying writer.
    pub fn finish(&mut self) -> io::Result<()> {
        self.set_fg(None);
        self.flush()
    }

    /// Flush the buffer to the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.buffer)?;
        self.buffer.clear();
        self.writer.flush()
    }

    /// Get the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &StyledText, mode: ColorMode) -> String {
        let mut out = AnsiWriter::with_color_mode(Vec::new(), mode);
        out.write_styled(text).unwrap();
        out.finish().unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_color_emitted_once_per_run() {
        let mut text = StyledText::new("aab");
        text.stylize(0, 2, Rgb::RED);
        text.stylize(2, 3, Rgb::BLUE);
        assert_eq!(
            render(&text, ColorMode::TrueColor),
            "\x1b[38;2;255;0;0maa\x1b[38;2;0;0;255mb\x1b[0m"
        );
    }

    #[test]
    fn test_reset_before_newline() {
        let mut text = StyledText::new("a\nb");
        text.stylize(0, 1, Rgb::RED);
        text.stylize(2, 3, Rgb::RED);
        assert_eq!(
            render(&text, ColorMode::TrueColor),
            "\x1b[38;2;255;0;0ma\x1b[0m\n\x1b[38;2;255;0;0mb\x1b[0m"
        );
    }

    #[test]
    fn test_uncolored_text_has_no_sequences() {
        let text = StyledText::new("plain\ntext");
        assert_eq!(render(&text, ColorMode::TrueColor), "plain\ntext");
    }

    #[test]
    fn test_gap_resets_color() {
        let mut text = StyledText::new("abc");
        text.stylize(0, 1, Rgb::GREEN);
        text.stylize(2, 3, Rgb::GREEN);
        assert_eq!(
            render(&text, ColorMode::TrueColor),
            "\x1b[38;2;0;255;0ma\x1b[0mb\x1b[38;2;0;255;0mc\x1b[0m"
        );
    }

    #[test]
    fn test_256_mode() {
        let mut text = StyledText::new("x");
        text.stylize(0, 1, Rgb::RED);
        assert_eq!(render(&text, ColorMode::Color256), "\x1b[38;5;196mx\x1b[0m");
    }

    #[test]
    fn test_multibyte_chars() {
        let mut text = StyledText::new("日本");
        text.stylize(1, 2, Rgb::BLUE);
        assert_eq!(
            render(&text, ColorMode::TrueColor),
            "日\x1b[38;2;0;0;255m本\x1b[0m"
        );
    }
}
