//! 24-bit RGB color type and HSV conversion.
//!
//! This module provides the [`Rgb`] type used for every character span the
//! highlighter produces. It supports:
//!
//! - **HSV conversion**: Hue on the unit circle `[0, 1)`, as walked by the
//!   hue sequencer
//! - **Palette reduction**: To 256-color and 16-color terminal palettes for
//!   terminals without true color
//!
//! # Examples
//!
//! ```
//! use rainbow_highlight::Rgb;
//!
//! let cyan = Rgb::from_hsv(0.5, 1.0, 1.0);
//! assert_eq!(cyan, Rgb::new(0, 255, 255));
//! assert_eq!(cyan.to_string(), "rgb(0,255,255)");
//! ```

use std::fmt;

/// Opaque 8-bit-per-channel color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure red.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Pure green.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Pure blue.
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Create a color from 8-bit components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from HSV values.
    ///
    /// - h: Hue on the unit circle, wraps outside `[0, 1)`
    /// - s: Saturation [0, 1]
    /// - v: Value [0, 1]
    ///
    /// Channels are quantized by truncating `channel * 255` after clamping
    /// to `[0, 255]`.
    #[must_use]
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let (r, g, b) = hsv_to_rgb(h, s, v);
        Self::new(quantize(r), quantize(g), quantize(b))
    }

    /// Convert to a `(r, g, b)` tuple.
    #[must_use]
    pub const fn to_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Convert to nearest 256-color palette index.
    ///
    /// Uses the 6x6x6 color cube (colors 16-231) or grayscale ramp (232-255)
    /// depending on which provides the closest match.
    #[must_use]
    pub fn to_256_color(self) -> u8 {
        let (r, g, b) = self.to_tuple();

        let gray = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
        let is_grayscale = (i16::from(r) - i16::from(gray)).abs() < 10
            && (i16::from(g) - i16::from(gray)).abs() < 10
            && (i16::from(b) - i16::from(gray)).abs() < 10;

        if is_grayscale {
            // 232-255 = 24 levels: 8, 18, 28, ..., 238
            let gray_idx = (u16::from(gray) * 24 / 256) as u8;
            return 232 + gray_idx.min(23);
        }

        let ri = nearest_cube_index(r);
        let gi = nearest_cube_index(g);
        let bi = nearest_cube_index(b);

        16 + 36 * ri + 6 * gi + bi
    }

    /// Convert to nearest 16-color (basic ANSI) palette index.
    ///
    /// 0-7 are the normal colors, 8-15 their bright versions.
    #[must_use]
    pub fn to_16_color(self) -> u8 {
        #[rustfmt::skip]
        const PALETTE: [(i32, i32, i32); 16] = [
            (0, 0, 0),       // 0 Black
            (128, 0, 0),     // 1 Red
            (0, 128, 0),     // 2 Green
            (128, 128, 0),   // 3 Yellow
            (0, 0, 128),     // 4 Blue
            (128, 0, 128),   // 5 Magenta
            (0, 128, 128),   // 6 Cyan
            (192, 192, 192), // 7 White
            (128, 128, 128), // 8 Bright Black
            (255, 0, 0),     // 9 Bright Red
            (0, 255, 0),     // 10 Bright Green
            (255, 255, 0),   // 11 Bright Yellow
            (0, 0, 255),     // 12 Bright Blue
            (255, 0, 255),   // 13 Bright Magenta
            (0, 255, 255),   // 14 Bright Cyan
            (255, 255, 255), // 15 Bright White
        ];

        let r = i32::from(self.r);
        let g = i32::from(self.g);
        let b = i32::from(self.b);

        let mut best_idx = 0;
        let mut min_dist = i32::MAX;
        for (i, &(pr, pg, pb)) in PALETTE.iter().enumerate() {
            let (dr, dg, db) = (r - pr, g - pg, b - pb);
            let dist = dr * dr + dg * dg + db * db;
            if dist < min_dist {
                min_dist = dist;
                best_idx = i;
            }
        }

        best_idx as u8
    }
}

/// Convert HSV to floating-point RGB channels in `[0, 1]`.
///
/// Hue is on the unit circle; values outside `[0, 1)` wrap.
#[must_use]
#[allow(clippy::many_single_char_names)]
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s <= 0.0 {
        return (v, v, v);
    }

    let h = h.rem_euclid(1.0) * 6.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * s.mul_add(-f, 1.0);
    let t = v * s.mul_add(f - 1.0, 1.0);

    match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[inline]
fn quantize(channel: f64) -> u8 {
    (channel * 255.0).clamp(0.0, 255.0) as u8
}

/// Nearest index in the 6x6x6 cube for a component value.
///
/// Cube values are [0, 95, 135, 175, 215, 255], boundaries at the midpoints.
#[inline]
fn nearest_cube_index(val: u8) -> u8 {
    match val {
        0..=47 => 0,
        48..=114 => 1,
        115..=154 => 2,
        155..=194 => 3,
        195..=234 => 4,
        _ => 5,
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}
