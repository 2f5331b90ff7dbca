//! Unicode utilities for display width.

mod width;

pub use width::{WidthMethod, display_width, display_width_char, grapheme_width};
