//! Styled text and row splitting.
//!
//! Key types:
//!
//! - [`StyledText`]: Plain content plus character-indexed color spans
//! - [`Span`]: One colored character range
//! - [`LineWrapper`] / [`WidthWrapper`]: Display-width row splitting
//!
//! # Examples
//!
//! ```
//! use rainbow_highlight::{Rgb, StyledText};
//!
//! let mut text = StyledText::new("Hello\nworld");
//! text.stylize(0, 5, Rgb::RED);
//!
//! let rows = text.split_rows();
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].spans().len(), 1);
//!
//! let joined = StyledText::join(&rows, "\n");
//! assert_eq!(joined.plain(), "Hello\nworld");
//! ```

mod buffer;
mod segment;
mod wrap;

pub use buffer::StyledText;
pub use segment::Span;
pub use wrap::{LineWrapper, WidthWrapper, split_rows};
