//! Rainbow colorization.
//!
//! A [`Highlighter`] splits text into rows, gives every character a
//! one-character span whose hue rotates along the row, and offsets each
//! row's starting hue from the previous one. Large inputs are spread across
//! a worker pool one row per job; results are reassembled in input order.
//!
//! # Examples
//!
//! ```
//! use rainbow_highlight::{HighlightOptions, Highlighter, Rgb, StyledText};
//!
//! let options = HighlightOptions::new().initial_hue(0.5);
//! let mut highlighter = Highlighter::new(options)?;
//!
//! let text = highlighter.highlight(StyledText::new("hello\nworld"))?;
//! assert_eq!(text.plain(), "hello\nworld");
//! assert_eq!(text.spans().len(), 10);
//! assert_eq!(text.spans()[0].color, Rgb::new(0, 255, 255));
//! # Ok::<(), rainbow_highlight::Error>(())
//! ```

mod highlighter;
mod hue;
mod parallel;
mod row;
mod series;
mod strategy;

pub use highlighter::{HighlightOptions, Highlighter};
pub use hue::next_hue;
pub use parallel::{WorkItem, execute_parallel, plan_work};
pub use row::colorize_row;
pub use series::execute_series;
pub use strategy::{
    ExecutionMode, LARGE_INPUT_CHARS, PARALLEL_MIN_CHARS, Strategy, available_cpus, choose,
};
