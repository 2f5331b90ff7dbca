//! `rainbow_highlight` - Rainbow text colorization
//!
//! Gives every character of a text its own color, rotating the hue along
//! each row and offsetting it from one row to the next. Large inputs are
//! colorized on a worker pool with live progress reporting.
//!
//! ```
//! use rainbow_highlight::{ColorMode, HighlightOptions, Highlighter, StyledText, ansi};
//!
//! let mut highlighter = Highlighter::new(HighlightOptions::new().initial_hue(0.0))?;
//! let text = highlighter.highlight(StyledText::new("taste the rainbow"))?;
//! print!("{}", ansi::to_ansi_string(&text, ColorMode::TrueColor));
//! # Ok::<(), rainbow_highlight::Error>(())
//! ```

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Intentional quantization casts
#![allow(clippy::cast_sign_loss)] // Clamped before casting
#![allow(clippy::cast_precision_loss)] // Intentional for color and progress math
#![allow(clippy::module_name_repetitions)] // Allow highlight::Highlighter etc
#![allow(clippy::missing_errors_doc)] // Error variants are documented on the enum
#![allow(clippy::missing_panics_doc)] // Non-test code does not panic
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::float_cmp)] // Hue equality is exact in tests
#![allow(clippy::needless_pass_by_value)] // Rows are moved into jobs
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod ansi;
pub mod color;
pub mod error;
pub mod highlight;
pub mod pool;
pub mod progress;
pub mod random;
pub mod terminal;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use color::Rgb;
pub use error::{Error, ProgressError, Result};
pub use text::{LineWrapper, Span, StyledText, WidthWrapper};

// Re-export highlighting
pub use highlight::{
    ExecutionMode, HighlightOptions, Highlighter, Strategy, available_cpus, choose,
    colorize_row, next_hue,
};

// Re-export collaborators
pub use ansi::ColorMode;
pub use pool::{Batch, ThreadPool, WorkerPool};
pub use progress::{ProgressBar, ProgressReporter};
pub use random::{RandomSource, XorShift64};
pub use unicode::WidthMethod;
