//! Constant ANSI escape sequences.

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Clear entire line.
pub const CLEAR_LINE: &str = "\x1b[2K";
