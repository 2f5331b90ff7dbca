//! Terminal queries for the output stream.
//!
//! Only stdout is inspected: the colorized text is written there, so its
//! width decides where rows wrap.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::io;

/// Check if stdout is attached to a terminal.
#[cfg(unix)]
#[must_use]
pub fn stdout_is_terminal() -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(libc::STDOUT_FILENO) == 1 }
}

/// Check if stdout is attached to a terminal.
#[cfg(not(unix))]
#[must_use]
pub fn stdout_is_terminal() -> bool {
    false
}

/// Get the width of the terminal attached to stdout, in columns.
///
/// Fails if stdout is not a terminal or reports zero columns.
#[cfg(unix)]
pub fn stdout_columns() -> io::Result<usize> {
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero columns",
        ))
    } else {
        Ok(usize::from(size.ws_col))
    }
}

/// Get the width of the terminal attached to stdout, in columns.
#[cfg(not(unix))]
pub fn stdout_columns() -> io::Result<usize> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "terminal size query is not supported on this platform",
    ))
}

/// Wrap width for output on stdout: the terminal width when stdout is a
/// terminal, otherwise `None`.
#[must_use]
pub fn stdout_wrap_width() -> Option<usize> {
    if !stdout_is_terminal() {
        return None;
    }
    match stdout_columns() {
        Ok(columns) => Some(columns),
        Err(err) => {
            tracing::debug!(error = %err, "terminal width unavailable, not wrapping");
            None
        }
    }
}
