//! Progress reporting.
//!
//! The highlighter drives a [`ProgressReporter`] from the thread that called
//! it, and only through the four update methods. Reporter failures never
//! abort colorization: they are logged at `warn` and ignored.
//!
//! [`ProgressBar`] is a terminal reporter that redraws a single line:
//!
//! ```text
//! Colorizing (parallel) [##########----------]  50% (3/6) 00:04
//! ```

use crate::ansi::CLEAR_LINE;
use crate::error::ProgressError;
use std::io::Write;
use std::time::{Duration, Instant};

/// Receives progress updates for a colorization run.
pub trait ProgressReporter {
    /// Set the total number of work units.
    fn set_total(&mut self, total: usize) -> Result<(), ProgressError>;

    /// Mark `n` more units as completed.
    fn advance(&mut self, n: usize) -> Result<(), ProgressError>;

    /// Set the absolute number of completed units.
    fn set_completed(&mut self, completed: usize) -> Result<(), ProgressError>;

    /// Set the human-readable description.
    fn set_label(&mut self, label: &str) -> Result<(), ProgressError>;
}

/// Log a failed reporter update and carry on.
pub(crate) fn best_effort(update: &'static str, result: Result<(), ProgressError>) {
    if let Err(err) = result {
        tracing::warn!(update, error = %err, "progress reporter update failed");
    }
}

const BAR_WIDTH: usize = 30;
const DEFAULT_REFRESH: Duration = Duration::from_millis(250);

/// Single-line terminal progress bar.
///
/// Redraws are throttled to the refresh interval, except that reaching the
/// total and label changes always redraw.
pub struct ProgressBar<W: Write> {
    writer: W,
    label: String,
    total: Option<usize>,
    completed: usize,
    started: Instant,
    last_draw: Option<Instant>,
    refresh: Duration,
}

impl<W: Write> ProgressBar<W> {
    /// Create a progress bar drawing to `writer`.
    pub fn new(writer: W, label: impl Into<String>) -> Self {
        Self {
            writer,
            label: label.into(),
            total: None,
            completed: 0,
            started: Instant::now(),
            last_draw: None,
            refresh: DEFAULT_REFRESH,
        }
    }

    /// Set the minimum time between redraws.
    #[must_use]
    pub const fn refresh_interval(mut self, refresh: Duration) -> Self {
        self.refresh = refresh;
        self
    }

    /// Completed units so far.
    #[must_use]
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Total units, if known.
    #[must_use]
    pub const fn total(&self) -> Option<usize> {
        self.total
    }

    /// Current label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Draw the final state and end the line.
    pub fn finish(&mut self) -> Result<(), ProgressError> {
        self.draw()?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the bar, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn is_complete(&self) -> bool {
        self.total.is_some_and(|total| self.completed >= total)
    }

    fn maybe_draw(&mut self) -> Result<(), ProgressError> {
        let due = self
            .last_draw
            .is_none_or(|last| last.elapsed() >= self.refresh);
        if due || self.is_complete() {
            self.draw()?;
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<(), ProgressError> {
        let line = self.render_line();
        self.writer.write_all(b"\r")?;
        self.writer.write_all(CLEAR_LINE.as_bytes())?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        self.last_draw = Some(Instant::now());
        Ok(())
    }

    fn render_line(&self) -> String {
        let elapsed = self.started.elapsed().as_secs();
        let clock = format!("{:02}:{:02}", elapsed / 60, elapsed % 60);
        match self.total {
            Some(total) => {
                let ratio = if total == 0 {
                    1.0
                } else {
                    (self.completed as f64 / total as f64).clamp(0.0, 1.0)
                };
                let filled = (ratio * BAR_WIDTH as f64).round() as usize;
                format!(
                    "{} [{}{}] {:>3}% ({}/{}) {}",
                    self.label,
                    "#".repeat(filled),
                    "-".repeat(BAR_WIDTH - filled),
                    (ratio * 100.0).floor() as u32,
                    self.completed.min(total),
                    total,
                    clock
                )
            }
            None => format!("{} ({}) {}", self.label, self.completed, clock),
        }
    }
}

impl<W: Write> ProgressReporter for ProgressBar<W> {
    fn set_total(&mut self, total: usize) -> Result<(), ProgressError> {
        self.total = Some(total);
        self.maybe_draw()
    }

    fn advance(&mut self, n: usize) -> Result<(), ProgressError> {
        self.completed = self.completed.saturating_add(n);
        self.maybe_draw()
    }

    fn set_completed(&mut self, completed: usize) -> Result<(), ProgressError> {
        self.completed = completed;
        self.maybe_draw()
    }

    fn set_label(&mut self, label: &str) -> Result<(), ProgressError> {
        label.clone_into(&mut self.label);
        self.draw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn output(bar: ProgressBar<Vec<u8>>) -> String {
        String::from_utf8(bar.into_inner()).unwrap()
    }

    #[test]
    fn test_render_half() {
        let mut bar = ProgressBar::new(Vec::new(), "Colorizing").refresh_interval(Duration::ZERO);
        bar.set_total(4).unwrap();
        bar.set_completed(2).unwrap();
        let out = output(bar);
        let last = out.rsplit('\r').next().unwrap();
        assert!(last.contains("Colorizing ["));
        assert!(last.contains(" 50% (2/4)"));
        assert!(last.contains(&format!("{}{}", "#".repeat(15), "-".repeat(15))));
    }

    #[test]
    fn test_advance_accumulates() {
        let mut bar = ProgressBar::new(Vec::new(), "x");
        bar.set_total(10).unwrap();
        bar.advance(1).unwrap();
        bar.advance(2).unwrap();
        assert_eq!(bar.completed(), 3);
        assert_eq!(bar.total(), Some(10));
    }

    #[test]
    fn test_throttles_redraws() {
        let mut bar = ProgressBar::new(Vec::new(), "x").refresh_interval(Duration::from_secs(60));
        bar.set_total(100).unwrap();
        for _ in 0..50 {
            bar.advance(1).unwrap();
        }
        let out = output(bar);
        // Only the initial draw; 50/100 is not complete.
        assert_eq!(out.matches('\r').count(), 1);
    }

    #[test]
    fn test_completion_always_draws() {
        let mut bar = ProgressBar::new(Vec::new(), "x").refresh_interval(Duration::from_secs(60));
        bar.set_total(2).unwrap();
        bar.set_completed(2).unwrap();
        let out = output(bar);
        assert!(out.rsplit('\r').next().unwrap().contains("100% (2/2)"));
    }

    #[test]
    fn test_label_change_redraws() {
        let mut bar = ProgressBar::new(Vec::new(), "Colorizing").refresh_interval(Duration::from_secs(60));
        bar.set_total(3).unwrap();
        bar.set_label("Colorizing (series)").unwrap();
        assert_eq!(bar.label(), "Colorizing (series)");
        let out = output(bar);
        assert!(out.rsplit('\r').next().unwrap().starts_with(CLEAR_LINE));
        assert!(out.contains("Colorizing (series) ["));
    }

    #[test]
    fn test_unknown_total() {
        let mut bar = ProgressBar::new(Vec::new(), "Counting");
        bar.advance(5).unwrap();
        let out = output(bar);
        assert!(out.contains("Counting (5)"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_io_failure_surfaces_as_progress_error() {
        let mut bar = ProgressBar::new(FailingWriter, "x");
        let err = bar.set_label("y").unwrap_err();
        assert!(err.to_string().contains("closed"));
    }
}
