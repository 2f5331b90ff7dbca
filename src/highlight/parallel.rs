//! Multi-worker execution.
//!
//! Start hues are computed up front on the calling thread, so every work
//! item is independent and carries everything it needs. Results are read
//! back from the batch by submission index; completion order never matters.

use crate::error::Result;
use crate::highlight::hue::next_hue;
use crate::highlight::row::colorize_row;
use crate::pool::{Job, WorkerPool};
use crate::progress::{ProgressReporter, best_effort};
use crate::random::{RandomSource, XorShift64};
use crate::text::StyledText;
use std::time::Duration;

/// One row's worth of independent work.
#[derive(Clone, Debug)]
pub struct WorkItem {
    /// Position of the row in the input.
    pub row_index: usize,
    /// Hue of the row's first character.
    pub start_hue: f64,
    /// The row to colorize.
    pub row: StyledText,
    /// Per-character hue step.
    pub char_step: f64,
    /// Seed for the job's own random source.
    pub seed: u64,
}

impl WorkItem {
    /// Colorize the row.
    #[must_use]
    pub fn run(self) -> StyledText {
        let mut rng = XorShift64::new(self.seed);
        colorize_row(self.start_hue, self.row, self.char_step, &mut rng).0
    }
}

/// Build one work item per row, stepping the running `hue` by `row_step`.
///
/// Seeds are only drawn when `char_step` is non-finite, since a finite step
/// never consults the random source. This keeps the highlighter's stream
/// identical to a series run of the same input.
pub fn plan_work<R: RandomSource + ?Sized>(
    rows: Vec<StyledText>,
    hue: &mut f64,
    char_step: f64,
    row_step: f64,
    rng: &mut R,
) -> Vec<WorkItem> {
    let randomized = !char_step.is_finite();
    rows.into_iter()
        .enumerate()
        .map(|(row_index, row)| {
            let seed = if randomized { rng.next_u64() } else { 0 };
            let item = WorkItem {
                row_index,
                start_hue: *hue,
                row,
                char_step,
                seed,
            };
            *hue = next_hue(*hue, row_step, rng);
            item
        })
        .collect()
}

/// Run `items` on `pool` and return the colored rows in input order.
///
/// With a reporter attached, the calling thread wakes every
/// `poll_interval` to push the batch's completed count through
/// `set_completed`, then forces the terminal count once the batch is done.
/// Without one, it blocks once until the batch finishes.
pub fn execute_parallel<P: WorkerPool>(
    pool: &P,
    items: Vec<WorkItem>,
    poll_interval: Duration,
    reporter: Option<&mut dyn ProgressReporter>,
) -> Result<Vec<StyledText>> {
    let total = items.len();
    let jobs: Vec<Job<StyledText>> = items
        .into_iter()
        .map(|item| -> Job<StyledText> { Box::new(move || item.run()) })
        .collect();
    let batch = pool.submit_many(jobs)?;
    tracing::debug!(jobs = total, workers = pool.workers(), "batch submitted");

    match reporter {
        Some(reporter) => {
            while !batch.wait_timeout(poll_interval) {
                let completed = batch.completed_count();
                tracing::trace!(completed, total, "poll");
                best_effort("set_completed", reporter.set_completed(completed));
            }
            best_effort("set_completed", reporter.set_completed(total));
        }
        None => batch.block_until_done(),
    }

    batch.collect()
}
