//! Completion tracking for one submitted batch of jobs.
//!
//! A [`Batch`] is created together with one [`Ticket`] per job. Pools hand
//! each ticket to whichever worker runs the job; the ticket records the
//! outcome in its slot and decrements the batch's remaining counter. The
//! submitting thread observes progress only through the batch.

use crate::error::{Error, Result};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// A unit of work returning `T`.
pub type Job<T> = Box<dyn FnOnce() -> T + Send + 'static>;

type Outcome<T> = std::result::Result<T, String>;

struct Shared<T> {
    remaining: AtomicUsize,
    slots: Mutex<Vec<Option<Outcome<T>>>>,
    done: Condvar,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle for a submitted batch of jobs.
///
/// Results are stored by submission index, so [`collect`](Self::collect)
/// returns them in submission order regardless of completion order.
pub struct Batch<T> {
    shared: Arc<Shared<T>>,
    len: usize,
}

/// Completion slot for a single job of a [`Batch`].
///
/// A ticket dropped without running records a failure, so a batch can never
/// wait on a job that was lost.
pub struct Ticket<T> {
    shared: Arc<Shared<T>>,
    index: usize,
    finished: bool,
}

impl<T> Batch<T> {
    /// Create a batch of `len` jobs and the tickets that complete it.
    #[must_use]
    pub fn new(len: usize) -> (Self, Vec<Ticket<T>>) {
        let shared = Arc::new(Shared {
            remaining: AtomicUsize::new(len),
            slots: Mutex::new((0..len).map(|_| None).collect()),
            done: Condvar::new(),
        });
        let tickets = (0..len)
            .map(|index| Ticket {
                shared: Arc::clone(&shared),
                index,
                finished: false,
            })
            .collect();
        (Self { shared, len }, tickets)
    }

    /// Number of jobs in the batch.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the batch has no jobs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of jobs not yet completed.
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.shared.remaining.load(Ordering::Acquire)
    }

    /// Number of jobs completed, successfully or not.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.len - self.remaining_count()
    }

    /// Check if every job has completed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.remaining_count() == 0
    }

    /// Block until every job has completed.
    pub fn block_until_done(&self) {
        let mut slots = lock(&self.shared.slots);
        while self.shared.remaining.load(Ordering::Acquire) > 0 {
            slots = self
                .shared
                .done
                .wait(slots)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Block until every job has completed or `timeout` elapses.
    ///
    /// Returns `true` if the batch is done. A timeout too large to form a
    /// deadline waits without one.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.block_until_done();
            return true;
        };
        let mut slots = lock(&self.shared.slots);
        loop {
            if self.shared.remaining.load(Ordering::Acquire) == 0 {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            slots = self
                .shared
                .done
                .wait_timeout(slots, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// Wait for completion and return results in submission order.
    ///
    /// If any job failed, returns [`Error::WorkerFailure`] for the lowest
    /// failing index; no partial results are returned.
    pub fn collect(self) -> Result<Vec<T>> {
        self.block_until_done();
        let slots = std::mem::take(&mut *lock(&self.shared.slots));

        let mut results = Vec::with_capacity(slots.len());
        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(Ok(value)) => results.push(value),
                Some(Err(message)) => return Err(Error::WorkerFailure { row: index, message }),
                None => {
                    return Err(Error::WorkerFailure {
                        row: index,
                        message: "job produced no result".to_string(),
                    });
                }
            }
        }
        Ok(results)
    }
}

impl<T> Ticket<T> {
    /// Submission index of this ticket's job.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Run `job`, catching panics, and record its outcome.
    pub fn run(mut self, job: Job<T>) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(job)).map_err(|payload| {
            let message = panic_message(payload.as_ref());
            tracing::warn!(job = self.index, %message, "job panicked");
            message
        });
        self.finish(outcome);
    }

    fn finish(&mut self, outcome: Outcome<T>) {
        if self.finished {
            return;
        }
        self.finished = true;
        let mut slots = lock(&self.shared.slots);
        slots[self.index] = Some(outcome);
        // Decrement under the lock so waiters never miss the final wakeup.
        self.shared.remaining.fetch_sub(1, Ordering::AcqRel);
        drop(slots);
        self.shared.done.notify_all();
    }
}

impl<T> Drop for Ticket<T> {
    fn drop(&mut self) {
        if !self.finished {
            self.finish(Err("job was dropped before it ran".to_string()));
        }
    }
}

pub(crate) fn panic_message(payload: &dyn Any) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "worker panicked".to_string())
}
