//! Shared test doubles: recording reporters and pools with controlled
//! completion order.

#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Each test binary uses a different subset

use rainbow_highlight::pool::{Batch, Job, WorkerPool};
use rainbow_highlight::{
    ProgressError, ProgressReporter, Result, Rgb, StyledText, ThreadPool, XorShift64,
};
use std::thread;
use std::time::Duration;

// ============================================================================
// Reporters
// ============================================================================

/// One call received by a [`RecordingReporter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    Total(usize),
    Advance(usize),
    Completed(usize),
    Label(String),
}

/// Records every update in order.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<ProgressEvent>,
}

impl RecordingReporter {
    pub fn completed_values(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Completed(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    pub fn advanced_total(&self) -> usize {
        self.events
            .iter()
            .map(|e| match e {
                ProgressEvent::Advance(n) => *n,
                _ => 0,
            })
            .sum()
    }
}

impl ProgressReporter for RecordingReporter {
    fn set_total(&mut self, total: usize) -> std::result::Result<(), ProgressError> {
        self.events.push(ProgressEvent::Total(total));
        Ok(())
    }

    fn advance(&mut self, n: usize) -> std::result::Result<(), ProgressError> {
        self.events.push(ProgressEvent::Advance(n));
        Ok(())
    }

    fn set_completed(&mut self, completed: usize) -> std::result::Result<(), ProgressError> {
        self.events.push(ProgressEvent::Completed(completed));
        Ok(())
    }

    fn set_label(&mut self, label: &str) -> std::result::Result<(), ProgressError> {
        self.events.push(ProgressEvent::Label(label.to_string()));
        Ok(())
    }
}

/// Fails every update and counts the attempts.
#[derive(Default)]
pub struct FailingReporter {
    pub calls: usize,
}

impl FailingReporter {
    fn fail(&mut self) -> std::result::Result<(), ProgressError> {
        self.calls += 1;
        Err(ProgressError("display went away".to_string()))
    }
}

impl ProgressReporter for FailingReporter {
    fn set_total(&mut self, _: usize) -> std::result::Result<(), ProgressError> {
        self.fail()
    }

    fn advance(&mut self, _: usize) -> std::result::Result<(), ProgressError> {
        self.fail()
    }

    fn set_completed(&mut self, _: usize) -> std::result::Result<(), ProgressError> {
        self.fail()
    }

    fn set_label(&mut self, _: &str) -> std::result::Result<(), ProgressError> {
        self.fail()
    }
}

// ============================================================================
// Pools
// ============================================================================

/// Runs every job inline, last submitted first.
pub struct ReversePool;

impl WorkerPool for ReversePool {
    fn workers(&self) -> usize {
        1
    }

    fn submit_many<T: Send + 'static>(&self, jobs: Vec<Job<T>>) -> Result<Batch<T>> {
        let (batch, tickets) = Batch::new(jobs.len());
        for (ticket, job) in tickets.into_iter().zip(jobs).rev() {
            ticket.run(job);
        }
        Ok(batch)
    }
}

/// One thread per job, each sleeping a seeded random delay first.
pub struct ShuffledPool {
    pub seed: u64,
}

impl WorkerPool for ShuffledPool {
    fn workers(&self) -> usize {
        4
    }

    fn submit_many<T: Send + 'static>(&self, jobs: Vec<Job<T>>) -> Result<Batch<T>> {
        use rainbow_highlight::RandomSource;

        let mut rng = XorShift64::new(self.seed);
        let (batch, tickets) = Batch::new(jobs.len());
        for (ticket, job) in tickets.into_iter().zip(jobs) {
            let delay = Duration::from_micros(rng.next_u64() % 3_000);
            thread::spawn(move || {
                thread::sleep(delay);
                ticket.run(job);
            });
        }
        Ok(batch)
    }
}

/// A single background thread running jobs in order, pausing before each.
pub struct SlowPool {
    pub delay: Duration,
}

impl WorkerPool for SlowPool {
    fn workers(&self) -> usize {
        1
    }

    fn submit_many<T: Send + 'static>(&self, jobs: Vec<Job<T>>) -> Result<Batch<T>> {
        let (batch, tickets) = Batch::new(jobs.len());
        let delay = self.delay;
        thread::spawn(move || {
            for (ticket, job) in tickets.into_iter().zip(jobs) {
                thread::sleep(delay);
                ticket.run(job);
            }
        });
        Ok(batch)
    }
}

/// Runs every job except the one at `lose`, whose ticket is dropped.
pub struct LossyPool {
    pub lose: usize,
}

impl WorkerPool for LossyPool {
    fn workers(&self) -> usize {
        1
    }

    fn submit_many<T: Send + 'static>(&self, jobs: Vec<Job<T>>) -> Result<Batch<T>> {
        let (batch, tickets) = Batch::new(jobs.len());
        for (ticket, job) in tickets.into_iter().zip(jobs) {
            if ticket.index() != self.lose {
                ticket.run(job);
            }
        }
        Ok(batch)
    }
}

/// Forwards jobs to a [`ThreadPool`], replacing the one at `panic_at` with a
/// job that panics on a worker thread.
pub struct PanickingPool {
    pub inner: ThreadPool,
    pub panic_at: usize,
}

impl WorkerPool for PanickingPool {
    fn workers(&self) -> usize {
        self.inner.workers()
    }

    fn submit_many<T: Send + 'static>(&self, jobs: Vec<Job<T>>) -> Result<Batch<T>> {
        let panic_at = self.panic_at;
        let jobs = jobs
            .into_iter()
            .enumerate()
            .map(|(i, job)| -> Job<T> {
                if i == panic_at {
                    Box::new(move || -> T { panic!("colorizing row {i} blew up") })
                } else {
                    job
                }
            })
            .collect();
        self.inner.submit_many(jobs)
    }
}

// ============================================================================
// Assertions
// ============================================================================

/// Character offsets that are not `'\n'`.
pub fn non_newline_offsets(text: &str) -> Vec<usize> {
    text.chars()
        .enumerate()
        .filter(|(_, c)| *c != '\n')
        .map(|(i, _)| i)
        .collect()
}

/// Assert every non-newline character carries exactly one single-character
/// span and newlines carry none.
pub fn assert_singly_spanned(text: &StyledText) {
    let expected = non_newline_offsets(text.plain());
    let starts: Vec<usize> = text.spans().iter().map(|s| s.start()).collect();
    assert_eq!(starts, expected, "span starts do not match characters");
    assert!(text.spans().iter().all(|s| s.len() == 1));
}

/// Color of the span starting at `offset`.
pub fn color_at(text: &StyledText, offset: usize) -> Rgb {
    let idx = text
        .spans()
        .binary_search_by_key(&offset, |s| s.start())
        .unwrap_or_else(|_| panic!("no span at {offset}"));
    text.spans()[idx].color
}
