//! Worker pools for parallel colorization.
//!
//! A pool accepts a list of independent jobs and returns a [`Batch`] handle.
//! The handle is the only way the submitter observes progress:
//! [`Batch::remaining_count`], [`Batch::is_done`],
//! [`Batch::block_until_done`], [`Batch::wait_timeout`], and
//! [`Batch::collect`], which returns results in submission order.
//!
//! Custom pools build a batch with [`Batch::new`] and run each job through
//! its [`Ticket`], which records panics as failures.

mod batch;
mod thread_pool;

pub use batch::{Batch, Job, Ticket};
pub use thread_pool::ThreadPool;

use crate::error::Result;

/// Executes batches of independent jobs.
pub trait WorkerPool {
    /// Number of jobs that can run at once.
    fn workers(&self) -> usize;

    /// Submit every job and return a handle to the batch.
    fn submit_many<T: Send + 'static>(&self, jobs: Vec<Job<T>>) -> Result<Batch<T>>;
}

impl<P: WorkerPool + ?Sized> WorkerPool for &P {
    fn workers(&self) -> usize {
        (**self).workers()
    }

    fn submit_many<T: Send + 'static>(&self, jobs: Vec<Job<T>>) -> Result<Batch<T>> {
        (**self).submit_many(jobs)
    }
}
