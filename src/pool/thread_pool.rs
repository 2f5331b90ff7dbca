//! Fixed-size pool of named worker threads.
//!
//! # Architecture
//!
//! ```text
//! Submitting Thread                   Worker Threads (N)
//! -----------------                   ------------------
//! Batch::new(len) -> tickets
//! send (ticket, job) x len  ─────────▶  recv from shared queue
//!                                       catch_unwind(job)
//!                                       store outcome in slot
//! poll remaining_count()  ◀─ atomic ─   decrement remaining, notify
//! collect() in index order
//! ```
//!
//! Jobs are moved into the queue, not shared; the only state touched by
//! both sides is the batch's slot vector and remaining counter.

use crate::error::{Error, Result};
use crate::pool::WorkerPool;
use crate::pool::batch::{Batch, Job};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Worker pool backed by OS threads.
///
/// Threads live as long as the pool. Dropping the pool closes the queue and
/// joins every worker after it finishes the jobs already queued.
pub struct ThreadPool {
    tx: Option<Sender<Task>>,
    handles: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Spawn a pool with `workers` threads.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::invalid("workers", workers, "must be at least 1"));
        }

        let (tx, rx) = mpsc::channel::<Task>();
        let rx = Arc::new(Mutex::new(rx));

        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let rx = Arc::clone(&rx);
            let handle = thread::Builder::new()
                .name(format!("rainbow-worker-{id}"))
                .spawn(move || worker_main(&rx))?;
            handles.push(handle);
        }

        tracing::debug!(workers, "thread pool started");
        Ok(Self {
            tx: Some(tx),
            handles,
        })
    }

    /// Spawn a pool sized to the host's available parallelism.
    pub fn with_available_parallelism() -> Result<Self> {
        Self::new(crate::available_cpus().unwrap_or(1))
    }
}

impl WorkerPool for ThreadPool {
    fn workers(&self) -> usize {
        self.handles.len()
    }

    fn submit_many<T: Send + 'static>(&self, jobs: Vec<Job<T>>) -> Result<Batch<T>> {
        let tx = self.tx.as_ref().ok_or(Error::PoolDisconnected)?;
        let (batch, tickets) = Batch::new(jobs.len());
        for (ticket, job) in tickets.into_iter().zip(jobs) {
            tx.send(Box::new(move || ticket.run(job)))
                .map_err(|_| Error::PoolDisconnected)?;
        }
        Ok(batch)
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // Closing the queue makes every idle worker's recv() fail.
        drop(self.tx.take());
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

fn worker_main(rx: &Mutex<Receiver<Task>>) {
    loop {
        let task = rx.lock().unwrap_or_else(PoisonError::into_inner).recv();
        match task {
            Ok(task) => task(),
            Err(_) => break,
        }
    }
}
