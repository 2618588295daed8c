//! The shared worker pool.
//!
//! Every parallel operation in this crate runs inside one [`WorkerPool`]
//! built up front and passed down by reference, so pool sizing and
//! shutdown live in a single place.

use crate::error::{CritError, Result};
use tracing::debug;

/// Default minimum number of outer-loop indices handed to one worker.
pub const DEFAULT_MIN_CHUNK_LEN: usize = 64;

/// Suggested worker count: twice the available cores minus one.
pub fn default_threads() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (2 * cores).saturating_sub(1).max(1)
}

/// A fixed-size rayon thread pool plus the chunking policy used to split
/// work across it.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    threads: usize,
    min_chunk_len: usize,
}

impl WorkerPool {
    /// Build a pool with `threads` workers.
    ///
    /// # Errors
    ///
    /// Returns [`CritError::InvalidK`] for zero threads and
    /// [`CritError::ThreadPool`] if rayon fails to spawn the workers.
    pub fn new(threads: usize) -> Result<Self> {
        Self::with_chunk_len(threads, DEFAULT_MIN_CHUNK_LEN)
    }

    /// Build a pool with `threads` workers and a custom minimum chunk length.
    pub fn with_chunk_len(threads: usize, min_chunk_len: usize) -> Result<Self> {
        if threads == 0 {
            return Err(CritError::InvalidK(
                "worker pool needs at least one thread".to_string(),
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("clustercrit-{}", i))
            .build()?;

        debug!(threads, min_chunk_len, "built worker pool");

        Ok(Self {
            pool,
            threads,
            min_chunk_len: min_chunk_len.max(1),
        })
    }

    /// Build a pool sized by [`default_threads`].
    pub fn with_default_threads() -> Result<Self> {
        Self::new(default_threads())
    }

    /// A single-worker pool; parallel code paths then run serially.
    pub fn serial() -> Result<Self> {
        Self::new(1)
    }

    /// Run `op` inside the pool, blocking until every spawned chunk joins.
    ///
    /// A panic in any worker propagates to the caller.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Number of workers.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Minimum outer-index chunk processed by one worker.
    pub fn min_chunk_len(&self) -> usize {
        self.min_chunk_len
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads)
            .field("min_chunk_len", &self.min_chunk_len)
            .finish()
    }
}
