use crate::criteria::CritIndex;
use crate::error::{CritError, Result};
use crate::pool::{default_threads, DEFAULT_MIN_CHUNK_LEN};

/// Configuration for a sweep over cluster counts
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Smallest number of clusters to evaluate
    pub min_k: usize,

    /// Largest number of clusters to evaluate (inclusive)
    pub max_k: usize,

    /// Dataset index of the first centroid. When `None`, the first centroid is
    /// drawn uniformly at random for every k.
    pub seed: Option<usize>,

    /// Seed for the random first-centroid draw. `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,

    /// Number of worker threads in the shared pool
    pub threads: usize,

    /// Minimum number of outer-loop indices processed by one worker
    pub min_chunk_len: usize,

    /// Native validity indices to compute for every k
    pub indices: Vec<CritIndex>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_k: 2,
            max_k: 10,
            seed: None,
            rng_seed: None,
            threads: default_threads(),
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
            indices: CritIndex::all().to_vec(),
        }
    }
}

impl SweepConfig {
    /// Create a configuration sweeping `min_k..=max_k`
    pub fn new(min_k: usize, max_k: usize) -> Self {
        Self {
            min_k,
            max_k,
            ..Default::default()
        }
    }

    /// Fix the first centroid to a dataset index
    pub fn with_seed(mut self, seed: usize) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed the random first-centroid draw
    pub fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = Some(rng_seed);
        self
    }

    /// Set the number of worker threads
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the minimum chunk length per worker
    pub fn with_min_chunk_len(mut self, min_chunk_len: usize) -> Self {
        self.min_chunk_len = min_chunk_len;
        self
    }

    /// Restrict the native indices computed
    pub fn with_indices(mut self, indices: Vec<CritIndex>) -> Self {
        self.indices = indices;
        self
    }

    /// Check the configuration for values that would make a sweep meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.min_k == 0 {
            return Err(CritError::InvalidClusterRange(
                "cluster counts must be at least 1".to_string(),
            ));
        }

        if self.min_k > self.max_k {
            return Err(CritError::InvalidClusterRange(format!(
                "min_k ({}) exceeds max_k ({})",
                self.min_k, self.max_k
            )));
        }

        if self.threads == 0 {
            return Err(CritError::InvalidK(
                "threads must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
