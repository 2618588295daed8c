//! Greedy-farthest centroid seeding.
//!
//! Starting from one chosen data point, each round adds the point whose
//! distance to its closest already-chosen centroid is largest. Centroids are
//! always actual members of the dataset; there is no refinement step.

use crate::dataset::Dataset;
use crate::distance::min_distances_to_set;
use crate::point::Point;
use crate::pool::WorkerPool;
use rand::Rng;
use tracing::{debug, warn};

/// Centroids produced by [`seed_centroids`].
///
/// A failed seeding (invalid `k` or seed) is represented by an empty
/// centroid list and `seed == None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeededCentroids {
    /// Selected centroids in selection order; the order defines cluster ids.
    pub centroids: Vec<Point>,
    /// Dataset index of every centroid, parallel to `centroids`.
    pub indices: Vec<usize>,
    /// Dataset index of the first centroid.
    pub seed: Option<usize>,
}

impl SeededCentroids {
    fn failed() -> Self {
        Self {
            centroids: Vec::new(),
            indices: Vec::new(),
            seed: None,
        }
    }

    /// Whether seeding produced nothing.
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// Number of centroids.
    pub fn len(&self) -> usize {
        self.centroids.len()
    }
}

/// Select `k` well-separated centroids from `data`.
///
/// `seed` is the dataset index of the first centroid; `None` draws it
/// uniformly from `rng`. Each further centroid maximizes its minimum distance
/// to the centroids chosen so far, ties going to the first such point in
/// dataset order. A dataset index is never chosen twice; if `data` holds
/// fewer than `k` distinct values, the remaining centroids are repeated
/// values taken from unused indices.
///
/// Returns an empty result with no seed when `k == 0`, `k > data.len()`, or
/// `seed` is out of range.
pub fn seed_centroids<R: Rng>(
    pool: &WorkerPool,
    data: &Dataset,
    k: usize,
    seed: Option<usize>,
    rng: &mut R,
) -> SeededCentroids {
    let n = data.len();

    if k == 0 || k > n {
        warn!(k, n_samples = n, "cannot seed centroids: k out of range");
        return SeededCentroids::failed();
    }

    let seed = match seed {
        Some(s) if s >= n => {
            warn!(seed = s, n_samples = n, "cannot seed centroids: seed out of range");
            return SeededCentroids::failed();
        }
        Some(s) => s,
        None => rng.gen_range(0..n),
    };

    let points = data.points();
    let mut centroids = Vec::with_capacity(k);
    let mut indices = Vec::with_capacity(k);
    let mut taken = vec![false; n];
    centroids.push(points[seed]);
    indices.push(seed);
    taken[seed] = true;

    for round in 1..k {
        let distances = min_distances_to_set(pool, points, &centroids);
        let chosen = first_argmax(&distances, &taken);
        debug!(
            round,
            chosen,
            distance = distances[chosen],
            "selected centroid"
        );
        centroids.push(points[chosen]);
        indices.push(chosen);
        taken[chosen] = true;
    }

    SeededCentroids {
        centroids,
        indices,
        seed: Some(seed),
    }
}

/// Index of the first maximum among the entries not yet taken.
fn first_argmax(values: &[f64], taken: &[bool]) -> usize {
    let mut best_idx = 0;
    let mut best = f64::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if !taken[i] && v > best {
            best = v;
            best_idx = i;
        }
    }
    best_idx
}
