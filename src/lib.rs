//! # clustercrit-rs
//!
//! Greedy-farthest centroid seeding, nearest-centroid assignment and a
//! library of internal cluster-validity indices for low-dimensional data.
//!
//! ## Features
//!
//! - **Greedy-farthest seeding**: picks k well-separated centroids from the
//!   data itself, reproducibly from a chosen first point
//! - **Parallel distance engine**: quadratic pairwise work is split across one
//!   shared rayon pool sized at twice the core count minus one
//! - **Validity indices**: Ball-Hall, Banfeld-Raftery, C-Index,
//!   Calinski-Harabasz, Dunn, Xie-Beni, Trace W and Log SS Ratio, each with a
//!   defined sentinel for degenerate input
//! - **Sweeps**: score every k in a range and pick the best k per index
//!
//! ## Example
//!
//! ```rust
//! use clustercrit_rs::{
//!     assign_clusters, seed_centroids, ClusterInput, CritIndex, Criteria, Dataset, Point,
//!     WorkerPool,
//! };
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let data = Dataset::new(
//!     [1.0, 2.0, 3.0, 10.0, 11.0, 12.0].iter().map(|&x| Point::scalar(x)).collect(),
//! )
//! .unwrap();
//!
//! let pool = WorkerPool::new(2).unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! let seeded = seed_centroids(&pool, &data, 2, Some(0), &mut rng);
//! let partition = assign_clusters(&pool, &data, &seeded.centroids);
//! assert_eq!(partition.labels().unwrap(), vec![0, 0, 0, 1, 1, 1]);
//!
//! let criteria = Criteria::new(&pool);
//! let ch = criteria.evaluate(
//!     CritIndex::CalinskiHarabasz,
//!     &data,
//!     ClusterInput::Clusters(&partition),
//!     None,
//! );
//! assert!((ch - 121.5).abs() < 1e-9);
//! ```
//!
//! ## Sweeping a range of k
//!
//! ```rust
//! use clustercrit_rs::{CritSweep, Dataset, SweepConfig};
//! use ndarray::array;
//!
//! let data = Dataset::from_array(
//!     &array![[0.0, 0.0], [0.1, 0.2], [5.0, 5.0], [5.1, 4.9], [9.0, 0.0], [9.2, 0.1]].view(),
//! )
//! .unwrap();
//!
//! let config = SweepConfig::new(2, 4).with_seed(0).with_threads(2);
//! let report = CritSweep::new(config).unwrap().run(&data);
//! assert_eq!(report.selection("Calinski_Harabasz"), Some(3));
//! ```

mod config;
mod criteria;
mod dataset;
mod distance;
mod engine;
mod error;
mod partition;
mod point;
mod pool;
mod seeding;
mod selection;
mod sweep;

pub use config::SweepConfig;
pub use criteria::{bgss, wgss, wgss_k, ClusterInput, CritIndex, Criteria};
pub use dataset::Dataset;
pub use distance::{
    cross_distances, max_intra_group_distance, min_distances_to_set, min_inter_group_distance,
    nearest_centroids, pairwise_distances,
};
pub use engine::{CriteriaEngine, NamedScore};
pub use error::{CritError, Result};
pub use partition::{assign_clusters, group_by_assignment, Cluster, Partition};
pub use point::{mean, sum, Aggregate, Point, MAX_DIMS};
pub use pool::{default_threads, WorkerPool, DEFAULT_MIN_CHUNK_LEN};
pub use seeding::{seed_centroids, SeededCentroids};
pub use selection::{select_best_k, SelectionRule};
pub use sweep::{ClusterRange, CritSweep, SweepReport};
