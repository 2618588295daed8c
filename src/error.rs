use thiserror::Error;

/// Error types for the clustercrit library
#[derive(Error, Debug)]
pub enum CritError {
    /// The dataset contains no points
    #[error("Empty dataset")]
    EmptyDataset,

    /// Two points (or a point and a dataset) disagree on component count
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    InvalidDimensions {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// Points must carry between 1 and 4 components
    #[error("Unsupported dimensionality: {0} (points carry 1 to 4 components)")]
    UnsupportedDimensionality(usize),

    /// The number of clusters k is invalid
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// The requested range of cluster counts is invalid
    #[error("Invalid cluster range: {0}")]
    InvalidClusterRange(String),

    /// The shared worker pool could not be built
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A validity index name that no engine knows
    #[error("Unknown validity index: {0}")]
    UnknownIndex(String),

    /// An external criteria engine failed
    #[error("Criteria engine failure: {0}")]
    Engine(String),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, CritError>;
