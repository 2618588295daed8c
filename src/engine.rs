//! External criteria engines.
//!
//! Some deployments score partitions with an additional statistical package.
//! Such a backend is wrapped in a [`CriteriaEngine`], constructed once by the
//! caller and handed to [`crate::CritSweep::with_engine`]. Its scores travel
//! through the same name-to-score interface as the native indices.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::partition::Partition;
use crate::selection::SelectionRule;

/// One named score produced by an engine.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedScore {
    pub name: String,
    pub value: f64,
}

impl NamedScore {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A source of validity scores beyond the native indices.
///
/// Implementations must be safe to share across the sweep; a backend that
/// is not thread-safe should serialize access internally.
pub trait CriteriaEngine: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Score `partition` of `data` for the cluster count `k`.
    ///
    /// # Errors
    ///
    /// Any backend failure. A sweep logs the error and carries on with the
    /// remaining cluster counts.
    fn evaluate(&self, data: &Dataset, partition: &Partition, k: usize) -> Result<Vec<NamedScore>>;

    /// How the best k is read off the scores named `criterion`, if known.
    fn selection_rule(&self, criterion: &str) -> Option<SelectionRule>;
}
