//! Internal cluster-validity indices.
//!
//! Every index scores a partition using only the data and the partition
//! itself. The input is either a ready [`Partition`] (preferred, nothing is
//! recomputed) or a centroid list that is assigned first. Missing or
//! degenerate input never raises: the index returns its sentinel, the worst
//! value for the direction in which it is read (see
//! [`SelectionRule::sentinel`]).
//!
//! | Index | Value | Best k |
//! |---|---|---|
//! | Ball-Hall | mean over clusters of `WGSS_k / n_k` | max diff |
//! | Banfeld-Raftery | `Σ n_k ln(WGSS_k / n_k)` over clusters with a positive ratio | min |
//! | C-Index | `(Sw − Smin) / (Smax − Smin)` | min |
//! | Calinski-Harabasz | `((N − k) / (k − 1)) · BGSS / WGSS` | max |
//! | Dunn | `dMin / dMax` | max |
//! | Xie-Beni | `WGSS / (k · min_{i≠j} ‖G_i − G_j‖²)` | min |
//! | Trace W | `WGSS` | max diff |
//! | Log SS Ratio | `ln(BGSS / WGSS)` | min diff |

mod dispersion;
mod indices;

pub use dispersion::{bgss, wgss, wgss_k};

use crate::dataset::Dataset;
use crate::error::CritError;
use crate::partition::{assign_clusters, Partition};
use crate::point::Point;
use crate::pool::WorkerPool;
use crate::selection::SelectionRule;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// The natively implemented validity indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CritIndex {
    BallHall,
    BanfeldRaftery,
    CIndex,
    CalinskiHarabasz,
    Dunn,
    XieBeni,
    TraceW,
    LogSsRatio,
}

const ALL_INDICES: [CritIndex; 8] = [
    CritIndex::BallHall,
    CritIndex::BanfeldRaftery,
    CritIndex::CIndex,
    CritIndex::CalinskiHarabasz,
    CritIndex::Dunn,
    CritIndex::XieBeni,
    CritIndex::TraceW,
    CritIndex::LogSsRatio,
];

impl CritIndex {
    /// Every native index.
    pub fn all() -> &'static [CritIndex] {
        &ALL_INDICES
    }

    /// Canonical name, as used in result tables.
    pub fn name(&self) -> &'static str {
        match self {
            CritIndex::BallHall => "Ball_Hall",
            CritIndex::BanfeldRaftery => "Banfeld_Raftery",
            CritIndex::CIndex => "C_index",
            CritIndex::CalinskiHarabasz => "Calinski_Harabasz",
            CritIndex::Dunn => "Dunn",
            CritIndex::XieBeni => "Xie_Beni",
            CritIndex::TraceW => "Trace_W",
            CritIndex::LogSsRatio => "Log_SS_Ratio",
        }
    }

    /// Rule used to read the best k off a sweep of this index.
    pub fn selection_rule(&self) -> SelectionRule {
        match self {
            CritIndex::CalinskiHarabasz | CritIndex::Dunn => SelectionRule::Max,
            CritIndex::BanfeldRaftery | CritIndex::CIndex | CritIndex::XieBeni => {
                SelectionRule::Min
            }
            CritIndex::BallHall | CritIndex::TraceW => SelectionRule::MaxDiff,
            CritIndex::LogSsRatio => SelectionRule::MinDiff,
        }
    }

    /// Score reported when the index cannot be computed.
    pub fn sentinel(&self) -> f64 {
        self.selection_rule().sentinel()
    }
}

impl fmt::Display for CritIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CritIndex {
    type Err = CritError;

    /// Case-insensitive; `_`, `-` and spaces are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        CritIndex::all()
            .iter()
            .copied()
            .find(|idx| {
                let name: String = idx
                    .name()
                    .chars()
                    .filter(|&c| c != '_')
                    .flat_map(char::to_lowercase)
                    .collect();
                name == wanted
            })
            .ok_or_else(|| CritError::UnknownIndex(s.to_string()))
    }
}

/// What an index is computed from.
#[derive(Debug, Clone, Copy)]
pub enum ClusterInput<'a> {
    /// A precomputed partition; used as-is.
    Clusters(&'a Partition),
    /// Centroids; the data is assigned to them first.
    Centroids(&'a [Point]),
    /// Nothing to score; every index returns its sentinel.
    None,
}

/// The validity index library, bound to a worker pool.
#[derive(Debug, Clone, Copy)]
pub struct Criteria<'p> {
    pool: &'p WorkerPool,
}

impl<'p> Criteria<'p> {
    pub fn new(pool: &'p WorkerPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &'p WorkerPool {
        self.pool
    }

    /// Compute one index.
    ///
    /// `k` overrides the cluster count used by the k-dependent indices
    /// (Calinski-Harabasz, Xie-Beni); by default it is the centroid count or
    /// [`Partition::k`].
    pub fn evaluate(
        &self,
        index: CritIndex,
        data: &Dataset,
        input: ClusterInput<'_>,
        k: Option<usize>,
    ) -> f64 {
        match index {
            CritIndex::BallHall => self.ball_hall(data, input),
            CritIndex::BanfeldRaftery => self.banfeld_raftery(data, input),
            CritIndex::CIndex => self.c_index(data, input),
            CritIndex::CalinskiHarabasz => self.calinski_harabasz(data, input, k),
            CritIndex::Dunn => self.dunn(data, input),
            CritIndex::XieBeni => self.xie_beni(data, input, k),
            CritIndex::TraceW => self.trace_w(data, input),
            CritIndex::LogSsRatio => self.log_ss_ratio(data, input),
        }
    }

    /// Compute several indices, assigning centroids at most once.
    pub fn evaluate_many(
        &self,
        indices: &[CritIndex],
        data: &Dataset,
        input: ClusterInput<'_>,
        k: Option<usize>,
    ) -> Vec<(CritIndex, f64)> {
        let Some(partition) = self.resolve(data, input) else {
            return indices.iter().map(|&i| (i, i.sentinel())).collect();
        };

        indices
            .iter()
            .map(|&i| {
                (
                    i,
                    self.evaluate(i, data, ClusterInput::Clusters(&partition), k),
                )
            })
            .collect()
    }

    /// Turn the input into a partition, or `None` if there is nothing to score.
    pub(crate) fn resolve<'a>(
        &self,
        data: &Dataset,
        input: ClusterInput<'a>,
    ) -> Option<Cow<'a, Partition>> {
        let partition = match input {
            ClusterInput::Clusters(p) => Cow::Borrowed(p),
            ClusterInput::Centroids(c) => Cow::Owned(assign_clusters(self.pool, data, c)),
            ClusterInput::None => {
                warn!("no clusters or centroids given; returning sentinel");
                return None;
            }
        };

        if partition.is_empty() {
            warn!("partition has no clusters; returning sentinel");
            return None;
        }

        Some(partition)
    }
}
