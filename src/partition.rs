//! Nearest-centroid assignment and the resulting cluster partition.

use crate::dataset::Dataset;
use crate::distance::nearest_centroids;
use crate::point::Point;
use crate::pool::WorkerPool;
use std::collections::BTreeMap;
use tracing::warn;

/// Members of one cluster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    members: Vec<usize>,
    points: Vec<Point>,
}

impl Cluster {
    fn push(&mut self, index: usize, point: Point) {
        self.members.push(index);
        self.points.push(point);
    }

    /// Dataset indices of the members, ascending.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Member points, in the same order as [`Cluster::members`].
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of members; never zero inside a [`Partition`].
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A mapping from cluster id to its members.
///
/// Only ids that received at least one point are present, so `len()` can be
/// smaller than the nominal cluster count `k()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    clusters: BTreeMap<usize, Cluster>,
    k: usize,
    n_points: usize,
}

impl Partition {
    /// Nominal number of clusters: the centroid count for partitions built by
    /// [`assign_clusters`], or the number of distinct ids for
    /// [`group_by_assignment`]. The id values themselves never matter.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of non-empty clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of dataset points the partition was built over.
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Number of points that belong to some cluster.
    pub fn n_assigned(&self) -> usize {
        self.clusters.values().map(Cluster::len).sum()
    }

    /// Whether every dataset point belongs to a cluster.
    pub fn is_total(&self) -> bool {
        self.n_assigned() == self.n_points
    }

    pub fn get(&self, id: usize) -> Option<&Cluster> {
        self.clusters.get(&id)
    }

    /// Clusters in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Cluster)> {
        self.clusters.iter().map(|(&id, c)| (id, c))
    }

    /// Member points of every cluster, in ascending id order.
    pub fn groups(&self) -> Vec<&[Point]> {
        self.clusters.values().map(Cluster::points).collect()
    }

    /// Whether any cluster has exactly one member.
    pub fn has_singletons(&self) -> bool {
        self.clusters.values().any(|c| c.len() == 1)
    }

    /// Cluster id of every dataset point, indexed by dataset position.
    ///
    /// Returns `None` if the partition does not cover every point.
    pub fn labels(&self) -> Option<Vec<usize>> {
        if !self.is_total() {
            return None;
        }

        let mut labels = vec![0; self.n_points];
        for (&id, cluster) in &self.clusters {
            for &m in &cluster.members {
                labels[m] = id;
            }
        }
        Some(labels)
    }

    /// Like [`Partition::labels`] but numbered from 1.
    pub fn labels_one_based(&self) -> Option<Vec<usize>> {
        self.labels()
            .map(|labels| labels.into_iter().map(|l| l + 1).collect())
    }
}

/// Assign every point of `data` to its nearest centroid.
///
/// Ties go to the lowest centroid index. An empty centroid list yields an
/// empty partition.
pub fn assign_clusters(pool: &WorkerPool, data: &Dataset, centroids: &[Point]) -> Partition {
    if centroids.is_empty() {
        warn!("no centroids given; nothing to assign");
        return Partition {
            n_points: data.len(),
            ..Default::default()
        };
    }

    if let Some(bad) = centroids.iter().find(|c| c.dims() != data.dims()) {
        warn!(
            expected = data.dims(),
            found = bad.dims(),
            "centroid dimensionality differs from the dataset; nothing to assign"
        );
        return Partition {
            n_points: data.len(),
            ..Default::default()
        };
    }

    let labels = nearest_centroids(pool, data.points(), centroids);
    let mut partition = group_by_assignment(data, &labels);
    partition.k = centroids.len();
    partition
}

/// Group `data` by a precomputed cluster id per point.
///
/// When `assignment` and `data` differ in length, the mismatch is logged and
/// only the overlapping prefix is grouped.
pub fn group_by_assignment(data: &Dataset, assignment: &[usize]) -> Partition {
    if assignment.len() != data.len() {
        warn!(
            n_samples = data.len(),
            n_labels = assignment.len(),
            "assignment length differs from dataset length; grouping the overlap only"
        );
    }

    let mut clusters: BTreeMap<usize, Cluster> = BTreeMap::new();
    for (i, (&label, point)) in assignment.iter().zip(data.iter()).enumerate() {
        clusters.entry(label).or_default().push(i, *point);
    }

    let k = clusters.len();
    Partition {
        clusters,
        k,
        n_points: data.len(),
    }
}
