//! Sum-of-squares building blocks shared by the validity indices.

use crate::dataset::Dataset;
use crate::partition::Partition;
use crate::point::{mean, Point};

/// Within-cluster dispersion of one cluster: the sum of squared distances
/// from each member to the cluster mean. Zero for empty or singleton clusters.
pub fn wgss_k(points: &[Point]) -> f64 {
    let Some(center) = mean(points) else {
        return 0.0;
    };

    points
        .iter()
        .map(|p| p.squared_distance_unchecked(&center.point))
        .sum()
}

/// Sum of [`wgss_k`] over every cluster of the partition.
pub fn wgss(partition: &Partition) -> f64 {
    partition.iter().map(|(_, c)| wgss_k(c.points())).sum()
}

/// Between-cluster dispersion: the size-weighted sum of squared distances
/// from each cluster mean to the mean of the whole dataset.
pub fn bgss(data: &Dataset, partition: &Partition) -> f64 {
    let Some(global) = mean(data.points()) else {
        return 0.0;
    };

    partition
        .iter()
        .filter_map(|(_, c)| {
            let center = mean(c.points())?;
            Some(c.len() as f64 * center.point.squared_distance_unchecked(&global.point))
        })
        .sum()
}
