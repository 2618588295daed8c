//! Pairwise distance engine.
//!
//! Everything here is quadratic in the input size, so the outer index range
//! is split into chunks that the [`WorkerPool`] processes independently.
//! Each chunk yields a partial result that is merged at the join point;
//! no caller depends on the order of the merged distances.

use crate::point::Point;
use crate::pool::WorkerPool;
use rayon::prelude::*;

/// Distances between every unordered pair `i < j` of `points`.
///
/// The list has `n * (n - 1) / 2` entries in no particular order.
pub fn pairwise_distances(pool: &WorkerPool, points: &[Point]) -> Vec<f64> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let min_len = pool.min_chunk_len();
    pool.install(|| {
        (0..n - 1)
            .into_par_iter()
            .with_min_len(min_len)
            .fold(Vec::new, |mut acc, i| {
                let a = &points[i];
                acc.extend(points[i + 1..].iter().map(|b| a.distance_unchecked(b)));
                acc
            })
            .reduce(Vec::new, |mut left, mut right| {
                left.append(&mut right);
                left
            })
    })
}

/// Distances from every point of `group_a` to every point of `group_b`.
pub fn cross_distances(pool: &WorkerPool, group_a: &[Point], group_b: &[Point]) -> Vec<f64> {
    if group_a.is_empty() || group_b.is_empty() {
        return Vec::new();
    }

    let min_len = pool.min_chunk_len();
    pool.install(|| {
        group_a
            .par_iter()
            .with_min_len(min_len)
            .fold(Vec::new, |mut acc, a| {
                acc.extend(group_b.iter().map(|b| a.distance_unchecked(b)));
                acc
            })
            .reduce(Vec::new, |mut left, mut right| {
                left.append(&mut right);
                left
            })
    })
}

/// Smallest distance between two points that belong to different groups.
///
/// Returns `None` when fewer than two non-empty groups are given.
pub fn min_inter_group_distance(pool: &WorkerPool, groups: &[&[Point]]) -> Option<f64> {
    let groups: Vec<&[Point]> = groups.iter().copied().filter(|g| !g.is_empty()).collect();
    if groups.len() < 2 {
        return None;
    }

    let min = pool.install(|| {
        (0..groups.len() - 1)
            .into_par_iter()
            .map(|i| {
                let mut best = f64::INFINITY;
                for other in &groups[i + 1..] {
                    for a in groups[i] {
                        for b in other.iter() {
                            best = best.min(a.distance_unchecked(b));
                        }
                    }
                }
                best
            })
            .reduce(|| f64::INFINITY, f64::min)
    });

    Some(min)
}

/// Largest distance between two points of the same group.
///
/// Groups with fewer than two points have no internal pairs and are ignored;
/// returns `None` if no group has a pair.
pub fn max_intra_group_distance(pool: &WorkerPool, groups: &[&[Point]]) -> Option<f64> {
    groups
        .iter()
        .filter(|g| g.len() >= 2)
        .map(|g| max_pairwise_distance(pool, g))
        .reduce(f64::max)
}

fn max_pairwise_distance(pool: &WorkerPool, points: &[Point]) -> f64 {
    let n = points.len();
    let min_len = pool.min_chunk_len();
    pool.install(|| {
        (0..n - 1)
            .into_par_iter()
            .with_min_len(min_len)
            .map(|i| {
                let a = &points[i];
                points[i + 1..]
                    .iter()
                    .map(|b| a.distance_unchecked(b))
                    .fold(0.0, f64::max)
            })
            .reduce(|| 0.0, f64::max)
    })
}

/// For each point of `data`, the distance to the closest point of `set`.
///
/// The output is indexed by the position of the point in `data`.
/// An empty `set` yields `f64::INFINITY` everywhere.
pub fn min_distances_to_set(pool: &WorkerPool, data: &[Point], set: &[Point]) -> Vec<f64> {
    let min_len = pool.min_chunk_len();
    pool.install(|| {
        data.par_iter()
            .with_min_len(min_len)
            .map(|p| {
                set.iter()
                    .map(|c| p.distance_unchecked(c))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect()
    })
}

/// Index of the nearest centroid for every point of `data`.
///
/// Centroids are scanned in order and only a strictly smaller distance
/// replaces the current best, so ties go to the lowest centroid index.
/// The output is indexed by the position of the point in `data`.
pub fn nearest_centroids(pool: &WorkerPool, data: &[Point], centroids: &[Point]) -> Vec<usize> {
    let min_len = pool.min_chunk_len();
    pool.install(|| {
        data.par_iter()
            .with_min_len(min_len)
            .map(|p| {
                let mut best_label = 0;
                let mut best_dist = f64::INFINITY;
                for (j, c) in centroids.iter().enumerate() {
                    let dist = p.squared_distance_unchecked(c);
                    if dist < best_dist {
                        best_dist = dist;
                        best_label = j;
                    }
                }
                best_label
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scalars(values: &[f64]) -> Vec<Point> {
        values.iter().map(|&x| Point::scalar(x)).collect()
    }

    fn sorted(mut v: Vec<f64>) -> Vec<f64> {
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        v
    }

    #[test]
    fn test_pairwise_distances_multiset() {
        let points = scalars(&[0.0, 3.0, 4.0]);
        for threads in [1, 2, 4] {
            let pool = WorkerPool::with_chunk_len(threads, 1).unwrap();
            let d = sorted(pairwise_distances(&pool, &points));
            assert_eq!(d, vec![1.0, 3.0, 4.0]);
        }
    }

    #[test]
    fn test_pairwise_distances_small_inputs() {
        let pool = WorkerPool::serial().unwrap();
        assert!(pairwise_distances(&pool, &[]).is_empty());
        assert!(pairwise_distances(&pool, &scalars(&[1.0])).is_empty());
    }

    #[test]
    fn test_pairwise_count() {
        let pool = WorkerPool::with_chunk_len(4, 2).unwrap();
        let points = scalars(&(0..57).map(|i| i as f64).collect::<Vec<_>>());
        assert_eq!(pairwise_distances(&pool, &points).len(), 57 * 56 / 2);
    }

    #[test]
    fn test_cross_distances() {
        let pool = WorkerPool::serial().unwrap();
        let a = scalars(&[0.0, 1.0]);
        let b = scalars(&[5.0, 7.0, 10.0]);
        let d = sorted(cross_distances(&pool, &a, &b));
        assert_eq!(d, vec![4.0, 5.0, 6.0, 7.0, 9.0, 10.0]);
    }

    #[test]
    fn test_group_extremes() {
        let pool = WorkerPool::new(2).unwrap();
        let g1 = scalars(&[0.0, 1.0, 2.0]);
        let g2 = scalars(&[6.0, 9.0]);
        let g3 = scalars(&[20.0]);
        let groups: Vec<&[Point]> = vec![&g1, &g2, &g3];

        assert_relative_eq!(
            min_inter_group_distance(&pool, &groups).unwrap(),
            4.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            max_intra_group_distance(&pool, &groups).unwrap(),
            3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_group_extremes_degenerate() {
        let pool = WorkerPool::serial().unwrap();
        let g1 = scalars(&[0.0]);
        let g2 = scalars(&[4.0]);

        assert_eq!(min_inter_group_distance(&pool, &[&g1]), None);
        assert_eq!(max_intra_group_distance(&pool, &[&g1, &g2]), None);
    }

    #[test]
    fn test_nearest_centroids_ties_go_low() {
        let pool = WorkerPool::new(2).unwrap();
        let data = vec![
            Point::new(&[0.0, 0.0]).unwrap(),
            Point::new(&[10.0, 10.0]).unwrap(),
            Point::new(&[5.0, 5.0]).unwrap(),
        ];
        let centroids = vec![
            Point::new(&[0.0, 0.0]).unwrap(),
            Point::new(&[10.0, 10.0]).unwrap(),
        ];

        let labels = nearest_centroids(&pool, &data, &centroids);
        assert_eq!(labels, vec![0, 1, 0]);
    }

    #[test]
    fn test_min_distances_to_set_preserves_order() {
        let pool = WorkerPool::with_chunk_len(3, 1).unwrap();
        let data = scalars(&[0.0, 5.0, 10.0, 20.0, 21.0]);
        let set = scalars(&[0.0, 21.0]);
        let d = min_distances_to_set(&pool, &data, &set);
        assert_eq!(d, vec![0.0, 5.0, 10.0, 1.0, 0.0]);
    }
}
