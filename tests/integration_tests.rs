use approx::assert_relative_eq;
use clustercrit_rs::{
    assign_clusters, bgss, group_by_assignment, mean, pairwise_distances, seed_centroids, wgss,
    ClusterInput, CritError, CritIndex, CritSweep, Criteria, Dataset, Point, SweepConfig,
    WorkerPool,
};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const CENTERS: [[f64; 2]; 3] = [[-5.0, -5.0], [0.0, 5.0], [5.0, -5.0]];

/// Generate tight 2-D blobs around fixed centers; returns the data and the
/// true label of every point.
fn generate_clustered_data(n_samples: usize, seed: u64) -> (Dataset, Vec<usize>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Array2::random_using((n_samples, 2), Uniform::new(-0.5, 0.5), &mut rng);

    let mut data = Array2::<f64>::zeros((n_samples, 2));
    let mut labels = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let label = i % CENTERS.len();
        data[[i, 0]] = CENTERS[label][0] + noise[[i, 0]];
        data[[i, 1]] = CENTERS[label][1] + noise[[i, 1]];
        labels.push(label);
    }

    (Dataset::from_array(&data.view()).unwrap(), labels)
}

fn random_dataset(n_samples: usize, dims: usize, seed: u64) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data = Array2::random_using((n_samples, dims), Uniform::new(-10.0, 10.0), &mut rng);
    Dataset::from_array(&data.view()).unwrap()
}

fn scalars(values: &[f64]) -> Dataset {
    Dataset::new(values.iter().map(|&x| Point::scalar(x)).collect()).unwrap()
}

#[test]
fn test_two_group_scenario() {
    let pool = WorkerPool::new(2).unwrap();
    let data = scalars(&[1.0, 2.0, 3.0, 10.0, 11.0, 12.0]);
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let seeded = seed_centroids(&pool, &data, 2, Some(0), &mut rng);
    assert_eq!(seeded.seed, Some(0));
    assert_eq!(
        seeded.centroids,
        vec![Point::scalar(1.0), Point::scalar(12.0)]
    );

    let partition = assign_clusters(&pool, &data, &seeded.centroids);
    assert_eq!(partition.labels().unwrap(), vec![0, 0, 0, 1, 1, 1]);
    assert_eq!(partition.labels_one_based().unwrap(), vec![1, 1, 1, 2, 2, 2]);

    assert_relative_eq!(wgss(&partition), 4.0, epsilon = 1e-12);
    assert_relative_eq!(bgss(&data, &partition), 121.5, epsilon = 1e-12);

    let criteria = Criteria::new(&pool);
    let ch = criteria.evaluate(
        CritIndex::CalinskiHarabasz,
        &data,
        ClusterInput::Clusters(&partition),
        None,
    );
    assert_relative_eq!(ch, 121.5, epsilon = 1e-9);
}

#[test]
fn test_seeding_picks_farthest_points() {
    let pool = WorkerPool::new(2).unwrap();
    let data = scalars(&[0.0, 5.0, 10.0, 20.0, 21.0]);
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let seeded = seed_centroids(&pool, &data, 3, Some(0), &mut rng);
    assert_eq!(
        seeded.centroids,
        vec![Point::scalar(0.0), Point::scalar(21.0), Point::scalar(10.0)]
    );
}

#[test]
fn test_seeding_failures_are_empty() {
    let pool = WorkerPool::new(1).unwrap();
    let data = scalars(&[0.0, 1.0, 2.0]);
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    for (k, seed) in [(0, Some(0)), (4, Some(0)), (2, Some(3))] {
        let seeded = seed_centroids(&pool, &data, k, seed, &mut rng);
        assert!(seeded.is_empty(), "k={} seed={:?}", k, seed);
        assert_eq!(seeded.seed, None);
    }
}

#[test]
fn test_random_seed_is_reproducible() {
    let pool = WorkerPool::new(2).unwrap();
    let data = random_dataset(200, 3, 5);

    let mut rng_a = ChaCha8Rng::seed_from_u64(17);
    let mut rng_b = ChaCha8Rng::seed_from_u64(17);
    let a = seed_centroids(&pool, &data, 6, None, &mut rng_a);
    let b = seed_centroids(&pool, &data, 6, None, &mut rng_b);

    assert_eq!(a, b);
    assert_eq!(a.len(), 6);
    let seed = a.seed.unwrap();
    assert!(seed < data.len());
    assert_eq!(a.centroids[0], data[seed]);
}

#[test]
fn test_centroids_are_dataset_members() {
    let pool = WorkerPool::new(4).unwrap();
    let data = random_dataset(150, 4, 9);
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    let seeded = seed_centroids(&pool, &data, 10, Some(42), &mut rng);
    assert_eq!(seeded.len(), 10);
    for (c, &i) in seeded.centroids.iter().zip(&seeded.indices) {
        assert_eq!(*c, data[i]);
    }
    for (i, a) in seeded.centroids.iter().enumerate() {
        for b in &seeded.centroids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_assignment_is_total() {
    let pool = WorkerPool::new(3).unwrap();
    let data = random_dataset(500, 2, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    for k in [1, 2, 7, 25] {
        let seeded = seed_centroids(&pool, &data, k, Some(0), &mut rng);
        let partition = assign_clusters(&pool, &data, &seeded.centroids);
        assert!(partition.is_total(), "k={}", k);
        assert_eq!(partition.n_assigned(), data.len());
        assert!(partition.len() <= k);
        assert_eq!(partition.k(), k);
    }
}

#[test]
fn test_assignment_recovers_blobs() {
    let pool = WorkerPool::new(2).unwrap();
    let (data, truth) = generate_clustered_data(300, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let seeded = seed_centroids(&pool, &data, 3, Some(0), &mut rng);
    let labels = assign_clusters(&pool, &data, &seeded.centroids)
        .labels()
        .unwrap();

    // Same grouping up to a renaming of the ids.
    for i in 0..data.len() {
        for j in (i + 1)..data.len() {
            assert_eq!(truth[i] == truth[j], labels[i] == labels[j]);
        }
    }
}

#[test]
fn test_single_cluster_has_no_between_dispersion() {
    let data = random_dataset(64, 3, 4);
    let partition = group_by_assignment(&data, &vec![0; data.len()]);

    assert_relative_eq!(bgss(&data, &partition), 0.0, epsilon = 1e-9);
    assert!(wgss(&partition) > 0.0);
}

#[test]
fn test_c_index_invariant_under_shift_and_relabel() {
    let pool = WorkerPool::new(2).unwrap();
    let criteria = Criteria::new(&pool);
    let (data, labels) = generate_clustered_data(90, 8);
    let base = criteria.c_index(
        &data,
        ClusterInput::Clusters(&group_by_assignment(&data, &labels)),
    );

    let shift = Point::new(&[100.0, -42.5]).unwrap();
    let shifted = Dataset::new(
        data.iter()
            .map(|p| p.checked_add(&shift).unwrap())
            .collect(),
    )
    .unwrap();
    let shifted_score = criteria.c_index(
        &shifted,
        ClusterInput::Clusters(&group_by_assignment(&shifted, &labels)),
    );
    assert_relative_eq!(base, shifted_score, epsilon = 1e-9);

    let relabeled: Vec<usize> = labels.iter().map(|&l| 7 - 3 * l).collect();
    let relabeled_score = criteria.c_index(
        &data,
        ClusterInput::Clusters(&group_by_assignment(&data, &relabeled)),
    );
    assert_relative_eq!(base, relabeled_score, epsilon = 1e-9);
}

#[test]
fn test_scores_agree_for_clusters_and_centroids() {
    let pool = WorkerPool::new(4).unwrap();
    let criteria = Criteria::new(&pool);
    let (data, _) = generate_clustered_data(120, 21);
    let mut rng = ChaCha8Rng::seed_from_u64(21);

    for k in 2..=5 {
        let seeded = seed_centroids(&pool, &data, k, Some(0), &mut rng);
        let partition = assign_clusters(&pool, &data, &seeded.centroids);

        for &index in CritIndex::all() {
            let from_clusters =
                criteria.evaluate(index, &data, ClusterInput::Clusters(&partition), None);
            let from_centroids = criteria.evaluate(
                index,
                &data,
                ClusterInput::Centroids(&seeded.centroids),
                None,
            );
            assert_eq!(from_clusters, from_centroids, "{} at k={}", index, k);
        }
    }
}

#[test]
fn test_pairwise_distances_independent_of_workers() {
    let data = random_dataset(400, 3, 13);
    let serial = pairwise_distances(&WorkerPool::serial().unwrap(), data.points());
    assert_eq!(serial.len(), 400 * 399 / 2);

    for threads in [2, 3, 8] {
        let pool = WorkerPool::with_chunk_len(threads, 16).unwrap();
        let parallel = pairwise_distances(&pool, data.points());
        assert_eq!(serial, parallel, "threads={}", threads);
    }
}

#[test]
fn test_missing_input_yields_sentinels() {
    let pool = WorkerPool::new(1).unwrap();
    let criteria = Criteria::new(&pool);
    let data = scalars(&[1.0, 2.0, 3.0]);

    for &index in CritIndex::all() {
        let score = criteria.evaluate(index, &data, ClusterInput::None, None);
        assert_eq!(score, index.sentinel(), "{}", index);

        let empty = criteria.evaluate(index, &data, ClusterInput::Centroids(&[]), None);
        assert_eq!(empty, index.sentinel(), "{}", index);
    }
}

#[test]
fn test_mean_of_mixed_dimensions() {
    let points = vec![
        Point::new(&[1.0, 1.0]).unwrap(),
        Point::scalar(99.0),
        Point::new(&[3.0, 5.0]).unwrap(),
    ];
    let agg = mean(&points).unwrap();

    assert_eq!(agg.point, Point::new(&[2.0, 3.0]).unwrap());
    assert_eq!(agg.used, 2);
    assert_eq!(agg.skipped(), 1);
}

#[test]
fn test_point_arithmetic_rejects_mismatched_dimensions() {
    let a = Point::new(&[1.0, 2.0]).unwrap();
    let b = Point::new(&[1.0, 2.0, 3.0]).unwrap();

    assert!(matches!(
        a.checked_sub(&b),
        Err(CritError::InvalidDimensions {
            expected: 2,
            found: 3
        })
    ));
    assert!(a.distance(&b).is_err());
    assert!(matches!(
        Point::new(&[0.0; 5]),
        Err(CritError::UnsupportedDimensionality(5))
    ));
}

#[test]
fn test_index_names_parse_back() {
    for &index in CritIndex::all() {
        assert_eq!(index.name().parse::<CritIndex>().unwrap(), index);
        assert_eq!(index.to_string().to_uppercase().parse::<CritIndex>().unwrap(), index);
    }
    assert!(matches!(
        "silhouette".parse::<CritIndex>(),
        Err(CritError::UnknownIndex(_))
    ));
}

#[test]
fn test_sweep_prefers_true_cluster_count() {
    let (data, _) = generate_clustered_data(300, 99);
    let config = SweepConfig::new(2, 6).with_seed(0).with_threads(2);
    let report = CritSweep::new(config).unwrap().run(&data);

    assert_eq!(report.partitions.len(), 5);
    assert_eq!(report.selection("Calinski_Harabasz"), Some(3));
    assert_eq!(report.selection("Dunn"), Some(3));
    for k in 2..=6 {
        assert!(report.partitions[&k].is_total());
        assert_eq!(report.seeds[&k], 0);
    }
}

#[test]
fn test_sweep_with_random_first_centroid_is_reproducible() {
    let data = random_dataset(120, 2, 31);
    let config = SweepConfig::new(2, 5).with_rng_seed(7).with_threads(2);

    let a = CritSweep::new(config.clone()).unwrap().run(&data);
    let b = CritSweep::new(config).unwrap().run(&data);

    assert_eq!(a.seeds, b.seeds);
    assert_eq!(a.scores, b.scores);
    assert_eq!(a.selections, b.selections);
}

#[test]
fn test_sweep_rejects_invalid_config() {
    assert!(matches!(
        CritSweep::new(SweepConfig::new(5, 2)),
        Err(CritError::InvalidClusterRange(_))
    ));
    assert!(CritSweep::new(SweepConfig::new(2, 3).with_threads(0)).is_err());
}
