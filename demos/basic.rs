//! Basic example demonstrating clustercrit-rs usage
//!
//! Run with: cargo run --example basic --release

use clustercrit_rs::{
    assign_clusters, seed_centroids, ClusterInput, CritIndex, CritSweep, Criteria, Dataset,
    SweepConfig, WorkerPool,
};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    println!("=== clustercrit-rs example ===\n");

    // Generate synthetic data: 3 clusters in 2D
    let n_samples = 300;
    let n_features = 2;
    let n_clusters = 3;
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    println!("Generating {} samples with {} features...", n_samples, n_features);

    let centers = [[-5.0, -5.0], [0.0, 5.0], [5.0, -5.0]];
    let noise = Array2::random_using((n_samples, n_features), Uniform::new(-1.0, 1.0), &mut rng);
    let mut data = Array2::<f64>::zeros((n_samples, n_features));
    for i in 0..n_samples {
        let center = centers[i % n_clusters];
        data[[i, 0]] = center[0] + noise[[i, 0]];
        data[[i, 1]] = center[1] + noise[[i, 1]];
    }

    let dataset = Dataset::from_array(&data.view()).expect("Invalid dataset");

    // Seed and assign once for the true cluster count
    let pool = WorkerPool::with_default_threads().expect("Failed to build worker pool");
    println!("Worker pool: {} threads\n", pool.threads());

    let seeded = seed_centroids(&pool, &dataset, n_clusters, Some(0), &mut rng);
    println!("Seeded centroids (first centroid = sample {:?}):", seeded.seed);
    for (i, c) in seeded.centroids.iter().enumerate() {
        println!("  Centroid {}: {}", i, c);
    }
    println!();

    let partition = assign_clusters(&pool, &dataset, &seeded.centroids);
    println!("Cluster distribution:");
    for (id, cluster) in partition.iter() {
        println!(
            "  Cluster {}: {} samples ({:.1}%)",
            id,
            cluster.len(),
            (cluster.len() as f64 / n_samples as f64) * 100.0
        );
    }
    println!();

    let criteria = Criteria::new(&pool);
    println!("Validity indices at k={}:", n_clusters);
    for (index, value) in criteria.evaluate_many(
        CritIndex::all(),
        &dataset,
        ClusterInput::Clusters(&partition),
        None,
    ) {
        println!("  {:<20} {:.6}", index.name(), value);
    }
    println!();

    // Sweep a range of k and let each index pick its favourite
    let config = SweepConfig::new(2, 8).with_seed(0);
    let sweep = CritSweep::new(config).expect("Invalid sweep configuration");
    let report = sweep.run(&dataset);

    println!("Best k per index over k=2..=8:");
    for index in CritIndex::all() {
        match report.selection(index.name()) {
            Some(k) => println!("  {:<20} k={} ({})", index.name(), k, index.selection_rule()),
            None => println!("  {:<20} no valid score", index.name()),
        }
    }

    println!("\n=== Done! ===");
}
