use crate::config::SweepConfig;
use crate::criteria::{ClusterInput, Criteria};
use crate::dataset::Dataset;
use crate::engine::CriteriaEngine;
use crate::error::{CritError, Result};
use crate::partition::{assign_clusters, Partition};
use crate::pool::WorkerPool;
use crate::seeding::seed_centroids;
use crate::selection::{select_best_k, SelectionRule};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;
use std::time::Instant;
use tracing::{debug, info, warn};

/// An inclusive range of cluster counts, both ends at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterRange {
    min: usize,
    max: usize,
}

impl ClusterRange {
    /// # Errors
    ///
    /// Returns [`CritError::InvalidClusterRange`] if either end is zero
    /// or `min > max`.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min == 0 || max == 0 {
            return Err(CritError::InvalidClusterRange(
                "cluster counts must be at least 1".to_string(),
            ));
        }
        if min > max {
            return Err(CritError::InvalidClusterRange(format!(
                "lower bound {} exceeds upper bound {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Build a range from one or two user-supplied bounds.
    ///
    /// One value gives a single-element range; two values are ordered
    /// automatically. Anything else is rejected.
    pub fn from_bounds(bounds: &[usize]) -> Result<Self> {
        match bounds {
            [] => Err(CritError::InvalidClusterRange(
                "no cluster counts given".to_string(),
            )),
            [only] => Self::new(*only, *only),
            [a, b] => Self::new((*a).min(*b), (*a).max(*b)),
            _ => Err(CritError::InvalidClusterRange(format!(
                "expected one or two bounds, got {}",
                bounds.len()
            ))),
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn iter(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

/// Everything a sweep produced.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Partition for every k that could be seeded.
    pub partitions: BTreeMap<usize, Partition>,
    /// Dataset index of the first centroid, per k.
    pub seeds: BTreeMap<usize, usize>,
    /// Score per criterion name, per k.
    pub scores: BTreeMap<String, BTreeMap<usize, f64>>,
    /// Selection rule per criterion name, where one is known.
    pub rules: BTreeMap<String, SelectionRule>,
    /// Best k per criterion name; `None` if no score qualified or no rule is known.
    pub selections: BTreeMap<String, Option<usize>>,
    /// Cluster counts whose partition contains a singleton cluster.
    pub singleton_ks: BTreeSet<usize>,
}

impl SweepReport {
    pub fn score(&self, criterion: &str, k: usize) -> Option<f64> {
        self.scores.get(criterion)?.get(&k).copied()
    }

    pub fn selection(&self, criterion: &str) -> Option<usize> {
        self.selections.get(criterion).copied().flatten()
    }

    fn record(&mut self, criterion: &str, k: usize, value: f64) {
        self.scores
            .entry(criterion.to_string())
            .or_default()
            .insert(k, value);
    }
}

/// Seeds, assigns and scores a dataset for every cluster count in a range.
///
/// # Example
///
/// ```
/// use clustercrit_rs::{CritSweep, Dataset, Point, SweepConfig};
///
/// let data = Dataset::new(
///     [1.0, 2.0, 3.0, 10.0, 11.0, 12.0].iter().map(|&x| Point::scalar(x)).collect(),
/// )
/// .unwrap();
///
/// let sweep = CritSweep::new(SweepConfig::new(2, 3).with_seed(0).with_threads(2)).unwrap();
/// let report = sweep.run(&data);
/// assert_eq!(report.partitions[&2].len(), 2);
/// assert_eq!(report.selection("Calinski_Harabasz"), Some(2));
/// ```
pub struct CritSweep {
    config: SweepConfig,
    pool: WorkerPool,
    engines: Vec<Box<dyn CriteriaEngine>>,
}

impl CritSweep {
    /// Validate `config` and build the shared worker pool.
    pub fn new(config: SweepConfig) -> Result<Self> {
        config.validate()?;
        let pool = WorkerPool::with_chunk_len(config.threads, config.min_chunk_len)?;
        Ok(Self {
            config,
            pool,
            engines: Vec::new(),
        })
    }

    /// Register an external engine whose scores are added to every k.
    pub fn with_engine(mut self, engine: Box<dyn CriteriaEngine>) -> Self {
        self.engines.push(engine);
        self
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.config.min_k..=self.config.max_k
    }

    /// Run the sweep.
    ///
    /// A cluster count that cannot be seeded, or an engine that fails, only
    /// affects that k: native indices record their sentinel and the sweep
    /// moves on.
    pub fn run(&self, data: &Dataset) -> SweepReport {
        let start = Instant::now();
        let criteria = Criteria::new(&self.pool);
        let mut rng = match self.config.rng_seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };

        info!(
            n_samples = data.len(),
            dims = data.dims(),
            min_k = self.config.min_k,
            max_k = self.config.max_k,
            threads = self.pool.threads(),
            "starting sweep"
        );

        let mut report = SweepReport::default();
        for index in &self.config.indices {
            report
                .rules
                .insert(index.name().to_string(), index.selection_rule());
        }

        for k in self.range() {
            let k_start = Instant::now();
            let seeded = seed_centroids(&self.pool, data, k, self.config.seed, &mut rng);

            let Some(seed) = seeded.seed else {
                warn!(k, "seeding failed; recording sentinels");
                for index in &self.config.indices {
                    report.record(index.name(), k, index.sentinel());
                }
                continue;
            };

            let partition = assign_clusters(&self.pool, data, &seeded.centroids);
            if partition.has_singletons() {
                report.singleton_ks.insert(k);
            }

            let scores = criteria.evaluate_many(
                &self.config.indices,
                data,
                ClusterInput::Clusters(&partition),
                Some(k),
            );
            for (index, value) in scores {
                report.record(index.name(), k, value);
            }

            for engine in &self.engines {
                match engine.evaluate(data, &partition, k) {
                    Ok(named) => {
                        for score in named {
                            if !report.rules.contains_key(&score.name) {
                                if let Some(rule) = engine.selection_rule(&score.name) {
                                    report.rules.insert(score.name.clone(), rule);
                                }
                            }
                            report.record(&score.name, k, score.value);
                        }
                    }
                    Err(e) => warn!(engine = engine.name(), k, error = %e, "engine failed"),
                }
            }

            debug!(
                k,
                seed,
                clusters = partition.len(),
                elapsed_s = k_start.elapsed().as_secs_f64(),
                "scored cluster count"
            );
            report.seeds.insert(k, seed);
            report.partitions.insert(k, partition);
        }

        let selections: BTreeMap<String, Option<usize>> = report
            .scores
            .iter()
            .map(|(name, by_k)| {
                let best = report.rules.get(name).and_then(|&rule| select_best_k(by_k, rule));
                (name.clone(), best)
            })
            .collect();
        report.selections = selections;

        info!(
            elapsed_s = start.elapsed().as_secs_f64(),
            criteria = report.scores.len(),
            "sweep finished"
        );

        report
    }
}
