use super::dispersion::{bgss, wgss, wgss_k};
use super::{ClusterInput, CritIndex, Criteria};
use crate::dataset::Dataset;
use crate::distance::{max_intra_group_distance, min_inter_group_distance, pairwise_distances};
use crate::point::{mean, Point};
use tracing::debug;

fn degenerate(index: CritIndex, reason: &str) -> f64 {
    debug!(index = index.name(), reason, "degenerate input; returning sentinel");
    index.sentinel()
}

impl<'p> Criteria<'p> {
    /// Ball-Hall: mean over clusters of the mean squared distance to the
    /// cluster centre.
    pub fn ball_hall(&self, data: &Dataset, input: ClusterInput<'_>) -> f64 {
        let Some(partition) = self.resolve(data, input) else {
            return CritIndex::BallHall.sentinel();
        };

        let total: f64 = partition
            .iter()
            .map(|(_, c)| wgss_k(c.points()) / c.len() as f64)
            .sum();

        total / partition.len() as f64
    }

    /// Banfeld-Raftery: `Σ n_k · ln(WGSS_k / n_k)`.
    ///
    /// Clusters whose mean dispersion is not positive (singletons, repeated
    /// points) are left out of the sum.
    pub fn banfeld_raftery(&self, data: &Dataset, input: ClusterInput<'_>) -> f64 {
        let Some(partition) = self.resolve(data, input) else {
            return CritIndex::BanfeldRaftery.sentinel();
        };

        partition
            .iter()
            .filter_map(|(_, c)| {
                let n_k = c.len() as f64;
                let ratio = wgss_k(c.points()) / n_k;
                (ratio > 0.0).then(|| n_k * ratio.ln())
            })
            .sum()
    }

    /// C-Index: `(Sw − Smin) / (Smax − Smin)`.
    ///
    /// `Sw` sums the within-cluster pair distances; `Smin` and `Smax` sum the
    /// `Nw` smallest and largest pair distances over the whole dataset, where
    /// `Nw` is the number of within-cluster pairs.
    pub fn c_index(&self, data: &Dataset, input: ClusterInput<'_>) -> f64 {
        let Some(partition) = self.resolve(data, input) else {
            return CritIndex::CIndex.sentinel();
        };

        let mut sw = 0.0;
        let mut nw = 0usize;
        for (_, cluster) in partition.iter() {
            sw += pairwise_distances(self.pool, cluster.points()).iter().sum::<f64>();
            let n_k = cluster.len();
            nw += n_k * n_k.saturating_sub(1) / 2;
        }

        let mut all = pairwise_distances(self.pool, data.points());
        all.sort_unstable_by(f64::total_cmp);

        let nw = nw.min(all.len());
        let s_min: f64 = all[..nw].iter().sum();
        let s_max: f64 = all[all.len() - nw..].iter().sum();

        if s_max == s_min {
            return degenerate(CritIndex::CIndex, "zero-width distance range");
        }

        (sw - s_min) / (s_max - s_min)
    }

    /// Calinski-Harabasz: `((N − k) / (k − 1)) · BGSS / WGSS`.
    pub fn calinski_harabasz(
        &self,
        data: &Dataset,
        input: ClusterInput<'_>,
        k: Option<usize>,
    ) -> f64 {
        let Some(partition) = self.resolve(data, input) else {
            return CritIndex::CalinskiHarabasz.sentinel();
        };

        let k = k.unwrap_or_else(|| partition.k());
        if k <= 1 {
            return degenerate(CritIndex::CalinskiHarabasz, "k must exceed 1");
        }

        let within = wgss(&partition);
        if within == 0.0 {
            return degenerate(CritIndex::CalinskiHarabasz, "zero within-cluster dispersion");
        }

        let n = data.len() as f64;
        let k = k as f64;
        ((n - k) / (k - 1.0)) * (bgss(data, &partition) / within)
    }

    /// Dunn: smallest inter-cluster distance over largest intra-cluster distance.
    pub fn dunn(&self, data: &Dataset, input: ClusterInput<'_>) -> f64 {
        let Some(partition) = self.resolve(data, input) else {
            return CritIndex::Dunn.sentinel();
        };

        let groups = partition.groups();
        let Some(d_min) = min_inter_group_distance(self.pool, &groups) else {
            return degenerate(CritIndex::Dunn, "fewer than two clusters");
        };

        match max_intra_group_distance(self.pool, &groups) {
            Some(d_max) if d_max > 0.0 => d_min / d_max,
            _ => degenerate(CritIndex::Dunn, "zero intra-cluster diameter"),
        }
    }

    /// Xie-Beni: `WGSS / (k · δ²)` where `δ` is the smallest distance between
    /// two cluster means.
    pub fn xie_beni(&self, data: &Dataset, input: ClusterInput<'_>, k: Option<usize>) -> f64 {
        let Some(partition) = self.resolve(data, input) else {
            return CritIndex::XieBeni.sentinel();
        };

        if partition.len() < 2 {
            return degenerate(CritIndex::XieBeni, "fewer than two clusters");
        }

        let k = k.unwrap_or_else(|| partition.k());
        if k == 0 {
            return degenerate(CritIndex::XieBeni, "k is zero");
        }

        let means: Vec<Point> = partition
            .iter()
            .filter_map(|(_, c)| mean(c.points()).map(|agg| agg.point))
            .collect();

        let min_sep = pairwise_distances(self.pool, &means)
            .into_iter()
            .fold(f64::INFINITY, f64::min);

        if min_sep == 0.0 || !min_sep.is_finite() {
            return degenerate(CritIndex::XieBeni, "coincident cluster means");
        }

        wgss(&partition) / (k as f64 * min_sep * min_sep)
    }

    /// Trace W: the total within-cluster dispersion.
    pub fn trace_w(&self, data: &Dataset, input: ClusterInput<'_>) -> f64 {
        match self.resolve(data, input) {
            Some(partition) => wgss(&partition),
            None => CritIndex::TraceW.sentinel(),
        }
    }

    /// Log SS Ratio: `ln(BGSS / WGSS)`.
    pub fn log_ss_ratio(&self, data: &Dataset, input: ClusterInput<'_>) -> f64 {
        let Some(partition) = self.resolve(data, input) else {
            return CritIndex::LogSsRatio.sentinel();
        };

        let within = wgss(&partition);
        let between = bgss(data, &partition);
        if within <= 0.0 || between <= 0.0 {
            return degenerate(CritIndex::LogSsRatio, "zero dispersion");
        }

        (between / within).ln()
    }
}
