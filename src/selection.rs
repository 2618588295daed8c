//! Picking the best cluster count from a sweep of scores.

use std::collections::BTreeMap;
use std::fmt;

/// How the best k is read off a sequence of scores ordered by ascending k.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionRule {
    /// Largest score.
    Max,
    /// Smallest score.
    Min,
    /// Largest absolute jump between consecutive scores (an "elbow").
    MaxDiff,
    /// Smallest absolute jump between consecutive scores.
    MinDiff,
}

impl SelectionRule {
    /// Whether larger values of the underlying score are better.
    pub fn prefers_large(&self) -> bool {
        matches!(self, SelectionRule::Max | SelectionRule::MaxDiff)
    }

    /// The worst possible score under this rule.
    pub fn sentinel(&self) -> f64 {
        if self.prefers_large() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    }
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionRule::Max => "max",
            SelectionRule::Min => "min",
            SelectionRule::MaxDiff => "max diff",
            SelectionRule::MinDiff => "min diff",
        };
        f.write_str(name)
    }
}

/// Apply `rule` to `scores` (keyed by k) and return the selected k.
///
/// Non-finite scores never win. For the difference rules, a jump is only
/// measured between two neighbouring finite scores and the k reported is the
/// larger of the pair. Ties keep the smallest k. Returns `None` when no
/// score qualifies.
pub fn select_best_k(scores: &BTreeMap<usize, f64>, rule: SelectionRule) -> Option<usize> {
    match rule {
        SelectionRule::Max => extreme(scores.iter().map(|(&k, &s)| (k, s)), |a, b| a > b),
        SelectionRule::Min => extreme(scores.iter().map(|(&k, &s)| (k, s)), |a, b| a < b),
        SelectionRule::MaxDiff => extreme(jumps(scores), |a, b| a > b),
        SelectionRule::MinDiff => extreme(jumps(scores), |a, b| a < b),
    }
}

fn jumps(scores: &BTreeMap<usize, f64>) -> impl Iterator<Item = (usize, f64)> + '_ {
    scores
        .iter()
        .zip(scores.iter().skip(1))
        .filter(|((_, prev), (_, cur))| prev.is_finite() && cur.is_finite())
        .map(|((_, &prev), (&k, &cur))| (k, (cur - prev).abs()))
}

fn extreme(
    candidates: impl Iterator<Item = (usize, f64)>,
    better: impl Fn(f64, f64) -> bool,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (k, score) in candidates.filter(|(_, s)| s.is_finite()) {
        match best {
            Some((_, b)) if !better(score, b) => {}
            _ => best = Some((k, score)),
        }
    }
    best.map(|(k, _)| k)
}
