//! Helpers for collecting statistics.

use std::collections::*;
use itertools::*;

use crate::branch::*;

/// Container for recording prediction accuracy while evaluating a model.
#[derive(Clone, Debug, Default)]
pub struct PredictorStats {
    /// Number of times any branch was predicted
    pub total: u64,

    /// Number of correct predictions
    pub correct: u64,

    /// Per-branch statistics (indexed by program counter value), only
    /// collected when enabled with [PredictorStats::with_branches].
    pub data: Option<BTreeMap<u64, BranchData>>,
}
impl PredictorStats {
    pub fn new() -> Self { Self::default() }

    /// Also collect per-branch statistics.
    pub fn with_branches() -> Self {
        Self { data: Some(BTreeMap::new()), ..Self::default() }
    }

    /// Return the fraction of correct predictions (0.0 when empty).
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    /// Return the number of incorrect predictions.
    pub fn misses(&self) -> u64 { self.total - self.correct }

    /// Record a prediction made for some branch.
    pub fn record(&mut self, record: &BranchRecord, prediction: Outcome) {
        let hit = prediction == record.outcome;
        self.total += 1;
        if hit { self.correct += 1; }

        if let Some(data) = self.data.as_mut() {
            let entry = data.entry(record.pc).or_default();
            entry.occ += 1;
            if hit { entry.hits += 1; }
        }
    }

    /// Returns the number of unique observed branches, if tracked.
    pub fn num_unique_branches(&self) -> Option<usize> {
        self.data.as_ref().map(|d| d.len())
    }

    /// Return the 'n' branches with the most mispredictions.
    pub fn worst_branches(&self, n: usize) -> Vec<(u64, &BranchData)> {
        let Some(data) = self.data.as_ref() else {
            return Vec::new();
        };
        data.iter()
            .filter(|(_, s)| s.misses() > 0)
            .sorted_by(|x, y| {
                y.1.misses().cmp(&x.1.misses()).then(x.0.cmp(y.0))
            })
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }
}

/// Container for per-branch statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: u64,

    /// Number of correct predictions for this branch.
    pub hits: u64,
}
impl BranchData {
    /// Return the hit rate for this branch.
    pub fn hit_rate(&self) -> f64 {
        if self.occ == 0 { 0.0 } else { self.hits as f64 / self.occ as f64 }
    }

    pub fn misses(&self) -> u64 { self.occ - self.hits }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_accuracy_is_zero() {
        let s = PredictorStats::new();
        assert_eq!(s.accuracy(), 0.0);
        assert_eq!(s.misses(), 0);
    }

    #[test]
    fn counts_hits() {
        let mut s = PredictorStats::new();
        s.record(&BranchRecord::taken(0x10), Outcome::T);
        s.record(&BranchRecord::taken(0x10), Outcome::N);
        s.record(&BranchRecord::not_taken(0x14), Outcome::N);
        s.record(&BranchRecord::not_taken(0x14), Outcome::N);
        assert_eq!((s.total, s.correct), (4, 3));
        assert_eq!(s.accuracy(), 0.75);
        assert_eq!(s.num_unique_branches(), None);
        assert!(s.worst_branches(4).is_empty());
    }

    #[test]
    fn per_branch() {
        let mut s = PredictorStats::with_branches();
        for _ in 0..3 {
            s.record(&BranchRecord::taken(0x20), Outcome::N);
        }
        s.record(&BranchRecord::taken(0x10), Outcome::N);
        s.record(&BranchRecord::taken(0x30), Outcome::T);
        assert_eq!(s.num_unique_branches(), Some(3));

        let worst = s.worst_branches(8);
        assert_eq!(worst.len(), 2);
        assert_eq!(worst[0].0, 0x20);
        assert_eq!(worst[0].1.misses(), 3);
        assert_eq!(worst[1].0, 0x10);
        assert_eq!(worst[1].1.hit_rate(), 0.0);
    }
}
