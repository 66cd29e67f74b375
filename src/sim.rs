//! Evaluating many predictors over a single trace.

use serde::Serialize;
use tracing::{ debug, warn };

use crate::branch::*;
use crate::error::ConfigError;
use crate::predictor::*;
use crate::stats::*;

/// A predictor under evaluation, along with its statistics.
pub struct Candidate {
    pub predictor: Box<dyn BranchPredictor>,
    pub stats: PredictorStats,

    /// Set for the comparison predictors
    pub baseline: bool,
}

/// One row of results for a predictor.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SchemeResult {
    pub scheme: String,
    pub total: u64,
    pub correct: u64,
    /// Fraction of correct predictions in [0, 1]
    pub accuracy: f64,
    /// Approximate hardware cost in bits (0 for the baselines)
    pub hw_bits: usize,
    #[serde(skip)]
    pub baseline: bool,
}

/// Runs a set of independent predictors over the same stream of branches.
///
/// Each predictor owns its tables. For every record, each predictor makes
/// a prediction, is scored, and is then updated with the outcome.
#[derive(Default)]
pub struct Evaluation {
    candidates: Vec<Candidate>,
    track_branches: bool,
}
impl Evaluation {
    pub fn new() -> Self { Self::default() }

    /// Also collect per-branch statistics for predictors added afterwards.
    pub fn track_branches(mut self, enable: bool) -> Self {
        self.track_branches = enable;
        self
    }

    /// Add a predictor to the evaluation.
    pub fn add(&mut self, predictor: impl BranchPredictor + 'static) {
        self.push(Box::new(predictor), false);
    }

    fn push(&mut self, predictor: Box<dyn BranchPredictor>, baseline: bool) {
        let stats = if self.track_branches {
            PredictorStats::with_branches()
        } else {
            PredictorStats::new()
        };
        self.candidates.push(Candidate { predictor, stats, baseline });
    }

    /// Build and add a two-level predictor for each configuration.
    ///
    /// A configuration that can't be built is skipped and returned, so
    /// one bad scheme doesn't prevent the others from running.
    pub fn add_schemes(&mut self, cfgs: impl IntoIterator<Item = TwoLevelConfig>)
        -> Vec<ConfigError>
    {
        let mut errors = Vec::new();
        for cfg in cfgs {
            match cfg.build() {
                Ok(p) => self.add(p),
                Err(e) => {
                    warn!("skipping scheme: {}", e);
                    errors.push(e);
                },
            }
        }
        errors
    }

    /// Add the always-taken and per-branch 2-bit counter baselines.
    pub fn add_baselines(&mut self) {
        self.push(Box::new(TakenPredictor), true);
        self.push(Box::new(BimodalPredictor::new()), true);
    }

    pub fn candidates(&self) -> &[Candidate] { &self.candidates }

    /// Feed one branch to every predictor.
    pub fn step(&mut self, record: &BranchRecord) {
        for c in self.candidates.iter_mut() {
            let prediction = c.predictor.predict(record.pc);
            c.stats.record(record, prediction);
            c.predictor.update(record.pc, record.outcome);
        }
    }

    /// Feed every record, in order, to every predictor.
    pub fn run<'a>(&mut self, records: impl IntoIterator<Item = &'a BranchRecord>) {
        let mut n = 0usize;
        for record in records {
            self.step(record);
            n += 1;
        }
        debug!(records = n, predictors = self.candidates.len(),
            "evaluation pass complete");
    }

    /// Collect one [SchemeResult] per predictor, in insertion order.
    pub fn results(&self) -> Vec<SchemeResult> {
        self.candidates.iter().map(|c| SchemeResult {
            scheme: c.predictor.name().to_string(),
            total: c.stats.total,
            correct: c.stats.correct,
            accuracy: c.stats.accuracy(),
            hw_bits: c.predictor.storage_bits(),
            baseline: c.baseline,
        }).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::trace::synth::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_trace() {
        let mut e = Evaluation::new();
        e.add_baselines();
        let records: Vec<BranchRecord> = Vec::new();
        e.run(&records);
        for r in e.results() {
            assert_eq!((r.total, r.correct), (0, 0));
            assert_eq!(r.accuracy, 0.0);
        }
    }

    #[test]
    fn bad_scheme_is_skipped() {
        let mut e = Evaluation::new();
        let errors = e.add_schemes([
            TwoLevelConfig::associative(512, 4, 12, Automaton::Counter2),
            TwoLevelConfig::associative(512, 3, 12, Automaton::Counter2),
            TwoLevelConfig::ideal(12, Automaton::Counter2),
        ]);
        assert_eq!(errors.len(), 1);
        assert_eq!(e.candidates().len(), 2);
        assert!(errors[0].to_string().contains("AT_AHRT_512_12_A2"));
    }

    #[test]
    fn single_branch_tallies() {
        let records = [
            BranchRecord::taken(0xa0),
            BranchRecord::taken(0xa0),
            BranchRecord::not_taken(0xa0),
            BranchRecord::taken(0xa0),
        ];
        let mut e = Evaluation::new();
        e.add_schemes([TwoLevelConfig::ideal(2, Automaton::Counter2)]);
        e.add_baselines();
        e.run(&records);

        assert_eq!(e.results(), vec![
            SchemeResult {
                scheme: "AT_IHRT_2_A2".to_string(),
                total: 4, correct: 3, accuracy: 0.75, hw_bits: 2 + 4 * 2,
                baseline: false,
            },
            SchemeResult {
                scheme: "AlwaysTaken".to_string(),
                total: 4, correct: 3, accuracy: 0.75, hw_bits: 0,
                baseline: true,
            },
            SchemeResult {
                scheme: "Bimodal2Bit".to_string(),
                total: 4, correct: 3, accuracy: 0.75, hw_bits: 0,
                baseline: true,
            },
        ]);
    }

    #[test]
    fn accuracy_in_range() {
        let records = TraceAssembler::mixed(64, 3).compile(200);
        let mut e = Evaluation::new().track_branches(true);
        e.add_schemes(TwoLevelConfig::default_schemes());
        e.add_baselines();
        e.run(&records);
        for (r, c) in e.results().iter().zip(e.candidates()) {
            assert_eq!(r.total, records.len() as u64);
            assert!((0.0..=1.0).contains(&r.accuracy));
            assert_eq!(c.stats.num_unique_branches(), Some(64));
        }
    }
}
