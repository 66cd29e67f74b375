//! Implementation of a two-level adaptive predictor.
//!
//! The first level is a table of per-branch history registers. The second
//! level is a pattern table holding one automaton for every possible
//! history. See "Two-Level Adaptive Training Branch Prediction" (Yeh and
//! Patt, 1991).

pub mod config;
pub use config::*;

use tracing::debug;

use crate::Outcome;
use crate::error::ConfigError;
use crate::history::*;
use crate::predictor::*;

/// A two-level adaptive predictor built from a [TwoLevelConfig].
#[derive(Clone, Debug)]
pub struct TwoLevelPredictor {
    /// The configuration used to create this object
    cfg: TwoLevelConfig,

    /// Label reported for this scheme
    name: String,

    /// First level: per-branch history
    hrt: HistoryRegisterTable,

    /// Second level: per-pattern automata
    pht: PatternTable,
}
impl TwoLevelPredictor {
    pub fn new(cfg: TwoLevelConfig) -> Result<Self, ConfigError> {
        let name = cfg.label();
        let hrt = HistoryRegisterTable::new(
            cfg.hrt, cfg.entries, cfg.ways, cfg.history_bits
        ).map_err(|e| e.in_scheme(&name))?;
        let pht = PatternTable::new(cfg.history_bits, cfg.automaton)
            .map_err(|e| e.in_scheme(&name))?;

        let res = Self { cfg, name, hrt, pht };
        debug!(scheme = %res.name, hrt_entries = res.hrt.capacity(),
            pht_entries = res.pht.entry_count(),
            "built two-level predictor");
        Ok(res)
    }

    pub fn cfg(&self) -> &TwoLevelConfig { &self.cfg }
    pub fn hrt(&self) -> &HistoryRegisterTable { &self.hrt }
    pub fn pht(&self) -> &PatternTable { &self.pht }

    /// Return the history currently associated with the branch at `pc`.
    pub fn history(&self, pc: u64) -> History {
        self.hrt.get(pc)
    }

    /// Approximate hardware cost in bits: every history register plus
    /// 2 bits for every pattern table entry.
    pub fn hardware_cost_bits(&self) -> usize {
        let hrt_bits = self.hrt.capacity() * self.cfg.history_bits;
        hrt_bits + self.pht.storage_bits()
    }
}

impl BranchPredictor for TwoLevelPredictor {
    fn name(&self) -> &str { &self.name }

    fn predict(&self, pc: u64) -> Outcome {
        self.pht.predict(self.hrt.get(pc))
    }

    fn update(&mut self, pc: u64, outcome: Outcome) {
        // The pattern table is trained with the history that was used to
        // make the prediction, before the new outcome is shifted in.
        let old = self.hrt.get(pc);
        self.pht.update(old, outcome);
        let new = old.shift_in(outcome, self.cfg.history_bits);
        self.hrt.set(pc, new);
    }

    fn storage_bits(&self) -> usize { self.hardware_cost_bits() }
}

#[cfg(test)]
mod test {
    use super::*;
    use Outcome::*;

    fn run(p: &mut TwoLevelPredictor, pc: u64, outcomes: &[Outcome])
        -> Vec<Outcome>
    {
        let mut res = Vec::new();
        for outcome in outcomes {
            res.push(p.predict(pc));
            p.update(pc, *outcome);
        }
        res
    }

    #[test]
    fn short_sequence_single_branch() {
        let mut p = TwoLevelConfig::ideal(2, Automaton::Counter2)
            .build().unwrap();
        let pc = 0x40_1000;
        let outcomes = [T, T, N, T];
        let mut preds = run(&mut p, pc, &outcomes[..3]);
        assert_eq!(p.history(pc).value(), 0b10);
        preds.extend(run(&mut p, pc, &outcomes[3..]));
        assert_eq!(preds, vec![T, T, T, T]);

        let correct = preds.iter().zip(outcomes.iter())
            .filter(|(p, o)| p == o)
            .count();
        assert_eq!(correct, 3);

        // 11 -(T)-> 11 -(T)-> 11 -(N)-> 10 -(T)-> 01
        // The only entry trained with a 'not-taken' is 0b11.
        assert_eq!(p.history(pc).value(), 0b01);
        assert_eq!(p.pht().state(History::new(0b11)), 2);
        assert_eq!(p.pht().state(History::new(0b10)), 3);
        assert_eq!(p.pht().state(p.history(pc)), 3);
    }

    #[test]
    fn predict_is_idempotent() {
        let mut p = TwoLevelConfig::associative(16, 4, 4, Automaton::Counter2)
            .build().unwrap();
        let pc = 0x1000;
        p.update(pc, N);
        p.update(pc, N);
        let first = p.predict(pc);
        let hist = p.history(pc);
        for _ in 0..8 {
            assert_eq!(p.predict(pc), first);
            assert_eq!(p.history(pc), hist);
        }
    }

    #[test]
    fn learns_alternating_pattern() {
        let mut p = TwoLevelConfig::hashed(64, 4, Automaton::Counter2)
            .build().unwrap();
        let outcomes: Vec<Outcome> = (0..64)
            .map(|i| if i % 2 == 0 { T } else { N })
            .collect();
        let preds = run(&mut p, 0x2000, &outcomes);
        let tail_hits = preds[16..].iter().zip(outcomes[16..].iter())
            .filter(|(p, o)| p == o)
            .count();
        assert_eq!(tail_hits, outcomes.len() - 16);
    }

    #[test]
    fn evicted_branch_inherits_history() {
        // One set, two ways
        let mut p = TwoLevelConfig::associative(2, 2, 4, Automaton::Counter2)
            .build().unwrap();
        let (a, b, c) = (0x1000, 0x2000, 0x3000);
        for o in [N, N, T, N] {
            p.update(a, o);
        }
        p.update(b, T);
        assert_eq!(p.history(a).value(), 0b0010);

        // 'c' takes the line owned by 'a' and starts from its history
        assert_eq!(p.history(c).value(), 0b0010);
        p.update(c, T);
        assert_eq!(p.history(c).value(), 0b0101);
        assert_eq!(p.history(a).value(), p.history(b).value());
    }

    #[test]
    fn hardware_cost() {
        let p = TwoLevelConfig::associative(512, 4, 12, Automaton::Counter2)
            .build().unwrap();
        assert_eq!(p.hardware_cost_bits(), 512 * 12 + 4096 * 2);

        let mut p = TwoLevelConfig::ideal(6, Automaton::LastOutcome)
            .build().unwrap();
        assert_eq!(p.hardware_cost_bits(), 64 * 2);
        p.update(0x10, T);
        p.update(0x20, T);
        p.update(0x10, N);
        assert_eq!(p.hardware_cost_bits(), 2 * 6 + 64 * 2);
    }

    fn assert_non_decreasing(cfgs: impl IntoIterator<Item = TwoLevelConfig>) {
        let mut last = 0;
        for cfg in cfgs {
            let label = cfg.label();
            let cost = cfg.build().unwrap().hardware_cost_bits();
            assert!(cost >= last, "{} costs {} < {}", label, cost, last);
            last = cost;
        }
    }

    #[test]
    fn cost_is_monotonic_in_entries() {
        let sizes = [16, 32, 64, 128, 256, 512, 1024];
        assert_non_decreasing(sizes.iter()
            .map(|n| TwoLevelConfig::hashed(*n, 8, Automaton::Counter2)));
        assert_non_decreasing(sizes.iter()
            .map(|n| TwoLevelConfig::associative(*n, 4, 8, Automaton::Counter2)));
    }

    #[test]
    fn cost_is_monotonic_in_history_bits() {
        assert_non_decreasing((1..=16)
            .map(|k| TwoLevelConfig::hashed(256, k, Automaton::Counter2)));
        assert_non_decreasing((1..=16)
            .map(|k| TwoLevelConfig::associative(256, 4, k, Automaton::Counter4)));
        assert_non_decreasing((1..=16)
            .map(|k| TwoLevelConfig::ideal(k, Automaton::LastOutcome)));

        // With the same branches written, a longer history never costs less
        let mut last = 0;
        for k in 1..=16 {
            let mut p = TwoLevelConfig::ideal(k, Automaton::Counter2)
                .build().unwrap();
            for pc in [0x10, 0x20, 0x30] {
                p.update(pc, Outcome::T);
            }
            let cost = p.hardware_cost_bits();
            assert_eq!(cost, 3 * k + (1 << k) * 2);
            assert!(cost >= last);
            last = cost;
        }
    }

    #[test]
    fn history_stays_within_k_bits() {
        use rand::prelude::*;
        use rand::rngs::StdRng;
        let mut rng = StdRng::seed_from_u64(42);
        for cfg in TwoLevelConfig::default_schemes() {
            let k = cfg.history_bits;
            let mut p = cfg.build().unwrap();
            for _ in 0..2000 {
                let pc = rng.gen_range(0..4096u64) << ALIGN_BITS;
                let outcome = Outcome::from_bool(rng.gen_bool(0.6));
                p.predict(pc);
                p.update(pc, outcome);
                assert!(p.history(pc).value() <= history_mask(k));
            }
        }
    }

    #[test]
    fn instances_do_not_share_tables() {
        let cfg = TwoLevelConfig::hashed(16, 4, Automaton::Counter2);
        let mut p0 = cfg.clone().build().unwrap();
        let p1 = cfg.build().unwrap();
        for _ in 0..8 {
            p0.update(0x40, N);
        }
        assert_eq!(p0.predict(0x40), N);
        assert_eq!(p1.predict(0x40), T);
        assert_eq!(p1.history(0x40).value(), 0b1111);
    }
}
