
use std::collections::HashMap;

use crate::Outcome;
use crate::predictor::*;

/// A table of 2-bit saturating counters keyed by program counter.
///
/// Every static branch gets its own counter, so there is no aliasing and
/// no history. Unseen branches read as strongly 'taken'.
#[derive(Clone, Debug)]
pub struct BimodalPredictor {
    automaton: Automaton,
    data: HashMap<u64, u8>,
}
impl BimodalPredictor {
    pub fn new() -> Self {
        Self {
            automaton: Automaton::Counter2,
            data: HashMap::new(),
        }
    }

    /// Returns the counter state for the branch at `pc`.
    pub fn state(&self, pc: u64) -> u8 {
        self.data.get(&pc).copied()
            .unwrap_or(self.automaton.initial_state())
    }

    /// Number of distinct branches observed so far.
    pub fn num_branches(&self) -> usize { self.data.len() }
}
impl Default for BimodalPredictor {
    fn default() -> Self { Self::new() }
}

impl BranchPredictor for BimodalPredictor {
    fn name(&self) -> &str { "Bimodal2Bit" }

    fn predict(&self, pc: u64) -> Outcome {
        self.automaton.predict(self.state(pc))
    }

    fn update(&mut self, pc: u64, outcome: Outcome) {
        let next = self.automaton.next_state(self.state(pc), outcome);
        self.data.insert(pc, next);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use Outcome::*;

    #[test]
    fn per_branch_counters() {
        let mut p = BimodalPredictor::new();
        assert_eq!(p.predict(0x100), T);
        p.update(0x100, N);
        assert_eq!(p.predict(0x100), T);
        p.update(0x100, N);
        assert_eq!(p.predict(0x100), N);
        assert_eq!(p.state(0x100), 1);

        // Neighbouring branches are unaffected
        assert_eq!(p.predict(0x104), T);
        assert_eq!(p.state(0x104), 3);
        assert_eq!(p.num_branches(), 1);
    }

    #[test]
    fn counter_saturates() {
        let mut p = BimodalPredictor::new();
        for _ in 0..10 {
            p.update(0x200, N);
        }
        assert_eq!(p.state(0x200), 0);
        p.update(0x200, T);
        assert_eq!(p.predict(0x200), N);
        p.update(0x200, T);
        assert_eq!(p.predict(0x200), T);
    }
}
