
use crate::Outcome;
use crate::predictor::BranchPredictor;

/// A simple predictor with no state: always predict 'taken'.
#[derive(Clone, Copy, Debug, Default)]
pub struct TakenPredictor;
impl BranchPredictor for TakenPredictor {
    fn name(&self) -> &str { "AlwaysTaken" }
    fn predict(&self, _pc: u64) -> Outcome { Outcome::T }
    fn update(&mut self, _pc: u64, _outcome: Outcome) {}
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn always_taken() {
        let mut p = TakenPredictor;
        for pc in [0, 4, 0xffff_fffc] {
            assert_eq!(p.predict(pc), Outcome::T);
            p.update(pc, Outcome::N);
            assert_eq!(p.predict(pc), Outcome::T);
        }
        assert_eq!(p.storage_bits(), 0);
    }
}
