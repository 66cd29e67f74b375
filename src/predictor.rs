//! Implementations of different branch predictors.

pub mod automaton;
pub mod table;
pub mod hrt;
pub mod pht;
pub mod two_level;
pub mod simple;
pub mod bimodal;

pub use automaton::*;
pub use table::*;
pub use hrt::*;
pub use pht::*;
pub use two_level::*;
pub use simple::*;
pub use bimodal::*;

use crate::Outcome;

/// Interface to a predictor that guesses the outcome of a branch at some
/// program counter, and is then told the correct outcome.
///
/// For every dynamic branch the caller invokes [BranchPredictor::predict]
/// and then [BranchPredictor::update] with the same program counter.
pub trait BranchPredictor {
    fn name(&self) -> &str;

    /// Return the predicted outcome. This never changes any state.
    fn predict(&self, pc: u64) -> Outcome;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, pc: u64, outcome: Outcome);

    /// Approximate number of storage bits used by this predictor.
    fn storage_bits(&self) -> usize { 0 }
}
