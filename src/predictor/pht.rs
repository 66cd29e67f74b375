//! Implementation of a pattern history table (PHT).

use crate::Outcome;
use crate::error::ConfigError;
use crate::history::*;
use crate::predictor::automaton::*;
use crate::predictor::table::*;

/// A table of automaton states indexed directly by a k-bit history.
///
/// There are exactly 2^k entries, one for every possible history.
#[derive(Clone, Debug)]
pub struct PatternTable {
    /// Automaton driving every entry
    automaton: Automaton,

    /// Length of the history used for indexing
    history_bits: usize,

    /// Table of automaton states
    data: Vec<u8>,
}
impl PatternTable {
    pub fn new(history_bits: usize, automaton: Automaton)
        -> Result<Self, ConfigError>
    {
        check_history_bits(history_bits)?;
        Ok(Self {
            automaton,
            history_bits,
            data: vec![automaton.initial_state(); 1 << history_bits],
        })
    }

    pub fn automaton(&self) -> Automaton { self.automaton }
    pub fn history_bits(&self) -> usize { self.history_bits }

    /// Returns the number of entries in the table.
    pub fn entry_count(&self) -> usize { self.data.len() }

    /// Convert a history into an index, dropping any bits above k.
    pub fn get_index(&self, history: History) -> usize {
        history.index() & index_mask(self.data.len())
    }

    /// Returns the automaton state selected by `history`.
    pub fn state(&self, history: History) -> u8 {
        self.data[self.get_index(history)]
    }

    /// Predict the outcome that follows `history`.
    pub fn predict(&self, history: History) -> Outcome {
        self.automaton.predict(self.state(history))
    }

    /// Train the entry selected by `history` with the actual outcome.
    pub fn update(&mut self, history: History, outcome: Outcome) {
        let idx = self.get_index(history);
        self.data[idx] = self.automaton.next_state(self.data[idx], outcome);
    }

    /// Approximate number of storage bits.
    pub fn storage_bits(&self) -> usize {
        self.entry_count() * self.automaton.storage_bits()
    }
}
