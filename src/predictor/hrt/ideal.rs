
use std::collections::HashMap;

use crate::error::ConfigError;
use crate::history::*;
use crate::predictor::table::*;

/// An "ideal" history table with one register per static branch.
///
/// There is no capacity limit and no interference between branches. This
/// bounds the accuracy of the other disciplines from above.
#[derive(Clone, Debug)]
pub struct IdealHrt {
    history_bits: usize,
    data: HashMap<u64, History>,
}
impl IdealHrt {
    pub fn new(history_bits: usize) -> Result<Self, ConfigError> {
        check_history_bits(history_bits)?;
        Ok(Self {
            history_bits,
            data: HashMap::new(),
        })
    }
}

impl HistoryTable for IdealHrt {
    fn history_bits(&self) -> usize { self.history_bits }

    // A miss does not allocate an entry.
    fn get(&self, pc: u64) -> History {
        self.data.get(&pc).copied()
            .unwrap_or_else(|| self.default_history())
    }

    fn set(&mut self, pc: u64, history: History) {
        let history = history.masked(self.history_bits);
        self.data.insert(pc, history);
    }

    fn capacity(&self) -> usize { self.data.len() }
}
