
use std::ops::Range;
use tracing::trace;

use crate::error::ConfigError;
use crate::history::*;
use crate::predictor::table::*;

/// A line in an [AssociativeHrt].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssocLine {
    pub valid: bool,
    pub tag: u64,
    pub history: History,
}

/// A set-associative history table.
///
/// The bits just above the alignment bits select a set, and the remaining
/// upper bits are the tag. A miss claims a line by round-robin within the
/// set. The claimed line keeps whatever history it held before: the new
/// branch starts out with the previous owner's register.
///
/// [HistoryTable::get] never modifies the table. On a miss it reports the
/// history held by the line the next [HistoryTable::set] will claim, so a
/// get/set pair on a new branch behaves as if the line had been installed
/// on the first access.
#[derive(Clone, Debug)]
pub struct AssociativeHrt {
    history_bits: usize,

    /// Total number of lines
    entries: usize,

    /// Lines per set
    ways: usize,

    /// Number of sets
    sets: usize,

    /// log2(sets)
    set_bits: u32,

    /// All lines, stored set-by-set
    lines: Vec<AssocLine>,

    /// Per-set round-robin replacement cursor
    next_victim: Vec<usize>,
}
impl AssociativeHrt {
    pub fn new(entries: usize, ways: usize, history_bits: usize)
        -> Result<Self, ConfigError>
    {
        check_history_bits(history_bits)?;
        if entries == 0 {
            return Err(ConfigError::ZeroEntries);
        }
        if ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if entries % ways != 0 {
            return Err(ConfigError::EntriesNotDivisible { entries, ways });
        }
        let sets = entries / ways;
        if !sets.is_power_of_two() {
            return Err(ConfigError::SetsNotPowerOfTwo { sets });
        }

        let line = AssocLine {
            valid: false,
            tag: 0,
            history: History::all_ones(history_bits),
        };
        Ok(Self {
            history_bits,
            entries,
            ways,
            sets,
            set_bits: sets.ilog2(),
            lines: vec![line; entries],
            next_victim: vec![0; sets],
        })
    }

    pub fn num_sets(&self) -> usize { self.sets }
    pub fn num_ways(&self) -> usize { self.ways }

    /// The set used by the branch at `pc`.
    pub fn set_index(&self, pc: u64) -> usize {
        pc_index(pc, index_mask(self.sets))
    }

    /// The tag stored for the branch at `pc`.
    pub fn tag(&self, pc: u64) -> u64 {
        pc >> (ALIGN_BITS + self.set_bits)
    }

    /// Return the lines belonging to a set.
    pub fn set_lines(&self, set: usize) -> &[AssocLine] {
        &self.lines[self.set_range(set)]
    }

    /// Returns 'true' if the branch at `pc` currently owns a line.
    pub fn contains(&self, pc: u64) -> bool {
        self.lookup(pc).is_some()
    }

    fn set_range(&self, set: usize) -> Range<usize> {
        let base = set * self.ways;
        base..base + self.ways
    }

    /// Find the line owned by `pc`, if any.
    fn lookup(&self, pc: u64) -> Option<usize> {
        let set = self.set_index(pc);
        let tag = self.tag(pc);
        self.set_range(set)
            .find(|idx| self.lines[*idx].valid && self.lines[*idx].tag == tag)
    }

    /// The line that the next miss in `set` will claim.
    fn victim(&self, set: usize) -> usize {
        set * self.ways + self.next_victim[set]
    }

    /// Claim a line in the set for `pc`. The history is left untouched.
    fn install(&mut self, pc: u64) -> usize {
        let set = self.set_index(pc);
        let idx = self.victim(set);
        self.next_victim[set] = (self.next_victim[set] + 1) % self.ways;

        let line = &mut self.lines[idx];
        if line.valid {
            trace!(set, way = idx - set * self.ways, old_tag = line.tag,
                new_tag = pc >> (ALIGN_BITS + self.set_bits),
                history = %line.history.display(self.history_bits),
                "evict");
        }
        line.valid = true;
        line.tag = pc >> (ALIGN_BITS + self.set_bits);
        idx
    }
}

impl HistoryTable for AssociativeHrt {
    fn history_bits(&self) -> usize { self.history_bits }

    fn get(&self, pc: u64) -> History {
        let idx = match self.lookup(pc) {
            Some(idx) => idx,
            None => self.victim(self.set_index(pc)),
        };
        self.lines[idx].history
    }

    fn set(&mut self, pc: u64, history: History) {
        let idx = match self.lookup(pc) {
            Some(idx) => idx,
            None => self.install(pc),
        };
        self.lines[idx].history = history.masked(self.history_bits);
    }

    fn capacity(&self) -> usize { self.entries }
}
