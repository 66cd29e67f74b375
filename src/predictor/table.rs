//! Types shared by first-level history tables.

use crate::error::ConfigError;
use crate::history::*;

/// Number of low program counter bits ignored when indexing a table
/// (branches are assumed to be word-aligned).
pub const ALIGN_BITS: u32 = 2;

/// Interface to a table of per-branch history registers.
///
/// Lookups never fail: an address with no recorded history reads as an
/// all-ones register.
pub trait HistoryTable {
    /// Returns the length (in bits) of the registers in this table.
    fn history_bits(&self) -> usize;

    /// Return the current history for the branch at `pc`.
    fn get(&self, pc: u64) -> History;

    /// Overwrite the history for the branch at `pc`. The value is
    /// truncated to [HistoryTable::history_bits] bits.
    fn set(&mut self, pc: u64, history: History);

    /// Number of entries charged for this table when estimating cost.
    fn capacity(&self) -> usize;

    /// The history reported for an address that has never been written.
    fn default_history(&self) -> History {
        History::all_ones(self.history_bits())
    }
}

/// Returns a bitmask for indexing a table with `size` entries.
pub fn index_mask(size: usize) -> usize {
    debug_assert!(size.is_power_of_two());
    size - 1
}

/// Reject history lengths that don't fit in a [History].
pub fn check_history_bits(bits: usize) -> Result<(), ConfigError> {
    if bits == 0 || bits > MAX_HISTORY_BITS {
        return Err(ConfigError::HistoryBitsOutOfRange {
            bits, max: MAX_HISTORY_BITS
        });
    }
    Ok(())
}

/// Select the bits of `pc` just above the alignment bits.
pub fn pc_index(pc: u64, mask: usize) -> usize {
    ((pc >> ALIGN_BITS) as usize) & mask
}
