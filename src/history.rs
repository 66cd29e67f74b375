
use bitvec::prelude::*;
use crate::Outcome;

/// Upper bound on the length (in bits) of a history register.
pub const MAX_HISTORY_BITS: usize = 16;

/// Returns a mask covering the low `len` bits of a history register.
pub fn history_mask(len: usize) -> u16 {
    debug_assert!(len <= MAX_HISTORY_BITS);
    ((1u32 << len) - 1) as u16
}

/// The value of a k-bit history register.
///
/// Bit 0 holds the most recent outcome, bit k-1 the oldest. The register
/// does not carry its own length; callers supply `len` and every shift
/// masks the result down to `len` bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct History(u16);

impl History {
    pub fn new(value: u16) -> Self { Self(value) }

    /// A register of `len` bits with every bit set (i.e. "all taken").
    pub fn all_ones(len: usize) -> Self {
        Self(history_mask(len))
    }

    pub fn value(self) -> u16 { self.0 }

    /// Use this register as an index into a table.
    pub fn index(self) -> usize { self.0 as usize }

    /// Truncate this register to `len` bits.
    pub fn masked(self, len: usize) -> Self {
        Self(self.0 & history_mask(len))
    }

    /// Shift an outcome into the low bit. The oldest bit falls off the top.
    pub fn shift_in(self, outcome: Outcome, len: usize) -> Self {
        Self(((self.0 << 1) | outcome.bit()) & history_mask(len))
    }

    /// Render the low `len` bits, oldest outcome on the left.
    pub fn display(&self, len: usize) -> HistoryDisplay {
        HistoryDisplay { bits: self.0, len }
    }
}

/// Helper for printing a [History] with a known length.
pub struct HistoryDisplay {
    bits: u16,
    len: usize,
}

// NOTE: This *reverses* the bits so that the leftmost character is the
// most-significant bit (index len-1) and the rightmost is index 0.
impl std::fmt::Display for HistoryDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let len = self.len.min(MAX_HISTORY_BITS);
        let x: String = self.bits.view_bits::<Lsb0>()[..len].iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}
