
use crate::error::ConfigError;
use crate::history::*;
use crate::predictor::table::*;

/// A direct-mapped history table indexed by low program counter bits.
///
/// No tags are stored. Two branches that map onto the same slot read and
/// write the same register, and neither can tell the other is there.
#[derive(Clone, Debug)]
pub struct HashedHrt {
    history_bits: usize,

    /// Table of history registers
    data: Vec<History>,

    /// Number of entries
    size: usize,
}
impl HashedHrt {
    pub fn new(size: usize, history_bits: usize) -> Result<Self, ConfigError> {
        check_history_bits(history_bits)?;
        if size == 0 {
            return Err(ConfigError::ZeroEntries);
        }
        if !size.is_power_of_two() {
            return Err(ConfigError::EntriesNotPowerOfTwo { entries: size });
        }
        Ok(Self {
            history_bits,
            data: vec![History::all_ones(history_bits); size],
            size,
        })
    }

    /// The slot used by the branch at `pc`.
    pub fn get_index(&self, pc: u64) -> usize {
        pc_index(pc, index_mask(self.size))
    }
}

impl HistoryTable for HashedHrt {
    fn history_bits(&self) -> usize { self.history_bits }

    fn get(&self, pc: u64) -> History {
        self.data[self.get_index(pc)]
    }

    fn set(&mut self, pc: u64, history: History) {
        let idx = self.get_index(pc);
        self.data[idx] = history.masked(self.history_bits);
    }

    fn capacity(&self) -> usize { self.size }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_bad_sizes() {
        assert_eq!(HashedHrt::new(0, 8).unwrap_err(), ConfigError::ZeroEntries);
        assert_eq!(HashedHrt::new(384, 8).unwrap_err(),
            ConfigError::EntriesNotPowerOfTwo { entries: 384 });
        assert!(HashedHrt::new(256, 0).is_err());
    }

    #[test]
    fn set_then_get() {
        let mut t = HashedHrt::new(16, 6).unwrap();
        assert_eq!(t.get(0x1000).value(), 0b11_1111);
        t.set(0x1000, History::new(0b1100_0011));
        assert_eq!(t.get(0x1000).value(), 0b00_0011);
        assert_eq!(t.capacity(), 16);
    }

    #[test]
    fn colliding_branches_share_history() {
        let mut t = HashedHrt::new(16, 8).unwrap();
        let a = 0x1000;
        let b = a + (16 << ALIGN_BITS);
        assert_eq!(t.get_index(a), t.get_index(b));

        t.set(a, History::new(0x0f));
        assert_eq!(t.get(b).value(), 0x0f);
        t.set(b, History::new(0xf0));
        assert_eq!(t.get(a).value(), 0xf0);
    }
}
