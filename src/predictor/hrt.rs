//! First-level history register tables (HRT).

pub mod ideal;
pub mod hashed;
pub mod assoc;

pub use ideal::*;
pub use hashed::*;
pub use assoc::*;

use serde::{ Deserialize, Serialize };

use crate::error::ConfigError;
use crate::history::*;
use crate::predictor::table::*;

/// The storage discipline used by a history register table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HrtKind {
    /// One register per static branch, unbounded ([IdealHrt]).
    #[serde(alias = "IHRT")]
    Ideal,

    /// Direct-mapped and untagged ([HashedHrt]).
    #[serde(alias = "HHRT")]
    Hashed,

    /// Set-associative and tagged ([AssociativeHrt]).
    #[serde(alias = "AHRT")]
    Associative,
}
impl HrtKind {
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Ideal => "IHRT",
            Self::Hashed => "HHRT",
            Self::Associative => "AHRT",
        }
    }
}

/// A history register table of any discipline.
#[derive(Clone, Debug)]
pub enum HistoryRegisterTable {
    Ideal(IdealHrt),
    Hashed(HashedHrt),
    Associative(AssociativeHrt),
}
impl HistoryRegisterTable {
    /// Create an empty table. `entries` is ignored by [HrtKind::Ideal] and
    /// `ways` is only used by [HrtKind::Associative].
    pub fn new(kind: HrtKind, entries: usize, ways: usize, history_bits: usize)
        -> Result<Self, ConfigError>
    {
        Ok(match kind {
            HrtKind::Ideal => Self::Ideal(IdealHrt::new(history_bits)?),
            HrtKind::Hashed => {
                Self::Hashed(HashedHrt::new(entries, history_bits)?)
            },
            HrtKind::Associative => {
                Self::Associative(
                    AssociativeHrt::new(entries, ways, history_bits)?
                )
            },
        })
    }

    pub fn kind(&self) -> HrtKind {
        match self {
            Self::Ideal(_) => HrtKind::Ideal,
            Self::Hashed(_) => HrtKind::Hashed,
            Self::Associative(_) => HrtKind::Associative,
        }
    }
}

impl HistoryTable for HistoryRegisterTable {
    fn history_bits(&self) -> usize {
        match self {
            Self::Ideal(t) => t.history_bits(),
            Self::Hashed(t) => t.history_bits(),
            Self::Associative(t) => t.history_bits(),
        }
    }

    fn get(&self, pc: u64) -> History {
        match self {
            Self::Ideal(t) => t.get(pc),
            Self::Hashed(t) => t.get(pc),
            Self::Associative(t) => t.get(pc),
        }
    }

    fn set(&mut self, pc: u64, history: History) {
        match self {
            Self::Ideal(t) => t.set(pc, history),
            Self::Hashed(t) => t.set(pc, history),
            Self::Associative(t) => t.set(pc, history),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            Self::Ideal(t) => t.capacity(),
            Self::Hashed(t) => t.capacity(),
            Self::Associative(t) => t.capacity(),
        }
    }
}
