//! Types for representing branches and branch outcomes.

use serde::{ Deserialize, Serialize };

/// A branch outcome.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
pub enum Outcome {
    /// Not taken
    N = 0,
    /// Taken
    T = 1
}

impl Outcome {
    pub fn from_bool(b: bool) -> Self {
        match b {
            true => Self::T,
            false => Self::N,
        }
    }

    /// The value shifted into a history register for this outcome.
    pub fn bit(self) -> u16 { self as u16 }

    pub fn is_taken(self) -> bool { matches!(self, Self::T) }
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::T => "t",
            Self::N => "n",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self { Self::from_bool(x) }
}
impl From<Outcome> for bool {
    fn from(x: Outcome) -> Self { x.is_taken() }
}


/// A record of a single dynamic conditional branch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BranchRecord {
    /// The program counter value for this branch
    pub pc: u64,

    /// The outcome evaluated for this branch
    pub outcome: Outcome,
}
impl BranchRecord {
    pub fn new(pc: u64, outcome: Outcome) -> Self {
        Self { pc, outcome }
    }

    pub fn taken(pc: u64) -> Self { Self::new(pc, Outcome::T) }
    pub fn not_taken(pc: u64) -> Self { Self::new(pc, Outcome::N) }
}
