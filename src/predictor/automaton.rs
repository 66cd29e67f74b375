//! Finite-state predictors used as pattern table entries.
//!
//! Each [Automaton] variant names a small state machine. The machines
//! themselves hold no data: a table stores one `u8` state per entry and
//! calls into the functions here to predict and to train.

use serde::{ Deserialize, Serialize };
use crate::Outcome;

/// The kinds of finite-state predictor available to a pattern table.
///
/// `Counter2`, `Counter3` and `Counter4` all behave as the same 2-bit
/// up/down saturating counter. They are kept apart so that schemes can
/// be named after the automaton they were configured with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Automaton {
    /// Remembers only the last outcome (1 bit of state).
    #[serde(alias = "LT", alias = "LastTime")]
    LastOutcome,

    /// 2-bit saturating counter.
    #[serde(alias = "A2")]
    Counter2,

    #[serde(alias = "A3")]
    Counter3,

    #[serde(alias = "A4")]
    Counter4,
}

impl Automaton {
    /// Largest legal state for a counter automaton.
    const COUNTER_MAX: u8 = 3;

    /// Smallest counter state that predicts 'taken'.
    const COUNTER_TAKEN: u8 = 2;

    /// The state every entry starts in. All variants start out predicting
    /// 'taken' (counters start saturated).
    pub fn initial_state(self) -> u8 {
        match self {
            Self::LastOutcome => 1,
            Self::Counter2 | Self::Counter3 | Self::Counter4 => {
                Self::COUNTER_MAX
            },
        }
    }

    /// The largest legal state value for this automaton.
    pub fn max_state(self) -> u8 {
        match self {
            Self::LastOutcome => 1,
            Self::Counter2 | Self::Counter3 | Self::Counter4 => {
                Self::COUNTER_MAX
            },
        }
    }

    /// Returns 'true' if `state` predicts a taken branch.
    pub fn predicts_taken(self, state: u8) -> bool {
        match self {
            Self::LastOutcome => state & 1 != 0,
            Self::Counter2 | Self::Counter3 | Self::Counter4 => {
                state >= Self::COUNTER_TAKEN
            },
        }
    }

    /// The predicted [Outcome] for `state`.
    pub fn predict(self, state: u8) -> Outcome {
        Outcome::from_bool(self.predicts_taken(state))
    }

    /// The state reached from `state` after observing `outcome`.
    pub fn next_state(self, state: u8, outcome: Outcome) -> u8 {
        match self {
            Self::LastOutcome => outcome.bit() as u8,
            Self::Counter2 | Self::Counter3 | Self::Counter4 => {
                match outcome {
                    Outcome::T => (state + 1).min(Self::COUNTER_MAX),
                    Outcome::N => state.saturating_sub(1),
                }
            },
        }
    }

    /// Number of bits charged per pattern table entry when estimating
    /// hardware cost. Every automaton is costed as 2 bits.
    pub fn storage_bits(self) -> usize { 2 }

    /// Short label used when generating scheme names.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::LastOutcome => "LT",
            Self::Counter2 => "A2",
            Self::Counter3 => "A3",
            Self::Counter4 => "A4",
        }
    }
}

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
