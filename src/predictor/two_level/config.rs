
use serde::{ Deserialize, Serialize };

use crate::error::ConfigError;
use crate::predictor::*;

/// Configuration for a [`TwoLevelPredictor`].
///
/// Describes a scheme of the form `AT(HRT(entries, k), PT(2^k, automaton))`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoLevelConfig {
    /// Label used in reports. Generated from the other fields when empty.
    #[serde(default)]
    pub name: String,

    /// First-level table discipline
    pub hrt: HrtKind,

    /// Number of history registers (unused by [HrtKind::Ideal])
    #[serde(default)]
    pub entries: usize,

    /// Associativity (only used by [HrtKind::Associative])
    #[serde(default)]
    pub ways: usize,

    /// Length 'k' of each history register
    pub history_bits: usize,

    /// Automaton used by every pattern table entry
    pub automaton: Automaton,
}
impl TwoLevelConfig {
    pub fn ideal(history_bits: usize, automaton: Automaton) -> Self {
        Self {
            name: String::new(),
            hrt: HrtKind::Ideal,
            entries: 0,
            ways: 0,
            history_bits,
            automaton,
        }
    }

    pub fn hashed(entries: usize, history_bits: usize, automaton: Automaton)
        -> Self
    {
        Self {
            name: String::new(),
            hrt: HrtKind::Hashed,
            entries,
            ways: 1,
            history_bits,
            automaton,
        }
    }

    pub fn associative(entries: usize, ways: usize, history_bits: usize,
        automaton: Automaton) -> Self
    {
        Self {
            name: String::new(),
            hrt: HrtKind::Associative,
            entries,
            ways,
            history_bits,
            automaton,
        }
    }

    /// Replace the generated label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Label for this scheme, e.g. `AT_AHRT_512_12_A2`.
    pub fn label(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        match self.hrt {
            HrtKind::Ideal => format!("AT_{}_{}_{}",
                self.hrt.short_name(), self.history_bits, self.automaton),
            _ => format!("AT_{}_{}_{}_{}",
                self.hrt.short_name(), self.entries, self.history_bits,
                self.automaton),
        }
    }

    /// Use this configuration to create a new [`TwoLevelPredictor`].
    pub fn build(self) -> Result<TwoLevelPredictor, ConfigError> {
        TwoLevelPredictor::new(self)
    }

    /// The schemes evaluated by default: table disciplines and sizes,
    /// then automata, then history lengths.
    pub fn default_schemes() -> Vec<Self> {
        use Automaton::*;
        vec![
            Self::associative(256, 4, 12, Counter2),
            Self::associative(512, 4, 12, Counter2),
            Self::hashed(256, 12, Counter2),
            Self::hashed(512, 12, Counter2),
            Self::ideal(12, Counter2),

            Self::associative(512, 4, 12, LastOutcome),
            Self::associative(512, 4, 12, Counter3),
            Self::associative(512, 4, 12, Counter4),

            Self::associative(512, 4, 10, Counter2),
            Self::associative(512, 4, 8, Counter2),
            Self::associative(512, 4, 6, Counter2),
        ]
    }
}
