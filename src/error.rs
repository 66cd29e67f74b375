//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// A predictor configuration that cannot be built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("history table must have at least one entry")]
    ZeroEntries,

    #[error("associative history table must have at least one way")]
    ZeroWays,

    #[error("{entries} entries cannot be split evenly into {ways} ways")]
    EntriesNotDivisible { entries: usize, ways: usize },

    #[error("set count {sets} is not a power of two")]
    SetsNotPowerOfTwo { sets: usize },

    #[error("hashed table size {entries} is not a power of two")]
    EntriesNotPowerOfTwo { entries: usize },

    #[error("history length {bits} is outside 1..={max}")]
    HistoryBitsOutOfRange { bits: usize, max: usize },

    /// Any of the above, tagged with the label of the offending scheme.
    #[error("scheme '{name}': {source}")]
    Scheme {
        name: String,
        #[source]
        source: Box<ConfigError>,
    },
}
impl ConfigError {
    /// Attach a scheme label to this error.
    pub fn in_scheme(self, name: impl Into<String>) -> Self {
        Self::Scheme { name: name.into(), source: Box::new(self) }
    }
}

/// A synthetic branch pattern that can't produce outcomes.
#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
    #[error("periodic branch must have a period of at least 1")]
    ZeroPeriod,

    #[error("explicit branch pattern is empty")]
    EmptyPattern,

    #[error("taken probability {0} is not in [0, 1]")]
    BadProbability(f64),
}

/// Failure to read a branch trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("couldn't read trace {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
