//! Trace-driven simulation of two-level adaptive branch predictors.

pub mod branch;
pub mod error;
pub mod history;
pub mod predictor;
pub mod report;
pub mod sim;
pub mod stats;
pub mod trace;

pub use branch::*;
pub use error::*;
pub use history::*;
pub use predictor::*;
pub use trace::*;
