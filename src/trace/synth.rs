//! Generating synthetic traces from fixed branch behaviors.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::branch::*;
use crate::error::PatternError;
use crate::predictor::ALIGN_BITS;

/// A pre-determined pattern of outcomes associated with a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BranchPattern {
    /// A branch whose outcome is always 'taken'.
    AlwaysTaken,

    /// A branch whose outcome is always 'not-taken'.
    NeverTaken,

    /// A branch whose outcome is only periodically "taken".
    /// Otherwise, the branch is "not-taken" by default.
    TakenPeriodic(usize),

    /// A branch whose outcome is only periodically "not-taken".
    /// Otherwise, the branch is "taken" by default.
    NotTakenPeriodic(usize),

    /// A branch with an arbitrary pattern of outcomes.
    Pattern(&'static [Outcome]),

    /// A branch that is taken with some probability.
    Random(f64),
}
impl BranchPattern {
    /// Check that this pattern can generate an outcome for every execution.
    pub fn validate(&self) -> Result<(), PatternError> {
        match self {
            Self::TakenPeriodic(0) | Self::NotTakenPeriodic(0) => {
                Err(PatternError::ZeroPeriod)
            },
            Self::Pattern(p) if p.is_empty() => Err(PatternError::EmptyPattern),
            Self::Random(p) if !(0.0..=1.0).contains(p) => {
                Err(PatternError::BadProbability(*p))
            },
            _ => Ok(()),
        }
    }

    /// Generate the outcome for the 'ctr'th execution of this branch.
    /// The pattern must have passed [BranchPattern::validate].
    pub fn outcome(&self, ctr: usize, rng: &mut impl Rng) -> Outcome {
        match self {
            Self::AlwaysTaken => Outcome::T,
            Self::NeverTaken => Outcome::N,
            Self::TakenPeriodic(p) => {
                if ctr % p == (p - 1) { Outcome::T } else { Outcome::N }
            },
            Self::NotTakenPeriodic(p) => {
                if ctr % p == (p - 1) { Outcome::N } else { Outcome::T }
            },
            Self::Pattern(p) => p[ctr % p.len()],
            Self::Random(p_taken) => Outcome::from_bool(rng.gen_bool(*p_taken)),
        }
    }
}

/// Used to assemble a synthetic trace.
///
/// Branches are laid out at consecutive aligned addresses starting from
/// `base`, and every iteration executes each branch once, in order.
#[derive(Clone, Debug)]
pub struct TraceAssembler {
    /// The initial address/program counter value.
    base: u64,

    /// Program counter and pattern for each branch.
    branches: Vec<(u64, BranchPattern)>,

    /// Seed for [BranchPattern::Random] outcomes.
    seed: u64,
}
impl TraceAssembler {
    pub fn new(base: u64) -> Self {
        Self {
            base,
            branches: Vec::new(),
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Add a branch at the next address, returning its program counter.
    pub fn branch(&mut self, pattern: BranchPattern) -> Result<u64, PatternError> {
        pattern.validate()?;
        Ok(self.push(pattern))
    }

    fn push(&mut self, pattern: BranchPattern) -> u64 {
        let pc = self.base + ((self.branches.len() as u64) << ALIGN_BITS);
        self.branches.push((pc, pattern));
        pc
    }

    /// Generate records for 'iterations' passes over every branch.
    pub fn compile(&self, iterations: usize) -> Vec<BranchRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut data = Vec::with_capacity(iterations * self.branches.len());
        for ctr in 0..iterations {
            for (pc, pattern) in self.branches.iter() {
                let outcome = pattern.outcome(ctr, &mut rng);
                data.push(BranchRecord::new(*pc, outcome));
            }
        }
        data
    }

    /// A mix of loop-like, patterned, and random branches.
    pub fn mixed(branches: usize, seed: u64) -> Self {
        use Outcome::*;
        const PATTERNS: [BranchPattern; 8] = [
            BranchPattern::AlwaysTaken,
            BranchPattern::NeverTaken,
            BranchPattern::NotTakenPeriodic(8),
            BranchPattern::TakenPeriodic(3),
            BranchPattern::Pattern(&[T, T, N, N]),
            BranchPattern::Pattern(&[T, N, T, T, N]),
            BranchPattern::Random(0.9),
            BranchPattern::Random(0.5),
        ];
        let mut res = Self::new(0x0040_0000).with_seed(seed);
        for i in 0..branches {
            res.push(PATTERNS[i % PATTERNS.len()]);
        }
        res
    }
}
