//! Polarity choice for decision literals.

use crate::sat::literal::{Literal, Variable};

/// Chooses the polarity of each decision literal.
pub trait PhaseSelector {
    /// A selector sized for `num_vars` variables.
    fn new(num_vars: usize) -> Self;

    /// Prepares for a fresh problem over `num_vars` variables, keeping the
    /// selector's own configuration (a random seed stream, for instance).
    fn reset(&mut self, num_vars: usize);

    /// Records the polarity `lit` was assigned.
    fn save(&mut self, lit: Literal);

    /// Polarity to try first when deciding on `var`.
    fn get_next(&mut self, var: Variable) -> bool;
}

/// Reuses the last polarity each variable held; starts negative.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SavedPhases(Vec<bool>);

impl PhaseSelector for SavedPhases {
    fn new(num_vars: usize) -> Self {
        Self(vec![false; num_vars + 1])
    }

    fn reset(&mut self, num_vars: usize) {
        self.0.clear();
        self.0.resize(num_vars + 1, false);
    }

    fn save(&mut self, lit: Literal) {
        let var = lit.variable() as usize;
        if var >= self.0.len() {
            self.0.resize(var + 1, false);
        }
        self.0[var] = lit.polarity();
    }

    fn get_next(&mut self, var: Variable) -> bool {
        self.0.get(var as usize).copied().unwrap_or(false)
    }
}

/// Picks polarities from a seeded generator.
#[derive(Clone, Debug)]
pub struct RandomPhases(fastrand::Rng);

impl RandomPhases {
    /// A generator seeded with `seed`; equal seeds give equal polarity streams.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl PhaseSelector for RandomPhases {
    fn new(_: usize) -> Self {
        Self::with_seed(0x5eed)
    }

    fn reset(&mut self, _: usize) {}

    fn save(&mut self, _: Literal) {}

    fn get_next(&mut self, _: Variable) -> bool {
        self.0.bool()
    }
}
