//! Brute-force enumeration over every candidate assignment.

use crate::enumerate::budget::Budget;
use crate::enumerate::{Enumeration, Enumerator, evaluation_error};
use crate::error::{SolveError, SolveResult};
use crate::logic::formula::Formula;
use crate::system::assignment::{Assignment, SolutionSet};
use log::{debug, trace};

/// Candidates evaluated between budget polls.
const POLL_INTERVAL: u64 = 1024;

/// Brute force over all `2^n` assignments.
///
/// Candidate `k` assigns bit `n - 1 - i` of `k` to variable `i`, so
/// solutions come out in lexicographic order. Exact and always terminating,
/// but only practical up to a few dozen variables.
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveEnumerator {
    count: usize,
}

impl ExhaustiveEnumerator {
    /// Largest variable count whose candidates fit in a `u64` index.
    pub const MAX_VARIABLES: usize = 63;

    /// A fresh enumerator.
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0 }
    }
}

impl Enumerator for ExhaustiveEnumerator {
    fn enumerate(&mut self, formula: &Formula, budget: &Budget) -> SolveResult<Enumeration> {
        self.count = 0;
        let n = formula.num_vars();
        if n > Self::MAX_VARIABLES {
            return Err(SolveError::TooManyVariables {
                count: n,
                limit: Self::MAX_VARIABLES,
            });
        }

        let total = 1u64 << n;
        debug!("exhaustive enumeration over {n} variables ({total} candidates)");

        let mut solutions = SolutionSet::new();
        for number in 0..total {
            if number % POLL_INTERVAL == 0 && budget.check().is_err() {
                return Err(SolveError::Interrupted { checked: number });
            }

            let candidate = Assignment::from_index(number, n);
            match formula.evaluate(&candidate) {
                Some(true) => {
                    trace!("accepted [{candidate}]");
                    solutions.insert(candidate);
                    self.count += 1;
                }
                Some(false) => {}
                None => return Err(evaluation_error(formula, candidate)),
            }
        }

        debug!("exhaustive enumeration found {} solutions", self.count);
        Ok(Enumeration {
            count: self.count,
            solutions,
            checks: total,
        })
    }

    fn count(&self) -> usize {
        self.count
    }

    fn name(&self) -> &'static str {
        "exhaustive"
    }
}
