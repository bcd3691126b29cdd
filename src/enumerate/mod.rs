//! Enumeration of every satisfying assignment of a [`Formula`].
//!
//! Two strategies share the [`Enumerator`] contract and must agree on the
//! resulting set of solutions:
//!
//! * [`ExhaustiveEnumerator`] evaluates all `2^n` candidates in order.
//! * [`IncrementalBlockingEnumerator`] asks a [`SatBackend`] for one model at
//!   a time and forbids each model found with a blocking clause.
//!
//! Both poll a [`Budget`] so a caller can impose a deadline or cancel a run
//! from another thread.
//!
//! [`SatBackend`]: crate::sat::SatBackend

pub mod budget;
pub mod exhaustive;
pub mod incremental;

pub use budget::{Budget, CancelToken, Interruption};
pub use exhaustive::ExhaustiveEnumerator;
pub use incremental::IncrementalBlockingEnumerator;

use crate::error::{SolveError, SolveResult};
use crate::logic::formula::Formula;
use crate::system::assignment::{Assignment, SolutionSet};

/// The outcome of a completed enumeration run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Enumeration {
    /// Every accepted assignment, in discovery order.
    pub solutions: SolutionSet,
    /// Solutions accepted, equal to `solutions.len()`.
    pub count: usize,
    /// Candidates evaluated (exhaustive) or satisfiability checks issued
    /// (incremental).
    pub checks: u64,
}

/// A strategy producing the full solution set of a formula.
pub trait Enumerator {
    /// Enumerates every assignment satisfying `formula`.
    ///
    /// A failed run returns no partial solutions; [`Enumerator::count`]
    /// still reports how many were accepted before it stopped.
    ///
    /// # Errors
    ///
    /// Evaluation failures, backend failures and exhausted budgets.
    fn enumerate(&mut self, formula: &Formula, budget: &Budget) -> SolveResult<Enumeration>;

    /// Solutions accepted so far by the current or most recent run.
    fn count(&self) -> usize;

    /// Short name used in logs and statistics.
    fn name(&self) -> &'static str;
}

/// Builds the error for a candidate some fragment cannot be evaluated against,
/// naming the first such equation.
pub(crate) fn evaluation_error(formula: &Formula, candidate: Assignment) -> SolveError {
    let text = formula
        .equations()
        .iter()
        .find(|eq| eq.fragment.evaluate(candidate.values()).is_none())
        .map_or_else(|| formula.to_expr().to_string(), |eq| eq.raw.clone());
    SolveError::Evaluation {
        formula: text,
        assignment: candidate,
    }
}
