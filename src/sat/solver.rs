//! The capability the incremental enumerator needs from a satisfiability
//! backend.

use crate::enumerate::budget::Budget;
use crate::error::BackendError;
use crate::logic::expr::Expr;
use crate::system::assignment::Assignment;

/// Outcome of a satisfiability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatResult {
    /// A model exists.
    Sat,
    /// No model exists.
    Unsat,
}

/// An incremental satisfiability backend over declared boolean variables.
///
/// A backend is used by one solve at a time; `&mut self` on every
/// state-changing call serialises access when an instance is reused.
pub trait SatBackend {
    /// Forgets every assertion and declares `num_vars` fresh variables.
    fn reset(&mut self, num_vars: usize);

    /// Adds `fragment` as a constraint for all following checks.
    ///
    /// # Errors
    ///
    /// If the fragment refers to undeclared variables or cannot be encoded.
    fn assert(&mut self, fragment: &Expr) -> Result<(), BackendError>;

    /// Decides the conjunction of everything asserted so far.
    ///
    /// # Errors
    ///
    /// `Timeout` or `Cancelled` once `budget` is exhausted mid-check.
    fn check_sat(&mut self, budget: &Budget) -> Result<SatResult, BackendError>;

    /// The model found by the last satisfiable check, over the declared variables.
    ///
    /// # Errors
    ///
    /// `NoModel` if the last check was not satisfiable.
    fn model(&self) -> Result<Assignment, BackendError>;
}

/// Counters reported by a backend after solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Satisfiability checks issued.
    pub checks: usize,
    /// Conflicts hit while searching.
    pub conflicts: usize,
    /// Decisions made.
    pub decisions: usize,
    /// Literals implied by unit propagation.
    pub propagations: usize,
}
