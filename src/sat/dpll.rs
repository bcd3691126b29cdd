//! A DPLL (Davis-Putnam-Logemann-Loveland) backend.
//!
//! Assertions are Tseitin-encoded into a growing [`Cnf`]. Every
//! [`SatBackend::check_sat`] call searches from scratch over the whole clause
//! database, so clauses added between checks (blocking clauses in
//! particular) are always honoured.
//!
//! The search is iterative:
//! 1.  **Unit propagation:** a clause with every literal false but one forces
//!     that literal.
//! 2.  **Decision:** the lowest unassigned variable is assigned the polarity
//!     the [`PhaseSelector`] suggests.
//! 3.  **Backtracking:** on conflict the trail is unwound to the most recent
//!     decision, which is flipped and kept as an implied literal. An empty
//!     trail means the formula is unsatisfiable.

use crate::enumerate::budget::{Budget, Interruption};
use crate::error::BackendError;
use crate::logic::expr::Expr;
use crate::sat::assignment::VecAssignment;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::phase_saving::{PhaseSelector, SavedPhases};
use crate::sat::solver::{SatBackend, SatResult, SolutionStats};
use crate::system::assignment::Assignment;
use log::trace;
use std::time::Instant;

/// How many search steps pass between budget polls.
const BUDGET_POLL_INTERVAL: u64 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    lit: Literal,
    decision: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClauseStatus {
    Satisfied,
    Conflict,
    Unit(Literal),
    Open,
}

/// Backtracking search over a growing clause database, with decision
/// polarities from `P`.
#[derive(Debug, Clone)]
pub struct Dpll<P: PhaseSelector = SavedPhases> {
    cnf: Cnf,
    assignment: VecAssignment,
    trail: Vec<Step>,
    phases: P,
    model: Option<Vec<bool>>,
    stats: SolutionStats,
}

impl<P: PhaseSelector> Default for Dpll<P> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<P: PhaseSelector> Dpll<P> {
    /// A solver with `num_vars` declared variables and no clauses.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            cnf: Cnf::new(num_vars),
            assignment: VecAssignment::new(num_vars),
            trail: Vec::new(),
            phases: P::new(num_vars),
            model: None,
            stats: SolutionStats::default(),
        }
    }

    /// Uses `phases` for decision polarities.
    #[must_use]
    pub fn with_phases(mut self, phases: P) -> Self {
        self.phases = phases;
        self
    }

    /// The clause database built from every assertion so far.
    #[must_use]
    pub const fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    /// Counters accumulated since the last reset.
    #[must_use]
    pub const fn stats(&self) -> SolutionStats {
        self.stats
    }

    fn assign(&mut self, lit: Literal, decision: bool) {
        self.assignment.assign(lit);
        self.phases.save(lit);
        self.trail.push(Step { lit, decision });
    }

    fn clause_status(&self, idx: usize) -> ClauseStatus {
        let mut open = None;
        let mut open_count = 0;
        for &lit in self.cnf[idx].iter() {
            match self.assignment.literal_value(lit) {
                Some(true) => return ClauseStatus::Satisfied,
                Some(false) => {}
                None => {
                    open_count += 1;
                    open = Some(lit);
                }
            }
        }
        match (open_count, open) {
            (0, _) => ClauseStatus::Conflict,
            (1, Some(lit)) => ClauseStatus::Unit(lit),
            _ => ClauseStatus::Open,
        }
    }

    /// Propagates to fixpoint; returns `true` on conflict.
    fn propagate(&mut self) -> bool {
        loop {
            let mut changed = false;
            for idx in 0..self.cnf.len() {
                match self.clause_status(idx) {
                    ClauseStatus::Conflict => return true,
                    ClauseStatus::Unit(lit) => {
                        self.assign(lit, false);
                        self.stats.propagations += 1;
                        changed = true;
                    }
                    ClauseStatus::Satisfied | ClauseStatus::Open => {}
                }
            }
            if !changed {
                return false;
            }
        }
    }

    /// Undoes the trail to the last decision and flips it; `false` if none is left.
    fn backtrack(&mut self) -> bool {
        while let Some(step) = self.trail.pop() {
            self.assignment.unassign(step.lit.variable());
            if step.decision {
                self.assign(step.lit.negated(), false);
                return true;
            }
        }
        false
    }

    fn pick(&self) -> Option<Variable> {
        self.assignment.unassigned().next()
    }

    fn search(&mut self, budget: &Budget, started: Instant) -> Result<bool, BackendError> {
        self.assignment.resize(self.cnf.num_vars);
        self.assignment.clear();
        self.trail.clear();

        let mut steps = 0u64;
        loop {
            if steps % BUDGET_POLL_INTERVAL == 0 {
                budget.check().map_err(|reason| match reason {
                    Interruption::Cancelled => BackendError::Cancelled,
                    Interruption::DeadlineExceeded => BackendError::Timeout {
                        elapsed: started.elapsed(),
                    },
                })?;
            }
            steps += 1;

            if self.propagate() {
                self.stats.conflicts += 1;
                if !self.backtrack() {
                    return Ok(false);
                }
                continue;
            }

            match self.pick() {
                None => return Ok(true),
                Some(var) => {
                    let polarity = self.phases.get_next(var);
                    self.stats.decisions += 1;
                    self.assign(Literal::new(var, polarity), true);
                }
            }
        }
    }
}

impl<P: PhaseSelector> SatBackend for Dpll<P> {
    fn reset(&mut self, num_vars: usize) {
        self.cnf = Cnf::new(num_vars);
        self.assignment = VecAssignment::new(num_vars);
        self.trail.clear();
        self.phases.reset(num_vars);
        self.model = None;
        self.stats = SolutionStats::default();
    }

    fn assert(&mut self, fragment: &Expr) -> Result<(), BackendError> {
        if let Some(max) = fragment.max_var().filter(|&m| m >= self.cnf.declared) {
            return Err(BackendError::Internal(format!(
                "variable index {max} outside the {} declared variables",
                self.cnf.declared
            )));
        }
        self.cnf.assert_expr(fragment);
        Ok(())
    }

    fn check_sat(&mut self, budget: &Budget) -> Result<SatResult, BackendError> {
        let started = Instant::now();
        self.stats.checks += 1;
        self.model = None;

        let sat = self.search(budget, started)?;
        trace!(
            "check #{}: {} in {:?} ({} clauses, {} vars)",
            self.stats.checks,
            if sat { "sat" } else { "unsat" },
            started.elapsed(),
            self.cnf.len(),
            self.cnf.num_vars
        );

        if sat {
            let full: Vec<bool> = (1..=self.cnf.num_vars)
                .map(|v| {
                    Variable::try_from(v)
                        .ok()
                        .and_then(|v| self.assignment.var_value(v))
                        .unwrap_or(false)
                })
                .collect();
            debug_assert!(self.cnf.verify(&full));
            self.model = Some(full);
            Ok(SatResult::Sat)
        } else {
            Ok(SatResult::Unsat)
        }
    }

    fn model(&self) -> Result<Assignment, BackendError> {
        self.model
            .as_ref()
            .map(|full| Assignment::new(full[..self.cnf.declared].to_vec()))
            .ok_or(BackendError::NoModel)
    }
}
