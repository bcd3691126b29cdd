//! Enumeration by repeated satisfiability checks and blocking clauses.

use crate::enumerate::budget::Budget;
use crate::enumerate::{Enumeration, Enumerator, evaluation_error};
use crate::error::{BackendError, SolveResult};
use crate::logic::expr::{Expr, ors};
use crate::logic::formula::Formula;
use crate::sat::dpll::Dpll;
use crate::sat::solver::{SatBackend, SatResult};
use crate::system::assignment::{Assignment, SolutionSet};
use log::{debug, trace};

/// Solve-and-block enumeration on top of a [`SatBackend`].
///
/// Each round asks the backend for a model, records it and asserts a
/// blocking clause requiring at least one declared variable to differ from
/// it. A formula with `k` solutions takes exactly `k + 1` checks, the last
/// one unsatisfiable.
///
/// The backend is reset at the start of every run, so one enumerator can
/// serve any number of requests, one at a time.
#[derive(Debug, Clone, Default)]
pub struct IncrementalBlockingEnumerator<B: SatBackend = Dpll> {
    backend: B,
    count: usize,
    checks: u64,
}

impl IncrementalBlockingEnumerator {
    /// An enumerator over the default [`Dpll`] backend.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(Dpll::default())
    }
}

impl<B: SatBackend> IncrementalBlockingEnumerator<B> {
    /// An enumerator over `backend`.
    #[must_use]
    pub const fn with_backend(backend: B) -> Self {
        Self {
            backend,
            count: 0,
            checks: 0,
        }
    }

    /// The backend, as left by the last run.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Satisfiability checks issued by the current or most recent run.
    #[must_use]
    pub const fn checks(&self) -> u64 {
        self.checks
    }

    /// The clause excluding exactly `model`.
    fn blocking_clause(model: &Assignment) -> Expr {
        ors(model
            .values()
            .iter()
            .enumerate()
            .map(|(i, &value)| Expr::literal(i, !value))
            .collect())
    }

    fn accept(formula: &Formula, model: &Assignment) -> SolveResult<()> {
        match formula.evaluate(model) {
            Some(true) => Ok(()),
            Some(false) => Err(BackendError::Internal(format!(
                "model [{model}] does not satisfy the asserted formula"
            ))
            .into()),
            None => Err(evaluation_error(formula, model.clone())),
        }
    }
}

impl<B: SatBackend> Enumerator for IncrementalBlockingEnumerator<B> {
    fn enumerate(&mut self, formula: &Formula, budget: &Budget) -> SolveResult<Enumeration> {
        self.count = 0;
        self.checks = 0;

        self.backend.reset(formula.num_vars());
        for fragment in formula.fragments() {
            self.backend.assert(fragment)?;
        }

        let mut solutions = SolutionSet::new();
        loop {
            self.checks += 1;
            match self.backend.check_sat(budget)? {
                SatResult::Unsat => break,
                SatResult::Sat => {
                    let model = self.backend.model()?;
                    if model.len() != formula.num_vars() {
                        return Err(BackendError::Internal(format!(
                            "model covers {} of {} variables",
                            model.len(),
                            formula.num_vars()
                        ))
                        .into());
                    }
                    Self::accept(formula, &model)?;
                    let block = Self::blocking_clause(&model);
                    trace!("accepted [{model}], blocking {block}");
                    if !solutions.insert(model) {
                        return Err(BackendError::Internal(
                            "backend returned a blocked model".to_string(),
                        )
                        .into());
                    }
                    self.count += 1;
                    self.backend.assert(&block)?;
                }
            }
        }

        debug!(
            "incremental enumeration found {} solutions in {} checks",
            self.count, self.checks
        );
        Ok(Enumeration {
            count: self.count,
            solutions,
            checks: self.checks,
        })
    }

    fn count(&self) -> usize {
        self.count
    }

    fn name(&self) -> &'static str {
        "incremental"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::budget::CancelToken;
    use crate::error::SolveError;
    use crate::logic::translator::{Grammar, Translator};
    use crate::sat::phase_saving::RandomPhases;
    use crate::system::variable::VariableSet;
    use std::time::Duration;

    /// Delegates to [`Dpll`] but times out on check number `fail_at`.
    #[derive(Debug, Default)]
    struct TimesOutOnCheck {
        inner: Dpll,
        fail_at: usize,
        checks: usize,
    }

    impl SatBackend for TimesOutOnCheck {
        fn reset(&mut self, num_vars: usize) {
            self.inner.reset(num_vars);
            self.checks = 0;
        }

        fn assert(&mut self, fragment: &Expr) -> Result<(), BackendError> {
            self.inner.assert(fragment)
        }

        fn check_sat(&mut self, budget: &Budget) -> Result<SatResult, BackendError> {
            self.checks += 1;
            if self.checks == self.fail_at {
                return Err(BackendError::Timeout {
                    elapsed: Duration::ZERO,
                });
            }
            self.inner.check_sat(budget)
        }

        fn model(&self) -> Result<Assignment, BackendError> {
            self.inner.model()
        }
    }

    fn formula(names: &[&str], text: &str) -> Formula {
        let vars = VariableSet::new(names.iter().copied(), 0).unwrap();
        Translator::new(&vars, Grammar::Strict)
            .translate(text)
            .unwrap()
    }

    #[test]
    fn test_equivalence() {
        let mut enumerator = IncrementalBlockingEnumerator::new();
        let result = enumerator
            .enumerate(&formula(&["x1", "y1"], "x1=y1"), &Budget::unlimited())
            .unwrap();
        assert_eq!(
            result.solutions.sorted(),
            vec![Assignment::from(&[0u8, 0][..]), Assignment::from(&[1u8, 1][..])]
        );
        assert_eq!(result.count, 2);
        assert_eq!(result.checks, 3);
        assert_eq!(enumerator.checks(), 3);
    }

    #[test]
    fn test_unsatisfiable_takes_one_check() {
        let mut enumerator = IncrementalBlockingEnumerator::new();
        let result = enumerator
            .enumerate(&formula(&["x1"], "x1\n!x1"), &Budget::unlimited())
            .unwrap();
        assert!(result.solutions.is_empty());
        assert_eq!(result.checks, 1);
    }

    #[test]
    fn test_unconstrained_variables_are_enumerated() {
        let mut enumerator = IncrementalBlockingEnumerator::new();
        let result = enumerator
            .enumerate(&formula(&["a", "b", "c"], "a+b"), &Budget::unlimited())
            .unwrap();
        assert_eq!(result.count, 6);
        assert_eq!(result.checks, 7);
    }

    #[test]
    fn test_reuse_resets_backend() {
        let mut enumerator = IncrementalBlockingEnumerator::new();
        let f = formula(&["a", "b"], "a*b");
        let first = enumerator.enumerate(&f, &Budget::unlimited()).unwrap();
        let second = enumerator.enumerate(&f, &Budget::unlimited()).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.count, 1);
    }

    #[test]
    fn test_cancellation_is_a_backend_failure() {
        let token = CancelToken::new();
        token.cancel();
        let budget = Budget::unlimited().cancellable(token);

        let f = formula(&["x1", "x2"], "x1+x2");

        let mut enumerator = IncrementalBlockingEnumerator::new();
        let err = enumerator.enumerate(&f, &budget).unwrap_err();
        assert_eq!(err, SolveError::Backend(BackendError::Cancelled));
        assert!(err.is_operational());
        assert_eq!(enumerator.count(), 0);
        assert_eq!(enumerator.checks(), 1);
    }

    #[test]
    fn test_count_survives_an_aborted_run() {
        let backend = TimesOutOnCheck {
            fail_at: 3,
            ..TimesOutOnCheck::default()
        };
        let mut enumerator = IncrementalBlockingEnumerator::with_backend(backend);
        let err = enumerator
            .enumerate(&formula(&["a", "b", "c"], "a+b+c"), &Budget::unlimited())
            .unwrap_err();
        assert!(matches!(
            err,
            SolveError::Backend(BackendError::Timeout { .. })
        ));
        assert!(err.is_operational());
        assert_eq!(enumerator.count(), 2);
        assert_eq!(enumerator.checks(), 3);
    }

    #[test]
    fn test_configured_phases_survive_reset() {
        let f = formula(&["a", "b", "c"], "a+b+c");
        let order = |seed: u64| -> Vec<Assignment> {
            let backend = Dpll::<RandomPhases>::default().with_phases(RandomPhases::with_seed(seed));
            let mut enumerator = IncrementalBlockingEnumerator::with_backend(backend);
            let result = enumerator.enumerate(&f, &Budget::unlimited()).unwrap();
            assert_eq!(result.count, 7);
            result.solutions.iter().cloned().collect()
        };

        let first = order(1);
        assert_eq!(order(1), first);
        assert!(
            (2..=8).any(|seed| order(seed) != first),
            "every seed produced the same model order"
        );
    }
}
