//! One solve request, end to end: translate the equations, enumerate the
//! solutions, build the reports.
//!
//! Every request owns its [`VariableSet`], [`Formula`] and [`SolutionSet`];
//! nothing is shared between requests, so independent requests may run on
//! separate threads without coordination.

use crate::enumerate::{
    Budget, Enumeration, Enumerator, ExhaustiveEnumerator, IncrementalBlockingEnumerator,
};
use crate::error::SolveResult;
use crate::logic::formula::Formula;
use crate::logic::translator::{Grammar, Translator};
use crate::report::{DisplayNames, Report};
use crate::sat::cnf::Cnf;
use crate::sat::solver::SolutionStats;
use crate::system::assignment::SolutionSet;
use crate::system::variable::VariableSet;
use clap::ValueEnum;
use log::debug;
use std::fmt::{self, Display};
use std::time::{Duration, Instant};

/// Which enumerator a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Strategy {
    /// Evaluate all `2^n` candidates.
    #[default]
    Exhaustive,
    /// Solve and block with the SAT backend.
    Incremental,
}

impl Strategy {
    /// The grammar the strategy reads equations with unless overridden.
    #[must_use]
    pub const fn default_grammar(self) -> Grammar {
        match self {
            Self::Exhaustive => Grammar::Permissive,
            Self::Incremental => Grammar::Strict,
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhaustive => write!(f, "exhaustive"),
            Self::Incremental => write!(f, "incremental"),
        }
    }
}

/// Settings for a solve request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveOptions {
    /// Which enumerator runs.
    pub strategy: Strategy,
    /// Forces a grammar; `None` follows the strategy.
    pub grammar: Option<Grammar>,
    /// Wall-clock limit for enumeration.
    pub timeout: Option<Duration>,
}

impl SolveOptions {
    /// Options for `strategy` with its default grammar and no timeout.
    #[must_use]
    pub const fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            grammar: None,
            timeout: None,
        }
    }

    /// Forces `grammar` instead of the strategy's default.
    #[must_use]
    pub const fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = Some(grammar);
        self
    }

    /// Abandons enumeration after `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The grammar in effect: the forced one, else the strategy's default.
    #[must_use]
    pub const fn grammar(&self) -> Grammar {
        match self.grammar {
            Some(grammar) => grammar,
            None => self.strategy.default_grammar(),
        }
    }

    /// A fresh budget starting now.
    #[must_use]
    pub fn budget(&self) -> Budget {
        self.timeout.map_or_else(Budget::unlimited, Budget::with_timeout)
    }
}

/// The result of a successful solve.
#[derive(Debug, Clone)]
pub struct Solved {
    /// The translated equations.
    pub formula: Formula,
    /// Every solution, in discovery order.
    pub solutions: SolutionSet,
    /// Number of solutions accepted.
    pub count: usize,
    /// Candidates evaluated or backend checks issued.
    pub checks: u64,
    /// The strategy that produced the result.
    pub strategy: Strategy,
    /// Backend counters, for the incremental strategy.
    pub backend_stats: Option<SolutionStats>,
    /// Time spent translating the equations.
    pub translate_time: Duration,
    /// Time spent enumerating.
    pub solve_time: Duration,
}

impl Solved {
    /// The formula in clausal form.
    #[must_use]
    pub fn cnf(&self) -> Cnf {
        Cnf::from_formula(&self.formula)
    }
}

/// Declared variables plus the equation text of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationSystem {
    variables: VariableSet,
    equations: String,
}

impl EquationSystem {
    /// A request over `variables` with newline-separated `equations`.
    #[must_use]
    pub fn new(variables: VariableSet, equations: impl Into<String>) -> Self {
        Self {
            variables,
            equations: equations.into(),
        }
    }

    /// Declares causes and effects by name.
    ///
    /// # Errors
    ///
    /// Any declaration error from [`VariableSet::from_groups`].
    pub fn from_names<I, J, S>(causes: I, effects: J, equations: impl Into<String>) -> SolveResult<Self>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(VariableSet::from_groups(causes, effects)?, equations))
    }

    /// The declared variables.
    #[must_use]
    pub const fn variables(&self) -> &VariableSet {
        &self.variables
    }

    /// The raw equation text.
    #[must_use]
    pub fn equations(&self) -> &str {
        &self.equations
    }

    /// Parses the equations.
    ///
    /// # Errors
    ///
    /// The first translation error.
    pub fn translate(&self, grammar: Grammar) -> SolveResult<Formula> {
        Translator::new(&self.variables, grammar).translate(&self.equations)
    }

    /// Solves with the strategy, grammar and timeout in `options`.
    ///
    /// # Errors
    ///
    /// Translation errors before any enumeration; enumeration errors otherwise.
    pub fn solve(&self, options: &SolveOptions) -> SolveResult<Solved> {
        self.solve_within(options, &options.budget())
    }

    /// Like [`EquationSystem::solve`] with a caller-supplied budget, which
    /// may carry a cancellation token.
    ///
    /// # Errors
    ///
    /// See [`EquationSystem::solve`].
    pub fn solve_within(&self, options: &SolveOptions, budget: &Budget) -> SolveResult<Solved> {
        let start = Instant::now();
        let formula = self.translate(options.grammar())?;
        let translate_time = start.elapsed();

        debug!(
            "solving {} variables, {} equations with the {} strategy",
            self.variables.len(),
            formula.equations().len(),
            options.strategy
        );

        let start = Instant::now();
        let (enumeration, backend_stats) = match options.strategy {
            Strategy::Exhaustive => {
                let mut enumerator = ExhaustiveEnumerator::new();
                (enumerator.enumerate(&formula, budget)?, None)
            }
            Strategy::Incremental => {
                let mut enumerator = IncrementalBlockingEnumerator::new();
                let enumeration = enumerator.enumerate(&formula, budget)?;
                debug!("backend clauses: {}", enumerator.backend().cnf().len());
                (enumeration, Some(enumerator.backend().stats()))
            }
        };
        let solve_time = start.elapsed();

        let Enumeration {
            solutions,
            count,
            checks,
        } = enumeration;
        debug!("{count} solution(s) in {solve_time:?}");

        Ok(Solved {
            formula,
            solutions,
            count,
            checks,
            strategy: options.strategy,
            backend_stats,
            translate_time,
            solve_time,
        })
    }

    /// Solves with a caller-provided enumerator, for example one wrapping a
    /// different [`crate::sat::SatBackend`].
    ///
    /// # Errors
    ///
    /// See [`EquationSystem::solve`].
    pub fn solve_using<E: Enumerator>(
        &self,
        enumerator: &mut E,
        grammar: Grammar,
        budget: &Budget,
    ) -> SolveResult<Enumeration> {
        let formula = self.translate(grammar)?;
        debug!("solving with the {} enumerator", enumerator.name());
        enumerator.enumerate(&formula, budget)
    }

    /// Builds both report views for `solved`.
    #[must_use]
    pub fn report(&self, solved: &Solved, names: &DisplayNames) -> Report {
        Report::build(&solved.solutions, &self.variables, names)
    }
}
