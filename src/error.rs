//! Error types for translating and solving equation systems.
//!
//! Input errors (unknown names, malformed lines, bad declarations) abort a
//! request before any enumeration begins. Operational failures (`Backend`,
//! `Interrupted`) mean the run was inconclusive, not that the input is wrong.

use crate::system::assignment::Assignment;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for solve requests.
pub type SolveResult<T> = Result<T, SolveError>;

/// Errors surfaced by the translator and the enumerators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Solve requested with zero declared variables.
    #[error("no variables declared; declare at least one variable before adding equations")]
    NoVariables,

    /// Solve requested with zero non-blank equation lines.
    #[error("no equations given; enter at least one equation")]
    NoEquations,

    /// An equation references names outside the declared variable set.
    #[error("unknown variable(s) {} in equation `{line}`", names.join(", "))]
    UnknownVariable {
        /// Offending names, in order of first appearance.
        names: Vec<String>,
        /// Raw text of the offending equation.
        line: String,
    },

    /// A line matches none of the shapes of the strict grammar.
    #[error("unsupported equation format: `{line}`")]
    UnsupportedFormat {
        /// Raw text of the offending equation.
        line: String,
    },

    /// A line is not well formed in the permissive grammar.
    #[error("syntax error in equation `{line}`: {message}")]
    Syntax {
        /// Raw text of the offending equation.
        line: String,
        /// What went wrong.
        message: String,
    },

    /// A parsed formula could not be evaluated against a candidate assignment.
    #[error("cannot evaluate `{formula}` against assignment [{assignment}]")]
    Evaluation {
        /// Rendered formula.
        formula: String,
        /// The candidate that triggered the failure.
        assignment: Assignment,
    },

    /// A declared name does not match `[a-zA-Z]+[0-9]*`.
    #[error("invalid variable name `{name}`; names are letters optionally followed by digits")]
    InvalidVariableName {
        /// The rejected name.
        name: String,
    },

    /// A name was declared twice.
    #[error("variable `{name}` declared more than once")]
    DuplicateVariable {
        /// The repeated name.
        name: String,
    },

    /// The cause/effect split point lies beyond the declared variables.
    #[error("cause count {x_count} exceeds the {total} declared variables")]
    InvalidSplit {
        /// Requested split point.
        x_count: usize,
        /// Number of declared variables.
        total: usize,
    },

    /// Too many variables for the exhaustive strategy to index.
    #[error("{count} variables exceed the exhaustive limit of {limit}")]
    TooManyVariables {
        /// Declared variable count.
        count: usize,
        /// Largest count the strategy supports.
        limit: usize,
    },

    /// The exhaustive search was cancelled or ran past its deadline.
    #[error("enumeration interrupted after {checked} candidates")]
    Interrupted {
        /// Candidates examined before stopping.
        checked: u64,
    },

    /// The satisfiability backend failed or exceeded its budget.
    #[error("satisfiability backend failure: {0}")]
    Backend(#[from] BackendError),
}

impl SolveError {
    /// True for failures that say nothing about the input: a timeout, a
    /// cancellation or a backend fault. Retrying with a larger budget may succeed.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        matches!(self, Self::Backend(_) | Self::Interrupted { .. })
    }
}

/// Failures raised by a satisfiability backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// A check ran past the imposed deadline.
    #[error("check timed out after {elapsed:?}")]
    Timeout {
        /// Time spent in the check that was abandoned.
        elapsed: Duration,
    },

    /// The caller cancelled the check.
    #[error("check cancelled")]
    Cancelled,

    /// A model was requested without a preceding satisfiable check.
    #[error("no model available; the last check was not satisfiable")]
    NoModel,

    /// Any other unexpected condition.
    #[error("{0}")]
    Internal(String),
}
