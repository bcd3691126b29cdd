//! The default satisfiability backend for the incremental enumerator.
//!
//! Fragments are Tseitin-encoded into a [`cnf::Cnf`] and decided by a plain
//! DPLL search ([`dpll::Dpll`]). Anything else implementing
//! [`solver::SatBackend`] can be plugged into the enumerator instead.

pub mod assignment;
pub mod clause;
pub mod cnf;
pub mod dpll;
pub mod literal;
pub mod phase_saving;
pub mod solver;

pub use cnf::Cnf;
pub use dpll::Dpll;
pub use solver::{SatBackend, SatResult, SolutionStats};
