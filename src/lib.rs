#![deny(missing_docs)]
//! Enumeration of every solution of a system of boolean equations.
//!
//! A request declares ordered variables, split into causes and effects, and
//! supplies equation lines in a compact operator notation. The pipeline is:
//!
//! 1.  [`logic`] translates each line into an expression tree.
//! 2.  [`enumerate`] finds every satisfying assignment, either exhaustively
//!     or by solve-and-block over the [`sat`] backend.
//! 3.  [`report`] derives two plain-text views from the solution set.
//!
//! [`session`] ties the stages together.

/// Data model: declared variables, assignments and solution sets.
pub mod system;

/// Equation notation: lexer, grammars and expression trees.
pub mod logic;

/// The two enumeration strategies and their time budget.
pub mod enumerate;

/// Clausal encoding and a DPLL backend for incremental enumeration.
pub mod sat;

/// Report views over a finished solution set.
pub mod report;

/// End-to-end solve requests.
pub mod session;

/// Error types shared by every stage.
pub mod error;
