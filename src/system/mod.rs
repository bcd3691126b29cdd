//! The data model shared by every stage: declared variables, assignments
//! and the solution set an enumeration run produces.

pub mod assignment;
pub mod variable;

pub use assignment::{Assignment, SolutionSet};
pub use variable::{Group, Variable, VariableSet};
