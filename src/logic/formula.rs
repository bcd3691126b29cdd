//! A translated equation system.

use crate::logic::expr::Expr;
use crate::system::assignment::Assignment;
use crate::system::variable::VariableSet;
use itertools::Itertools;

/// One parsed equation line; the raw text is kept for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    /// The line as written.
    pub raw: String,
    /// Its translation.
    pub fragment: Expr,
}

/// The conjunction of every equation of a solve request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    equations: Vec<Equation>,
    num_vars: usize,
}

impl Formula {
    /// A conjunction of `equations` over `num_vars` declared variables.
    #[must_use]
    pub const fn new(equations: Vec<Equation>, num_vars: usize) -> Self {
        Self {
            equations,
            num_vars,
        }
    }

    /// The equations, in input order.
    #[must_use]
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// The translated fragments, one per equation.
    pub fn fragments(&self) -> impl Iterator<Item = &Expr> {
        self.equations.iter().map(|eq| &eq.fragment)
    }

    /// Number of declared variables the formula ranges over.
    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// The whole formula as a single expression.
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        Expr::And(self.fragments().cloned().collect())
    }

    /// Evaluates every fragment against `assignment`.
    ///
    /// Returns `None` when a fragment refers to a variable the assignment has
    /// no value for.
    #[must_use]
    pub fn evaluate(&self, assignment: &Assignment) -> Option<bool> {
        let values = assignment.values();
        for fragment in self.fragments() {
            if !fragment.evaluate(values)? {
                return Some(false);
            }
        }
        Some(true)
    }

    /// Renders the formula with declared names, one fragment per conjunct.
    #[must_use]
    pub fn render(&self, variables: &VariableSet) -> String {
        let name = |i: usize| {
            variables
                .name(i)
                .map_or_else(|| format!("#{i}"), str::to_string)
        };
        self.fragments().map(|f| f.render(&name)).join(" * ")
    }
}
