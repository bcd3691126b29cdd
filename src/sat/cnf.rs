#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clause database and the Tseitin encoding of [`Expr`] trees.
//!
//! Declared variable `i` (0-based) becomes SAT variable `i + 1`. Every
//! auxiliary variable is defined by a full equivalence with the subterm it
//! names, so each model of the declared variables extends to exactly one
//! model of the CNF.

use crate::logic::expr::Expr;
use crate::logic::formula::Formula;
use crate::sat::clause::Clause;
use crate::sat::literal::{Literal, Variable};
use core::ops::Index;
use std::fmt;

/// A conjunction of clauses over variables `1..=num_vars`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// Clauses in the order they were added.
    pub clauses: Vec<Clause>,
    /// Highest variable in use, auxiliaries included.
    pub num_vars: usize,
    /// Variables `1..=declared` are the caller's; the rest are auxiliary.
    pub declared: usize,
    true_lit: Option<Literal>,
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl Cnf {
    /// An empty formula over `declared` caller variables.
    #[must_use]
    pub const fn new(declared: usize) -> Self {
        Self {
            clauses: Vec::new(),
            num_vars: declared,
            declared,
            true_lit: None,
        }
    }

    /// Iterates the clauses.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// True when no clause has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Adds a clause, dropping tautologies.
    pub fn add_clause(&mut self, clause: Clause) {
        if !clause.is_tautology() {
            self.clauses.push(clause);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn fresh_var(&mut self) -> Variable {
        self.num_vars += 1;
        self.num_vars as Variable
    }

    /// Literal for declared variable `index`, shifted to 1-based numbering.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn declared_literal(index: usize, polarity: bool) -> Literal {
        Literal::new((index + 1) as Variable, polarity)
    }

    /// Encodes every fragment of `formula`.
    #[must_use]
    pub fn from_formula(formula: &Formula) -> Self {
        let mut cnf = Self::new(formula.num_vars());
        for fragment in formula.fragments() {
            cnf.assert_expr(fragment);
        }
        cnf
    }

    /// Requires `expr` to hold.
    pub fn assert_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Const(true) => {}
            Expr::Const(false) => self.clauses.push(Clause::default()),
            Expr::And(es) => {
                for e in es {
                    self.assert_expr(e);
                }
            }
            Expr::Or(es) => {
                let clause = es.iter().map(|e| self.define(e)).collect();
                self.add_clause(clause);
            }
            Expr::Implies(a, b) => {
                let a = self.define(a);
                let b = self.define(b);
                self.add_clause(Clause::new(&[!a, b]));
            }
            e => {
                let lit = self.define(e);
                self.add_clause(Clause::new(&[lit]));
            }
        }
    }

    /// Returns a literal equivalent to `expr`, adding defining clauses.
    fn define(&mut self, expr: &Expr) -> Literal {
        match expr {
            Expr::Var(i) => Self::declared_literal(*i, true),
            Expr::Const(b) => {
                let t = self.true_literal();
                if *b { t } else { !t }
            }
            Expr::Not(e) => !self.define(e),
            Expr::And(es) => {
                let lits: Vec<Literal> = es.iter().map(|e| self.define(e)).collect();
                match lits.as_slice() {
                    [] => self.true_literal(),
                    [l] => *l,
                    _ => {
                        let x = Literal::new(self.fresh_var(), true);
                        for &l in &lits {
                            self.add_clause(Clause::new(&[!x, l]));
                        }
                        self.add_clause(
                            std::iter::once(x).chain(lits.iter().map(|&l| !l)).collect(),
                        );
                        x
                    }
                }
            }
            Expr::Or(es) => {
                let lits: Vec<Literal> = es.iter().map(|e| self.define(e)).collect();
                match lits.as_slice() {
                    [] => !self.true_literal(),
                    [l] => *l,
                    _ => self.define_or(&lits),
                }
            }
            Expr::Eq(a, b) => {
                let a = self.define(a);
                let b = self.define(b);
                let x = Literal::new(self.fresh_var(), true);
                self.add_clause(Clause::new(&[!x, !a, b]));
                self.add_clause(Clause::new(&[!x, a, !b]));
                self.add_clause(Clause::new(&[x, a, b]));
                self.add_clause(Clause::new(&[x, !a, !b]));
                x
            }
            Expr::Implies(a, b) => {
                let a = self.define(a);
                let b = self.define(b);
                self.define_or(&[!a, b])
            }
        }
    }

    fn define_or(&mut self, lits: &[Literal]) -> Literal {
        let x = Literal::new(self.fresh_var(), true);
        for &l in lits {
            self.add_clause(Clause::new(&[x, !l]));
        }
        self.add_clause(std::iter::once(!x).chain(lits.iter().copied()).collect());
        x
    }

    fn true_literal(&mut self) -> Literal {
        if let Some(t) = self.true_lit {
            return t;
        }
        let t = Literal::new(self.fresh_var(), true);
        self.clauses.push(Clause::new(&[t]));
        self.true_lit = Some(t);
        t
    }

    /// Checks a full model (`model[v - 1]` is variable `v`) against every clause.
    #[must_use]
    pub fn verify(&self, model: &[bool]) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied_by(model))
    }
}

impl fmt::Display for Cnf {
    /// DIMACS rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "c {} declared variables", self.declared)?;
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts models of the declared variables by extending each candidate
    /// over the auxiliaries by brute force.
    fn count_models(cnf: &Cnf) -> usize {
        let n = cnf.num_vars;
        (0..1u64 << n)
            .filter(|bits| {
                let model: Vec<bool> = (0..n).map(|i| bits >> i & 1 == 1).collect();
                cnf.verify(&model)
            })
            .count()
    }

    #[test]
    fn test_equivalence_encoding_has_one_extension_per_model() {
        let e = Expr::iff(
            Expr::Or(vec![Expr::Var(0), Expr::Var(1)]),
            Expr::negate(Expr::Var(2)),
        );
        let mut cnf = Cnf::new(3);
        cnf.assert_expr(&e);

        let expected = (0..8u8)
            .filter(|bits| {
                let v: Vec<bool> = (0..3).map(|i| bits >> i & 1 == 1).collect();
                e.evaluate(&v) == Some(true)
            })
            .count();
        assert_eq!(count_models(&cnf), expected);
    }

    #[test]
    fn test_top_level_shapes_avoid_auxiliaries() {
        let mut cnf = Cnf::new(3);
        cnf.assert_expr(&Expr::And(vec![
            Expr::Or(vec![Expr::Var(0), Expr::negate(Expr::Var(1))]),
            Expr::implies(Expr::Var(1), Expr::Var(2)),
            Expr::Var(0),
        ]));
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf.len(), 3);
    }

    #[test]
    fn test_constants() {
        let mut cnf = Cnf::new(1);
        cnf.assert_expr(&Expr::iff(Expr::Var(0), Expr::Const(false)));
        assert!(cnf.verify(&[false, true, false]) || cnf.verify(&[false, true, true]));
        assert_eq!(count_models(&cnf), 1);

        let mut unsat = Cnf::new(1);
        unsat.assert_expr(&Expr::Const(false));
        assert_eq!(count_models(&unsat), 0);
    }

    #[test]
    fn test_dimacs() {
        let mut cnf = Cnf::new(2);
        cnf.assert_expr(&Expr::Or(vec![Expr::Var(0), Expr::negate(Expr::Var(1))]));
        assert_eq!(cnf.to_string(), "c 2 declared variables\np cnf 2 1\n1 -2 0\n");
    }
}
