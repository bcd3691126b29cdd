//! Disjunctions of literals.

use crate::sat::literal::Literal;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// A disjunction of literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    /// Literals in insertion order.
    pub literals: SmallVec<[Literal; 8]>,
}

impl Clause {
    /// A clause over `literals`.
    #[must_use]
    pub fn new(literals: &[Literal]) -> Self {
        Self {
            literals: SmallVec::from_slice(literals),
        }
    }

    /// Number of literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// True for the empty clause, which no model satisfies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// True if the clause holds both a literal and its negation.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|&l| self.literals.contains(&l.negated()))
    }

    /// Iterates the literals.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Checks the clause against a 1-based model (`model[v - 1]` is variable `v`).
    #[must_use]
    pub fn is_satisfied_by(&self, model: &[bool]) -> bool {
        self.literals.iter().any(|l| {
            model
                .get(l.variable() as usize - 1)
                .is_some_and(|&v| v == l.polarity())
        })
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self {
            literals: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        literals.into_iter().map(Literal::from).collect()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{} 0", self.literals.iter().join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let clause = Clause::from(vec![1, -2, 3]);
        assert_eq!(clause.len(), 3);
        assert_eq!(clause.literals[1], Literal::new(2, false));
    }

    #[test]
    fn test_tautology() {
        assert!(Clause::from(vec![1, 2, -1]).is_tautology());
        assert!(!Clause::from(vec![1, 2]).is_tautology());
    }

    #[test]
    fn test_satisfied_by() {
        let clause = Clause::from(vec![-1, 2]);
        assert!(clause.is_satisfied_by(&[false, false]));
        assert!(!clause.is_satisfied_by(&[true, false]));
        assert!(!Clause::default().is_satisfied_by(&[true]));
    }

    #[test]
    fn test_display() {
        assert_eq!(Clause::from(vec![1, -3]).to_string(), "1 -3 0");
    }
}
