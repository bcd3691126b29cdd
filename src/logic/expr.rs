//! Boolean expression trees over declared variables.

use itertools::Itertools;
use std::fmt;

/// A boolean expression over indexed variables.
///
/// Variables are 0-based positions in the declared ordering. Evaluation is a
/// direct recursive interpretation against an assignment slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Expr {
    /// The declared variable at this position.
    Var(usize),
    /// A fixed truth value.
    Const(bool),
    /// Negation.
    Not(Box<Expr>),
    /// Holds when every operand holds.
    And(Vec<Expr>),
    /// Holds when any operand holds.
    Or(Vec<Expr>),
    /// Both sides hold the same truth value.
    Eq(Box<Expr>, Box<Expr>),
    /// True unless the left side is true and the right side is false.
    Implies(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// `!e`.
    #[must_use]
    pub fn negate(e: Self) -> Self {
        Self::Not(Box::new(e))
    }

    /// `a = b`.
    #[must_use]
    pub fn iff(a: Self, b: Self) -> Self {
        Self::Eq(Box::new(a), Box::new(b))
    }

    /// `a - b`: `a` implies `b`.
    #[must_use]
    pub fn implies(a: Self, b: Self) -> Self {
        Self::Implies(Box::new(a), Box::new(b))
    }

    /// A variable or its negation.
    #[must_use]
    pub fn literal(index: usize, polarity: bool) -> Self {
        if polarity {
            Self::Var(index)
        } else {
            Self::negate(Self::Var(index))
        }
    }

    /// Evaluates against `values`, or `None` if a variable index has no value.
    #[must_use]
    pub fn evaluate(&self, values: &[bool]) -> Option<bool> {
        match self {
            Self::Var(i) => values.get(*i).copied(),
            Self::Const(b) => Some(*b),
            Self::Not(e) => e.evaluate(values).map(|b| !b),
            Self::And(es) => {
                for e in es {
                    if !e.evaluate(values)? {
                        return Some(false);
                    }
                }
                Some(true)
            }
            Self::Or(es) => {
                for e in es {
                    if e.evaluate(values)? {
                        return Some(true);
                    }
                }
                Some(false)
            }
            Self::Eq(a, b) => Some(a.evaluate(values)? == b.evaluate(values)?),
            Self::Implies(a, b) => Some(!a.evaluate(values)? || b.evaluate(values)?),
        }
    }

    /// Largest variable index mentioned, if any.
    #[must_use]
    pub fn max_var(&self) -> Option<usize> {
        match self {
            Self::Var(i) => Some(*i),
            Self::Const(_) => None,
            Self::Not(e) => e.max_var(),
            Self::And(es) | Self::Or(es) => es.iter().filter_map(Self::max_var).max(),
            Self::Eq(a, b) | Self::Implies(a, b) => a.max_var().max(b.max_var()),
        }
    }

    /// Renders in the equation notation, naming variables through `name`.
    pub fn render<F>(&self, name: &F) -> String
    where
        F: Fn(usize) -> String,
    {
        match self {
            Self::Var(i) => name(*i),
            Self::Const(b) => u8::from(*b).to_string(),
            Self::Not(e) => format!("!{}", e.render(name)),
            Self::And(es) => Self::render_nary(es, "*", name, "1"),
            Self::Or(es) => Self::render_nary(es, "+", name, "0"),
            Self::Eq(a, b) => format!("({} = {})", a.render(name), b.render(name)),
            Self::Implies(a, b) => format!("({} - {})", a.render(name), b.render(name)),
        }
    }

    fn render_nary<F>(es: &[Self], op: &str, name: &F, empty: &str) -> String
    where
        F: Fn(usize) -> String,
    {
        match es {
            [] => empty.to_string(),
            [e] => e.render(name),
            _ => format!("({})", es.iter().map(|e| e.render(name)).join(&format!(" {op} "))),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&|i| format!("v{i}")))
    }
}

/// Disjunction of `e`; a single operand is returned as is.
#[must_use]
pub fn ors(mut e: Vec<Expr>) -> Expr {
    if e.len() == 1 {
        e.remove(0)
    } else {
        Expr::Or(e)
    }
}

/// Conjunction of `e`; a single operand is returned as is.
#[must_use]
pub fn ands(mut e: Vec<Expr>) -> Expr {
    if e.len() == 1 {
        e.remove(0)
    } else {
        Expr::And(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_operators() {
        let v = [true, false];
        assert_eq!(Expr::Var(0).evaluate(&v), Some(true));
        assert_eq!(Expr::negate(Expr::Var(0)).evaluate(&v), Some(false));
        assert_eq!(Expr::And(vec![Expr::Var(0), Expr::Var(1)]).evaluate(&v), Some(false));
        assert_eq!(Expr::Or(vec![Expr::Var(0), Expr::Var(1)]).evaluate(&v), Some(true));
        assert_eq!(Expr::iff(Expr::Var(0), Expr::Var(1)).evaluate(&v), Some(false));
        assert_eq!(Expr::implies(Expr::Var(0), Expr::Var(1)).evaluate(&v), Some(false));
        assert_eq!(Expr::implies(Expr::Var(1), Expr::Var(0)).evaluate(&v), Some(true));
        assert_eq!(Expr::And(vec![]).evaluate(&v), Some(true));
        assert_eq!(Expr::Or(vec![]).evaluate(&v), Some(false));
    }

    #[test]
    fn test_evaluate_missing_variable() {
        assert_eq!(Expr::Var(2).evaluate(&[true]), None);
        assert_eq!(
            Expr::iff(Expr::Const(true), Expr::Var(5)).evaluate(&[true]),
            None
        );
    }

    #[test]
    fn test_render() {
        let e = Expr::implies(
            Expr::negate(Expr::And(vec![Expr::Var(1), Expr::Var(2)])),
            Expr::Var(0),
        );
        let names = ["x1", "x2", "y2"];
        assert_eq!(e.render(&|i| names[i].to_string()), "(!(x2 * y2) - x1)");
        assert_eq!(e.to_string(), "(!(v1 * v2) - v0)");
        assert_eq!(e.max_var(), Some(2));
    }

    #[test]
    fn test_nary_helpers() {
        assert_eq!(ors(vec![Expr::Var(3)]), Expr::Var(3));
        assert_eq!(
            ands(vec![Expr::Var(0), Expr::Var(1)]),
            Expr::And(vec![Expr::Var(0), Expr::Var(1)])
        );
        assert_eq!(Expr::literal(4, false), Expr::negate(Expr::Var(4)));
    }
}
