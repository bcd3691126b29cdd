//! Signed literals.
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use core::ops::Not;
use std::fmt;

/// 1-based SAT variable identifier, as in DIMACS.
pub type Variable = u32;

/// A variable or its negation, stored DIMACS style as a signed integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal(i32);

impl Literal {
    /// `var` when `polarity` holds, its negation otherwise.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn new(var: Variable, polarity: bool) -> Self {
        let var = var as i32;
        if polarity { Self(var) } else { Self(-var) }
    }

    /// The variable, without its sign.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    /// True for a positive literal.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0 > 0
    }

    /// The same variable with the opposite polarity.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(Literal::new(1, false).negated(), Literal::new(1, true));
        assert_eq!(!Literal::new(1, true), Literal::new(1, false));
        assert_eq!(!Literal::from(-4), Literal::from(4));
    }

    #[test]
    fn test_literal_parts() {
        let lit = Literal::new(7, false);
        assert_eq!(lit.variable(), 7);
        assert!(!lit.polarity());
        assert_eq!(lit.to_string(), "-7");
    }
}
