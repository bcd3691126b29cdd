//! Partial assignments used during search.

use crate::sat::literal::{Literal, Variable};

/// The value a variable holds during search.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    /// Not yet decided or implied.
    #[default]
    Unassigned,
    /// Holds the given value.
    Assigned(bool),
}

impl VarState {
    /// True once a value is set.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    /// True while no value is set.
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        !self.is_assigned()
    }

    /// The value, if assigned.
    #[must_use]
    pub const fn value(&self) -> Option<bool> {
        match self {
            Self::Assigned(b) => Some(*b),
            Self::Unassigned => None,
        }
    }
}

/// Partial assignment indexed by 1-based variable; slot 0 is unused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VecAssignment(Vec<VarState>);

impl VecAssignment {
    /// All of `1..=num_vars` unassigned.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![VarState::Unassigned; num_vars + 1])
    }

    /// Grows to hold variables up to `num_vars`, keeping existing values.
    pub fn resize(&mut self, num_vars: usize) {
        self.0.resize(num_vars + 1, VarState::Unassigned);
    }

    /// Makes `lit` true.
    pub fn assign(&mut self, lit: Literal) {
        self.0[lit.variable() as usize] = VarState::Assigned(lit.polarity());
    }

    /// Clears the value of `var`.
    pub fn unassign(&mut self, var: Variable) {
        self.0[var as usize] = VarState::Unassigned;
    }

    /// Unassigns every variable.
    pub fn clear(&mut self) {
        self.0.fill(VarState::Unassigned);
    }

    /// Current value of `var`.
    #[must_use]
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        self.0.get(var as usize).and_then(VarState::value)
    }

    /// Current truth of `lit`, derived from its variable.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.var_value(lit.variable()).map(|b| b == lit.polarity())
    }

    /// Variables `1..=num_vars` that still have no value.
    pub fn unassigned(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, s)| s.is_unassigned())
            .filter_map(|(i, _)| Variable::try_from(i).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_value() {
        let mut a = VecAssignment::new(3);
        a.assign(Literal::new(2, false));
        assert_eq!(a.var_value(2), Some(false));
        assert_eq!(a.literal_value(Literal::new(2, false)), Some(true));
        assert_eq!(a.literal_value(Literal::new(2, true)), Some(false));
        assert_eq!(a.literal_value(Literal::new(1, true)), None);
        assert_eq!(a.unassigned().collect::<Vec<_>>(), vec![1, 3]);

        a.unassign(2);
        assert_eq!(a.var_value(2), None);
    }
}
