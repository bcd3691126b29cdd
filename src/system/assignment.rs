//! Complete assignments and the solution sets built from them.

use core::ops::Index;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt;

/// One complete 0/1 valuation of the declared variables, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Assignment(Vec<bool>);

impl Assignment {
    /// Wraps `values`, one per declared variable.
    #[must_use]
    pub const fn new(values: Vec<bool>) -> Self {
        Self(values)
    }

    /// Builds the candidate for enumeration step `number` over `n` variables.
    ///
    /// Bit `i` of `number` maps to the variable at position `n - 1 - i`, so
    /// ascending numbers walk the assignments in lexicographic order with the
    /// first declared variable most significant.
    #[must_use]
    pub fn from_index(number: u64, n: usize) -> Self {
        Self((0..n).map(|pos| (number >> (n - 1 - pos)) & 1 == 1).collect())
    }

    /// Number of variables covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the assignment over no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of the variable at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied()
    }

    /// Values in declaration order.
    #[must_use]
    pub fn values(&self) -> &[bool] {
        &self.0
    }

    /// Indices of the variables set to 1 within `range`.
    pub fn ones_in(&self, range: core::ops::Range<usize>) -> impl Iterator<Item = usize> + '_ {
        range.filter(|&i| self.0.get(i).copied().unwrap_or(false))
    }

    /// The assignment as a vector of 0/1 digits.
    #[must_use]
    pub fn bits(&self) -> Vec<u8> {
        self.0.iter().map(|&b| u8::from(b)).collect()
    }
}

impl Index<usize> for Assignment {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<bool>> for Assignment {
    fn from(values: Vec<bool>) -> Self {
        Self::new(values)
    }
}

impl From<&[u8]> for Assignment {
    fn from(bits: &[u8]) -> Self {
        Self(bits.iter().map(|&b| b != 0).collect())
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().map(|&b| u8::from(b)).join(", "))
    }
}

/// Every distinct satisfying assignment found by one enumeration run.
///
/// Keeps the order in which the enumerator accepted solutions; duplicates
/// are ignored on insertion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolutionSet {
    solutions: Vec<Assignment>,
    seen: FxHashSet<Assignment>,
}

impl SolutionSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `assignment`, returning `false` if it was already present.
    pub fn insert(&mut self, assignment: Assignment) -> bool {
        if self.seen.contains(&assignment) {
            return false;
        }
        self.seen.insert(assignment.clone());
        self.solutions.push(assignment);
        true
    }

    /// Number of distinct solutions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// True if no solution was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Solutions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.solutions.iter()
    }

    /// Solutions in lexicographic order.
    #[must_use]
    pub fn sorted(&self) -> Vec<Assignment> {
        self.solutions.iter().cloned().sorted().collect()
    }

    /// Set equality, ignoring the order solutions were found in.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.seen == other.seen
    }

    /// Renders the solutions as a table headed by `names`.
    #[must_use]
    pub fn table(&self, names: &[String]) -> String {
        let widths = names.iter().map(|n| n.len().max(1)).collect_vec();
        let mut out = names
            .iter()
            .zip(widths.iter().copied())
            .map(|(n, w)| format!("{n:>w$}"))
            .join(" ");
        out.push('\n');
        for solution in &self.solutions {
            let row = solution
                .values()
                .iter()
                .zip(widths.iter().copied())
                .map(|(&b, w)| format!("{:>w$}", u8::from(b)))
                .join(" ");
            out.push_str(&row);
            out.push('\n');
        }
        out
    }
}

impl FromIterator<Assignment> for SolutionSet {
    fn from_iter<T: IntoIterator<Item = Assignment>>(iter: T) -> Self {
        let mut set = Self::new();
        for a in iter {
            set.insert(a);
        }
        set
    }
}

impl<'a> IntoIterator for &'a SolutionSet {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}
