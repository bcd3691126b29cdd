//! Declared variables and their cause/effect split.

use crate::error::{SolveError, SolveResult};
use rustc_hash::FxHashMap;

/// Which side of the cause/effect split a variable sits on.
///
/// Only the report builder cares about groups; solving treats every
/// variable alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group {
    /// Input variables, index below `x_count`.
    Cause,
    /// Output variables, index at or above `x_count`.
    Effect,
}

/// A named boolean unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable<'a> {
    /// The declared name.
    pub name: &'a str,
    /// Position in declaration order.
    pub index: usize,
    /// Cause or effect.
    pub group: Group,
}

/// The ordered, immutable set of variables of one solving session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableSet {
    names: Vec<String>,
    lookup: FxHashMap<String, usize>,
    x_count: usize,
}

/// Checks a name against `[a-zA-Z]+[0-9]*`.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let letters = name.bytes().take_while(u8::is_ascii_alphabetic).count();
    letters > 0 && name.bytes().skip(letters).all(|b| b.is_ascii_digit())
}

impl VariableSet {
    /// Declares `names` in order; the first `x_count` of them are causes.
    ///
    /// # Errors
    ///
    /// `NoVariables` for an empty list, `InvalidVariableName` and
    /// `DuplicateVariable` for bad names, `InvalidSplit` when `x_count`
    /// exceeds the number of names.
    pub fn new<I, S>(names: I, x_count: usize) -> SolveResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(SolveError::NoVariables);
        }
        if x_count > names.len() {
            return Err(SolveError::InvalidSplit {
                x_count,
                total: names.len(),
            });
        }

        let mut lookup = FxHashMap::default();
        for (i, name) in names.iter().enumerate() {
            if !is_valid_name(name) {
                return Err(SolveError::InvalidVariableName { name: name.clone() });
            }
            if lookup.insert(name.clone(), i).is_some() {
                return Err(SolveError::DuplicateVariable { name: name.clone() });
            }
        }

        Ok(Self {
            names,
            lookup,
            x_count,
        })
    }

    /// Declares cause names followed by effect names.
    ///
    /// # Errors
    ///
    /// See [`VariableSet::new`].
    pub fn from_groups<I, J, S>(causes: I, effects: J) -> SolveResult<Self>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = causes.into_iter().map(Into::into).collect();
        let x_count = names.len();
        names.extend(effects.into_iter().map(Into::into));
        Self::new(names, x_count)
    }

    /// Number of declared variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of cause variables; also the index of the first effect.
    #[must_use]
    pub const fn x_count(&self) -> usize {
        self.x_count
    }

    /// Names in declaration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name at `index`, if declared.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Position of `name`, if declared.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    /// Group of the variable at `index`.
    #[must_use]
    pub const fn group(&self, index: usize) -> Group {
        if index < self.x_count {
            Group::Cause
        } else {
            Group::Effect
        }
    }

    /// Every variable in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Variable<'_>> {
        self.names.iter().enumerate().map(|(index, name)| Variable {
            name: name.as_str(),
            index,
            group: self.group(index),
        })
    }

    /// The effect variables, after the causes.
    pub fn effects(&self) -> impl Iterator<Item = Variable<'_>> {
        self.iter().skip(self.x_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("x1"));
        assert!(is_valid_name("abc"));
        assert!(is_valid_name("Temp42"));
        assert!(!is_valid_name("1x"));
        assert!(!is_valid_name("x1a"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("x_1"));
    }

    #[test]
    fn test_groups() {
        let vars = VariableSet::from_groups(["x1", "x2"], ["y1"]).unwrap();
        assert_eq!(vars.len(), 3);
        assert_eq!(vars.x_count(), 2);
        assert_eq!(vars.group(1), Group::Cause);
        assert_eq!(vars.group(2), Group::Effect);
        assert_eq!(vars.effects().map(|v| v.name).collect::<Vec<_>>(), ["y1"]);
        assert_eq!(vars.index_of("x2"), Some(1));
        assert_eq!(vars.index_of("x3"), None);
    }

    #[test]
    fn test_rejects_bad_declarations() {
        assert_eq!(
            VariableSet::new(Vec::<String>::new(), 0),
            Err(SolveError::NoVariables)
        );
        assert!(matches!(
            VariableSet::new(["x1", "x1"], 1),
            Err(SolveError::DuplicateVariable { name }) if name == "x1"
        ));
        assert!(matches!(
            VariableSet::new(["x-1"], 0),
            Err(SolveError::InvalidVariableName { .. })
        ));
        assert_eq!(
            VariableSet::new(["x1"], 2),
            Err(SolveError::InvalidSplit { x_count: 2, total: 1 })
        );
    }
}
