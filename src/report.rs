//! The two plain-text views derived from a finished [`SolutionSet`].
//!
//! * [`effect_view`] lists, per effect variable, the cause variables set in
//!   each solution where that effect holds.
//! * [`cause_view`] pairs each solution's active causes with every effect
//!   it sets, one line per effect.
//!
//! Both are pure functions of the solutions, the variable ordering and its
//! cause/effect split, and a [`DisplayNames`] map.

use crate::error::{SolveError, SolveResult};
use crate::system::assignment::{Assignment, SolutionSet};
use crate::system::variable::VariableSet;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt::Write;

/// Human-readable labels for variables.
///
/// Variables without a label, or with a blank one, are shown by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayNames(FxHashMap<String, String>);

impl DisplayNames {
    /// An empty table; every name falls back to itself.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label of `name`; a blank label removes it.
    pub fn insert(&mut self, name: impl Into<String>, label: impl Into<String>) {
        let name = name.into();
        let label = label.into();
        let label = label.trim();
        if label.is_empty() {
            self.0.remove(&name);
        } else {
            self.0.insert(name, label.to_string());
        }
    }

    /// Reads `name = label` lines. Blank lines and lines starting with `#`
    /// are skipped.
    ///
    /// # Errors
    ///
    /// `Syntax` for a line without `=` or with an empty name.
    pub fn parse(text: &str) -> SolveResult<Self> {
        let mut names = Self::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((name, label)) = line.split_once('=') else {
                return Err(SolveError::Syntax {
                    line: line.to_string(),
                    message: "expected `name = label`".to_string(),
                });
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(SolveError::Syntax {
                    line: line.to_string(),
                    message: "missing variable name".to_string(),
                });
            }
            names.insert(name, label);
        }
        Ok(names)
    }

    /// The label for `name`, or `name` itself.
    #[must_use]
    pub fn label<'a>(&'a self, name: &'a str) -> &'a str {
        self.0.get(name).map_or(name, String::as_str)
    }

    /// Number of labelled names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no name has a label.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, L: Into<String>> FromIterator<(N, L)> for DisplayNames {
    fn from_iter<T: IntoIterator<Item = (N, L)>>(iter: T) -> Self {
        let mut names = Self::new();
        for (name, label) in iter {
            names.insert(name, label);
        }
        names
    }
}

/// Both views of one solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Effect-indexed view.
    pub view1: String,
    /// Cause-indexed view.
    pub view2: String,
}

impl Report {
    /// Renders both views.
    #[must_use]
    pub fn build(solutions: &SolutionSet, variables: &VariableSet, names: &DisplayNames) -> Self {
        Self {
            view1: effect_view(solutions, variables, names),
            view2: cause_view(solutions, variables, names),
        }
    }
}

fn active_causes<'a>(
    solution: &Assignment,
    variables: &'a VariableSet,
    names: &'a DisplayNames,
) -> Vec<&'a str> {
    solution
        .ones_in(0..variables.x_count())
        .filter_map(|i| variables.name(i))
        .map(|name| names.label(name))
        .collect()
}

/// View 1: for each effect variable, the causes active in every solution
/// where it is 1.
#[must_use]
pub fn effect_view(
    solutions: &SolutionSet,
    variables: &VariableSet,
    names: &DisplayNames,
) -> String {
    let mut out = String::new();
    for (n, effect) in variables.effects().enumerate() {
        if n > 0 {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "{} ({}) = 1 when the cause variables are:",
            effect.name,
            names.label(effect.name)
        );

        let mut found = false;
        for solution in solutions.iter().filter(|s| s.get(effect.index) == Some(true)) {
            found = true;
            let causes = active_causes(solution, variables, names);
            if causes.is_empty() {
                out.push_str("  No cause variable is set\n");
            } else {
                let _ = writeln!(out, "  Solution: {}", causes.join(", "));
            }
        }
        if !found {
            out.push_str("  No solution\n");
        }
    }
    out
}

/// View 2: one line per (solution, effect) pair, for solutions with at least
/// one active cause.
#[must_use]
pub fn cause_view(
    solutions: &SolutionSet,
    variables: &VariableSet,
    names: &DisplayNames,
) -> String {
    let lines = solutions
        .iter()
        .filter_map(|solution| {
            let causes = active_causes(solution, variables, names);
            (!causes.is_empty()).then(|| (solution, causes.join(", ")))
        })
        .flat_map(|(solution, causes)| {
            solution
                .ones_in(variables.x_count()..variables.len())
                .filter_map(|i| variables.name(i))
                .map(move |effect| format!("{causes} indicate {}\n", names.label(effect)))
                .collect_vec()
        })
        .collect_vec();

    if lines.is_empty() {
        "No matching solution\n".to_string()
    } else {
        lines.concat()
    }
}
