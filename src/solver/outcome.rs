//! The result of a solver run: a complete assignment, or an explicit
//! no-solution outcome.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::solver::problem::{Value, VariableId};

/// A complete, consistent assignment, ordered by variable for deterministic
/// display and serialization.
pub type Assignment = BTreeMap<VariableId, Value>;

/// What a search strategy produced.
///
/// `NoSolution` is a valid outcome, not an error: the complete strategies
/// return it when the search space is exhausted, min-conflicts when its step
/// budget runs out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "assignment", rename_all = "kebab-case")]
pub enum SearchOutcome {
    Solution(Assignment),
    NoSolution,
}

impl SearchOutcome {
    pub fn is_solution(&self) -> bool {
        matches!(self, SearchOutcome::Solution(_))
    }

    pub fn solution(&self) -> Option<&Assignment> {
        match self {
            SearchOutcome::Solution(assignment) => Some(assignment),
            SearchOutcome::NoSolution => None,
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Solution(assignment) => {
                let mut first = true;
                write!(f, "{{")?;
                for (var, value) in assignment {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{var}: {value}")?;
                    first = false;
                }
                write!(f, "}}")
            }
            SearchOutcome::NoSolution => write!(f, "no solution found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn display_is_sorted_by_variable() {
        let mut assignment = Assignment::new();
        assignment.insert(2, 30);
        assignment.insert(0, 10);
        assignment.insert(1, 20);
        let outcome = SearchOutcome::Solution(assignment);
        assert_eq!(outcome.to_string(), "{0: 10, 1: 20, 2: 30}");
    }

    #[test]
    fn serializes_with_an_outcome_tag() {
        let json = serde_json::to_string(&SearchOutcome::NoSolution).unwrap();
        assert_eq!(json, r#"{"outcome":"no-solution"}"#);
    }
}
