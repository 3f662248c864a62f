//! Variable-selection heuristics: which unassigned variable to branch on
//! next.

use crate::solver::{problem::VariableId, search::SearchContext};

/// A strategy for choosing the next variable to assign.
///
/// Implementations see the full session state, so they can react to current
/// domain sizes and to the arc weights accumulated so far.
pub trait VariableSelection: std::fmt::Debug {
    /// Returns the chosen unassigned variable, or `None` if every variable
    /// is already assigned.
    fn select(&self, ctx: &SearchContext<'_>) -> Option<VariableId>;
}

/// Selects the first unassigned variable in iteration order. Deterministic
/// baseline, mostly useful in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstUnassigned;

impl VariableSelection for FirstUnassigned {
    fn select(&self, ctx: &SearchContext<'_>) -> Option<VariableId> {
        ctx.problem.variables().find(|&var| !ctx.is_assigned(var))
    }
}

/// The dom/wdeg heuristic: selects the unassigned variable minimizing
/// `current-domain-size / weighted-degree`.
///
/// Arcs gain weight whenever propagation across them causes a domain
/// wipeout, so variables entangled in constraints that have already proven
/// hard get picked early. This adaptively refines plain
/// smallest-domain-first with discovered problem structure. Ties go to the
/// first variable encountered in iteration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomWdeg;

impl VariableSelection for DomWdeg {
    fn select(&self, ctx: &SearchContext<'_>) -> Option<VariableId> {
        let mut best: Option<(VariableId, f64)> = None;
        for var in ctx.problem.variables() {
            if ctx.is_assigned(var) {
                continue;
            }
            let ratio = ctx.domains.size(var) as f64 / ctx.weighted_degree(var) as f64;
            match best {
                Some((_, best_ratio)) if ratio >= best_ratio => {}
                _ => best = Some((var, ratio)),
            }
        }
        best.map(|(var, _)| var)
    }
}
