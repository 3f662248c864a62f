//! Chronological backtracking search, parameterized by variable selection,
//! value ordering and inference.

use tracing::debug;

use crate::{
    error::Result,
    solver::{
        domains::RemovalLog,
        heuristics::{value::ValueOrdering, variable::VariableSelection},
        inference::Inference,
        outcome::SearchOutcome,
        problem::Problem,
        search::SearchContext,
        stats::SearchStats,
        strategy::SearchStrategy,
    },
};

/// Recursive depth-first search over partial assignments.
///
/// At each level a variable is chosen by the configured selection heuristic
/// and its candidate values tried in the configured order. A value that
/// conflicts with an already-assigned neighbor is skipped before any
/// propagation is paid for; otherwise the value is assigned, the inference
/// step runs, and on success the search recurses. Every failure path
/// restores the removal log of the trial before the next value, so domains
/// are exact at all times.
#[derive(Debug)]
pub struct BacktrackingSearch {
    selection: Box<dyn VariableSelection>,
    ordering: Box<dyn ValueOrdering>,
    inference: Box<dyn Inference>,
}

impl BacktrackingSearch {
    pub fn new(
        selection: Box<dyn VariableSelection>,
        ordering: Box<dyn ValueOrdering>,
        inference: Box<dyn Inference>,
    ) -> Self {
        Self {
            selection,
            ordering,
            inference,
        }
    }

    fn search(&self, ctx: &mut SearchContext<'_>) -> Result<bool> {
        if ctx.is_complete() {
            return Ok(true);
        }
        let Some(var) = self.selection.select(ctx) else {
            return Ok(true);
        };

        for value in self.ordering.order(ctx, var) {
            if ctx.count_conflicts(var, value) != 0 {
                continue;
            }
            ctx.assign(var, value);
            let mut log = RemovalLog::new();
            ctx.suppose(var, value, &mut log)?;
            if self.inference.infer(ctx, var, value, &mut log)? && self.search(ctx)? {
                return Ok(true);
            }
            ctx.domains.restore(&mut log);
            ctx.stats.backtracks += 1;
        }

        ctx.unassign(var);
        Ok(false)
    }
}

impl SearchStrategy for BacktrackingSearch {
    fn solve(&self, problem: &Problem) -> Result<(SearchOutcome, SearchStats)> {
        let mut ctx = SearchContext::new(problem);
        let solved = self.search(&mut ctx)?;
        debug!(
            solved,
            assignments = ctx.stats.assignments,
            checks = ctx.stats.constraint_checks,
            "backtracking search finished"
        );
        let outcome = if solved {
            SearchOutcome::Solution(ctx.solution())
        } else {
            SearchOutcome::NoSolution
        };
        Ok((outcome, ctx.stats))
    }
}
