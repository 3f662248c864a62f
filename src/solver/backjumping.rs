//! Conflict-directed backjumping (FC-CBJ).
//!
//! Extends the backtracking driver with per-variable conflict sets: when a
//! variable exhausts its values, the search jumps straight back to the most
//! recently assigned variable implicated in the failure instead of the
//! immediate parent. With maximal conflict sets this degenerates to plain
//! chronological backtracking.

use tracing::{debug, trace};

use crate::{
    error::Result,
    solver::{
        domains::RemovalLog,
        heuristics::{value::ValueOrdering, variable::VariableSelection},
        inference::Inference,
        outcome::SearchOutcome,
        problem::{Problem, VariableId},
        search::SearchContext,
        stats::SearchStats,
        strategy::SearchStrategy,
    },
};

/// The FC-CBJ hybrid: forward-checking inference feeding conflict sets,
/// which in turn direct non-chronological jumps.
#[derive(Debug)]
pub struct ConflictDirectedBackjumping {
    selection: Box<dyn VariableSelection>,
    ordering: Box<dyn ValueOrdering>,
    inference: Box<dyn Inference>,
}

/// Result of one recursion level: either the search succeeded, or it failed
/// with an optional variable to jump back to.
enum Descent {
    Solved,
    Jump(Option<VariableId>),
}

impl ConflictDirectedBackjumping {
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

    fn search(&self, ctx: &mut SearchContext<'_>) -> Result<Descent> {
        if ctx.is_complete() {
            return Ok(Descent::Solved);
        }
        let Some(var) = self.selection.select(ctx) else {
            return Ok(Descent::Solved);
        };
        ctx.stamp(var);

        for value in self.ordering.order(ctx, var) {
            if ctx.count_conflicts(var, value) != 0 {
                continue;
            }
            ctx.assign(var, value);
            let mut log = RemovalLog::new();
            ctx.suppose(var, value, &mut log)?;
            if self.inference.infer(ctx, var, value, &mut log)? {
                match self.search(ctx)? {
                    Descent::Solved => return Ok(Descent::Solved),
                    Descent::Jump(target) => {
                        // A jump aimed past this level: clean up and pass it
                        // through without retrying siblings.
                        if ctx.was_visited(var) && target != Some(var) {
                            trace!(variable = var, ?target, "passing backjump through");
                            ctx.clear_conflict_set(var);
                            ctx.unmark_visited(var);
                            ctx.domains.restore(&mut log);
                            ctx.unassign(var);
                            return Ok(Descent::Jump(target));
                        }
                    }
                }
            }
            ctx.domains.restore(&mut log);
            ctx.stats.backtracks += 1;
        }

        ctx.unassign(var);
        ctx.mark_visited(var);
        let target = self.jump_target(ctx, var);
        if let Some(target) = target {
            ctx.merge_conflict_sets(var, target);
            trace!(variable = var, target, "values exhausted, jumping back");
        }
        Ok(Descent::Jump(target))
    }

    /// The member of `var`'s conflict set with the highest assignment-order
    /// stamp, i.e. the most recently assigned implicated variable.
    fn jump_target(&self, ctx: &SearchContext<'_>, var: VariableId) -> Option<VariableId> {
        let mut best: Option<(VariableId, u64)> = None;
        for &culprit in ctx.conflict_set(var) {
            let stamp = ctx.order_of(culprit);
            match best {
                Some((_, best_stamp)) if stamp <= best_stamp => {}
                _ => best = Some((culprit, stamp)),
            }
        }
        best.map(|(culprit, _)| culprit)
    }
}

impl SearchStrategy for ConflictDirectedBackjumping {
    fn solve(&self, problem: &Problem) -> Result<(SearchOutcome, SearchStats)> {
        let mut ctx = SearchContext::new(problem);
        let outcome = match self.search(&mut ctx)? {
            Descent::Solved => SearchOutcome::Solution(ctx.solution()),
            Descent::Jump(_) => SearchOutcome::NoSolution,
        };
        debug!(
            solved = outcome.is_solution(),
            assignments = ctx.stats.assignments,
            checks = ctx.stats.constraint_checks,
            "backjumping search finished"
        );
        Ok((outcome, ctx.stats))
    }
}
