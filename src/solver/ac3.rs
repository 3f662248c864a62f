//! The AC-3 arc-consistency engine.
//!
//! Propagates a queue of directed arcs to a fixed point, pruning values with
//! no support in the opposite domain. Used in two modes: over all arcs to
//! preprocess a problem, and scoped to the arcs into a freshly assigned
//! variable by the MAC inference step.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::{
    error::Result,
    solver::{
        domains::RemovalLog,
        problem::VariableId,
        search::SearchContext,
    },
};

/// FIFO queue of directed arcs with membership dedup, so an arc already
/// pending is not enqueued twice.
#[derive(Debug, Default)]
pub(crate) struct ArcQueue {
    queue: VecDeque<(VariableId, VariableId)>,
    members: HashSet<(VariableId, VariableId)>,
}

impl ArcQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, arc: (VariableId, VariableId)) {
        if self.members.insert(arc) {
            self.queue.push_back(arc);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<(VariableId, VariableId)> {
        let arc = self.queue.pop_front()?;
        let _ = self.members.remove(&arc);
        Some(arc)
    }
}

/// Runs AC-3 from the given initial arcs until the queue drains (consistent)
/// or some domain wipes out (inconsistent, short-circuits immediately).
///
/// When `revise` prunes `xi`, every arc `(xk, xi)` for `xk ∈ neighbors(xi)`,
/// `xk ≠ xj`, is re-enqueued: the shrunken domain of `xi` may have removed
/// the support some value of `xk` relied on.
pub(crate) fn ac3(
    ctx: &mut SearchContext<'_>,
    initial: impl IntoIterator<Item = (VariableId, VariableId)>,
    log: &mut RemovalLog,
) -> Result<bool> {
    let mut queue = ArcQueue::new();
    for arc in initial {
        queue.push(arc);
    }

    while let Some((xi, xj)) = queue.pop() {
        if revise(ctx, xi, xj, log)? {
            if ctx.domains.is_wiped_out(xi) {
                trace!(variable = xi, "domain wipeout during propagation");
                return Ok(false);
            }
            let problem = ctx.problem;
            for &xk in problem.neighbors(xi) {
                if xk != xj {
                    queue.push((xk, xi));
                }
            }
        }
    }
    Ok(true)
}

/// Runs AC-3 over every arc of the problem in both directions.
pub fn ac3_full(ctx: &mut SearchContext<'_>, log: &mut RemovalLog) -> Result<bool> {
    let arcs = ctx.problem.arcs();
    ac3(ctx, arcs, log)
}

/// Prunes from `xi`'s current domain every value with no supporting value in
/// `xj`'s current domain. Support checking short-circuits on the first
/// supporting value found.
///
/// If the pruning empties `xi`'s domain, the weight of the `(xi, xj)` arc is
/// bumped symmetrically, which is the signal the dom/wdeg heuristic feeds on.
///
/// Returns whether anything was pruned.
pub(crate) fn revise(
    ctx: &mut SearchContext<'_>,
    xi: VariableId,
    xj: VariableId,
    log: &mut RemovalLog,
) -> Result<bool> {
    let mut revised = false;
    let candidates: Vec<_> = ctx.domains.current(xi).to_vec();
    let supports: Vec<_> = ctx.domains.current(xj).to_vec();
    for x in candidates {
        let mut supported = false;
        for &y in &supports {
            if ctx.check(xi, x, xj, y) {
                supported = true;
                break;
            }
        }
        if !supported {
            ctx.domains.prune(xi, x, log)?;
            revised = true;
        }
    }
    if ctx.domains.is_wiped_out(xi) {
        ctx.bump_weight(xi, xj);
    }
    Ok(revised)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::problem::{BinaryRelation, Problem, Value};

    #[derive(Debug)]
    struct NotEqual;

    impl BinaryRelation for NotEqual {
        fn check(&self, _a: VariableId, x: Value, _b: VariableId, y: Value) -> bool {
            x != y
        }
    }

    #[test]
    fn arc_queue_deduplicates_pending_arcs() {
        let mut queue = ArcQueue::new();
        queue.push((0, 1));
        queue.push((0, 1));
        queue.push((1, 0));
        assert_eq!(queue.pop(), Some((0, 1)));
        assert_eq!(queue.pop(), Some((1, 0)));
        assert_eq!(queue.pop(), None);
        // Popped arcs may be enqueued again.
        queue.push((0, 1));
        assert_eq!(queue.pop(), Some((0, 1)));
    }

    #[test]
    fn revise_prunes_unsupported_values() {
        // 0 != 1, and 1's domain is the singleton {1}: value 1 of variable 0
        // has no support.
        let problem = Problem::new(
            vec![vec![1, 2], vec![1]],
            &[(0, 1)],
            Box::new(NotEqual),
        );
        let mut ctx = SearchContext::new(&problem);
        let mut log = RemovalLog::new();
        let revised = revise(&mut ctx, 0, 1, &mut log).unwrap();
        assert!(revised);
        assert_eq!(ctx.domains.current(0), &[2]);
    }

    #[test]
    fn converged_domains_are_a_fixed_point() {
        let problem = Problem::new(
            vec![vec![1, 2], vec![1], vec![1, 2]],
            &[(0, 1), (1, 2)],
            Box::new(NotEqual),
        );
        let mut ctx = SearchContext::new(&problem);
        let mut log = RemovalLog::new();
        assert!(ac3_full(&mut ctx, &mut log).unwrap());

        // Re-running revise on any arc prunes nothing further.
        for (xi, xj) in problem.arcs() {
            let mut scratch = RemovalLog::new();
            assert!(!revise(&mut ctx, xi, xj, &mut scratch).unwrap());
        }
    }

    #[test]
    fn wipeout_fails_fast_and_bumps_weights() {
        // Both variables are pinned to 1 but must differ.
        let problem = Problem::new(vec![vec![1], vec![1]], &[(0, 1)], Box::new(NotEqual));
        let mut ctx = SearchContext::new(&problem);
        let mut log = RemovalLog::new();
        assert!(!ac3_full(&mut ctx, &mut log).unwrap());
        assert_eq!(ctx.weight(0, 1), ctx.weight(1, 0));
        assert!(ctx.weight(0, 1) > 1);
    }

    #[test]
    fn restore_undoes_all_propagation() {
        let problem = Problem::new(
            vec![vec![1, 2], vec![1], vec![1, 2]],
            &[(0, 1), (1, 2)],
            Box::new(NotEqual),
        );
        let mut ctx = SearchContext::new(&problem);
        let mut log = RemovalLog::new();
        assert!(ac3_full(&mut ctx, &mut log).unwrap());
        assert_eq!(ctx.domains.current(0), &[2]);
        ctx.domains.restore(&mut log);
        assert_eq!(ctx.domains.current(0), &[1, 2]);
        assert_eq!(ctx.domains.current(2), &[1, 2]);
    }
}
