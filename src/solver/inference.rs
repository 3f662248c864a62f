//! Inference steps run after each trial assignment.
//!
//! Both implementations prune through the shared removal log, so a failed
//! trial is undone by a single restore in the driver.

use crate::{
    error::Result,
    solver::{
        ac3::ac3,
        domains::RemovalLog,
        problem::{Value, VariableId},
        search::SearchContext,
    },
};

/// A propagation step applied after assigning `var = value`.
///
/// Returns `Ok(false)` when propagation proves the trial assignment cannot
/// be extended (some domain wiped out), `Ok(true)` otherwise.
pub trait Inference: std::fmt::Debug {
    fn infer(
        &self,
        ctx: &mut SearchContext<'_>,
        var: VariableId,
        value: Value,
        log: &mut RemovalLog,
    ) -> Result<bool>;
}

/// One-step propagation: prunes from each unassigned neighbor every value
/// inconsistent with the new assignment.
///
/// Strictly weaker than [`MaintainArcConsistency`]: consequences of the
/// neighbor prunings are never re-examined.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardChecking;

impl Inference for ForwardChecking {
    fn infer(
        &self,
        ctx: &mut SearchContext<'_>,
        var: VariableId,
        value: Value,
        log: &mut RemovalLog,
    ) -> Result<bool> {
        let problem = ctx.problem;
        for &b in problem.neighbors(var) {
            if ctx.is_assigned(b) {
                continue;
            }
            let candidates: Vec<Value> = ctx.domains.current(b).to_vec();
            for candidate in candidates {
                if !ctx.check(var, value, b, candidate) {
                    ctx.domains.prune(b, candidate, log)?;
                }
            }
            if ctx.domains.is_wiped_out(b) {
                // The wipeout of b is attributable to var: record it for
                // backjumping and feed the dom/wdeg weights, then fail
                // without checking further neighbors.
                ctx.add_conflict(b, var);
                ctx.bump_weight(var, b);
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Full arc-consistency maintenance: runs AC-3 with the initial queue
/// restricted to the arcs `(x, var)` for every neighbor `x` of the newly
/// assigned variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaintainArcConsistency;

impl Inference for MaintainArcConsistency {
    fn infer(
        &self,
        ctx: &mut SearchContext<'_>,
        var: VariableId,
        _value: Value,
        log: &mut RemovalLog,
    ) -> Result<bool> {
        let arcs: Vec<(VariableId, VariableId)> = ctx
            .problem
            .neighbors(var)
            .iter()
            .map(|&x| (x, var))
            .collect();
        ac3(ctx, arcs, log)
    }
}
