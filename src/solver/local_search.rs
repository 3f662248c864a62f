//! Min-conflicts local search: stochastic repair over a complete assignment.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::{
    error::Result,
    solver::{
        outcome::SearchOutcome,
        problem::{Problem, Value, VariableId},
        search::SearchContext,
        stats::SearchStats,
        strategy::SearchStrategy,
    },
};

/// Hill climbing on the number of violated constraints.
///
/// Every variable is first greedily assigned the value minimizing conflicts
/// against the (initially empty) partial assignment, producing a complete
/// assignment that may violate constraints. The repair loop then repeatedly
/// picks a conflicted variable uniformly at random and moves it to its
/// minimal-conflict value. Terminates with a solution as soon as no variable
/// is conflicted, or with [`SearchOutcome::NoSolution`] when the step budget
/// runs out. The residual conflict count at exhaustion is logged but never
/// surfaced as a partial answer.
#[derive(Debug, Clone, Copy)]
pub struct MinConflicts {
    pub max_steps: u64,
    /// Fixed seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MinConflicts {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            seed: None,
        }
    }
}

impl MinConflicts {
    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// The value of `var` minimizing the conflict count against the current
    /// assignment, ties broken uniformly at random.
    fn min_conflicts_value(
        &self,
        ctx: &mut SearchContext<'_>,
        var: VariableId,
        rng: &mut ChaCha8Rng,
    ) -> Value {
        let candidates: Vec<Value> = ctx.problem.original_domain(var).to_vec();
        let mut best_conflicts = usize::MAX;
        let mut best: Vec<Value> = Vec::new();
        for value in candidates {
            let conflicts = ctx.count_conflicts(var, value);
            if conflicts < best_conflicts {
                best_conflicts = conflicts;
                best.clear();
            }
            if conflicts == best_conflicts {
                best.push(value);
            }
        }
        best[rng.gen_range(0..best.len())]
    }

    /// Variables whose assigned value currently violates at least one
    /// constraint.
    fn conflicted_variables(&self, ctx: &mut SearchContext<'_>) -> Vec<VariableId> {
        let problem = ctx.problem;
        let mut conflicted = Vec::new();
        for var in problem.variables() {
            if let Some(value) = ctx.assigned(var) {
                if ctx.count_conflicts(var, value) > 0 {
                    conflicted.push(var);
                }
            }
        }
        conflicted
    }
}

impl SearchStrategy for MinConflicts {
    fn solve(&self, problem: &Problem) -> Result<(SearchOutcome, SearchStats)> {
        let mut ctx = SearchContext::new(problem);
        let mut rng = self.rng();

        // A variable with no admissible values can never be assigned, so
        // there is nothing to repair.
        if problem
            .variables()
            .any(|var| problem.original_domain(var).is_empty())
        {
            debug!("instance has an empty domain, nothing to repair");
            return Ok((SearchOutcome::NoSolution, ctx.stats));
        }

        // Greedy initialization: one complete assignment, probably with
        // violations.
        for var in problem.variables() {
            let value = self.min_conflicts_value(&mut ctx, var, &mut rng);
            ctx.assign(var, value);
        }

        for step in 0..self.max_steps {
            let conflicted = self.conflicted_variables(&mut ctx);
            if conflicted.is_empty() {
                debug!(step, "min-conflicts reached a consistent assignment");
                return Ok((SearchOutcome::Solution(ctx.solution()), ctx.stats));
            }
            let var = conflicted[rng.gen_range(0..conflicted.len())];
            let value = self.min_conflicts_value(&mut ctx, var, &mut rng);
            ctx.assign(var, value);
        }

        // Informational only: the last assignment is not a partial answer.
        let residual = self.conflicted_variables(&mut ctx).len();
        info!(
            max_steps = self.max_steps,
            conflicted_variables = residual,
            "min-conflicts step budget exhausted"
        );
        Ok((SearchOutcome::NoSolution, ctx.stats))
    }
}
