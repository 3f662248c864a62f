//! The strategy seam: a common interface over every search driver, plus the
//! closed set of named strategies the command surface exposes.

use std::fmt;
use std::str::FromStr;

use crate::{
    error::{Error, Result, SolverError},
    solver::{
        backjumping::ConflictDirectedBackjumping,
        backtracking::BacktrackingSearch,
        heuristics::{value::DomainOrder, variable::DomWdeg},
        inference::{ForwardChecking, MaintainArcConsistency},
        local_search::MinConflicts,
        outcome::SearchOutcome,
        problem::Problem,
        stats::SearchStats,
    },
};

/// A complete search strategy: given a problem, produce an outcome and the
/// run's counters.
pub trait SearchStrategy {
    fn solve(&self, problem: &Problem) -> Result<(SearchOutcome, SearchStats)>;
}

/// Knobs shared by the named strategies. Only min-conflicts consumes them
/// today.
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    pub max_steps: u64,
    pub seed: Option<u64>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            seed: None,
        }
    }
}

/// The closed set of strategy names accepted by the command surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Backtracking with forward checking and dom/wdeg ordering.
    ForwardChecking,
    /// Backtracking maintaining arc consistency, dom/wdeg ordering.
    MaintainingArcConsistency,
    /// FC-CBJ: forward checking with conflict-directed backjumping.
    Backjumping,
    /// Min-conflicts stochastic local repair.
    MinConflicts,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::ForwardChecking,
        StrategyKind::MaintainingArcConsistency,
        StrategyKind::Backjumping,
        StrategyKind::MinConflicts,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::ForwardChecking => "forward-checking",
            StrategyKind::MaintainingArcConsistency => "maintaining-arc-consistency",
            StrategyKind::Backjumping => "backjumping",
            StrategyKind::MinConflicts => "min-conflicts",
        }
    }

    /// Builds the configured driver for this strategy.
    pub fn build(&self, options: SolveOptions) -> Box<dyn SearchStrategy> {
        match self {
            StrategyKind::ForwardChecking => Box::new(BacktrackingSearch::new(
                Box::new(DomWdeg),
                Box::new(DomainOrder),
                Box::new(ForwardChecking),
            )),
            StrategyKind::MaintainingArcConsistency => Box::new(BacktrackingSearch::new(
                Box::new(DomWdeg),
                Box::new(DomainOrder),
                Box::new(MaintainArcConsistency),
            )),
            StrategyKind::Backjumping => Box::new(ConflictDirectedBackjumping::new(
                Box::new(DomWdeg),
                Box::new(DomainOrder),
                Box::new(ForwardChecking),
            )),
            StrategyKind::MinConflicts => Box::new(MinConflicts {
                max_steps: options.max_steps,
                seed: options.seed,
            }),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    /// Accepts the canonical kebab-case names plus the short aliases used in
    /// the original instance runner (`fc`, `mac`, `fc-cbj`).
    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "forward-checking" | "fc" => Ok(StrategyKind::ForwardChecking),
            "maintaining-arc-consistency" | "mac" => Ok(StrategyKind::MaintainingArcConsistency),
            "backjumping" | "fc-cbj" => Ok(StrategyKind::Backjumping),
            "min-conflicts" => Ok(StrategyKind::MinConflicts),
            _ => Err(SolverError::UnknownStrategy(name.to_string()).into()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
