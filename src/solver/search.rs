//! Per-search session state.
//!
//! A [`SearchContext`] owns everything a single solver invocation mutates:
//! the current domains, the partial assignment with its order stamps, the
//! arc-weight table driving the dom/wdeg heuristic, the per-variable
//! conflict sets used by backjumping, and the run counters. Creating a fresh
//! context per invocation keeps strategies re-entrant and lets several
//! instances be solved from one process without cross-contamination.

use std::collections::{HashMap, HashSet};

use crate::{
    error::Result,
    solver::{
        domains::{DomainStore, RemovalLog},
        outcome::Assignment,
        problem::{Problem, Value, VariableId},
        stats::SearchStats,
    },
};

#[derive(Debug)]
pub struct SearchContext<'p> {
    pub(crate) problem: &'p Problem,
    pub(crate) domains: DomainStore,
    pub(crate) stats: SearchStats,
    assignment: Vec<Option<Value>>,
    num_assigned: usize,
    /// Assignment-order stamp per variable; 0 means never stamped.
    order: Vec<u64>,
    next_stamp: u64,
    /// Directed arc weights, symmetric by construction.
    weights: HashMap<(VariableId, VariableId), u64>,
    conflict_sets: Vec<HashSet<VariableId>>,
    /// Variables that have already triggered a backjump.
    visited: HashSet<VariableId>,
}

impl<'p> SearchContext<'p> {
    pub fn new(problem: &'p Problem) -> Self {
        let n = problem.num_variables();
        let mut weights = HashMap::new();
        for arc in problem.arcs() {
            let _ = weights.insert(arc, 1);
        }
        Self {
            problem,
            domains: DomainStore::new(problem.original_domains()),
            stats: SearchStats::default(),
            assignment: vec![None; n],
            num_assigned: 0,
            order: vec![0; n],
            next_stamp: 1,
            weights,
            conflict_sets: vec![HashSet::new(); n],
            visited: HashSet::new(),
        }
    }

    /// Evaluates the constraint predicate for a neighbor pair, counting the
    /// evaluation. All propagation and conflict counting goes through here.
    pub fn check(&mut self, a: VariableId, x: Value, b: VariableId, y: Value) -> bool {
        self.stats.constraint_checks += 1;
        self.problem.relation_check(a, x, b, y)
    }

    pub fn assign(&mut self, var: VariableId, value: Value) {
        self.stats.assignments += 1;
        if self.assignment[var].is_none() {
            self.num_assigned += 1;
        }
        self.assignment[var] = Some(value);
    }

    pub fn unassign(&mut self, var: VariableId) {
        if self.assignment[var].take().is_some() {
            self.num_assigned -= 1;
        }
    }

    pub fn assigned(&self, var: VariableId) -> Option<Value> {
        self.assignment[var]
    }

    pub fn is_assigned(&self, var: VariableId) -> bool {
        self.assignment[var].is_some()
    }

    pub fn num_assigned(&self) -> usize {
        self.num_assigned
    }

    pub fn is_complete(&self) -> bool {
        self.num_assigned == self.problem.num_variables()
    }

    /// Number of currently assigned neighbors whose value conflicts with
    /// `var = value`.
    pub fn count_conflicts(&mut self, var: VariableId, value: Value) -> usize {
        let problem = self.problem;
        let mut conflicts = 0;
        for &b in problem.neighbors(var) {
            if let Some(assigned) = self.assignment[b] {
                if !self.check(var, value, b, assigned) {
                    conflicts += 1;
                }
            }
        }
        conflicts
    }

    /// Narrows `var`'s current domain to exactly `{value}`, logging every
    /// removal so the trial can be undone.
    pub fn suppose(&mut self, var: VariableId, value: Value, log: &mut RemovalLog) -> Result<()> {
        let others: Vec<Value> = self
            .domains
            .current(var)
            .iter()
            .copied()
            .filter(|&v| v != value)
            .collect();
        for other in others {
            self.domains.prune(var, other, log)?;
        }
        Ok(())
    }

    /// Stamps `var` with the next assignment-order counter value.
    pub fn stamp(&mut self, var: VariableId) {
        self.order[var] = self.next_stamp;
        self.next_stamp += 1;
    }

    pub fn order_of(&self, var: VariableId) -> u64 {
        self.order[var]
    }

    /// Symmetrically increments the weight of the arc between `a` and `b`,
    /// recording the domain wipeout that caused it.
    pub fn bump_weight(&mut self, a: VariableId, b: VariableId) {
        self.stats.wipeouts += 1;
        *self.weights.entry((a, b)).or_insert(1) += 1;
        *self.weights.entry((b, a)).or_insert(1) += 1;
    }

    pub fn weight(&self, a: VariableId, b: VariableId) -> u64 {
        self.weights.get(&(a, b)).copied().unwrap_or(1)
    }

    /// `1 +` the sum of arc weights to all neighbors, assigned or not.
    pub fn weighted_degree(&self, var: VariableId) -> u64 {
        1 + self
            .problem
            .neighbors(var)
            .iter()
            .map(|&y| self.weight(var, y))
            .sum::<u64>()
    }

    pub fn add_conflict(&mut self, var: VariableId, culprit: VariableId) {
        let _ = self.conflict_sets[var].insert(culprit);
    }

    pub fn conflict_set(&self, var: VariableId) -> &HashSet<VariableId> {
        &self.conflict_sets[var]
    }

    pub fn clear_conflict_set(&mut self, var: VariableId) {
        self.conflict_sets[var].clear();
    }

    /// Merges `from`'s conflict set into `into`'s, dropping any reference to
    /// `into` itself so a variable can never become its own jump target.
    pub fn merge_conflict_sets(&mut self, from: VariableId, into: VariableId) {
        let merged: Vec<VariableId> = self.conflict_sets[from].iter().copied().collect();
        for var in merged {
            if var != into {
                let _ = self.conflict_sets[into].insert(var);
            }
        }
        let _ = self.conflict_sets[into].remove(&into);
    }

    pub fn mark_visited(&mut self, var: VariableId) {
        let _ = self.visited.insert(var);
    }

    pub fn unmark_visited(&mut self, var: VariableId) {
        let _ = self.visited.remove(&var);
    }

    pub fn was_visited(&self, var: VariableId) -> bool {
        self.visited.contains(&var)
    }

    /// Snapshots the current assignment as an ordered map.
    pub fn solution(&self) -> Assignment {
        self.assignment
            .iter()
            .enumerate()
            .filter_map(|(var, value)| value.map(|v| (var, v)))
            .collect()
    }
}
