//! The problem model: variables, original domains, neighbor adjacency and the
//! binary constraint relation.
//!
//! Everything here is constructed once from external input and is read-only
//! for the rest of a solver run. Mutable search state (current domains,
//! assignments, arc weights) lives in
//! [`SearchContext`](crate::solver::search::SearchContext).

/// A variable identifier: a dense index into the problem's tables.
pub type VariableId = usize;

/// A candidate value for a variable.
pub type Value = i32;

/// The binary constraint relation shared by every constrained pair.
///
/// `check` is a pure predicate: given `a = x` and `b = y`, is the pair
/// compatible? It is only ever evaluated for pairs that appear in each
/// other's neighbor sets. Bookkeeping (the constraint-check counter) is the
/// caller's responsibility, so implementations stay side-effect free.
pub trait BinaryRelation: std::fmt::Debug {
    fn check(&self, a: VariableId, x: Value, b: VariableId, y: Value) -> bool;
}

/// An immutable constraint satisfaction problem over finite integer domains.
#[derive(Debug)]
pub struct Problem {
    original_domains: Vec<Vec<Value>>,
    neighbors: Vec<Vec<VariableId>>,
    relation: Box<dyn BinaryRelation>,
}

impl Problem {
    /// Builds a problem from per-variable domains, an undirected edge list and
    /// the shared binary relation.
    ///
    /// Adjacency is registered symmetrically: an edge `(a, b)` makes `b` a
    /// neighbor of `a` and `a` a neighbor of `b`. Duplicate edges are
    /// collapsed.
    pub fn new(
        original_domains: Vec<Vec<Value>>,
        edges: &[(VariableId, VariableId)],
        relation: Box<dyn BinaryRelation>,
    ) -> Self {
        let mut neighbors: Vec<Vec<VariableId>> = vec![Vec::new(); original_domains.len()];
        for &(a, b) in edges {
            if a == b {
                continue;
            }
            if !neighbors[a].contains(&b) {
                neighbors[a].push(b);
            }
            if !neighbors[b].contains(&a) {
                neighbors[b].push(a);
            }
        }
        Self {
            original_domains,
            neighbors,
            relation,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.original_domains.len()
    }

    /// All variables, in iteration order.
    pub fn variables(&self) -> impl Iterator<Item = VariableId> {
        0..self.num_variables()
    }

    pub fn neighbors(&self, var: VariableId) -> &[VariableId] {
        &self.neighbors[var]
    }

    /// The original (never pruned) domain of `var`.
    pub fn original_domain(&self, var: VariableId) -> &[Value] {
        &self.original_domains[var]
    }

    pub(crate) fn original_domains(&self) -> &[Vec<Value>] {
        &self.original_domains
    }

    /// Evaluates the constraint relation for a pair of neighbors, e.g. to
    /// validate a returned assignment. During search, prefer
    /// [`SearchContext::check`](crate::solver::search::SearchContext::check),
    /// which also counts the evaluation.
    pub fn relation_check(&self, a: VariableId, x: Value, b: VariableId, y: Value) -> bool {
        self.relation.check(a, x, b, y)
    }

    /// Every directed arc `(xi, xk)` with `xk ∈ neighbors(xi)`. Both
    /// directions of each edge are included.
    pub fn arcs(&self) -> Vec<(VariableId, VariableId)> {
        let mut arcs = Vec::new();
        for xi in self.variables() {
            for &xk in self.neighbors(xi) {
                arcs.push((xi, xk));
            }
        }
        arcs
    }
}
