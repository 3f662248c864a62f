//! Value-ordering heuristics: in which order to try a variable's candidate
//! values.

use crate::solver::{
    problem::{Value, VariableId},
    search::SearchContext,
};

/// A strategy for ordering the candidate values of a variable.
///
/// Returns an owned vector because the driver prunes the variable's domain
/// while iterating the candidates.
pub trait ValueOrdering: std::fmt::Debug {
    fn order(&self, ctx: &SearchContext<'_>, var: VariableId) -> Vec<Value>;
}

/// Tries values in current-domain order, i.e. the order they appeared in the
/// problem input, minus anything pruned so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainOrder;

impl ValueOrdering for DomainOrder {
    fn order(&self, ctx: &SearchContext<'_>, var: VariableId) -> Vec<Value> {
        ctx.domains.current(var).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::{
        domains::RemovalLog,
        problem::{BinaryRelation, Problem},
    };

    #[derive(Debug)]
    struct Always;

    impl BinaryRelation for Always {
        fn check(&self, _a: VariableId, _x: Value, _b: VariableId, _y: Value) -> bool {
            true
        }
    }

    #[test]
    fn domain_order_reflects_current_domain() {
        let problem = Problem::new(vec![vec![30, 10, 20]], &[], Box::new(Always));
        let mut ctx = SearchContext::new(&problem);
        assert_eq!(DomainOrder.order(&ctx, 0), vec![30, 10, 20]);
        let mut log = RemovalLog::new();
        ctx.domains.prune(0, 10, &mut log).unwrap();
        assert_eq!(DomainOrder.order(&ctx, 0), vec![30, 20]);
    }
}
