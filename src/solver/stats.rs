//! Counters collected over a single search run, plus a human-readable
//! summary table.

use std::time::Duration;

use prettytable::{Cell, Row, Table};
use serde::Serialize;

/// Diagnostic counters for one solver invocation.
///
/// None of these affect search semantics; they exist so runs can be compared
/// across strategies and instances.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Number of variable assignments performed (including reassignments).
    pub assignments: u64,
    /// Number of constraint-predicate evaluations.
    pub constraint_checks: u64,
    /// Number of abandoned value trials in the backtracking drivers.
    pub backtracks: u64,
    /// Number of domain wipeouts observed during propagation.
    pub wipeouts: u64,
}

pub fn render_stats_table(stats: &SearchStats, elapsed: Duration) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));
    table.add_row(Row::new(vec![
        Cell::new("Assignments"),
        Cell::new(&stats.assignments.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Constraint checks"),
        Cell::new(&stats.constraint_checks.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Backtracks"),
        Cell::new(&stats.backtracks.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Domain wipeouts"),
        Cell::new(&stats.wipeouts.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Time (s)"),
        Cell::new(&format!("{:.4}", elapsed.as_secs_f64())),
    ]));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_counter() {
        let stats = SearchStats {
            assignments: 12,
            constraint_checks: 345,
            backtracks: 6,
            wipeouts: 2,
        };
        let rendered = render_stats_table(&stats, Duration::from_millis(1500));
        assert!(rendered.contains("345"));
        assert!(rendered.contains("1.5000"));
    }
}
