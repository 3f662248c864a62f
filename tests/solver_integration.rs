//! End-to-end tests running every strategy over parsed RLFAP instances.

use pretty_assertions::assert_eq;
use vinculo::rlfap::RlfapInstance;
use vinculo::solver::outcome::SearchOutcome;
use vinculo::solver::problem::Problem;
use vinculo::solver::strategy::{SolveOptions, StrategyKind};

const VAR: &str = "3\n1 0\n2 0\n3 0\n";
const DOM: &str = "1\n0 2 1 2\n";
const DOM_PINNED: &str = "1\n0 1 1\n";
const CTR: &str = "2\n1 2 > 0\n2 3 > 0\n";

fn reference_problem(dom: &str) -> Problem {
    RlfapInstance::parse(("var.txt", VAR), ("dom.txt", dom), ("ctr.txt", CTR))
        .unwrap()
        .into_problem()
}

fn options() -> SolveOptions {
    SolveOptions {
        max_steps: 1000,
        seed: Some(99),
    }
}

/// Checks the returned assignment against every constrained pair.
fn assert_sound(problem: &Problem, outcome: &SearchOutcome) {
    let solution = outcome.solution().expect("expected a solution");
    for var in problem.variables() {
        for &neighbor in problem.neighbors(var) {
            assert!(
                problem.relation_check(var, solution[&var], neighbor, solution[&neighbor]),
                "constraint ({var}, {neighbor}) violated"
            );
        }
    }
}

#[test]
fn every_strategy_solves_the_reference_instance() {
    for kind in StrategyKind::ALL {
        let problem = reference_problem(DOM);
        let (outcome, stats) = kind.build(options()).solve(&problem).unwrap();
        assert_sound(&problem, &outcome);
        assert!(stats.assignments > 0, "{kind}: no assignments counted");
        assert!(
            stats.constraint_checks > 0,
            "{kind}: no constraint checks counted"
        );
    }
}

#[test]
fn complete_strategies_agree_on_unsatisfiability() {
    let complete = [
        StrategyKind::ForwardChecking,
        StrategyKind::MaintainingArcConsistency,
        StrategyKind::Backjumping,
    ];
    for kind in complete {
        let problem = reference_problem(DOM_PINNED);
        let (outcome, _stats) = kind.build(options()).solve(&problem).unwrap();
        assert_eq!(outcome, SearchOutcome::NoSolution, "{kind}");
    }
}

#[test]
fn complete_strategies_find_the_unique_solution() {
    // Domains force variable 2 to take value 2: {1: 1, 2: 2, 3: 1} is the
    // unique solution once variables 1 and 3 are pinned to 1.
    let var = "3\n1 0\n2 1\n3 0\n";
    let dom = "2\n0 1 1\n1 2 1 2\n";
    let complete = [
        StrategyKind::ForwardChecking,
        StrategyKind::MaintainingArcConsistency,
        StrategyKind::Backjumping,
    ];
    for kind in complete {
        let problem = RlfapInstance::parse(("var.txt", var), ("dom.txt", dom), ("ctr.txt", CTR))
            .unwrap()
            .into_problem();
        let (outcome, _stats) = kind.build(options()).solve(&problem).unwrap();
        let solution = outcome.solution().expect("unique solution exists");
        assert_eq!(solution[&0], 1, "{kind}");
        assert_eq!(solution[&1], 2, "{kind}");
        assert_eq!(solution[&2], 1, "{kind}");
    }
}

#[test]
fn empty_domain_instance_is_unsatisfiable_for_every_strategy() {
    // A domain line may declare zero values; every strategy must report
    // no-solution rather than fail.
    let var = "1\n1 0\n";
    let dom = "1\n0 0\n";
    let ctr = "0\n";
    for kind in StrategyKind::ALL {
        let problem = RlfapInstance::parse(("var.txt", var), ("dom.txt", dom), ("ctr.txt", ctr))
            .unwrap()
            .into_problem();
        let (outcome, _stats) = kind.build(options()).solve(&problem).unwrap();
        assert_eq!(outcome, SearchOutcome::NoSolution, "{kind}");
    }
}

#[test]
fn min_conflicts_eventually_succeeds_across_seeds() {
    let mut successes = 0;
    for seed in 0..10 {
        let problem = reference_problem(DOM);
        let strategy = StrategyKind::MinConflicts.build(SolveOptions {
            max_steps: 1000,
            seed: Some(seed),
        });
        let (outcome, _stats) = strategy.solve(&problem).unwrap();
        if outcome.is_solution() {
            assert_sound(&problem, &outcome);
            successes += 1;
        }
    }
    assert!(successes > 0, "no seed solved the reference instance");
}

#[test]
fn a_larger_separation_instance_is_solved_soundly() {
    // Five links in a ring, each pair of adjacent links at least 2 apart.
    let var = "5\n0 0\n1 0\n2 0\n3 0\n4 0\n";
    let dom = "1\n0 6 0 2 4 6 8 10\n";
    let ctr = "5\n0 1 > 1\n1 2 > 1\n2 3 > 1\n3 4 > 1\n4 0 > 1\n";
    let complete = [
        StrategyKind::ForwardChecking,
        StrategyKind::MaintainingArcConsistency,
        StrategyKind::Backjumping,
    ];
    for kind in complete {
        let problem = RlfapInstance::parse(("var.txt", var), ("dom.txt", dom), ("ctr.txt", ctr))
            .unwrap()
            .into_problem();
        let (outcome, _stats) = kind.build(options()).solve(&problem).unwrap();
        assert_sound(&problem, &outcome);
    }
}

#[test]
fn equality_with_offset_instances_are_respected() {
    // Variable pair must sit exactly 2 apart.
    let var = "2\n1 0\n2 0\n";
    let dom = "1\n0 4 1 2 3 4\n";
    let ctr = "1\n1 2 = 2\n";
    for kind in StrategyKind::ALL {
        let problem = RlfapInstance::parse(("var.txt", var), ("dom.txt", dom), ("ctr.txt", ctr))
            .unwrap()
            .into_problem();
        let (outcome, _stats) = kind.build(options()).solve(&problem).unwrap();
        let solution = outcome.solution().expect("satisfiable offset instance");
        assert_eq!((solution[&0] - solution[&1]).abs(), 2, "{kind}");
    }
}
