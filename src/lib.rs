//! Vinculo is a finite-domain binary constraint satisfaction solver.
//!
//! The engine is problem-agnostic: a problem is a set of integer domains, a
//! neighbor graph, and one [`BinaryRelation`] predicate shared by every
//! constrained pair. Around that sit four interchangeable search strategies:
//!
//! - **forward-checking** — chronological backtracking with one-step
//!   propagation from each new assignment,
//! - **maintaining-arc-consistency** — backtracking with the AC-3 engine
//!   scoped to the arcs touching the new assignment,
//! - **backjumping** — FC-CBJ, which tracks per-variable conflict sets and
//!   jumps straight back to the variable responsible for a failure,
//! - **min-conflicts** — stochastic local repair over a complete assignment.
//!
//! The complete strategies all order variables with the adaptive dom/wdeg
//! heuristic: arcs gain weight whenever propagation across them wipes a
//! domain out, steering the search toward the hard region of the problem.
//!
//! # Example
//!
//! Three variables over `{1, 2}`, adjacent ones forced to differ:
//!
//! ```
//! use vinculo::solver::problem::{BinaryRelation, Problem, Value, VariableId};
//! use vinculo::solver::strategy::{SolveOptions, StrategyKind};
//!
//! #[derive(Debug)]
//! struct NotEqual;
//!
//! impl BinaryRelation for NotEqual {
//!     fn check(&self, _a: VariableId, x: Value, _b: VariableId, y: Value) -> bool {
//!         x != y
//!     }
//! }
//!
//! let problem = Problem::new(
//!     vec![vec![1, 2], vec![1, 2], vec![1, 2]],
//!     &[(0, 1), (1, 2)],
//!     Box::new(NotEqual),
//! );
//!
//! let strategy = StrategyKind::ForwardChecking.build(SolveOptions::default());
//! let (outcome, stats) = strategy.solve(&problem).unwrap();
//!
//! let solution = outcome.solution().unwrap();
//! assert_ne!(solution[&0], solution[&1]);
//! assert_ne!(solution[&1], solution[&2]);
//! assert!(stats.constraint_checks > 0);
//! ```
//!
//! Radio link frequency assignment instances (the application this crate
//! grew out of) load through [`rlfap::RlfapInstance`].
//!
//! [`BinaryRelation`]: solver::problem::BinaryRelation

pub mod error;
pub mod rlfap;
pub mod solver;
