pub mod ac3;
pub mod backjumping;
pub mod backtracking;
pub mod domains;
pub mod heuristics;
pub mod inference;
pub mod local_search;
pub mod outcome;
pub mod problem;
pub mod search;
pub mod stats;
pub mod strategy;
