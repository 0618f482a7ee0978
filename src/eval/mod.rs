//! Position evaluation
//!
//! Scores are from one mark's point of view: `+1` is a completed line for
//! that mark, `-1` for the opponent, and anything strictly between is a
//! positional estimate.

pub mod heuristic;

pub use heuristic::{evaluate, heuristic, potential_lines, potential_weight, Score};
