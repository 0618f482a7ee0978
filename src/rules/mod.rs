//! Line rules for K-in-a-row
//!
//! A line is `required` same-mark cells in a row along one of the four
//! orientations. Potential lines also accept empty cells and drive the
//! heuristics.

pub mod line;

// Re-exports for convenient access
pub use line::{
    completing_move, find_winning_line, has_line, has_potential, has_winner, line_at,
    would_complete, DIRECTIONS,
};
