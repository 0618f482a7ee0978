//! Heuristic evaluation function for K-in-a-row positions
//!
//! Terminal positions score ±1. Otherwise the score is the difference in
//! open cells each side could still build a line through, scaled down so it
//! never reaches a terminal value.
//!
//! The difference can never exceed the number of empty cells, and it is zero
//! on an empty board, so scaling by `1 / N²` keeps every board size strictly
//! inside (-1, 1) without flattening large differences.

use crate::board::{Board, Mark};
use crate::rules::{has_potential, has_winner};

/// Score constants shared by evaluation and search.
pub struct Score;

impl Score {
    /// Completed line for the evaluated mark
    pub const WIN: f64 = 1.0;
    /// Completed line for the opponent
    pub const LOSS: f64 = -1.0;
    pub const DRAW: f64 = 0.0;
    /// Largest weight per potential-line cell of difference
    pub const POTENTIAL_WEIGHT: f64 = 0.1;
}

/// Weight per cell of difference: [`Score::POTENTIAL_WEIGHT`], or `1 / N²`
/// on boards where that is smaller.
#[inline]
pub fn potential_weight(board: &Board) -> f64 {
    let cells = (board.size() * board.size()) as f64;
    Score::POTENTIAL_WEIGHT.min(1.0 / cells)
}

/// Number of empty cells through which `mark` could still make a line.
#[must_use]
pub fn potential_lines(board: &Board, mark: Mark) -> usize {
    let required = board.required();
    board
        .empty_cells()
        .filter(|&pos| has_potential(board, mark, pos, required))
        .count()
}

/// Positional estimate for `mark`, ignoring completed lines.
#[must_use]
pub fn heuristic(board: &Board, mark: Mark) -> f64 {
    let mine = potential_lines(board, mark) as f64;
    let theirs = potential_lines(board, mark.opponent()) as f64;
    potential_weight(board) * (mine - theirs)
}

/// Evaluate the board from the perspective of `mark`.
///
/// Returns [`Score::WIN`] if `mark` already has a line, [`Score::LOSS`] if the
/// opponent does, and the scaled [`heuristic`] otherwise. Pure and
/// deterministic.
#[must_use]
pub fn evaluate(board: &Board, mark: Mark) -> f64 {
    if has_winner(board, mark) {
        return Score::WIN;
    }
    if has_winner(board, mark.opponent()) {
        return Score::LOSS;
    }
    heuristic(board, mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_terminal_scores() {
        let b = board(&["XXX", "OO.", "..."]);
        assert_eq!(evaluate(&b, Mark::X), Score::WIN);
        assert_eq!(evaluate(&b, Mark::O), Score::LOSS);
    }

    #[test]
    fn test_empty_board_is_even() {
        let b = Board::new(4).unwrap();
        assert_eq!(evaluate(&b, Mark::X), 0.0);
        assert_eq!(potential_lines(&b, Mark::X), 16);
    }

    #[test]
    fn test_evaluation_is_antisymmetric() {
        let b = board(&["X..", ".O.", "X.."]);
        let x = evaluate(&b, Mark::X);
        let o = evaluate(&b, Mark::O);
        assert!((x + o).abs() < 1e-12);
    }

    #[test]
    fn test_potential_lines_counts_open_cells() {
        // O in the centre kills every X line through it
        let b = board(&["...", ".O.", "..."]);
        // X can still use the outer rows and columns; every empty cell lies on one
        assert_eq!(potential_lines(&b, Mark::X), 8);
        assert_eq!(potential_lines(&b, Mark::O), 8);

        let b = board(&["X.X", ".X.", "X.X"]);
        // Every line through an edge cell also crosses an X, so O is shut out
        assert_eq!(potential_lines(&b, Mark::X), 4);
        assert_eq!(potential_lines(&b, Mark::O), 0);
        assert!((heuristic(&b, Mark::X) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_weight_per_board_size() {
        assert_eq!(potential_weight(&Board::new(3).unwrap()), 0.1);
        assert_eq!(potential_weight(&Board::new(4).unwrap()), 1.0 / 16.0);
        assert_eq!(potential_weight(&Board::new(6).unwrap()), 1.0 / 36.0);
    }

    #[test]
    fn test_large_differences_stay_ordered() {
        let ten = board(&[
            ".X....",
            "...X..",
            "....XX",
            "..X...",
            "......",
            "......",
        ]);
        let eighteen = board(&[
            "......",
            ".X.X..",
            "....X.",
            "..X...",
            "X....X",
            "......",
        ]);
        assert_eq!(potential_lines(&ten, Mark::X) - potential_lines(&ten, Mark::O), 10);
        assert_eq!(
            potential_lines(&eighteen, Mark::X) - potential_lines(&eighteen, Mark::O),
            18
        );

        let (h10, h18) = (heuristic(&ten, Mark::X), heuristic(&eighteen, Mark::X));
        assert!((h10 - 10.0 / 36.0).abs() < 1e-12);
        assert!((h18 - 18.0 / 36.0).abs() < 1e-12);
        assert!(h18 > h10);
        assert!(heuristic(&eighteen, Mark::O) < heuristic(&ten, Mark::O));
        assert!(evaluate(&eighteen, Mark::X) < Score::WIN);
    }

    #[test]
    fn test_one_sided_board_stays_below_win() {
        let b = board(&["..X...", "..X...", "XXXX.X", "..X...", "......", "..X..."]);
        assert!(!has_winner(&b, Mark::X));
        let h = heuristic(&b, Mark::X);
        assert!((h - 13.0 / 36.0).abs() < 1e-12);
        assert!(h > 0.0 && h < Score::WIN);
        assert!(heuristic(&b, Mark::O) > Score::LOSS);
    }

    #[test]
    fn test_full_drawn_board() {
        let b = board(&["XOX", "XOO", "OXX"]);
        assert_eq!(evaluate(&b, Mark::X), Score::DRAW);
    }
}
