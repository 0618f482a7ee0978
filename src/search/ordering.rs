//! Move generation and ordering
//!
//! Candidates are every empty cell, ranked by centrality plus how many sides
//! could still build a line through them. A cell that completes a line
//! short-circuits [`ordered_moves`] and [`ordered_moves_for`];
//! [`search_order`] only moves it to the front.

use crate::board::{Board, Mark, Pos};
use crate::rules::{completing_move, has_potential, would_complete};

/// Bonus per mark with a potential line through the cell
const POTENTIAL_BONUS: f64 = 0.5;

/// A candidate move and its ordering score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub pos: Pos,
    pub score: f64,
}

/// `(N - chebyshev distance to centre) / N`
#[inline]
fn center_score(board: &Board, pos: Pos) -> f64 {
    let n = board.size() as i32;
    let center = n / 2;
    let dist = (pos.row as i32 - center)
        .abs()
        .max((pos.col as i32 - center).abs());
    f64::from(n - dist) / f64::from(n)
}

/// Every empty cell with its ordering score, best first.
///
/// Ties keep row-major order.
#[must_use]
pub fn scored_moves(board: &Board) -> Vec<ScoredMove> {
    let required = board.required();
    let mut scored: Vec<ScoredMove> = board
        .empty_cells()
        .map(|pos| {
            let potential = [Mark::X, Mark::O]
                .into_iter()
                .filter(|&mark| has_potential(board, mark, pos, required))
                .count() as f64;
            ScoredMove {
                pos,
                score: center_score(board, pos) + POTENTIAL_BONUS * potential,
            }
        })
        .collect();
    // Stable sort keeps the row-major order of equal scores
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Candidate moves, most promising first.
///
/// If any empty cell completes a line for either mark, that cell (first in
/// row-major order) is returned alone. Empty only when the board is full.
#[must_use]
pub fn ordered_moves(board: &Board) -> Vec<Pos> {
    let forced = board
        .empty_cells()
        .find(|&pos| would_complete(board, Mark::X, pos) || would_complete(board, Mark::O, pos));
    if let Some(pos) = forced {
        return vec![pos];
    }
    scored_moves(board).into_iter().map(|m| m.pos).collect()
}

/// Candidate moves for `mover`, most promising first.
///
/// Like [`ordered_moves`], but a win for `mover` takes precedence over a
/// block of the opponent.
#[must_use]
pub fn ordered_moves_for(board: &Board, mover: Mark) -> Vec<Pos> {
    if let Some(pos) = completing_move(board, mover) {
        return vec![pos];
    }
    if let Some(pos) = completing_move(board, mover.opponent()) {
        return vec![pos];
    }
    scored_moves(board).into_iter().map(|m| m.pos).collect()
}

/// Every empty cell for `mover`, forced cells first.
///
/// The cell [`ordered_moves_for`] would pick comes first, then the rest of
/// the scored list. Nothing is dropped, so searching this list gives the
/// same value as searching every empty cell in any order.
#[must_use]
pub fn search_order(board: &Board, mover: Mark) -> Vec<Pos> {
    let forced = completing_move(board, mover).or_else(|| completing_move(board, mover.opponent()));
    let mut moves: Vec<Pos> = Vec::with_capacity(board.empty_count());
    moves.extend(forced);
    moves.extend(
        scored_moves(board)
            .into_iter()
            .map(|m| m.pos)
            .filter(|&pos| Some(pos) != forced),
    );
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_empty_board_center_first() {
        let b = Board::new(3).unwrap();
        let moves = ordered_moves(&b);
        assert_eq!(moves.len(), 9);
        assert_eq!(moves[0], Pos::new(1, 1));
        // Remaining cells tie; row-major order is kept
        assert_eq!(
            &moves[1..],
            &[
                Pos::new(0, 0),
                Pos::new(0, 1),
                Pos::new(0, 2),
                Pos::new(1, 0),
                Pos::new(1, 2),
                Pos::new(2, 0),
                Pos::new(2, 1),
                Pos::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_center_score_values() {
        let b = Board::new(5).unwrap();
        assert_eq!(center_score(&b, Pos::new(2, 2)), 1.0);
        assert_eq!(center_score(&b, Pos::new(0, 0)), 0.6);
        let b = Board::new(4).unwrap();
        assert_eq!(center_score(&b, Pos::new(2, 2)), 1.0);
        assert_eq!(center_score(&b, Pos::new(0, 0)), 0.5);
    }

    #[test]
    fn test_completing_cell_short_circuits() {
        let b = board(&["XX.", "...", "..."]);
        assert_eq!(ordered_moves(&b), vec![Pos::new(0, 2)]);

        // Either mark counts
        let b = board(&["...", "OO.", "X.."]);
        assert_eq!(ordered_moves(&b), vec![Pos::new(1, 2)]);
    }

    #[test]
    fn test_mover_win_beats_block() {
        // O completes at (0,2) first in row-major order, X completes at (1,2)
        let b = board(&["OO.", "XX.", "..."]);
        assert_eq!(ordered_moves(&b), vec![Pos::new(0, 2)]);
        assert_eq!(ordered_moves_for(&b, Mark::X), vec![Pos::new(1, 2)]);
        assert_eq!(ordered_moves_for(&b, Mark::O), vec![Pos::new(0, 2)]);
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let b = board(&["XOX", "XOO", "OXX"]);
        assert!(ordered_moves(&b).is_empty());
        assert!(ordered_moves_for(&b, Mark::X).is_empty());
        assert!(search_order(&b, Mark::X).is_empty());
    }

    #[test]
    fn test_search_order_keeps_every_cell() {
        let b = board(&["OO.", "XX.", "..."]);
        let for_x = search_order(&b, Mark::X);
        assert_eq!(for_x[0], Pos::new(1, 2));
        assert_eq!(for_x.len(), b.empty_count());

        // Block first, then the remaining cells without repeats
        let b = board(&["X.O", ".X.", "O.."]);
        let for_o = search_order(&b, Mark::O);
        assert_eq!(for_o[0], Pos::new(2, 2));
        assert_eq!(ordered_moves_for(&b, Mark::O), vec![Pos::new(2, 2)]);
        let mut sorted = for_o.clone();
        sorted.sort();
        assert_eq!(sorted, b.empty_cells().collect::<Vec<_>>());

        // Without a forced cell it is the scored list
        let b = Board::new(4).unwrap();
        let scored: Vec<Pos> = scored_moves(&b).into_iter().map(|m| m.pos).collect();
        assert_eq!(search_order(&b, Mark::X), scored);
    }

    #[test]
    fn test_potential_raises_rank() {
        let b = board(&["....", ".X..", "..O.", "...."]);
        let scored = scored_moves(&b);
        let score_of = |pos: Pos| scored.iter().find(|m| m.pos == pos).unwrap().score;
        assert!(score_of(Pos::new(1, 2)) >= score_of(Pos::new(0, 0)));
        assert!(scored.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let b = board(&["X....", ".O...", ".....", "...X.", "....."]);
        assert_eq!(ordered_moves(&b), ordered_moves(&b.clone()));
    }
}
