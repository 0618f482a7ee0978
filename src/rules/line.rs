//! Line detection through a single cell
//!
//! Every probe walks forward and backward from the cell along each of the
//! four orientations. Off-board cells and non-matching cells end a run; they
//! are never errors.

use crate::board::{Board, Mark, Pos};

/// Direction vectors for line checking (4 orientations)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal down
    (-1, 1), // Diagonal up
];

/// Cells matching `accept` walking from `pos` (exclusive) in one direction.
#[inline]
fn run(board: &Board, pos: Pos, (dr, dc): (i32, i32), accept: impl Fn(Mark) -> bool) -> usize {
    let mut count = 0;
    let mut r = pos.row as i32 + dr;
    let mut c = pos.col as i32 + dc;
    while let Some(mark) = board.get_checked(r, c) {
        if !accept(mark) {
            break;
        }
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

/// Length of the run through `pos` along `dir`, counting `pos` itself.
#[inline]
fn span(board: &Board, pos: Pos, dir: (i32, i32), accept: impl Fn(Mark) -> bool + Copy) -> usize {
    1 + run(board, pos, dir, accept) + run(board, pos, (-dir.0, -dir.1), accept)
}

/// True if `pos` holds `mark` and sits on a run of at least `required`.
#[must_use]
pub fn has_line(board: &Board, mark: Mark, pos: Pos, required: usize) -> bool {
    if !mark.is_player() || board.get(pos) != mark {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&dir| span(board, pos, dir, |m| m == mark) >= required)
}

/// True if a run of `mark`-or-empty cells through `pos` reaches `required`.
///
/// The probed cell counts whether it is empty or already holds `mark`.
#[must_use]
pub fn has_potential(board: &Board, mark: Mark, pos: Pos, required: usize) -> bool {
    if !mark.is_player() || !board.contains(pos) || board.get(pos) == mark.opponent() {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&dir| span(board, pos, dir, |m| m == mark || m == Mark::Empty) >= required)
}

/// True if placing `mark` on the empty cell `pos` would complete a line.
///
/// Same answer as placing the mark and calling [`has_line`], without
/// touching the board.
#[must_use]
pub fn would_complete(board: &Board, mark: Mark, pos: Pos) -> bool {
    if !mark.is_player() || !board.is_empty(pos) {
        return false;
    }
    let required = board.required();
    DIRECTIONS
        .iter()
        .any(|&dir| span(board, pos, dir, |m| m == mark) >= required)
}

/// First empty cell (row-major) where `mark` completes a line.
#[must_use]
pub fn completing_move(board: &Board, mark: Mark) -> Option<Pos> {
    board.empty_cells().find(|&pos| would_complete(board, mark, pos))
}

/// Cells of the winning run through `pos`, ordered from one end to the other.
#[must_use]
pub fn line_at(board: &Board, mark: Mark, pos: Pos, required: usize) -> Option<Vec<Pos>> {
    if !mark.is_player() || board.get(pos) != mark {
        return None;
    }
    for (dr, dc) in DIRECTIONS {
        let back = run(board, pos, (-dr, -dc), |m| m == mark) as i32;
        let fwd = run(board, pos, (dr, dc), |m| m == mark) as i32;
        if (1 + back + fwd) as usize >= required {
            let line = (-back..=fwd)
                .map(|i| {
                    Pos::new(
                        (pos.row as i32 + dr * i) as u8,
                        (pos.col as i32 + dc * i) as u8,
                    )
                })
                .collect();
            return Some(line);
        }
    }
    None
}

/// Find a winning line for `mark` anywhere on the board.
#[must_use]
pub fn find_winning_line(board: &Board, mark: Mark) -> Option<Vec<Pos>> {
    let stones = board.stones(mark)?;
    let size = board.size();
    let required = board.required();
    stones
        .iter_ones()
        .find_map(|idx| line_at(board, mark, Pos::from_index(idx, size), required))
}

/// Check if `mark` has a completed line anywhere on the board
#[must_use]
pub fn has_winner(board: &Board, mark: Mark) -> bool {
    let Some(stones) = board.stones(mark) else {
        return false;
    };
    let size = board.size();
    let required = board.required();
    stones
        .iter_ones()
        .any(|idx| has_line(board, mark, Pos::from_index(idx, size), required))
}
