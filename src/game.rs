//! Game state machine
//!
//! Owns the authoritative board for one game. Moves go through
//! [`GameState::play`], which places the current mark, checks for a line
//! and a full board, and passes the turn. `Won` and `Drawn` are absorbing
//! until [`GameState::reset`].

use tracing::debug;

use crate::board::{Board, Mark, Pos, Variant};
use crate::error::{BoardError, MoveError};
use crate::rules::{has_line, line_at};

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Mark),
    Drawn,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// One game on a fixed-size board. X moves first.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Mark,
    status: GameStatus,
    winning_cells: Vec<Pos>,
    history: Vec<Pos>,
}

impl GameState {
    /// New game on an empty board of side `size`.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Ok(Self::with_board(Board::new(size)?))
    }

    pub fn from_variant(variant: Variant) -> Self {
        Self::with_board(Board::from_variant(variant))
    }

    fn with_board(board: Board) -> Self {
        Self {
            board,
            current: Mark::X,
            status: GameStatus::InProgress,
            winning_cells: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Fresh game at the same board size.
    pub fn reset(&mut self) {
        self.board = self.board.cleared();
        self.current = Mark::X;
        self.status = GameStatus::InProgress;
        self.winning_cells.clear();
        self.history.clear();
    }

    /// Play the current mark at (`row`, `col`).
    pub fn play_at(&mut self, row: usize, col: usize) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        let size = self.board.size();
        let pos = Pos::checked(row, col, size).ok_or(MoveError::OutOfBounds { row, col, size })?;
        if !self.board.is_empty(pos) {
            return Err(MoveError::Occupied { row, col });
        }

        let mark = self.current;
        self.board.place_mark(pos, mark);
        self.history.push(pos);

        let required = self.board.required();
        if has_line(&self.board, mark, pos, required) {
            self.winning_cells = line_at(&self.board, mark, pos, required).unwrap_or_default();
            self.status = GameStatus::Won(mark);
        } else if self.board.is_full() {
            self.status = GameStatus::Drawn;
        } else {
            self.current = mark.opponent();
        }

        debug!(mark = %mark, pos = %pos, status = ?self.status, "move applied");
        Ok(self.status)
    }

    pub fn play(&mut self, pos: Pos) -> Result<GameStatus, MoveError> {
        self.play_at(pos.row as usize, pos.col as usize)
    }

    /// Boolean form of [`GameState::play_at`]: `false` leaves the state unchanged.
    pub fn apply_move(&mut self, row: usize, col: usize) -> bool {
        match self.play_at(row, col) {
            Ok(_) => true,
            Err(err) => {
                debug!(%err, row, col, "move rejected");
                false
            }
        }
    }

    /// Take back the last move of a game still in progress.
    pub fn undo(&mut self) -> Result<Pos, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        let pos = self.history.pop().ok_or(MoveError::NothingToUndo)?;
        self.board.remove_mark(pos);
        self.current = self.current.opponent();
        Ok(pos)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move next (the winner once the game is won)
    pub fn current_mark(&self) -> Mark {
        self.current
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn winner(&self) -> Option<Mark> {
        match self.status {
            GameStatus::Won(mark) => Some(mark),
            _ => None,
        }
    }

    /// Cells of the winning line, end to end. Empty unless won.
    pub fn winning_cells(&self) -> &[Pos] {
        &self.winning_cells
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }

    /// Moves played so far, in order
    pub fn moves(&self) -> &[Pos] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Empty cells in row-major order; none once the game is over.
    pub fn valid_moves(&self) -> Vec<Pos> {
        if self.is_game_over() {
            return Vec::new();
        }
        self.board.empty_cells().collect()
    }
}
