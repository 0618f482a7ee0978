//! Square board with scoped placement for search

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::bitboard::Bitboard;
use super::{win_requirement, Mark, Pos, Variant};
use crate::error::BoardError;

/// Game board of side 3 to 6.
///
/// Cells are stored as one bitboard per mark. The side length and the win
/// length `required` travel with the board so every rule and search routine
/// reads them from the same place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    x: Bitboard,
    o: Bitboard,
    size: u8,
    required: u8,
}

impl Board {
    /// Empty board of side `size`.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        let required = win_requirement(size).ok_or(BoardError::UnsupportedSize(size))?;
        Ok(Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
            size: size as u8,
            required: required as u8,
        })
    }

    /// Empty board for a named variant.
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
            size: variant.size() as u8,
            required: variant.required() as u8,
        }
    }

    /// Empty board with the same size and win length.
    pub fn cleared(&self) -> Self {
        Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
            size: self.size,
            required: self.required,
        }
    }

    /// Build a board from a square grid of marks.
    pub fn from_grid(grid: &[Vec<Mark>]) -> Result<Self, BoardError> {
        let size = grid.len();
        let mut board = Self::new(size)?;
        for (r, row) in grid.iter().enumerate() {
            if row.len() != size {
                return Err(BoardError::WrongShape {
                    row: r,
                    expected: size,
                    found: row.len(),
                });
            }
            for (c, &mark) in row.iter().enumerate() {
                board.place_mark(Pos::new(r as u8, c as u8), mark);
            }
        }
        Ok(board)
    }

    /// Parse rows such as `["XO.", ".X.", "..O"]`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let grid = rows
            .iter()
            .map(|row| row.as_ref().chars().map(Mark::from_symbol).collect())
            .collect::<Result<Vec<Vec<Mark>>, _>>()?;
        Self::from_grid(&grid)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Win length for this board
    #[inline]
    pub fn required(&self) -> usize {
        self.required as usize
    }

    #[inline]
    pub fn index(&self, pos: Pos) -> usize {
        pos.to_index(self.size())
    }

    #[inline]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        Pos::is_valid(row, col, self.size())
    }

    /// Whether `pos` lies on this board. `Pos` only checks against the
    /// largest board, so cells past the edge of a smaller one fail here.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Get mark at position; off-board cells read as `Empty`
    #[inline]
    pub fn get(&self, pos: Pos) -> Mark {
        if !self.contains(pos) {
            return Mark::Empty;
        }
        let idx = self.index(pos);
        if self.x.get(idx) {
            Mark::X
        } else if self.o.get(idx) {
            Mark::O
        } else {
            Mark::Empty
        }
    }

    /// Signed lookup; off-board cells read as `None`.
    #[inline]
    pub fn get_checked(&self, row: i32, col: i32) -> Option<Mark> {
        self.in_bounds(row, col)
            .then(|| self.get(Pos::new(row as u8, col as u8)))
    }

    /// Whether `pos` is an open cell on this board
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.contains(pos) && self.get(pos) == Mark::Empty
    }

    /// Place a mark (no legality checks beyond the board edge).
    /// Use `GameState::play` for game moves.
    ///
    /// Off-board positions are a caller bug: they panic in debug builds and
    /// leave the board untouched otherwise.
    #[inline]
    pub fn place_mark(&mut self, pos: Pos, mark: Mark) {
        debug_assert!(self.contains(pos), "{pos} is off a {0}x{0} board", self.size);
        if !self.contains(pos) {
            return;
        }
        let idx = self.index(pos);
        self.x.clear(idx);
        self.o.clear(idx);
        match mark {
            Mark::X => self.x.set(idx),
            Mark::O => self.o.set(idx),
            Mark::Empty => {}
        }
    }

    #[inline]
    pub fn remove_mark(&mut self, pos: Pos) {
        self.place_mark(pos, Mark::Empty);
    }

    /// Place `mark` for the lifetime of the returned guard.
    ///
    /// The cell is cleared again when the guard drops, on every exit path.
    #[inline]
    pub fn place_scoped(&mut self, pos: Pos, mark: Mark) -> ScopedMove<'_> {
        debug_assert!(self.is_empty(pos));
        self.place_mark(pos, mark);
        ScopedMove { board: self, pos }
    }

    /// Bitboard for a mark (None for Empty)
    #[inline]
    pub fn stones(&self, mark: Mark) -> Option<&Bitboard> {
        match mark {
            Mark::X => Some(&self.x),
            Mark::O => Some(&self.o),
            Mark::Empty => None,
        }
    }

    /// Total marks on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.x.count() + self.o.count()
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.size() * self.size() - self.stone_count() as usize
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.x.is_empty() && self.o.is_empty()
    }

    /// Centre cell (integer division, so it leans down-right on even boards)
    #[inline]
    pub fn center(&self) -> Pos {
        let c = (self.size / 2) as u8;
        Pos::new(c, c)
    }

    /// All cells in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let size = self.size();
        (0..size * size).map(move |idx| Pos::from_index(idx, size))
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let occupied = self.x.union(self.o);
        let size = self.size();
        (0..size * size)
            .filter(move |&idx| !occupied.get(idx))
            .map(move |idx| Pos::from_index(idx, size))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            let row: Vec<String> = (0..self.size)
                .map(|c| self.get(Pos::new(r, c)).to_string())
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

/// A mark placed by [`Board::place_scoped`], removed again on drop.
///
/// Derefs to the board so recursive search can keep working on it.
pub struct ScopedMove<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl ScopedMove<'_> {
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for ScopedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        self.board.remove_mark(self.pos);
    }
}
