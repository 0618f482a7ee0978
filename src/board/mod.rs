//! Board representation for K-in-a-row games

pub mod bitboard;
pub mod board;


use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, ScopedMove};

/// Smallest supported side length.
pub const MIN_SIZE: usize = 3;
/// Largest supported side length.
pub const MAX_SIZE: usize = 6;
pub const MAX_CELLS: usize = MAX_SIZE * MAX_SIZE; // 36

/// Win length for a board of side `size`.
///
/// 3x3 through 5x5 need a full row; 6x6 only needs five.
#[must_use]
pub fn win_requirement(size: usize) -> Option<usize> {
    match size {
        3..=5 => Some(size),
        6 => Some(5),
        _ => None,
    }
}

/// Cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    /// Get opponent mark
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }

    #[inline]
    pub fn is_player(self) -> bool {
        self != Mark::Empty
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
            Mark::Empty => '.',
        }
    }

    pub fn from_symbol(c: char) -> Result<Mark, BoardError> {
        match c {
            'X' | 'x' => Ok(Mark::X),
            'O' | 'o' => Ok(Mark::O),
            '.' | '_' | ' ' => Ok(Mark::Empty),
            other => Err(BoardError::UnknownMark(other)),
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Position on the board
///
/// Ordering is row-major, which is the tie-break order used by move ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < MAX_SIZE && (col as usize) < MAX_SIZE);
        Self { row, col }
    }

    /// Checked constructor for caller-supplied coordinates.
    #[inline]
    pub fn checked(row: usize, col: usize, size: usize) -> Option<Self> {
        (row < size && col < size).then(|| Self::new(row as u8, col as u8))
    }

    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: (idx / size) as u8,
            col: (idx % size) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32, size: usize) -> bool {
        row >= 0 && row < size as i32 && col >= 0 && col < size as i32
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Named board variants, from the classic 3x3 up to 6x6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Easy,
    Medium,
    Hard,
    Insane,
}

impl Variant {
    pub const ALL: [Variant; 4] = [Variant::Easy, Variant::Medium, Variant::Hard, Variant::Insane];

    pub fn size(self) -> usize {
        match self {
            Variant::Easy => 3,
            Variant::Medium => 4,
            Variant::Hard => 5,
            Variant::Insane => 6,
        }
    }

    pub fn required(self) -> usize {
        win_requirement(self.size()).unwrap_or(MIN_SIZE)
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Easy => "easy",
            Variant::Medium => "medium",
            Variant::Hard => "hard",
            Variant::Insane => "insane",
        }
    }

    pub fn description(self) -> String {
        let n = self.size();
        format!("{n}x{n} board ({} in a row to win)", self.required())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BoardError::UnknownVariant(s.to_string()))
    }
}
