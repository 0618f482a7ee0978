//! Single-word bitboard, enough for a 6x6 grid

use super::MAX_CELLS;

/// One bit per cell index (row-major). 36 cells fit in a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Set the bit for a cell index
    #[inline]
    pub fn set(&mut self, idx: usize) {
        debug_assert!(idx < MAX_CELLS);
        self.bits |= 1u64 << idx;
    }

    /// Clear the bit for a cell index
    #[inline]
    pub fn clear(&mut self, idx: usize) {
        debug_assert!(idx < MAX_CELLS);
        self.bits &= !(1u64 << idx);
    }

    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        idx < MAX_CELLS && (self.bits >> idx) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    #[inline]
    pub fn union(self, other: Bitboard) -> Bitboard {
        Bitboard {
            bits: self.bits | other.bits,
        }
    }

    /// Iterate over set cell indices, lowest first
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter { bits: self.bits }
    }
}

/// Iterator over set bits
pub struct BitboardIter {
    bits: u64,
}

impl Iterator for BitboardIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(idx)
    }
}
