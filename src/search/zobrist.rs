//! Zobrist hashing for position identification
//!
//! Allows O(1) incremental hash updates when placing/removing marks, which
//! keys the transposition table during search.
//!
//! # Example
//!
//! ```
//! use kinarow::board::{Board, Mark, Pos};
//! use kinarow::search::ZobristTable;
//!
//! let zt = ZobristTable::new();
//! let mut board = Board::new(3).unwrap();
//!
//! let hash1 = zt.hash(&board, Mark::X);
//!
//! let pos = Pos::new(1, 1);
//! board.place_mark(pos, Mark::X);
//! let hash2 = zt.hash(&board, Mark::O);
//!
//! // Incremental update is equivalent to full recomputation
//! let idx = board.index(pos);
//! assert_eq!(zt.update_place(hash1, idx, Mark::X), hash2);
//! ```

use crate::board::{Board, Mark, MAX_CELLS};

/// Zobrist hash table.
///
/// XOR-based hashing with precomputed random values for each
/// (cell index, mark) combination.
pub struct ZobristTable {
    x: [u64; MAX_CELLS],
    o: [u64; MAX_CELLS],
    /// XORed in when X is to move
    x_to_move: u64,
}

impl ZobristTable {
    /// Create a new Zobrist table with deterministic random values.
    ///
    /// A fixed-seed LCG keeps hashes reproducible across runs.
    #[must_use]
    pub fn new() -> Self {
        // Knuth's MMIX LCG for the state, splitmix64 finalizer for the output
        // (raw LCG low bits are weak and the table indexes by low bits)
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let mut z = seed;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        };

        let mut x = [0u64; MAX_CELLS];
        let mut o = [0u64; MAX_CELLS];
        for i in 0..MAX_CELLS {
            x[i] = next_rand();
            o[i] = next_rand();
        }

        Self {
            x,
            o,
            x_to_move: next_rand(),
        }
    }

    /// Compute the full hash for a board position.
    #[must_use]
    pub fn hash(&self, board: &Board, side_to_move: Mark) -> u64 {
        let mut h = 0u64;
        if let Some(stones) = board.stones(Mark::X) {
            for idx in stones.iter_ones() {
                h ^= self.x[idx];
            }
        }
        if let Some(stones) = board.stones(Mark::O) {
            for idx in stones.iter_ones() {
                h ^= self.o[idx];
            }
        }
        if side_to_move == Mark::X {
            h ^= self.x_to_move;
        }
        h
    }

    /// Incrementally update hash after placing a mark at cell `idx`.
    ///
    /// Also toggles the side-to-move component. XOR is its own inverse, so
    /// the same call undoes the placement.
    #[inline]
    #[must_use]
    pub fn update_place(&self, hash: u64, idx: usize, mark: Mark) -> u64 {
        let mark_hash = match mark {
            Mark::X => self.x[idx],
            Mark::O => self.o[idx],
            Mark::Empty => 0,
        };
        hash ^ mark_hash ^ self.x_to_move
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    #[test]
    fn test_side_to_move_changes_hash() {
        let zt = ZobristTable::new();
        let board = Board::new(3).unwrap();
        assert_ne!(zt.hash(&board, Mark::X), zt.hash(&board, Mark::O));
    }

    #[test]
    fn test_place_and_remove_roundtrip() {
        let zt = ZobristTable::new();
        let board = Board::new(4).unwrap();
        let h0 = zt.hash(&board, Mark::X);
        let idx = board.index(Pos::new(2, 3));
        let h1 = zt.update_place(h0, idx, Mark::X);
        assert_ne!(h0, h1);
        assert_eq!(zt.update_place(h1, idx, Mark::X), h0);
    }

    #[test]
    fn test_transposed_move_orders_agree() {
        let zt = ZobristTable::new();
        let mut a = Board::new(3).unwrap();
        let mut b = Board::new(3).unwrap();
        a.place_mark(Pos::new(0, 0), Mark::X);
        a.place_mark(Pos::new(2, 2), Mark::O);
        b.place_mark(Pos::new(2, 2), Mark::O);
        b.place_mark(Pos::new(0, 0), Mark::X);
        assert_eq!(zt.hash(&a, Mark::X), zt.hash(&b, Mark::X));
    }

    #[test]
    fn test_x_and_o_differ() {
        let zt = ZobristTable::new();
        let mut a = Board::new(3).unwrap();
        let mut b = Board::new(3).unwrap();
        a.place_mark(Pos::new(1, 1), Mark::X);
        b.place_mark(Pos::new(1, 1), Mark::O);
        assert_ne!(zt.hash(&a, Mark::O), zt.hash(&b, Mark::O));
    }
}
