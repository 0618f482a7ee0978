//! Search module for K-in-a-row
//!
//! Contains:
//! - Move generation and ordering
//! - Negamax with alpha-beta pruning and iterative deepening
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results

pub mod negamax;
pub mod ordering;
pub mod tt;
pub mod zobrist;

pub use negamax::{negamax, SearchResult, SearchStats, Searcher};
pub use ordering::{ordered_moves, ordered_moves_for, scored_moves, search_order, ScoredMove};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
