//! Negamax search with alpha-beta pruning and iterative deepening
//!
//! The search mutates one working copy of the board in place: every probe
//! goes through [`Board::place_scoped`], so the cell is restored however the
//! recursion unwinds.
//!
//! # Features
//!
//! - Iterative deepening with a wall-clock deadline
//! - Early stop once a root move is a proven win
//! - Optional transposition table, reused only at identical remaining depth
//! - Forced cells searched first via [`search_order`], without dropping
//!   any other move
//!
//! # Example
//!
//! ```
//! use kinarow::board::{Board, Mark, Pos};
//! use kinarow::search::Searcher;
//!
//! let board = Board::from_rows(&["XX.", "OO.", "..."]).unwrap();
//! let mut searcher = Searcher::new();
//!
//! let result = searcher.search(&board, Mark::X, 3);
//! assert_eq!(result.best_move, Some(Pos::new(0, 2)));
//! ```

use std::time::{Duration, Instant};

use tracing::debug;

use crate::board::{Board, Mark, Pos};
use crate::eval::{evaluate, Score};
use crate::rules::has_winner;

use super::ordering::{ordered_moves_for, search_order};
use super::{EntryType, TTStats, TranspositionTable, ZobristTable};

/// Infinity for alpha-beta bounds
const INF: f64 = f64::INFINITY;

/// Poll the clock every this many nodes (power of two)
const TIME_CHECK_NODES: u64 = 256;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
    /// Beta cutoffs on the first move tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that returned a usable score
    pub tt_hits: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move from the deepest completed iteration, or the first
    /// ordered move if none completed. `None` only on a full board.
    pub best_move: Option<Pos>,
    /// Score of the best move from the mover's perspective
    pub score: f64,
    /// Depth of the last completed iteration (0 if none completed)
    pub depth: u8,
    /// Total nodes searched
    pub nodes: u64,
    /// The deadline cut the search short
    pub timed_out: bool,
    pub stats: SearchStats,
}

/// Negamax searcher. Holds the hash tables and per-call counters; boards
/// are only borrowed for the duration of a call.
pub struct Searcher {
    zobrist: ZobristTable,
    tt: Option<TranspositionTable>,
    nodes: u64,
    deadline: Option<Instant>,
    stopped: bool,
    stats: SearchStats,
}

impl Searcher {
    /// Searcher with a transposition table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_table(Some(TranspositionTable::default()))
    }

    /// Searcher that never caches; results are identical, only slower.
    #[must_use]
    pub fn without_cache() -> Self {
        Self::with_table(None)
    }

    fn with_table(tt: Option<TranspositionTable>) -> Self {
        Self {
            zobrist: ZobristTable::new(),
            tt,
            nodes: 0,
            deadline: None,
            stopped: false,
            stats: SearchStats::default(),
        }
    }

    /// Occupancy of the transposition table after the last call
    pub fn tt_stats(&self) -> Option<TTStats> {
        self.tt.as_ref().map(TranspositionTable::stats)
    }

    /// Negamax value of `board` for `mover`, searched `depth` plies.
    ///
    /// `board` is mutated during the call and restored before it returns.
    pub fn negamax(&mut self, board: &mut Board, depth: u8, alpha: f64, beta: f64, mover: Mark) -> f64 {
        debug_assert!(mover.is_player());
        self.reset(None);
        let hash = self.zobrist.hash(board, mover);
        self.alpha_beta(board, mover, depth, alpha, beta, hash)
    }

    /// Iterative deepening up to `max_depth` with no deadline.
    #[must_use]
    pub fn search(&mut self, board: &Board, mover: Mark, max_depth: u8) -> SearchResult {
        self.iterate(board, mover, max_depth, None)
    }

    /// Iterative deepening up to `max_depth`, stopping at `budget`.
    ///
    /// Returns the best move of the last completed depth. A pass cut short
    /// by the deadline is discarded. If not even depth 1 completes, the
    /// first ordered move is returned.
    #[must_use]
    pub fn search_timed(
        &mut self,
        board: &Board,
        mover: Mark,
        max_depth: u8,
        budget: Duration,
    ) -> SearchResult {
        self.iterate(board, mover, max_depth, Some(Instant::now() + budget))
    }

    fn reset(&mut self, deadline: Option<Instant>) {
        self.nodes = 0;
        self.stopped = false;
        self.deadline = deadline;
        self.stats = SearchStats::default();
        if let Some(tt) = &mut self.tt {
            tt.clear();
        }
    }

    /// Check the deadline and latch `stopped` once it has passed.
    #[inline]
    fn check_time(&mut self) -> bool {
        if !self.stopped {
            if let Some(deadline) = self.deadline {
                self.stopped = Instant::now() >= deadline;
            }
        }
        self.stopped
    }

    fn iterate(
        &mut self,
        board: &Board,
        mover: Mark,
        max_depth: u8,
        deadline: Option<Instant>,
    ) -> SearchResult {
        debug_assert!(mover.is_player());
        let start = Instant::now();
        self.reset(deadline);

        let mut best = SearchResult {
            best_move: ordered_moves_for(board, mover).first().copied(),
            score: Score::DRAW,
            depth: 0,
            nodes: 0,
            timed_out: false,
            stats: SearchStats::default(),
        };

        let mut work_board = board.clone();
        // Passes deeper than the number of empty cells cannot change anything
        let last_depth = max_depth.min(board.empty_count() as u8);

        for depth in 1..=last_depth {
            if self.check_time() {
                best.timed_out = true;
                break;
            }

            let Some((mov, score)) = self.search_root(&mut work_board, mover, depth) else {
                debug!(depth, nodes = self.nodes, "deadline hit mid-pass, keeping previous depth");
                best.timed_out = true;
                break;
            };

            best.best_move = Some(mov);
            best.score = score;
            best.depth = depth;
            debug!(
                depth,
                score,
                best = %mov,
                nodes = self.nodes,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "completed iteration"
            );

            if score >= Score::WIN {
                break;
            }
        }

        best.nodes = self.nodes;
        best.stats = self.stats.clone();
        if let Some(tt) = self.tt_stats() {
            debug!(
                nodes = best.nodes,
                cutoffs = best.stats.beta_cutoffs,
                first_move_rate = best.stats.first_move_rate(),
                tt_hits = best.stats.tt_hits,
                tt_usage = tt.usage_percent,
                "search finished"
            );
        }
        best
    }

    /// One full-window pass at the root. `None` if the deadline cut it short.
    fn search_root(&mut self, board: &mut Board, mover: Mark, depth: u8) -> Option<(Pos, f64)> {
        let hash = self.zobrist.hash(board, mover);
        let mut alpha = -INF;
        let beta = INF;
        let mut best: Option<(Pos, f64)> = None;

        for mov in search_order(board, mover) {
            if self.check_time() {
                return None;
            }

            let child_hash = self.zobrist.update_place(hash, board.index(mov), mover);
            let score = {
                let mut child = board.place_scoped(mov, mover);
                -self.alpha_beta(&mut child, mover.opponent(), depth - 1, -beta, -alpha, child_hash)
            };

            if self.stopped {
                return None;
            }

            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mov, score));
            }
            if score >= Score::WIN {
                break;
            }
            alpha = alpha.max(score);
        }

        best
    }

    fn alpha_beta(
        &mut self,
        board: &mut Board,
        mover: Mark,
        depth: u8,
        mut alpha: f64,
        beta: f64,
        hash: u64,
    ) -> f64 {
        self.nodes += 1;

        if self.nodes & (TIME_CHECK_NODES - 1) == 0 && self.check_time() {
            return 0.0;
        }
        if self.stopped {
            return 0.0;
        }

        // The side that just moved may have completed a line
        if has_winner(board, mover.opponent()) {
            return Score::LOSS;
        }

        if depth == 0 {
            return evaluate(board, mover);
        }

        let moves = search_order(board, mover);
        if moves.is_empty() {
            return Score::DRAW;
        }

        if let Some(tt) = &self.tt {
            self.stats.tt_probes += 1;
            if let Some(score) = tt.probe(hash, depth, alpha, beta) {
                self.stats.tt_hits += 1;
                return score;
            }
        }

        let alpha_orig = alpha;
        let mut best = -INF;

        for (i, mov) in moves.into_iter().enumerate() {
            let child_hash = self.zobrist.update_place(hash, board.index(mov), mover);
            let score = {
                let mut child = board.place_scoped(mov, mover);
                -self.alpha_beta(&mut child, mover.opponent(), depth - 1, -beta, -alpha, child_hash)
            };

            if self.stopped {
                return 0.0;
            }

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                self.stats.beta_cutoffs += 1;
                if i == 0 {
                    self.stats.first_move_cutoffs += 1;
                }
                break;
            }
        }

        if let Some(tt) = &mut self.tt {
            let entry_type = if best <= alpha_orig {
                EntryType::UpperBound
            } else if best >= beta {
                EntryType::LowerBound
            } else {
                EntryType::Exact
            };
            tt.store(hash, depth, best, entry_type);
        }

        best
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Negamax value of `board` for `mover` with a fresh, uncached searcher.
pub fn negamax(board: &mut Board, depth: u8, alpha: f64, beta: f64, mover: Mark) -> f64 {
    Searcher::without_cache().negamax(board, depth, alpha, beta, mover)
}
