//! Difficulty dispatcher
//!
//! Every request first looks for a cell that completes a line for the mover,
//! then for one that blocks the opponent. Only when neither exists does the
//! level's strategy pick the move:
//!
//! 1. **Random**: uniform over empty cells
//! 2. **Positional**: coin flip between random and centre / potential line
//! 3. **Shallow**: one-ply heuristic over the ordered moves, time-boxed
//! 4. **DeepSearch**: iterative-deepening negamax, time-boxed
//!
//! # Example
//!
//! ```
//! use kinarow::board::{Board, Mark, Pos};
//! use kinarow::engine::{Engine, SearchType};
//!
//! let board = Board::from_rows(&["XX.", "...", "..."]).unwrap();
//! let mut engine = Engine::new(1).unwrap().with_seed(7);
//!
//! let result = engine.request_move_with_stats(&board, Mark::X).unwrap();
//! assert_eq!(result.best_move, Pos::new(0, 2));
//! assert_eq!(result.search_type, SearchType::ImmediateWin);
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::board::{Board, Mark, Pos};
use crate::config::{EngineConfig, Strategy, TierConfig};
use crate::error::EngineError;
use crate::eval::{evaluate, Score};
use crate::rules::{completing_move, has_potential};
use crate::search::{ordered_moves_for, SearchStats, Searcher};

/// Which step of the dispatcher produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Completes a line for the mover
    ImmediateWin,
    /// Stops the opponent completing a line
    Block,
    /// Uniform random choice
    Random,
    /// Centre or potential-line preference
    Positional,
    /// Best one-ply heuristic score
    Shallow,
    /// Iterative-deepening negamax
    AlphaBeta,
    /// Search ran out of time before depth 1; first ordered move
    Fallback,
}

/// Result of a move request with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub best_move: Pos,
    /// Score from the mover's perspective (0 for unscored strategies)
    pub score: f64,
    pub search_type: SearchType,
    /// Deepest completed search depth (0 when no search ran)
    pub depth: u8,
    /// Number of positions evaluated
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Pruning and cache counters (all zero unless a search ran)
    pub stats: SearchStats,
}

impl MoveResult {
    #[inline]
    fn immediate(pos: Pos, search_type: SearchType, score: f64, start: Instant) -> Self {
        Self {
            best_move: pos,
            score,
            search_type,
            depth: 0,
            nodes: 1,
            time_ms: start.elapsed().as_millis() as u64,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    fn unscored(pos: Pos, search_type: SearchType, start: Instant) -> Self {
        Self {
            best_move: pos,
            score: Score::DRAW,
            search_type,
            depth: 0,
            nodes: 0,
            time_ms: start.elapsed().as_millis() as u64,
            stats: SearchStats::default(),
        }
    }
}

/// Move engine for one difficulty level.
///
/// The level is fixed at construction; build a new engine to change it.
pub struct Engine {
    level: u8,
    tier: TierConfig,
    rng: StdRng,
    searcher: Searcher,
}

impl Engine {
    /// Engine for `level` (1 to 10) with the built-in tier table.
    pub fn new(level: u8) -> Result<Self, EngineError> {
        Self::with_config(level, &EngineConfig::default())
    }

    /// Engine for `level` using a custom tier table.
    pub fn with_config(level: u8, config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let tier = *config.tier(level).ok_or(EngineError::InvalidLevel(level))?;
        Ok(Self {
            level,
            tier,
            rng: StdRng::from_os_rng(),
            searcher: Searcher::new(),
        })
    }

    /// Reseed the random tiers for reproducible play.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn tier(&self) -> &TierConfig {
        &self.tier
    }

    /// Pick a move for `mover`.
    ///
    /// Fails if the board is full or `mover` is not X or O.
    pub fn request_move(&mut self, board: &Board, mover: Mark) -> Result<Pos, EngineError> {
        self.request_move_with_stats(board, mover)
            .map(|result| result.best_move)
    }

    /// Pick a move for `mover` and report how it was found.
    pub fn request_move_with_stats(
        &mut self,
        board: &Board,
        mover: Mark,
    ) -> Result<MoveResult, EngineError> {
        let start = Instant::now();

        if !mover.is_player() {
            return Err(EngineError::InvalidMark);
        }
        if board.is_full() {
            return Err(EngineError::BoardFull);
        }

        let result = if let Some(pos) = completing_move(board, mover) {
            MoveResult::immediate(pos, SearchType::ImmediateWin, Score::WIN, start)
        } else if let Some(pos) = completing_move(board, mover.opponent()) {
            MoveResult::immediate(pos, SearchType::Block, Score::DRAW, start)
        } else {
            match self.tier.strategy {
                Strategy::Random => {
                    MoveResult::unscored(self.random_move(board)?, SearchType::Random, start)
                }
                Strategy::Positional => self.positional_move(board, mover, start)?,
                Strategy::Shallow => self.shallow_move(board, mover, start)?,
                Strategy::DeepSearch => self.deep_search_move(board, mover, start)?,
            }
        };

        debug!(
            level = self.level,
            strategy = self.tier.strategy.name(),
            mover = %mover,
            best = %result.best_move,
            source = ?result.search_type,
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "engine move"
        );

        Ok(result)
    }

    fn random_move(&mut self, board: &Board) -> Result<Pos, EngineError> {
        let empty: Vec<Pos> = board.empty_cells().collect();
        empty
            .choose(&mut self.rng)
            .copied()
            .ok_or(EngineError::BoardFull)
    }

    /// Half the time random; otherwise the centre, else the first cell
    /// where the mover could still build a line, else random.
    fn positional_move(
        &mut self,
        board: &Board,
        mover: Mark,
        start: Instant,
    ) -> Result<MoveResult, EngineError> {
        if self.rng.random_bool(0.5) {
            return Ok(MoveResult::unscored(
                self.random_move(board)?,
                SearchType::Random,
                start,
            ));
        }

        let center = board.center();
        if board.is_empty(center) {
            return Ok(MoveResult::unscored(center, SearchType::Positional, start));
        }

        let required = board.required();
        match board
            .empty_cells()
            .find(|&pos| has_potential(board, mover, pos, required))
        {
            Some(pos) => Ok(MoveResult::unscored(pos, SearchType::Positional, start)),
            None => Ok(MoveResult::unscored(
                self.random_move(board)?,
                SearchType::Random,
                start,
            )),
        }
    }

    /// Score each ordered move by the position it leaves, until the deadline.
    fn shallow_move(
        &mut self,
        board: &Board,
        mover: Mark,
        start: Instant,
    ) -> Result<MoveResult, EngineError> {
        let deadline = start + self.tier.time_budget();
        let moves = ordered_moves_for(board, mover);
        let first = *moves.first().ok_or(EngineError::BoardFull)?;

        let mut work_board = board.clone();
        let mut best = (first, f64::NEG_INFINITY);
        let mut nodes = 0u64;

        for mov in moves {
            if Instant::now() >= deadline {
                debug!(evaluated = nodes, "shallow deadline reached");
                break;
            }
            let score = {
                let child = work_board.place_scoped(mov, mover);
                evaluate(&child, mover)
            };
            nodes += 1;
            trace!(candidate = %mov, score, "shallow candidate");

            if score > best.1 {
                best = (mov, score);
                if score >= Score::WIN {
                    break;
                }
            }
        }

        let (best_move, score) = best;
        Ok(MoveResult {
            best_move,
            score: if nodes == 0 { Score::DRAW } else { score },
            search_type: SearchType::Shallow,
            depth: 1,
            nodes,
            time_ms: start.elapsed().as_millis() as u64,
            stats: SearchStats::default(),
        })
    }

    fn deep_search_move(
        &mut self,
        board: &Board,
        mover: Mark,
        start: Instant,
    ) -> Result<MoveResult, EngineError> {
        let result =
            self.searcher
                .search_timed(board, mover, self.tier.depth, self.tier.time_budget());
        let best_move = result.best_move.ok_or(EngineError::BoardFull)?;
        let search_type = if result.depth == 0 {
            SearchType::Fallback
        } else {
            SearchType::AlphaBeta
        };

        Ok(MoveResult {
            best_move,
            score: result.score,
            search_type,
            depth: result.depth,
            nodes: result.nodes,
            time_ms: start.elapsed().as_millis() as u64,
            stats: result.stats,
        })
    }
}

/// One-shot move request with the built-in tier table.
///
/// ```
/// use kinarow::board::{Board, Mark, Pos};
///
/// let board = Board::from_rows(&["OO.", "X..", "..X"]).unwrap();
/// assert_eq!(kinarow::request_move(&board, Mark::X, 4).unwrap(), Pos::new(0, 2));
/// ```
pub fn request_move(board: &Board, mover: Mark, level: u8) -> Result<Pos, EngineError> {
    Engine::new(level)?.request_move(board, mover)
}
