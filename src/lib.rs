//! K-in-a-row move engine
//!
//! Move search and win detection for tic-tac-toe style games on square
//! boards from 3x3 to 6x6:
//! - 3x3, 4x4 and 5x5 need a full row to win
//! - 6x6 needs five in a row
//! - X moves first
//!
//! # Architecture
//!
//! - [`board`]: Board representation with bitboards and scoped placement
//! - [`rules`]: Line and potential-line detection
//! - [`eval`]: Position evaluation
//! - [`search`]: Move ordering and negamax with alpha-beta pruning
//! - [`engine`]: Difficulty levels 1 to 10 and the move request entry point
//! - [`game`]: Game state machine for hosts
//! - [`config`]: Difficulty tier table and TOML loading
//!
//! # Quick Start
//!
//! ```
//! use kinarow::{Engine, GameState, Variant};
//!
//! let mut game = GameState::from_variant(Variant::Easy);
//! let mut engine = Engine::new(7).unwrap();
//!
//! game.apply_move(0, 0);
//! let reply = engine.request_move(game.board(), game.current_mark()).unwrap();
//! assert!(game.apply_move(reply.row as usize, reply.col as usize));
//! ```
//!
//! # Move Priority
//!
//! Every level follows the same order:
//! 1. Complete a line for the side to move
//! 2. Block a line the opponent would complete
//! 3. The level's strategy (random, positional, shallow or deep search)

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{win_requirement, Board, Mark, Pos, Variant};
pub use config::{EngineConfig, Strategy, TierConfig};
pub use engine::{request_move, Engine, MoveResult, SearchType};
pub use error::{BoardError, ConfigError, EngineError, MoveError};
pub use game::{GameState, GameStatus};
