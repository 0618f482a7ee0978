use std::path::PathBuf;

/// Errors raised while building or parsing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("unsupported board size {0} (expected 3 to 6)")]
    UnsupportedSize(usize),

    #[error("board is not square: row {row} has {found} cells, expected {expected}")]
    WrongShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized mark {0:?}")]
    UnknownMark(char),

    #[error("unknown variant {0:?} (expected easy, medium, hard or insane)")]
    UnknownVariant(String),
}

/// Reasons the game state machine rejects a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,

    #[error("({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("no move to take back")]
    NothingToUndo,
}

/// Errors that can occur when asking the engine for a move.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("board is full, there is no move to make")]
    BoardFull,

    #[error("the side to move must be X or O")]
    InvalidMark,

    #[error("difficulty level {0} is out of range (expected 1 to 10)")]
    InvalidLevel(u8),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur when loading the difficulty table.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
