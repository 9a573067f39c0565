//! Error types for board generation, key parsing and the board text format

use thiserror::Error;

/// Why a single fill attempt was rejected. Recoverable: the generator retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("no palette color fits at ({x}, {y}) without completing a run")]
    NoValidColor { x: usize, y: usize },

    #[error("generated board has no legal move")]
    NoHints,
}

/// Terminal engine failure surfaced to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("board generation failed after {attempts} attempts: {last}")]
    RetryExhausted { attempts: u32, last: GenerateError },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyError {
    #[error("position key must have 2 or 4 components, got {0}")]
    Arity(usize),

    #[error("invalid component {component:?} in position key")]
    Component { component: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("board has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell token {0:?}")]
    Token(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
