//! Error types for move application and board parsing

use crate::board::Square;

/// Why a move was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("square {0} is off the board")]
    OffBoard(Square),

    #[error("square {0} is already occupied")]
    Occupied(Square),

    #[error("placing at {0} captures nothing")]
    NoCaptures(Square),

    #[error("cannot pass while a legal move exists")]
    PassNotAllowed,

    #[error("the game is already over")]
    GameOver,
}

/// Errors from parsing a text board
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),

    #[error("row {row} has {len} cells, expected 8")]
    RowLength { row: usize, len: usize },

    #[error("unknown cell '{ch}' at ({row}, {col})")]
    BadCell { row: usize, col: usize, ch: char },
}
