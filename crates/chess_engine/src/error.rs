//! Error types for chess engine
//!
//! Parsing errors for the small value types (squares, pieces, coordinate moves).
//! Board decoding itself never fails; see [`crate::fen`].

use thiserror::Error;

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Square text is not a file `a`-`h` followed by a rank `1`-`8`
    #[error("Invalid square: {text:?} (expected a1-h8)")]
    InvalidSquare { text: String },

    /// Letter does not name a piece
    #[error("Invalid piece letter: {letter:?}")]
    InvalidPiece { letter: char },

    /// Coordinate move text is not `<from><to>[promotion]`
    #[error("Invalid coordinate move: {text:?}")]
    InvalidMove { text: String },
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
