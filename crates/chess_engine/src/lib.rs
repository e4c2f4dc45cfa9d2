//! Chess rules core for the tutor
//!
//! Board codec, pseudo-legal move generation, attack detection and the
//! best-effort Custom-mode rules used for positions a standard rules authority
//! refuses (missing kings, pawns on the back rank, editor leftovers).
//!
//! ## Module Organization
//!
//! - `types` - Square, Piece, Move, Status value types
//! - `board` - [`Position`]: sparse square -> piece map plus side to move
//! - `fen` - Lenient position text codec
//! - `move_gen` - Pseudo-legal destinations and attack detection
//! - `rules` - Legal-move filter, mate/stalemate, move application

pub mod board;
pub mod constants;
pub mod error;
pub mod fen;
pub mod move_gen;
pub mod rules;
pub mod types;

pub use board::Position;
pub use error::{ChessEngineError, ChessEngineResult};
pub use move_gen::{is_attacked, is_in_check, king_square, pseudo_moves, pseudo_moves_for};
pub use rules::{
    apply_custom, custom_status, has_any_legal_move, is_checkmate, is_stalemate, legal_moves,
    legal_moves_for,
};
pub use types::{AppliedMove, Color, Move, Piece, PieceKind, Square, Status};
