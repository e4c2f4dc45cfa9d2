//! Chess tutor rules core
//!
//! Everything the tutoring app needs below the UI: a session over a starting
//! position that validates moves, derives status, navigates its history,
//! replays pasted move text and applies engine suggestions.
//!
//! ## Module Organization
//!
//! - `session` - [`GameSession`]: mode selection, moves, undo/redo/jump, records
//! - `rules` - [`Rules`] capability and the Custom-mode implementation
//! - `strict` - Standard rules through the `shakmaty` authority
//! - `history` - Applied moves plus navigation cursor
//! - `replay` - Notation parse with coordinate fallback
//! - `suggest` - Engine-service client and suggestion types
//! - `config` - Persisted [`TutorSettings`]
//!
//! Board types, the position codec and the Custom-mode move generator live in
//! the `chess_engine` crate and are re-exported here.
//!
//! # Examples
//!
//! ```rust,ignore
//! use chess_tutor::{GameSession, Status};
//!
//! let mut session = GameSession::standard();
//! assert_eq!(session.apply_move("e2e4".parse()?), Some(Status::Normal));
//! session.undo();
//! ```

pub mod config;
pub mod history;
pub mod replay;
pub mod rules;
pub mod session;
pub mod strict;
pub mod suggest;

pub use chess_engine::{fen, AppliedMove, Color, Move, Piece, PieceKind, Position, Square, Status};
pub use config::{ConfigError, ConfigResult, TutorSettings};
pub use history::MoveHistory;
pub use rules::{CustomRules, Rules};
pub use session::{GameSession, Mode, SessionRecord};
pub use strict::{StrictError, StrictResult, StrictRules};
pub use suggest::{
    Difficulty, HttpSuggester, MoveSuggester, SuggestError, SuggestResult, Suggestion,
    SuggestionRequest,
};
