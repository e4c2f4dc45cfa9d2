//! Rules capability shared by Strict and Custom sessions
//!
//! A session holds one implementor of [`Rules`] for its whole lifetime:
//!
//! - [`crate::strict::StrictRules`] delegates to the standard rules authority
//!   for well-formed positions
//! - [`CustomRules`] runs the engine crate's own generator and analyzer for
//!   positions the authority refuses
//!
//! Both are plain values: [`Rules::apply`] returns the successor instead of
//! mutating, so a rejected request can never leave a half-applied position.

use std::collections::BTreeSet;

use chess_engine::{fen, AppliedMove, Move, Position, Square, Status};

/// Capability set every session mode provides
pub trait Rules: Sized {
    /// Square -> piece view of the current position
    fn position(&self) -> Position;

    /// Legal destinations for the piece on `square` (empty set if none)
    fn legal_moves(&self, square: Square) -> BTreeSet<Square>;

    /// Successor position for an accepted move, `None` if rejected
    fn apply(&self, mv: &Move) -> Option<(Self, AppliedMove)>;

    /// Status of the side to move
    fn status(&self) -> Status;

    /// Position text
    fn encode(&self) -> String;
}

/// Best-effort rules over a possibly malformed [`Position`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomRules {
    position: Position,
}

impl CustomRules {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Decode leniently; malformed text degrades to fewer pieces
    pub fn from_fen(text: &str) -> Self {
        Self::new(fen::decode(text))
    }
}

impl Rules for CustomRules {
    fn position(&self) -> Position {
        self.position.clone()
    }

    fn legal_moves(&self, square: Square) -> BTreeSet<Square> {
        chess_engine::legal_moves(square, &self.position)
    }

    fn apply(&self, mv: &Move) -> Option<(Self, AppliedMove)> {
        chess_engine::apply_custom(&self.position, mv)
            .map(|(position, applied)| (Self::new(position), applied))
    }

    fn status(&self) -> Status {
        chess_engine::custom_status(&self.position)
    }

    fn encode(&self) -> String {
        fen::encode(&self.position)
    }
}
