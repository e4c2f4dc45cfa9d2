//! Board representation
//!
//! Provides the [`Position`] value used throughout the engine:
//! - Sparse square -> piece mapping (only occupied squares are stored)
//! - Side to move
//! - Piece queries and the editing helpers the freeform position editor needs
//!
//! A `Position` is a plain value. Simulating a move clones it; nothing in the
//! engine mutates a position that a caller still holds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::START_FEN;
use crate::fen;
use crate::types::*;

/// Board occupancy plus side to move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pieces: BTreeMap<Square, Piece>,
    side_to_move: Color,
}

impl Default for Position {
    fn default() -> Self {
        Self::empty(Color::White)
    }
}

impl Position {
    /// Empty board with the given side to move
    pub fn empty(side_to_move: Color) -> Self {
        Self {
            pieces: BTreeMap::new(),
            side_to_move,
        }
    }

    /// Standard starting position
    pub fn starting() -> Self {
        fen::decode(START_FEN)
    }

    /// Get piece at square
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.get(&square).copied()
    }

    /// Check if square is empty
    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        !self.pieces.contains_key(&square)
    }

    /// Color of the piece on a square, if any
    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color)
    }

    /// Square -> piece view, in rank-major square order
    pub fn pieces(&self) -> &BTreeMap<Square, Piece> {
        &self.pieces
    }

    /// All pieces of one color
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces
            .iter()
            .filter(move |(_, piece)| piece.color == color)
            .map(|(square, piece)| (*square, *piece))
    }

    /// Number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn with_side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Place a piece, returning whatever stood there before
    pub fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.pieces.insert(square, piece)
    }

    /// Clear a square, returning the piece that stood there
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.pieces.remove(&square)
    }

    /// Copy of this position with the piece on `from` re-associated to `to`
    ///
    /// Whatever stood on `to` is dropped. Side to move is left unchanged; this
    /// is the simulation step used by legality checks, not a full move.
    pub fn relocate(&self, from: Square, to: Square) -> Position {
        let mut next = self.clone();
        if let Some(piece) = next.pieces.remove(&from) {
            next.pieces.insert(to, piece);
        }
        next
    }
}
