//! Pseudo-legal move generation
//!
//! Enumerates destination squares for the piece on a square from movement
//! geometry, board edges and occupancy alone. King safety is never consulted
//! here; see [`crate::rules`] for the legal-move filter.
//!
//! ## Attack mode
//!
//! With `attack_only` set, the generator reports the squares a piece attacks
//! rather than where it may move:
//!
//! - sliders include the first blocker on each ray whatever its color
//! - knights and kings report every on-board offset
//! - pawns report both forward diagonals and never push
//!
//! [`attack::is_attacked`] builds on this mode.

pub mod attack;
mod bishop;
mod king;
mod knight;
mod pawn;
mod queen;
mod rook;
mod sliding;

use std::collections::BTreeSet;

use crate::board::Position;
use crate::types::*;

pub use attack::{is_attacked, is_in_check, king_square};

/// Destination squares for the piece on `square`
///
/// # Arguments
///
/// * `square` - Origin square; an empty square yields an empty set
/// * `position` - The full board
/// * `attack_only` - Report attacked squares instead of moves (see module docs)
///
/// # Examples
///
/// ```rust,ignore
/// let position = Position::starting();
/// let moves = pseudo_moves("e2".parse()?, &position, false);
/// // e3 and e4
/// ```
pub fn pseudo_moves(square: Square, position: &Position, attack_only: bool) -> BTreeSet<Square> {
    let mut moves = BTreeSet::new();
    let Some(piece) = position.piece_at(square) else {
        return moves;
    };

    match piece.kind {
        PieceKind::Pawn => {
            pawn::generate_pawn_moves(position, square, piece.color, attack_only, &mut moves)
        }
        PieceKind::Knight => {
            knight::generate_knight_moves(position, square, piece.color, attack_only, &mut moves)
        }
        PieceKind::Bishop => {
            bishop::generate_bishop_moves(position, square, piece.color, attack_only, &mut moves)
        }
        PieceKind::Rook => {
            rook::generate_rook_moves(position, square, piece.color, attack_only, &mut moves)
        }
        PieceKind::Queen => {
            queen::generate_queen_moves(position, square, piece.color, attack_only, &mut moves)
        }
        PieceKind::King => {
            king::generate_king_moves(position, square, piece.color, attack_only, &mut moves)
        }
    }

    moves
}

/// Every `(from, to)` pseudo-move for one side
pub fn pseudo_moves_for(color: Color, position: &Position) -> Vec<(Square, Square)> {
    position
        .pieces_of(color)
        .flat_map(|(from, _)| {
            pseudo_moves(from, position, false)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// Whether a step onto `target` is open to a non-pawn mover of `color`
///
/// Empty squares and enemy pieces are open; own pieces only count in attack
/// mode, where they are defended rather than reachable.
#[inline]
pub(crate) fn is_open_target(
    position: &Position,
    target: Square,
    color: Color,
    attack_only: bool,
) -> bool {
    match position.color_at(target) {
        None => true,
        Some(occupant) => attack_only || occupant != color,
    }
}
