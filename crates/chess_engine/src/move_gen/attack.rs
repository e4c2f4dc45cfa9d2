//! Attack detection and king lookup
//!
//! Provides functions to check if squares are under attack and if kings are in check.
//! This module is critical for move legality validation and check detection.
//!
//! ## Algorithm
//!
//! To check if a square is attacked, we iterate through all pieces of the
//! attacking color and ask the generator, in attack mode, whether the target is
//! among the squares that piece attacks. The scan stops at the first hit; the
//! order pieces are visited in does not affect the answer.
//!
//! ## Missing kings
//!
//! Editor positions may lack a king. [`king_square`] returns `None` for them
//! and every caller branches on that explicitly: a side without a king is never
//! "in check".

use super::pseudo_moves;
use crate::board::Position;
use crate::types::*;

/// Check if a square is under attack by pieces of the specified color
///
/// # Arguments
///
/// * `square` - Target square to check
/// * `by_color` - Color of pieces that might attack
/// * `position` - The current position
///
/// # Returns
///
/// `true` if any piece of `by_color` attacks the target square
///
/// # Examples
///
/// ```rust,ignore
/// // Is e4 covered by black?
/// let attacked = is_attacked("e4".parse()?, Color::Black, &position);
/// ```
pub fn is_attacked(square: Square, by_color: Color, position: &Position) -> bool {
    position
        .pieces_of(by_color)
        .any(|(from, _)| pseudo_moves(from, position, true).contains(&square))
}

/// Find the king of a given color
///
/// # Returns
///
/// `Some(square)` for the first king of that color in square order, `None`
/// when the color has no king on the board.
pub fn king_square(position: &Position, color: Color) -> Option<Square> {
    position
        .pieces_of(color)
        .find(|(_, piece)| piece.kind == PieceKind::King)
        .map(|(square, _)| square)
}

/// Check if the king of a given color is in check
///
/// A color without a king is never in check.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    match king_square(position, color) {
        Some(king) => is_attacked(king, color.opposite(), position),
        None => false,
    }
}
