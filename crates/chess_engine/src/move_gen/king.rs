//! King move generation
//!
//! Kings move one square in any direction.
//!
//! ## King Movement Rules
//!
//! - Up to 8 destinations, fewer on edges and corners
//! - Cannot move onto own pieces
//! - Moving into check is filtered later by [`crate::rules::legal_moves`]
//!
//! Castling is not generated; castling rights are not part of [`Position`].

use std::collections::BTreeSet;

use super::is_open_target;
use crate::board::Position;
use crate::constants::KING_OFFSETS;
use crate::types::*;

/// Generate king moves from a given square
///
/// # Arguments
///
/// * `position` - The current position
/// * `from` - Square the king stands on
/// * `color` - Color of the king
/// * `attack_only` - Include squares held by own pieces
/// * `moves` - Output set to add destinations to
pub fn generate_king_moves(
    position: &Position,
    from: Square,
    color: Color,
    attack_only: bool,
    moves: &mut BTreeSet<Square>,
) {
    for offset in KING_OFFSETS {
        if let Some(target) = from.offset(offset) {
            if is_open_target(position, target, color, attack_only) {
                moves.insert(target);
            }
        }
    }
}
