//! Knight move generation
//!
//! Knights move in an L-shape: two squares along one axis, then one square
//! along the other. They jump, so only the destination square matters.

use std::collections::BTreeSet;

use super::is_open_target;
use crate::board::Position;
use crate::constants::KNIGHT_OFFSETS;
use crate::types::*;

/// Generate knight moves from a given square
///
/// Destinations holding an own piece are skipped unless `attack_only` is set.
pub fn generate_knight_moves(
    position: &Position,
    from: Square,
    color: Color,
    attack_only: bool,
    moves: &mut BTreeSet<Square>,
) {
    for offset in KNIGHT_OFFSETS {
        if let Some(target) = from.offset(offset) {
            if is_open_target(position, target, color, attack_only) {
                moves.insert(target);
            }
        }
    }
}
