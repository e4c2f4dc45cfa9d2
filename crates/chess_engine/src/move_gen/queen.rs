//! Queen move generation
//!
//! Queens combine the movement patterns of bishops and rooks.

use std::collections::BTreeSet;

use super::bishop;
use super::rook;
use crate::board::Position;
use crate::types::*;

/// Generate queen moves from a given square
///
/// Queens combine bishop and rook movement, so this function generates
/// moves for both patterns into the same set.
pub fn generate_queen_moves(
    position: &Position,
    from: Square,
    color: Color,
    attack_only: bool,
    moves: &mut BTreeSet<Square>,
) {
    bishop::generate_bishop_moves(position, from, color, attack_only, moves);
    rook::generate_rook_moves(position, from, color, attack_only, moves);
}
