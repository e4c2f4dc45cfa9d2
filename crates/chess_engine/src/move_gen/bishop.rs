//! Bishop move generation
//!
//! Bishops slide along diagonals until blocked, so they never leave the
//! square color they start on.

use std::collections::BTreeSet;

use super::sliding::generate_sliding_moves;
use crate::board::Position;
use crate::constants::BISHOP_DIRS;
use crate::types::*;

/// Generate bishop moves from a given square
pub fn generate_bishop_moves(
    position: &Position,
    from: Square,
    color: Color,
    attack_only: bool,
    moves: &mut BTreeSet<Square>,
) {
    generate_sliding_moves(position, from, color, &BISHOP_DIRS, attack_only, moves);
}
