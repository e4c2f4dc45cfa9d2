//! Rook move generation
//!
//! Rooks slide along ranks and files until blocked.

use std::collections::BTreeSet;

use super::sliding::generate_sliding_moves;
use crate::board::Position;
use crate::constants::ROOK_DIRS;
use crate::types::*;

/// Generate rook moves from a given square
pub fn generate_rook_moves(
    position: &Position,
    from: Square,
    color: Color,
    attack_only: bool,
    moves: &mut BTreeSet<Square>,
) {
    generate_sliding_moves(position, from, color, &ROOK_DIRS, attack_only, moves);
}
