//! Sliding piece move generation
//!
//! Common functionality for sliding pieces (bishops, rooks, queens).
//! These pieces can move multiple squares in a direction until blocked.
//!
//! ## Algorithm
//!
//! For each direction we cast a ray from the origin square:
//! 1. Empty squares are added and the ray continues
//! 2. The first occupied square ends the ray
//! 3. That blocker is added if it is an opponent piece, or always in attack mode
//! 4. The board edge ends the ray

use std::collections::BTreeSet;

use crate::board::Position;
use crate::types::*;

/// Cast rays from `from` along each of `directions`
///
/// # Arguments
///
/// * `position` - The current position
/// * `from` - Square the slider stands on
/// * `color` - Color of the slider
/// * `directions` - `(file_delta, rank_delta)` steps, see [`crate::constants`]
/// * `attack_only` - Include own blockers (the square is defended)
/// * `moves` - Output set to add destinations to
///
/// # Examples
///
/// ```rust,ignore
/// let mut moves = BTreeSet::new();
/// generate_sliding_moves(&position, "a1".parse()?, Color::White, &ROOK_DIRS, false, &mut moves);
/// ```
pub fn generate_sliding_moves(
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    attack_only: bool,
    moves: &mut BTreeSet<Square>,
) {
    for &direction in directions {
        let mut current = from;
        while let Some(next) = current.offset(direction) {
            match position.color_at(next) {
                None => {
                    moves.insert(next);
                    current = next;
                }
                Some(occupant) => {
                    if attack_only || occupant != color {
                        moves.insert(next);
                    }
                    break;
                }
            }
        }
    }
}
