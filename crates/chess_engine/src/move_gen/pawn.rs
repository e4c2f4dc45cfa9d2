//! Pawn move generation
//!
//! Handles pawn-specific move generation:
//! - Single and double forward pushes
//! - Diagonal captures
//! - Promotion (destinations on the final rank are returned; the promotion
//!   piece is chosen when the move is applied)
//!
//! ## Pawn Movement Rules
//!
//! - **Forward push**: one square toward the opponent, only onto an empty square
//! - **Double push**: from the starting rank (rank 2 for white, rank 7 for
//!   black), only when both the intermediate and destination squares are empty
//! - **Captures**: one square diagonally forward, only onto an enemy piece
//!
//! En passant is not modelled.

use std::collections::BTreeSet;

use crate::board::Position;
use crate::constants::{BLACK_PAWN_RANK, PAWN_CAPTURE_FILES, WHITE_PAWN_RANK};
use crate::types::*;

/// Generate pawn moves from a given square
///
/// # Arguments
///
/// * `position` - The current position
/// * `from` - Square the pawn stands on
/// * `color` - Color of the pawn
/// * `attack_only` - Report both diagonals as attacked and skip pushes
/// * `moves` - Output set to add destinations to
///
/// # Examples
///
/// ```rust,ignore
/// let mut moves = BTreeSet::new();
/// generate_pawn_moves(&position, "e2".parse()?, Color::White, false, &mut moves);
/// // e3, e4 and any diagonal captures
/// ```
pub fn generate_pawn_moves(
    position: &Position,
    from: Square,
    color: Color,
    attack_only: bool,
    moves: &mut BTreeSet<Square>,
) {
    let forward = color.forward();

    for file_delta in PAWN_CAPTURE_FILES {
        let Some(target) = from.offset((file_delta, forward)) else {
            continue;
        };
        if attack_only {
            moves.insert(target);
        } else if position.color_at(target) == Some(color.opposite()) {
            moves.insert(target);
        }
    }

    if attack_only {
        return;
    }

    let Some(single) = from.offset((0, forward)) else {
        return;
    };
    if !position.is_empty(single) {
        return;
    }
    moves.insert(single);

    let start_rank = match color {
        Color::White => WHITE_PAWN_RANK,
        Color::Black => BLACK_PAWN_RANK,
    };
    if from.rank() == start_rank {
        if let Some(double) = from.offset((0, 2 * forward)) {
            if position.is_empty(double) {
                moves.insert(double);
            }
        }
    }
}
