//! Best-effort chess rules for Custom-mode positions
//!
//! Implements legal-move filtering, mate/stalemate detection, status derivation
//! and move application directly on [`Position`], without requiring the
//! position to be a reachable chess game.
//!
//! # Leniency
//!
//! - **No king, no forced legality**: a move is legal when the mover's king is
//!   absent after the move, or present and not attacked. Editor positions
//!   without a king therefore allow every pseudo-legal move.
//! - **Auto-queen**: a pawn reaching rank 1 or 8 becomes a queen unless the
//!   request names another promotion piece.
//! - **Turn toggle**: every accepted move flips the side to move, whichever
//!   piece moved.
//!
//! # Module Structure
//!
//! - `legal_moves` / `legal_moves_for` - King-safety filter over [`crate::move_gen`]
//! - `is_checkmate` / `is_stalemate` / `custom_status` - Status derivation
//! - `apply_custom` - Validated move application

use std::collections::BTreeSet;

use tracing::debug;

use crate::board::Position;
use crate::move_gen::{is_attacked, is_in_check, king_square, pseudo_moves};
use crate::types::*;

/// Legal destinations for the piece on `square`
///
/// For each pseudo-legal destination the move is simulated on a copy of the
/// position. The destination is kept when the moving side has no king after
/// the move, or its king is not attacked by the opposite color.
///
/// # Examples
///
/// ```rust,ignore
/// let position = fen::decode("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1");
/// // The king may not stay on the e-file
/// let moves = legal_moves("e1".parse()?, &position);
/// ```
pub fn legal_moves(square: Square, position: &Position) -> BTreeSet<Square> {
    let Some(piece) = position.piece_at(square) else {
        return BTreeSet::new();
    };

    pseudo_moves(square, position, false)
        .into_iter()
        .filter(|&to| leaves_king_safe(position, square, to, piece.color))
        .collect()
}

fn leaves_king_safe(position: &Position, from: Square, to: Square, color: Color) -> bool {
    let after = position.relocate(from, to);
    match king_square(&after, color) {
        None => true,
        Some(king) => !is_attacked(king, color.opposite(), &after),
    }
}

/// Every legal `(from, to)` pair for one side
pub fn legal_moves_for(color: Color, position: &Position) -> Vec<(Square, Square)> {
    position
        .pieces_of(color)
        .flat_map(|(from, _)| legal_moves(from, position).into_iter().map(move |to| (from, to)))
        .collect()
}

/// Whether `color` has at least one legal move (stops at the first)
pub fn has_any_legal_move(position: &Position, color: Color) -> bool {
    position
        .pieces_of(color)
        .any(|(from, _)| !legal_moves(from, position).is_empty())
}

/// King exists, is attacked, and no piece of `color` has a legal move
pub fn is_checkmate(position: &Position, color: Color) -> bool {
    match king_square(position, color) {
        Some(king) => {
            is_attacked(king, color.opposite(), position) && !has_any_legal_move(position, color)
        }
        None => false,
    }
}

/// King exists, is not attacked, and no piece of `color` has a legal move
pub fn is_stalemate(position: &Position, color: Color) -> bool {
    match king_square(position, color) {
        Some(king) => {
            !is_attacked(king, color.opposite(), position) && !has_any_legal_move(position, color)
        }
        None => false,
    }
}

/// Both kings present and nothing else on the board
fn is_bare_kings(position: &Position) -> bool {
    position.piece_count() == 2
        && king_square(position, Color::White).is_some()
        && king_square(position, Color::Black).is_some()
}

/// Status of the side to move
///
/// Checked in order: checkmate, stalemate, bare kings (draw), check, normal.
pub fn custom_status(position: &Position) -> Status {
    let side = position.side_to_move();

    if is_checkmate(position, side) {
        Status::Checkmate(side.opposite())
    } else if is_stalemate(position, side) {
        Status::Stalemate
    } else if is_bare_kings(position) {
        Status::Draw
    } else if is_in_check(position, side) {
        Status::Check(side)
    } else {
        Status::Normal
    }
}

/// Apply a move request to a Custom-mode position
///
/// The request is accepted iff its destination is among
/// [`legal_moves`]`(mv.from, position)`. On acceptance the piece is moved,
/// a pawn landing on the back rank is promoted (requested kind, else queen),
/// and the side to move flips.
///
/// # Returns
///
/// `None` for a rejected request, leaving `position` untouched. Otherwise the
/// new position and the [`AppliedMove`] to record; its `mv.promotion` is set
/// exactly when a promotion happened.
pub fn apply_custom(position: &Position, mv: &Move) -> Option<(Position, AppliedMove)> {
    let Some(piece) = position.piece_at(mv.from) else {
        debug!("[CUSTOM] Rejected {}: no piece on {}", mv, mv.from);
        return None;
    };
    if !legal_moves(mv.from, position).contains(&mv.to) {
        debug!("[CUSTOM] Rejected {}: not a legal destination", mv);
        return None;
    }

    let captured = position.piece_at(mv.to);
    let mut next = position.relocate(mv.from, mv.to);

    let promotion = (piece.kind == PieceKind::Pawn && mv.to.is_back_rank()).then(|| {
        mv.promotion
            .filter(|kind| kind.is_promotion_target())
            .unwrap_or(PieceKind::Queen)
    });
    if let Some(kind) = promotion {
        next.put(mv.to, Piece::new(piece.color, kind));
    }
    next.set_side_to_move(position.side_to_move().opposite());

    let recorded = Move {
        promotion,
        ..mv.clone()
    };
    Some((
        next,
        AppliedMove {
            mv: recorded,
            piece,
            captured,
        },
    ))
}

#[cfg(test)]
mod tests;
