//! Test suite for the Custom-mode rules
//!
//! Verifies king-safety filtering, mate/stalemate detection and move
//! application, including the lenient paths for editor positions that are
//! missing a king.
//!
//! # Test Organization
//!
//! - `test_legal_*` - Legal-move filtering and the legal ⊆ pseudo-legal law
//! - `test_status_*` - Checkmate, stalemate, draw and check derivation
//! - `test_apply_*` - Move application, promotion and rejection

use std::collections::BTreeSet;

use super::*;
use crate::constants::START_FEN;
use crate::fen::{decode, encode};
use crate::move_gen::pseudo_moves;

fn sq(text: &str) -> Square {
    text.parse().unwrap()
}

fn mv(text: &str) -> Move {
    text.parse().unwrap()
}

fn squares(names: &[&str]) -> BTreeSet<Square> {
    names.iter().map(|name| sq(name)).collect()
}

const SAMPLE_POSITIONS: [&str; 7] = [
    START_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1",
    "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1",
    "8/8/8/8/8/8/8/4K2R b - - 0 1",
    "4P3/8/3k4/8/8/3K4/8/4p3 w - - 0 1",
    "8/8/8/8/8/8/8/8 w - - 0 1",
];

// ============================================================================
// Legal Move Tests
// ============================================================================

#[test]
fn test_legal_moves_are_pseudo_legal() {
    //! Every legal destination must also be a pseudo-legal destination
    for text in SAMPLE_POSITIONS {
        let position = decode(text);
        for (&square, _) in position.pieces() {
            let pseudo = pseudo_moves(square, &position, false);
            let legal = legal_moves(square, &position);
            assert!(
                legal.is_subset(&pseudo),
                "{square} in {text:?}: {legal:?} not within {pseudo:?}"
            );
        }
    }
}

#[test]
fn test_legal_pinned_rook_stays_on_file() {
    let position = decode("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1");
    assert_eq!(
        legal_moves(sq("e2"), &position),
        squares(&["e3", "e4", "e5", "e6", "e7"])
    );
}

#[test]
fn test_legal_king_cannot_walk_into_attack() {
    let position = decode("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1");
    // d2 rook covers d1, the whole second rank; capturing it is safe
    assert_eq!(legal_moves(sq("e1"), &position), squares(&["d2", "f1"]));
}

#[test]
fn test_legal_without_king_allows_everything() {
    //! No king on the mover's side: every pseudo-legal move is legal
    let position = decode("4k3/4r3/8/8/8/8/4R3/8 w - - 0 1");
    assert_eq!(
        legal_moves(sq("e2"), &position),
        pseudo_moves(sq("e2"), &position, false)
    );
}

#[test]
fn test_legal_moves_for_side_without_king() {
    //! White king and pieces, no black king, black to move: queries still answer
    let position = decode("8/8/8/8/8/8/8/4K2R b - - 0 1");
    assert!(legal_moves_for(Color::Black, &position).is_empty());
    assert!(!legal_moves(sq("h1"), &position).is_empty());
    assert!(!is_checkmate(&position, Color::Black));
    assert!(!is_stalemate(&position, Color::Black));
    assert_eq!(custom_status(&position), Status::Normal);
}

#[test]
fn test_legal_empty_square() {
    assert!(legal_moves(sq("e4"), &Position::starting()).is_empty());
}

#[test]
fn test_legal_moves_for_starting_position() {
    assert_eq!(legal_moves_for(Color::White, &Position::starting()).len(), 20);
    assert!(has_any_legal_move(&Position::starting(), Color::Black));
}

// ============================================================================
// Status Tests
// ============================================================================

#[test]
fn test_status_queen_checkmate() {
    //! Lone black king in the corner, queen on g7 protected by the king on f6
    let position = decode("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1");
    assert!(is_checkmate(&position, Color::Black));
    assert!(!is_stalemate(&position, Color::Black));
    assert_eq!(custom_status(&position), Status::Checkmate(Color::White));
}

#[test]
fn test_status_unprotected_queen_is_not_mate() {
    let position = decode("7k/6Q1/8/8/8/8/8/K7 b - - 0 1");
    assert!(!is_checkmate(&position, Color::Black));
    assert_eq!(custom_status(&position), Status::Check(Color::Black));
}

#[test]
fn test_status_stalemate() {
    let position = decode("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(is_stalemate(&position, Color::Black));
    assert_eq!(custom_status(&position), Status::Stalemate);
}

#[test]
fn test_status_bare_kings_draw() {
    let position = decode("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(custom_status(&position), Status::Draw);
}

#[test]
fn test_status_check_and_normal() {
    let position = decode("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1");
    assert_eq!(custom_status(&position), Status::Check(Color::Black));
    assert_eq!(custom_status(&Position::starting()), Status::Normal);
}

#[test]
fn test_status_empty_board() {
    let position = decode("8/8/8/8/8/8/8/8 w - - 0 1");
    assert_eq!(custom_status(&position), Status::Normal);
}

// ============================================================================
// Move Application Tests
// ============================================================================

#[test]
fn test_apply_pawn_push() {
    let position = Position::starting();
    let (next, applied) = apply_custom(&position, &mv("e2e4")).expect("e2e4 is legal");

    assert!(next.is_empty(sq("e2")));
    assert_eq!(next.piece_at(sq("e4")), Some(Piece::new(Color::White, PieceKind::Pawn)));
    assert_eq!(next.side_to_move(), Color::Black);
    assert_eq!(applied.piece, Piece::new(Color::White, PieceKind::Pawn));
    assert_eq!(applied.captured, None);
    assert_eq!(applied.mv, mv("e2e4"));
}

#[test]
fn test_apply_rejects_illegal_without_changes() {
    let position = Position::starting();
    let before = position.clone();

    assert!(apply_custom(&position, &mv("e2e5")).is_none());
    assert!(apply_custom(&position, &mv("e1e2")).is_none());
    assert!(apply_custom(&position, &mv("e4e5")).is_none(), "Empty origin");
    assert_eq!(position, before);
}

#[test]
fn test_apply_on_empty_board_rejects_everything() {
    let position = decode("8/8/8/8/8/8/8/8 w - - 0 1");
    for from in Square::all() {
        for to in [sq("a1"), sq("e4"), sq("h8")] {
            assert!(apply_custom(&position, &Move::new(from, to)).is_none());
        }
    }
}

#[test]
fn test_apply_capture_records_victim() {
    let position = decode("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
    let (next, applied) = apply_custom(&position, &mv("e4d5")).unwrap();
    assert_eq!(applied.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
    assert_eq!(next.piece_count(), 3);
}

#[test]
fn test_apply_auto_promotes_to_queen() {
    let position = decode("8/2P5/8/8/8/8/8/k6K w - - 0 1");
    let (next, applied) = apply_custom(&position, &mv("c7c8")).unwrap();

    assert_eq!(next.piece_at(sq("c8")), Some(Piece::new(Color::White, PieceKind::Queen)));
    assert_eq!(applied.mv.promotion, Some(PieceKind::Queen));
    assert_eq!(applied.piece.kind, PieceKind::Pawn);
}

#[test]
fn test_apply_explicit_underpromotion() {
    let position = decode("8/2P5/8/8/8/8/8/k6K w - - 0 1");
    let (next, _) = apply_custom(&position, &mv("c7c8n")).unwrap();
    assert_eq!(next.piece_at(sq("c8")), Some(Piece::new(Color::White, PieceKind::Knight)));

    let (next, applied) = apply_custom(&position, &mv("c7c8k")).unwrap();
    assert_eq!(next.piece_at(sq("c8")), Some(Piece::new(Color::White, PieceKind::Queen)));
    assert_eq!(applied.mv.promotion, Some(PieceKind::Queen));
}

#[test]
fn test_apply_black_promotion() {
    let position = decode("k6K/8/8/8/8/8/5p2/8 b - - 0 1");
    let (next, _) = apply_custom(&position, &mv("f2f1")).unwrap();
    assert_eq!(next.piece_at(sq("f1")), Some(Piece::new(Color::Black, PieceKind::Queen)));
    assert_eq!(next.side_to_move(), Color::White);
}

#[test]
fn test_apply_promotion_letter_ignored_off_back_rank() {
    let (_, applied) = apply_custom(&Position::starting(), &mv("e2e4q")).unwrap();
    assert_eq!(applied.mv.promotion, None);
}

#[test]
fn test_apply_toggles_side_whichever_piece_moved() {
    //! The side to move flips on every accepted move, even when the mover
    //! belongs to the other side (editor sessions move pieces freely)
    let position = Position::starting();
    let (next, _) = apply_custom(&position, &mv("e7e5")).unwrap();
    assert_eq!(next.side_to_move(), Color::Black);
}

#[test]
fn test_apply_roundtrips_through_codec() {
    let mut position = Position::starting();
    for text in ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"] {
        position = apply_custom(&position, &mv(text)).unwrap().0;
        assert_eq!(decode(&encode(&position)), position);
    }
}
