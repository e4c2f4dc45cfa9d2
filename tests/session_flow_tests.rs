//! Session Flow Integration Tests
//!
//! Tests for full tutoring sessions including:
//! - Mode selection (Strict vs Custom)
//! - Move application and status derivation
//! - Undo, redo, jump and history truncation
//! - Session records

use chess_tutor::fen::decode;
use chess_tutor::{
    Color, GameSession, Mode, Move, Piece, PieceKind, Position, SessionRecord, Square, Status,
};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const EMPTY_FEN: &str = "8/8/8/8/8/8/8/8 w - - 0 1";

fn sq(text: &str) -> Square {
    text.parse().unwrap()
}

fn mv(text: &str) -> Move {
    text.parse().unwrap()
}

/// Apply every move, asserting each is accepted, and collect the positions
fn play_all(session: &mut GameSession, moves: &[&str]) -> Vec<Position> {
    moves
        .iter()
        .map(|text| {
            assert!(
                session.apply_move(mv(text)).is_some(),
                "{text} should be accepted in {}",
                session.fen()
            );
            session.position()
        })
        .collect()
}

// ============================================================================
// Basic Scenarios
// ============================================================================

#[test]
fn test_empty_board_session() {
    //! Empty placement: no pieces, white to move, every request rejected
    let mut session = GameSession::new(EMPTY_FEN);

    assert_eq!(session.mode(), Mode::Custom);
    assert!(session.position().pieces().is_empty());
    assert_eq!(session.side_to_move(), Color::White);
    for from in Square::all() {
        assert!(session.legal_moves(from).is_empty());
        assert_eq!(session.apply_move(Move::new(from, sq("e4"))), None);
    }
    assert!(session.moves().is_empty());
}

#[test]
fn test_starting_position_pawn_push() {
    let mut session = GameSession::new(START_FEN);
    assert_eq!(session.mode(), Mode::Strict);

    assert_eq!(session.apply_move(mv("e2e4")), Some(Status::Normal));
    let position = session.position();
    assert!(position.is_empty(sq("e2")));
    assert_eq!(
        position.piece_at(sq("e4")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    assert_eq!(position.side_to_move(), Color::Black);
}

#[test]
fn test_illegal_request_leaves_session_unchanged() {
    let mut session = GameSession::new(START_FEN);
    session.apply_move(mv("e2e4")).unwrap();
    let before = (session.position(), session.moves(), session.cursor());

    assert_eq!(session.apply_move(mv("e4e6")), None);
    assert_eq!(session.apply_move(mv("a1a5")), None);
    assert_eq!((session.position(), session.moves(), session.cursor()), before);
}

#[test]
fn test_checkmate_strict_and_custom() {
    //! Same mating net, once legal and once with a stray pawn on rank 1
    let strict = GameSession::new("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1");
    assert_eq!(strict.mode(), Mode::Strict);
    assert_eq!(strict.status(), Status::Checkmate(Color::White));

    let custom = GameSession::new("7k/6Q1/5K2/8/8/8/8/P7 b - - 0 1");
    assert_eq!(custom.mode(), Mode::Custom);
    assert_eq!(custom.status(), Status::Checkmate(Color::White));
}

#[test]
fn test_fools_mate_through_session() {
    let mut session = GameSession::new(START_FEN);
    play_all(&mut session, &["f2f3", "e7e5", "g2g4"]);
    assert_eq!(
        session.apply_move(mv("d8h4")),
        Some(Status::Checkmate(Color::Black))
    );
    assert!(session.status().is_game_over());
}

#[test]
fn test_missing_king_custom_queries() {
    //! White king and rook, no black king, black to move
    let session = GameSession::new("8/8/8/8/8/8/8/4K2R b - - 0 1");

    assert_eq!(session.mode(), Mode::Custom);
    assert_eq!(session.side_to_move(), Color::Black);
    assert!(!session.legal_moves(sq("h1")).is_empty());
    assert!(session.legal_moves(sq("e8")).is_empty());
    assert_eq!(session.status(), Status::Normal);
}

#[test]
fn test_custom_auto_promotion() {
    let mut session = GameSession::new("8/2P5/8/8/8/8/8/8 w - - 0 1");
    assert_eq!(session.mode(), Mode::Custom);

    session.apply_move(mv("c7c8")).unwrap();
    assert_eq!(
        session.position().piece_at(sq("c8")),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );
    assert_eq!(session.moves()[0].promotion, Some(PieceKind::Queen));
}

// ============================================================================
// Navigation Tests
// ============================================================================

#[test]
fn test_jump_matches_sequential_application() {
    //! jump_to(k) reproduces the position seen right after the k-th move
    let cases: [(&str, &[&str]); 2] = [
        (START_FEN, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"]),
        (
            "8/8/3k4/8/8/8/4P3/R7 w - - 0 1",
            &["a1a5", "d6e6", "e2e4", "e6f6", "a5a8"],
        ),
    ];

    for (start, moves) in cases {
        let mut session = GameSession::new(start);
        let positions = play_all(&mut session, moves);

        let tip = session.moves().len() as isize - 1;
        assert_eq!(session.jump_to(tip), positions[positions.len() - 1]);
        for (index, expected) in positions.iter().enumerate() {
            assert_eq!(&session.jump_to(index as isize), expected, "{start} ply {index}");
        }
        assert_eq!(session.jump_to(-1), decode(start));
        assert_eq!(session.moves().len(), moves.len(), "Jumping never edits the list");
    }
}

#[test]
fn test_jump_is_clamped() {
    let mut session = GameSession::new(START_FEN);
    let positions = play_all(&mut session, &["d2d4", "d7d5"]);

    assert_eq!(session.jump_to(50), positions[1]);
    assert_eq!(session.cursor(), 1);
    assert_eq!(session.jump_to(-50), Position::starting());
    assert_eq!(session.cursor(), -1);
}

#[test]
fn test_undo_then_reapply_restores_position() {
    let mut session = GameSession::new(START_FEN);
    play_all(&mut session, &["e2e4", "c7c5", "g1f3"]);
    let before_undo = session.position();

    let undone = session.undo().expect("There is a move to undo");
    assert_eq!(undone, mv("g1f3"));
    assert_ne!(session.position(), before_undo);

    session.apply_move(undone).unwrap();
    assert_eq!(session.position(), before_undo);
    assert_eq!(session.moves().len(), 3);
}

#[test]
fn test_apply_behind_tip_truncates_future() {
    let mut session = GameSession::new(START_FEN);
    play_all(&mut session, &["e2e4", "e7e5", "g1f3", "b8c6"]);

    session.jump_to(1);
    session.apply_move(mv("f1c4")).unwrap();

    let moves: Vec<String> = session.moves().iter().map(|m| m.to_string()).collect();
    assert_eq!(moves, ["e2e4", "e7e5", "f1c4"]);
    assert_eq!(session.cursor(), 2);
    assert_eq!(session.redo(), None);
}

#[test]
fn test_undo_redo_in_custom_mode() {
    let mut session = GameSession::new("8/8/8/8/8/8/4P3/R7 w - - 0 1");
    let positions = play_all(&mut session, &["a1a4", "e2e3"]);

    session.undo();
    session.undo();
    assert_eq!(session.undo(), None);
    assert_eq!(session.position(), decode("8/8/8/8/8/8/4P3/R7 w - - 0 1"));

    assert_eq!(session.redo(), Some(mv("a1a4")));
    assert_eq!(session.position(), positions[0]);
}

// ============================================================================
// Record Tests
// ============================================================================

#[test]
fn test_record_roundtrip_through_json() {
    let mut session = GameSession::new(START_FEN);
    play_all(&mut session, &["e2e4", "e7e5", "g1f3"]);
    session.jump_to(1);

    let json = serde_json::to_string(&session.record()).unwrap();
    let record: SessionRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(record.mode, Mode::Strict);
    assert_eq!(record.moves, ["e2e4", "e7e5", "g1f3"]);
    assert_eq!(record.cursor, 1);

    let restored = GameSession::from_record(&record);
    assert_eq!(restored.position(), session.position());
    assert_eq!(restored.cursor(), 1);
    assert_eq!(restored.moves(), session.moves());
    assert_eq!(restored.fen(), session.fen());
}

#[test]
fn test_record_restore_stops_at_bad_move() {
    let record = SessionRecord {
        mode: Mode::Custom,
        start: "8/8/8/8/8/8/4P3/R7 w - - 0 1".to_string(),
        moves: vec!["a1a4".to_string(), "nonsense".to_string(), "e2e3".to_string()],
        cursor: 2,
        position: String::new(),
    };

    let restored = GameSession::from_record(&record);
    assert_eq!(restored.mode(), Mode::Custom);
    assert_eq!(restored.moves(), [mv("a1a4")]);
    assert_eq!(restored.cursor(), 0);
}

#[test]
fn test_record_cursor_out_of_range_is_clamped() {
    //! Hand-edited records may carry any cursor; restoring never panics
    let mut session = GameSession::new(START_FEN);
    play_all(&mut session, &["e2e4", "e7e5"]);
    let mut record = session.record();

    record.cursor = 42;
    assert_eq!(GameSession::from_record(&record).cursor(), 1);

    record.cursor = -9;
    let restored = GameSession::from_record(&record);
    assert_eq!(restored.cursor(), -1);
    assert_eq!(restored.position(), Position::starting());
}

// ============================================================================
// Strict Rules Edge Cases
// ============================================================================

#[test]
fn test_stale_castling_rights_keep_strict_mode() {
    //! Editor text with a default `KQkq` although the a1 rook is missing
    let mut session = GameSession::new("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/4K2R w KQkq - 0 1");

    assert_eq!(session.mode(), Mode::Strict);
    assert!(session.legal_moves(sq("e1")).contains(&sq("g1")));
    assert!(session.apply_move(mv("e1g1")).is_some());
    assert_eq!(
        session.position().piece_at(sq("f1")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
}

#[test]
fn test_fifty_move_rule_draw() {
    let session = GameSession::new("4k3/8/8/8/8/8/8/R3K3 w - - 100 80");
    assert_eq!(session.mode(), Mode::Strict);
    assert_eq!(session.status(), Status::Draw);
}

#[test]
fn test_threefold_repetition_draw() {
    let mut session = GameSession::new(START_FEN);
    assert_eq!(session.load_moves("Nf3 Nf6 Ng1 Ng8 Nf3 Nf6 Ng1 Ng8"), 8);
    assert_eq!(session.status(), Status::Draw);

    // Stepping back leaves the third occurrence behind
    session.undo();
    assert_eq!(session.status(), Status::Normal);
    session.redo();
    assert_eq!(session.status(), Status::Draw);
}

#[test]
fn test_malformed_start_text_is_flagged() {
    let session = GameSession::new("4k3/8/8/8/8/8/PPPXPPPP/4K3 w - - 0 1");
    assert_eq!(session.mode(), Mode::Custom);
    assert!(!session.is_start_well_formed());

    assert!(GameSession::new(START_FEN).is_start_well_formed());
    assert!(GameSession::new(EMPTY_FEN).is_start_well_formed());
}
