//! # Chess Engine Constants - Direction Tables & Position Text Defaults
//!
//! ## Direction Vectors for Move Generation
//!
//! Boards are sparse maps keyed by [`crate::types::Square`], so movement is
//! expressed as `(file_delta, rank_delta)` pairs instead of linear array offsets:
//!
//! - **North**: `(0, 1)` (toward rank 8)
//! - **South**: `(0, -1)`
//! - **East**: `(1, 0)` (toward the h-file)
//! - **West**: `(-1, 0)`
//! - **Diagonals**: combinations of the above
//!
//! A step that leaves the board is rejected by [`crate::types::Square::offset`],
//! which replaces the wrap-around checks a 0-63 index encoding needs.
//!
//! ### Knight Moves: The "L-Shape" Pattern
//!
//! Knights jump rather than slide: two squares along one axis and one square
//! along the other, giving the eight pairs in [`KNIGHT_OFFSETS`].

pub const N: (i8, i8) = (0, 1);
pub const S: (i8, i8) = (0, -1);
pub const O: (i8, i8) = (1, 0);
pub const W: (i8, i8) = (-1, 0);
pub const NO: (i8, i8) = (1, 1);
pub const NW: (i8, i8) = (-1, 1);
pub const SO: (i8, i8) = (1, -1);
pub const SW: (i8, i8) = (-1, -1);

pub const ROOK_DIRS: [(i8, i8); 4] = [N, O, S, W];
pub const BISHOP_DIRS: [(i8, i8); 4] = [NO, SO, NW, SW];
pub const QUEEN_DIRS: [(i8, i8); 8] = [N, O, S, W, NO, SO, NW, SW];
pub const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRS;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Pawn diagonals, relative to the pawn's forward direction
pub const PAWN_CAPTURE_FILES: [i8; 2] = [-1, 1];

pub const BOARD_SIZE: u8 = 8;

/// Rank index (0-based) where unmoved white pawns stand
pub const WHITE_PAWN_RANK: u8 = 1;
/// Rank index (0-based) where unmoved black pawns stand
pub const BLACK_PAWN_RANK: u8 = 6;

/// Standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Castling, en passant and clock fields, always emitted as defaults
pub const PLACEHOLDER_FIELDS: &str = "- - 0 1";

pub const RANK_SEPARATOR: char = '/';
