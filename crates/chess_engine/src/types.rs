//! # Chess Engine Core Types
//!
//! ## Overview
//!
//! Value types shared by the codec, the move generator and the session layer:
//!
//! - [`Square`]: a file/rank pair, always addressed by its two-character name
//! - [`Color`], [`PieceKind`], [`Piece`]: immutable `Copy` values
//! - [`Move`]: one ply as coordinates plus optional promotion and label
//! - [`AppliedMove`]: a move as recorded in history, with the mover and capture
//! - [`Status`]: derived game status, recomputed on demand
//!
//! ### Why a map key instead of a 0-63 index?
//!
//! Positions coming from the freeform editor are sparse and frequently
//! malformed (missing kings, pawns on the back rank). Keying the board by
//! [`Square`] keeps every lookup explicit and lets the board be an ordered map
//! that only holds occupied squares.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::error::{ChessEngineError, ChessEngineResult};

/// Side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Side-to-move token used in position text
    pub fn letter(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Direction pawns of this color advance in, as a rank delta
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Piece type, independent of color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Lowercase letter (`k q r b n p`)
    pub fn letter(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }

    /// Parse a piece letter, ignoring case
    pub fn from_letter(letter: char) -> Option<PieceKind> {
        match letter.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            'p' => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    /// Kinds a pawn may promote to
    pub fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

/// A colored piece
///
/// Pieces never change in place: a move re-associates the piece with a new
/// square, and a promotion replaces it with a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Letter as used in position text: uppercase for white, lowercase for black
    pub fn letter(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    /// Parse a position-text letter; case selects the color
    pub fn from_letter(letter: char) -> ChessEngineResult<Piece> {
        let kind = PieceKind::from_letter(letter).ok_or(ChessEngineError::InvalidPiece { letter })?;
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(color, kind))
    }
}

/// A board square
///
/// Ordered rank-major (a1, b1, ..., h1, a2, ...) so that boards iterate
/// deterministically. Serialized as its name, e.g. `"e4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Build a square from 0-based file and rank
    ///
    /// Callers pass coordinates already known to be on the board; use
    /// [`Square::from_coords`] for anything computed.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < BOARD_SIZE && rank < BOARD_SIZE);
        Self { rank, file }
    }

    /// Build a square from signed coordinates, `None` when off the board
    #[inline]
    pub fn from_coords(file: i8, rank: i8) -> Option<Square> {
        let size = BOARD_SIZE as i8;
        if (0..size).contains(&file) && (0..size).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// 0-based file (`a` = 0)
    #[inline]
    pub fn file(self) -> u8 {
        self.file
    }

    /// 0-based rank (rank `1` = 0)
    #[inline]
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Step by a `(file_delta, rank_delta)` pair, `None` when leaving the board
    #[inline]
    pub fn offset(self, delta: (i8, i8)) -> Option<Square> {
        Square::from_coords(self.file as i8 + delta.0, self.rank as i8 + delta.1)
    }

    /// Rank 1 or rank 8
    #[inline]
    pub fn is_back_rank(self) -> bool {
        self.rank == 0 || self.rank == BOARD_SIZE - 1
    }

    /// All 64 squares in rank-major order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| Square::new(file, rank)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = ChessEngineError;

    fn from_str(text: &str) -> ChessEngineResult<Square> {
        let invalid = || ChessEngineError::InvalidSquare {
            text: text.to_string(),
        };
        let mut chars = text.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }
        Ok(Square::new(file as u8 - b'a', rank as u8 - b'1'))
    }
}

impl TryFrom<String> for Square {
    type Error = ChessEngineError;

    fn try_from(text: String) -> ChessEngineResult<Square> {
        text.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> String {
        square.to_string()
    }
}

/// A single ply: origin, destination, optional promotion and display label
///
/// Carries no board reference; legality is always decided against the
/// position it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            label: None,
        }
    }

    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Same origin, destination and promotion, ignoring the label
    pub fn same_coordinates(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl fmt::Display for Move {
    /// Coordinate text: `e2e4`, `c7c8q`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ChessEngineError;

    /// Parse exact coordinate text (four or five characters)
    fn from_str(text: &str) -> ChessEngineResult<Move> {
        let invalid = || ChessEngineError::InvalidMove {
            text: text.to_string(),
        };
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }
        let from: Square = text[0..2].parse().map_err(|_| invalid())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid())?;
        let mut mv = Move::new(from, to);
        if let Some(letter) = text[4..].chars().next() {
            mv.promotion = Some(PieceKind::from_letter(letter).ok_or_else(invalid)?);
        }
        Ok(mv)
    }
}

/// A move as recorded in history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    #[serde(rename = "move")]
    pub mv: Move,
    /// Piece standing on the origin square before the move
    pub piece: Piece,
    /// Piece removed from the destination square, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<Piece>,
}

/// Derived game status for the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "color", rename_all = "lowercase")]
pub enum Status {
    Normal,
    /// The given color is in check
    Check(Color),
    /// Checkmate; carries the winning color
    Checkmate(Color),
    Stalemate,
    Draw,
}

impl Status {
    /// Checkmate, stalemate or draw
    pub fn is_game_over(self) -> bool {
        matches!(self, Status::Checkmate(_) | Status::Stalemate | Status::Draw)
    }
}
