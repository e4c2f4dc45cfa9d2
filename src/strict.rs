//! Strict mode: delegation to the standard rules authority
//!
//! Wraps [`shakmaty::Chess`] so that well-formed positions get complete chess
//! rules (castling, en passant, insufficient material) without this crate
//! reimplementing them. The adapter only converts between the engine crate's
//! [`Square`]/[`Move`] values and the authority's move objects.
//!
//! # Coordinate System
//!
//! - **Engine squares**: `(file, rank)`, both 0-7
//! - **Authority squares**: index 0-63 where `index = rank * 8 + file`
//!
//! Castling is expressed as the king's two-square step (`e1g1`), matching the
//! coordinate text used everywhere else.

use std::collections::BTreeSet;

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position as _, Role};
use thiserror::Error;
use tracing::debug;

use chess_engine::{AppliedMove, Color, Move, Piece, PieceKind, Position, Square, Status};

use crate::rules::Rules;

/// Why the authority refused a position or a piece of notation
///
/// These values select the Custom/fallback paths; they never cross the public
/// session boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrictError {
    /// Position text is not valid FEN
    #[error("Invalid FEN: {message}")]
    Fen { message: String },

    /// FEN parsed but does not describe a legal chess position
    #[error("Position rejected by rules authority: {message}")]
    Position { message: String },

    /// A notation token is neither SAN nor a legal coordinate move
    #[error("Unparseable or illegal move token {token:?}")]
    Notation { token: String },
}

/// Result type alias for strict-mode operations
pub type StrictResult<T> = Result<T, StrictError>;

/// Plies without capture or pawn move after which the game is drawn
const FIFTY_MOVE_PLIES: u32 = 100;

/// Occurrences of one position that draw the game
const REPETITION_LIMIT: usize = 3;

/// Well-formed position backed by the rules authority
///
/// Carries the hashes of the positions reached since the last capture or
/// pawn move, so repetition is judged over the line actually played.
#[derive(Debug, Clone)]
pub struct StrictRules {
    chess: Chess,
    seen: Vec<Zobrist64>,
}

impl StrictRules {
    /// Accept `text` only if it is a valid, legal chess position
    ///
    /// Stale castling rights (a flag whose king or rook has left its square)
    /// and an impossible en passant square are dropped rather than refused;
    /// editor text routinely carries a default `KQkq`.
    ///
    /// # Errors
    ///
    /// [`StrictError::Fen`] for unparseable text, [`StrictError::Position`] for
    /// positions such as missing kings or pawns on the back rank.
    pub fn from_fen(text: &str) -> StrictResult<Self> {
        let fen = Fen::from_ascii(text.trim().as_bytes()).map_err(|err| StrictError::Fen {
            message: err.to_string(),
        })?;
        let chess = fen
            .into_position::<Chess>(CastlingMode::Standard)
            .or_else(|err| err.ignore_invalid_castling_rights())
            .or_else(|err| err.ignore_invalid_ep_square())
            .map_err(|err| StrictError::Position {
                message: err.to_string(),
            })?;
        Ok(Self::new(chess))
    }

    fn new(chess: Chess) -> Self {
        let seen = vec![position_hash(&chess)];
        Self { chess, seen }
    }

    /// Times the current position has occurred in the played line
    pub fn repetitions(&self) -> usize {
        let current = position_hash(&self.chess);
        self.seen.iter().filter(|&&hash| hash == current).count()
    }

    /// Parse a whole move sequence in standard notation
    ///
    /// Move numbers (`1.`, `12...`, `3.e4`) and game results are skipped. Each
    /// remaining token must be SAN or a coordinate move legal in the position
    /// reached so far; the first one that is not aborts the parse.
    ///
    /// Returned moves are in coordinate form, labelled with the token as written.
    pub fn parse_notation(&self, text: &str) -> StrictResult<Vec<Move>> {
        let mut chess = self.chess.clone();
        let mut moves = Vec::new();

        for raw in text.split_whitespace() {
            let Some(token) = strip_move_number(raw) else {
                continue;
            };
            if is_result_token(token) {
                continue;
            }

            let resolved = parse_token(&chess, token).ok_or_else(|| StrictError::Notation {
                token: raw.to_string(),
            })?;
            moves.push(coordinate_move(&resolved).with_label(token));
            chess.play_unchecked(&resolved);
        }

        Ok(moves)
    }

    /// Find the authority's move for a coordinate request
    ///
    /// Tries the request as given, then without a promotion letter, then as a
    /// queen promotion, so `e7e8` promotes and a stray letter on a quiet move
    /// is ignored, the same way Custom mode treats them.
    fn resolve(&self, mv: &Move) -> Option<shakmaty::Move> {
        let from = to_authority_square(mv.from);
        let to = to_authority_square(mv.to);
        let requested = mv.promotion.map(to_role);

        [requested, None, Some(Role::Queen)]
            .into_iter()
            .find_map(|promotion| {
                UciMove::Normal {
                    from,
                    to,
                    promotion,
                }
                .to_move(&self.chess)
                .ok()
            })
    }
}

impl Rules for StrictRules {
    fn position(&self) -> Position {
        let board = self.chess.board();
        let mut position = Position::empty(from_color(self.chess.turn()));
        for square in board.occupied() {
            if let Some(piece) = board.piece_at(square) {
                position.put(
                    from_authority_square(square),
                    Piece::new(from_color(piece.color), from_role(piece.role)),
                );
            }
        }
        position
    }

    fn legal_moves(&self, square: Square) -> BTreeSet<Square> {
        let origin = to_authority_square(square);
        self.chess
            .legal_moves()
            .iter()
            .filter(|m| m.from() == Some(origin))
            .map(|m| coordinate_move(m).to)
            .collect()
    }

    fn apply(&self, mv: &Move) -> Option<(Self, AppliedMove)> {
        let Some(resolved) = self.resolve(mv) else {
            debug!("[STRICT] Rejected {}: not legal in this position", mv);
            return None;
        };

        let mover = from_color(self.chess.turn());
        let piece = Piece::new(mover, from_role(resolved.role()));
        let captured = resolved
            .capture()
            .map(|role| Piece::new(mover.opposite(), from_role(role)));
        let mut recorded = coordinate_move(&resolved);
        recorded.label = mv.label.clone();

        let mut chess = self.chess.clone();
        chess.play_unchecked(&resolved);

        let mut seen = if chess.halfmoves() == 0 {
            Vec::new()
        } else {
            self.seen.clone()
        };
        seen.push(position_hash(&chess));

        Some((
            Self { chess, seen },
            AppliedMove {
                mv: recorded,
                piece,
                captured,
            },
        ))
    }

    fn status(&self) -> Status {
        let side = from_color(self.chess.turn());
        if self.chess.is_checkmate() {
            Status::Checkmate(side.opposite())
        } else if self.chess.is_stalemate() {
            Status::Stalemate
        } else if self.chess.is_insufficient_material()
            || self.chess.halfmoves() >= FIFTY_MOVE_PLIES
            || self.repetitions() >= REPETITION_LIMIT
        {
            Status::Draw
        } else if self.chess.is_check() {
            Status::Check(side)
        } else {
            Status::Normal
        }
    }

    fn encode(&self) -> String {
        Fen::from_position(self.chess.clone(), EnPassantMode::Legal).to_string()
    }
}

fn position_hash(chess: &Chess) -> Zobrist64 {
    chess.zobrist_hash(EnPassantMode::Legal)
}

/// `1.` -> skip, `12...` -> skip, `3.e4` -> `e4`, anything else unchanged
fn strip_move_number(token: &str) -> Option<&str> {
    let rest = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == token.len() || !rest.starts_with('.') {
        return Some(token);
    }
    let rest = rest.trim_start_matches('.');
    (!rest.is_empty()).then_some(rest)
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn parse_token(chess: &Chess, token: &str) -> Option<shakmaty::Move> {
    let bytes = token.as_bytes();
    if let Ok(san) = SanPlus::from_ascii(bytes) {
        if let Ok(m) = san.san.to_move(chess) {
            return Some(m);
        }
    }
    UciMove::from_ascii(bytes).ok()?.to_move(chess).ok()
}

/// Coordinate form of an authority move (castling as the king's step)
fn coordinate_move(m: &shakmaty::Move) -> Move {
    match m.to_uci(CastlingMode::Standard) {
        UciMove::Normal {
            from,
            to,
            promotion,
        } => {
            let mut mv = Move::new(from_authority_square(from), from_authority_square(to));
            mv.promotion = promotion.map(from_role);
            mv
        }
        _ => {
            let to = from_authority_square(m.to());
            Move::new(m.from().map(from_authority_square).unwrap_or(to), to)
        }
    }
}

fn to_authority_square(square: Square) -> shakmaty::Square {
    shakmaty::Square::new(u32::from(square.rank()) * 8 + u32::from(square.file()))
}

fn from_authority_square(square: shakmaty::Square) -> Square {
    let index = u32::from(square);
    Square::new((index % 8) as u8, (index / 8) as u8)
}

fn from_color(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

fn from_role(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn to_role(kind: PieceKind) -> Role {
    match kind {
        PieceKind::Pawn => Role::Pawn,
        PieceKind::Knight => Role::Knight,
        PieceKind::Bishop => Role::Bishop,
        PieceKind::Rook => Role::Rook,
        PieceKind::Queen => Role::Queen,
        PieceKind::King => Role::King,
    }
}
