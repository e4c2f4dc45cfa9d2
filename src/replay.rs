//! Move-text replay
//!
//! Turns pasted or stored move text into a move list for a given starting
//! position, in two stages:
//!
//! 1. **Strict**: the whole text is read as standard notation (SAN or
//!    coordinate tokens, move numbers and results skipped) by the rules
//!    authority, each move checked against the position reached so far.
//! 2. **Fallback**: when stage 1 fails or finds nothing, whitespace tokens
//!    are read as raw coordinates at face value. Nothing is validated here;
//!    the session rejects illegal moves when they are applied.

use chess_engine::{Move, PieceKind, Square};
use tracing::debug;

use crate::strict::StrictRules;

/// Minimum token length the fallback reads (`e2e4`)
const MIN_COORDINATE_LEN: usize = 4;

/// Move list for `text` played from the position `start_text`
///
/// # Examples
///
/// ```rust,ignore
/// let moves = replay(START_FEN, "1. e4 e5 2. Nf3");
/// assert_eq!(moves[2].to_string(), "g1f3");
///
/// // Not notation: read as coordinates, unreadable tokens dropped
/// let moves = replay(START_FEN, "1. garbage_token e2e4 c7c8q");
/// assert_eq!(moves.len(), 2);
/// ```
pub fn replay(start_text: &str, text: &str) -> Vec<Move> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    match StrictRules::from_fen(start_text).and_then(|rules| rules.parse_notation(text)) {
        Ok(moves) if !moves.is_empty() => {
            debug!("[REPLAY] Parsed {} moves as notation", moves.len());
            moves
        }
        Ok(_) => {
            debug!("[REPLAY] Notation parse found no moves, reading coordinates");
            parse_coordinates(text)
        }
        Err(e) => {
            debug!("[REPLAY] {}, reading coordinates", e);
            parse_coordinates(text)
        }
    }
}

/// Read every whitespace token as `<from><to>[promotion]`
///
/// Tokens shorter than four characters are skipped, as are tokens whose first
/// four characters are not two square names. Characters after the fifth are
/// ignored; an unknown promotion letter reads as no promotion.
pub fn parse_coordinates(text: &str) -> Vec<Move> {
    text.split_whitespace()
        .filter_map(parse_coordinate_token)
        .collect()
}

fn parse_coordinate_token(token: &str) -> Option<Move> {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < MIN_COORDINATE_LEN {
        debug!("[REPLAY] Skipping short token {:?}", token);
        return None;
    }

    let square = |range: std::ops::Range<usize>| -> Option<Square> {
        chars[range].iter().collect::<String>().parse().ok()
    };
    let (Some(from), Some(to)) = (square(0..2), square(2..4)) else {
        debug!("[REPLAY] Skipping token {:?}: not coordinates", token);
        return None;
    };

    let mut mv = Move::new(from, to);
    mv.promotion = chars.get(4).copied().and_then(PieceKind::from_letter);
    Some(mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::constants::START_FEN;

    fn coordinates(moves: &[Move]) -> Vec<String> {
        moves.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_replay_standard_notation() {
        let moves = replay(START_FEN, "1. e4 c5 2. Nf3 d6 3. d4 cxd4");
        assert_eq!(
            coordinates(&moves),
            ["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4"]
        );
        assert_eq!(moves[5].label.as_deref(), Some("cxd4"));
    }

    #[test]
    fn test_replay_garbage_falls_back() {
        //! `1.` is too short, `garbage_token` starts with `ga` (not a square)
        let moves = replay(START_FEN, "1. garbage_token e2e4 c7c8q");
        assert_eq!(coordinates(&moves), ["e2e4", "c7c8q"]);
        assert_eq!(moves[1].promotion, Some(PieceKind::Queen));
        assert!(moves.iter().all(|m| m.label.is_none()));
    }

    #[test]
    fn test_replay_empty_text() {
        assert!(replay(START_FEN, "").is_empty());
        assert!(replay(START_FEN, "   \n\t").is_empty());
    }

    #[test]
    fn test_replay_only_move_numbers_uses_fallback() {
        //! Strict parse succeeds with zero moves; fallback skips short tokens too
        assert!(replay(START_FEN, "1. 2. *").is_empty());
    }

    #[test]
    fn test_replay_malformed_start_uses_coordinates() {
        //! No kings: strict mode refuses the position, coordinates still read
        let moves = replay("8/8/8/8/8/8/4P3/8 w - - 0 1", "e2e4 Nf3");
        assert_eq!(coordinates(&moves), ["e2e4"]);
    }

    #[test]
    fn test_parse_coordinates_face_value() {
        let moves = parse_coordinates("e2e4 a7a8n h2h1qx e2 zz99 b1c3x");
        assert_eq!(coordinates(&moves), ["e2e4", "a7a8n", "h2h1q", "b1c3"]);
    }
}
