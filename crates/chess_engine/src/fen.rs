//! Position text codec
//!
//! Converts between FEN-style position text and [`Position`].
//!
//! ## Leniency
//!
//! Custom-mode positions come from a freeform editor and are often partial, so
//! [`decode`] never fails:
//!
//! - a rank group with an unknown letter, or one that runs past the h-file,
//!   contributes no pieces (other ranks are kept)
//! - missing rank groups are empty ranks; groups past the eighth are ignored
//! - a missing or unknown side-to-move token means white
//!
//! [`encode`] always emits the castling/en passant/clock fields as
//! [`PLACEHOLDER_FIELDS`]; this core does not model them.

use tracing::debug;

use crate::board::Position;
use crate::constants::{BOARD_SIZE, PLACEHOLDER_FIELDS, RANK_SEPARATOR};
use crate::types::*;

/// Decode position text into a [`Position`]
///
/// # Arguments
///
/// * `text` - Placement section, then side-to-move token; further fields are ignored
///
/// # Examples
///
/// ```rust,ignore
/// let position = decode("8/8/8/8/8/8/8/8 w - - 0 1");
/// assert_eq!(position.piece_count(), 0);
/// ```
pub fn decode(text: &str) -> Position {
    let mut fields = text.split_whitespace();
    let placement = fields.next().unwrap_or("");
    let side_to_move = match fields.next() {
        Some("b") | Some("B") => Color::Black,
        _ => Color::White,
    };

    let mut position = Position::empty(side_to_move);
    for (index, group) in placement
        .split(RANK_SEPARATOR)
        .take(BOARD_SIZE as usize)
        .enumerate()
    {
        let rank = BOARD_SIZE - 1 - index as u8;
        match decode_rank(group, rank) {
            Some(row) => {
                for (square, piece) in row {
                    position.put(square, piece);
                }
            }
            None => debug!("[FEN] Dropping malformed rank group {:?}", group),
        }
    }

    position
}

/// Decode one rank group, `None` if it is malformed
fn decode_rank(group: &str, rank: u8) -> Option<Vec<(Square, Piece)>> {
    let mut row = Vec::new();
    let mut file: u32 = 0;

    for c in group.chars() {
        if let Some(run) = c.to_digit(10) {
            file += run;
        } else {
            let piece = Piece::from_letter(c).ok()?;
            if file >= BOARD_SIZE as u32 {
                return None;
            }
            row.push((Square::new(file as u8, rank), piece));
            file += 1;
        }

        if file > BOARD_SIZE as u32 {
            return None;
        }
    }

    Some(row)
}

/// Encode a [`Position`] as position text
///
/// Empty squares are run-length compressed per rank, ranks are written from 8
/// down to 1, and the placeholder fields are appended after the side to move.
pub fn encode(position: &Position) -> String {
    let mut ranks = Vec::with_capacity(BOARD_SIZE as usize);

    for rank in (0..BOARD_SIZE).rev() {
        let mut group = String::new();
        let mut empty = 0u8;

        for file in 0..BOARD_SIZE {
            match position.piece_at(Square::new(file, rank)) {
                Some(piece) => {
                    if empty > 0 {
                        group.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    group.push(piece.letter());
                }
                None => empty += 1,
            }
        }

        if empty > 0 {
            group.push((b'0' + empty) as char);
        }
        ranks.push(group);
    }

    format!(
        "{} {} {}",
        ranks.join(&RANK_SEPARATOR.to_string()),
        position.side_to_move().letter(),
        PLACEHOLDER_FIELDS
    )
}

/// Whether `text` decodes without dropping anything
///
/// True when there are exactly eight rank groups, each covering exactly eight
/// files with known letters, and the side-to-move token is `w` or `b`.
/// Decoding does not depend on this; it is a diagnostic for callers.
pub fn is_well_formed(text: &str) -> bool {
    let mut fields = text.split_whitespace();
    let Some(placement) = fields.next() else {
        return false;
    };
    if !matches!(fields.next(), Some("w") | Some("b")) {
        return false;
    }

    let groups: Vec<&str> = placement.split(RANK_SEPARATOR).collect();
    groups.len() == BOARD_SIZE as usize
        && groups.iter().all(|group| {
            let width: u32 = group
                .chars()
                .map(|c| c.to_digit(10).unwrap_or(1))
                .sum();
            width == BOARD_SIZE as u32 && decode_rank(group, 0).is_some()
        })
}
