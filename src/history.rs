//! Move history with a navigation cursor
//!
//! Keeps the chronological list of applied moves for a session together with
//! a cursor marking which prefix is currently displayed. This enables:
//!
//! - **Undo/Redo**: Move the cursor without discarding the moves ahead of it
//! - **Jump**: Show the position after any ply
//! - **Branching**: Applying a move behind the tip drops the moves ahead
//!
//! # Cursor
//!
//! `-1` means "at the starting position"; `k >= 0` means the first `k + 1`
//! moves are applied. The cursor always satisfies `-1 <= cursor < len`.
//!
//! Serialize-only: sessions persist as [`crate::SessionRecord`], whose
//! restore path clamps the cursor.

use chess_engine::AppliedMove;
use serde::Serialize;

/// Ordered list of applied moves plus the displayed-ply cursor
///
/// # Examples
///
/// ```rust,ignore
/// let mut history = MoveHistory::default();
/// history.push(applied_e4);
/// history.push(applied_e5);
/// history.set_cursor(0);           // back to the position after e4
/// assert_eq!(history.played().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveHistory {
    /// Index 0 = first ply from the starting position
    moves: Vec<AppliedMove>,
    cursor: isize,
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self {
            moves: Vec::new(),
            cursor: -1,
        }
    }
}

impl MoveHistory {
    /// Record a move at the cursor
    ///
    /// Moves after the cursor are discarded first, so the new move becomes the
    /// tip and the cursor points at it.
    ///
    /// # Returns
    ///
    /// Number of discarded moves
    pub fn push(&mut self, record: AppliedMove) -> usize {
        let keep = self.played_len();
        let dropped = self.moves.len() - keep;
        self.moves.truncate(keep);
        self.moves.push(record);
        self.cursor = self.tip();
        dropped
    }

    /// The move that produced the displayed position, if any
    pub fn last_move(&self) -> Option<&AppliedMove> {
        usize::try_from(self.cursor)
            .ok()
            .and_then(|index| self.moves.get(index))
    }

    /// Total number of recorded plies, including those ahead of the cursor
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Forget every move and return to the start
    pub fn clear(&mut self) {
        self.moves.clear();
        self.cursor = -1;
    }

    /// Get a recorded ply by zero-based index
    pub fn get_move(&self, index: usize) -> Option<&AppliedMove> {
        self.moves.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppliedMove> {
        self.moves.iter()
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    /// Index of the last recorded ply (`-1` when empty)
    pub fn tip(&self) -> isize {
        self.moves.len() as isize - 1
    }

    /// Move the cursor, clamped to `-1..=tip`
    ///
    /// # Returns
    ///
    /// The cursor actually set
    pub fn set_cursor(&mut self, index: isize) -> isize {
        self.cursor = index.clamp(-1, self.tip());
        self.cursor
    }

    /// Moves up to and including the cursor
    pub fn played(&self) -> &[AppliedMove] {
        &self.moves[..self.played_len()]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor >= 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.tip()
    }

    fn played_len(&self) -> usize {
        (self.cursor + 1) as usize
    }
}
