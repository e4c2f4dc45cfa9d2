//! Game session: the position state machine behind the tutor UI
//!
//! A [`GameSession`] owns a starting position, the rules mode chosen for it,
//! the move history and the displayed position. All operations are
//! synchronous and run to completion.
//!
//! # Mode Selection
//!
//! Decided once in [`GameSession::new`] and never re-evaluated:
//!
//! 1. Try [`StrictRules::from_fen`]; a well-formed legal position gets full
//!    chess rules from the rules authority.
//! 2. On its error value, decode leniently into [`CustomRules`].
//!
//! # Navigation
//!
//! The displayed position is always "start + played prefix of the history".
//! [`GameSession::undo`], [`GameSession::redo`] and [`GameSession::jump_to`]
//! only move the history cursor and recompute from the start;
//! [`GameSession::apply_move`] behind the tip discards the moves ahead.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use chess_engine::{AppliedMove, Color, Move, Position, Square, Status};

use crate::history::MoveHistory;
use crate::replay;
use crate::rules::{CustomRules, Rules};
use crate::strict::StrictRules;
use crate::suggest::{Difficulty, MoveSuggester, SuggestError, SuggestResult, SuggestionRequest};

/// Which rules govern a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Standard rules from the rules authority
    Strict,
    /// Best-effort rules for malformed or editor positions
    Custom,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Strict => f.write_str("strict"),
            Mode::Custom => f.write_str("custom"),
        }
    }
}

/// Rules state for either mode
#[derive(Debug, Clone)]
enum SessionRules {
    Strict(StrictRules),
    Custom(CustomRules),
}

impl SessionRules {
    fn mode(&self) -> Mode {
        match self {
            SessionRules::Strict(_) => Mode::Strict,
            SessionRules::Custom(_) => Mode::Custom,
        }
    }
}

impl Rules for SessionRules {
    fn position(&self) -> Position {
        match self {
            SessionRules::Strict(rules) => rules.position(),
            SessionRules::Custom(rules) => rules.position(),
        }
    }

    fn legal_moves(&self, square: Square) -> BTreeSet<Square> {
        match self {
            SessionRules::Strict(rules) => rules.legal_moves(square),
            SessionRules::Custom(rules) => rules.legal_moves(square),
        }
    }

    fn apply(&self, mv: &Move) -> Option<(Self, AppliedMove)> {
        match self {
            SessionRules::Strict(rules) => rules
                .apply(mv)
                .map(|(next, applied)| (SessionRules::Strict(next), applied)),
            SessionRules::Custom(rules) => rules
                .apply(mv)
                .map(|(next, applied)| (SessionRules::Custom(next), applied)),
        }
    }

    fn status(&self) -> Status {
        match self {
            SessionRules::Strict(rules) => rules.status(),
            SessionRules::Custom(rules) => rules.status(),
        }
    }

    fn encode(&self) -> String {
        match self {
            SessionRules::Strict(rules) => rules.encode(),
            SessionRules::Custom(rules) => rules.encode(),
        }
    }
}

/// Serializable snapshot of a session
///
/// Moves are stored as coordinate text (`e2e4`, `c7c8q`). Restoring replays
/// them from `start`, so a record stays valid across format changes of the
/// in-memory types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub mode: Mode,
    /// Position text the session started from
    pub start: String,
    pub moves: Vec<String>,
    /// Displayed ply, `-1` for the start
    #[serde(default = "start_cursor")]
    pub cursor: isize,
    /// Position text of the displayed position
    pub position: String,
}

fn start_cursor() -> isize {
    -1
}

/// One tutoring session over one starting position
#[derive(Debug, Clone)]
pub struct GameSession {
    start_text: String,
    well_formed: bool,
    start: SessionRules,
    current: SessionRules,
    history: MoveHistory,
}

impl GameSession {
    /// Start a session from position text
    ///
    /// Never fails: text the rules authority refuses opens a Custom session
    /// over whatever the lenient decoder could read.
    pub fn new(start_text: &str) -> Self {
        let start = match StrictRules::from_fen(start_text) {
            Ok(rules) => {
                info!("[SESSION] Strict mode for {:?}", start_text);
                SessionRules::Strict(rules)
            }
            Err(e) => {
                info!("[SESSION] Custom mode for {:?}: {}", start_text, e);
                SessionRules::Custom(CustomRules::from_fen(start_text))
            }
        };
        let well_formed = chess_engine::fen::is_well_formed(start_text);
        if !well_formed {
            warn!(
                "[SESSION] Start text {:?} is malformed; unreadable parts were dropped",
                start_text
            );
        }

        Self {
            start_text: start_text.to_string(),
            well_formed,
            current: start.clone(),
            start,
            history: MoveHistory::default(),
        }
    }

    /// Session from the standard starting position
    pub fn standard() -> Self {
        Self::new(chess_engine::constants::START_FEN)
    }

    /// Whether the start text decoded without dropping anything
    pub fn is_start_well_formed(&self) -> bool {
        self.well_formed
    }

    pub fn mode(&self) -> Mode {
        self.start.mode()
    }

    /// Position text the session was created from
    pub fn start_text(&self) -> &str {
        &self.start_text
    }

    /// Displayed position
    pub fn position(&self) -> Position {
        self.current.position()
    }

    /// Position text of the displayed position
    pub fn fen(&self) -> String {
        self.current.encode()
    }

    pub fn status(&self) -> Status {
        self.current.status()
    }

    pub fn side_to_move(&self) -> Color {
        self.position().side_to_move()
    }

    /// Legal destinations for the piece on `square` in the displayed position
    pub fn legal_moves(&self, square: Square) -> BTreeSet<Square> {
        self.current.legal_moves(square)
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Every recorded move, including those ahead of the cursor
    pub fn moves(&self) -> Vec<Move> {
        self.history.iter().map(|record| record.mv.clone()).collect()
    }

    pub fn cursor(&self) -> isize {
        self.history.cursor()
    }

    /// Apply a move to the displayed position
    ///
    /// # Returns
    ///
    /// The new status, or `None` for an illegal request (nothing changes).
    /// Moves ahead of the cursor are discarded when the move is accepted.
    pub fn apply_move(&mut self, mv: Move) -> Option<Status> {
        let Some((next, applied)) = self.current.apply(&mv) else {
            debug!("[SESSION] Rejected {} in {} mode", mv, self.mode());
            return None;
        };

        let dropped = self.history.push(applied);
        if dropped > 0 {
            debug!("[SESSION] Discarded {} moves ahead of the cursor", dropped);
        }
        self.current = next;

        let status = self.current.status();
        debug!("[SESSION] Applied {} -> {:?}", mv, status);
        Some(status)
    }

    /// Step back one ply
    ///
    /// The undone move stays recorded and can be restored with [`Self::redo`].
    pub fn undo(&mut self) -> Option<Move> {
        let undone = self.history.last_move()?.mv.clone();
        self.jump_to(self.history.cursor() - 1);
        Some(undone)
    }

    /// Step forward one ply when moves lie ahead of the cursor
    pub fn redo(&mut self) -> Option<Move> {
        if !self.history.can_redo() {
            return None;
        }
        self.jump_to(self.history.cursor() + 1);
        self.history.last_move().map(|record| record.mv.clone())
    }

    /// Show the position after ply `index` (`-1` for the start)
    ///
    /// `index` is clamped to the recorded range. The position is recomputed
    /// from the start; the move list is never modified.
    pub fn jump_to(&mut self, index: isize) -> Position {
        let cursor = self.history.set_cursor(index);
        self.current = self.replay_played();
        debug!("[SESSION] Jumped to ply {}", cursor);
        self.current.position()
    }

    fn replay_played(&self) -> SessionRules {
        let mut rules = self.start.clone();
        for record in self.history.played() {
            match rules.apply(&record.mv) {
                Some((next, _)) => rules = next,
                None => {
                    warn!("[SESSION] Recorded move {} no longer applies", record.mv);
                    break;
                }
            }
        }
        rules
    }

    /// Read move text against the displayed position without applying it
    pub fn replay(&self, text: &str) -> Vec<Move> {
        replay::replay(&self.fen(), text)
    }

    /// Replay `text` and apply every move that is legal when reached
    ///
    /// # Returns
    ///
    /// Number of accepted moves
    pub fn load_moves(&mut self, text: &str) -> usize {
        let moves = self.replay(text);
        let total = moves.len();
        let mut accepted = 0;
        for mv in moves {
            if self.apply_move(mv).is_some() {
                accepted += 1;
            }
        }
        if accepted < total {
            warn!("[REPLAY] Applied {} of {} moves", accepted, total);
        } else {
            info!("[REPLAY] Applied {} moves", accepted);
        }
        accepted
    }

    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            mode: self.mode(),
            start: self.start_text.clone(),
            moves: self.history.iter().map(|r| r.mv.to_string()).collect(),
            cursor: self.history.cursor(),
            position: self.fen(),
        }
    }

    /// Rebuild a session by replaying a record's moves from its start
    ///
    /// Replay stops at the first move that does not parse or apply.
    pub fn from_record(record: &SessionRecord) -> Self {
        let mut session = Self::new(&record.start);
        if session.mode() != record.mode {
            warn!(
                "[SESSION] Record says {} mode, start position selects {}",
                record.mode,
                session.mode()
            );
        }

        for text in &record.moves {
            let applied = text
                .parse::<Move>()
                .ok()
                .and_then(|mv| session.apply_move(mv));
            if applied.is_none() {
                warn!("[SESSION] Stopped restoring at move {:?}", text);
                break;
            }
        }

        session.jump_to(record.cursor);
        session
    }

    /// Ask `suggester` for a move and apply it if legal
    ///
    /// The answer goes through [`Self::replay`] (first move only) and
    /// [`Self::apply_move`], exactly like a user's move.
    ///
    /// # Errors
    ///
    /// The suggester's own error, [`SuggestError::Unparseable`] when no move can
    /// be read from the answer, or [`SuggestError::Illegal`] when the move is
    /// rejected. The session is unchanged in every error case.
    pub fn apply_suggestion(
        &mut self,
        suggester: &dyn MoveSuggester,
        difficulty: Difficulty,
    ) -> SuggestResult<(Move, Status)> {
        let request = SuggestionRequest::new(self.fen(), difficulty);
        let suggestion = suggester.suggest(&request)?;
        let text = suggestion.mv.trim();

        let Some(mv) = self.replay(text).into_iter().next() else {
            warn!("[SUGGEST] Could not read suggested move {:?}", text);
            return Err(SuggestError::Unparseable(text.to_string()));
        };
        let Some(status) = self.apply_move(mv) else {
            warn!("[SUGGEST] Suggested move {:?} is illegal here", text);
            return Err(SuggestError::Illegal(text.to_string()));
        };

        let applied = self
            .history
            .last_move()
            .map(|record| record.mv.clone())
            .ok_or_else(|| SuggestError::Illegal(text.to_string()))?;
        info!("[SUGGEST] Applied {} ({:?})", applied, suggestion.evaluation);
        Ok((applied, status))
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::standard()
    }
}
