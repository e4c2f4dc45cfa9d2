//! Move suggestions from an external engine service
//!
//! The tutor asks an engine for a move in the displayed position and then
//! validates the answer through the session's normal legality path; nothing a
//! service returns is applied unchecked.
//!
//! # Wire Format
//!
//! Request (JSON body of a `POST` to the configured URL):
//!
//! ```json
//! { "fen": "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b - - 0 1",
//!   "difficulty": "medium", "think_time_ms": 1500 }
//! ```
//!
//! Response:
//!
//! ```json
//! { "move": "e7e5", "evaluation": -20, "depth": 12 }
//! ```
//!
//! `move` may be coordinate text or SAN; `evaluation` (centipawns, white's
//! view) and `depth` are optional.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::TutorSettings;

/// Engine strength requested from the suggestion service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 0.5 seconds per move
    Easy,
    /// 1.5 seconds per move
    #[default]
    Medium,
    /// 3.0 seconds per move
    Hard,
}

impl Difficulty {
    /// Thinking time the service is asked to spend
    pub fn seconds_per_move(self) -> f32 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 3.0,
        }
    }

    pub fn think_time_ms(self) -> u64 {
        (self.seconds_per_move() * 1000.0) as u64
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty {other:?} (expected easy, medium or hard)")),
        }
    }
}

/// What the tutor sends to the engine service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub fen: String,
    pub difficulty: Difficulty,
    pub think_time_ms: u64,
}

impl SuggestionRequest {
    pub fn new(fen: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            fen: fen.into(),
            difficulty,
            think_time_ms: difficulty.think_time_ms(),
        }
    }
}

/// What the engine service answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "move")]
    pub mv: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

/// Errors that can occur while obtaining or applying a suggestion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuggestError {
    /// Connection, timeout or client construction failure
    #[error("Suggestion service unreachable: {0}")]
    Transport(String),

    /// Service answered with a non-success HTTP status
    #[error("Suggestion service returned HTTP {0}")]
    Status(u16),

    /// Response body was not a suggestion
    #[error("Malformed suggestion response: {0}")]
    Decode(String),

    /// Suggested move text could not be read as a move
    #[error("Unparseable suggested move {0:?}")]
    Unparseable(String),

    /// Suggested move is not legal in the displayed position
    #[error("Suggested move {0:?} is illegal in the current position")]
    Illegal(String),
}

/// Result type alias for suggestion operations
pub type SuggestResult<T> = Result<T, SuggestError>;

/// Source of suggested moves
///
/// Implemented by [`HttpSuggester`]; tests and offline tools provide their own.
pub trait MoveSuggester {
    fn suggest(&self, request: &SuggestionRequest) -> SuggestResult<Suggestion>;
}

/// Blocking JSON-over-HTTP client for an engine service
#[derive(Debug, Clone)]
pub struct HttpSuggester {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpSuggester {
    /// Build a client for `url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// [`SuggestError::Transport`] if the HTTP client cannot be constructed
    pub fn new(url: impl Into<String>, timeout: Duration) -> SuggestResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SuggestError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_settings(settings: &TutorSettings) -> SuggestResult<Self> {
        Self::new(settings.engine_url.clone(), settings.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl MoveSuggester for HttpSuggester {
    fn suggest(&self, request: &SuggestionRequest) -> SuggestResult<Suggestion> {
        debug!(
            "[SUGGEST] POST {} ({}, {} ms)",
            self.url, request.difficulty, request.think_time_ms
        );

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .map_err(|e| {
                warn!("[SUGGEST] Request to {} failed: {}", self.url, e);
                SuggestError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("[SUGGEST] {} answered {}", self.url, status);
            return Err(SuggestError::Status(status.as_u16()));
        }

        let suggestion = response
            .json::<Suggestion>()
            .map_err(|e| SuggestError::Decode(e.to_string()))?;
        debug!(
            "[SUGGEST] Received {:?} (eval {:?}, depth {:?})",
            suggestion.mv, suggestion.evaluation, suggestion.depth
        );
        Ok(suggestion)
    }
}
