//! `chess-tutor` command line
//!
//! Thin front end over [`chess_tutor::GameSession`] for scripting and manual
//! checks. Every command prints JSON on stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use chess_tutor::config::{self, TutorSettings};
use chess_tutor::{Difficulty, GameSession, HttpSuggester, Move, Square};

#[derive(Parser, Debug)]
#[command(name = "chess-tutor", version, about = "Chess tutor rules core")]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Legal destinations for the piece on a square
    Moves { fen: String, square: String },
    /// Mode and status of a position
    Status { fen: String },
    /// Apply coordinate moves in order, stopping at the first illegal one
    Play { fen: String, moves: Vec<String> },
    /// Read move text (notation or coordinates) against a position
    Replay { fen: String, text: String },
    /// Ask the engine service for a move and apply it
    Suggest {
        fen: String,
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    /// Print the effective settings, optionally writing defaults first
    Settings {
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings_path = cli.config.clone().unwrap_or_else(config::settings_path);
    let settings = config::load_or_default(&settings_path);
    init_logging(&settings);

    let output = match cli.command {
        Command::Moves { fen, square } => {
            let square: Square = square
                .parse()
                .with_context(|| format!("invalid square {square:?}"))?;
            let session = GameSession::new(&fen);
            json!({
                "mode": session.mode(),
                "square": square,
                "moves": session.legal_moves(square),
            })
        }
        Command::Status { fen } => {
            let session = GameSession::new(&fen);
            json!({
                "mode": session.mode(),
                "well_formed": session.is_start_well_formed(),
                "fen": session.fen(),
                "side_to_move": session.side_to_move(),
                "status": session.status(),
            })
        }
        Command::Play { fen, moves } => play(&fen, &moves)?,
        Command::Replay { fen, text } => {
            let session = GameSession::new(&fen);
            json!({ "mode": session.mode(), "moves": session.replay(&text) })
        }
        Command::Suggest { fen, difficulty } => {
            let difficulty = difficulty.unwrap_or(settings.difficulty);
            let suggester = HttpSuggester::from_settings(&settings)?;
            let mut session = GameSession::new(&fen);
            let (mv, status) = session
                .apply_suggestion(&suggester, difficulty)
                .with_context(|| format!("no usable suggestion from {}", suggester.url()))?;
            json!({ "move": mv, "status": status, "fen": session.fen() })
        }
        Command::Settings { init } => {
            if init {
                config::save(&settings, &settings_path)?;
            }
            json!({ "path": settings_path, "settings": settings })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn play(fen: &str, moves: &[String]) -> Result<serde_json::Value> {
    let mut session = GameSession::new(fen);
    for text in moves {
        let mv: Move = text
            .parse()
            .with_context(|| format!("invalid move {text:?}"))?;
        if session.apply_move(mv).is_none() {
            bail!("illegal move {text:?} in {}", session.fen());
        }
    }
    Ok(json!({
        "mode": session.mode(),
        "record": session.record(),
        "status": session.status(),
    }))
}

/// `RUST_LOG` wins; otherwise the configured filter
fn init_logging(settings: &TutorSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
