//! Tutor settings persistence
//!
//! Saves and loads [`TutorSettings`] to/from a JSON file.
//!
//! # File Location
//!
//! `settings.json` in the user's configuration directory, e.g.
//! `~/.config/chesstutor/settings.json` on Linux. Falls back to a local
//! `settings.json` when no config directory can be determined.
//!
//! # Error Handling
//!
//! [`try_load`] and [`save`] return [`ConfigError`]. [`load_or_default`]
//! never fails: a missing file is normal, an unreadable or invalid one is
//! logged and replaced by defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::suggest::Difficulty;

/// Settings filename
pub const SETTINGS_FILENAME: &str = "settings.json";

/// User-adjustable tutor settings
///
/// Unknown fields are ignored and missing fields take their defaults, so
/// older files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorSettings {
    /// Suggestion service endpoint
    pub engine_url: String,
    pub difficulty: Difficulty,
    /// Per-request timeout for the suggestion service
    pub timeout_ms: u64,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for TutorSettings {
    fn default() -> Self {
        Self {
            engine_url: "http://localhost:3000/suggest".to_string(),
            difficulty: Difficulty::Medium,
            timeout_ms: 5_000,
            log_filter: "info".to_string(),
        }
    }
}

impl TutorSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Errors that can occur while reading or writing settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file I/O error
    #[error("Settings I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings serialization/deserialization error
    #[error("Settings serialization error at {path:?}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for settings operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Path of `settings.json` in the user's configuration directory
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "trilltino", "ChessTutor") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Read and parse settings from `path`
pub fn try_load(path: &Path) -> ConfigResult<TutorSettings> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Serialization {
        path: path.to_path_buf(),
        source,
    })
}

/// Load settings from `path`, using defaults when absent or invalid
pub fn load_or_default(path: &Path) -> TutorSettings {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return TutorSettings::default();
    }

    match try_load(path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!("[SETTINGS] {}. Using defaults.", e);
            TutorSettings::default()
        }
    }
}

/// Write settings as pretty JSON, creating the directory if needed
pub fn save(settings: &TutorSettings, path: &Path) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let json =
        serde_json::to_string_pretty(settings).map_err(|source| ConfigError::Serialization {
            path: path.to_path_buf(),
            source,
        })?;
    fs::write(path, json).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
