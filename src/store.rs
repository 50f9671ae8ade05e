//! Settings and high-score persistence
//!
//! Everything lives in one JSON file:
//!
//! ```json
//! {
//!   "settings": { "board_size": "Medium", "game_mode": "Regular", ... },
//!   "high_scores": { "Medium|One|Moderate|Regular": 12 }
//! }
//! ```
//!
//! High scores are keyed by [`Settings::fingerprint`]. A missing or unreadable
//! file yields defaults so a bad save never blocks play.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::game::Settings;

/// Persisted game data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameData {
    pub settings: Settings,
    pub high_scores: BTreeMap<String, u32>,
}

impl GameData {
    pub fn high_score(&self, fingerprint: &str) -> u32 {
        self.high_scores.get(fingerprint).copied().unwrap_or(0)
    }

    /// Record a finished game and return the high score for its bucket
    pub fn record_score(&mut self, fingerprint: &str, score: u32) -> u32 {
        let entry = self.high_scores.entry(fingerprint.to_string()).or_insert(0);
        *entry = (*entry).max(score);
        *entry
    }
}

/// Read game data from a JSON file
pub fn load_data(path: &Path) -> Result<GameData> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read game data from {:?}", path))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse game data in {:?}", path))
}

/// Write game data as JSON, creating parent directories if needed
pub fn save_data(data: &GameData, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let json = serde_json::to_string_pretty(data).context("Failed to serialize game data")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write game data to {:?}", path))?;

    Ok(())
}

/// Game data bound to the file it came from
pub struct GameStore {
    path: PathBuf,
    pub data: GameData,
}

impl GameStore {
    /// Load from `path`, falling back to defaults when the file is missing or malformed
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = if path.exists() {
            match load_data(&path) {
                Ok(data) => {
                    info!(path = %path.display(), scores = data.high_scores.len(), "Loaded game data");
                    data
                }
                Err(err) => {
                    warn!(path = %path.display(), "Using defaults: {err:#}");
                    GameData::default()
                }
            }
        } else {
            info!(path = %path.display(), "No game data yet, using defaults");
            GameData::default()
        };

        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        save_data(&self.data, &self.path)
    }

    /// Save, logging instead of failing
    pub fn save_or_warn(&self) {
        if let Err(err) = self.save() {
            warn!(path = %self.path.display(), "Could not save game data: {err:#}");
        }
    }
}
