//! Match settings
//!
//! Read from an optional JSON file; every field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::Volume;
use crate::error::SimResult;
use crate::tuning::Tuning;

/// Model files for each kind of game object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPaths {
    pub surface: String,
    pub pillar: String,
    pub player: String,
    pub crown: String,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            surface: "models/Surface.3ds".to_string(),
            pillar: "models/Pillar.3ds".to_string(),
            player: "models/Player.3ds".to_string(),
            crown: "models/Crown.3ds".to_string(),
        }
    }
}

/// Match settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub volume: Volume,
    /// RNG seed; `None` picks one from the wall clock
    pub seed: Option<u64>,

    // === Match ===
    /// Round wins needed to take the match
    pub rounds_to_win: u32,
    /// Players per round (ids 1..=player_count)
    pub player_count: u32,
    /// Player 1 is driven from the keyboard
    pub human_player: bool,

    pub models: ModelPaths,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: Volume::Low,
            seed: None,
            rounds_to_win: 3,
            player_count: 4,
            human_player: true,
            models: ModelPaths::default(),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> SimResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, using defaults when it is missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
