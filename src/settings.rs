//! Session settings
//!
//! Loaded from JSON by the host. Missing fields fall back to the defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::EngineError;
use crate::sim::weapon::{Weapon, default_loadout};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board extent along x (origin at the top-left corner)
    pub board_width: f32,
    /// Board extent along y
    pub board_height: f32,
    /// Player start position (board centre when unset)
    pub player_start: Option<Vec2>,
    /// RNG seed for enemy spawns
    pub seed: u64,
    /// Weapon inventory, first entry equipped at start
    pub weapons: Vec<Weapon>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            player_start: None,
            seed: 0,
            weapons: default_loadout(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |reason: String| Err(EngineError::InvalidConfiguration(reason));

        if !self.board_width.is_finite() || self.board_width <= 0.0 {
            return invalid(format!("board width must be positive, got {}", self.board_width));
        }
        if !self.board_height.is_finite() || self.board_height <= 0.0 {
            return invalid(format!("board height must be positive, got {}", self.board_height));
        }
        if let Some(start) = self.player_start {
            let inside = start.is_finite()
                && (0.0..=self.board_width).contains(&start.x)
                && (0.0..=self.board_height).contains(&start.y);
            if !inside {
                return invalid(format!("player start {start} is outside the board"));
            }
        }
        if self.weapons.is_empty() {
            return invalid("weapon loadout is empty".to_string());
        }
        for weapon in &self.weapons {
            weapon.validate().or_else(invalid)?;
        }
        Ok(())
    }
}
