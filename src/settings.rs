//! Game settings and tuning
//!
//! Loaded from a (possibly partial) JSON document; anything missing falls
//! back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::consts::*;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Relaxed,
    #[default]
    Normal,
    Frantic,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Relaxed => "Relaxed",
            Difficulty::Normal => "Normal",
            Difficulty::Frantic => "Frantic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(Difficulty::Relaxed),
            "normal" => Some(Difficulty::Normal),
            "frantic" | "hard" => Some(Difficulty::Frantic),
            _ => None,
        }
    }

    /// Chance a free row becomes a river
    pub fn water_chance(&self) -> f64 {
        match self {
            Difficulty::Relaxed => 0.12,
            Difficulty::Normal => WATER_CHANCE,
            Difficulty::Frantic => 0.3,
        }
    }

    /// Chance each land column becomes rock
    pub fn rock_chance(&self) -> f64 {
        match self {
            Difficulty::Relaxed => 0.25,
            Difficulty::Normal => ROCK_CHANCE,
            Difficulty::Frantic => 0.45,
        }
    }

    /// Raft speed multiplier (1.0 = default range)
    pub fn raft_speed_scale(&self) -> f32 {
        match self {
            Difficulty::Relaxed => 0.75,
            Difficulty::Normal => 1.0,
            Difficulty::Frantic => 1.4,
        }
    }
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset the probabilities below were derived from
    pub difficulty: Difficulty,

    // === Field ===
    /// Columns per row
    pub field_width: i32,
    /// Column the player spawns on
    pub spawn_column: i32,
    /// Rows kept ahead of the player
    pub tiles_ahead: i32,
    /// Rows kept behind the player
    pub tiles_behind: i32,

    // === Generation ===
    pub water_chance: f64,
    pub rock_chance: f64,

    // === Rafts ===
    /// When off, rivers have no rafts and water always drowns
    pub rafts_enabled: bool,
    pub raft_speed_min: f32,
    pub raft_speed_max: f32,
    pub rafts_per_row_min: u32,
    pub rafts_per_row_max: u32,
    pub raft_width_min: u32,
    pub raft_width_max: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            field_width: FIELD_WIDTH,
            spawn_column: SPAWN_COLUMN,
            tiles_ahead: TILES_AHEAD,
            tiles_behind: TILES_BEHIND,

            water_chance: WATER_CHANCE,
            rock_chance: ROCK_CHANCE,

            rafts_enabled: true,
            raft_speed_min: RAFT_SPEED_MIN,
            raft_speed_max: RAFT_SPEED_MAX,
            rafts_per_row_min: RAFTS_PER_ROW_MIN,
            rafts_per_row_max: RAFTS_PER_ROW_MAX,
            raft_width_min: RAFT_WIDTH_MIN,
            raft_width_max: RAFT_WIDTH_MAX,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a difficulty preset (updates probability and speed settings)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.water_chance = preset.water_chance();
        self.rock_chance = preset.rock_chance();

        let scale = preset.raft_speed_scale();
        self.raft_speed_min = RAFT_SPEED_MIN * scale;
        self.raft_speed_max = RAFT_SPEED_MAX * scale;
    }

    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings ({}, width {})",
            settings.difficulty.as_str(),
            settings.field_width
        );
        Ok(settings)
    }

    /// Reject settings the simulation cannot honor
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::InvalidSettings(msg));

        if self.field_width < 1 {
            return invalid(format!("field_width must be >= 1, got {}", self.field_width));
        }
        if !(0..self.field_width).contains(&self.spawn_column) {
            return invalid(format!(
                "spawn_column {} outside [0, {})",
                self.spawn_column, self.field_width
            ));
        }
        if self.tiles_ahead < 1 {
            return invalid(format!("tiles_ahead must be >= 1, got {}", self.tiles_ahead));
        }
        if self.tiles_behind < 0 {
            return invalid(format!("tiles_behind must be >= 0, got {}", self.tiles_behind));
        }
        for (name, p) in [("water_chance", self.water_chance), ("rock_chance", self.rock_chance)] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{name} must be in [0, 1], got {p}"));
            }
        }
        if !(self.raft_speed_min > 0.0 && self.raft_speed_min < self.raft_speed_max) {
            return invalid(format!(
                "raft speed range [{}, {}) is empty",
                self.raft_speed_min, self.raft_speed_max
            ));
        }
        if self.rafts_per_row_min < 1 || self.rafts_per_row_min > self.rafts_per_row_max {
            return invalid(format!(
                "rafts per row range {}..={} is invalid",
                self.rafts_per_row_min, self.rafts_per_row_max
            ));
        }
        if self.raft_width_min < 1 || self.raft_width_min > self.raft_width_max {
            return invalid(format!(
                "raft width range {}..={} is invalid",
                self.raft_width_min, self.raft_width_max
            ));
        }
        Ok(())
    }

    /// Last row kept behind the player; anything further back is evicted
    pub fn trailing_row(&self, player_row: i32) -> i32 {
        player_row + self.tiles_behind + ROW_MARGIN
    }

    /// Topmost rendered row for a given player row
    pub fn camera_row(&self, player_row: i32) -> i32 {
        player_row - self.tiles_ahead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
        for preset in [Difficulty::Relaxed, Difficulty::Normal, Difficulty::Frantic] {
            assert!(Settings::from_preset(preset).validate().is_ok());
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "field_width": 9, "spawn_column": 4 }"#).unwrap();
        assert_eq!(settings.field_width, 9);
        assert_eq!(settings.spawn_column, 4);
        assert_eq!(settings.tiles_ahead, TILES_AHEAD);
        assert!(settings.rafts_enabled);
    }

    #[test]
    fn test_rejects_bad_settings() {
        let settings = Settings {
            field_width: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(GameError::InvalidSettings(_))));

        let settings = Settings {
            spawn_column: 20,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            water_chance: 1.5,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_preset_roundtrip_names() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Frantic));
        assert_eq!(Difficulty::from_str(Difficulty::Relaxed.as_str()), Some(Difficulty::Relaxed));
        assert_eq!(Difficulty::from_str("nope"), None);
    }
}
