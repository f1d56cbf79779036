//! Simulation settings
//!
//! Loaded from a JSON file by the host; every field has a default.

use std::fmt;
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LEVEL_ATTEMPTS, UPDATES_PER_SEC};

/// Highest accepted tick rate (Hz)
pub const MAX_TICK_RATE: u32 = 1000;

/// Ball physics model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PhysicsModel {
    /// Integer unit steps, mirror bounce off the paddle, per-axis block reflection
    Stepped,
    /// Sub-pixel motion, angled paddle returns, edge-adjacency block reflection
    #[default]
    Subpixel,
}

impl PhysicsModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicsModel::Stepped => "Stepped",
            PhysicsModel::Subpixel => "Subpixel",
        }
    }

    /// Ball velocity at serve: rightward and upward
    pub fn launch_velocity(&self) -> DVec2 {
        match self {
            PhysicsModel::Stepped => DVec2::new(1.0, -1.0),
            PhysicsModel::Subpixel => DVec2::new(0.5, -0.6),
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ball physics model
    pub physics: PhysicsModel,
    /// Logical ticks per second; the start delay lasts one second of ticks
    pub tick_rate: u32,
    /// Fixed RNG seed (None = random per process)
    pub seed: Option<u64>,
    /// Empty-level redraws allowed before giving up
    pub max_level_attempts: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsModel::Subpixel,
            tick_rate: UPDATES_PER_SEC,
            seed: None,
            max_level_attempts: MAX_LEVEL_ATTEMPTS,
        }
    }
}

impl Settings {
    /// Ticks the ball stays frozen after a reset
    pub fn start_delay_ticks(&self) -> u32 {
        self.tick_rate
    }

    /// Fixed timestep in seconds
    pub fn tick_dt(&self) -> f64 {
        1.0 / self.tick_rate as f64
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_rate == 0 || self.tick_rate > MAX_TICK_RATE {
            return Err(SettingsError::InvalidTickRate(self.tick_rate));
        }
        if self.max_level_attempts == 0 {
            return Err(SettingsError::InvalidMaxLevelAttempts);
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

/// Errors from loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidTickRate(u32),
    InvalidMaxLevelAttempts,
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Json(e) => write!(f, "Invalid settings JSON: {}", e),
            SettingsError::InvalidTickRate(rate) => {
                write!(f, "Tick rate must be in 1..={}, got {}", MAX_TICK_RATE, rate)
            }
            SettingsError::InvalidMaxLevelAttempts => {
                write!(f, "max_level_attempts must be at least 1")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.physics, PhysicsModel::Subpixel);
        assert_eq!(settings.start_delay_ticks(), 120);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "physics": "Stepped", "seed": 42 }"#).unwrap();
        assert_eq!(settings.physics, PhysicsModel::Stepped);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.tick_rate, UPDATES_PER_SEC);
        assert_eq!(settings.max_level_attempts, MAX_LEVEL_ATTEMPTS);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            tick_rate: 60,
            seed: Some(7),
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "tick_rate": 0 }"#),
            Err(SettingsError::InvalidTickRate(0))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "tick_rate": 5000 }"#),
            Err(SettingsError::InvalidTickRate(5000))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "max_level_attempts": 0 }"#),
            Err(SettingsError::InvalidMaxLevelAttempts)
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/pixel-breakout.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
