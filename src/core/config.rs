//! Game configuration with documented constants
//!
//! All tunable numbers are collected here with explanations of their purpose
//! and how they interact with each other. A config file only needs to name the
//! fields it overrides; everything else falls back to `Default`.

use serde::Deserialize;
use std::path::Path;

use crate::core::error::{GameError, Result};

/// Configuration for the simulation and input systems
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === TICK LOOP ===
    /// Simulation ticks per second
    ///
    /// Every per-tick quantity below (movement step, backspace repeat) is
    /// expressed in ticks, so changing this changes the wall-clock feel of
    /// the whole game.
    pub ticks_per_second: u32,

    // === MOVEMENT ===
    /// Length the direction vector is scaled to before the speed factor
    ///
    /// A unit moves `direction_magnitude * speed / (ticks_per_second * speed_divisor)`
    /// map units per tick. At the defaults (50, 60, 2) a speed-5 unit covers
    /// about 2.08 map units per tick.
    pub direction_magnitude: f32,

    /// Divisor applied on top of the tick rate
    ///
    /// At 2.0, `speed` is effectively "half a direction_magnitude per second".
    pub speed_divisor: f32,

    /// Distance below which a unit counts as arrived (map units)
    pub arrival_epsilon: f32,

    // === INPUT ===
    /// Ticks backspace must be held before it starts repeating
    pub backspace_delay: u32,

    /// Ticks between repeats once backspace is repeating
    pub backspace_interval: u32,

    // === WORDS ===
    /// Random draws tried before falling back to scanning the free words
    ///
    /// Rejection sampling is cheap while the pool is mostly free. Once it is
    /// nearly full the fallback keeps `sample()` bounded.
    pub max_sample_attempts: u32,

    /// Fraction of the way from a node toward its neighbor where the
    /// edge label is anchored
    pub edge_anchor_fraction: f32,

    /// Vertical offset added to edge labels (screen units, positive = down)
    pub edge_label_offset_y: i32,

    // === PARALLELIZATION ===
    /// Minimum unit count before unit movement runs on rayon
    ///
    /// Below this threshold, thread overhead exceeds benefits.
    pub parallel_threshold: usize,

    /// RNG seed for word sampling; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60,

            direction_magnitude: 50.0,
            speed_divisor: 2.0,
            arrival_epsilon: 1.0,

            backspace_delay: 30,
            backspace_interval: 3,

            max_sample_attempts: 64,
            edge_anchor_fraction: 1.0 / 3.0,
            edge_label_offset_y: 10,

            parallel_threshold: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_second == 0 {
            return Err(GameError::InvalidConfig(
                "ticks_per_second must be positive".into(),
            ));
        }

        if self.speed_divisor <= 0.0 || self.direction_magnitude <= 0.0 {
            return Err(GameError::InvalidConfig(
                "speed_divisor and direction_magnitude must be positive".into(),
            ));
        }

        if self.arrival_epsilon <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "arrival_epsilon ({}) must be positive",
                self.arrival_epsilon
            )));
        }

        // interval 0 would make the modulo in the repeat check divide by zero
        if self.backspace_interval == 0 {
            return Err(GameError::InvalidConfig(
                "backspace_interval must be at least 1".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.edge_anchor_fraction) {
            return Err(GameError::InvalidConfig(format!(
                "edge_anchor_fraction ({}) must lie in [0, 1]",
                self.edge_anchor_fraction
            )));
        }

        Ok(())
    }

    /// Map units a speed-1 unit covers per tick
    pub fn step_scale(&self) -> f32 {
        self.direction_magnitude / (self.ticks_per_second as f32 * self.speed_divisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::parse_toml("ticks_per_second = 30\nseed = 7\n").unwrap();
        assert_eq!(config.ticks_per_second, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.backspace_delay, 30);
        assert_eq!(config.direction_magnitude, 50.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GameConfig::parse_toml("backspace_interval = 0").unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));

        let err = GameConfig::parse_toml("ticks_per_second = 0").unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));

        let err = GameConfig::parse_toml("edge_anchor_fraction = 1.5").unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = GameConfig::parse_toml("ticks_per_second = \"fast\"").unwrap_err();
        assert!(matches!(err, GameError::TomlError(_)));
    }

    #[test]
    fn test_step_scale() {
        let config = GameConfig::default();
        // 50 / (60 * 2)
        assert!((config.step_scale() - 50.0 / 120.0).abs() < 1e-6);
    }
}
