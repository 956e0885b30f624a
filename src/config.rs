//! Startup configuration.
//!
//! Only the scalar values the simulation needs: window pixel size, cell size,
//! initial tick rate, rule set and an optional RNG seed. Every field has a
//! default, so an empty JSON object is a valid config file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::RuleSet;

/// Slowest allowed tick rate, in generations per second.
pub const MIN_TICK_RATE: u32 = 1;

/// Fastest allowed tick rate, in generations per second.
pub const MAX_TICK_RATE: u32 = 120;

/// Simulation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Pixels per grid cell.
    pub cell_size: u32,
    /// Initial generations per second.
    pub tick_rate: u32,
    /// Rule set, by name.
    pub rule: RuleSet,
    /// Seed for the random number generator. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            cell_size: 10,
            tick_rate: 10,
            rule: RuleSet::Conway,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed (including an
    /// unknown rule name), or if [`validate`](Self::validate) fails.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Grid width in cells (`width / cell_size`).
    #[must_use]
    pub const fn grid_width(&self) -> usize {
        if self.cell_size == 0 {
            return 0;
        }
        (self.width / self.cell_size) as usize
    }

    /// Grid height in cells (`height / cell_size`).
    #[must_use]
    pub const fn grid_height(&self) -> usize {
        if self.cell_size == 0 {
            return 0;
        }
        (self.height / self.cell_size) as usize
    }

    /// Check that the simulation can run with these values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero cell size, a zero grid
    /// dimension, or a tick rate outside `[MIN_TICK_RATE, MAX_TICK_RATE]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::Invalid("cell_size must be positive".into()));
        }
        if self.grid_width() == 0 || self.grid_height() == 0 {
            return Err(ConfigError::Invalid(format!(
                "{}x{} pixels at cell_size {} gives an empty grid",
                self.width, self.height, self.cell_size
            )));
        }
        if !(MIN_TICK_RATE..=MAX_TICK_RATE).contains(&self.tick_rate) {
            return Err(ConfigError::Invalid(format!(
                "tick_rate {} outside {MIN_TICK_RATE}..={MAX_TICK_RATE}",
                self.tick_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.grid_width(), 80);
        assert_eq!(config.grid_height(), 60);
        assert_eq!(config.tick_rate, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_integer_division() {
        let config = SimConfig {
            width: 805,
            height: 599,
            ..SimConfig::default()
        };
        assert_eq!(config.grid_width(), 80);
        assert_eq!(config.grid_height(), 59);
    }

    #[test]
    fn test_validate_rejects() {
        let zero_cell = SimConfig {
            cell_size: 0,
            ..SimConfig::default()
        };
        assert!(matches!(zero_cell.validate(), Err(ConfigError::Invalid(_))));

        let tiny = SimConfig {
            width: 5,
            ..SimConfig::default()
        };
        assert!(tiny.validate().is_err());

        let frozen = SimConfig {
            tick_rate: 0,
            ..SimConfig::default()
        };
        assert!(frozen.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: SimConfig = serde_json::from_str(r#"{"cell_size": 20, "rule": "highlife"}"#).unwrap();
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.rule, RuleSet::HighLife);
        assert_eq!(config.width, 800);
    }

    #[test]
    fn test_file_unknown_rule() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"rule": "brians-brain"}"#).unwrap();
        assert!(matches!(
            SimConfig::from_json_file(&path),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn test_file_missing() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            SimConfig::from_json_file(&dir.path().join("nope.json")),
            Err(ConfigError::Io { .. })
        ));
    }
}
