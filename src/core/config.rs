//! Simulation configuration loaded from TOML
//!
//! Every section falls back to its defaults, so a config file only needs
//! the values it changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::Result;

/// Zone sizing and placement limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Exclusive upper bound for zone width and height
    pub max_dimension: usize,
    /// Random placement attempts per object before giving up
    pub placement_attempts: u32,
    /// Object count a zone keeps when syncing with a body source
    pub max_objects: usize,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1000,
            placement_attempts: 10_000,
            max_objects: 30,
        }
    }
}

/// Per-tick movement settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Direction changes an object may try in one tick before staying put
    pub max_attempts: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self { max_attempts: 7 }
    }
}

/// Frame rendering symbols and cosmetic noise
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub void: char,
    pub matter: char,
    /// Percentage of each row overwritten with `matter`
    pub positive_noise: u32,
    /// Percentage of each row overwritten with `void`
    pub negative_noise: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            void: '-',
            matter: 'o',
            positive_noise: 3,
            negative_noise: 5,
        }
    }
}

/// Limits for sprites arriving from outside the process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub max_width: usize,
    pub max_height: usize,
    /// Lifetime of a cached body record, in cache clock ticks
    pub ttl_ticks: u64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            max_width: 15,
            max_height: 15,
            ttl_ticks: 60,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub zone: ZoneConfig,
    #[serde(default)]
    pub movement: MovementConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub bodies: BodyConfig,
    /// Seed for the zone RNG; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded simulation config from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SimulationConfig::default();
        assert_eq!(config.zone.max_dimension, 1000);
        assert_eq!(config.movement.max_attempts, 7);
        assert_eq!(config.render.void, '-');
        assert_eq!(config.render.matter, 'o');
        assert_eq!(config.render.positive_noise, 3);
        assert_eq!(config.render.negative_noise, 5);
        assert_eq!(config.bodies.max_width, 15);
        assert_eq!(config.bodies.max_height, 15);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            seed = 42

            [movement]
            max_attempts = 3

            [render]
            void = " "
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.movement.max_attempts, 3);
        assert_eq!(config.render.void, ' ');
        assert_eq!(config.render.matter, 'o');
        assert_eq!(config.zone.placement_attempts, 10_000);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SimulationConfig::from_toml_str("movement = [").unwrap_err();
        assert!(matches!(err, crate::core::error::RadarError::Config(_)));
    }

    #[test]
    fn test_load_shipped_config() {
        let config = SimulationConfig::load(Path::new("data/radar.toml"))
            .expect("Should load data/radar.toml");
        assert_eq!(config.movement.max_attempts, 7);
        assert_eq!(config.zone.max_dimension, 1000);
    }
}
