//! Configuration for the universe server.
//!
//! Supports YAML configuration files with sensible defaults. The board size
//! and the life rule are fixed; only run length, seeding, display cadence
//! and server metadata are tunable.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::render::DEFAULT_DISPLAY_FREQUENCY;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulation run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Turns after which stepping stops
    pub max_turns: u64,
    /// Probability that a cell starts alive (0.0 - 1.0)
    pub initial_density: f64,
    /// Random seed for reproducible boards (random when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

/// ASCII display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Turns between detailed displays
    pub frequency: u64,
}

/// Metadata reported by `initialize`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server name in `serverInfo`
    pub name: String,
    /// Protocol revision advertised to clients
    pub protocol_version: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_turns: 20,
            initial_density: 0.5,
            seed: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_DISPLAY_FREQUENCY,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "universe_game_visual".to_string(),
            protocol_version: "2024-11-05".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.simulation.max_turns == 0 {
            return Err("max_turns must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.simulation.initial_density) {
            return Err("initial_density must be between 0.0 and 1.0".to_string());
        }
        if self.display.frequency == 0 {
            return Err("display frequency must be > 0".to_string());
        }
        if self.server.name.trim().is_empty() {
            return Err("server name must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.max_turns, 20);
        assert_eq!(config.display.frequency, 10);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.simulation.max_turns, loaded.simulation.max_turns);
        assert_eq!(config.server.name, loaded.server.name);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "simulation:\n  max_turns: 50\n  initial_density: 0.3\n";
        let loaded: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(loaded.simulation.max_turns, 50);
        assert_eq!(loaded.simulation.seed, None);
        assert_eq!(loaded.display.frequency, DEFAULT_DISPLAY_FREQUENCY);
        assert_eq!(loaded.logging.log_level, "info");
    }

    #[test]
    fn test_invalid_density_rejected() {
        let mut config = Config::default();
        config.simulation.initial_density = 1.5;
        assert!(config.validate().is_err());

        config.simulation.initial_density = 0.5;
        config.display.frequency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("universe.yaml");

        let mut config = Config::default();
        config.simulation.seed = Some(42);
        config.save(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.simulation.seed, Some(42));
    }
}
