//! Configuration and settings management for LatheSim
//!
//! Provides configuration file handling and validation. Supports JSON
//! and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Connection settings (actuator port, timeouts)
//! - Simulation settings (stock dimensions, sample density, buffers)
//! - Force rendering settings (stiffness, damping, friction models)

use lathesim_core::{Result, SettingsError};
use lathesim_sim::{ForceConfig, SimConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Actuator link connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Serial port or hostname of the actuator controller
    pub port: String,
    /// Baud rate for serial connections
    pub baud_rate: u32,
    /// Connection timeout in milliseconds
    pub timeout_ms: u64,
    /// Outbound force frame rate in hertz
    pub force_rate_hz: f64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            port: "Auto".to_string(),
            baud_rate: 115_200,
            timeout_ms: 5000,
            force_rate_hz: 100.0,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LatheConfig {
    /// Actuator link settings
    #[serde(default)]
    pub connection: ConnectionSettings,
    /// Simulation engine settings
    #[serde(default)]
    pub simulation: SimConfig,
    /// Force rendering settings
    #[serde(default)]
    pub force: ForceConfig,
}

impl LatheConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("Failed to read config file: {}", e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| SettingsError::LoadError(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| SettingsError::LoadError(format!("Invalid TOML config: {}", e)))?
        } else {
            return Err(SettingsError::LoadError(
                "Config file must be .json or .toml".to_string(),
            )
            .into());
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self).map_err(|e| {
                SettingsError::SaveError(format!("Failed to serialize config: {}", e))
            })?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self).map_err(|e| {
                SettingsError::SaveError(format!("Failed to serialize config: {}", e))
            })?
        } else {
            return Err(SettingsError::SaveError(
                "Config file must be .json or .toml".to_string(),
            )
            .into());
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.connection.timeout_ms == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "connection.timeout_ms".to_string(),
                reason: "must be > 0".to_string(),
            }
            .into());
        }
        if self.connection.baud_rate == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "connection.baud_rate".to_string(),
                reason: "must be > 0".to_string(),
            }
            .into());
        }
        if self.connection.force_rate_hz <= 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "connection.force_rate_hz".to_string(),
                reason: "must be > 0".to_string(),
            }
            .into());
        }

        self.simulation.validate()?;
        self.force.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LatheConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = LatheConfig::default();
        config.connection.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_simulation_section_rejected() {
        let mut config = LatheConfig::default();
        config.simulation.stock_length_in = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: LatheConfig =
            serde_json::from_str(r#"{"connection": {"port": "/dev/ttyUSB0", "baud_rate": 9600, "timeout_ms": 1000, "force_rate_hz": 50.0}}"#)
                .unwrap();
        assert_eq!(config.connection.port, "/dev/ttyUSB0");
        assert_eq!(config.simulation, SimConfig::default());
        assert_eq!(config.force, ForceConfig::default());
    }
}
