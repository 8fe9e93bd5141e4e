//! Settings manager
//!
//! Resolves the platform-specific configuration path and handles the
//! load-or-default flow used at startup.

use crate::config::LatheConfig;
use lathesim_core::{Result, SettingsError};
use std::path::PathBuf;
use tracing::warn;

const CONFIG_DIR_NAME: &str = "lathesim";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings manager owning the active configuration
#[derive(Debug, Clone, Default)]
pub struct SettingsManager {
    config: LatheConfig,
}

impl SettingsManager {
    /// Create a manager with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform configuration directory for the application
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory(
                    "Platform config directory not available".to_string(),
                )
                .into()
            })
    }

    /// Full path of the configuration file
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Create the configuration directory if it does not exist
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir).map_err(|e| {
            SettingsError::ConfigDirectory(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        Ok(dir)
    }

    /// Load settings from the platform path, falling back to defaults
    /// when no file exists yet
    pub fn load_or_default() -> Self {
        match Self::config_file_path() {
            Ok(path) if path.exists() => match LatheConfig::load_from_file(&path) {
                Ok(config) => Self { config },
                Err(e) => {
                    warn!(error = %e, "ignoring unreadable config, using defaults");
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Persist the active configuration to the platform path
    pub fn save(&self) -> Result<()> {
        Self::ensure_config_dir()?;
        self.config.save_to_file(&Self::config_file_path()?)
    }

    /// Active configuration
    pub fn config(&self) -> &LatheConfig {
        &self.config
    }

    /// Mutable access to the active configuration
    pub fn config_mut(&mut self) -> &mut LatheConfig {
        &mut self.config
    }
}
