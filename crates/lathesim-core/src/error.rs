//! Error handling for LatheSim
//!
//! Provides error types for all layers of the application:
//! - Simulation errors (stock/engine related)
//! - Bridge errors (control-plane message handling)
//! - Settings errors (configuration load/save)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Simulation engine error type
///
/// Represents errors raised by the cutting/haptics engine. Per-step
/// numeric saturation is never an error (values are clamped); these
/// variants cover conditions that must fail fast instead of leaking
/// into the step loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Stock was configured with a non-positive dimension
    #[error("Invalid stock dimensions: length {length_in}\" x diameter {diameter_in}\"")]
    InvalidStock {
        /// Requested stock length in inches.
        length_in: f64,
        /// Requested stock diameter in inches.
        diameter_in: f64,
    },

    /// A configuration value failed validation
    #[error("Invalid simulation parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The session is crash-latched and cannot perform the operation
    #[error("Session is crash-latched; reset required")]
    CrashLatched,
}

/// Bridge error type
///
/// Errors from the control-plane message layer (GUI commands, actuator
/// status updates, force frames).
#[derive(Error, Debug, Clone)]
pub enum BridgeError {
    /// A command payload could not be decoded
    #[error("Malformed command: {0}")]
    MalformedCommand(String),

    /// A force frame could not be decoded
    #[error("Malformed force frame: {0}")]
    MalformedFrame(String),

    /// The actuator link is not connected
    #[error("Actuator link not connected")]
    NotConnected,

    /// An unknown command type was received
    #[error("Unknown command type: {0}")]
    UnknownCommand(String),
}

/// Settings error type
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file could not be loaded.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// The configuration file could not be saved.
    #[error("Failed to save settings: {0}")]
    SaveError(String),

    /// A configuration value is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// The offending configuration key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Top-level error type unifying all layers
#[derive(Error, Debug)]
pub enum Error {
    /// Simulation engine error
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Control-plane bridge error
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// Settings error
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Generic error with a message
    #[error("{0}")]
    Other(String),
}

/// Result type alias used throughout the workspace
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_stock_message() {
        let err = SimulationError::InvalidStock {
            length_in: 0.0,
            diameter_in: 1.25,
        };
        assert!(err.to_string().contains("0\""));
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = SimulationError::CrashLatched.into();
        assert!(matches!(err, Error::Simulation(_)));
    }
}
