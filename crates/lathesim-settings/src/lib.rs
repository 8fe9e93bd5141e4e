//! # LatheSim Settings
//!
//! Application configuration: connection, simulation, and force
//! rendering sections with JSON/TOML persistence in the platform
//! config directory.

pub mod config;
pub mod manager;

pub use config::{ConnectionSettings, LatheConfig};
pub use manager::SettingsManager;
