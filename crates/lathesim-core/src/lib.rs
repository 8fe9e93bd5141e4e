//! # LatheSim Core
//!
//! Core types, units, and error handling for LatheSim.
//! Provides the shared vocabulary used by the simulation engine,
//! the control-plane bridge, and the settings layer.

pub mod error;
pub mod types;
pub mod units;

pub use error::{BridgeError, Error, Result, SettingsError, SimulationError};
pub use types::{Axis, MachineState, SkillLevel, TrainingMode};
pub use units::{degrees_to_travel, inches_to_mm, mm_to_inches, surface_feet_per_minute};
