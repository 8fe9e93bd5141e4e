//! Shared data types for LatheSim
//!
//! This module provides:
//! - Machine axis selection (radial X / axial Z)
//! - Training mode and skill level (as used by the GUI command vocabulary)
//! - Read-only cutting parameters supplied by the control plane

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Machine axis receiving haptic force and tool displacement
///
/// A lathe handle wheel drives one axis at a time: the cross-slide
/// (radial, X) or the carriage (axial, Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Cross-slide axis (X) - tool moves toward/away from the centerline
    Radial,
    /// Carriage axis (Z) - tool moves along the spindle axis
    Axial,
}

impl Default for Axis {
    fn default() -> Self {
        Self::Axial
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radial => write!(f, "X"),
            Self::Axial => write!(f, "Z"),
        }
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" | "radial" => Ok(Self::Radial),
            "z" | "axial" => Ok(Self::Axial),
            _ => Err(format!("Unknown axis: {}", s)),
        }
    }
}

/// Training mode selected from the GUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingMode {
    /// Free manual operation
    Manual,
    /// Facing exercise (cutting the end of the stock)
    Facing,
    /// Turning exercise (reducing the stock diameter)
    Turning,
    /// Boring exercise (internal cutting)
    Boring,
}

impl Default for TrainingMode {
    fn default() -> Self {
        Self::Manual
    }
}

impl fmt::Display for TrainingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Facing => write!(f, "facing"),
            Self::Turning => write!(f, "turning"),
            Self::Boring => write!(f, "boring"),
        }
    }
}

impl FromStr for TrainingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "facing" => Ok(Self::Facing),
            "turning" => Ok(Self::Turning),
            "boring" => Ok(Self::Boring),
            _ => Err(format!("Unknown training mode: {}", s)),
        }
    }
}

/// Operator skill level selected from the GUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    /// New operator
    Beginner,
    /// Some machine time
    Intermediate,
    /// Experienced operator
    Advanced,
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self::Beginner
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(format!("Unknown skill level: {}", s)),
        }
    }
}

/// Cutting parameters supplied by the control plane
///
/// Read-only inputs to the simulation engine; updated by
/// `set_parameters` commands from the GUI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineState {
    /// Spindle speed in revolutions per minute
    pub spindle_rpm: f64,
    /// Tool feed rate in inches per minute
    pub feed_rate: f64,
    /// Nominal depth of cut in inches
    pub depth_of_cut: f64,
}

impl Default for MachineState {
    fn default() -> Self {
        Self {
            spindle_rpm: 0.0,
            feed_rate: 0.0,
            depth_of_cut: 0.0,
        }
    }
}

impl MachineState {
    /// True when the spindle is turning
    pub fn spindle_on(&self) -> bool {
        self.spindle_rpm > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_parse() {
        assert_eq!(Axis::from_str("x").unwrap(), Axis::Radial);
        assert_eq!(Axis::from_str("Z").unwrap(), Axis::Axial);
        assert!(Axis::from_str("y").is_err());
    }

    #[test]
    fn test_mode_roundtrip() {
        for mode in [
            TrainingMode::Manual,
            TrainingMode::Facing,
            TrainingMode::Turning,
            TrainingMode::Boring,
        ] {
            assert_eq!(TrainingMode::from_str(&mode.to_string()).unwrap(), mode);
        }
    }

    #[test]
    fn test_axis_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Axis::Radial).unwrap(), "\"radial\"");
    }
}
