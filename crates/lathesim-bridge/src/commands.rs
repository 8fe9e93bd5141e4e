//! GUI command vocabulary
//!
//! The control-plane GUI speaks JSON objects tagged by a `type` field;
//! the field names here are the wire names and must not drift. Parsing
//! is tolerant: an unknown or malformed command logs a warning and
//! yields `None` rather than an error - a transport glitch must never
//! take the bridge down.

use lathesim_core::{Axis, SkillLevel, TrainingMode};
use lathesim_sim::{LatheSession, RenderMode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

/// Motor-control actions forwarded to the actuator side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotorAction {
    /// Run the handle motor forward
    Forward,
    /// Run the handle motor in reverse
    Reverse,
    /// Stop the handle motor
    Stop,
    /// Set the target motor speed
    Speed,
    /// Command an incremental position move
    Position,
}

/// A command received from the GUI
///
/// Tagged serialization matches the GUI's wire protocol, e.g.
/// `{"type": "set_parameters", "spindle_rpm": 500.0, "feed_rate": 2.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GuiCommand {
    /// Change training mode and skill level
    ModeChange {
        /// Selected training mode
        mode: TrainingMode,
        /// Selected skill level
        #[serde(default)]
        skill_level: SkillLevel,
    },
    /// Reset the session: workpiece, haptics state, crash latch
    Reset,
    /// Zero the handle position baseline for an axis
    ZeroPosition {
        /// Axis name as sent by the GUI ("x" or "z")
        axis: String,
    },
    /// Update cutting parameters
    SetParameters {
        /// Spindle speed in RPM
        #[serde(default)]
        spindle_rpm: f64,
        /// Feed rate in inches per minute
        #[serde(default)]
        feed_rate: f64,
    },
    /// Direct motor control (forwarded to the actuator side)
    MotorControl {
        /// The requested action
        action: MotorAction,
        /// Action argument (speed in RPM, position delta in degrees)
        #[serde(default)]
        value: Option<f64>,
    },
    /// Select which axis the handle wheel drives
    AxisSelect {
        /// Axis name as sent by the GUI ("x" or "z")
        axis: String,
    },
    /// Immediately zero force output and halt synthesis
    EmergencyStop,
    /// Request a status update (answered by the periodic publisher)
    StatusRequest,
}

impl GuiCommand {
    /// Parse a JSON command, tolerating malformed input
    pub fn parse(input: &str) -> Option<Self> {
        match serde_json::from_str(input) {
            Ok(cmd) => Some(cmd),
            Err(e) => {
                warn!(error = %e, "ignoring malformed GUI command");
                None
            }
        }
    }

    /// Serialize to the wire format
    pub fn to_json(&self) -> String {
        // Serializing a fieldful enum with string keys cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Apply a GUI command to a running session
///
/// Motor-control and status-request commands are transport concerns and
/// leave the session untouched; everything else maps onto one session
/// operation.
pub fn apply_to_session(command: &GuiCommand, session: &mut LatheSession) {
    match command {
        GuiCommand::ModeChange { mode, skill_level } => {
            debug!(%mode, %skill_level, "mode change");
            // Training modes map onto rendering algorithms: free manual
            // handling renders friction, cutting modes render the wall.
            let render = match mode {
                TrainingMode::Manual => RenderMode::Karnopp(Default::default()),
                TrainingMode::Facing | TrainingMode::Turning | TrainingMode::Boring => {
                    RenderMode::VirtualWall
                }
            };
            session.set_render_mode(render);
        }
        GuiCommand::Reset => {
            if let Err(e) = session.reset_workpiece() {
                warn!(error = %e, "workpiece reset failed");
            }
        }
        GuiCommand::ZeroPosition { axis } => {
            if let Ok(axis) = Axis::from_str(axis) {
                session.zero_position(axis);
            } else {
                warn!(axis, "zero_position for unknown axis ignored");
            }
        }
        GuiCommand::SetParameters {
            spindle_rpm,
            feed_rate,
        } => {
            session.set_parameters(*spindle_rpm, *feed_rate);
        }
        GuiCommand::AxisSelect { axis } => {
            if let Ok(axis) = Axis::from_str(axis) {
                session.set_active_axis(axis);
            } else {
                warn!(axis, "axis_select for unknown axis ignored");
            }
        }
        GuiCommand::EmergencyStop => {
            session.emergency_stop();
        }
        GuiCommand::MotorControl { .. } | GuiCommand::StatusRequest => {}
    }
}
