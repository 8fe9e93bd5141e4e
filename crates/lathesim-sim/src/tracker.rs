//! Handle-angle to tool-displacement tracking
//!
//! Converts the stream of absolute handle-wheel angles reported by the
//! motor encoder into incremental tool displacement along the active
//! axis. The first sample after a (re)connection only establishes the
//! baseline - it never produces displacement, so a stale encoder count
//! cannot throw the tool across the workpiece on startup.

use lathesim_core::{units, Axis};
use serde::{Deserialize, Serialize};

/// Current tool position and the previous frame's position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    /// Axial position, inches from the chuck
    pub z: f64,
    /// Radial distance from the centerline, inches
    pub x: f64,
    /// Previous-frame axial position
    pub prev_z: f64,
    /// Previous-frame radial position
    pub prev_x: f64,
    /// Axis currently driven by the handle wheel
    pub active_axis: Axis,
}

impl ToolState {
    /// Velocity along the active axis over one step interval, in/s
    pub fn active_velocity(&self, dt: f64) -> f64 {
        if dt <= 0.0 {
            return 0.0;
        }
        match self.active_axis {
            Axis::Radial => (self.x - self.prev_x) / dt,
            Axis::Axial => (self.z - self.prev_z) / dt,
        }
    }

    /// Position along the active axis
    pub fn active_position(&self) -> f64 {
        match self.active_axis {
            Axis::Radial => self.x,
            Axis::Axial => self.z,
        }
    }
}

/// Converts absolute handle angles into incremental tool motion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativePositionTracker {
    state: ToolState,
    last_angle: Option<f64>,
    travel_per_rev_in: f64,
}

impl RelativePositionTracker {
    /// Create a tracker with the tool parked at the given position
    pub fn new(start_z: f64, start_x: f64, travel_per_rev_in: f64) -> Self {
        Self {
            state: ToolState {
                z: start_z,
                x: start_x,
                prev_z: start_z,
                prev_x: start_x,
                active_axis: Axis::default(),
            },
            last_angle: None,
            travel_per_rev_in,
        }
    }

    /// Current tool state
    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// Select which axis the handle wheel drives
    pub fn set_active_axis(&mut self, axis: Axis) {
        self.state.active_axis = axis;
    }

    /// Re-park the tool and drop the angle baseline
    ///
    /// The next sample re-baselines without producing displacement.
    pub fn reset(&mut self, start_z: f64, start_x: f64) {
        self.state.z = start_z;
        self.state.x = start_x;
        self.state.prev_z = start_z;
        self.state.prev_x = start_x;
        self.last_angle = None;
    }

    /// Drop the angle baseline only (zero_position on the handle)
    pub fn rebaseline(&mut self) {
        self.last_angle = None;
    }

    /// Ingest one absolute handle-angle sample, in degrees
    ///
    /// A raw delta beyond +/-180 degrees is treated as an encoder wrap
    /// and corrected by a full turn: the physical handle is continuous,
    /// so a near-full-turn jump inside one frame can only be a wrap
    /// artifact of the reported absolute angle.
    ///
    /// Sign convention: a positive delta on the axial axis moves the
    /// tool away from the chuck (+Z); on the radial axis it moves the
    /// tool toward the centerline (-X).
    pub fn apply_angle(&mut self, angle_deg: f64) {
        self.state.prev_z = self.state.z;
        self.state.prev_x = self.state.x;

        let last = match self.last_angle {
            Some(a) => a,
            None => {
                self.last_angle = Some(angle_deg);
                return;
            }
        };

        let mut delta = angle_deg - last;
        if delta > 180.0 {
            delta -= 360.0;
        } else if delta < -180.0 {
            delta += 360.0;
        }
        self.last_angle = Some(angle_deg);

        let travel = units::degrees_to_travel(delta, self.travel_per_rev_in);
        match self.state.active_axis {
            Axis::Axial => self.state.z += travel,
            Axis::Radial => self.state.x = (self.state.x - travel).max(0.0),
        }
    }

    /// Carry the previous position forward when no valid sample arrived
    pub fn hold(&mut self) {
        self.state.prev_z = self.state.z;
        self.state.prev_x = self.state.x;
    }
}
