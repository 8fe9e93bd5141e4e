//! Simulation session
//!
//! The explicit simulation context: one object owning the stock, tool
//! tracking, collision engine, force synthesizer, and crash latch, with
//! a single `step()` entry point per rendered frame. All engine state is
//! mutated only from here - no globals - so the whole pipeline is
//! independently constructible and testable.

use crate::collision::{CollisionEngine, EngagementResult};
use crate::config::{ForceConfig, SimConfig};
use crate::crash::{CrashDetector, CrashState};
use crate::force::{ForceCommand, ForceSynthesizer, RenderMode};
use crate::stock::StockModel;
use crate::tool::ToolGeometry;
use crate::tracker::{RelativePositionTracker, ToolState};
use lathesim_core::{Axis, MachineState, Result};
use tracing::{debug, info};

/// Clearance at which the tool parks beyond the stock on reset, inches
const PARK_CLEARANCE_IN: f64 = 0.25;

/// Per-step input from the control plane
///
/// `handle_angle_deg` is `None` when the transport delivered no valid
/// sample this frame; the tool state then carries forward unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInput {
    /// Absolute handle-wheel angle in degrees, if a valid sample arrived
    pub handle_angle_deg: Option<f64>,
}

/// Per-step output handed to the actuator link and the display
#[derive(Debug, Clone, Copy)]
pub struct StepOutput {
    /// Force and vibration command for the handle motor
    pub force: ForceCommand,
    /// Collision facts for this frame
    pub engagement: EngagementResult,
    /// Crash latch state after this frame
    pub crash: CrashState,
    /// Tool position after this frame
    pub tool: ToolState,
}

/// A complete training session: stock, tool, haptics, crash latch
#[derive(Debug, Clone)]
pub struct LatheSession {
    sim_config: SimConfig,
    stock: StockModel,
    tracker: RelativePositionTracker,
    collision: CollisionEngine,
    synthesizer: ForceSynthesizer,
    crash: CrashDetector,
    machine: MachineState,
    emergency_stop: bool,
}

impl LatheSession {
    /// Create a session with validated configuration
    pub fn new(
        sim_config: SimConfig,
        force_config: ForceConfig,
        geometry: ToolGeometry,
        mode: RenderMode,
    ) -> Result<Self> {
        sim_config.validate()?;
        force_config.validate()?;

        let stock = StockModel::new(
            sim_config.stock_length_in,
            sim_config.stock_diameter_in,
            sim_config.samples_per_inch,
        )?;
        let tracker = RelativePositionTracker::new(
            sim_config.stock_length_in + PARK_CLEARANCE_IN,
            sim_config.stock_diameter_in / 2.0 + PARK_CLEARANCE_IN,
            sim_config.travel_per_rev_in,
        );
        let collision = CollisionEngine::new(sim_config.clone(), geometry);
        let synthesizer = ForceSynthesizer::new(force_config, mode);

        Ok(Self {
            sim_config,
            stock,
            tracker,
            collision,
            synthesizer,
            crash: CrashDetector::default(),
            machine: MachineState::default(),
            emergency_stop: false,
        })
    }

    /// Run one simulation step
    ///
    /// Emergency stop and a latched crash both short-circuit the
    /// pipeline to a zero force command; a crash additionally freezes
    /// the tool and stock until [`reset_workpiece`](Self::reset_workpiece).
    pub fn step(&mut self, input: StepInput) -> StepOutput {
        if self.emergency_stop || self.crash.is_crashed() {
            return StepOutput {
                force: ForceCommand::zero(),
                engagement: EngagementResult::default(),
                crash: self.crash.state(),
                tool: *self.tracker.state(),
            };
        }

        match input.handle_angle_deg {
            Some(angle) => self.tracker.apply_angle(angle),
            None => self.tracker.hold(),
        }

        let tool = *self.tracker.state();
        let engagement = self.collision.step(&mut self.stock, &tool, &self.machine);
        let crash = self.crash.observe(&engagement, &self.machine);

        let force = if crash == CrashState::Crashed {
            ForceCommand::zero()
        } else {
            let dt = self.sim_config.step_dt();
            self.synthesizer.synthesize(
                &engagement,
                tool.active_axis,
                tool.active_position(),
                tool.active_velocity(dt),
                dt,
                &self.machine,
                self.cutting_diameter(&tool),
            )
        };

        StepOutput {
            force,
            engagement,
            crash,
            tool,
        }
    }

    /// Diameter of the surface being cut, for the SFM vibration map
    fn cutting_diameter(&self, tool: &ToolState) -> f64 {
        let idx = self.stock.index_of(tool.z);
        let radius = if idx >= 0 {
            self.stock.radius_at(idx as usize)
        } else {
            0.0
        };
        if radius > 0.0 {
            2.0 * radius
        } else {
            2.0 * self.stock.raw_radius()
        }
    }

    /// Reset the workpiece and every piece of session state atomically
    ///
    /// Stock profile, force-mode persistent state, tracker baseline, and
    /// the crash latch all reinitialize together; a partial reset would
    /// let stale state (a friction anchor, a tripped latch) leak into
    /// the fresh workpiece.
    pub fn reset_workpiece(&mut self) -> Result<()> {
        self.stock.reset(
            self.sim_config.stock_length_in,
            self.sim_config.stock_diameter_in,
        )?;
        self.tracker.reset(
            self.sim_config.stock_length_in + PARK_CLEARANCE_IN,
            self.sim_config.stock_diameter_in / 2.0 + PARK_CLEARANCE_IN,
        );
        self.synthesizer.reset();
        self.crash.reset();
        self.emergency_stop = false;
        info!("workpiece reset");
        Ok(())
    }

    /// Select which axis the handle wheel drives
    pub fn set_active_axis(&mut self, axis: Axis) {
        debug!(%axis, "active axis");
        self.tracker.set_active_axis(axis);
    }

    /// Update cutting parameters from the control plane
    pub fn set_parameters(&mut self, spindle_rpm: f64, feed_rate: f64) {
        self.machine.spindle_rpm = spindle_rpm.max(0.0);
        self.machine.feed_rate = feed_rate;
    }

    /// Zero the handle baseline for the given axis
    pub fn zero_position(&mut self, axis: Axis) {
        debug!(%axis, "zero position");
        self.tracker.rebaseline();
    }

    /// Engage the emergency stop: force output goes to zero immediately
    pub fn emergency_stop(&mut self) {
        info!("emergency stop engaged");
        self.emergency_stop = true;
    }

    /// Clear the emergency stop
    ///
    /// Angle samples were ignored while the stop was engaged, so the
    /// tracker baseline is stale; the first sample after clearing only
    /// re-baselines and produces no displacement.
    pub fn clear_emergency_stop(&mut self) {
        self.emergency_stop = false;
        self.tracker.rebaseline();
    }

    /// True while the emergency stop is engaged
    pub fn is_emergency_stopped(&self) -> bool {
        self.emergency_stop
    }

    /// Swap the haptic rendering mode
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.synthesizer.set_mode(mode);
    }

    /// Crash latch state
    pub fn crash_state(&self) -> CrashState {
        self.crash.state()
    }

    /// Current cutting parameters
    pub fn machine(&self) -> &MachineState {
        &self.machine
    }

    /// Current tool state
    pub fn tool_state(&self) -> &ToolState {
        self.tracker.state()
    }

    /// Read-only stock profile snapshot for visualization
    pub fn stock_snapshot(&self) -> &[f64] {
        self.stock.profile()
    }

    /// Current logical stock length in inches
    pub fn stock_length(&self) -> f64 {
        self.stock.length_in()
    }
}
