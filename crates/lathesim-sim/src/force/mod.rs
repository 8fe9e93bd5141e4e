//! Haptic force synthesis
//!
//! Turns per-frame engagement state into a force command for the handle
//! motor. One rendering mode is active per session - selected at runtime
//! through [`RenderMode`], not per-frame branching - and each mode keeps
//! its own persistent state across frames (friction anchor, impact
//! timer, texture phase), reset only on an explicit workpiece reset.
//!
//! Every output is clamped to the configured maximum magnitude before it
//! leaves this module. That clamp is a hard safety bound on the physical
//! actuator, not a tuning parameter.

mod karnopp;
mod profile;
mod transient;

pub use karnopp::{FrictionState, KarnoppState};
pub use profile::bump_valley_force;
pub use transient::{HardSurfaceState, TexturedState};

use crate::collision::EngagementResult;
use crate::config::ForceConfig;
use lathesim_core::{units, Axis, MachineState};
use serde::{Deserialize, Serialize};

/// Force and vibration command handed to the actuator link
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceCommand {
    /// Force along the radial axis; positive pushes the tool away from
    /// the centerline (N)
    pub force_x: f64,
    /// Force along the axial axis; positive pushes the tool away from
    /// the chuck (N)
    pub force_z: f64,
    /// Texture vibration frequency; zero while disengaged (Hz)
    pub vibration_hz: f64,
}

impl ForceCommand {
    /// A zero command (emergency stop / crash output)
    pub fn zero() -> Self {
        Self::default()
    }

    /// Magnitude of the force on the active axis
    pub fn magnitude(&self) -> f64 {
        self.force_x.abs().max(self.force_z.abs())
    }
}

/// Per-frame input handed to a rendering mode
#[derive(Debug, Clone, Copy)]
pub struct RenderInput {
    /// Non-negative penetration depth on the active axis, inches
    pub penetration: f64,
    /// Direction the material pushes the tool along the active axis
    /// (+1.0 or -1.0); zero when not in contact
    pub direction: f64,
    /// Tool position along the active axis, inches
    pub position: f64,
    /// Tool velocity along the active axis, in/s
    pub velocity: f64,
    /// Step interval, seconds
    pub dt: f64,
}

/// Selectable haptic rendering algorithm
///
/// The variant is a runtime choice so modes can be swapped between
/// sessions without rebuilding. Variants carry their persistent state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Stiff spring against penetration; zero outside contact
    VirtualWall,
    /// Dissipative drag proportional to penetration and velocity
    Damping,
    /// Karnopp stick-slip friction with rest/slip hysteresis
    Karnopp(KarnoppState),
    /// Spring plus a decaying-sinusoid impact transient
    HardSurface(HardSurfaceState),
    /// Position-profile bumps and valleys along the active axis
    BumpValley,
    /// Velocity-gated buzzing texture cue
    Textured(TexturedState),
}

impl Default for RenderMode {
    fn default() -> Self {
        Self::VirtualWall
    }
}

impl RenderMode {
    /// Discard mode-internal persistent state
    pub fn reset(&mut self) {
        match self {
            Self::Karnopp(state) => *state = KarnoppState::default(),
            Self::HardSurface(state) => *state = HardSurfaceState::default(),
            Self::Textured(state) => *state = TexturedState::default(),
            Self::VirtualWall | Self::Damping | Self::BumpValley => {}
        }
    }
}

/// Synthesizes the per-frame force command from engagement state
#[derive(Debug, Clone)]
pub struct ForceSynthesizer {
    config: ForceConfig,
    mode: RenderMode,
}

impl ForceSynthesizer {
    /// Create a synthesizer with the given rendering mode
    pub fn new(config: ForceConfig, mode: RenderMode) -> Self {
        Self { config, mode }
    }

    /// The active rendering mode
    pub fn mode(&self) -> &RenderMode {
        &self.mode
    }

    /// Swap the rendering mode, discarding the old mode's state
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    /// Reset mode-internal persistent state (workpiece reset)
    pub fn reset(&mut self) {
        self.mode.reset();
    }

    /// Compute the force command for one frame
    ///
    /// Only the engagement belonging to the active axis is rendered; the
    /// other axis's engagement is computed upstream but produces no
    /// force. Vibration frequency derives from cutting surface speed and
    /// is active only while engaged.
    pub fn synthesize(
        &mut self,
        engagement: &EngagementResult,
        axis: Axis,
        position: f64,
        velocity: f64,
        dt: f64,
        machine: &MachineState,
        cutting_diameter_in: f64,
    ) -> ForceCommand {
        let (penetration, direction, engaged) = match axis {
            Axis::Radial => (
                engagement.radial_penetration,
                if engagement.radial_collision { 1.0 } else { 0.0 },
                engagement.radial_collision,
            ),
            Axis::Axial => {
                // Facing contact and the signed scan area share one
                // convention: positive pushes the tool away from the chuck.
                let signed =
                    engagement.axial_penetration + engagement.net_signed_engagement;
                (
                    signed.abs(),
                    if engagement.any_contact() {
                        signed.signum()
                    } else {
                        0.0
                    },
                    engagement.any_contact(),
                )
            }
        };

        let input = RenderInput {
            penetration: if engaged { penetration } else { 0.0 },
            direction,
            position,
            velocity,
            dt,
        };

        let raw = self.render(&input);
        let max = self.config.max_force_n;
        let force = raw.clamp(-max, max);

        let vibration_hz = if engaged && machine.spindle_on() {
            let sfm = units::surface_feet_per_minute(machine.spindle_rpm, cutting_diameter_in);
            (sfm * self.config.sfm_to_hz).max(0.0)
        } else {
            0.0
        };

        let mut command = ForceCommand {
            force_x: 0.0,
            force_z: 0.0,
            vibration_hz,
        };
        match axis {
            Axis::Radial => command.force_x = force,
            Axis::Axial => command.force_z = force,
        }
        command
    }

    fn render(&mut self, input: &RenderInput) -> f64 {
        let cfg = &self.config;
        match &mut self.mode {
            RenderMode::VirtualWall => {
                // Continuous at the boundary: zero force at zero penetration
                input.direction
                    * (cfg.wall_stiffness * input.penetration.max(0.0)).clamp(0.0, cfg.max_force_n)
            }
            RenderMode::Damping => {
                // Dissipative, not restoring: zero at rest even under penetration
                -cfg.damping_coeff * input.penetration * input.velocity
            }
            RenderMode::Karnopp(state) => state.update(&cfg.karnopp, input),
            RenderMode::HardSurface(state) => state.update(&cfg.hard_surface, input),
            RenderMode::BumpValley => bump_valley_force(&cfg.profile_windows, input.position),
            RenderMode::Textured(state) => state.update(&cfg.textured, input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForceConfig;

    fn contact(radial_pen: f64) -> EngagementResult {
        EngagementResult {
            radial_penetration: radial_pen,
            radial_collision: radial_pen > 0.0,
            ..EngagementResult::default()
        }
    }

    fn machine(rpm: f64) -> MachineState {
        MachineState {
            spindle_rpm: rpm,
            feed_rate: 0.0,
            depth_of_cut: 0.0,
        }
    }

    fn synth(mode: RenderMode) -> ForceSynthesizer {
        ForceSynthesizer::new(ForceConfig::default(), mode)
    }

    #[test]
    fn test_wall_zero_at_boundary() {
        let mut s = synth(RenderMode::VirtualWall);
        let cmd = s.synthesize(
            &contact(0.0),
            Axis::Radial,
            0.6,
            0.0,
            1.0 / 60.0,
            &machine(500.0),
            1.25,
        );
        assert_eq!(cmd.force_x, 0.0);
        assert_eq!(cmd.vibration_hz, 0.0);
    }

    #[test]
    fn test_wall_monotone_and_clamped() {
        let mut s = synth(RenderMode::VirtualWall);
        let mut last = 0.0;
        for p in [0.001, 0.005, 0.01, 0.05, 0.2, 1.0] {
            let cmd = s.synthesize(
                &contact(p),
                Axis::Radial,
                0.6,
                0.0,
                1.0 / 60.0,
                &machine(500.0),
                1.25,
            );
            assert!(cmd.force_x >= last);
            assert!(cmd.force_x <= 50.0);
            last = cmd.force_x;
        }
        // Deep penetration saturates at the hard bound
        assert_eq!(last, 50.0);
    }

    #[test]
    fn test_damping_zero_at_rest() {
        let mut s = synth(RenderMode::Damping);
        let cmd = s.synthesize(
            &contact(0.05),
            Axis::Radial,
            0.6,
            0.0,
            1.0 / 60.0,
            &machine(500.0),
            1.25,
        );
        assert_eq!(cmd.force_x, 0.0);
    }

    #[test]
    fn test_damping_opposes_motion() {
        let mut s = synth(RenderMode::Damping);
        let inward = s.synthesize(
            &contact(0.05),
            Axis::Radial,
            0.6,
            -0.02,
            1.0 / 60.0,
            &machine(500.0),
            1.25,
        );
        assert!(inward.force_x > 0.0);
        let outward = s.synthesize(
            &contact(0.05),
            Axis::Radial,
            0.6,
            0.02,
            1.0 / 60.0,
            &machine(500.0),
            1.25,
        );
        assert!(outward.force_x < 0.0);
    }

    #[test]
    fn test_only_active_axis_rendered() {
        let mut s = synth(RenderMode::VirtualWall);
        let engagement = EngagementResult {
            radial_penetration: 0.05,
            radial_collision: true,
            ..EngagementResult::default()
        };
        let cmd = s.synthesize(
            &engagement,
            Axis::Axial,
            2.0,
            0.0,
            1.0 / 60.0,
            &machine(500.0),
            1.25,
        );
        // Radial engagement produces no axial force
        assert_eq!(cmd.force_z, 0.0);
        assert_eq!(cmd.force_x, 0.0);
    }

    #[test]
    fn test_axial_direction_follows_signed_engagement() {
        let mut s = synth(RenderMode::VirtualWall);
        let engagement = EngagementResult {
            radial_collision: true,
            net_signed_engagement: 0.02,
            ..EngagementResult::default()
        };
        let push_right = s.synthesize(
            &engagement,
            Axis::Axial,
            2.0,
            0.0,
            1.0 / 60.0,
            &machine(500.0),
            1.25,
        );
        assert!(push_right.force_z > 0.0);

        let engagement = EngagementResult {
            radial_collision: true,
            net_signed_engagement: -0.02,
            ..EngagementResult::default()
        };
        let push_left = s.synthesize(
            &engagement,
            Axis::Axial,
            2.0,
            0.0,
            1.0 / 60.0,
            &machine(500.0),
            1.25,
        );
        assert!(push_left.force_z < 0.0);
    }

    #[test]
    fn test_vibration_tracks_sfm() {
        let mut s = synth(RenderMode::VirtualWall);
        let cmd = s.synthesize(
            &contact(0.01),
            Axis::Radial,
            0.6,
            0.0,
            1.0 / 60.0,
            &machine(500.0),
            1.25,
        );
        // SFM = 500 * 1.25 * pi / 12, mapped 1:1 by default
        assert!((cmd.vibration_hz - 163.62).abs() < 0.01);
        // Disengaged: silent
        let quiet = s.synthesize(
            &contact(0.0),
            Axis::Radial,
            0.6,
            0.0,
            1.0 / 60.0,
            &machine(500.0),
            1.25,
        );
        assert_eq!(quiet.vibration_hz, 0.0);
    }

    #[test]
    fn test_mode_swap_resets_state() {
        let mut s = synth(RenderMode::Karnopp(KarnoppState::default()));
        s.set_mode(RenderMode::VirtualWall);
        assert!(matches!(s.mode(), RenderMode::VirtualWall));
    }
}
