//! Transient force rendering: impact impulses and texture buzz
//!
//! Both modes here synthesize decaying sinusoids. `HardSurface` fires a
//! single impact transient when the tool strikes material with enough
//! inbound speed, superimposed on a spring term. `Textured` emits a
//! retriggering burst train while the handle moves, amplitude scaled by
//! speed - a buzzing cue, not a restoring force.

use crate::config::{HardSurfaceConfig, TexturedConfig};
use crate::force::RenderInput;
use serde::{Deserialize, Serialize};

/// Amplitude ratio below which a transient is considered finished
const TRANSIENT_FLOOR: f64 = 0.02;

/// Persistent hard-surface state carried across frames
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HardSurfaceState {
    /// Seconds since the impact, while a transient is live
    transient_t: Option<f64>,
    /// Peak transient amplitude captured at impact (N)
    transient_amp: f64,
    /// Contact state of the previous frame
    was_in_contact: bool,
}

impl HardSurfaceState {
    /// Advance one frame and return the rendered force
    pub fn update(&mut self, cfg: &HardSurfaceConfig, input: &RenderInput) -> f64 {
        let in_contact = input.penetration > 0.0;
        // Inbound speed is motion against the push-back direction
        let inbound_speed = if input.direction != 0.0 {
            (-input.velocity * input.direction).max(0.0)
        } else {
            input.velocity.abs()
        };

        if in_contact && !self.was_in_contact && inbound_speed >= cfg.impact_velocity_threshold {
            self.transient_t = Some(0.0);
            self.transient_amp = cfg.impulse_amplitude * inbound_speed;
        }
        self.was_in_contact = in_contact;

        let spring = if in_contact {
            input.direction * cfg.stiffness * input.penetration
        } else {
            0.0
        };

        let transient = match self.transient_t {
            Some(t) => {
                let envelope = (-cfg.impulse_decay * t).exp();
                if envelope < TRANSIENT_FLOOR || !in_contact {
                    self.transient_t = None;
                    0.0
                } else {
                    self.transient_t = Some(t + input.dt);
                    input.direction
                        * self.transient_amp
                        * envelope
                        * (2.0 * std::f64::consts::PI * cfg.impulse_frequency_hz * t).sin()
                }
            }
            None => 0.0,
        };

        spring + transient
    }
}

/// Persistent textured-vibration state carried across frames
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TexturedState {
    /// Seconds into the current burst
    burst_t: f64,
}

impl TexturedState {
    /// Advance one frame and return the buzz force
    pub fn update(&mut self, cfg: &TexturedConfig, input: &RenderInput) -> f64 {
        let speed = input.velocity.abs();
        if speed <= cfg.velocity_threshold {
            self.burst_t = 0.0;
            return 0.0;
        }

        let t = self.burst_t;
        self.burst_t += input.dt;
        if self.burst_t >= cfg.burst_period {
            self.burst_t = 0.0;
        }

        cfg.amplitude_scale
            * speed
            * (-cfg.decay * t).exp()
            * (2.0 * std::f64::consts::PI * cfg.frequency_hz * t).sin()
    }
}
