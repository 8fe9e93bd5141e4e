//! Karnopp stick-slip friction rendering
//!
//! Two regimes: `Slip` renders viscous plus Coulomb drag opposing the
//! motion; `Rest` anchors a stiff virtual spring at the position where
//! the handle came to rest, saturating at the static friction bound.
//! The switching thresholds are hysteretic - the model only latches to
//! `Rest` below `v_off` and only releases at `v_on` or on breakaway,
//! with `v_off < v_on` by construction - so the state machine cannot
//! chatter around a single velocity threshold.

use crate::config::KarnoppConfig;
use crate::force::RenderInput;
use serde::{Deserialize, Serialize};

/// Friction regime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FrictionState {
    /// Moving: viscous + Coulomb drag
    Slip,
    /// Held: stiff spring anchored at the rest position
    Rest {
        /// Position captured when the handle came to rest, inches
        anchor: f64,
    },
}

/// Persistent Karnopp state carried across frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KarnoppState {
    /// Current friction regime
    pub state: FrictionState,
}

impl Default for KarnoppState {
    fn default() -> Self {
        Self {
            state: FrictionState::Slip,
        }
    }
}

impl KarnoppState {
    /// Advance the state machine one frame and return the friction force
    pub fn update(&mut self, cfg: &KarnoppConfig, input: &RenderInput) -> f64 {
        let v = input.velocity;
        match self.state {
            FrictionState::Slip => {
                if v.abs() < cfg.v_off {
                    // Latch to rest and anchor at the current position;
                    // the spring force is zero at the instant of capture.
                    self.state = FrictionState::Rest {
                        anchor: input.position,
                    };
                    0.0
                } else {
                    -(cfg.b_viscous * v) - cfg.f_coulomb * v.signum()
                }
            }
            FrictionState::Rest { anchor } => {
                if v.abs() >= cfg.v_on {
                    self.state = FrictionState::Slip;
                    return -(cfg.b_viscous * v) - cfg.f_coulomb * v.signum();
                }
                let force =
                    (-cfg.k_static * (input.position - anchor)).clamp(-cfg.f_static, cfg.f_static);
                if force.abs() >= cfg.f_static && v.abs() >= cfg.v_off {
                    // Breakaway: the static bond has saturated and the
                    // handle is still being pushed through it.
                    self.state = FrictionState::Slip;
                    return -(cfg.b_viscous * v) - cfg.f_coulomb * v.signum();
                }
                force
            }
        }
    }

    /// True while latched in the rest regime
    pub fn is_resting(&self) -> bool {
        matches!(self.state, FrictionState::Rest { .. })
    }
}
