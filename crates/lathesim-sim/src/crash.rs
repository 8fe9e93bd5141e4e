//! Crash detection
//!
//! A small latch that freezes the session on an unrecoverable hard-stop:
//! the tool striking stationary stock from outside. Cutting into a
//! stopped spindle is the canonical operator error this trainer exists
//! to teach, so the failure is terminal - every synthesis path goes
//! quiet until the session is explicitly reset.

use crate::collision::EngagementResult;
use lathesim_core::MachineState;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Crash latch state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashState {
    /// Session running normally
    Normal,
    /// Terminal: tool struck stationary stock
    Crashed,
}

impl Default for CrashState {
    fn default() -> Self {
        Self::Normal
    }
}

/// Observes per-frame collision facts and latches on a crash
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CrashDetector {
    state: CrashState,
    /// Contact state of the previous frame; a crash requires the tool
    /// to arrive from outside the stock, not rest in contact
    had_contact: bool,
}

impl CrashDetector {
    /// Observe one frame of collision facts
    ///
    /// Once `Crashed`, the detector is idempotent: every further call
    /// returns `Crashed` regardless of input.
    pub fn observe(&mut self, engagement: &EngagementResult, machine: &MachineState) -> CrashState {
        if self.state == CrashState::Crashed {
            return CrashState::Crashed;
        }

        let contact = engagement.any_contact();
        if contact && !self.had_contact && !machine.spindle_on() {
            warn!(
                axial = engagement.axial_collision,
                radial = engagement.radial_collision,
                "tool struck stationary stock - session crash"
            );
            self.state = CrashState::Crashed;
        }
        self.had_contact = contact;
        self.state
    }

    /// Current latch state
    pub fn state(&self) -> CrashState {
        self.state
    }

    /// True once the latch has tripped
    pub fn is_crashed(&self) -> bool {
        self.state == CrashState::Crashed
    }

    /// Clear the latch (explicit session restart only)
    pub fn reset(&mut self) {
        self.state = CrashState::Normal;
        self.had_contact = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> EngagementResult {
        EngagementResult {
            radial_collision: true,
            radial_penetration: 0.01,
            ..EngagementResult::default()
        }
    }

    fn clear() -> EngagementResult {
        EngagementResult::default()
    }

    fn stopped() -> MachineState {
        MachineState::default()
    }

    fn turning() -> MachineState {
        MachineState {
            spindle_rpm: 500.0,
            ..MachineState::default()
        }
    }

    #[test]
    fn test_impact_on_stopped_stock_crashes() {
        let mut d = CrashDetector::default();
        assert_eq!(d.observe(&clear(), &stopped()), CrashState::Normal);
        assert_eq!(d.observe(&contact(), &stopped()), CrashState::Crashed);
    }

    #[test]
    fn test_contact_while_turning_is_fine() {
        let mut d = CrashDetector::default();
        assert_eq!(d.observe(&contact(), &turning()), CrashState::Normal);
        assert_eq!(d.observe(&contact(), &turning()), CrashState::Normal);
    }

    #[test]
    fn test_resting_contact_does_not_crash() {
        let mut d = CrashDetector::default();
        // Tool engaged while the spindle turns...
        d.observe(&contact(), &turning());
        // ...then the spindle stops with the tool still resting in contact
        assert_eq!(d.observe(&contact(), &stopped()), CrashState::Normal);
    }

    #[test]
    fn test_crash_is_idempotent() {
        let mut d = CrashDetector::default();
        d.observe(&clear(), &stopped());
        d.observe(&contact(), &stopped());
        assert!(d.is_crashed());
        // Any further input, including zero-penetration frames and a
        // restarted spindle, keeps the latch crashed
        assert_eq!(d.observe(&clear(), &turning()), CrashState::Crashed);
        assert_eq!(d.observe(&contact(), &turning()), CrashState::Crashed);
    }

    #[test]
    fn test_reset_clears_latch() {
        let mut d = CrashDetector::default();
        d.observe(&clear(), &stopped());
        d.observe(&contact(), &stopped());
        assert!(d.is_crashed());
        d.reset();
        assert_eq!(d.state(), CrashState::Normal);
        d.observe(&contact(), &turning());
        assert!(!d.is_crashed());
    }
}
