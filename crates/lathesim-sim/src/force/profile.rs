//! Bump-and-valley position profile rendering
//!
//! Renders a half-sine force hill (or valley, with negative amplitude)
//! over each configured window of the active axis, zero everywhere
//! else. Windows are validated to be mutually exclusive in position, so
//! at most one contributes at any point.

use crate::config::ProfileWindow;

/// Force at a position along the active axis
pub fn bump_valley_force(windows: &[ProfileWindow], position: f64) -> f64 {
    for w in windows {
        if position >= w.start && position <= w.end {
            let phase = (position - w.start) / (w.end - w.start);
            return w.amplitude * (std::f64::consts::PI * phase).sin();
        }
    }
    0.0
}
