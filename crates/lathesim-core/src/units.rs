//! Unit conversion utilities
//!
//! Handles conversion between inches and millimeters, handle-wheel
//! degrees and tool travel, and spindle speed to cutting surface speed.
//! The simulation operates in inches throughout (the stock grid is
//! specified in inches); metric conversion exists for display only.

/// Convert millimeters to inches
pub fn mm_to_inches(value_mm: f64) -> f64 {
    value_mm / 25.4
}

/// Convert inches to millimeters
pub fn inches_to_mm(value_in: f64) -> f64 {
    value_in * 25.4
}

/// Convert handle-wheel rotation to linear tool travel
///
/// * `delta_degrees` - Handle rotation since the last sample
/// * `travel_per_rev_in` - Leadscrew travel per full handle revolution
///
/// A typical cross-slide leadscrew advances 0.1" per revolution.
pub fn degrees_to_travel(delta_degrees: f64, travel_per_rev_in: f64) -> f64 {
    delta_degrees / 360.0 * travel_per_rev_in
}

/// Cutting surface speed in surface feet per minute
///
/// `SFM = RPM * diameter * pi / 12` with the diameter in inches.
/// Used to drive the texture vibration frequency while engaged.
pub fn surface_feet_per_minute(spindle_rpm: f64, diameter_in: f64) -> f64 {
    spindle_rpm * diameter_in * std::f64::consts::PI / 12.0
}
