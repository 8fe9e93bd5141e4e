//! Simulation and force-rendering configuration
//!
//! Every gain and tolerance the engine uses is carried here rather than
//! hard-coded: the area-to-depth scale, yield buffer, handle gearing, and
//! the per-mode force parameters are calibration values, tunable without
//! touching the engine.

use lathesim_core::{Error, Result, SimulationError};
use serde::{Deserialize, Serialize};

/// Geometry and cutting configuration for the simulation grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Stock profile samples per inch of axial length
    pub samples_per_inch: f64,
    /// Default stock length in inches
    pub stock_length_in: f64,
    /// Default stock diameter in inches
    pub stock_diameter_in: f64,
    /// Penetration cushion before a cut commits, in inches
    ///
    /// Cutting only engages once penetration exceeds this buffer, which
    /// prevents the contact force from toggling on/off at the boundary.
    pub yield_buffer_in: f64,
    /// Radial distance from the centerline at which parting-off triggers
    pub centerline_tolerance_in: f64,
    /// Scale converting signed engagement area (in^2) to an effective
    /// axial penetration depth (in)
    pub area_to_depth_scale: f64,
    /// Leadscrew travel per full handle revolution, inches
    pub travel_per_rev_in: f64,
    /// Extra samples scanned on each side of the tool half-width
    pub scan_margin_samples: usize,
    /// Simulation step rate in Hz
    pub step_rate_hz: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            samples_per_inch: 60.0,
            stock_length_in: 4.5,
            stock_diameter_in: 1.25,
            // One grid cell at 60 samples/in
            yield_buffer_in: 1.0 / 60.0,
            centerline_tolerance_in: 0.005,
            area_to_depth_scale: 12.0,
            travel_per_rev_in: 0.1,
            scan_margin_samples: 2,
            step_rate_hz: 60.0,
        }
    }
}

impl SimConfig {
    /// Nominal step interval in seconds
    pub fn step_dt(&self) -> f64 {
        1.0 / self.step_rate_hz
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.samples_per_inch <= 0.0 {
            return Err(invalid("samples_per_inch", "must be positive"));
        }
        if self.stock_length_in <= 0.0 || self.stock_diameter_in <= 0.0 {
            return Err(Error::Simulation(SimulationError::InvalidStock {
                length_in: self.stock_length_in,
                diameter_in: self.stock_diameter_in,
            }));
        }
        if self.yield_buffer_in < 0.0 {
            return Err(invalid("yield_buffer_in", "must be non-negative"));
        }
        if self.step_rate_hz <= 0.0 {
            return Err(invalid("step_rate_hz", "must be positive"));
        }
        Ok(())
    }
}

/// Karnopp stick-slip friction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KarnoppConfig {
    /// Viscous coefficient in the slip regime (N·s/in)
    pub b_viscous: f64,
    /// Coulomb friction magnitude in the slip regime (N)
    pub f_coulomb: f64,
    /// Stiff spring constant in the rest regime (N/in)
    pub k_static: f64,
    /// Static friction saturation (N)
    pub f_static: f64,
    /// Velocity above which the rest state always releases (in/s)
    pub v_on: f64,
    /// Velocity below which the slip state may latch to rest (in/s)
    ///
    /// Must be strictly less than `v_on`; the gap is the hysteresis band
    /// that prevents chatter at the threshold.
    pub v_off: f64,
}

impl Default for KarnoppConfig {
    fn default() -> Self {
        Self {
            b_viscous: 8.0,
            f_coulomb: 3.0,
            k_static: 400.0,
            f_static: 6.0,
            v_on: 0.1,
            v_off: 0.01,
        }
    }
}

/// Hard-surface impact rendering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardSurfaceConfig {
    /// Spring stiffness against penetration (N/in)
    pub stiffness: f64,
    /// Inbound speed above which the impact transient fires (in/s)
    pub impact_velocity_threshold: f64,
    /// Transient amplitude per unit inbound speed (N·s/in)
    pub impulse_amplitude: f64,
    /// Transient decay rate (1/s)
    pub impulse_decay: f64,
    /// Transient frequency (Hz)
    pub impulse_frequency_hz: f64,
}

impl Default for HardSurfaceConfig {
    fn default() -> Self {
        Self {
            stiffness: 600.0,
            impact_velocity_threshold: 0.05,
            impulse_amplitude: 40.0,
            impulse_decay: 25.0,
            impulse_frequency_hz: 20.0,
        }
    }
}

/// A single bump or valley window along the active axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileWindow {
    /// Window start position (inches)
    pub start: f64,
    /// Window end position (inches)
    pub end: f64,
    /// Peak force; positive renders a bump, negative a valley (N)
    pub amplitude: f64,
}

/// Textured-vibration rendering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TexturedConfig {
    /// Speed below which the texture is silent (in/s)
    pub velocity_threshold: f64,
    /// Buzz amplitude per unit speed (N·s/in)
    pub amplitude_scale: f64,
    /// Per-burst decay rate (1/s)
    pub decay: f64,
    /// Buzz frequency (Hz)
    pub frequency_hz: f64,
    /// Burst retrigger period (s)
    pub burst_period: f64,
}

impl Default for TexturedConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: 0.02,
            amplitude_scale: 30.0,
            decay: 40.0,
            frequency_hz: 80.0,
            burst_period: 0.1,
        }
    }
}

/// Force synthesis configuration shared by all rendering modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceConfig {
    /// Hard safety bound on any output force magnitude (N)
    pub max_force_n: f64,
    /// Virtual-wall stiffness (N/in)
    pub wall_stiffness: f64,
    /// Damping coefficient per unit penetration (N·s/in^2)
    pub damping_coeff: f64,
    /// Karnopp friction parameters
    pub karnopp: KarnoppConfig,
    /// Hard-surface impact parameters
    pub hard_surface: HardSurfaceConfig,
    /// Bump/valley windows; must not overlap in position
    pub profile_windows: Vec<ProfileWindow>,
    /// Textured-vibration parameters
    pub textured: TexturedConfig,
    /// Linear map from surface feet per minute to vibration Hz
    pub sfm_to_hz: f64,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            max_force_n: 50.0,
            wall_stiffness: 800.0,
            damping_coeff: 1200.0,
            karnopp: KarnoppConfig::default(),
            hard_surface: HardSurfaceConfig::default(),
            profile_windows: vec![
                ProfileWindow {
                    start: 1.0,
                    end: 1.5,
                    amplitude: 10.0,
                },
                ProfileWindow {
                    start: 2.5,
                    end: 3.0,
                    amplitude: -10.0,
                },
            ],
            textured: TexturedConfig::default(),
            sfm_to_hz: 1.0,
        }
    }
}

impl ForceConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_force_n <= 0.0 {
            return Err(invalid("max_force_n", "must be positive"));
        }
        if self.karnopp.v_off >= self.karnopp.v_on {
            return Err(invalid("karnopp.v_off", "must be less than v_on"));
        }
        for (i, w) in self.profile_windows.iter().enumerate() {
            if w.end <= w.start {
                return Err(invalid("profile_windows", "window end must exceed start"));
            }
            for other in &self.profile_windows[i + 1..] {
                if w.start < other.end && other.start < w.end {
                    return Err(invalid("profile_windows", "windows must not overlap"));
                }
            }
        }
        Ok(())
    }
}

fn invalid(name: &str, reason: &str) -> Error {
    Error::Simulation(SimulationError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}
