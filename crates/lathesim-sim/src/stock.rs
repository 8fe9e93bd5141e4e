//! Workpiece stock model
//!
//! The workpiece is a solid of revolution described by its radial profile:
//! one radius sample per axial grid index, spaced `1 / samples_per_inch`
//! apart, plus a continuous logical length (facing removes material in
//! fractions of a grid cell). Material is only ever removed between
//! resets - every mutating operation takes a `min` against the existing
//! radius, shortens the length, or zeroes a tail of the profile.

use lathesim_core::{Error, Result, SimulationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mutable workpiece radial profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockModel {
    /// Radius at each axial sample index, in inches
    samples: Vec<f64>,
    /// Axial samples per inch
    samples_per_inch: f64,
    /// Radius of the raw (uncut) bar
    raw_radius: f64,
    /// Continuous logical length, inches
    length_in: f64,
}

impl StockModel {
    /// Create a new stock model
    ///
    /// Fails fast on non-positive dimensions rather than letting bad
    /// values propagate into the per-step loop.
    pub fn new(length_in: f64, diameter_in: f64, samples_per_inch: f64) -> Result<Self> {
        let mut stock = Self {
            samples: Vec::new(),
            samples_per_inch,
            raw_radius: 0.0,
            length_in: 0.0,
        };
        stock.reset(length_in, diameter_in)?;
        Ok(stock)
    }

    /// Reinitialize every sample to the raw stock radius
    ///
    /// This is the only operation that can increase a radius.
    pub fn reset(&mut self, length_in: f64, diameter_in: f64) -> Result<()> {
        if length_in <= 0.0 || diameter_in <= 0.0 || self.samples_per_inch <= 0.0 {
            return Err(Error::Simulation(SimulationError::InvalidStock {
                length_in,
                diameter_in,
            }));
        }
        let count = (length_in * self.samples_per_inch).round() as usize;
        self.raw_radius = diameter_in / 2.0;
        self.samples = vec![self.raw_radius; count.max(1)];
        self.length_in = length_in;
        debug!(
            length_in,
            diameter_in,
            samples = self.samples.len(),
            "stock reset"
        );
        Ok(())
    }

    /// Radius at an axial sample index; 0 outside the profile
    pub fn radius_at(&self, index: usize) -> f64 {
        self.samples.get(index).copied().unwrap_or(0.0)
    }

    /// Reduce the radius at an index; a cut never increases a radius
    pub fn cut_to(&mut self, index: usize, new_radius: f64) {
        if let Some(r) = self.samples.get_mut(index) {
            *r = r.min(new_radius.max(0.0));
        }
    }

    /// Shorten the logical stock length (facing)
    ///
    /// Length only ever shrinks; samples fully beyond the new face are
    /// dropped, and a partial cell at the face is kept.
    pub fn truncate_to_length(&mut self, new_length_in: f64) {
        if new_length_in >= self.length_in {
            return;
        }
        self.length_in = new_length_in.max(0.0);
        let keep = (self.length_in * self.samples_per_inch).ceil() as usize;
        if keep < self.samples.len() {
            self.samples.truncate(keep.max(1));
        }
    }

    /// Shorten the logical stock length to `index` samples (facing)
    pub fn truncate_to(&mut self, index: usize) {
        self.truncate_to_length(index as f64 / self.samples_per_inch);
    }

    /// Zero every sample at or beyond `index` in a single step (parting-off)
    ///
    /// Once the tool tip crosses the rotational centerline there is no
    /// material left to support the far side, so the drop is
    /// instantaneous rather than gradual.
    pub fn collapse_from(&mut self, index: usize) {
        for r in self.samples.iter_mut().skip(index) {
            *r = 0.0;
        }
    }

    /// Number of axial samples currently in the profile
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Current logical stock length in inches
    pub fn length_in(&self) -> f64 {
        self.length_in
    }

    /// Axial position of a sample index in inches
    pub fn position_of(&self, index: usize) -> f64 {
        index as f64 / self.samples_per_inch
    }

    /// Nearest sample index for an axial position
    pub fn index_of(&self, position_in: f64) -> i64 {
        (position_in * self.samples_per_inch).round() as i64
    }

    /// Axial sample spacing in inches
    pub fn sample_spacing(&self) -> f64 {
        1.0 / self.samples_per_inch
    }

    /// Radius of the raw (uncut) bar
    pub fn raw_radius(&self) -> f64 {
        self.raw_radius
    }

    /// Read-only snapshot of the radial profile for visualization
    pub fn profile(&self) -> &[f64] {
        &self.samples
    }
}
