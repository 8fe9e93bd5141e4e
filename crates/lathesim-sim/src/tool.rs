//! Cutting tool geometry
//!
//! Maps a lateral offset from the tool-tip center to the effective
//! cutting radius of the insert at that offset. The insert nose is a
//! hyperbolic fillet blending the corner radius into the flank slope,
//! so the tool cuts a finite-width V-groove rather than a single point.

use serde::{Deserialize, Serialize};

/// Immutable insert shape description
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolGeometry {
    /// Half the insert width, inches
    pub half_width: f64,
    /// Tip height from the insert shoulder, inches
    pub tip_height: f64,
    /// Nose corner radius, inches
    pub nose_radius: f64,
}

impl Default for ToolGeometry {
    fn default() -> Self {
        Self {
            half_width: 0.1,
            tip_height: 0.08,
            nose_radius: 0.015,
        }
    }
}

impl ToolGeometry {
    /// Radial offset of the cutting edge at a lateral offset from the tip
    ///
    /// Inside `|x| < half_width` the edge follows the hyperbolic fillet
    /// `sqrt((slope*x)^2 + r^2) - r` with `slope = tip_height / half_width`;
    /// this is 0 at the tip center and asymptotically linear toward the
    /// flanks. Outside the half-width the edge extrapolates linearly from
    /// the fillet's edge value.
    pub fn radius_offset(&self, lateral_offset: f64) -> f64 {
        let x = lateral_offset.abs();
        let slope = self.tip_height / self.half_width;
        let fillet = |x: f64| ((slope * x).powi(2) + self.nose_radius.powi(2)).sqrt() - self.nose_radius;
        if x < self.half_width {
            fillet(x)
        } else {
            fillet(self.half_width) + slope * (x - self.half_width)
        }
    }

    /// Full insert width, inches
    pub fn width(&self) -> f64 {
        2.0 * self.half_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_offset_at_tip() {
        let g = ToolGeometry::default();
        assert_eq!(g.radius_offset(0.0), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let g = ToolGeometry::default();
        for x in [0.01, 0.05, 0.09, 0.2] {
            assert!((g.radius_offset(x) - g.radius_offset(-x)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_monotone_away_from_tip() {
        let g = ToolGeometry::default();
        let mut last = 0.0;
        for i in 1..50 {
            let v = g.radius_offset(i as f64 * 0.01);
            assert!(v > last);
            last = v;
        }
    }

    #[test]
    fn test_continuous_at_half_width() {
        let g = ToolGeometry::default();
        let inner = g.radius_offset(g.half_width - 1e-9);
        let outer = g.radius_offset(g.half_width + 1e-9);
        assert!((inner - outer).abs() < 1e-6);
    }

    #[test]
    fn test_linear_extrapolation_outside() {
        let g = ToolGeometry::default();
        let slope = g.tip_height / g.half_width;
        let a = g.radius_offset(g.half_width + 0.1);
        let b = g.radius_offset(g.half_width + 0.2);
        assert!((b - a - slope * 0.1).abs() < 1e-9);
    }
}
