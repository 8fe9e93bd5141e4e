//! Tool-stock collision detection and material removal
//!
//! Runs once per simulation step: an axial (facing) check against the
//! stock face, a radial (turning) scan across the insert width, and the
//! parting-off collapse when the tool tip reaches the rotational
//! centerline. Cuts only commit while the spindle is turning; against a
//! stopped spindle the engine reports penetration without mutating the
//! stock (the virtual-wall regime the crash detector watches for).

use crate::config::SimConfig;
use crate::stock::StockModel;
use crate::tool::ToolGeometry;
use crate::tracker::ToolState;
use lathesim_core::MachineState;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-frame collision and engagement output
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngagementResult {
    /// Depth the tool has pushed past the stock face, inches
    pub axial_penetration: f64,
    /// Deepest radial penetration across the insert scan, inches
    pub radial_penetration: f64,
    /// Signed effective engagement depth, inches
    ///
    /// Positive means the engaged material lies predominantly left of
    /// the tool center, producing an axial force that pushes the tool
    /// right (+Z). This is the one axial sign convention used
    /// throughout the engine.
    pub net_signed_engagement: f64,
    /// Tool is in contact through the stock face
    pub axial_collision: bool,
    /// Tool is in contact through the radial profile
    pub radial_collision: bool,
    /// The workpiece separated from the bar stock this frame
    pub parted_off: bool,
}

impl EngagementResult {
    /// True when the tool is touching material on either axis
    pub fn any_contact(&self) -> bool {
        self.axial_collision || self.radial_collision
    }
}

/// Collision engine: detects penetration and removes material
#[derive(Debug, Clone)]
pub struct CollisionEngine {
    config: SimConfig,
    geometry: ToolGeometry,
}

impl CollisionEngine {
    /// Create an engine for the given grid configuration and insert shape
    pub fn new(config: SimConfig, geometry: ToolGeometry) -> Self {
        Self { config, geometry }
    }

    /// The insert geometry in use
    pub fn geometry(&self) -> &ToolGeometry {
        &self.geometry
    }

    /// Run one collision step, removing material when the spindle turns
    pub fn step(
        &self,
        stock: &mut StockModel,
        tool: &ToolState,
        machine: &MachineState,
    ) -> EngagementResult {
        let mut result = EngagementResult::default();

        self.facing_check(stock, tool, machine, &mut result);
        self.radial_scan(stock, tool, machine, &mut result);
        self.parting_check(stock, tool, machine, &mut result);

        result
    }

    /// Axial (facing) check against the rightmost face sample
    ///
    /// Engagement requires the tool tip to overlap the face radially.
    /// The cut only commits past the yield buffer: the stock shortens by
    /// the excess over the buffer, leaving a contact cushion so force
    /// does not toggle on/off at the boundary.
    fn facing_check(
        &self,
        stock: &mut StockModel,
        tool: &ToolState,
        machine: &MachineState,
        result: &mut EngagementResult,
    ) {
        let face_pos = stock.length_in();
        if face_pos <= 0.0 {
            return;
        }
        let face_radius = stock.radius_at(stock.sample_count().saturating_sub(1));
        if tool.z > face_pos || tool.x >= face_radius {
            return;
        }

        result.axial_collision = true;
        result.axial_penetration = face_pos - tool.z;

        if machine.spindle_on() && result.axial_penetration > self.config.yield_buffer_in {
            let new_length = tool.z + self.config.yield_buffer_in;
            debug!(
                penetration = result.axial_penetration,
                new_length, "facing cut"
            );
            stock.truncate_to_length(new_length);
        }
    }

    /// Radial (turning) scan across the insert width
    ///
    /// The tool-tip axial center snaps to the nearest integer sample,
    /// which symmetrizes the V-groove and avoids sub-sample bias cutting
    /// one shoulder deeper than the other. Samples left of center
    /// accumulate positive signed area, samples right of center
    /// negative; the asymmetry is what lets the axial force distinguish
    /// pushing material right from pushing it left.
    fn radial_scan(
        &self,
        stock: &mut StockModel,
        tool: &ToolState,
        machine: &MachineState,
        result: &mut EngagementResult,
    ) {
        let center_idx = stock.index_of(tool.z);
        let center_pos = stock.position_of(center_idx.max(0) as usize);
        let span =
            (self.geometry.half_width * self.config.samples_per_inch).ceil() as i64
                + self.config.scan_margin_samples as i64;
        let spacing = stock.sample_spacing();

        let mut signed_area = 0.0;
        for i in (center_idx - span)..=(center_idx + span) {
            if i < 0 || i as usize >= stock.sample_count() {
                continue;
            }
            let idx = i as usize;
            let stock_radius = stock.radius_at(idx);
            if stock_radius <= 0.0 {
                continue;
            }

            let lateral = stock.position_of(idx) - center_pos;
            let tool_radius = tool.x + self.geometry.radius_offset(lateral);
            if tool_radius >= stock_radius {
                continue;
            }

            let penetration = stock_radius - tool_radius;
            result.radial_collision = true;
            result.radial_penetration = result.radial_penetration.max(penetration);

            // Left of center pushes right, right of center pushes left
            if lateral < 0.0 {
                signed_area += penetration * spacing;
            } else if lateral > 0.0 {
                signed_area -= penetration * spacing;
            }

            if machine.spindle_on() && penetration > self.config.yield_buffer_in {
                stock.cut_to(idx, tool_radius + self.config.yield_buffer_in);
            }
        }

        result.net_signed_engagement = signed_area * self.config.area_to_depth_scale;
    }

    /// Parting-off: collapse everything at and beyond the tip index
    ///
    /// Fires when the tool tip is within tolerance of the rotational
    /// centerline with the spindle turning. The far side loses its
    /// support in a single frame; the logical length truncates to the
    /// tip position in the same step.
    fn parting_check(
        &self,
        stock: &mut StockModel,
        tool: &ToolState,
        machine: &MachineState,
        result: &mut EngagementResult,
    ) {
        if !machine.spindle_on() || tool.x > self.config.centerline_tolerance_in {
            return;
        }
        let tip_idx = stock.index_of(tool.z);
        if tip_idx < 0 || tip_idx as usize >= stock.sample_count() {
            return;
        }
        let tip_idx = tip_idx as usize;
        debug!(tip_idx, z = tool.z, "parting-off");
        stock.collapse_from(tip_idx);
        stock.truncate_to(tip_idx);
        result.parted_off = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lathesim_core::Axis;

    fn engine() -> CollisionEngine {
        CollisionEngine::new(SimConfig::default(), ToolGeometry::default())
    }

    fn stock() -> StockModel {
        StockModel::new(4.5, 1.25, 60.0).unwrap()
    }

    fn tool_at(z: f64, x: f64) -> ToolState {
        ToolState {
            z,
            x,
            prev_z: z,
            prev_x: x,
            active_axis: Axis::Radial,
        }
    }

    fn rpm(spindle_rpm: f64) -> MachineState {
        MachineState {
            spindle_rpm,
            feed_rate: 2.0,
            depth_of_cut: 0.02,
        }
    }

    #[test]
    fn test_no_contact_no_effect() {
        let e = engine();
        let mut s = stock();
        // Tool clear of the stock both axially and radially
        let r = e.step(&mut s, &tool_at(5.0, 0.7), &rpm(500.0));
        assert!(!r.any_contact());
        assert_eq!(r.radial_penetration, 0.0);
        assert_eq!(r.net_signed_engagement, 0.0);
        assert!((s.length_in() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_facing_virtual_wall_with_stopped_spindle() {
        let e = engine();
        let mut s = stock();
        // Tool touches the face with the spindle stopped
        let r = e.step(&mut s, &tool_at(4.48, 0.3), &rpm(0.0));
        assert!(r.axial_collision);
        assert!((s.length_in() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_facing_cut_shortens_by_excess_over_buffer() {
        let cfg = SimConfig {
            yield_buffer_in: 0.0167,
            ..SimConfig::default()
        };
        let e = CollisionEngine::new(cfg, ToolGeometry::default());
        let mut s = stock();
        let r = e.step(&mut s, &tool_at(4.48, 0.3), &rpm(500.0));
        assert!(r.axial_collision);
        // Penetration 0.02, buffer 0.0167: length drops by 0.0033
        assert!((s.length_in() - (4.48 + 0.0167)).abs() < 1e-9);
    }

    #[test]
    fn test_facing_requires_radial_overlap() {
        let e = engine();
        let mut s = stock();
        // Past the face plane but radially above the stock
        let r = e.step(&mut s, &tool_at(4.48, 0.7), &rpm(500.0));
        assert!(!r.axial_collision);
        assert!((s.length_in() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_radial_scan_cuts_groove() {
        let e = engine();
        let mut s = stock();
        let tool = tool_at(2.0, 0.6);
        let r = e.step(&mut s, &tool, &rpm(500.0));
        assert!(r.radial_collision);
        assert!((r.radial_penetration - 0.025).abs() < 1e-9);
        // The committed cut leaves the yield-buffer cushion
        let center = s.index_of(2.0) as usize;
        assert!((s.radius_at(center) - (0.6 + 1.0 / 60.0)).abs() < 1e-9);
        // Shoulders outside the insert width are untouched
        assert_eq!(s.radius_at(center + 20), 0.625);
    }

    #[test]
    fn test_radial_scan_symmetric_groove() {
        let e = engine();
        let mut s = stock();
        // Center exactly on a sample: signed area cancels
        let r = e.step(&mut s, &tool_at(2.0, 0.6), &rpm(500.0));
        assert!(r.net_signed_engagement.abs() < 1e-9);
        let center = s.index_of(2.0) as usize;
        for off in 1..=6 {
            assert!((s.radius_at(center - off) - s.radius_at(center + off)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_shoulder_contact_gives_signed_engagement() {
        let e = engine();
        let mut s = stock();
        // Pre-cut a step so material remains only left of the tool center
        for i in s.index_of(2.0) as usize..s.sample_count() {
            s.cut_to(i, 0.5);
        }
        let r = e.step(&mut s, &tool_at(2.05, 0.55), &rpm(500.0));
        assert!(r.radial_collision);
        // Material left of center: convention says push right (+)
        assert!(r.net_signed_engagement > 0.0);
    }

    #[test]
    fn test_stopped_spindle_records_but_does_not_cut() {
        let e = engine();
        let mut s = stock();
        let r = e.step(&mut s, &tool_at(2.0, 0.6), &rpm(0.0));
        assert!(r.radial_collision);
        assert!((r.radial_penetration - 0.025).abs() < 1e-9);
        let center = s.index_of(2.0) as usize;
        assert_eq!(s.radius_at(center), 0.625);
    }

    #[test]
    fn test_parting_off_atomic() {
        let e = engine();
        let mut s = stock();
        // Index 300 of a 400-sample bar
        let mut s2 = StockModel::new(400.0 / 60.0, 1.25, 60.0).unwrap();
        std::mem::swap(&mut s, &mut s2);
        let z = s.position_of(300);
        let r = e.step(&mut s, &tool_at(z, 0.002), &rpm(500.0));
        assert!(r.parted_off);
        for i in 300..400 {
            assert_eq!(s.radius_at(i), 0.0);
        }
        assert!((s.length_in() - z).abs() < 1e-9);
    }

    #[test]
    fn test_no_parting_with_stopped_spindle() {
        let e = engine();
        let mut s = stock();
        let r = e.step(&mut s, &tool_at(2.0, 0.001), &rpm(0.0));
        assert!(!r.parted_off);
        assert!(s.radius_at(200) > 0.0);
    }
}
