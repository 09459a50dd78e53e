//! Grid snapping with residue carry-forward
//!
//! A raw per-frame delta rarely crosses a grid line on its own. Instead of
//! discarding the part below the grid step, it is kept in a residue register
//! and added to the next frame's delta, so the sum of snapped deltas plus the
//! final residue always equals the sum of raw deltas.

use glam::{Quat, Vec3};

use crate::transform::Transform;
use crate::types::Domain;

/// Round `value` to the nearest multiple of `grid`.
///
/// Halves round up. A zero grid leaves the value untouched.
pub fn grid_snap(value: f32, grid: f32) -> f32 {
    if grid == 0.0 {
        return value;
    }
    ((value + grid * 0.5) / grid).floor() * grid
}

/// Grid step for snapping the length of a multi-axis offset.
///
/// Snapping N axes independently grows the Euclidean length by sqrt(N),
/// so the step is scaled the same way to keep the apparent spacing uniform.
pub fn domain_snap_step(snap_value: f32, domain: Domain) -> f32 {
    let domains = domain.dimension_count().max(1) as f32;
    (snap_value * snap_value * domains).sqrt()
}

/// Snap the length of `accumulated` to `step`, keeping its direction
pub fn snap_vector_length(accumulated: Vec3, step: f32) -> Vec3 {
    accumulated.normalize_or_zero() * grid_snap(accumulated.length(), step)
}

/// Signed rotation angle in radians, folded into (-PI, PI]
pub fn signed_axis_angle(rotation: Quat) -> (Vec3, f32) {
    let (axis, mut angle) = rotation.normalize().to_axis_angle();
    if angle > std::f32::consts::PI {
        angle -= std::f32::consts::TAU;
    }
    (axis, angle)
}

/// Residue register for one gizmo session.
///
/// Holds the un-snapped remainder of previous frames as a delta transform.
/// Reset to [`Transform::NEUTRAL_DELTA`] whenever an interaction begins or
/// the transformation kind changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAccumulator {
    residue: Transform,
}

impl Default for SnapAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapAccumulator {
    pub fn new() -> Self {
        Self {
            residue: Transform::NEUTRAL_DELTA,
        }
    }

    pub fn reset(&mut self) {
        self.residue.reset_delta();
    }

    pub fn residue(&self) -> &Transform {
        &self.residue
    }

    pub fn is_empty(&self) -> bool {
        self.residue.is_neutral_delta(f32::EPSILON)
    }

    /// Snap the translation of `delta` along with the carried residue.
    ///
    /// Returns the snapped translation and stores the remainder.
    pub fn snap_translation(&mut self, delta: Vec3, domain: Domain, snap_value: f32) -> Vec3 {
        if snap_value == 0.0 {
            return delta;
        }
        let added = self.residue.translation + delta;
        let snapped = snap_vector_length(added, domain_snap_step(snap_value, domain));
        self.residue.translation = added - snapped;
        snapped
    }

    /// Snap the scale offset of `delta` along with the carried residue
    pub fn snap_scale(&mut self, delta: Vec3, domain: Domain, snap_value: f32) -> Vec3 {
        if snap_value == 0.0 {
            return delta;
        }
        let added = self.residue.scale + delta;
        let snapped = snap_vector_length(added, domain_snap_step(snap_value, domain));
        self.residue.scale = added - snapped;
        snapped
    }

    /// Snap the rotation angle of `delta` to multiples of `snap_degrees`.
    ///
    /// The delta is composed on the left of the carried residue; both share
    /// the rotation axis of a single-axis session.
    pub fn snap_rotation(&mut self, delta: Quat, snap_degrees: f32) -> Quat {
        if snap_degrees == 0.0 {
            return delta;
        }
        let added = (delta * self.residue.rotation).normalize();
        let (axis, angle) = signed_axis_angle(added);
        let degrees = angle.to_degrees();
        let snapped = grid_snap(degrees, snap_degrees);

        self.residue.rotation = Quat::from_axis_angle(axis, (degrees - snapped).to_radians());
        Quat::from_axis_angle(axis, snapped.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_snap() {
        assert_eq!(grid_snap(4.0, 10.0), 0.0);
        assert_eq!(grid_snap(8.0, 10.0), 10.0);
        assert_eq!(grid_snap(5.0, 10.0), 10.0);
        assert_eq!(grid_snap(-4.0, 10.0), 0.0);
        assert_eq!(grid_snap(-6.0, 10.0), -10.0);
        assert_eq!(grid_snap(3.3, 0.0), 3.3);
    }

    #[test]
    fn test_domain_snap_step() {
        assert!((domain_snap_step(10.0, Domain::AxisX) - 10.0).abs() < 1e-5);
        assert!((domain_snap_step(10.0, Domain::PlaneXY) - 10.0 * 2f32.sqrt()).abs() < 1e-4);
        assert!((domain_snap_step(10.0, Domain::Free) - 10.0 * 3f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_axis_translation_scenario() {
        let mut acc = SnapAccumulator::new();

        let first = acc.snap_translation(Vec3::new(4.0, 0.0, 0.0), Domain::AxisX, 10.0);
        assert!(first.abs_diff_eq(Vec3::ZERO, 1e-5), "first snap: {:?}", first);
        assert!(acc.residue().translation.abs_diff_eq(Vec3::new(4.0, 0.0, 0.0), 1e-5));

        let second = acc.snap_translation(Vec3::new(4.0, 0.0, 0.0), Domain::AxisX, 10.0);
        assert!(second.abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-5), "second snap: {:?}", second);
        assert!(
            acc.residue().translation.abs_diff_eq(Vec3::new(-2.0, 0.0, 0.0), 1e-5),
            "residue: {:?}",
            acc.residue().translation
        );
    }

    #[test]
    fn test_residue_conservation() {
        let mut acc = SnapAccumulator::new();
        let raw = [
            Vec3::new(0.7, 1.3, 0.0),
            Vec3::new(2.2, -0.4, 0.0),
            Vec3::new(-0.9, 0.8, 0.0),
            Vec3::new(3.1, 2.7, 0.0),
            Vec3::new(0.05, -1.9, 0.0),
        ];

        let mut snapped_sum = Vec3::ZERO;
        let mut raw_sum = Vec3::ZERO;
        for delta in raw {
            snapped_sum += acc.snap_translation(delta, Domain::PlaneXY, 1.5);
            raw_sum += delta;
        }
        let total = snapped_sum + acc.residue().translation;
        assert!(
            total.abs_diff_eq(raw_sum, 1e-4),
            "snapped {:?} + residue {:?} != raw {:?}",
            snapped_sum,
            acc.residue().translation,
            raw_sum
        );
    }

    #[test]
    fn test_exact_multiple_leaves_no_residue() {
        let mut acc = SnapAccumulator::new();
        // 3-4-5 triangle: length 5 on a plane with step sqrt(2) * (5 / sqrt(2))
        let snap_value = 5.0 / 2f32.sqrt();
        let snapped = acc.snap_translation(Vec3::new(3.0, 4.0, 0.0), Domain::PlaneXY, snap_value);
        assert!(snapped.abs_diff_eq(Vec3::new(3.0, 4.0, 0.0), 1e-4));
        assert!(acc.residue().translation.length() < 1e-4);
    }

    #[test]
    fn test_zero_snap_value_is_passthrough() {
        let mut acc = SnapAccumulator::new();
        let delta = Vec3::new(1.234, 0.0, 0.0);
        assert_eq!(acc.snap_translation(delta, Domain::AxisX, 0.0), delta);
        assert!(acc.is_empty());
    }

    #[test]
    fn test_rotation_snap_carries_residue() {
        let mut acc = SnapAccumulator::new();
        let step = Quat::from_rotation_z(4f32.to_radians());

        let first = acc.snap_rotation(step, 10.0);
        assert!(signed_axis_angle(first).1.abs() < 1e-4);

        let second = acc.snap_rotation(step, 10.0);
        let (axis, angle) = signed_axis_angle(second);
        assert!(axis.abs_diff_eq(Vec3::Z, 1e-4), "axis {:?}", axis);
        assert!((angle.to_degrees() - 10.0).abs() < 1e-2, "angle {}", angle.to_degrees());

        let residue = acc.residue().rotation;
        let rz = (residue * Vec3::X).y.atan2((residue * Vec3::X).x).to_degrees();
        assert!((rz + 2.0).abs() < 1e-2, "residue angle {}", rz);
    }

    #[test]
    fn test_rotation_residue_conservation() {
        let mut acc = SnapAccumulator::new();
        let mut raw_total = Quat::IDENTITY;
        let mut snapped_total = Quat::IDENTITY;

        for degrees in [4.0f32, 7.0, -3.0, 11.0, 2.5, -6.0] {
            let delta = Quat::from_rotation_z(degrees.to_radians());
            raw_total = delta * raw_total;
            snapped_total = acc.snap_rotation(delta, 5.0) * snapped_total;

            let (_, angle) = signed_axis_angle(snapped_total);
            let steps = angle.to_degrees() / 5.0;
            assert!((steps - steps.round()).abs() < 1e-3, "off-grid total {}", angle.to_degrees());
        }

        // 15.5 degrees raw: 15 applied, 0.5 left over
        let total = (acc.residue().rotation * snapped_total).normalize();
        assert!(
            total.dot(raw_total).abs() > 1.0 - 1e-5,
            "snapped {:?} + residue {:?} != raw {:?}",
            snapped_total,
            acc.residue().rotation,
            raw_total
        );
        let (_, residue) = signed_axis_angle(acc.residue().rotation);
        assert!((residue.to_degrees().abs() - 0.5).abs() < 1e-2, "residue {}", residue.to_degrees());
    }

    #[test]
    fn test_reset_clears_residue() {
        let mut acc = SnapAccumulator::new();
        acc.snap_translation(Vec3::new(0.3, 0.0, 0.0), Domain::AxisX, 1.0);
        assert!(!acc.is_empty());
        acc.reset();
        assert!(acc.is_empty());
        assert_eq!(acc.residue().scale, Vec3::ZERO);
    }
}
