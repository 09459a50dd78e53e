//! Translation gizmo

use glam::Vec3;

use rtt_core::{
    Domain, GizmoConfig, RaySegment, SnapAccumulator, SupportPlane, Transform, TransformationKind,
    resolve_support_plane,
};

use super::handle::{HandleRegistry, register_axis_plane_free};
use super::{GizmoState, GizmoVariant, project_onto_axis};

/// Moves objects along an axis, across a plane or freely in the view plane
#[derive(Debug, Clone)]
pub struct TranslateGizmo {
    state: GizmoState,
}

impl TranslateGizmo {
    /// Create a translation gizmo with arrow, plane and center handles
    pub fn new(config: &GizmoConfig) -> Self {
        let mut handles = HandleRegistry::new();
        register_axis_plane_free(&mut handles, 0.25, 0.5);
        Self {
            state: GizmoState::new(handles, config),
        }
    }
}

impl GizmoVariant for TranslateGizmo {
    fn kind(&self) -> TransformationKind {
        TransformationKind::Translate
    }

    fn state(&self) -> &GizmoState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut GizmoState {
        &mut self.state
    }

    fn support_plane(&self, domain: Domain, look: Vec3) -> Option<SupportPlane> {
        resolve_support_plane(domain, look, &self.state.basis())
    }

    fn delta_transform(&mut self, look: Vec3, ray: RaySegment, domain: Domain) -> Transform {
        let mut delta = Transform::NEUTRAL_DELTA;

        if self.state.are_rays_valid(&ray) {
            if let Some(plane) = self.support_plane(domain, look) {
                if let Some(motion) = self.state.plane_motion(plane.normal, &ray) {
                    delta.translation = match plane.axis {
                        Some(axis) => project_onto_axis(motion, axis),
                        None => motion,
                    };
                }
            }
        }

        self.state.update_rays(ray);
        delta
    }

    fn snapped_transform(
        &self,
        accumulator: &mut SnapAccumulator,
        delta: &Transform,
        domain: Domain,
        snap_value: f32,
    ) -> Transform {
        let mut snapped = *delta;
        snapped.translation = accumulator.snap_translation(delta.translation, domain, snap_value);
        snapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use rtt_core::SpaceType;

    fn ray_through(point: Vec3) -> RaySegment {
        RaySegment::new(point + Vec3::new(0.0, 0.0, 10.0), point - Vec3::new(0.0, 0.0, 10.0))
    }

    fn gizmo() -> TranslateGizmo {
        TranslateGizmo::new(&GizmoConfig::default())
    }

    #[test]
    fn test_first_frame_has_no_delta() {
        let mut gizmo = gizmo();
        let delta = gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::ZERO), Domain::AxisX);
        assert!(delta.is_neutral_delta(1e-6));
        assert!(gizmo.state().previous_ray().is_some());
    }

    #[test]
    fn test_axis_motion_is_projected_onto_axis() {
        let mut gizmo = gizmo();
        gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::ZERO), Domain::AxisX);
        let delta =
            gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::new(3.0, 2.0, 0.0)), Domain::AxisX);

        assert!(
            delta.translation.abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-4),
            "delta: {:?}",
            delta.translation
        );
        assert!(delta.translation.cross(Vec3::X).length() < 1e-4);
        assert_eq!(delta.scale, Vec3::ZERO);
    }

    #[test]
    fn test_plane_motion_keeps_both_components() {
        let mut gizmo = gizmo();
        gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::ZERO), Domain::PlaneXY);
        let delta = gizmo.delta_transform(
            Vec3::NEG_Z,
            ray_through(Vec3::new(1.5, -2.0, 0.0)),
            Domain::PlaneXY,
        );
        assert!(delta.translation.abs_diff_eq(Vec3::new(1.5, -2.0, 0.0), 1e-4));
    }

    #[test]
    fn test_local_axis_follows_gizmo_rotation() {
        let mut gizmo = gizmo();
        let anchor = Transform::from_rotation_translation(
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            Vec3::ZERO,
        );
        gizmo.state_mut().place(&anchor, SpaceType::Local);

        // Local X now points along world Y
        gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::ZERO), Domain::AxisX);
        let delta =
            gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::new(1.0, 4.0, 0.0)), Domain::AxisX);
        assert!(
            delta.translation.abs_diff_eq(Vec3::new(0.0, 4.0, 0.0), 1e-4),
            "delta: {:?}",
            delta.translation
        );
    }

    #[test]
    fn test_invalid_ray_yields_neutral_delta_but_is_cached() {
        let mut gizmo = gizmo();
        gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::ZERO), Domain::AxisX);
        let degenerate = RaySegment::new(Vec3::ONE, Vec3::ONE);
        let delta = gizmo.delta_transform(Vec3::NEG_Z, degenerate, Domain::AxisX);
        assert!(delta.is_neutral_delta(1e-6));
        assert_eq!(gizmo.state().previous_ray(), Some(degenerate));
    }

    #[test]
    fn test_none_domain_yields_neutral_delta() {
        let mut gizmo = gizmo();
        gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::ZERO), Domain::None);
        let delta = gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::ONE), Domain::None);
        assert!(delta.is_neutral_delta(1e-6));
    }

    #[test]
    fn test_snapped_transform_carries_residue() {
        let gizmo = gizmo();
        let mut acc = SnapAccumulator::new();
        let step = Transform::delta_translation(Vec3::new(4.0, 0.0, 0.0));

        let first = gizmo.snapped_transform(&mut acc, &step, Domain::AxisX, 10.0);
        let second = gizmo.snapped_transform(&mut acc, &step, Domain::AxisX, 10.0);
        assert!(first.translation.abs_diff_eq(Vec3::ZERO, 1e-5));
        assert!(second.translation.abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-5));
        assert!(acc.residue().translation.abs_diff_eq(Vec3::new(-2.0, 0.0, 0.0), 1e-5));
    }
}
