//! Rotation gizmo

use glam::{Quat, Vec3};

use rtt_core::constants::{COMPONENT_EPSILON, COS_45_DEG};
use rtt_core::{
    Domain, GizmoConfig, Plane, RaySegment, SnapAccumulator, SupportPlane, Transform, TransformationKind,
};

use super::handle::{HandleRegistry, HandleShape};
use super::{GizmoState, GizmoVariant};
use crate::camera::CameraPose;

const RING_RADIUS: f32 = 1.0;
const RING_THICKNESS: f32 = 0.08;

/// Rotates objects about one of the gizmo axes
#[derive(Debug, Clone)]
pub struct RotateGizmo {
    state: GizmoState,
    /// Last decided facing sign per axis, kept while the camera sits on a
    /// gizmo axis plane
    previous_view_sign: Vec3,
}

impl RotateGizmo {
    /// Create a rotation gizmo with one ring per axis
    pub fn new(config: &GizmoConfig) -> Self {
        let mut handles = HandleRegistry::new();
        for (name, domain, normal) in [
            ("X Ring", Domain::AxisX, Vec3::X),
            ("Y Ring", Domain::AxisY, Vec3::Y),
            ("Z Ring", Domain::AxisZ, Vec3::Z),
        ] {
            handles.register(
                name,
                domain,
                HandleShape::Ring {
                    normal,
                    radius: RING_RADIUS,
                    thickness: RING_THICKNESS,
                },
            );
        }
        Self {
            state: GizmoState::new(handles, config),
            previous_view_sign: Vec3::ONE,
        }
    }
}

impl GizmoVariant for RotateGizmo {
    fn kind(&self) -> TransformationKind {
        TransformationKind::Rotate
    }

    fn state(&self) -> &GizmoState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut GizmoState {
        &mut self.state
    }

    /// Rings rotate about a single axis; the pointer is read on the ring plane
    fn support_plane(&self, domain: Domain, _look: Vec3) -> Option<SupportPlane> {
        let axis = self.state.basis().axis(domain)?;
        Some(SupportPlane {
            normal: axis,
            axis: Some(axis),
        })
    }

    fn delta_transform(&mut self, look: Vec3, ray: RaySegment, domain: Domain) -> Transform {
        let mut delta = Transform::NEUTRAL_DELTA;

        if self.state.are_rays_valid(&ray) {
            if let Some(plane) = self.support_plane(domain, look) {
                if let Some(angle) = self.swept_angle(plane.normal, look, &ray) {
                    delta.rotation = Quat::from_axis_angle(plane.normal, angle);
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
        _domain: Domain,
        snap_value: f32,
    ) -> Transform {
        let mut snapped = *delta;
        snapped.rotation = accumulator.snap_rotation(delta.rotation, snap_value);
        snapped
    }

    /// Mirror each axis toward the camera so the visible half of every ring
    /// faces the viewer
    fn scene_scale(&mut self, camera: &CameraPose) -> Vec3 {
        let base = self.state.base_scene_scale(camera);
        let offset = self
            .state
            .basis()
            .project(self.state.location() - camera.position);

        let pick = |offset: f32, previous: f32| {
            if offset > COMPONENT_EPSILON {
                -1.0
            } else if offset < -COMPONENT_EPSILON {
                1.0
            } else {
                previous
            }
        };
        let sign = Vec3::new(
            pick(offset.x, self.previous_view_sign.x),
            pick(offset.y, self.previous_view_sign.y),
            pick(offset.z, self.previous_view_sign.z),
        );
        self.previous_view_sign = sign;
        base * sign
    }
}

impl RotateGizmo {
    /// Signed angle swept about `axis` between the cached and current ray.
    ///
    /// A ring facing the camera is read on its own plane. A ring seen at a
    /// grazing angle is not: the pointer motion on the view plane is
    /// projected onto the tangent at the ring point nearest the viewer and
    /// divided by the on-screen ring radius.
    fn swept_angle(&self, axis: Vec3, look: Vec3, current: &RaySegment) -> Option<f32> {
        let look = look.normalize_or_zero();
        if look.dot(axis).abs() > COS_45_DEG {
            return self.angle_on_ring_plane(axis, current);
        }

        let tangent = look.cross(axis).normalize_or_zero();
        let radius = RING_RADIUS * self.state.scene_scale().abs().max_element();
        if tangent == Vec3::ZERO || radius <= COMPONENT_EPSILON {
            return None;
        }
        let motion = self.state.plane_motion(-look, current)?;
        Some(motion.dot(tangent) / radius)
    }

    fn angle_on_ring_plane(&self, axis: Vec3, current: &RaySegment) -> Option<f32> {
        let center = self.state.location();
        let plane = Plane::from_point_normal(center, axis);
        let before = self.state.previous_ray()?.intersect_plane(&plane)? - center;
        let now = current.intersect_plane(&plane)? - center;

        if before.length_squared() <= COMPONENT_EPSILON || now.length_squared() <= COMPONENT_EPSILON
        {
            return None;
        }
        Some(axis.dot(before.cross(now)).atan2(before.dot(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtt_core::SpaceType;
    use std::f32::consts::FRAC_PI_2;

    fn ray_through(point: Vec3) -> RaySegment {
        RaySegment::new(point + Vec3::new(0.0, 0.0, 10.0), point - Vec3::new(0.0, 0.0, 10.0))
    }

    fn gizmo() -> RotateGizmo {
        RotateGizmo::new(&GizmoConfig::default())
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let mut gizmo = gizmo();
        gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::X), Domain::AxisZ);
        let delta = gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::Y), Domain::AxisZ);

        let expected = Quat::from_rotation_z(FRAC_PI_2);
        assert!(
            delta.rotation.abs_diff_eq(expected, 1e-5),
            "rotation: {:?}",
            delta.rotation
        );
        assert_eq!(delta.translation, Vec3::ZERO);
        assert_eq!(delta.scale, Vec3::ZERO);
    }

    #[test]
    fn test_opposite_sweep_has_negative_angle() {
        let mut gizmo = gizmo();
        gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::Y), Domain::AxisZ);
        let delta = gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::X), Domain::AxisZ);
        assert!(delta.rotation.abs_diff_eq(Quat::from_rotation_z(-FRAC_PI_2), 1e-5));
    }

    #[test]
    fn test_edge_on_ring_follows_tangent() {
        let mut gizmo = gizmo();
        // Looking down -Z, the X ring is seen edge-on as a vertical line
        let mut total = Quat::IDENTITY;
        for y in [0.1, 0.4, 0.7] {
            let ray = ray_through(Vec3::new(0.0, y, 0.0));
            total = gizmo.delta_transform(Vec3::NEG_Z, ray, Domain::AxisX).rotation * total;
        }
        let expected = Quat::from_rotation_x(-0.6);
        assert!(total.abs_diff_eq(expected, 1e-4), "edge-on X ring rotation: {:?}", total);

        // Dragging right across the edge-on Y ring turns it positively
        let mut gizmo = RotateGizmo::new(&GizmoConfig::default());
        gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::ZERO), Domain::AxisY);
        let ray = ray_through(Vec3::new(0.25, 0.0, 0.0));
        let delta = gizmo.delta_transform(Vec3::NEG_Z, ray, Domain::AxisY);
        assert!(
            delta.rotation.abs_diff_eq(Quat::from_rotation_y(0.25), 1e-4),
            "rotation: {:?}",
            delta.rotation
        );
    }

    #[test]
    fn test_tangent_angle_shrinks_with_ring_size() {
        let mut gizmo = gizmo();
        gizmo.state_mut().place(&Transform::IDENTITY, SpaceType::World);
        gizmo.state.scene_scale = Vec3::splat(2.0);
        gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::ZERO), Domain::AxisX);
        let ray = ray_through(Vec3::new(0.0, -0.5, 0.0));
        let delta = gizmo.delta_transform(Vec3::NEG_Z, ray, Domain::AxisX);
        assert!(
            delta.rotation.abs_diff_eq(Quat::from_rotation_x(0.25), 1e-4),
            "rotation: {:?}",
            delta.rotation
        );
    }

    #[test]
    fn test_plane_and_free_domains_do_not_rotate() {
        let mut gizmo = gizmo();
        assert!(gizmo.support_plane(Domain::PlaneXY, Vec3::NEG_Z).is_none());
        assert!(gizmo.support_plane(Domain::Free, Vec3::NEG_Z).is_none());

        gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::X), Domain::Free);
        let delta = gizmo.delta_transform(Vec3::NEG_Z, ray_through(Vec3::Y), Domain::Free);
        assert!(delta.is_neutral_delta(1e-6));
    }

    #[test]
    fn test_local_ring_uses_gizmo_axis() {
        let mut gizmo = gizmo();
        let anchor = Transform::from_rotation_translation(Quat::from_rotation_y(0.3), Vec3::ZERO);
        gizmo.state_mut().place(&anchor, SpaceType::Local);
        let plane = gizmo.support_plane(Domain::AxisX, Vec3::NEG_Z).unwrap();
        assert!(plane.normal.abs_diff_eq(anchor.rotation * Vec3::X, 1e-6));
    }

    #[test]
    fn test_rotation_snap_keeps_residue() {
        let gizmo = gizmo();
        let mut acc = SnapAccumulator::new();
        let delta = Transform::delta_rotation(Quat::from_rotation_z(28f32.to_radians()));

        let snapped = gizmo.snapped_transform(&mut acc, &delta, Domain::AxisZ, 15.0);
        let (_, angle) = rtt_core::snap::signed_axis_angle(snapped.rotation);
        assert!((angle.to_degrees() - 30.0).abs() < 1e-3, "snapped to {}", angle.to_degrees());

        let expected = Quat::from_rotation_z((-2f32).to_radians());
        assert!(
            acc.residue().rotation.abs_diff_eq(expected, 1e-4),
            "residue {:?}",
            acc.residue().rotation
        );
    }

    #[test]
    fn test_scene_scale_faces_camera() {
        let mut gizmo = gizmo();
        gizmo.state_mut().place(&Transform::IDENTITY, SpaceType::World);

        let camera = CameraPose::look_at(Vec3::new(5.0, 5.0, -10.0), Vec3::ZERO, 60.0);
        let scale = gizmo.scene_scale(&camera);
        assert!(scale.x > 0.0 && scale.y > 0.0, "scale: {:?}", scale);
        assert!(scale.z < 0.0, "scale: {:?}", scale);

        // Camera on the YZ plane keeps the previous X sign
        let camera = CameraPose::look_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO, 60.0);
        let scale = gizmo.scene_scale(&camera);
        assert!(scale.x > 0.0);
        assert!(scale.y > 0.0);
        assert!(scale.z > 0.0);
    }

    #[test]
    fn test_ring_hit_test() {
        let gizmo = gizmo();
        let hit = gizmo
            .state()
            .hit_test(Vec3::new(1.0, 0.0, 5.0), Vec3::NEG_Z)
            .expect("ray should hit the Z ring");
        assert_eq!(hit.domain, Domain::AxisZ);
    }
}
