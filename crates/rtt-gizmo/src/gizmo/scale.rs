//! Scale gizmo
//!
//! Pointer motion is measured like translation. Axis domains read it along
//! the gizmo axis. Plane and free domains scale their axes uniformly by the
//! length of the motion, signed by whether the pointer moved up and to the
//! right on screen, so no drag direction is dead for any camera.

use glam::Vec3;

use rtt_core::constants::COMPONENT_EPSILON;
use rtt_core::{
    Domain, GizmoConfig, RaySegment, SnapAccumulator, SpaceType, SupportPlane, Transform,
    TransformationKind, grid_snap, resolve_support_plane,
};

use super::handle::{HandleRegistry, register_axis_plane_free};
use super::{GizmoState, GizmoVariant, screen_axes};

/// Scales objects along their own axes
#[derive(Debug, Clone)]
pub struct ScaleGizmo {
    state: GizmoState,
    sensitivity: f32,
}

impl ScaleGizmo {
    /// Create a scale gizmo with box-ended shafts, plane and center handles
    pub fn new(config: &GizmoConfig) -> Self {
        let mut handles = HandleRegistry::new();
        register_axis_plane_free(&mut handles, 0.15, 0.35);
        Self {
            state: GizmoState::new(handles, config),
            sensitivity: config.scale_sensitivity,
        }
    }

    /// Scale offset in gizmo-local axes for a world-space motion
    fn local_amount(&self, motion: Vec3, look: Vec3, domain: Domain) -> Vec3 {
        let local = self.state.basis().project(motion);
        let uniform = || {
            let (right, up) = screen_axes(look);
            if motion.dot(right + up) < 0.0 {
                -motion.length()
            } else {
                motion.length()
            }
        };
        match domain {
            Domain::AxisX => Vec3::new(local.x, 0.0, 0.0),
            Domain::AxisY => Vec3::new(0.0, local.y, 0.0),
            Domain::AxisZ => Vec3::new(0.0, 0.0, local.z),
            Domain::PlaneXY => {
                let s = uniform();
                Vec3::new(s, s, 0.0)
            }
            Domain::PlaneYZ => {
                let s = uniform();
                Vec3::new(0.0, s, s)
            }
            Domain::PlaneXZ => {
                let s = uniform();
                Vec3::new(s, 0.0, s)
            }
            Domain::Free => Vec3::splat(uniform()),
            Domain::None => Vec3::ZERO,
        }
    }
}

impl GizmoVariant for ScaleGizmo {
    fn kind(&self) -> TransformationKind {
        TransformationKind::Scale
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

    /// The scale delta is returned in world orientation; the controller
    /// brings it into each object's local frame
    fn delta_transform(&mut self, look: Vec3, ray: RaySegment, domain: Domain) -> Transform {
        let mut delta = Transform::NEUTRAL_DELTA;

        if self.state.are_rays_valid(&ray) {
            if let Some(plane) = self.support_plane(domain, look) {
                if let Some(motion) = self.state.plane_motion(plane.normal, &ray) {
                    let amount = self.local_amount(motion, look, domain) * self.sensitivity;
                    delta.scale = self.state.transform().rotate_vector(amount);
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
        snapped.scale = accumulator.snap_scale(delta.scale, domain, snap_value);
        snapped
    }

    /// Round every scale component the delta changed to the snap grid
    fn snapped_transform_per_object(
        &self,
        old: &Transform,
        new: &Transform,
        _domain: Domain,
        snap_value: f32,
    ) -> Transform {
        if snap_value == 0.0 {
            return *new;
        }
        let snap_changed = |old: f32, new: f32| {
            if (new - old).abs() > COMPONENT_EPSILON {
                grid_snap(new, snap_value)
            } else {
                new
            }
        };

        let mut snapped = *new;
        snapped.scale = Vec3::new(
            snap_changed(old.scale.x, new.scale.x),
            snap_changed(old.scale.y, new.scale.y),
            snap_changed(old.scale.z, new.scale.z),
        );
        snapped
    }

    /// Scaling along world axes would shear rotated objects
    fn resolve_space(&self, _requested: SpaceType) -> SpaceType {
        SpaceType::Local
    }
}
