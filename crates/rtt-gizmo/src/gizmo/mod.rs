//! Transform gizmo variants
//!
//! Every variant converts pointer-ray motion into a delta transform for one
//! kind of transformation. The shared part (placement, ray cache, progress
//! state, handles, on-screen scale) lives in [`GizmoState`]; the per-kind
//! math is behind [`GizmoVariant`], and [`Gizmo`] is the closed set of
//! variants the controller owns.

mod handle;
mod rotate;
mod scale;
mod translate;

pub use handle::{GizmoHandle, HandleId, HandleRegistry, HandleShape};
pub use rotate::RotateGizmo;
pub use scale::ScaleGizmo;
pub use translate::TranslateGizmo;

use glam::{Quat, Vec3};
use uuid::Uuid;

use rtt_core::constants::COMPONENT_EPSILON;
use rtt_core::{
    Basis, Domain, GizmoConfig, Plane, RaySegment, SnapAccumulator, SpaceType, SupportPlane,
    Transform, TransformationKind,
};

use crate::camera::CameraPose;

/// Unique identity of a spawned gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GizmoId(pub Uuid);

impl GizmoId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GizmoId {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of picking a gizmo handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoHit {
    /// Handle that was hit
    pub handle: HandleId,
    /// Domain the handle activates
    pub domain: Domain,
    /// Ray parameter of the hit
    pub distance: f32,
}

/// State common to all gizmo variants
#[derive(Debug, Clone)]
pub struct GizmoState {
    id: GizmoId,
    transform: Transform,
    scene_scale: Vec3,
    scene_scale_factor: f32,
    previous_ray: Option<RaySegment>,
    in_progress: bool,
    domain: Domain,
    handles: HandleRegistry,
}

impl GizmoState {
    /// Create the state for a freshly spawned gizmo
    pub fn new(handles: HandleRegistry, config: &GizmoConfig) -> Self {
        Self {
            id: GizmoId::new(),
            transform: Transform::IDENTITY,
            scene_scale: Vec3::ONE,
            scene_scale_factor: config.scene_scale_factor,
            previous_ray: None,
            in_progress: false,
            domain: Domain::None,
            handles,
        }
    }

    /// Gizmo identity
    pub fn id(&self) -> GizmoId {
        self.id
    }

    /// World placement of the gizmo (scale is always one)
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Pivot position
    pub fn location(&self) -> Vec3 {
        self.transform.translation
    }

    /// Current gizmo axes
    pub fn basis(&self) -> Basis {
        Basis::from_rotation(self.transform.rotation)
    }

    /// Per-axis on-screen scale of the handles
    pub fn scene_scale(&self) -> Vec3 {
        self.scene_scale
    }

    /// Whether a transform is in progress
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Domain of the transform in progress
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Registered hit volumes
    pub fn handles(&self) -> &HandleRegistry {
        &self.handles
    }

    /// Ray cached from the previous frame
    pub fn previous_ray(&self) -> Option<RaySegment> {
        self.previous_ray
    }

    /// Snap onto `anchor`: its position always, its rotation in local space
    pub fn place(&mut self, anchor: &Transform, space: SpaceType) {
        self.transform = Transform {
            rotation: match space {
                SpaceType::Local => anchor.rotation.normalize(),
                SpaceType::World => Quat::IDENTITY,
            },
            translation: anchor.translation,
            scale: Vec3::ONE,
        };
    }

    /// Enter or leave an interaction.
    ///
    /// Drops the cached ray so the first frame of a new interaction has no
    /// stale baseline to measure against.
    pub fn set_transform_progress_state(&mut self, in_progress: bool, domain: Domain) {
        tracing::debug!(
            "Gizmo {:?} progress: {} ({})",
            self.id.0,
            in_progress,
            domain.name()
        );
        self.in_progress = in_progress;
        self.domain = domain;
        self.previous_ray = None;
    }

    /// Whether both the cached and the current ray can be used
    pub fn are_rays_valid(&self, current: &RaySegment) -> bool {
        current.is_valid() && self.previous_ray.is_some_and(|r| r.is_valid())
    }

    /// Cache `ray` as the baseline for the next frame
    pub fn update_rays(&mut self, ray: RaySegment) {
        self.previous_ray = Some(ray);
    }

    /// Motion between the cached and current ray on a plane through the
    /// gizmo origin
    pub fn plane_motion(&self, normal: Vec3, current: &RaySegment) -> Option<Vec3> {
        let previous = self.previous_ray?;
        let plane = Plane::from_point_normal(self.location(), normal);
        let now = current.intersect_plane(&plane)?;
        let before = previous.intersect_plane(&plane)?;
        Some(now - before)
    }

    /// Isotropic on-screen scale: grows with view depth and field of view
    pub fn base_scene_scale(&self, camera: &CameraPose) -> Vec3 {
        let factor = if self.scene_scale_factor.abs() > COMPONENT_EPSILON {
            self.scene_scale_factor
        } else {
            1.0
        };
        let depth = camera.depth_of(self.location());
        Vec3::splat(depth * camera.fov_degrees.to_radians().sin() / factor)
    }

    /// Pick the nearest handle along a world ray
    pub fn hit_test(&self, origin: Vec3, direction: Vec3) -> Option<GizmoHit> {
        if self.scene_scale.abs().min_element() < COMPONENT_EPSILON {
            return None;
        }
        let inverse = self.transform.rotation.inverse();
        let local_origin = inverse * (origin - self.location()) / self.scene_scale;
        let local_dir = inverse * direction / self.scene_scale;

        self.handles
            .iter()
            .filter_map(|handle| {
                handle.shape.intersect(local_origin, local_dir).map(|distance| GizmoHit {
                    handle: handle.id,
                    domain: handle.domain,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Per-kind gizmo math
pub trait GizmoVariant {
    /// Transformation performed by this gizmo
    fn kind(&self) -> TransformationKind;

    /// Shared state
    fn state(&self) -> &GizmoState;

    /// Shared state, mutable
    fn state_mut(&mut self) -> &mut GizmoState;

    /// Plane (and axis) the pointer ray is measured on for `domain`
    fn support_plane(&self, domain: Domain, look: Vec3) -> Option<SupportPlane>;

    /// Raw delta for this frame.
    ///
    /// Implementations must cache `ray` exactly once per call, whether or
    /// not a delta could be computed.
    fn delta_transform(&mut self, look: Vec3, ray: RaySegment, domain: Domain) -> Transform;

    /// Grid-snapped delta; the unsnapped remainder is left in `accumulator`
    fn snapped_transform(
        &self,
        accumulator: &mut SnapAccumulator,
        delta: &Transform,
        domain: Domain,
        snap_value: f32,
    ) -> Transform;

    /// Snap applied to each object's new transform after the delta
    fn snapped_transform_per_object(
        &self,
        _old: &Transform,
        new: &Transform,
        _domain: Domain,
        _snap_value: f32,
    ) -> Transform {
        *new
    }

    /// Space the gizmo axes are actually expressed in
    fn resolve_space(&self, requested: SpaceType) -> SpaceType {
        requested
    }

    /// On-screen scale for the current camera
    fn scene_scale(&mut self, camera: &CameraPose) -> Vec3 {
        self.state().base_scene_scale(camera)
    }
}

/// The active gizmo
#[derive(Debug, Clone)]
pub enum Gizmo {
    /// Translation gizmo
    Translate(TranslateGizmo),
    /// Rotation gizmo
    Rotate(RotateGizmo),
    /// Scale gizmo
    Scale(ScaleGizmo),
}

impl Gizmo {
    /// Spawn the gizmo for `kind`; `None` has no gizmo
    pub fn spawn(kind: TransformationKind, config: &GizmoConfig) -> Option<Self> {
        match kind {
            TransformationKind::None => None,
            TransformationKind::Translate => Some(Gizmo::Translate(TranslateGizmo::new(config))),
            TransformationKind::Rotate => Some(Gizmo::Rotate(RotateGizmo::new(config))),
            TransformationKind::Scale => Some(Gizmo::Scale(ScaleGizmo::new(config))),
        }
    }

    /// Dispatch to the variant
    pub fn variant(&self) -> &dyn GizmoVariant {
        match self {
            Gizmo::Translate(g) => g,
            Gizmo::Rotate(g) => g,
            Gizmo::Scale(g) => g,
        }
    }

    /// Dispatch to the variant, mutable
    pub fn variant_mut(&mut self) -> &mut dyn GizmoVariant {
        match self {
            Gizmo::Translate(g) => g,
            Gizmo::Rotate(g) => g,
            Gizmo::Scale(g) => g,
        }
    }

    /// Gizmo identity
    pub fn id(&self) -> GizmoId {
        self.state().id()
    }

    /// Transformation performed by this gizmo
    pub fn kind(&self) -> TransformationKind {
        self.variant().kind()
    }

    /// Shared state
    pub fn state(&self) -> &GizmoState {
        self.variant().state()
    }

    /// World placement
    pub fn transform(&self) -> &Transform {
        self.state().transform()
    }

    /// Pivot position
    pub fn location(&self) -> Vec3 {
        self.state().location()
    }

    /// Domain activated by `handle`
    pub fn domain_for_handle(&self, handle: HandleId) -> Domain {
        self.state().handles().domain_for(handle)
    }

    /// Place the gizmo on its anchor in the space this variant supports
    pub fn place(&mut self, anchor: &Transform, space: SpaceType) {
        let space = self.variant().resolve_space(space);
        self.variant_mut().state_mut().place(anchor, space);
    }

    /// Enter or leave an interaction
    pub fn set_transform_progress_state(&mut self, in_progress: bool, domain: Domain) {
        self.variant_mut()
            .state_mut()
            .set_transform_progress_state(in_progress, domain);
    }

    /// Raw delta for this frame
    pub fn delta_transform(&mut self, look: Vec3, ray: RaySegment, domain: Domain) -> Transform {
        self.variant_mut().delta_transform(look, ray, domain)
    }

    /// Grid-snapped delta
    pub fn snapped_transform(
        &self,
        accumulator: &mut SnapAccumulator,
        delta: &Transform,
        domain: Domain,
        snap_value: f32,
    ) -> Transform {
        self.variant()
            .snapped_transform(accumulator, delta, domain, snap_value)
    }

    /// Per-object snap pass
    pub fn snapped_transform_per_object(
        &self,
        old: &Transform,
        new: &Transform,
        domain: Domain,
        snap_value: f32,
    ) -> Transform {
        self.variant()
            .snapped_transform_per_object(old, new, domain, snap_value)
    }

    /// Recompute the on-screen scale for `camera`
    pub fn scale_scene(&mut self, camera: &CameraPose) {
        let scale = self.variant_mut().scene_scale(camera);
        self.variant_mut().state_mut().scene_scale = scale;
    }

    /// Pick the nearest handle along a world ray
    pub fn hit_test(&self, origin: Vec3, direction: Vec3) -> Option<GizmoHit> {
        self.state().hit_test(origin, direction)
    }
}

/// Screen right and up directions in world space for a view along `look`.
///
/// World +Y is up; looking straight along it falls back to world -Z.
pub(crate) fn screen_axes(look: Vec3) -> (Vec3, Vec3) {
    let look = look.normalize_or_zero();
    let reference = if look.cross(Vec3::Y).length_squared() > COMPONENT_EPSILON {
        Vec3::Y
    } else {
        Vec3::NEG_Z
    };
    let right = look.cross(reference).normalize_or_zero();
    (right, right.cross(look))
}

/// Component of `v` along `axis`
pub(crate) fn project_onto_axis(v: Vec3, axis: Vec3) -> Vec3 {
    let length_squared = axis.length_squared();
    if length_squared <= f32::EPSILON {
        return Vec3::ZERO;
    }
    axis * (v.dot(axis) / length_squared)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GizmoConfig {
        GizmoConfig::default()
    }

    #[test]
    fn test_spawn_matches_kind() {
        for kind in TransformationKind::ACTIVE {
            let gizmo = Gizmo::spawn(kind, &config()).unwrap();
            assert_eq!(gizmo.kind(), kind);
        }
        assert!(Gizmo::spawn(TransformationKind::None, &config()).is_none());
    }

    #[test]
    fn test_spawned_gizmos_have_distinct_ids() {
        let a = Gizmo::spawn(TransformationKind::Translate, &config()).unwrap();
        let b = Gizmo::spawn(TransformationKind::Translate, &config()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_place_respects_space() {
        let anchor = Transform::from_rotation_translation(
            Quat::from_rotation_z(0.5),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let mut gizmo = Gizmo::spawn(TransformationKind::Translate, &config()).unwrap();

        gizmo.place(&anchor, SpaceType::World);
        assert_eq!(gizmo.location(), anchor.translation);
        assert_eq!(gizmo.transform().rotation, Quat::IDENTITY);

        gizmo.place(&anchor, SpaceType::Local);
        assert!(gizmo.transform().rotation.abs_diff_eq(anchor.rotation, 1e-6));
    }

    #[test]
    fn test_progress_state_drops_ray_cache() {
        let mut gizmo = Gizmo::spawn(TransformationKind::Translate, &config()).unwrap();
        let ray = RaySegment::from_ray(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, 1000.0);
        gizmo.delta_transform(Vec3::NEG_Z, ray, Domain::AxisX);
        assert!(gizmo.state().previous_ray().is_some());

        gizmo.set_transform_progress_state(true, Domain::AxisX);
        assert!(gizmo.state().previous_ray().is_none());
        assert!(gizmo.state().in_progress());
        assert_eq!(gizmo.state().domain(), Domain::AxisX);
    }

    #[test]
    fn test_scene_scale_grows_with_distance() {
        let mut gizmo = Gizmo::spawn(TransformationKind::Translate, &config()).unwrap();
        gizmo.place(&Transform::IDENTITY, SpaceType::World);

        gizmo.scale_scene(&CameraPose::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 60.0));
        let near = gizmo.state().scene_scale();
        gizmo.scale_scene(&CameraPose::look_at(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, 60.0));
        let far = gizmo.state().scene_scale();

        assert!((far.x - 2.0 * near.x).abs() < 1e-4, "near {:?} far {:?}", near, far);
        assert_eq!(far.x, far.y);
    }

    #[test]
    fn test_hit_test_picks_nearest_handle() {
        let gizmo = Gizmo::spawn(TransformationKind::Translate, &config()).unwrap();

        // Straight down onto the X shaft
        let hit = gizmo.hit_test(Vec3::new(0.6, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        assert_eq!(hit.domain, Domain::AxisX);
        assert_eq!(gizmo.domain_for_handle(hit.handle), Domain::AxisX);

        // Onto the XY patch
        let hit = gizmo.hit_test(Vec3::new(0.4, 0.4, 5.0), Vec3::NEG_Z).unwrap();
        assert_eq!(hit.domain, Domain::PlaneXY);

        // Through the center
        let hit = gizmo.hit_test(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        assert_eq!(hit.domain, Domain::Free);

        assert!(gizmo.hit_test(Vec3::new(3.0, 3.0, 5.0), Vec3::NEG_Z).is_none());
    }

    #[test]
    fn test_screen_axes_follow_the_view() {
        let (right, up) = screen_axes(Vec3::NEG_Z);
        assert!(right.abs_diff_eq(Vec3::X, 1e-6), "right: {:?}", right);
        assert!(up.abs_diff_eq(Vec3::Y, 1e-6), "up: {:?}", up);

        let (right, up) = screen_axes(Vec3::NEG_Y * 3.0);
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!(up.dot(Vec3::Y).abs() < 1e-5, "up: {:?}", up);
        assert!(right.dot(up).abs() < 1e-5);
    }

    #[test]
    fn test_project_onto_axis() {
        let v = Vec3::new(3.0, 4.0, 5.0);
        assert_eq!(project_onto_axis(v, Vec3::X), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(project_onto_axis(v, Vec3::ZERO), Vec3::ZERO);
    }
}
