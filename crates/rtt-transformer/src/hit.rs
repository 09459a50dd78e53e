//! Ray hit records consumed by the selection logic

use glam::Vec3;

use rtt_gizmo::{GizmoId, HandleId};

use crate::scene::{ActorId, ComponentId};

/// What a ray hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A handle of a gizmo
    Gizmo { gizmo: GizmoId, handle: HandleId },
    /// A scene component and its owner
    Object { owner: ActorId, component: ComponentId },
}

/// One hit along a traced ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    pub target: HitTarget,
    /// Distance from the ray start
    pub distance: f32,
}

/// Ray-cast service returning hits ordered nearest first
pub trait RayCaster {
    fn cast(&self, start: Vec3, end: Vec3) -> Vec<HitRecord>;
}
