//! Hit volumes tagged with the domain they activate

use glam::Vec3;
use rtt_core::Domain;

use crate::collision::{
    ray_cylinder_intersection, ray_patch_intersection, ray_ring_intersection,
    ray_sphere_intersection,
};

/// Identifier of a handle within one gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(pub u16);

/// Handle geometry in the gizmo's unscaled local frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleShape {
    /// Cylinder along `axis` from `start` to `end`
    Shaft {
        /// Local axis direction
        axis: Vec3,
        /// Distance from the origin where the shaft begins
        start: f32,
        /// Distance from the origin where the shaft ends
        end: f32,
        /// Shaft radius
        radius: f32,
    },
    /// Circle around the origin
    Ring {
        /// Ring plane normal
        normal: Vec3,
        /// Circle radius
        radius: f32,
        /// Pick tolerance around the circle
        thickness: f32,
    },
    /// Square spanned by two local axes
    Patch {
        /// First spanning axis
        u: Vec3,
        /// Second spanning axis
        v: Vec3,
        /// Inner edge distance along both axes
        min: f32,
        /// Outer edge distance along both axes
        max: f32,
    },
    /// Sphere at the origin
    Sphere {
        /// Sphere radius
        radius: f32,
    },
}

impl HandleShape {
    /// Ray parameter of the closest hit, in the same local frame
    pub fn intersect(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        match *self {
            HandleShape::Shaft {
                axis,
                start,
                end,
                radius,
            } => ray_cylinder_intersection(origin, dir, axis * start, axis * end, radius),
            HandleShape::Ring {
                normal,
                radius,
                thickness,
            } => ray_ring_intersection(origin, dir, Vec3::ZERO, normal, radius, thickness),
            HandleShape::Patch { u, v, min, max } => {
                ray_patch_intersection(origin, dir, Vec3::ZERO, u, v, min, max)
            }
            HandleShape::Sphere { radius } => {
                ray_sphere_intersection(origin, dir, Vec3::ZERO, radius)
            }
        }
    }
}

/// A registered hit volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoHandle {
    /// Handle identifier
    pub id: HandleId,
    /// Display name
    pub name: &'static str,
    /// Domain activated when this handle is hit
    pub domain: Domain,
    /// Pick geometry
    pub shape: HandleShape,
}

/// Handles of one gizmo
#[derive(Debug, Clone, Default)]
pub struct HandleRegistry {
    handles: Vec<GizmoHandle>,
}

impl HandleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hit volume for `domain`
    pub fn register(&mut self, name: &'static str, domain: Domain, shape: HandleShape) -> HandleId {
        let id = HandleId(self.handles.len() as u16);
        self.handles.push(GizmoHandle {
            id,
            name,
            domain,
            shape,
        });
        id
    }

    /// Domain of a handle, `Domain::None` for unknown handles
    pub fn domain_for(&self, id: HandleId) -> Domain {
        self.get(id).map_or(Domain::None, |h| h.domain)
    }

    /// Look up a handle
    pub fn get(&self, id: HandleId) -> Option<&GizmoHandle> {
        self.handles.get(id.0 as usize)
    }

    /// Iterate over all handles
    pub fn iter(&self) -> impl Iterator<Item = &GizmoHandle> {
        self.handles.iter()
    }

    /// Number of registered handles
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no handles are registered
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Arrow shafts, plane patches and a center sphere, shared by the
/// translate and scale gizmos
pub(crate) fn register_axis_plane_free(registry: &mut HandleRegistry, patch_min: f32, patch_max: f32) {
    for (name, domain, axis) in [
        ("X Axis", Domain::AxisX, Vec3::X),
        ("Y Axis", Domain::AxisY, Vec3::Y),
        ("Z Axis", Domain::AxisZ, Vec3::Z),
    ] {
        registry.register(
            name,
            domain,
            HandleShape::Shaft {
                axis,
                start: 0.2,
                end: 1.0,
                radius: 0.06,
            },
        );
    }

    for (name, domain, u, v) in [
        ("XY Plane", Domain::PlaneXY, Vec3::X, Vec3::Y),
        ("YZ Plane", Domain::PlaneYZ, Vec3::Y, Vec3::Z),
        ("XZ Plane", Domain::PlaneXZ, Vec3::X, Vec3::Z),
    ] {
        registry.register(
            name,
            domain,
            HandleShape::Patch {
                u,
                v,
                min: patch_min,
                max: patch_max,
            },
        );
    }

    registry.register("XYZ Sphere", Domain::Free, HandleShape::Sphere { radius: 0.15 });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_maps_handles_to_domains() {
        let mut registry = HandleRegistry::new();
        register_axis_plane_free(&mut registry, 0.25, 0.5);
        assert_eq!(registry.len(), 7);

        for domain in [
            Domain::AxisX,
            Domain::AxisY,
            Domain::AxisZ,
            Domain::PlaneXY,
            Domain::PlaneYZ,
            Domain::PlaneXZ,
            Domain::Free,
        ] {
            let handle = registry
                .iter()
                .find(|h| h.domain == domain)
                .expect("every domain has a handle");
            assert_eq!(registry.domain_for(handle.id), domain);
        }
        assert_eq!(registry.domain_for(HandleId(99)), Domain::None);
    }

    #[test]
    fn test_patch_shape_is_offset_from_origin() {
        let shape = HandleShape::Patch {
            u: Vec3::X,
            v: Vec3::Y,
            min: 0.25,
            max: 0.5,
        };
        assert!(shape.intersect(Vec3::new(0.4, 0.4, 1.0), Vec3::NEG_Z).is_some());
        assert!(shape.intersect(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z).is_none());
    }
}
