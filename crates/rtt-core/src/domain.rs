//! Support plane resolution
//!
//! A 2D pointer ray cannot be read directly as motion along a 3D axis. Every
//! domain is therefore mapped to a plane through the gizmo origin; the ray is
//! intersected with that plane and, for axis domains, the result is projected
//! back onto the axis afterwards.
//!
//! For an axis there are two candidate planes containing it. The one whose
//! normal is most aligned with the view is chosen, so the plane is never
//! edge-on to the camera (an edge-on plane sends intersections to infinity).

use glam::{Quat, Vec3};

use crate::constants::COS_45_DEG;
use crate::types::Domain;

/// Orthonormal gizmo axes in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
}

impl Default for Basis {
    fn default() -> Self {
        Self::WORLD
    }
}

impl Basis {
    pub const WORLD: Self = Self {
        x: Vec3::X,
        y: Vec3::Y,
        z: Vec3::Z,
    };

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            x: rotation * Vec3::X,
            y: rotation * Vec3::Y,
            z: rotation * Vec3::Z,
        }
    }

    /// Direction of an axis domain, `None` for every other domain
    pub fn axis(&self, domain: Domain) -> Option<Vec3> {
        match domain {
            Domain::AxisX => Some(self.x),
            Domain::AxisY => Some(self.y),
            Domain::AxisZ => Some(self.z),
            _ => None,
        }
    }

    /// Components of a world vector along each basis axis
    pub fn project(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.dot(self.x), v.dot(self.y), v.dot(self.z))
    }
}

/// Plane the pointer ray is intersected with, plus the axis to project onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportPlane {
    pub normal: Vec3,
    pub axis: Option<Vec3>,
}

/// Resolve the support plane for `domain` as seen along `look`.
///
/// Returns `None` for [`Domain::None`].
pub fn resolve_support_plane(domain: Domain, look: Vec3, basis: &Basis) -> Option<SupportPlane> {
    // Unit vectors are used as given so a view on the threshold stays a tie
    let look = if look.is_normalized() { look } else { look.normalize_or_zero() };
    let faces_view = |candidate: Vec3| look.dot(candidate).abs() > COS_45_DEG;

    let plane = match domain {
        Domain::None => return None,
        Domain::AxisX => SupportPlane {
            normal: if faces_view(basis.y) { basis.y } else { basis.z },
            axis: Some(basis.x),
        },
        Domain::AxisY => SupportPlane {
            normal: if faces_view(basis.x) { basis.x } else { basis.z },
            axis: Some(basis.y),
        },
        Domain::AxisZ => SupportPlane {
            normal: if faces_view(basis.x) { basis.x } else { basis.y },
            axis: Some(basis.z),
        },
        Domain::PlaneXY => SupportPlane {
            normal: basis.z,
            axis: None,
        },
        Domain::PlaneYZ => SupportPlane {
            normal: basis.x,
            axis: None,
        },
        Domain::PlaneXZ => SupportPlane {
            normal: basis.y,
            axis: None,
        },
        Domain::Free => SupportPlane {
            normal: -look,
            axis: None,
        },
    };
    Some(plane)
}
