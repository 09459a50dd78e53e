//! Camera pose used for on-screen gizmo sizing

use glam::Vec3;

/// Viewer position and orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Camera location in world space
    pub position: Vec3,
    /// Normalized view direction
    pub forward: Vec3,
    /// Field of view in degrees
    pub fov_degrees: f32,
}

impl CameraPose {
    /// Create a pose; `forward` is normalized
    pub fn new(position: Vec3, forward: Vec3, fov_degrees: f32) -> Self {
        Self {
            position,
            forward: forward.normalize_or_zero(),
            fov_degrees,
        }
    }

    /// Create a pose looking from `position` toward `target`
    pub fn look_at(position: Vec3, target: Vec3, fov_degrees: f32) -> Self {
        Self::new(position, target - position, fov_degrees)
    }

    /// Distance from the camera to `point` measured along the view direction
    pub fn depth_of(&self, point: Vec3) -> f32 {
        (point - self.position).dot(self.forward).abs()
    }
}
