//! Rotation / translation / scale transform

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A world transform, or a per-frame delta.
///
/// Object transforms use a unit scale as identity. Deltas are summed into
/// accumulators rather than composed, so their neutral value carries a zero
/// scale instead (see [`Transform::NEUTRAL_DELTA`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub rotation: Quat,
    pub translation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity object transform
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Identity delta: no rotation, no offset, zero scale offset
    pub const NEUTRAL_DELTA: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
        scale: Vec3::ZERO,
    };

    pub fn new(rotation: Quat, translation: Vec3, scale: Vec3) -> Self {
        Self {
            rotation,
            translation,
            scale,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
            scale: Vec3::ONE,
        }
    }

    /// Delta carrying only a translation
    pub fn delta_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::NEUTRAL_DELTA
        }
    }

    /// Delta carrying only a rotation
    pub fn delta_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::NEUTRAL_DELTA
        }
    }

    /// Delta carrying only a scale offset
    pub fn delta_scale(scale: Vec3) -> Self {
        Self {
            scale,
            ..Self::NEUTRAL_DELTA
        }
    }

    /// Reset to the neutral delta
    pub fn reset_delta(&mut self) {
        *self = Self::NEUTRAL_DELTA;
    }

    /// Whether this delta changes nothing
    pub fn is_neutral_delta(&self, epsilon: f32) -> bool {
        self.translation.abs_diff_eq(Vec3::ZERO, epsilon)
            && self.scale.abs_diff_eq(Vec3::ZERO, epsilon)
            && (self.rotation.abs_diff_eq(Quat::IDENTITY, epsilon)
                || self.rotation.abs_diff_eq(-Quat::IDENTITY, epsilon))
    }

    pub fn rotate_vector(&self, v: Vec3) -> Vec3 {
        self.rotation * v
    }

    /// Express a world direction in this transform's rotated frame
    pub fn unrotate_vector(&self, v: Vec3) -> Vec3 {
        self.rotation.inverse() * v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_neutral_delta_has_zero_scale() {
        let delta = Transform::NEUTRAL_DELTA;
        assert_eq!(delta.scale, Vec3::ZERO);
        assert!(delta.is_neutral_delta(1e-6));
        assert!(!Transform::IDENTITY.is_neutral_delta(1e-6));
    }

    #[test]
    fn test_unrotate_vector() {
        let t = Transform::from_rotation_translation(Quat::from_rotation_z(FRAC_PI_2), Vec3::ZERO);
        let local = t.unrotate_vector(Vec3::X);
        assert!(
            local.abs_diff_eq(Vec3::new(0.0, -1.0, 0.0), 1e-5),
            "world X should map to local -Y, got {:?}",
            local
        );
    }

}
