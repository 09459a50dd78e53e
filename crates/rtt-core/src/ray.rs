//! Ray segments and plane intersection

use glam::Vec3;

use crate::constants::PARALLEL_EPSILON;

/// Finite pointer ray from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySegment {
    pub start: Vec3,
    pub end: Vec3,
}

impl RaySegment {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Extend a ray to `extent` along its (normalized) direction
    pub fn from_ray(origin: Vec3, direction: Vec3, extent: f32) -> Self {
        Self {
            start: origin,
            end: origin + direction.normalize_or_zero() * extent,
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.end - self.start
    }

    /// A segment is usable when both ends are finite and distinct
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.direction().length_squared() > PARALLEL_EPSILON
    }

    /// Intersect the infinite line through this segment with `plane`
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        line_plane_intersection(self.start, self.end, plane)
    }
}

/// Plane in the form `normal . p = distance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            distance: point.dot(normal),
        }
    }
}

/// Line / plane intersection.
///
/// The line is unbounded; `None` when it runs parallel to the plane or the
/// result is not finite.
pub fn line_plane_intersection(start: Vec3, end: Vec3, plane: &Plane) -> Option<Vec3> {
    let direction = end - start;
    let denom = direction.dot(plane.normal);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (plane.distance - start.dot(plane.normal)) / denom;
    let point = start + direction * t;
    point.is_finite().then_some(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_hits_plane() {
        let plane = Plane::from_point_normal(Vec3::new(0.0, 0.0, 2.0), Vec3::Z);
        let point = line_plane_intersection(Vec3::new(1.0, 1.0, 10.0), Vec3::new(1.0, 1.0, 5.0), &plane)
            .unwrap();
        assert!(point.abs_diff_eq(Vec3::new(1.0, 1.0, 2.0), 1e-5));
    }

    #[test]
    fn test_parallel_line_misses() {
        let plane = Plane::from_point_normal(Vec3::ZERO, Vec3::Z);
        let result = line_plane_intersection(Vec3::new(0.0, 0.0, 1.0), Vec3::new(5.0, 0.0, 1.0), &plane);
        assert!(result.is_none());
    }

    #[test]
    fn test_extended_segment_intersection() {
        let segment = RaySegment::from_ray(Vec3::new(3.0, -4.0, 10.0), Vec3::new(0.0, 0.0, -1.0), 1.0e8);
        assert!(segment.is_valid());
        let plane = Plane::from_point_normal(Vec3::ZERO, Vec3::Z);
        let point = segment.intersect_plane(&plane).unwrap();
        assert!(
            point.abs_diff_eq(Vec3::new(3.0, -4.0, 0.0), 1e-3),
            "unexpected intersection {:?}",
            point
        );
    }

    #[test]
    fn test_degenerate_segment_invalid() {
        assert!(!RaySegment::new(Vec3::ONE, Vec3::ONE).is_valid());
        assert!(!RaySegment::from_ray(Vec3::ZERO, Vec3::ZERO, 100.0).is_valid());
        assert!(!RaySegment::new(Vec3::splat(f32::NAN), Vec3::ONE).is_valid());
    }
}
