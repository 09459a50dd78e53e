//! Ray intersection tests for gizmo handle picking
//!
//! All functions take the ray as `origin + t * dir` and return the ray
//! parameter `t` of the closest hit in front of the origin. `dir` does not
//! need to be normalized; when it is, `t` is a distance.

use glam::Vec3;

/// Ray / finite cylinder intersection.
///
/// The ray and the cylinder axis are projected into the plane perpendicular
/// to the axis, which turns the surface test into a 2D quadratic
/// `a t² + b t + c = 0`. The nearest root is then checked against the
/// segment between `cylinder_start` and `cylinder_end`.
pub fn ray_cylinder_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    cylinder_start: Vec3,
    cylinder_end: Vec3,
    radius: f32,
) -> Option<f32> {
    let span = cylinder_end - cylinder_start;
    let length = span.length();
    if length <= f32::EPSILON {
        return None;
    }
    let axis = span / length;

    // Components perpendicular to the axis
    let d = ray_dir - axis * ray_dir.dot(axis);
    let offset = ray_origin - cylinder_start;
    let o = offset - axis * offset.dot(axis);

    let a = d.dot(d);
    if a <= f32::EPSILON {
        // Ray runs along the axis
        return None;
    }
    let b = 2.0 * d.dot(o);
    let c = o.dot(o) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if t < 0.0 {
        return None;
    }

    let along = (ray_origin + ray_dir * t - cylinder_start).dot(axis);
    (0.0..=length).contains(&along).then_some(t)
}

/// Ray / ring (annulus) intersection.
///
/// Hits when the ray meets the ring plane within `thickness` of the circle
/// of radius `ring_radius` around `ring_center`.
pub fn ray_ring_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    ring_center: Vec3,
    ring_normal: Vec3,
    ring_radius: f32,
    thickness: f32,
) -> Option<f32> {
    let t = ray_plane_parameter(ray_origin, ray_dir, ring_center, ring_normal)?;
    let hit_point = ray_origin + ray_dir * t;
    let distance_from_ring = ((hit_point - ring_center).length() - ring_radius).abs();
    (distance_from_ring <= thickness).then_some(t)
}

/// Ray / sphere intersection.
///
/// When the origin is inside the sphere the exit point is returned.
pub fn ray_sphere_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let o = ray_origin - center;
    let a = ray_dir.dot(ray_dir);
    if a <= f32::EPSILON {
        return None;
    }
    let b = 2.0 * ray_dir.dot(o);
    let c = o.dot(o) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = (-b - root) / (2.0 * a);
    if near >= 0.0 {
        return Some(near);
    }
    let far = (-b + root) / (2.0 * a);
    (far >= 0.0).then_some(far)
}

/// Ray / square patch intersection.
///
/// The patch lies in the plane spanned by the orthonormal axes `u` and `v`
/// through `origin`, covering `[min, max]` along both.
pub fn ray_patch_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    origin: Vec3,
    u: Vec3,
    v: Vec3,
    min: f32,
    max: f32,
) -> Option<f32> {
    let normal = u.cross(v);
    let t = ray_plane_parameter(ray_origin, ray_dir, origin, normal)?;
    let local = ray_origin + ray_dir * t - origin;
    let range = min..=max;
    (range.contains(&local.dot(u)) && range.contains(&local.dot(v))).then_some(t)
}

fn ray_plane_parameter(
    ray_origin: Vec3,
    ray_dir: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<f32> {
    let denom = ray_dir.dot(plane_normal);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (plane_point - ray_origin).dot(plane_normal) / denom;
    (t >= 0.0).then_some(t)
}
