//! Shared numeric constants

/// Cosine of 45 degrees, used to prefer the support plane most facing the camera.
///
/// Comparisons against this value are strict, so a view exactly at 45 degrees
/// falls through to the alternative plane.
pub const COS_45_DEG: f32 = 0.707;

/// Distance a pointer ray is extended to before intersecting support planes.
pub const DEFAULT_RAY_EXTENT: f32 = 100_000_000.0;

/// Below this magnitude a ray direction is parallel to a plane.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Tolerance used when deciding whether a vector component changed.
pub const COMPONENT_EPSILON: f32 = 1e-6;

/// Scale units produced per world unit of pointer travel on the scale gizmo.
pub const DEFAULT_SCALE_SENSITIVITY: f32 = 1.0;

/// Divisor applied to the distance based gizmo scene scale.
pub const DEFAULT_SCENE_SCALE_FACTOR: f32 = 10.0;
