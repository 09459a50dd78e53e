//! Runtime transformer core types
//!
//! Math primitives shared by the gizmo variants and the transform controller.
//!
//! # Module Structure
//!
//! ```text
//! rtt-core/
//! ├── constants.rs   # Thresholds and default magnitudes
//! ├── types.rs       # TransformationKind, Domain, SpaceType, GizmoPlacement
//! ├── transform.rs   # Transform (with zero-scale delta identity)
//! ├── domain.rs      # Basis and support plane resolution
//! ├── ray.rs         # Ray segments, planes, line/plane intersection
//! ├── snap.rs        # Grid snapping and the residue accumulator
//! ├── config.rs      # Serializable tool configuration
//! └── error.rs       # Error types
//! ```

pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod ray;
pub mod snap;
pub mod transform;
pub mod types;

pub use config::{GizmoConfig, SnapSetting, SnappingConfig, TransformerConfig};
pub use domain::{Basis, SupportPlane, resolve_support_plane};
pub use error::ConfigError;
pub use ray::{Plane, RaySegment};
pub use snap::{SnapAccumulator, grid_snap};
pub use transform::Transform;
pub use types::{Domain, GizmoPlacement, SpaceType, TransformationKind};
