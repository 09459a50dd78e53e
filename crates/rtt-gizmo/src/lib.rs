//! Runtime transformer gizmos
//!
//! Converts pointer rays into delta transforms for the translate, rotate and
//! scale gizmos, and picks gizmo handles.
//!
//! # Module Structure
//!
//! ```text
//! rtt-gizmo/
//! ├── camera.rs        # Camera pose for on-screen sizing
//! ├── collision.rs     # Ray / handle shape intersection
//! └── gizmo/
//!     ├── mod.rs       # GizmoState, GizmoVariant, Gizmo
//!     ├── handle.rs    # Handle registry and shapes
//!     ├── translate.rs # Translation math
//!     ├── rotate.rs    # Rotation math
//!     └── scale.rs     # Scale math
//! ```

pub mod camera;
pub mod collision;
pub mod gizmo;

pub use camera::CameraPose;
pub use gizmo::{
    Gizmo, GizmoHandle, GizmoHit, GizmoId, GizmoState, GizmoVariant, HandleId, HandleRegistry,
    HandleShape, RotateGizmo, ScaleGizmo, TranslateGizmo,
};
