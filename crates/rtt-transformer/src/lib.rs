//! Runtime transformer
//!
//! Selection state machine and transform controller. Drives a gizmo from
//! `rtt-gizmo` and writes the resulting transforms into a caller-provided
//! scene.
//!
//! # Module Structure
//!
//! ```text
//! rtt-transformer/
//! ├── controller.rs  # TransformerTool: domain state, per-frame update, picking
//! ├── selection.rs   # Ordered selection list
//! ├── scene.rs       # Scene trait and in-memory scene
//! ├── hit.rs         # Hit records and the ray-cast trait
//! └── events.rs      # Domain change notifications
//! ```

pub mod controller;
pub mod events;
pub mod hit;
pub mod scene;
pub mod selection;

pub use controller::{ApplyOutcome, SelectionFilter, TransformerTool};
pub use events::GizmoStateChanged;
pub use hit::{HitRecord, HitTarget, RayCaster};
pub use scene::{ActorId, ComponentId, MemoryScene, Mobility, Scene};
pub use selection::SelectionSet;
