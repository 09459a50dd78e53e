//! Notifications produced by the transform controller

use rtt_core::{Domain, TransformationKind};

/// Fired whenever the active domain changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GizmoStateChanged {
    pub kind: TransformationKind,
    pub in_progress: bool,
    pub domain: Domain,
}
