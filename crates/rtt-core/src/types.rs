//! Transformation enums

use serde::{Deserialize, Serialize};

/// Which transformation the active gizmo performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransformationKind {
    None,
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl TransformationKind {
    /// All kinds that spawn a gizmo
    pub const ACTIVE: [TransformationKind; 3] = [
        TransformationKind::Translate,
        TransformationKind::Rotate,
        TransformationKind::Scale,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransformationKind::None => "None",
            TransformationKind::Translate => "Translate",
            TransformationKind::Rotate => "Rotate",
            TransformationKind::Scale => "Scale",
        }
    }
}

/// Geometric constraint governing how pointer motion becomes a delta.
///
/// `None` means no interaction is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Domain {
    #[default]
    None,
    AxisX,
    AxisY,
    AxisZ,
    PlaneXY,
    PlaneYZ,
    PlaneXZ,
    Free,
}

impl Domain {
    /// Number of independent axes the domain allows motion along
    pub fn dimension_count(&self) -> u32 {
        match self {
            Domain::None => 0,
            Domain::AxisX | Domain::AxisY | Domain::AxisZ => 1,
            Domain::PlaneXY | Domain::PlaneYZ | Domain::PlaneXZ => 2,
            Domain::Free => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Domain::None => "None",
            Domain::AxisX => "X Axis",
            Domain::AxisY => "Y Axis",
            Domain::AxisZ => "Z Axis",
            Domain::PlaneXY => "XY Plane",
            Domain::PlaneYZ => "YZ Plane",
            Domain::PlaneXZ => "XZ Plane",
            Domain::Free => "XYZ",
        }
    }
}

/// Coordinate space the gizmo axes are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpaceType {
    Local,
    #[default]
    World,
}

/// Which selected object the gizmo attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoPlacement {
    FirstSelection,
    #[default]
    LastSelection,
}
