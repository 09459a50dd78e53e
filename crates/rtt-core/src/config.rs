//! Transformer configuration
//!
//! Settings for the transform controller that can be serialized and loaded
//! from RON configuration files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_RAY_EXTENT, DEFAULT_SCALE_SENSITIVITY, DEFAULT_SCENE_SCALE_FACTOR};
use crate::error::ConfigError;
use crate::types::{GizmoPlacement, SpaceType, TransformationKind};

/// Snapping for a single transformation kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SnapSetting {
    /// Whether snapping is enabled
    pub enabled: bool,
    /// Grid step (world units, degrees, or scale units)
    pub value: f32,
    /// Whether the per-object snap pass runs after the aggregate snap
    pub per_object: bool,
}

impl Default for SnapSetting {
    fn default() -> Self {
        Self {
            enabled: false,
            value: 0.0,
            per_object: true,
        }
    }
}

impl SnapSetting {
    pub fn new(value: f32) -> Self {
        Self {
            enabled: true,
            value,
            ..Default::default()
        }
    }

    /// Snapping only takes effect when enabled with a non-zero step
    pub fn is_active(&self) -> bool {
        self.enabled && self.value != 0.0
    }
}

/// Per transformation kind snapping table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SnappingConfig {
    pub translate: SnapSetting,
    pub rotate: SnapSetting,
    pub scale: SnapSetting,
}

impl SnappingConfig {
    pub fn get(&self, kind: TransformationKind) -> Option<&SnapSetting> {
        match kind {
            TransformationKind::None => None,
            TransformationKind::Translate => Some(&self.translate),
            TransformationKind::Rotate => Some(&self.rotate),
            TransformationKind::Scale => Some(&self.scale),
        }
    }

    pub fn get_mut(&mut self, kind: TransformationKind) -> Option<&mut SnapSetting> {
        match kind {
            TransformationKind::None => None,
            TransformationKind::Translate => Some(&mut self.translate),
            TransformationKind::Rotate => Some(&mut self.rotate),
            TransformationKind::Scale => Some(&mut self.scale),
        }
    }
}

/// Gizmo tuning values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GizmoConfig {
    /// Scale units per world unit of pointer travel
    pub scale_sensitivity: f32,
    /// Divisor for the distance based on-screen gizmo size
    pub scene_scale_factor: f32,
    /// Distance pointer rays are extended to
    pub ray_extent: f32,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            scale_sensitivity: DEFAULT_SCALE_SENSITIVITY,
            scene_scale_factor: DEFAULT_SCENE_SCALE_FACTOR,
            ray_extent: DEFAULT_RAY_EXTENT,
        }
    }
}

/// Complete transformer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransformerConfig {
    /// Active transformation
    pub transformation: TransformationKind,
    /// Local or world gizmo axes
    pub space: SpaceType,
    /// Which selected object carries the gizmo
    pub placement: GizmoPlacement,
    /// Snapping per transformation
    pub snapping: SnappingConfig,
    /// Rotate multiple objects around their own origin instead of the gizmo
    pub rotate_on_local_axis: bool,
    /// Make non-movable objects movable instead of skipping them
    pub force_mobility: bool,
    /// Clicking an already selected object while appending deselects it
    pub toggle_selected_in_multi_selection: bool,
    /// Select individual components instead of whole actors
    pub component_based: bool,
    /// Gizmo tuning
    pub gizmo: GizmoConfig,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            transformation: TransformationKind::Translate,
            space: SpaceType::World,
            placement: GizmoPlacement::LastSelection,
            snapping: SnappingConfig::default(),
            rotate_on_local_axis: false,
            force_mobility: false,
            toggle_selected_in_multi_selection: true,
            component_based: false,
            gizmo: GizmoConfig::default(),
        }
    }
}

impl TransformerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize to a RON string
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Parse from a RON string
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron(&content)
    }
}
