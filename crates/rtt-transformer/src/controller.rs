//! Transform controller and selection state machine
//!
//! [`TransformerTool`] owns the active gizmo, the active domain, the snap
//! residue and the ordered selection. Each frame the caller feeds it a
//! pointer ray; the gizmo turns the ray into a delta, the delta is optionally
//! snapped, and the result is applied to every selected object around the
//! gizmo pivot.
//!
//! The controller is idle while the domain is [`Domain::None`] and
//! interacting otherwise. A hit on one of the gizmo's handles starts an
//! interaction; [`TransformerTool::clear_domain`] or a new trace ends it.

use glam::Vec3;

use rtt_core::{
    Domain, GizmoPlacement, RaySegment, SnapAccumulator, SpaceType, Transform, TransformationKind,
    TransformerConfig,
};
use rtt_gizmo::{CameraPose, Gizmo};

use crate::events::GizmoStateChanged;
use crate::hit::{HitRecord, HitTarget, RayCaster};
use crate::scene::{ActorId, ComponentId, Mobility, Scene};
use crate::selection::SelectionSet;

/// Admission predicate deciding whether an object may be selected
pub type SelectionFilter = Box<dyn Fn(ActorId, ComponentId) -> bool>;

/// Result of applying a delta to the selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Number of objects whose transform was written
    pub applied: usize,
    /// Objects left untouched because they are not movable
    pub skipped: Vec<ComponentId>,
}

/// Runtime transform tool
pub struct TransformerTool {
    config: TransformerConfig,
    gizmo: Option<Gizmo>,
    domain: Domain,
    accumulator: SnapAccumulator,
    selection: SelectionSet,
    filter: Option<SelectionFilter>,
    camera: Option<CameraPose>,
    events: Vec<GizmoStateChanged>,
}

impl Default for TransformerTool {
    fn default() -> Self {
        Self::new(TransformerConfig::default())
    }
}

impl TransformerTool {
    pub fn new(config: TransformerConfig) -> Self {
        Self {
            config,
            gizmo: None,
            domain: Domain::None,
            accumulator: SnapAccumulator::new(),
            selection: SelectionSet::new(),
            filter: None,
            camera: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    /// The active gizmo, present while something is selected
    pub fn gizmo(&self) -> Option<&Gizmo> {
        self.gizmo.as_ref()
    }

    /// Un-snapped remainder carried between frames
    pub fn accumulator(&self) -> &SnapAccumulator {
        &self.accumulator
    }

    // ============== Configuration ==============

    pub fn set_space_type(&mut self, scene: &dyn Scene, space: SpaceType) {
        self.config.space = space;
        self.update_gizmo_placement(scene);
    }

    /// Switch the transformation; replaces the gizmo if one is active
    pub fn set_transformation_type(&mut self, scene: &dyn Scene, kind: TransformationKind) {
        if self.config.transformation == kind {
            return;
        }
        if kind == TransformationKind::None {
            tracing::warn!("Setting transformation type to None");
        }
        self.config.transformation = kind;
        self.accumulator.reset();
        self.update_gizmo_placement(scene);
    }

    pub fn set_snapping_enabled(&mut self, kind: TransformationKind, enabled: bool) {
        if let Some(setting) = self.config.snapping.get_mut(kind) {
            setting.enabled = enabled;
        }
    }

    pub fn set_snapping_value(&mut self, kind: TransformationKind, value: f32) {
        if let Some(setting) = self.config.snapping.get_mut(kind) {
            setting.value = value;
        }
    }

    /// Toggle the per-object snap pass for `kind`
    pub fn set_per_object_snapping(&mut self, kind: TransformationKind, enabled: bool) {
        if let Some(setting) = self.config.snapping.get_mut(kind) {
            setting.per_object = enabled;
        }
    }

    /// Switch between component and actor selection.
    ///
    /// The current selection is re-made at the new granularity: components
    /// stay selected as themselves, or are replaced by their owners' roots.
    pub fn set_component_based(&mut self, scene: &dyn Scene, component_based: bool) {
        let previous = self.deselect_all(scene);
        self.config.component_based = component_based;

        if component_based {
            self.select_multiple_components(scene, &previous, false);
        } else {
            let mut actors: Vec<ActorId> = Vec::new();
            for owner in previous.iter().filter_map(|c| scene.owner(*c)) {
                if !actors.contains(&owner) {
                    actors.push(owner);
                }
            }
            self.select_multiple_actors(scene, &actors, false);
        }
    }

    pub fn set_rotate_on_local_axis(&mut self, rotate_on_local_axis: bool) {
        self.config.rotate_on_local_axis = rotate_on_local_axis;
    }

    pub fn set_force_mobility(&mut self, force_mobility: bool) {
        self.config.force_mobility = force_mobility;
    }

    pub fn set_toggle_selected_in_multi_selection(&mut self, toggle: bool) {
        self.config.toggle_selected_in_multi_selection = toggle;
    }

    pub fn set_gizmo_placement(&mut self, scene: &dyn Scene, placement: GizmoPlacement) {
        self.config.placement = placement;
        self.update_gizmo_placement(scene);
    }

    pub fn set_selection_filter(&mut self, filter: Option<SelectionFilter>) {
        self.filter = filter;
    }

    /// Camera used to size the gizmo on screen
    pub fn set_camera(&mut self, camera: CameraPose) {
        self.camera = Some(camera);
        self.scale_gizmo();
    }

    // ============== Domain state ==============

    /// Active domain and whether a transform is in progress
    pub fn current_domain(&self) -> (Domain, bool) {
        (self.domain, self.domain != Domain::None)
    }

    /// End the current interaction and drop the snap residue
    pub fn clear_domain(&mut self) {
        self.accumulator.reset();
        self.set_domain(Domain::None);
    }

    /// Enter `domain`; entering from idle starts with an empty residue
    pub fn set_domain(&mut self, domain: Domain) {
        if self.domain == domain {
            return;
        }
        if self.domain == Domain::None {
            self.accumulator.reset();
        }
        self.domain = domain;

        let in_progress = domain != Domain::None;
        if let Some(gizmo) = self.gizmo.as_mut() {
            gizmo.set_transform_progress_state(in_progress, domain);
        }
        self.notify(in_progress, domain);
    }

    /// Drain queued domain notifications
    pub fn take_events(&mut self) -> Vec<GizmoStateChanged> {
        std::mem::take(&mut self.events)
    }

    fn notify(&mut self, in_progress: bool, domain: Domain) {
        let kind = self
            .gizmo
            .as_ref()
            .map_or(self.config.transformation, |g| g.kind());
        tracing::debug!("{} domain -> {} (in progress: {})", kind.name(), domain.name(), in_progress);
        self.events.push(GizmoStateChanged {
            kind,
            in_progress,
            domain,
        });
    }

    // ============== Per-frame transform ==============

    /// Turn this frame's pointer ray into a delta and apply it.
    ///
    /// Returns the applied (possibly snapped) delta, or a neutral delta when
    /// idle.
    pub fn update_transform(
        &mut self,
        scene: &mut dyn Scene,
        look: Vec3,
        ray_origin: Vec3,
        ray_direction: Vec3,
    ) -> Transform {
        let domain = self.domain;
        if domain == Domain::None {
            return Transform::NEUTRAL_DELTA;
        }
        let Some(gizmo) = self.gizmo.as_mut() else {
            return Transform::NEUTRAL_DELTA;
        };

        let ray = RaySegment::from_ray(ray_origin, ray_direction, self.config.gizmo.ray_extent);
        let mut delta = gizmo.delta_transform(look, ray, domain);

        if let Some(snap) = self.config.snapping.get(gizmo.kind()).filter(|s| s.is_active()) {
            delta = gizmo.snapped_transform(&mut self.accumulator, &delta, domain, snap.value);
        }

        self.apply_delta_transform(scene, &delta);
        delta
    }

    /// Apply `delta` to every selected object around the gizmo pivot
    pub fn apply_delta_transform(&mut self, scene: &mut dyn Scene, delta: &Transform) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();
        let Some(gizmo) = self.gizmo.as_ref() else {
            return outcome;
        };

        let pivot = gizmo.location();
        let per_object_snap = self
            .config
            .snapping
            .get(gizmo.kind())
            .filter(|s| s.is_active() && s.per_object)
            .map(|s| s.value);

        for component in self.selection.iter() {
            let Some(current) = scene.world_transform(component) else {
                continue;
            };

            if scene.mobility(component) != Mobility::Movable {
                if self.config.force_mobility {
                    scene.set_mobility(component, Mobility::Movable);
                } else {
                    tracing::warn!(
                        "Component {} is not movable, skipping",
                        scene.component_name(component).unwrap_or("[INVALID]")
                    );
                    outcome.skipped.push(component);
                    continue;
                }
            }

            let mut offset = current.translation - pivot;
            if !self.config.rotate_on_local_axis {
                offset = delta.rotation * offset;
            }

            let mut next = Transform {
                rotation: (delta.rotation * current.rotation).normalize(),
                translation: pivot + offset + delta.translation,
                scale: current.scale + current.unrotate_vector(delta.scale),
            };
            if let Some(value) = per_object_snap {
                next = gizmo.snapped_transform_per_object(&current, &next, self.domain, value);
            }

            scene.set_world_transform(component, next);
            outcome.applied += 1;
        }

        self.place_gizmo(scene);
        outcome
    }

    // ============== Picking ==============

    /// Consume ordered hit records.
    ///
    /// A hit on one of the active gizmo's handles starts an interaction.
    /// Otherwise the first object hit is selected. Hits on foreign gizmos
    /// are ignored. Returns whether a hit was consumed.
    pub fn handle_traced_objects(&mut self, scene: &dyn Scene, hits: &[HitRecord], append: bool) -> bool {
        self.clear_domain();

        let gizmo_domain = self.gizmo.as_ref().and_then(|gizmo| {
            hits.iter().find_map(|hit| match hit.target {
                HitTarget::Gizmo { gizmo: id, handle } if id == gizmo.id() => {
                    Some(gizmo.domain_for_handle(handle)).filter(|d| *d != Domain::None)
                }
                _ => None,
            })
        });
        if let Some(domain) = gizmo_domain {
            self.set_domain(domain);
            return true;
        }

        let object = hits.iter().find_map(|hit| match hit.target {
            HitTarget::Object { owner, component } => Some((owner, component)),
            HitTarget::Gizmo { .. } => None,
        });
        match object {
            Some((owner, component)) => {
                if self.config.component_based {
                    self.select_component(scene, component, append);
                } else {
                    self.select_actor(scene, owner, append);
                }
                true
            }
            None => false,
        }
    }

    /// Trace a pointer ray through the scene and the active gizmo.
    ///
    /// When nothing is consumed and `append` is false, the selection is
    /// cleared.
    pub fn trace(
        &mut self,
        scene: &dyn Scene,
        caster: &dyn RayCaster,
        origin: Vec3,
        direction: Vec3,
        distance: f32,
        append: bool,
    ) -> bool {
        let direction = direction.normalize_or_zero();
        let ray = RaySegment::from_ray(origin, direction, distance);
        if !ray.is_valid() {
            return false;
        }

        let mut hits = caster.cast(ray.start, ray.end);
        if let Some(gizmo) = self.gizmo.as_ref() {
            if let Some(hit) = gizmo.hit_test(origin, direction) {
                if hit.distance <= distance {
                    hits.push(HitRecord {
                        target: HitTarget::Gizmo {
                            gizmo: gizmo.id(),
                            handle: hit.handle,
                        },
                        distance: hit.distance,
                    });
                }
            }
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let consumed = self.handle_traced_objects(scene, &hits, append);
        if !consumed && !append {
            self.deselect_all(scene);
        }
        consumed
    }

    // ============== Selection ==============

    /// Selected components in selection order
    pub fn selected_components(&self) -> &[ComponentId] {
        self.selection.as_slice()
    }

    /// Component the gizmo is placed on
    pub fn gizmo_anchor(&self) -> Option<ComponentId> {
        match self.config.placement {
            GizmoPlacement::FirstSelection => self.selection.first(),
            GizmoPlacement::LastSelection => self.selection.last(),
        }
    }

    pub fn select_component(&mut self, scene: &dyn Scene, component: ComponentId, append: bool) {
        let Some(owner) = scene.owner(component) else {
            return;
        };
        if !self.admits(owner, component) {
            return;
        }
        if !append {
            self.selection.clear();
        }
        self.add_component(component);
        self.update_gizmo_placement(scene);
    }

    /// Select an actor through its root component
    pub fn select_actor(&mut self, scene: &dyn Scene, actor: ActorId, append: bool) {
        let Some(root) = scene.root_component(actor) else {
            return;
        };
        if !self.admits(actor, root) {
            return;
        }
        if !append {
            self.selection.clear();
        }
        self.add_component(root);
        self.update_gizmo_placement(scene);
    }

    /// Batch select; the existing selection is only cleared once an
    /// admissible component is found
    pub fn select_multiple_components(&mut self, scene: &dyn Scene, components: &[ComponentId], append: bool) {
        let admitted: Vec<ComponentId> = components
            .iter()
            .copied()
            .filter(|c| scene.owner(*c).is_some_and(|owner| self.admits(owner, *c)))
            .collect();
        self.add_batch(scene, &admitted, append);
    }

    pub fn select_multiple_actors(&mut self, scene: &dyn Scene, actors: &[ActorId], append: bool) {
        let admitted: Vec<ComponentId> = actors
            .iter()
            .filter_map(|actor| {
                let root = scene.root_component(*actor)?;
                self.admits(*actor, root).then_some(root)
            })
            .collect();
        self.add_batch(scene, &admitted, append);
    }

    pub fn deselect_component(&mut self, scene: &dyn Scene, component: ComponentId) {
        self.selection.remove(component);
        self.update_gizmo_placement(scene);
    }

    pub fn deselect_actor(&mut self, scene: &dyn Scene, actor: ActorId) {
        if let Some(root) = scene.root_component(actor) {
            self.deselect_component(scene, root);
        }
    }

    /// Clear the selection, returning what was selected
    pub fn deselect_all(&mut self, scene: &dyn Scene) -> Vec<ComponentId> {
        let previous = self.selection.clear();
        self.update_gizmo_placement(scene);
        previous
    }

    /// Dump the selection to the log
    pub fn log_selected_components(&self, scene: &dyn Scene) {
        tracing::info!("Selected component count: {}", self.selection.len());
        for (index, component) in self.selection.iter().enumerate() {
            let name = scene.component_name(component).unwrap_or("[INVALID]");
            let owner = scene
                .owner(component)
                .and_then(|owner| scene.actor_name(owner))
                .unwrap_or("[INVALID]");
            tracing::info!("  [{}] Component: {}\tOwner: {}", index, name, owner);
        }
    }

    fn admits(&self, owner: ActorId, component: ComponentId) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter(owner, component))
    }

    /// Insert, or toggle off an already selected component when the
    /// toggle policy is on
    fn add_component(&mut self, component: ComponentId) {
        if !self.selection.push(component) && self.config.toggle_selected_in_multi_selection {
            self.selection.remove(component);
        }
    }

    fn add_batch(&mut self, scene: &dyn Scene, admitted: &[ComponentId], append: bool) {
        if admitted.is_empty() {
            return;
        }
        if !append {
            self.selection.clear();
        }
        for component in admitted {
            self.add_component(*component);
        }
        self.update_gizmo_placement(scene);
    }

    // ============== Gizmo lifecycle ==============

    /// Create, replace or destroy the gizmo to match the selection and
    /// transformation, then put it on its anchor.
    ///
    /// Components the scene no longer contains are dropped from the
    /// selection first.
    pub fn update_gizmo_placement(&mut self, scene: &dyn Scene) {
        let dropped = self.selection.retain(|component| scene.contains(component));
        if dropped > 0 {
            tracing::debug!("Dropped {} removed components from the selection", dropped);
        }
        self.sync_gizmo();
        self.accumulator.reset();
        self.place_gizmo(scene);
        self.scale_gizmo();
    }

    fn sync_gizmo(&mut self) {
        let wanted = (!self.selection.is_empty()).then_some(self.config.transformation);
        let current = self.gizmo.as_ref().map(|g| g.kind());
        if wanted == current {
            return;
        }

        if let Some(old) = self.gizmo.take() {
            tracing::debug!("Destroyed {} gizmo", old.kind().name());
            if self.domain != Domain::None {
                self.domain = Domain::None;
                self.notify(false, Domain::None);
            }
        }

        self.gizmo = wanted.and_then(|kind| Gizmo::spawn(kind, &self.config.gizmo));
        if let Some(gizmo) = &self.gizmo {
            tracing::debug!("Spawned {} gizmo", gizmo.kind().name());
        }
    }

    fn place_gizmo(&mut self, scene: &dyn Scene) {
        let anchor = self
            .gizmo_anchor()
            .and_then(|component| scene.world_transform(component));
        if let (Some(gizmo), Some(anchor)) = (self.gizmo.as_mut(), anchor) {
            gizmo.place(&anchor, self.config.space);
        }
    }

    fn scale_gizmo(&mut self) {
        if let (Some(gizmo), Some(camera)) = (self.gizmo.as_mut(), self.camera.as_ref()) {
            gizmo.scale_scene(camera);
        }
    }
}
