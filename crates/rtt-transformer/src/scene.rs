//! Scene collaborator
//!
//! The transformer does not own objects. It reads and writes transforms
//! through the [`Scene`] trait; [`MemoryScene`] is a plain in-memory
//! implementation used by the sandbox and the tests.

use std::collections::HashMap;

use glam::Vec3;
use uuid::Uuid;

use rtt_core::Transform;
use rtt_gizmo::collision::ray_sphere_intersection;

use crate::hit::{HitRecord, HitTarget, RayCaster};

/// Identifier of an actor (an owner of components)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub Uuid);

/// Identifier of a scene component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub Uuid);

/// Whether an object may be moved at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mobility {
    Static,
    Stationary,
    #[default]
    Movable,
}

/// Object access used by the transform controller
pub trait Scene {
    /// Whether the component still exists
    fn contains(&self, component: ComponentId) -> bool;

    /// Actor owning a component
    fn owner(&self, component: ComponentId) -> Option<ActorId>;

    /// Root component of an actor
    fn root_component(&self, actor: ActorId) -> Option<ComponentId>;

    fn world_transform(&self, component: ComponentId) -> Option<Transform>;

    fn set_world_transform(&mut self, component: ComponentId, transform: Transform);

    fn mobility(&self, component: ComponentId) -> Mobility;

    fn set_mobility(&mut self, component: ComponentId, mobility: Mobility);

    /// Display name of a component
    fn component_name(&self, component: ComponentId) -> Option<&str>;

    /// Display name of an actor
    fn actor_name(&self, actor: ActorId) -> Option<&str>;
}

#[derive(Debug, Clone)]
struct ActorRecord {
    name: String,
    root: ComponentId,
}

#[derive(Debug, Clone)]
struct ComponentRecord {
    name: String,
    owner: ActorId,
    transform: Transform,
    mobility: Mobility,
    pick_radius: f32,
}

/// In-memory scene with sphere picking
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    actors: HashMap<ActorId, ActorRecord>,
    components: HashMap<ComponentId, ComponentRecord>,
}

impl MemoryScene {
    const DEFAULT_PICK_RADIUS: f32 = 0.5;

    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an actor with a root component at `transform`
    pub fn spawn_actor(&mut self, name: impl Into<String>, transform: Transform) -> (ActorId, ComponentId) {
        let name = name.into();
        let actor = ActorId(Uuid::new_v4());
        let root = ComponentId(Uuid::new_v4());
        self.components.insert(
            root,
            ComponentRecord {
                name: format!("{}Root", name),
                owner: actor,
                transform,
                mobility: Mobility::Movable,
                pick_radius: Self::DEFAULT_PICK_RADIUS,
            },
        );
        self.actors.insert(actor, ActorRecord { name, root });
        (actor, root)
    }

    /// Attach another component to an existing actor
    pub fn add_component(
        &mut self,
        actor: ActorId,
        name: impl Into<String>,
        transform: Transform,
    ) -> Option<ComponentId> {
        if !self.actors.contains_key(&actor) {
            return None;
        }
        let id = ComponentId(Uuid::new_v4());
        self.components.insert(
            id,
            ComponentRecord {
                name: name.into(),
                owner: actor,
                transform,
                mobility: Mobility::Movable,
                pick_radius: Self::DEFAULT_PICK_RADIUS,
            },
        );
        Some(id)
    }

    /// Remove an actor and all of its components
    pub fn despawn_actor(&mut self, actor: ActorId) {
        if self.actors.remove(&actor).is_some() {
            self.components.retain(|_, c| c.owner != actor);
        }
    }

    pub fn set_pick_radius(&mut self, component: ComponentId, radius: f32) {
        if let Some(record) = self.components.get_mut(&component) {
            record.pick_radius = radius;
        }
    }

    /// Number of live components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl Scene for MemoryScene {
    fn contains(&self, component: ComponentId) -> bool {
        self.components.contains_key(&component)
    }

    fn owner(&self, component: ComponentId) -> Option<ActorId> {
        self.components.get(&component).map(|c| c.owner)
    }

    fn root_component(&self, actor: ActorId) -> Option<ComponentId> {
        self.actors.get(&actor).map(|a| a.root)
    }

    fn world_transform(&self, component: ComponentId) -> Option<Transform> {
        self.components.get(&component).map(|c| c.transform)
    }

    fn set_world_transform(&mut self, component: ComponentId, transform: Transform) {
        if let Some(record) = self.components.get_mut(&component) {
            record.transform = transform;
        }
    }

    fn mobility(&self, component: ComponentId) -> Mobility {
        self.components
            .get(&component)
            .map_or(Mobility::Static, |c| c.mobility)
    }

    fn set_mobility(&mut self, component: ComponentId, mobility: Mobility) {
        if let Some(record) = self.components.get_mut(&component) {
            record.mobility = mobility;
        }
    }

    fn component_name(&self, component: ComponentId) -> Option<&str> {
        self.components.get(&component).map(|c| c.name.as_str())
    }

    fn actor_name(&self, actor: ActorId) -> Option<&str> {
        self.actors.get(&actor).map(|a| a.name.as_str())
    }
}

impl RayCaster for MemoryScene {
    /// Hits against each component's pick sphere, nearest first
    fn cast(&self, start: Vec3, end: Vec3) -> Vec<HitRecord> {
        let span = end - start;
        let max_distance = span.length();
        if max_distance <= f32::EPSILON {
            return Vec::new();
        }
        let dir = span / max_distance;

        let mut hits: Vec<HitRecord> = self
            .components
            .iter()
            .filter_map(|(id, record)| {
                let distance =
                    ray_sphere_intersection(start, dir, record.transform.translation, record.pick_radius)?;
                (distance <= max_distance).then_some(HitRecord {
                    target: HitTarget::Object {
                        owner: record.owner,
                        component: *id,
                    },
                    distance,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
