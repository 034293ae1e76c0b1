//! Entity registry
//!
//! Entities are opaque slotmap keys; components live in parallel secondary
//! maps keyed by entity. Queries are explicit iterations over the relevant
//! maps, so there is no inheritance and no downcasting anywhere.

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use super::model::Model;
use crate::physics::{Body, Particle};
use crate::render::Light;

new_key_type! {
    /// Opaque entity handle
    pub struct Entity;
}

/// Component store for all scene entities
#[derive(Default)]
pub struct Registry {
    entities: SlotMap<Entity, ()>,
    /// Placed model instances
    pub models: SecondaryMap<Entity, Model>,
    /// Light emitters
    pub lights: SecondaryMap<Entity, Light>,
    /// Simulated rigid bodies
    pub bodies: SecondaryMap<Entity, Body>,
    /// Particle lifetimes
    pub particles: SecondaryMap<Entity, Particle>,
    hidden: SecondaryMap<Entity, ()>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh entity with no components
    pub fn spawn(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Remove an entity and all of its components
    pub fn despawn(&mut self, entity: Entity) {
        self.entities.remove(entity);
        self.models.remove(entity);
        self.lights.remove(entity);
        self.bodies.remove(entity);
        self.particles.remove(entity);
        self.hidden.remove(entity);
    }

    /// Whether the entity still exists
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Hide or reveal an entity's model
    pub fn set_hidden(&mut self, entity: Entity, hidden: bool) {
        if hidden {
            self.hidden.insert(entity, ());
        } else {
            self.hidden.remove(entity);
        }
    }

    /// Whether the entity is hidden from rendering
    pub fn is_hidden(&self, entity: Entity) -> bool {
        self.hidden.contains_key(entity)
    }

    /// All entities with a model component that are not hidden, in insertion
    /// order of the model map
    pub fn visible_models(&self) -> impl Iterator<Item = (Entity, &Model)> {
        self.models
            .iter()
            .filter(|(entity, _)| !self.hidden.contains_key(*entity))
    }

    /// All light-emitting entities
    pub fn light_entities(&self) -> impl Iterator<Item = (Entity, &Light)> {
        self.lights.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{LightKind, Mesh};
    use nalgebra::Vector3;
    use std::sync::Arc;

    fn cube_model() -> Model {
        Model::new(Arc::new(Mesh::cube(1.0)))
    }

    #[test]
    fn spawn_and_despawn() {
        let mut reg = Registry::new();
        let e = reg.spawn();
        reg.models.insert(e, cube_model());
        assert!(reg.is_alive(e));
        assert_eq!(reg.len(), 1);

        reg.despawn(e);
        assert!(!reg.is_alive(e));
        assert!(reg.models.get(e).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn hidden_models_drop_out_of_visibility() {
        let mut reg = Registry::new();
        let a = reg.spawn();
        let b = reg.spawn();
        reg.models.insert(a, cube_model());
        reg.models.insert(b, cube_model());

        assert_eq!(reg.visible_models().count(), 2);
        reg.set_hidden(a, true);
        assert_eq!(reg.visible_models().count(), 1);
        reg.set_hidden(a, false);
        assert_eq!(reg.visible_models().count(), 2);
    }

    #[test]
    fn light_query_only_sees_lights() {
        let mut reg = Registry::new();
        let lit = reg.spawn();
        let unlit = reg.spawn();
        reg.lights.insert(
            lit,
            Light::point(
                Vector3::new(0.0, 1.0, 0.0),
                Vector3::new(1.0, 1.0, 1.0),
                2.0,
            ),
        );
        reg.models.insert(unlit, cube_model());

        let lights: Vec<_> = reg.light_entities().collect();
        assert_eq!(lights.len(), 1);
        assert_eq!(lights[0].0, lit);
        assert!(matches!(lights[0].1.kind, LightKind::Point));
    }

    #[test]
    fn stale_handles_stay_dead() {
        let mut reg = Registry::new();
        let e = reg.spawn();
        reg.despawn(e);
        let other = reg.spawn();
        assert!(!reg.is_alive(e));
        assert!(reg.is_alive(other));
    }
}
