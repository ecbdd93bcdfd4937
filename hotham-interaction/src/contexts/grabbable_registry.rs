use hecs::Entity;

use crate::components::Grabbable;

/// The grabbables that are currently active, in the order they were registered.
///
/// Hands only ever consider entities in here, so an entity with a [`Grabbable`] that hasn't
/// been registered (or has been unregistered) can't be picked up.
#[derive(Debug, Clone, Default)]
pub struct GrabbableRegistry {
    all: Vec<Entity>,
    distance: Vec<Entity>,
}

impl GrabbableRegistry {
    /// Start tracking `entity`. Registering twice has no effect.
    pub fn register(&mut self, entity: Entity, grabbable: &Grabbable) {
        if !self.all.contains(&entity) {
            self.all.push(entity);
        }
        if grabbable.is_distance_grabbable && !self.distance.contains(&entity) {
            self.distance.push(entity);
        }
    }

    /// Stop tracking `entity`. Does nothing if it isn't registered.
    pub fn unregister(&mut self, entity: Entity) {
        self.all.retain(|e| *e != entity);
        self.distance.retain(|e| *e != entity);
    }

    /// Every active grabbable
    pub fn all_entities(&self) -> &[Entity] {
        &self.all
    }

    /// Every active grabbable that can be grabbed from a distance
    pub fn distance_entities(&self) -> &[Entity] {
        &self.distance
    }

    /// Is `entity` being tracked?
    pub fn contains(&self, entity: Entity) -> bool {
        self.all.contains(&entity)
    }
}
