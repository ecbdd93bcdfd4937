use hecs::Entity;
use rapier3d::prelude::ColliderHandle;

/// A component that adds a `rapier` collider to an entity.
/// Essentially a wrapper around `ColliderHandle`
#[derive(Debug, Clone)]
pub struct Collider {
    /// Entities whose colliders are currently overlapping this one, as reported by trigger events
    pub collisions_this_frame: Vec<Entity>,
    /// Handle to the `rapier` Collider
    pub handle: ColliderHandle,
}

impl Collider {
    /// Create a new collider
    pub fn new(handle: ColliderHandle) -> Collider {
        Collider {
            collisions_this_frame: vec![],
            handle,
        }
    }

    /// Is `entity` overlapping this collider?
    pub fn is_touching(&self, entity: Entity) -> bool {
        self.collisions_this_frame.contains(&entity)
    }
}
