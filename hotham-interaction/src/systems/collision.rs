use hecs::World;
use log::trace;

use crate::{
    components::{Collider, Hand},
    contexts::PhysicsContext,
    Engine,
};

/// Collision system
/// Walks through each collider and checks if it has collided with any other entity
/// If collisions are detected they are added to `collisions_this_frame` for ease of reference.
pub fn collision_system(engine: &mut Engine) {
    let world = &mut engine.world;
    let physics_context = &mut engine.physics_context;
    collision_system_inner(world, physics_context);
}

/// Rebuild every [`Collider`]'s `collisions_this_frame` from the last physics step
pub fn collision_system_inner(world: &mut World, physics_context: &mut PhysicsContext) {
    for event in physics_context.collision_recv.try_iter() {
        trace!("[HOTHAM_COLLISION] {event:?}");
    }

    for (_, (collider, hand)) in world.query_mut::<(&mut Collider, Option<&Hand>)>() {
        // Clear out any collisions from previous frames.
        collider.collisions_this_frame.clear();

        // A hand that's holding something doesn't sense anything else
        if hand.map_or(false, |hand| !hand.grab_volume_enabled()) {
            continue;
        }

        for (a, b, intersecting) in physics_context
            .narrow_phase
            .intersections_with(collider.handle)
        {
            if !intersecting {
                continue;
            }
            let other = if a == collider.handle { b } else { a };
            if let Some(other_entity) = physics_context.entity_for_collider(other) {
                if !collider.is_touching(other_entity) {
                    collider.collisions_this_frame.push(other_entity);
                }
            }
        }
    }
}
